use crate::app::{App, FeedStatus, Focus};
use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

/// Render the status bar
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.width < 1 || area.height < 1 {
        return;
    }

    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_ref())
    } else if app.loading {
        Cow::Borrowed("Loading feed...")
    } else if let FeedStatus::Failed(error) = &app.feed_status {
        Cow::Owned(format!("{} | [r]etry [q]uit", error))
    } else {
        match app.focus {
            Focus::Tabs => Cow::Borrowed("[h/l]category [Tab]news [r]efresh [?]help [q]uit"),
            Focus::NewsList => Cow::Borrowed(
                "[j/k]move [o]pen [m]ore [[/]]category [Tab]tabs [r]efresh [?]help [q]uit",
            ),
        }
    };

    let paragraph = Paragraph::new(text).style(app.style("status_bar"));
    f.render_widget(paragraph, area);
}
