use crate::app::App;
use crate::display::RECENT_WINDOW_HOURS;
use crate::util::format_last_updated;
use crate::APP_TITLE;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Rows the header occupies.
pub(super) const HEIGHT: u16 = 2;

/// Render the title, "last updated" line and feed stats.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    if area.height < 1 {
        return;
    }

    let title = Line::from(vec![
        Span::styled(APP_TITLE, app.style("header_title")),
        Span::styled(
            format!("  Last updated: {}", format_last_updated(app.generated_at)),
            app.style("header_meta"),
        ),
    ]);

    let label = app.style("stat_label");
    let value = app.style("stat_value");
    let stats = Line::from(vec![
        Span::styled("Total ", label),
        Span::styled(app.stats.total.to_string(), value),
        Span::styled(format!("   Last {RECENT_WINDOW_HOURS} hours "), label),
        Span::styled(app.stats.recent.to_string(), value),
        Span::styled("   Trending ", label),
        Span::styled(app.stats.trending.to_string(), value),
    ]);

    f.render_widget(Paragraph::new(vec![title, stats]), area);
}
