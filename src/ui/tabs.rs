use crate::app::{App, Focus};
use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, Tabs},
    Frame,
};

/// Rows the tab bar occupies, borders included.
pub(super) const HEIGHT: u16 = 3;

/// Render the category tab bar.
///
/// The active tab uses the `tab_active` role; when no tab is active (a
/// category was selected that the feed does not contain) nothing is
/// highlighted.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let border_style = if app.focus == Focus::Tabs {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };

    let titles: Vec<&str> = app.tabs.tabs().iter().map(|tab| tab.label()).collect();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title("Categories"),
        )
        .style(app.style("tab_inactive"))
        .select(app.tabs.active_index())
        .highlight_style(app.style("tab_active"))
        .divider(" ");

    f.render_widget(tabs, area);
}
