//! Render functions for the TUI.
//!
//! Lays out the header, category tabs, news list and status bar, then
//! draws the help overlay on top when it is open.

use crate::app::App;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    widgets::Paragraph,
    Frame,
};

use super::{header, help, news, status, tabs};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 60;
pub(super) const MIN_HEIGHT: u16 = 12;

/// Main render function.
///
/// Handles terminal size validation before rendering.
pub(super) fn render(f: &mut Frame, app: &App) {
    let area = f.area();

    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header::HEIGHT),
            Constraint::Length(tabs::HEIGHT),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(area);

    header::render(f, app, chunks[0]);
    tabs::render(f, app, chunks[1]);
    news::render(f, app, chunks[2]);
    status::render(f, app, chunks[3]);

    if app.show_help {
        help::render(f, app);
    }
}
