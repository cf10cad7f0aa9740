//! Input handling for the TUI.
//!
//! Keys are resolved to actions through the keybinding registry, using the
//! focused region as the lookup context.

use crate::app::{App, AppEvent, Focus};
use crate::keybindings::{Action as KbAction, Context as KbContext};
use crate::util::validate_url_for_open;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use super::helpers::spawn_feed_load;
use super::Action;

/// Map the focused region to a keybinding context for context-specific lookups.
fn focus_to_context(focus: Focus) -> KbContext {
    match focus {
        Focus::Tabs => KbContext::Tabs,
        Focus::NewsList => KbContext::NewsList,
    }
}

/// Crossterm reports uppercase letters with SHIFT set; bindings are stored
/// by character alone.
fn normalize_modifiers(code: KeyCode, modifiers: KeyModifiers) -> KeyModifiers {
    match code {
        KeyCode::Char(_) => modifiers.difference(KeyModifiers::SHIFT),
        _ => modifiers,
    }
}

/// Main input dispatch function.
pub(super) fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    // Help overlay captures all keys when visible
    if app.show_help {
        return Ok(handle_help_input(app, code));
    }

    handle_browse_input(app, code, modifiers, event_tx)
}

/// Handle input while the help overlay is visible.
///
/// Captures all keys: j/k/Up/Down scroll, Esc/q/? dismiss.
fn handle_help_input(app: &mut App, code: KeyCode) -> Action {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            app.show_help = false;
            app.help_scroll_offset = 0;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_sub(1);
        }
        _ => {}
    }
    Action::Continue
}

fn handle_browse_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    let context = focus_to_context(app.focus);
    let modifiers = normalize_modifiers(code, modifiers);
    let Some(action) = app.keybindings.action_for_key(code, modifiers, context) else {
        return Ok(Action::Continue);
    };

    tracing::trace!(?action, ?context, "Key dispatched");

    match action {
        KbAction::Quit => return Ok(Action::Quit),
        KbAction::Back => {
            if app.focus == Focus::NewsList {
                app.focus = Focus::Tabs;
            }
        }
        KbAction::CycleFocus => app.cycle_focus(),
        KbAction::NavDown => app.nav_down(),
        KbAction::NavUp => app.nav_up(),
        KbAction::NavTop => app.nav_top(),
        KbAction::NavBottom => app.nav_bottom(),
        KbAction::NextCategory => app.next_category(),
        KbAction::PrevCategory => app.prev_category(),
        KbAction::LoadMore => {
            if app.load_failed() {
                app.set_status("Feed unavailable; press r to retry");
            } else if app.load_more() == 0 {
                app.set_status("No more news in this category");
            }
        }
        KbAction::OpenInBrowser => open_selected(app),
        KbAction::Refresh => {
            app.set_status("Refreshing feed...");
            spawn_feed_load(app, event_tx);
        }
        KbAction::CycleTheme => {
            let name = app.cycle_theme();
            app.set_status(format!("Theme: {}", name));
        }
        KbAction::ShowHelp => {
            app.show_help = true;
            app.help_scroll_offset = 0;
        }
    }

    Ok(Action::Continue)
}

/// Open the card under the cursor in the system browser.
fn open_selected(app: &mut App) {
    let Some(item) = app.selected_item() else {
        app.set_status("No news selected");
        return;
    };

    // Validate before open::that() so feed-supplied links cannot launch
    // arbitrary handlers
    match validate_url_for_open(&item.url) {
        Err(e) => app.set_status(e.to_string()),
        Ok(url) => {
            if let Err(e) = open::that(url.as_str()) {
                tracing::warn!(url = %url, error = %e, "Failed to open browser");
                app.set_status(format!("Failed to open browser: {}", e));
            } else {
                app.set_status("Opened in browser");
            }
        }
    }
}
