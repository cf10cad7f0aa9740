//! Keybinding registry: maps actions to key events with config overrides.
//!
//! Bindings are data, so users can remap them from the `[keybindings]`
//! table in config.toml.
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

// ============================================================================
// Action Enum
// ============================================================================

/// All user-facing actions that can be triggered by keybindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    NavDown,
    NavUp,
    NavTop,
    NavBottom,
    CycleFocus,
    Back,
    NextCategory,
    PrevCategory,
    LoadMore,
    OpenInBrowser,
    Refresh,
    CycleTheme,
    ShowHelp,
}

impl Action {
    /// Human-readable description for the help screen.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Quit => "Quit application",
            Self::NavDown => "Next news card",
            Self::NavUp => "Previous news card",
            Self::NavTop => "First news card",
            Self::NavBottom => "Last news card",
            Self::CycleFocus => "Switch between tabs and news",
            Self::Back => "Dismiss / back to tabs",
            Self::NextCategory => "Next category",
            Self::PrevCategory => "Previous category",
            Self::LoadMore => "Load more news",
            Self::OpenInBrowser => "Open article in browser",
            Self::Refresh => "Reload the feed",
            Self::CycleTheme => "Cycle theme",
            Self::ShowHelp => "Show help",
        }
    }
}

// ============================================================================
// Context Enum
// ============================================================================

/// Dispatch context; determines which bindings are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    Global,
    Tabs,
    NewsList,
}

impl Context {
    /// Section heading on the help screen.
    pub fn title(self) -> &'static str {
        match self {
            Self::Global => "Global",
            Self::Tabs => "Category tabs",
            Self::NewsList => "News list",
        }
    }
}

// ============================================================================
// Key Specification
// ============================================================================

/// A key event: code + modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpec {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeySpec {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }
}

/// Parse a key string from config into a KeySpec.
///
/// Supported formats:
/// - Single char: "q", "j", "/"
/// - Named keys: "Enter", "Esc", "Tab", "Up", "Down", "Home", "End", "Space"
/// - Modifier combos: "Ctrl+d", "Ctrl+u"
/// - Function keys: "F1" through "F12"
fn parse_key_string(s: &str) -> Option<KeySpec> {
    let s = s.trim();

    // Handle Ctrl+ prefix
    if let Some(rest) = s.strip_prefix("Ctrl+") {
        let rest = rest.trim();
        if rest.len() == 1 {
            let c = rest.chars().next()?;
            return Some(KeySpec::ctrl(c));
        }
        return None;
    }

    // Named keys (case-insensitive)
    match s.to_lowercase().as_str() {
        "enter" | "return" => return Some(KeySpec::plain(KeyCode::Enter)),
        "esc" | "escape" => return Some(KeySpec::plain(KeyCode::Esc)),
        "tab" => return Some(KeySpec::plain(KeyCode::Tab)),
        "up" => return Some(KeySpec::plain(KeyCode::Up)),
        "down" => return Some(KeySpec::plain(KeyCode::Down)),
        "left" => return Some(KeySpec::plain(KeyCode::Left)),
        "right" => return Some(KeySpec::plain(KeyCode::Right)),
        "backspace" => return Some(KeySpec::plain(KeyCode::Backspace)),
        "home" => return Some(KeySpec::plain(KeyCode::Home)),
        "end" => return Some(KeySpec::plain(KeyCode::End)),
        "space" => return Some(KeySpec::plain(KeyCode::Char(' '))),
        _ => {}
    }

    // Function keys
    if s.starts_with('F') || s.starts_with('f') {
        if let Ok(n) = s[1..].parse::<u8>() {
            if (1..=12).contains(&n) {
                return Some(KeySpec::plain(KeyCode::F(n)));
            }
        }
    }

    // Single character
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeySpec::plain(KeyCode::Char(c)));
    }

    None
}

/// Format a KeySpec as a human-readable string for the help screen.
fn format_key(key: &KeySpec) -> String {
    let modifier = if key.modifiers.contains(KeyModifiers::CONTROL) {
        "Ctrl+"
    } else {
        ""
    };

    let key_name = match key.code {
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => "?".to_string(),
    };

    format!("{}{}", modifier, key_name)
}

// ============================================================================
// Keybinding Registry
// ============================================================================

/// Registry of keybindings, supporting default bindings and config overrides.
///
/// Lookup is O(1) via HashMap. The registry supports context-aware dispatch:
/// the same key can map to different actions in different contexts.
pub struct KeybindingRegistry {
    /// Primary lookup: (Context, KeySpec) -> Action
    lookup: HashMap<(Context, KeySpec), Action>,
    /// All bindings for help screen enumeration
    bindings: Vec<(Context, KeySpec, Action)>,
}

impl KeybindingRegistry {
    /// Create a registry with the default bindings.
    pub fn new() -> Self {
        let mut registry = Self {
            lookup: HashMap::new(),
            bindings: Vec::new(),
        };
        registry.register_defaults();
        registry
    }

    /// Register a single binding.
    fn bind(&mut self, context: Context, key: KeySpec, action: Action) {
        self.lookup.insert((context, key), action);
        self.bindings.push((context, key, action));
    }

    /// Register the default bindings.
    fn register_defaults(&mut self) {
        use KeyCode::{Char, Down, End, Enter, Esc, Home, Left, Right, Tab, Up};

        // === Global ===
        self.bind(Context::Global, KeySpec::plain(Char('q')), Action::Quit);
        self.bind(Context::Global, KeySpec::plain(Tab), Action::CycleFocus);
        self.bind(Context::Global, KeySpec::plain(Esc), Action::Back);
        self.bind(Context::Global, KeySpec::plain(Char(']')), Action::NextCategory);
        self.bind(Context::Global, KeySpec::plain(Char('[')), Action::PrevCategory);
        self.bind(Context::Global, KeySpec::plain(Char('m')), Action::LoadMore);
        self.bind(Context::Global, KeySpec::plain(Char('r')), Action::Refresh);
        self.bind(Context::Global, KeySpec::plain(Char('T')), Action::CycleTheme);
        self.bind(Context::Global, KeySpec::plain(Char('?')), Action::ShowHelp);

        // === Category tabs ===
        self.bind(Context::Tabs, KeySpec::plain(Char('l')), Action::NextCategory);
        self.bind(Context::Tabs, KeySpec::plain(Right), Action::NextCategory);
        self.bind(Context::Tabs, KeySpec::plain(Char('h')), Action::PrevCategory);
        self.bind(Context::Tabs, KeySpec::plain(Left), Action::PrevCategory);
        self.bind(Context::Tabs, KeySpec::plain(Enter), Action::CycleFocus);
        self.bind(Context::Tabs, KeySpec::plain(Char('j')), Action::CycleFocus);
        self.bind(Context::Tabs, KeySpec::plain(Down), Action::CycleFocus);

        // === News list ===
        self.bind(Context::NewsList, KeySpec::plain(Char('j')), Action::NavDown);
        self.bind(Context::NewsList, KeySpec::plain(Down), Action::NavDown);
        self.bind(Context::NewsList, KeySpec::plain(Char('k')), Action::NavUp);
        self.bind(Context::NewsList, KeySpec::plain(Up), Action::NavUp);
        self.bind(Context::NewsList, KeySpec::plain(Char('g')), Action::NavTop);
        self.bind(Context::NewsList, KeySpec::plain(Home), Action::NavTop);
        self.bind(Context::NewsList, KeySpec::plain(Char('G')), Action::NavBottom);
        self.bind(Context::NewsList, KeySpec::plain(End), Action::NavBottom);
        self.bind(Context::NewsList, KeySpec::plain(Enter), Action::OpenInBrowser);
        self.bind(Context::NewsList, KeySpec::plain(Char('o')), Action::OpenInBrowser);
        self.bind(Context::NewsList, KeySpec::plain(Char('h')), Action::PrevCategory);
        self.bind(Context::NewsList, KeySpec::plain(Left), Action::PrevCategory);
        self.bind(Context::NewsList, KeySpec::plain(Char('l')), Action::NextCategory);
        self.bind(Context::NewsList, KeySpec::plain(Right), Action::NextCategory);
    }

    /// Apply user overrides from config keybindings map.
    ///
    /// Keys in the map are action names (e.g., "quit", "nav_down").
    /// Values are key strings (e.g., "q", "Ctrl+d", "F5").
    ///
    /// Returns a list of warnings for unrecognized action names or unparseable keys.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Vec<String> {
        let mut warnings = Vec::new();

        for (action_name, key_str) in overrides {
            let action = match parse_action_name(action_name) {
                Some(a) => a,
                None => {
                    warnings.push(format!("Unknown action '{}', ignoring", action_name));
                    continue;
                }
            };

            let key = match parse_key_string(key_str) {
                Some(k) => k,
                None => {
                    warnings.push(format!(
                        "Cannot parse key '{}' for action '{}', ignoring",
                        key_str, action_name
                    ));
                    continue;
                }
            };

            // Remove old bindings for this action (in all contexts where it's bound)
            let contexts_for_action: Vec<Context> = self
                .bindings
                .iter()
                .filter(|(_, _, a)| *a == action)
                .map(|(c, _, _)| *c)
                .collect();

            // Remove old entries from lookup
            self.lookup.retain(|_, a| *a != action);
            self.bindings.retain(|(_, _, a)| *a != action);

            // Re-bind in the same contexts with the new key
            for ctx in contexts_for_action {
                self.bind(ctx, key, action);
            }

            tracing::info!(
                action = %action_name,
                key = %key_str,
                "Applied keybinding override"
            );
        }

        warnings
    }

    /// Look up the action for a given key in a given context.
    ///
    /// Tries the specific context first, then falls back to Global.
    pub fn action_for_key(
        &self,
        code: KeyCode,
        modifiers: KeyModifiers,
        context: Context,
    ) -> Option<Action> {
        let key = KeySpec::new(code, modifiers);

        // Try specific context first
        if let Some(&action) = self.lookup.get(&(context, key)) {
            return Some(action);
        }

        // Fall back to Global (unless we're already looking at Global)
        if context != Context::Global {
            if let Some(&action) = self.lookup.get(&(Context::Global, key)) {
                return Some(action);
            }
        }

        None
    }

    /// Get all bindings for the help screen.
    ///
    /// Returns (context, key_display_string, action, description) tuples.
    pub fn all_bindings(&self) -> Vec<(Context, String, Action, &'static str)> {
        self.bindings
            .iter()
            .map(|(ctx, key, action)| (*ctx, format_key(key), *action, action.describe()))
            .collect()
    }
}

impl Default for KeybindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an action name string (from config) into an Action enum.
fn parse_action_name(name: &str) -> Option<Action> {
    match name.to_lowercase().as_str() {
        "quit" => Some(Action::Quit),
        "nav_down" | "navdown" | "down" => Some(Action::NavDown),
        "nav_up" | "navup" | "up" => Some(Action::NavUp),
        "nav_top" | "navtop" | "top" => Some(Action::NavTop),
        "nav_bottom" | "navbottom" | "bottom" => Some(Action::NavBottom),
        "cycle_focus" | "cyclefocus" | "focus" => Some(Action::CycleFocus),
        "back" => Some(Action::Back),
        "next_category" | "nextcategory" => Some(Action::NextCategory),
        "prev_category" | "prevcategory" | "previous_category" => Some(Action::PrevCategory),
        "load_more" | "loadmore" | "more" => Some(Action::LoadMore),
        "open_in_browser" | "openinbrowser" | "open" => Some(Action::OpenInBrowser),
        "refresh" | "reload" => Some(Action::Refresh),
        "cycle_theme" | "cycletheme" | "theme" => Some(Action::CycleTheme),
        "show_help" | "showhelp" | "help" => Some(Action::ShowHelp),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(reg: &KeybindingRegistry, code: KeyCode, context: Context) -> Option<Action> {
        reg.action_for_key(code, KeyModifiers::NONE, context)
    }

    #[test]
    fn test_default_registry_has_quit() {
        let reg = KeybindingRegistry::new();
        assert_eq!(lookup(&reg, KeyCode::Char('q'), Context::Global), Some(Action::Quit));
        // Falls back to Global from any context
        assert_eq!(lookup(&reg, KeyCode::Char('q'), Context::NewsList), Some(Action::Quit));
    }

    #[test]
    fn test_list_navigation() {
        let reg = KeybindingRegistry::new();
        assert_eq!(lookup(&reg, KeyCode::Char('j'), Context::NewsList), Some(Action::NavDown));
        assert_eq!(lookup(&reg, KeyCode::Down, Context::NewsList), Some(Action::NavDown));
        assert_eq!(lookup(&reg, KeyCode::Char('k'), Context::NewsList), Some(Action::NavUp));
        assert_eq!(lookup(&reg, KeyCode::Enter, Context::NewsList), Some(Action::OpenInBrowser));
    }

    #[test]
    fn test_tab_context_overrides_global() {
        let reg = KeybindingRegistry::new();
        assert_eq!(lookup(&reg, KeyCode::Right, Context::Tabs), Some(Action::NextCategory));
        assert_eq!(lookup(&reg, KeyCode::Char('h'), Context::Tabs), Some(Action::PrevCategory));
        // 'j' in tabs moves focus to the list rather than a card
        assert_eq!(lookup(&reg, KeyCode::Char('j'), Context::Tabs), Some(Action::CycleFocus));
        assert_eq!(lookup(&reg, KeyCode::Enter, Context::Tabs), Some(Action::CycleFocus));
    }

    #[test]
    fn test_category_keys_work_from_any_focus() {
        let reg = KeybindingRegistry::new();
        for ctx in [Context::Global, Context::Tabs, Context::NewsList] {
            assert_eq!(lookup(&reg, KeyCode::Char(']'), ctx), Some(Action::NextCategory));
            assert_eq!(lookup(&reg, KeyCode::Char('['), ctx), Some(Action::PrevCategory));
            assert_eq!(lookup(&reg, KeyCode::Char('m'), ctx), Some(Action::LoadMore));
        }
    }

    #[test]
    fn test_unknown_key_returns_none() {
        let reg = KeybindingRegistry::new();
        assert_eq!(lookup(&reg, KeyCode::F(12), Context::Global), None);
        assert_eq!(lookup(&reg, KeyCode::Char('o'), Context::Tabs), None);
    }

    #[test]
    fn test_apply_overrides_valid() {
        let mut reg = KeybindingRegistry::new();
        let mut overrides = HashMap::new();
        overrides.insert("quit".to_string(), "Ctrl+q".to_string());

        let warnings = reg.apply_overrides(&overrides);
        assert!(warnings.is_empty());

        assert_eq!(lookup(&reg, KeyCode::Char('q'), Context::Global), None);
        assert_eq!(
            reg.action_for_key(KeyCode::Char('q'), KeyModifiers::CONTROL, Context::Global),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_apply_overrides_unknown_action() {
        let mut reg = KeybindingRegistry::new();
        let mut overrides = HashMap::new();
        overrides.insert("toggle_star".to_string(), "s".to_string());

        let warnings = reg.apply_overrides(&overrides);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Unknown action"));
    }

    #[test]
    fn test_apply_overrides_bad_key() {
        let mut reg = KeybindingRegistry::new();
        let mut overrides = HashMap::new();
        overrides.insert("quit".to_string(), "Ctrl+Alt+Shift+Q".to_string());

        let warnings = reg.apply_overrides(&overrides);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Cannot parse key"));
    }

    #[test]
    fn test_override_preserves_contexts() {
        let mut reg = KeybindingRegistry::new();
        let mut overrides = HashMap::new();
        overrides.insert("next_category".to_string(), "n".to_string());
        assert!(reg.apply_overrides(&overrides).is_empty());

        for ctx in [Context::Global, Context::Tabs, Context::NewsList] {
            assert_eq!(lookup(&reg, KeyCode::Char('n'), ctx), Some(Action::NextCategory));
        }
        assert_eq!(lookup(&reg, KeyCode::Char(']'), Context::Global), None);
        assert_eq!(lookup(&reg, KeyCode::Right, Context::Tabs), None);
    }

    #[test]
    fn test_parse_key_string_named_keys() {
        assert_eq!(parse_key_string("Enter"), Some(KeySpec::plain(KeyCode::Enter)));
        assert_eq!(parse_key_string("esc"), Some(KeySpec::plain(KeyCode::Esc)));
        assert_eq!(parse_key_string("Home"), Some(KeySpec::plain(KeyCode::Home)));
        assert_eq!(parse_key_string("space"), Some(KeySpec::plain(KeyCode::Char(' '))));
    }

    #[test]
    fn test_parse_key_string_function_keys() {
        assert_eq!(parse_key_string("F5"), Some(KeySpec::plain(KeyCode::F(5))));
        assert_eq!(parse_key_string("F0"), None);
        assert_eq!(parse_key_string("F13"), None);
    }

    #[test]
    fn test_parse_key_string_ctrl_and_chars() {
        assert_eq!(parse_key_string("Ctrl+r"), Some(KeySpec::ctrl('r')));
        assert_eq!(parse_key_string("]"), Some(KeySpec::plain(KeyCode::Char(']'))));
        assert_eq!(parse_key_string("금"), Some(KeySpec::plain(KeyCode::Char('금'))));
        assert_eq!(parse_key_string("nope"), None);
    }

    #[test]
    fn test_every_action_is_bound_and_described() {
        let reg = KeybindingRegistry::new();
        let bindings = reg.all_bindings();
        for action in [
            Action::Quit,
            Action::NavDown,
            Action::NavUp,
            Action::NavTop,
            Action::NavBottom,
            Action::CycleFocus,
            Action::Back,
            Action::NextCategory,
            Action::PrevCategory,
            Action::LoadMore,
            Action::OpenInBrowser,
            Action::Refresh,
            Action::CycleTheme,
            Action::ShowHelp,
        ] {
            assert!(bindings.iter().any(|(_, _, a, _)| *a == action), "{action:?} unbound");
            assert!(!action.describe().is_empty());
        }
    }

    #[test]
    fn test_format_key_display() {
        assert_eq!(format_key(&KeySpec::plain(KeyCode::Char('q'))), "q");
        assert_eq!(format_key(&KeySpec::ctrl('d')), "Ctrl+d");
        assert_eq!(format_key(&KeySpec::plain(KeyCode::Enter)), "Enter");
        assert_eq!(format_key(&KeySpec::plain(KeyCode::End)), "End");
    }
}
