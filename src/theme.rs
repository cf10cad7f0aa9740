//! Theme system for the TUI.
//!
//! Provides semantic color roles that map to ratatui `Style` values.
//! The `ThemeVariant` enum selects between Dark and Light palettes,
//! and `StyleMap` resolves role names to concrete styles.

use crate::display::CategoryColor;
use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Build the `ColorPalette` for this variant.
    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Cycle to the next variant: Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Human-readable name for status display.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Color Palette: semantic roles to Style
// ============================================================================

/// A complete color palette mapping every semantic UI role to a `Style`.
///
/// Each field corresponds to a specific visual element in the TUI.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Header --
    pub header_title: Style,
    pub header_meta: Style,
    pub stat_label: Style,
    pub stat_value: Style,

    // -- Category tabs --
    pub tab_active: Style,
    pub tab_inactive: Style,

    // -- News cards --
    pub card_title: Style,
    pub card_selected: Style,
    pub card_summary: Style,
    pub card_meta: Style,
    pub card_tags: Style,
    pub trending_badge: Style,
    pub load_more: Style,
    pub placeholder: Style,
    pub error: Style,

    // -- Chrome --
    pub status_bar: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            header_title: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            header_meta: Style::default().fg(Color::DarkGray),
            stat_label: Style::default().fg(Color::Gray),
            stat_value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            tab_active: Style::default()
                .bg(Color::Cyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),

            card_title: Style::default().add_modifier(Modifier::BOLD),
            card_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            card_summary: Style::default().fg(Color::Gray),
            card_meta: Style::default().fg(Color::DarkGray),
            card_tags: Style::default().fg(Color::Blue),
            trending_badge: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            load_more: Style::default().fg(Color::Yellow),
            placeholder: Style::default().fg(Color::DarkGray),
            error: Style::default().fg(Color::Red),

            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            panel_border: Style::default(),
            panel_border_focused: Style::default().fg(Color::Cyan),
        }
    }

    /// Light palette, adapted for light terminal backgrounds.
    fn light() -> Self {
        Self {
            header_title: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            header_meta: Style::default().fg(Color::DarkGray),
            stat_label: Style::default().fg(Color::DarkGray),
            stat_value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            tab_active: Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),

            card_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            card_selected: Style::default().bg(Color::Blue).fg(Color::White),
            card_summary: Style::default().fg(Color::DarkGray),
            card_meta: Style::default().fg(Color::DarkGray),
            card_tags: Style::default().fg(Color::Blue),
            trending_badge: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            load_more: Style::default().fg(Color::Magenta),
            placeholder: Style::default().fg(Color::DarkGray),
            error: Style::default().fg(Color::Red),

            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            panel_border: Style::default().fg(Color::DarkGray),
            panel_border_focused: Style::default().fg(Color::Blue),
        }
    }
}

/// Badge style for a category color. Identical across variants.
pub fn category_style(color: CategoryColor) -> Style {
    let fg = match color {
        CategoryColor::Blue => Color::Blue,
        CategoryColor::Red => Color::Red,
        CategoryColor::Green => Color::Green,
        CategoryColor::Purple => Color::Magenta,
        CategoryColor::Yellow => Color::Yellow,
        CategoryColor::Orange => Color::Rgb(234, 88, 12),
        CategoryColor::Indigo => Color::Rgb(79, 70, 229),
        CategoryColor::Pink => Color::LightMagenta,
        CategoryColor::Teal => Color::Cyan,
        CategoryColor::Gray => Color::Gray,
    };
    Style::default().fg(fg).add_modifier(Modifier::BOLD)
}

// ============================================================================
// Style Map: string-keyed lookup
// ============================================================================

/// String-keyed style lookup.
///
/// Built from a `ColorPalette`, this allows resolving role names (e.g.
/// `"tab_active"`) to their concrete `Style` at runtime.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

/// All semantic role names, in declaration order.
const ROLE_NAMES: [&str; 18] = [
    "header_title",
    "header_meta",
    "stat_label",
    "stat_value",
    "tab_active",
    "tab_inactive",
    "card_title",
    "card_selected",
    "card_summary",
    "card_meta",
    "card_tags",
    "trending_badge",
    "load_more",
    "placeholder",
    "error",
    "status_bar",
    "panel_border",
    "panel_border_focused",
];

impl StyleMap {
    /// Build a `StyleMap` from a `ColorPalette`.
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 18] = [
            p.header_title,
            p.header_meta,
            p.stat_label,
            p.stat_value,
            p.tab_active,
            p.tab_inactive,
            p.card_title,
            p.card_selected,
            p.card_summary,
            p.card_meta,
            p.card_tags,
            p.trending_badge,
            p.load_more,
            p.placeholder,
            p.error,
            p.status_bar,
            p.panel_border,
            p.panel_border_focused,
        ];

        let map = ROLE_NAMES.iter().copied().zip(styles).collect();
        Self { map }
    }

    /// Resolve a role name to its `Style`. Returns `Style::default()` for unknown roles.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::CATEGORY_COLORS;

    #[test]
    fn light_palette_differs_from_dark() {
        let dark = ThemeVariant::Dark.palette();
        let light = ThemeVariant::Light.palette();
        assert_ne!(dark.tab_active, light.tab_active);
        assert_ne!(dark.card_selected, light.card_selected);
        assert_ne!(dark.status_bar, light.status_bar);
    }

    #[test]
    fn active_and_inactive_tabs_differ() {
        for variant in [ThemeVariant::Dark, ThemeVariant::Light] {
            let p = variant.palette();
            assert_ne!(p.tab_active, p.tab_inactive, "{}", variant.name());
        }
    }

    #[test]
    fn variant_from_str_name() {
        assert_eq!(
            ThemeVariant::from_str_name("dark"),
            Some(ThemeVariant::Dark)
        );
        assert_eq!(
            ThemeVariant::from_str_name("Light"),
            Some(ThemeVariant::Light)
        );
        assert_eq!(ThemeVariant::from_str_name("neon"), None);
    }

    #[test]
    fn variant_cycles() {
        assert_eq!(ThemeVariant::Dark.next(), ThemeVariant::Light);
        assert_eq!(ThemeVariant::Light.next().next(), ThemeVariant::Light);
    }

    #[test]
    fn category_styles_are_distinct() {
        let styles: Vec<Style> = CATEGORY_COLORS.iter().map(|&(_, c)| category_style(c)).collect();
        for (i, a) in styles.iter().enumerate() {
            for b in &styles[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn style_map_resolves_known_roles() {
        let palette = ThemeVariant::Dark.palette();
        let sm = StyleMap::from_palette(&palette);

        assert_eq!(sm.resolve("tab_active"), palette.tab_active);
        assert_eq!(sm.resolve("load_more"), palette.load_more);
        assert_eq!(sm.resolve("status_bar"), palette.status_bar);
    }

    #[test]
    fn style_map_returns_default_for_unknown() {
        let sm = StyleMap::from_palette(&ThemeVariant::Dark.palette());
        assert_eq!(sm.resolve("nonexistent_role"), Style::default());
    }

    #[test]
    fn style_map_has_all_roles() {
        let sm = StyleMap::from_palette(&ThemeVariant::Light.palette());
        assert_eq!(sm.map.len(), ROLE_NAMES.len());
        for name in ROLE_NAMES {
            assert!(sm.map.contains_key(name), "Role '{}' missing from StyleMap", name);
        }
    }
}
