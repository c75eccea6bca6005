use crate::model::HeaderSettings;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Custom property carrying the on-scroll header background.
pub const BG_ON_SCROLL_VAR: &str = "--header-bg-on-scroll";
/// Custom property carrying the on-scroll header text color.
pub const TEXT_ON_SCROLL_VAR: &str = "--header-text-on-scroll";

/// CSS custom properties declared inline on an element (`--name: value;`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CssVariables {
    vars: HashMap<String, String>,
}

impl CssVariables {
    pub fn parse(style: &str) -> Self {
        let vars = style
            .split(';')
            .filter_map(|decl| decl.split_once(':'))
            .map(|(name, value)| (name.trim(), value.trim()))
            .filter(|(name, value)| name.starts_with("--") && !value.is_empty())
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        Self { vars }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Resolved on-scroll colors for the header chrome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderTheme {
    pub background_on_scroll: Option<String>,
    pub text_on_scroll: Option<String>,
}

impl HeaderTheme {
    /// Content-container custom properties win over the header settings.
    pub fn resolve(css: &CssVariables, settings: &HeaderSettings) -> Self {
        let pick = |var: &str, fallback: &Option<String>| {
            css.get(var)
                .map(str::to_string)
                .or_else(|| fallback.clone())
        };
        Self {
            background_on_scroll: pick(BG_ON_SCROLL_VAR, &settings.background_on_scroll),
            text_on_scroll: pick(TEXT_ON_SCROLL_VAR, &settings.text_on_scroll),
        }
    }
}

/// Menu item colors, chosen by `(reversed, hovered)`.
///
/// An unset hover color falls back to its non-hover sibling; an unset reverse color
/// falls back to the normal color for the same hover state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItemColors {
    #[serde(default)]
    pub text_color: Option<String>,
    #[serde(default)]
    pub hover_text_color: Option<String>,
    #[serde(default)]
    pub reverse_text_color: Option<String>,
    #[serde(default)]
    pub reverse_hover_text_color: Option<String>,
}

impl MenuItemColors {
    pub fn pick(&self, reversed: bool, hovered: bool) -> Option<&str> {
        let normal = self.text_color.as_deref();
        let hover = self.hover_text_color.as_deref().or(normal);
        let reverse = self.reverse_text_color.as_deref().or(normal);
        let reverse_hover = self.reverse_hover_text_color.as_deref().or(reverse);

        match (reversed, hovered) {
            (false, false) => normal,
            (false, true) => hover,
            (true, false) => reverse,
            (true, true) => reverse_hover,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HamburgerColors {
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub reverse_color: Option<String>,
}

impl HamburgerColors {
    pub fn pick(&self, reversed: bool) -> Option<&str> {
        if reversed {
            self.reverse_color.as_deref().or(self.color.as_deref())
        } else {
            self.color.as_deref()
        }
    }
}
