//! The four-slot brand theme.

use serde::{Deserialize, Serialize};

use crate::color::{contrast_foreground, to_hsl, validate_color, Hsl};

/// A named color slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Primary,
    Secondary,
    Accent,
    Muted,
}

impl Slot {
    /// All slots in display order.
    pub const ALL: [Slot; 4] = [Slot::Primary, Slot::Secondary, Slot::Accent, Slot::Muted];

    /// Lowercase name, also used as the CSS custom property name.
    pub fn name(self) -> &'static str {
        match self {
            Slot::Primary => "primary",
            Slot::Secondary => "secondary",
            Slot::Accent => "accent",
            Slot::Muted => "muted",
        }
    }

    /// Capitalized label for display.
    pub fn label(self) -> &'static str {
        match self {
            Slot::Primary => "Primary",
            Slot::Secondary => "Secondary",
            Slot::Accent => "Accent",
            Slot::Muted => "Muted",
        }
    }

    /// Fixed foreground HSL paired with this slot in the stylesheet.
    ///
    /// These are a neutral light/dark pair and are not derived from the
    /// slot's actual color.
    pub fn fixed_foreground(self) -> &'static str {
        match self {
            Slot::Primary => "0 0% 98%",
            Slot::Secondary => "0 0% 9%",
            Slot::Accent => "0 0% 98%",
            Slot::Muted => "0 0% 45%",
        }
    }
}

/// A brand theme. Slots hold raw tokens and are not validated on construction.
///
/// Missing slots fall back to the default palette when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub muted: String,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: "#1a1a1a".to_string(),
            secondary: "#6b7280".to_string(),
            accent: "#3b82f6".to_string(),
            muted: "#f3f4f6".to_string(),
        }
    }
}

impl Theme {
    /// Raw token held by a slot.
    pub fn get(&self, slot: Slot) -> &str {
        match slot {
            Slot::Primary => &self.primary,
            Slot::Secondary => &self.secondary,
            Slot::Accent => &self.accent,
            Slot::Muted => &self.muted,
        }
    }

    /// Replace the token held by a slot.
    pub fn set(&mut self, slot: Slot, token: impl Into<String>) {
        let token = token.into();
        match slot {
            Slot::Primary => self.primary = token,
            Slot::Secondary => self.secondary = token,
            Slot::Accent => self.accent = token,
            Slot::Muted => self.muted = token,
        }
    }

    /// Slots whose tokens are malformed.
    pub fn invalid_slots(&self) -> Vec<Slot> {
        Slot::ALL
            .into_iter()
            .filter(|slot| !validate_color(self.get(*slot)))
            .collect()
    }

    /// Derived view of every slot, in display order.
    pub fn swatches(&self) -> Vec<Swatch> {
        Slot::ALL
            .into_iter()
            .map(|slot| Swatch::new(slot, self.get(slot)))
            .collect()
    }
}

/// A slot with its derived values, ready for templating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Swatch {
    pub slot: Slot,
    pub name: &'static str,
    pub label: &'static str,
    pub value: String,
    pub valid: bool,
    /// HSL triple, or `unknown`
    pub hsl: String,
    /// Legible text color, or `unknown`
    pub foreground: String,
    pub fixed_foreground: &'static str,
}

impl Swatch {
    fn new(slot: Slot, token: &str) -> Self {
        Self {
            slot,
            name: slot.name(),
            label: slot.label(),
            value: token.to_string(),
            valid: validate_color(token),
            hsl: to_hsl(token).map_or_else(|| crate::UNKNOWN.to_string(), |h: Hsl| h.to_string()),
            foreground: contrast_foreground(token)
                .unwrap_or(crate::UNKNOWN)
                .to_string(),
            fixed_foreground: slot.fixed_foreground(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_theme_is_valid() {
        let theme = Theme::default();
        assert!(theme.invalid_slots().is_empty());
        assert_eq!(theme.get(Slot::Accent), "#3b82f6");
    }

    #[test]
    fn reports_invalid_slots() {
        let mut theme = Theme::default();
        theme.set(Slot::Secondary, "gray");
        theme.set(Slot::Muted, "#fff");

        assert_eq!(theme.invalid_slots(), vec![Slot::Secondary, Slot::Muted]);
    }

    #[test]
    fn swatches_mark_unknown_derivations() {
        let mut theme = Theme::default();
        theme.set(Slot::Primary, "not-a-color");

        let swatches = theme.swatches();
        assert_eq!(swatches.len(), 4);
        assert_eq!(swatches[0].value, "not-a-color");
        assert!(!swatches[0].valid);
        assert_eq!(swatches[0].hsl, "unknown");
        assert_eq!(swatches[0].foreground, "unknown");
        assert_eq!(swatches[2].hsl, "217 91% 60%");
        assert_eq!(swatches[3].foreground, "#000000");
    }

    #[test]
    fn deserializes_from_toml() {
        let theme: Theme = toml::from_str(
            r##"
primary = "#000000"
secondary = "#111111"
accent = "#222222"
muted = "#333333"
"##,
        )
        .unwrap();

        assert_eq!(theme.muted, "#333333");
    }

    #[test]
    fn partial_theme_keeps_defaults() {
        let theme: Theme = toml::from_str(r##"accent = "#ff6600""##).unwrap();

        assert_eq!(theme.accent, "#ff6600");
        assert_eq!(theme.primary, Theme::default().primary);
    }
}
