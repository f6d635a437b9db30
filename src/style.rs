//! Line style definitions and transitions.
//!
//! This module contains the four TeX line styles used during layout. A style
//! determines the font scale of a sub-list and which metric constants apply;
//! stepping rules describe which style a nested construct (script, fraction
//! part) is set in. Cramping is tracked separately by the typesetter, as a
//! flag alongside the style.

use strum::Display;

/// The style a math list is laid out in, ordered from largest to smallest.
///
/// Each level maps to a font-size scale factor supplied by the metrics
/// provider; `ScriptScript` is the floor and never steps further down.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LineStyle {
    /// Equation-on-its-own-line size, full-height operators and limits.
    Display,
    /// Inline size, matching the surrounding text.
    Text,
    /// First size reduction, used for scripts.
    Script,
    /// Second and final size reduction, used for scripts of scripts.
    ScriptScript,
}

impl LineStyle {
    /// The style of a superscript or subscript attached in this style.
    #[must_use]
    pub const fn script_style(self) -> Self {
        match self {
            Self::Display | Self::Text => Self::Script,
            Self::Script | Self::ScriptScript => Self::ScriptScript,
        }
    }

    /// The style of a fraction numerator or denominator set in this style.
    #[must_use]
    pub const fn fraction_style(self) -> Self {
        match self {
            Self::Display => Self::Text,
            Self::Text => Self::Script,
            Self::Script | Self::ScriptScript => Self::ScriptScript,
        }
    }

    /// Whether this style is one of the reduced script sizes. Inter-element
    /// spacing entries marked script-sensitive collapse to zero here.
    #[must_use]
    pub const fn is_script(self) -> bool {
        matches!(self, Self::Script | Self::ScriptScript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_style() {
        assert_eq!(LineStyle::Display.script_style(), LineStyle::Script);
        assert_eq!(LineStyle::Text.script_style(), LineStyle::Script);
        assert_eq!(LineStyle::Script.script_style(), LineStyle::ScriptScript);
        assert_eq!(
            LineStyle::ScriptScript.script_style(),
            LineStyle::ScriptScript
        );
    }

    #[test]
    fn test_fraction_style() {
        assert_eq!(LineStyle::Display.fraction_style(), LineStyle::Text);
        assert_eq!(LineStyle::Text.fraction_style(), LineStyle::Script);
        assert_eq!(LineStyle::Script.fraction_style(), LineStyle::ScriptScript);
        assert_eq!(
            LineStyle::ScriptScript.fraction_style(),
            LineStyle::ScriptScript
        );
    }

    #[test]
    fn test_is_script() {
        assert!(!LineStyle::Display.is_script());
        assert!(!LineStyle::Text.is_script());
        assert!(LineStyle::Script.is_script());
        assert!(LineStyle::ScriptScript.is_script());
    }

    #[test]
    fn test_ordering() {
        assert!(LineStyle::Display < LineStyle::Text);
        assert!(LineStyle::Text < LineStyle::Script);
        assert!(LineStyle::Script < LineStyle::ScriptScript);
    }
}
