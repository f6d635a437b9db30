//! Inter-element spacing table.
//!
//! TeX rule 20: the space between two adjacent atoms depends only on their
//! spacing classes and the line style. The table is a constant 9x8 matrix of
//! space categories in math units; script-sensitive entries collapse to zero
//! in script styles. A radical has its own class only as the left operand;
//! on the right it spaces like an ordinary atom.

use crate::atom::AtomKind;
use crate::error::{LayoutError, LayoutErrorKind};
use crate::style::LineStyle;
use strum::Display;

/// Category of space between two atoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Space {
    /// The pairing never occurs in well-formed input.
    Invalid,
    /// No space.
    None,
    /// 3 mu in every style.
    Thin,
    /// 3 mu, dropped in script styles.
    NsThin,
    /// 4 mu, dropped in script styles.
    NsMedium,
    /// 5 mu, dropped in script styles.
    NsThick,
}

impl Space {
    /// The space in math units for a style, or `None` for an invalid
    /// pairing.
    #[must_use]
    pub const fn length_in_mu(self, style: LineStyle) -> Option<f64> {
        match self {
            Self::Invalid => None,
            Self::None => Some(0.0),
            Self::Thin => Some(3.0),
            Self::NsThin => Some(if style.is_script() { 0.0 } else { 3.0 }),
            Self::NsMedium => Some(if style.is_script() { 0.0 } else { 4.0 }),
            Self::NsThick => Some(if style.is_script() { 0.0 } else { 5.0 }),
        }
    }
}

/// Spacing class of an atom, as used to index the table.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum SpacingClass {
    /// Ordinary runs, placeholders, colored lists and other box-like atoms.
    Ordinary,
    /// Large operators.
    Operator,
    /// Binary operators.
    Binary,
    /// Relations.
    Relation,
    /// Opening delimiters.
    Open,
    /// Closing delimiters.
    Close,
    /// Punctuation.
    Punctuation,
    /// Fractions and inner lists.
    Fraction,
    /// Radicals, left side only.
    Radical,
}

impl SpacingClass {
    const fn row(self) -> usize {
        match self {
            Self::Ordinary => 0,
            Self::Operator => 1,
            Self::Binary => 2,
            Self::Relation => 3,
            Self::Open => 4,
            Self::Close => 5,
            Self::Punctuation => 6,
            Self::Fraction => 7,
            Self::Radical => 8,
        }
    }

    /// The class of an atom kind when it stands on the given side of the
    /// pair. `None` for a stray boundary.
    #[must_use]
    pub fn of(kind: &AtomKind, left_side: bool) -> Option<Self> {
        Some(match kind {
            AtomKind::Boundary => return None,
            AtomKind::LargeOperator { .. } => Self::Operator,
            AtomKind::BinaryOperator => Self::Binary,
            AtomKind::Relation => Self::Relation,
            AtomKind::Open => Self::Open,
            AtomKind::Close => Self::Close,
            AtomKind::Punctuation => Self::Punctuation,
            AtomKind::Fraction { .. } | AtomKind::Inner { .. } => Self::Fraction,
            AtomKind::Radical { .. } if left_side => Self::Radical,
            // Radicals on the right, character atoms and the remaining
            // box-like kinds all space as ordinary.
            _ => Self::Ordinary,
        })
    }
}

use Space::{Invalid, None as Zero, NsMedium, NsThick, NsThin, Thin};

/// Rows are the left class, columns the right class (radicals never appear
/// on the right).
const SPACES: [[Space; 8]; 9] = [
    //  ord       op        bin       rel       open      close     punct     frac
    [Zero, Thin, NsMedium, NsThick, Zero, Zero, Zero, NsThin], // ordinary
    [Thin, Thin, Invalid, NsThick, Zero, Zero, Zero, NsThin],  // operator
    [NsMedium, NsMedium, Invalid, Invalid, NsMedium, Invalid, Invalid, NsMedium], // binary
    [NsThick, NsThick, Invalid, Zero, NsThick, Zero, Zero, NsThick], // relation
    [Zero, Zero, Invalid, Zero, Zero, Zero, Zero, Zero],       // open
    [Zero, Thin, NsMedium, NsThick, Zero, Zero, Zero, NsThin], // close
    [NsThin, NsThin, Invalid, NsThin, NsThin, NsThin, NsThin, NsThin], // punctuation
    [NsThin, Thin, NsMedium, NsThick, NsThin, Zero, NsThin, NsThin], // fraction
    [NsMedium, NsThin, NsMedium, NsThick, NsMedium, Zero, NsThin, NsMedium], // radical
];

/// The inter-element space between two adjacent atoms, in math units.
///
/// Fails on a pairing the table marks invalid, and on a stray boundary atom.
pub fn inter_element_space_mu(
    left: &AtomKind,
    right: &AtomKind,
    style: LineStyle,
) -> Result<f64, LayoutError> {
    let stray = || LayoutError::new(LayoutErrorKind::StrayBoundary);
    let left_class = SpacingClass::of(left, true).ok_or_else(stray)?;
    let right_class = SpacingClass::of(right, false).ok_or_else(stray)?;
    let space = SPACES[left_class.row()][right_class.row()];
    space.length_in_mu(style).ok_or_else(|| {
        LayoutError::new(LayoutErrorKind::InvalidSpacing {
            left: left.to_string(),
            right: right.to_string(),
        })
    })
}
