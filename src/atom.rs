//! Math atoms and math lists, the input data model of the layout engine.
//!
//! A [`MathAtom`] is a single semantic element of a formula: a character run,
//! an operator, a fraction, a radical, and so on. The kind-specific payload
//! lives in the closed [`AtomKind`] enum so the layout dispatcher can match
//! exhaustively; nucleus text, scripts, font style and source range are
//! common to every kind. A [`MathList`] is an ordered sequence of atoms and
//! is the unit of recursive layout input.

extern crate alloc;

use crate::error::{LayoutError, LayoutErrorKind};
use crate::style::LineStyle;
use alloc::string::String;
use alloc::vec::Vec;
use bon::Builder;
use core::str::FromStr;
use strum::Display;

/// A half-open range of character indices into the source expression.
///
/// Sibling atoms carry disjoint ranges in source order; fusing two atoms
/// concatenates their ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Range {
    /// Index of the first covered character.
    pub location: usize,
    /// Number of covered characters.
    pub length: usize,
}

impl Range {
    /// Create a range from a start index and length.
    #[must_use]
    pub const fn new(location: usize, length: usize) -> Self {
        Self { location, length }
    }

    /// One past the last covered index.
    #[must_use]
    pub const fn end(self) -> usize {
        self.location + self.length
    }

    /// Extend this range to also cover `other`.
    #[must_use]
    pub fn union(self, other: Self) -> Self {
        if self.length == 0 {
            return other;
        }
        if other.length == 0 {
            return self;
        }
        let location = self.location.min(other.location);
        Self::new(location, self.end().max(other.end()) - location)
    }
}

/// Font style requested for an atom's nucleus, resolved by the preprocessor
/// into Unicode mathematical-alphabet code points.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontStyle {
    /// Roman for numbers, italic for variables.
    #[default]
    Default,
    /// Upright roman.
    Roman,
    /// Bold upright.
    Bold,
    /// Italic.
    Italic,
    /// Bold italic.
    BoldItalic,
    /// Calligraphic / script.
    Caligraphic,
    /// Monospaced.
    Typewriter,
    /// Sans-serif.
    SansSerif,
    /// Fraktur.
    Fraktur,
    /// Double-struck.
    Blackboard,
}

/// Unit of an explicit space length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    /// Absolute points.
    Point,
    /// Multiples of the sized font's point size.
    Em,
    /// Math units; 1/18 of an em by convention, supplied by the metrics
    /// provider.
    Mu,
}

/// An explicit length carried by a space or raise-box atom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length {
    /// Magnitude in `unit`s.
    pub value: f64,
    /// Unit the magnitude is expressed in.
    pub unit: LengthUnit,
}

impl Length {
    /// A length of the given number of points.
    #[must_use]
    pub const fn points(value: f64) -> Self {
        Self {
            value,
            unit: LengthUnit::Point,
        }
    }

    /// A length of the given number of ems.
    #[must_use]
    pub const fn ems(value: f64) -> Self {
        Self {
            value,
            unit: LengthUnit::Em,
        }
    }

    /// A length of the given number of math units.
    #[must_use]
    pub const fn mus(value: f64) -> Self {
        Self {
            value,
            unit: LengthUnit::Mu,
        }
    }
}

/// An RGBA color attached to a color-change atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel, 255 is opaque.
    pub a: u8,
}

impl FromStr for Color {
    type Err = LayoutError;

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` literals.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || {
            LayoutError::new(LayoutErrorKind::InvalidColor {
                value: s.to_owned(),
            })
        };
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |range: core::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid())
        };
        match hex.len() {
            3 => {
                let wide = |i: usize| channel(i..i + 1).map(|v| v * 17);
                Ok(Self {
                    r: wide(0)?,
                    g: wide(1)?,
                    b: wide(2)?,
                    a: 255,
                })
            }
            6 => Ok(Self {
                r: channel(0..2)?,
                g: channel(2..4)?,
                b: channel(4..6)?,
                a: 255,
            }),
            8 => Ok(Self {
                r: channel(0..2)?,
                g: channel(2..4)?,
                b: channel(4..6)?,
                a: channel(6..8)?,
            }),
            _ => Err(invalid()),
        }
    }
}

/// Horizontal alignment of the cells in one table column.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnAlignment {
    /// Flush with the column start.
    Left,
    /// Centered within the column.
    #[default]
    Center,
    /// Flush with the column end.
    Right,
}

/// Payload of a table atom: a grid of cell lists plus column alignments and
/// spacing factors.
#[derive(Debug, Clone, PartialEq, Default, Builder)]
pub struct Table {
    /// Rows of cell lists. Rows may be ragged; missing cells are empty.
    #[builder(default)]
    pub cells: Vec<Vec<MathList>>,
    /// Per-column alignments. Columns beyond the end of this list center.
    #[builder(default)]
    pub alignments: Vec<ColumnAlignment>,
    /// Space between adjacent columns, in math units.
    #[builder(default = 18.0)]
    pub inter_column_spacing: f64,
    /// Additional space between adjacent rows, in jots.
    #[builder(default)]
    pub inter_row_additional_spacing: f64,
}

impl Table {
    /// Number of columns (width of the widest row).
    #[must_use]
    pub fn n_columns(&self) -> usize {
        self.cells.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.cells.len()
    }

    /// Alignment of the given column, defaulting to centered.
    #[must_use]
    pub fn alignment(&self, column: usize) -> ColumnAlignment {
        self.alignments.get(column).copied().unwrap_or_default()
    }
}

/// Kind-specific payload of a [`MathAtom`].
///
/// The first group of kinds carries no payload beyond the atom's common
/// fields and renders as glyph runs; the rest carry nested lists and are laid
/// out by dedicated recipes.
#[derive(Debug, Display, Clone, PartialEq)]
pub enum AtomKind {
    /// A plain character or fused run of characters.
    Ordinary,
    /// A numeric literal; preprocessing folds it into [`AtomKind::Ordinary`].
    Number,
    /// A variable; preprocessing folds it into [`AtomKind::Ordinary`] after
    /// applying the font style.
    Variable,
    /// A unary operator; preprocessing folds it into [`AtomKind::Ordinary`].
    UnaryOperator,
    /// A binary operator such as `+`.
    BinaryOperator,
    /// A relation such as `=`.
    Relation,
    /// An opening bracket.
    Open,
    /// A closing bracket.
    Close,
    /// Punctuation such as a comma.
    Punctuation,
    /// An empty slot an editor may paint distinctly.
    Placeholder,
    /// A prime mark; transparent to the next spacing decision.
    Prime,
    /// A delimiter string owned by an [`AtomKind::Inner`]; seeing one in a
    /// general list is an invariant violation.
    Boundary,
    /// Explicit horizontal space.
    Space(Length),
    /// Switch the remainder of the list to the given style.
    StyleChange(LineStyle),
    /// Color the inner list.
    Color {
        /// Color applied to every node of the inner layout.
        color: Color,
        /// The sub-list being colored.
        inner: MathList,
    },
    /// A radical sign over a radicand, with an optional degree.
    Radical {
        /// Content under the radical sign.
        radicand: MathList,
        /// Optional degree, set in script style above-left.
        degree: Option<MathList>,
    },
    /// A fraction or rule-less stack, with optional side delimiters.
    Fraction {
        /// Numerator sub-list.
        numerator: MathList,
        /// Denominator sub-list.
        denominator: MathList,
        /// Whether a fraction bar is drawn between the parts.
        has_rule: bool,
        /// Optional delimiter character(s) to the left.
        left_delimiter: Option<String>,
        /// Optional delimiter character(s) to the right.
        right_delimiter: Option<String>,
    },
    /// A nested list, optionally wrapped in sized boundary delimiters.
    Inner {
        /// The nested sub-list.
        inner: MathList,
        /// Left boundary delimiter, empty string for none.
        left_boundary: Option<String>,
        /// Right boundary delimiter, empty string for none.
        right_boundary: Option<String>,
    },
    /// A rule drawn under the inner list.
    Underline(MathList),
    /// A rule drawn over the inner list.
    Overline(MathList),
    /// An accent mark over the inner list; the accent character is the
    /// atom's nucleus.
    Accent(MathList),
    /// A matrix or aligned table.
    Table(Table),
    /// An operator that may enlarge in display style and stack its scripts
    /// as limits.
    LargeOperator {
        /// `Some(true)` forces limits, `Some(false)` forces side scripts,
        /// `None` uses limits exactly in display style.
        limits: Option<bool>,
    },
    /// The inner list raised by a fixed amount.
    RaiseBox {
        /// Vertical displacement, positive is up.
        raise: Length,
        /// The raised sub-list.
        inner: MathList,
    },
}

/// One element of a math list.
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct MathAtom {
    /// Kind-specific payload.
    pub kind: AtomKind,
    /// Nucleus text; may be empty for structural kinds.
    #[builder(default, into)]
    pub nucleus: String,
    /// Attached superscript list, if any.
    pub superscript: Option<MathList>,
    /// Attached subscript list, if any.
    pub subscript: Option<MathList>,
    /// Requested font style, resolved by the preprocessor.
    #[builder(default)]
    pub font_style: FontStyle,
    /// Covered range of the source expression.
    #[builder(default)]
    pub index_range: Range,
    /// Source atoms absorbed by fusion, in order. Empty for unfused atoms.
    #[builder(default)]
    pub fused: Vec<MathAtom>,
}

impl MathAtom {
    /// Shorthand for a script-less atom of the given kind and nucleus.
    #[must_use]
    pub fn with_nucleus(kind: AtomKind, nucleus: &str) -> Self {
        Self::builder().kind(kind).nucleus(nucleus).build()
    }

    /// Whether a superscript or subscript is attached.
    #[must_use]
    pub const fn has_scripts(&self) -> bool {
        self.superscript.is_some() || self.subscript.is_some()
    }

    /// Absorb `other` into this atom: nucleus text and index ranges are
    /// concatenated and the fused-atom lists are accumulated losslessly.
    ///
    /// Only meaningful for ordinary atoms without scripts; the preprocessor
    /// is the sole caller.
    pub(crate) fn fuse(&mut self, other: &Self) {
        if self.fused.is_empty() {
            self.fused.push(self.clone());
        }
        if other.fused.is_empty() {
            self.fused.push(other.clone());
        } else {
            self.fused.extend(other.fused.iter().cloned());
        }
        self.nucleus.push_str(&other.nucleus);
        if self.index_range.length == 0 {
            self.index_range = other.index_range;
        } else {
            self.index_range.length += other.index_range.length;
        }
    }
}

/// An ordered sequence of atoms; the unit of recursive layout input.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MathList {
    /// The atoms in source order.
    pub atoms: Vec<MathAtom>,
}

impl MathList {
    /// Create an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { atoms: Vec::new() }
    }

    /// Whether the list contains no atoms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }
}

impl From<Vec<MathAtom>> for MathList {
    fn from(atoms: Vec<MathAtom>) -> Self {
        Self { atoms }
    }
}

impl From<MathAtom> for MathList {
    fn from(atom: MathAtom) -> Self {
        Self { atoms: vec![atom] }
    }
}
