//! Layout error handling.
//!
//! A layout call either fully succeeds or fails fatally: invariant violations
//! (atoms that preprocessing should have removed, a boundary outside an inner
//! list, an invalid spacing pairing, a glyph construction that cannot reach
//! its target) abort the call rather than produce a partially correct box.
//! Degenerate-but-legal input (empty lists, empty nuclei, missing scripts) is
//! never an error.

extern crate alloc;

use crate::atom::Range;
use alloc::boxed::Box;
use alloc::string::String;
use thiserror::Error;

/// Error type returned by layout entry points when the input breaks an
/// engine invariant.
#[derive(Debug, Error)]
#[error("math layout error: {kind}")]
pub struct LayoutError {
    /// Categorised reason for the failure.
    #[source]
    pub kind: Box<LayoutErrorKind>,
    /// Source range of the offending atom, when one is known.
    pub range: Option<Range>,
}

impl LayoutError {
    /// Create a new error with the given kind and no source range.
    pub fn new<T: Into<LayoutErrorKind>>(kind: T) -> Self {
        Self {
            kind: Box::new(kind.into()),
            range: None,
        }
    }

    /// Create a new error attributed to the given source range.
    pub fn with_range<T: Into<LayoutErrorKind>>(kind: T, range: Range) -> Self {
        Self {
            kind: Box::new(kind.into()),
            range: Some(range),
        }
    }
}

/// Describes the specific reason for a [`LayoutError`].
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum LayoutErrorKind {
    #[error("atom kind {kind} should have been removed by preprocessing")]
    UnexpectedAtom { kind: String },
    #[error("a boundary atom should never appear inside a math list")]
    StrayBoundary,
    #[error("invalid inter-element space between {left} and {right}")]
    InvalidSpacing { left: String, right: String },
    #[error("glyph variant search returned no variants; the raw glyph itself must be included")]
    NoGlyphVariants,
    #[error("glyph construction could not reach height {target} within {max_extenders} extender rounds")]
    GlyphConstructionOverflow { target: f64, max_extenders: usize },
    #[error("invalid color literal: '{value}'")]
    InvalidColor { value: String },
    #[error("script placement was requested for an atom with neither superscript nor subscript")]
    ScriptsMissing,
}
