//! Math layout engine - OpenType math typesetting for editors and renderers
//!
//! Converts a semantic tree of math atoms into a positioned display tree
//! using the metrics of an OpenType MATH font. Fonts themselves are never
//! read here; callers inject a metrics provider and a glyph resolver.
#![warn(missing_docs)]
#![warn(clippy::nursery)]
#![warn(clippy::pedantic)]
#![warn(clippy::str_to_string)]
#![warn(clippy::non_ascii_literal)]
#![warn(clippy::pointer_format)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::absolute_paths)]
#![warn(clippy::panic)]
#![warn(clippy::expect_used)]
#![warn(clippy::unwrap_in_result)]
#![warn(clippy::if_then_some_else_none)]
#![warn(clippy::unused_trait_names)]
#![warn(clippy::get_unwrap)]
#![warn(clippy::impl_trait_in_params)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::unimplemented)]
#![warn(clippy::return_and_then)]
#![warn(clippy::needless_raw_strings)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(clippy::rc_buffer)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::map_with_unused_argument_over_ranges)]
#![warn(clippy::missing_asserts_for_indexing)]
#![warn(clippy::separated_literal_suffix)]
#![warn(clippy::ref_patterns)]
// Not sure
#![allow(clippy::indexing_slicing)]
#![allow(clippy::string_slice)]
#![allow(clippy::pub_use)]
// clippy exceptions
#![allow(clippy::float_cmp)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::default_numeric_fallback)]
#![allow(clippy::single_call_fn)]

extern crate alloc;
pub mod atom;
pub mod display;
pub mod error;
pub mod font;
pub mod preprocess;
pub mod spacing;
pub mod style;
mod typeset;

pub use atom::{
    AtomKind, Color, ColumnAlignment, FontStyle, Length, MathAtom, MathList, Range, Table,
};
pub use display::{DisplayContent, DisplayNode, GlyphInfo, LinePosition, Point};
pub use error::{LayoutError, LayoutErrorKind};
pub use font::{BoundingBox, GlyphPart, GlyphResolver, MathFont, MathMetrics, TypesettingContext};
pub use style::LineStyle;

/// Lay out a math list into a display tree whose root sits at the origin
/// with its baseline at y = 0.
///
/// `font` is the base font; script and fraction sub-lists derive their own
/// sizes from it through the metrics provider. Fails only on input that
/// breaks an engine invariant, never on degenerate-but-legal lists.
pub fn typeset_line<F: MathFont, G: Clone>(
    list: &MathList,
    font: &F,
    context: &TypesettingContext<'_, F, G>,
    style: LineStyle,
) -> Result<DisplayNode<F, G>, LayoutError> {
    typeset::layout_list(list, font, context, style, false, false)
}
