//! Font collaborator traits.
//!
//! The engine never touches font files. It consumes two injected, read-only
//! collaborators: a [`MathMetrics`] provider exposing the OpenType MATH style
//! constants as functions of a sized font, and a [`GlyphResolver`] mapping
//! nucleus text to glyph ids and measurements. Both are pure; the whole
//! layout computation is deterministic given the same providers.

extern crate alloc;

use crate::style::LineStyle;
use alloc::vec::Vec;
use bon::Builder;

/// A sized font. The engine only ever reads the point size and derives
/// rescaled copies for script and fraction sub-lists.
pub trait MathFont: Clone {
    /// The font's point size.
    fn point_size(&self) -> f64;
    /// A copy of this font at a different point size.
    fn with_size(&self, size: f64) -> Self;
}

/// Measured extents of one glyph or glyph sequence.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundingBox {
    /// Extent above the baseline, clamped at zero.
    pub ascent: f64,
    /// Extent below the baseline, clamped at zero.
    pub descent: f64,
    /// Horizontal extent.
    pub width: f64,
}

/// One piece of an extensible glyph assembly.
#[derive(Debug, Clone, Builder)]
pub struct GlyphPart<G> {
    /// The glyph drawn for this part.
    pub glyph: G,
    /// Full advance of the part in the assembly direction.
    pub full_advance: f64,
    /// Length of the connector at the start (bottom) of the part.
    #[builder(default)]
    pub start_connector_length: f64,
    /// Length of the connector at the end (top) of the part.
    #[builder(default)]
    pub end_connector_length: f64,
    /// Whether the part repeats to extend the assembly.
    #[builder(default)]
    pub is_extender: bool,
}

/// OpenType MATH constants and glyph variant data, as functions of a sized
/// font (and, where relevant, a glyph).
///
/// All lengths are absolute, pre-scaled for the given font. Constant names
/// follow the MATH table.
pub trait MathMetrics<F: MathFont, G> {
    /// Point size a list in `style` is set at, for a base font `font`.
    fn style_size(&self, style: LineStyle, font: &F) -> f64;
    /// Absolute size of one math unit (mu) for the font.
    fn mu_unit(&self, font: &F) -> f64;
    /// Height of the math axis above the baseline.
    fn axis_height(&self, font: &F) -> f64;

    /// Fraction bar thickness.
    fn fraction_rule_thickness(&self, font: &F) -> f64;
    /// Numerator baseline shift up, display style.
    fn fraction_numerator_display_style_shift_up(&self, font: &F) -> f64;
    /// Numerator baseline shift up, non-display styles.
    fn fraction_numerator_shift_up(&self, font: &F) -> f64;
    /// Denominator baseline shift down, display style.
    fn fraction_denominator_display_style_shift_down(&self, font: &F) -> f64;
    /// Denominator baseline shift down, non-display styles.
    fn fraction_denominator_shift_down(&self, font: &F) -> f64;
    /// Minimum numerator-to-bar clearance, display style.
    fn fraction_num_display_style_gap_min(&self, font: &F) -> f64;
    /// Minimum numerator-to-bar clearance, non-display styles.
    fn fraction_numerator_gap_min(&self, font: &F) -> f64;
    /// Minimum bar-to-denominator clearance, display style.
    fn fraction_denom_display_style_gap_min(&self, font: &F) -> f64;
    /// Minimum bar-to-denominator clearance, non-display styles.
    fn fraction_denominator_gap_min(&self, font: &F) -> f64;
    /// Target delimiter height for fractions with side delimiters, display
    /// style.
    fn fraction_delimiter_display_style_size(&self, font: &F) -> f64;
    /// Target delimiter height for fractions with side delimiters.
    fn fraction_delimiter_size(&self, font: &F) -> f64;

    /// Rule-less stack: top shift up, display style.
    fn stack_top_display_style_shift_up(&self, font: &F) -> f64;
    /// Rule-less stack: top shift up, non-display styles.
    fn stack_top_shift_up(&self, font: &F) -> f64;
    /// Rule-less stack: bottom shift down, display style.
    fn stack_bottom_display_style_shift_down(&self, font: &F) -> f64;
    /// Rule-less stack: bottom shift down, non-display styles.
    fn stack_bottom_shift_down(&self, font: &F) -> f64;
    /// Rule-less stack: minimum top-to-bottom clearance, display style.
    fn stack_display_style_gap_min(&self, font: &F) -> f64;
    /// Rule-less stack: minimum top-to-bottom clearance, non-display styles.
    fn stack_gap_min(&self, font: &F) -> f64;

    /// Radical rule thickness.
    fn radical_rule_thickness(&self, font: &F) -> f64;
    /// Radicand-to-rule clearance, display style.
    fn radical_display_style_vertical_gap(&self, font: &F) -> f64;
    /// Radicand-to-rule clearance, non-display styles.
    fn radical_vertical_gap(&self, font: &F) -> f64;
    /// White space above the radical rule.
    fn radical_extra_ascender(&self, font: &F) -> f64;
    /// Kern before a radical degree.
    fn radical_kern_before_degree(&self, font: &F) -> f64;
    /// Kern after a radical degree; typically negative.
    fn radical_kern_after_degree(&self, font: &F) -> f64;
    /// Fraction of the radical's (ascent − descent) the degree bottom is
    /// raised by.
    fn radical_degree_bottom_raise_percent(&self, font: &F) -> f64;

    /// Superscript baseline shift up.
    fn superscript_shift_up(&self, font: &F) -> f64;
    /// Superscript baseline shift up in cramped contexts.
    fn superscript_shift_up_cramped(&self, font: &F) -> f64;
    /// Maximum superscript baseline drop from a tall anchor's top.
    fn superscript_baseline_drop_max(&self, font: &F) -> f64;
    /// Minimum superscript bottom above the baseline.
    fn superscript_bottom_min(&self, font: &F) -> f64;
    /// Maximum superscript bottom when a subscript is also present.
    fn superscript_bottom_max_with_subscript(&self, font: &F) -> f64;
    /// Subscript baseline shift down.
    fn subscript_shift_down(&self, font: &F) -> f64;
    /// Minimum subscript baseline drop below a deep anchor's bottom.
    fn subscript_baseline_drop_min(&self, font: &F) -> f64;
    /// Maximum subscript top above the baseline.
    fn subscript_top_max(&self, font: &F) -> f64;
    /// Minimum clearance between a superscript bottom and subscript top.
    fn sub_superscript_gap_min(&self, font: &F) -> f64;
    /// Space inserted after a script.
    fn space_after_script(&self, font: &F) -> f64;

    /// Minimum gap between a large operator and an upper limit.
    fn upper_limit_gap_min(&self, font: &F) -> f64;
    /// Minimum rise of an upper limit baseline above the operator top.
    fn upper_limit_baseline_rise_min(&self, font: &F) -> f64;
    /// Minimum gap between a large operator and a lower limit.
    fn lower_limit_gap_min(&self, font: &F) -> f64;
    /// Minimum drop of a lower limit baseline below the operator bottom.
    fn lower_limit_baseline_drop_min(&self, font: &F) -> f64;

    /// Rule-to-content clearance of an underline.
    fn underbar_vertical_gap(&self, font: &F) -> f64;
    /// Underline rule thickness.
    fn underbar_rule_thickness(&self, font: &F) -> f64;
    /// Rule-to-content clearance of an overline.
    fn overbar_vertical_gap(&self, font: &F) -> f64;
    /// Overline rule thickness.
    fn overbar_rule_thickness(&self, font: &F) -> f64;
    /// White space above an overline rule.
    fn overbar_extra_ascender(&self, font: &F) -> f64;

    /// Maximum accentee height before an accent starts riding up.
    fn accent_base_height(&self, font: &F) -> f64;

    /// Minimum connector overlap in glyph assemblies.
    fn min_connector_overlap(&self, font: &F) -> f64;
    /// Italic correction for a glyph.
    fn italic_correction(&self, font: &F, glyph: &G) -> f64;
    /// Horizontal position accents attach at, for a glyph.
    fn top_accent_attachment(&self, font: &F, glyph: &G) -> f64;
    /// Growing-size vertical variants of a glyph. The first entry is the
    /// glyph itself.
    fn vertical_variants(&self, font: &F, glyph: &G) -> Vec<G>;
    /// Growing-size horizontal variants of a glyph. The first entry is the
    /// glyph itself.
    fn horizontal_variants(&self, font: &F, glyph: &G) -> Vec<G>;
    /// Parts of the vertical extensible assembly for a glyph, bottom-up, or
    /// `None` when the glyph is not extensible.
    fn vertical_glyph_assembly(&self, font: &F, glyph: &G) -> Option<Vec<GlyphPart<G>>>;
    /// The next larger pre-built variant of a glyph, for display-style
    /// operators.
    fn larger_glyph(&self, font: &F, glyph: &G) -> G;
}

/// Text-to-glyph mapping and measurement.
pub trait GlyphResolver<F: MathFont, G> {
    /// Glyphs for a text, in order.
    fn find_glyphs(&self, font: &F, text: &str) -> Vec<G>;
    /// The glyph for the character starting at byte `index` of `text`.
    fn glyph_for_character_at(&self, font: &F, index: usize, text: &str) -> G;
    /// A glyph rendering nothing.
    fn empty_glyph(&self, font: &F) -> G;
    /// Whether the glyph renders nothing.
    fn is_empty_glyph(&self, glyph: &G) -> bool;
    /// Bounding boxes of each glyph, in order.
    fn bounding_boxes(&self, font: &F, glyphs: &[G]) -> Vec<BoundingBox>;
    /// Per-glyph advances and their total.
    fn advances(&self, font: &F, glyphs: &[G]) -> (Vec<f64>, f64);
}

/// The pair of collaborators a layout call runs against.
pub struct TypesettingContext<'a, F: MathFont, G> {
    /// Font math constants and variant data.
    pub metrics: &'a dyn MathMetrics<F, G>,
    /// Text-to-glyph mapping and measurement.
    pub glyphs: &'a dyn GlyphResolver<F, G>,
}

impl<'a, F: MathFont, G> TypesettingContext<'a, F, G> {
    /// Bundle a metrics provider and glyph resolver.
    #[must_use]
    pub const fn new(
        metrics: &'a dyn MathMetrics<F, G>,
        glyphs: &'a dyn GlyphResolver<F, G>,
    ) -> Self {
        Self { metrics, glyphs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_part_builder_defaults() {
        let part = GlyphPart::builder().glyph(7_u16).full_advance(1.5).build();
        assert!(!part.is_extender);
        assert_eq!(part.start_connector_length, 0.0);
        assert_eq!(part.end_connector_length, 0.0);
    }
}
