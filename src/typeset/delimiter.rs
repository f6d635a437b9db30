//! Sized delimiters and extensible glyph constructions.

extern crate alloc;

use super::Typesetter;
use crate::atom::{MathList, Range};
use crate::display::{DisplayContent, DisplayNode, Point};
use crate::error::{LayoutError, LayoutErrorKind};
use crate::font::MathFont;
use alloc::vec::Vec;

/// TeX's `delimiterfactor`: a delimiter must cover at least this many
/// thousandths of the content's axis-symmetric height.
const DELIMITER_FACTOR: f64 = 901.0;
/// TeX's `delimitershortfall` in points: the most a delimiter may fall short
/// of full coverage.
const DELIMITER_SHORTFALL: f64 = 5.0;

/// Upper bound on extender repetitions when assembling a glyph. Reaching it
/// means the requested height is unattainable with the font's parts.
const MAX_EXTENDER_ROUNDS: usize = 64;

impl<F: MathFont, G: Clone> Typesetter<'_, F, G> {
    /// Lay out an inner list between boundary delimiters sized to cover it.
    pub(super) fn make_left_right(
        &self,
        inner: &MathList,
        left_boundary: Option<&str>,
        right_boundary: Option<&str>,
        range: Range,
    ) -> Result<DisplayNode<F, G>, LayoutError> {
        let metrics = self.context.metrics;
        let mut inner_node = super::layout_list(
            inner,
            &self.font,
            self.context,
            self.style,
            self.cramped,
            true,
        )?;

        let axis = metrics.axis_height(&self.style_font);
        let delta = (inner_node.ascent() - axis).max(inner_node.descent() + axis);
        let height = (delta / 500.0 * DELIMITER_FACTOR)
            .max(2.0 * delta - DELIMITER_SHORTFALL);

        let mut children: Vec<DisplayNode<F, G>> = Vec::with_capacity(3);
        let mut x = 0.0;
        if let Some(left) = left_boundary.filter(|s| !s.is_empty()) {
            let mut glyph = self.axis_centered_delimiter(left, height)?;
            glyph.position = Point::new(x, 0.0);
            x += glyph.width;
            children.push(glyph);
        }
        inner_node.position = Point::new(x, 0.0);
        x += inner_node.width;
        children.push(inner_node);
        if let Some(right) = right_boundary.filter(|s| !s.is_empty()) {
            let mut glyph = self.axis_centered_delimiter(right, height)?;
            glyph.position = Point::new(x, 0.0);
            children.push(glyph);
        }
        Ok(DisplayNode::from_children(children, range))
    }

    /// A delimiter sized to at least `height` and recentered on the math
    /// axis.
    pub(super) fn axis_centered_delimiter(
        &self,
        delimiter: &str,
        height: f64,
    ) -> Result<DisplayNode<F, G>, LayoutError> {
        let mut node = self.find_glyph(delimiter, height)?;
        node.shift_down = 0.5 * (node.ascent() - node.descent())
            - self.context.metrics.axis_height(&self.style_font);
        Ok(node)
    }

    /// Find a glyph for a character covering at least `height` vertically:
    /// first the font's pre-built size variants, then an extensible
    /// assembly, falling back to the largest variant.
    pub(super) fn find_glyph(
        &self,
        character: &str,
        height: f64,
    ) -> Result<DisplayNode<F, G>, LayoutError> {
        let metrics = self.context.metrics;
        let glyphs = self.context.glyphs;
        let base = glyphs.glyph_for_character_at(&self.style_font, 0, character);

        let variants = metrics.vertical_variants(&self.style_font, &base);
        if variants.is_empty() {
            return Err(LayoutError::new(LayoutErrorKind::NoGlyphVariants));
        }
        let boxes = glyphs.bounding_boxes(&self.style_font, &variants);
        let mut chosen = variants.len() - 1;
        for (index, bounds) in boxes.iter().enumerate() {
            if bounds.ascent + bounds.descent >= height {
                chosen = index;
                break;
            }
        }
        let bounds = boxes[chosen];
        if bounds.ascent + bounds.descent < height
            && let Some(parts) = metrics.vertical_glyph_assembly(&self.style_font, &base)
            && !parts.is_empty()
        {
            return self.construct_glyph(&parts, height);
        }

        let glyph = variants[chosen].clone();
        let (_, width) =
            glyphs.advances(&self.style_font, core::slice::from_ref(&glyph));
        Ok(DisplayNode::with_metrics(
            DisplayContent::Glyph {
                glyph,
                font: self.style_font.clone(),
            },
            width,
            bounds.ascent,
            bounds.descent,
            Range::default(),
        ))
    }

    /// Assemble a glyph from parts, repeating extenders until the stack
    /// reaches the target height, then distribute the remaining slack over
    /// the connector overlaps.
    fn construct_glyph(
        &self,
        parts: &[crate::font::GlyphPart<G>],
        height: f64,
    ) -> Result<DisplayNode<F, G>, LayoutError> {
        let min_connector_overlap = self.context.metrics.min_connector_overlap(&self.style_font);

        for n_extenders in 0..MAX_EXTENDER_ROUNDS {
            let mut glyphs: Vec<G> = Vec::new();
            let mut offsets: Vec<f64> = Vec::new();
            let mut prev: Option<&crate::font::GlyphPart<G>> = None;
            let mut min_offset = 0.0_f64;
            let mut max_delta = f64::MAX;
            for part in parts {
                let repeats = if part.is_extender { n_extenders } else { 1 };
                for _ in 0..repeats {
                    if let Some(prev) = prev {
                        let max_overlap =
                            prev.end_connector_length.min(part.start_connector_length);
                        let min_offset_delta = prev.full_advance - max_overlap;
                        let max_offset_delta = prev.full_advance - min_connector_overlap;
                        max_delta = max_delta.min(max_offset_delta - min_offset_delta);
                        min_offset += min_offset_delta;
                    }
                    glyphs.push(part.glyph.clone());
                    offsets.push(min_offset);
                    prev = Some(part);
                }
            }
            let Some(last) = prev else {
                continue;
            };
            let min_height = min_offset + last.full_advance;
            let slack = max_delta * (glyphs.len() - 1) as f64;
            if min_height >= height {
                return Ok(self.construction_node(glyphs, offsets, min_height));
            }
            if glyphs.len() > 1 && height <= min_height + slack {
                let delta_each = (height - min_height) / (glyphs.len() - 1) as f64;
                for (index, offset) in offsets.iter_mut().enumerate() {
                    *offset += index as f64 * delta_each;
                }
                let total = offsets[offsets.len() - 1] + last.full_advance;
                return Ok(self.construction_node(glyphs, offsets, total));
            }
        }
        Err(LayoutError::new(
            LayoutErrorKind::GlyphConstructionOverflow {
                target: height,
                max_extenders: MAX_EXTENDER_ROUNDS,
            },
        ))
    }

    fn construction_node(
        &self,
        glyphs: Vec<G>,
        offsets: Vec<f64>,
        height: f64,
    ) -> DisplayNode<F, G> {
        let width = glyphs.first().map_or(0.0, |first| {
            self.context
                .glyphs
                .advances(&self.style_font, core::slice::from_ref(first))
                .1
        });
        DisplayNode::with_metrics(
            DisplayContent::GlyphConstruction {
                glyphs,
                offsets,
                font: self.style_font.clone(),
            },
            width,
            height,
            0.0,
            Range::default(),
        )
    }
}
