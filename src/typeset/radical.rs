//! Radicals, with optional degrees.

extern crate alloc;

use super::Typesetter;
use crate::atom::{MathList, Range};
use crate::display::{DisplayContent, DisplayNode, Point};
use crate::error::LayoutError;
use crate::font::MathFont;
use crate::style::LineStyle;
use alloc::boxed::Box;

const RADICAL_SIGN: &str = "\u{221A}";

impl<F: MathFont, G: Clone> Typesetter<'_, F, G> {
    /// Put a radicand under a sized radical sign and rule, and hang the
    /// degree above-left when present.
    pub(super) fn make_radical(
        &self,
        radicand: &MathList,
        degree: Option<&MathList>,
        range: Range,
    ) -> Result<DisplayNode<F, G>, LayoutError> {
        let metrics = self.context.metrics;
        let mut inner = self.sub_line(radicand, self.style, true)?;

        let thickness = metrics.radical_rule_thickness(&self.style_font);
        let mut gap = if self.is_display_style() {
            metrics.radical_display_style_vertical_gap(&self.style_font)
        } else {
            metrics.radical_vertical_gap(&self.style_font)
        };

        let height = inner.ascent() + inner.descent() + gap + thickness;
        let mut glyph = self.find_glyph(RADICAL_SIGN, height)?;
        // A taller sign than asked for splits the surplus between the gap
        // and the descender.
        let surplus = glyph.ascent() + glyph.descent() - height;
        if surplus > 0.0 {
            gap += surplus / 2.0;
        }

        let radical_ascent = thickness + gap + inner.ascent();
        glyph.shift_down = -(radical_ascent - glyph.ascent());

        let extra_ascender = metrics.radical_extra_ascender(&self.style_font);
        let ascent = radical_ascent + extra_ascender;
        let descent =
            (glyph.ascent() + glyph.descent() - radical_ascent).max(inner.descent());
        let sign_width = glyph.width;
        inner.position = Point::new(sign_width, 0.0);
        let mut width = sign_width + inner.width;

        let (degree_node, radical_shift) = match degree {
            None => (None, 0.0),
            Some(degree) => {
                let mut node = self.sub_line(degree, LineStyle::Script, false)?;
                let raise = metrics.radical_degree_bottom_raise_percent(&self.style_font)
                    * (ascent - descent);
                let mut kern_before = metrics.radical_kern_before_degree(&self.style_font);
                let kern_after = metrics.radical_kern_after_degree(&self.style_font);
                let mut shift = kern_before + node.width + kern_after;
                if shift < 0.0 {
                    // The negative kern after the degree must not pull the
                    // sign left of the node origin.
                    kern_before -= shift;
                    shift = 0.0;
                }
                node.position = Point::new(kern_before, raise);
                (Some(Box::new(node)), shift)
            }
        };
        if radical_shift > 0.0 {
            glyph.position = Point::new(radical_shift, glyph.position.y);
            inner.position = Point::new(radical_shift + sign_width, 0.0);
            width += radical_shift;
        }

        let node = DisplayNode::with_metrics(
            DisplayContent::Radical {
                radicand: Box::new(inner),
                glyph: Box::new(glyph),
                degree: degree_node,
                radical_shift,
                bar_thickness: thickness,
                top_kern: extra_ascender,
            },
            width,
            ascent,
            descent,
            range,
        );
        Ok(node)
    }
}
