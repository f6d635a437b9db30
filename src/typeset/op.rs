//! Large operators and their limits.

extern crate alloc;

use super::Typesetter;
use crate::atom::MathAtom;
use crate::display::{DisplayContent, DisplayNode, GlyphInfo, Point};
use crate::error::LayoutError;
use crate::font::MathFont;
use alloc::boxed::Box;
use alloc::vec::Vec;

impl<F: MathFont, G: Clone> Typesetter<'_, F, G> {
    /// Lay out a large operator at the cursor: an axis-centered (and, in
    /// display style, enlarged) glyph for single-character nuclei, a plain
    /// run otherwise. Scripts stack as limits when the atom or the style
    /// asks for them, and attach as side scripts otherwise.
    pub(super) fn layout_large_operator(
        &mut self,
        atom: &MathAtom,
        limits: Option<bool>,
    ) -> Result<(), LayoutError> {
        let limits_active = limits.unwrap_or_else(|| self.is_display_style());
        let (node, delta) = if atom.nucleus.chars().count() == 1 {
            self.operator_glyph(atom, limits_active)?
        } else {
            (self.operator_run(atom), 0.0)
        };

        if limits_active && atom.has_scripts() {
            let mut node = self.make_op_limits(atom, node, delta)?;
            node.position = self.current_position;
            self.current_position.x += node.width;
            self.displays.push(node);
            return Ok(());
        }

        let mut node = node;
        node.position = self.current_position;
        self.current_position.x += node.width;
        self.displays.push(node);
        if atom.has_scripts() {
            self.make_scripts(atom, atom.index_range.location, delta)?;
        }
        Ok(())
    }

    /// Single-glyph operator, centered on the math axis. Returns the node
    /// and the glyph's italic correction.
    fn operator_glyph(
        &self,
        atom: &MathAtom,
        limits_active: bool,
    ) -> Result<(DisplayNode<F, G>, f64), LayoutError> {
        let metrics = self.context.metrics;
        let glyphs = self.context.glyphs;
        let mut glyph = glyphs.glyph_for_character_at(&self.style_font, 0, &atom.nucleus);
        if self.is_display_style() {
            glyph = metrics.larger_glyph(&self.style_font, &glyph);
        }
        let bounds = glyphs
            .bounding_boxes(&self.style_font, core::slice::from_ref(&glyph))
            .first()
            .copied()
            .unwrap_or_default();
        let delta = metrics.italic_correction(&self.style_font, &glyph);

        let mut width = bounds.width;
        // A side subscript tucks under the slope, so the advance gives the
        // italic correction back.
        if atom.subscript.is_some() && !limits_active {
            width -= delta;
        }
        let mut node = DisplayNode::with_metrics(
            DisplayContent::Glyph {
                glyph,
                font: self.style_font.clone(),
            },
            width,
            bounds.ascent,
            bounds.descent,
            atom.index_range,
        );
        node.shift_down =
            0.5 * (bounds.ascent - bounds.descent) - metrics.axis_height(&self.style_font);
        Ok((node, delta))
    }

    /// Multi-character operator nucleus, such as `lim`, set as a plain run
    /// on the baseline.
    fn operator_run(&self, atom: &MathAtom) -> DisplayNode<F, G> {
        let resolver = self.context.glyphs;
        let glyph_ids = resolver.find_glyphs(&self.style_font, &atom.nucleus);
        let boxes = resolver.bounding_boxes(&self.style_font, &glyph_ids);
        let mut ascent: f64 = 0.0;
        let mut descent: f64 = 0.0;
        for bounds in &boxes {
            ascent = ascent.max(bounds.ascent);
            descent = descent.max(bounds.descent);
        }
        let (_, width) = resolver.advances(&self.style_font, &glyph_ids);
        let glyphs: Vec<GlyphInfo<G>> = glyph_ids
            .into_iter()
            .map(|glyph| GlyphInfo {
                glyph,
                kern_after: 0.0,
            })
            .collect();
        DisplayNode::with_metrics(
            DisplayContent::Run {
                text: atom.nucleus.clone(),
                font: self.style_font.clone(),
                glyphs,
            },
            width,
            ascent,
            descent,
            atom.index_range,
        )
    }

    /// Stack the atom's scripts above and below the operator nucleus.
    fn make_op_limits(
        &self,
        atom: &MathAtom,
        mut nucleus: DisplayNode<F, G>,
        delta: f64,
    ) -> Result<DisplayNode<F, G>, LayoutError> {
        let metrics = self.context.metrics;
        let script_style = self.style.script_style();
        let upper = atom
            .superscript
            .as_ref()
            .map(|list| self.sub_line(list, script_style, self.cramped))
            .transpose()?;
        let lower = atom
            .subscript
            .as_ref()
            .map(|list| self.sub_line(list, script_style, true))
            .transpose()?;

        let upper_limit_gap = upper.as_ref().map_or(0.0, |upper| {
            metrics
                .upper_limit_gap_min(&self.style_font)
                .max(metrics.upper_limit_baseline_rise_min(&self.style_font) - upper.descent())
        });
        let lower_limit_gap = lower.as_ref().map_or(0.0, |lower| {
            metrics
                .lower_limit_gap_min(&self.style_font)
                .max(metrics.lower_limit_baseline_drop_min(&self.style_font) - lower.ascent())
        });
        let limit_shift = delta / 2.0;

        let width = nucleus
            .width
            .max(upper.as_ref().map_or(0.0, |node| node.width))
            .max(lower.as_ref().map_or(0.0, |node| node.width));
        let ascent = nucleus.ascent()
            + upper.as_ref().map_or(0.0, |upper| {
                upper_limit_gap + upper.descent() + upper.ascent()
            });
        let descent = nucleus.descent()
            + lower.as_ref().map_or(0.0, |lower| {
                lower_limit_gap + lower.ascent() + lower.descent()
            });

        let nucleus_ascent = nucleus.ascent();
        let nucleus_descent = nucleus.descent();
        nucleus.position = Point::new((width - nucleus.width) / 2.0, 0.0);
        let upper = upper.map(|mut upper| {
            upper.position = Point::new(
                limit_shift + (width - upper.width) / 2.0,
                nucleus_ascent + upper_limit_gap + upper.descent(),
            );
            Box::new(upper)
        });
        let lower = lower.map(|mut lower| {
            lower.position = Point::new(
                -limit_shift + (width - lower.width) / 2.0,
                -(nucleus_descent + lower_limit_gap + lower.ascent()),
            );
            Box::new(lower)
        });

        Ok(DisplayNode::with_metrics(
            DisplayContent::LargeOpLimits {
                nucleus: Box::new(nucleus),
                upper_limit: upper,
                lower_limit: lower,
                upper_limit_gap,
                lower_limit_gap,
                limit_shift,
            },
            width,
            ascent,
            descent,
            atom.index_range,
        ))
    }
}
