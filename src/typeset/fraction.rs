//! Fractions and rule-less stacks.

extern crate alloc;

use super::Typesetter;
use crate::atom::{MathList, Range};
use crate::display::{DisplayContent, DisplayNode, Point};
use crate::error::LayoutError;
use crate::font::MathFont;
use alloc::boxed::Box;
use alloc::vec::Vec;

impl<F: MathFont, G: Clone> Typesetter<'_, F, G> {
    /// Stack a numerator over a denominator, draw the bar on the math axis
    /// when asked for, and wrap the result in side delimiters when the atom
    /// carries them.
    pub(super) fn make_fraction(
        &self,
        numerator: &MathList,
        denominator: &MathList,
        has_rule: bool,
        left_delimiter: Option<&str>,
        right_delimiter: Option<&str>,
        range: Range,
    ) -> Result<DisplayNode<F, G>, LayoutError> {
        let metrics = self.context.metrics;
        let fraction_style = self.style.fraction_style();
        let mut num = self.sub_line(numerator, fraction_style, false)?;
        let mut den = self.sub_line(denominator, fraction_style, true)?;

        let display = self.is_display_style();
        let mut numerator_up = match (has_rule, display) {
            (true, true) => metrics.fraction_numerator_display_style_shift_up(&self.style_font),
            (true, false) => metrics.fraction_numerator_shift_up(&self.style_font),
            (false, true) => metrics.stack_top_display_style_shift_up(&self.style_font),
            (false, false) => metrics.stack_top_shift_up(&self.style_font),
        };
        let mut denominator_down = match (has_rule, display) {
            (true, true) => {
                metrics.fraction_denominator_display_style_shift_down(&self.style_font)
            }
            (true, false) => metrics.fraction_denominator_shift_down(&self.style_font),
            (false, true) => metrics.stack_bottom_display_style_shift_down(&self.style_font),
            (false, false) => metrics.stack_bottom_shift_down(&self.style_font),
        };

        let axis = metrics.axis_height(&self.style_font);
        let bar_thickness = if has_rule {
            metrics.fraction_rule_thickness(&self.style_font)
        } else {
            0.0
        };

        if has_rule {
            // Each part clears the bar independently; a shortfall grows the
            // part's own shift, never the other's.
            let numerator_gap_min = if display {
                metrics.fraction_num_display_style_gap_min(&self.style_font)
            } else {
                metrics.fraction_numerator_gap_min(&self.style_font)
            };
            let numerator_gap =
                numerator_up - num.descent() - (axis + bar_thickness / 2.0);
            if numerator_gap < numerator_gap_min {
                numerator_up += numerator_gap_min - numerator_gap;
            }

            let denominator_gap_min = if display {
                metrics.fraction_denom_display_style_gap_min(&self.style_font)
            } else {
                metrics.fraction_denominator_gap_min(&self.style_font)
            };
            let denominator_gap =
                (axis - bar_thickness / 2.0) - (den.ascent() - denominator_down);
            if denominator_gap < denominator_gap_min {
                denominator_down += denominator_gap_min - denominator_gap;
            }
        } else {
            let gap_min = if display {
                metrics.stack_display_style_gap_min(&self.style_font)
            } else {
                metrics.stack_gap_min(&self.style_font)
            };
            let clearance =
                (numerator_up - num.descent()) - (den.ascent() - denominator_down);
            if clearance < gap_min {
                numerator_up += gap_min - clearance / 2.0;
                denominator_down += (gap_min - clearance) / 2.0;
            }
        }

        let width = num.width.max(den.width);
        num.position = Point::new((width - num.width) / 2.0, numerator_up);
        den.position = Point::new((width - den.width) / 2.0, -denominator_down);
        let ascent = num.ascent() + numerator_up;
        let descent = den.descent() + denominator_down;
        let node = DisplayNode::with_metrics(
            DisplayContent::Fraction {
                numerator: Box::new(num),
                denominator: Box::new(den),
                numerator_up,
                denominator_down,
                bar_thickness,
                bar_position: axis,
            },
            width,
            ascent,
            descent,
            range,
        );

        if left_delimiter.is_none() && right_delimiter.is_none() {
            return Ok(node);
        }
        self.wrap_in_delimiters(node, left_delimiter, right_delimiter, range)
    }

    /// Put a fraction between its side delimiters, sized to the style's
    /// fixed fraction-delimiter height.
    fn wrap_in_delimiters(
        &self,
        fraction: DisplayNode<F, G>,
        left_delimiter: Option<&str>,
        right_delimiter: Option<&str>,
        range: Range,
    ) -> Result<DisplayNode<F, G>, LayoutError> {
        let metrics = self.context.metrics;
        let height = if self.is_display_style() {
            metrics.fraction_delimiter_display_style_size(&self.style_font)
        } else {
            metrics.fraction_delimiter_size(&self.style_font)
        };

        let mut children: Vec<DisplayNode<F, G>> = Vec::with_capacity(3);
        let mut x = 0.0;
        if let Some(left) = left_delimiter.filter(|s| !s.is_empty()) {
            let mut glyph = self.axis_centered_delimiter(left, height)?;
            glyph.position = Point::new(x, 0.0);
            x += glyph.width;
            children.push(glyph);
        }
        let mut fraction = fraction;
        fraction.position = Point::new(x, 0.0);
        x += fraction.width;
        children.push(fraction);
        if let Some(right) = right_delimiter.filter(|s| !s.is_empty()) {
            let mut glyph = self.axis_centered_delimiter(right, height)?;
            glyph.position = Point::new(x, 0.0);
            children.push(glyph);
        }
        Ok(DisplayNode::from_children(children, range))
    }
}
