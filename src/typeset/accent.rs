//! Accents over a sub-list.

extern crate alloc;

use super::Typesetter;
use crate::atom::{AtomKind, MathAtom, MathList};
use crate::display::{DisplayContent, DisplayNode, Point};
use crate::error::{LayoutError, LayoutErrorKind};
use crate::font::MathFont;
use alloc::boxed::Box;

impl<F: MathFont, G: Clone> Typesetter<'_, F, G> {
    /// Position an accent glyph over the accentee. Scripts of the accent
    /// atom migrate onto a one-character accentee, so the accent rides the
    /// nucleus rather than the scripted cluster; any other accentee keeps
    /// the scripts on the accent atom for ordinary script placement.
    pub(super) fn make_accent(
        &self,
        atom: &MathAtom,
        inner: &MathList,
    ) -> Result<DisplayNode<F, G>, LayoutError> {
        let metrics = self.context.metrics;
        let glyphs = self.context.glyphs;

        let accentee = if atom.has_scripts() && Self::accent_scripts_move_inward(inner) {
            let mut inner = inner.clone();
            if let Some(last) = inner.atoms.last_mut() {
                last.superscript = atom.superscript.clone();
                last.subscript = atom.subscript.clone();
            }
            self.sub_line(&inner, self.style, self.cramped)?
        } else {
            self.sub_line(inner, self.style, true)?
        };
        if atom.nucleus.is_empty() {
            return Ok(accentee);
        }

        let accentee_adjustment = self
            .single_character_glyph(inner)
            .filter(|glyph| !glyphs.is_empty_glyph(glyph))
            .map_or(accentee.width / 2.0, |glyph| {
                metrics.top_accent_attachment(&self.style_font, &glyph)
            });

        let base = glyphs.glyph_for_character_at(&self.style_font, 0, &atom.nucleus);
        let accent_glyph = self.find_wide_glyph(&base, accentee.width)?;
        let accent_adjustment = metrics.top_accent_attachment(&self.style_font, &accent_glyph);
        let skew = accentee_adjustment - accent_adjustment;

        let height = accentee.ascent()
            - accentee
                .ascent()
                .min(metrics.accent_base_height(&self.style_font));
        let bounds = glyphs
            .bounding_boxes(&self.style_font, core::slice::from_ref(&accent_glyph))
            .first()
            .copied()
            .unwrap_or_default();
        let mut accent_node = DisplayNode::with_metrics(
            DisplayContent::Glyph {
                glyph: accent_glyph,
                font: self.style_font.clone(),
            },
            bounds.width,
            bounds.ascent,
            bounds.descent,
            atom.index_range,
        );
        accent_node.position = Point::new(skew, height);

        let width = accentee.width;
        let ascent = accentee.ascent().max(height + bounds.ascent);
        let descent = accentee.descent();
        Ok(DisplayNode::with_metrics(
            DisplayContent::Accent {
                accent: Box::new(accent_node),
                accentee: Box::new(accentee),
            },
            width,
            ascent,
            descent,
            atom.index_range,
        ))
    }

    /// Whether the accent atom's scripts belong on the accentee itself: a
    /// lone script-less one-character atom reads as "accented base with
    /// scripts", anything wider keeps the scripts on the accent cluster.
    pub(super) fn accent_scripts_move_inward(inner: &MathList) -> bool {
        let [atom] = inner.atoms.as_slice() else {
            return false;
        };
        !atom.has_scripts()
            && atom.nucleus.chars().count() == 1
            && matches!(
                atom.kind,
                AtomKind::Ordinary | AtomKind::Variable | AtomKind::Number
            )
    }

    /// The glyph of a one-character, script-less accentee, used for its top
    /// accent attachment point.
    fn single_character_glyph(&self, inner: &MathList) -> Option<G> {
        if !Self::accent_scripts_move_inward(inner) {
            return None;
        }
        let atom = inner.atoms.first()?;
        Some(
            self.context
                .glyphs
                .glyph_for_character_at(&self.style_font, 0, &atom.nucleus),
        )
    }

    /// The first horizontal variant wider than the accentee, or the widest
    /// one available.
    fn find_wide_glyph(&self, base: &G, width: f64) -> Result<G, LayoutError> {
        let variants = self
            .context
            .metrics
            .horizontal_variants(&self.style_font, base);
        if variants.is_empty() {
            return Err(LayoutError::new(LayoutErrorKind::NoGlyphVariants));
        }
        let boxes = self
            .context
            .glyphs
            .bounding_boxes(&self.style_font, &variants);
        let mut chosen = variants.len() - 1;
        for (index, bounds) in boxes.iter().enumerate() {
            if bounds.width > width {
                chosen = index;
                break;
            }
        }
        Ok(variants[chosen].clone())
    }
}
