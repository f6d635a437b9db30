//! The layout engine proper.
//!
//! [`layout_list`] drives one math list through the TeX layout pipeline:
//! preprocess the atoms, walk them left to right accumulating glyph runs,
//! flush a run whenever a non-character atom interrupts it, and hand each
//! structural atom to its recipe (fraction, radical, accent, large operator,
//! table, boundary delimiters). Scripts are attached to the display node of
//! their anchor atom and appended as tagged top-level siblings.
//!
//! The walk keeps a single cursor. Character atoms do not advance it glyph
//! by glyph; the open run is measured once at flush time and the cursor
//! jumps by the run's width, so inter-element space inside a run is carried
//! as a kern on the previous glyph rather than a cursor move.

extern crate alloc;

mod accent;
mod delimiter;
mod fraction;
mod op;
mod radical;
mod table;

use crate::atom::{AtomKind, Length, LengthUnit, MathAtom, MathList, Range};
use crate::display::{DisplayContent, DisplayNode, GlyphInfo, LinePosition, Point};
use crate::error::{LayoutError, LayoutErrorKind};
use crate::font::{MathFont, TypesettingContext};
use crate::preprocess::preprocess;
use crate::spacing::inter_element_space_mu;
use crate::style::LineStyle;
use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

/// Lay out a math list into a positioned display tree.
pub(crate) fn layout_list<F: MathFont, G: Clone>(
    list: &MathList,
    font: &F,
    context: &TypesettingContext<'_, F, G>,
    style: LineStyle,
    cramped: bool,
    spaced: bool,
) -> Result<DisplayNode<F, G>, LayoutError> {
    let atoms = preprocess(list);
    let mut typesetter = Typesetter::new(font, context, style, cramped, spaced);
    typesetter.layout(&atoms)?;
    let range = atoms
        .iter()
        .fold(Range::default(), |acc, atom| acc.union(atom.index_range));
    Ok(DisplayNode::from_children(typesetter.displays, range))
}

/// Walk state for one list at one style.
struct Typesetter<'a, F: MathFont, G: Clone> {
    context: &'a TypesettingContext<'a, F, G>,
    /// The base font layout was requested at; sub-lists re-derive their own
    /// style size from it.
    font: F,
    /// The base font scaled to the current style's size.
    style_font: F,
    style: LineStyle,
    cramped: bool,
    /// Whether this list sits between boundary delimiters and spaces its
    /// first atom as if an opening delimiter preceded it.
    spaced: bool,
    displays: Vec<DisplayNode<F, G>>,
    current_position: Point,
    run_text: String,
    run_glyphs: Vec<GlyphInfo<G>>,
    run_range: Range,
    run_start: Point,
}

impl<'a, F: MathFont, G: Clone> Typesetter<'a, F, G> {
    fn new(
        font: &F,
        context: &'a TypesettingContext<'a, F, G>,
        style: LineStyle,
        cramped: bool,
        spaced: bool,
    ) -> Self {
        let style_font = font.with_size(context.metrics.style_size(style, font));
        Self {
            context,
            font: font.clone(),
            style_font,
            style,
            cramped,
            spaced,
            displays: Vec::new(),
            current_position: Point::default(),
            run_text: String::new(),
            run_glyphs: Vec::new(),
            run_range: Range::default(),
            run_start: Point::default(),
        }
    }

    const fn is_display_style(&self) -> bool {
        matches!(self.style, LineStyle::Display)
    }

    /// Lay out a sub-list at the given style, against the same collaborators
    /// and base font.
    fn sub_line(
        &self,
        list: &MathList,
        style: LineStyle,
        cramped: bool,
    ) -> Result<DisplayNode<F, G>, LayoutError> {
        layout_list(list, &self.font, self.context, style, cramped, false)
    }

    fn resolve_length(&self, length: &Length) -> f64 {
        match length.unit {
            LengthUnit::Point => length.value,
            LengthUnit::Em => length.value * self.style_font.point_size(),
            LengthUnit::Mu => length.value * self.context.metrics.mu_unit(&self.style_font),
        }
    }

    fn layout(&mut self, atoms: &[MathAtom]) -> Result<(), LayoutError> {
        let mut prev: Option<&MathAtom> = None;
        for atom in atoms {
            match &atom.kind {
                AtomKind::Number | AtomKind::Variable | AtomKind::UnaryOperator => {
                    return Err(LayoutError::with_range(
                        LayoutErrorKind::UnexpectedAtom {
                            kind: atom.kind.to_string(),
                        },
                        atom.index_range,
                    ));
                }
                AtomKind::Boundary => {
                    return Err(LayoutError::with_range(
                        LayoutErrorKind::StrayBoundary,
                        atom.index_range,
                    ));
                }
                AtomKind::Space(length) => {
                    // Explicit space is invisible to the spacing table: the
                    // atom before it stays the spacing context.
                    self.flush_run(false);
                    self.current_position.x += self.resolve_length(length);
                    continue;
                }
                AtomKind::StyleChange(style) => {
                    self.flush_run(false);
                    self.style = *style;
                    self.style_font = self
                        .font
                        .with_size(self.context.metrics.style_size(*style, &self.font));
                    continue;
                }
                AtomKind::RaiseBox { raise, inner } => {
                    // A raise box neither takes nor contributes
                    // inter-element space.
                    self.flush_run(false);
                    let mut node = self.sub_line(inner, self.style, self.cramped)?;
                    node.position = Point::new(
                        self.current_position.x,
                        self.current_position.y + self.resolve_length(raise),
                    );
                    self.current_position.x += node.width;
                    self.displays.push(node);
                    if atom.has_scripts() {
                        self.make_scripts(atom, atom.index_range.location, 0.0)?;
                    }
                }
                AtomKind::Color { color, inner } => {
                    self.flush_run(false);
                    self.advance_inter_element_space(prev, &atom.kind)?;
                    let mut node = self.sub_line(inner, self.style, self.cramped)?;
                    node.set_text_color_recursive(*color);
                    node.position = self.current_position;
                    self.current_position.x += node.width;
                    self.displays.push(node);
                }
                AtomKind::Fraction {
                    numerator,
                    denominator,
                    has_rule,
                    left_delimiter,
                    right_delimiter,
                } => {
                    self.flush_run(false);
                    self.advance_inter_element_space(prev, &atom.kind)?;
                    let node = self.make_fraction(
                        numerator,
                        denominator,
                        *has_rule,
                        left_delimiter.as_deref(),
                        right_delimiter.as_deref(),
                        atom.index_range,
                    )?;
                    self.push_boxed(node, atom)?;
                }
                AtomKind::Radical { radicand, degree } => {
                    self.flush_run(false);
                    self.advance_inter_element_space(prev, &atom.kind)?;
                    let node = self.make_radical(radicand, degree.as_ref(), atom.index_range)?;
                    self.push_boxed(node, atom)?;
                }
                AtomKind::Inner {
                    inner,
                    left_boundary,
                    right_boundary,
                } => {
                    self.flush_run(false);
                    self.advance_inter_element_space(prev, &atom.kind)?;
                    let node = self.make_left_right(
                        inner,
                        left_boundary.as_deref(),
                        right_boundary.as_deref(),
                        atom.index_range,
                    )?;
                    self.push_boxed(node, atom)?;
                }
                AtomKind::Underline(inner) => {
                    self.flush_run(false);
                    self.advance_inter_element_space(prev, &atom.kind)?;
                    let node = self.make_underline(inner, atom.index_range)?;
                    self.push_boxed(node, atom)?;
                }
                AtomKind::Overline(inner) => {
                    self.flush_run(false);
                    self.advance_inter_element_space(prev, &atom.kind)?;
                    let node = self.make_overline(inner, atom.index_range)?;
                    self.push_boxed(node, atom)?;
                }
                AtomKind::Accent(inner) => {
                    self.flush_run(false);
                    self.advance_inter_element_space(prev, &atom.kind)?;
                    let mut node = self.make_accent(atom, inner)?;
                    if Self::accent_scripts_move_inward(inner) {
                        // Scripts moved onto the accentee inside the recipe.
                        node.position = self.current_position;
                        self.current_position.x += node.width;
                        self.displays.push(node);
                    } else {
                        self.push_boxed(node, atom)?;
                    }
                }
                AtomKind::Table(table) => {
                    self.flush_run(false);
                    self.advance_inter_element_space(prev, &atom.kind)?;
                    let node = self.make_table(table, atom.index_range)?;
                    self.push_boxed(node, atom)?;
                }
                AtomKind::LargeOperator { limits } => {
                    self.flush_run(false);
                    self.advance_inter_element_space(prev, &atom.kind)?;
                    self.layout_large_operator(atom, *limits)?;
                }
                AtomKind::Ordinary
                | AtomKind::BinaryOperator
                | AtomKind::Relation
                | AtomKind::Open
                | AtomKind::Close
                | AtomKind::Punctuation
                | AtomKind::Placeholder
                | AtomKind::Prime => {
                    self.layout_characters(prev, atom)?;
                    if matches!(atom.kind, AtomKind::Prime) {
                        // Primes are transparent: the next spacing decision
                        // still sees the atom before the prime.
                        continue;
                    }
                }
            }
            prev = Some(atom);
        }
        self.flush_run(false);
        Ok(())
    }

    /// Position a structural node at the cursor, advance past it and attach
    /// any scripts.
    fn push_boxed(
        &mut self,
        mut node: DisplayNode<F, G>,
        atom: &MathAtom,
    ) -> Result<(), LayoutError> {
        node.position = self.current_position;
        self.current_position.x += node.width;
        self.displays.push(node);
        if atom.has_scripts() {
            self.make_scripts(atom, atom.index_range.location, 0.0)?;
        }
        Ok(())
    }

    /// Lay out a character atom: apply inter-element space, append the
    /// nucleus glyphs to the open run, and attach scripts off a flushed
    /// anchor when present.
    fn layout_characters(
        &mut self,
        prev: Option<&MathAtom>,
        atom: &MathAtom,
    ) -> Result<(), LayoutError> {
        let space = self.inter_element_space(prev, &atom.kind)?;
        if let Some(last) = self.run_glyphs.last_mut() {
            last.kern_after += space;
        } else {
            self.current_position.x += space;
        }

        let nucleus: &str = if matches!(atom.kind, AtomKind::Placeholder) && atom.nucleus.is_empty()
        {
            "\u{25A1}"
        } else {
            &atom.nucleus
        };
        if self.run_glyphs.is_empty() && self.run_text.is_empty() {
            self.run_start = self.current_position;
            self.run_range = atom.index_range;
        } else {
            self.run_range = self.run_range.union(atom.index_range);
        }
        self.run_text.push_str(nucleus);
        for glyph in self.context.glyphs.find_glyphs(&self.style_font, nucleus) {
            self.run_glyphs.push(GlyphInfo {
                glyph,
                kern_after: 0.0,
            });
        }

        if atom.has_scripts() {
            let delta = self.run_glyphs.last().map_or(0.0, |last| {
                self.context
                    .metrics
                    .italic_correction(&self.style_font, &last.glyph)
            });
            // The anchor must exist even for an empty nucleus.
            self.flush_run(true);
            if delta > 0.0 && atom.subscript.is_none() {
                self.current_position.x += delta;
            }
            let index = atom.index_range.end().saturating_sub(1);
            self.make_scripts(atom, index, delta)?;
        }
        Ok(())
    }

    /// Inter-element space before `kind`, in absolute units.
    fn inter_element_space(
        &self,
        prev: Option<&MathAtom>,
        kind: &AtomKind,
    ) -> Result<f64, LayoutError> {
        let mu = match prev {
            Some(prev) => inter_element_space_mu(&prev.kind, kind, self.style)?,
            None if self.spaced => inter_element_space_mu(&AtomKind::Open, kind, self.style)?,
            None => 0.0,
        };
        Ok(mu * self.context.metrics.mu_unit(&self.style_font))
    }

    /// Apply inter-element space as a cursor advance; for use after the run
    /// has been flushed.
    fn advance_inter_element_space(
        &mut self,
        prev: Option<&MathAtom>,
        kind: &AtomKind,
    ) -> Result<(), LayoutError> {
        self.current_position.x += self.inter_element_space(prev, kind)?;
        Ok(())
    }

    /// Close the open glyph run into a display node and jump the cursor past
    /// it. `force` creates an empty run, used as a script anchor for atoms
    /// with an empty nucleus.
    fn flush_run(&mut self, force: bool) {
        if self.run_glyphs.is_empty() && self.run_text.is_empty() && !force {
            return;
        }
        let glyph_ids: Vec<G> = self
            .run_glyphs
            .iter()
            .map(|info| info.glyph.clone())
            .collect();
        let boxes = self
            .context
            .glyphs
            .bounding_boxes(&self.style_font, &glyph_ids);
        let mut ascent: f64 = 0.0;
        let mut descent: f64 = 0.0;
        for bounds in &boxes {
            ascent = ascent.max(bounds.ascent);
            descent = descent.max(bounds.descent);
        }
        let (_, advance_total) = self.context.glyphs.advances(&self.style_font, &glyph_ids);
        let kern_total: f64 = self.run_glyphs.iter().map(|info| info.kern_after).sum();
        let width = advance_total + kern_total;

        let mut node = DisplayNode::with_metrics(
            DisplayContent::Run {
                text: core::mem::take(&mut self.run_text),
                font: self.style_font.clone(),
                glyphs: core::mem::take(&mut self.run_glyphs),
            },
            width,
            ascent,
            descent,
            self.run_range,
        );
        node.position = self.run_start;
        self.current_position.x = self.run_start.x + width;
        self.displays.push(node);
        self.run_range = Range::default();
    }

    /// Attach the atom's scripts relative to the last display node, which is
    /// the anchor the caller just pushed. `delta` is the italic correction
    /// separating a superscript from a sloped nucleus.
    fn make_scripts(
        &mut self,
        atom: &MathAtom,
        index_in_parent: usize,
        delta: f64,
    ) -> Result<(), LayoutError> {
        let metrics = self.context.metrics;
        let script_style = self.style.script_style();
        let script_font = self
            .font
            .with_size(metrics.style_size(script_style, &self.font));

        let anchor_index = self.displays.len().saturating_sub(1);
        let (mut shift_up, mut shift_down) = {
            let anchor = &self.displays[anchor_index];
            if matches!(anchor.content, DisplayContent::Run { .. }) {
                (0.0, 0.0)
            } else {
                (
                    anchor.ascent() - metrics.superscript_baseline_drop_max(&script_font),
                    anchor.descent() + metrics.subscript_baseline_drop_min(&script_font),
                )
            }
        };
        self.displays[anchor_index].has_script = true;

        let superscript = atom
            .superscript
            .as_ref()
            .map(|list| self.sub_line(list, script_style, self.cramped))
            .transpose()?;
        let subscript = atom
            .subscript
            .as_ref()
            .map(|list| self.sub_line(list, script_style, true))
            .transpose()?;

        let space_after = metrics.space_after_script(&self.style_font);
        match (superscript, subscript) {
            (None, None) => Err(LayoutError::with_range(
                LayoutErrorKind::ScriptsMissing,
                atom.index_range,
            )),
            (None, Some(mut sub)) => {
                shift_down = shift_down
                    .max(metrics.subscript_shift_down(&self.style_font))
                    .max(sub.ascent() - metrics.subscript_top_max(&self.style_font));
                sub.line_position = LinePosition::Subscript;
                sub.index_in_parent = Some(index_in_parent);
                sub.position = Point::new(
                    self.current_position.x,
                    self.current_position.y - shift_down,
                );
                self.current_position.x += sub.width + space_after;
                self.displays.push(sub);
                Ok(())
            }
            (Some(mut sup), None) => {
                let base_shift = if self.cramped {
                    metrics.superscript_shift_up_cramped(&self.style_font)
                } else {
                    metrics.superscript_shift_up(&self.style_font)
                };
                shift_up = shift_up
                    .max(base_shift)
                    .max(sup.descent() + metrics.superscript_bottom_min(&self.style_font));
                sup.line_position = LinePosition::Superscript;
                sup.index_in_parent = Some(index_in_parent);
                sup.position =
                    Point::new(self.current_position.x, self.current_position.y + shift_up);
                self.current_position.x += sup.width + space_after;
                self.displays.push(sup);
                Ok(())
            }
            (Some(mut sup), Some(mut sub)) => {
                let base_shift = if self.cramped {
                    metrics.superscript_shift_up_cramped(&self.style_font)
                } else {
                    metrics.superscript_shift_up(&self.style_font)
                };
                shift_up = shift_up
                    .max(base_shift)
                    .max(sup.descent() + metrics.superscript_bottom_min(&self.style_font));
                shift_down = shift_down.max(metrics.subscript_shift_down(&self.style_font));

                let gap = (shift_up - sup.descent()) + (shift_down - sub.ascent());
                let gap_min = metrics.sub_superscript_gap_min(&self.style_font);
                if gap < gap_min {
                    shift_down += gap_min - gap;
                    // When closing the gap pushed the superscript bottom
                    // below its maximum, move the excess back up.
                    let excess = metrics.superscript_bottom_max_with_subscript(&self.style_font)
                        - (shift_up - sup.descent());
                    if excess > 0.0 {
                        shift_up += excess;
                        shift_down -= excess;
                    }
                }

                sup.line_position = LinePosition::Superscript;
                sup.index_in_parent = Some(index_in_parent);
                sup.position = Point::new(
                    self.current_position.x + delta,
                    self.current_position.y + shift_up,
                );
                sub.line_position = LinePosition::Subscript;
                sub.index_in_parent = Some(index_in_parent);
                sub.position = Point::new(
                    self.current_position.x,
                    self.current_position.y - shift_down,
                );
                self.current_position.x +=
                    (sup.width + delta).max(sub.width) + space_after;
                self.displays.push(sup);
                self.displays.push(sub);
                Ok(())
            }
        }
    }

    fn make_underline(
        &self,
        inner: &MathList,
        range: Range,
    ) -> Result<DisplayNode<F, G>, LayoutError> {
        let metrics = self.context.metrics;
        let inner_node = self.sub_line(inner, self.style, self.cramped)?;
        let thickness = metrics.underbar_rule_thickness(&self.style_font);
        let line_shift_up =
            -(inner_node.descent() + metrics.underbar_vertical_gap(&self.style_font));
        let ascent = inner_node.ascent();
        let descent = inner_node.descent()
            + metrics.underbar_vertical_gap(&self.style_font)
            + thickness;
        let width = inner_node.width;
        Ok(DisplayNode::with_metrics(
            DisplayContent::Line {
                inner: Box::new(inner_node),
                line_shift_up,
                line_thickness: thickness,
            },
            width,
            ascent,
            descent,
            range,
        ))
    }

    fn make_overline(
        &self,
        inner: &MathList,
        range: Range,
    ) -> Result<DisplayNode<F, G>, LayoutError> {
        let metrics = self.context.metrics;
        let inner_node = self.sub_line(inner, self.style, true)?;
        let thickness = metrics.overbar_rule_thickness(&self.style_font);
        let line_shift_up = inner_node.ascent()
            + metrics.overbar_vertical_gap(&self.style_font)
            + thickness
            + metrics.overbar_extra_ascender(&self.style_font);
        let ascent = line_shift_up;
        let descent = inner_node.descent();
        let width = inner_node.width;
        Ok(DisplayNode::with_metrics(
            DisplayContent::Line {
                inner: Box::new(inner_node),
                line_shift_up,
                line_thickness: thickness,
            },
            width,
            ascent,
            descent,
            range,
        ))
    }
}
