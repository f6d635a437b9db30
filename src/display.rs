//! The display tree, the output data model of the layout engine.
//!
//! A [`DisplayNode`] is a positioned visual primitive: a run of glyphs, a
//! fraction assembly, a constructed delimiter, a rule. Positions are offsets
//! relative to the parent's origin with a y-up axis; every node carries its
//! own width, ascent and descent so consumers (renderers, hit-testers, line
//! breakers) never need to re-measure. The tree is produced in one layout
//! call and is immutable afterwards.

extern crate alloc;

use crate::atom::{Color, Range};
use crate::font::MathFont;
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use strum::Display;

/// A point in layout space. Positive y is up; the axis is never inverted
/// inside the engine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal offset from the parent origin.
    pub x: f64,
    /// Vertical offset from the parent baseline, positive up.
    pub y: f64,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Whether a top-level node is an attached script, and which one.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinePosition {
    /// Not a script.
    #[default]
    Regular,
    /// An attached superscript.
    Superscript,
    /// An attached subscript.
    Subscript,
}

/// One glyph of a text run, with the kern applied after it.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphInfo<G> {
    /// The glyph id.
    pub glyph: G,
    /// Kern inserted after this glyph, from inter-element spacing.
    pub kern_after: f64,
}

/// Kind-specific payload of a [`DisplayNode`].
#[derive(Debug, Clone)]
pub enum DisplayContent<F: MathFont, G> {
    /// A run of glyphs sharing one font.
    Run {
        /// The source text the run was resolved from.
        text: String,
        /// The sized font the run is set in.
        font: F,
        /// Glyphs with their trailing kerns.
        glyphs: Vec<GlyphInfo<G>>,
    },
    /// A composite of independently positioned children.
    List {
        /// Child nodes, positions relative to this node.
        children: Vec<DisplayNode<F, G>>,
    },
    /// Numerator over denominator, with an optional bar.
    Fraction {
        /// Numerator sub-tree.
        numerator: Box<DisplayNode<F, G>>,
        /// Denominator sub-tree.
        denominator: Box<DisplayNode<F, G>>,
        /// Numerator baseline shift up.
        numerator_up: f64,
        /// Denominator baseline shift down.
        denominator_down: f64,
        /// Bar thickness; zero when no bar is drawn.
        bar_thickness: f64,
        /// Height of the bar center above the baseline.
        bar_position: f64,
    },
    /// A radical sign, rule and radicand, with an optional degree.
    Radical {
        /// The radicand sub-tree, positioned after the sign.
        radicand: Box<DisplayNode<F, G>>,
        /// The sized or constructed radical sign.
        glyph: Box<DisplayNode<F, G>>,
        /// The degree sub-tree, if any.
        degree: Option<Box<DisplayNode<F, G>>>,
        /// Horizontal displacement of the sign made by the degree.
        radical_shift: f64,
        /// Thickness of the rule over the radicand.
        bar_thickness: f64,
        /// White space kept above the rule.
        top_kern: f64,
    },
    /// An accent mark over an accentee.
    Accent {
        /// The accent glyph node, positioned by skew and height.
        accent: Box<DisplayNode<F, G>>,
        /// The accented sub-tree at the node origin.
        accentee: Box<DisplayNode<F, G>>,
    },
    /// A large operator with stacked limits.
    LargeOpLimits {
        /// The operator itself.
        nucleus: Box<DisplayNode<F, G>>,
        /// Upper limit, if any.
        upper_limit: Option<Box<DisplayNode<F, G>>>,
        /// Lower limit, if any.
        lower_limit: Option<Box<DisplayNode<F, G>>>,
        /// Gap between the operator top and the upper limit.
        upper_limit_gap: f64,
        /// Gap between the operator bottom and the lower limit.
        lower_limit_gap: f64,
        /// Half the italic correction; the upper limit shifts right by this,
        /// the lower limit left.
        limit_shift: f64,
    },
    /// Content with a horizontal rule above or below it.
    Line {
        /// The content under (or over) the rule.
        inner: Box<DisplayNode<F, G>>,
        /// Height of the rule above the baseline; negative for underlines.
        line_shift_up: f64,
        /// Rule thickness.
        line_thickness: f64,
    },
    /// A single pre-built glyph, possibly a sized variant.
    Glyph {
        /// The glyph id.
        glyph: G,
        /// The sized font the glyph is drawn in.
        font: F,
    },
    /// A glyph assembled from parts stacked bottom-up.
    GlyphConstruction {
        /// Part glyphs, bottom-up.
        glyphs: Vec<G>,
        /// Vertical offset of each part from the construction origin.
        offsets: Vec<f64>,
        /// The sized font the parts are drawn in.
        font: F,
    },
    /// Table rows, each a positioned row list.
    Table {
        /// Row sub-trees, positions relative to this node.
        rows: Vec<DisplayNode<F, G>>,
    },
}

/// One node of the display tree.
#[derive(Debug, Clone)]
pub struct DisplayNode<F: MathFont, G> {
    /// Kind-specific payload.
    pub content: DisplayContent<F, G>,
    /// Offset relative to the parent origin.
    pub position: Point,
    /// Horizontal extent.
    pub width: f64,
    ascent: f64,
    descent: f64,
    /// Downward displacement for axis-centered glyphs; folded into the
    /// reported ascent and descent.
    pub shift_down: f64,
    /// Source range this node covers.
    pub range: Range,
    /// Whether a script was attached to this node.
    pub has_script: bool,
    /// Script tag, when this node is an attached script.
    pub line_position: LinePosition,
    /// Index of the atom a script attaches to, when this node is a script.
    pub index_in_parent: Option<usize>,
    /// Color applied by an enclosing color change, if any.
    pub text_color: Option<Color>,
}

impl<F: MathFont, G> DisplayNode<F, G> {
    /// Build a node with explicit metrics at the origin.
    #[must_use]
    pub(crate) fn with_metrics(
        content: DisplayContent<F, G>,
        width: f64,
        ascent: f64,
        descent: f64,
        range: Range,
    ) -> Self {
        Self {
            content,
            position: Point::default(),
            width,
            ascent,
            descent,
            shift_down: 0.0,
            range,
            has_script: false,
            line_position: LinePosition::Regular,
            index_in_parent: None,
            text_color: None,
        }
    }

    /// Build a composite node from positioned children, computing its
    /// metrics as the children's bounding extents (clamped at zero).
    #[must_use]
    pub(crate) fn from_children(children: Vec<Self>, range: Range) -> Self {
        let (width, ascent, descent) = extents(&children);
        Self::with_metrics(DisplayContent::List { children }, width, ascent, descent, range)
    }

    /// Extent above the baseline, after any axis-centering shift.
    #[must_use]
    pub fn ascent(&self) -> f64 {
        self.ascent - self.shift_down
    }

    /// Extent below the baseline, after any axis-centering shift.
    #[must_use]
    pub fn descent(&self) -> f64 {
        self.descent + self.shift_down
    }

    /// Apply a color to this node and every descendant that does not already
    /// carry one.
    pub fn set_text_color_recursive(&mut self, color: Color) {
        if self.text_color.is_none() {
            self.text_color = Some(color);
        }
        match &mut self.content {
            DisplayContent::Run { .. }
            | DisplayContent::Glyph { .. }
            | DisplayContent::GlyphConstruction { .. } => {}
            DisplayContent::List { children } | DisplayContent::Table { rows: children } => {
                for child in children {
                    child.set_text_color_recursive(color);
                }
            }
            DisplayContent::Fraction {
                numerator,
                denominator,
                ..
            } => {
                numerator.set_text_color_recursive(color);
                denominator.set_text_color_recursive(color);
            }
            DisplayContent::Radical {
                radicand,
                glyph,
                degree,
                ..
            } => {
                radicand.set_text_color_recursive(color);
                glyph.set_text_color_recursive(color);
                if let Some(degree) = degree {
                    degree.set_text_color_recursive(color);
                }
            }
            DisplayContent::Accent { accent, accentee } => {
                accent.set_text_color_recursive(color);
                accentee.set_text_color_recursive(color);
            }
            DisplayContent::LargeOpLimits {
                nucleus,
                upper_limit,
                lower_limit,
                ..
            } => {
                nucleus.set_text_color_recursive(color);
                if let Some(upper) = upper_limit {
                    upper.set_text_color_recursive(color);
                }
                if let Some(lower) = lower_limit {
                    lower.set_text_color_recursive(color);
                }
            }
            DisplayContent::Line { inner, .. } => inner.set_text_color_recursive(color),
        }
    }

    /// The children of a composite node, or an empty slice.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match &self.content {
            DisplayContent::List { children } | DisplayContent::Table { rows: children } => {
                children
            }
            _ => &[],
        }
    }
}

/// Bounding extents of a set of positioned siblings, each clamped at zero
/// the way an empty list has zero size.
pub(crate) fn extents<F: MathFont, G>(children: &[DisplayNode<F, G>]) -> (f64, f64, f64) {
    let mut width: f64 = 0.0;
    let mut ascent: f64 = 0.0;
    let mut descent: f64 = 0.0;
    for child in children {
        ascent = ascent.max(child.position.y + child.ascent());
        descent = descent.max(child.descent() - child.position.y);
        width = width.max(child.position.x + child.width);
    }
    (width, ascent.max(0.0), descent.max(0.0))
}
