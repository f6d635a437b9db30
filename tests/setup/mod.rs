//! Shared deterministic font doubles for the integration tests.
//!
//! The metrics mimic the proportions of a TeX math font, expressed in ems
//! and scaled by the font's point size, so every expected value in a test
//! can be recomputed from the constants below.

#![allow(dead_code)]

use mathsetter::{
    AtomKind, BoundingBox, GlyphPart, GlyphResolver, LineStyle, MathAtom, MathFont, MathList,
    MathMetrics, TypesettingContext,
};

pub const POINT_SIZE: f64 = 20.0;

pub const SCRIPT_SCALE: f64 = 0.7;
pub const SCRIPT_SCRIPT_SCALE: f64 = 0.5;
pub const AXIS_HEIGHT: f64 = 0.25;
pub const RULE_THICKNESS: f64 = 0.04;
pub const X_HEIGHT: f64 = 0.431;

pub const NUM_SHIFT_UP_DISPLAY: f64 = 0.677;
pub const NUM_SHIFT_UP: f64 = 0.394;
pub const DENOM_SHIFT_DOWN_DISPLAY: f64 = 0.686;
pub const DENOM_SHIFT_DOWN: f64 = 0.345;
pub const FRACTION_GAP_MIN_DISPLAY: f64 = 3.0 * RULE_THICKNESS;
pub const FRACTION_GAP_MIN: f64 = RULE_THICKNESS;
pub const DELIMITER_SIZE_DISPLAY: f64 = 2.39;
pub const DELIMITER_SIZE: f64 = 1.01;

pub const STACK_TOP_UP_DISPLAY: f64 = 0.677;
pub const STACK_TOP_UP: f64 = 0.444;
pub const STACK_BOTTOM_DOWN_DISPLAY: f64 = 0.686;
pub const STACK_BOTTOM_DOWN: f64 = 0.345;
pub const STACK_GAP_MIN_DISPLAY: f64 = 7.0 * RULE_THICKNESS;
pub const STACK_GAP_MIN: f64 = 3.0 * RULE_THICKNESS;

pub const RADICAL_GAP_DISPLAY: f64 = 0.15;
pub const RADICAL_GAP: f64 = 0.064;
pub const RADICAL_EXTRA_ASCENDER: f64 = RULE_THICKNESS;
pub const RADICAL_KERN_BEFORE: f64 = 0.278;
pub const RADICAL_KERN_AFTER: f64 = -0.556;
pub const RADICAL_DEGREE_RAISE: f64 = 0.6;

pub const SUP_SHIFT_UP: f64 = 0.413;
pub const SUP_SHIFT_UP_CRAMPED: f64 = 0.289;
pub const SUP_DROP_MAX: f64 = 0.25;
pub const SUB_DROP_MIN: f64 = 0.2;
pub const SUP_BOTTOM_MIN: f64 = X_HEIGHT / 4.0;
pub const SUP_BOTTOM_MAX_WITH_SUB: f64 = 0.8 * X_HEIGHT;
pub const SUB_SHIFT_DOWN: f64 = 0.15;
pub const SUB_TOP_MAX: f64 = 0.8 * X_HEIGHT;
pub const SUB_SUP_GAP_MIN: f64 = 4.0 * RULE_THICKNESS;
pub const SPACE_AFTER_SCRIPT: f64 = 0.056;

pub const UPPER_LIMIT_GAP_MIN: f64 = 0.111;
pub const UPPER_LIMIT_RISE_MIN: f64 = 0.36;
pub const LOWER_LIMIT_GAP_MIN: f64 = 0.167;
pub const LOWER_LIMIT_DROP_MIN: f64 = 0.6;

pub const BAR_GAP: f64 = 3.0 * RULE_THICKNESS;
pub const OVERBAR_EXTRA_ASCENDER: f64 = RULE_THICKNESS;
pub const ACCENT_BASE_HEIGHT: f64 = X_HEIGHT;
pub const MIN_CONNECTOR_OVERLAP: f64 = 0.05;
pub const ITALIC_CORRECTION: f64 = 0.05;

/// Glyph id: the character plus a size-variant index (0 is the base form;
/// 10..=12 are assembly parts).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TestGlyph {
    pub ch: char,
    pub variant: u8,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TestFont {
    pub size: f64,
}

impl MathFont for TestFont {
    fn point_size(&self) -> f64 {
        self.size
    }

    fn with_size(&self, size: f64) -> Self {
        Self { size }
    }
}

/// Characters with a ladder of three growing vertical variants and an
/// extensible assembly.
const LADDER_CHARS: [char; 6] = ['(', ')', '[', ']', '|', '\u{221A}'];
/// Extra ascent each ladder step adds, in ems.
pub const LADDER_STEP: f64 = 0.6;

/// Base bounding box of a glyph in ems: (ascent, descent, width).
fn base_box_em(ch: char) -> (f64, f64, f64) {
    match ch {
        '\u{2211}' => (0.75, 0.25, 1.0),
        '\u{222B}' => (0.8, 0.2, 0.6),
        '(' | ')' | '[' | ']' | '|' => (0.75, 0.25, 0.4),
        '\u{221A}' => (0.95, 0.0, 0.6),
        'g' | 'j' | 'p' | 'q' | 'y' => (0.45, 0.2, 0.5),
        '0'..='9' => (0.65, 0.0, 0.5),
        _ => (0.7, 0.0, 0.5),
    }
}

/// Bounding box of a glyph variant in ems.
pub fn box_em(glyph: TestGlyph) -> (f64, f64, f64) {
    let (ascent, descent, width) = base_box_em(glyph.ch);
    if glyph.ch == '\u{2211}' && glyph.variant == 1 {
        return (1.05, 0.35, 1.4);
    }
    if LADDER_CHARS.contains(&glyph.ch) && glyph.variant > 0 && glyph.variant < 10 {
        return (
            ascent + LADDER_STEP * f64::from(glyph.variant),
            descent,
            width,
        );
    }
    (ascent, descent, width)
}

pub struct TestMetrics;

impl MathMetrics<TestFont, TestGlyph> for TestMetrics {
    fn style_size(&self, style: LineStyle, font: &TestFont) -> f64 {
        let scale = match style {
            LineStyle::Display | LineStyle::Text => 1.0,
            LineStyle::Script => SCRIPT_SCALE,
            LineStyle::ScriptScript => SCRIPT_SCRIPT_SCALE,
        };
        font.point_size() * scale
    }

    fn mu_unit(&self, font: &TestFont) -> f64 {
        font.point_size() / 18.0
    }

    fn axis_height(&self, font: &TestFont) -> f64 {
        AXIS_HEIGHT * font.point_size()
    }

    fn fraction_rule_thickness(&self, font: &TestFont) -> f64 {
        RULE_THICKNESS * font.point_size()
    }

    fn fraction_numerator_display_style_shift_up(&self, font: &TestFont) -> f64 {
        NUM_SHIFT_UP_DISPLAY * font.point_size()
    }

    fn fraction_numerator_shift_up(&self, font: &TestFont) -> f64 {
        NUM_SHIFT_UP * font.point_size()
    }

    fn fraction_denominator_display_style_shift_down(&self, font: &TestFont) -> f64 {
        DENOM_SHIFT_DOWN_DISPLAY * font.point_size()
    }

    fn fraction_denominator_shift_down(&self, font: &TestFont) -> f64 {
        DENOM_SHIFT_DOWN * font.point_size()
    }

    fn fraction_num_display_style_gap_min(&self, font: &TestFont) -> f64 {
        FRACTION_GAP_MIN_DISPLAY * font.point_size()
    }

    fn fraction_numerator_gap_min(&self, font: &TestFont) -> f64 {
        FRACTION_GAP_MIN * font.point_size()
    }

    fn fraction_denom_display_style_gap_min(&self, font: &TestFont) -> f64 {
        FRACTION_GAP_MIN_DISPLAY * font.point_size()
    }

    fn fraction_denominator_gap_min(&self, font: &TestFont) -> f64 {
        FRACTION_GAP_MIN * font.point_size()
    }

    fn fraction_delimiter_display_style_size(&self, font: &TestFont) -> f64 {
        DELIMITER_SIZE_DISPLAY * font.point_size()
    }

    fn fraction_delimiter_size(&self, font: &TestFont) -> f64 {
        DELIMITER_SIZE * font.point_size()
    }

    fn stack_top_display_style_shift_up(&self, font: &TestFont) -> f64 {
        STACK_TOP_UP_DISPLAY * font.point_size()
    }

    fn stack_top_shift_up(&self, font: &TestFont) -> f64 {
        STACK_TOP_UP * font.point_size()
    }

    fn stack_bottom_display_style_shift_down(&self, font: &TestFont) -> f64 {
        STACK_BOTTOM_DOWN_DISPLAY * font.point_size()
    }

    fn stack_bottom_shift_down(&self, font: &TestFont) -> f64 {
        STACK_BOTTOM_DOWN * font.point_size()
    }

    fn stack_display_style_gap_min(&self, font: &TestFont) -> f64 {
        STACK_GAP_MIN_DISPLAY * font.point_size()
    }

    fn stack_gap_min(&self, font: &TestFont) -> f64 {
        STACK_GAP_MIN * font.point_size()
    }

    fn radical_rule_thickness(&self, font: &TestFont) -> f64 {
        RULE_THICKNESS * font.point_size()
    }

    fn radical_display_style_vertical_gap(&self, font: &TestFont) -> f64 {
        RADICAL_GAP_DISPLAY * font.point_size()
    }

    fn radical_vertical_gap(&self, font: &TestFont) -> f64 {
        RADICAL_GAP * font.point_size()
    }

    fn radical_extra_ascender(&self, font: &TestFont) -> f64 {
        RADICAL_EXTRA_ASCENDER * font.point_size()
    }

    fn radical_kern_before_degree(&self, font: &TestFont) -> f64 {
        RADICAL_KERN_BEFORE * font.point_size()
    }

    fn radical_kern_after_degree(&self, font: &TestFont) -> f64 {
        RADICAL_KERN_AFTER * font.point_size()
    }

    fn radical_degree_bottom_raise_percent(&self, _font: &TestFont) -> f64 {
        RADICAL_DEGREE_RAISE
    }

    fn superscript_shift_up(&self, font: &TestFont) -> f64 {
        SUP_SHIFT_UP * font.point_size()
    }

    fn superscript_shift_up_cramped(&self, font: &TestFont) -> f64 {
        SUP_SHIFT_UP_CRAMPED * font.point_size()
    }

    fn superscript_baseline_drop_max(&self, font: &TestFont) -> f64 {
        SUP_DROP_MAX * font.point_size()
    }

    fn superscript_bottom_min(&self, font: &TestFont) -> f64 {
        SUP_BOTTOM_MIN * font.point_size()
    }

    fn superscript_bottom_max_with_subscript(&self, font: &TestFont) -> f64 {
        SUP_BOTTOM_MAX_WITH_SUB * font.point_size()
    }

    fn subscript_shift_down(&self, font: &TestFont) -> f64 {
        SUB_SHIFT_DOWN * font.point_size()
    }

    fn subscript_baseline_drop_min(&self, font: &TestFont) -> f64 {
        SUB_DROP_MIN * font.point_size()
    }

    fn subscript_top_max(&self, font: &TestFont) -> f64 {
        SUB_TOP_MAX * font.point_size()
    }

    fn sub_superscript_gap_min(&self, font: &TestFont) -> f64 {
        SUB_SUP_GAP_MIN * font.point_size()
    }

    fn space_after_script(&self, font: &TestFont) -> f64 {
        SPACE_AFTER_SCRIPT * font.point_size()
    }

    fn upper_limit_gap_min(&self, font: &TestFont) -> f64 {
        UPPER_LIMIT_GAP_MIN * font.point_size()
    }

    fn upper_limit_baseline_rise_min(&self, font: &TestFont) -> f64 {
        UPPER_LIMIT_RISE_MIN * font.point_size()
    }

    fn lower_limit_gap_min(&self, font: &TestFont) -> f64 {
        LOWER_LIMIT_GAP_MIN * font.point_size()
    }

    fn lower_limit_baseline_drop_min(&self, font: &TestFont) -> f64 {
        LOWER_LIMIT_DROP_MIN * font.point_size()
    }

    fn underbar_vertical_gap(&self, font: &TestFont) -> f64 {
        BAR_GAP * font.point_size()
    }

    fn underbar_rule_thickness(&self, font: &TestFont) -> f64 {
        RULE_THICKNESS * font.point_size()
    }

    fn overbar_vertical_gap(&self, font: &TestFont) -> f64 {
        BAR_GAP * font.point_size()
    }

    fn overbar_rule_thickness(&self, font: &TestFont) -> f64 {
        RULE_THICKNESS * font.point_size()
    }

    fn overbar_extra_ascender(&self, font: &TestFont) -> f64 {
        OVERBAR_EXTRA_ASCENDER * font.point_size()
    }

    fn accent_base_height(&self, font: &TestFont) -> f64 {
        ACCENT_BASE_HEIGHT * font.point_size()
    }

    fn min_connector_overlap(&self, font: &TestFont) -> f64 {
        MIN_CONNECTOR_OVERLAP * font.point_size()
    }

    fn italic_correction(&self, font: &TestFont, glyph: &TestGlyph) -> f64 {
        if glyph.ch == '\u{222B}' {
            0.12 * font.point_size()
        } else if glyph.ch.is_alphabetic() {
            ITALIC_CORRECTION * font.point_size()
        } else {
            0.0
        }
    }

    fn top_accent_attachment(&self, font: &TestFont, glyph: &TestGlyph) -> f64 {
        let (_, _, width) = box_em(*glyph);
        width / 2.0 * font.point_size()
    }

    fn vertical_variants(&self, _font: &TestFont, glyph: &TestGlyph) -> Vec<TestGlyph> {
        if LADDER_CHARS.contains(&glyph.ch) {
            (0..3)
                .map(|variant| TestGlyph {
                    ch: glyph.ch,
                    variant,
                })
                .collect()
        } else {
            vec![*glyph]
        }
    }

    fn horizontal_variants(&self, _font: &TestFont, glyph: &TestGlyph) -> Vec<TestGlyph> {
        vec![*glyph]
    }

    fn vertical_glyph_assembly(
        &self,
        font: &TestFont,
        glyph: &TestGlyph,
    ) -> Option<Vec<GlyphPart<TestGlyph>>> {
        if !LADDER_CHARS.contains(&glyph.ch) {
            return None;
        }
        let em = font.point_size();
        let part = |variant: u8| TestGlyph {
            ch: glyph.ch,
            variant,
        };
        Some(vec![
            GlyphPart::builder()
                .glyph(part(10))
                .full_advance(0.8 * em)
                .end_connector_length(0.2 * em)
                .build(),
            GlyphPart::builder()
                .glyph(part(11))
                .full_advance(0.6 * em)
                .start_connector_length(0.2 * em)
                .end_connector_length(0.2 * em)
                .is_extender(true)
                .build(),
            GlyphPart::builder()
                .glyph(part(12))
                .full_advance(0.8 * em)
                .start_connector_length(0.2 * em)
                .build(),
        ])
    }

    fn larger_glyph(&self, _font: &TestFont, glyph: &TestGlyph) -> TestGlyph {
        if glyph.ch == '\u{2211}' {
            TestGlyph {
                ch: glyph.ch,
                variant: 1,
            }
        } else {
            *glyph
        }
    }
}

pub struct TestGlyphs;

impl GlyphResolver<TestFont, TestGlyph> for TestGlyphs {
    fn find_glyphs(&self, _font: &TestFont, text: &str) -> Vec<TestGlyph> {
        text.chars().map(|ch| TestGlyph { ch, variant: 0 }).collect()
    }

    fn glyph_for_character_at(&self, _font: &TestFont, index: usize, text: &str) -> TestGlyph {
        let ch = text[index..].chars().next().unwrap_or('\0');
        TestGlyph { ch, variant: 0 }
    }

    fn empty_glyph(&self, _font: &TestFont) -> TestGlyph {
        TestGlyph {
            ch: '\0',
            variant: 0,
        }
    }

    fn is_empty_glyph(&self, glyph: &TestGlyph) -> bool {
        glyph.ch == '\0'
    }

    fn bounding_boxes(&self, font: &TestFont, glyphs: &[TestGlyph]) -> Vec<BoundingBox> {
        glyphs
            .iter()
            .map(|glyph| {
                let (ascent, descent, width) = box_em(*glyph);
                BoundingBox {
                    ascent: ascent * font.point_size(),
                    descent: descent * font.point_size(),
                    width: width * font.point_size(),
                }
            })
            .collect()
    }

    fn advances(&self, font: &TestFont, glyphs: &[TestGlyph]) -> (Vec<f64>, f64) {
        let advances: Vec<f64> = glyphs
            .iter()
            .map(|glyph| box_em(*glyph).2 * font.point_size())
            .collect();
        let total = advances.iter().sum();
        (advances, total)
    }
}

pub static METRICS: TestMetrics = TestMetrics;
pub static GLYPHS: TestGlyphs = TestGlyphs;

pub fn context() -> TypesettingContext<'static, TestFont, TestGlyph> {
    TypesettingContext::new(&METRICS, &GLYPHS)
}

pub fn font() -> TestFont {
    TestFont { size: POINT_SIZE }
}

pub fn atom(kind: AtomKind, nucleus: &str) -> MathAtom {
    MathAtom::with_nucleus(kind, nucleus)
}

pub fn variable(nucleus: &str) -> MathAtom {
    atom(AtomKind::Variable, nucleus)
}

pub fn number(nucleus: &str) -> MathAtom {
    atom(AtomKind::Number, nucleus)
}

pub fn list(atoms: Vec<MathAtom>) -> MathList {
    MathList::from(atoms)
}

pub fn fraction(numerator: Vec<MathAtom>, denominator: Vec<MathAtom>) -> MathAtom {
    atom(
        AtomKind::Fraction {
            numerator: list(numerator),
            denominator: list(denominator),
            has_rule: true,
            left_delimiter: None,
            right_delimiter: None,
        },
        "",
    )
}

pub fn radical(radicand: Vec<MathAtom>) -> MathAtom {
    atom(
        AtomKind::Radical {
            radicand: list(radicand),
            degree: None,
        },
        "",
    )
}

pub fn close_to(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}
