//! Normalization of raw math lists before layout.
//!
//! Variables and numbers are not TeX atom types; TeX resolves them while
//! parsing. Here they are rewritten to ordinary atoms with their nucleus
//! mapped through the requested font style (Unicode mathematical
//! alphanumeric symbols), unary operators are retyped to ordinary, and
//! adjacent script-less ordinary atoms are fused into single runs (TeX
//! rule 14). Ordering is preserved and no source atom is lost: fusion
//! accumulates the absorbed atoms on the surviving one.

extern crate alloc;

use crate::atom::{AtomKind, FontStyle, MathAtom, MathList};
use alloc::string::String;
use alloc::vec::Vec;
use phf::phf_map;

/// Mathematical Alphanumeric Symbols has reserved holes where a styled
/// letter predates Unicode 3.1; those code points map to the older BMP
/// letters instead.
static RESERVED_HOLES: phf::Map<u32, u32> = phf_map! {
    // italic
    0x1D455_u32 => 0x210E, // h, Planck constant
    // script
    0x1D49D_u32 => 0x212C, // B
    0x1D4A0_u32 => 0x2130, // E
    0x1D4A1_u32 => 0x2131, // F
    0x1D4A3_u32 => 0x210B, // H
    0x1D4A4_u32 => 0x2110, // I
    0x1D4A7_u32 => 0x2112, // L
    0x1D4A8_u32 => 0x2133, // M
    0x1D4AD_u32 => 0x211B, // R
    0x1D4BA_u32 => 0x212F, // e
    0x1D4BC_u32 => 0x210A, // g
    0x1D4C4_u32 => 0x2134, // o
    // fraktur
    0x1D506_u32 => 0x212D, // C
    0x1D50B_u32 => 0x210C, // H
    0x1D50C_u32 => 0x2111, // I
    0x1D515_u32 => 0x211C, // R
    0x1D51D_u32 => 0x2128, // Z
    // double-struck
    0x1D53A_u32 => 0x2102, // C
    0x1D53F_u32 => 0x210D, // H
    0x1D545_u32 => 0x2115, // N
    0x1D547_u32 => 0x2119, // P
    0x1D548_u32 => 0x211A, // Q
    0x1D549_u32 => 0x211D, // R
    0x1D551_u32 => 0x2124, // Z
};

/// (uppercase base, lowercase base, digit base) of a style's alphabet.
/// `None` leaves the character group unchanged.
const fn alphabet_bases(
    style: FontStyle,
) -> (Option<u32>, Option<u32>, Option<u32>) {
    match style {
        // Default italicizes variables; digits stay upright.
        FontStyle::Default | FontStyle::Italic => (Some(0x1D434), Some(0x1D44E), None),
        FontStyle::Roman => (None, None, None),
        FontStyle::Bold => (Some(0x1D400), Some(0x1D41A), Some(0x1D7CE)),
        FontStyle::BoldItalic => (Some(0x1D468), Some(0x1D482), None),
        FontStyle::Caligraphic => (Some(0x1D49C), Some(0x1D4B6), None),
        FontStyle::Typewriter => (Some(0x1D670), Some(0x1D68A), Some(0x1D7F6)),
        FontStyle::SansSerif => (Some(0x1D5A0), Some(0x1D5BA), Some(0x1D7E2)),
        FontStyle::Fraktur => (Some(0x1D504), Some(0x1D51E), None),
        FontStyle::Blackboard => (Some(0x1D538), Some(0x1D552), Some(0x1D7D8)),
    }
}

/// Map one character into the given style's math alphabet. Characters
/// outside A-Z, a-z and 0-9 pass through unchanged.
#[must_use]
pub fn styled_char(c: char, style: FontStyle) -> char {
    let (upper, lower, digit) = alphabet_bases(style);
    let mapped = match c {
        'A'..='Z' => upper.map(|base| base + (c as u32 - 'A' as u32)),
        'a'..='z' => lower.map(|base| base + (c as u32 - 'a' as u32)),
        '0'..='9' => digit.map(|base| base + (c as u32 - '0' as u32)),
        _ => None,
    };
    mapped
        .map(|cp| RESERVED_HOLES.get(&cp).copied().unwrap_or(cp))
        .and_then(char::from_u32)
        .unwrap_or(c)
}

/// Map a whole nucleus through the style's alphabet.
#[must_use]
pub fn styled_nucleus(nucleus: &str, style: FontStyle) -> String {
    nucleus.chars().map(|c| styled_char(c, style)).collect()
}

/// Numbers stay upright unless an explicit style asks otherwise.
const fn number_style(style: FontStyle) -> FontStyle {
    match style {
        FontStyle::Default => FontStyle::Roman,
        other => other,
    }
}

/// Normalize a raw list for the dispatcher: resolve font styles, fold
/// variables, numbers and unary operators into ordinary atoms, and fuse
/// adjacent script-less ordinary runs.
#[must_use]
pub fn preprocess(list: &MathList) -> Vec<MathAtom> {
    let mut out: Vec<MathAtom> = Vec::with_capacity(list.atoms.len());
    for atom in &list.atoms {
        let mut atom = atom.clone();
        match atom.kind {
            AtomKind::Variable => {
                atom.nucleus = styled_nucleus(&atom.nucleus, atom.font_style);
                atom.kind = AtomKind::Ordinary;
            }
            AtomKind::Number => {
                atom.nucleus = styled_nucleus(&atom.nucleus, number_style(atom.font_style));
                atom.kind = AtomKind::Ordinary;
            }
            AtomKind::UnaryOperator => {
                atom.nucleus = styled_nucleus(&atom.nucleus, atom.font_style);
                atom.kind = AtomKind::Ordinary;
            }
            AtomKind::Ordinary
            | AtomKind::BinaryOperator
            | AtomKind::Relation
            | AtomKind::Open
            | AtomKind::Close
            | AtomKind::Punctuation
                if atom.font_style != FontStyle::Default =>
            {
                atom.nucleus = styled_nucleus(&atom.nucleus, atom.font_style);
            }
            _ => {}
        }
        if atom.kind == AtomKind::Ordinary
            && !atom.has_scripts()
            && let Some(prev) = out.last_mut()
            && prev.kind == AtomKind::Ordinary
            && !prev.has_scripts()
        {
            prev.fuse(&atom);
            continue;
        }
        out.push(atom);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::Range;

    fn atom(kind: AtomKind, nucleus: &str, location: usize) -> MathAtom {
        MathAtom::builder()
            .kind(kind)
            .nucleus(nucleus)
            .index_range(Range::new(location, nucleus.chars().count()))
            .build()
    }

    #[test]
    fn test_variable_maps_to_italic() {
        assert_eq!(styled_char('x', FontStyle::Default), '\u{1D465}');
        assert_eq!(styled_char('A', FontStyle::Default), '\u{1D434}');
    }

    #[test]
    fn test_italic_h_uses_planck_constant() {
        assert_eq!(styled_char('h', FontStyle::Italic), '\u{210E}');
    }

    #[test]
    fn test_script_and_blackboard_holes() {
        assert_eq!(styled_char('B', FontStyle::Caligraphic), '\u{212C}');
        assert_eq!(styled_char('e', FontStyle::Caligraphic), '\u{212F}');
        assert_eq!(styled_char('R', FontStyle::Blackboard), '\u{211D}');
        assert_eq!(styled_char('Z', FontStyle::Fraktur), '\u{2128}');
    }

    #[test]
    fn test_digits_stay_upright_by_default() {
        assert_eq!(styled_char('7', FontStyle::Default), '7');
        assert_eq!(styled_char('7', FontStyle::Bold), '\u{1D7D5}');
    }

    #[test]
    fn test_punctuation_passes_through() {
        assert_eq!(styled_char('+', FontStyle::Bold), '+');
    }

    #[test]
    fn test_folding_and_fusion() {
        let list = MathList::from(vec![
            atom(AtomKind::Variable, "x", 0),
            atom(AtomKind::Number, "2", 1),
            atom(AtomKind::UnaryOperator, "-", 2),
            atom(AtomKind::Relation, "=", 3),
        ]);
        let atoms = preprocess(&list);
        assert_eq!(atoms.len(), 2);
        assert_eq!(atoms[0].kind, AtomKind::Ordinary);
        assert_eq!(atoms[0].nucleus, "\u{1D465}2-");
        assert_eq!(atoms[0].index_range, Range::new(0, 3));
        assert_eq!(atoms[1].kind, AtomKind::Relation);
    }

    #[test]
    fn test_fusion_is_lossless() {
        let list = MathList::from(vec![
            atom(AtomKind::Ordinary, "a", 0),
            atom(AtomKind::Ordinary, "b", 1),
            atom(AtomKind::Ordinary, "c", 2),
        ]);
        let atoms = preprocess(&list);
        assert_eq!(atoms.len(), 1);
        let total: usize = atoms[0].fused.iter().map(|f| f.nucleus.chars().count()).sum();
        assert_eq!(total, 3);
        assert_eq!(atoms[0].nucleus, "abc");
    }

    #[test]
    fn test_fusion_stops_at_scripts() {
        let mut scripted = atom(AtomKind::Ordinary, "x", 0);
        scripted.superscript = Some(MathList::from(vec![atom(AtomKind::Number, "2", 1)]));
        let list = MathList::from(vec![scripted, atom(AtomKind::Ordinary, "y", 2)]);
        let atoms = preprocess(&list);
        assert_eq!(atoms.len(), 2);
    }

    #[test]
    fn test_scripted_atom_is_not_fused_into_predecessor() {
        let mut scripted = atom(AtomKind::Ordinary, "y", 1);
        scripted.superscript = Some(MathList::from(vec![atom(AtomKind::Number, "2", 2)]));
        let list = MathList::from(vec![atom(AtomKind::Ordinary, "x", 0), scripted]);
        let atoms = preprocess(&list);
        assert_eq!(atoms.len(), 2);
        assert_eq!(atoms[0].nucleus, "x");
        assert!(atoms[1].superscript.is_some());
    }
}
