//! Data tables behind the built-in keywords.

use super::ast::Keyword;
use phf::{phf_map, phf_set};

static KEYWORDS: phf::Map<&'static str, Keyword> = phf_map! {
    "all" => Keyword::All,
    "none" => Keyword::None,
    "protein" => Keyword::Protein,
    "backbone" => Keyword::Backbone,
    "sidechain" => Keyword::Sidechain,
    "water" => Keyword::Water,
    "hydrogen" => Keyword::Hydrogen,
};

/// Amino acid residue names, including common protonation variants and caps.
static PROTEIN_RESIDUES: phf::Set<&'static str> = phf_set! {
    "ALA", "ARG", "ASN", "ASP", "CYS", "GLN", "GLU", "GLY", "HIS", "ILE",
    "LEU", "LYS", "MET", "PHE", "PRO", "SER", "THR", "TRP", "TYR", "VAL",
    "ASH", "CYX", "CYM", "GLH", "HID", "HIE", "HIP", "HSD", "HSE", "HSP",
    "LYN", "MSE", "SEC", "PYL", "ACE", "NME",
};

static WATER_RESIDUES: phf::Set<&'static str> = phf_set! {
    "HOH", "WAT", "SOL", "H2O", "TIP3", "TIP4", "TIP5", "T3P", "T4P", "SPC",
};

static BACKBONE_ATOMS: phf::Set<&'static str> = phf_set! {
    "N", "CA", "C", "O", "OXT",
};

/// Looks up a keyword by name. Keywords are lowercase.
pub fn lookup(word: &str) -> Option<Keyword> {
    KEYWORDS.get(word).copied()
}

pub fn is_protein_residue(resname: &str) -> bool {
    PROTEIN_RESIDUES.contains(resname)
}

pub fn is_water_residue(resname: &str) -> bool {
    WATER_RESIDUES.contains(resname)
}

pub fn is_backbone_atom(name: &str) -> bool {
    BACKBONE_ATOMS.contains(name)
}

/// Hydrogen and its isotopes, by element symbol.
pub fn is_hydrogen_element(element: &str) -> bool {
    matches!(element, "H" | "D" | "T")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_lookup() {
        assert_eq!(lookup("protein"), Some(Keyword::Protein));
        assert_eq!(lookup("none"), Some(Keyword::None));
        assert_eq!(lookup("resid"), None);
    }

    #[test]
    fn residue_and_atom_tables() {
        assert!(is_protein_residue("GLY"));
        assert!(is_protein_residue("HIE"));
        assert!(!is_protein_residue("HOH"));
        assert!(is_water_residue("HOH"));
        assert!(is_water_residue("WAT"));
        assert!(is_backbone_atom("CA"));
        assert!(is_backbone_atom("OXT"));
        assert!(!is_backbone_atom("CB"));
        assert!(is_hydrogen_element("H"));
        assert!(!is_hydrogen_element("HG"));
    }
}
