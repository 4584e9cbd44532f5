use phf::{Map, phf_map};
use serde::Deserialize;
use std::collections::HashMap;

/// Broad chemical classification of a residue (monomer) type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResidueKind {
    AminoAcid,
    NucleicAcid,
    Water,
    /// Sugar with a six-membered (pyranose) ring.
    Pyranose,
    Other,
}

/// What is known about a residue type independently of any particular structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ResidueInfo {
    pub kind: ResidueKind,
    /// Hydrogens carried by the residue when it sits inside a polymer.
    pub hydrogen_count: u8,
}

impl ResidueInfo {
    pub const fn new(kind: ResidueKind, hydrogen_count: u8) -> Self {
        Self {
            kind,
            hydrogen_count,
        }
    }

    pub fn is_amino_acid(&self) -> bool {
        self.kind == ResidueKind::AminoAcid
    }

    pub fn is_nucleic_acid(&self) -> bool {
        self.kind == ResidueKind::NucleicAcid
    }

    pub fn is_water(&self) -> bool {
        self.kind == ResidueKind::Water
    }

    pub fn is_sugar(&self) -> bool {
        self.kind == ResidueKind::Pyranose
    }
}

const fn aa(h: u8) -> ResidueInfo {
    ResidueInfo::new(ResidueKind::AminoAcid, h)
}

const fn na(h: u8) -> ResidueInfo {
    ResidueInfo::new(ResidueKind::NucleicAcid, h)
}

const fn pyr(h: u8) -> ResidueInfo {
    ResidueInfo::new(ResidueKind::Pyranose, h)
}

static STANDARD_RESIDUES: Map<&'static str, ResidueInfo> = phf_map! {
    // Amino acids
    "ALA" => aa(5), "ARG" => aa(13), "ASN" => aa(6), "ASP" => aa(4), "CYS" => aa(5),
    "GLN" => aa(8), "GLU" => aa(6), "GLY" => aa(3), "HIS" => aa(8), "ILE" => aa(11),
    "LEU" => aa(11), "LYS" => aa(13), "MET" => aa(9), "PHE" => aa(9), "PRO" => aa(7),
    "SER" => aa(5), "THR" => aa(7), "TRP" => aa(10), "TYR" => aa(9), "VAL" => aa(9),
    "SEC" => aa(5), "PYL" => aa(19), "MSE" => aa(9), "HSE" => aa(8), "HSP" => aa(9),
    // Nucleotides
    "DA" => na(12), "DC" => na(12), "DG" => na(12), "DT" => na(13), "DU" => na(11),
    "A" => na(12), "C" => na(12), "G" => na(12), "U" => na(11),
    // Water
    "HOH" => ResidueInfo::new(ResidueKind::Water, 2),
    "DOD" => ResidueInfo::new(ResidueKind::Water, 2),
    "WAT" => ResidueInfo::new(ResidueKind::Water, 2),
    // Pyranoses
    "GLC" => pyr(12), "BGC" => pyr(12), "MAN" => pyr(12), "BMA" => pyr(12),
    "GAL" => pyr(12), "GLA" => pyr(12), "NAG" => pyr(15), "NDG" => pyr(15),
    "FUC" => pyr(12), "FUL" => pyr(12), "XYP" => pyr(10), "XYS" => pyr(10),
    "A2G" => pyr(15), "NGA" => pyr(15),
};

/// Lookup table from residue name to [`ResidueInfo`].
///
/// The standard table is compiled in; dictionaries that define additional
/// monomers can extend it with [`ResidueCatalog::insert`].
#[derive(Debug, Clone, Default)]
pub struct ResidueCatalog {
    entries: HashMap<String, ResidueInfo>,
}

impl ResidueCatalog {
    /// An empty catalog; every residue classifies as unknown.
    pub fn new() -> Self {
        Self::default()
    }

    /// The compiled-in catalog of amino acids, nucleotides, water and pyranoses.
    pub fn standard() -> Self {
        let entries = STANDARD_RESIDUES
            .entries()
            .map(|(name, info)| (name.to_string(), *info))
            .collect();
        Self { entries }
    }

    pub fn insert(&mut self, residue_name: &str, info: ResidueInfo) -> Option<ResidueInfo> {
        self.entries.insert(residue_name.to_string(), info)
    }

    pub fn classify(&self, residue_name: &str) -> Option<&ResidueInfo> {
        self.entries.get(residue_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResidueInfo)> {
        self.entries.iter().map(|(name, info)| (name.as_str(), info))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
