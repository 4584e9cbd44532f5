use serde::Deserialize;
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// Residue group a link side may be restricted to instead of a residue name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LinkGroup {
    Peptide,
    DnaRna,
    Pyranose,
    /// No group; a side restricted to this never matches anything.
    #[default]
    Null,
}

impl fmt::Display for LinkGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                LinkGroup::Peptide => "peptide",
                LinkGroup::DnaRna => "DNA/RNA",
                LinkGroup::Pyranose => "pyranose",
                LinkGroup::Null => "null",
            }
        )
    }
}

/// Constraint on the residue at one end of a link.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkSide {
    /// Exactly this residue name.
    Comp(String),
    /// Any residue whose catalog classification maps to this group.
    Group(LinkGroup),
}

impl LinkSide {
    pub fn comp(name: &str) -> Self {
        LinkSide::Comp(name.to_string())
    }

    pub fn is_comp(&self) -> bool {
        matches!(self, LinkSide::Comp(_))
    }
}

/// Which side of a link an atom belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "u8")]
pub enum LinkSideRole {
    First,
    Second,
}

impl TryFrom<u8> for LinkSideRole {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(LinkSideRole::First),
            2 => Ok(LinkSideRole::Second),
            other => Err(format!("link side must be 1 or 2, got {}", other)),
        }
    }
}

/// An atom named relative to a link side.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LinkAtom {
    pub side: LinkSideRole,
    pub name: String,
}

impl LinkAtom {
    pub fn first(name: &str) -> Self {
        Self {
            side: LinkSideRole::First,
            name: name.to_string(),
        }
    }

    pub fn second(name: &str) -> Self {
        Self {
            side: LinkSideRole::Second,
            name: name.to_string(),
        }
    }
}

/// Builds the order-independent key for a pair of atom names.
pub fn pair_key(name1: &str, name2: &str) -> String {
    if name1 <= name2 {
        format!("{}/{}", name1, name2)
    } else {
        format!("{}/{}", name2, name1)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BondRestraint {
    pub atom1: LinkAtom,
    pub atom2: LinkAtom,
    /// Ideal bond length in Ångström.
    pub value: f64,
    #[serde(default)]
    pub esd: Option<f64>,
}

impl BondRestraint {
    pub fn new(atom1: LinkAtom, atom2: LinkAtom, value: f64) -> Self {
        Self {
            atom1,
            atom2,
            value,
            esd: None,
        }
    }

    pub fn lexicographic_key(&self) -> String {
        pair_key(&self.atom1.name, &self.atom2.name)
    }

    /// The bonded atom belonging to `role`.
    ///
    /// Falls back to position (`atom1` for the first side) when both atoms
    /// claim the same side.
    pub fn atom_on(&self, role: LinkSideRole) -> &LinkAtom {
        if self.atom1.side == role {
            &self.atom1
        } else if self.atom2.side == role {
            &self.atom2
        } else {
            match role {
                LinkSideRole::First => &self.atom1,
                LinkSideRole::Second => &self.atom2,
            }
        }
    }
}

/// Expected sign of a chiral volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChiralSign {
    Positive,
    Negative,
    /// Either handedness is acceptable; never rejects.
    Both,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChiralityRestraint {
    pub center: LinkAtom,
    pub atom1: LinkAtom,
    pub atom2: LinkAtom,
    pub atom3: LinkAtom,
    pub sign: ChiralSign,
}

impl ChiralityRestraint {
    pub fn atoms(&self) -> [&LinkAtom; 4] {
        [&self.center, &self.atom1, &self.atom2, &self.atom3]
    }

    /// True when `volume` has the opposite sign to the one required.
    pub fn is_wrong(&self, volume: f64) -> bool {
        match self.sign {
            ChiralSign::Positive => volume < 0.0,
            ChiralSign::Negative => volume > 0.0,
            ChiralSign::Both => false,
        }
    }
}

/// A known inter-residue bond: which residues it joins, the bond itself and
/// the stereochemistry it must respect.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChemLink {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub side1: LinkSide,
    pub side2: LinkSide,
    #[serde(default, rename = "bond")]
    pub bonds: Vec<BondRestraint>,
    #[serde(default, rename = "chirality")]
    pub chiralities: Vec<ChiralityRestraint>,
}

impl ChemLink {
    pub fn new(id: &str, side1: LinkSide, side2: LinkSide) -> Self {
        Self {
            id: id.to_string(),
            name: None,
            side1,
            side2,
            bonds: Vec::new(),
            chiralities: Vec::new(),
        }
    }

    pub fn with_bond(mut self, bond: BondRestraint) -> Self {
        self.bonds.push(bond);
        self
    }

    pub fn with_chirality(mut self, chirality: ChiralityRestraint) -> Self {
        self.chiralities.push(chirality);
        self
    }

    /// The bond that represents this link; any further bonds are ignored.
    pub fn primary_bond(&self) -> Option<&BondRestraint> {
        self.bonds.first()
    }

    pub fn side(&self, role: LinkSideRole) -> &LinkSide {
        match role {
            LinkSideRole::First => &self.side1,
            LinkSideRole::Second => &self.side2,
        }
    }

    /// Number of sides pinned to a specific residue name (0, 1 or 2).
    pub fn specificity(&self) -> usize {
        usize::from(self.side1.is_comp()) + usize::from(self.side2.is_comp())
    }
}

/// The full, in-memory collection of link templates.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChemLinkLibrary {
    #[serde(default, rename = "link")]
    pub links: Vec<ChemLink>,
}

#[derive(Debug, Error)]
pub enum LibraryLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

impl ChemLinkLibrary {
    pub fn new(links: Vec<ChemLink>) -> Self {
        Self { links }
    }

    pub fn load(path: &Path) -> Result<Self, LibraryLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| LibraryLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| LibraryLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn get(&self, id: &str) -> Option<&ChemLink> {
        self.links.iter().find(|link| link.id == id)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const LIBRARY_TOML: &str = r#"
        [[link]]
        id = "ZN-CYS"
        side1 = { comp = "ZN" }
        side2 = { comp = "CYS" }

        [[link.bond]]
        atom1 = { side = 1, name = "ZN" }
        atom2 = { side = 2, name = "SG" }
        value = 2.34
        esd = 0.05

        [[link]]
        id = "NAG-ASN"
        name = "N-glycosylation"
        side1 = { comp = "NAG" }
        side2 = { group = "peptide" }

        [[link.bond]]
        atom1 = { side = 1, name = "C1" }
        atom2 = { side = 2, name = "ND2" }
        value = 1.45

        [[link.chirality]]
        center = { side = 1, name = "C1" }
        atom1 = { side = 1, name = "O5" }
        atom2 = { side = 2, name = "ND2" }
        atom3 = { side = 1, name = "C2" }
        sign = "negative"
    "#;

    #[test]
    fn pair_key_is_order_independent() {
        assert_eq!(pair_key("SG", "ZN"), "SG/ZN");
        assert_eq!(pair_key("ZN", "SG"), "SG/ZN");
        assert_eq!(pair_key("C1", "C1"), "C1/C1");
    }

    #[test]
    fn atom_on_picks_atom_by_side_role() {
        let bond = BondRestraint::new(LinkAtom::second("SG"), LinkAtom::first("ZN"), 2.34);
        assert_eq!(bond.atom_on(LinkSideRole::First).name, "ZN");
        assert_eq!(bond.atom_on(LinkSideRole::Second).name, "SG");

        let same_side = BondRestraint::new(LinkAtom::first("C1"), LinkAtom::first("O4"), 1.44);
        assert_eq!(same_side.atom_on(LinkSideRole::First).name, "C1");
        assert_eq!(same_side.atom_on(LinkSideRole::Second).name, "O4");
    }

    #[test]
    fn chirality_sign_classes_reject_correctly() {
        let make = |sign| ChiralityRestraint {
            center: LinkAtom::first("C1"),
            atom1: LinkAtom::first("O5"),
            atom2: LinkAtom::second("ND2"),
            atom3: LinkAtom::first("C2"),
            sign,
        };
        assert!(make(ChiralSign::Positive).is_wrong(-1.0));
        assert!(!make(ChiralSign::Positive).is_wrong(2.5));
        assert!(make(ChiralSign::Negative).is_wrong(0.3));
        assert!(!make(ChiralSign::Negative).is_wrong(-0.3));
        assert!(!make(ChiralSign::Both).is_wrong(-4.0));
        assert!(!make(ChiralSign::Both).is_wrong(4.0));
    }

    #[test]
    fn specificity_counts_residue_pinned_sides() {
        let both = ChemLink::new("A", LinkSide::comp("ZN"), LinkSide::comp("CYS"));
        let one = ChemLink::new("B", LinkSide::comp("NAG"), LinkSide::Group(LinkGroup::Peptide));
        let none = ChemLink::new(
            "C",
            LinkSide::Group(LinkGroup::Peptide),
            LinkSide::Group(LinkGroup::Peptide),
        );
        assert_eq!(both.specificity(), 2);
        assert_eq!(one.specificity(), 1);
        assert_eq!(none.specificity(), 0);
    }

    #[test]
    fn from_toml_str_parses_links_bonds_and_chiralities() {
        let library = ChemLinkLibrary::from_toml_str(LIBRARY_TOML).unwrap();
        assert_eq!(library.len(), 2);

        let zn = library.get("ZN-CYS").unwrap();
        assert_eq!(zn.side1, LinkSide::comp("ZN"));
        assert_eq!(zn.side2, LinkSide::comp("CYS"));
        let bond = zn.primary_bond().unwrap();
        assert_eq!(bond.atom1, LinkAtom::first("ZN"));
        assert_eq!(bond.atom2, LinkAtom::second("SG"));
        assert_eq!(bond.value, 2.34);
        assert_eq!(bond.esd, Some(0.05));
        assert!(zn.chiralities.is_empty());

        let nag = library.get("NAG-ASN").unwrap();
        assert_eq!(nag.name.as_deref(), Some("N-glycosylation"));
        assert_eq!(nag.side2, LinkSide::Group(LinkGroup::Peptide));
        assert_eq!(nag.chiralities.len(), 1);
        assert_eq!(nag.chiralities[0].sign, ChiralSign::Negative);
    }

    #[test]
    fn from_toml_str_rejects_invalid_side_role() {
        let toml = r#"
            [[link]]
            id = "BAD"
            side1 = { comp = "ZN" }
            side2 = { comp = "CYS" }
            [[link.bond]]
            atom1 = { side = 3, name = "ZN" }
            atom2 = { side = 2, name = "SG" }
            value = 2.3
        "#;
        assert!(ChemLinkLibrary::from_toml_str(toml).is_err());
    }

    #[test]
    fn link_without_bonds_parses_with_empty_bond_list() {
        let toml = r#"
            [[link]]
            id = "TRANS"
            side1 = { group = "peptide" }
            side2 = { group = "peptide" }
        "#;
        let library = ChemLinkLibrary::from_toml_str(toml).unwrap();
        assert!(library.links[0].primary_bond().is_none());
    }

    #[test]
    fn load_reads_library_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("links.toml");
        fs::write(&path, LIBRARY_TOML).unwrap();

        let library = ChemLinkLibrary::load(&path).unwrap();
        assert_eq!(library.len(), 2);
    }

    #[test]
    fn load_fails_for_missing_file() {
        let dir = tempdir().unwrap();
        let result = ChemLinkLibrary::load(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(LibraryLoadError::Io { .. })));
    }

    #[test]
    fn load_fails_for_malformed_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "this is not toml").unwrap();
        let result = ChemLinkLibrary::load(&path);
        assert!(matches!(result, Err(LibraryLoadError::Toml { .. })));
    }
}
