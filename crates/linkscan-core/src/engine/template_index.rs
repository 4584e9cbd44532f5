use crate::core::chemistry::chemlink::{ChemLink, ChemLinkLibrary, LinkGroup, LinkSide, pair_key};
use crate::core::chemistry::residues::{ResidueCatalog, ResidueInfo};
use phf::{Set, phf_set};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Reach assumed before any template is seen; keeps zinc-cysteine contacts in range.
pub const DEFAULT_GLOBAL_MAX_DIST: f64 = 2.34;

/// Group-only links that describe conformations rather than bonds.
static CONFORMATIONAL_LINK_IDS: Set<&'static str> = phf_set! {
    "TRANS", "PTRANS", "NMTRANS", "CIS", "PCIS", "NMCIS", "p", "SS",
};

/// Which bonded atom names get a per-atom reach entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReachPolicy {
    /// Both atoms of the representative bond.
    #[default]
    BothEndpoints,
    /// Only the first atom; pairs where the second atom comes first in scan
    /// order are then never examined.
    FirstEndpointOnly,
}

pub fn residue_group(info: &ResidueInfo) -> LinkGroup {
    if info.is_amino_acid() {
        LinkGroup::Peptide
    } else if info.is_nucleic_acid() {
        LinkGroup::DnaRna
    } else if info.is_sugar() {
        LinkGroup::Pyranose
    } else {
        LinkGroup::Null
    }
}

/// Read-only lookup structures derived from a template library.
#[derive(Debug, Clone)]
pub struct TemplateIndex<'a> {
    by_pair: HashMap<String, Vec<&'a ChemLink>>,
    global_max_dist: f64,
    reach: HashMap<String, f64>,
    residue_groups: HashMap<String, LinkGroup>,
    policy: ReachPolicy,
    indexed: usize,
}

impl<'a> TemplateIndex<'a> {
    pub fn new(library: &'a ChemLinkLibrary, catalog: &ResidueCatalog, policy: ReachPolicy) -> Self {
        let mut index = Self {
            by_pair: HashMap::new(),
            global_max_dist: DEFAULT_GLOBAL_MAX_DIST,
            reach: HashMap::new(),
            residue_groups: HashMap::new(),
            policy,
            indexed: 0,
        };

        for link in &library.links {
            let Some(bond) = link.primary_bond() else {
                continue;
            };
            if link.bonds.len() > 1 {
                warn!(
                    link = %link.id,
                    bonds = link.bonds.len(),
                    "Considering only the first bond of link template"
                );
            }
            if Self::is_excluded(link) {
                debug!(link = %link.id, "Skipping group-only link template");
                continue;
            }

            index.global_max_dist = index.global_max_dist.max(bond.value);
            let second = (policy == ReachPolicy::BothEndpoints).then_some(bond.atom2.name.as_str());
            for name in std::iter::once(bond.atom1.name.as_str()).chain(second) {
                let entry = index.reach.entry(name.to_string()).or_insert(bond.value);
                *entry = entry.max(bond.value);
            }
            index
                .by_pair
                .entry(bond.lexicographic_key())
                .or_default()
                .push(link);
            index.indexed += 1;
        }

        index.residue_groups = catalog
            .iter()
            .map(|(name, info)| (name.to_string(), residue_group(info)))
            .collect();

        index
    }

    fn is_excluded(link: &ChemLink) -> bool {
        match (&link.side1, &link.side2) {
            (LinkSide::Group(g1), LinkSide::Group(g2)) => {
                *g1 == LinkGroup::Null
                    || *g2 == LinkGroup::Null
                    || CONFORMATIONAL_LINK_IDS.contains(link.id.as_str())
            }
            _ => false,
        }
    }

    /// Templates whose representative bond joins atoms named `name1` and `name2`.
    pub fn candidates(&self, name1: &str, name2: &str) -> &[&'a ChemLink] {
        self.by_pair
            .get(&pair_key(name1, name2))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn global_max_dist(&self) -> f64 {
        self.global_max_dist
    }

    /// Longest template bond that starts at an atom called `atom_name`.
    pub fn reach(&self, atom_name: &str) -> Option<f64> {
        self.reach.get(atom_name).copied()
    }

    pub fn residue_group(&self, residue_name: &str) -> LinkGroup {
        self.residue_groups
            .get(residue_name)
            .copied()
            .unwrap_or_default()
    }

    /// Whether a residue called `residue_name` satisfies `side`.
    pub fn match_side(&self, side: &LinkSide, residue_name: &str) -> bool {
        match side {
            LinkSide::Comp(name) => name == residue_name,
            LinkSide::Group(LinkGroup::Null) => false,
            LinkSide::Group(group) => self.residue_group(residue_name) == *group,
        }
    }

    pub fn policy(&self) -> ReachPolicy {
        self.policy
    }

    /// Number of templates that made it into the index.
    pub fn len(&self) -> usize {
        self.indexed
    }

    pub fn is_empty(&self) -> bool {
        self.indexed == 0
    }
}
