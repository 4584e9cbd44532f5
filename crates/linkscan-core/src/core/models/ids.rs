use slotmap::new_key_type;

new_key_type! {
    pub struct AtomId;
    pub struct ResidueId;
    pub struct ChainId;
}

/// Identifies one atom of a [`Model`](super::model::Model) without owning it.
///
/// Two references are equal only when they point at the same stored atom of the
/// same model snapshot; atoms with identical names in different residues (or
/// alternate conformers of one residue) are always distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AtomRef {
    pub chain: ChainId,
    pub residue: ResidueId,
    pub atom: AtomId,
}

impl AtomRef {
    pub fn new(chain: ChainId, residue: ResidueId, atom: AtomId) -> Self {
        Self {
            chain,
            residue,
            atom,
        }
    }

    pub fn same_residue(&self, other: &AtomRef) -> bool {
        self.chain == other.chain && self.residue == other.residue
    }
}

/// Ordinal position of an atom inside a model: (chain, residue, atom) indices.
///
/// Ordering is lexicographic, which gives every pair of atoms a canonical
/// "lower" and "upper" member during a single scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtomAddress {
    pub chain: usize,
    pub residue: usize,
    pub atom: usize,
}

impl AtomAddress {
    pub fn new(chain: usize, residue: usize, atom: usize) -> Self {
        Self {
            chain,
            residue,
            atom,
        }
    }

    pub fn same_residue(&self, other: &AtomAddress) -> bool {
        self.chain == other.chain && self.residue == other.residue
    }
}
