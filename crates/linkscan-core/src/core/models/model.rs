use super::atom::Atom;
use super::chain::Chain;
use super::ids::{AtomAddress, AtomId, AtomRef, ChainId, ResidueId};
use super::residue::Residue;
use nalgebra::Point3;
use slotmap::SlotMap;
use std::collections::HashMap;

/// One model (conformational ensemble member) of a structure.
///
/// Atoms, residues and chains live in slot maps so that [`AtomRef`]s stay valid
/// and cheap to compare. Chain order, residue order within a chain and atom
/// order within a residue are preserved from insertion, which is what gives
/// every atom its [`AtomAddress`].
#[derive(Debug, Clone, Default)]
pub struct Model {
    /// Primary storage for atoms using a slot map for efficient ID management.
    atoms: SlotMap<AtomId, Atom>,
    /// Primary storage for residues using a slot map for efficient ID management.
    residues: SlotMap<ResidueId, Residue>,
    /// Primary storage for chains using a slot map for efficient ID management.
    chains: SlotMap<ChainId, Chain>,
    /// Chains in file order.
    chain_order: Vec<ChainId>,
    /// Lookup map for finding chains by name.
    chain_name_map: HashMap<String, ChainId>,
    /// Lookup map for finding residues by chain, sequence number and insertion code.
    residue_id_map: HashMap<(ChainId, isize, Option<char>), ResidueId>,
}

impl Model {
    /// Creates a new, empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieves an immutable reference to an atom by its ID.
    ///
    /// # Arguments
    ///
    /// * `id` - The atom ID to look up.
    ///
    /// # Return
    ///
    /// Returns `Some(&Atom)` if the atom exists, otherwise `None`.
    pub fn atom(&self, id: AtomId) -> Option<&Atom> {
        self.atoms.get(id)
    }

    pub fn residue(&self, id: ResidueId) -> Option<&Residue> {
        self.residues.get(id)
    }

    pub fn chain(&self, id: ChainId) -> Option<&Chain> {
        self.chains.get(id)
    }

    /// Chains in file order.
    pub fn chains(&self) -> impl Iterator<Item = (ChainId, &Chain)> {
        self.chain_order
            .iter()
            .filter_map(|&id| self.chains.get(id).map(|chain| (id, chain)))
    }

    pub fn find_chain_by_name(&self, name: &str) -> Option<ChainId> {
        self.chain_name_map.get(name).copied()
    }

    pub fn find_residue(
        &self,
        chain_id: ChainId,
        seq_id: isize,
        insertion_code: Option<char>,
    ) -> Option<ResidueId> {
        self.residue_id_map
            .get(&(chain_id, seq_id, insertion_code))
            .copied()
    }

    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Adds a new chain or returns the existing chain with the same name.
    pub fn add_chain(&mut self, name: &str) -> ChainId {
        if let Some(&id) = self.chain_name_map.get(name) {
            return id;
        }
        let id = self.chains.insert(Chain::new(name));
        self.chain_order.push(id);
        self.chain_name_map.insert(name.to_string(), id);
        id
    }

    /// Adds a new residue to a chain or returns the existing one.
    ///
    /// This method is idempotent; a residue is identified by its chain, sequence
    /// number and insertion code.
    ///
    /// # Return
    ///
    /// Returns `None` if the chain doesn't exist.
    pub fn add_residue(
        &mut self,
        chain_id: ChainId,
        seq_id: isize,
        insertion_code: Option<char>,
        name: &str,
    ) -> Option<ResidueId> {
        let chain = self.chains.get_mut(chain_id)?;
        let key = (chain_id, seq_id, insertion_code);

        let residue_id = *self.residue_id_map.entry(key).or_insert_with(|| {
            let residue = Residue::new(seq_id, insertion_code, name, chain_id);
            self.residues.insert(residue)
        });

        if !chain.residues.contains(&residue_id) {
            chain.residues.push(residue_id);
        }

        Some(residue_id)
    }

    /// Appends an atom to a residue; the atom's `residue_id` is overwritten to match.
    ///
    /// # Return
    ///
    /// Returns `None` if the residue doesn't exist.
    pub fn add_atom_to_residue(&mut self, residue_id: ResidueId, mut atom: Atom) -> Option<AtomId> {
        let residue = self.residues.get_mut(residue_id)?;
        atom.residue_id = residue_id;
        let atom_id = self.atoms.insert(atom);
        residue.add_atom(atom_id);
        Some(atom_id)
    }

    /// Builds the reference for an atom from its ID.
    pub fn atom_ref(&self, atom_id: AtomId) -> Option<AtomRef> {
        let atom = self.atoms.get(atom_id)?;
        let residue = self.residues.get(atom.residue_id)?;
        Some(AtomRef::new(residue.chain_id, atom.residue_id, atom_id))
    }

    /// Every atom in (chain, residue, atom) order together with its address.
    pub fn iter_atoms(&self) -> impl Iterator<Item = (AtomAddress, AtomRef, &Atom)> + '_ {
        self.chain_order
            .iter()
            .enumerate()
            .flat_map(move |(chain_idx, &chain_id)| {
                let residues = self
                    .chains
                    .get(chain_id)
                    .map(|c| c.residues.as_slice())
                    .unwrap_or(&[]);
                residues
                    .iter()
                    .enumerate()
                    .flat_map(move |(residue_idx, &residue_id)| {
                        let atoms = self
                            .residues
                            .get(residue_id)
                            .map(|r| r.atoms.as_slice())
                            .unwrap_or(&[]);
                        atoms
                            .iter()
                            .enumerate()
                            .filter_map(move |(atom_idx, &atom_id)| {
                                self.atoms.get(atom_id).map(|atom| {
                                    (
                                        AtomAddress::new(chain_idx, residue_idx, atom_idx),
                                        AtomRef::new(chain_id, residue_id, atom_id),
                                        atom,
                                    )
                                })
                            })
                    })
            })
    }

    /// Turns an ordinal address back into a reference.
    pub fn resolve(&self, address: AtomAddress) -> Option<AtomRef> {
        let chain_id = *self.chain_order.get(address.chain)?;
        let residue_id = *self.chains.get(chain_id)?.residues.get(address.residue)?;
        let atom_id = *self.residues.get(residue_id)?.atoms.get(address.atom)?;
        Some(AtomRef::new(chain_id, residue_id, atom_id))
    }

    /// Finds an atom by name within a residue, honouring conformers.
    ///
    /// With `altloc` set, atoms of a different non-blank conformer are skipped;
    /// with `altloc` blank the first atom of that name is returned.
    pub fn find_atom(
        &self,
        residue_id: ResidueId,
        name: &str,
        altloc: Option<char>,
    ) -> Option<(AtomId, &Atom)> {
        self.residues
            .get(residue_id)?
            .atoms
            .iter()
            .filter_map(|&id| self.atoms.get(id).map(|atom| (id, atom)))
            .find(|(_, atom)| atom.name == name && atom.is_compatible_conformer(altloc))
    }

    pub fn positions(&self) -> impl Iterator<Item = &Point3<f64>> {
        self.atoms.values().map(|atom| &atom.position)
    }
}
