use super::ids::{AtomId, ChainId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Residue {
    pub seq_id: isize,                 // Residue sequence number from source file
    pub insertion_code: Option<char>,  // PDB insertion code, if any
    pub name: String,                  // Name of the residue (e.g., "CYS", "NAG")
    pub chain_id: ChainId,             // ID of the parent chain
    pub(crate) atoms: Vec<AtomId>,     // Atoms of this residue in file order
}

impl Residue {
    pub(crate) fn new(seq_id: isize, insertion_code: Option<char>, name: &str, chain_id: ChainId) -> Self {
        Self {
            seq_id,
            insertion_code,
            name: name.to_string(),
            chain_id,
            atoms: Vec::new(),
        }
    }

    pub(crate) fn add_atom(&mut self, atom_id: AtomId) {
        self.atoms.push(atom_id);
    }

    pub fn atoms(&self) -> &[AtomId] {
        &self.atoms
    }

    /// Sequence number with insertion code, e.g. `"52A"`.
    pub fn seq_label(&self) -> String {
        match self.insertion_code {
            Some(icode) => format!("{}{}", self.seq_id, icode),
            None => self.seq_id.to_string(),
        }
    }
}
