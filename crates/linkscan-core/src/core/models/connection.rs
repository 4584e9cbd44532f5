use super::ids::AtomRef;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Kind of an explicitly declared connection, following the mmCIF `conn_type_id` vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConnectionKind {
    #[default]
    Covalent,
    Disulfide,
    MetalCoordination,
    HydrogenBond,
    Unknown,
}

#[derive(Debug, Error)]
#[error("Invalid connection type string: '{0}'")]
pub struct ParseConnectionKindError(pub String);

impl FromStr for ConnectionKind {
    type Err = ParseConnectionKindError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "covale" | "covale_base" | "covale_phosphate" | "covale_sugar" => Ok(Self::Covalent),
            "disulf" => Ok(Self::Disulfide),
            "metalc" => Ok(Self::MetalCoordination),
            "hydrog" => Ok(Self::HydrogenBond),
            "?" | "unknown" => Ok(Self::Unknown),
            _ => Err(ParseConnectionKindError(s.to_string())),
        }
    }
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Covalent => "covale",
                Self::Disulfide => "disulf",
                Self::MetalCoordination => "metalc",
                Self::HydrogenBond => "hydrog",
                Self::Unknown => "?",
            }
        )
    }
}

/// A bond declared in the structure file itself (a `struct_conn` / LINK record).
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub id: String,
    pub kind: ConnectionKind,
    pub partner1: AtomRef,
    pub partner2: AtomRef,
    /// Distance reported by the file, if any.
    pub reported_distance: Option<f64>,
}

impl Connection {
    pub fn new(id: &str, kind: ConnectionKind, partner1: AtomRef, partner2: AtomRef) -> Self {
        Self {
            id: id.to_string(),
            kind,
            partner1,
            partner2,
            reported_distance: None,
        }
    }

    pub fn with_distance(mut self, distance: f64) -> Self {
        self.reported_distance = Some(distance);
        self
    }

    pub fn contains(&self, atom: &AtomRef) -> bool {
        self.partner1 == *atom || self.partner2 == *atom
    }

    /// True when this connection joins `a` and `b`, in either order.
    pub fn links(&self, a: &AtomRef, b: &AtomRef) -> bool {
        (self.partner1 == *a && self.partner2 == *b) || (self.partner1 == *b && self.partner2 == *a)
    }
}
