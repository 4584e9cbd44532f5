use phf::{Map, phf_map};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Chemical element of an atom, H through Rn, plus `X` for anything unrecognised.
///
/// Discriminants equal atomic numbers (`X` is 0) so the per-element tables below
/// can be indexed directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(u8)]
pub enum Element {
    #[default]
    X = 0,
    H = 1,
    He = 2,
    Li = 3,
    Be = 4,
    B = 5,
    C = 6,
    N = 7,
    O = 8,
    F = 9,
    Ne = 10,
    Na = 11,
    Mg = 12,
    Al = 13,
    Si = 14,
    P = 15,
    S = 16,
    Cl = 17,
    Ar = 18,
    K = 19,
    Ca = 20,
    Sc = 21,
    Ti = 22,
    V = 23,
    Cr = 24,
    Mn = 25,
    Fe = 26,
    Co = 27,
    Ni = 28,
    Cu = 29,
    Zn = 30,
    Ga = 31,
    Ge = 32,
    As = 33,
    Se = 34,
    Br = 35,
    Kr = 36,
    Rb = 37,
    Sr = 38,
    Y = 39,
    Zr = 40,
    Nb = 41,
    Mo = 42,
    Tc = 43,
    Ru = 44,
    Rh = 45,
    Pd = 46,
    Ag = 47,
    Cd = 48,
    In = 49,
    Sn = 50,
    Sb = 51,
    Te = 52,
    I = 53,
    Xe = 54,
    Cs = 55,
    Ba = 56,
    La = 57,
    Ce = 58,
    Pr = 59,
    Nd = 60,
    Pm = 61,
    Sm = 62,
    Eu = 63,
    Gd = 64,
    Tb = 65,
    Dy = 66,
    Ho = 67,
    Er = 68,
    Tm = 69,
    Yb = 70,
    Lu = 71,
    Hf = 72,
    Ta = 73,
    W = 74,
    Re = 75,
    Os = 76,
    Ir = 77,
    Pt = 78,
    Au = 79,
    Hg = 80,
    Tl = 81,
    Pb = 82,
    Bi = 83,
    Po = 84,
    At = 85,
    Rn = 86,
}

const SYMBOLS: [&str; 87] = [
    "X",
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S",
    "Cl", "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga",
    "Ge", "As", "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd",
    "Ag", "Cd", "In", "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm",
    "Sm", "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os",
    "Ir", "Pt", "Au", "Hg", "Tl", "Pb", "Bi", "Po", "At", "Rn",
];

/// Single-bond covalent radii in Ångström (Cordero et al., Dalton Trans. 2008).
/// Low-spin values are used for Mn, Fe and Co. A negative entry means unknown.
const COVALENT_RADII: [f64; 87] = [
    -1.0,
    0.31, 0.28, 1.28, 0.96, 0.84, 0.76, 0.71, 0.66, 0.57, 0.58, 1.66, 1.41, 1.21, 1.11, 1.07,
    1.05, 1.02, 1.06, 2.03, 1.76, 1.70, 1.60, 1.53, 1.39, 1.39, 1.32, 1.26, 1.24, 1.32, 1.22,
    1.22, 1.20, 1.19, 1.20, 1.20, 1.16, 2.20, 1.95, 1.90, 1.75, 1.64, 1.54, 1.47, 1.46, 1.42,
    1.39, 1.45, 1.44, 1.42, 1.39, 1.39, 1.38, 1.39, 1.40, 2.44, 2.15, 2.07, 2.04, 2.03, 2.01,
    1.99, 1.98, 1.98, 1.96, 1.94, 1.92, 1.92, 1.89, 1.90, 1.87, 1.87, 1.75, 1.70, 1.62, 1.51,
    1.44, 1.41, 1.36, 1.36, 1.32, 1.45, 1.46, 1.48, 1.40, 1.50, 1.50,
];

static ELEMENT_BY_SYMBOL: Map<&'static str, Element> = phf_map! {
    "H" => Element::H, "HE" => Element::He, "LI" => Element::Li, "BE" => Element::Be,
    "B" => Element::B, "C" => Element::C, "N" => Element::N, "O" => Element::O,
    "F" => Element::F, "NE" => Element::Ne, "NA" => Element::Na, "MG" => Element::Mg,
    "AL" => Element::Al, "SI" => Element::Si, "P" => Element::P, "S" => Element::S,
    "CL" => Element::Cl, "AR" => Element::Ar, "K" => Element::K, "CA" => Element::Ca,
    "SC" => Element::Sc, "TI" => Element::Ti, "V" => Element::V, "CR" => Element::Cr,
    "MN" => Element::Mn, "FE" => Element::Fe, "CO" => Element::Co, "NI" => Element::Ni,
    "CU" => Element::Cu, "ZN" => Element::Zn, "GA" => Element::Ga, "GE" => Element::Ge,
    "AS" => Element::As, "SE" => Element::Se, "BR" => Element::Br, "KR" => Element::Kr,
    "RB" => Element::Rb, "SR" => Element::Sr, "Y" => Element::Y, "ZR" => Element::Zr,
    "NB" => Element::Nb, "MO" => Element::Mo, "TC" => Element::Tc, "RU" => Element::Ru,
    "RH" => Element::Rh, "PD" => Element::Pd, "AG" => Element::Ag, "CD" => Element::Cd,
    "IN" => Element::In, "SN" => Element::Sn, "SB" => Element::Sb, "TE" => Element::Te,
    "I" => Element::I, "XE" => Element::Xe, "CS" => Element::Cs, "BA" => Element::Ba,
    "LA" => Element::La, "CE" => Element::Ce, "PR" => Element::Pr, "ND" => Element::Nd,
    "PM" => Element::Pm, "SM" => Element::Sm, "EU" => Element::Eu, "GD" => Element::Gd,
    "TB" => Element::Tb, "DY" => Element::Dy, "HO" => Element::Ho, "ER" => Element::Er,
    "TM" => Element::Tm, "YB" => Element::Yb, "LU" => Element::Lu, "HF" => Element::Hf,
    "TA" => Element::Ta, "W" => Element::W, "RE" => Element::Re, "OS" => Element::Os,
    "IR" => Element::Ir, "PT" => Element::Pt, "AU" => Element::Au, "HG" => Element::Hg,
    "TL" => Element::Tl, "PB" => Element::Pb, "BI" => Element::Bi, "PO" => Element::Po,
    "AT" => Element::At, "RN" => Element::Rn,
    "D" => Element::H,
};

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown element symbol '{0}'")]
pub struct ParseElementError(pub String);

impl Element {
    pub fn atomic_number(self) -> u8 {
        self as u8
    }

    pub fn symbol(self) -> &'static str {
        SYMBOLS[self as usize]
    }

    /// Returns the covalent radius, or `None` for [`Element::X`].
    pub fn covalent_radius(self) -> Option<f64> {
        let r = COVALENT_RADII[self as usize];
        if r < 0.0 { None } else { Some(r) }
    }

    pub fn is_hydrogen(self) -> bool {
        self == Element::H
    }

    /// Looks up an element by symbol, falling back to [`Element::X`].
    ///
    /// Coordinate files routinely carry blank or malformed element columns, so
    /// the lenient form is what structure builders normally want.
    pub fn from_symbol_lossy(symbol: &str) -> Self {
        symbol.parse().unwrap_or_default()
    }
}

impl FromStr for Element {
    type Err = ParseElementError;

    /// Parses an element symbol case-insensitively; deuterium maps to hydrogen.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_uppercase();
        if key == "X" {
            return Ok(Element::X);
        }
        ELEMENT_BY_SYMBOL
            .get(key.as_str())
            .copied()
            .ok_or_else(|| ParseElementError(s.to_string()))
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
