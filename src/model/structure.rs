// src/model/structure.rs

use super::symmetry::AffineOp;

/// Cell edge lengths (a, b, c) and angles (alpha, beta, gamma) in degrees.
#[derive(Clone, Debug, PartialEq)]
pub struct LatticeParameters {
    pub lengths: [f64; 3],
    pub angles: [f64; 3],
}

/// Symmetry-inequivalent site as listed in the STRUC section.
#[derive(Clone, Debug, PartialEq)]
pub struct BasisAtom {
    pub label: String,
    pub position: [f64; 3],
    // How many leading SYMOP entries generate this site's orbit
    pub symmetry_count: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MomentVector {
    pub components: [f64; 3],
}

/// One site of the expanded cell, position in fractional coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpandedAtom {
    pub label: String,
    pub position: [f64; 3],
    pub moment: Option<[f64; 3]>,
}

#[derive(Clone, Debug, Default)]
pub struct StructureDocument {
    pub lattice: Option<LatticeParameters>,
    pub operations: Option<Vec<AffineOp>>,
    pub basis: Option<Vec<BasisAtom>>,
    pub moments: Option<Vec<MomentVector>>,
}
