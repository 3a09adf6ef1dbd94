//src/model/mod.rs
pub mod structure;
pub mod symmetry;

// Re-exports for cleaner imports
pub use structure::{BasisAtom, ExpandedAtom, LatticeParameters, MomentVector, StructureDocument};
pub use symmetry::AffineOp;
