// src/io/mod.rs
pub mod castep;
pub mod vesta;

use crate::error::Result;
use crate::model::{ExpandedAtom, LatticeParameters, StructureDocument};
use std::path::PathBuf;

pub const SOURCE_EXTENSION: &str = "vesta";
pub const DESTINATION_EXTENSION: &str = "cell";

/// `seed` + `.ext`. The seed may itself contain dots (`Fe2O3.afm`), so the
/// extension is appended rather than substituted.
pub fn with_extension(seed: &str, ext: &str) -> PathBuf {
    PathBuf::from(format!("{}.{}", seed, ext))
}

pub fn load_structure(seed: &str) -> Result<StructureDocument> {
    let path = with_extension(seed, SOURCE_EXTENSION);
    log::info!("Reading {}", path.display());
    vesta::parse(&path)
}

pub fn save_structure(seed: &str, lattice: &LatticeParameters, atoms: &[ExpandedAtom]) -> Result<PathBuf> {
    let path = with_extension(seed, DESTINATION_EXTENSION);
    castep::write(&path, lattice, atoms)?;
    log::info!("Wrote {} atoms to {}", atoms.len(), path.display());
    Ok(path)
}
