// src/convert.rs
//
// decode (.vesta) -> expand -> format -> write (.cell)

use crate::config::SpinMode;
use crate::error::{ConvertError, Result};
use crate::io;
use crate::model::{ExpandedAtom, LatticeParameters, StructureDocument};
use crate::physics::operations::{self, WrapMode};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ConvertOptions {
    pub spin: SpinMode,
    pub wrap: WrapMode,
}

/// Everything that goes into the .cell file.
#[derive(Debug, Clone)]
pub struct CellFile {
    pub lattice: LatticeParameters,
    pub atoms: Vec<ExpandedAtom>,
}

impl CellFile {
    #[cfg(test)]
    pub fn render(&self) -> String {
        io::castep::render(&self.lattice, &self.atoms)
    }
}

fn require<T>(section: Option<T>, keyword: &str) -> Result<T> {
    section.ok_or_else(|| ConvertError::MissingSection(keyword.to_string()))
}

pub fn vesta_to_castep(doc: StructureDocument, opts: ConvertOptions) -> Result<CellFile> {
    let lattice = require(doc.lattice, "CELLP")?;
    let basis = require(doc.basis, "STRUC")?;
    let ops = require(doc.operations, "SYMOP")?;

    let moments = match opts.spin {
        SpinMode::Noncollinear => {
            let moments = require(doc.moments, "VECTR")?;
            if moments.len() < basis.len() {
                log::warn!(
                    "VECTR has {} vectors for {} basis atoms; the rest get no spin",
                    moments.len(),
                    basis.len()
                );
            }
            Some(moments)
        }
        SpinMode::Collinear => {
            log::warn!("Collinear spin is not implemented yet; writing without spin");
            None
        }
        SpinMode::Nospin => None,
    };

    let atoms = operations::generate(&basis, &ops, moments.as_deref(), opts.wrap)?;
    log::info!("Expanded {} basis atoms into {} positions", basis.len(), atoms.len());

    Ok(CellFile { lattice, atoms })
}

/// Convert `<input>.vesta` into `<output>.cell`, returning the written path.
/// Nothing is written unless decoding and expansion both succeed.
pub fn convert(input: &str, output: &str, opts: ConvertOptions) -> Result<PathBuf> {
    let doc = io::load_structure(input)?;
    let cell = vesta_to_castep(doc, opts)?;
    io::save_structure(output, &cell.lattice, &cell.atoms)
}
