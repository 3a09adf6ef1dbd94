use crate::error::{ConvertError, Result};
use crate::model::{AffineOp, BasisAtom, ExpandedAtom, MomentVector};
use serde::{Deserialize, Serialize};

/// How fractional coordinates are brought back into the unit cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum WrapMode {
    /// Add or subtract one cell once. Positions more than one cell away stay outside.
    #[default]
    SinglePass,
    /// Full periodic reduction into [0, 1).
    Modulo,
}

pub fn wrap(x: f64, mode: WrapMode) -> f64 {
    match mode {
        WrapMode::SinglePass => {
            if x < 0.0 {
                let y = x + 1.0;
                // -1e-20 + 1.0 rounds to 1.0
                if y >= 1.0 {
                    0.0
                } else {
                    y
                }
            } else if x >= 1.0 {
                x - 1.0
            } else {
                x
            }
        }
        WrapMode::Modulo => {
            let r = x.rem_euclid(1.0);
            // rem_euclid can round up to exactly 1.0 for tiny negative inputs
            if r >= 1.0 {
                0.0
            } else {
                r
            }
        }
    }
}

pub fn wrap_position(p: [f64; 3], mode: WrapMode) -> [f64; 3] {
    [wrap(p[0], mode), wrap(p[1], mode), wrap(p[2], mode)]
}

fn outside_cell_message(count: usize, mode: WrapMode) -> String {
    let how = match mode {
        WrapMode::SinglePass => "single-pass",
        WrapMode::Modulo => "modulo",
    };
    format!("{} expanded positions remain outside [0,1) after {} wrapping", count, how)
}

/// Apply the first `symmetry_count` operations to every basis atom.
///
/// Output order is atom-major: all images of atom 0 (op 0, op 1, ...), then
/// atom 1, and so on. Moments are attached by basis index and only get the
/// linear part of each operation; they are never wrapped.
pub fn generate(
    basis: &[BasisAtom],
    ops: &[AffineOp],
    moments: Option<&[MomentVector]>,
    mode: WrapMode,
) -> Result<Vec<ExpandedAtom>> {
    let total: usize = basis.iter().map(|a| a.symmetry_count).sum();
    let mut expanded = Vec::with_capacity(total);
    let mut still_outside = 0;

    for (i, atom) in basis.iter().enumerate() {
        if atom.symmetry_count > ops.len() {
            return Err(ConvertError::OutOfRange {
                atom: i,
                operation: ops.len(),
                available: ops.len(),
            });
        }

        let moment = moments.and_then(|m| m.get(i));

        for op in &ops[..atom.symmetry_count] {
            let position = wrap_position(op.apply(atom.position), mode);
            if position.iter().any(|x| !(0.0..1.0).contains(x)) {
                still_outside += 1;
            }

            expanded.push(ExpandedAtom {
                label: atom.label.clone(),
                position,
                moment: moment.map(|m| op.apply_linear(m.components)),
            });
        }
    }

    if still_outside > 0 {
        log::warn!("{}", outside_cell_message(still_outside, mode));
    }

    Ok(expanded)
}
