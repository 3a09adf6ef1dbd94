// src/io/castep.rs
// CASTEP .cell writer: %block lattice_abc and %block positions_frac.

use crate::error::{ConvertError, Result};
use crate::model::{ExpandedAtom, LatticeParameters};
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

const LABEL_WIDTH: usize = 3;

/// Shortest round-trip text of a float, always with a decimal point.
pub fn fmt_float(x: f64) -> String {
    format!("{:?}", x)
}

fn max_width<'a>(values: impl IntoIterator<Item = &'a f64>) -> usize {
    values.into_iter().map(|v| fmt_float(*v).len()).max().unwrap_or(0)
}

fn write_row(f: &mut fmt::Formatter<'_>, values: &[f64; 3], width: usize) -> fmt::Result {
    for v in values {
        write!(f, "{:<width$} ", fmt_float(*v), width = width)?;
    }
    Ok(())
}

pub struct LatticeAbc<'a>(pub &'a LatticeParameters);

impl fmt::Display for LatticeAbc<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cell = self.0;
        let width = max_width(cell.lengths.iter().chain(&cell.angles));

        writeln!(f, "%block lattice_abc")?;
        write_row(f, &cell.lengths, width)?;
        writeln!(f)?;
        write_row(f, &cell.angles, width)?;
        writeln!(f)?;
        writeln!(f, "%endblock lattice_abc")
    }
}

pub struct PositionsFrac<'a>(pub &'a [ExpandedAtom]);

impl fmt::Display for PositionsFrac<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let atoms = self.0;
        let pos_width = max_width(atoms.iter().flat_map(|a| a.position.iter()));
        let spin_width = max_width(atoms.iter().filter_map(|a| a.moment.as_ref()).flatten());

        writeln!(f, "%block positions_frac")?;
        for atom in atoms {
            write!(f, "{:<w$.w$}", atom.label, w = LABEL_WIDTH)?;
            write_row(f, &atom.position, pos_width)?;
            if let Some(moment) = &atom.moment {
                write!(f, "spin= ")?;
                write_row(f, moment, spin_width)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "%endblock positions_frac")
    }
}

/// Full .cell text: lattice block, then positions block, each followed by an
/// empty line.
pub fn render(lattice: &LatticeParameters, atoms: &[ExpandedAtom]) -> String {
    format!("{}\n{}\n", LatticeAbc(lattice), PositionsFrac(atoms))
}

pub fn write(path: &Path, lattice: &LatticeParameters, atoms: &[ExpandedAtom]) -> Result<()> {
    let text = render(lattice, atoms);
    let io_err = |source| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::create(path).map_err(io_err)?;
    file.write_all(text.as_bytes()).map_err(io_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(label: &str, position: [f64; 3], moment: Option<[f64; 3]>) -> ExpandedAtom {
        ExpandedAtom {
            label: label.to_string(),
            position,
            moment,
        }
    }

    #[test]
    fn test_float_text_keeps_decimal_point() {
        assert_eq!(fmt_float(1.0), "1.0");
        assert_eq!(fmt_float(0.25), "0.25");
        assert_eq!(fmt_float(-0.5), "-0.5");
        assert_eq!(fmt_float(5.4307), "5.4307");
    }

    #[test]
    fn test_lattice_block_shares_one_width() {
        let cell = LatticeParameters {
            lengths: [5.4307, 5.4307, 10.0],
            angles: [90.0, 90.0, 120.0],
        };
        let text = LatticeAbc(&cell).to_string();
        let expected = concat!(
            "%block lattice_abc\n",
            "5.4307 5.4307 10.0   \n",
            "90.0   90.0   120.0  \n",
            "%endblock lattice_abc\n",
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_positions_without_spin() {
        let atoms = [
            atom("Fe", [0.0, 0.5, 0.25], None),
            atom("O", [0.125, 0.0, 0.0], None),
        ];
        let text = PositionsFrac(&atoms).to_string();
        let expected = concat!(
            "%block positions_frac\n",
            "Fe 0.0   0.5   0.25  \n",
            "O  0.125 0.0   0.0   \n",
            "%endblock positions_frac\n",
        );
        assert_eq!(text, expected);
        assert!(!text.contains("spin="));
    }

    #[test]
    fn test_positions_with_spin() {
        let atoms = [
            atom("Fe", [0.0, 0.0, 0.0], Some([0.0, 0.0, 3.0])),
            atom("Fe", [0.5, 0.5, 0.5], Some([0.0, 0.0, -3.0])),
        ];
        let text = PositionsFrac(&atoms).to_string();
        let expected = concat!(
            "%block positions_frac\n",
            "Fe 0.0 0.0 0.0 spin= 0.0  0.0  3.0  \n",
            "Fe 0.5 0.5 0.5 spin= 0.0  0.0  -3.0 \n",
            "%endblock positions_frac\n",
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_long_label_is_cut_to_field() {
        let text = PositionsFrac(&[atom("Xaxb", [0.0, 0.0, 0.0], None)]).to_string();
        assert!(text.contains("\nXax0.0 0.0 0.0 \n"));
    }

    #[test]
    fn test_render_separates_blocks() {
        let cell = LatticeParameters {
            lengths: [1.0, 1.0, 1.0],
            angles: [90.0, 90.0, 90.0],
        };
        let text = render(&cell, &[atom("H", [0.0, 0.0, 0.0], None)]);
        assert!(text.contains("%endblock lattice_abc\n\n%block positions_frac\n"));
        assert!(text.ends_with("%endblock positions_frac\n\n"));
    }
}
