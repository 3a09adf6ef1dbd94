// src/io/vesta.rs

use crate::error::{ConvertError, Result};
use crate::model::{AffineOp, BasisAtom, LatticeParameters, MomentVector, StructureDocument};
use nalgebra::{Matrix3, Vector3};
use std::fs;
use std::path::Path;

/// Section names the decoder knows how to read. Every other all-caps line
/// still closes the running section but its body is skipped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Keyword {
    Symop,
    Cellp,
    Struc,
    Vectr,
    Other(String),
}

impl Keyword {
    pub fn recognize(token: &str) -> Self {
        match token {
            "SYMOP" => Keyword::Symop,
            "CELLP" => Keyword::Cellp,
            "STRUC" => Keyword::Struc,
            "VECTR" => Keyword::Vectr,
            other => Keyword::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Keyword::Symop => "SYMOP",
            Keyword::Cellp => "CELLP",
            Keyword::Struc => "STRUC",
            Keyword::Vectr => "VECTR",
            Keyword::Other(name) => name,
        }
    }

    /// Turn the buffered body of a section into its typed record.
    /// Unknown sections decode to `None`.
    fn decode(&self, lines: &[String]) -> Result<Option<Section>> {
        let section = match self {
            Keyword::Cellp => Section::Cell(decode_cellp(lines)?),
            Keyword::Symop => Section::Symmetry(decode_symop(lines)?),
            Keyword::Struc => Section::Basis(decode_struc(lines)?),
            Keyword::Vectr => Section::Moments(decode_vectr(lines)?),
            Keyword::Other(_) => return Ok(None),
        };
        Ok(Some(section))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Section {
    Cell(LatticeParameters),
    Symmetry(Vec<AffineOp>),
    Basis(Vec<BasisAtom>),
    Moments(Vec<MomentVector>),
}

enum DecoderState {
    NoSection,
    InSection { keyword: Keyword, buffer: Vec<String> },
}

/// A header is an all-caps line (at least one uppercase letter, no lowercase)
/// that does not start with a digit. Data lines such as `2 O O1 ...` are
/// all-caps too, which is why the leading digit matters.
pub fn header_keyword(line: &str) -> Option<Keyword> {
    let first = line.chars().next()?;
    if first.is_ascii_digit() {
        return None;
    }
    let has_upper = line.chars().any(|c| c.is_uppercase());
    let has_lower = line.chars().any(|c| c.is_lowercase());
    if !has_upper || has_lower {
        return None;
    }
    line.split_whitespace().next().map(Keyword::recognize)
}

pub fn parse(path: &Path) -> Result<StructureDocument> {
    let content = fs::read_to_string(path).map_err(|source| ConvertError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode(content.lines())
}

pub fn decode<I, S>(lines: I) -> Result<StructureDocument>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut doc = StructureDocument::default();
    let mut state = DecoderState::NoSection;

    for raw in lines {
        let line = raw.as_ref().trim();
        if line.is_empty() {
            continue;
        }

        if let Some(keyword) = header_keyword(line) {
            if let DecoderState::InSection { keyword: prev, buffer } = state {
                close_section(&mut doc, &prev, &buffer)?;
            }
            log::debug!("Entering section {}", keyword.as_str());
            state = DecoderState::InSection {
                keyword,
                buffer: Vec::new(),
            };
            continue;
        }

        if let DecoderState::InSection { buffer, .. } = &mut state {
            buffer.push(line.to_string());
        }
    }

    if let DecoderState::InSection { keyword, buffer } = state {
        close_section(&mut doc, &keyword, &buffer)?;
    }

    Ok(doc)
}

fn close_section(doc: &mut StructureDocument, keyword: &Keyword, buffer: &[String]) -> Result<()> {
    let Some(section) = keyword.decode(buffer)? else {
        return Ok(());
    };

    let replaced = match section {
        Section::Cell(cell) => doc.lattice.replace(cell).is_some(),
        Section::Symmetry(ops) => {
            log::debug!("SYMOP: {} operations", ops.len());
            doc.operations.replace(ops).is_some()
        }
        Section::Basis(atoms) => {
            log::debug!("STRUC: {} basis atoms", atoms.len());
            doc.basis.replace(atoms).is_some()
        }
        Section::Moments(vectors) => {
            log::debug!("VECTR: {} moment vectors", vectors.len());
            doc.moments.replace(vectors).is_some()
        }
    };

    if replaced {
        log::warn!("Section {} appears more than once; keeping the last one", keyword.as_str());
    }
    Ok(())
}

// --- Per-section decoding ---

fn decode_cellp(lines: &[String]) -> Result<LatticeParameters> {
    let line = lines
        .first()
        .ok_or_else(|| ConvertError::format("CELLP", "", "section is empty"))?;
    let tokens: Vec<&str> = line.split_whitespace().collect();
    Ok(LatticeParameters {
        lengths: floats("CELLP", line, &tokens, 0)?,
        angles: floats("CELLP", line, &tokens, 3)?,
    })
}

fn decode_symop(lines: &[String]) -> Result<Vec<AffineOp>> {
    let mut ops = Vec::new();
    for line in lines {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let t: [f64; 3] = floats("SYMOP", line, &tokens, 0)?;
        let m: [f64; 9] = floats("SYMOP", line, &tokens, 3)?;

        ops.push(AffineOp::new(Matrix3::from_row_slice(&m), Vector3::from(t)));
    }
    Ok(ops)
}

fn decode_struc(lines: &[String]) -> Result<Vec<BasisAtom>> {
    let mut atoms = Vec::new();
    for line in lines {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        // Only the first row of each site group starts with a site number;
        // continuation rows start with a float, the closing row with 0.
        if tokens[0].contains('.') || line.starts_with('0') {
            continue;
        }
        if tokens.len() < 8 {
            return Err(ConvertError::format(
                "STRUC",
                line,
                format!("expected at least 8 fields, found {}", tokens.len()),
            ));
        }

        let symmetry_count = parse_count(tokens[7]).ok_or_else(|| {
            ConvertError::format("STRUC", line, format!("'{}' is not a symmetry count", tokens[7]))
        })?;

        atoms.push(BasisAtom {
            label: tokens[1].to_string(),
            position: floats("STRUC", line, &tokens, 4)?,
            symmetry_count,
        });
    }
    Ok(atoms)
}

fn decode_vectr(lines: &[String]) -> Result<Vec<MomentVector>> {
    // Each vector spans three lines: components, atom link, terminator.
    let mut vectors = Vec::new();
    for line in lines.iter().take(lines.len().saturating_sub(2)).step_by(3) {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        vectors.push(MomentVector {
            components: floats("VECTR", line, &tokens, 1)?,
        });
    }
    Ok(vectors)
}

// --- Token helpers ---

fn floats<const N: usize>(section: &str, line: &str, tokens: &[&str], start: usize) -> Result<[f64; N]> {
    if tokens.len() < start + N {
        return Err(ConvertError::format(
            section,
            line,
            format!("expected at least {} fields, found {}", start + N, tokens.len()),
        ));
    }

    let mut out = [0.0; N];
    for (slot, token) in out.iter_mut().zip(&tokens[start..start + N]) {
        *slot = token
            .parse()
            .map_err(|_| ConvertError::format(section, line, format!("'{}' is not a number", token)))?;
    }
    Ok(out)
}

/// Integer count, optionally followed by one Wyckoff letter (`8a`), in
/// which case the multiplicity is the number we want.
fn parse_count(token: &str) -> Option<usize> {
    let split = token.find(|c: char| !c.is_ascii_digit()).unwrap_or(token.len());
    let (digits, rest) = token.split_at(split);
    let mut letters = rest.chars();
    match (letters.next(), letters.next()) {
        (None, _) => {}
        (Some(c), None) if c.is_ascii_lowercase() => {}
        _ => return None,
    }
    digits.parse().ok()
}
