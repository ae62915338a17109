//! V3000 extended connection tables (`M  V30` lines).

use super::{Atom, Bond, CtabVersion, Molecule, MolfileError, check_bond_range, is_end_line};

const V30_PREFIX: &str = "M  V30 ";

/// A logical `M  V30` line with continuations joined, and its 1-based
/// line number.
struct V30Line {
    number: usize,
    text: String,
}

pub(super) fn parse(name: String, body: &[&str], offset: usize) -> Result<Molecule, MolfileError> {
    let lines = collect_v30_lines(body, offset)?;

    let counts = lines
        .iter()
        .find(|line| line.text.starts_with("COUNTS "))
        .ok_or(MolfileError::MissingBlock { block: "COUNTS" })?;
    let mut fields = counts.text.split_whitespace().skip(1);
    let invalid_counts = || MolfileError::InvalidCountsLine {
        line: counts.text.clone(),
    };
    let atom_count: usize = fields
        .next()
        .and_then(|v| v.parse().ok())
        .ok_or_else(invalid_counts)?;
    let bond_count: usize = fields
        .next()
        .and_then(|v| v.parse().ok())
        .ok_or_else(invalid_counts)?;

    let atom_lines = block(&lines, "ATOM", atom_count)?;
    if atom_lines.len() != atom_count {
        return Err(MolfileError::TruncatedAtomBlock {
            expected: atom_count,
            found: atom_lines.len(),
        });
    }
    let atoms = atom_lines
        .iter()
        .map(|line| parse_atom(&line.text).ok_or(MolfileError::InvalidAtom { line: line.number }))
        .collect::<Result<Vec<_>, _>>()?;

    let bond_lines = block(&lines, "BOND", bond_count)?;
    if bond_lines.len() != bond_count {
        return Err(MolfileError::TruncatedBondBlock {
            expected: bond_count,
            found: bond_lines.len(),
        });
    }
    let bonds = bond_lines
        .iter()
        .map(|line| parse_bond(&line.text).ok_or(MolfileError::InvalidBond { line: line.number }))
        .collect::<Result<Vec<_>, _>>()?;
    check_bond_range(&bonds, atoms.len())?;

    Ok(Molecule {
        name,
        version: CtabVersion::V3000,
        atoms,
        bonds,
    })
}

/// Gather `M  V30` lines up to `M  END`, joining `-` continuations.
fn collect_v30_lines(body: &[&str], offset: usize) -> Result<Vec<V30Line>, MolfileError> {
    let mut lines: Vec<V30Line> = Vec::new();
    let mut continuing = false;

    for (idx, raw) in body.iter().enumerate() {
        if is_end_line(raw) {
            return Ok(lines);
        }
        let Some(text) = raw.strip_prefix(V30_PREFIX) else {
            continuing = false;
            continue;
        };
        let text = text.trim_end();
        let (text, continues) = match text.strip_suffix('-') {
            Some(head) => (head, true),
            None => (text, false),
        };

        match lines.last_mut() {
            Some(last) if continuing => last.text.push_str(text),
            _ => lines.push(V30Line {
                number: offset + idx + 1,
                text: text.trim_start().to_string(),
            }),
        }
        continuing = continues;
    }

    Err(MolfileError::MissingEnd)
}

/// Lines strictly between `BEGIN {name}` and `END {name}`.
///
/// An absent block is only accepted when it would be empty.
fn block<'a>(
    lines: &'a [V30Line],
    name: &'static str,
    expected: usize,
) -> Result<&'a [V30Line], MolfileError> {
    let begin = format!("BEGIN {name}");
    let end = format!("END {name}");

    let Some(start) = lines.iter().position(|line| line.text.trim() == begin) else {
        return if expected == 0 {
            Ok(&lines[..0])
        } else {
            Err(MolfileError::MissingBlock { block: name })
        };
    };
    let len = lines[start + 1..]
        .iter()
        .position(|line| line.text.trim() == end)
        .ok_or(MolfileError::MissingBlock { block: name })?;

    Ok(&lines[start + 1..start + 1 + len])
}

/// `index type x y z aamap [props...]`
fn parse_atom(text: &str) -> Option<Atom> {
    let mut tokens = text.split_whitespace().skip(1);
    let symbol = tokens.next()?.to_string();
    Some(Atom {
        symbol,
        x: tokens.next()?.parse().ok()?,
        y: tokens.next()?.parse().ok()?,
        z: tokens.next()?.parse().ok()?,
    })
}

/// `index type atom1 atom2 [props...]`
fn parse_bond(text: &str) -> Option<Bond> {
    let mut tokens = text.split_whitespace().skip(1);
    let order = tokens.next()?.parse().ok()?;
    Some(Bond {
        from: tokens.next()?.parse().ok()?,
        to: tokens.next()?.parse().ok()?,
        order,
    })
}
