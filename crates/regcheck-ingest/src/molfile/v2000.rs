//! V2000 fixed-column connection tables.

use super::{Atom, Bond, CtabVersion, Molecule, MolfileError, check_bond_range, is_end_line};

/// Parse the body of a V2000 record; `body` starts after the counts line
/// and `offset` is the 0-based line index of its first line.
pub(super) fn parse(
    name: String,
    counts: &str,
    body: &[&str],
    offset: usize,
) -> Result<Molecule, MolfileError> {
    let (atom_count, bond_count) = parse_counts(counts)?;

    let atom_lines = body.get(..atom_count).ok_or(MolfileError::TruncatedAtomBlock {
        expected: atom_count,
        found: body.len(),
    })?;
    let atoms = atom_lines
        .iter()
        .enumerate()
        .map(|(idx, line)| {
            parse_atom(line).ok_or(MolfileError::InvalidAtom {
                line: offset + idx + 1,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let rest = &body[atom_count..];
    let bond_lines = rest.get(..bond_count).ok_or(MolfileError::TruncatedBondBlock {
        expected: bond_count,
        found: rest.len(),
    })?;
    let bonds = bond_lines
        .iter()
        .enumerate()
        .map(|(idx, line)| {
            parse_bond(line).ok_or(MolfileError::InvalidBond {
                line: offset + atom_count + idx + 1,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    check_bond_range(&bonds, atoms.len())?;

    if !rest[bond_count..].iter().any(|line| is_end_line(line)) {
        return Err(MolfileError::MissingEnd);
    }

    Ok(Molecule {
        name,
        version: CtabVersion::V2000,
        atoms,
        bonds,
    })
}

fn parse_counts(line: &str) -> Result<(usize, usize), MolfileError> {
    let invalid = || MolfileError::InvalidCountsLine {
        line: line.to_string(),
    };
    let atoms = fixed_field(line, 0, 3).ok_or_else(invalid)?;
    let bonds = fixed_field(line, 3, 6).ok_or_else(invalid)?;
    Ok((atoms, bonds))
}

/// Parse `aaa bbb` style right-aligned integer columns.
fn fixed_field<T: std::str::FromStr>(line: &str, start: usize, end: usize) -> Option<T> {
    line.get(start..end.min(line.len()))?.trim().parse().ok()
}

/// Atom line: `xxxxx.xxxxyyyyy.yyyyzzzzz.zzzz aaa...`.
fn parse_atom(line: &str) -> Option<Atom> {
    let fixed = || -> Option<Atom> {
        let symbol = line.get(31..34.min(line.len()))?.trim();
        if symbol.is_empty() {
            return None;
        }
        Some(Atom {
            symbol: symbol.to_string(),
            x: fixed_field(line, 0, 10)?,
            y: fixed_field(line, 10, 20)?,
            z: fixed_field(line, 20, 30)?,
        })
    };

    // Hand-edited files are not always column aligned
    fixed().or_else(|| {
        let mut tokens = line.split_whitespace();
        let x = tokens.next()?.parse().ok()?;
        let y = tokens.next()?.parse().ok()?;
        let z = tokens.next()?.parse().ok()?;
        let symbol = tokens.next()?.to_string();
        Some(Atom { symbol, x, y, z })
    })
}

/// Bond line: `111222tttsss...`.
fn parse_bond(line: &str) -> Option<Bond> {
    let fixed = || -> Option<Bond> {
        Some(Bond {
            from: fixed_field(line, 0, 3)?,
            to: fixed_field(line, 3, 6)?,
            order: fixed_field(line, 6, 9)?,
        })
    };

    fixed().or_else(|| {
        let mut tokens = line.split_whitespace().map(str::parse::<usize>);
        let from = tokens.next()?.ok()?;
        let to = tokens.next()?.ok()?;
        let order = u8::try_from(tokens.next()?.ok()?).ok()?;
        Some(Bond { from, to, order })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_atom_molecule() {
        let mol = parse("empty".into(), "  0  0  0  0  0  0  0  0  0  0999 V2000", &["M  END"], 4)
            .unwrap();
        assert_eq!(mol.atom_count(), 0);
    }

    #[test]
    fn test_bond_out_of_range() {
        let body = [
            "    0.0000    0.0000    0.0000 C   0  0",
            "    1.0000    0.0000    0.0000 C   0  0",
            "  1  5  1  0",
            "M  END",
        ];
        let err = parse(String::new(), "  2  1  0  0  0  0", &body, 4).unwrap_err();
        assert_eq!(
            err,
            MolfileError::BondOutOfRange {
                bond: 1,
                atom: 5,
                atoms: 2
            }
        );
    }

    #[test]
    fn test_truncated_atom_block() {
        let body = ["    0.0000    0.0000    0.0000 C   0  0"];
        let err = parse(String::new(), "  3  0", &body, 4).unwrap_err();
        assert_eq!(
            err,
            MolfileError::TruncatedAtomBlock {
                expected: 3,
                found: 1
            }
        );
    }

    #[test]
    fn test_missing_end() {
        let body = ["    0.0000    0.0000    0.0000 N   0  0"];
        assert_eq!(
            parse(String::new(), "  1  0", &body, 4),
            Err(MolfileError::MissingEnd)
        );
    }

    #[test]
    fn test_invalid_counts_and_atom_lines() {
        assert!(matches!(
            parse(String::new(), "abc", &[], 4),
            Err(MolfileError::InvalidCountsLine { .. })
        ));
        assert_eq!(
            parse(String::new(), "  1  0", &["garbage", "M  END"], 4),
            Err(MolfileError::InvalidAtom { line: 5 })
        );
    }

    #[test]
    fn test_whitespace_separated_atoms() {
        let atom = parse_atom("0.1 -2.5 0 Cl").unwrap();
        assert_eq!(atom.symbol, "Cl");
        assert!((atom.y + 2.5).abs() < f64::EPSILON);
    }
}
