//! SD molecule file checks.

use std::path::Path;

use regcheck_ingest::{has_property_block, parse_molblock, read_text, split_records};
use regcheck_model::{CheckStatus, FileChecks, StructureCheck};
use tracing::debug;

use super::display_name;

/// Validate an SD file.
pub fn check(path: &Path) -> FileChecks<StructureCheck> {
    let mut result = FileChecks::new(display_name(path));

    let text = match read_text(path) {
        Ok(text) => text,
        Err(err) => {
            result.flag(
                StructureCheck::StructureCheck,
                CheckStatus::Error,
                format!("Error reading file: {err}"),
            );
            result.halt();
            return result;
        }
    };

    check_text(&text, &mut result);
    debug!(file = %path.display(), "structure file checked");
    result
}

/// Run the record checks on decoded SD file text.
pub fn check_text(text: &str, result: &mut FileChecks<StructureCheck>) {
    let records = split_records(text);
    if records.is_empty() {
        result.flag(
            StructureCheck::StructureCheck,
            CheckStatus::Fail,
            "No molecules found",
        );
        result.halt();
        return;
    }

    let mut valid = 0usize;
    for (idx, record) in records.iter().enumerate() {
        let number = idx + 1;
        match parse_molblock(record) {
            Err(err) => result.flag(
                StructureCheck::Connectivity,
                CheckStatus::Fail,
                format!("Molecule {number}: Invalid structure ({err})"),
            ),
            Ok(molecule) => {
                valid += 1;
                if molecule.atom_count() == 0 {
                    result.flag(
                        StructureCheck::Connectivity,
                        CheckStatus::Fail,
                        format!("Molecule {number}: No atoms"),
                    );
                }
                if !has_property_block(record) {
                    result.flag(
                        StructureCheck::PropertyBlocks,
                        CheckStatus::Warn,
                        format!("Molecule {number}: No property blocks found"),
                    );
                }
            }
        }
    }

    debug!(records = records.len(), valid, "parsed structure records");

    if valid == 0 {
        result.flag(
            StructureCheck::MoleculeCount,
            CheckStatus::Fail,
            "No valid molecules",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regcheck_model::CheckRecord;

    const BENZENE_FRAGMENT: &str = "fragment
  regcheck

  2  1  0  0  0  0  0  0  0  0999 V2000
    0.0000    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0
    1.3900    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0
  1  2  2  0
M  END
> <ID>
FRAG-1

$$$$
";

    fn run(text: &str) -> FileChecks<StructureCheck> {
        let mut result = FileChecks::new("ligands.sdf");
        check_text(text, &mut result);
        result
    }

    #[test]
    fn test_valid_record_passes() {
        let result = run(BENZENE_FRAGMENT);
        assert!(result.checks().all(|(_, status)| status == CheckStatus::Pass));
        assert!(result.issues().is_empty());
    }

    #[test]
    fn test_missing_property_block_warns() {
        let text = BENZENE_FRAGMENT.replace("> <ID>\nFRAG-1\n", "");
        let result = run(&text);
        assert_eq!(result.status(StructureCheck::PropertyBlocks), CheckStatus::Warn);
        assert_eq!(result.issues(), ["Molecule 1: No property blocks found"]);
    }

    #[test]
    fn test_invalid_record_counted_separately() {
        let text = format!("{BENZENE_FRAGMENT}not a molecule\n$$$$\n");
        let result = run(&text);
        assert_eq!(result.status(StructureCheck::Connectivity), CheckStatus::Fail);
        assert_eq!(result.status(StructureCheck::MoleculeCount), CheckStatus::Pass);
        assert_eq!(
            result.issues(),
            ["Molecule 2: Invalid structure (missing counts line)"]
        );
    }

    #[test]
    fn test_only_invalid_records_fail_count() {
        let result = run("garbage\n$$$$\nmore garbage\n");
        assert_eq!(result.status(StructureCheck::Connectivity), CheckStatus::Fail);
        assert_eq!(result.status(StructureCheck::MoleculeCount), CheckStatus::Fail);
        assert_eq!(result.issues().last().unwrap(), "No valid molecules");
    }
}
