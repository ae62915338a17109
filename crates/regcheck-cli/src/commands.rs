use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Local;
use comfy_table::Table;
use indicatif::{ProgressBar, ProgressStyle};
use regcheck_ingest::discover_files;
use regcheck_model::{FileKind, IntegrityCheck, labels};
use regcheck_report::write_reports;
use regcheck_validate::{ValidationOptions, validate_files_with_progress};
use tracing::{info, info_span, warn};

use crate::cli::ValidateArgs;
use crate::summary::apply_table_style;
use crate::types::ValidateOutcome;

const PROGRESS_TEMPLATE: &str = "{spinner} [{bar:30}] {pos}/{len} {msg}";

pub fn run_formats() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Extension", "Validator", "Description", "Checks"]);
    apply_table_style(&mut table);
    for kind in FileKind::ALL {
        table.add_row(vec![
            format!(".{}", kind.extension()),
            kind.label().to_string(),
            kind.description().to_string(),
            kind.check_labels().join(", "),
        ]);
    }
    table.add_row(vec![
        "(all)".to_string(),
        "Integrity".to_string(),
        "Runs on every file above".to_string(),
        labels::<IntegrityCheck>().join(", "),
    ]);
    println!("{table}");
    Ok(())
}

pub fn run_validate(args: &ValidateArgs) -> Result<ValidateOutcome> {
    let root = &args.dir;
    let span = info_span!("submission", root = %root.display());
    let _guard = span.enter();

    let discover_start = Instant::now();
    let files = discover_files(root)
        .with_context(|| format!("discover submission files in {}", root.display()))?;
    info!(
        tabular = files.tabular.len(),
        structure = files.structure.len(),
        assessment = files.assessment.len(),
        duration_ms = discover_start.elapsed().as_millis(),
        "discovery complete"
    );
    if files.is_empty() {
        warn!(root = %root.display(), "no .xpt, .sdf or .asnt files found");
    }

    let options =
        ValidationOptions::default().with_encoding_detection(!args.no_encoding_detection);
    let progress = progress_bar(files.len() as u64);
    let run = validate_files_with_progress(&files, &options, |_, path| {
        if let Some(name) = path.file_name() {
            progress.set_message(name.to_string_lossy().into_owned());
        }
        progress.inc(1);
    });
    progress.finish_and_clear();

    let (output_dir, reports) = if args.dry_run {
        info!("dry run, skipping report files");
        (None, Vec::new())
    } else {
        let output_dir = args.output_dir.clone().unwrap_or_else(|| root.clone());
        let formats = args.format.formats();
        let reports = write_reports(&run, &output_dir, &formats, Local::now().naive_local())
            .with_context(|| format!("write reports to {}", output_dir.display()))?;
        (Some(output_dir), reports)
    };

    Ok(ValidateOutcome {
        root: root.clone(),
        output_dir,
        reports,
        run,
    })
}

fn progress_bar(len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::with_template(PROGRESS_TEMPLATE) {
        bar.set_style(style.progress_chars("=> "));
    }
    bar
}
