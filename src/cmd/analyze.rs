use crate::reports;
use clap::Args;
use defectscore::config::Config;
use defectscore::matching::MatchingEngine;
use defectscore::output::write_console_summary;
use defectscore::runs::{analyze_batch, discover_runs, write_batch_overview};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{error, warn};

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub config: Config,

    /// Directory holding the `<run>_DefectData.txt` / `<run>_Selections.txt` logs.
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Print run summaries as JSON instead of the overview table.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

/// Returns false if any run failed.
pub fn run(args: AnalyzeArgs, engine: &MatchingEngine) -> bool {
    let runs = match discover_runs(&args.dir) {
        Ok(runs) => runs,
        Err(e) => {
            error!("Could not scan {}: {}", args.dir.display(), e);
            return false;
        }
    };

    if runs.is_empty() {
        warn!("No run files found in {}", args.dir.display());
        return true;
    }

    let results = analyze_batch(&runs, engine);
    if let Err(e) = write_batch_overview(&args.dir, &results) {
        error!("Could not write batch overview: {}", e);
        return false;
    }

    if args.json {
        if let Err(e) = reports::print_json(&results) {
            error!("{}", e);
            return false;
        }
    } else {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        for report in &results {
            if let Ok(outcome) = &report.result {
                let printed = writeln!(out, "Generating results for {}...", report.id)
                    .and_then(|_| write_console_summary(&mut out, &outcome.summary, &report.results_name));
                if let Err(e) = printed {
                    error!("{}", e);
                    return false;
                }
            }
        }
        drop(out);
        reports::print_batch_table(&results);
    }

    results.iter().all(|r| r.result.is_ok())
}
