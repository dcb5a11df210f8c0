use crate::reports;
use clap::Args;
use defectscore::config::Config;
use defectscore::error::DsResult;
use defectscore::loader::{load_catalog, load_selections};
use defectscore::matching::MatchingEngine;
use defectscore::metrics::aggregate;
use defectscore::output::{save_results, write_console_summary};
use std::io;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct InspectArgs {
    #[command(flatten)]
    pub config: Config,

    #[arg(long)]
    pub defects: PathBuf,

    #[arg(long)]
    pub selections: PathBuf,

    /// Also write the detailed results file here.
    #[arg(long)]
    pub results: Option<PathBuf>,
}

pub fn run(args: InspectArgs, engine: &MatchingEngine) -> DsResult<()> {
    let catalog = load_catalog(&args.defects)?;
    let events = load_selections(&args.selections)?;

    reports::print_action_breakdown(&events);

    let ctx = engine.run(catalog, &events)?;
    let outcome = aggregate(&ctx);

    reports::print_event_table("HITS", &outcome.hits);
    reports::print_event_table("FALSE ALARMS", &outcome.false_alarms);
    reports::print_defect_table("TARGET HITS", &outcome.found);
    reports::print_defect_table("TARGET MISSES", &outcome.missed);

    let results_name = match &args.results {
        Some(path) => {
            save_results(path, &outcome)?;
            info!("Wrote {}", path.display());
            path.display().to_string()
        }
        None => "(not written)".to_string(),
    };

    write_console_summary(&mut io::stdout().lock(), &outcome.summary, &results_name)?;
    Ok(())
}
