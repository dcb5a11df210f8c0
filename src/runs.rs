use crate::error::{DsResult, ScoreError};
use crate::loader::{load_catalog, load_selections};
use crate::matching::MatchingEngine;
use crate::metrics::{aggregate, RunOutcome};
use crate::output::{save_batch_summary, save_results, BATCH_SUMMARY_FILE};
use rayon::prelude::*;
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::{error, info, warn};

/// `*p[0-9]*r[0-9]*_*.txt`, e.g. `p3r2_Selections.txt`.
const RUN_FILE_PATTERN: &str = r"^.*p[0-9].*r[0-9].*_.*\.txt$";

fn run_file_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(RUN_FILE_PATTERN).expect("run file pattern is a valid regex"))
}

/// Extracts the participant/run id from a log file name.
pub fn run_id_of(file_name: &str) -> Option<&str> {
    if !run_file_regex().is_match(file_name) {
        return None;
    }
    file_name.split('_').next().filter(|id| !id.is_empty())
}

/// The files belonging to one participant run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunFiles {
    pub id: String,
    pub defects: PathBuf,
    pub log: PathBuf,
    pub selections: PathBuf,
    pub results: PathBuf,
}

impl RunFiles {
    pub fn in_dir<P: AsRef<Path>>(dir: P, id: &str) -> Self {
        let dir = dir.as_ref();
        Self {
            id: id.to_string(),
            defects: dir.join(format!("{}_DefectData.txt", id)),
            log: dir.join(format!("{}_Log.txt", id)),
            selections: dir.join(format!("{}_Selections.txt", id)),
            results: dir.join(format!("{}_Results.txt", id)),
        }
    }

    pub fn results_name(&self) -> String {
        self.results
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("{}_Results.txt", self.id))
    }
}

/// Finds every run in `dir`, sorted by id.
pub fn discover_runs<P: AsRef<Path>>(dir: P) -> DsResult<Vec<RunFiles>> {
    let dir = dir.as_ref();
    let mut ids = BTreeSet::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if let Some(id) = run_id_of(name) {
                ids.insert(id.to_string());
            }
        }
    }

    info!("Found {} run(s) in {}", ids.len(), dir.display());
    Ok(ids.iter().map(|id| RunFiles::in_dir(dir, id)).collect())
}

/// Decodes, replays and aggregates one run without writing anything.
pub fn process_run(files: &RunFiles, engine: &MatchingEngine) -> DsResult<RunOutcome> {
    for required in [&files.defects, &files.selections] {
        if !required.exists() {
            return Err(ScoreError::MissingInput(required.clone()));
        }
    }
    if !files.log.exists() {
        warn!("Run {}: camera log {} not found.", files.id, files.log.display());
    }

    let catalog = load_catalog(&files.defects)?;
    let events = load_selections(&files.selections)?;
    let ctx = engine.run(catalog, &events)?;
    Ok(aggregate(&ctx))
}

/// Processes one run and writes its results file on success.
pub fn analyze_run(files: &RunFiles, engine: &MatchingEngine) -> DsResult<RunOutcome> {
    info!("Generating results for {}...", files.id);
    let outcome = process_run(files, engine)?;
    save_results(&files.results, &outcome)?;
    Ok(outcome)
}

pub struct RunReport {
    pub id: String,
    pub results_name: String,
    pub result: DsResult<RunOutcome>,
}

/// Runs are independent, so they are analyzed in parallel. Reports keep the
/// order of `runs`.
pub fn analyze_batch(runs: &[RunFiles], engine: &MatchingEngine) -> Vec<RunReport> {
    runs.par_iter()
        .map(|files| {
            let result = analyze_run(files, engine);
            if let Err(e) = &result {
                error!("Run {} failed: {}", files.id, e);
            }
            RunReport {
                id: files.id.clone(),
                results_name: files.results_name(),
                result,
            }
        })
        .collect()
}

/// Writes the batch overview CSV into `dir`. Failed runs get no row.
pub fn write_batch_overview<P: AsRef<Path>>(dir: P, reports: &[RunReport]) -> DsResult<PathBuf> {
    let rows: Vec<(&str, &RunOutcome)> = reports
        .iter()
        .filter_map(|r| r.result.as_ref().ok().map(|o| (r.id.as_str(), o)))
        .collect();

    let path = dir.as_ref().join(BATCH_SUMMARY_FILE);
    save_batch_summary(&path, &rows)?;
    info!("Wrote {} run(s) to {}", rows.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_id_requires_participant_and_run_digits() {
        assert_eq!(run_id_of("p1r2_Selections.txt"), Some("p1r2"));
        assert_eq!(run_id_of("p12r3_DefectData.txt"), Some("p12r3"));
        assert_eq!(run_id_of("pilot_p4r1_Log.txt"), Some("pilot"));
        assert_eq!(run_id_of("p1_Selections.txt"), None);
        assert_eq!(run_id_of("p1r2.txt"), None);
        assert_eq!(run_id_of("p1r2_Selections.csv"), None);
        assert_eq!(run_id_of("notes.txt"), None);
    }

    #[test]
    fn run_files_follow_naming_convention() {
        let files = RunFiles::in_dir("/data", "p1r2");
        assert_eq!(files.defects, PathBuf::from("/data/p1r2_DefectData.txt"));
        assert_eq!(files.log, PathBuf::from("/data/p1r2_Log.txt"));
        assert_eq!(files.selections, PathBuf::from("/data/p1r2_Selections.txt"));
        assert_eq!(files.results, PathBuf::from("/data/p1r2_Results.txt"));
        assert_eq!(files.results_name(), "p1r2_Results.txt");
    }
}
