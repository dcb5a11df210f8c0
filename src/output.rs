use crate::error::DsResult;
use crate::metrics::{RunOutcome, RunSummary};
use crate::records::{Defect, SelectionEvent};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

const RULE: &str = "#################################";
const SUMMARY_TITLE: &str = "############ SUMMARY ############";
const EVENT_HEADER: &str = "<Time>:<Action>:<Location>:<Nearest Defect>:<Viewing Angle to Defect>";
const DEFECT_HEADER: &str = "<Name>:<Surface>:<Location>:<Marked>:<Real>:<Nearest Defect>";

/// Name of the batch overview written next to the run logs.
pub const BATCH_SUMMARY_FILE: &str = "Analysis.csv";
const BATCH_SUMMARY_HEADER: [&str; 5] = [
    "Participant and Run",
    "Hits",
    "Misses",
    "False Alarms",
    "Total Targets",
];

fn py_bool(b: bool) -> &'static str {
    if b {
        "True"
    } else {
        "False"
    }
}

fn write_counts<W: Write>(out: &mut W, summary: &RunSummary) -> io::Result<()> {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "{}", SUMMARY_TITLE)?;
    writeln!(out, "## Total Targets: {}", summary.total_targets)?;
    writeln!(out, "## Hits: {}", summary.hits)?;
    writeln!(out, "## False Alarms: {}", summary.false_alarms)?;
    writeln!(out, "## Misses: {}", summary.misses)
}

/// The block printed to the console after each run.
pub fn write_console_summary<W: Write>(
    out: &mut W,
    summary: &RunSummary,
    results_name: &str,
) -> io::Result<()> {
    write_counts(out, summary)?;
    writeln!(out, "##")?;
    writeln!(out, "## Detailed results found in: {}", results_name)?;
    writeln!(out, "{}", RULE)
}

pub fn format_event(e: &SelectionEvent) -> String {
    format!(
        "{:.6}:{}:{}:{}:{:.6}",
        e.time, e.action, e.position, e.defect, e.angle
    )
}

pub fn format_defect(d: &Defect) -> String {
    format!(
        "{}:{}:{}:{}:{}:{}",
        d.name,
        d.surface,
        d.position,
        py_bool(d.marked),
        py_bool(d.real),
        d.nearest
    )
}

fn write_section<W: Write, T>(
    out: &mut W,
    title: &str,
    header: &str,
    rows: &[T],
    fmt: fn(&T) -> String,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", header)?;
    for row in rows {
        writeln!(out, "{}", fmt(row))?;
    }
    Ok(())
}

/// Full per-run detail report.
pub fn write_results<W: Write>(out: &mut W, outcome: &RunOutcome) -> io::Result<()> {
    write_counts(out, &outcome.summary)?;
    writeln!(out, "{}", RULE)?;
    write_section(out, "######### HITS #########", EVENT_HEADER, &outcome.hits, format_event)?;
    write_section(
        out,
        "##### FALSE ALARMS #####",
        EVENT_HEADER,
        &outcome.false_alarms,
        format_event,
    )?;
    write_section(out, "##### TARGET HITS ######", DEFECT_HEADER, &outcome.found, format_defect)?;
    write_section(out, "##### TARGET MISSES ####", DEFECT_HEADER, &outcome.missed, format_defect)
}

pub fn save_results<P: AsRef<Path>>(path: P, outcome: &RunOutcome) -> DsResult<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_results(&mut out, outcome)?;
    out.flush()?;
    Ok(())
}

/// One row per run: hits and misses over real defects, false alarms, and the
/// number of visible targets.
pub fn write_batch_summary<W: Write>(out: W, rows: &[(&str, &RunOutcome)]) -> DsResult<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(BATCH_SUMMARY_HEADER)?;
    for (id, outcome) in rows {
        let t = &outcome.targets;
        wtr.write_record([
            id.to_string(),
            t.real_hits.to_string(),
            t.real_misses.to_string(),
            outcome.summary.false_alarms.to_string(),
            t.visible_targets.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn save_batch_summary<P: AsRef<Path>>(path: P, rows: &[(&str, &RunOutcome)]) -> DsResult<()> {
    write_batch_summary(BufWriter::new(File::create(path)?), rows)
}
