use crate::matching::RunContext;
use crate::records::{Defect, SelectionEvent};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RunSummary {
    pub total_targets: usize,
    pub hits: usize,
    pub false_alarms: usize,
    pub misses: usize,
}

/// Hits and misses counted over real defects only, as reported in the batch
/// overview. Decoys are still part of the catalog but never count here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TargetBreakdown {
    pub real_hits: usize,
    pub real_misses: usize,
    /// Defects a participant could see: real or marked.
    pub visible_targets: usize,
}

/// Summary plus the detail listings written to the results file.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub summary: RunSummary,
    pub targets: TargetBreakdown,
    pub hits: Vec<SelectionEvent>,
    pub false_alarms: Vec<SelectionEvent>,
    pub found: Vec<Defect>,
    pub missed: Vec<Defect>,
}

/// `TotalTargets - Σ min(count, 1)`.
pub fn summarize(ctx: &RunContext) -> RunSummary {
    let total_targets = ctx.catalog.len();
    let found: i64 = ctx.catalog.iter().map(Defect::clamped_count).sum();
    let misses = (total_targets as i64 - found) as usize;

    RunSummary {
        total_targets,
        hits: ctx.hits.len(),
        false_alarms: ctx.false_alarms.len(),
        misses,
    }
}

pub fn target_breakdown(ctx: &RunContext) -> TargetBreakdown {
    ctx.catalog
        .iter()
        .fold(TargetBreakdown::default(), |mut acc, d| {
            if d.real {
                if d.is_found() {
                    acc.real_hits += 1;
                } else {
                    acc.real_misses += 1;
                }
            }
            if d.real || d.marked {
                acc.visible_targets += 1;
            }
            acc
        })
}

pub fn found_defects(ctx: &RunContext) -> Vec<Defect> {
    ctx.catalog.iter().filter(|d| d.is_found()).cloned().collect()
}

pub fn missed_defects(ctx: &RunContext) -> Vec<Defect> {
    ctx.catalog.iter().filter(|d| d.is_missed()).cloned().collect()
}

pub fn aggregate(ctx: &RunContext) -> RunOutcome {
    RunOutcome {
        summary: summarize(ctx),
        targets: target_breakdown(ctx),
        hits: ctx.hits.clone(),
        false_alarms: ctx.false_alarms.clone(),
        found: found_defects(ctx),
        missed: missed_defects(ctx),
    }
}
