pub mod context;

pub use self::context::RunContext;

use self::context::remove_first_at;
use crate::config::MatchingParams;
use crate::error::{DsResult, ScoreError};
use crate::records::{ActionKind, DefectCatalog, SelectionEvent};
use tracing::{debug, warn};

/// How a single event changed the run state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Hit,
    FalseAlarm,
    HitRetracted,
    FalseAlarmRetracted,
}

/// Replays selection events against a defect catalog.
///
/// Events must be applied one at a time in log order: a deselection undoes
/// whatever the earlier events left active at its position.
#[derive(Debug, Clone, Copy)]
pub struct MatchingEngine {
    threshold: f64,
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self { threshold: 0.0 }
    }
}

impl MatchingEngine {
    pub fn new(params: &MatchingParams) -> DsResult<Self> {
        params.validate()?;
        Ok(Self {
            threshold: params.selection_threshold,
        })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn apply(&self, ctx: &mut RunContext, event: &SelectionEvent) -> DsResult<EventOutcome> {
        let defect = ctx
            .catalog
            .get_mut(&event.defect)
            .ok_or_else(|| ScoreError::UnknownDefect {
                name: event.defect.clone(),
            })?;

        let distance = event.position.distance(&defect.position);
        let matched = distance <= self.threshold;

        let not_found = || ScoreError::NotFound {
            action: event.action,
            position: event.position,
        };

        let outcome = match (matched, event.action) {
            (true, ActionKind::Selection) => {
                defect.selection_count += 1;
                ctx.hits.push(event.clone());
                EventOutcome::Hit
            }
            (true, ActionKind::Deselection) => {
                remove_first_at(&mut ctx.hits, &event.position).ok_or_else(not_found)?;
                defect.selection_count -= 1;
                EventOutcome::HitRetracted
            }
            (false, ActionKind::Selection) => {
                ctx.false_alarms.push(event.clone());
                EventOutcome::FalseAlarm
            }
            (false, ActionKind::Deselection) => {
                remove_first_at(&mut ctx.false_alarms, &event.position)
                    .ok_or_else(not_found)?;
                EventOutcome::FalseAlarmRetracted
            }
        };

        debug!(
            "t={:.3} {} {} at {} (dist {:.4}) -> {:?}",
            event.time, event.action, event.defect, event.position, distance, outcome
        );

        Ok(outcome)
    }

    /// Replays `events` in order over a fresh context built from `catalog`.
    pub fn run(&self, catalog: DefectCatalog, events: &[SelectionEvent]) -> DsResult<RunContext> {
        let mut ctx = RunContext::new(catalog);
        let mut last_time = f64::NEG_INFINITY;

        for event in events {
            if event.time < last_time {
                warn!(
                    "Selection at t={} is logged after t={}; replaying in log order.",
                    event.time, last_time
                );
            }
            last_time = last_time.max(event.time);
            self.apply(&mut ctx, event)?;
        }

        Ok(ctx)
    }
}
