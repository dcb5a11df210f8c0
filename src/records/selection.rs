use super::{parse_number, Position, RecordError};
use serde::Serialize;
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash, Serialize)]
pub enum ActionKind {
    Selection,
    Deselection,
}

/// One logged selection or deselection, in headset time.
#[derive(Debug, Clone, Serialize)]
pub struct SelectionEvent {
    pub time: f64,
    pub action: ActionKind,
    pub position: Position,
    pub defect: String,
    pub angle: f64,
}

impl SelectionEvent {
    pub fn new(time: f64, action: ActionKind, position: Position, defect: &str, angle: f64) -> Self {
        Self {
            time,
            action,
            position,
            defect: defect.to_string(),
            angle,
        }
    }

    pub fn from_raw(
        time: &str,
        action: &str,
        x: &str,
        y: &str,
        z: &str,
        defect: &str,
        angle: &str,
    ) -> Result<Self, RecordError> {
        let action = ActionKind::from_str(action.trim())
            .map_err(|_| RecordError::Action(action.to_string()))?;

        Ok(Self {
            time: parse_number("time", time)?,
            action,
            position: Position::from_raw(x, y, z)?,
            defect: defect.to_string(),
            angle: parse_number("angle", angle)?,
        })
    }
}

// Events are identified by where they happened; a deselection retracts the
// first active event logged at the same spot.
impl PartialEq for SelectionEvent {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}
