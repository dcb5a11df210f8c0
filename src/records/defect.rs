use super::{Position, RecordError};
use serde::Serialize;

/// A ground-truth flaw placed on one of the inspected surfaces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Defect {
    pub name: String,
    pub surface: String,
    pub position: Position,
    pub marked: bool,
    pub real: bool,
    pub nearest: String,
    /// Net count of matched selections. Only `min(count, 1)` is used for metrics.
    pub selection_count: i64,
}

impl Defect {
    pub fn new(name: &str, surface: &str, position: Position) -> Self {
        Self {
            name: name.to_string(),
            surface: surface.to_string(),
            position,
            marked: false,
            real: false,
            nearest: String::new(),
            selection_count: 0,
        }
    }

    /// Builds a defect from the raw catalog fields.
    ///
    /// The headset logs the `NotMarked` and `NotRealDefect` properties, so the
    /// flags are true when the raw text is exactly `"False"`. Nearest-neighbour
    /// names may carry a `\`-separated suffix, which is dropped.
    #[allow(clippy::too_many_arguments)]
    pub fn from_raw(
        name: &str,
        surface: &str,
        x: &str,
        y: &str,
        z: &str,
        marked_raw: &str,
        real_raw: &str,
        nearest_raw: &str,
    ) -> Result<Self, RecordError> {
        let position = Position::from_raw(x, y, z)?;
        let nearest = nearest_raw
            .split('\\')
            .next()
            .unwrap_or_default()
            .trim_end();

        Ok(Self {
            name: name.to_string(),
            surface: surface.to_string(),
            position,
            marked: marked_raw == "False",
            real: real_raw == "False",
            nearest: nearest.to_string(),
            selection_count: 0,
        })
    }

    pub fn is_found(&self) -> bool {
        self.selection_count > 0
    }

    pub fn is_missed(&self) -> bool {
        self.selection_count == 0
    }

    /// Contribution of this defect to the found total.
    pub fn clamped_count(&self) -> i64 {
        self.selection_count.min(1)
    }
}
