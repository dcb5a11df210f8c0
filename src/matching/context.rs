use crate::records::{DefectCatalog, Position, SelectionEvent};

/// Everything one run accumulates while its selections are replayed.
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    pub catalog: DefectCatalog,
    pub hits: Vec<SelectionEvent>,
    pub false_alarms: Vec<SelectionEvent>,
}

impl RunContext {
    pub fn new(catalog: DefectCatalog) -> Self {
        Self {
            catalog,
            hits: Vec::new(),
            false_alarms: Vec::new(),
        }
    }
}

/// Removes the first event logged at `position`. Linear in the collection size.
pub(crate) fn remove_first_at(
    events: &mut Vec<SelectionEvent>,
    position: &Position,
) -> Option<SelectionEvent> {
    let idx = events.iter().position(|e| e.position == *position)?;
    Some(events.remove(idx))
}
