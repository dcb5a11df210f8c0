#![allow(dead_code)]

use defectscore::records::{ActionKind, Defect, DefectCatalog, Position, SelectionEvent};
use std::fs;
use std::path::Path;

pub const CATALOG_HEADER: &str = "Presenting defects at 50% transparency with outline augmentation\n\
<Name>,<Plane Name>,<World Position>:NotMarked, NotRealDefect:<Name of Nearest Neighbor>\n";

pub const SELECTION_HEADER: &str =
    "<Action>,<Location>:<Nearest Defect>:<Viewing Angle to Nearest Defect (Degrees)\n";

/// One catalog row as the headset writes it.
pub fn catalog_line(name: &str, surface: &str, p: (f64, f64, f64), marked: &str, real: &str, nearest: &str) -> String {
    format!(
        "{},{},({:?}, {:?}, {:?}):{},{}:{}\n",
        name, surface, p.0, p.1, p.2, marked, real, nearest
    )
}

/// One selection row as the headset writes it.
pub fn selection_line(time: f64, action: &str, p: (f64, f64, f64), defect: &str, angle: f64) -> String {
    format!(
        "{:?}:{},({:?}, {:?}, {:?}):{}:{:?}\n",
        time, action, p.0, p.1, p.2, defect, angle
    )
}

/// Builder for a run's catalog and selection stream.
#[derive(Default)]
pub struct RunBuilder {
    catalog: String,
    selections: String,
}

impl RunBuilder {
    pub fn new() -> Self {
        Self {
            catalog: CATALOG_HEADER.to_string(),
            selections: SELECTION_HEADER.to_string(),
        }
    }

    pub fn defect(mut self, name: &str, p: (f64, f64, f64)) -> Self {
        self.catalog
            .push_str(&catalog_line(name, "Deck", p, "True", "False", "Defect0"));
        self
    }

    /// A marked defect that is not real.
    pub fn decoy(mut self, name: &str, p: (f64, f64, f64)) -> Self {
        self.catalog
            .push_str(&catalog_line(name, "Deck", p, "False", "True", "Defect0"));
        self
    }

    pub fn select(mut self, time: f64, p: (f64, f64, f64), defect: &str) -> Self {
        self.selections
            .push_str(&selection_line(time, "Selection", p, defect, 10.0));
        self
    }

    pub fn deselect(mut self, time: f64, p: (f64, f64, f64), defect: &str) -> Self {
        self.selections
            .push_str(&selection_line(time, "Deselection", p, defect, 10.0));
        self
    }

    pub fn catalog_text(&self) -> &str {
        &self.catalog
    }

    pub fn selection_text(&self) -> &str {
        &self.selections
    }

    /// Writes `<id>_DefectData.txt`, `<id>_Log.txt` and `<id>_Selections.txt`.
    pub fn write_run(&self, dir: &Path, id: &str) {
        fs::write(dir.join(format!("{}_DefectData.txt", id)), &self.catalog).unwrap();
        fs::write(
            dir.join(format!("{}_Log.txt", id)),
            "<Camera Position>:<Camera Rotation>\n",
        )
        .unwrap();
        fs::write(dir.join(format!("{}_Selections.txt", id)), &self.selections).unwrap();
    }
}

pub fn origin_catalog() -> DefectCatalog {
    vec![Defect::new("Defect1", "Deck", Position::new(0.0, 0.0, 0.0))]
        .into_iter()
        .collect()
}

pub fn event(time: f64, action: ActionKind, p: (f64, f64, f64), defect: &str) -> SelectionEvent {
    SelectionEvent::new(time, action, Position::new(p.0, p.1, p.2), defect, 0.0)
}

pub fn select(time: f64, p: (f64, f64, f64), defect: &str) -> SelectionEvent {
    event(time, ActionKind::Selection, p, defect)
}

pub fn deselect(time: f64, p: (f64, f64, f64), defect: &str) -> SelectionEvent {
    event(time, ActionKind::Deselection, p, defect)
}
