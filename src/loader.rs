use crate::error::{DsResult, ScoreError};
use crate::records::{Defect, DefectCatalog, SelectionEvent};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Metadata line plus column header.
pub const CATALOG_HEADER_LINES: u64 = 2;
pub const SELECTION_HEADER_LINES: u64 = 1;

const CATALOG_ROW_PREFIX: &str = "Defect";
const CATALOG_FIELDS: usize = 8;
const SELECTION_FIELDS: usize = 7;

// Rows mix ',' and ':' as separators. The csv reader splits on ','; each of
// those fields is split again on ':'.
fn record_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader)
}

fn tokenize(record: &csv::StringRecord) -> Vec<&str> {
    record.iter().flat_map(|field| field.split(':')).collect()
}

// Invalid UTF-8 is a malformed field like any other.
fn decode_error(err: csv::Error) -> ScoreError {
    if let csv::ErrorKind::Utf8 { pos, err: utf8 } = err.kind() {
        let line = pos.as_ref().map(|p| p.line()).unwrap_or(0);
        return ScoreError::parse(line, format!("invalid UTF-8: {}", utf8));
    }
    ScoreError::Csv(err)
}

fn line_of(record: &csv::StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

fn is_blank(record: &csv::StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}

/// Unwraps the `(x`, ` y`, ` z)` tokens of a logged vector.
fn unwrap_position<'a>(
    line: u64,
    x: &'a str,
    y: &'a str,
    z: &'a str,
) -> DsResult<(&'a str, &'a str, &'a str)> {
    let x = x.trim_start().strip_prefix('(').ok_or_else(|| {
        ScoreError::parse(line, format!("position must open with '(' but found '{}'", x))
    })?;
    let z = z.trim_end().strip_suffix(')').ok_or_else(|| {
        ScoreError::parse(line, format!("position must close with ')' but found '{}'", z))
    })?;
    Ok((x, y, z))
}

pub fn read_catalog<R: Read>(reader: R) -> DsResult<DefectCatalog> {
    let mut rdr = record_reader(reader);
    let mut catalog = DefectCatalog::new();
    let mut skipped = 0;

    for result in rdr.records() {
        let record = result.map_err(decode_error)?;
        let line = line_of(&record);
        if line <= CATALOG_HEADER_LINES || is_blank(&record) {
            continue;
        }

        let tokens = tokenize(&record);
        if !tokens[0].starts_with(CATALOG_ROW_PREFIX) {
            skipped += 1;
            continue;
        }
        if tokens.len() != CATALOG_FIELDS {
            return Err(ScoreError::parse(
                line,
                format!(
                    "defect row needs {} fields, found {}",
                    CATALOG_FIELDS,
                    tokens.len()
                ),
            ));
        }

        let (x, y, z) = unwrap_position(line, tokens[2], tokens[3], tokens[4])?;
        let defect = Defect::from_raw(
            tokens[0], tokens[1], x, y, z, tokens[5], tokens[6], tokens[7],
        )
        .map_err(|e| ScoreError::parse(line, e.to_string()))?;

        catalog.insert(defect).map_err(|dup| {
            ScoreError::parse(line, format!("duplicate defect name '{}'", dup.name))
        })?;
    }

    if skipped > 0 {
        debug!("Skipped {} non-defect catalog lines.", skipped);
    }

    Ok(catalog)
}

pub fn read_selections<R: Read>(reader: R) -> DsResult<Vec<SelectionEvent>> {
    let mut rdr = record_reader(reader);
    let mut events = Vec::new();

    for result in rdr.records() {
        let record = result.map_err(decode_error)?;
        let line = line_of(&record);
        if line <= SELECTION_HEADER_LINES || is_blank(&record) {
            continue;
        }

        let tokens = tokenize(&record);
        if tokens.len() != SELECTION_FIELDS {
            return Err(ScoreError::parse(
                line,
                format!(
                    "selection row needs {} fields, found {}",
                    SELECTION_FIELDS,
                    tokens.len()
                ),
            ));
        }

        let (x, y, z) = unwrap_position(line, tokens[2], tokens[3], tokens[4])?;
        let event = SelectionEvent::from_raw(tokens[0], tokens[1], x, y, z, tokens[5], tokens[6])
            .map_err(|e| ScoreError::parse(line, e.to_string()))?;
        events.push(event);
    }

    Ok(events)
}

pub fn load_catalog<P: AsRef<Path>>(path: P) -> DsResult<DefectCatalog> {
    let path = path.as_ref();
    let catalog = read_catalog(File::open(path)?)?;
    info!(
        "Loaded {} defects from {}",
        catalog.len(),
        path.display()
    );
    Ok(catalog)
}

pub fn load_selections<P: AsRef<Path>>(path: P) -> DsResult<Vec<SelectionEvent>> {
    let path = path.as_ref();
    let events = read_selections(File::open(path)?)?;
    info!(
        "Loaded {} selection events from {}",
        events.len(),
        path.display()
    );
    Ok(events)
}
