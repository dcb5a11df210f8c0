use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use defectscore::error::DsResult;
use defectscore::metrics::{RunSummary, TargetBreakdown};
use defectscore::records::{ActionKind, Defect, SelectionEvent};
use defectscore::runs::RunReport;
use serde::Serialize;
use strum::IntoEnumIterator;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_right(table: &mut Table, columns: std::ops::RangeInclusive<usize>) {
    for i in columns {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

pub fn print_batch_table(reports: &[RunReport]) {
    let mut table = new_table();

    table.add_row(vec![
        Cell::new("Run").add_attribute(Attribute::Bold),
        Cell::new("Targets"),
        Cell::new("Hits").fg(Color::Green),
        Cell::new("False Alarms").fg(Color::Red),
        Cell::new("Misses").fg(Color::Yellow),
        Cell::new("Real Hits").fg(Color::Green),
        Cell::new("Real Misses").fg(Color::Yellow),
        Cell::new("Visible"),
        Cell::new("Status"),
    ]);
    align_right(&mut table, 1..=7);

    for report in reports {
        match &report.result {
            Ok(outcome) => {
                let s = &outcome.summary;
                let t = &outcome.targets;
                table.add_row(vec![
                    Cell::new(&report.id).add_attribute(Attribute::Bold),
                    Cell::new(s.total_targets),
                    Cell::new(s.hits).fg(Color::Green),
                    Cell::new(s.false_alarms).fg(Color::Red),
                    Cell::new(s.misses).fg(Color::Yellow),
                    Cell::new(t.real_hits).fg(Color::Green),
                    Cell::new(t.real_misses).fg(Color::Yellow),
                    Cell::new(t.visible_targets),
                    Cell::new("ok"),
                ]);
            }
            Err(e) => {
                table.add_row(vec![
                    Cell::new(&report.id).add_attribute(Attribute::Bold),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new("-"),
                    Cell::new(format!("FAILED: {}", e)).fg(Color::Red),
                ]);
            }
        }
    }
    println!("\n{}", table);
}

pub fn print_event_table(title: &str, events: &[SelectionEvent]) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new(title).add_attribute(Attribute::Bold),
        Cell::new("Time"),
        Cell::new("Action"),
        Cell::new("Location"),
        Cell::new("Defect"),
        Cell::new("Angle"),
    ]);
    align_right(&mut table, 1..=1);

    for (i, e) in events.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(format!("{:.3}", e.time)),
            Cell::new(e.action),
            Cell::new(e.position),
            Cell::new(&e.defect),
            Cell::new(format!("{:.1}", e.angle)),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_defect_table(title: &str, defects: &[Defect]) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new(title).add_attribute(Attribute::Bold),
        Cell::new("Surface"),
        Cell::new("Location"),
        Cell::new("Marked"),
        Cell::new("Real"),
        Cell::new("Nearest"),
        Cell::new("Selections"),
    ]);
    align_right(&mut table, 6..=6);

    for d in defects {
        table.add_row(vec![
            Cell::new(&d.name).add_attribute(Attribute::Bold),
            Cell::new(&d.surface),
            Cell::new(d.position),
            Cell::new(d.marked),
            Cell::new(d.real),
            Cell::new(&d.nearest),
            Cell::new(d.selection_count),
        ]);
    }
    println!("\n{}", table);
}

pub fn print_action_breakdown(events: &[SelectionEvent]) {
    let mut table = new_table();
    table.add_row(vec![
        Cell::new("Action").add_attribute(Attribute::Bold),
        Cell::new("Events"),
    ]);
    align_right(&mut table, 1..=1);

    for kind in ActionKind::iter() {
        let count = events.iter().filter(|e| e.action == kind).count();
        table.add_row(vec![Cell::new(kind), Cell::new(count)]);
    }
    println!("\n{}", table);
}

#[derive(Serialize)]
struct JsonRun<'a> {
    run: &'a str,
    results: &'a str,
    summary: Option<&'a RunSummary>,
    targets: Option<&'a TargetBreakdown>,
    error: Option<String>,
}

pub fn print_json(reports: &[RunReport]) -> DsResult<()> {
    let entries: Vec<JsonRun> = reports
        .iter()
        .map(|r| match &r.result {
            Ok(outcome) => JsonRun {
                run: &r.id,
                results: &r.results_name,
                summary: Some(&outcome.summary),
                targets: Some(&outcome.targets),
                error: None,
            },
            Err(e) => JsonRun {
                run: &r.id,
                results: &r.results_name,
                summary: None,
                targets: None,
                error: Some(e.to_string()),
            },
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}
