mod common;

use common::{deselect, select};
use defectscore::matching::MatchingEngine;
use defectscore::metrics::{aggregate, RunSummary};
use defectscore::output::{
    format_defect, format_event, save_results, write_batch_summary, write_console_summary, write_results,
};
use defectscore::records::{Defect, DefectCatalog, Position};
use std::fs;

fn sample_outcome() -> defectscore::RunOutcome {
    let mut d1 = Defect::new("Defect1", "Deck_01", Position::new(0.0, 1.0, 2.0));
    d1.marked = true;
    d1.nearest = "Defect2".to_string();
    let mut d2 = Defect::new("Defect2", "Pier_02", Position::new(3.5, 0.0, -1.0));
    d2.real = true;
    d2.nearest = "Defect1".to_string();
    let catalog: DefectCatalog = vec![d1, d2].into_iter().collect();

    let mut hit = select(1250.0, (0.0, 1.0, 2.0), "Defect1");
    hit.angle = 33.5;
    let ctx = MatchingEngine::default()
        .run(
            catalog,
            &[
                hit,
                select(1900.25, (8.0, 8.0, 8.0), "Defect2"),
                select(2000.0, (9.0, 9.0, 9.0), "Defect2"),
                deselect(2100.0, (9.0, 9.0, 9.0), "Defect2"),
            ],
        )
        .unwrap();
    aggregate(&ctx)
}

const EXPECTED: &str = "\
#################################
############ SUMMARY ############
## Total Targets: 2
## Hits: 1
## False Alarms: 1
## Misses: 1
#################################

######### HITS #########
<Time>:<Action>:<Location>:<Nearest Defect>:<Viewing Angle to Defect>
1250.000000:Selection:[0.0, 1.0, 2.0]:Defect1:33.500000

##### FALSE ALARMS #####
<Time>:<Action>:<Location>:<Nearest Defect>:<Viewing Angle to Defect>
1900.250000:Selection:[8.0, 8.0, 8.0]:Defect2:0.000000

##### TARGET HITS ######
<Name>:<Surface>:<Location>:<Marked>:<Real>:<Nearest Defect>
Defect1:Deck_01:[0.0, 1.0, 2.0]:True:False:Defect2

##### TARGET MISSES ####
<Name>:<Surface>:<Location>:<Marked>:<Real>:<Nearest Defect>
Defect2:Pier_02:[3.5, 0.0, -1.0]:False:True:Defect1
";

#[test]
fn test_results_file_layout() {
    let mut buf = Vec::new();
    write_results(&mut buf, &sample_outcome()).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), EXPECTED);
}

#[test]
fn test_save_results_writes_same_text() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("p1r1_Results.txt");
    save_results(&path, &sample_outcome()).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), EXPECTED);
}

#[test]
fn test_console_summary_block() {
    let summary = RunSummary {
        total_targets: 12,
        hits: 7,
        false_alarms: 3,
        misses: 5,
    };
    let mut buf = Vec::new();
    write_console_summary(&mut buf, &summary, "p2r1_Results.txt").unwrap();
    let text = String::from_utf8(buf).unwrap();

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "#################################");
    assert_eq!(lines[1], "############ SUMMARY ############");
    assert_eq!(lines[2], "## Total Targets: 12");
    assert_eq!(lines[3], "## Hits: 7");
    assert_eq!(lines[4], "## False Alarms: 3");
    assert_eq!(lines[5], "## Misses: 5");
    assert_eq!(lines[6], "##");
    assert_eq!(lines[7], "## Detailed results found in: p2r1_Results.txt");
    assert_eq!(lines[8], "#################################");
    assert_eq!(lines.len(), 9);
}

#[test]
fn test_row_formats() {
    let mut e = select(0.5, (1.0, -0.25, 100.0), "Defect9");
    e.angle = 90.0;
    assert_eq!(format_event(&e), "0.500000:Selection:[1.0, -0.25, 100.0]:Defect9:90.000000");

    let d = Defect::new("Defect9", "Deck", Position::new(0.1, 0.2, 0.3));
    assert_eq!(format_defect(&d), "Defect9:Deck:[0.1, 0.2, 0.3]:False:False:");
}

#[test]
fn test_row_formats_pad_exponents() {
    let e = select(2.0, (0.00001, 1e16, -0.0), "Defect1");
    assert_eq!(format_event(&e), "2.000000:Selection:[1e-05, 1e+16, -0.0]:Defect1:0.000000");
}

#[test]
fn test_batch_summary_rows() {
    let outcome = sample_outcome();
    let mut buf = Vec::new();
    write_batch_summary(&mut buf, &[("p1r1", &outcome), ("p1r2", &outcome)]).unwrap();

    // Defect2 is the only real defect and it was missed; both are visible.
    assert_eq!(
        String::from_utf8(buf).unwrap(),
        "Participant and Run,Hits,Misses,False Alarms,Total Targets\n\
         p1r1,0,1,1,2\n\
         p1r2,0,1,1,2\n"
    );
}

#[test]
fn test_batch_summary_header_only_when_empty() {
    let mut buf = Vec::new();
    write_batch_summary(&mut buf, &[]).unwrap();
    assert_eq!(
        String::from_utf8(buf).unwrap(),
        "Participant and Run,Hits,Misses,False Alarms,Total Targets\n"
    );
}
