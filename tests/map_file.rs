//! 맵 파일 문법 회귀 테스트.
use turbo_map_toolbox::map::{parse_map, MalformedMapError, MapFileError, MapKind};

const SAMPLE: &str = "\
generated by map export tool
99 COMPRESSOR demo axial compressor

SPEED 8000
WC  10.0 20.0 30.0
PR  1.5 1.8 2.0
ETA 0.70 0.80 0.75


SPEED 16000
WC  12.0 24.0 36.0
PR  1.6 2.0 2.3
ETA 0.72 0.82 0.76

SURGE
WC 8.0 12.0 16.0
PR 1.7 2.1 2.5
";

#[test]
fn parses_sample_with_blank_separator_lines() {
    let map_file = parse_map(SAMPLE).expect("sample parses");
    assert_eq!(map_file.kind, MapKind::Compressor);
    assert_eq!(map_file.title, "demo axial compressor");
    assert_eq!(map_file.table.line_count(), 2);
    assert_eq!(map_file.table.speed_value(0), 8000.0);
    assert_eq!(map_file.table.speed_value(1), 16000.0);
    assert_eq!(map_file.table.flow_values(0), &[10.0, 20.0, 30.0]);
    assert_eq!(map_file.table.efficiency_values(1), &[0.72, 0.82, 0.76]);
    let surge = map_file.surge_line.expect("surge block");
    assert_eq!(surge.wc(), &[8.0, 12.0, 16.0]);
    assert_eq!(surge.pr(), &[1.7, 2.1, 2.5]);
}

#[test]
fn value_lists_may_continue_over_lines() {
    let src = "\
99 TURBINE split rows
SPEED 7000
WC 1.0 2.0
   3.0 4.0
PR 1.1 1.2 1.3 1.4
ETA 0.5 0.6
    0.7
    0.8
";
    let map_file = parse_map(src).expect("continuation lines parse");
    assert_eq!(map_file.kind, MapKind::Turbine);
    assert_eq!(map_file.table.flow_values(0), &[1.0, 2.0, 3.0, 4.0]);
    assert_eq!(map_file.table.efficiency_values(0).len(), 4);
    assert!(map_file.surge_line.is_none());
}

#[test]
fn missing_header_is_rejected() {
    let src = "SPEED 8000\nWC 1.0\nPR 1.1\nETA 0.5\n";
    assert!(matches!(parse_map(src), Err(MapFileError::MissingHeader)));
}

#[test]
fn unknown_map_kind_is_rejected() {
    let src = "99 PROPELLER some map\nSPEED 100\nWC 1.0\nPR 1.1\nETA 0.5\n";
    assert!(matches!(
        parse_map(src),
        Err(MapFileError::UnknownKind { line_no: 1, .. })
    ));
}

#[test]
fn bad_number_reports_line_number() {
    let src = "99 COMPRESSOR m\nSPEED 100\nWC 1.0 x2.0\nPR 1.1 1.2\nETA 0.5 0.6\n";
    match parse_map(src) {
        Err(MapFileError::BadNumber { line_no, token }) => {
            assert_eq!(line_no, 3);
            assert_eq!(token, "x2.0");
        }
        other => panic!("expected BadNumber, got {other:?}"),
    }
}

#[test]
fn keyword_outside_block_is_rejected() {
    let src = "99 COMPRESSOR m\nWC 1.0 2.0\n";
    assert!(matches!(
        parse_map(src),
        Err(MapFileError::UnexpectedToken { line_no: 2, .. })
    ));
}

#[test]
fn incomplete_block_is_rejected() {
    let src = "99 COMPRESSOR m\nSPEED 100\nWC 1.0 2.0\nPR 1.1 1.2\n";
    match parse_map(src) {
        Err(MapFileError::IncompleteBlock { nc, missing }) => {
            assert_eq!(nc, 100.0);
            assert_eq!(missing, "ETA");
        }
        other => panic!("expected IncompleteBlock, got {other:?}"),
    }
}

#[test]
fn length_mismatch_within_line_is_rejected() {
    let src = "\
99 COMPRESSOR m
SPEED 100
WC 1.0 2.0 3.0 4.0 5.0
PR 1.1 1.2 1.3 1.4
ETA 0.5 0.6 0.7 0.8 0.9
";
    assert!(matches!(
        parse_map(src),
        Err(MapFileError::Malformed(MalformedMapError::LengthMismatch {
            line_index: 0,
            wc: 5,
            pr: 4,
            eta: 5,
        }))
    ));
}

#[test]
fn non_finite_samples_are_rejected() {
    let src = "99 COMPRESSOR m\nSPEED 100\nWC 1.0 2.0\nPR 1.1 1.2\nETA 0.5 nan\n";
    assert!(matches!(
        parse_map(src),
        Err(MapFileError::Malformed(MalformedMapError::NonFinite {
            line_index: 0,
            parameter: "Eta",
        }))
    ));
}

#[test]
fn eta_inside_surge_block_is_rejected() {
    let src = "\
99 COMPRESSOR m
SPEED 100
WC 1.0
PR 1.1
ETA 0.5
SURGE
WC 0.9
PR 1.3
ETA 0.4
";
    assert!(matches!(
        parse_map(src),
        Err(MapFileError::UnexpectedToken { .. })
    ));
}

#[test]
fn surge_length_mismatch_is_rejected() {
    let src = "\
99 COMPRESSOR m
SPEED 100
WC 1.0
PR 1.1
ETA 0.5
SURGE
WC 0.9 1.0
PR 1.3
";
    assert!(matches!(
        parse_map(src),
        Err(MapFileError::Malformed(
            MalformedMapError::SurgeLengthMismatch { wc: 2, pr: 1 }
        ))
    ));
}

#[test]
fn speed_lines_keep_file_order() {
    let src = "\
99 TURBINE order check
SPEED 16540
WC 3.0
PR 1.3
ETA 0.7
SPEED 8000
WC 1.0
PR 1.1
ETA 0.5
";
    let map_file = parse_map(src).expect("parses");
    assert_eq!(map_file.table.speed_value(0), 16540.0);
    assert_eq!(map_file.table.speed_value(1), 8000.0);
}
