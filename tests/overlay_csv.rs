//! 성능 데이터 CSV 수집 회귀 테스트.
use turbo_map_toolbox::overlay::{parse_performance_csv, OperatingCurve, PerformanceDataError};

#[test]
fn mode_column_splits_design_point_and_operating_line() {
    let csv = "\
Mode,Wc,PR,Eta
DP,25.0,1.9,0.78
OD,20.0,1.7,0.74
OD,25.0,1.9,0.78
OD,30.0,2.1,0.76
";
    let data = parse_performance_csv(csv.as_bytes()).expect("parses");
    let dp = data.design_point.expect("design point");
    assert_eq!((dp.wc, dp.pr, dp.eta), (25.0, 1.9, 0.78));
    let curve = data.operating_curve.expect("curve");
    assert_eq!(curve.len(), 3);
    // 파일 순서 그대로, 재정렬 없이.
    assert_eq!(curve.wc, vec![20.0, 25.0, 30.0]);
    assert_eq!(curve.pr, vec![1.7, 1.9, 2.1]);
    curve.validate().expect("equal lengths");
}

#[test]
fn first_design_point_row_wins() {
    let csv = "\
Mode,Wc,PR,Eta
DP,25.0,1.9,0.78
DP,99.0,9.9,0.99
";
    let data = parse_performance_csv(csv.as_bytes()).expect("parses");
    assert_eq!(data.design_point.expect("dp").wc, 25.0);
    assert!(data.operating_curve.is_none());
}

#[test]
fn unknown_mode_rows_are_ignored() {
    let csv = "\
Mode,Wc,PR,Eta
SS,1.0,1.1,0.5
OD,2.0,1.2,0.6
";
    let data = parse_performance_csv(csv.as_bytes()).expect("parses");
    assert!(data.design_point.is_none());
    assert_eq!(data.operating_curve.expect("curve").len(), 1);
}

#[test]
fn without_mode_column_first_row_is_design_point() {
    let csv = "\
Wc,PR,Eta
25.0,1.9,0.78
30.0,2.1,0.76
";
    let data = parse_performance_csv(csv.as_bytes()).expect("parses");
    let dp = data.design_point.expect("dp");
    assert_eq!(dp.wc, 25.0);
    let curve = data.operating_curve.expect("curve");
    assert_eq!(curve.len(), 2);
}

#[test]
fn header_names_are_case_insensitive() {
    let csv = "wc,pr,ETA\n1.0,1.1,0.5\n";
    let data = parse_performance_csv(csv.as_bytes()).expect("parses");
    assert!(data.design_point.is_some());
}

#[test]
fn missing_column_is_rejected() {
    let csv = "Wc,PR\n1.0,1.1\n";
    assert!(matches!(
        parse_performance_csv(csv.as_bytes()),
        Err(PerformanceDataError::MissingColumn("Eta"))
    ));
}

#[test]
fn bad_number_reports_row_and_column() {
    let csv = "Wc,PR,Eta\n1.0,1.1,0.5\n2.0,oops,0.6\n";
    match parse_performance_csv(csv.as_bytes()) {
        Err(PerformanceDataError::BadNumber { row, column, token }) => {
            assert_eq!(row, 2);
            assert_eq!(column, "PR");
            assert_eq!(token, "oops");
        }
        other => panic!("expected BadNumber, got {other:?}"),
    }
}

#[test]
fn empty_file_is_rejected() {
    let csv = "Wc,PR,Eta\n";
    assert!(matches!(
        parse_performance_csv(csv.as_bytes()),
        Err(PerformanceDataError::Empty)
    ));
}

#[test]
fn curve_validate_flags_length_mismatch() {
    let curve = OperatingCurve {
        wc: vec![1.0, 2.0],
        pr: vec![1.1, 1.2, 1.3],
        eta: vec![0.5, 0.6],
    };
    let err = curve.validate().expect_err("mismatch");
    assert_eq!((err.wc, err.pr, err.eta), (2, 3, 2));
}
