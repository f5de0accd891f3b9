//! 솔버가 계산한 운전 데이터 오버레이.
//!
//! 설계점 하나와 운전선(스윕 순서 그대로의 삼중 배열)을 담는다. 값의 단위는
//! 스케일 적용 전의 맵 고유 단위와 일치해야 한다. 단위 환산은 솔버 책임이다.
//! 맵/테이블 객체는 오버레이를 보관하지 않으며, 렌더 호출마다 새로 전달받는다.

use std::fs::File;
use std::io::Read;
use std::path::Path;

/// 설계점: 솔버가 계산한 (Wc, PR, Eta) 삼중값 하나.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DesignPoint {
    pub wc: f64,
    pub pr: f64,
    pub eta: f64,
}

/// 운전선: 시뮬레이션 조건 하나당 한 엔트리인 같은 길이의 세 배열.
/// 순서는 호출자가 정한 스윕 순서이며 그리기 경로를 정의하므로 재정렬하지 않는다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperatingCurve {
    pub wc: Vec<f64>,
    pub pr: Vec<f64>,
    pub eta: Vec<f64>,
}

/// 오버레이 구성 배열들의 길이가 서로 다를 때 발생하는 오류.
/// 해당 오버레이 호출만 중단되며, 이미 그려진 베이스 맵은 영향을 받지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeMismatchError {
    pub wc: usize,
    pub pr: usize,
    pub eta: usize,
}

impl std::fmt::Display for ShapeMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "운전선 배열 길이 불일치: Wc={}, PR={}, Eta={}",
            self.wc, self.pr, self.eta
        )
    }
}

impl std::error::Error for ShapeMismatchError {}

impl OperatingCurve {
    /// 세 배열의 길이가 일치하는지 검사한다.
    pub fn validate(&self) -> Result<(), ShapeMismatchError> {
        if self.wc.len() != self.pr.len() || self.wc.len() != self.eta.len() {
            return Err(ShapeMismatchError {
                wc: self.wc.len(),
                pr: self.pr.len(),
                eta: self.eta.len(),
            });
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.wc.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wc.is_empty()
    }
}

/// 한 번의 렌더에 얹을 오버레이 묶음. 둘 다 선택 사항이다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayData {
    pub design_point: Option<DesignPoint>,
    pub operating_curve: Option<OperatingCurve>,
}

/// 성능 데이터 CSV 읽기 오류.
#[derive(Debug)]
pub enum PerformanceDataError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// CSV 형식 오류
    Csv(csv::Error),
    /// 필수 열이 없음
    MissingColumn(&'static str),
    /// 숫자 해석 실패
    BadNumber {
        row: usize,
        column: &'static str,
        token: String,
    },
    /// 데이터 행이 하나도 없음
    Empty,
}

impl std::fmt::Display for PerformanceDataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PerformanceDataError::Io(e) => write!(f, "성능 데이터 입출력 오류: {e}"),
            PerformanceDataError::Csv(e) => write!(f, "CSV 형식 오류: {e}"),
            PerformanceDataError::MissingColumn(name) => {
                write!(f, "필수 열 '{name}'이(가) 없습니다")
            }
            PerformanceDataError::BadNumber { row, column, token } => {
                write!(f, "{row}번째 행의 {column} 열 숫자 해석 실패: '{token}'")
            }
            PerformanceDataError::Empty => write!(f, "데이터 행이 하나도 없습니다"),
        }
    }
}

impl std::error::Error for PerformanceDataError {}

impl From<std::io::Error> for PerformanceDataError {
    fn from(value: std::io::Error) -> Self {
        PerformanceDataError::Io(value)
    }
}

impl From<csv::Error> for PerformanceDataError {
    fn from(value: csv::Error) -> Self {
        PerformanceDataError::Csv(value)
    }
}

/// 솔버 출력 CSV를 읽어 오버레이를 만든다.
///
/// 필수 열: `Wc`, `PR`, `Eta` (대소문자 무시). 선택 열: `Mode`.
/// `Mode` 열이 있으면 `DP` 행이 설계점(첫 행 우선), `OD` 행이 운전선이 된다.
/// 없으면 첫 행을 설계점으로, 전체 행을 운전선으로 쓴다.
/// 행 순서는 파일 순서 그대로 유지된다.
pub fn load_performance_csv(path: &Path) -> Result<OverlayData, PerformanceDataError> {
    let file = File::open(path)?;
    parse_performance_csv(file)
}

/// `load_performance_csv`의 리더 버전. 테스트와 파이프 입력에 쓴다.
pub fn parse_performance_csv<R: Read>(reader: R) -> Result<OverlayData, PerformanceDataError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let find_column = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
    };
    let wc_col = find_column("wc").ok_or(PerformanceDataError::MissingColumn("Wc"))?;
    let pr_col = find_column("pr").ok_or(PerformanceDataError::MissingColumn("PR"))?;
    let eta_col = find_column("eta").ok_or(PerformanceDataError::MissingColumn("Eta"))?;
    let mode_col = find_column("mode");

    let mut design_point: Option<DesignPoint> = None;
    let mut curve = OperatingCurve::default();
    let mut row_count = 0usize;

    for (i, record) in csv_reader.records().enumerate() {
        let record = record?;
        let row = i + 1;
        row_count += 1;

        let wc = parse_field(&record, wc_col, "Wc", row)?;
        let pr = parse_field(&record, pr_col, "PR", row)?;
        let eta = parse_field(&record, eta_col, "Eta", row)?;

        match mode_col {
            Some(col) => {
                let mode = record.get(col).unwrap_or("");
                if mode.eq_ignore_ascii_case("dp") {
                    if design_point.is_none() {
                        design_point = Some(DesignPoint { wc, pr, eta });
                    }
                } else if mode.eq_ignore_ascii_case("od") {
                    curve.wc.push(wc);
                    curve.pr.push(pr);
                    curve.eta.push(eta);
                }
                // DP/OD 이외의 모드 행은 이 도구의 관심사가 아니다.
            }
            None => {
                if design_point.is_none() {
                    design_point = Some(DesignPoint { wc, pr, eta });
                }
                curve.wc.push(wc);
                curve.pr.push(pr);
                curve.eta.push(eta);
            }
        }
    }

    if row_count == 0 {
        return Err(PerformanceDataError::Empty);
    }

    Ok(OverlayData {
        design_point,
        operating_curve: if curve.is_empty() { None } else { Some(curve) },
    })
}

fn parse_field(
    record: &csv::StringRecord,
    col: usize,
    column: &'static str,
    row: usize,
) -> Result<f64, PerformanceDataError> {
    let token = record.get(col).unwrap_or("");
    token
        .parse::<f64>()
        .map_err(|_| PerformanceDataError::BadNumber {
            row,
            column,
            token: token.to_string(),
        })
}
