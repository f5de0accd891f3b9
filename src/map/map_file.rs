//! 성능 맵 파일 리더.
//!
//! 헤더 한 줄(`99 <KIND> <title…>`) 뒤에 속도선 블록이 이어지는 단순한
//! 텍스트 형식을 읽는다. 블록 사이의 빈 줄은 몇 개든 허용하며, 키워드 줄의
//! 값 목록은 다음 키워드가 나올 때까지 여러 줄로 이어 쓸 수 있다.
//!
//! ```text
//! 99 COMPRESSOR demo axial compressor
//!
//! SPEED 8000
//! WC  10.0 20.0 30.0
//! PR  1.5 1.8 2.0
//! ETA 0.70 0.80 0.75
//! ```
//!
//! 압축기 맵은 선택적으로 `SURGE` 블록(WC/PR 두 줄)을 가질 수 있다.

use std::fs;
use std::path::Path;

use super::speed_line::{MalformedMapError, SpeedLine, SpeedLineTable, SurgeLine};
use super::MapKind;

/// 파싱이 끝난 맵 파일 전체.
#[derive(Debug, Clone)]
pub struct MapFile {
    pub kind: MapKind,
    pub title: String,
    pub table: SpeedLineTable,
    pub surge_line: Option<SurgeLine>,
}

/// 맵 파일 읽기/파싱 오류. 어휘 오류는 줄 번호를 함께 담는다.
#[derive(Debug)]
pub enum MapFileError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// `99` 헤더 줄이 없음
    MissingHeader,
    /// 헤더의 맵 종류가 COMPRESSOR/TURBINE 이 아님
    UnknownKind { line_no: usize, word: String },
    /// 키워드 뒤에 필요한 값이 없음
    MissingValue { line_no: usize, keyword: String },
    /// 해당 위치에 올 수 없는 토큰
    UnexpectedToken { line_no: usize, token: String },
    /// 숫자 해석 실패
    BadNumber { line_no: usize, token: String },
    /// WC/PR/ETA 중 일부가 빠진 속도선 블록
    IncompleteBlock { nc: f64, missing: &'static str },
    /// 테이블 검증 실패
    Malformed(MalformedMapError),
}

impl std::fmt::Display for MapFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapFileError::Io(e) => write!(f, "맵 파일 입출력 오류: {e}"),
            MapFileError::MissingHeader => write!(f, "99 헤더 줄이 없는 맵 파일입니다"),
            MapFileError::UnknownKind { line_no, word } => {
                write!(f, "{line_no}번째 줄: 알 수 없는 맵 종류 '{word}'")
            }
            MapFileError::MissingValue { line_no, keyword } => {
                write!(f, "{line_no}번째 줄: {keyword} 뒤에 값이 없습니다")
            }
            MapFileError::UnexpectedToken { line_no, token } => {
                write!(f, "{line_no}번째 줄: 예상하지 못한 토큰 '{token}'")
            }
            MapFileError::BadNumber { line_no, token } => {
                write!(f, "{line_no}번째 줄: 숫자 해석 실패 '{token}'")
            }
            MapFileError::IncompleteBlock { nc, missing } => {
                write!(f, "속도선 Nc={nc} 블록에 {missing} 줄이 없습니다")
            }
            MapFileError::Malformed(e) => write!(f, "맵 테이블 오류: {e}"),
        }
    }
}

impl std::error::Error for MapFileError {}

impl From<std::io::Error> for MapFileError {
    fn from(value: std::io::Error) -> Self {
        MapFileError::Io(value)
    }
}

impl From<MalformedMapError> for MapFileError {
    fn from(value: MalformedMapError) -> Self {
        MapFileError::Malformed(value)
    }
}

/// 숫자 이어쓰기가 향하는 대상 배열.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Wc,
    Pr,
    Eta,
    SurgeWc,
    SurgePr,
}

/// 만들다 만 속도선 블록.
#[derive(Debug)]
struct BlockBuilder {
    nc: f64,
    wc: Vec<f64>,
    pr: Vec<f64>,
    eta: Vec<f64>,
}

impl BlockBuilder {
    fn finish(self) -> Result<SpeedLine, MapFileError> {
        let missing = if self.wc.is_empty() {
            Some("WC")
        } else if self.pr.is_empty() {
            Some("PR")
        } else if self.eta.is_empty() {
            Some("ETA")
        } else {
            None
        };
        if let Some(missing) = missing {
            return Err(MapFileError::IncompleteBlock {
                nc: self.nc,
                missing,
            });
        }
        Ok(SpeedLine {
            nc: self.nc,
            wc: self.wc,
            pr: self.pr,
            eta: self.eta,
        })
    }
}

/// 맵 파일을 디스크에서 읽어 파싱한다.
pub fn read_map_file(path: &Path) -> Result<MapFile, MapFileError> {
    let content = fs::read_to_string(path)?;
    parse_map(&content)
}

/// 메모리 내 문자열을 파싱한다. 헤더 전의 줄은 주석으로 보고 건너뛴다.
pub fn parse_map(src: &str) -> Result<MapFile, MapFileError> {
    let mut lines_iter = src.lines().enumerate();

    // 헤더 탐색: 첫 토큰이 99인 줄
    let (kind, title) = loop {
        let Some((idx, raw)) = lines_iter.next() else {
            return Err(MapFileError::MissingHeader);
        };
        let line_no = idx + 1;
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        match tokens.first() {
            Some(&"99") => {
                let Some(kind_word) = tokens.get(1) else {
                    return Err(MapFileError::MissingValue {
                        line_no,
                        keyword: "99".into(),
                    });
                };
                let kind = match kind_word.to_ascii_uppercase().as_str() {
                    "COMPRESSOR" => MapKind::Compressor,
                    "TURBINE" => MapKind::Turbine,
                    _ => {
                        return Err(MapFileError::UnknownKind {
                            line_no,
                            word: kind_word.to_string(),
                        })
                    }
                };
                break (kind, tokens[2..].join(" "));
            }
            _ => continue,
        }
    };

    let mut speed_lines: Vec<SpeedLine> = Vec::new();
    let mut block: Option<BlockBuilder> = None;
    let mut surge_wc: Vec<f64> = Vec::new();
    let mut surge_pr: Vec<f64> = Vec::new();
    let mut surge_seen = false;
    let mut in_surge = false;
    let mut active: Option<Target> = None;

    for (idx, raw) in lines_iter {
        let line_no = idx + 1;
        let tokens: Vec<&str> = raw.split_whitespace().collect();
        // 빈 줄은 블록 구분자로만 쓰이며 값 이어쓰기를 끝낸다.
        let Some(&first) = tokens.first() else {
            active = None;
            continue;
        };

        match first.to_ascii_uppercase().as_str() {
            "SPEED" => {
                if let Some(done) = block.take() {
                    speed_lines.push(done.finish()?);
                }
                in_surge = false;
                let Some(value) = tokens.get(1) else {
                    return Err(MapFileError::MissingValue {
                        line_no,
                        keyword: "SPEED".into(),
                    });
                };
                if let Some(extra) = tokens.get(2) {
                    return Err(MapFileError::UnexpectedToken {
                        line_no,
                        token: extra.to_string(),
                    });
                }
                let nc = parse_number(value, line_no)?;
                block = Some(BlockBuilder {
                    nc,
                    wc: Vec::new(),
                    pr: Vec::new(),
                    eta: Vec::new(),
                });
                active = None;
            }
            "SURGE" => {
                if let Some(done) = block.take() {
                    speed_lines.push(done.finish()?);
                }
                if let Some(extra) = tokens.get(1) {
                    return Err(MapFileError::UnexpectedToken {
                        line_no,
                        token: extra.to_string(),
                    });
                }
                in_surge = true;
                surge_seen = true;
                active = None;
            }
            keyword @ ("WC" | "PR" | "ETA") => {
                // 서지 블록에는 효율 축이 없고, 블록 밖의 키워드는 갈 곳이 없다.
                let target = match (keyword, in_surge, block.is_some()) {
                    ("WC", false, true) => Target::Wc,
                    ("PR", false, true) => Target::Pr,
                    ("ETA", false, true) => Target::Eta,
                    ("WC", true, _) => Target::SurgeWc,
                    ("PR", true, _) => Target::SurgePr,
                    _ => {
                        return Err(MapFileError::UnexpectedToken {
                            line_no,
                            token: first.to_string(),
                        })
                    }
                };
                let dest = dest_vec(target, &mut block, &mut surge_wc, &mut surge_pr)
                    .ok_or_else(|| MapFileError::UnexpectedToken {
                        line_no,
                        token: first.to_string(),
                    })?;
                push_values(&tokens[1..], line_no, dest)?;
                active = Some(target);
            }
            _ => {
                // 키워드가 아니면 직전 키워드의 값 이어쓰기여야 한다.
                if first.parse::<f64>().is_err() {
                    return Err(MapFileError::UnexpectedToken {
                        line_no,
                        token: first.to_string(),
                    });
                }
                let Some(target) = active else {
                    return Err(MapFileError::UnexpectedToken {
                        line_no,
                        token: first.to_string(),
                    });
                };
                let dest = dest_vec(target, &mut block, &mut surge_wc, &mut surge_pr)
                    .ok_or_else(|| MapFileError::UnexpectedToken {
                        line_no,
                        token: first.to_string(),
                    })?;
                push_values(&tokens, line_no, dest)?;
            }
        }
    }

    if let Some(done) = block.take() {
        speed_lines.push(done.finish()?);
    }

    let table = SpeedLineTable::new(speed_lines)?;
    let surge_line = if surge_seen {
        Some(SurgeLine::new(surge_wc, surge_pr)?)
    } else {
        None
    };

    Ok(MapFile {
        kind,
        title,
        table,
        surge_line,
    })
}

fn parse_number(token: &str, line_no: usize) -> Result<f64, MapFileError> {
    token.parse::<f64>().map_err(|_| MapFileError::BadNumber {
        line_no,
        token: token.to_string(),
    })
}

fn dest_vec<'a>(
    target: Target,
    block: &'a mut Option<BlockBuilder>,
    surge_wc: &'a mut Vec<f64>,
    surge_pr: &'a mut Vec<f64>,
) -> Option<&'a mut Vec<f64>> {
    match target {
        Target::Wc => block.as_mut().map(|b| &mut b.wc),
        Target::Pr => block.as_mut().map(|b| &mut b.pr),
        Target::Eta => block.as_mut().map(|b| &mut b.eta),
        Target::SurgeWc => Some(surge_wc),
        Target::SurgePr => Some(surge_pr),
    }
}

fn push_values(tokens: &[&str], line_no: usize, dest: &mut Vec<f64>) -> Result<(), MapFileError> {
    for token in tokens {
        dest.push(parse_number(token, line_no)?);
    }
    Ok(())
}
