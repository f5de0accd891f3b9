use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 차트 표시 옵션.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotConfig {
    /// 압축기 맵의 서지 라인 표시 여부
    pub show_surge_line: bool,
    /// 범례 표시 여부
    pub show_legend: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            show_surge_line: true,
            show_legend: false,
        }
    }
}

/// 애플리케이션 설정.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// 언어 코드 (auto/ko/en)
    pub language: String,
    /// 마지막으로 연 맵 파일 경로
    pub last_map_path: Option<String>,
    /// 마지막으로 연 성능 데이터 CSV 경로
    pub last_performance_path: Option<String>,
    pub plot: PlotConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".into(),
            last_map_path: None,
            last_performance_path: None,
            plot: PlotConfig::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류.
#[derive(Debug)]
pub enum ConfigError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// TOML 역직렬화 오류
    Serde(toml::de::Error),
    /// TOML 직렬화 오류
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "설정 파일 입출력 오류: {e}"),
            ConfigError::Serde(e) => write!(f, "설정 파싱 오류: {e}"),
            ConfigError::Serialize(e) => write!(f, "설정 직렬화 오류: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        ConfigError::Serde(value)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(value: toml::ser::Error) -> Self {
        ConfigError::Serialize(value)
    }
}

const CONFIG_PATH: &str = "config.toml";

/// config.toml을 로드하거나 없으면 기본 설정을 만들어 저장한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    let path = Path::new(CONFIG_PATH);
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        Ok(cfg)
    } else {
        let cfg = Config::default();
        save_config(&cfg)?;
        Ok(cfg)
    }
}

fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(CONFIG_PATH, content)?;
    Ok(())
}

impl Config {
    /// 설정을 config.toml에 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        save_config(self)
    }
}
