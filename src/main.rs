use std::path::PathBuf;

use clap::Parser;
use turbo_map_toolbox::{app, config, i18n, map, overlay};

/// 커맨드라인 옵션.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Turbomachinery performance map scaling & visualization toolbox (CLI)"
)]
struct Cli {
    /// 언어 (auto/ko/en)
    #[arg(long, short = 'L')]
    lang: Option<String>,

    /// 시작 시 로드할 맵 파일
    #[arg(long)]
    map: Option<PathBuf>,

    /// 시작 시 로드할 성능 데이터 CSV
    #[arg(long)]
    perf: Option<PathBuf>,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() {
    if let Err(err) = try_run() {
        eprintln!("오류: {err}");
    }
}

fn try_run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut cfg = config::load_or_default()?;
    let lang = i18n::resolve_language(cli.lang.as_deref(), Some(cfg.language.as_str()));
    let tr = i18n::Translator::new(&lang);

    let mut session = app::Session::default();
    if let Some(path) = &cli.map {
        session.map = Some(map::read_map_file(path)?);
    }
    if let Some(path) = &cli.perf {
        session.overlay = Some(overlay::load_performance_csv(path)?);
    }

    app::run(&mut cfg, &tr, &mut session)?;
    Ok(())
}
