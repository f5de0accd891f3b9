use std::io::{self, Write};
use std::path::Path;

use crate::app::{AppError, Session};
use crate::config::Config;
use crate::i18n::{keys, Translator};
use crate::map::{self, MapPoint, ScaleFactors, ScaledMap};
use crate::overlay;
use crate::render::{DrawCommand, LineKind, MapRenderer, RecordingSurface};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    LoadMap,
    ScaleFactors,
    Overlay,
    Preview,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_LOAD_MAP));
    println!("{}", tr.t(keys::MAIN_MENU_SCALE_FACTORS));
    println!("{}", tr.t(keys::MAIN_MENU_OVERLAY));
    println!("{}", tr.t(keys::MAIN_MENU_PREVIEW));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::LoadMap),
            "2" => return Ok(MenuChoice::ScaleFactors),
            "3" => return Ok(MenuChoice::Overlay),
            "4" => return Ok(MenuChoice::Preview),
            "5" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 맵 파일을 로드하고 요약을 출력한다. 파싱 실패는 메뉴로 돌아가 재시도한다.
pub fn handle_load_map(
    tr: &Translator,
    config: &mut Config,
    session: &mut Session,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::LOAD_MAP_HEADING));
    let path_input = read_line(tr.t(keys::PROMPT_MAP_PATH))?;
    let path = path_input.trim();
    match map::read_map_file(Path::new(path)) {
        Ok(map_file) => {
            print_map_summary(tr, &map_file);
            config.last_map_path = Some(path.to_string());
            session.map = Some(map_file);
        }
        Err(e) => println!("{}: {e}", tr.t(keys::ERROR_PREFIX)),
    }
    Ok(())
}

fn print_map_summary(tr: &Translator, map_file: &map::MapFile) {
    println!("{} {}", tr.t(keys::MAP_SUMMARY_KIND), map_file.kind.label());
    if !map_file.title.is_empty() {
        println!("{} {}", tr.t(keys::MAP_SUMMARY_TITLE), map_file.title);
    }
    let samples: Vec<String> = map_file
        .table
        .lines()
        .iter()
        .map(|line| line.wc.len().to_string())
        .collect();
    println!(
        "{} {} ({})",
        tr.t(keys::MAP_SUMMARY_LINES),
        map_file.table.line_count(),
        samples.join("/")
    );
    let speeds: Vec<f64> = map_file.table.lines().iter().map(|line| line.nc).collect();
    let lo = speeds.iter().cloned().fold(f64::INFINITY, f64::min);
    let hi = speeds.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    println!("{} {lo:.1} ~ {hi:.1}", tr.t(keys::MAP_SUMMARY_SPEED));
    if let Some(surge) = &map_file.surge_line {
        println!("{} {}", tr.t(keys::MAP_SUMMARY_SURGE), surge.len());
    }
}

/// 스케일 팩터 메뉴를 처리한다.
pub fn handle_scale_factors(tr: &Translator, session: &mut Session) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SCALE_HEADING));
    println!(
        "{} {}",
        tr.t(keys::SCALE_CURRENT),
        format_factors(&session.factors)
    );
    println!("{}", tr.t(keys::SCALE_OPTIONS));
    let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
    let result = match sel.trim() {
        "1" => {
            let wc = read_f64(tr, tr.t(keys::PROMPT_WC))?;
            let pr = read_f64(tr, tr.t(keys::PROMPT_PR))?;
            let eta = read_f64(tr, tr.t(keys::PROMPT_ETA))?;
            let nc = read_f64(tr, tr.t(keys::PROMPT_NC))?;
            ScaleFactors::new(wc, pr, eta, nc)
        }
        "2" => {
            println!("{}", tr.t(keys::SCALE_MAP_POINT));
            let map_point = read_map_point(tr)?;
            println!("{}", tr.t(keys::SCALE_ENGINE_POINT));
            let engine_point = read_map_point(tr)?;
            ScaleFactors::from_design(&map_point, &engine_point)
        }
        "3" => Ok(ScaleFactors::identity()),
        _ => {
            println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
            return Ok(());
        }
    };
    match result {
        Ok(factors) => {
            session.factors = factors;
            println!("{} {}", tr.t(keys::SCALE_SET), format_factors(&factors));
        }
        Err(e) => println!("{}: {e}", tr.t(keys::ERROR_PREFIX)),
    }
    Ok(())
}

fn read_map_point(tr: &Translator) -> Result<MapPoint, AppError> {
    let nc = read_f64(tr, tr.t(keys::PROMPT_NC))?;
    let wc = read_f64(tr, tr.t(keys::PROMPT_WC))?;
    let pr = read_f64(tr, tr.t(keys::PROMPT_PR))?;
    let eta = read_f64(tr, tr.t(keys::PROMPT_ETA))?;
    Ok(MapPoint { nc, wc, pr, eta })
}

fn format_factors(factors: &ScaleFactors) -> String {
    format!(
        "Wc={:.6}, PR={:.6}, Eta={:.6}, Nc={:.6}",
        factors.wc(),
        factors.pr(),
        factors.eta(),
        factors.nc()
    )
}

/// 성능 데이터 CSV를 로드하고 요약을 출력한다.
pub fn handle_overlay(
    tr: &Translator,
    config: &mut Config,
    session: &mut Session,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::OVERLAY_HEADING));
    let path_input = read_line(tr.t(keys::PROMPT_CSV_PATH))?;
    let path = path_input.trim();
    match overlay::load_performance_csv(Path::new(path)) {
        Ok(data) => {
            if let Some(dp) = &data.design_point {
                println!(
                    "{} Wc={:.4}, PR={:.4}, Eta={:.4}",
                    tr.t(keys::OVERLAY_DESIGN_POINT),
                    dp.wc,
                    dp.pr,
                    dp.eta
                );
            }
            if let Some(curve) = &data.operating_curve {
                println!("{} {}", tr.t(keys::OVERLAY_CURVE_POINTS), curve.len());
            }
            config.last_performance_path = Some(path.to_string());
            session.overlay = Some(data);
        }
        Err(e) => println!("{}: {e}", tr.t(keys::ERROR_PREFIX)),
    }
    Ok(())
}

/// 현재 세션 상태로 렌더러를 돌려 그리기 명령 시퀀스를 출력한다.
/// 실제 차트는 GUI 바이너리가 같은 렌더러로 그린다.
pub fn handle_preview(
    tr: &Translator,
    config: &Config,
    session: &mut Session,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::PREVIEW_HEADING));
    let Some(map_file) = &session.map else {
        println!("{}", tr.t(keys::MAP_NOT_LOADED));
        return Ok(());
    };

    let surge = if config.plot.show_surge_line {
        map_file.surge_line.as_ref()
    } else {
        None
    };
    let scaled = ScaledMap::apply_with_surge(&map_file.table, surge, &session.factors);

    let mut renderer = MapRenderer::new(RecordingSurface::new(), map_file.kind);
    renderer.render_base(&scaled)?;
    if let Some(overlay_data) = &session.overlay {
        renderer.render_overlay(overlay_data)?;
    }
    let title = if map_file.title.is_empty() {
        map_file.kind.label().to_string()
    } else {
        map_file.title.clone()
    };
    renderer.finalize(&title)?;

    println!("{}", tr.t(keys::PREVIEW_COMMANDS));
    for (i, command) in renderer.surface().commands().iter().enumerate() {
        println!("  {:>3}. {}", i + 1, describe_command(command));
    }
    println!("{}", tr.t(keys::PREVIEW_DONE));
    Ok(())
}

fn describe_command(command: &DrawCommand) -> String {
    match command {
        DrawCommand::PolyLine {
            panel,
            points,
            style,
            label,
        } => {
            let kind = match style.kind {
                LineKind::Solid => "solid",
                LineKind::Dashed => "dashed",
            };
            format!(
                "poly_line  panel={panel:?}  points={}  {kind}  label={}",
                points.len(),
                label.as_deref().unwrap_or("-")
            )
        }
        DrawCommand::Marker { panel, point, .. } => {
            format!(
                "marker     panel={panel:?}  at=({:.4}, {:.4})",
                point[0], point[1]
            )
        }
        DrawCommand::Title(title) => format!("title      \"{title}\""),
        DrawCommand::AxisLabels {
            panel,
            x_label,
            y_label,
        } => format!("axis_labels panel={panel:?}  x=\"{x_label}\"  y=\"{y_label}\""),
        DrawCommand::Present => "present".to_string(),
    }
}

/// 설정 메뉴를 처리한다. 언어 변경은 다음 실행부터 적용된다.
pub fn handle_settings(tr: &Translator, config: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!(
        "{} {}",
        tr.t(keys::SETTINGS_CURRENT_LANGUAGE),
        config.language
    );
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    match sel.trim() {
        "" => return Ok(()),
        "1" => config.language = "ko".into(),
        "2" => config.language = "en".into(),
        "3" => config.plot.show_surge_line = !config.plot.show_surge_line,
        "4" => config.plot.show_legend = !config.plot.show_legend,
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            return Ok(());
        }
    }
    println!("{}", tr.t(keys::SETTINGS_SAVED));
    Ok(())
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf)
}

fn read_f64(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let line = read_line(prompt)?;
        match line.trim().parse::<f64>() {
            Ok(value) => return Ok(value),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}
