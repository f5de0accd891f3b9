#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.
//! 유량 축을 공유하는 두 개의 egui_plot 패널에 맵과 오버레이를 그린다.

use eframe::{egui, App, Frame};
use egui_plot::{
    Legend, Line, LineStyle as EguiLineStyle, MarkerShape as EguiMarkerShape, Plot, PlotPoints,
    Points,
};
use image::GenericImageView;
use rfd::FileDialog;
use std::{env, fs, path::Path, path::PathBuf};
use turbo_map_toolbox::{
    config,
    i18n::{self, keys},
    map::{self, MapFile, ScaleFactors, ScaledMap},
    overlay::{self, OverlayData},
    render::{
        Color, CurveStyle, DrawSurface, LineKind, MapRenderer, MarkerShape, MarkerStyle, PanelId,
        RenderError,
    },
};

fn main() -> Result<(), eframe::Error> {
    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/ko/en)
    let mut cli_lang: Option<String> = None;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        if let Some(value) = arg.strip_prefix("--lang=") {
            cli_lang = Some(value.to_string());
        } else if arg == "--lang" || arg == "-L" {
            cli_lang = args.next();
        }
    }

    let mut viewport = egui::ViewportBuilder::default().with_inner_size([1180.0, 860.0]);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let mut app_cfg = config::load_or_default().unwrap_or_default();
    if let Some(lang_cli) = cli_lang {
        app_cfg.language = i18n::resolve_language(Some(&lang_cli), Some(app_cfg.language.as_str()));
    }

    eframe::run_native(
        "Turbo Map Toolbox",
        native_options,
        Box::new(move |_cc| Box::new(GuiApp::new(app_cfg.clone()))),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (width, height) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width,
        height,
    })
}

/// 한 패널에 쌓인 그리기 프리미티브.
#[derive(Default)]
struct PanelData {
    lines: Vec<(Vec<[f64; 2]>, CurveStyle, Option<String>)>,
    markers: Vec<([f64; 2], MarkerStyle)>,
    x_label: String,
    y_label: String,
}

/// egui_plot으로 변환되는 그리기 표면. 프레임마다 새로 만들어 채운다.
#[derive(Default)]
struct PlotSurface {
    efficiency: PanelData,
    pressure_ratio: PanelData,
    title: String,
}

impl PlotSurface {
    fn panel(&self, panel: PanelId) -> &PanelData {
        match panel {
            PanelId::Efficiency => &self.efficiency,
            PanelId::PressureRatio => &self.pressure_ratio,
        }
    }

    fn panel_mut(&mut self, panel: PanelId) -> &mut PanelData {
        match panel {
            PanelId::Efficiency => &mut self.efficiency,
            PanelId::PressureRatio => &mut self.pressure_ratio,
        }
    }
}

impl DrawSurface for PlotSurface {
    fn poly_line(
        &mut self,
        panel: PanelId,
        points: &[[f64; 2]],
        style: &CurveStyle,
        label: Option<&str>,
    ) {
        self.panel_mut(panel)
            .lines
            .push((points.to_vec(), *style, label.map(str::to_string)));
    }

    fn marker(&mut self, panel: PanelId, point: [f64; 2], style: &MarkerStyle) {
        self.panel_mut(panel).markers.push((point, *style));
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn set_axis_labels(&mut self, panel: PanelId, x_label: &str, y_label: &str) {
        let data = self.panel_mut(panel);
        data.x_label = x_label.to_string();
        data.y_label = y_label.to_string();
    }

    fn present(&mut self) {
        // 즉시 모드 GUI에서는 패널 그리기 자체가 표시다.
    }

    fn clear(&mut self) {
        *self = PlotSurface::default();
    }
}

fn to_color32(color: Color) -> egui::Color32 {
    egui::Color32::from_rgb(color.r, color.g, color.b)
}

/// 현재 세션 상태로 렌더러를 돌려 표시용 표면을 만든다.
fn build_plot_surface(
    map_file: &MapFile,
    factors: &ScaleFactors,
    cfg: &config::Config,
    overlay_data: Option<&OverlayData>,
    show_design_point: bool,
    show_operating_line: bool,
) -> Result<PlotSurface, RenderError> {
    let surge = if cfg.plot.show_surge_line {
        map_file.surge_line.as_ref()
    } else {
        None
    };
    let scaled = ScaledMap::apply_with_surge(&map_file.table, surge, factors);

    let mut renderer = MapRenderer::new(PlotSurface::default(), map_file.kind);
    renderer.render_base(&scaled)?;
    if let Some(data) = overlay_data {
        if show_design_point {
            if let Some(point) = &data.design_point {
                renderer.render_design_point(point)?;
            }
        }
        if show_operating_line {
            if let Some(curve) = &data.operating_curve {
                renderer.render_operating_curve(curve)?;
            }
        }
    }
    let title = if map_file.title.is_empty() {
        map_file.kind.label().to_string()
    } else {
        map_file.title.clone()
    };
    renderer.finalize(&title)?;
    Ok(renderer.into_surface())
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    map_file: Option<MapFile>,
    map_path: Option<PathBuf>,
    overlay_data: Option<OverlayData>,
    perf_path: Option<PathBuf>,
    // 스케일 팩터 입력 필드와 실제 적용된 팩터.
    // 적용 팩터는 항상 명시적 identity에서 출발한다.
    sf_wc: String,
    sf_pr: String,
    sf_eta: String,
    sf_nc: String,
    factors: ScaleFactors,
    show_design_point: bool,
    show_operating_line: bool,
    last_error: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let lang = i18n::resolve_language(None, Some(config.language.as_str()));
        let mut app = Self {
            tr: i18n::Translator::new(&lang),
            config,
            map_file: None,
            map_path: None,
            overlay_data: None,
            perf_path: None,
            sf_wc: "1.0".into(),
            sf_pr: "1.0".into(),
            sf_eta: "1.0".into(),
            sf_nc: "1.0".into(),
            factors: ScaleFactors::identity(),
            show_design_point: true,
            show_operating_line: true,
            last_error: None,
        };
        // 지난 세션의 파일을 다시 연다. 실패하면 조용히 비워 둔다.
        if let Some(path) = app.config.last_map_path.clone() {
            if let Ok(map_file) = map::read_map_file(Path::new(&path)) {
                app.map_file = Some(map_file);
                app.map_path = Some(path.into());
            }
        }
        if let Some(path) = app.config.last_performance_path.clone() {
            if let Ok(data) = overlay::load_performance_csv(Path::new(&path)) {
                app.overlay_data = Some(data);
                app.perf_path = Some(path.into());
            }
        }
        app
    }

    /// 입력 필드의 네 값을 검증해 팩터로 만든다. 실패 메시지는 그대로 표시된다.
    fn parse_factors(&self) -> Result<ScaleFactors, String> {
        let parse = |text: &str, name: &str| {
            text.trim()
                .parse::<f64>()
                .map_err(|_| format!("{name}: {}", self.tr.t(keys::ERROR_INVALID_NUMBER)))
        };
        let wc = parse(&self.sf_wc, "Wc")?;
        let pr = parse(&self.sf_pr, "PR")?;
        let eta = parse(&self.sf_eta, "Eta")?;
        let nc = parse(&self.sf_nc, "Nc")?;
        ScaleFactors::new(wc, pr, eta, nc).map_err(|e| e.to_string())
    }

    fn open_map_dialog(&mut self) {
        let Some(path) = FileDialog::new()
            .add_filter("Map file", &["map", "txt"])
            .pick_file()
        else {
            return;
        };
        match map::read_map_file(&path) {
            Ok(map_file) => {
                self.config.last_map_path = Some(path.display().to_string());
                let _ = self.config.save();
                self.map_file = Some(map_file);
                self.map_path = Some(path);
                self.last_error = None;
            }
            Err(e) => self.last_error = Some(e.to_string()),
        }
    }

    fn open_perf_dialog(&mut self) {
        let Some(path) = FileDialog::new()
            .add_filter("CSV", &["csv"])
            .pick_file()
        else {
            return;
        };
        match overlay::load_performance_csv(&path) {
            Ok(data) => {
                self.config.last_performance_path = Some(path.display().to_string());
                let _ = self.config.save();
                self.overlay_data = Some(data);
                self.perf_path = Some(path);
                self.last_error = None;
            }
            Err(e) => self.last_error = Some(e.to_string()),
        }
    }

    fn controls_ui(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button(self.tr.t(keys::GUI_OPEN_MAP)).clicked() {
                self.open_map_dialog();
            }
            if let Some(path) = &self.map_path {
                ui.label(path.display().to_string());
            }
            ui.separator();
            if ui.button(self.tr.t(keys::GUI_OPEN_PERF)).clicked() {
                self.open_perf_dialog();
            }
            if let Some(path) = &self.perf_path {
                ui.label(path.display().to_string());
            }
        });

        ui.horizontal(|ui| {
            ui.label("SF Wc");
            ui.add(egui::TextEdit::singleline(&mut self.sf_wc).desired_width(70.0));
            ui.label("SF PR");
            ui.add(egui::TextEdit::singleline(&mut self.sf_pr).desired_width(70.0));
            ui.label("SF Eta");
            ui.add(egui::TextEdit::singleline(&mut self.sf_eta).desired_width(70.0));
            ui.label("SF Nc");
            ui.add(egui::TextEdit::singleline(&mut self.sf_nc).desired_width(70.0));
            if ui.button(self.tr.t(keys::GUI_APPLY)).clicked() {
                match self.parse_factors() {
                    Ok(factors) => {
                        self.factors = factors;
                        self.last_error = None;
                    }
                    Err(message) => self.last_error = Some(message),
                }
            }
            if ui.button(self.tr.t(keys::GUI_IDENTITY)).clicked() {
                self.factors = ScaleFactors::identity();
                self.sf_wc = "1.0".into();
                self.sf_pr = "1.0".into();
                self.sf_eta = "1.0".into();
                self.sf_nc = "1.0".into();
                self.last_error = None;
            }
        });

        ui.horizontal(|ui| {
            ui.checkbox(
                &mut self.show_design_point,
                self.tr.t(keys::GUI_SHOW_DESIGN_POINT),
            );
            ui.checkbox(
                &mut self.show_operating_line,
                self.tr.t(keys::GUI_SHOW_OPERATING_LINE),
            );
            let mut plot_changed = false;
            plot_changed |= ui
                .checkbox(
                    &mut self.config.plot.show_surge_line,
                    self.tr.t(keys::GUI_SHOW_SURGE),
                )
                .changed();
            plot_changed |= ui
                .checkbox(
                    &mut self.config.plot.show_legend,
                    self.tr.t(keys::GUI_SHOW_LEGEND),
                )
                .changed();
            ui.separator();
            ui.label(self.tr.t(keys::GUI_LANGUAGE));
            let mut lang_changed = false;
            lang_changed |= ui
                .selectable_value(&mut self.config.language, "ko".to_string(), "한국어")
                .clicked();
            lang_changed |= ui
                .selectable_value(&mut self.config.language, "en".to_string(), "English")
                .clicked();
            if lang_changed {
                self.tr = i18n::Translator::new(&self.config.language);
            }
            if plot_changed || lang_changed {
                let _ = self.config.save();
            }
        });

        if let Some(message) = &self.last_error {
            ui.colored_label(egui::Color32::from_rgb(200, 60, 60), message);
        }
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.add_space(4.0);
            self.controls_ui(ui);
            ui.add_space(4.0);
        });

        let mut surface: Option<PlotSurface> = None;
        if let Some(map_file) = &self.map_file {
            match build_plot_surface(
                map_file,
                &self.factors,
                &self.config,
                self.overlay_data.as_ref(),
                self.show_design_point,
                self.show_operating_line,
            ) {
                Ok(built) => surface = Some(built),
                Err(e) => self.last_error = Some(e.to_string()),
            }
        }

        let show_legend = self.config.plot.show_legend;
        egui::CentralPanel::default().show(ctx, |ui| {
            let Some(surface) = surface else {
                ui.centered_and_justified(|ui| {
                    ui.label(self.tr.t(keys::GUI_NO_MAP));
                });
                return;
            };
            ui.heading(surface.title.as_str());
            let panel_height = (ui.available_height() - 8.0) / 2.0;
            let link_group = egui::Id::new("shared_flow_axis");
            panel_plot(
                ui,
                "panel_efficiency",
                surface.panel(PanelId::Efficiency),
                link_group,
                show_legend,
                panel_height,
            );
            panel_plot(
                ui,
                "panel_pressure_ratio",
                surface.panel(PanelId::PressureRatio),
                link_group,
                show_legend,
                panel_height,
            );
        });
    }
}

/// 패널 하나를 egui_plot으로 그린다. 두 패널은 x(유량) 축이 연동된다.
fn panel_plot(
    ui: &mut egui::Ui,
    id_source: &str,
    panel: &PanelData,
    link_group: egui::Id,
    show_legend: bool,
    height: f32,
) {
    let mut plot = Plot::new(id_source.to_owned())
        .height(height)
        .link_axis(link_group, true, false)
        .link_cursor(link_group, true, false)
        .x_axis_label(panel.x_label.clone())
        .y_axis_label(panel.y_label.clone());
    if show_legend {
        plot = plot.legend(Legend::default());
    }
    plot.show(ui, |plot_ui| {
        for (points, style, label) in &panel.lines {
            let mut line = Line::new(PlotPoints::from(points.clone()))
                .color(to_color32(style.color))
                .width(style.width);
            if style.kind == LineKind::Dashed {
                line = line.style(EguiLineStyle::dashed_loose());
            }
            if let Some(label) = label {
                line = line.name(label);
            }
            plot_ui.line(line);
        }
        for (point, style) in &panel.markers {
            let shape = match style.shape {
                MarkerShape::Square => EguiMarkerShape::Square,
                MarkerShape::Circle => EguiMarkerShape::Circle,
            };
            plot_ui.points(
                Points::new(PlotPoints::from(vec![*point]))
                    .shape(shape)
                    .radius(style.size * 0.7)
                    .color(to_color32(style.fill))
                    .filled(true)
                    .name("Design point"),
            );
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use turbo_map_toolbox::map::{MapKind, SpeedLine, SpeedLineTable};

    fn sample_map_file() -> MapFile {
        let table = SpeedLineTable::new(vec![
            SpeedLine {
                nc: 8000.0,
                wc: vec![10.0, 20.0, 30.0],
                pr: vec![1.5, 1.8, 2.0],
                eta: vec![0.70, 0.80, 0.75],
            },
            SpeedLine {
                nc: 16000.0,
                wc: vec![12.0, 24.0, 36.0],
                pr: vec![1.6, 2.0, 2.3],
                eta: vec![0.72, 0.82, 0.76],
            },
        ])
        .expect("valid table");
        MapFile {
            kind: MapKind::Compressor,
            title: "demo".into(),
            table,
            surge_line: None,
        }
    }

    #[test]
    fn new_app_starts_with_identity_factors() {
        let app = GuiApp::new(config::Config::default());
        assert!(app.factors.is_identity());
        assert_eq!(app.sf_wc, "1.0");
    }

    #[test]
    fn parse_factors_accepts_valid_input() {
        let mut app = GuiApp::new(config::Config::default());
        app.sf_wc = "1.1".into();
        app.sf_pr = "1.05".into();
        app.sf_eta = "0.95".into();
        app.sf_nc = "1.0".into();
        let factors = app.parse_factors().expect("valid factors");
        assert!((factors.wc() - 1.1).abs() < 1e-12);
        assert!(!factors.is_identity());
    }

    #[test]
    fn parse_factors_rejects_garbage_and_zero() {
        let mut app = GuiApp::new(config::Config::default());
        app.sf_wc = "abc".into();
        assert!(app.parse_factors().is_err());
        app.sf_wc = "0".into();
        assert!(app.parse_factors().is_err());
    }

    #[test]
    fn unscaled_render_is_labeled_unscaled() {
        let map_file = sample_map_file();
        let cfg = config::Config::default();
        let surface = build_plot_surface(
            &map_file,
            &ScaleFactors::identity(),
            &cfg,
            None,
            true,
            true,
        )
        .expect("render");
        assert_eq!(surface.title, "demo (unscaled map)");
    }

    #[test]
    fn scaled_render_is_labeled_scaled() {
        let map_file = sample_map_file();
        let cfg = config::Config::default();
        let factors = ScaleFactors::new(1.1, 1.05, 0.95, 1.0).expect("valid");
        let surface =
            build_plot_surface(&map_file, &factors, &cfg, None, true, true).expect("render");
        assert_eq!(surface.title, "demo (scaled to DP)");
        // 속도선마다 패널 하나당 곡선 하나씩
        assert_eq!(surface.panel(PanelId::Efficiency).lines.len(), 2);
        assert_eq!(surface.panel(PanelId::PressureRatio).lines.len(), 2);
    }
}
