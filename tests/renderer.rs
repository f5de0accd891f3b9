//! 렌더러 상태 기계와 그리기 순서 회귀 테스트.
use turbo_map_toolbox::map::{MapKind, ScaleFactors, ScaledMap, SpeedLine, SpeedLineTable};
use turbo_map_toolbox::overlay::{DesignPoint, OperatingCurve};
use turbo_map_toolbox::render::{
    DrawCommand, LineKind, MapRenderer, PanelId, RecordingSurface, RenderError,
};

fn three_line_table() -> SpeedLineTable {
    let make = |nc: f64, base: f64| SpeedLine {
        nc,
        wc: vec![base, base + 1.0, base + 2.0],
        pr: vec![1.5, 1.8, 2.0],
        eta: vec![0.70, 0.80, 0.75],
    };
    SpeedLineTable::new(vec![make(8000.0, 10.0), make(16000.0, 12.0), make(16540.0, 14.0)])
        .expect("valid table")
}

fn base_renderer(table: &SpeedLineTable) -> MapRenderer<RecordingSurface> {
    let scaled = ScaledMap::apply(table, &ScaleFactors::identity());
    let mut renderer = MapRenderer::new(RecordingSurface::new(), MapKind::Compressor);
    renderer.render_base(&scaled).expect("first base render");
    renderer
}

fn poly_line_labels(renderer: &MapRenderer<RecordingSurface>, panel: PanelId) -> Vec<String> {
    renderer
        .surface()
        .commands()
        .iter()
        .filter_map(|command| match command {
            DrawCommand::PolyLine {
                panel: p, label, ..
            } if *p == panel => Some(label.clone().unwrap_or_default()),
            _ => None,
        })
        .collect()
}

#[test]
fn base_render_keeps_native_line_order() {
    let table = three_line_table();
    let renderer = base_renderer(&table);
    // 값 기준 정렬이 아니라 테이블 행 순서 그대로여야 한다.
    assert_eq!(
        poly_line_labels(&renderer, PanelId::Efficiency),
        vec!["Nc = 8000.0", "16000.0", "16540.0"]
    );
    assert_eq!(
        poly_line_labels(&renderer, PanelId::PressureRatio),
        vec!["Nc = 8000.0", "16000.0", "16540.0"]
    );
}

#[test]
fn second_base_render_is_rejected() {
    let table = three_line_table();
    let mut renderer = base_renderer(&table);
    let commands_before = renderer.surface().commands().len();
    let scaled = ScaledMap::apply(&table, &ScaleFactors::identity());
    assert!(matches!(
        renderer.render_base(&scaled),
        Err(RenderError::AlreadyRendered)
    ));
    // 거부는 그리기 전에 일어나므로 상태 오염이 없다.
    assert_eq!(renderer.surface().commands().len(), commands_before);
}

#[test]
fn overlay_before_base_is_rejected() {
    let mut renderer = MapRenderer::new(RecordingSurface::new(), MapKind::Compressor);
    let point = DesignPoint {
        wc: 25.0,
        pr: 1.9,
        eta: 0.78,
    };
    assert!(matches!(
        renderer.render_design_point(&point),
        Err(RenderError::BaseNotRendered)
    ));
    assert!(renderer.surface().commands().is_empty());
}

#[test]
fn shape_mismatch_aborts_only_that_overlay_call() {
    let table = three_line_table();
    let mut renderer = base_renderer(&table);
    let commands_before = renderer.surface().commands().len();

    let bad_curve = OperatingCurve {
        wc: vec![20.0, 25.0],
        pr: vec![1.7, 1.9, 2.1],
        eta: vec![0.74, 0.78, 0.76],
    };
    assert!(matches!(
        renderer.render_operating_curve(&bad_curve),
        Err(RenderError::ShapeMismatch(_))
    ));
    assert_eq!(renderer.surface().commands().len(), commands_before);

    // 이미 그려진 베이스는 유효한 채로 남아 다음 오버레이를 받는다.
    let good_curve = OperatingCurve {
        wc: vec![20.0, 25.0, 30.0],
        pr: vec![1.7, 1.9, 2.1],
        eta: vec![0.74, 0.78, 0.76],
    };
    renderer
        .render_operating_curve(&good_curve)
        .expect("valid overlay after failed one");
    assert_eq!(renderer.surface().commands().len(), commands_before + 2);
}

#[test]
fn design_point_adds_one_marker_per_panel() {
    let table = three_line_table();
    let mut renderer = base_renderer(&table);
    let lines_before = renderer.surface().commands().len();
    renderer
        .render_design_point(&DesignPoint {
            wc: 25.0,
            pr: 1.9,
            eta: 0.78,
        })
        .expect("design point renders");

    let markers: Vec<(PanelId, [f64; 2])> = renderer
        .surface()
        .commands()
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Marker { panel, point, .. } => Some((*panel, *point)),
            _ => None,
        })
        .collect();
    assert_eq!(
        markers,
        vec![
            (PanelId::Efficiency, [25.0, 0.78]),
            (PanelId::PressureRatio, [25.0, 1.9]),
        ]
    );
    // 베이스 곡선 명령은 그대로다.
    assert_eq!(renderer.surface().commands().len(), lines_before + 2);
}

#[test]
fn operating_curve_is_visually_distinct_from_base() {
    let table = three_line_table();
    let mut renderer = base_renderer(&table);
    let curve = OperatingCurve {
        wc: vec![20.0, 25.0, 30.0],
        pr: vec![1.7, 1.9, 2.1],
        eta: vec![0.74, 0.78, 0.76],
    };
    renderer.render_operating_curve(&curve).expect("renders");

    let styles: Vec<(LineKind, Option<String>, Vec<[f64; 2]>)> = renderer
        .surface()
        .commands()
        .iter()
        .filter_map(|command| match command {
            DrawCommand::PolyLine {
                points,
                style,
                label,
                ..
            } => Some((style.kind, label.clone(), points.clone())),
            _ => None,
        })
        .collect();
    let base_count = styles
        .iter()
        .filter(|(kind, _, _)| *kind == LineKind::Dashed)
        .count();
    assert_eq!(base_count, 6); // 속도선 3개 × 패널 2개
    let overlay: Vec<_> = styles
        .iter()
        .filter(|(kind, _, _)| *kind == LineKind::Solid)
        .collect();
    assert_eq!(overlay.len(), 2);
    assert_eq!(overlay[0].1.as_deref(), Some("Operating line"));
    // 전달한 순서 그대로 연결 경로가 된다.
    assert_eq!(overlay[0].2, vec![[20.0, 0.74], [25.0, 0.78], [30.0, 0.76]]);
    assert_eq!(overlay[1].2, vec![[20.0, 1.7], [25.0, 1.9], [30.0, 2.1]]);
}

#[test]
fn finalize_encodes_scaled_state_in_title() {
    let table = three_line_table();
    let mut renderer = base_renderer(&table);
    renderer.finalize("compmap").expect("finalize");
    let commands = renderer.surface().commands();
    assert!(commands
        .iter()
        .any(|c| matches!(c, DrawCommand::Title(t) if t == "compmap (unscaled map)")));
    assert!(matches!(commands.last(), Some(DrawCommand::Present)));

    let factors = ScaleFactors::new(1.1, 1.05, 0.95, 1.0).expect("valid");
    let scaled = ScaledMap::apply(&table, &factors);
    let mut renderer = MapRenderer::new(RecordingSurface::new(), MapKind::Compressor);
    renderer.render_base(&scaled).expect("base");
    renderer.finalize("compmap").expect("finalize");
    assert!(renderer
        .surface()
        .commands()
        .iter()
        .any(|c| matches!(c, DrawCommand::Title(t) if t == "compmap (scaled to DP)")));
}

#[test]
fn finalize_emits_axis_labels_for_both_panels() {
    let table = three_line_table();
    let mut renderer = base_renderer(&table);
    renderer.finalize("m").expect("finalize");
    let labels: Vec<(PanelId, String, String)> = renderer
        .surface()
        .commands()
        .iter()
        .filter_map(|command| match command {
            DrawCommand::AxisLabels {
                panel,
                x_label,
                y_label,
            } => Some((*panel, x_label.clone(), y_label.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(labels.len(), 2);
    assert_eq!(labels[0].0, PanelId::Efficiency);
    assert_eq!(labels[0].1, "Corrected mass flow");
    assert_eq!(labels[1].2, "Pressure ratio");
}

#[test]
fn finalized_renderer_rejects_further_mutation() {
    let table = three_line_table();
    let mut renderer = base_renderer(&table);
    renderer.finalize("m").expect("finalize");
    let scaled = ScaledMap::apply(&table, &ScaleFactors::identity());
    assert!(matches!(
        renderer.render_base(&scaled),
        Err(RenderError::Finalized)
    ));
    assert!(matches!(
        renderer.render_design_point(&DesignPoint {
            wc: 1.0,
            pr: 1.0,
            eta: 0.5,
        }),
        Err(RenderError::Finalized)
    ));
    assert!(matches!(renderer.finalize("m"), Err(RenderError::Finalized)));
}

#[test]
fn finalize_without_base_is_rejected() {
    let mut renderer: MapRenderer<RecordingSurface> =
        MapRenderer::new(RecordingSurface::new(), MapKind::Turbine);
    assert!(matches!(
        renderer.finalize("m"),
        Err(RenderError::BaseNotRendered)
    ));
}

#[test]
fn reset_restarts_the_lifecycle() {
    let table = three_line_table();
    let mut renderer = base_renderer(&table);
    renderer.finalize("m").expect("finalize");
    renderer.reset();
    assert!(renderer.surface().commands().is_empty());
    let scaled = ScaledMap::apply(&table, &ScaleFactors::identity());
    renderer
        .render_base(&scaled)
        .expect("base render after reset");
}

#[test]
fn turbine_panel_uses_expansion_ratio_label() {
    let table = three_line_table();
    let scaled = ScaledMap::apply(&table, &ScaleFactors::identity());
    let mut renderer = MapRenderer::new(RecordingSurface::new(), MapKind::Turbine);
    renderer.render_base(&scaled).expect("base");
    renderer.finalize("turbimap").expect("finalize");
    assert!(renderer.surface().commands().iter().any(|c| matches!(
        c,
        DrawCommand::AxisLabels { panel: PanelId::PressureRatio, y_label, .. }
            if y_label == "Expansion ratio"
    )));
}
