use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_LOAD_MAP: &str = "main_menu.load_map";
    pub const MAIN_MENU_SCALE_FACTORS: &str = "main_menu.scale_factors";
    pub const MAIN_MENU_OVERLAY: &str = "main_menu.overlay";
    pub const MAIN_MENU_PREVIEW: &str = "main_menu.preview";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const LOAD_MAP_HEADING: &str = "load_map.heading";
    pub const PROMPT_MAP_PATH: &str = "load_map.prompt_path";
    pub const MAP_SUMMARY_KIND: &str = "load_map.summary_kind";
    pub const MAP_SUMMARY_TITLE: &str = "load_map.summary_title";
    pub const MAP_SUMMARY_LINES: &str = "load_map.summary_lines";
    pub const MAP_SUMMARY_SPEED: &str = "load_map.summary_speed";
    pub const MAP_SUMMARY_SURGE: &str = "load_map.summary_surge";
    pub const MAP_NOT_LOADED: &str = "load_map.not_loaded";

    pub const SCALE_HEADING: &str = "scale.heading";
    pub const SCALE_CURRENT: &str = "scale.current";
    pub const SCALE_OPTIONS: &str = "scale.options";
    pub const SCALE_SET: &str = "scale.set";
    pub const SCALE_MAP_POINT: &str = "scale.map_point";
    pub const SCALE_ENGINE_POINT: &str = "scale.engine_point";
    pub const PROMPT_WC: &str = "prompt.wc";
    pub const PROMPT_PR: &str = "prompt.pr";
    pub const PROMPT_ETA: &str = "prompt.eta";
    pub const PROMPT_NC: &str = "prompt.nc";

    pub const OVERLAY_HEADING: &str = "overlay.heading";
    pub const PROMPT_CSV_PATH: &str = "overlay.prompt_path";
    pub const OVERLAY_DESIGN_POINT: &str = "overlay.design_point";
    pub const OVERLAY_CURVE_POINTS: &str = "overlay.curve_points";

    pub const PREVIEW_HEADING: &str = "preview.heading";
    pub const PREVIEW_COMMANDS: &str = "preview.commands";
    pub const PREVIEW_DONE: &str = "preview.done";

    pub const GUI_OPEN_MAP: &str = "gui.open_map";
    pub const GUI_OPEN_PERF: &str = "gui.open_perf";
    pub const GUI_APPLY: &str = "gui.apply";
    pub const GUI_IDENTITY: &str = "gui.identity";
    pub const GUI_SHOW_DESIGN_POINT: &str = "gui.show_design_point";
    pub const GUI_SHOW_OPERATING_LINE: &str = "gui.show_operating_line";
    pub const GUI_SHOW_SURGE: &str = "gui.show_surge";
    pub const GUI_SHOW_LEGEND: &str = "gui.show_legend";
    pub const GUI_NO_MAP: &str = "gui.no_map";
    pub const GUI_LANGUAGE: &str = "gui.language";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else {
            Language::Ko
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// 번역을 가져온다. 영어 번역이 없으면 한국어 문자열을 폴백한다.
    pub fn t(&self, key: &str) -> &'static str {
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: Option<&str>, config_lang: Option<&str>) -> String {
    cli_arg
        .and_then(normalize_lang)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    for var in ["LANG", "LC_ALL"] {
        if let Ok(value) = std::env::var(var) {
            if let Some(code) = normalize_locale_string(&value) {
                return Some(code);
            }
        }
    }
    None
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== Turbo Map Toolbox ===",
        MAIN_MENU_LOAD_MAP => "1) 맵 파일 로드",
        MAIN_MENU_SCALE_FACTORS => "2) 스케일 팩터 설정",
        MAIN_MENU_OVERLAY => "3) 성능 데이터(CSV) 로드",
        MAIN_MENU_PREVIEW => "4) 렌더 미리보기",
        MAIN_MENU_SETTINGS => "5) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        LOAD_MAP_HEADING => "\n-- 맵 파일 로드 --",
        PROMPT_MAP_PATH => "맵 파일 경로: ",
        MAP_SUMMARY_KIND => "맵 종류:",
        MAP_SUMMARY_TITLE => "타이틀:",
        MAP_SUMMARY_LINES => "속도선:",
        MAP_SUMMARY_SPEED => "Nc 범위:",
        MAP_SUMMARY_SURGE => "서지 라인 점 개수:",
        MAP_NOT_LOADED => "먼저 맵 파일을 로드하세요.",
        SCALE_HEADING => "\n-- 스케일 팩터 --",
        SCALE_CURRENT => "현재 팩터:",
        SCALE_OPTIONS => "1) 직접 입력  2) 설계점 비율로 유도  3) 스케일 해제(모두 1.0)",
        SCALE_SET => "스케일 팩터가 설정되었습니다:",
        SCALE_MAP_POINT => "맵 기준점 입력",
        SCALE_ENGINE_POINT => "엔진 설계점 입력",
        PROMPT_WC => "Wc 값: ",
        PROMPT_PR => "PR 값: ",
        PROMPT_ETA => "Eta 값: ",
        PROMPT_NC => "Nc 값: ",
        OVERLAY_HEADING => "\n-- 성능 데이터 로드 --",
        PROMPT_CSV_PATH => "CSV 파일 경로: ",
        OVERLAY_DESIGN_POINT => "설계점:",
        OVERLAY_CURVE_POINTS => "운전선 점 개수:",
        PREVIEW_HEADING => "\n-- 렌더 미리보기 --",
        PREVIEW_COMMANDS => "발행된 그리기 명령:",
        PREVIEW_DONE => "미리보기 완료. GUI 바이너리에서 실제 차트를 볼 수 있습니다.",
        GUI_OPEN_MAP => "맵 열기…",
        GUI_OPEN_PERF => "성능 CSV 열기…",
        GUI_APPLY => "적용",
        GUI_IDENTITY => "스케일 해제",
        GUI_SHOW_DESIGN_POINT => "설계점 표시",
        GUI_SHOW_OPERATING_LINE => "운전선 표시",
        GUI_SHOW_SURGE => "서지 라인 표시",
        GUI_SHOW_LEGEND => "범례 표시",
        GUI_NO_MAP => "맵 파일을 열면 차트가 표시됩니다.",
        GUI_LANGUAGE => "언어",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_LANGUAGE => "현재 언어:",
        SETTINGS_OPTIONS => "1) 한국어  2) English  3) 서지 라인 토글  4) 범례 토글",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "설정이 저장되었습니다.",
        _ => "(번역 없음)",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting.",
        MAIN_MENU_TITLE => "\n=== Turbo Map Toolbox ===",
        MAIN_MENU_LOAD_MAP => "1) Load map file",
        MAIN_MENU_SCALE_FACTORS => "2) Set scale factors",
        MAIN_MENU_OVERLAY => "3) Load performance data (CSV)",
        MAIN_MENU_PREVIEW => "4) Render preview",
        MAIN_MENU_SETTINGS => "5) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please select again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        LOAD_MAP_HEADING => "\n-- Load map file --",
        PROMPT_MAP_PATH => "Map file path: ",
        MAP_SUMMARY_KIND => "Map kind:",
        MAP_SUMMARY_TITLE => "Title:",
        MAP_SUMMARY_LINES => "Speed lines:",
        MAP_SUMMARY_SPEED => "Nc range:",
        MAP_SUMMARY_SURGE => "Surge line points:",
        MAP_NOT_LOADED => "Load a map file first.",
        SCALE_HEADING => "\n-- Scale factors --",
        SCALE_CURRENT => "Current factors:",
        SCALE_OPTIONS => "1) Enter directly  2) Derive from design point  3) Unscaled (all 1.0)",
        SCALE_SET => "Scale factors set:",
        SCALE_MAP_POINT => "Enter map reference point",
        SCALE_ENGINE_POINT => "Enter engine design point",
        PROMPT_WC => "Wc value: ",
        PROMPT_PR => "PR value: ",
        PROMPT_ETA => "Eta value: ",
        PROMPT_NC => "Nc value: ",
        OVERLAY_HEADING => "\n-- Load performance data --",
        PROMPT_CSV_PATH => "CSV file path: ",
        OVERLAY_DESIGN_POINT => "Design point:",
        OVERLAY_CURVE_POINTS => "Operating line points:",
        PREVIEW_HEADING => "\n-- Render preview --",
        PREVIEW_COMMANDS => "Issued draw commands:",
        PREVIEW_DONE => "Preview done. Use the GUI binary for the actual chart.",
        GUI_OPEN_MAP => "Open map…",
        GUI_OPEN_PERF => "Open performance CSV…",
        GUI_APPLY => "Apply",
        GUI_IDENTITY => "Unscale",
        GUI_SHOW_DESIGN_POINT => "Show design point",
        GUI_SHOW_OPERATING_LINE => "Show operating line",
        GUI_SHOW_SURGE => "Show surge line",
        GUI_SHOW_LEGEND => "Show legend",
        GUI_NO_MAP => "Open a map file to see the chart.",
        GUI_LANGUAGE => "Language",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_LANGUAGE => "Current language:",
        SETTINGS_OPTIONS => "1) Korean  2) English  3) Toggle surge line  4) Toggle legend",
        SETTINGS_PROMPT_CHANGE => "Number to change (Enter to cancel): ",
        SETTINGS_INVALID => "Invalid input, nothing changed.",
        SETTINGS_SAVED => "Settings saved.",
        _ => return None,
    })
}
