use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Default location of the client-side diagram engine script.
pub const DEFAULT_ENGINE_SCRIPT_URL: &str =
    "https://cdn.jsdelivr.net/npm/mermaid@11/dist/mermaid.min.js";

/// How captured diagrams reach the reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Offline: a headless-browser pass bakes each diagram into an SVG
    /// artifact at generation time.
    #[default]
    #[serde(alias = "puppeteer")]
    Static,
    /// The reader's browser renders `<div class="mermaid">` hosts itself.
    Live,
}

/// Corner the controls overlay is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlsPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

impl ControlsPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
        }
    }

    /// CSS offset declarations anchoring the overlay to its corner.
    pub fn css_offsets(self) -> &'static str {
        match self {
            Self::TopLeft => "top:8px;left:8px",
            Self::TopRight => "top:8px;right:8px",
            Self::BottomLeft => "bottom:8px;left:8px",
            Self::BottomRight => "bottom:8px;right:8px",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "top-left" => Some(Self::TopLeft),
            "top-right" => Some(Self::TopRight),
            "bottom-left" => Some(Self::BottomLeft),
            "bottom-right" => Some(Self::BottomRight),
            _ => None,
        }
    }
}

impl Serialize for ControlsPosition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ControlsPosition {
    // An unknown position is a recoverable mistake, not a fatal one: fall
    // back to the documented default and warn.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw).unwrap_or_else(|| {
            tracing::warn!(position = %raw, "unknown controls position, using bottom-right");
            Self::default()
        }))
    }
}

/// Per-button enablement plus overlay placement for the controls box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ControlsConfig {
    pub enable: bool,
    pub zoom_in: bool,
    pub zoom_out: bool,
    pub reset: bool,
    pub download: bool,
    pub fullscreen: bool,
    pub position: ControlsPosition,
    /// Whether the overlay box itself can be repositioned by dragging.
    /// Independent of diagram panning.
    pub draggable: bool,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            enable: true,
            zoom_in: true,
            zoom_out: true,
            reset: true,
            download: true,
            fullscreen: true,
            position: ControlsPosition::default(),
            draggable: true,
        }
    }
}

/// Headless rendering-context size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self {
            width: 2048,
            height: 1024,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub enable: bool,
    pub render_mode: RenderMode,
    /// Visual theme name handed to the external diagram engine.
    pub theme: String,
    pub engine_script_url: String,
    /// Extra launch arguments for the headless browser.
    pub browser_args: Vec<String>,
    pub default_viewport: ViewportSize,
    pub background_color: String,
    pub controls: ControlsConfig,
    /// Whether the diagram body itself can be panned. Independent of
    /// `controls.draggable`.
    pub diagram_draggable: bool,
    /// CSS width of the diagram wrapper; `None` means `100%`.
    pub display_width: Option<String>,
    /// Emit capture/recovery diagnostics and compile console logging into the
    /// generated controller script.
    pub debug: bool,
    /// Also capture ```` ```mermaid ```` fences out of Markdown documents
    /// (transcoded-fence mode) instead of only block-tag input.
    pub markdown_fences: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enable: true,
            render_mode: RenderMode::default(),
            theme: "default".to_string(),
            engine_script_url: DEFAULT_ENGINE_SCRIPT_URL.to_string(),
            browser_args: vec![
                "--disable-setuid-sandbox".to_string(),
                "--no-sandbox".to_string(),
            ],
            default_viewport: ViewportSize::default(),
            background_color: "white".to_string(),
            controls: ControlsConfig::default(),
            diagram_draggable: true,
            display_width: None,
            debug: false,
            markdown_fences: false,
        }
    }
}

impl Config {
    /// Builds a config by deep-merging user-supplied JSON onto the defaults.
    ///
    /// Configuration mistakes are never fatal: a value that does not
    /// deserialize falls back to the full defaults with a warning.
    pub fn from_value(value: &Value) -> Self {
        let mut base = match serde_json::to_value(Self::default()) {
            Ok(v) => v,
            Err(_) => Value::Object(Map::new()),
        };
        deep_merge_value(&mut base, value);
        match serde_json::from_value(base) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(error = %err, "invalid configuration, using defaults");
                Self::default()
            }
        }
    }

    /// Wrapper width for generated markup.
    pub fn display_width(&self) -> &str {
        self.display_width.as_deref().unwrap_or("100%")
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}
