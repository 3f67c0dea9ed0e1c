//! Game settings and preferences
//!
//! Read once at startup. Nothing is written back.

use serde::{Deserialize, Serialize};

/// Default text-generation model for the coach remark
pub const DEFAULT_REMARK_MODEL: &str = "gemini-1.5-flash";
/// Default Generative Language API base URL
pub const DEFAULT_REMARK_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Where and how to ask for the coach remark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemarkSettings {
    /// API key; `None` means the remark falls back to a fixed string
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
}

impl Default for RemarkSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_REMARK_MODEL.to_string(),
            endpoint: DEFAULT_REMARK_ENDPOINT.to_string(),
        }
    }
}

impl RemarkSettings {
    /// The API key, if present and not blank
    pub fn key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Visual Effects ===
    /// Reduced motion (no net flex on a make)
    pub reduced_motion: bool,
    /// Draw the dashed line while dragging
    pub show_swipe_indicator: bool,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,

    // === Coach ===
    pub remark: RemarkSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            show_swipe_indicator: true,
            show_fps: false,
            remark: RemarkSettings::default(),
        }
    }
}

impl Settings {
    /// Environment variable prefix for native overrides
    #[cfg(not(target_arch = "wasm32"))]
    const ENV_PREFIX: &'static str = "STREET_HOOPS_";

    /// Environment variable naming a JSON settings file (native)
    #[cfg(not(target_arch = "wasm32"))]
    const FILE_ENV: &'static str = "STREET_HOOPS_SETTINGS";

    /// Parse settings from JSON; missing fields keep defaults
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str(json) {
            Ok(settings) => Some(settings),
            Err(e) => {
                log::warn!("Ignoring invalid settings JSON: {}", e);
                None
            }
        }
    }

    /// Read a JSON settings file; `None` if it is missing or invalid
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_file(path: &std::path::Path) -> Option<Self> {
        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json),
            Err(e) => {
                log::warn!("Could not read settings file {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Apply `(name, value)` pairs as overrides, names without the prefix
    ///
    /// Unknown names are ignored; unparsable booleans keep their current value.
    pub fn apply_overrides<'a, I>(&mut self, vars: I)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (name, value) in vars {
            match name {
                "API_KEY" => self.remark.api_key = Some(value.to_string()),
                "MODEL" => self.remark.model = value.to_string(),
                "ENDPOINT" => self.remark.endpoint = value.trim_end_matches('/').to_string(),
                "REDUCED_MOTION" => set_flag(&mut self.reduced_motion, name, value),
                "SWIPE_INDICATOR" => set_flag(&mut self.show_swipe_indicator, name, value),
                "SHOW_FPS" => set_flag(&mut self.show_fps, name, value),
                _ => {}
            }
        }
    }

    /// Load settings from the build environment (WASM only)
    ///
    /// The API key is baked in at build time, like a bundler env variable.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let mut settings = Self::default();
        if let Some(key) = option_env!("GOOGLE_API_KEY") {
            settings.remark.api_key = Some(key.to_string());
        }
        if settings.remark.key().is_none() {
            log::info!("No coach API key configured");
        }
        settings
    }

    /// Load settings for the native build
    ///
    /// Starts from the `STREET_HOOPS_SETTINGS` JSON file if one is named, then
    /// applies `GOOGLE_API_KEY` and `STREET_HOOPS_*` variables on top.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let mut settings = std::env::var(Self::FILE_ENV)
            .ok()
            .and_then(|path| Self::from_file(std::path::Path::new(&path)))
            .unwrap_or_default();

        if let Ok(key) = std::env::var("GOOGLE_API_KEY") {
            settings.remark.api_key = Some(key);
        }

        let vars: Vec<(String, String)> = std::env::vars()
            .filter_map(|(k, v)| {
                k.strip_prefix(Self::ENV_PREFIX)
                    .map(|name| (name.to_string(), v))
            })
            .collect();
        settings.apply_overrides(vars.iter().map(|(k, v)| (k.as_str(), v.as_str())));

        log::info!(
            "Settings loaded (coach {})",
            if settings.remark.key().is_some() { "enabled" } else { "disabled" }
        );
        settings
    }
}

fn set_flag(flag: &mut bool, name: &str, value: &str) {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => *flag = true,
        "0" | "false" | "no" | "off" => *flag = false,
        _ => log::warn!("Ignoring {}={:?}: not a boolean", name, value),
    }
}
