//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`PANO_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use std::path::Path;

use panoview_core::PanoramaType;
use panoview_input::ControlMethod;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Viewer configuration
    #[serde(default)]
    pub viewer: ViewerConfig,
    /// Device motion configuration
    #[serde(default)]
    pub motion: MotionConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`PANO_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        // Load default config (required)
        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // PANO_VIEWER__START_ANGLE=90 -> viewer.start_angle = 90
        figment = figment.merge(Env::prefixed("PANO_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Viewport width in pixels
    pub width: u32,
    /// Viewport height in pixels
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Panoview - Panorama Viewer".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Viewer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Input sources driving the camera (touch, motion, both)
    pub control_method: ControlMethod,
    /// Panorama projection (spherical, cylindrical)
    pub panorama_type: PanoramaType,
    /// Pan speed scaling [horizontal, vertical]
    pub pan_speed: [f32; 2],
    /// Starting yaw in degrees
    pub start_angle: f32,
    /// Minimum vertical field of view in degrees (exclusive zoom-in bound)
    pub min_fov: f32,
    /// Maximum vertical field of view in degrees
    pub max_fov: f32,
    /// Fixed yaw offset applied after motion updates, in degrees
    pub angle_offset: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            control_method: ControlMethod::Touch,
            panorama_type: PanoramaType::Spherical,
            pan_speed: [0.4, 0.4],
            start_angle: 0.0,
            min_fov: 40.0,
            max_fov: 100.0,
            angle_offset: 0.0,
        }
    }
}

/// Device motion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionConfig {
    /// Sampling interval in milliseconds
    pub interval_ms: u64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self { interval_ms: 15 }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
    /// Log every dispatched rotation key
    pub log_rotation_keys: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_rotation_keys: false,
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
