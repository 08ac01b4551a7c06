use std::sync::LazyLock;

use derive_from_env::FromEnv;

use crate::level::Level;

/// Defaults read from `LGR_*` environment variables.
///
/// Level names are resolved permissively: an unknown name means `INFO`.
/// `COLOR` is one of `always`, `never` or `auto` (terminal detection).
#[derive(FromEnv, Debug, Clone)]
#[from_env(prefix = "LGR")]
#[allow(non_snake_case)]
pub struct LgrConfig {
    #[from_env(default = "INFO")]
    pub LOG_THRESHOLD: String,
    #[from_env(default = "MSG")]
    pub OUTPUT_THRESHOLD: String,
    #[from_env(default = "auto")]
    pub COLOR: String,
}

impl Default for LgrConfig {
    fn default() -> Self {
        Self {
            LOG_THRESHOLD: Level::Info.name().into(),
            OUTPUT_THRESHOLD: Level::Msg.name().into(),
            COLOR: "auto".into(),
        }
    }
}

impl LgrConfig {
    pub fn log_threshold(&self) -> Level {
        Level::by_name(&self.LOG_THRESHOLD)
    }

    pub fn output_threshold(&self) -> Level {
        Level::by_name(&self.OUTPUT_THRESHOLD)
    }

    /// `Some(true)` to force colors, `Some(false)` to strip them, `None` to detect.
    pub fn color(&self) -> Option<bool> {
        match self.COLOR.trim().to_ascii_lowercase().as_str() {
            "always" | "true" | "1" => Some(true),
            "never" | "false" | "0" => Some(false),
            _ => None,
        }
    }
}

pub static LGR_CONFIG: LazyLock<LgrConfig> =
    LazyLock::new(|| LgrConfig::from_env().unwrap_or_default());
