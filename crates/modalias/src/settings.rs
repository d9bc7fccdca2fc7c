//! Process-level switches, resolved once per session.
//!
//! [`Settings`] holds the target platform and the force-relative and
//! auto-detect switches. It is extracted once from the environment and
//! passed to every call.

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::platform::Platform;

/// Environment variable holding the platform tag.
pub const PLATFORM_ENV: &str = "TARGET_PLATFORM";

/// Prefix of the remaining switches (`MODALIAS_FORCE_RELATIVE`, `MODALIAS_AUTO_DETECT`).
pub const ENV_PREFIX: &str = "MODALIAS_";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Which platform variant suffix to prefer.
    #[serde(default)]
    pub platform: Platform,

    /// Ignore configured roots and always emit relative paths.
    #[serde(default)]
    pub force_relative: bool,

    /// Honor the `autoimport:` specifier prefix.
    #[serde(default)]
    pub auto_detect: bool,
}

impl Settings {
    /// Layered sources: defaults, then `TARGET_PLATFORM`, then `MODALIAS_*`.
    pub fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(
                Env::raw()
                    .only(&[PLATFORM_ENV])
                    .map(|_| "platform".into()),
            )
            .merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn from_env() -> Result<Self> {
        Self::figment()
            .extract()
            .map_err(|e| Error::Settings(e.to_string()))
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn with_force_relative(mut self, force_relative: bool) -> Self {
        self.force_relative = force_relative;
        self
    }

    pub fn with_auto_detect(mut self, auto_detect: bool) -> Self {
        self.auto_detect = auto_detect;
        self
    }
}
