//! Platform variant selection.
//!
//! A module may ship build-target specific implementations next to its
//! default file: `button.js`, `button.mobile.js`, `button.ios.js`,
//! `button.desktop.js`, `button.web.js`. Given the target platform and the
//! listing of the containing directory, [`select_variant`] picks which one an
//! import should point at.
//!
//! The precedence is a fixed fallback chain:
//!
//! | target                           | suffixes tried, in order              |
//! |----------------------------------|---------------------------------------|
//! | `mobile`                         | `mobile`, `desktop`, `web`            |
//! | `ios` / `android` / `windows`    | `mobile`, `<tag>`, `desktop`, `web`   |
//! | `desktop`                        | `desktop`, `web`                      |
//! | `web` (default)                  | `web`                                 |
//!
//! `mobile` always wins over the OS-specific file. When nothing in the chain
//! exists the base name is returned unchanged.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;

/// Extension every variant candidate is checked with.
const VARIANT_EXTENSION: &str = ".js";

/// Build target used to pick file variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Platform {
    Mobile,
    Ios,
    Android,
    Windows,
    Desktop,
    #[default]
    Web,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Ios => "ios",
            Self::Android => "android",
            Self::Windows => "windows",
            Self::Desktop => "desktop",
            Self::Web => "web",
        }
    }

    /// Variant suffixes to try for this platform, most specific first.
    pub fn fallback_chain(self) -> &'static [&'static str] {
        match self {
            Self::Mobile => &["mobile", "desktop", "web"],
            Self::Ios => &["mobile", "ios", "desktop", "web"],
            Self::Android => &["mobile", "android", "desktop", "web"],
            Self::Windows => &["mobile", "windows", "desktop", "web"],
            Self::Desktop => &["desktop", "web"],
            Self::Web => &["web"],
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = Error;

    /// Case-insensitive; an empty tag means the web default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mobile" => Ok(Self::Mobile),
            "ios" => Ok(Self::Ios),
            "android" => Ok(Self::Android),
            "windows" => Ok(Self::Windows),
            "desktop" => Ok(Self::Desktop),
            "web" | "" => Ok(Self::Web),
            _ => Err(Error::InvalidPlatform(s.to_string())),
        }
    }
}

impl Serialize for Platform {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Platform {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Pick the variant of `base` to import for `platform`.
///
/// `listing` holds the lower-cased file names of the directory containing
/// `base`. The returned name has no `.js` extension, e.g. `test.mobile`.
/// A `base` that already ends in `.js` is matched on its stem and returned
/// untouched when no variant applies.
pub fn select_variant(base: &str, listing: &[String], platform: Platform) -> String {
    let stem = base.strip_suffix(VARIANT_EXTENSION).unwrap_or(base);
    let folded = stem.to_lowercase();
    let present = |name: &str| listing.iter().any(|entry| entry == name);

    for suffix in platform.fallback_chain() {
        let candidate = format!("{folded}.{suffix}{VARIANT_EXTENSION}");
        if present(&candidate) {
            tracing::trace!(base, variant = suffix, "platform variant found");
            return format!("{stem}.{suffix}");
        }
    }

    // Either `<stem>.js` exists or nothing does; both leave the name alone.
    base.to_string()
}
