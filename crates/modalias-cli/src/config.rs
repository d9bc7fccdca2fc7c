//! Alias config discovery and settings resolution.
//!
//! Alias options come from the first of:
//! 1. the file passed with `--config` (`.json`, `.toml`, or a `package.json`)
//! 2. `modalias.toml` in the current directory
//! 3. the `modalias` field of `package.json` in the current directory
//!
//! Settings are layered with figment: defaults, then `TARGET_PLATFORM` and
//! `MODALIAS_*` from the environment, then command-line flags.

use std::fs;
use std::path::{Path, PathBuf};

use figment::providers::Serialized;
use modalias::{AliasOptions, Settings};
use serde_json::Value;

use crate::cli::ResolutionArgs;
use crate::error::ConfigError;

pub const CONFIG_FILE: &str = "modalias.toml";
pub const PACKAGE_JSON: &str = "package.json";
pub const PACKAGE_FIELD: &str = "modalias";

/// Searches a directory for alias config.
#[derive(Debug, Clone)]
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// First conventional config location that exists.
    pub fn find(&self) -> Option<PathBuf> {
        let toml_path = self.root.join(CONFIG_FILE);
        if toml_path.is_file() {
            return Some(toml_path);
        }

        let pkg_path = self.root.join(PACKAGE_JSON);
        let has_field = fs::read_to_string(&pkg_path)
            .ok()
            .and_then(|content| serde_json::from_str::<Value>(&content).ok())
            .is_some_and(|pkg| pkg.get(PACKAGE_FIELD).is_some_and(|v| !v.is_null()));
        has_field.then_some(pkg_path)
    }

    /// Load options from `explicit` when given, otherwise from the first
    /// discovered location.
    pub fn load(&self, explicit: Option<&Path>) -> Result<AliasOptions, ConfigError> {
        let path = match explicit {
            Some(path) if !path.is_file() => return Err(ConfigError::MissingFile(path.to_path_buf())),
            Some(path) => path.to_path_buf(),
            None => self.find().ok_or_else(|| ConfigError::NotFound {
                searched: format!(
                    "{}, {} (\"{PACKAGE_FIELD}\" field)",
                    self.root.join(CONFIG_FILE).display(),
                    self.root.join(PACKAGE_JSON).display()
                ),
            })?,
        };

        tracing::debug!(config = %path.display(), "loading alias config");
        let value = read_value(&path)?;
        AliasOptions::from_value(value).map_err(ConfigError::InvalidOptions)
    }
}

fn read_value(path: &Path) -> Result<Value, ConfigError> {
    let content = fs::read_to_string(path)?;
    let parse_error = |message: String| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    };

    if path.file_name().is_some_and(|name| name == PACKAGE_JSON) {
        let pkg: Value = serde_json::from_str(&content).map_err(|e| parse_error(e.to_string()))?;
        return match pkg.get(PACKAGE_FIELD) {
            Some(field) if !field.is_null() => Ok(field.clone()),
            _ => Err(parse_error(format!("no \"{PACKAGE_FIELD}\" field"))),
        };
    }

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str(&content).map_err(|e| parse_error(e.to_string())),
        Some("toml") => {
            let table: toml::Value = toml::from_str(&content).map_err(|e| parse_error(e.to_string()))?;
            serde_json::to_value(table).map_err(|e| parse_error(e.to_string()))
        }
        _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Environment settings with command-line overrides on top.
///
/// Boolean flags only ever switch a setting on; leaving a flag off keeps
/// whatever the environment says.
pub fn load_settings(args: &ResolutionArgs) -> Result<Settings, ConfigError> {
    let mut figment = Settings::figment();
    if let Some(platform) = args.platform {
        figment = figment.merge(Serialized::default("platform", platform));
    }
    if args.force_relative {
        figment = figment.merge(Serialized::default("force_relative", true));
    }
    if args.auto_detect {
        figment = figment.merge(Serialized::default("auto_detect", true));
    }

    figment
        .extract()
        .map_err(|e| ConfigError::Settings(modalias::Error::Settings(e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use modalias::{AliasMapping, Platform};
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_finds_modalias_toml_first() {
        Jail::expect_with(|jail| {
            jail.create_file(
                CONFIG_FILE,
                r#"
                root = "./"
                react = true

                [[map]]
                expose = "utils"
                src = "./src/utils"
                "#,
            )?;
            jail.create_file(PACKAGE_JSON, r#"{ "modalias": [{ "expose": "other", "src": "./o" }] }"#)?;

            let discovery = ConfigDiscovery::new(jail.directory());
            assert_eq!(discovery.find(), Some(jail.directory().join(CONFIG_FILE)));

            let options = discovery.load(None).expect("options");
            assert_eq!(options.root.as_deref(), Some("./"));
            assert!(options.react);
            assert_eq!(options.map, vec![AliasMapping::new("utils", "./src/utils")]);
            Ok(())
        });
    }

    #[test]
    #[serial]
    fn test_falls_back_to_package_json_field() {
        Jail::expect_with(|jail| {
            jail.create_file(
                PACKAGE_JSON,
                r#"{ "name": "app", "modalias": { "expose": "utils", "src": "./src/utils" } }"#,
            )?;

            let options = ConfigDiscovery::new(jail.directory()).load(None).expect("options");
            assert_eq!(options.map, vec![AliasMapping::new("utils", "./src/utils")]);
            Ok(())
        });
    }

    #[test]
    #[serial]
    fn test_package_json_without_field_is_not_config() {
        Jail::expect_with(|jail| {
            jail.create_file(PACKAGE_JSON, r#"{ "name": "app", "modalias": null }"#)?;

            let err = ConfigDiscovery::new(jail.directory()).load(None).unwrap_err();
            match err {
                ConfigError::NotFound { searched } => {
                    assert!(searched.contains(CONFIG_FILE));
                    assert!(searched.contains(PACKAGE_JSON));
                }
                other => panic!("unexpected error: {other}"),
            }
            Ok(())
        });
    }

    #[test]
    #[serial]
    fn test_explicit_json_config() {
        Jail::expect_with(|jail| {
            jail.create_file("aliases.json", r#"[{ "expose": "abstract", "src": "npm:concrete" }]"#)?;

            let options = ConfigDiscovery::new(jail.directory())
                .load(Some(Path::new("aliases.json")))
                .expect("options");
            assert_eq!(options.map, vec![AliasMapping::new("abstract", "npm:concrete")]);
            Ok(())
        });
    }

    #[test]
    #[serial]
    fn test_explicit_config_errors() {
        Jail::expect_with(|jail| {
            jail.create_file("aliases.yaml", "map: []")?;
            jail.create_file("scalar.json", r#""utils""#)?;
            let discovery = ConfigDiscovery::new(jail.directory());

            assert!(matches!(
                discovery.load(Some(Path::new("missing.json"))),
                Err(ConfigError::MissingFile(_))
            ));
            assert!(matches!(
                discovery.load(Some(Path::new("aliases.yaml"))),
                Err(ConfigError::UnsupportedFormat(_))
            ));
            assert!(matches!(
                discovery.load(Some(Path::new("scalar.json"))),
                Err(ConfigError::InvalidOptions(_))
            ));
            Ok(())
        });
    }

    #[test]
    #[serial]
    fn test_flags_override_environment() {
        Jail::expect_with(|jail| {
            jail.set_env("TARGET_PLATFORM", "android");
            jail.set_env("MODALIAS_AUTO_DETECT", "true");

            let from_env = load_settings(&ResolutionArgs::default()).expect("settings");
            assert_eq!(from_env.platform, Platform::Android);
            assert!(from_env.auto_detect);
            assert!(!from_env.force_relative);

            let args = ResolutionArgs {
                platform: Some(Platform::Desktop),
                force_relative: true,
                ..ResolutionArgs::default()
            };
            let overridden = load_settings(&args).expect("settings");
            assert_eq!(overridden.platform, Platform::Desktop);
            assert!(overridden.force_relative);
            assert!(overridden.auto_detect);
            Ok(())
        });
    }
}
