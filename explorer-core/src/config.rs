//! Explorer configuration.
//!
//! Configuration is read once when the documentation endpoints are mounted and
//! never changes afterwards. Every field has a documented default so an empty
//! environment yields a working setup.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::fs::{FileSystem, read_json};

/// Mount root of the documentation endpoints when none is configured.
pub const DEFAULT_EXPLORER_ROOT: &str = "/explorer";

/// Overrides supplied when the documentation endpoints are mounted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MountOptions {
    /// Absolute path (or URL) advertised as `basePath`, bypassing `restApiRoot`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    /// Scheme forced onto the advertised `basePath`, e.g. behind a TLS proxy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

/// Which origins may read documentation responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawOrigin", into = "RawOrigin")]
pub enum CorsOrigin {
    /// Reflect the requesting origin.
    #[default]
    Reflect,
    /// Only the listed origins.
    List(Vec<String>),
    /// No cross-origin headers at all.
    Disabled,
}

impl CorsOrigin {
    /// Parse the environment form: `false`, `true`, `*` or a comma-separated list.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_lowercase().as_str() {
            "false" | "off" | "none" => Self::Disabled,
            "" | "true" | "*" => Self::Reflect,
            _ => Self::from_origins(trimmed.split(',').map(String::from)),
        }
    }

    /// Allow-list of origins. A `*` entry admits every origin, so the whole
    /// list collapses to [`CorsOrigin::Reflect`].
    pub fn from_origins<I>(origins: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut listed = Vec::new();
        for origin in origins {
            let origin = origin.trim();
            if origin == "*" {
                return Self::Reflect;
            }
            if !origin.is_empty() {
                listed.push(origin.to_string());
            }
        }
        Self::List(listed)
    }

    /// Whether any origin receives `Access-Control-Allow-Origin`.
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disabled)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawOrigin {
    Flag(bool),
    One(String),
    Many(Vec<String>),
}

impl From<RawOrigin> for CorsOrigin {
    fn from(value: RawOrigin) -> Self {
        match value {
            RawOrigin::Flag(true) => Self::Reflect,
            RawOrigin::Flag(false) => Self::Disabled,
            RawOrigin::One(origin) => Self::parse(&origin),
            RawOrigin::Many(origins) => Self::from_origins(origins),
        }
    }
}

impl From<CorsOrigin> for RawOrigin {
    fn from(value: CorsOrigin) -> Self {
        match value {
            CorsOrigin::Reflect => Self::Flag(true),
            CorsOrigin::Disabled => Self::Flag(false),
            CorsOrigin::List(origins) => Self::Many(origins),
        }
    }
}

/// Cross-origin policy for the documentation endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorsConfig {
    /// Allowed origins.
    #[serde(default)]
    pub origin: CorsOrigin,
    /// Whether `Access-Control-Allow-Credentials` is sent.
    #[serde(default)]
    pub credentials: bool,
}

impl CorsConfig {
    /// A policy that emits no cross-origin headers.
    pub fn disabled() -> Self {
        Self {
            origin: CorsOrigin::Disabled,
            credentials: false,
        }
    }
}

/// Configuration of the documentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExplorerConfig {
    /// Overrides the host's own `restApiRoot`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rest_api_root: Option<String>,
    /// Mount root of the documentation endpoints.
    pub explorer_root: String,
    /// Mount-time `basePath`/`protocol` overrides.
    #[serde(flatten)]
    pub mount: MountOptions,
    /// Cross-origin policy.
    pub cors: CorsConfig,
    /// Title advertised in the resource listing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Description advertised in the resource listing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            rest_api_root: None,
            explorer_root: DEFAULT_EXPLORER_ROOT.to_string(),
            mount: MountOptions::default(),
            cors: CorsConfig::default(),
            title: None,
            description: None,
        }
    }
}

impl ExplorerConfig {
    /// Build configuration from `EXPLORER_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| var(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();
        Self {
            rest_api_root: non_empty("EXPLORER_REST_API_ROOT"),
            explorer_root: non_empty("EXPLORER_ROOT").unwrap_or(defaults.explorer_root),
            mount: MountOptions {
                base_path: non_empty("EXPLORER_BASE_PATH"),
                protocol: non_empty("EXPLORER_PROTOCOL"),
            },
            cors: CorsConfig {
                origin: var("EXPLORER_CORS_ORIGIN")
                    .map(|raw| CorsOrigin::parse(&raw))
                    .unwrap_or_default(),
                credentials: var("EXPLORER_CORS_CREDENTIALS")
                    .map(|raw| matches!(raw.trim(), "1" | "true" | "yes"))
                    .unwrap_or(false),
            },
            title: non_empty("EXPLORER_TITLE"),
            description: non_empty("EXPLORER_DESCRIPTION"),
        }
    }

    /// Load configuration from a JSON file.
    pub fn load<F: FileSystem>(fs: &F, path: &Path) -> Result<Self> {
        read_json(fs, path)
    }

    /// Mount root normalized to a leading slash and no trailing slash.
    pub fn mount_root(&self) -> String {
        let trimmed = self.explorer_root.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return String::new();
        }
        if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{trimmed}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = ExplorerConfig::from_vars(vars(&[]));
        assert_eq!(config, ExplorerConfig::default());
        assert_eq!(config.mount_root(), "/explorer");
        assert_eq!(config.cors.origin, CorsOrigin::Reflect);
    }

    #[test]
    fn environment_overrides_apply() {
        let config = ExplorerConfig::from_vars(vars(&[
            ("EXPLORER_ROOT", "erforscher/"),
            ("EXPLORER_BASE_PATH", "/api-root"),
            ("EXPLORER_PROTOCOL", "https"),
            ("EXPLORER_CORS_ORIGIN", "false"),
            ("EXPLORER_TITLE", "Inventory"),
        ]));
        assert_eq!(config.mount_root(), "/erforscher");
        assert_eq!(config.mount.base_path.as_deref(), Some("/api-root"));
        assert_eq!(config.mount.protocol.as_deref(), Some("https"));
        assert!(!config.cors.origin.is_enabled());
        assert_eq!(config.title.as_deref(), Some("Inventory"));
    }

    #[test]
    fn cors_origin_parses_lists() {
        assert_eq!(
            CorsOrigin::parse("http://a.test, http://b.test"),
            CorsOrigin::List(vec!["http://a.test".to_string(), "http://b.test".to_string()])
        );
        assert_eq!(CorsOrigin::parse("*"), CorsOrigin::Reflect);
        assert_eq!(CorsOrigin::parse("FALSE"), CorsOrigin::Disabled);
    }

    #[test]
    fn wildcard_in_origin_list_reflects() {
        assert_eq!(CorsOrigin::parse("http://a.test, *"), CorsOrigin::Reflect);

        let cors: CorsConfig =
            serde_json::from_str(r#"{"origin":["http://a.test","*"]}"#).expect("parse cors");
        assert_eq!(cors.origin, CorsOrigin::Reflect);

        let config: ExplorerConfig =
            serde_json::from_str(r#"{"cors":{"origin":["*"]}}"#).expect("parse config");
        assert_eq!(config.cors.origin, CorsOrigin::Reflect);
    }

    #[test]
    fn config_deserializes_json_shape() {
        let config: ExplorerConfig = serde_json::from_str(
            r#"{"explorerRoot":"/docs","basePath":"/v2","cors":{"origin":false}}"#,
        )
        .expect("parse config");
        assert_eq!(config.explorer_root, "/docs");
        assert_eq!(config.mount.base_path.as_deref(), Some("/v2"));
        assert_eq!(config.cors, CorsConfig::disabled());

        let listed: CorsConfig =
            serde_json::from_str(r#"{"origin":["http://a.test"],"credentials":true}"#)
                .expect("parse cors");
        assert_eq!(listed.origin, CorsOrigin::List(vec!["http://a.test".to_string()]));
        assert!(listed.credentials);
    }

    #[test]
    fn load_reads_through_filesystem() {
        let mut fs = MockFileSystem::new();
        fs.expect_read_to_string()
            .returning(|_| Ok(r#"{"restApiRoot":"/custom-api-root"}"#.to_string()));

        let config = ExplorerConfig::load(&fs, Path::new("explorer.json")).expect("load");
        assert_eq!(config.rest_api_root.as_deref(), Some("/custom-api-root"));
        assert_eq!(config.explorer_root, "/explorer");
    }
}
