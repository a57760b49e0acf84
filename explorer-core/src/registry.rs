//! Host application description and model lookup.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::ModelDescriptor;
use crate::error::{ExplorerError, Result};
use crate::fs::FileSystem;

/// REST mount path used when the host does not configure one.
pub const DEFAULT_REST_API_ROOT: &str = "/api";

/// API version advertised when the host does not declare one.
pub const DEFAULT_API_VERSION: &str = "0.0.0";

/// Resolves a model name to its descriptor.
#[cfg_attr(test, mockall::automock)]
pub trait ModelLookup {
    /// Look up a model by registered name.
    fn resolve(&self, name: &str) -> Option<ModelDescriptor>;
}

/// Two-tier lookup: the app-local registry first, then the global model set.
#[derive(Debug, Clone, Copy)]
pub struct ModelRegistry<'a> {
    local: &'a [ModelDescriptor],
    global: &'a [ModelDescriptor],
}

impl<'a> ModelRegistry<'a> {
    /// Build a registry over local and global model sets.
    pub fn new(local: &'a [ModelDescriptor], global: &'a [ModelDescriptor]) -> Self {
        Self { local, global }
    }

    /// Borrow a model without cloning it.
    pub fn find(&self, name: &str) -> Option<&'a ModelDescriptor> {
        self.local
            .iter()
            .find(|model| model.name == name)
            .or_else(|| self.global.iter().find(|model| model.name == name))
    }
}

impl ModelLookup for ModelRegistry<'_> {
    fn resolve(&self, name: &str) -> Option<ModelDescriptor> {
        self.find(name).cloned()
    }
}

/// Metadata the host application exposes to the explorer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostApp {
    /// Application name.
    #[serde(default)]
    pub name: String,
    /// Application version, advertised as `apiVersion`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Path the REST API is mounted under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_api_root: Option<String>,
    /// Models registered on the application.
    #[serde(default)]
    pub models: Vec<ModelDescriptor>,
    /// Models registered globally but not attached to the application.
    #[serde(default)]
    pub global_models: Vec<ModelDescriptor>,
}

impl HostApp {
    /// Parse and validate a host description from JSON.
    pub fn from_json(raw: &str) -> Result<Self> {
        let app: Self = serde_json::from_str(raw)?;
        app.validate()?;
        Ok(app)
    }

    /// Load a host description from a JSON file.
    pub fn load<F: FileSystem>(fs: &F, path: &Path) -> Result<Self> {
        let raw = fs.read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Reject descriptions whose model names are empty or registered twice.
    pub fn validate(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for model in &self.models {
            if model.name.trim().is_empty() {
                return Err(ExplorerError::Other("model name must not be empty".to_string()));
            }
            if !seen.insert(model.name.as_str()) {
                return Err(ExplorerError::Other(format!(
                    "model registered twice: {}",
                    model.name
                )));
            }
        }
        Ok(())
    }

    /// Two-tier lookup over this application's models.
    pub fn registry(&self) -> ModelRegistry<'_> {
        ModelRegistry::new(&self.models, &self.global_models)
    }

    /// Configured REST mount path, or `/api`.
    pub fn rest_api_root(&self) -> &str {
        self.rest_api_root
            .as_deref()
            .filter(|root| !root.is_empty())
            .unwrap_or(DEFAULT_REST_API_ROOT)
    }

    /// Declared version, or `0.0.0`.
    pub fn api_version(&self) -> &str {
        self.version.as_deref().unwrap_or(DEFAULT_API_VERSION)
    }

    /// App-local models exposed over REST, in registration order.
    pub fn public_models(&self) -> impl Iterator<Item = &ModelDescriptor> {
        self.models.iter().filter(|model| model.public)
    }

    /// Find a public model by resource path, with or without a leading slash.
    pub fn find_by_path(&self, model_path: &str) -> Option<&ModelDescriptor> {
        let wanted = format!("/{}", model_path.trim_matches('/'));
        self.public_models()
            .find(|model| model.resource_path() == wanted)
    }
}
