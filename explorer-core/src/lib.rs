#![deny(missing_docs)]
//! Explorer core library.
//!
//! Turns the model and method metadata of a REST application into Swagger 1.2
//! documents: a resource listing plus one API declaration per model.

pub mod collector;
pub mod config;
pub mod domain;
pub mod error;
pub mod fs;
pub mod media;
pub mod registry;
pub mod render;
pub mod swagger;
pub mod url;

pub use collector::collect_models;
pub use config::{CorsConfig, CorsOrigin, DEFAULT_EXPLORER_ROOT, ExplorerConfig, MountOptions};
pub use domain::{
    HttpBinding, HttpVerb, ModelDescriptor, OperationDescriptor, ParamDescriptor, ParamSource,
    PropertyDescriptor, TypeRef,
};
pub use error::{ExplorerError, Result};
pub use fs::{FileSystem, StdFileSystem};
pub use registry::{DEFAULT_REST_API_ROOT, HostApp, ModelLookup, ModelRegistry};
pub use render::{render_declaration, render_json, render_listing, render_model};
pub use swagger::{ModelSchema, ResourceDocument, ResourceListing};
pub use url::{RequestInfo, first_header_value, resolve_base_url};
