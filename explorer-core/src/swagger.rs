//! Swagger 1.2 document shapes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Swagger specification version emitted on every document.
pub const SWAGGER_VERSION: &str = "1.2";

/// Top-level document listing the available resources.
///
/// The 1.2 listing has no `basePath`; each declaration carries its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceListing {
    /// Always `1.2`.
    pub swagger_version: String,
    /// Version of the documented API.
    pub api_version: String,
    /// One entry per exposed model.
    pub apis: Vec<ListingEntry>,
    /// Title and description of the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<ApiInfo>,
}

/// A resource path in the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEntry {
    /// Resource path relative to the listing, e.g. `/products`.
    pub path: String,
    /// Model description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Descriptive metadata for the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiInfo {
    /// API title.
    pub title: String,
    /// API description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// API declaration for a single resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDocument {
    /// Always `1.2`.
    pub swagger_version: String,
    /// Version of the documented API.
    pub api_version: String,
    /// Absolute URL of the REST API.
    pub base_path: String,
    /// Resource path, e.g. `/products`.
    pub resource_path: String,
    /// Operations grouped by path.
    pub apis: Vec<ApiEntry>,
    /// Every model reachable from the resource, keyed by name.
    pub models: BTreeMap<String, ModelSchema>,
    /// Accepted request content types.
    pub consumes: Vec<String>,
    /// Produced response content types.
    pub produces: Vec<String>,
}

/// Operations sharing one path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEntry {
    /// Path relative to `basePath`, `{param}` style.
    pub path: String,
    /// Operations on the path.
    pub operations: Vec<OperationSchema>,
}

/// A single operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationSchema {
    /// Upper-case HTTP method.
    pub method: String,
    /// Method name.
    pub nickname: String,
    /// Return type.
    #[serde(flatten)]
    pub data_type: DataType,
    /// Parameters in declaration order.
    pub parameters: Vec<ParameterSchema>,
    /// Short description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Long description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Documented non-success responses.
    #[serde(default)]
    pub response_messages: Vec<Value>,
}

/// A single operation parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSchema {
    /// `path`, `query`, `body`, `form` or `header`.
    pub param_type: String,
    /// Argument name.
    pub name: String,
    /// Argument type.
    #[serde(flatten)]
    pub data_type: DataType,
    /// Whether the argument is mandatory.
    pub required: bool,
    /// Argument description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A model rendered as a schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSchema {
    /// Registered model name.
    pub id: String,
    /// Model description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Names of required properties.
    pub required: Vec<String>,
    /// Properties keyed by name.
    pub properties: BTreeMap<String, PropertySchema>,
}

/// A model property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySchema {
    /// Property type.
    #[serde(flatten)]
    pub data_type: DataType,
    /// Whether the property was declared required.
    pub required: bool,
    /// Property description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Lower bound, string-encoded as Swagger 1.2 requires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<String>,
    /// Upper bound, string-encoded as Swagger 1.2 requires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<String>,
    /// Default value in its native JSON type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
}

/// `type`/`format`/`items` triple shared by properties, parameters and
/// operation return types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataType {
    /// Primitive name, `array`, `void` or a model name.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Primitive format, e.g. `double`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Element type of an array.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Items>,
}

impl DataType {
    /// A bare type name without format or items.
    pub fn named(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            format: None,
            items: None,
        }
    }
}

/// Array element type: a primitive `type` or a model `$ref`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Items {
    /// Primitive element type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    /// Referenced model name.
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}
