//! Model and method metadata exposed by the host application.
//!
//! These types are the read-only data contract between the host and the
//! documentation layer. The host produces them when it registers its models;
//! the explorer only inspects them.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Type names the host treats as scalars rather than model references.
pub const PRIMITIVE_TYPES: &[&str] = &[
    "string", "number", "integer", "boolean", "date", "any", "object", "array", "buffer",
];

/// Whether `name` is one of the host's scalar type names.
pub fn is_primitive(name: &str) -> bool {
    PRIMITIVE_TYPES.contains(&name)
}

/// A type reference on a property or method parameter.
///
/// Deserializes from a plain string (`"string"`, `"Image"`) or a one-element
/// array meaning "array of" (`["Image"]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeRef {
    /// A primitive name or a model name.
    Named(String),
    /// An array whose first entry is the element type.
    Array(Vec<TypeRef>),
}

impl TypeRef {
    /// Build a named type reference.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    /// Build an array type reference.
    pub fn array_of(item: TypeRef) -> Self {
        Self::Array(vec![item])
    }

    /// Element type of an array reference. `None` for named references and
    /// for untyped arrays.
    pub fn item(&self) -> Option<&TypeRef> {
        match self {
            Self::Named(_) => None,
            Self::Array(items) => items.first(),
        }
    }

    /// Names of every leaf type this reference mentions.
    pub fn names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        let mut pending = vec![self];
        while let Some(current) = pending.pop() {
            match current {
                Self::Named(name) => names.push(name.as_str()),
                Self::Array(items) => pending.extend(items.iter()),
            }
        }
        names
    }
}

impl Default for TypeRef {
    fn default() -> Self {
        Self::Named("any".to_string())
    }
}

impl From<&str> for TypeRef {
    fn from(value: &str) -> Self {
        Self::named(value)
    }
}

/// A named, typed field of a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescriptor {
    /// Property name.
    pub name: String,
    /// Declared type.
    #[serde(rename = "type", default)]
    pub type_ref: TypeRef,
    /// Whether the property must be present.
    #[serde(default)]
    pub required: bool,
    /// Lower numeric bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Number>,
    /// Upper numeric bound.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Number>,
    /// Default value, kept in its native JSON type.
    #[serde(
        rename = "default",
        alias = "defaultValue",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<Value>,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl PropertyDescriptor {
    /// Create an optional property with no bounds or default.
    pub fn new(name: impl Into<String>, type_ref: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            type_ref: type_ref.into(),
            required: false,
            minimum: None,
            maximum: None,
            default_value: None,
            description: None,
        }
    }

    /// Mark the property as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set numeric bounds.
    pub fn bounds(mut self, minimum: impl Into<Number>, maximum: impl Into<Number>) -> Self {
        self.minimum = Some(minimum.into());
        self.maximum = Some(maximum.into());
        self
    }

    /// Set the default value.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}

/// HTTP verb an operation is exposed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpVerb {
    /// `GET`
    #[default]
    #[serde(alias = "GET")]
    Get,
    /// `POST`
    #[serde(alias = "POST")]
    Post,
    /// `PUT`
    #[serde(alias = "PUT")]
    Put,
    /// `PATCH`
    #[serde(alias = "PATCH")]
    Patch,
    /// `DELETE`
    #[serde(alias = "DELETE", alias = "del")]
    Delete,
    /// `HEAD`
    #[serde(alias = "HEAD")]
    Head,
}

impl HttpVerb {
    /// Upper-case method name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
        }
    }

    /// Whether arguments travel in the query string by default.
    pub fn uses_query(self) -> bool {
        matches!(self, Self::Get | Self::Head | Self::Delete)
    }
}

/// Where a parameter is read from in the HTTP request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamSource {
    /// A path segment.
    Path,
    /// The query string.
    Query,
    /// The whole request body.
    Body,
    /// A form field.
    Form,
    /// A request header.
    Header,
}

impl ParamSource {
    /// Swagger 1.2 `paramType` value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Query => "query",
            Self::Body => "body",
            Self::Form => "form",
            Self::Header => "header",
        }
    }
}

/// An argument accepted or a value returned by an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDescriptor {
    /// Argument name.
    #[serde(alias = "name")]
    pub arg: String,
    /// Declared type.
    #[serde(rename = "type", default)]
    pub type_ref: TypeRef,
    /// Whether the argument is mandatory.
    #[serde(default)]
    pub required: bool,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Explicit request location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ParamSource>,
}

impl ParamDescriptor {
    /// Create an optional parameter with an inferred source.
    pub fn new(arg: impl Into<String>, type_ref: impl Into<TypeRef>) -> Self {
        Self {
            arg: arg.into(),
            type_ref: type_ref.into(),
            required: false,
            description: None,
            source: None,
        }
    }

    /// Mark the parameter as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Pin the request location.
    pub fn source(mut self, source: ParamSource) -> Self {
        self.source = Some(source);
        self
    }
}

/// HTTP binding of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpBinding {
    /// Verb the operation answers to.
    #[serde(default)]
    pub verb: HttpVerb,
    /// Path relative to the model's resource path, `:name` style.
    #[serde(default = "root_path")]
    pub path: String,
}

fn root_path() -> String {
    "/".to_string()
}

impl Default for HttpBinding {
    fn default() -> Self {
        Self {
            verb: HttpVerb::default(),
            path: root_path(),
        }
    }
}

/// A remotely invokable method on a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationDescriptor {
    /// Method name, rendered as the operation nickname.
    pub name: String,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Longer notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// HTTP binding.
    #[serde(default)]
    pub http: HttpBinding,
    /// Accepted arguments, in order.
    #[serde(default)]
    pub accepts: Vec<ParamDescriptor>,
    /// Returned values, in order.
    #[serde(default)]
    pub returns: Vec<ParamDescriptor>,
}

impl OperationDescriptor {
    /// Create an operation bound to `verb path`.
    pub fn new(name: impl Into<String>, verb: HttpVerb, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            notes: None,
            http: HttpBinding {
                verb,
                path: path.into(),
            },
            accepts: Vec::new(),
            returns: Vec::new(),
        }
    }

    /// Append an accepted argument.
    pub fn accepts(mut self, param: ParamDescriptor) -> Self {
        self.accepts.push(param);
        self
    }

    /// Append a returned value.
    pub fn returns(mut self, param: ParamDescriptor) -> Self {
        self.returns.push(param);
        self
    }

    /// All parameters, accepted first, then returned.
    pub fn params(&self) -> impl Iterator<Item = &ParamDescriptor> {
        self.accepts.iter().chain(self.returns.iter())
    }
}

/// A named data type registered by the host application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDescriptor {
    /// Registered name, case-preserved.
    pub name: String,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Plural used for the resource path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plural: Option<String>,
    /// Whether the model is exposed over REST.
    #[serde(default = "default_public")]
    pub public: bool,
    /// Data source the model is attached to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<String>,
    /// Declared properties, in declaration order.
    #[serde(default)]
    pub properties: Vec<PropertyDescriptor>,
    /// Remotely exposed operations.
    #[serde(default)]
    pub operations: Vec<OperationDescriptor>,
}

fn default_public() -> bool {
    true
}

impl ModelDescriptor {
    /// Create a public model with no properties or operations.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            plural: None,
            public: true,
            data_source: None,
            properties: Vec::new(),
            operations: Vec::new(),
        }
    }

    /// Append a property.
    pub fn property(mut self, property: PropertyDescriptor) -> Self {
        self.properties.push(property);
        self
    }

    /// Append an operation.
    pub fn operation(mut self, operation: OperationDescriptor) -> Self {
        self.operations.push(operation);
        self
    }

    /// Mark the model as hidden from REST.
    pub fn private(mut self) -> Self {
        self.public = false;
        self
    }

    /// Resource path, e.g. `/products` for `Product`.
    pub fn resource_path(&self) -> String {
        let plural = match &self.plural {
            Some(plural) => plural.trim_matches('/').to_string(),
            None => {
                let lower = self.name.to_lowercase();
                if lower.ends_with('s') {
                    lower
                } else {
                    format!("{lower}s")
                }
            }
        };
        format!("/{plural}")
    }

    /// Names of required properties, in declaration order.
    pub fn required_properties(&self) -> Vec<String> {
        self.properties
            .iter()
            .filter(|property| property.required)
            .map(|property| property.name.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn type_ref_parses_string_and_array_forms() {
        let named: TypeRef = serde_json::from_value(json!("Image")).expect("named");
        assert_eq!(named, TypeRef::named("Image"));

        let array: TypeRef = serde_json::from_value(json!(["Image"])).expect("array");
        assert_eq!(array.item(), Some(&TypeRef::named("Image")));
        assert_eq!(array.names(), vec!["Image"]);
    }

    #[test]
    fn primitive_names_are_case_sensitive() {
        assert!(is_primitive("date"));
        assert!(!is_primitive("Date"));
        assert!(!is_primitive("Image"));
    }

    #[test]
    fn resource_path_prefers_plural() {
        let mut model = ModelDescriptor::new("Product");
        assert_eq!(model.resource_path(), "/products");

        model.plural = Some("goods".to_string());
        assert_eq!(model.resource_path(), "/goods");

        assert_eq!(ModelDescriptor::new("Address").resource_path(), "/address");
    }

    #[test]
    fn model_parses_with_defaults() {
        let model: ModelDescriptor = serde_json::from_value(json!({
            "name": "product",
            "properties": [
                { "name": "foo", "type": "string", "required": true },
                { "name": "aNum", "type": "number", "minimum": 1, "maximum": 10, "default": 5 }
            ],
            "operations": [
                {
                    "name": "findById",
                    "http": { "verb": "GET", "path": "/:id" },
                    "accepts": [{ "arg": "id", "type": "string", "required": true }],
                    "returns": [{ "arg": "data", "type": "product" }]
                }
            ]
        }))
        .expect("parse model");

        assert!(model.public);
        assert_eq!(model.required_properties(), vec!["foo".to_string()]);
        assert_eq!(model.properties[1].default_value, Some(json!(5)));
        assert_eq!(model.operations[0].http.verb, HttpVerb::Get);
        assert_eq!(model.operations[0].params().count(), 2);
    }

    #[test]
    fn operation_http_binding_defaults_to_root_get() {
        let operation: OperationDescriptor =
            serde_json::from_value(json!({ "name": "find" })).expect("parse operation");
        assert_eq!(operation.http.verb, HttpVerb::Get);
        assert_eq!(operation.http.path, "/");
    }
}
