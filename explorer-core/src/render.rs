//! Rendering of resource listings and API declarations.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Number;

use crate::collector::collect_models;
use crate::config::ExplorerConfig;
use crate::domain::{
    ModelDescriptor, OperationDescriptor, ParamDescriptor, ParamSource, PropertyDescriptor,
    TypeRef, is_primitive,
};
use crate::media;
use crate::registry::{HostApp, ModelLookup};
use crate::swagger::{
    ApiEntry, ApiInfo, DataType, Items, ListingEntry, ModelSchema, OperationSchema,
    ParameterSchema, PropertySchema, ResourceDocument, ResourceListing, SWAGGER_VERSION,
};

/// Render the resource listing for every public model of `app`.
pub fn render_listing(app: &HostApp, config: &ExplorerConfig) -> ResourceListing {
    let apis = app
        .public_models()
        .map(|model| ListingEntry {
            path: model.resource_path(),
            description: model.description.clone(),
        })
        .collect();
    let info = config.title.as_ref().map(|title| ApiInfo {
        title: title.clone(),
        description: config.description.clone(),
    });

    ResourceListing {
        swagger_version: SWAGGER_VERSION.to_string(),
        api_version: app.api_version().to_string(),
        apis,
        info,
    }
}

/// Render the API declaration of `model`, advertising `base_url` as
/// `basePath`. Referenced models are resolved through `lookup`.
pub fn render_declaration<L>(
    model: &ModelDescriptor,
    lookup: &L,
    base_url: &str,
    api_version: &str,
) -> ResourceDocument
where
    L: ModelLookup + ?Sized,
{
    let resource_path = model.resource_path();
    let models = collect_models(model, lookup)
        .into_iter()
        .map(|(name, referenced)| (name, render_model(&referenced)))
        .collect();

    ResourceDocument {
        swagger_version: SWAGGER_VERSION.to_string(),
        api_version: api_version.to_string(),
        base_path: base_url.to_string(),
        apis: render_apis(&resource_path, &model.operations),
        resource_path,
        models,
        consumes: media::consumes(),
        produces: media::produces(),
    }
}

/// Render a model as a Swagger 1.2 schema.
pub fn render_model(model: &ModelDescriptor) -> ModelSchema {
    let properties: BTreeMap<String, PropertySchema> = model
        .properties
        .iter()
        .map(|property| (property.name.clone(), render_property(property)))
        .collect();

    ModelSchema {
        id: model.name.clone(),
        description: model.description.clone(),
        required: model.required_properties(),
        properties,
    }
}

/// Render a property. Bounds become strings; the default keeps its JSON type.
pub fn render_property(property: &PropertyDescriptor) -> PropertySchema {
    PropertySchema {
        data_type: render_type(&property.type_ref),
        required: property.required,
        description: property.description.clone(),
        minimum: property.minimum.as_ref().map(render_bound),
        maximum: property.maximum.as_ref().map(render_bound),
        default_value: property.default_value.clone(),
    }
}

/// Largest magnitude below which every integral `f64` is exact.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Integral floats drop the fractional part so `1.0` and `1` render alike.
fn render_bound(bound: &Number) -> String {
    match bound.as_f64() {
        Some(value)
            if bound.is_f64() && value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER =>
        {
            format!("{value:.0}")
        }
        _ => bound.to_string(),
    }
}

/// Map a host type reference onto the Swagger 1.2 type vocabulary.
///
/// Unrecognized names pass through as model-name references.
pub fn render_type(type_ref: &TypeRef) -> DataType {
    match type_ref {
        TypeRef::Named(name) => render_named(name),
        TypeRef::Array(_) => DataType {
            type_name: "array".to_string(),
            format: None,
            items: type_ref.item().map(render_items),
        },
    }
}

fn render_named(name: &str) -> DataType {
    let (type_name, format) = match name {
        "string" => ("string", None),
        "number" => ("number", Some("double")),
        "integer" => ("integer", Some("int32")),
        "boolean" => ("boolean", None),
        "date" => ("date", None),
        "buffer" => ("string", Some("byte")),
        "any" | "object" => ("object", None),
        "array" => ("array", None),
        other => (other, None),
    };
    DataType {
        type_name: type_name.to_string(),
        format: format.map(String::from),
        items: None,
    }
}

fn render_items(item: &TypeRef) -> Items {
    match item {
        TypeRef::Named(name) if !is_primitive(name) => Items {
            type_name: None,
            reference: Some(name.clone()),
        },
        other => Items {
            type_name: Some(render_type(other).type_name),
            reference: None,
        },
    }
}

fn render_apis(resource_path: &str, operations: &[OperationDescriptor]) -> Vec<ApiEntry> {
    let mut apis: Vec<ApiEntry> = Vec::new();
    for operation in operations {
        let path = join_operation_path(resource_path, &operation.http.path);
        let rendered = render_operation(operation);
        match apis.iter_mut().find(|api| api.path == path) {
            Some(api) => api.operations.push(rendered),
            None => apis.push(ApiEntry {
                path,
                operations: vec![rendered],
            }),
        }
    }
    apis
}

fn render_operation(operation: &OperationDescriptor) -> OperationSchema {
    let path_params = path_params(&operation.http.path);
    let parameters = operation
        .accepts
        .iter()
        .map(|param| render_parameter(operation, param, &path_params))
        .collect();
    let data_type = match operation.returns.as_slice() {
        [] => DataType::named("void"),
        [single] => render_type(&single.type_ref),
        _ => DataType::named("object"),
    };

    OperationSchema {
        method: operation.http.verb.as_str().to_string(),
        nickname: operation.name.clone(),
        data_type,
        parameters,
        summary: operation.description.clone(),
        notes: operation.notes.clone(),
        response_messages: Vec::new(),
    }
}

fn render_parameter(
    operation: &OperationDescriptor,
    param: &ParamDescriptor,
    path_params: &[&str],
) -> ParameterSchema {
    let source = param.source.unwrap_or_else(|| {
        if path_params.contains(&param.arg.as_str()) {
            ParamSource::Path
        } else if operation.http.verb.uses_query() {
            ParamSource::Query
        } else {
            ParamSource::Form
        }
    });

    ParameterSchema {
        param_type: source.as_str().to_string(),
        name: param.arg.clone(),
        data_type: render_type(&param.type_ref),
        required: param.required || source == ParamSource::Path,
        description: param.description.clone(),
    }
}

/// Append an operation path to the resource path, rewriting `:name`
/// segments to `{name}`.
pub fn join_operation_path(resource_path: &str, operation_path: &str) -> String {
    let segments: Vec<String> = operation_path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| match segment.strip_prefix(':') {
            Some(name) => format!("{{{name}}}"),
            None => segment.to_string(),
        })
        .collect();
    if segments.is_empty() {
        resource_path.to_string()
    } else {
        format!("{resource_path}/{}", segments.join("/"))
    }
}

fn path_params(path: &str) -> Vec<&str> {
    path.split('/')
        .filter_map(|segment| {
            segment.strip_prefix(':').or_else(|| {
                segment
                    .strip_prefix('{')
                    .and_then(|rest| rest.strip_suffix('}'))
            })
        })
        .collect()
}

/// Render a payload as pretty-printed JSON.
pub fn render_json<T: Serialize + ?Sized>(payload: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(payload)
}
