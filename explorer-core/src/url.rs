//! Externally visible base URL of the REST API.

use crate::config::MountOptions;

/// The parts of an inbound request the resolver looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestInfo {
    /// Scheme the request arrived on (`http` or `https`).
    pub scheme: String,
    /// `Host` of the request, including any port.
    pub host: String,
    /// First value of `X-Forwarded-Host`.
    pub forwarded_host: Option<String>,
    /// First value of `X-Forwarded-Proto`.
    pub forwarded_proto: Option<String>,
}

impl RequestInfo {
    /// A request without proxy headers.
    pub fn new(scheme: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
            forwarded_host: None,
            forwarded_proto: None,
        }
    }

    /// Attach `X-Forwarded-Host`/`X-Forwarded-Proto` raw header values.
    pub fn with_forwarded(mut self, host: Option<&str>, proto: Option<&str>) -> Self {
        self.forwarded_host = host.and_then(first_header_value);
        self.forwarded_proto = proto.and_then(first_header_value);
        self
    }
}

/// First comma-separated entry of a proxy header, trimmed.
pub fn first_header_value(raw: &str) -> Option<String> {
    raw.split(',')
        .next()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(String::from)
}

/// Compute the absolute base URL advertised as `basePath`.
///
/// Scheme: configured `protocol`, then `X-Forwarded-Proto` (only alongside
/// `X-Forwarded-Host`), then the request scheme. Host: `X-Forwarded-Host`,
/// then the request host. Path: configured `basePath`, then `rest_api_root`.
pub fn resolve_base_url(request: &RequestInfo, mount: &MountOptions, rest_api_root: &str) -> String {
    if let Some(base_path) = mount.base_path.as_deref() {
        if base_path.contains("://") {
            return base_path.to_string();
        }
    }

    let forwarded_host = request.forwarded_host.as_deref();
    let scheme = mount
        .protocol
        .as_deref()
        .map(|protocol| protocol.trim().trim_end_matches(':'))
        .filter(|protocol| !protocol.is_empty())
        .or_else(|| {
            forwarded_host
                .and(request.forwarded_proto.as_deref())
                .map(|proto| proto.trim_end_matches(':'))
        })
        .unwrap_or(request.scheme.as_str());
    let host = forwarded_host.unwrap_or(request.host.as_str());
    let path = mount
        .base_path
        .as_deref()
        .filter(|path| !path.is_empty())
        .unwrap_or(rest_api_root);

    format!("{scheme}://{host}{}", absolute_path(path))
}

fn absolute_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}
