//! HTTP handlers for the documentation endpoints.

use actix_web::http::{Method, header};
use actix_web::middleware::Condition;
use actix_web::{HttpRequest, HttpResponse, web};
use explorer_core::{
    ExplorerConfig, HostApp, RequestInfo, render_declaration, render_listing, resolve_base_url,
};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::cors::build_cors;

/// Shared application state for handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Metadata of the documented application.
    pub app: HostApp,
    /// Explorer configuration, fixed at mount time.
    pub config: ExplorerConfig,
}

impl AppState {
    /// REST mount path: the configured override, else the host's own.
    pub fn rest_api_root(&self) -> &str {
        self.config
            .rest_api_root
            .as_deref()
            .unwrap_or_else(|| self.app.rest_api_root())
    }
}

/// Error response payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message.
    pub message: String,
}

/// Register the documentation endpoints under the configured mount root.
pub fn mount(config: &ExplorerConfig) -> impl FnOnce(&mut web::ServiceConfig) {
    let root = config.mount_root();
    let cors = config.cors.clone();
    move |cfg| {
        cfg.service(
            web::scope(&root)
                .wrap(Condition::new(cors.origin.is_enabled(), build_cors(&cors)))
                .service(
                    web::resource("/resources")
                        .route(web::get().to(resource_listing))
                        .route(web::method(Method::OPTIONS).to(preflight)),
                )
                .service(
                    web::resource("/resources/{model_path:.*}")
                        .route(web::get().to(resource_declaration))
                        .route(web::method(Method::OPTIONS).to(preflight)),
                ),
        );
    }
}

/// Serve the resource listing.
pub async fn resource_listing(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(render_listing(&state.app, &state.config))
}

/// Serve the API declaration of one model.
pub async fn resource_declaration(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> HttpResponse {
    let model_path = path.into_inner();
    let Some(model) = state.app.find_by_path(&model_path) else {
        warn!("no public model is exposed at /{model_path}");
        return HttpResponse::NotFound().json(ErrorResponse {
            message: format!("unknown resource: {model_path}"),
        });
    };

    let base_url = resolve_base_url(
        &request_info(&req),
        &state.config.mount,
        state.rest_api_root(),
    );
    debug!("rendering {} with basePath {base_url}", model.name);
    let registry = state.app.registry();
    HttpResponse::Ok().json(render_declaration(
        model,
        &registry,
        &base_url,
        state.app.api_version(),
    ))
}

/// Answer `OPTIONS` requests that are not CORS preflights.
pub async fn preflight() -> HttpResponse {
    HttpResponse::NoContent()
        .insert_header((header::ALLOW, "GET, OPTIONS"))
        .finish()
}

/// Build the resolver input from the raw request headers.
pub fn request_info(req: &HttpRequest) -> RequestInfo {
    let headers = req.headers();
    let header_value = |name: &str| headers.get(name).and_then(|value| value.to_str().ok());
    let scheme = if req.app_config().secure() {
        "https"
    } else {
        "http"
    };
    let host = header_value(header::HOST.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| req.app_config().host().to_string());

    RequestInfo::new(scheme, host).with_forwarded(
        header_value("x-forwarded-host"),
        header_value("x-forwarded-proto"),
    )
}
