//! Cross-origin policy for the documentation endpoints.

use actix_cors::Cors;
use explorer_core::{CorsConfig, CorsOrigin};

/// Methods the documentation endpoints answer to.
pub const ALLOWED_METHODS: [&str; 2] = ["GET", "OPTIONS"];

/// Build the CORS middleware for `config`.
///
/// A disabled policy yields a middleware that allows no origin; callers skip
/// it entirely so no `Access-Control-Allow-Origin` header is ever sent.
pub fn build_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(ALLOWED_METHODS)
        .allow_any_header()
        .max_age(3600);
    match &config.origin {
        CorsOrigin::Reflect => cors = cors.allow_any_origin(),
        CorsOrigin::List(origins) => {
            for origin in origins {
                cors = cors.allowed_origin(origin);
            }
        }
        CorsOrigin::Disabled => {}
    }
    if config.credentials {
        cors = cors.supports_credentials();
    }
    cors
}
