#![deny(missing_docs)]
//! Explorer server executable.
//!
//! Serves the Swagger 1.2 resource listing and API declarations of a host
//! application described by a JSON document.

mod cors;
mod routes;

#[cfg(not(test))]
use actix_web::{App, HttpServer, web};
#[cfg(not(test))]
use dotenvy::dotenv;
#[cfg(not(test))]
use explorer_core::{ExplorerConfig, HostApp, StdFileSystem};

#[cfg(not(test))]
use std::str::FromStr;

#[cfg(not(test))]
use crate::routes::{AppState, mount};

#[cfg(not(test))]
fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ExplorerConfig::from_env();
    let app_path = std::env::var("EXPLORER_APP").unwrap_or_else(|_| "app.json".to_string());
    let app = HostApp::load(&StdFileSystem::new(), std::path::Path::new(&app_path))
        .unwrap_or_else(|err| panic!("EXPLORER_APP must point to a host description ({app_path}): {err}"));
    log::info!(
        "documenting {} models of {} under {}",
        app.models.len(),
        if app.name.is_empty() { "app" } else { app.name.as_str() },
        config.mount_root()
    );

    let state = web::Data::new(AppState { app, config });

    let listen_addr = std::env::var("EXPLORER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let listen_port =
        u16::from_str(&std::env::var("EXPLORER_PORT").unwrap_or_else(|_| "3000".to_string()))
            .expect("EXPLORER_PORT must be a u16 number");
    let err_msg = format!("Can't bind {}:{}", &listen_addr, listen_port);

    actix_web::rt::System::new().block_on(async move {
        HttpServer::new(move || {
            App::new()
                .wrap(actix_web::middleware::Logger::default())
                .app_data(state.clone())
                .configure(mount(&state.config))
        })
        .bind((listen_addr, listen_port))
        .expect(&err_msg)
        .run()
        .await
    })
}

#[cfg(test)]
fn main() {}
