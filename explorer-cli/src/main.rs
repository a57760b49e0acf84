#![deny(missing_docs)]
//! Explorer command-line interface.
//!
//! Renders the Swagger 1.2 resource listing and API declarations straight
//! from an application description, or fetches them from a running server.

mod fetch;

use clap::{Args, Parser, Subcommand};
use explorer_core::{
    ExplorerConfig, FileSystem, HostApp, RequestInfo, StdFileSystem, render_declaration,
    render_json, render_listing, resolve_base_url,
};
use fetch::FetchArgs;
use std::path::PathBuf;

pub(crate) type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

const DEFAULT_ORIGIN: &str = "http://localhost:3000";

#[derive(Parser)]
#[command(name = "explorer", version, about = "Swagger 1.2 explorer CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone)]
struct SourceArgs {
    /// Application description (JSON).
    #[arg(long, env = "EXPLORER_APP", default_value = "app.json")]
    app: PathBuf,
    /// Explorer configuration file (JSON). Defaults to `EXPLORER_*` variables.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Clone)]
struct OutputArgs {
    /// Write the document to a file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the resource listing.
    Listing {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Render the API declaration of one model.
    Declaration {
        #[command(flatten)]
        source: SourceArgs,
        /// Resource path of the model, e.g. `products`.
        #[arg(long)]
        model: String,
        /// Origin the REST API is reached at.
        #[arg(long, default_value = DEFAULT_ORIGIN)]
        url: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Fetch a document from a running explorer server.
    Fetch {
        #[command(flatten)]
        fetch: FetchArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[cfg(not(test))]
#[tokio::main]
async fn main() -> CliResult<()> {
    let cli = Cli::parse();
    let fs = StdFileSystem::new();

    let (contents, output) = match cli.command {
        Commands::Listing { source, output } => {
            let (app, config) = load_sources(&fs, &source)?;
            (listing_document(&app, &config)?, output)
        }
        Commands::Declaration {
            source,
            model,
            url,
            output,
        } => {
            let (app, config) = load_sources(&fs, &source)?;
            (declaration_document(&app, &config, &model, &url)?, output)
        }
        Commands::Fetch { fetch, output } => (fetch::run_fetch(&fetch).await?, output),
    };

    emit_output(&output, contents).await
}

#[cfg(test)]
fn main() {}

fn load_sources<F: FileSystem>(fs: &F, source: &SourceArgs) -> CliResult<(HostApp, ExplorerConfig)> {
    let app = HostApp::load(fs, &source.app)?;
    let config = match &source.config {
        Some(path) => ExplorerConfig::load(fs, path)?,
        None => ExplorerConfig::from_env(),
    };
    Ok((app, config))
}

fn listing_document(app: &HostApp, config: &ExplorerConfig) -> CliResult<String> {
    Ok(render_json(&render_listing(app, config))?)
}

fn declaration_document(
    app: &HostApp,
    config: &ExplorerConfig,
    model_path: &str,
    url: &str,
) -> CliResult<String> {
    let model = app
        .find_by_path(model_path)
        .ok_or_else(|| format!("unknown resource: {model_path}"))?;
    let request = request_from_url(url)?;
    let rest_api_root = config
        .rest_api_root
        .as_deref()
        .unwrap_or_else(|| app.rest_api_root());
    let base_url = resolve_base_url(&request, &config.mount, rest_api_root);
    let document = render_declaration(model, &app.registry(), &base_url, app.api_version());
    Ok(render_json(&document)?)
}

/// Split an origin such as `https://example.com:8443` into scheme and host.
fn request_from_url(url: &str) -> CliResult<RequestInfo> {
    let (scheme, rest) = url
        .trim()
        .split_once("://")
        .ok_or_else(|| format!("url must include a scheme: {url}"))?;
    let host = rest.split('/').next().unwrap_or_default();
    if scheme.is_empty() || host.is_empty() {
        return Err(format!("url must include a host: {url}").into());
    }
    Ok(RequestInfo::new(scheme, host))
}

async fn emit_output(output: &OutputArgs, contents: String) -> CliResult<()> {
    if let Some(path) = &output.output {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, contents).await?;
    } else {
        println!("{contents}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{
        Cli, Commands, OutputArgs, SourceArgs, declaration_document, emit_output,
        listing_document, load_sources, request_from_url,
    };
    use clap::Parser;
    use explorer_core::{
        ExplorerConfig, HostApp, HttpVerb, ModelDescriptor, MountOptions, OperationDescriptor,
        ParamDescriptor, PropertyDescriptor, StdFileSystem,
    };
    use serde_json::Value;
    use std::path::{Path, PathBuf};

    const DEFAULT_URL: &str = "http://localhost:3000";

    fn host_app() -> HostApp {
        HostApp {
            name: "shop".to_string(),
            version: Some("1.2.3".to_string()),
            rest_api_root: None,
            models: vec![
                ModelDescriptor::new("Product")
                    .property(PropertyDescriptor::new("name", "string").required())
                    .operation(
                        OperationDescriptor::new("findById", HttpVerb::Get, "/:id")
                            .accepts(ParamDescriptor::new("id", "string").required())
                            .returns(ParamDescriptor::new("data", "Product")),
                    ),
            ],
            global_models: Vec::new(),
        }
    }

    static UNIQUE_COUNTER: std::sync::atomic::AtomicUsize = std::sync::atomic::AtomicUsize::new(0);

    fn unique_dir() -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("system time")
            .as_nanos();
        let counter = UNIQUE_COUNTER.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        std::env::temp_dir().join(format!("explorer_cli_test_{nanos}_{counter}"))
    }

    #[test]
    fn parses_declaration_command() {
        let cli = Cli::try_parse_from([
            "explorer",
            "declaration",
            "--app",
            "shop.json",
            "--model",
            "products",
            "--url",
            "https://shop.example.com",
            "-o",
            "out/products.json",
        ])
        .expect("parse");

        match cli.command {
            Commands::Declaration {
                source,
                model,
                url,
                output,
            } => {
                assert_eq!(source.app, PathBuf::from("shop.json"));
                assert!(source.config.is_none());
                assert_eq!(model, "products");
                assert_eq!(url, "https://shop.example.com");
                assert_eq!(output.output, Some(PathBuf::from("out/products.json")));
            }
            _ => panic!("expected declaration command"),
        }
    }

    #[test]
    fn declaration_requires_model() {
        let result = Cli::try_parse_from(["explorer", "declaration", "--app", "shop.json"]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_fetch_command() {
        let cli = Cli::try_parse_from([
            "explorer",
            "fetch",
            "--url",
            "http://localhost:3000/explorer",
            "--model",
            "products",
        ])
        .expect("parse");

        match cli.command {
            Commands::Fetch { fetch, output } => {
                assert_eq!(fetch.url, "http://localhost:3000/explorer");
                assert_eq!(fetch.model.as_deref(), Some("products"));
                assert!(output.output.is_none());
            }
            _ => panic!("expected fetch command"),
        }
    }

    #[test]
    fn request_from_url_splits_scheme_and_host() {
        let request = request_from_url("https://example.com:8443/ignored").expect("request");
        assert_eq!(request.scheme, "https");
        assert_eq!(request.host, "example.com:8443");
    }

    #[test]
    fn request_from_url_rejects_missing_parts() {
        assert!(request_from_url("localhost:3000").is_err());
        assert!(request_from_url("http://").is_err());
    }

    #[test]
    fn listing_document_renders_public_models() {
        let output = listing_document(&host_app(), &ExplorerConfig::default()).expect("listing");
        let value: Value = serde_json::from_str(&output).expect("json");

        assert_eq!(value["swaggerVersion"], "1.2");
        assert_eq!(value["apiVersion"], "1.2.3");
        assert_eq!(value["apis"][0]["path"], "/products");
        assert!(value.get("basePath").is_none());
    }

    #[test]
    fn declaration_document_uses_origin_and_mount_options() {
        let app = host_app();
        let output =
            declaration_document(&app, &ExplorerConfig::default(), "/products", DEFAULT_URL)
                .expect("declaration");
        let value: Value = serde_json::from_str(&output).expect("json");
        assert_eq!(value["basePath"], "http://localhost:3000/api");
        assert_eq!(value["resourcePath"], "/products");
        assert_eq!(value["models"]["Product"]["required"][0], "name");

        let config = ExplorerConfig {
            rest_api_root: Some("/v2".to_string()),
            mount: MountOptions {
                base_path: None,
                protocol: Some("https".to_string()),
            },
            ..ExplorerConfig::default()
        };
        let output =
            declaration_document(&app, &config, "products", DEFAULT_URL).expect("declaration");
        let value: Value = serde_json::from_str(&output).expect("json");
        assert_eq!(value["basePath"], "https://localhost:3000/v2");
    }

    #[test]
    fn declaration_document_rejects_unknown_model() {
        let err = declaration_document(
            &host_app(),
            &ExplorerConfig::default(),
            "widgets",
            DEFAULT_URL,
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown resource"));
    }

    #[tokio::test]
    async fn load_sources_reads_app_and_config_files() {
        let dir = unique_dir();
        std::fs::create_dir_all(&dir).expect("dir");
        let app_path = dir.join("app.json");
        let config_path = dir.join("config.json");
        std::fs::write(
            &app_path,
            r#"{"name":"shop","models":[{"name":"Product"}]}"#,
        )
        .expect("app");
        std::fs::write(&config_path, r#"{"basePath":"/custom","title":"Shop"}"#).expect("config");

        let source = SourceArgs {
            app: app_path,
            config: Some(config_path),
        };
        let (app, config) = load_sources(&StdFileSystem::new(), &source).expect("sources");
        assert_eq!(app.models.len(), 1);
        assert_eq!(config.mount.base_path.as_deref(), Some("/custom"));
        assert_eq!(config.title.as_deref(), Some("Shop"));

        std::fs::remove_dir_all(&dir).expect("cleanup");
    }

    #[test]
    fn load_sources_reports_missing_app() {
        let source = SourceArgs {
            app: Path::new("/nonexistent/explorer/app.json").to_path_buf(),
            config: None,
        };
        assert!(load_sources(&StdFileSystem::new(), &source).is_err());
    }

    #[tokio::test]
    async fn emit_output_writes_file() {
        let dir = unique_dir();
        let path = dir.join("nested").join("listing.json");
        let output = OutputArgs {
            output: Some(path.clone()),
        };

        emit_output(&output, "{}".to_string()).await.expect("emit");
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "{}");

        std::fs::remove_dir_all(&dir).expect("cleanup");
    }
}
