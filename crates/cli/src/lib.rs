use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use journey_crm::CrmSettings;
use journey_protocol::{serialize_json, JourneyRequest};
use std::io;
use std::sync::Arc;

pub mod http_api;
mod server_security;
mod service;

pub use http_api::router;
pub use service::JourneyService;

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

fn print_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serialize_json(value)?
    };
    print_stdout(&text)
}

#[derive(Parser)]
#[command(name = "journey")]
#[command(about = "Contact journey timelines from Salesforce activity", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the auth and journey endpoints over HTTP
    ServeHttp(ServeArgs),

    /// Exchange the configured service credentials for a token once
    Auth(AuthArgs),

    /// Build one contact's journey and print the response envelope
    Build(BuildArgs),
}

#[derive(Args)]
struct ServeArgs {
    /// Bind address, e.g. 127.0.0.1:8787
    #[arg(long, default_value = "127.0.0.1:8787")]
    bind: String,

    /// Allow binding to non-loopback addresses
    #[arg(long)]
    public: bool,
}

#[derive(Args)]
struct AuthArgs {
    /// Pretty-print JSON response
    #[arg(long)]
    pretty: bool,
}

#[derive(Args)]
struct BuildArgs {
    /// Salesforce Contact record id
    #[arg(long)]
    contact_id: String,

    /// Pretty-print JSON response
    #[arg(long)]
    pretty: bool,
}

pub async fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();

    // One-shot commands print JSON on stdout; keep logs down to warnings.
    if matches!(cli.command, Commands::Auth(_) | Commands::Build(_)) && !cli.verbose {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    // reqwest/hyper connection chatter is only useful when debugging transport issues.
    if !cli.verbose {
        builder.filter_module("hyper", log::LevelFilter::Warn);
        builder.filter_module("reqwest", log::LevelFilter::Warn);
    }
    builder.target(env_logger::Target::Stderr).init();

    let settings = CrmSettings::from_env();
    let missing = settings.missing_keys();
    if !missing.is_empty() {
        log::warn!(
            "Salesforce settings incomplete ({}); requests will fail until they are set",
            missing.join(", ")
        );
    }
    log::debug!("Loaded settings: {settings:?}");

    let http = reqwest::Client::builder()
        .build()
        .context("Failed to build HTTP client")?;
    let service = Arc::new(JourneyService::new(settings, http));

    match cli.command {
        Commands::ServeHttp(args) => serve_http(args, service).await?,
        Commands::Auth(args) => run_auth(args, &service).await?,
        Commands::Build(args) => run_build(args, &service).await?,
    }

    Ok(())
}

async fn run_auth(args: AuthArgs, service: &JourneyService) -> Result<()> {
    let response = service.authenticate().await;
    print_json(&response, args.pretty)?;
    if !response.success {
        std::process::exit(1);
    }
    Ok(())
}

async fn run_build(args: BuildArgs, service: &JourneyService) -> Result<()> {
    let request = JourneyRequest {
        contact_id: Some(args.contact_id),
    };
    let response = service.journey_response(&request).await;
    print_json(&response, args.pretty)?;
    if !response.success {
        std::process::exit(1);
    }
    Ok(())
}

async fn serve_http(args: ServeArgs, service: Arc<JourneyService>) -> Result<()> {
    let addrs = server_security::resolve_guarded_bind_addrs(&args.bind, args.public).await?;

    let app = router(service);
    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("Failed to bind {}", args.bind))?;
    let local_addr = listener.local_addr()?;
    let base_url = format!("http://{local_addr}");

    print_stdout(&format!("Serving auth endpoint: {base_url}/auth"))?;
    print_stdout(&format!("Serving journey endpoint: {base_url}/journey"))?;
    print_stdout(&format!("Health endpoint: {base_url}/health"))?;
    if args.public {
        let addrs = addrs
            .iter()
            .map(|a| a.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        print_stdout(&format!(
            "Public bind enabled (--public). Resolved addresses: {addrs}"
        ))?;
    }
    print_stdout(&format!(
        "Try: curl -X POST {base_url}/journey -H 'Content-Type: application/json' -d '{{\"contactId\":\"003...\"}}'"
    ))?;

    axum::serve(listener, app).await?;
    Ok(())
}
