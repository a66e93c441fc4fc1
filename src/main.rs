//! Multilingual Query Handler
//!
//! Translates incoming customer queries into a target language and drafts
//! suggested replies, through a hosted chat-completion model with local
//! fallbacks. Ships an HTTP backend and an interactive terminal front end.

mod api;
mod core;
mod engine;
mod models;
mod pipeline;
mod storage;
mod ui;

use crate::api::endpoints::{AppState, create_router};
use crate::core::config::Config;
use crate::core::logging::init_logging;
use crate::core::provider::Provider;
use crate::core::providers::build_provider;
use crate::engine::language::detect_language;
use crate::engine::{ResponseGenerator, TranslationEngine};
use crate::pipeline::options::{BackendMode, ResponseMode, TranslationBackend};
use crate::pipeline::{BackendClient, QueryProcessor};
use crate::storage::EvaluationStore;
use crate::ui::Session;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "multilingual-query-handler", version, about)]
struct Cli {
    /// Path to a TOML configuration file (default: $CONFIG_PATH or ./config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the interactive terminal session (default)
    Ui {
        #[arg(long, value_enum)]
        backend: Option<BackendMode>,
        #[arg(long, value_enum)]
        translation_backend: Option<TranslationBackend>,
        #[arg(long, value_enum)]
        response_mode: Option<ResponseMode>,
        /// Sampling temperature for generated replies (0.0 - 1.0)
        #[arg(long)]
        temperature: Option<f32>,
        /// Do not generate suggested replies
        #[arg(long)]
        no_reply: bool,
    },
    /// Run the HTTP backend
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Translate a single text and print the result
    Translate {
        text: String,
        #[arg(long)]
        target_language: Option<String>,
    },
    /// Draft a reply to an (already translated) text and print it
    Reply {
        text: String,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long)]
        temperature: Option<f32>,
    },
    /// Print the detected language code of a text
    Detect { text: String },
    /// List saved evaluations
    Evaluations,
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(cfg) => Arc::new(cfg),
        Err(e) => {
            eprintln!("Configuration Error: {:#}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config.log_level);

    if let Err(e) = run(cli.command, config).await {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(command: Option<Command>, config: Arc<Config>) -> Result<()> {
    let provider = build_provider(&config)?;
    match &provider {
        Some(p) => info!("Using provider: {}", p.provider_name()),
        None => info!("No OpenAI key configured; using local fallbacks"),
    }
    let translator = Arc::new(TranslationEngine::new(&config, provider.clone()));
    let generator = Arc::new(ResponseGenerator::new(&config, provider));

    let command = command.unwrap_or(Command::Ui {
        backend: None,
        translation_backend: None,
        response_mode: None,
        temperature: None,
        no_reply: false,
    });

    match command {
        Command::Ui {
            backend,
            translation_backend,
            response_mode,
            temperature,
            no_reply,
        } => {
            let mut options = config.process_options();
            if let Some(backend) = backend {
                options.backend = backend;
            }
            if let Some(translation_backend) = translation_backend {
                options.translation_backend = translation_backend;
            }
            if let Some(response_mode) = response_mode {
                options.response_mode = response_mode;
            }
            if let Some(temperature) = temperature {
                options.temperature = temperature.clamp(0.0, 1.0);
            }
            if no_reply {
                options.generate_reply = false;
            }

            let backend = BackendClient::new(&config.backend_url, config.backend_timeout)?;
            let processor = QueryProcessor::new(translator, generator, Some(backend));
            let store = EvaluationStore::new(config.evaluations_path.clone());
            let session = Session::new(&processor, &store, options);

            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            session.run(&mut stdin.lock(), &mut stdout.lock()).await
        }
        Command::Serve { host, port } => {
            serve(config.clone(), translator, generator, host, port).await
        }
        Command::Translate {
            text,
            target_language,
        } => {
            println!("{}", translator.translate(&text, target_language.as_deref()).await);
            Ok(())
        }
        Command::Reply {
            text,
            name,
            temperature,
        } => {
            println!("{}", generator.generate(&text, &name, temperature).await);
            Ok(())
        }
        Command::Detect { text } => {
            println!("{}", detect_language(&text));
            Ok(())
        }
        Command::Evaluations => {
            let store = EvaluationStore::new(config.evaluations_path.clone());
            let entries = store.load()?;
            if entries.is_empty() {
                println!("No evaluations saved in {}", store.path().display());
                return Ok(());
            }
            println!(
                "{}",
                serde_json::to_string_pretty(&entries).context("Failed to render evaluations")?
            );
            Ok(())
        }
    }
}

async fn serve(
    config: Arc<Config>,
    translator: Arc<TranslationEngine>,
    generator: Arc<ResponseGenerator>,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    print_startup_banner(&config);

    let app = create_router(AppState {
        config: config.clone(),
        translator,
        generator,
    });

    let addr = format!(
        "{}:{}",
        host.unwrap_or_else(|| config.host.clone()),
        port.unwrap_or(config.port)
    );
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")
}

/// Print startup banner with configuration
fn print_startup_banner(config: &Config) {
    println!(
        "🚀 Multilingual Query Handler backend v{}",
        env!("CARGO_PKG_VERSION")
    );
    println!("✅ Configuration loaded successfully");
    println!("   Base URL: {}", config.openai_base_url);
    println!(
        "   OpenAI key: {}",
        if config.has_openai_key() {
            "configured"
        } else {
            "missing (local fallbacks only)"
        }
    );
    println!("   Translation model: {}", config.translation_model);
    println!("   Response model: {}", config.response_model);
    println!("   Target language: {}", config.target_language);
    println!("   Request Timeout: {}s", config.request_timeout);
    println!();
}
