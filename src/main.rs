//! TrueGuard - Scam Signal Classification & Risk Presentation Engine
//!
//! Entry point: the interactive terminal surface by default, plus one-shot
//! `classify` and `analyze` subcommands for scripting.

use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;

use trueguard_core::presentation::{PresentationModel, SessionController};
use trueguard_core::services::{
    AnalyzeBackend, AnalyzeConfig, AnalyzeRequest, HttpAnalyzeBackend, PhotoAttachment,
};
use trueguard_core::signals::{classify, render};
use trueguard_core::tui::TuiApp;

#[derive(Parser)]
#[command(name = "trueguard")]
#[command(about = "Scam-signal classification and risk presentation engine", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Set log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Analyze backend base URL
    #[arg(long, env = "TRUEGUARD_BACKEND_URL")]
    backend_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive terminal surface (default)
    Tui {
        /// Attach a photo to submissions
        #[arg(long)]
        photo: Option<PathBuf>,
    },

    /// Classify text and print detected signals plus highlighted markup
    Classify {
        /// Text to classify; reads stdin when omitted
        text: Option<String>,
    },

    /// One-shot analysis round trip against the backend
    Analyze {
        /// Chat text to analyze; reads stdin when omitted
        text: Option<String>,

        /// Optional photo attachment
        #[arg(long)]
        photo: Option<PathBuf>,

        /// Emit the presentation model as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::new(format!(
        "trueguard={0},trueguard_core={0}",
        level.as_str().to_lowercase()
    ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr) // Write logs to stderr, not stdout
        .init();

    debug!("TrueGuard v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = backend_config(cli.backend_url);

    match cli.command {
        None | Some(Commands::Tui { photo: None }) => run_tui(config, None).await,
        Some(Commands::Tui { photo }) => run_tui(config, photo).await,
        Some(Commands::Classify { text }) => {
            let text = text_or_stdin(text)?;
            run_classify(&text)
        }
        Some(Commands::Analyze { text, photo, json }) => {
            let text = text_or_stdin(text)?;
            run_analyze(config, &text, photo, json).await
        }
    }
}

fn backend_config(url: Option<String>) -> AnalyzeConfig {
    let mut config = AnalyzeConfig::default();
    if let Some(url) = url {
        config.base_url = url;
    }
    config
}

fn text_or_stdin(text: Option<String>) -> anyhow::Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

async fn run_tui(config: AnalyzeConfig, photo: Option<PathBuf>) -> anyhow::Result<()> {
    let backend: Arc<dyn AnalyzeBackend> = Arc::new(HttpAnalyzeBackend::new(config)?);
    let app = TuiApp::new(backend, photo)?;
    app.run().await
}

fn run_classify(text: &str) -> anyhow::Result<()> {
    let result = classify(text);
    println!("Сигналдар: {}", result.chip_labels().join(" · "));
    println!("{}", render(text));
    Ok(())
}

async fn run_analyze(
    config: AnalyzeConfig,
    text: &str,
    photo: Option<PathBuf>,
    json: bool,
) -> anyhow::Result<()> {
    let backend = HttpAnalyzeBackend::new(config)?;

    let mut controller = SessionController::new();
    let token = controller.begin_submission(text, photo.is_some())?;

    let request = AnalyzeRequest {
        chat_text: text.trim().to_string(),
        photo: load_photo(photo)?,
    };

    match backend.analyze(request).await {
        Ok(result) => {
            controller.resolve_success(token, result, Instant::now());
        }
        Err(err) => {
            controller.resolve_failure(token, err.to_string());
        }
    }

    // One-shot output: sample the counters past their settle time
    let settled = Instant::now() + Duration::from_secs(2);
    let model = PresentationModel::snapshot(&controller, settled);

    if json {
        println!("{}", serde_json::to_string_pretty(&model)?);
        return Ok(());
    }

    match model {
        PresentationModel::Ready(ready) => {
            println!("{}", ready.status);
            println!("{}  {} / 100", ready.tier_label, ready.risk_score);
            println!("Түрі: {}", ready.scam_type);
            println!(
                "Манипуляция: {}%   Осалдық: {}%",
                ready.manipulation_score, ready.vulnerability_score
            );
            println!("Дәлелдер:");
            for reason in &ready.reasons {
                println!("  • {}", reason);
            }
            println!("Кеңес: {}", ready.coach_note);
            if ready.gate_open {
                println!("⚠ Жоғары қауіп: қауіпсіз жауап растауды күтіп құлыптаулы");
            } else {
                println!("Жауап ({}): {}", ready.tab.label(), ready.reply_text);
            }
            Ok(())
        }
        PresentationModel::Error { message, .. } => anyhow::bail!(message),
        _ => Ok(()),
    }
}

fn load_photo(photo: Option<PathBuf>) -> anyhow::Result<Option<PhotoAttachment>> {
    let Some(path) = photo else {
        return Ok(None);
    };
    let bytes = std::fs::read(&path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "photo".to_string());
    Ok(Some(PhotoAttachment { file_name, bytes }))
}
