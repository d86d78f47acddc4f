//! Command-line front end for the Sveikata exercise advisor.
//!
//! Presentation glue only: collects the profile fields, calls the plan
//! service, and prints or exports the result. All decision logic lives in
//! the advisor crates.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use advisor_adapters::ollama::{OllamaClient, OllamaConfig};
use advisor_planner::PlanService;
use advisor_primitives::RawProfile;

#[derive(Parser, Debug)]
#[command(
    name = "plan-generator",
    about = "Generate a personalized 7-day exercise plan via a local Ollama backend"
)]
struct Args {
    /// Birth date as YYYY-MM-DD.
    #[arg(long, required_unless_present = "check")]
    birth_date: Option<String>,

    /// Minutes available for exercise per day (1-300).
    #[arg(long, required_unless_present = "check")]
    minutes: Option<i64>,

    /// Fitness goal: "lose weight" or "gain muscles".
    #[arg(long, required_unless_present = "check")]
    goal: Option<String>,

    /// Additional free-text requirements (injuries, preferences, ...).
    #[arg(long)]
    notes: Option<String>,

    /// Target model served by the backend.
    #[arg(long, default_value = "gemma3:4b")]
    model: String,

    /// Base URL of the Ollama daemon.
    #[arg(long, default_value = "http://127.0.0.1:11434/")]
    base_url: String,

    /// Opaque API credential forwarded to the backend.
    #[arg(long, env = "ADVISOR_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Per-call timeout in seconds.
    #[arg(long, default_value_t = 120)]
    timeout_secs: u64,

    /// Only probe the backend and report its status.
    #[arg(long)]
    check: bool,

    /// Write the plan to this file instead of a default-named .txt file.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();
    let args = Args::parse();

    let mut config = OllamaConfig::new(args.model.clone())
        .with_base_url(&args.base_url)?
        .with_timeout(Duration::from_secs(args.timeout_secs));
    if let Some(key) = args.api_key.clone() {
        config = config.with_api_key(key);
    }

    let service = PlanService::new(OllamaClient::new(config)?);

    if args.check {
        return report_status(&service).await;
    }

    let mut raw = RawProfile::new(
        args.birth_date.clone().unwrap_or_default(),
        args.minutes.unwrap_or_default(),
        args.goal.clone().unwrap_or_default(),
    );
    if let Some(notes) = args.notes.clone() {
        raw = raw.with_notes(notes);
    }

    info!(model = %args.model, "generating exercise plan");
    let plan = match service.generate(&raw).await {
        Ok(plan) => plan,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("hint: {}", err.advice());
            std::process::exit(1);
        }
    };

    println!("{}", plan.content());

    let path = args
        .output
        .unwrap_or_else(|| PathBuf::from(plan.suggested_file_name()));
    tokio::fs::write(&path, plan.content())
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "plan exported");

    Ok(())
}

async fn report_status(service: &PlanService<OllamaClient>) -> Result<()> {
    let status = service.backend_status().await;

    if !status.reachable {
        warn!("backend is not reachable; start it with `ollama serve`");
        std::process::exit(1);
    }

    info!("backend is running");
    for model in &status.available_models {
        println!("  - {model}");
    }
    if status.target_model_present {
        info!(model = service.model(), "target model is installed");
    } else {
        warn!(
            model = service.model(),
            "target model is missing; run `ollama pull {}`",
            service.model()
        );
    }

    Ok(())
}
