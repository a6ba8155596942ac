//! resume-tailor CLI
//!
//! Seeds in-memory stores from a profile JSON file, creates a draft resume
//! for a job description and runs the tailoring pipeline against it.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use resume_tailor::adapters::ai::{AnthropicProvider, LlmResumeAI, ResilientResumeAI, ScriptedResumeAI};
use resume_tailor::adapters::memory::{InMemoryProfileStore, InMemoryResumeRepository, ProfileDocument};
use resume_tailor::application::{
    CreateResumeCommand, CreateResumeHandler, ResumeTailor, TailorResumeCommand,
    TailorResumeHandler,
};
use resume_tailor::config::{AppConfig, LoggingConfig};
use resume_tailor::domain::experience::ExperienceType;
use resume_tailor::domain::foundation::TargetLanguage;
use resume_tailor::domain::tailoring::TailoringStyle;
use resume_tailor::ports::ResumeAI;

#[derive(Debug, Parser)]
#[command(name = "resume-tailor", version, about = "Tailor a resume to a job description")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Build a tailored resume and print it as JSON
    Tailor(TailorArgs),
}

#[derive(Debug, Args)]
struct TailorArgs {
    /// Profile JSON file (experiences, bullets, skills)
    #[arg(long)]
    profile: PathBuf,

    /// Plain-text job description
    #[arg(long)]
    job: PathBuf,

    /// Maximum bullets on the resume
    #[arg(long)]
    max_bullets: Option<usize>,

    /// Maximum bullets per experience (0 = no cap)
    #[arg(long)]
    max_per_experience: Option<usize>,

    /// Two-letter output language
    #[arg(long)]
    language: Option<TargetLanguage>,

    /// professional, technical, executive, creative or concise
    #[arg(long)]
    style: Option<TailoringStyle>,

    /// Experience types to draw bullets from: work, education, project,
    /// volunteer, certification or other (repeatable; default all)
    #[arg(long = "include-type")]
    include_types: Vec<ExperienceType>,

    /// Skills to surface first (repeatable)
    #[arg(long = "highlight")]
    highlight: Vec<String>,

    /// Use the deterministic keyword backend instead of the API
    #[arg(long)]
    offline: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;
    init_tracing(&config.logging)?;

    match cli.command {
        Command::Tailor(args) => tailor(&config, args).await,
    }
}

fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .with_context(|| format!("invalid log level '{}'", config.level))?,
    };

    // stdout carries the resume JSON
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if config.json {
        builder.json().try_init().map_err(|e| anyhow::anyhow!(e))
    } else {
        builder.compact().try_init().map_err(|e| anyhow::anyhow!(e))
    }
}

async fn tailor(config: &AppConfig, args: TailorArgs) -> Result<()> {
    // === Profile ===
    let raw = std::fs::read_to_string(&args.profile)
        .with_context(|| format!("cannot read profile {}", args.profile.display()))?;
    let document = ProfileDocument::from_json(&raw).context("profile is not valid JSON")?;
    let profiles = InMemoryProfileStore::new();
    let user_id = document.seed(&profiles).await.context("invalid profile")?;

    let job_description = std::fs::read_to_string(&args.job)
        .with_context(|| format!("cannot read job description {}", args.job.display()))?;

    // === Dependency Injection ===
    let ai: Arc<dyn ResumeAI> = if args.offline {
        info!("using offline scripted backend");
        Arc::new(ScriptedResumeAI::new())
    } else {
        let provider = AnthropicProvider::new(config.ai.anthropic()?)?;
        let mut backend = LlmResumeAI::new(Arc::new(provider)).with_max_tokens(config.ai.max_tokens);
        if let Some(temperature) = config.ai.temperature {
            backend = backend.with_temperature(temperature);
        }
        Arc::new(ResilientResumeAI::new(backend).with_policy(config.ai.retry_policy()))
    };
    let resumes = Arc::new(InMemoryResumeRepository::new());
    let tailor = Arc::new(ResumeTailor::new(ai, Arc::new(profiles)));

    // === Options ===
    let mut options = config.tailoring.options()?;
    if let Some(max) = args.max_bullets {
        options = options.with_max_bullets(max);
    }
    if let Some(max) = args.max_per_experience {
        options = options.with_max_bullets_per_experience((max > 0).then_some(max));
    }
    if let Some(style) = args.style {
        options = options.with_style(style);
    }
    if !args.include_types.is_empty() {
        options = options.with_include_types(args.include_types);
    }
    if !args.highlight.is_empty() {
        options = options.with_highlight_skills(args.highlight);
    }
    let language = args.language.unwrap_or(config.tailoring.language()?);
    options = options.with_target_language(language.clone());

    // === Run ===
    let mut create = CreateResumeCommand::new(user_id.clone(), job_description);
    create.target_language = Some(language.code().to_string());
    let draft = CreateResumeHandler::new(resumes.clone()).handle(create).await?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let handler = TailorResumeHandler::new(resumes, tailor);
    let command = TailorResumeCommand {
        resume_id: *draft.resume.id(),
        user_id,
        options,
    };
    let result = match handler.handle(command, cancel).await {
        Ok(result) => result,
        Err(err) => {
            tracing::error!(code = %err.code(), error = %err, "tailoring failed");
            bail!(err.user_message());
        }
    };

    if !result.outcome.dropped_ids.is_empty() {
        info!(dropped = result.outcome.dropped_ids.len(), "ignored unknown bullet ids");
    }
    println!("{}", serde_json::to_string_pretty(&result.resume)?);
    Ok(())
}
