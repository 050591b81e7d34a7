mod config;
mod init;
mod pages;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use dialoguer::{Input, Select};
use uuid::Uuid;

use stressbot_core::{CompletedSession, Inventory, SessionRunner, SurveyForm};
use stressbot_gen::{create_generator, GenConfig, GeneratorKind};
use stressbot_logging::{init_tracing, LogEvent, LogFormat, Logger, TranscriptWriter};
use stressbot_sink::{CsvSink, ResultSink};

use config::ProjectConfig;

#[derive(Parser, Debug)]
#[command(
    name = "stressbot",
    about = "CSSS stress-inventory chatbot for research study sessions",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// CSV file completed sessions are appended to
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Text-generation backend
    #[arg(short, long, value_enum)]
    generator: Option<GeneratorChoice>,

    /// Model passed to the generation API
    #[arg(short, long)]
    model: Option<String>,

    /// Present every item with its canonical wording, skipping paraphrase calls
    #[arg(long)]
    no_rephrase: bool,

    /// Study/model tag written into each result row
    #[arg(long)]
    study: Option<String>,

    /// Log output format
    #[arg(long, value_enum, default_value = "pretty")]
    log_format: LogFormatChoice,

    /// Tracing filter level (overridden by RUST_LOG)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Print the completed session as JSON after recording it
    #[arg(long)]
    json_output: bool,

    /// Show the effective settings without starting a session
    #[arg(long)]
    dry_run: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a stressbot.toml with interactively chosen defaults
    Init,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GeneratorChoice {
    Openai,
    Canned,
}

impl From<GeneratorChoice> for GeneratorKind {
    fn from(choice: GeneratorChoice) -> Self {
        match choice {
            GeneratorChoice::Openai => GeneratorKind::OpenAi,
            GeneratorChoice::Canned => GeneratorKind::Canned,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatChoice {
    Pretty,
    Json,
    Compact,
}

impl From<LogFormatChoice> for LogFormat {
    fn from(choice: LogFormatChoice) -> Self {
        match choice {
            LogFormatChoice::Pretty => LogFormat::Pretty,
            LogFormatChoice::Json => LogFormat::Json,
            LogFormatChoice::Compact => LogFormat::Compact,
        }
    }
}

/// How a session ended, and the process exit code it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionOutcome {
    Completed,
    Abandoned,
    Failed,
}

impl SessionOutcome {
    fn as_str(&self) -> &'static str {
        match self {
            SessionOutcome::Completed => "completed",
            SessionOutcome::Abandoned => "abandoned",
            SessionOutcome::Failed => "failed",
        }
    }

    fn exit_code(&self) -> i32 {
        match self {
            SessionOutcome::Completed => 0,
            SessionOutcome::Abandoned => 130,
            SessionOutcome::Failed => 2,
        }
    }
}

/// Effective settings after merging CLI flags over stressbot.toml.
struct Settings {
    study: String,
    generator: GeneratorKind,
    gen_config: GenConfig,
    output: PathBuf,
    rephrase: bool,
}

impl Settings {
    fn resolve(cli: &Cli, project: &ProjectConfig) -> Result<Self> {
        let generator = match cli.generator {
            Some(choice) => choice.into(),
            None => match project.generator.as_deref() {
                Some(name) => name
                    .parse::<GeneratorKind>()
                    .map_err(|e| anyhow::anyhow!(e))
                    .context("Invalid `generator` in stressbot.toml")?,
                None => GeneratorKind::Canned,
            },
        };

        let mut gen_config = GenConfig::default();
        if let Some(model) = cli.model.clone().or_else(|| project.model.clone()) {
            gen_config = gen_config.with_model(model);
        }
        if let Some(api_base) = project.api_base.clone() {
            gen_config = gen_config.with_api_base(api_base);
        }
        if let Some(secs) = project.timeout_secs {
            gen_config = gen_config.with_timeout(Duration::from_secs(secs));
        }

        let output = cli
            .output
            .clone()
            .or_else(|| project.output.clone().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("csss_responses.csv"));

        let study = cli
            .study
            .clone()
            .or_else(|| project.study.clone())
            .unwrap_or_else(|| "model1".to_string());

        let rephrase = !cli.no_rephrase && project.rephrase.unwrap_or(true);

        Ok(Self {
            study,
            generator,
            gen_config,
            output,
            rephrase,
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let working_dir = std::env::current_dir().context("Failed to get current directory")?;

    if let Some(Command::Init) = cli.command {
        return init::handle_init(&working_dir);
    }

    let log_format: LogFormat = cli.log_format.into();
    init_tracing(&cli.log_level, log_format);

    let project = ProjectConfig::load(&working_dir)?.unwrap_or_default();
    let settings = Settings::resolve(&cli, &project)?;

    if cli.dry_run {
        println!("=== Dry Run ===");
        println!("Study: {}", settings.study);
        println!("Generator: {}", settings.generator);
        println!("Model: {}", settings.gen_config.model);
        println!("Rephrase: {}", settings.rephrase);
        println!("Output: {}", settings.output.display());
        println!("Inventory: {} items", Inventory::csss().len());
        return Ok(());
    }

    let outcome = run_session(&cli, &settings).await?;
    std::process::exit(outcome.exit_code());
}

async fn run_session(cli: &Cli, settings: &Settings) -> Result<SessionOutcome> {
    let logger = Arc::new(Logger::new(cli.log_format.into()));
    let generator = create_generator(settings.generator, settings.gen_config.clone());

    let session_id = Uuid::new_v4().to_string();
    let started_at = Utc::now();

    let transcript =
        TranscriptWriter::new(&session_id).context("Failed to create session transcript")?;
    transcript.write_start(
        &session_id,
        &settings.study,
        generator.name(),
        Some(&settings.gen_config.model),
        Inventory::csss().len(),
    );

    // Intro page
    let Some(participant) = pages::intro::collect_participant()? else {
        transcript.write_end(SessionOutcome::Abandoned.as_str(), 0.0);
        eprintln!("{}", "Session ended before the questionnaire started.".dimmed());
        return Ok(SessionOutcome::Abandoned);
    };

    let mut runner = SessionRunner::new(
        Inventory::csss(),
        generator.as_ref(),
        logger.clone(),
        settings.rephrase,
    );
    logger.log(&LogEvent::SessionStarted {
        session_id: session_id.clone(),
        items: runner.item_count(),
        generator: generator.name().to_string(),
        rephrase: settings.rephrase,
    });

    // Chat page
    if !pages::chat::run_chat(&mut runner, &transcript).await? {
        let elapsed = runner.elapsed().as_secs_f64();
        transcript.write_end(SessionOutcome::Abandoned.as_str(), elapsed);
        logger.log(&LogEvent::SessionEnded {
            session_id: session_id.clone(),
            outcome: SessionOutcome::Abandoned.as_str().to_string(),
            duration_secs: elapsed,
        });
        return Ok(SessionOutcome::Abandoned);
    }

    // Survey page
    logger.log(&LogEvent::SurveyStarted);
    let form = SurveyForm::standard();
    let Some(survey) = pages::survey::run_survey(&form)? else {
        let elapsed = runner.elapsed().as_secs_f64();
        transcript.write_end(SessionOutcome::Abandoned.as_str(), elapsed);
        logger.log(&LogEvent::SessionEnded {
            session_id: session_id.clone(),
            outcome: SessionOutcome::Abandoned.as_str().to_string(),
            duration_secs: elapsed,
        });
        return Ok(SessionOutcome::Abandoned);
    };
    logger.log(&LogEvent::SurveyCompleted);

    transcript.write_survey(
        survey
            .ratings()
            .iter()
            .map(|(k, a)| (k.clone(), a.score()))
            .collect(),
        survey.feedback().to_vec(),
    );

    let elapsed = runner.elapsed().as_secs_f64();
    let completed = CompletedSession::with_id(
        session_id.clone(),
        started_at,
        settings.study.clone(),
        participant,
        runner.into_records(),
        survey,
    );

    let outcome = persist(&completed, &settings.output, &logger)?;

    transcript.write_end(outcome.as_str(), elapsed);
    logger.log(&LogEvent::SessionEnded {
        session_id,
        outcome: outcome.as_str().to_string(),
        duration_secs: elapsed,
    });

    if outcome == SessionOutcome::Completed {
        pages::thank_you();
    }

    if cli.json_output {
        println!("{}", serde_json::to_string_pretty(&completed)?);
    }

    Ok(outcome)
}

/// Append the finished session to the CSV sink, keeping the row in memory and
/// offering a retry or an alternate file when the append fails.
fn persist(
    completed: &CompletedSession,
    output: &std::path::Path,
    logger: &Logger,
) -> Result<SessionOutcome> {
    let row = completed.to_row();
    let mut sink = CsvSink::new(output);

    loop {
        match sink.append(&row) {
            Ok(()) => {
                logger.log(&LogEvent::ResultAppended {
                    destination: sink.describe(),
                });
                return Ok(SessionOutcome::Completed);
            }
            Err(e) => {
                logger.log(&LogEvent::AppendFailed {
                    destination: sink.describe(),
                    error: e.to_string(),
                });
                eprintln!(
                    "{} Could not record the responses: {}",
                    "✗".bright_red(),
                    e
                );

                let choice = Select::new()
                    .with_prompt("The responses are still in memory. What would you like to do?")
                    .items(&["Try again", "Append to a different file", "Discard this session"])
                    .default(0)
                    .interact_opt()?;

                match choice {
                    Some(0) => continue,
                    Some(1) => {
                        let path: String = Input::new()
                            .with_prompt("New CSV file")
                            .interact_text()?;
                        sink = CsvSink::new(path);
                    }
                    _ => {
                        eprintln!("{}", "Session discarded without recording.".dimmed());
                        return Ok(SessionOutcome::Failed);
                    }
                }
            }
        }
    }
}
