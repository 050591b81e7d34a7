use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

/// Which kind of prompt a log event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptRole {
    Main,
    FollowUp,
}

/// Structured log events for a questionnaire session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LogEvent {
    SessionStarted {
        session_id: String,
        items: usize,
        generator: String,
        rephrase: bool,
    },
    ItemPresented {
        ordinal: usize,
        role: PromptRole,
        rephrased: bool,
    },
    AnswerRecorded {
        ordinal: usize,
        role: PromptRole,
        answer: String,
        score: u8,
        severe: bool,
    },
    ParaphraseFallback {
        ordinal: usize,
        error: String,
    },
    FollowUpArmed {
        ordinal: usize,
    },
    FollowUpSkipped {
        ordinal: usize,
        error: String,
    },
    InventoryComplete {
        items: usize,
        follow_ups: usize,
    },
    SurveyStarted,
    SurveyCompleted,
    ResultAppended {
        destination: String,
    },
    AppendFailed {
        destination: String,
        error: String,
    },
    SessionEnded {
        session_id: String,
        outcome: String,
        duration_secs: f64,
    },
}

impl LogEvent {
    /// Add a timestamp to serialize with the event
    fn with_timestamp(&self) -> serde_json::Value {
        let mut value = serde_json::to_value(self).unwrap_or_default();
        if let Some(obj) = value.as_object_mut() {
            obj.insert(
                "timestamp".to_string(),
                serde_json::Value::String(chrono::Utc::now().to_rfc3339()),
            );
        }
        value
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format with colors
    #[default]
    Pretty,
    /// JSON lines format for machine consumption
    Json,
    /// Compact single-line format
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            "compact" => Ok(LogFormat::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// Logger for session events - handles console output and an optional file mirror
pub struct Logger {
    format: LogFormat,
    file_writer: Option<Mutex<File>>,
}

impl Logger {
    pub fn new(format: LogFormat) -> Self {
        Self {
            format,
            file_writer: None,
        }
    }

    /// Create a logger with file output in addition to console
    pub fn with_file(format: LogFormat, log_path: &Path) -> std::io::Result<Self> {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        Ok(Self {
            format,
            file_writer: Some(Mutex::new(file)),
        })
    }

    pub fn log(&self, event: &LogEvent) {
        // File mirror is always JSON lines
        if let Some(ref writer) = self.file_writer {
            if let Ok(mut file) = writer.lock() {
                let json = event.with_timestamp();
                let _ = writeln!(file, "{}", json);
            }
        }

        match self.format {
            LogFormat::Json => self.log_json(event),
            LogFormat::Pretty => self.log_pretty(event),
            LogFormat::Compact => self.log_compact(event),
        }
    }

    fn log_json(&self, event: &LogEvent) {
        if let Ok(json) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{}", json);
        }
    }

    fn log_pretty(&self, event: &LogEvent) {
        let mut stderr = std::io::stderr();
        match event {
            LogEvent::SessionStarted {
                session_id,
                items,
                generator,
                rephrase,
            } => {
                let _ = writeln!(stderr);
                let _ = writeln!(
                    stderr,
                    "{} {} {}",
                    "▶".bright_cyan(),
                    "session".bright_cyan().bold(),
                    session_id.dimmed()
                );
                let _ = writeln!(
                    stderr,
                    "  {} {} items, generator: {}, rephrase: {}",
                    "·".dimmed(),
                    items,
                    generator,
                    if *rephrase { "on" } else { "off" }
                );
            }
            LogEvent::ItemPresented {
                ordinal,
                role,
                rephrased,
            } => {
                let label = match role {
                    PromptRole::Main => format!("item {}", ordinal + 1),
                    PromptRole::FollowUp => format!("follow-up for item {}", ordinal + 1),
                };
                let suffix = if *rephrased { " (rephrased)" } else { "" };
                let _ = writeln!(stderr, "  {} {}{}", "→".bright_blue(), label, suffix.dimmed());
            }
            LogEvent::AnswerRecorded {
                ordinal,
                role,
                answer,
                score,
                severe,
            } => {
                let marker = if *severe {
                    "⚠".bright_yellow().to_string()
                } else {
                    "✓".bright_green().to_string()
                };
                let role_str = match role {
                    PromptRole::Main => "",
                    PromptRole::FollowUp => " follow-up",
                };
                let _ = writeln!(
                    stderr,
                    "  {} item {}{}: {} ({})",
                    marker,
                    ordinal + 1,
                    role_str,
                    answer,
                    score
                );
            }
            LogEvent::ParaphraseFallback { ordinal, error } => {
                let _ = writeln!(
                    stderr,
                    "  {} item {}: using canonical wording ({})",
                    "⚠".bright_yellow(),
                    ordinal + 1,
                    error.dimmed()
                );
            }
            LogEvent::FollowUpArmed { ordinal } => {
                let _ = writeln!(
                    stderr,
                    "  {} follow-up armed for item {}",
                    "↪".bright_magenta(),
                    ordinal + 1
                );
            }
            LogEvent::FollowUpSkipped { ordinal, error } => {
                let _ = writeln!(
                    stderr,
                    "  {} follow-up skipped for item {} ({})",
                    "⚠".bright_yellow(),
                    ordinal + 1,
                    error.dimmed()
                );
            }
            LogEvent::InventoryComplete { items, follow_ups } => {
                let _ = writeln!(
                    stderr,
                    "  {} inventory complete: {} items, {} follow-ups",
                    "✓".bright_green(),
                    items,
                    follow_ups
                );
            }
            LogEvent::SurveyStarted => {
                let _ = writeln!(stderr, "  {} satisfaction survey", "→".bright_blue());
            }
            LogEvent::SurveyCompleted => {
                let _ = writeln!(stderr, "  {} survey complete", "✓".bright_green());
            }
            LogEvent::ResultAppended { destination } => {
                let _ = writeln!(
                    stderr,
                    "  {} results appended to {}",
                    "✓".bright_green(),
                    destination.bold()
                );
            }
            LogEvent::AppendFailed { destination, error } => {
                let _ = writeln!(
                    stderr,
                    "  {} append to {} failed: {}",
                    "✗".bright_red(),
                    destination,
                    error.bright_red()
                );
            }
            LogEvent::SessionEnded {
                outcome,
                duration_secs,
                ..
            } => {
                let styled = match outcome.as_str() {
                    "completed" => outcome.bright_green().to_string(),
                    "abandoned" => outcome.bright_yellow().to_string(),
                    _ => outcome.bright_red().to_string(),
                };
                let _ = writeln!(
                    stderr,
                    "{} session {} ({:.1}s)",
                    "■".bright_cyan(),
                    styled,
                    duration_secs
                );
                let _ = writeln!(stderr);
            }
        }
    }

    fn log_compact(&self, event: &LogEvent) {
        let mut stderr = std::io::stderr();
        let timestamp = chrono::Utc::now().format("%H:%M:%S");
        let msg = match event {
            LogEvent::SessionStarted {
                session_id, items, ..
            } => format!("[{}] session:start {} items={}", timestamp, session_id, items),
            LogEvent::ItemPresented { ordinal, role, .. } => {
                let role_str = match role {
                    PromptRole::Main => "q",
                    PromptRole::FollowUp => "fu",
                };
                format!("[{}] present:{}:{}", timestamp, role_str, ordinal + 1)
            }
            LogEvent::AnswerRecorded {
                ordinal,
                role,
                score,
                ..
            } => {
                let role_str = match role {
                    PromptRole::Main => "q",
                    PromptRole::FollowUp => "fu",
                };
                format!("[{}] answer:{}:{} score={}", timestamp, role_str, ordinal + 1, score)
            }
            LogEvent::ParaphraseFallback { ordinal, .. } => {
                format!("[{}] fallback:q:{}", timestamp, ordinal + 1)
            }
            LogEvent::FollowUpArmed { ordinal } => {
                format!("[{}] followup:armed:{}", timestamp, ordinal + 1)
            }
            LogEvent::FollowUpSkipped { ordinal, .. } => {
                format!("[{}] followup:skipped:{}", timestamp, ordinal + 1)
            }
            LogEvent::InventoryComplete { items, follow_ups } => {
                format!("[{}] inventory:done items={} followups={}", timestamp, items, follow_ups)
            }
            LogEvent::SurveyStarted => format!("[{}] survey:start", timestamp),
            LogEvent::SurveyCompleted => format!("[{}] survey:done", timestamp),
            LogEvent::ResultAppended { destination } => {
                format!("[{}] sink:ok {}", timestamp, destination)
            }
            LogEvent::AppendFailed { error, .. } => {
                format!("[{}] sink:err {}", timestamp, error)
            }
            LogEvent::SessionEnded {
                outcome,
                duration_secs,
                ..
            } => format!("[{}] session:end {} {:.1}s", timestamp, outcome, duration_secs),
        };
        let _ = writeln!(stderr, "{}", msg);
    }
}
