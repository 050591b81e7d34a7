use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Represents each line type in the session transcript JSONL file.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TranscriptLine {
    SessionStart {
        timestamp: DateTime<Utc>,
        session_id: String,
        study: String,
        generator: String,
        model: Option<String>,
        items: usize,
    },
    Item {
        ordinal: usize,
        prompt: String,
        presented_prompt: String,
        answer: String,
        score: u8,
        timestamp: DateTime<Utc>,
    },
    FollowUp {
        ordinal: usize,
        prompt: String,
        answer: String,
        score: u8,
        timestamp: DateTime<Utc>,
    },
    Survey {
        ratings: Vec<(String, u8)>,
        feedback: Vec<(String, String)>,
        timestamp: DateTime<Utc>,
    },
    SessionEnd {
        outcome: String,
        duration_secs: f64,
        timestamp: DateTime<Utc>,
    },
}

/// Writes session transcripts as JSONL to `<data_dir>/stressbot/sessions/`.
pub struct TranscriptWriter {
    file: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl TranscriptWriter {
    /// Create a transcript in the default sessions directory. The filename is
    /// derived from the current UTC timestamp and a short hash of the session
    /// id, so concurrent sessions never collide.
    pub fn new(session_id: &str) -> io::Result<Self> {
        Self::in_dir(&Self::sessions_dir()?, session_id)
    }

    /// Create a transcript in a custom directory (useful for testing).
    pub fn in_dir(dir: &Path, session_id: &str) -> io::Result<Self> {
        fs::create_dir_all(dir)?;

        let now = Utc::now();
        let timestamp_str = now.format("%Y-%m-%dT%H-%M-%SZ").to_string();

        let mut hasher = Sha256::new();
        hasher.update(session_id.as_bytes());
        let hash = hex::encode(hasher.finalize());
        let short_hash = &hash[..6];

        let filename = format!("{}_{}.jsonl", timestamp_str, short_hash);
        let path = dir.join(filename);

        let file = File::create(&path)?;
        let writer = BufWriter::new(file);

        Ok(Self {
            file: Mutex::new(writer),
            path,
        })
    }

    /// Returns the path to the transcript file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write_start(
        &self,
        session_id: &str,
        study: &str,
        generator: &str,
        model: Option<&str>,
        items: usize,
    ) {
        self.write_line(&TranscriptLine::SessionStart {
            timestamp: Utc::now(),
            session_id: session_id.to_string(),
            study: study.to_string(),
            generator: generator.to_string(),
            model: model.map(String::from),
            items,
        });
    }

    pub fn write_item(
        &self,
        ordinal: usize,
        prompt: &str,
        presented_prompt: &str,
        answer: &str,
        score: u8,
    ) {
        self.write_line(&TranscriptLine::Item {
            ordinal,
            prompt: prompt.to_string(),
            presented_prompt: presented_prompt.to_string(),
            answer: answer.to_string(),
            score,
            timestamp: Utc::now(),
        });
    }

    pub fn write_follow_up(&self, ordinal: usize, prompt: &str, answer: &str, score: u8) {
        self.write_line(&TranscriptLine::FollowUp {
            ordinal,
            prompt: prompt.to_string(),
            answer: answer.to_string(),
            score,
            timestamp: Utc::now(),
        });
    }

    pub fn write_survey(&self, ratings: Vec<(String, u8)>, feedback: Vec<(String, String)>) {
        self.write_line(&TranscriptLine::Survey {
            ratings,
            feedback,
            timestamp: Utc::now(),
        });
    }

    pub fn write_end(&self, outcome: &str, duration_secs: f64) {
        self.write_line(&TranscriptLine::SessionEnd {
            outcome: outcome.to_string(),
            duration_secs,
            timestamp: Utc::now(),
        });
    }

    fn write_line(&self, line: &TranscriptLine) {
        if let Ok(json) = serde_json::to_string(line) {
            if let Ok(mut writer) = self.file.lock() {
                let _ = writeln!(writer, "{}", json);
                let _ = writer.flush();
            }
        }
    }

    fn sessions_dir() -> io::Result<PathBuf> {
        let data_dir = dirs::data_dir().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine data directory",
            )
        })?;
        Ok(data_dir.join("stressbot").join("sessions"))
    }
}
