//! Interactive initialization for stressbot.
//!
//! Writes a `stressbot.toml` in the working directory with user-selected
//! defaults.

use anyhow::{Context, Result};
use colored::Colorize;
use dialoguer::{Confirm, Input, Select};
use std::fs;
use std::path::Path;

use crate::config::CONFIG_FILE_NAME;

struct GeneratorInfo {
    display_name: &'static str,
    config_name: &'static str,
}

const GENERATORS: &[GeneratorInfo] = &[
    GeneratorInfo {
        display_name: "OpenAI-compatible API",
        config_name: "openai",
    },
    GeneratorInfo {
        display_name: "Canned (offline, no API key)",
        config_name: "canned",
    },
];

pub fn handle_init(working_dir: &Path) -> Result<()> {
    eprintln!("{}", "Setting up stressbot...".bold());
    eprintln!();

    let config_path = working_dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        let overwrite = Confirm::new()
            .with_prompt(format!("{} already exists. Overwrite?", CONFIG_FILE_NAME))
            .default(false)
            .interact()?;
        if !overwrite {
            eprintln!("Keeping the existing configuration.");
            return Ok(());
        }
    }

    let selection = Select::new()
        .with_prompt("Text-generation backend")
        .items(
            &GENERATORS
                .iter()
                .map(|g| g.display_name)
                .collect::<Vec<_>>(),
        )
        .default(0)
        .interact()?;
    let generator = GENERATORS[selection].config_name;

    let model: String = Input::new()
        .with_prompt("Model")
        .default("gpt-4o-mini".to_string())
        .interact_text()?;

    let output: String = Input::new()
        .with_prompt("Results CSV file")
        .default("csss_responses.csv".to_string())
        .interact_text()?;

    let study: String = Input::new()
        .with_prompt("Study tag")
        .default("model1".to_string())
        .interact_text()?;

    let rephrase = Confirm::new()
        .with_prompt("Reword inventory items via the generator?")
        .default(true)
        .interact()?;

    let content = format!(
        r#"# stressbot project configuration
study = "{study}"
generator = "{generator}"
model = "{model}"
output = "{output}"
rephrase = {rephrase}
"#
    );

    fs::write(&config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    eprintln!();
    eprintln!(
        "{} Wrote {}",
        "✓".bright_green(),
        config_path.display().to_string().bold()
    );
    if generator == "openai" {
        eprintln!(
            "  {} Set {} (or {}) before running sessions.",
            "·".dimmed(),
            "STRESSBOT_API_KEY".bold(),
            "OPENAI_API_KEY".bold()
        );
    }

    Ok(())
}
