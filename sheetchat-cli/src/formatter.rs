//! Output formatters for answers and errors

use anyhow::Result;
use colored::*;
use serde::Serialize;
use sheetchat_core::AskError;
use std::path::Path;

/// Print an answer in human-readable format with colors
pub fn print_human(file: &Path, question: &str, answer: &str) {
    println!("{}", format!("File: {}", file.display()).bold());
    println!("{} {}", "Q:".bold(), question);
    println!();
    println!("{}", "Answer:".green().bold());
    println!("{answer}");
}

/// Print an error where the answer would have appeared
pub fn print_error_human(err: &AskError) {
    eprintln!("{} {}", "Error:".red().bold(), render_chain(err));
}

#[derive(Serialize)]
struct JsonReport<'a> {
    file: String,
    question: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    answer: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Print the outcome as JSON for scripting
pub fn print_json(file: &Path, question: &str, outcome: Result<&str, &AskError>) -> Result<()> {
    let report = match outcome {
        Ok(answer) => JsonReport {
            file: file.display().to_string(),
            question,
            answer: Some(answer),
            error: None,
        },
        Err(err) => JsonReport {
            file: file.display().to_string(),
            question,
            answer: None,
            error: Some(render_chain(err)),
        },
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Render an error with its source chain on one line.
fn render_chain(err: &AskError) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(&format!(": {cause}"));
        source = cause.source();
    }
    message
}
