use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use sheetchat_core::{CellRange, ChatConfig, SheetChat};
use std::path::PathBuf;

mod formatter;

#[derive(Parser)]
#[command(name = "sheetchat")]
#[command(about = "Ask a chat-completion API questions about spreadsheet data", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the Excel/ODS file to query
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Question to ask about the data
    #[arg(value_name = "QUESTION")]
    question: String,

    /// Cell range to include (e.g. A1:B10); defaults to the configured range
    #[arg(short, long, value_name = "RANGE")]
    range: Option<String>,

    /// Send the whole active sheet instead of a range
    #[arg(long, conflicts_with = "range")]
    full_sheet: bool,

    /// Path to configuration file (TOML)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// API key (falls back to DEEPSEEK_API_KEY, then the config file)
    #[arg(long, value_name = "KEY")]
    api_key: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "human")]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON output for scripting
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(&cli)?;
    if let Some(key) = cli
        .api_key
        .clone()
        .or_else(|| std::env::var("DEEPSEEK_API_KEY").ok())
    {
        config.api_key = key;
    }
    if config.api_key.is_empty() {
        anyhow::bail!(
            "no API key configured; pass --api-key, set DEEPSEEK_API_KEY, or add api_key to the config file"
        );
    }

    let range = resolve_range(&cli, &config)?;
    let chat = SheetChat::new(config).context("failed to build chat client")?;

    // Validate the selected file up front, before dispatching the query.
    sheetchat_core::read_range(&cli.file, range.as_ref())
        .with_context(|| format!("failed to read file: {}", cli.file.display()))?;

    let handle = chat.ask_background(cli.file.clone(), range, cli.question.clone());

    // The handle always completes, so this renders either an answer or an
    // error and the process never hangs on a lost worker.
    match handle.wait() {
        Ok(answer) => match cli.format {
            OutputFormat::Human => formatter::print_human(&cli.file, &cli.question, &answer),
            OutputFormat::Json => formatter::print_json(&cli.file, &cli.question, Ok(&answer))?,
        },
        Err(err) => {
            match cli.format {
                OutputFormat::Human => formatter::print_error_human(&err),
                OutputFormat::Json => formatter::print_json(&cli.file, &cli.question, Err(&err))?,
            }
            std::process::exit(1);
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<ChatConfig> {
    if let Some(config_path) = &cli.config {
        ChatConfig::from_file(config_path)
            .with_context(|| format!("failed to load config from {}", config_path.display()))
    } else {
        // Try to load default config from current directory if it exists
        let default_config_path = PathBuf::from("sheetchat.toml");
        if default_config_path.exists() {
            ChatConfig::from_file(&default_config_path).with_context(|| {
                format!(
                    "failed to load config from {}",
                    default_config_path.display()
                )
            })
        } else {
            Ok(ChatConfig::default())
        }
    }
}

fn resolve_range(cli: &Cli, config: &ChatConfig) -> Result<Option<CellRange>> {
    if cli.full_sheet {
        return Ok(None);
    }
    let spec = cli.range.as_deref().unwrap_or(&config.default_range);
    if spec.is_empty() {
        return Ok(None);
    }
    let range = spec
        .parse()
        .with_context(|| format!("invalid range: {spec}"))?;
    Ok(Some(range))
}
