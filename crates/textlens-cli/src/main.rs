//! TextLens CLI - Sentiment, summaries and embeddings from the terminal
//!
//! Thin client over the TextLens HTTP API.

mod api;
mod config;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::{Input, Password};
use std::fs;

use api::TextLensClient;
use config::Config;

#[derive(Parser)]
#[command(name = "textlens")]
#[command(about = "TextLens CLI - Sentiment, summaries and embeddings", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store the server API key
    Login {
        /// API key (will prompt if not provided)
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },

    /// Sentiment analysis
    Analyze(TextArgs),

    /// Summarize text
    Summarize(TextArgs),

    /// Embedding vector of the text
    Search {
        #[command(flatten)]
        input: TextArgs,
        /// Print the full vector instead of a preview
        #[arg(long)]
        full: bool,
    },

    /// Embed every document of the server's collection
    Vectorize,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set the server URL
    SetUrl {
        /// e.g. http://localhost:3000
        url: String,
    },
}

#[derive(clap::Args)]
struct TextArgs {
    /// Input text (or use -f for file)
    text: Option<String>,
    /// Read text from file
    #[arg(short, long)]
    file: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Login { key } => cmd_login(key).await,
        Commands::Config { action } => cmd_config(action.unwrap_or(ConfigAction::Show)),
        Commands::Analyze(input) => cmd_analyze(input).await,
        Commands::Summarize(input) => cmd_summarize(input).await,
        Commands::Search { input, full } => cmd_search(input, full).await,
        Commands::Vectorize => cmd_vectorize().await,
    }
}

// ============================================
// Command Implementations
// ============================================

fn client() -> Result<TextLensClient> {
    let config = Config::load()?;
    Ok(TextLensClient::new(&config.base_url, config.api_key.as_deref()))
}

fn read_text(input: TextArgs) -> Result<String> {
    match (input.text, input.file) {
        (Some(t), None) => Ok(t),
        (None, Some(f)) => {
            fs::read_to_string(&f).with_context(|| format!("Failed to read file: {}", f))
        }
        (Some(_), Some(_)) => bail!("Cannot specify both text and --file"),
        (None, None) => Input::new()
            .with_prompt("Text")
            .interact_text()
            .context("Failed to read input"),
    }
}

async fn cmd_login(key: Option<String>) -> Result<()> {
    let mut config = Config::load()?;

    let api_key = match key {
        Some(k) => k,
        None => Password::new()
            .with_prompt("API Key")
            .interact()
            .context("Failed to read API key")?,
    };

    let client = TextLensClient::new(&config.base_url, Some(&api_key));
    print!("Testing connection... ");

    match client.health().await {
        Ok(true) => println!("{}", "OK".green()),
        _ => {
            println!("{}", "Failed".red());
            bail!("Could not reach TextLens API at {}", config.base_url);
        }
    }

    config.set_api_key(api_key);
    config.save()?;

    println!("{} API key saved to {:?}", "✓".green(), Config::config_path()?);

    Ok(())
}

fn cmd_config(action: ConfigAction) -> Result<()> {
    let mut config = Config::load()?;

    match action {
        ConfigAction::Show => {
            println!("{}", "Configuration:".bold());
            println!("  Path: {:?}", Config::config_path()?);
            println!("  Base URL: {}", config.base_url);
            println!(
                "  API Key: {}",
                if config.api_key.is_some() { "Set".green() } else { "Not set".red() }
            );
        }
        ConfigAction::SetUrl { url } => {
            config.set_base_url(&url);
            config.save()?;
            println!("{} Base URL set to {}", "✓".green(), config.base_url.cyan());
        }
    }

    Ok(())
}

async fn cmd_analyze(input: TextArgs) -> Result<()> {
    let text = read_text(input)?;
    let result = client()?.analyze(&text).await?;

    let label = match result.sentiment.as_str() {
        "positive" => result.sentiment.green(),
        "negative" => result.sentiment.red(),
        _ => result.sentiment.yellow(),
    };

    println!("  {}", truncate_string(&text, 80).dimmed());
    println!(
        "{} {} (score {:.2}, confidence {:.2})",
        "Sentiment:".bold(),
        label,
        result.score,
        result.confidence
    );

    Ok(())
}

async fn cmd_summarize(input: TextArgs) -> Result<()> {
    let text = read_text(input)?;
    let result = client()?.summarize(&text).await?;

    println!("{}", result.summary);

    Ok(())
}

async fn cmd_search(input: TextArgs, full: bool) -> Result<()> {
    let text = read_text(input)?;
    let result = client()?.search(&text).await?;

    if full {
        println!("{}", serde_json::to_string(&result.embedding)?);
        return Ok(());
    }

    let preview: Vec<String> = result
        .embedding
        .iter()
        .take(5)
        .map(|v| format!("{:.4}", v))
        .collect();

    println!(
        "{} dimensions: [{}, ...]",
        result.dimensions.to_string().green(),
        preview.join(", ")
    );

    Ok(())
}

async fn cmd_vectorize() -> Result<()> {
    println!("Vectorizing collection... ");
    let report = client()?.vectorize().await?;

    println!(
        "{} {}: {} processed, {} updated",
        "✓".green(),
        report.collection.cyan(),
        report.processed,
        report.updated
    );

    if !report.failed.is_empty() {
        println!("{} {} skipped:", "!".yellow(), report.failed.len());
        for failure in report.failed {
            println!(
                "  {} {}",
                failure.document_id.dimmed(),
                truncate_string(&failure.reason, 60)
            );
        }
    }

    Ok(())
}

/// Truncate string safely for UTF-8 (by char count, not bytes)
fn truncate_string(s: &str, max_chars: usize) -> String {
    let chars: Vec<char> = s.chars().take(max_chars).collect();
    if s.chars().count() > max_chars {
        format!("{}...", chars.into_iter().collect::<String>())
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate_string("héllo wörld", 5), "héllo...");
        assert_eq!(truncate_string("short", 10), "short");
    }

    #[test]
    fn test_read_text_rejects_both_sources() {
        let input = TextArgs {
            text: Some("a".to_string()),
            file: Some("b.txt".to_string()),
        };
        assert!(read_text(input).is_err());
    }

    #[test]
    fn test_cli_parses_search_flags() {
        let cli = Cli::try_parse_from(["textlens", "search", "hello", "--full"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Search { full: true, input: TextArgs { text: Some(ref t), .. } } if t == "hello"
        ));
    }
}
