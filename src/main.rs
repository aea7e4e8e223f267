use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use semver_expr::config::{DEFAULT_LOG_FILTER, LOG_FILTER_ENV};
use semver_expr::expression::Lexer;
use semver_expr::{EngineConfig, ExpressionParser, Version};

#[derive(Parser)]
#[command(name = "semver-expr")]
#[command(version, about = "Evaluate semantic version range expressions")]
struct Cli {
    /// Engine configuration as inline JSON, e.g. '{"parser":{"tildeZeroMinor":"minorWindow"}}'
    #[arg(long, global = true)]
    config: Option<String>,

    /// Write logs to stderr as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check whether each version satisfies the expression
    Check {
        expression: String,
        #[arg(required = true)]
        versions: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// Print the token stream of an expression
    Tokens {
        expression: String,
        #[arg(long)]
        json: bool,
    },
    /// Print the expression with all range shorthands expanded
    Explain { expression: String },
}

#[derive(Serialize)]
struct CheckResult<'a> {
    version: &'a str,
    satisfies: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_json);

    let config = match &cli.config {
        Some(json) => serde_json::from_str::<EngineConfig>(json).context("Invalid --config")?,
        None => EngineConfig::default(),
    };
    debug!(?config, "loaded configuration");
    let parser = ExpressionParser::with_config(config.parser);

    match cli.command {
        Command::Check {
            expression,
            versions,
            json,
        } => {
            let range = parser
                .parse(&expression)
                .with_context(|| format!("Invalid range expression \"{expression}\""))?;

            let mut results = Vec::with_capacity(versions.len());
            for text in &versions {
                let version = Version::parse(text)?;
                results.push(CheckResult {
                    version: text,
                    satisfies: range.interpret(&version),
                });
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                for result in &results {
                    println!("{}\t{}", result.version, result.satisfies);
                }
            }
        }
        Command::Tokens { expression, json } => {
            let tokens = Lexer::new()
                .lex(&expression)
                .with_context(|| format!("Invalid range expression \"{expression}\""))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&tokens)?);
            } else {
                for token in &tokens {
                    println!("{}\t{:?}\t{}", token.position, token.token_type, token.lexeme);
                }
            }
        }
        Command::Explain { expression } => {
            let range = parser
                .parse(&expression)
                .with_context(|| format!("Invalid range expression \"{expression}\""))?;
            println!("{range}");
        }
    }

    Ok(())
}

fn init_logging(json: bool) {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
