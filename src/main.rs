mod ai;
mod cli;
mod config;
mod exercises;
mod feeds;
mod http;
mod logging;
mod media;
mod session;

use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use ai::{Difficulty, Topic, TutorSettings};
use config::AppConfig;
use exercises::{check_string, codename};
use feeds::{crypto, news, quotes};
use session::Session;

/// Small API exercises and a Physics & Maths tutor for the terminal
#[derive(Parser, Debug)]
#[command(name = "apilab", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a random motivational quote
    Quote,
    /// Print the current Bitcoin price in USD
    Bitcoin,
    /// Look up the price of a cryptocurrency by name
    Price {
        /// CoinGecko id such as bitcoin, ethereum or dogecoin (asked on stdin when omitted)
        name: Option<String>,
    },
    /// List the latest news articles about a keyword
    News {
        /// Search keyword (defaults to [news] query)
        #[arg(short, long)]
        query: Option<String>,
        /// Number of articles to show (defaults to [news] limit)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Check whether each text starts with "The"
    CheckString {
        /// Texts to check (runs the built-in samples when omitted)
        text: Vec<String>,
    },
    /// Generate a spy codename
    Codename {
        /// Agent name (asked on stdin when omitted)
        #[arg(long)]
        name: Option<String>,
        /// Typewriter delay per character in milliseconds
        #[arg(long, default_value_t = 50)]
        delay_ms: u64,
    },
    /// Start the Physics & Maths tutor
    Tutor {
        /// Beginner, Standard, Advanced or Expert
        #[arg(short, long)]
        difficulty: Option<Difficulty>,
        /// Subject area, e.g. "Quantum Physics" or calculus
        #[arg(short, long)]
        topic: Option<Topic>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // .env ファイルから環境変数を読み込む
    dotenvy::dotenv().ok();

    // ログシステムの初期化（process::exit の前に guard を drop して書き出しを完了させる）
    let guard = logging::init_logging();
    info!(command = ?cli.command, "apilab started");

    let code = match run(cli.command).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %format!("{e:#}"), "Command failed");
            eprintln!("apilab: error: {e:#}");
            1
        }
    };

    info!(exit_code = code, "apilab shutting down");
    drop(guard);
    std::process::exit(code);
}

async fn run(command: Command) -> Result<i32> {
    let config = AppConfig::load();

    match command {
        Command::Quote => {
            let client = http::build_client(&config.http)?;
            let quote = quotes::fetch_quote(&client, &config.quotes).await?;
            println!("{}", quotes::format_quote(&quote));
        }
        Command::Bitcoin => {
            let client = http::build_client(&config.http)?;
            print_price(&client, &config, "bitcoin").await?;
        }
        Command::Price { name } => {
            let name = match name {
                Some(n) => n,
                None => prompt_line(
                    "Enter cryptocurrency name (e.g., bitcoin, ethereum, dogecoin): ",
                )?,
            };
            let client = http::build_client(&config.http)?;
            print_price(&client, &config, &name).await?;
        }
        Command::News { query, limit } => {
            let api_key = news::api_key_from_env()?;
            let query = query.unwrap_or_else(|| config.news.query.clone());
            let limit = limit.unwrap_or(config.news.limit);
            let client = http::build_client(&config.http)?;

            match news::fetch_news(&client, &config.news, &api_key, &query, limit).await? {
                news::NewsReport::Articles(articles) => {
                    print!("{}", news::format_articles(&query, &articles));
                }
                news::NewsReport::ApiError(message) => {
                    println!("{}", news::format_api_error(&message));
                }
            }
        }
        Command::CheckString { text } => {
            if text.is_empty() {
                for sample in check_string::SAMPLE_INPUTS {
                    println!("{}", check_string::check_string(sample));
                }
            } else {
                for t in &text {
                    println!("{}", check_string::check_string(t));
                }
            }
        }
        Command::Codename { name, delay_ms } => {
            codename::run_stdio(name, Duration::from_millis(delay_ms))?;
        }
        Command::Tutor { difficulty, topic } => {
            let settings = TutorSettings {
                difficulty: difficulty.unwrap_or(config.tutor.difficulty),
                topic: topic.unwrap_or(config.tutor.topic),
            };
            let client = http::build_client(&config.http)?;
            let mut session = Session::new(&config, settings, client);
            return Ok(session.run().await);
        }
    }

    Ok(0)
}

async fn print_price(client: &reqwest::Client, config: &AppConfig, coin: &str) -> Result<()> {
    match crypto::fetch_price(client, &config.crypto, coin).await? {
        Some(price) => println!("{}", crypto::format_price(&price)),
        None => println!("{}", crypto::format_not_found(coin)),
    }
    Ok(())
}

/// プロンプトを表示して標準入力から 1 行読む。
fn prompt_line(prompt: &str) -> Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{prompt}")?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    Ok(line.trim().to_string())
}
