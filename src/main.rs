//! Mnemonic Codec CLI
//!
//! Runs the interactive menu by default, or a single command when one is
//! given on the command line.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use mnemonic_codec::{
    config::{ConfigError, FileConfig},
    dictionary::{Dictionary, DictionaryError},
    entropy,
    session::{Command, CommandError, Dispatcher, Reply, Session},
    WordCount,
};
use rand_core::{CryptoRng, OsRng, RngCore};
use tracing::{debug, info, warn};

/// Offline BIP39 mnemonic tool.
#[derive(Debug, Parser)]
#[command(name = "mnemonic-codec", version, about)]
struct Cli {
    /// Wordlist file (2048 lines); the built-in English list by default.
    #[arg(long, global = true)]
    wordlist: Option<PathBuf>,

    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    action: Option<Action>,
}

#[derive(Debug, Subcommand)]
enum Action {
    /// Check a mnemonic's checksum (exit status 2 when invalid).
    Validate {
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Compute the 24th word from the first 23.
    LastWord {
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Complete or repair a 24-word mnemonic from 23 or 24 words.
    Rebuild {
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Pack words into compact hex.
    EncodeHex {
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Unpack compact hex into words.
    DecodeHex { hex: String },
    /// Generate a mnemonic from secure randomness or supplied hex.
    Generate {
        /// Word count (12, 15, 18, 21 or 24).
        #[arg(long)]
        words: Option<WordCount>,
        /// Use this hex entropy instead of the secure source.
        #[arg(long)]
        hex: Option<String>,
    },
}

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to load wordlist: {0}")]
    Dictionary(#[from] DictionaryError),
    #[error(transparent)]
    Command(#[from] CommandError),
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging on stderr so stdout carries only results
    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = ctrlc::set_handler(|| {
        eprintln!("\nInterrupted.");
        std::process::exit(130);
    }) {
        warn!("Failed to install interrupt handler: {}", e);
    }

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("[!] {}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<i32, AppError> {
    let mut config = match &cli.config {
        Some(path) => FileConfig::from_file(path)?,
        None => FileConfig::default(),
    };
    if let Some(path) = cli.wordlist {
        config.dictionary.path = Some(path);
    }

    let dictionary = config.dictionary.load()?;
    info!("Mnemonic Codec v{}", mnemonic_codec::VERSION);

    let Some(action) = cli.action else {
        let stdin = std::io::stdin();
        return Ok(run_session(
            &dictionary,
            &config,
            stdin.lock(),
            std::io::stdout(),
            OsRng,
        ));
    };

    let dispatcher = Dispatcher::new(&dictionary);
    let reply = match action {
        Action::Validate { words } => dispatcher.execute(Command::Validate, &words.join(" "))?,
        Action::LastWord { words } => dispatcher.execute(Command::LastWord, &words.join(" "))?,
        Action::Rebuild { words } => dispatcher.execute(Command::Rebuild, &words.join(" "))?,
        Action::EncodeHex { words } => dispatcher.execute(Command::EncodeHex, &words.join(" "))?,
        Action::DecodeHex { hex } => dispatcher.execute(Command::DecodeHex, &hex)?,
        Action::Generate { words, hex } => {
            let word_count = words.unwrap_or(config.generate.default_words);
            let entropy = match hex {
                Some(hex) => entropy::parse_hex(&hex, word_count.entropy_bytes())
                    .map_err(CommandError::from)?,
                None => entropy::generate_secure(&mut OsRng, word_count, &config.health)
                    .map_err(CommandError::from)?,
            };
            dispatcher.encode_entropy(&entropy)
        }
    };

    println!("{}", reply.payload());
    Ok(match reply {
        Reply::Validity(false) => 2,
        _ => 0,
    })
}

/// Runs the interactive menu and returns the exit status.
///
/// The session shows a fatal error on its own output, so it is only logged
/// here.
fn run_session<R, W, G>(
    dictionary: &Dictionary,
    config: &FileConfig,
    input: R,
    output: W,
    rng: G,
) -> i32
where
    R: BufRead,
    W: Write,
    G: RngCore + CryptoRng,
{
    let mut session = Session::new(dictionary, input, output, rng)
        .with_generate_config(config.generate.clone())
        .with_thresholds(config.health.clone());
    match session.run() {
        Ok(()) => 0,
        Err(e) => {
            debug!(error = %e, "Session ended by fatal error");
            1
        }
    }
}
