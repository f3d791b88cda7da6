//! Interactive menu loop.
//!
//! Generic over its input, output, and random source so the whole
//! conversation can be driven from tests.

use std::io::{BufRead, Write};

use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use super::command::Command;
use super::dispatch::{CommandError, Dispatcher, Reply};
use crate::analysis::QualityThresholds;
use crate::codec::WordCount;
use crate::config::{GenerateConfig, SourceKind};
use crate::dictionary::Dictionary;
use crate::entropy::{self, DiceExtractor, DiceProgress};

/// A menu session reading commands from `input` and writing to `output`.
pub struct Session<'d, R, W, G> {
    dispatcher: Dispatcher<'d>,
    input: R,
    output: W,
    rng: G,
    generate: GenerateConfig,
    thresholds: QualityThresholds,
}

impl<'d, R, W, G> Session<'d, R, W, G>
where
    R: BufRead,
    W: Write,
    G: RngCore + CryptoRng,
{
    /// Creates a session with default generation settings.
    pub fn new(dictionary: &'d Dictionary, input: R, output: W, rng: G) -> Self {
        Self {
            dispatcher: Dispatcher::new(dictionary),
            input,
            output,
            rng,
            generate: GenerateConfig::default(),
            thresholds: QualityThresholds::default(),
        }
    }

    /// Overrides the generate defaults.
    pub fn with_generate_config(mut self, generate: GenerateConfig) -> Self {
        self.generate = generate;
        self
    }

    /// Overrides the secure-source sanity thresholds.
    pub fn with_thresholds(mut self, thresholds: QualityThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Runs until Quit or end of input.
    ///
    /// Non-fatal errors are printed and the menu is shown again. A fatal
    /// error (secure source unavailable, broken I/O) ends the session.
    pub fn run(&mut self) -> Result<(), CommandError> {
        loop {
            self.print_menu()?;
            let Some(choice) = self.ask("> Select (1-6 or Q): ")? else {
                return self.farewell();
            };

            let command = match choice.parse::<Command>() {
                Ok(command) => command,
                Err(e) => {
                    writeln!(self.output, "[!] {e}")?;
                    continue;
                }
            };

            let result = match command {
                Command::Quit => return self.farewell(),
                Command::Generate => self.generate(),
                command => match self.ask(command.prompt())? {
                    Some(line) => self.dispatcher.execute(command, &line).map(Some),
                    None => Ok(None),
                },
            };

            match result {
                Ok(Some(reply)) => writeln!(self.output, "{reply}")?,
                Ok(None) => writeln!(self.output, "Operation abandoned.")?,
                Err(e) if e.is_fatal() => {
                    tracing::debug!(error = %e, "Fatal error, ending session");
                    writeln!(self.output, "[!] Fatal: {e}")?;
                    return Err(e);
                }
                Err(e) => {
                    tracing::debug!(error = %e, "Command failed");
                    writeln!(self.output, "[!] Error: {e}")?;
                }
            }
        }
    }

    fn print_menu(&mut self) -> std::io::Result<()> {
        writeln!(self.output, "\n=== BIP39 Offline Tool ===")?;
        for command in Command::MENU {
            writeln!(self.output, "{}) {}", command.key(), command.title())?;
        }
        writeln!(self.output, "{}) {}", Command::Quit.key(), Command::Quit.title())
    }

    fn farewell(&mut self) -> Result<(), CommandError> {
        writeln!(self.output, "Bye.")?;
        self.output.flush()?;
        Ok(())
    }

    /// Prompts and reads one line. `None` at end of input.
    fn ask(&mut self, prompt: &str) -> std::io::Result<Option<Zeroizing<String>>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = Zeroizing::new(String::new());
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    /// Generate flow: word count, source, then source-specific input.
    fn generate(&mut self) -> Result<Option<Reply>, CommandError> {
        let defaults = self.generate.clone();

        let word_count = loop {
            let prompt = format!(
                "Word count (12/15/18/21/24) [{}]:\n> ",
                defaults.default_words
            );
            let Some(answer) = self.ask(&prompt)? else {
                return Ok(None);
            };
            if answer.trim().is_empty() {
                break defaults.default_words;
            }
            match answer.parse::<WordCount>() {
                Ok(word_count) => break word_count,
                Err(e) => writeln!(self.output, "[!] {e}")?,
            }
        };

        let source = loop {
            let prompt = format!(
                "Entropy source: 1) secure random  2) dice  3) manual hex [{}]:\n> ",
                defaults.default_source
            );
            let Some(answer) = self.ask(&prompt)? else {
                return Ok(None);
            };
            match SourceKind::from_choice(&answer, defaults.default_source) {
                Some(source) => break source,
                None => writeln!(self.output, "[!] Choose 1, 2 or 3.")?,
            }
        };

        tracing::info!(words = word_count.words(), %source, "Generating mnemonic");
        let entropy = match source {
            SourceKind::Secure => {
                entropy::generate_secure(&mut self.rng, word_count, &self.thresholds)?
            }
            SourceKind::Hex => {
                let prompt = format!(
                    "Enter {} hex characters of entropy:\n> ",
                    word_count.entropy_bytes() * 2
                );
                let Some(line) = self.ask(&prompt)? else {
                    return Ok(None);
                };
                entropy::parse_hex(&line, word_count.entropy_bytes())?
            }
            SourceKind::Dice => match self.collect_dice(word_count)? {
                Some(extractor) => extractor.into_entropy()?,
                None => return Ok(None),
            },
        };

        Ok(Some(self.dispatcher.encode_entropy(&entropy)))
    }

    /// Prompts for rolls until the extractor is complete.
    ///
    /// `None` if the user abandons with `q` or input ends; the partial
    /// extractor is dropped and wiped.
    fn collect_dice(&mut self, word_count: WordCount) -> Result<Option<DiceExtractor>, CommandError> {
        let mut extractor = DiceExtractor::for_word_count(word_count);
        let mut rejections_reported = 0;
        writeln!(
            self.output,
            "Roll a fair six-sided die and enter each result (1-6). Enter q to abandon."
        )?;

        while !extractor.is_complete() {
            let prompt = format!("Rolls ({} more needed):\n> ", extractor.rolls_needed());
            let Some(line) = self.ask(&prompt)? else {
                return Ok(None);
            };
            if line.trim().eq_ignore_ascii_case("q") {
                return Ok(None);
            }

            let progress = entropy::parse_rolls(&line).and_then(|rolls| extractor.feed(&rolls));
            match progress {
                Ok(DiceProgress::NeedMoreRolls {
                    rejected_batches, ..
                }) if rejected_batches > rejections_reported => {
                    writeln!(
                        self.output,
                        "{} batch(es) of {} rolls fell in the rejection zone and were discarded.",
                        rejected_batches - rejections_reported,
                        entropy::ROLLS_PER_BATCH
                    )?;
                    rejections_reported = rejected_batches;
                }
                Ok(_) => {}
                Err(e) => writeln!(self.output, "[!] {e}; that line was ignored.")?,
            }
        }

        Ok(Some(extractor))
    }
}
