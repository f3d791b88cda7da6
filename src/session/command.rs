//! Menu commands.

use std::str::FromStr;

use super::CommandError;

/// One menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Check a mnemonic's checksum.
    Validate,
    /// Compute the 24th word from the first 23.
    LastWord,
    /// Complete or repair a 24-word mnemonic.
    Rebuild,
    /// Pack words into compact hex.
    EncodeHex,
    /// Unpack compact hex into words.
    DecodeHex,
    /// Generate a new mnemonic.
    Generate,
    /// Leave the session.
    Quit,
}

impl Command {
    /// Entries in menu order, excluding Quit.
    pub const MENU: [Command; 6] = [
        Command::Validate,
        Command::LastWord,
        Command::Rebuild,
        Command::EncodeHex,
        Command::DecodeHex,
        Command::Generate,
    ];

    /// Selection key shown in the menu.
    pub fn key(self) -> &'static str {
        match self {
            Command::Validate => "1",
            Command::LastWord => "2",
            Command::Rebuild => "3",
            Command::EncodeHex => "4",
            Command::DecodeHex => "5",
            Command::Generate => "6",
            Command::Quit => "Q",
        }
    }

    /// Menu title.
    pub fn title(self) -> &'static str {
        match self {
            Command::Validate => "Validate a mnemonic",
            Command::LastWord => "Compute the 24th word from the first 23",
            Command::Rebuild => "Rebuild a valid 24-word mnemonic",
            Command::EncodeHex => "Encode words to compact hex",
            Command::DecodeHex => "Decode compact hex back to words",
            Command::Generate => "Generate a new mnemonic",
            Command::Quit => "Quit",
        }
    }

    /// Input prompt for single-line commands.
    pub fn prompt(self) -> &'static str {
        match self {
            Command::Validate => "Enter the mnemonic (space-separated words):\n> ",
            Command::LastWord => "Enter the first 23 words (space-separated):\n> ",
            Command::Rebuild => "Enter 23 or 24 words (space-separated):\n> ",
            Command::EncodeHex => "Enter the words (space-separated):\n> ",
            Command::DecodeHex => "Enter hex (3 hex chars per word, 72 for 24 words):\n> ",
            Command::Generate | Command::Quit => "> ",
        }
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "validate" => Ok(Command::Validate),
            "2" | "last-word" => Ok(Command::LastWord),
            "3" | "rebuild" => Ok(Command::Rebuild),
            "4" | "encode-hex" => Ok(Command::EncodeHex),
            "5" | "decode-hex" => Ok(Command::DecodeHex),
            "6" | "generate" => Ok(Command::Generate),
            "q" | "quit" | "exit" => Ok(Command::Quit),
            _ => Err(CommandError::InvalidSelection(s.trim().to_string())),
        }
    }
}
