//! The 2048-word table every codec operation indexes into.
//!
//! A dictionary is loaded once at startup, validated, and then shared by
//! reference. Nothing in the crate mutates it after construction.

mod wordlist;

pub use wordlist::{Dictionary, DictionaryError, WORD_COUNT};
