//! Menu session: commands, dispatch, and the interactive loop.
//!
//! The loop is thin glue. Every single-line command is a pure function in
//! [`Dispatcher`]; only generation needs a multi-step conversation, which
//! [`Session`] drives.

mod command;
mod dispatch;
mod repl;

pub use command::Command;
pub use dispatch::{normalize_words, CommandError, Dispatcher, Reply};
pub use repl::Session;
