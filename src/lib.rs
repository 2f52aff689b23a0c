#![allow(clippy::module_inception)]

//! Syntax-highlighting lexers for Idio source and Idio console sessions.
//!
//! [`lexer::lexer::tokenize`] turns source text into categorised tokens
//! that tile the input; [`console::console::tokenize_console`] does the
//! same for transcripts of interactive sessions. Neither can fail.

pub mod console;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod registry;

extern crate regex;

pub use console::console::{tokenize_console, ConsoleLexer};
pub use lexer::{
    lexer::{tokenize, Lexer},
    tokens::{Token, TokenCategory},
};
pub use registry::registry::{LexerRegistry, SourceLexer};
