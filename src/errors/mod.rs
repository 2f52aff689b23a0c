//! Error types for the lexer crate.
//!
//! Lexing itself never fails: unrecognised input degrades to plain text.
//! The errors here come from the edges of the crate:
//!
//! - Building the rule table from its pattern source
//! - Looking a lexer up by alias or file name
//! - Reading input files in the command-line front end

pub mod errors;

#[cfg(test)]
mod tests;
