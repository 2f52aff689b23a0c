//! Lexical analysis for Idio source text.
//!
//! This module contains the rule-driven lexer used for highlighting. It
//! handles:
//!
//! - The ordered, named rule states (`rules`)
//! - The token categories handed to renderers (`tokens`)
//! - The state-stack engine that applies them (`lexer`)
//!
//! Lexing never fails: anything unrecognised comes out as plain text.

pub mod lexer;
pub mod rules;
pub mod tokens;
