//! Lexing of interactive session transcripts.
//!
//! Prompted lines are gathered into code, lexed with the Idio rules and
//! interleaved with the prompts and output lines again.

pub mod console;
