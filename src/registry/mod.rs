//! Lookup of lexers by alias or file name.
//!
//! A `LexerRegistry` is built once by whoever needs it and handed around,
//! there is no global registration.

pub mod registry;

#[cfg(test)]
mod tests;
