use std::path::Path;

use tracing::warn;

use crate::{
    console::console::ConsoleLexer,
    errors::errors::{Error, ErrorImpl},
    lexer::{lexer::Lexer, tokens::Token},
};

pub type TokenStream<'a> = Box<dyn Iterator<Item = Token<'a>> + 'a>;

/// A named lexer a renderer can pick by alias or file name.
pub trait SourceLexer {
    fn name(&self) -> &'static str;
    fn aliases(&self) -> &'static [&'static str];
    /// Glob patterns such as `*.idio`.
    fn filenames(&self) -> &'static [&'static str];
    fn tokens<'a>(&self, text: &'a str) -> TokenStream<'a>;
}

pub struct IdioLexer;

impl SourceLexer for IdioLexer {
    fn name(&self) -> &'static str {
        "Idio"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["idio"]
    }

    fn filenames(&self) -> &'static [&'static str] {
        &["*.idio"]
    }

    fn tokens<'a>(&self, text: &'a str) -> TokenStream<'a> {
        Box::new(Lexer::new(text))
    }
}

pub struct IdioConsoleLexer;

impl SourceLexer for IdioConsoleLexer {
    fn name(&self) -> &'static str {
        "Idio Console Session"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["idio-console"]
    }

    fn filenames(&self) -> &'static [&'static str] {
        &["*.idio-console"]
    }

    fn tokens<'a>(&self, text: &'a str) -> TokenStream<'a> {
        Box::new(ConsoleLexer::new(text))
    }
}

#[derive(Default)]
pub struct LexerRegistry {
    lexers: Vec<Box<dyn SourceLexer>>,
}

impl LexerRegistry {
    pub fn new() -> Self {
        LexerRegistry { lexers: vec![] }
    }

    pub fn with_defaults() -> Self {
        let mut registry = LexerRegistry::new();
        registry.register(Box::new(IdioLexer));
        registry.register(Box::new(IdioConsoleLexer));
        registry
    }

    /// Adds a lexer. Aliases already taken keep pointing at the earlier
    /// registration.
    pub fn register(&mut self, lexer: Box<dyn SourceLexer>) {
        for alias in lexer.aliases() {
            if let Some(existing) = self.find(|candidate| candidate.aliases().contains(alias)) {
                warn!(
                    alias,
                    existing = existing.name(),
                    ignored = lexer.name(),
                    "duplicate lexer alias"
                );
            }
        }

        self.lexers.push(lexer);
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.lexers.iter().map(|lexer| lexer.name()).collect()
    }

    pub fn by_alias(&self, alias: &str) -> Result<&dyn SourceLexer, Error> {
        self.find(|lexer| lexer.aliases().iter().any(|candidate| *candidate == alias))
            .ok_or_else(|| {
                Error::new(ErrorImpl::UnknownLexer {
                    alias: alias.to_string(),
                })
            })
    }

    pub fn for_filename(&self, path: &Path) -> Result<&dyn SourceLexer, Error> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        self.find(|lexer| {
            lexer
                .filenames()
                .iter()
                .any(|pattern| glob_matches(pattern, &file_name))
        })
        .ok_or_else(|| {
            Error::new(ErrorImpl::NoLexerForFile {
                file: path.to_string_lossy().into_owned(),
            })
        })
    }

    fn find<F>(&self, predicate: F) -> Option<&dyn SourceLexer>
    where
        F: Fn(&dyn SourceLexer) -> bool,
    {
        self.lexers
            .iter()
            .map(|lexer| lexer.as_ref())
            .find(|lexer| predicate(*lexer))
    }
}

// Only `*suffix` and literal names occur in lexer file patterns.
fn glob_matches(pattern: &str, file_name: &str) -> bool {
    match pattern.strip_prefix('*') {
        Some(suffix) => file_name.len() > suffix.len() && file_name.ends_with(suffix),
        None => pattern == file_name,
    }
}
