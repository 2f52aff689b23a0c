//! Unit tests for the lexer registry.

use std::path::Path;

use super::registry::{LexerRegistry, SourceLexer, TokenStream};
use crate::lexer::tokens::TokenCategory;

struct Shadow;

impl SourceLexer for Shadow {
    fn name(&self) -> &'static str {
        "Shadow"
    }

    fn aliases(&self) -> &'static [&'static str] {
        &["idio", "shadow"]
    }

    fn filenames(&self) -> &'static [&'static str] {
        &["*.shadow"]
    }

    fn tokens<'a>(&self, _text: &'a str) -> TokenStream<'a> {
        Box::new(std::iter::empty())
    }
}

#[test]
fn test_default_lexers() {
    let registry = LexerRegistry::with_defaults();

    assert_eq!(registry.names(), vec!["Idio", "Idio Console Session"]);
    assert_eq!(registry.by_alias("idio").unwrap().name(), "Idio");
    assert_eq!(
        registry.by_alias("idio-console").unwrap().name(),
        "Idio Console Session"
    );
}

#[test]
fn test_unknown_alias() {
    let registry = LexerRegistry::with_defaults();
    let error = registry.by_alias("scheme").err().unwrap();

    assert_eq!(error.get_error_name(), "UnknownLexer");
}

#[test]
fn test_lookup_by_file_name() {
    let registry = LexerRegistry::with_defaults();

    assert_eq!(
        registry.for_filename(Path::new("lib/test.idio")).unwrap().name(),
        "Idio"
    );
    assert_eq!(
        registry
            .for_filename(Path::new("session.idio-console"))
            .unwrap()
            .name(),
        "Idio Console Session"
    );
    assert!(registry.for_filename(Path::new(".idio")).is_err());
    assert_eq!(
        registry
            .for_filename(Path::new("notes.txt"))
            .err()
            .unwrap()
            .get_error_name(),
        "NoLexerForFile"
    );
}

#[test]
fn test_first_registration_wins() {
    let mut registry = LexerRegistry::with_defaults();
    registry.register(Box::new(Shadow));

    assert_eq!(registry.by_alias("idio").unwrap().name(), "Idio");
    assert_eq!(registry.by_alias("shadow").unwrap().name(), "Shadow");
}

#[test]
fn test_lexers_produce_tokens() {
    let registry = LexerRegistry::with_defaults();

    let code = registry
        .by_alias("idio")
        .unwrap()
        .tokens("(f)")
        .map(|token| token.category)
        .collect::<Vec<_>>();
    assert_eq!(
        code,
        vec![
            TokenCategory::Punctuation,
            TokenCategory::NameFunction,
            TokenCategory::Punctuation
        ]
    );

    let session = registry
        .by_alias("idio-console")
        .unwrap()
        .tokens("idio> x\nx\n")
        .map(|token| token.category)
        .collect::<Vec<_>>();
    assert_eq!(
        session,
        vec![
            TokenCategory::GenericPrompt,
            TokenCategory::NameVariable,
            TokenCategory::PlainText,
            TokenCategory::GenericOutput
        ]
    );
}
