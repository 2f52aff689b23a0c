//! Unit tests for error handling.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};

#[test]
fn test_error_names() {
    let error = Error::new(ErrorImpl::UnknownLexer {
        alias: "scheme".to_string(),
    });
    assert_eq!(error.get_error_name(), "UnknownLexer");

    let error = Error::new(ErrorImpl::MissingCatchAll {
        state: "root".to_string(),
    });
    assert_eq!(error.get_error_name(), "MissingCatchAll");
}

#[test]
fn test_error_display() {
    let error = Error::new(ErrorImpl::NoLexerForFile {
        file: "notes.txt".to_string(),
    });

    assert_eq!(error.to_string(), "no lexer matches file \"notes.txt\"");
}

#[test]
fn test_error_tips() {
    let error = Error::new(ErrorImpl::UnknownLexer {
        alias: "scheme".to_string(),
    });
    assert_eq!(
        error.get_tip().to_string(),
        "No lexer is registered as `scheme`, try `idio` or `idio-console`"
    );

    let error = Error::new(ErrorImpl::Io {
        path: "missing.idio".to_string(),
        message: "not found".to_string(),
    });
    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_invalid_pattern_keeps_its_source() {
    let source = regex::Regex::new("(").err().unwrap();
    let error = Error::from(ErrorImpl::InvalidRulePattern {
        state: "root".to_string(),
        pattern: "(".to_string(),
        source,
    });

    let inner = std::error::Error::source(&error).unwrap();
    assert!(std::error::Error::source(inner).is_some());
    assert_eq!(error.to_string(), "invalid pattern \"(\" in state root");
}
