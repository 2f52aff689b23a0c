use std::fmt::Display;

use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
}

impl Error {
    pub fn new(error_impl: ErrorImpl) -> Self {
        Error {
            internal_error: error_impl,
        }
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnknownLexer { .. } => "UnknownLexer",
            ErrorImpl::NoLexerForFile { .. } => "NoLexerForFile",
            ErrorImpl::InvalidRulePattern { .. } => "InvalidRulePattern",
            ErrorImpl::MissingCatchAll { .. } => "MissingCatchAll",
            ErrorImpl::IncludeCycle { .. } => "IncludeCycle",
            ErrorImpl::Io { .. } => "Io",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnknownLexer { alias } => ErrorTip::Suggestion(format!(
                "No lexer is registered as `{}`, try `idio` or `idio-console`",
                alias
            )),
            ErrorImpl::NoLexerForFile { file } => ErrorTip::Suggestion(format!(
                "Cannot guess a lexer for `{}`, pass one with --lexer",
                file
            )),
            ErrorImpl::InvalidRulePattern { .. } => ErrorTip::None,
            ErrorImpl::MissingCatchAll { state } => ErrorTip::Suggestion(format!(
                "State `{}` must end with a rule matching any character",
                state
            )),
            ErrorImpl::IncludeCycle { state } => ErrorTip::Suggestion(format!(
                "State `{}` ends up including itself",
                state
            )),
            ErrorImpl::Io { .. } => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.internal_error)
    }
}

impl From<ErrorImpl> for Error {
    fn from(error_impl: ErrorImpl) -> Self {
        Error::new(error_impl)
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum ErrorImpl {
    #[error("unknown lexer: {alias:?}")]
    UnknownLexer { alias: String },
    #[error("no lexer matches file {file:?}")]
    NoLexerForFile { file: String },
    #[error("invalid pattern {pattern:?} in state {state}")]
    InvalidRulePattern {
        state: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("state {state} has no catch-all rule")]
    MissingCatchAll { state: String },
    #[error("state {state} includes itself")]
    IncludeCycle { state: String },
    #[error("could not read {path:?}: {message}")]
    Io { path: String, message: String },
}
