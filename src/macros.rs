//! Utility macros for the lexer.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_RULE!` - Creates a rule definition for the rule table
//!
//! These macros keep the rule table readable as a list of
//! (pattern, category, transition) rows.

/// Creates a Token instance.
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenCategory::NumberInteger, "42", 0);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($category:expr, $text:expr, $start:expr) => {
        Token {
            category: $category,
            text: $text,
            start: $start,
        }
    };
}

/// Creates a `RuleDef` row.
///
/// The transition defaults to `Stay`; a trailing `=> State::X` pushes `X`,
/// `=> push` pushes the current state again and `=> pop` pops it. A category
/// list in brackets emits one token per capture group.
///
/// # Example
///
/// ```ignore
/// MK_RULE!(r"#\*", TokenCategory::CommentMultiline => State::MultilineComment)
/// MK_RULE!(r"\*#", TokenCategory::CommentMultiline => pop)
/// MK_RULE!(r"(a)(b)", [TokenCategory::Operator, TokenCategory::Punctuation])
/// ```
#[macro_export]
macro_rules! MK_RULE {
    (@transition) => { Transition::Stay };
    (@transition push) => { Transition::PushSelf };
    (@transition pop) => { Transition::Pop };
    (@transition $state:expr) => { Transition::Push($state) };

    ($pattern:expr, [$($category:expr),+ $(,)?] $(=> $($next:tt)+)?) => {
        RuleDef::Rule {
            pattern: String::from($pattern),
            action: Action::ByGroups(vec![$($category),+]),
            transition: $crate::MK_RULE!(@transition $($($next)+)?),
            guard: None,
        }
    };
    ($pattern:expr, $category:expr $(=> $($next:tt)+)?) => {
        RuleDef::Rule {
            pattern: String::from($pattern),
            action: Action::Emit($category),
            transition: $crate::MK_RULE!(@transition $($($next)+)?),
            guard: None,
        }
    };
}
