use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    MK_RULE,
};

use super::tokens::TokenCategory;

/// Special forms: the evaluator's closed vocabulary plus the definition
/// operators.
pub const SPECIAL_FORMS: &[&str] = &[
    "begin", "and", "or",
    "escape", "quote", "quasiquote",
    "function", "function+",
    "if", "cond", "else", "=>",
    "set!",
    "define-template", "define-infix-operator", "define-postfix-operator",
    "define", ":=", ":*", ":~", ":$",
    "block",
    "dynamic", "dynamic-let", "dynamic-unset",
    "environ", "environ-let", "environ-unset",
    "trap", "escape-block", "escape-from",
    "include",
];

/// The builtins worth calling out. There are several hundred more.
pub const BUILTINS: &[&str] = &[
    "eq?", "eqv?", "equal?",
    "symbol?", "null?",
    "pair", "pair?", "ph", "pt", "list", "phh", "pht", "pth", "ptt", "set-ph!", "set-pt!",
    "printf", "eprintf", "display", "display*",
    "make-array", "array-ref", "array-set!", "array-push!", "array-length",
    "make-hash", "hash-ref", "hash-set!",
    "define-struct",
    "define-syntax", "syntax-rules",
    "apply", "raise", "call/cc", "setter",
    "prompt", "prompt-at", "control", "control-at", "reset", "unwind-to*",
    "for-each", "do", "case", "not",
    "let", "let*", "letrec",
    "collect-output",
    "C/<",
    "sort",
    "gensym",
    "make-keyword-table", "%properties", "%set-properties!", "keyword-set!",
    "trap-return", "break", "continue", "while",
    "import", "export",
    "bg",
];

/// Standard and job-control infix operators.
pub const INFIX_OPERATORS: &[&str] = &[
    "+", "-", "*", "/",
    "lt", "le", "eq", "ge", "gt",
    "and", "or",
    "C/|",
    "=+", "+=", "=-", "-=",
    ":=", ":~", ":*", ":$", "=",
    ".",
    "|", ">", "<", "2>", ">&", "<&", "2>&",
    "&",
];

// Also admits digits-only symbols, which is why numbers are tried first.
const SYMBOL: &str = r"[\w!%&*+,/:<=>?\^~|\-]+";

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum State {
    Root,
    MultilineComment,
    MultilineSlComment,
    SexpComment,
    Template,
    PathnameTemplate,
    InterpString,
    Bitset,
    Array,
    Hash,
    Block,
}

impl State {
    pub fn name(&self) -> &'static str {
        match self {
            State::Root => "root",
            State::MultilineComment => "multiline-comment",
            State::MultilineSlComment => "multiline-sl-comment",
            State::SexpComment => "sexp-comment",
            State::Template => "template",
            State::PathnameTemplate => "pathname-template",
            State::InterpString => "interp-string",
            State::Bitset => "bitset",
            State::Array => "array",
            State::Hash => "hash",
            State::Block => "block",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Transition {
    Stay,
    Push(State),
    PushSelf,
    Pop,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Action {
    Emit(TokenCategory),
    /// One category per capture group, in group order. Empty groups emit
    /// nothing.
    ByGroups(Vec<TokenCategory>),
}

/// A rule or an `include` of another state's rules, as written in the table
/// source before compilation.
#[derive(Debug, Clone)]
pub enum RuleDef {
    Rule {
        pattern: String,
        action: Action,
        transition: Transition,
        /// The rule only applies when this character immediately precedes
        /// the cursor.
        guard: Option<char>,
    },
    Include(State),
}

/// One piece of a rule match: `offset` is relative to the match start.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Part {
    pub offset: usize,
    pub len: usize,
    pub category: TokenCategory,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct RuleMatch {
    pub len: usize,
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone)]
pub struct Rule {
    pattern: String,
    regex: Regex,
    pub action: Action,
    pub transition: Transition,
    pub guard: Option<char>,
}

impl Rule {
    fn compile(
        state: State,
        pattern: &str,
        action: &Action,
        transition: Transition,
        guard: Option<char>,
    ) -> Result<Rule, Error> {
        let regex = Regex::new(&format!(r"\A(?m:{})", pattern)).map_err(|source| {
            Error::new(ErrorImpl::InvalidRulePattern {
                state: state.name().to_string(),
                pattern: pattern.to_string(),
                source,
            })
        })?;

        Ok(Rule {
            pattern: pattern.to_string(),
            regex,
            action: action.clone(),
            transition,
            guard,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    fn is_catch_all(&self) -> bool {
        self.guard.is_none() && self.pattern == "."
    }

    /// Tries the rule anchored at `pos`. Empty matches never count so that
    /// every successful match makes progress.
    pub fn match_at(&self, source: &str, pos: usize) -> Option<RuleMatch> {
        if let Some(guard) = self.guard {
            if !source[..pos].ends_with(guard) {
                return None;
            }
        }

        let remainder = &source[pos..];

        match &self.action {
            Action::Emit(category) => {
                let found = self.regex.find(remainder)?;
                if found.end() == 0 {
                    return None;
                }

                Some(RuleMatch {
                    len: found.end(),
                    parts: vec![Part {
                        offset: 0,
                        len: found.end(),
                        category: *category,
                    }],
                })
            }
            Action::ByGroups(categories) => {
                let captures = self.regex.captures(remainder)?;
                let whole = captures.get(0)?;
                if whole.end() == 0 {
                    return None;
                }

                let parts = categories
                    .iter()
                    .enumerate()
                    .filter_map(|(i, category)| {
                        let group = captures.get(i + 1)?;
                        if group.is_empty() {
                            return None;
                        }
                        Some(Part {
                            offset: group.start(),
                            len: group.len(),
                            category: *category,
                        })
                    })
                    .collect();

                Some(RuleMatch {
                    len: whole.end(),
                    parts,
                })
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct LexState {
    pub state: State,
    pub rules: Vec<Rule>,
}

/// The compiled, read-only set of lexical states.
#[derive(Debug, Clone)]
pub struct RuleTable {
    states: HashMap<State, LexState>,
}

impl RuleTable {
    /// Compiles rule definitions, flattening `Include`s in place. The root
    /// state must end with the `.` catch-all.
    pub fn from_defs(defs: Vec<(State, Vec<RuleDef>)>) -> Result<RuleTable, Error> {
        let sources: HashMap<State, Vec<RuleDef>> = defs.into_iter().collect();
        let mut states = HashMap::new();

        for state in sources.keys() {
            let mut rules = vec![];
            let mut including = vec![];
            flatten(*state, *state, &sources, &mut including, &mut rules)?;

            states.insert(*state, LexState { state: *state, rules });
        }

        let root_ok = states
            .get(&State::Root)
            .and_then(|root| root.rules.last())
            .is_some_and(Rule::is_catch_all);
        if !root_ok {
            return Err(Error::new(ErrorImpl::MissingCatchAll {
                state: State::Root.name().to_string(),
            }));
        }

        Ok(RuleTable { states })
    }

    pub fn rules(&self, state: State) -> &[Rule] {
        self.states
            .get(&state)
            .map(|lex_state| lex_state.rules.as_slice())
            .unwrap_or(&[])
    }

    pub fn states(&self) -> impl Iterator<Item = &LexState> {
        self.states.values()
    }
}

fn flatten(
    owner: State,
    state: State,
    sources: &HashMap<State, Vec<RuleDef>>,
    including: &mut Vec<State>,
    out: &mut Vec<Rule>,
) -> Result<(), Error> {
    if including.contains(&state) {
        return Err(Error::new(ErrorImpl::IncludeCycle {
            state: state.name().to_string(),
        }));
    }
    including.push(state);

    for def in sources.get(&state).map(Vec::as_slice).unwrap_or(&[]) {
        match def {
            RuleDef::Rule {
                pattern,
                action,
                transition,
                guard,
            } => out.push(Rule::compile(owner, pattern, action, *transition, *guard)?),
            RuleDef::Include(included) => flatten(owner, *included, sources, including, out)?,
        }
    }

    including.pop();
    Ok(())
}

/// `entry\s|entry\s|...` in list order, so earlier spellings win.
fn word_list(words: &[&str]) -> String {
    let alternatives = words
        .iter()
        .map(|word| format!(r"{}\s", regex::escape(word)))
        .collect::<Vec<_>>()
        .join("|");

    format!("({})", alternatives)
}

pub fn idio_rule_defs() -> Vec<(State, Vec<RuleDef>)> {
    use TokenCategory::*;

    vec![
        (State::Root, vec![
            MK_RULE!(r";.*$", Comment),
            MK_RULE!(r"#\*", CommentMultiline => State::MultilineComment),
            MK_RULE!(r"#\|", CommentMultiline => State::MultilineSlComment),
            MK_RULE!(r"#;\s*\(", Comment => State::SexpComment),
            // ellipses are all over the documentation examples
            MK_RULE!(r"\.\.\.", Comment),

            // 3pi/4 and friends
            MK_RULE!(format!(r"\dpi{}", SYMBOL), NameVariable),

            MK_RULE!(r"[-+]?\d+\.\d+[dDeEfFlLsS][-+]?\d+", NumberFloat),
            MK_RULE!(r"[-+]?\d+[dDeEfFlLsS][-+]?\d+", NumberFloat),
            MK_RULE!(r"[-+]?\d+\.\d+", NumberFloat),
            MK_RULE!(r"[-+]?\d+", NumberInteger),
            MK_RULE!(r"#b[0-1]+", NumberBin),
            MK_RULE!(r"#o[0-7]+", NumberOct),
            MK_RULE!(r"#d\d+", NumberInteger),
            MK_RULE!(r"#x[0-9a-fA-F]+", NumberHex),
            // loose, but covers #e1 and #i1.
            MK_RULE!(r"#[ei][-+]?\d\.?", NumberFloat),

            MK_RULE!(r"(#n|#t|#f)", Constant),
            MK_RULE!(r"(#\\\{[^}]+\})", StringChar),
            MK_RULE!(r"(#\\.)", StringChar),
            MK_RULE!(r"(#U\+[0-9a-fA-F]+)", StringChar),

            MK_RULE!(r"#T\{", Punctuation => State::Template),
            MK_RULE!(r"#P\{", Punctuation => State::PathnameTemplate),

            MK_RULE!(r#""(\\\\|\\"|[^"])*""#, StringLiteral),
            MK_RULE!(format!("'{}", SYMBOL), StringSymbol),
            MK_RULE!(r"#S.?\{", Punctuation => State::InterpString),
            MK_RULE!(r"#B\{", Punctuation => State::Bitset),
            MK_RULE!(r"#\[", Punctuation => State::Array),
            MK_RULE!(r"#\{", Punctuation => State::Hash),

            MK_RULE!(
                r"(function\s+)(\()([^)]+)(\))(\s*\{)",
                [NameFunctionMagic, Punctuation, NameVariable, Punctuation, Punctuation]
                => State::Block
            ),
            MK_RULE!(
                format!(r"(function\s+)({})(\s+\{{)", SYMBOL),
                [NameFunctionMagic, NameVariable, Punctuation]
                => State::Block
            ),
            MK_RULE!(
                r"(function\s+)(#n)(\s+\{)",
                [NameFunctionMagic, Constant, Punctuation]
                => State::Block
            ),

            MK_RULE!(word_list(SPECIAL_FORMS), NameFunctionMagic),
            MK_RULE!(word_list(BUILTINS), NameBuiltin),

            // must beat the infix operators so `(+ 1 2)` names a function
            RuleDef::Rule {
                pattern: SYMBOL.to_string(),
                action: Action::Emit(NameFunction),
                transition: Transition::Stay,
                guard: Some('('),
            },

            MK_RULE!(word_list(INFIX_OPERATORS), Operator),

            MK_RULE!(format!(":{}", SYMBOL), Keyword),
            MK_RULE!(format!("'{}", SYMBOL), StringSymbol),
            MK_RULE!(SYMBOL, NameVariable),

            MK_RULE!(r"\{", Punctuation => State::Block),
            MK_RULE!(r"[()]", Punctuation),
            MK_RULE!(r"\s+", PlainText),
            MK_RULE!(r"\\", Punctuation),
            // value-index
            MK_RULE!(r"\.", Operator),
            MK_RULE!(r".", PlainText),
        ]),
        (State::MultilineComment, vec![
            MK_RULE!(r"#\*", CommentMultiline => push),
            MK_RULE!(r"\*#", CommentMultiline => pop),
            MK_RULE!(r"#\|", CommentMultiline => State::MultilineSlComment),
            MK_RULE!(r"[^#*]+", CommentMultiline),
            MK_RULE!(r"[#*]", CommentMultiline),
        ]),
        (State::MultilineSlComment, vec![
            MK_RULE!(r"#\|", CommentMultiline => push),
            MK_RULE!(r"\|#", CommentMultiline => pop),
            MK_RULE!(r"#\*", CommentMultiline => State::MultilineComment),
            MK_RULE!(r"[^#|]+", CommentMultiline),
            MK_RULE!(r"[#|]", CommentMultiline),
        ]),
        (State::SexpComment, vec![
            MK_RULE!(r"\(", Comment => push),
            MK_RULE!(r"\)", Comment => pop),
            MK_RULE!(r"[^()]+", Comment),
        ]),
        (State::Template, vec![
            MK_RULE!(r"\$@?\{", StringInterpolatedDelimiter => State::Block),
            MK_RULE!(r"\$@?", StringInterpolatedDelimiter),
            RuleDef::Include(State::Block),
        ]),
        (State::PathnameTemplate, vec![
            MK_RULE!(r"\}", Punctuation => pop),
            MK_RULE!(r".", StringDouble),
        ]),
        (State::InterpString, vec![
            MK_RULE!(r"\}", Punctuation => pop),
            MK_RULE!(r"[\$%]\{", StringInterpolatedDelimiter => State::Block),
            MK_RULE!(r"[\$%]", StringInterpolatedDelimiter),
            MK_RULE!(r".", StringDouble),
        ]),
        (State::Bitset, vec![
            MK_RULE!(r"\}", Punctuation => pop),
            MK_RULE!(r".", NumberLiteralInContainer),
        ]),
        (State::Array, vec![
            MK_RULE!(r"\]", Punctuation => pop),
            MK_RULE!(r".", NumberLiteralInContainer),
        ]),
        (State::Hash, vec![
            MK_RULE!(r"\}", Punctuation => pop),
            MK_RULE!(r".", NumberLiteralInContainer),
        ]),
        (State::Block, vec![
            MK_RULE!(r"\{", Punctuation => push),
            MK_RULE!(r"\}", Punctuation => pop),
            RuleDef::Include(State::Root),
        ]),
    ]
}

lazy_static! {
    pub static ref IDIO_RULES: RuleTable =
        RuleTable::from_defs(idio_rule_defs()).expect("built-in rule table must compile");
}
