use std::{collections::VecDeque, mem::take};

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::{
    lexer::{
        lexer::Lexer,
        rules::{RuleTable, IDIO_RULES},
        tokens::{Token, TokenCategory},
    },
    MK_TOKEN,
};

lazy_static! {
    static ref PROMPTED: Regex =
        Regex::new(r"\A(\w+>\s+)(.*\n?)").expect("prompt pattern must compile");
}

/// How a transcript line is treated.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum LineKind<'a> {
    /// Follows a line whose code ended in a backslash.
    Continuation,
    Prompted { prompt: &'a str, code: &'a str },
    Output,
}

/// A prompt taken out of the code, to be put back at `offset` bytes into
/// the accumulated code.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Insertion {
    pub offset: usize,
    pub len: usize,
}

/// A length-only token: positions are implied by order.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Piece {
    pub category: TokenCategory,
    pub len: usize,
}

/// Splices prompt pieces into a code token stream.
///
/// `tokens` are `(start, piece)` pairs relative to the accumulated code and
/// must tile it. A prompt landing inside a token splits that token around it;
/// prompts at or past the end of the code come last.
pub fn do_insertions<I>(insertions: &[Insertion], tokens: I) -> Vec<Piece>
where
    I: IntoIterator<Item = (usize, Piece)>,
{
    let mut out = vec![];
    let mut insertions = insertions.iter().peekable();

    for (start, piece) in tokens {
        let mut consumed = 0;

        while let Some(insertion) = insertions.peek() {
            if start + piece.len < insertion.offset {
                break;
            }

            let split = insertion.offset.saturating_sub(start).clamp(consumed, piece.len);
            if split > consumed {
                out.push(Piece {
                    category: piece.category,
                    len: split - consumed,
                });
            }
            out.push(Piece {
                category: TokenCategory::GenericPrompt,
                len: insertion.len,
            });

            consumed = split;
            insertions.next();
        }

        if consumed < piece.len {
            out.push(Piece {
                category: piece.category,
                len: piece.len - consumed,
            });
        }
    }

    out.extend(insertions.map(|insertion| Piece {
        category: TokenCategory::GenericPrompt,
        len: insertion.len,
    }));
    out
}

/// Whether a line of code ends in a backslash escaping its newline.
pub fn ends_in_continuation(code: &str) -> bool {
    let Some(body) = code.strip_suffix('\n') else {
        return false;
    };
    let body = body.strip_suffix('\r').unwrap_or(body);

    body.chars().rev().take_while(|c| *c == '\\').count() % 2 == 1
}

/// Lexes an interactive session transcript.
///
/// Lines starting `name> ` are prompts followed by code; every other line
/// is program output. Consecutive prompted lines (and backslash
/// continuations) are lexed together as one piece of code, then the
/// prompts are spliced back in so the tokens tile the transcript.
pub struct ConsoleLexer<'a> {
    table: &'a RuleTable,
    source: &'a str,
    pos: usize,
    continuation: bool,
    batch_start: usize,
    code: String,
    insertions: Vec<Insertion>,
    pending: VecDeque<Token<'a>>,
}

impl<'a> ConsoleLexer<'a> {
    pub fn new(source: &'a str) -> ConsoleLexer<'a> {
        ConsoleLexer::with_rules(&IDIO_RULES, source)
    }

    pub fn with_rules(table: &'a RuleTable, source: &'a str) -> ConsoleLexer<'a> {
        ConsoleLexer {
            table,
            source,
            pos: 0,
            continuation: false,
            batch_start: 0,
            code: String::new(),
            insertions: vec![],
            pending: VecDeque::new(),
        }
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn classify(&self, line: &'a str) -> LineKind<'a> {
        if self.continuation {
            return LineKind::Continuation;
        }

        match PROMPTED.captures(line) {
            Some(captures) => match (captures.get(1), captures.get(2)) {
                (Some(prompt), Some(code)) => LineKind::Prompted {
                    prompt: prompt.as_str(),
                    code: code.as_str(),
                },
                _ => LineKind::Output,
            },
            None => LineKind::Output,
        }
    }

    fn next_line(&mut self) -> (usize, &'a str) {
        let source = self.source;
        let rest = &source[self.pos..];
        let len = rest.find('\n').map_or(rest.len(), |i| i + 1);
        let start = self.pos;

        self.pos += len;
        (start, &rest[..len])
    }

    fn process_line(&mut self) {
        let (start, line) = self.next_line();

        match self.classify(line) {
            LineKind::Continuation => {
                self.code.push_str(line);
                self.continuation = ends_in_continuation(line);
            }
            LineKind::Prompted { prompt, code } => {
                if self.insertions.is_empty() {
                    self.batch_start = start;
                }

                self.insertions.push(Insertion {
                    offset: self.code.len(),
                    len: prompt.len(),
                });
                self.code.push_str(code);
                self.continuation = ends_in_continuation(code);
            }
            LineKind::Output => {
                self.flush();
                self.pending
                    .push_back(MK_TOKEN!(TokenCategory::GenericOutput, line, start));
            }
        }
    }

    /// Lexes the accumulated code and queues it with its prompts restored.
    fn flush(&mut self) {
        if self.insertions.is_empty() {
            return;
        }

        let code = take(&mut self.code);
        let insertions = take(&mut self.insertions);

        debug!(
            start = self.batch_start,
            code_len = code.len(),
            prompts = insertions.len(),
            "lexing console input"
        );

        let tokens = if code.is_empty() {
            vec![]
        } else {
            Lexer::with_rules(self.table, &code)
                .map(|token| {
                    (
                        token.start,
                        Piece {
                            category: token.category,
                            len: token.text.len(),
                        },
                    )
                })
                .collect()
        };

        let source = self.source;
        let mut offset = self.batch_start;
        for piece in do_insertions(&insertions, tokens) {
            self.pending.push_back(MK_TOKEN!(
                piece.category,
                &source[offset..offset + piece.len],
                offset
            ));
            offset += piece.len;
        }
    }
}

impl<'a> Iterator for ConsoleLexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
            }

            if self.at_eof() {
                // no-op once the last batch has gone out
                self.flush();
                return self.pending.pop_front();
            }

            self.process_line();
        }
    }
}

pub fn tokenize_console(source: &str) -> Vec<Token<'_>> {
    ConsoleLexer::new(source).collect()
}
