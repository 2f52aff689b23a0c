use std::collections::VecDeque;

use tracing::trace;

use crate::MK_TOKEN;

use super::{
    rules::{RuleTable, State, Transition, IDIO_RULES},
    tokens::{Token, TokenCategory},
};

/// Drives a state stack over one buffer, yielding tokens lazily.
///
/// Every call to [`Iterator::next`] either drains a token queued by a
/// compound rule or matches the top state's rules at the cursor. The first
/// rule that matches wins; when none does, one character is emitted as
/// [`TokenCategory::PlainText`]. Unbalanced regions at end of input simply
/// stop, nothing ever fails.
#[derive(Clone)]
pub struct Lexer<'a> {
    table: &'a RuleTable,
    source: &'a str,
    pos: usize,
    stack: Vec<State>,
    pending: VecDeque<Token<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Lexer<'a> {
        Lexer::with_rules(&IDIO_RULES, source)
    }

    pub fn with_rules(table: &'a RuleTable, source: &'a str) -> Lexer<'a> {
        Lexer {
            table,
            source,
            pos: 0,
            stack: vec![State::Root],
            pending: VecDeque::new(),
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token<'a>) {
        self.pending.push_back(token);
    }

    pub fn state(&self) -> State {
        // the bottom state is never popped
        self.stack.last().copied().unwrap_or(State::Root)
    }

    pub fn state_stack(&self) -> &[State] {
        &self.stack
    }

    pub fn remainder(&self) -> &'a str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn transition(&mut self, transition: Transition) {
        match transition {
            Transition::Stay => return,
            Transition::Push(state) => self.stack.push(state),
            Transition::PushSelf => self.stack.push(self.state()),
            Transition::Pop => {
                if self.stack.len() > 1 {
                    self.stack.pop();
                }
            }
        }

        trace!(pos = self.pos, stack = ?self.stack, "state transition");
    }

    /// Consumes one rule match, or one character if nothing matches.
    fn step(&mut self) {
        let table = self.table;
        let source = self.source;

        for rule in table.rules(self.state()) {
            let Some(found) = rule.match_at(source, self.pos) else {
                continue;
            };

            for part in found.parts {
                let start = self.pos + part.offset;
                self.push(MK_TOKEN!(part.category, &source[start..start + part.len], start));
            }

            self.advance_n(found.len);
            self.transition(rule.transition);
            return;
        }

        let width = self.remainder().chars().next().map_or(1, char::len_utf8);
        trace!(pos = self.pos, state = self.state().name(), "no rule matched");

        self.push(MK_TOKEN!(
            TokenCategory::PlainText,
            &source[self.pos..self.pos + width],
            self.pos
        ));
        self.advance_n(width);
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
            }

            if self.at_eof() {
                return None;
            }

            self.step();
        }
    }
}

pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    Lexer::new(source).collect()
}
