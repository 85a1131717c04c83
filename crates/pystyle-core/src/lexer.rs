//! Tolerant lexer for Python-style source text.
//!
//! [`tokenize`] produces a lazy, finite token stream. Each call returns an
//! independent [`Lexer`]; no state is shared across calls, so tokenization is
//! a pure function of the input text.
//!
//! The lexer never fails: unterminated strings, indentation that matches no
//! enclosing level, and unknown characters all become [`TokenKind::Error`]
//! tokens and scanning continues at the next safe point.

use crate::types::{Position, Span};
use std::collections::VecDeque;

/// Keywords of the linted language.
pub const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class", "continue",
    "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if", "import",
    "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try", "while",
    "with", "yield",
];

/// Classification of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A name: variable, function, attribute, module.
    Identifier,
    /// A reserved word from [`KEYWORDS`].
    Keyword,
    /// A string literal, including prefix and quotes.
    StringLiteral,
    /// An integer, float, or imaginary literal.
    NumberLiteral,
    /// An operator or delimiter, including brackets and `=`.
    Operator,
    /// A `#` comment, excluding any trailing whitespace.
    Comment,
    /// A physical line end. The token text holds any trailing inline
    /// whitespace plus the terminator, so whitespace rules never re-read
    /// the raw source.
    Newline,
    /// An increase in indentation depth; text is the leading whitespace.
    Indent,
    /// A decrease in indentation depth; zero-width.
    Dedent,
    /// End of the token stream; zero-width, emitted exactly once.
    EndOfInput,
    /// A recovery token covering text the lexer could not interpret.
    Error,
}

impl TokenKind {
    /// Returns true for tokens that carry no statement content.
    #[must_use]
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Comment | Self::Newline | Self::Indent | Self::Dedent | Self::EndOfInput
        )
    }
}

/// One lexical token; `text` is a slice of the original source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// The covered source text.
    pub text: &'a str,
    /// Where the token sits in the source.
    pub span: Span,
}

impl<'a> Token<'a> {
    /// Returns true if this token is the given keyword.
    #[must_use]
    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == word
    }

    /// Returns true if this token is the given operator.
    #[must_use]
    pub fn is_operator(&self, op: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == op
    }
}

/// Tokenizes source text into a lazy sequence of tokens.
///
/// The sequence is finite and always ends with a single
/// [`TokenKind::EndOfInput`] token (preceded by any pending dedents).
#[must_use]
pub fn tokenize(source: &str) -> Lexer<'_> {
    Lexer::new(source)
}

/// Lazy token iterator over one source text.
pub struct Lexer<'a> {
    source: &'a str,
    offset: usize,
    line: usize,
    column: usize,
    indent_stack: Vec<usize>,
    queue: VecDeque<Token<'a>>,
    bracket_depth: usize,
    at_line_start: bool,
    continuation: bool,
    finished: bool,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            offset: 0,
            line: 1,
            column: 1,
            indent_stack: vec![0],
            queue: VecDeque::new(),
            bracket_depth: 0,
            at_line_start: true,
            continuation: false,
            finished: false,
        }
    }

    fn pos(&self) -> Position {
        Position::new(self.line, self.column, self.offset)
    }

    fn rest(&self) -> &'a str {
        &self.source[self.offset..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.rest().chars();
        chars.next();
        chars.next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.offset += ch.len_utf8();
        if ch == '\n' || (ch == '\r' && self.peek() != Some('\n')) {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn token_from(&self, kind: TokenKind, start: Position) -> Token<'a> {
        Token {
            kind,
            text: &self.source[start.offset..self.offset],
            span: Span::new(start, self.pos()),
        }
    }

    /// Processes indentation at the start of a significant logical line.
    ///
    /// Indent handling is suppressed inside brackets, after a backslash
    /// continuation, and on blank or comment-only lines.
    fn begin_line(&mut self) {
        self.at_line_start = false;
        let continued = std::mem::take(&mut self.continuation);
        if self.bracket_depth > 0 || continued {
            return;
        }

        let bytes = self.rest().as_bytes();
        let mut ws_len = 0;
        while ws_len < bytes.len() && matches!(bytes[ws_len], b' ' | b'\t' | b'\x0c') {
            ws_len += 1;
        }
        match self.rest()[ws_len..].chars().next() {
            None | Some('\n' | '\r' | '#') => return,
            Some(_) => {}
        }

        let start = self.pos();
        for _ in 0..ws_len {
            self.bump();
        }
        let ws = &self.source[start.offset..self.offset];
        let width = expanded_width(ws);
        let top = self.indent_stack.last().copied().unwrap_or(0);

        if width > top {
            self.indent_stack.push(width);
            self.queue.push_back(self.token_from(TokenKind::Indent, start));
        } else if width < top {
            while self.indent_stack.last().copied().unwrap_or(0) > width {
                self.indent_stack.pop();
                self.queue.push_back(self.token_from(TokenKind::Dedent, self.pos()));
            }
            if self.indent_stack.last().copied().unwrap_or(0) != width {
                // No enclosing level matches: align to the nearest known
                // level and mark the leading whitespace as unresolvable.
                self.queue.push_back(self.token_from(TokenKind::Error, start));
            }
        }
    }

    /// Emits the end-of-stream suffix: a synthetic newline when the last
    /// line lacks a terminator, pending dedents, then `EndOfInput`.
    fn finish(&mut self) {
        self.finished = true;
        if !self.at_line_start {
            self.queue
                .push_back(self.token_from(TokenKind::Newline, self.pos()));
        }
        while self.indent_stack.len() > 1 {
            self.indent_stack.pop();
            self.queue
                .push_back(self.token_from(TokenKind::Dedent, self.pos()));
        }
        self.queue
            .push_back(self.token_from(TokenKind::EndOfInput, self.pos()));
    }

    /// Scans one token at the current offset. Returns `None` when only
    /// insignificant inline whitespace was consumed.
    fn scan_token(&mut self, first: char) -> Option<Token<'a>> {
        let start = self.pos();
        match first {
            ' ' | '\t' | '\x0c' => {
                while matches!(self.peek(), Some(' ' | '\t' | '\x0c')) {
                    self.bump();
                }
                match self.peek() {
                    // Whitespace running into the line end is trailing
                    // whitespace; fold it into the Newline token.
                    Some('\n' | '\r') => Some(self.scan_newline(start)),
                    None => {
                        self.at_line_start = true;
                        Some(self.token_from(TokenKind::Newline, start))
                    }
                    Some(_) => None,
                }
            }
            '\n' | '\r' => Some(self.scan_newline(start)),
            '#' => Some(self.scan_comment(start)),
            '"' | '\'' => Some(self.scan_string(start)),
            '\\' => {
                self.bump();
                if matches!(self.peek(), Some('\n' | '\r') | None) {
                    self.continuation = true;
                    Some(self.token_from(TokenKind::Operator, start))
                } else {
                    Some(self.token_from(TokenKind::Error, start))
                }
            }
            c if c.is_alphabetic() || c == '_' => Some(self.scan_word(start)),
            c if c.is_ascii_digit() => Some(self.scan_number(start)),
            '.' if self.peek_second().is_some_and(|c| c.is_ascii_digit()) => {
                Some(self.scan_number(start))
            }
            _ => Some(self.scan_operator(start)),
        }
    }

    fn scan_newline(&mut self, start: Position) -> Token<'a> {
        if self.peek() == Some('\r') {
            self.bump();
        }
        if self.peek() == Some('\n') {
            self.bump();
        }
        self.at_line_start = true;
        self.token_from(TokenKind::Newline, start)
    }

    fn scan_comment(&mut self, start: Position) -> Token<'a> {
        let rest = self.rest();
        let line_len = rest.find(['\n', '\r']).unwrap_or(rest.len());
        let content_len = rest[..line_len].trim_end_matches([' ', '\t']).len();
        while self.offset < start.offset + content_len {
            self.bump();
        }
        self.token_from(TokenKind::Comment, start)
    }

    fn scan_word(&mut self, start: Position) -> Token<'a> {
        while self
            .peek()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            self.bump();
        }
        let text = &self.source[start.offset..self.offset];
        if is_string_prefix(text) && matches!(self.peek(), Some('"' | '\'')) {
            return self.scan_string(start);
        }
        let kind = if KEYWORDS.contains(&text) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        self.token_from(kind, start)
    }

    /// Scans a string literal starting at the quote under the cursor.
    /// `start` may precede the quote when a prefix was already consumed.
    fn scan_string(&mut self, start: Position) -> Token<'a> {
        let quote = match self.peek() {
            Some(q @ ('"' | '\'')) => q,
            _ => return self.token_from(TokenKind::Error, start),
        };
        let closer = if quote == '"' { "\"\"\"" } else { "'''" };
        if self.rest().starts_with(closer) {
            self.bump();
            self.bump();
            self.bump();
            loop {
                if self.rest().is_empty() {
                    // Never closed before end-of-input: one Error token to EOF.
                    return self.token_from(TokenKind::Error, start);
                }
                if self.rest().starts_with(closer) {
                    self.bump();
                    self.bump();
                    self.bump();
                    return self.token_from(TokenKind::StringLiteral, start);
                }
                if self.peek() == Some('\\') {
                    self.bump();
                }
                self.bump();
            }
        }

        self.bump();
        loop {
            match self.peek() {
                None | Some('\n' | '\r') => {
                    // Unterminated: recover at the next line start. The
                    // terminator itself is left for the newline scanner.
                    return self.token_from(TokenKind::Error, start);
                }
                Some('\\') => {
                    self.bump();
                    self.bump();
                }
                Some(c) => {
                    self.bump();
                    if c == quote {
                        return self.token_from(TokenKind::StringLiteral, start);
                    }
                }
            }
        }
    }

    fn scan_number(&mut self, start: Position) -> Token<'a> {
        let radix_prefix = self.rest().len() >= 2
            && self.peek() == Some('0')
            && matches!(
                self.peek_second(),
                Some('x' | 'X' | 'o' | 'O' | 'b' | 'B')
            );
        if radix_prefix {
            self.bump();
            self.bump();
            while self
                .peek()
                .is_some_and(|c| c.is_ascii_hexdigit() || c == '_')
            {
                self.bump();
            }
            return self.token_from(TokenKind::NumberLiteral, start);
        }

        while self.peek().is_some_and(|c| c.is_ascii_digit() || c == '_') {
            self.bump();
        }
        if self.peek() == Some('.') && self.peek_second().map_or(true, |c| c.is_ascii_digit()) {
            self.bump();
            while self.peek().is_some_and(|c| c.is_ascii_digit() || c == '_') {
                self.bump();
            }
        }
        if matches!(self.peek(), Some('e' | 'E'))
            && matches!(self.peek_second(), Some(c) if c.is_ascii_digit() || c == '+' || c == '-')
        {
            self.bump();
            if matches!(self.peek(), Some('+' | '-')) {
                self.bump();
            }
            while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.bump();
            }
        }
        if matches!(self.peek(), Some('j' | 'J')) {
            self.bump();
        }
        self.token_from(TokenKind::NumberLiteral, start)
    }

    fn scan_operator(&mut self, start: Position) -> Token<'a> {
        const THREE: &[&str] = &["**=", "//=", ">>=", "<<=", "..."];
        const TWO: &[&str] = &[
            "**", "//", "<<", ">>", "<=", ">=", "==", "!=", "->", ":=", "+=", "-=", "*=", "/=",
            "%=", "@=", "&=", "|=", "^=",
        ];
        const SINGLE: &str = "+-*/%@&|^~<>=(),:.;[]{}";

        let rest = self.rest();
        let matched = THREE
            .iter()
            .chain(TWO.iter())
            .find(|op| rest.starts_with(**op));
        if let Some(op) = matched {
            for _ in 0..op.len() {
                self.bump();
            }
            return self.token_from(TokenKind::Operator, start);
        }

        let Some(ch) = self.peek() else {
            return self.token_from(TokenKind::Error, start);
        };
        self.bump();
        if SINGLE.contains(ch) {
            match ch {
                '(' | '[' | '{' => self.bracket_depth += 1,
                ')' | ']' | '}' => self.bracket_depth = self.bracket_depth.saturating_sub(1),
                _ => {}
            }
            self.token_from(TokenKind::Operator, start)
        } else {
            self.token_from(TokenKind::Error, start)
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        loop {
            if let Some(token) = self.queue.pop_front() {
                return Some(token);
            }
            if self.finished {
                return None;
            }
            if self.rest().is_empty() {
                self.finish();
                continue;
            }
            if self.at_line_start {
                self.begin_line();
                continue;
            }
            let Some(first) = self.peek() else {
                self.finish();
                continue;
            };
            if let Some(token) = self.scan_token(first) {
                return Some(token);
            }
        }
    }
}

/// Computes the display width of leading whitespace: spaces count 1, tabs
/// advance to the next multiple of 8, formfeed resets the count.
#[must_use]
pub fn expanded_width(ws: &str) -> usize {
    let mut width = 0;
    for ch in ws.chars() {
        match ch {
            ' ' => width += 1,
            '\t' => width = (width / 8 + 1) * 8,
            '\x0c' => width = 0,
            _ => {}
        }
    }
    width
}

fn is_string_prefix(text: &str) -> bool {
    (1..=2).contains(&text.len())
        && text
            .chars()
            .all(|c| matches!(c, 'r' | 'R' | 'b' | 'B' | 'u' | 'U' | 'f' | 'F'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).map(|t| t.kind).collect()
    }

    fn texts_of(source: &str, kind: TokenKind) -> Vec<String> {
        tokenize(source)
            .filter(|t| t.kind == kind)
            .map(|t| t.text.to_string())
            .collect()
    }

    #[test]
    fn empty_source_yields_only_end_of_input() {
        assert_eq!(kinds(""), vec![TokenKind::EndOfInput]);
    }

    #[test]
    fn simple_assignment() {
        use TokenKind::{EndOfInput, Identifier, Newline, NumberLiteral, Operator};
        assert_eq!(
            kinds("x = 1\n"),
            vec![Identifier, Operator, NumberLiteral, Newline, EndOfInput]
        );
    }

    #[test]
    fn keywords_are_recognized() {
        let tokens: Vec<_> = tokenize("def f():\n    pass\n").collect();
        assert!(tokens[0].is_keyword("def"));
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
    }

    #[test]
    fn indent_and_dedent_are_paired() {
        let k = kinds("if x:\n    y = 1\nz = 2\n");
        let indents = k.iter().filter(|k| **k == TokenKind::Indent).count();
        let dedents = k.iter().filter(|k| **k == TokenKind::Dedent).count();
        assert_eq!(indents, 1);
        assert_eq!(dedents, 1);
    }

    #[test]
    fn dedents_flush_at_end_of_input() {
        let k = kinds("if x:\n    if y:\n        z = 1\n");
        let dedents = k.iter().filter(|k| **k == TokenKind::Dedent).count();
        assert_eq!(dedents, 2);
        assert_eq!(*k.last().unwrap(), TokenKind::EndOfInput);
    }

    #[test]
    fn indent_token_preserves_raw_whitespace() {
        let ws = texts_of("if x:\n\t y = 1\n", TokenKind::Indent);
        assert_eq!(ws, vec!["\t ".to_string()]);
    }

    #[test]
    fn unmatched_dedent_recovers_with_error_token() {
        // Body at width 4, then a line at width 2: no enclosing level.
        let tokens: Vec<_> = tokenize("if x:\n    y = 1\n  z = 2\n").collect();
        let error = tokens.iter().find(|t| t.kind == TokenKind::Error).unwrap();
        assert_eq!(error.text, "  ");
        assert_eq!(error.span.start.line, 3);
        // Scanning continued past the bad line.
        assert!(tokens.iter().any(|t| t.text == "z"));
    }

    #[test]
    fn newline_token_carries_trailing_whitespace() {
        let newlines = texts_of("x = 1   \ny = 2\n", TokenKind::Newline);
        assert_eq!(newlines[0], "   \n");
        assert_eq!(newlines[1], "\n");
    }

    #[test]
    fn synthetic_newline_when_terminator_missing() {
        let k = kinds("x = 1");
        assert!(k.contains(&TokenKind::Newline));
        assert_eq!(*k.last().unwrap(), TokenKind::EndOfInput);
    }

    #[test]
    fn comment_excludes_trailing_whitespace() {
        let comments = texts_of("# hello  \n", TokenKind::Comment);
        assert_eq!(comments, vec!["# hello".to_string()]);
        let newlines = texts_of("# hello  \n", TokenKind::Newline);
        assert_eq!(newlines, vec!["  \n".to_string()]);
    }

    #[test]
    fn string_literals_with_prefixes() {
        let strings = texts_of("x = rb'ab'\ny = f\"c{d}\"\n", TokenKind::StringLiteral);
        assert_eq!(strings, vec!["rb'ab'".to_string(), "f\"c{d}\"".to_string()]);
    }

    #[test]
    fn triple_quoted_string_spans_lines() {
        let tokens: Vec<_> = tokenize("s = \"\"\"a\nb\"\"\"\nx = 1\n").collect();
        let s = tokens
            .iter()
            .find(|t| t.kind == TokenKind::StringLiteral)
            .unwrap();
        assert_eq!(s.span.start.line, 1);
        assert_eq!(s.span.end.line, 2);
    }

    #[test]
    fn unterminated_string_recovers_at_next_line() {
        let tokens: Vec<_> = tokenize("s = 'oops\nx = 1\n").collect();
        let error = tokens.iter().find(|t| t.kind == TokenKind::Error).unwrap();
        assert_eq!(error.text, "'oops");
        assert!(tokens.iter().any(|t| t.text == "x"));
    }

    #[test]
    fn unterminated_triple_string_spans_to_end_of_input() {
        let tokens: Vec<_> = tokenize("s = \"\"\"never\nclosed\n").collect();
        let error = tokens.iter().find(|t| t.kind == TokenKind::Error).unwrap();
        assert!(error.text.starts_with("\"\"\"never"));
        assert_eq!(error.span.end.offset, "s = \"\"\"never\nclosed\n".len());
    }

    #[test]
    fn no_indent_tokens_inside_brackets() {
        let k = kinds("x = [\n    1,\n    2,\n]\n");
        assert!(!k.contains(&TokenKind::Indent));
        assert!(!k.contains(&TokenKind::Dedent));
    }

    #[test]
    fn newline_tokens_still_emitted_inside_brackets() {
        let k = kinds("x = [\n    1,\n]\n");
        let newlines = k.iter().filter(|k| **k == TokenKind::Newline).count();
        assert_eq!(newlines, 3);
    }

    #[test]
    fn backslash_continuation_suppresses_indent() {
        let tokens: Vec<_> = tokenize("x = 1 + \\\n    2\n").collect();
        assert!(!tokens.iter().any(|t| t.kind == TokenKind::Indent));
        assert!(tokens.iter().any(|t| t.is_operator("\\")));
    }

    #[test]
    fn multi_char_operators_match_longest() {
        let ops = texts_of("a **= b // c != d\n", TokenKind::Operator);
        assert_eq!(ops, vec!["**=", "//", "!="]);
    }

    #[test]
    fn unknown_character_becomes_error_token() {
        let tokens: Vec<_> = tokenize("x = 1 $ 2\n").collect();
        let error = tokens.iter().find(|t| t.kind == TokenKind::Error).unwrap();
        assert_eq!(error.text, "$");
        assert!(tokens.iter().any(|t| t.text == "2"));
    }

    #[test]
    fn positions_track_line_column_and_offset() {
        let tokens: Vec<_> = tokenize("a = 1\nbb = 2\n").collect();
        let bb = tokens.iter().find(|t| t.text == "bb").unwrap();
        assert_eq!(bb.span.start, Position::new(2, 1, 6));
        assert_eq!(bb.span.end, Position::new(2, 3, 8));
    }

    #[test]
    fn tokenize_is_restartable_and_deterministic() {
        let source = "def f(a, b=2):\n    return a + b\n";
        let first: Vec<_> = tokenize(source).collect();
        let second: Vec<_> = tokenize(source).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn number_forms() {
        let nums = texts_of("a = 0xFF + 1_000 + 3.14 + 1e-3 + 2j\n", TokenKind::NumberLiteral);
        assert_eq!(nums, vec!["0xFF", "1_000", "3.14", "1e-3", "2j"]);
    }

    #[test]
    fn blank_and_comment_lines_do_not_change_indentation() {
        let k = kinds("if x:\n    y = 1\n\n    # note\n    z = 2\n");
        let indents = k.iter().filter(|k| **k == TokenKind::Indent).count();
        assert_eq!(indents, 1);
    }
}
