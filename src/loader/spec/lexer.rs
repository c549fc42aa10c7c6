//! Line-oriented tokenizer for DSP spec files.

use std::path::PathBuf;

use crate::soc::isa::diagnostic::{
    DiagnosticLevel,
    DiagnosticPhase,
    IsaDiagnostic,
    SourcePosition,
    SourceSpan,
};
use crate::soc::isa::error::IsaError;

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// `'` opening an extension line.
    Quote,
    /// Any run of non-blank characters other than `*`.
    Word,
    Star,
    Newline,
    EOF,
}

pub struct Lexer<'src> {
    src: &'src str,
    path: PathBuf,
    offset: usize,
    line: usize,
    column: usize,
    at_line_start: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(src: &'src str, path: PathBuf) -> Self {
        Self {
            src,
            path,
            offset: 0,
            line: 1,
            column: 0,
            at_line_start: true,
        }
    }

    /// Produces the next token.
    pub fn next_token(&mut self) -> Result<Token, IsaError> {
        self.skip_inline_whitespace();
        let Some(ch) = self.peek_char() else {
            let (line, column) = self.position();
            return Ok(self.make_token(TokenKind::EOF, "", line, column));
        };

        if self.at_line_start && ch == '#' {
            self.skip_comment();
            return self.next_token();
        }
        let line_start = std::mem::replace(&mut self.at_line_start, false);

        match ch {
            '\n' => {
                let token = self.consume_single(TokenKind::Newline);
                self.at_line_start = true;
                Ok(token)
            }
            '*' => Ok(self.consume_single(TokenKind::Star)),
            '\'' if line_start => Ok(self.consume_single(TokenKind::Quote)),
            ch if is_forbidden_control(ch) => {
                let err = self.lexer_error_here(
                    "lexer.control-char",
                    format!("unexpected control character U+{:04X}", ch as u32),
                );
                self.advance_char();
                Err(err)
            }
            _ => Ok(self.consume_word()),
        }
    }

    /// Drains the remaining input, including the trailing EOF token.
    pub fn tokenize(mut self) -> Result<Vec<Token>, IsaError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::EOF;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn consume_word(&mut self) -> Token {
        let start = self.offset;
        let (line, column) = self.position();
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() || ch == '*' || is_forbidden_control(ch) {
                break;
            }
            self.advance_char();
        }
        self.make_token_from_span(TokenKind::Word, start, self.offset, line, column)
    }

    fn consume_single(&mut self, kind: TokenKind) -> Token {
        let start = self.offset;
        let (line, column) = self.position();
        self.advance_char();
        self.make_token_from_span(kind, start, self.offset, line, column)
    }

    fn skip_comment(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch == '\n' {
                break;
            }
            self.advance_char();
        }
    }

    fn skip_inline_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch != '\n' && ch.is_whitespace() {
                self.advance_char();
            } else {
                break;
            }
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.src[self.offset..].chars().next()
    }

    fn advance_char(&mut self) {
        if let Some(ch) = self.peek_char() {
            self.offset += ch.len_utf8();
            if ch == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        } else {
            self.offset = self.src.len();
        }
    }

    fn position(&self) -> (usize, usize) {
        (self.line, self.column + 1)
    }

    fn make_token(&self, kind: TokenKind, lexeme: &str, line: usize, column: usize) -> Token {
        Token {
            kind,
            lexeme: lexeme.to_string(),
            line,
            column,
        }
    }

    fn make_token_from_span(
        &self,
        kind: TokenKind,
        start: usize,
        end: usize,
        line: usize,
        column: usize,
    ) -> Token {
        self.make_token(kind, &self.src[start..end], line, column)
    }

    fn lexer_error_here(&self, code: &'static str, message: impl Into<String>) -> IsaError {
        let (line, column) = self.position();
        let span = SourceSpan::point(self.path.clone(), SourcePosition::new(line, column));
        IsaError::Diagnostics {
            phase: DiagnosticPhase::Lexer,
            diagnostics: vec![IsaDiagnostic::new(
                DiagnosticPhase::Lexer,
                DiagnosticLevel::Error,
                code,
                message,
                Some(span),
            )],
        }
    }
}

fn is_forbidden_control(ch: char) -> bool {
    ch.is_control() && !matches!(ch, '\t' | '\r' | '\n')
}
