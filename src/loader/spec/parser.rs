//! Line parser that turns lexer tokens into a [`SpecDocument`].

use std::path::PathBuf;

use sha2::{Digest, Sha256};

use crate::soc::isa::ast::{Instruction, SpecDocument};
use crate::soc::isa::diagnostic::{
    DiagnosticLevel, DiagnosticPhase, IsaDiagnostic, SourcePosition, SourceSpan,
};
use crate::soc::isa::error::IsaError;
use crate::soc::isa::pattern::{BitPattern, PatternError, scan_extension, scan_main};

use super::lexer::{Lexer, Token, TokenKind};

/// Whitespace groups after `*` on an extension line that spell the ignored main-word half.
const EXTENSION_SKIPPED_GROUPS: usize = 2;

pub struct Parser<'src> {
    lexer: Lexer<'src>,
    source: &'src str,
    path: PathBuf,
    diagnostics: Vec<IsaDiagnostic>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, path: PathBuf) -> Self {
        Self {
            lexer: Lexer::new(source, path.clone()),
            source,
            path,
            diagnostics: Vec::new(),
        }
    }

    /// Parses every line, collecting one diagnostic per malformed line before failing.
    pub fn parse_document(&mut self) -> Result<SpecDocument, IsaError> {
        let mut instructions = Vec::new();
        let mut extensions = Vec::new();

        loop {
            let (tokens, at_eof) = self.next_line()?;
            if !tokens.is_empty() {
                match self.parse_line(&tokens) {
                    Ok(instr) if instr.is_extension() => extensions.push(instr),
                    Ok(instr) => instructions.push(instr),
                    Err(err) => self.handle_parse_error(err)?,
                }
            }
            if at_eof {
                break;
            }
        }

        if self.diagnostics.is_empty() {
            Ok(SpecDocument::new(
                self.path.clone(),
                digest_hex(self.source),
                instructions,
                extensions,
            ))
        } else {
            Err(IsaError::Diagnostics {
                phase: DiagnosticPhase::Parser,
                diagnostics: std::mem::take(&mut self.diagnostics),
            })
        }
    }

    /// Tokens up to the next newline; the flag reports whether input ended.
    fn next_line(&mut self) -> Result<(Vec<Token>, bool), IsaError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.lexer.next_token()?;
            match token.kind {
                TokenKind::Newline => return Ok((tokens, false)),
                TokenKind::EOF => return Ok((tokens, true)),
                _ => tokens.push(token),
            }
        }
    }

    fn parse_line(&self, tokens: &[Token]) -> Result<Instruction, IsaError> {
        let (is_extension, body) = match tokens.split_first() {
            Some((first, rest)) if first.kind == TokenKind::Quote => (true, rest),
            _ => (false, tokens),
        };

        let mut stars = body
            .iter()
            .enumerate()
            .filter(|(_, token)| token.kind == TokenKind::Star);
        let Some((star_idx, star)) = stars.next() else {
            return Err(self.error_at(
                "parser.missing-separator",
                "expected '*' between the opcode and the bit pattern",
                &tokens[0],
            ));
        };
        if let Some((_, extra)) = stars.next() {
            return Err(self.error_at(
                "parser.extra-separator",
                "only one '*' may separate the opcode from the bit pattern",
                extra,
            ));
        }

        let opcode = &body[..star_idx];
        if opcode.is_empty() {
            return Err(self.error_at("parser.missing-opcode", "expected an opcode before '*'", star));
        }
        let groups = &body[star_idx + 1..];

        let pattern = if is_extension {
            let text: String = groups
                .iter()
                .skip(EXTENSION_SKIPPED_GROUPS)
                .map(|token| token.lexeme.as_str())
                .collect();
            scan_extension(&text)
        } else {
            let text: String = groups.iter().map(|token| token.lexeme.as_str()).collect();
            scan_main(&text)
        };
        let anchor = groups.first().unwrap_or(star);
        let pattern = pattern.map_err(|err| self.pattern_error(err, anchor))?;

        let span = self.span_between(&tokens[0], tokens.last().unwrap_or(&tokens[0]));
        Ok(build_instruction(opcode, pattern, span))
    }

    fn pattern_error(&self, err: PatternError, anchor: &Token) -> IsaError {
        let code = match err {
            PatternError::Width { .. } => "parser.pattern-width",
            PatternError::Digit { .. } => "parser.pattern-digit",
        };
        self.error_at(code, err.to_string(), anchor)
    }

    fn error_at(&self, code: &'static str, message: impl Into<String>, token: &Token) -> IsaError {
        IsaError::Diagnostics {
            phase: DiagnosticPhase::Parser,
            diagnostics: vec![IsaDiagnostic::new(
                DiagnosticPhase::Parser,
                DiagnosticLevel::Error,
                code,
                message,
                Some(self.span_between(token, token)),
            )],
        }
    }

    fn span_between(&self, start: &Token, end: &Token) -> SourceSpan {
        SourceSpan::new(
            self.path.clone(),
            SourcePosition::new(start.line, start.column),
            SourcePosition::new(end.line, end.column + end.lexeme.chars().count()),
        )
    }

    fn handle_parse_error(&mut self, err: IsaError) -> Result<(), IsaError> {
        match err {
            IsaError::Diagnostics {
                phase: DiagnosticPhase::Parser,
                diagnostics,
            } => {
                self.diagnostics.extend(diagnostics);
                Ok(())
            }
            other => Err(other),
        }
    }
}

fn build_instruction(opcode: &[Token], pattern: BitPattern, span: SourceSpan) -> Instruction {
    let name = opcode
        .iter()
        .map(|token| token.lexeme.as_str())
        .collect::<Vec<_>>()
        .join("_");
    let mnemonic = opcode
        .first()
        .map(|token| token.lexeme.clone())
        .unwrap_or_default();
    Instruction {
        name,
        mnemonic,
        operands: pattern.operands,
        fixed_mask: pattern.fixed_mask,
        fixed_value: pattern.fixed_value,
        width: pattern.width,
        span,
    }
}

fn digest_hex(source: &str) -> String {
    format!("{:x}", Sha256::digest(source.as_bytes()))
}

/// Convenience helper used by the loader when parsing files without needing to hold onto the
/// parser instance.
pub fn parse_str(path: PathBuf, src: &str) -> Result<SpecDocument, IsaError> {
    let mut parser = Parser::new(src, path);
    parser.parse_document()
}
