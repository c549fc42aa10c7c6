use std::fmt;
use std::path::PathBuf;

/// Phase of the pipeline that produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticPhase {
    Lexer,
    Parser,
    Validation,
    Table,
}

/// Severity of a spec diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticLevel {
    Error,
    Warning,
}

/// A precise source position (1-indexed line/column) inside a spec file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourcePosition {
    pub line: usize,
    pub column: usize,
}

impl SourcePosition {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A half-open [start, end) span referencing a specific spec file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceSpan {
    pub path: PathBuf,
    pub start: SourcePosition,
    pub end: SourcePosition,
}

impl SourceSpan {
    pub fn new(path: PathBuf, start: SourcePosition, end: SourcePosition) -> Self {
        Self { path, start, end }
    }

    pub fn point(path: PathBuf, position: SourcePosition) -> Self {
        Self {
            path,
            start: position,
            end: position,
        }
    }

    /// Span covering the whole of a 1-indexed source line.
    pub fn line(path: PathBuf, line: usize) -> Self {
        Self::point(path, SourcePosition::new(line, 1))
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.path.display(),
            self.start.line,
            self.start.column
        )
    }
}

/// Structured diagnostic suitable for tooling integration.
#[derive(Debug, Clone)]
pub struct IsaDiagnostic {
    pub phase: DiagnosticPhase,
    pub level: DiagnosticLevel,
    pub code: &'static str,
    pub message: String,
    pub span: Option<SourceSpan>,
}

impl IsaDiagnostic {
    pub fn new(
        phase: DiagnosticPhase,
        level: DiagnosticLevel,
        code: &'static str,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Self {
        Self {
            phase,
            level,
            code,
            message: message.into(),
            span,
        }
    }

    pub fn error(
        phase: DiagnosticPhase,
        code: &'static str,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Self {
        Self::new(phase, DiagnosticLevel::Error, code, message, span)
    }

    pub fn warning(
        phase: DiagnosticPhase,
        code: &'static str,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Self {
        Self::new(phase, DiagnosticLevel::Warning, code, message, span)
    }

    pub fn is_error(&self) -> bool {
        self.level == DiagnosticLevel::Error
    }

    pub fn format_human(&self) -> String {
        let location = self
            .span
            .as_ref()
            .map(|span| span.to_string())
            .unwrap_or_else(|| "<unknown>".to_string());
        format!(
            "{level:?} {code}: {message} @ {location}",
            level = self.level,
            code = self.code,
            message = self.message,
            location = location
        )
    }
}

impl fmt::Display for IsaDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_human())
    }
}
