//! DSP spec loading: tokenizing, line parsing, and the validating loader.

pub mod lexer;
pub mod loader;
pub mod parser;

pub use lexer::{Lexer, Token, TokenKind};
pub use loader::SpecLoader;
pub use parser::{Parser, parse_str};
