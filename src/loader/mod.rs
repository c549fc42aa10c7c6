//! Spec file loading helpers (lexer, parser, loader).

pub mod spec;
