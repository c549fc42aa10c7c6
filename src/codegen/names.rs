//! Identifier allocation for generated code.

use ahash::AHashMap;

/// Prefix that keeps extension types apart from main opcode types.
pub const EXTENSION_PREFIX: &str = "EXT_";

/// Sequence of nested dispatch function names, owned by one emission pass.
#[derive(Debug, Default)]
pub struct FreshNames {
    next: usize,
}

impl FreshNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_table(&mut self) -> String {
        self.next += 1;
        format!("generated_table_{}", self.next)
    }
}

/// Hands out unique type identifiers. Main and extension types share one namespace.
#[derive(Debug, Default)]
pub struct TypeNames {
    used: AHashMap<String, usize>,
}

impl TypeNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `base`, suffixing `_1`, `_2`, ... when it is already taken.
    pub fn claim(&mut self, base: String) -> String {
        let Some(count) = self.used.get(&base).copied() else {
            self.used.insert(base.clone(), 1);
            return base;
        };
        let mut n = count;
        let name = loop {
            let candidate = format!("{base}_{n}");
            if !self.used.contains_key(&candidate) {
                break candidate;
            }
            n += 1;
        };
        self.used.insert(base, n + 1);
        self.used.insert(name.clone(), 1);
        name
    }

    pub fn claim_main(&mut self, opcode_name: &str) -> String {
        self.claim(type_ident(opcode_name))
    }

    pub fn claim_extension(&mut self, opcode_name: &str) -> String {
        self.claim(format!("{EXTENSION_PREFIX}{}", type_ident(opcode_name)))
    }
}

/// Uppercased Rust type identifier for an opcode name.
pub fn type_ident(name: &str) -> String {
    let ident: String = name
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() {
                ch.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    match ident.chars().next() {
        None => "OP_".to_string(),
        Some(first) if first.is_ascii_digit() => format!("OP_{ident}"),
        Some(_) => ident,
    }
}
