//! Recursive decision-table construction over the first instruction word.
//!
//! Each table selects a slot by compacting the bits named by its discrimination mask
//! (see [`pext`]). Slots hold either a nested table, a leaf naming one instruction, or
//! nothing. Only first-word fixed bits discriminate: the decoder cannot know a second
//! word exists until the opcode has been resolved.

use log::{debug, warn};

use super::ast::Instruction;
use super::bits::pext;
use super::diagnostic::{DiagnosticPhase, IsaDiagnostic};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecisionNode {
    Table(DecisionTable),
    /// Index into the instruction slice the tree was built from.
    Leaf(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionTable {
    mask: u16,
    slots: Vec<Option<DecisionNode>>,
}

impl DecisionTable {
    pub fn mask(&self) -> u16 {
        self.mask
    }

    /// `2^k` slots, `k` being the popcount of the mask.
    pub fn slots(&self) -> &[Option<DecisionNode>] {
        &self.slots
    }

    pub fn index_of(&self, word: u16) -> usize {
        pext(u32::from(word), u32::from(self.mask)) as usize
    }

    pub fn slot(&self, word: u16) -> Option<&DecisionNode> {
        self.slots.get(self.index_of(word)).and_then(Option::as_ref)
    }
}

/// Dispatch tree for one set of main instructions.
#[derive(Debug, Clone)]
pub struct DecisionTree<'a> {
    instructions: &'a [Instruction],
    root: Option<DecisionNode>,
    diagnostics: Vec<IsaDiagnostic>,
}

impl<'a> DecisionTree<'a> {
    pub fn build(instructions: &'a [Instruction]) -> Self {
        let mut builder = TableBuilder {
            instructions,
            diagnostics: Vec::new(),
        };
        let candidates: Vec<usize> = (0..instructions.len()).collect();
        let root = builder.build_node(candidates, 0);
        let tree = Self {
            instructions,
            root,
            diagnostics: builder.diagnostics,
        };
        debug!(
            "decision tree: {} instruction(s), {} table(s), depth {}",
            instructions.len(),
            tree.table_count(),
            tree.depth()
        );
        tree
    }

    pub fn root(&self) -> Option<&DecisionNode> {
        self.root.as_ref()
    }

    pub fn instruction(&self, index: usize) -> &'a Instruction {
        &self.instructions[index]
    }

    /// Warnings for nodes whose instructions could not be told apart.
    pub fn diagnostics(&self) -> &[IsaDiagnostic] {
        &self.diagnostics
    }

    /// Walks the tree with the first word, returning the leaf's instruction index.
    pub fn lookup(&self, word: u16) -> Option<usize> {
        let mut node = self.root.as_ref()?;
        loop {
            match node {
                DecisionNode::Leaf(index) => return Some(*index),
                DecisionNode::Table(table) => node = table.slot(word)?,
            }
        }
    }

    pub fn table_count(&self) -> usize {
        fn count(node: &DecisionNode) -> usize {
            match node {
                DecisionNode::Leaf(_) => 0,
                DecisionNode::Table(table) => {
                    1 + table.slots.iter().flatten().map(count).sum::<usize>()
                }
            }
        }
        self.root.as_ref().map_or(0, count)
    }

    pub fn depth(&self) -> usize {
        fn depth(node: &DecisionNode) -> usize {
            match node {
                DecisionNode::Leaf(_) => 0,
                DecisionNode::Table(table) => {
                    1 + table.slots.iter().flatten().map(depth).max().unwrap_or(0)
                }
            }
        }
        self.root.as_ref().map_or(0, depth)
    }
}

struct TableBuilder<'a> {
    instructions: &'a [Instruction],
    diagnostics: Vec<IsaDiagnostic>,
}

impl TableBuilder<'_> {
    fn build_node(&mut self, candidates: Vec<usize>, used_bits: u16) -> Option<DecisionNode> {
        match candidates.as_slice() {
            [] => return None,
            [only] => return Some(DecisionNode::Leaf(*only)),
            _ => {}
        }

        let mask = candidates
            .iter()
            .fold(!used_bits, |mask, &idx| mask & self.instructions[idx].first_word_mask());
        if mask == 0 {
            self.report_indistinguishable(&candidates);
            return None;
        }

        let size = 1usize << mask.count_ones();
        let mut groups: Vec<Vec<usize>> = vec![Vec::new(); size];
        for idx in candidates {
            let value = self.instructions[idx].first_word_value();
            let slot = pext(u32::from(value), u32::from(mask)) as usize;
            groups[slot].push(idx);
        }

        let slots = groups
            .into_iter()
            .map(|group| self.build_node(group, used_bits | mask))
            .collect();
        Some(DecisionNode::Table(DecisionTable { mask, slots }))
    }

    fn report_indistinguishable(&mut self, candidates: &[usize]) {
        let names: Vec<&str> = candidates
            .iter()
            .map(|&idx| self.instructions[idx].name.as_str())
            .collect();
        let message = format!(
            "instructions {} share every remaining first-word fixed bit; their slot decodes as unknown",
            names.join(", ")
        );
        warn!("{message}");
        let span = candidates
            .first()
            .map(|&idx| self.instructions[idx].span.clone());
        self.diagnostics.push(IsaDiagnostic::warning(
            DiagnosticPhase::Table,
            "table.indistinguishable",
            message,
            span,
        ));
    }
}
