//! Blocks and frames: the two levels of the scope stack

use indexmap::IndexMap;

use super::Binding;

/// One lexical scope: an ordered mapping from name to binding.
///
/// A block is created on entering any body (function body, branch, loop
/// iteration, try body, catch handler) and dropped on leaving it.
#[derive(Debug, Clone, Default)]
pub struct Block {
    bindings: IndexMap<String, Binding>,
}

impl Block {
    /// Create an empty block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a binding (builder pattern). A later binding with the same name
    /// replaces the earlier one.
    pub fn with_binding(mut self, name: impl Into<String>, binding: Binding) -> Self {
        self.bindings.insert(name.into(), binding);
        self
    }

    /// Insert a binding. Returns `false` (and leaves the block unchanged)
    /// if the name is already declared here.
    pub fn declare(&mut self, name: impl Into<String>, binding: Binding) -> bool {
        let name = name.into();
        if self.bindings.contains_key(&name) {
            return false;
        }
        self.bindings.insert(name, binding);
        true
    }

    /// Look up a binding declared in this block.
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    /// Look up a binding declared in this block for mutation.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Binding> {
        self.bindings.get_mut(name)
    }

    /// Check if a name is declared in this block.
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Consume the block, yielding its bindings in declaration order.
    pub fn into_bindings(self) -> impl Iterator<Item = Binding> {
        self.bindings.into_values()
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Check if the block is empty.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// One activation: a stack of blocks, outermost first.
///
/// A call frame's bottom block holds the bound parameters. The bottom block
/// is never popped by [`Frame::pop_block`].
#[derive(Debug, Clone)]
pub struct Frame {
    blocks: Vec<Block>,
    call: bool,
}

impl Frame {
    /// Create a call frame whose bottom block is `params`.
    pub fn new(params: Block) -> Self {
        Self {
            blocks: vec![params],
            call: true,
        }
    }

    /// Rebuild a frame from a thunk's captured block chain.
    pub fn from_blocks(mut blocks: Vec<Block>) -> Self {
        if blocks.is_empty() {
            blocks.push(Block::new());
        }
        Self {
            blocks,
            call: false,
        }
    }

    /// Whether this frame is a function activation rather than a thunk
    /// being forced.
    pub fn is_call(&self) -> bool {
        self.call
    }

    /// The blocks of this frame, outermost first.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Number of blocks.
    pub fn depth(&self) -> usize {
        self.blocks.len()
    }

    /// Enter a nested block.
    pub fn push_block(&mut self) {
        self.blocks.push(Block::new());
    }

    /// Leave the innermost block. The bottom block is kept.
    pub fn pop_block(&mut self) {
        if self.blocks.len() > 1 {
            self.blocks.pop();
        }
    }

    /// The innermost block.
    pub fn innermost_mut(&mut self) -> &mut Block {
        if self.blocks.is_empty() {
            self.blocks.push(Block::new());
        }
        let last = self.blocks.len() - 1;
        &mut self.blocks[last]
    }

    /// Find the innermost binding for `name`.
    pub fn find(&self, name: &str) -> Option<&Binding> {
        self.blocks.iter().rev().find_map(|block| block.get(name))
    }

    /// Find the innermost binding for `name`, for mutation.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Binding> {
        self.blocks
            .iter_mut()
            .rev()
            .find_map(|block| block.get_mut(name))
    }
}
