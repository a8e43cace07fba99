use crate::token::Token;

/// Split raw text into tokens on runs of whitespace.
pub fn tokenize(raw: &str) -> Vec<Token> {
    raw.split_whitespace().filter_map(Token::parse).collect()
}

/// Display-only singly linked list.
///
/// The node sequence is replaced wholesale on every generation; there is no
/// insert or delete on individual nodes.
#[derive(Debug, Clone, Default)]
pub struct LinkedListView {
    nodes: Vec<Token>,
    pub input: String,
}

impl LinkedListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[Token] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Build the list from the input buffer and clear the buffer.
    pub fn generate(&mut self) -> usize {
        let raw = std::mem::take(&mut self.input);
        self.generate_from(&raw)
    }

    pub fn generate_from(&mut self, raw: &str) -> usize {
        self.nodes = tokenize(raw);
        tracing::debug!(nodes = self.nodes.len(), "linked list generated");
        self.nodes.len()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Plain-text rendering of the chain, e.g. `a -> b -> c`.
    pub fn chain(&self) -> String {
        self.nodes
            .iter()
            .map(Token::as_str)
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}
