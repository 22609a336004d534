//! CharacterData - shared behavior of Text and Comment

use crate::{DomError, DomResult, Environment, NodeId};

const NOT_CHARACTER_DATA: DomError = DomError::InvalidNodeType { expected: "CharacterData" };

impl Environment {
    /// Character data of a Text or Comment node
    pub fn data(&self, node: NodeId) -> DomResult<String> {
        let stored = self.node(node)?.as_character_data().ok_or(NOT_CHARACTER_DATA)?;
        if let Some(data) = self.hooks().on_get_data(self, node) {
            return Ok(data);
        }
        Ok(stored.to_string())
    }

    /// Replace the character data
    pub fn set_data(&mut self, node: NodeId, data: &str) -> DomResult<()> {
        let stored = self.node_mut(node)?.as_character_data_mut().ok_or(NOT_CHARACTER_DATA)?;
        stored.clear();
        stored.push_str(data);
        self.hooks().on_set_data(self, node, data);
        Ok(())
    }

    /// Append to the character data
    pub fn append_data(&mut self, node: NodeId, data: &str) -> DomResult<()> {
        let mut current = self.data(node)?;
        current.push_str(data);
        self.set_data(node, &current)
    }

    /// Length of the data in UTF-16 code units
    pub fn length(&self, node: NodeId) -> DomResult<usize> {
        Ok(self.data(node)?.encode_utf16().count())
    }
}
