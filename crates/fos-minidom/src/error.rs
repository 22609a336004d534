//! DOM Errors
//!
//! Every fallible operation returns [`DomResult`]. Structural violations are
//! reported before the tree is touched, so a failed call leaves no partial
//! mutation behind.

use crate::NodeId;

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node id is stale (released) or belongs to another environment
    #[error("Node {0:?} not found")]
    NotFound(NodeId),

    /// Insertion would break the tree shape
    #[error("HierarchyRequestError: {0}")]
    HierarchyRequest(&'static str),

    /// `replace_child` was given an old node that is not a child of the parent
    #[error("ReplaceChildMismatchError: the node to be replaced is not a child of this node")]
    ReplaceChildMismatch,

    /// An element kind with this name is already registered
    #[error("DuplicateRegistrationError: element \"{0}\" is already registered")]
    DuplicateRegistration(String),

    /// Operation intentionally not provided by this runtime
    #[error("UnsupportedOperationError: {operation} is not supported for performance and memory reasons")]
    Unsupported { operation: &'static str },

    /// Operation applied to the wrong kind of node
    #[error("Invalid node type: expected {expected}")]
    InvalidNodeType { expected: &'static str },

    /// An event listener failed; raised out of `dispatch_event`
    #[error("Event listener failed: {0}")]
    Listener(String),
}

impl DomError {
    /// Build a listener failure from any displayable cause
    pub fn listener(cause: impl std::fmt::Display) -> Self {
        Self::Listener(cause.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inner_html_message_names_operation() {
        let err = DomError::Unsupported { operation: "innerHTML" };
        let msg = err.to_string();
        assert!(msg.contains("innerHTML"));
        assert!(msg.contains("not supported"));
    }

    #[test]
    fn test_listener_error_from_display() {
        let err = DomError::listener("boom");
        assert_eq!(err, DomError::Listener("boom".to_string()));
    }
}
