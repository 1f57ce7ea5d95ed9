use thiserror::Error;

/// Errors raised while configuring or building a tree.
///
/// Looking up data that is not in the tree is not an error; those queries
/// return `None` / `false`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MerkleError {
    #[error("tree expects {expected} leaves, got {actual}")]
    LeafCountMismatch { expected: usize, actual: usize },
    #[error("leaf and node salts must differ (both are {0:#x})")]
    IndistinctSalts(u32),
    #[error("cannot allocate {slots} hash slots")]
    Allocation { slots: usize },
}

pub type Result<T> = std::result::Result<T, MerkleError>;
