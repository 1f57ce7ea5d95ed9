use super::error::{MerkleError, Result};

/// Salt prepended to every leaf before hashing.
pub const LEAF_SALT: u32 = 0x00;
/// Salt prepended to every internal node before hashing.
pub const NODE_SALT: u32 = 0x01;

/// The pair of salts that keeps leaf hashes and node hashes apart.
///
/// The defaults are fixed constants. Deployments that want a per-tree nonce
/// can pick any two distinct values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DomainSalts {
    pub leaf: u32,
    pub node: u32,
}

impl DomainSalts {
    pub fn new(leaf: u32, node: u32) -> Result<Self> {
        let salts = Self { leaf, node };
        salts.validate()?;
        Ok(salts)
    }

    pub fn validate(&self) -> Result<()> {
        if self.leaf == self.node {
            return Err(MerkleError::IndistinctSalts(self.leaf));
        }
        Ok(())
    }
}

impl Default for DomainSalts {
    fn default() -> Self {
        Self {
            leaf: LEAF_SALT,
            node: NODE_SALT,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TreeOptions {
    pub salts: DomainSalts,
    /// Reject inputs longer than the leaf count instead of truncating them.
    pub strict_leaf_count: bool,
}

impl TreeOptions {
    pub fn with_salts(mut self, salts: DomainSalts) -> Self {
        self.salts = salts;
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict_leaf_count = strict;
        self
    }
}
