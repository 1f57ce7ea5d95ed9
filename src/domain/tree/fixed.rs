use std::ops::{Deref, DerefMut};

use super::MerkleTree;
use crate::domain::{error::Result, hash::HashFunction};

/// A [`MerkleTree`] whose leaf count is part of its type.
#[derive(Clone, Debug)]
pub struct FixedSizeTree<H: HashFunction, const N: usize> {
    inner: MerkleTree<H>,
}

impl<H: HashFunction, const N: usize> FixedSizeTree<H, N> {
    pub const LEAF_COUNT: usize = N;

    pub fn new(hasher: H) -> Self {
        Self {
            inner: MerkleTree::new(hasher, N),
        }
    }

    /// Create and build in one go. Only the first `N` items are used.
    pub fn from_items<I, T>(hasher: H, items: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let mut tree = Self::new(hasher);
        tree.inner.build(items)?;
        Ok(tree)
    }

    pub fn into_inner(self) -> MerkleTree<H> {
        self.inner
    }
}

impl<H: HashFunction, const N: usize> Deref for FixedSizeTree<H, N> {
    type Target = MerkleTree<H>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<H: HashFunction, const N: usize> DerefMut for FixedSizeTree<H, N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::FixedSizeTree;
    use crate::domain::{hash::sha256::Sha256, tree::MerkleTree};

    #[test]
    fn test_fixed_tree_matches_dynamic_tree() -> anyhow::Result<()> {
        let fnames = ["passwords.db", "users.txt", "raw_data.bin"];
        let fixed = FixedSizeTree::<_, 3>::from_items(Sha256, fnames)?;
        let dynamic = MerkleTree::from_items(Sha256, fnames)?;

        assert_eq!(FixedSizeTree::<Sha256, 3>::LEAF_COUNT, 3);
        assert_eq!(fixed.root(), dynamic.root());
        assert_eq!(fixed.size(), 7);
        assert!(fixed.has(b"users.txt"));
        Ok(())
    }

    #[test]
    fn test_fixed_tree_build_through_deref() -> anyhow::Result<()> {
        let mut tree = FixedSizeTree::<Sha256, 2>::new(Sha256);
        assert!(!tree.is_built());
        tree.build(["lhs", "rhs", "ignored"])?;
        assert!(tree.is_built());
        assert_eq!(tree.leaf_count(), 2);
        assert!(!tree.has(b"ignored"));
        assert_eq!(tree.into_inner().leaves().len(), 2);
        Ok(())
    }
}
