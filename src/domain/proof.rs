use log::trace;

use super::{concat::Concatenator, hash::HashFunction, scheme::HashingScheme};

/// One level of an inclusion proof.
/// `sibling_on_left = true` means the pair is hashed as `(sibling, current)`,
/// otherwise as `(current, sibling)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProofStep<O> {
    pub hash: O,
    pub sibling_on_left: bool,
}

impl<O> ProofStep<O> {
    pub fn new(hash: O, sibling_on_left: bool) -> Self {
        Self {
            hash,
            sibling_on_left,
        }
    }
}

/// An inclusion proof: one sibling per level from the leaf upwards, followed
/// by a sentinel step carrying the root the prover claims.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Proof<O> {
    pub steps: Vec<ProofStep<O>>,
}

impl<O: Copy + Eq> Proof<O> {
    pub fn new(steps: Vec<ProofStep<O>>) -> Self {
        Self { steps }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Sibling steps, without the sentinel.
    pub fn path(&self) -> &[ProofStep<O>] {
        match self.steps.split_last() {
            Some((_, path)) => path,
            None => &[],
        }
    }

    /// The root written into the sentinel by the prover. Never trust it for
    /// verification; compare against a root obtained elsewhere.
    pub fn claimed_root(&self) -> Option<O> {
        self.steps.last().map(|s| s.hash)
    }

    /// Recompute the root for `data` by folding the path of a proof taken
    /// from a tree of the given `height`.
    ///
    /// Returns `None` unless the proof has exactly `height + 1` steps. Only a
    /// height-0 tree starts from the node-salted hash of the data; every other
    /// tree starts from the leaf hash.
    pub fn compute_root<H, C>(
        &self,
        scheme: &HashingScheme<H, C>,
        data: &[u8],
        height: usize,
    ) -> Option<O>
    where
        H: HashFunction<Output = O>,
        C: Concatenator,
    {
        if self.steps.len() != height.checked_add(1)? {
            trace!(
                "Proof has {} steps, a tree of height {} expects {}",
                self.steps.len(),
                height,
                height + 1
            );
            return None;
        }

        let mut current = if height == 0 {
            scheme.single_node_hash(data)
        } else {
            scheme.leaf_hash(data)
        };

        for step in self.path() {
            current = if step.sibling_on_left {
                scheme.node_hash(&step.hash, &current)
            } else {
                scheme.node_hash(&current, &step.hash)
            };
        }
        Some(current)
    }

    /// Verify the proof against a trusted `root` of a tree of `height`.
    pub fn verify<H, C>(
        &self,
        scheme: &HashingScheme<H, C>,
        data: &[u8],
        root: &O,
        height: usize,
    ) -> bool
    where
        H: HashFunction<Output = O>,
        C: Concatenator,
    {
        let Some(computed) = self.compute_root(scheme, data, height) else {
            return false;
        };
        if self.claimed_root() != Some(*root) {
            trace!("Proof sentinel does not match the trusted root");
        }
        computed == *root
    }
}

#[cfg(test)]
mod tests {
    use super::{Proof, ProofStep};
    use crate::domain::{hash::sha256::Sha256, scheme::HashingScheme};

    #[test]
    fn test_empty_proof_never_verifies() {
        let scheme = HashingScheme::new(Sha256);
        let proof = Proof::<[u8; 32]>::new(vec![]);
        let root = scheme.leaf_hash(b"anything");
        assert!(proof.path().is_empty());
        assert_eq!(proof.claimed_root(), None);
        assert!(!proof.verify(&scheme, b"anything", &root, 0));
        assert_eq!(proof.compute_root(&scheme, b"anything", usize::MAX), None);
    }

    #[test]
    fn test_sentinel_only_proof_uses_node_hash() {
        let scheme = HashingScheme::new(Sha256);
        let root = scheme.single_node_hash(b"one");
        let proof = Proof::new(vec![ProofStep::new(root, false)]);

        assert!(proof.verify(&scheme, b"one", &root, 0));
        assert!(!proof.verify(&scheme, b"two", &root, 0));
    }

    #[test]
    fn test_manual_two_leaf_proof() {
        let scheme = HashingScheme::new(Sha256);
        let lhs = scheme.leaf_hash(b"lhs");
        let rhs = scheme.leaf_hash(b"rhs");
        let root = scheme.node_hash(&lhs, &rhs);

        let for_lhs = Proof::new(vec![ProofStep::new(rhs, false), ProofStep::new(root, false)]);
        let for_rhs = Proof::new(vec![ProofStep::new(lhs, true), ProofStep::new(root, false)]);

        assert!(for_lhs.verify(&scheme, b"lhs", &root, 1));
        assert!(for_rhs.verify(&scheme, b"rhs", &root, 1));
        assert!(!for_lhs.verify(&scheme, b"rhs", &root, 1));
    }

    #[test]
    fn test_height_mismatch_fails() {
        let scheme = HashingScheme::new(Sha256);
        let lhs = scheme.leaf_hash(b"lhs");
        let rhs = scheme.leaf_hash(b"rhs");
        let root = scheme.node_hash(&lhs, &rhs);
        let proof = Proof::new(vec![ProofStep::new(rhs, false), ProofStep::new(root, false)]);

        assert!(!proof.verify(&scheme, b"lhs", &root, 0));
        assert!(!proof.verify(&scheme, b"lhs", &root, 2));
    }

    #[test]
    fn test_concatenated_children_are_not_a_member() {
        let scheme = HashingScheme::new(Sha256);
        let leaves: Vec<_> = ["a", "b", "c", "d"]
            .iter()
            .map(|l| scheme.leaf_hash(l.as_bytes()))
            .collect();
        let left = scheme.node_hash(&leaves[0], &leaves[1]);
        let right = scheme.node_hash(&leaves[2], &leaves[3]);
        let root = scheme.node_hash(&left, &right);

        // Passing the two children off as data with a sentinel-only proof
        // must not reproduce the root of a height-2 tree.
        let data = [left, right].concat();
        let proof = Proof::new(vec![ProofStep::new(root, false)]);
        assert!(!proof.verify(&scheme, &data, &root, 2));
        assert_eq!(proof.compute_root(&scheme, &data, 2), None);
    }

    #[test]
    fn test_forged_sentinel_is_ignored() {
        let scheme = HashingScheme::new(Sha256);
        let lhs = scheme.leaf_hash(b"lhs");
        let rhs = scheme.leaf_hash(b"rhs");
        let root = scheme.node_hash(&lhs, &rhs);

        // The sentinel claims a root that does match the fold, but the
        // verifier's trusted root is different.
        let forged = scheme.node_hash(&lhs, &lhs);
        let proof = Proof::new(vec![ProofStep::new(lhs, false), ProofStep::new(forged, false)]);
        assert_eq!(proof.compute_root(&scheme, b"lhs", 1), Some(forged));
        assert!(!proof.verify(&scheme, b"lhs", &root, 1));
    }
}
