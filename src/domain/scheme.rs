use super::{
    concat::{Chunk, Concatenator, UnifiedConcat},
    hash::HashFunction,
    options::DomainSalts,
};

/// Domain-separated leaf and node hashing.
///
/// Leaves are hashed as `H(leaf_salt || item)` and internal nodes as
/// `H(node_salt || left || right)`. With distinct salts a leaf hash can never
/// be passed off as a node hash or the other way round.
#[derive(Clone, Debug)]
pub struct HashingScheme<H, C = UnifiedConcat> {
    hasher: H,
    concat: C,
    salts: DomainSalts,
}

impl<H: HashFunction> HashingScheme<H> {
    pub fn new(hasher: H) -> Self {
        Self::with_concat(hasher, UnifiedConcat, DomainSalts::default())
    }
}

impl<H: HashFunction, C: Concatenator> HashingScheme<H, C> {
    /// Salts are not validated here; `DomainSalts::new` does that.
    pub fn with_concat(hasher: H, concat: C, salts: DomainSalts) -> Self {
        Self {
            hasher,
            concat,
            salts,
        }
    }

    pub fn salts(&self) -> DomainSalts {
        self.salts
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    pub fn leaf_hash(&self, item: &[u8]) -> H::Output {
        let bytes = self
            .concat
            .concat(&[Chunk::U32(self.salts.leaf), Chunk::Bytes(item)]);
        self.hasher.hash(&bytes)
    }

    pub fn node_hash(&self, left: &H::Output, right: &H::Output) -> H::Output {
        let bytes = self.concat.concat(&[
            Chunk::U32(self.salts.node),
            Chunk::Bytes(left.as_ref()),
            Chunk::Bytes(right.as_ref()),
        ]);
        self.hasher.hash(&bytes)
    }

    /// Node-salted hash of raw data. A tree with a single leaf stores this
    /// value as its root instead of a leaf hash.
    pub fn single_node_hash(&self, item: &[u8]) -> H::Output {
        let bytes = self
            .concat
            .concat(&[Chunk::U32(self.salts.node), Chunk::Bytes(item)]);
        self.hasher.hash(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::HashingScheme;
    use crate::domain::{
        concat::LengthPrefixedConcat,
        hash::{sha256::Sha256, HashFunction},
        options::DomainSalts,
    };

    #[test]
    fn test_leaf_and_node_hash_differ_for_same_bytes() {
        let scheme = HashingScheme::new(Sha256);
        assert_ne!(scheme.leaf_hash(b"x"), scheme.single_node_hash(b"x"));
    }

    #[test]
    fn test_leaf_hash_layout() {
        let scheme = HashingScheme::new(Sha256);
        assert_eq!(scheme.leaf_hash(b"abc"), Sha256.hash(b"\0\0\0\0abc"));
    }

    #[test]
    fn test_node_hash_layout() {
        let scheme = HashingScheme::new(Sha256);
        let left = scheme.leaf_hash(b"lhs");
        let right = scheme.leaf_hash(b"rhs");

        let mut expected = vec![1, 0, 0, 0];
        expected.extend_from_slice(&left);
        expected.extend_from_slice(&right);
        assert_eq!(scheme.node_hash(&left, &right), Sha256.hash(&expected));
    }

    #[test]
    fn test_node_hash_is_order_sensitive() {
        let scheme = HashingScheme::new(Sha256);
        let a = scheme.leaf_hash(b"a");
        let b = scheme.leaf_hash(b"b");
        assert_ne!(scheme.node_hash(&a, &b), scheme.node_hash(&b, &a));
    }

    #[test]
    fn test_concatenated_children_do_not_hash_to_their_parent_as_a_leaf() {
        let scheme = HashingScheme::new(Sha256);
        let a = scheme.leaf_hash(b"a");
        let b = scheme.leaf_hash(b"b");
        let joined = [a, b].concat();
        assert_ne!(scheme.node_hash(&a, &b), scheme.leaf_hash(&joined));
    }

    #[test]
    fn test_custom_salts_change_hashes() {
        let default = HashingScheme::new(Sha256);
        let salted = HashingScheme::with_concat(
            Sha256,
            LengthPrefixedConcat,
            DomainSalts::new(0x1234, 0x5678).unwrap(),
        );
        assert_ne!(default.leaf_hash(b"item"), salted.leaf_hash(b"item"));
        assert_eq!(salted.salts().leaf, 0x1234);
    }
}
