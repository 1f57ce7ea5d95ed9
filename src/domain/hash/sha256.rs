use super::HashFunction;
use sha2::{digest::FixedOutput, Digest};

/// Single SHA-256.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256;

impl HashFunction for Sha256 {
    type Output = [u8; 32];

    fn hash(&self, bytes: &[u8]) -> [u8; 32] {
        let mut hasher = sha2::Sha256::new();
        hasher.update(bytes);
        hasher.finalize_fixed().into()
    }
}

/// Double SHA-256, as used for Bitcoin transaction ids.
#[derive(Clone, Copy, Debug, Default)]
pub struct DoubleSha256;

impl HashFunction for DoubleSha256 {
    type Output = [u8; 32];

    fn hash(&self, bytes: &[u8]) -> [u8; 32] {
        let mut hasher = sha2::Sha256::new();
        hasher.update(bytes);
        let once = hasher.finalize_fixed();

        let mut hasher = sha2::Sha256::new();
        hasher.update(once);
        hasher.finalize_fixed().into()
    }
}

#[cfg(test)]
mod tests {
    use super::{DoubleSha256, Sha256};
    use crate::domain::hash::HashFunction;

    #[test]
    fn test_sha256_known_vector() {
        let digest = Sha256.hash(b"abc");
        assert_eq!(
            hex::encode(digest),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_double_sha256_is_hash_of_hash() {
        let once = Sha256.hash(b"hello");
        assert_eq!(DoubleSha256.hash(b"hello"), Sha256.hash(&once));
        assert_ne!(DoubleSha256.hash(b"hello"), once);
    }
}
