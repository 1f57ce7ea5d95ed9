/// One argument handed to a [`Concatenator`].
///
/// Scalars are written in little-endian order, byte sequences verbatim.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Chunk<'a> {
    U8(u8),
    U32(u32),
    U64(u64),
    Bytes(&'a [u8]),
}

impl Chunk<'_> {
    /// Number of bytes this chunk contributes on its own.
    pub fn byte_len(&self) -> usize {
        match self {
            Chunk::U8(_) => 1,
            Chunk::U32(_) => 4,
            Chunk::U64(_) => 8,
            Chunk::Bytes(bytes) => bytes.len(),
        }
    }

    fn write_into(&self, out: &mut Vec<u8>) {
        match self {
            Chunk::U8(v) => out.push(*v),
            Chunk::U32(v) => out.extend_from_slice(&v.to_le_bytes()),
            Chunk::U64(v) => out.extend_from_slice(&v.to_le_bytes()),
            Chunk::Bytes(bytes) => out.extend_from_slice(bytes),
        }
    }
}

impl From<u8> for Chunk<'_> {
    fn from(v: u8) -> Self {
        Chunk::U8(v)
    }
}

impl From<u32> for Chunk<'_> {
    fn from(v: u32) -> Self {
        Chunk::U32(v)
    }
}

impl From<u64> for Chunk<'_> {
    fn from(v: u64) -> Self {
        Chunk::U64(v)
    }
}

impl<'a> From<&'a [u8]> for Chunk<'a> {
    fn from(v: &'a [u8]) -> Self {
        Chunk::Bytes(v)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for Chunk<'a> {
    fn from(v: &'a [u8; N]) -> Self {
        Chunk::Bytes(v)
    }
}

impl<'a> From<&'a str> for Chunk<'a> {
    fn from(v: &'a str) -> Self {
        Chunk::Bytes(v.as_bytes())
    }
}

/// Serializes a list of chunks into the byte string that gets hashed.
///
/// Prover and verifier must agree on the implementation, since every byte of
/// the output feeds the hash.
pub trait Concatenator: Send + Sync {
    fn concat(&self, chunks: &[Chunk<'_>]) -> Vec<u8>;
}

/// Plain back-to-back concatenation.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnifiedConcat;

impl Concatenator for UnifiedConcat {
    fn concat(&self, chunks: &[Chunk<'_>]) -> Vec<u8> {
        let mut out = Vec::with_capacity(chunks.iter().map(Chunk::byte_len).sum());
        for chunk in chunks {
            chunk.write_into(&mut out);
        }
        out
    }
}

/// Like [`UnifiedConcat`], but every byte sequence is preceded by its length
/// as a little-endian `u64`, so `("ab", "c")` and `("a", "bc")` serialize
/// differently.
#[derive(Clone, Copy, Debug, Default)]
pub struct LengthPrefixedConcat;

impl Concatenator for LengthPrefixedConcat {
    fn concat(&self, chunks: &[Chunk<'_>]) -> Vec<u8> {
        let capacity = chunks
            .iter()
            .map(|c| match c {
                Chunk::Bytes(bytes) => bytes.len() + 8,
                other => other.byte_len(),
            })
            .sum();
        let mut out = Vec::with_capacity(capacity);
        for chunk in chunks {
            if let Chunk::Bytes(bytes) = chunk {
                out.extend_from_slice(&(bytes.len() as u64).to_le_bytes());
            }
            chunk.write_into(&mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::{Chunk, Concatenator, LengthPrefixedConcat, UnifiedConcat};

    #[test]
    fn test_scalars_are_little_endian() {
        let out = UnifiedConcat.concat(&[1u32.into(), 0x0203u64.into(), 7u8.into()]);
        assert_eq!(out, vec![1, 0, 0, 0, 3, 2, 0, 0, 0, 0, 0, 0, 7]);
    }

    #[test]
    fn test_unified_preserves_layout() {
        let out = UnifiedConcat.concat(&[0u32.into(), "lhs".into(), b"rhs".into()]);
        assert_eq!(out, b"\0\0\0\0lhsrhs".to_vec());
    }

    #[test]
    fn test_empty_input() {
        assert!(UnifiedConcat.concat(&[]).is_empty());
        assert!(LengthPrefixedConcat
            .concat(&[Chunk::Bytes(&[])])
            .iter()
            .all(|b| *b == 0));
    }

    #[test]
    fn test_unified_is_ambiguous_on_boundaries() {
        let a = UnifiedConcat.concat(&["ab".into(), "c".into()]);
        let b = UnifiedConcat.concat(&["a".into(), "bc".into()]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_length_prefix_separates_boundaries() {
        let a = LengthPrefixedConcat.concat(&["ab".into(), "c".into()]);
        let b = LengthPrefixedConcat.concat(&["a".into(), "bc".into()]);
        assert_ne!(a, b);
        assert_eq!(a.len(), 8 + 2 + 8 + 1);
    }

    #[test]
    fn test_length_prefix_leaves_scalars_bare() {
        let out = LengthPrefixedConcat.concat(&[1u32.into(), "x".into()]);
        assert_eq!(out, vec![1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, b'x']);
    }
}
