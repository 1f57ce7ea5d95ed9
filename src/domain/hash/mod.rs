use std::fmt::Debug;

pub mod sha256;

/// A pluggable hash function over raw bytes.
///
/// The tree never looks inside a hash value: it copies them around, compares
/// them for equality and reads their bytes for display.
pub trait HashFunction: Send + Sync {
    type Output: Copy + Default + Eq + Debug + AsRef<[u8]> + Send + Sync;

    fn hash(&self, bytes: &[u8]) -> Self::Output;
}

impl<T: HashFunction + ?Sized> HashFunction for &T {
    type Output = T::Output;

    fn hash(&self, bytes: &[u8]) -> Self::Output {
        (**self).hash(bytes)
    }
}

/// Adapts any `Fn(&[u8]) -> O` into a [`HashFunction`].
#[derive(Clone, Copy, Debug)]
pub struct FnHasher<F>(pub F);

impl<F, O> HashFunction for FnHasher<F>
where
    F: Fn(&[u8]) -> O + Send + Sync,
    O: Copy + Default + Eq + Debug + AsRef<[u8]> + Send + Sync,
{
    type Output = O;

    fn hash(&self, bytes: &[u8]) -> O {
        (self.0)(bytes)
    }
}
