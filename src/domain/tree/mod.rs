use itertools::Itertools;
use log::{debug, info, trace, warn};
use std::fmt;
use std::time::Instant;

use super::{
    concat::{Concatenator, UnifiedConcat},
    error::{MerkleError, Result},
    hash::HashFunction,
    options::TreeOptions,
    proof::{Proof, ProofStep},
    scheme::HashingScheme,
};

pub mod fixed;
pub mod shape;

pub use shape::{tree_height, tree_size, Layer};

/// A Merkle tree over a fixed number of leaves, stored as one flat buffer.
///
/// The buffer holds the leaf layer first, then every following level packed
/// right after the previous one, and the root in the last slot. Levels of odd
/// width carry a copy of their last hash so that every node has a sibling.
#[derive(Clone, Debug)]
pub struct MerkleTree<H: HashFunction, C: Concatenator = UnifiedConcat> {
    scheme: HashingScheme<H, C>,
    options: TreeOptions,
    leaves_n: usize,
    nodes: Vec<H::Output>,
    built: bool,
}

impl<H: HashFunction> MerkleTree<H> {
    /// Empty tree for `leaf_count` leaves with the default salts and
    /// concatenation.
    pub fn new(hasher: H, leaf_count: usize) -> Self {
        Self {
            scheme: HashingScheme::new(hasher),
            options: TreeOptions::default(),
            leaves_n: leaf_count,
            nodes: vec![H::Output::default(); tree_size(leaf_count)],
            built: false,
        }
    }

    /// Like [`MerkleTree::new`], but reports a failed buffer allocation
    /// instead of aborting.
    pub fn try_new(hasher: H, leaf_count: usize) -> Result<Self> {
        Self::with_options(hasher, UnifiedConcat, leaf_count, TreeOptions::default())
    }

    /// Build a tree sized to exactly the given items.
    pub fn from_items<I, T>(hasher: H, items: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let items: Vec<T> = items.into_iter().collect();
        let mut tree = Self::try_new(hasher, items.len())?;
        tree.build(items)?;
        Ok(tree)
    }
}

impl<H: HashFunction, C: Concatenator> MerkleTree<H, C> {
    pub fn with_options(
        hasher: H,
        concat: C,
        leaf_count: usize,
        options: TreeOptions,
    ) -> Result<Self> {
        options.salts.validate()?;
        Ok(Self {
            scheme: HashingScheme::with_concat(hasher, concat, options.salts),
            options,
            leaves_n: leaf_count,
            nodes: alloc_nodes(leaf_count)?,
            built: false,
        })
    }

    /// Hash `items` into the tree, overwriting whatever was there.
    ///
    /// Fewer items than the leaf count is an error. Extra items are ignored
    /// unless the tree was configured with `strict_leaf_count`.
    pub fn build<I, T>(&mut self, items: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        let total_start = Instant::now();
        self.built = false;

        let mut items = items.into_iter();

        if self.leaves_n == 0 {
            self.check_surplus(items)?;
            self.built = true;
            return Ok(self);
        }

        if self.leaves_n == 1 {
            let item = items.next().ok_or(MerkleError::LeafCountMismatch {
                expected: 1,
                actual: 0,
            })?;
            self.check_surplus(items)?;
            self.nodes[0] = self.scheme.single_node_hash(item.as_ref());
            self.built = true;
            return Ok(self);
        }

        let leaves_start = Instant::now();
        let mut hashed = 0;
        for (slot, item) in self.nodes[..self.leaves_n].iter_mut().zip(items.by_ref()) {
            *slot = self.scheme.leaf_hash(item.as_ref());
            hashed += 1;
        }
        if hashed < self.leaves_n {
            return Err(MerkleError::LeafCountMismatch {
                expected: self.leaves_n,
                actual: hashed,
            });
        }
        self.check_surplus(items)?;
        debug!("Hashing {} leaves took {:?}", hashed, leaves_start.elapsed());

        let fold_start = Instant::now();
        self.fold_levels();
        debug!("Folding levels took {:?}", fold_start.elapsed());

        self.built = true;
        info!(
            "Built tree of {} leaves ({} hashes) in {:?}",
            self.leaves_n,
            self.nodes.len(),
            total_start.elapsed()
        );
        Ok(self)
    }

    fn check_surplus<I: Iterator>(&self, mut rest: I) -> Result<()> {
        if rest.next().is_none() {
            return Ok(());
        }
        let actual = self.leaves_n + 1 + rest.count();
        if self.options.strict_leaf_count {
            return Err(MerkleError::LeafCountMismatch {
                expected: self.leaves_n,
                actual,
            });
        }
        warn!(
            "Got {} items for a tree of {} leaves, ignoring the surplus",
            actual, self.leaves_n
        );
        Ok(())
    }

    /// Pair up each level into the next one until only the root remains.
    /// `l..r` is the level being read, new hashes are written from `r` on.
    fn fold_levels(&mut self) {
        let (mut l, mut r) = (0, self.leaves_n);
        while r - l > 1 {
            if (r - l) & 1 == 1 {
                self.nodes[r] = self.nodes[r - 1];
                r += 1;
            }
            let pairs = (r - l) / 2;
            for k in 0..pairs {
                let parent = self
                    .scheme
                    .node_hash(&self.nodes[l + 2 * k], &self.nodes[l + 2 * k + 1]);
                self.nodes[r + k] = parent;
            }
            l = r;
            r += pairs;
        }
        debug_assert_eq!(r, self.nodes.len());
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    pub fn scheme(&self) -> &HashingScheme<H, C> {
        &self.scheme
    }

    pub fn options(&self) -> &TreeOptions {
        &self.options
    }

    /// The last hash in the buffer. All zeroes (the output's default) until
    /// the tree is built.
    pub fn root(&self) -> H::Output {
        self.nodes[self.nodes.len() - 1]
    }

    pub fn root_hex(&self) -> String {
        format!("0x{}", hex::encode(self.root()))
    }

    pub fn height(&self) -> usize {
        tree_height(self.leaves_n)
    }

    /// Total number of hashes held, padding duplicates included.
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves_n
    }

    /// The whole flattened buffer, leaves first.
    pub fn hashes(&self) -> &[H::Output] {
        &self.nodes
    }

    /// The leaf hashes, without the padding duplicate.
    ///
    /// A single-leaf tree has no leaf hash: its one slot holds the
    /// node-salted hash of the item, which is also the root.
    pub fn leaves(&self) -> &[H::Output] {
        &self.nodes[..self.leaves_n.min(self.nodes.len())]
    }

    pub fn layer(&self, idx: usize) -> Option<Layer> {
        shape::layer(self.leaves_n, idx)
    }

    pub fn layer_hashes(&self, idx: usize) -> Option<&[H::Output]> {
        self.layer(idx).map(|l| &self.nodes[l.range()])
    }

    /// Position of the first leaf whose hash matches `data`.
    ///
    /// Equal hashes are taken to mean equal data; nothing guards against a
    /// collision in the underlying hash function.
    pub fn find_leaf(&self, data: &[u8]) -> Option<usize> {
        if !self.built || self.leaves_n == 0 {
            return None;
        }
        if self.leaves_n == 1 {
            return (self.scheme.single_node_hash(data) == self.nodes[0]).then_some(0);
        }
        let wanted = self.scheme.leaf_hash(data);
        self.leaves().iter().position(|h| *h == wanted)
    }

    pub fn has(&self, data: &[u8]) -> bool {
        self.find_leaf(data).is_some()
    }

    /// Alias for [`MerkleTree::has`].
    pub fn verify(&self, data: &[u8]) -> bool {
        self.has(data)
    }

    /// Inclusion proof for `data` together with its leaf hash, or `None` when
    /// the data is not in the tree.
    pub fn get_proof(&self, data: &[u8]) -> Option<(H::Output, Proof<H::Output>)> {
        let mut idx = self.find_leaf(data)?;
        let root = self.root();

        if self.leaves_n == 1 {
            return Some((root, Proof::new(vec![ProofStep::new(root, false)])));
        }

        let leaf_hash = self.nodes[idx];
        let height = self.height();
        let mut steps = Vec::with_capacity(height + 1);
        for level in 0..height {
            let layer = self.layer(height - level)?;
            let sibling = layer.offset + (idx ^ 1);
            steps.push(ProofStep::new(self.nodes[sibling], idx & 1 == 1));
            idx >>= 1;
        }
        steps.push(ProofStep::new(root, false));

        trace!("Built proof with {} steps for leaf {}", steps.len(), hex::encode(leaf_hash));
        Some((leaf_hash, Proof::new(steps)))
    }

    /// Check `proof` for `data` against a root the caller trusts.
    pub fn verify_proof(&self, data: &[u8], proof: &Proof<H::Output>, root: &H::Output) -> bool {
        proof.verify(&self.scheme, data, root, self.height())
    }
}

fn alloc_nodes<O: Copy + Default>(leaf_count: usize) -> Result<Vec<O>> {
    let slots = tree_size(leaf_count);
    let mut nodes = Vec::new();
    nodes
        .try_reserve_exact(slots)
        .map_err(|_| MerkleError::Allocation { slots })?;
    nodes.resize(slots, O::default());
    Ok(nodes)
}

impl<H: HashFunction, C: Concatenator> fmt::Display for MerkleTree<H, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Merkle tree:")?;
        let height = self.height();
        for idx in (0..=height).rev() {
            let Some(hashes) = self.layer_hashes(idx) else {
                continue;
            };
            writeln!(f, "\nLayer {} (size = {}):", idx, hashes.len())?;
            writeln!(f, "{}", hashes.iter().map(hex::encode).join("\n"))?;
        }
        Ok(())
    }
}
