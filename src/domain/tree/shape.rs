use std::ops::Range;

/// Number of hashes stored for a tree with `leaves_n` leaves.
///
/// Every level with an odd width gets its last element duplicated, and the
/// duplicate occupies a slot of its own. Trees with zero or one leaf hold a
/// single slot.
pub fn tree_size(leaves_n: usize) -> usize {
    let mut total = 1;
    let mut width = leaves_n;
    while width > 1 {
        width += width & 1;
        total += width;
        width >>= 1;
    }
    total
}

/// Number of levels between the leaves and the root, i.e. `ceil(log2(n))`.
pub fn tree_height(leaves_n: usize) -> usize {
    if leaves_n <= 1 {
        return 0;
    }
    leaves_n.ilog2() as usize + usize::from(!leaves_n.is_power_of_two())
}

/// A window into the flattened hash buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layer {
    pub offset: usize,
    pub width: usize,
}

impl Layer {
    pub fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.width
    }
}

/// Locate layer `idx` (0 for the root, `tree_height(leaves_n)` for the leaves).
///
/// Widths include the padding duplicate; the root is reported with width 1.
pub fn layer(leaves_n: usize, idx: usize) -> Option<Layer> {
    let height = tree_height(leaves_n);
    if idx > height {
        return None;
    }
    if leaves_n <= 1 {
        return Some(Layer {
            offset: 0,
            width: 1,
        });
    }

    let mut offset = 0;
    let mut width = leaves_n + (leaves_n & 1);
    for _ in idx..height {
        offset += width;
        width >>= 1;
        width += width & 1;
    }

    // The arithmetic above pads the root to 2 as well.
    if idx == 0 {
        width = 1;
    }
    Some(Layer { offset, width })
}
