//! A sorted-pair keccak-256 merkle tree with a flat representation.
//!
//! This merkle tree commits to a multiset of leaves: the hashed leaves are
//! sorted byte-wise before the first level is formed, and every pair of
//! sibling hashes is again sorted before being concatenated and hashed into
//! its parent. Two consequences follow:
//!
//! + the root is a pure function of the leaf multiset, independent of the
//!   order in which leaves were supplied;
//! + inclusion proofs carry no left/right position information, because the
//!   verifier re-sorts at every combination step.
//!
//! A level with an odd number of nodes promotes its final unpaired node to
//! the next level unchanged. A promoted node contributes no sibling to an
//! inclusion proof at that level.
//!
//! The same hash function, keccak-256, is used for leaf hashing and for node
//! combination, without domain separation. This is the scheme implemented by
//! the common solidity merkle-proof verifiers, which recompute
//! `keccak256(sorted pair)` per level against a stored root.
//!
//! All node hashes live in a single byte buffer of 32-byte keccak-256
//! hashes, level by level, leaves first. The tree stores only hashes, not
//! the leaves' preimages.
//!
//! # Usage and examples
//! ```
//! use curio_merkle::{
//!     hash_leaf,
//!     Tree,
//! };
//!
//! // Construct a tree from an iterable yielding byte slices.
//! let tree = Tree::from_leaves([&b"one"[..], b"two", b"three"]);
//!
//! let root = tree.root().expect("the tree has leaves, so it has a root");
//! let proof = tree
//!     .construct_proof_for_leaf(hash_leaf(b"two"))
//!     .expect("leaf \"two\" must be inside the tree");
//!
//! assert!(proof.verify(root, hash_leaf(b"two")));
//! assert!(!proof.verify(root, hash_leaf(b"four")));
//! ```

use sha3::{
    Digest as _,
    Keccak256,
};

pub mod audit;
#[cfg(test)]
mod tests;

pub use audit::{
    Audit,
    Proof,
};

/// Calculates `keccak256(data)`, the hash of a single leaf.
#[must_use]
pub fn hash_leaf(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// Calculates `keccak256(lo || hi)`, where `(lo, hi)` is `(left, right)`
/// sorted byte-wise.
///
/// This is the combination rule applied at every level of the tree. Sorting
/// before hashing makes the operation commutative, so proof verification
/// needs no left/right positional tags.
///
/// # Examples
/// ```
/// use curio_merkle::combine;
/// let left = [1; 32];
/// let right = [2; 32];
/// assert_eq!(combine(&left, &right), combine(&right, &left));
/// ```
#[must_use]
pub fn combine(left: &[u8; 32], right: &[u8; 32]) -> [u8; 32] {
    let (lo, hi) = if left <= right {
        (left, right)
    } else {
        (right, left)
    };
    let mut hasher = Keccak256::new();
    hasher.update(lo);
    hasher.update(hi);
    hasher.finalize().into()
}

/// A merkle tree over a sorted leaf level with a flat binary representation.
///
/// The tree is immutable once constructed. To commit to a different leaf
/// set, construct a fresh tree; there is no incremental update path.
#[derive(Debug)]
pub struct Tree {
    /// All node hashes, 32 bytes each, level by level starting at the leaf
    /// level. The final 32 bytes are the root of a non-empty tree.
    nodes: Vec<u8>,
    /// Node count per level, bottom up. Empty exactly when the tree is
    /// empty; the final entry of a non-empty tree is always 1.
    level_lens: Vec<usize>,
}

impl Tree {
    /// Constructs a merkle tree from an iterator yielding byte slices.
    ///
    /// Every item is hashed with [`hash_leaf`] to produce the leaf level.
    ///
    /// # Examples
    /// ```
    /// # use curio_merkle::Tree;
    /// let tree = Tree::from_leaves([&[1u8, 2, 3][..], b"helloworld"]);
    /// assert_eq!(2, tree.leaf_count());
    /// ```
    pub fn from_leaves<I, B>(iter: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        Self::from_leaf_hashes(iter.into_iter().map(|item| hash_leaf(item.as_ref())).collect())
    }

    /// Constructs a merkle tree from pre-hashed 32-byte leaves.
    ///
    /// The leaf hashes are sorted before the tree is built, so the
    /// resulting root depends only on the multiset of leaves. Duplicate
    /// hashes are retained as duplicate leaves.
    #[must_use]
    pub fn from_leaf_hashes(mut leaves: Vec<[u8; 32]>) -> Self {
        leaves.sort_unstable();

        let mut nodes = Vec::with_capacity(leaves.len().saturating_mul(64));
        for leaf in &leaves {
            nodes.extend_from_slice(leaf);
        }
        if leaves.is_empty() {
            return Self {
                nodes,
                level_lens: Vec::new(),
            };
        }

        let mut level_lens = vec![leaves.len()];
        let mut level_start = 0;
        let mut level_len = leaves.len();
        while level_len > 1 {
            for pair in 0..level_len / 2 {
                let left = read_node(&nodes, level_start + 2 * pair);
                let right = read_node(&nodes, level_start + 2 * pair + 1);
                nodes.extend_from_slice(&combine(&left, &right));
            }
            if level_len % 2 == 1 {
                // odd node out: promoted to the next level unchanged
                let promoted = read_node(&nodes, level_start + level_len - 1);
                nodes.extend_from_slice(&promoted);
            }
            level_start += level_len;
            level_len = level_len.div_ceil(2);
            level_lens.push(level_len);
        }

        Self {
            nodes,
            level_lens,
        }
    }

    /// Returns the number of leaves committed to by the tree.
    #[must_use]
    #[inline]
    pub fn leaf_count(&self) -> usize {
        self.level_lens.first().copied().unwrap_or(0)
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the root hash of the merkle tree, or `None` if the tree has
    /// no leaves. An empty tree commits to nothing, so it has no root.
    ///
    /// # Examples
    /// ```
    /// use curio_merkle::{
    ///     hash_leaf,
    ///     Tree,
    /// };
    /// assert!(Tree::from_leaves::<_, &[u8]>([]).root().is_none());
    ///
    /// // The root of a single-leaf tree is the leaf hash itself: there is
    /// // no combination step.
    /// let tree = Tree::from_leaves([b"sole"]);
    /// assert_eq!(Some(hash_leaf(b"sole")), tree.root());
    /// ```
    #[must_use]
    pub fn root(&self) -> Option<[u8; 32]> {
        if self.is_empty() {
            return None;
        }
        Some(self.get_node(self.node_count() - 1))
    }

    /// Returns the hash of the i-th leaf in the sorted leaf level, or
    /// `None` if `i` falls outside the tree.
    #[must_use]
    pub fn leaf(&self, i: usize) -> Option<[u8; 32]> {
        (i < self.leaf_count()).then(|| self.get_node(i))
    }

    /// Returns the index of `leaf_hash` in the sorted leaf level, or `None`
    /// if the tree does not contain it.
    ///
    /// If the leaf is duplicated, the index of its first occurrence is
    /// returned.
    #[must_use]
    pub fn find_leaf(&self, leaf_hash: [u8; 32]) -> Option<usize> {
        let mut lo = 0;
        let mut hi = self.leaf_count();
        // lower bound over the sorted leaf level
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.get_node(mid) < leaf_hash {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        (lo < self.leaf_count() && self.get_node(lo) == leaf_hash).then_some(lo)
    }

    /// Returns `true` if `leaf_hash` is one of the tree's leaves.
    #[must_use]
    pub fn contains_leaf(&self, leaf_hash: [u8; 32]) -> bool {
        self.find_leaf(leaf_hash).is_some()
    }

    /// Constructs the inclusion proof for the i-th leaf of the sorted leaf
    /// level.
    ///
    /// Returns `None` if `i` is outside the tree.
    ///
    /// # Examples
    /// A single-leaf tree yields an empty proof:
    /// ```
    /// # use curio_merkle::Tree;
    /// let tree = Tree::from_leaves([b"sole"]);
    /// let proof = tree.construct_proof(0).expect("leaf 0 is inside the tree");
    /// assert!(proof.is_empty());
    /// assert!(tree.construct_proof(1).is_none());
    /// ```
    /// A proof for a perfect tree of 8 leaves has one sibling per level:
    /// ```
    /// # use curio_merkle::Tree;
    /// let tree = Tree::from_leaves((0u8..8).map(|i| vec![i; 32]));
    /// let proof = tree.construct_proof(7).expect("leaf 7 must be inside the tree");
    /// assert_eq!(3, proof.len());
    /// ```
    #[must_use]
    pub fn construct_proof(&self, leaf_index: usize) -> Option<Proof> {
        if leaf_index >= self.leaf_count() {
            return None;
        }
        let mut audit_path = Vec::new();
        let mut index = leaf_index;
        let mut level_start = 0;
        // every level except the root level contributes at most one sibling
        for &level_len in &self.level_lens[..self.level_lens.len() - 1] {
            let sibling = index ^ 1;
            if sibling < level_len {
                audit_path.extend_from_slice(&self.get_node(level_start + sibling));
            }
            index /= 2;
            level_start += level_len;
        }
        Some(Proof::from_audit_path(audit_path))
    }

    /// Constructs the inclusion proof for the leaf with hash `leaf_hash`.
    ///
    /// Returns `None` if the tree does not contain the leaf.
    #[must_use]
    pub fn construct_proof_for_leaf(&self, leaf_hash: [u8; 32]) -> Option<Proof> {
        self.construct_proof(self.find_leaf(leaf_hash)?)
    }

    /// Returns the total number of nodes across all levels.
    #[inline]
    fn node_count(&self) -> usize {
        self.nodes.len() / 32
    }

    /// Returns the hash of the node at flat index `i`.
    ///
    /// # Panics
    /// Panics if `i` is outside the tree, i.e. if `i >= self.node_count()`.
    #[inline]
    fn get_node(&self, i: usize) -> [u8; 32] {
        read_node(&self.nodes, i)
    }
}

#[inline]
fn read_node(nodes: &[u8], i: usize) -> [u8; 32] {
    nodes[i * 32..(i + 1) * 32].try_into().unwrap()
}
