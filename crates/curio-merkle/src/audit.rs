//! Inclusion proofs and their verification.
//!
//! Verification is a pure fold: starting from the leaf hash, each sibling in
//! the proof is combined via the sort-then-hash rule, and the final value is
//! compared against the root. No tree is needed, which is the point: an
//! on-chain verifier holds only the root and performs exactly this fold.

use crate::combine;

/// Recomputes the root committed to by `leaf_hash` and the given sibling
/// hashes, bottom up.
///
/// This is the fold an independent verifier performs; [`Proof::verify`] and
/// [`Audit::perform`] are wrappers around it.
#[must_use]
pub fn reconstruct_root<I>(leaf_hash: [u8; 32], siblings: I) -> [u8; 32]
where
    I: IntoIterator<Item = [u8; 32]>,
{
    siblings
        .into_iter()
        .fold(leaf_hash, |node, sibling| combine(&node, &sibling))
}

/// An inclusion proof: the ordered sequence of sibling hashes needed to
/// recompute the root starting from one leaf hash.
///
/// Because pairs are sorted at every combination step, the proof carries no
/// left/right position tags. Levels at which the proven leaf's ancestor was
/// an unpaired, promoted node contribute no sibling.
///
/// With the `serde` feature enabled a proof serializes as a sequence of
/// 32-byte sibling hashes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Proof {
    /// The sibling hashes, 32 bytes each, ordered from the leaf level up.
    audit_path: Vec<u8>,
}

impl Proof {
    pub(crate) fn from_audit_path(audit_path: Vec<u8>) -> Self {
        debug_assert!(audit_path.len() % 32 == 0);
        Self {
            audit_path,
        }
    }

    /// Constructs a proof from its sibling hashes, ordered from the leaf
    /// level up.
    #[must_use]
    pub fn from_siblings(siblings: Vec<[u8; 32]>) -> Self {
        let mut audit_path = Vec::with_capacity(siblings.len() * 32);
        for sibling in &siblings {
            audit_path.extend_from_slice(sibling);
        }
        Self {
            audit_path,
        }
    }

    /// Returns the number of sibling hashes in the proof.
    #[must_use]
    pub fn len(&self) -> usize {
        self.audit_path.len() / 32
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.audit_path.is_empty()
    }

    /// Returns an iterator over the sibling hashes, ordered from the leaf
    /// level up.
    pub fn siblings(&self) -> impl Iterator<Item = [u8; 32]> + '_ {
        self.audit_path.chunks_exact(32).map(|chunk| {
            <[u8; 32]>::try_from(chunk).expect("the audit path is a multiple of 32 bytes")
        })
    }

    /// Starts an audit of the proof.
    ///
    /// # Examples
    /// ```
    /// use curio_merkle::{
    ///     hash_leaf,
    ///     Tree,
    /// };
    /// let tree = Tree::from_leaves([&b"a"[..], b"b", b"c"]);
    /// let root = tree.root().unwrap();
    /// let proof = tree.construct_proof_for_leaf(hash_leaf(b"b")).unwrap();
    /// assert!(
    ///     proof
    ///         .audit()
    ///         .with_root(root)
    ///         .with_leaf_hash(hash_leaf(b"b"))
    ///         .perform()
    /// );
    /// ```
    #[must_use = "an audit must be performed to be useful"]
    pub fn audit(&self) -> Audit<'_> {
        Audit {
            proof: self,
            root: NoRoot,
            leaf_hash: NoLeafHash,
        }
    }

    /// Returns `true` if the proof attests that `leaf_hash` is a leaf of
    /// the tree with root hash `root`.
    ///
    /// Shorthand for the [`Proof::audit`] chain. Total: returns `false` on
    /// any mismatch and never panics.
    #[must_use]
    pub fn verify(&self, root: [u8; 32], leaf_hash: [u8; 32]) -> bool {
        reconstruct_root(leaf_hash, self.siblings()) == root
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Proof {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.siblings())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Proof {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let siblings = Vec::<[u8; 32]>::deserialize(deserializer)?;
        Ok(Self::from_siblings(siblings))
    }
}

pub struct NoRoot;
pub struct WithRoot([u8; 32]);
pub struct NoLeafHash;
pub struct WithLeafHash([u8; 32]);

/// An audit of an inclusion proof against a root and a leaf hash.
///
/// Created with [`Proof::audit`]. The root and the leaf hash must both be
/// set before the audit can be performed; this is enforced at compile time.
pub struct Audit<'a, TRoot = NoRoot, TLeafHash = NoLeafHash> {
    proof: &'a Proof,
    root: TRoot,
    leaf_hash: TLeafHash,
}

impl<'a, TRoot, TLeafHash> Audit<'a, TRoot, TLeafHash> {
    #[must_use = "an audit must be performed to be useful"]
    pub fn with_root(self, root: [u8; 32]) -> Audit<'a, WithRoot, TLeafHash> {
        Audit {
            proof: self.proof,
            root: WithRoot(root),
            leaf_hash: self.leaf_hash,
        }
    }

    #[must_use = "an audit must be performed to be useful"]
    pub fn with_leaf_hash(self, leaf_hash: [u8; 32]) -> Audit<'a, TRoot, WithLeafHash> {
        Audit {
            proof: self.proof,
            root: self.root,
            leaf_hash: WithLeafHash(leaf_hash),
        }
    }
}

impl Audit<'_, WithRoot, WithLeafHash> {
    /// Performs the audit, returning `true` if the proof connects the leaf
    /// hash to the root.
    #[must_use]
    pub fn perform(self) -> bool {
        self.proof.verify(self.root.0, self.leaf_hash.0)
    }
}
