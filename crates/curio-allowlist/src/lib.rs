//! Merkle allowlist membership for airdrop claims.
//!
//! An [`Allowlist`] commits a fixed list of account addresses to a single
//! 32-byte [`Root`] via a sorted-pair keccak-256 merkle tree. The root is
//! published on-chain by an external collaborator; each listed address can
//! then obtain a compact [`MembershipProof`] which the on-chain verifier
//! checks against the stored root without ever seeing the full list.
//!
//! The allowlist is immutable once built. Changing the list means building
//! a fresh allowlist and re-publishing its root, which invalidates every
//! previously distributed proof. All queries take `&self`, so a built
//! allowlist can be shared read-only across threads without coordination.
//!
//! # Examples
//! ```
//! use curio_allowlist::{
//!     verify_membership,
//!     Address,
//!     Allowlist,
//! };
//!
//! let addresses: Vec<Address> = [
//!     "0x70997970C51812dc3A010C7d01b50e0d17dc79C8",
//!     "0x3C44CdDdB6a900fa2b585dd299e03d12FA4293BC",
//! ]
//! .iter()
//! .map(|s| s.parse().unwrap())
//! .collect();
//! let claimant = addresses[0];
//!
//! let allowlist = Allowlist::new(addresses).unwrap();
//! let root = allowlist.root();
//! let proof = allowlist.proof_of_membership(&claimant).unwrap();
//!
//! // the fold the on-chain verifier performs
//! assert!(verify_membership(&root, &claimant, &proof));
//! ```

use std::str::FromStr;

pub mod address;

pub use address::Address;
use curio_merkle::Tree;

/// An immutable allowlist of account addresses committed to a merkle root.
#[derive(Debug)]
pub struct Allowlist {
    addresses: Vec<Address>,
    tree: Tree,
}

impl Allowlist {
    /// Builds the merkle tree over `addresses`.
    ///
    /// Each address is hashed to a leaf; duplicates are retained as
    /// duplicate leaves (harmless but wasteful). The input order is
    /// irrelevant: the tree sorts the leaf hashes, so any permutation of
    /// the same list produces the same root.
    ///
    /// # Errors
    /// Returns an error if `addresses` is empty. A root over zero leaves
    /// is not a meaningful commitment, and publishing one would make every
    /// claim unverifiable.
    pub fn new(addresses: Vec<Address>) -> Result<Self, Error> {
        if addresses.is_empty() {
            return Err(Error::empty_allowlist());
        }
        let tree = Tree::from_leaf_hashes(addresses.iter().map(Address::leaf_hash).collect());
        Ok(Self {
            addresses,
            tree,
        })
    }

    /// Returns the root committing to the full allowlist, the one value
    /// that must reach the chain.
    #[must_use]
    pub fn root(&self) -> Root {
        Root(self
            .tree
            .root()
            .expect("an allowlist is never empty, so its tree always has a root"))
    }

    /// Returns the number of addresses the allowlist was built from,
    /// counting duplicates.
    #[must_use]
    pub fn address_count(&self) -> usize {
        self.addresses.len()
    }

    /// Returns the addresses the allowlist was built from, in input order.
    #[must_use]
    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    /// Returns `true` if `address` is in the allowlist.
    #[must_use]
    pub fn contains(&self, address: &Address) -> bool {
        self.tree.contains_leaf(address.leaf_hash())
    }

    /// Constructs the membership proof for `address`.
    ///
    /// # Errors
    /// Returns an error if `address` is not in the allowlist. This is an
    /// expected outcome, not a failure of the allowlist: callers should
    /// surface it as "address not eligible".
    pub fn proof_of_membership(&self, address: &Address) -> Result<MembershipProof, Error> {
        self.tree
            .construct_proof_for_leaf(address.leaf_hash())
            .map(|inner| MembershipProof {
                inner,
            })
            .ok_or_else(|| Error::not_in_allowlist(*address))
    }
}

/// Returns `true` if `proof` attests that `address` is in the allowlist
/// committed to by `root`.
///
/// This recomputes the root from the address's leaf hash and the proof's
/// sibling hashes with the same sort-then-hash rule used at construction.
/// It needs no [`Allowlist`] instance: it is the check the on-chain
/// verifier performs against its stored root, kept here so proofs can be
/// validated against that contract before ever being submitted.
///
/// Total predicate: returns `false` for any mismatched root, wrong
/// address, or malformed proof, and never panics. It gates value transfer
/// and must fail closed.
#[must_use]
pub fn verify_membership(root: &Root, address: &Address, proof: &MembershipProof) -> bool {
    proof.inner.verify(root.bytes(), address.leaf_hash())
}

/// The root hash of an allowlist tree, hex-encoded for on-chain use.
///
/// Displays as `0x`-prefixed lowercase hex and parses the same format
/// back, with or without the prefix.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Root([u8; 32]);

impl Root {
    #[must_use]
    pub fn bytes(self) -> [u8; 32] {
        self.0
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl From<[u8; 32]> for Root {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl FromStr for Root {
    type Err = RootParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_hash(s).map(Self)
    }
}

impl std::fmt::Display for Root {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Root {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Root {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

fn decode_hash(s: &str) -> Result<[u8; 32], RootParseError> {
    let stripped = s.strip_prefix("0x").unwrap_or(s);
    if stripped.len() != 64 {
        return Err(RootParseError::incorrect_length(stripped.len()));
    }
    let mut bytes = [0; 32];
    hex::decode_to_slice(stripped, &mut bytes).map_err(RootParseError::invalid_hex)?;
    Ok(bytes)
}

/// The error returned when parsing a malformed root hash string.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct RootParseError(RootParseErrorKind);

impl RootParseError {
    fn incorrect_length(received: usize) -> Self {
        Self(RootParseErrorKind::IncorrectLength {
            received,
        })
    }

    fn invalid_hex(source: hex::FromHexError) -> Self {
        Self(RootParseErrorKind::InvalidHex {
            source,
        })
    }
}

#[derive(Debug, thiserror::Error)]
enum RootParseErrorKind {
    #[error("expected a hash of 64 hex characters, got `{received}`")]
    IncorrectLength { received: usize },
    #[error("failed decoding provided string as hex")]
    InvalidHex { source: hex::FromHexError },
}

/// A compact proof that one address belongs to an allowlist.
///
/// Wraps the ordered bottom-up sequence of sibling hashes. Because pairs
/// are sorted before hashing, no left/right position tags are carried.
/// Proofs are created on demand and remain valid until the published root
/// changes.
///
/// With the `serde` feature enabled a proof serializes as a sequence of
/// `0x`-prefixed hex strings, the wire shape handed to the claim call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MembershipProof {
    inner: curio_merkle::Proof,
}

impl MembershipProof {
    /// Constructs a proof from its sibling hashes, ordered from the leaf
    /// level up.
    #[must_use]
    pub fn from_siblings(siblings: Vec<[u8; 32]>) -> Self {
        Self {
            inner: curio_merkle::Proof::from_siblings(siblings),
        }
    }

    /// Returns an iterator over the sibling hashes, ordered from the leaf
    /// level up.
    pub fn siblings(&self) -> impl Iterator<Item = [u8; 32]> + '_ {
        self.inner.siblings()
    }

    /// Returns the number of sibling hashes in the proof.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for MembershipProof {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(
            self.siblings()
                .map(|sibling| format!("0x{}", hex::encode(sibling))),
        )
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for MembershipProof {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let elements = Vec::<String>::deserialize(deserializer)?;
        let mut siblings = Vec::with_capacity(elements.len());
        for element in &elements {
            let sibling = decode_hash(element).map_err(|err| {
                serde::de::Error::custom(format!("invalid proof element `{element}`: {err}"))
            })?;
            siblings.push(sibling);
        }
        Ok(Self::from_siblings(siblings))
    }
}

/// The errors arising when building or querying an allowlist.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct Error(ErrorKind);

impl Error {
    fn empty_allowlist() -> Self {
        Self(ErrorKind::EmptyAllowlist)
    }

    fn not_in_allowlist(address: Address) -> Self {
        Self(ErrorKind::NotInAllowlist {
            address,
        })
    }

    /// Returns `true` if the error reports an address missing from the
    /// allowlist, the expected outcome for an ineligible claimant.
    #[must_use]
    pub fn is_not_in_allowlist(&self) -> bool {
        matches!(self.0, ErrorKind::NotInAllowlist { .. })
    }
}

#[derive(Debug, thiserror::Error)]
enum ErrorKind {
    #[error("cannot build an allowlist from an empty address list")]
    EmptyAllowlist,
    #[error("address `{address}` is not in the allowlist")]
    NotInAllowlist { address: Address },
}
