use std::str::FromStr;

/// The length in bytes of an account address.
pub const ADDRESS_LENGTH: usize = 20;

/// A fixed-length account address.
///
/// Parsed from the fixed-format hex string used everywhere an address
/// crosses a boundary: 40 hex characters, with or without a leading `0x`.
/// Displays as `0x`-prefixed lowercase hex.
///
/// # Examples
/// ```
/// use curio_allowlist::Address;
/// let address: Address = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8"
///     .parse()
///     .unwrap();
/// assert_eq!(
///     "0x70997970c51812dc3a010c7d01b50e0d17dc79c8",
///     address.to_string(),
/// );
/// ```
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    #[must_use]
    pub fn bytes(self) -> [u8; ADDRESS_LENGTH] {
        self.0
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Returns the keccak-256 hash of the address bytes, the leaf this
    /// address contributes to an allowlist tree.
    ///
    /// The address *bytes* are hashed, not its string rendering, matching
    /// the on-chain verifier's hashing of the packed address.
    #[must_use]
    pub fn leaf_hash(&self) -> [u8; 32] {
        curio_merkle::hash_leaf(&self.0)
    }
}

impl From<[u8; ADDRESS_LENGTH]> for Address {
    fn from(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        if stripped.len() != 2 * ADDRESS_LENGTH {
            return Err(Error::incorrect_length(stripped.len()));
        }
        let mut bytes = [0; ADDRESS_LENGTH];
        hex::decode_to_slice(stripped, &mut bytes).map_err(Error::invalid_hex)?;
        Ok(Self(bytes))
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// The error returned when parsing a malformed address string.
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct Error(ErrorKind);

impl Error {
    fn incorrect_length(received: usize) -> Self {
        Self(ErrorKind::IncorrectLength {
            received,
        })
    }

    fn invalid_hex(source: hex::FromHexError) -> Self {
        Self(ErrorKind::InvalidHex {
            source,
        })
    }
}

#[derive(Debug, thiserror::Error)]
enum ErrorKind {
    #[error("expected an address of 40 hex characters, got `{received}`")]
    IncorrectLength { received: usize },
    #[error("failed decoding provided string as hex")]
    InvalidHex { source: hex::FromHexError },
}
