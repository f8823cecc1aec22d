//! Tessel Identifiers
//!
//! Stable 64-bit identifiers for widgets across frames.
//!
//! Layout handles are recycled, so an immediate-mode caller cannot use them
//! as identity. Instead it hashes a label (`"sidebar"`, `"row"`) into an
//! [`Id`] and scopes repeated labels by folding them into their parent's id:
//!
//! ```
//! use tessel_id::{combine, hash, hash_indexed};
//!
//! let list = hash("list");
//! let first = combine(list, hash_indexed("item", 0));
//! let second = combine(list, hash_indexed("item", 1));
//! assert_ne!(first, second);
//! ```
//!
//! Every function here is pure: no tables, no shared state, safe to call
//! from any thread.

/// FNV-1a offset basis
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime
const FNV_PRIME: u64 = 0x100000001b3;

/// Widget identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Id(pub u64);

impl Id {
    /// Id of the empty label
    pub const EMPTY: Id = Id(FNV_OFFSET);

    /// Raw value
    #[inline]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl From<&str> for Id {
    fn from(label: &str) -> Self {
        hash(label)
    }
}

/// Incremental FNV-1a state
#[derive(Debug, Clone, Copy)]
struct Fnv {
    state: u64,
}

impl Fnv {
    #[inline]
    fn seeded(state: u64) -> Self {
        Self { state }
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state ^= byte as u64;
            self.state = self.state.wrapping_mul(FNV_PRIME);
        }
    }

    #[inline]
    fn finish(self) -> u64 {
        self.state
    }
}

/// Hash a label into an id
pub fn hash(label: &str) -> Id {
    hash_bytes(label.as_bytes())
}

/// Hash raw bytes into an id
pub fn hash_bytes(bytes: &[u8]) -> Id {
    let mut fnv = Fnv::seeded(FNV_OFFSET);
    fnv.write(bytes);
    Id(fnv.finish())
}

/// Scope `child` inside `parent`.
///
/// Order matters: `combine(a, b) != combine(b, a)` for distinct ids, so the
/// same label used under two different containers yields two ids.
pub fn combine(parent: Id, child: Id) -> Id {
    let mut fnv = Fnv::seeded(parent.0);
    fnv.write(&child.0.to_le_bytes());
    Id(fnv.finish())
}

/// Id for the `index`-th repetition of `label` inside a loop
pub fn hash_indexed(label: &str, index: u32) -> Id {
    combine(hash(label), Id(index as u64))
}
