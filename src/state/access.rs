//! Access bitmasks.
//!
//! Every command requires a combination of access bits. A session satisfies
//! a requirement only when it holds all required bits; see
//! [`PlayerDirectory::has_access`](super::PlayerDirectory::has_access).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// A set of independent permission bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Access(pub u32);

impl Access {
    pub const LEVEL_0: Access = Access(0);
    pub const LEVEL_1: Access = Access(1);
    pub const LEVEL_2: Access = Access(1 << 1);
    pub const LEVEL_4: Access = Access(1 << 2);
    pub const LEVEL_8: Access = Access(1 << 3);
    pub const LEVEL_16: Access = Access(1 << 4);
    pub const LEVEL_32: Access = Access(1 << 5);
    pub const LEVEL_64: Access = Access(1 << 6);
    pub const LEVEL_128: Access = Access(1 << 7);
    pub const LEVEL_256: Access = Access(1 << 8);
    pub const LEVEL_512: Access = Access(1 << 9);
    pub const LEVEL_1024: Access = Access(1 << 10);
    pub const LEVEL_2048: Access = Access(1 << 11);
    pub const LEVEL_65536: Access = Access(1 << 16);

    /// Protects a session from kick, ban, gag and vote-kick.
    pub const IMMUNITY: Access = Access::LEVEL_1024;

    /// Raw bit value.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// True when every bit of `required` is present in `self`.
    #[inline]
    pub const fn contains(self, required: Access) -> bool {
        self.0 & required.0 == required.0
    }
}

impl BitOr for Access {
    type Output = Access;

    #[inline]
    fn bitor(self, rhs: Access) -> Access {
        Access(self.0 | rhs.0)
    }
}

impl BitOrAssign for Access {
    #[inline]
    fn bitor_assign(&mut self, rhs: Access) {
        self.0 |= rhs.0;
    }
}

impl From<u32> for Access {
    fn from(bits: u32) -> Self {
        Access(bits)
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
