// Copyright (C) 2025 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::{fmt::Display, ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Sub, SubAssign}};

/// One word of a [`RegisterSet`](super::RegisterSet), holding registers of a single
/// [`RegisterKind`](crate::RegisterKind).
///
/// Bit `n` is register `64 * word + n`, where `word` is the word that kind lives in (see
/// [`KindRange::word`](crate::KindRange::word)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SingleTypeRegSet(u64);

impl SingleTypeRegSet {
    pub const EMPTY: Self = Self(0);

    #[must_use]
    pub const fn new(bits: u64) -> Self {
        Self(bits)
    }

    #[must_use]
    pub const fn bits(&self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn is_non_empty(&self) -> bool {
        self.0 != 0
    }

    #[must_use]
    pub const fn count(&self) -> u32 {
        self.0.count_ones()
    }

    /// The lowest set bit. Panics (in debug builds) when the set is empty.
    #[must_use]
    pub fn lowest_bit(&self) -> u32 {
        debug_assert!(self.is_non_empty(), "laagste bit van een lege verzameling opgevraagd");
        self.0.trailing_zeros()
    }
}

impl BitOr for SingleTypeRegSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for SingleTypeRegSet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for SingleTypeRegSet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for SingleTypeRegSet {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl Sub for SingleTypeRegSet {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 & !rhs.0)
    }
}

impl SubAssign for SingleTypeRegSet {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 &= !rhs.0;
    }
}

impl Display for SingleTypeRegSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}
