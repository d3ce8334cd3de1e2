// Copyright (C) 2025 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::fmt::Display;

use crate::Architecture;

/// A physical register of some architecture, as a dense zero-based number.
///
/// The number only means something together with the [`Architecture`] it came from, and it is not
/// validated on construction: use [`RegisterClassifier::is_valid_register`](crate::RegisterClassifier::is_valid_register)
/// when the number comes from somewhere untrusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegisterId(u8);

impl RegisterId {
    #[must_use]
    pub const fn new(number: u8) -> Self {
        Self(number)
    }

    #[must_use]
    pub(crate) const fn from_index(index: usize) -> Self {
        debug_assert!(index <= u8::MAX as usize);
        Self(index as u8)
    }

    #[must_use]
    pub const fn number(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Which word of a [`RegisterSet`](crate::RegisterSet) holds this register.
    #[must_use]
    pub const fn word(self) -> usize {
        self.index() / 64
    }

    /// The bit of this register inside its word.
    #[must_use]
    pub const fn bit(self) -> u64 {
        1 << (self.index() % 64)
    }
}

impl From<u8> for RegisterId {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl Display for RegisterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("#")?;
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(strum::AsRefStr, strum::Display, strum::EnumIter, strum::EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum RegisterKind {
    Integer,
    Float,

    /// Predicate registers (ARM64 SVE) or opmask registers (AVX-512).
    Mask,
}

/// An inclusive range of registers that all share one [`RegisterKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KindRange {
    first: RegisterId,
    last: RegisterId,
}

impl KindRange {
    #[must_use]
    pub const fn new(first: RegisterId, last: RegisterId) -> Self {
        debug_assert!(first.number() <= last.number());
        Self { first, last }
    }

    #[must_use]
    pub const fn first(&self) -> RegisterId {
        self.first
    }

    #[must_use]
    pub const fn last(&self) -> RegisterId {
        self.last
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.last.index() - self.first.index() + 1
    }

    #[must_use]
    pub const fn contains(&self, id: RegisterId) -> bool {
        id.number() >= self.first.number() && id.number() <= self.last.number()
    }

    #[must_use]
    pub const fn is_within_one_word(&self) -> bool {
        self.first.word() == self.last.word()
    }

    /// The word of a [`RegisterSet`](crate::RegisterSet) that holds this range.
    #[must_use]
    pub const fn word(&self) -> usize {
        self.first.word()
    }

    /// The bits of [`Self::word`] that belong to this range.
    #[must_use]
    pub const fn word_mask(&self) -> u64 {
        let low = self.first.index() % 64;
        let high = self.last.index() % 64;
        let width = high - low + 1;

        if width == 64 {
            u64::MAX
        } else {
            ((1 << width) - 1) << low
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = RegisterId> {
        (self.first.number()..=self.last.number()).map(RegisterId::new)
    }
}

/// Where a value lives after (or before) register allocation.
///
/// Older backends encoded both [`Self::OnStack`] and [`Self::Unassigned`] as the same number (the
/// register count of the architecture). Use [`Self::encode`] and the `decode_*` functions when talking
/// to code that still expects that number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterSlot {
    Physical(RegisterId),

    /// The value was allocated to the stack.
    OnStack,

    /// No register was assigned (yet), or none applies.
    Unassigned,
}

impl RegisterSlot {
    #[must_use]
    pub const fn as_physical(&self) -> Option<RegisterId> {
        if let Self::Physical(id) = self {
            Some(*id)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn is_physical(&self) -> bool {
        matches!(self, Self::Physical(..))
    }

    #[must_use]
    pub const fn is_on_stack(&self) -> bool {
        matches!(self, Self::OnStack)
    }

    #[must_use]
    pub const fn is_unassigned(&self) -> bool {
        matches!(self, Self::Unassigned)
    }

    /// Both [`Self::OnStack`] and [`Self::Unassigned`] encode as the register count of `A`.
    #[must_use]
    pub fn encode<A: Architecture>(self) -> u8 {
        match self {
            Self::Physical(id) => {
                debug_assert!(id.index() < A::REGISTER_COUNT, "register {id} bestaat niet op {}", A::KIND);
                id.number()
            }
            Self::OnStack | Self::Unassigned => A::REGISTER_COUNT as u8,
        }
    }

    /// Decodes a raw number that is the result of register allocation, where the sentinel means "on the stack".
    #[must_use]
    pub fn decode_allocation<A: Architecture>(raw: u8) -> Self {
        Self::decode::<A>(raw, Self::OnStack)
    }

    /// Decodes a raw number that is a (possibly missing) register assignment, where the sentinel means "none".
    #[must_use]
    pub fn decode_assignment<A: Architecture>(raw: u8) -> Self {
        Self::decode::<A>(raw, Self::Unassigned)
    }

    #[must_use]
    fn decode<A: Architecture>(raw: u8, sentinel: Self) -> Self {
        let raw_index = raw as usize;
        debug_assert!(raw_index <= A::REGISTER_COUNT, "registernummer {raw} is ongeldig op {}", A::KIND);

        if raw_index >= A::REGISTER_COUNT {
            sentinel
        } else {
            Self::Physical(RegisterId::new(raw))
        }
    }
}

impl From<RegisterId> for RegisterSlot {
    fn from(value: RegisterId) -> Self {
        Self::Physical(value)
    }
}
