// Copyright (C) 2025 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

mod single_type;
mod words;

use std::{
    fmt::{Debug, Display},
    hash::Hash,
    marker::PhantomData,
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not, Sub, SubAssign},
};

use crate::{Architecture, RegisterClassifier, RegisterId, RegisterKind, ValueType};

pub use self::{
    single_type::SingleTypeRegSet,
    words::{DoubleWord, RegisterWords, SingleWord},
};

/// A set of physical registers of architecture `A`, stored as one or two 64-bit words.
///
/// Register `n` is bit `n % 64` of word `n / 64`. Sets of different architectures are different
/// types, so a set can never be combined with a set that has a different word layout.
pub struct RegisterSet<A: Architecture> {
    words: A::Words,
    architecture: PhantomData<A>,
}

impl<A: Architecture> RegisterSet<A> {
    #[must_use]
    fn from_words(words: A::Words) -> Self {
        let () = A::WORDS_FIT;

        Self {
            words,
            architecture: PhantomData,
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::from_words(A::Words::default())
    }

    /// Every register of the architecture.
    #[must_use]
    pub fn all() -> Self {
        let count = A::REGISTER_COUNT;
        let low = low_bits(count.min(64));
        let high = low_bits(count.saturating_sub(64));
        Self::from_words(A::Words::from_words(low, high))
    }

    #[must_use]
    pub fn from_register(id: RegisterId) -> Self {
        let mut this = Self::empty();
        this.add(id);
        this
    }

    #[must_use]
    pub fn from_registers(ids: &[RegisterId]) -> Self {
        ids.iter().copied().collect()
    }

    /// Like [`Self::from_register`], but includes the second half of a value that occupies two
    /// float registers (e.g. a double on ARM).
    #[must_use]
    pub fn from_register_typed(id: RegisterId, value_type: ValueType) -> Self {
        let kind = value_type.register_kind();
        Self::from_kind_set(kind, A::type_mask(id, value_type))
    }

    /// Places a [`SingleTypeRegSet`] of the given kind back in the word that kind lives in.
    #[must_use]
    pub fn from_kind_set(kind: RegisterKind, set: SingleTypeRegSet) -> Self {
        let mut this = Self::empty();
        this.add_kind_set(kind, set);
        this
    }

    /// Interprets a single-word integer mask as a full set.
    #[must_use]
    pub fn from_integer_set(set: SingleTypeRegSet) -> Self {
        Self::from_kind_set(RegisterKind::Integer, set)
    }

    #[must_use]
    pub fn low_word(&self) -> u64 {
        self.words.low()
    }

    /// Zero on architectures with 64 registers or fewer.
    #[must_use]
    pub fn high_word(&self) -> u64 {
        self.words.high()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_zero()
    }

    #[must_use]
    pub fn is_non_empty(&self) -> bool {
        !self.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: RegisterId) -> bool {
        debug_assert!(A::is_valid_register(id), "register {id} bestaat niet op {}", A::KIND);
        self.words.word(id.word()) & id.bit() != 0
    }

    pub fn add(&mut self, id: RegisterId) {
        debug_assert!(A::is_valid_register(id), "register {id} bestaat niet op {}", A::KIND);
        self.words.update(id.word(), |word| word | id.bit());
    }

    pub fn remove(&mut self, id: RegisterId) {
        debug_assert!(A::is_valid_register(id), "register {id} bestaat niet op {}", A::KIND);
        self.words.update(id.word(), |word| word & !id.bit());
    }

    #[must_use]
    pub fn count(&self) -> u32 {
        self.words.count_ones()
    }

    /// The lowest-numbered register in the set. Panics (in debug builds) when the set is empty.
    #[must_use]
    pub fn first_member(&self) -> RegisterId {
        debug_assert!(self.is_non_empty(), "eerste register van een lege verzameling opgevraagd");

        let low = self.words.low();
        let index = if low != 0 {
            low.trailing_zeros()
        } else {
            64 + self.words.high().trailing_zeros()
        };

        RegisterId::from_index(index as usize)
    }

    /// Removes and returns the lowest-numbered register, or [`None`] if the set is empty.
    pub fn pop_first(&mut self) -> Option<RegisterId> {
        if self.is_empty() {
            return None;
        }

        let first = self.first_member();
        self.remove(first);
        Some(first)
    }

    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self::from_words(self.words.zip(other.words, |a, b| a | b))
    }

    #[must_use]
    pub fn intersection(self, other: Self) -> Self {
        Self::from_words(self.words.zip(other.words, |a, b| a & b))
    }

    #[must_use]
    pub fn symmetric_difference(self, other: Self) -> Self {
        Self::from_words(self.words.zip(other.words, |a, b| a ^ b))
    }

    #[must_use]
    pub fn difference(self, other: Self) -> Self {
        Self::from_words(self.words.zip(other.words, |a, b| a & !b))
    }

    /// All registers of the architecture that are not in this set.
    #[must_use]
    pub fn complement(self) -> Self {
        Self::from_words(self.words.map(|word| !word).zip(Self::all().words, |a, b| a & b))
    }

    #[must_use]
    pub fn is_subset(&self, other: &Self) -> bool {
        self.difference(*other).is_empty()
    }

    /// The registers of one kind, as the word that kind lives in. Empty if the architecture has no
    /// registers of that kind.
    #[must_use]
    pub fn project_to_kind(&self, kind: RegisterKind) -> SingleTypeRegSet {
        let Some(range) = A::kind_range(kind) else {
            return SingleTypeRegSet::EMPTY;
        };

        SingleTypeRegSet::new(self.words.word(range.word()) & range.word_mask())
    }

    pub fn add_kind_set(&mut self, kind: RegisterKind, set: SingleTypeRegSet) {
        let Some(range) = A::kind_range(kind) else {
            debug_assert!(set.is_empty(), "{} heeft geen registers van soort {kind}", A::KIND);
            return;
        };

        debug_assert!(set.bits() & !range.word_mask() == 0, "verzameling {set} bevat registers die niet van soort {kind} zijn");
        self.words.update(range.word(), |word| word | set.bits());
    }

    pub fn remove_kind_set(&mut self, kind: RegisterKind, set: SingleTypeRegSet) {
        let Some(range) = A::kind_range(kind) else {
            return;
        };

        self.words.update(range.word(), |word| word & !(set.bits() & range.word_mask()));
    }

    /// Interprets the whole set as a single word. Panics (in debug builds) when registers from the
    /// high word would get lost.
    #[must_use]
    pub fn as_single_word(&self) -> SingleTypeRegSet {
        debug_assert!(self.words.high() == 0, "verzameling {self} past niet in een enkel woord");
        SingleTypeRegSet::new(self.words.low())
    }

    #[must_use]
    pub fn iter(&self) -> Members<A> {
        Members { remaining: *self }
    }
}

#[must_use]
const fn low_bits(count: usize) -> u64 {
    if count >= 64 {
        u64::MAX
    } else {
        (1 << count) - 1
    }
}

impl<A: Architecture> Clone for RegisterSet<A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<A: Architecture> Copy for RegisterSet<A> {}

impl<A: Architecture> PartialEq for RegisterSet<A> {
    fn eq(&self, other: &Self) -> bool {
        self.words == other.words
    }
}

impl<A: Architecture> Eq for RegisterSet<A> {}

impl<A: Architecture> Hash for RegisterSet<A> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.words.hash(state);
    }
}

impl<A: Architecture> Default for RegisterSet<A> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<A: Architecture> Debug for RegisterSet<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set()
            .entries(self.iter().map(|id| A::register_name(id)))
            .finish()
    }
}

impl<A: Architecture> Display for RegisterSet<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("{")?;

        for (idx, id) in self.iter().enumerate() {
            if idx != 0 {
                f.write_str(", ")?;
            }

            f.write_str(A::register_name(id))?;
        }

        f.write_str("}")
    }
}

impl<A: Architecture> FromIterator<RegisterId> for RegisterSet<A> {
    fn from_iter<T: IntoIterator<Item = RegisterId>>(iter: T) -> Self {
        let mut this = Self::empty();
        this.extend(iter);
        this
    }
}

impl<A: Architecture> Extend<RegisterId> for RegisterSet<A> {
    fn extend<T: IntoIterator<Item = RegisterId>>(&mut self, iter: T) {
        for id in iter {
            self.add(id);
        }
    }
}

impl<A: Architecture> IntoIterator for RegisterSet<A> {
    type Item = RegisterId;
    type IntoIter = Members<A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// The members of a [`RegisterSet`], in ascending order.
#[derive(Debug, Clone)]
pub struct Members<A: Architecture> {
    remaining: RegisterSet<A>,
}

impl<A: Architecture> Iterator for Members<A> {
    type Item = RegisterId;

    fn next(&mut self) -> Option<Self::Item> {
        self.remaining.pop_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.remaining.count() as usize;
        (count, Some(count))
    }
}

impl<A: Architecture> ExactSizeIterator for Members<A> {}

impl<A: Architecture> BitOr for RegisterSet<A> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl<A: Architecture> BitOrAssign for RegisterSet<A> {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl<A: Architecture> BitAnd for RegisterSet<A> {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersection(rhs)
    }
}

impl<A: Architecture> BitAndAssign for RegisterSet<A> {
    fn bitand_assign(&mut self, rhs: Self) {
        *self = self.intersection(rhs);
    }
}

impl<A: Architecture> BitXor for RegisterSet<A> {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self::Output {
        self.symmetric_difference(rhs)
    }
}

impl<A: Architecture> BitXorAssign for RegisterSet<A> {
    fn bitxor_assign(&mut self, rhs: Self) {
        *self = self.symmetric_difference(rhs);
    }
}

impl<A: Architecture> Sub for RegisterSet<A> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.difference(rhs)
    }
}

impl<A: Architecture> SubAssign for RegisterSet<A> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = self.difference(rhs);
    }
}

impl<A: Architecture> Not for RegisterSet<A> {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.complement()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Amd64, Arm, Arm64, LoongArch64, X86};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn reg(number: u8) -> RegisterId {
        RegisterId::new(number)
    }

    #[test]
    fn empty_set() {
        let set = RegisterSet::<Amd64>::empty();
        assert!(set.is_empty());
        assert!(!set.is_non_empty());
        assert_eq!(set.count(), 0);
        assert_eq!(set.iter().count(), 0);
    }

    #[rstest]
    #[case(0, 0b1, 0)]
    #[case(63, 1 << 63, 0)]
    #[case(64, 0, 0b1)]
    #[case(71, 0, 1 << 7)]
    fn bit_placement_on_two_words(#[case] number: u8, #[case] low: u64, #[case] high: u64) {
        let set = RegisterSet::<Amd64>::from_register(reg(number));
        assert_eq!(set.low_word(), low);
        assert_eq!(set.high_word(), high);
    }

    #[test]
    fn all_is_masked_to_register_count() {
        assert_eq!(RegisterSet::<X86>::all().low_word(), 0x00FF_FFFF);
        assert_eq!(RegisterSet::<LoongArch64>::all().low_word(), u64::MAX);
        assert_eq!(RegisterSet::<Amd64>::all().high_word(), 0xFF);
        assert_eq!(RegisterSet::<Arm64>::all().count(), 80);
    }

    #[test]
    fn complement_stays_within_valid_registers() {
        let set = RegisterSet::<X86>::from_registers(&[X86::EAX, X86::XMM3]);
        let complement = !set;

        assert_eq!(complement.count(), 22);
        assert_eq!(complement.low_word() & !0x00FF_FFFF, 0);
        assert_eq!(set | complement, RegisterSet::all());
        assert!((set & complement).is_empty());
    }

    #[test]
    fn add_and_remove() {
        let mut set = RegisterSet::<Arm64>::empty();
        set.add(Arm64::X8);
        set.add(Arm64::P3);
        assert!(set.contains(Arm64::X8));
        assert!(set.contains(Arm64::P3));
        assert_eq!(set.count(), 2);

        set.remove(Arm64::X8);
        assert!(!set.contains(Arm64::X8));
        assert_eq!(set.first_member(), Arm64::P3);
    }

    #[test]
    fn first_member_from_high_word() {
        let set = RegisterSet::<Amd64>::from_registers(&[Amd64::K5, Amd64::K2]);
        assert_eq!(set.first_member(), Amd64::K2);
        assert_eq!(set.first_member().number(), 66);
    }

    #[test]
    fn pop_first_walks_all_members_in_order() {
        let mut set = RegisterSet::<Amd64>::from_registers(&[Amd64::K1, Amd64::RCX, Amd64::XMM0]);
        assert_eq!(set.pop_first(), Some(Amd64::RCX));
        assert_eq!(set.pop_first(), Some(Amd64::XMM0));
        assert_eq!(set.pop_first(), Some(Amd64::K1));
        assert_eq!(set.pop_first(), None);
    }

    #[test]
    fn difference_removes_members() {
        let a = RegisterSet::<Arm>::from_registers(&[Arm::R0, Arm::R1, Arm::F2]);
        let b = RegisterSet::<Arm>::from_registers(&[Arm::R1, Arm::R2]);
        assert_eq!(a - b, RegisterSet::from_registers(&[Arm::R0, Arm::F2]));
        assert_eq!(a ^ b, RegisterSet::from_registers(&[Arm::R0, Arm::R2, Arm::F2]));
    }

    #[test]
    fn project_to_kind_uses_the_word_of_the_kind() {
        let set = RegisterSet::<Amd64>::from_registers(&[Amd64::RDX, Amd64::XMM1, Amd64::K3]);

        assert_eq!(set.project_to_kind(RegisterKind::Integer).bits(), 1 << 2);
        assert_eq!(set.project_to_kind(RegisterKind::Float).bits(), 1 << 33);
        assert_eq!(set.project_to_kind(RegisterKind::Mask).bits(), 1 << 3);
    }

    #[test]
    fn project_to_kind_with_mask_registers_in_low_word() {
        let set = RegisterSet::<X86>::from_registers(&[X86::ECX, X86::K0]);
        assert_eq!(set.project_to_kind(RegisterKind::Mask).bits(), 1 << 16);
        assert_eq!(set.project_to_kind(RegisterKind::Integer).bits(), 1 << 1);
        assert!(set.project_to_kind(RegisterKind::Float).is_empty());
    }

    #[test]
    fn project_to_missing_kind_is_empty() {
        let set = RegisterSet::<LoongArch64>::all();
        assert!(set.project_to_kind(RegisterKind::Mask).is_empty());
    }

    #[test]
    fn kind_set_round_trip() {
        let set = RegisterSet::<Arm64>::from_registers(&[Arm64::X0, Arm64::V1, Arm64::P15]);
        let masks = set.project_to_kind(RegisterKind::Mask);

        let mut rebuilt = RegisterSet::<Arm64>::from_kind_set(RegisterKind::Mask, masks);
        rebuilt.add_kind_set(RegisterKind::Integer, set.project_to_kind(RegisterKind::Integer));
        rebuilt.add_kind_set(RegisterKind::Float, set.project_to_kind(RegisterKind::Float));
        assert_eq!(rebuilt, set);

        rebuilt.remove_kind_set(RegisterKind::Mask, masks);
        assert_eq!(rebuilt, RegisterSet::from_registers(&[Arm64::X0, Arm64::V1]));
    }

    #[test]
    fn as_single_word_without_high_registers() {
        let set = RegisterSet::<Amd64>::from_registers(&[Amd64::RAX, Amd64::XMM31]);
        assert_eq!(set.as_single_word().bits(), 1 | (1 << 63));
        assert_eq!(RegisterSet::<Amd64>::from_integer_set(SingleTypeRegSet::new(1)), RegisterSet::from_register(Amd64::RAX));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "past niet in een enkel woord")]
    fn as_single_word_with_high_registers() {
        let set = RegisterSet::<Amd64>::from_registers(&[Amd64::RAX, Amd64::K0]);
        _ = set.as_single_word();
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "lege verzameling")]
    fn first_member_of_empty_set() {
        _ = RegisterSet::<Arm>::empty().first_member();
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "bestaat niet")]
    fn from_register_out_of_range() {
        _ = RegisterSet::<Arm>::from_register(reg(48));
    }

    #[test]
    fn typed_mask_covers_both_halves_of_a_double() {
        let set = RegisterSet::<Arm>::from_register_typed(Arm::F4, ValueType::Double);
        assert_eq!(set, RegisterSet::from_registers(&[Arm::F4, Arm::F5]));

        let set = RegisterSet::<Arm>::from_register_typed(Arm::F4, ValueType::Float);
        assert_eq!(set, RegisterSet::from_register(Arm::F4));
    }

    #[test]
    fn display_uses_register_names() {
        let set = RegisterSet::<Amd64>::from_registers(&[Amd64::K1, Amd64::RSI, Amd64::XMM2]);
        assert_eq!(set.to_string(), "{rsi, xmm2, k1}");
        assert_eq!(format!("{set:?}"), "{\"rsi\", \"xmm2\", \"k1\"}");
    }
}
