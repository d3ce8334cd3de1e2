// Copyright (C) 2025 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

mod amd64;
mod arm;
mod arm64;
mod loongarch64;
mod riscv64;
mod x86;

use std::{fmt::Debug, hash::Hash};

use crate::{
    AbiTable,
    ArchitectureKind,
    DescriptorError,
    DescriptorTable,
    KindRange,
    OperatingSystem,
    RegisterKind,
    RegisterRow,
    RegisterWords,
};

pub use self::{
    amd64::Amd64,
    arm::Arm,
    arm64::Arm64,
    loongarch64::LoongArch64,
    riscv64::RiscV64,
    x86::X86,
};

/// The static description of one instruction-set architecture. Every supported architecture is a
/// zero-sized type implementing this trait, and the rest of the crate is generic over it.
pub trait Architecture: Debug + Clone + Copy + PartialEq + Eq + Hash + Default + Send + Sync + 'static {
    /// [`SingleWord`](crate::SingleWord) when [`Self::REGISTER_COUNT`] is at most 64,
    /// [`DoubleWord`](crate::DoubleWord) otherwise.
    type Words: RegisterWords;

    const KIND: ArchitectureKind;

    /// The number of physical registers, which is also the raw value of the stack and "no register"
    /// sentinels (see [`RegisterSlot`](crate::RegisterSlot)).
    const REGISTER_COUNT: usize;

    const INTEGER_REGISTERS: KindRange;
    const FLOAT_REGISTERS: KindRange;
    const MASK_REGISTERS: Option<KindRange>;

    /// Whether float registers are 32 bits wide, and wider values occupy consecutive registers
    /// starting at an aligned one.
    const PAIRED_FLOAT_REGISTERS: bool = false;

    /// The integer registers that have an addressable low byte, when not all of them do.
    const BYTE_REGISTERS: Option<KindRange> = None;

    const ROWS: &'static [RegisterRow];

    /// Fails to compile when the registers do not fit in [`Self::Words`]. Evaluated by every
    /// [`RegisterSet`](crate::RegisterSet) and [`DescriptorTable`] of this architecture.
    const WORDS_FIT: () = assert!(
        Self::REGISTER_COUNT <= <Self::Words as RegisterWords>::COUNT * 64,
        "de registers passen niet in het gekozen aantal woorden",
    );

    fn try_descriptor() -> Result<&'static DescriptorTable, DescriptorError>;

    /// The calling convention tables for the given operating system, or [`None`] if this
    /// architecture is not supported there.
    #[must_use]
    fn abi(operating_system: OperatingSystem) -> Option<&'static AbiTable>;

    #[must_use]
    fn descriptor() -> &'static DescriptorTable {
        match Self::try_descriptor() {
            Ok(table) => table,
            Err(e) => panic!("Ongeldige registertabel voor {}: {e}", Self::KIND),
        }
    }

    #[must_use]
    fn kind_range(kind: RegisterKind) -> Option<KindRange> {
        match kind {
            RegisterKind::Integer => Some(Self::INTEGER_REGISTERS),
            RegisterKind::Float => Some(Self::FLOAT_REGISTERS),
            RegisterKind::Mask => Self::MASK_REGISTERS,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use strum::IntoEnumIterator;

    use super::*;
    use crate::{RegisterClassifier, RegisterId, RegisterSet};

    fn check_table<A: Architecture>() {
        let table = A::try_descriptor().unwrap();
        assert_eq!(table.len(), A::REGISTER_COUNT);
        assert_eq!(table.architecture(), A::KIND);

        for info in table.registers() {
            assert!(A::is_valid_register(info.id()));
            assert_eq!(A::kind_of(info.id()), Some(info.kind()));

            let predicates = [
                A::is_integer_register(info.id()),
                A::is_float_register(info.id()),
                A::is_mask_register(info.id()),
            ];
            assert_eq!(predicates.iter().filter(|x| **x).count(), 1, "{} heeft niet precies één soort", info.name());

            assert_eq!(A::lookup_register(info.name()), Some(info.id()));
            for alias in info.aliases() {
                assert_eq!(A::lookup_register(alias), Some(info.id()));
            }
        }

        assert!(!A::is_valid_register(RegisterId::from_index(A::REGISTER_COUNT)));
        assert_eq!(RegisterSet::<A>::all().count() as usize, A::REGISTER_COUNT);
    }

    fn check_words<A: Architecture>() {
        let () = A::WORDS_FIT;
        let expected = if A::REGISTER_COUNT > 64 { 2 } else { 1 };
        assert_eq!(<A::Words as RegisterWords>::COUNT, expected);
    }

    #[test]
    fn tables_are_consistent() {
        check_table::<X86>();
        check_table::<Amd64>();
        check_table::<Arm>();
        check_table::<Arm64>();
        check_table::<LoongArch64>();
        check_table::<RiscV64>();
    }

    #[test]
    fn word_counts_match_register_counts() {
        check_words::<X86>();
        check_words::<Amd64>();
        check_words::<Arm>();
        check_words::<Arm64>();
        check_words::<LoongArch64>();
        check_words::<RiscV64>();
    }

    #[rstest]
    #[case(ArchitectureKind::X86, 24)]
    #[case(ArchitectureKind::Amd64, 72)]
    #[case(ArchitectureKind::Arm, 48)]
    #[case(ArchitectureKind::Arm64, 80)]
    #[case(ArchitectureKind::LoongArch64, 64)]
    #[case(ArchitectureKind::RiscV64, 64)]
    fn register_counts(#[case] kind: ArchitectureKind, #[case] expected: usize) {
        let actual = match kind {
            ArchitectureKind::X86 => X86::REGISTER_COUNT,
            ArchitectureKind::Amd64 => Amd64::REGISTER_COUNT,
            ArchitectureKind::Arm => Arm::REGISTER_COUNT,
            ArchitectureKind::Arm64 => Arm64::REGISTER_COUNT,
            ArchitectureKind::LoongArch64 => LoongArch64::REGISTER_COUNT,
            ArchitectureKind::RiscV64 => RiscV64::REGISTER_COUNT,
        };

        assert_eq!(actual, expected);
    }

    #[test]
    fn every_architecture_kind_is_covered() {
        assert_eq!(ArchitectureKind::iter().count(), 6);
    }
}
