// Copyright (C) 2025 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::{collections::{hash_map::Entry, HashMap}, sync::OnceLock};

use log::debug;
use strum::IntoEnumIterator;

use crate::{Architecture, ArchitectureKind, DescriptorError, RegisterId, RegisterKind};

/// One row of the register table of an architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterRow {
    Register {
        name: &'static str,
        id: RegisterId,
        kind: RegisterKind,

        /// The number the instruction encoder uses for this register.
        encoding: u8,
    },

    /// Another name for a register that was defined before it in the table.
    Alias {
        alias: &'static str,
        target: &'static str,
    },
}

impl RegisterRow {
    #[must_use]
    pub const fn register(name: &'static str, id: RegisterId, kind: RegisterKind, encoding: u8) -> Self {
        Self::Register { name, id, kind, encoding }
    }

    #[must_use]
    pub const fn alias(alias: &'static str, target: &'static str) -> Self {
        Self::Alias { alias, target }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterInfo {
    id: RegisterId,
    name: &'static str,
    kind: RegisterKind,
    encoding: u8,
    aliases: Vec<&'static str>,
}

impl RegisterInfo {
    #[must_use]
    pub fn id(&self) -> RegisterId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn kind(&self) -> RegisterKind {
        self.kind
    }

    #[must_use]
    pub fn encoding(&self) -> u8 {
        self.encoding
    }

    #[must_use]
    pub fn aliases(&self) -> &[&'static str] {
        &self.aliases
    }
}

/// The validated register table of one architecture. Built once per process, see [`DescriptorCell`].
#[derive(Debug)]
pub struct DescriptorTable {
    architecture: ArchitectureKind,
    registers: Vec<RegisterInfo>,
    names: HashMap<&'static str, RegisterId>,
}

impl DescriptorTable {
    pub fn build<A: Architecture>() -> Result<Self, DescriptorError> {
        let architecture = A::KIND;

        let () = A::WORDS_FIT;

        for kind in RegisterKind::iter() {
            let Some(range) = A::kind_range(kind) else { continue };

            if !range.is_within_one_word() {
                return Err(DescriptorError::KindStraddlesWords { architecture, kind });
            }

            if range.last().index() >= A::REGISTER_COUNT {
                return Err(DescriptorError::KindOutOfRange { architecture, kind, last: range.last() });
            }

            let overlapping = RegisterKind::iter()
                .filter(|other| *other > kind)
                .find(|other| A::kind_range(*other).is_some_and(|other| other.first() <= range.last() && range.first() <= other.last()));

            if let Some(other) = overlapping {
                return Err(DescriptorError::KindsOverlap { architecture, first: kind, second: other });
            }
        }

        let mut this = Self {
            architecture,
            registers: Vec::with_capacity(A::REGISTER_COUNT),
            names: HashMap::new(),
        };

        for row in A::ROWS {
            match *row {
                RegisterRow::Register { name, id, kind, encoding } => {
                    this.add_register::<A>(name, id, kind, encoding)?;
                }

                RegisterRow::Alias { alias, target } => {
                    this.add_alias(alias, target)?;
                }
            }
        }

        if this.registers.len() != A::REGISTER_COUNT {
            return Err(DescriptorError::CountMismatch {
                architecture,
                expected: A::REGISTER_COUNT,
                actual: this.registers.len(),
            });
        }

        debug!("Registertabel voor {architecture} opgebouwd: {} registers, {} namen", this.registers.len(), this.names.len());
        Ok(this)
    }

    fn add_register<A: Architecture>(&mut self, name: &'static str, id: RegisterId, kind: RegisterKind, encoding: u8) -> Result<(), DescriptorError> {
        let expected = self.registers.len();
        if id.index() != expected {
            return Err(DescriptorError::NotDense { name, expected, actual: id });
        }

        let Some(range_kind) = RegisterKind::iter().find(|kind| A::kind_range(*kind).is_some_and(|range| range.contains(id))) else {
            return Err(DescriptorError::NoKind { name });
        };

        if range_kind != kind {
            return Err(DescriptorError::KindMismatch { name, expected: range_kind, actual: kind });
        }

        self.insert_name(name, id)?;
        self.registers.push(RegisterInfo {
            id,
            name,
            kind,
            encoding,
            aliases: Vec::new(),
        });

        Ok(())
    }

    fn add_alias(&mut self, alias: &'static str, target: &'static str) -> Result<(), DescriptorError> {
        let Some(id) = self.names.get(target).copied() else {
            return Err(DescriptorError::UnknownAliasTarget { alias, target });
        };

        self.insert_name(alias, id)?;
        self.registers[id.index()].aliases.push(alias);
        Ok(())
    }

    fn insert_name(&mut self, name: &'static str, id: RegisterId) -> Result<(), DescriptorError> {
        match self.names.entry(name) {
            Entry::Occupied(..) => Err(DescriptorError::DuplicateName { name }),
            Entry::Vacant(entry) => {
                entry.insert(id);
                Ok(())
            }
        }
    }

    #[must_use]
    pub fn architecture(&self) -> ArchitectureKind {
        self.architecture
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.registers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registers.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: RegisterId) -> Option<&RegisterInfo> {
        self.registers.get(id.index())
    }

    #[must_use]
    pub fn registers(&self) -> &[RegisterInfo] {
        &self.registers
    }

    /// The canonical name of a register. Panics when the register does not exist on this architecture.
    #[must_use]
    pub fn name(&self, id: RegisterId) -> &'static str {
        match self.get(id) {
            Some(info) => info.name,
            None => panic!("register {id} bestaat niet op {}", self.architecture),
        }
    }

    #[must_use]
    pub fn kind(&self, id: RegisterId) -> Option<RegisterKind> {
        self.get(id).map(RegisterInfo::kind)
    }

    /// Finds a register by its canonical name or any of its aliases.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<RegisterId> {
        self.names.get(name).copied()
    }
}

/// Lazily builds and then holds the [`DescriptorTable`] of one architecture.
pub struct DescriptorCell(OnceLock<Result<DescriptorTable, DescriptorError>>);

impl DescriptorCell {
    #[must_use]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    pub fn get<A: Architecture>(&'static self) -> Result<&'static DescriptorTable, DescriptorError> {
        self.0.get_or_init(DescriptorTable::build::<A>)
            .as_ref()
            .map_err(Clone::clone)
    }
}

impl Default for DescriptorCell {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AbiTable, DoubleWord, KindRange, OperatingSystem, SingleWord};
    use pretty_assertions::assert_eq;

    const fn reg(number: u8) -> RegisterId {
        RegisterId::new(number)
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    struct Broken;

    impl Architecture for Broken {
        type Words = SingleWord;

        const KIND: ArchitectureKind = ArchitectureKind::RiscV64;
        const REGISTER_COUNT: usize = 3;
        const INTEGER_REGISTERS: KindRange = KindRange::new(reg(0), reg(1));
        const FLOAT_REGISTERS: KindRange = KindRange::new(reg(2), reg(2));
        const MASK_REGISTERS: Option<KindRange> = None;

        const ROWS: &'static [RegisterRow] = &[
            RegisterRow::register("a", reg(0), RegisterKind::Integer, 0),
            RegisterRow::register("b", reg(1), RegisterKind::Float, 1),
            RegisterRow::register("c", reg(2), RegisterKind::Float, 0),
        ];

        fn try_descriptor() -> Result<&'static DescriptorTable, DescriptorError> {
            static TABLE: DescriptorCell = DescriptorCell::new();
            TABLE.get::<Self>()
        }

        fn abi(operating_system: OperatingSystem) -> Option<&'static AbiTable> {
            _ = operating_system;
            None
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    struct Straddling;

    impl Architecture for Straddling {
        type Words = DoubleWord;

        const KIND: ArchitectureKind = ArchitectureKind::Arm64;
        const REGISTER_COUNT: usize = 66;
        const INTEGER_REGISTERS: KindRange = KindRange::new(reg(0), reg(62));
        const FLOAT_REGISTERS: KindRange = KindRange::new(reg(63), reg(65));
        const MASK_REGISTERS: Option<KindRange> = None;

        const ROWS: &'static [RegisterRow] = &[];

        fn try_descriptor() -> Result<&'static DescriptorTable, DescriptorError> {
            static TABLE: DescriptorCell = DescriptorCell::new();
            TABLE.get::<Self>()
        }

        fn abi(operating_system: OperatingSystem) -> Option<&'static AbiTable> {
            _ = operating_system;
            None
        }
    }

    /// Float registers that run into the integer registers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    struct Overlapping;

    impl Architecture for Overlapping {
        type Words = SingleWord;

        const KIND: ArchitectureKind = ArchitectureKind::LoongArch64;
        const REGISTER_COUNT: usize = 4;
        const INTEGER_REGISTERS: KindRange = KindRange::new(reg(0), reg(2));
        const FLOAT_REGISTERS: KindRange = KindRange::new(reg(2), reg(3));
        const MASK_REGISTERS: Option<KindRange> = None;

        const ROWS: &'static [RegisterRow] = &[];

        fn try_descriptor() -> Result<&'static DescriptorTable, DescriptorError> {
            static TABLE: DescriptorCell = DescriptorCell::new();
            TABLE.get::<Self>()
        }

        fn abi(operating_system: OperatingSystem) -> Option<&'static AbiTable> {
            _ = operating_system;
            None
        }
    }

    /// Mask registers past the last register.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    struct TooShort;

    impl Architecture for TooShort {
        type Words = SingleWord;

        const KIND: ArchitectureKind = ArchitectureKind::Amd64;
        const REGISTER_COUNT: usize = 4;
        const INTEGER_REGISTERS: KindRange = KindRange::new(reg(0), reg(1));
        const FLOAT_REGISTERS: KindRange = KindRange::new(reg(2), reg(3));
        const MASK_REGISTERS: Option<KindRange> = Some(KindRange::new(reg(4), reg(5)));

        const ROWS: &'static [RegisterRow] = &[];

        fn try_descriptor() -> Result<&'static DescriptorTable, DescriptorError> {
            static TABLE: DescriptorCell = DescriptorCell::new();
            TABLE.get::<Self>()
        }

        fn abi(operating_system: OperatingSystem) -> Option<&'static AbiTable> {
            _ = operating_system;
            None
        }
    }

    #[test]
    fn kinds_must_not_overlap() {
        let error = DescriptorTable::build::<Overlapping>().unwrap_err();
        assert_eq!(error, DescriptorError::KindsOverlap {
            architecture: ArchitectureKind::LoongArch64,
            first: RegisterKind::Integer,
            second: RegisterKind::Float,
        });
    }

    #[test]
    fn kinds_must_end_before_register_count() {
        let error = DescriptorTable::build::<TooShort>().unwrap_err();
        assert_eq!(error, DescriptorError::KindOutOfRange {
            architecture: ArchitectureKind::Amd64,
            kind: RegisterKind::Mask,
            last: reg(5),
        });
    }

    #[test]
    fn row_kind_must_match_range() {
        let error = Broken::try_descriptor().unwrap_err();
        assert_eq!(error, DescriptorError::KindMismatch {
            name: "b",
            expected: RegisterKind::Integer,
            actual: RegisterKind::Float,
        });
    }

    #[test]
    fn kinds_must_not_straddle_words() {
        let error = DescriptorTable::build::<Straddling>().unwrap_err();
        assert_eq!(error, DescriptorError::KindStraddlesWords {
            architecture: ArchitectureKind::Arm64,
            kind: RegisterKind::Float,
        });
    }

    #[test]
    #[should_panic(expected = "Ongeldige registertabel")]
    fn broken_table_panics_on_use() {
        _ = Broken::descriptor();
    }

    #[test]
    fn aliases_resolve_to_canonical_register() {
        let table = crate::Amd64::descriptor();
        assert_eq!(table.lookup("eax"), Some(crate::Amd64::RAX));
        assert_eq!(table.lookup("rax"), Some(crate::Amd64::RAX));
        assert_eq!(table.name(crate::Amd64::RAX), "rax");
        assert!(table.get(crate::Amd64::RAX).unwrap().aliases().contains(&"eax"));
    }
}
