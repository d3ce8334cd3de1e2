// Copyright (C) 2025 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use crate::{Architecture, RegisterId, RegisterKind, RegisterSlot, SingleTypeRegSet, ValueType};

/// Questions about a single register of architecture `Self`. Implemented for every [`Architecture`].
pub trait RegisterClassifier: Architecture {
    #[must_use]
    fn is_valid_register(id: RegisterId) -> bool {
        id.index() < Self::REGISTER_COUNT
    }

    #[must_use]
    fn is_integer_register(id: RegisterId) -> bool {
        Self::INTEGER_REGISTERS.contains(id)
    }

    #[must_use]
    fn is_float_register(id: RegisterId) -> bool {
        Self::FLOAT_REGISTERS.contains(id)
    }

    #[must_use]
    fn is_mask_register(id: RegisterId) -> bool {
        Self::MASK_REGISTERS.is_some_and(|range| range.contains(id))
    }

    #[must_use]
    fn kind_of(id: RegisterId) -> Option<RegisterKind> {
        if Self::is_integer_register(id) {
            Some(RegisterKind::Integer)
        } else if Self::is_float_register(id) {
            Some(RegisterKind::Float)
        } else if Self::is_mask_register(id) {
            Some(RegisterKind::Mask)
        } else {
            None
        }
    }

    /// Whether a double-precision value may start at this register.
    #[must_use]
    fn is_double_register(id: RegisterId) -> bool {
        Self::can_hold_type(id, ValueType::Double)
    }

    /// Whether a value of the given type can be placed in this register. When float registers are
    /// paired, a wide value must start at a register aligned to its width, and the caller is
    /// responsible for reserving the rest of the registers it occupies.
    #[must_use]
    fn can_hold_type(id: RegisterId, value_type: ValueType) -> bool {
        let Some(range) = Self::kind_range(value_type.register_kind()) else {
            return false;
        };

        if !range.contains(id) {
            return false;
        }

        let slots = Self::register_slots(value_type);
        let offset = id.index() - range.first().index();
        offset % slots == 0 && offset + slots <= range.len()
    }

    /// How many consecutive registers a value of this type occupies.
    #[must_use]
    fn register_slots(value_type: ValueType) -> usize {
        if Self::PAIRED_FLOAT_REGISTERS {
            value_type.paired_float_slots()
        } else {
            1
        }
    }

    /// The register a value of the given type actually starts at when it is assigned `id`: a
    /// misaligned register is moved down to the aligned register before it.
    #[must_use]
    fn register_for_type(id: RegisterId, value_type: ValueType) -> RegisterId {
        let slots = Self::register_slots(value_type);
        if slots == 1 {
            return id;
        }

        debug_assert!(Self::is_float_register(id), "register {id} is geen floating-point register");
        let first = Self::FLOAT_REGISTERS.first().index();
        let offset = id.index() - first;
        RegisterId::from_index(first + offset - offset % slots)
    }

    /// The registers that a value of the given type occupies when it is placed at `id`.
    #[must_use]
    fn type_mask(id: RegisterId, value_type: ValueType) -> SingleTypeRegSet {
        let id = Self::register_for_type(id, value_type);
        debug_assert!(Self::can_hold_type(id, value_type), "register {id} kan geen {value_type} bevatten");

        let slots = Self::register_slots(value_type) as u32;
        let bits = if slots >= 64 { u64::MAX } else { (1 << slots) - 1 };
        SingleTypeRegSet::new(bits << (id.index() % 64))
    }

    /// The register after `id` that is of the same kind, or [`RegisterSlot::Unassigned`] when `id`
    /// is the last one.
    #[must_use]
    fn next_register_of_kind(id: RegisterId, kind: RegisterKind) -> RegisterSlot {
        debug_assert_eq!(Self::kind_of(id), Some(kind), "register {id} is niet van soort {kind}");
        Self::step_within_kind(id, kind, 1)
    }

    /// The register after `id` that can hold another value of the given type, skipping the registers
    /// a paired value occupies.
    #[must_use]
    fn next_register_of_type(id: RegisterId, value_type: ValueType) -> RegisterSlot {
        debug_assert!(Self::can_hold_type(id, value_type), "register {id} kan geen {value_type} bevatten");
        Self::step_within_kind(id, value_type.register_kind(), Self::register_slots(value_type))
    }

    #[must_use]
    fn step_within_kind(id: RegisterId, kind: RegisterKind, step: usize) -> RegisterSlot {
        let Some(range) = Self::kind_range(kind) else {
            return RegisterSlot::Unassigned;
        };

        let next = id.index() + step;
        if next > range.last().index() {
            RegisterSlot::Unassigned
        } else {
            RegisterSlot::Physical(RegisterId::from_index(next))
        }
    }

    /// Whether the low byte of this register can be addressed on its own (e.g. `cl` for `ecx`).
    #[must_use]
    fn is_byte_register(id: RegisterId) -> bool {
        match Self::BYTE_REGISTERS {
            Some(range) => range.contains(id),
            None => Self::is_integer_register(id),
        }
    }

    #[must_use]
    fn register_name(id: RegisterId) -> &'static str {
        Self::descriptor().name(id)
    }

    /// Finds a register by its canonical name or one of its aliases.
    #[must_use]
    fn lookup_register(name: &str) -> Option<RegisterId> {
        Self::descriptor().lookup(name)
    }
}

impl<A: Architecture> RegisterClassifier for A {}
