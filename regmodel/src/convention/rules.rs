// Copyright (C) 2025 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::marker::PhantomData;

use log::warn;

use crate::{
    AbiTable,
    Architecture,
    ArchitectureKind,
    ArgumentOrder,
    CallingConvention,
    FixedReturnBuffer,
    OperatingSystem,
    RegisterClassifier,
    RegisterId,
    RegisterKind,
    RegisterSet,
    RegisterSlot,
    ReturnBufferPolicy,
    TargetError,
    TargetResult,
};

/// Answers calling convention questions for architecture `A` on one operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallingConventionRules<A: Architecture> {
    operating_system: OperatingSystem,
    abi: &'static AbiTable,
    architecture: PhantomData<A>,
}

impl<A: Architecture> CallingConventionRules<A> {
    pub fn new(operating_system: OperatingSystem) -> TargetResult<Self> {
        let Some(abi) = A::abi(operating_system) else {
            return Err(TargetError::UnsupportedPlatform {
                architecture: A::KIND,
                operating_system,
            });
        };

        Ok(Self {
            operating_system,
            abi,
            architecture: PhantomData,
        })
    }

    #[must_use]
    pub fn operating_system(&self) -> OperatingSystem {
        self.operating_system
    }

    #[must_use]
    pub fn abi(&self) -> &'static AbiTable {
        self.abi
    }

    #[must_use]
    pub fn supports(&self, convention: CallingConvention) -> bool {
        match convention {
            CallingConvention::Swift => self.abi.swift.is_some(),
            _ => true,
        }
    }

    pub fn check_supported(&self, convention: CallingConvention) -> TargetResult<()> {
        if !self.supports(convention) {
            return Err(TargetError::UnsupportedCallingConvention {
                convention,
                architecture: A::KIND,
                operating_system: self.operating_system,
            });
        }

        if convention.is_x86_only() && A::KIND != ArchitectureKind::X86 {
            warn!("Aanroepconventie {convention} heeft op {} geen effect en gedraagt zich als {}", A::KIND, CallingConvention::C);
        }

        Ok(())
    }

    #[must_use]
    pub fn argument_order(&self, convention: CallingConvention) -> ArgumentOrder {
        if convention.is_unmanaged() {
            self.abi.unmanaged_argument_order
        } else {
            self.abi.managed_argument_order
        }
    }

    #[must_use]
    pub fn fixed_return_buffer(&self, convention: CallingConvention) -> Option<FixedReturnBuffer> {
        if convention == CallingConvention::Swift {
            return self.abi.swift.map(|swift| swift.return_buffer);
        }

        match self.abi.return_buffer {
            ReturnBufferPolicy::Never => None,
            ReturnBufferPolicy::Always(buffer) => Some(buffer),
            ReturnBufferPolicy::ExceptInstanceMethods(buffer) => {
                if convention.is_instance_method() {
                    None
                } else {
                    Some(buffer)
                }
            }
        }
    }

    /// Whether the address of a returned aggregate is always passed in a designated register, rather
    /// than as an ordinary argument.
    #[must_use]
    pub fn has_fixed_return_buffer_register(&self, convention: CallingConvention) -> bool {
        self.fixed_return_buffer(convention).is_some()
    }

    /// Panics when [`Self::has_fixed_return_buffer_register`] is `false` for this convention.
    #[must_use]
    pub fn fixed_return_buffer_register(&self, convention: CallingConvention) -> RegisterId {
        self.expect_fixed_return_buffer(convention).register
    }

    /// Panics when [`Self::has_fixed_return_buffer_register`] is `false` for this convention.
    #[must_use]
    pub fn fixed_return_buffer_mask(&self, convention: CallingConvention) -> RegisterSet<A> {
        RegisterSet::from_register(self.fixed_return_buffer_register(convention))
    }

    /// Panics when [`Self::has_fixed_return_buffer_register`] is `false` for this convention.
    #[must_use]
    pub fn fixed_return_buffer_argument_slot(&self, convention: CallingConvention) -> usize {
        self.expect_fixed_return_buffer(convention).argument_slot
    }

    #[must_use]
    fn expect_fixed_return_buffer(&self, convention: CallingConvention) -> FixedReturnBuffer {
        match self.fixed_return_buffer(convention) {
            Some(buffer) => buffer,
            None => panic!("{} ({}) heeft geen vast retourbufferregister voor {convention}", A::KIND, self.operating_system),
        }
    }

    #[must_use]
    pub fn integer_argument_registers(&self) -> &'static [RegisterId] {
        self.abi.integer_arguments
    }

    #[must_use]
    pub fn float_argument_registers(&self) -> &'static [RegisterId] {
        self.abi.float_arguments
    }

    /// The register of the `n`th argument of the given kind, or [`RegisterSlot::OnStack`] when the
    /// argument registers of that kind ran out.
    #[must_use]
    pub fn argument_nth(&self, kind: RegisterKind, n: usize) -> RegisterSlot {
        let registers = match kind {
            RegisterKind::Integer => self.abi.integer_arguments,
            RegisterKind::Float => self.abi.float_arguments,
            RegisterKind::Mask => &[],
        };

        match registers.get(n) {
            Some(id) => RegisterSlot::Physical(*id),
            None => RegisterSlot::OnStack,
        }
    }

    /// Every register an integer argument may be passed in, including the fixed return buffer and
    /// the registers a convention reserves for special purposes.
    #[must_use]
    pub fn full_integer_argument_register_mask(&self, convention: CallingConvention) -> RegisterSet<A> {
        let mut result = RegisterSet::from_registers(self.abi.integer_arguments);

        if let Some(buffer) = self.fixed_return_buffer(convention) {
            result.add(buffer.register);
        }

        if convention == CallingConvention::Swift {
            if let Some(swift) = self.abi.swift {
                result.add(swift.self_register);

                // The error register never receives an argument value, but it is reserved here so
                // that no following argument gets assigned to it.
                result.add(swift.error_register);
            }
        }

        result
    }

    #[must_use]
    pub fn is_valid_integer_argument_register(&self, id: RegisterId, convention: CallingConvention) -> bool {
        A::is_valid_register(id) && self.full_integer_argument_register_mask(convention).contains(id)
    }

    #[must_use]
    pub fn is_valid_float_argument_register(&self, slot: impl Into<RegisterSlot>) -> bool {
        let RegisterSlot::Physical(id) = slot.into() else {
            return false;
        };

        let (Some(first), Some(last)) = (self.abi.float_arguments.first(), self.abi.float_arguments.last()) else {
            return false;
        };

        *first <= id && id <= *last
    }

    /// The argument registers that are not numbered like ordinary arguments: the fixed return buffer
    /// of any convention and the Swift self and error registers.
    #[must_use]
    fn special_argument_registers(&self) -> RegisterSet<A> {
        let mut result = RegisterSet::empty();

        match self.abi.return_buffer {
            ReturnBufferPolicy::Never => (),
            ReturnBufferPolicy::Always(buffer) | ReturnBufferPolicy::ExceptInstanceMethods(buffer) => {
                result.add(buffer.register);
            }
        }

        if let Some(swift) = self.abi.swift {
            result.add(swift.return_buffer.register);
            result.add(swift.self_register);
            result.add(swift.error_register);
        }

        result
    }

    /// The argument register that follows `id` in argument order, or [`RegisterSlot::Unassigned`]
    /// after the last one. `id` must be an integer or float argument register. The fixed return
    /// buffer and the Swift registers have no successor.
    #[must_use]
    pub fn next_argument_register(&self, id: RegisterId) -> RegisterSlot {
        for registers in [self.abi.integer_arguments, self.abi.float_arguments] {
            if let Some(position) = registers.iter().position(|r| *r == id) {
                return match registers.get(position + 1) {
                    Some(next) => RegisterSlot::Physical(*next),
                    None => RegisterSlot::Unassigned,
                };
            }
        }

        if A::is_valid_register(id) && self.special_argument_registers().contains(id) {
            return RegisterSlot::Unassigned;
        }

        debug_assert!(false, "register {} is geen argumentregister op {}", A::register_name(id), A::KIND);
        RegisterSlot::Unassigned
    }

    #[must_use]
    pub fn integer_return_register(&self) -> RegisterId {
        self.abi.integer_return
    }

    #[must_use]
    pub fn float_return_register(&self) -> Option<RegisterId> {
        self.abi.float_return
    }

    #[must_use]
    pub fn swift_self_register(&self) -> Option<RegisterId> {
        self.abi.swift.map(|swift| swift.self_register)
    }

    #[must_use]
    pub fn swift_error_register(&self) -> Option<RegisterId> {
        self.abi.swift.map(|swift| swift.error_register)
    }

    /// Registers the allocator never hands out.
    #[must_use]
    pub fn reserved(&self) -> RegisterSet<A> {
        RegisterSet::from_registers(self.abi.reserved)
    }

    /// Registers a callee has to preserve, which are the ones worth using for values that live
    /// across calls.
    #[must_use]
    pub fn callee_saved(&self) -> RegisterSet<A> {
        RegisterSet::from_registers(self.abi.callee_saved)
    }

    /// Every allocatable register that a call may clobber.
    #[must_use]
    pub fn caller_saved(&self) -> RegisterSet<A> {
        RegisterSet::all() - self.callee_saved() - self.reserved()
    }

    #[must_use]
    pub fn is_callee_saved(&self, id: RegisterId) -> bool {
        self.callee_saved().contains(id)
    }

    #[must_use]
    pub fn is_caller_saved(&self, id: RegisterId) -> bool {
        self.caller_saved().contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Amd64, Arm, Arm64, LoongArch64, RiscV64, X86};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn rules_for<A: Architecture>(operating_system: OperatingSystem) -> CallingConventionRules<A> {
        CallingConventionRules::new(operating_system).unwrap()
    }

    fn walk_arguments<A: Architecture>(rules: &CallingConventionRules<A>, first: RegisterId) -> Vec<RegisterId> {
        let mut result = vec![first];
        let mut current = first;

        while let RegisterSlot::Physical(next) = rules.next_argument_register(current) {
            assert!(result.len() < A::REGISTER_COUNT, "argumentregisters lopen in een cirkel");
            result.push(next);
            current = next;
        }

        result
    }

    #[test]
    fn arm64_always_has_fixed_return_buffer_on_linux() {
        let rules = rules_for::<Arm64>(OperatingSystem::Linux);

        assert!(rules.has_fixed_return_buffer_register(CallingConvention::Managed));
        assert!(rules.has_fixed_return_buffer_register(CallingConvention::ThisCall));
        assert_eq!(rules.fixed_return_buffer_register(CallingConvention::Managed), Arm64::X8);
        assert_eq!(rules.fixed_return_buffer_argument_slot(CallingConvention::Managed), 8);
        assert_eq!(rules.fixed_return_buffer_mask(CallingConvention::Managed), RegisterSet::from_register(Arm64::X8));
    }

    #[test]
    fn arm64_windows_instance_methods_have_no_fixed_return_buffer() {
        let rules = rules_for::<Arm64>(OperatingSystem::Windows);

        assert!(rules.has_fixed_return_buffer_register(CallingConvention::Managed));
        assert!(rules.has_fixed_return_buffer_register(CallingConvention::C));
        assert!(!rules.has_fixed_return_buffer_register(CallingConvention::ThisCall));
        assert!(!rules.has_fixed_return_buffer_register(CallingConvention::CMemberFunction));

        let mask = rules.full_integer_argument_register_mask(CallingConvention::ThisCall);
        assert!(!mask.contains(Arm64::X8));
        assert_eq!(mask.count(), 8);
    }

    #[rstest]
    #[case(OperatingSystem::Linux)]
    #[case(OperatingSystem::MacOs)]
    #[case(OperatingSystem::Windows)]
    fn amd64_only_swift_has_fixed_return_buffer(#[case] operating_system: OperatingSystem) {
        let rules = rules_for::<Amd64>(operating_system);
        assert!(!rules.has_fixed_return_buffer_register(CallingConvention::Managed));
        assert!(!rules.has_fixed_return_buffer_register(CallingConvention::C));
        assert_eq!(rules.has_fixed_return_buffer_register(CallingConvention::Swift), operating_system != OperatingSystem::Windows);
    }

    #[test]
    fn amd64_swift_reserves_self_and_error_registers() {
        let rules = rules_for::<Amd64>(OperatingSystem::Linux);

        assert_eq!(rules.fixed_return_buffer_register(CallingConvention::Swift), Amd64::RAX);
        assert_eq!(rules.fixed_return_buffer_argument_slot(CallingConvention::Swift), 6);

        let mask = rules.full_integer_argument_register_mask(CallingConvention::Swift);
        let expected = RegisterSet::from_registers(&[
            Amd64::RDI, Amd64::RSI, Amd64::RDX, Amd64::RCX, Amd64::R8, Amd64::R9,
            Amd64::RAX, Amd64::R13, Amd64::R12,
        ]);
        assert_eq!(mask, expected);

        assert!(rules.is_valid_integer_argument_register(Amd64::R12, CallingConvention::Swift));
        assert!(!rules.is_valid_integer_argument_register(Amd64::R12, CallingConvention::Managed));
        assert!(!rules.is_valid_integer_argument_register(Amd64::RAX, CallingConvention::Managed));
    }

    #[test]
    fn without_fixed_return_buffer_the_mask_is_the_argument_list() {
        let rules = rules_for::<RiscV64>(OperatingSystem::Linux);
        assert!(!rules.has_fixed_return_buffer_register(CallingConvention::Managed));
        assert_eq!(
            rules.full_integer_argument_register_mask(CallingConvention::Managed),
            RegisterSet::from_registers(rules.integer_argument_registers()),
        );
    }

    #[test]
    #[should_panic(expected = "geen vast retourbufferregister")]
    fn fixed_return_buffer_register_without_one() {
        let rules = rules_for::<X86>(OperatingSystem::Windows);
        _ = rules.fixed_return_buffer_register(CallingConvention::Managed);
    }

    #[test]
    #[should_panic(expected = "geen vast retourbufferregister")]
    fn fixed_return_buffer_slot_without_one() {
        let rules = rules_for::<Arm64>(OperatingSystem::Windows);
        _ = rules.fixed_return_buffer_argument_slot(CallingConvention::ThisCall);
    }

    #[test]
    fn float_argument_registers() {
        let rules = rules_for::<Amd64>(OperatingSystem::Windows);
        assert!(rules.is_valid_float_argument_register(Amd64::XMM0));
        assert!(rules.is_valid_float_argument_register(Amd64::XMM3));
        assert!(!rules.is_valid_float_argument_register(Amd64::XMM4));
        assert!(!rules.is_valid_float_argument_register(Amd64::RCX));
        assert!(!rules.is_valid_float_argument_register(RegisterSlot::Unassigned));
        assert!(!rules.is_valid_float_argument_register(RegisterSlot::OnStack));

        let rules = rules_for::<X86>(OperatingSystem::Linux);
        assert!(!rules.is_valid_float_argument_register(X86::XMM0));
    }

    #[test]
    fn walk_amd64_unix_arguments() {
        let rules = rules_for::<Amd64>(OperatingSystem::Linux);
        assert_eq!(walk_arguments(&rules, Amd64::RDI), [Amd64::RDI, Amd64::RSI, Amd64::RDX, Amd64::RCX, Amd64::R8, Amd64::R9]);
        assert_eq!(walk_arguments(&rules, Amd64::XMM0).len(), 8);
    }

    #[test]
    fn walk_amd64_windows_arguments() {
        let rules = rules_for::<Amd64>(OperatingSystem::Windows);
        assert_eq!(walk_arguments(&rules, Amd64::RCX), [Amd64::RCX, Amd64::RDX, Amd64::R8, Amd64::R9]);
        assert_eq!(walk_arguments(&rules, Amd64::XMM0), [Amd64::XMM0, Amd64::XMM1, Amd64::XMM2, Amd64::XMM3]);
    }

    #[test]
    fn walk_loongarch64_arguments() {
        let rules = rules_for::<LoongArch64>(OperatingSystem::Linux);
        let expected: Vec<RegisterId> = (4..=11).map(RegisterId::new).collect();
        assert_eq!(walk_arguments(&rules, LoongArch64::A0), expected);
    }

    #[rstest]
    #[case(OperatingSystem::Linux, CallingConvention::Managed)]
    #[case(OperatingSystem::Linux, CallingConvention::Swift)]
    #[case(OperatingSystem::MacOs, CallingConvention::C)]
    fn special_arm64_argument_registers_have_no_successor(#[case] operating_system: OperatingSystem, #[case] convention: CallingConvention) {
        let rules = rules_for::<Arm64>(operating_system);

        assert!(rules.is_valid_integer_argument_register(Arm64::X8, convention));
        assert_eq!(rules.next_argument_register(Arm64::X8), RegisterSlot::Unassigned);
        assert_eq!(rules.next_argument_register(Arm64::X20), RegisterSlot::Unassigned);
        assert_eq!(rules.next_argument_register(Arm64::X21), RegisterSlot::Unassigned);
    }

    #[test]
    fn amd64_swift_registers_have_no_successor() {
        let rules = rules_for::<Amd64>(OperatingSystem::Linux);

        for id in [Amd64::R13, Amd64::R12, Amd64::RAX] {
            assert!(rules.is_valid_integer_argument_register(id, CallingConvention::Swift));
            assert_eq!(rules.next_argument_register(id), RegisterSlot::Unassigned);
        }
    }

    /// Every register the full mask accepts can be asked for its successor.
    #[test]
    fn full_mask_agrees_with_next_argument_register() {
        let rules = rules_for::<Arm64>(OperatingSystem::Linux);

        for id in rules.full_integer_argument_register_mask(CallingConvention::Swift).iter() {
            let next = rules.next_argument_register(id);
            assert!(next == RegisterSlot::Unassigned || rules.is_valid_integer_argument_register(next.as_physical().unwrap(), CallingConvention::Swift));
        }
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "geen argumentregister")]
    fn next_argument_register_of_ordinary_register() {
        let rules = rules_for::<Amd64>(OperatingSystem::Linux);
        _ = rules.next_argument_register(Amd64::RBX);
    }

    #[test]
    fn argument_nth_runs_out_onto_the_stack() {
        let rules = rules_for::<Arm>(OperatingSystem::Linux);
        assert_eq!(rules.argument_nth(RegisterKind::Integer, 3), RegisterSlot::Physical(Arm::R3));
        assert_eq!(rules.argument_nth(RegisterKind::Integer, 4), RegisterSlot::OnStack);
        assert_eq!(rules.argument_nth(RegisterKind::Float, 15), RegisterSlot::Physical(Arm::F15));
        assert_eq!(rules.argument_nth(RegisterKind::Mask, 0), RegisterSlot::OnStack);
    }

    #[test]
    fn x86_argument_order() {
        let rules = rules_for::<X86>(OperatingSystem::Windows);
        assert_eq!(rules.argument_order(CallingConvention::Managed), ArgumentOrder::LeftToRight);
        assert_eq!(rules.argument_order(CallingConvention::StdCall), ArgumentOrder::RightToLeft);

        let rules = rules_for::<Arm64>(OperatingSystem::MacOs);
        assert_eq!(rules.argument_order(CallingConvention::C), ArgumentOrder::LeftToRight);
    }

    #[test]
    fn callee_and_caller_saved_partition_allocatable_registers() {
        let rules = rules_for::<Arm64>(OperatingSystem::Linux);

        let callee = rules.callee_saved();
        let caller = rules.caller_saved();
        assert!((callee & caller).is_empty());
        assert_eq!(callee | caller | rules.reserved(), RegisterSet::all());

        assert!(rules.is_callee_saved(Arm64::X19));
        assert!(rules.is_callee_saved(Arm64::V8));
        assert!(rules.is_caller_saved(Arm64::X0));
        assert!(!rules.is_caller_saved(Arm64::ZR));
    }

    #[test]
    fn swift_is_unsupported_on_windows() {
        let rules = rules_for::<Amd64>(OperatingSystem::Windows);
        assert!(!rules.supports(CallingConvention::Swift));
        assert!(rules.check_supported(CallingConvention::Swift).is_err());
        assert!(rules.check_supported(CallingConvention::Managed).is_ok());
    }

    #[test]
    fn unsupported_platform() {
        let error = CallingConventionRules::<RiscV64>::new(OperatingSystem::Windows).unwrap_err();
        assert!(matches!(error, TargetError::UnsupportedPlatform { .. }));
    }
}
