// Copyright (C) 2025 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::fmt::Debug;

use log::info;
use strum::IntoEnumIterator;

use crate::{
    Architecture,
    ArgumentOrder,
    CallingConvention,
    CallingConventionRules,
    DescriptorTable,
    FixedReturnBuffer,
    OperatingSystem,
    Platform,
    RegisterClassifier,
    RegisterId,
    RegisterInfo,
    RegisterKind,
    RegisterSet,
    RegisterWords,
    TargetError,
    TargetResult,
};

/// Everything known about the registers of architecture `A` on one operating system.
#[derive(Debug, Clone, Copy)]
pub struct Target<A: Architecture> {
    descriptor: &'static DescriptorTable,
    rules: CallingConventionRules<A>,
}

impl<A: Architecture> Target<A> {
    pub fn new(operating_system: OperatingSystem) -> TargetResult<Self> {
        let descriptor = A::try_descriptor()?;
        let rules = CallingConventionRules::new(operating_system)?;

        info!(
            "Doel {}-{operating_system} geselecteerd: {} registers in {} woord(en)",
            A::KIND,
            descriptor.len(),
            <A::Words as RegisterWords>::COUNT,
        );

        Ok(Self { descriptor, rules })
    }

    #[must_use]
    pub fn descriptor(&self) -> &'static DescriptorTable {
        self.descriptor
    }

    #[must_use]
    pub fn rules(&self) -> &CallingConventionRules<A> {
        &self.rules
    }

    #[must_use]
    pub fn platform(&self) -> Platform {
        Platform::new(A::KIND, self.rules.operating_system())
    }

    #[must_use]
    pub fn word_count(&self) -> usize {
        <A::Words as RegisterWords>::COUNT
    }

    pub fn validate_convention(&self, convention: CallingConvention) -> TargetResult<()> {
        self.rules.check_supported(convention)
    }

    /// Resolves register names (canonical or alias) into a set.
    pub fn parse_set<S: AsRef<str>>(&self, names: &[S]) -> TargetResult<RegisterSet<A>> {
        names.iter()
            .map(|name| {
                let name = name.as_ref();
                self.descriptor.lookup(name).ok_or_else(|| TargetError::UnknownRegister {
                    name: name.to_string(),
                    architecture: A::KIND,
                })
            })
            .collect()
    }
}

/// A [`RegisterSet`] described in terms that do not depend on its architecture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetDescription {
    pub members: Vec<&'static str>,
    pub count: u32,
    pub display: String,

    /// The bits of the set per register kind, as stored in the word of that kind.
    pub per_kind: Vec<(RegisterKind, u64)>,
}

/// The object-safe view on a [`Target`], for tooling that picks the platform at runtime and does
/// not care about the register set layout.
pub trait TargetInfo: Debug + Send + Sync {
    #[must_use]
    fn platform(&self) -> Platform;

    #[must_use]
    fn word_count(&self) -> usize;

    #[must_use]
    fn registers(&self) -> &'static [RegisterInfo];

    #[must_use]
    fn lookup_register(&self, name: &str) -> Option<RegisterId>;

    #[must_use]
    fn is_byte_register(&self, id: RegisterId) -> bool;

    #[must_use]
    fn is_callee_saved(&self, id: RegisterId) -> bool;

    #[must_use]
    fn is_reserved(&self, id: RegisterId) -> bool;

    #[must_use]
    fn supports_convention(&self, convention: CallingConvention) -> bool;

    fn validate_convention(&self, convention: CallingConvention) -> TargetResult<()>;

    #[must_use]
    fn integer_argument_registers(&self) -> &'static [RegisterId];

    #[must_use]
    fn float_argument_registers(&self) -> &'static [RegisterId];

    #[must_use]
    fn fixed_return_buffer(&self, convention: CallingConvention) -> Option<FixedReturnBuffer>;

    #[must_use]
    fn full_integer_argument_registers(&self, convention: CallingConvention) -> Vec<RegisterId>;

    #[must_use]
    fn argument_order(&self, convention: CallingConvention) -> ArgumentOrder;

    fn describe_set(&self, names: &[String]) -> TargetResult<SetDescription>;

    #[must_use]
    fn register_name(&self, id: RegisterId) -> Option<&'static str> {
        self.registers().get(id.index()).map(RegisterInfo::name)
    }
}

impl<A: Architecture> TargetInfo for Target<A> {
    fn platform(&self) -> Platform {
        Target::platform(self)
    }

    fn word_count(&self) -> usize {
        Target::word_count(self)
    }

    fn registers(&self) -> &'static [RegisterInfo] {
        self.descriptor.registers()
    }

    fn lookup_register(&self, name: &str) -> Option<RegisterId> {
        self.descriptor.lookup(name)
    }

    fn is_byte_register(&self, id: RegisterId) -> bool {
        A::is_byte_register(id)
    }

    fn is_callee_saved(&self, id: RegisterId) -> bool {
        self.rules.is_callee_saved(id)
    }

    fn is_reserved(&self, id: RegisterId) -> bool {
        self.rules.reserved().contains(id)
    }

    fn supports_convention(&self, convention: CallingConvention) -> bool {
        self.rules.supports(convention)
    }

    fn validate_convention(&self, convention: CallingConvention) -> TargetResult<()> {
        Target::validate_convention(self, convention)
    }

    fn integer_argument_registers(&self) -> &'static [RegisterId] {
        self.rules.integer_argument_registers()
    }

    fn float_argument_registers(&self) -> &'static [RegisterId] {
        self.rules.float_argument_registers()
    }

    fn fixed_return_buffer(&self, convention: CallingConvention) -> Option<FixedReturnBuffer> {
        self.rules.fixed_return_buffer(convention)
    }

    fn full_integer_argument_registers(&self, convention: CallingConvention) -> Vec<RegisterId> {
        self.rules.full_integer_argument_register_mask(convention).iter().collect()
    }

    fn argument_order(&self, convention: CallingConvention) -> ArgumentOrder {
        self.rules.argument_order(convention)
    }

    fn describe_set(&self, names: &[String]) -> TargetResult<SetDescription> {
        let set = self.parse_set(names)?;

        let per_kind = RegisterKind::iter()
            .filter(|kind| A::kind_range(*kind).is_some())
            .map(|kind| (kind, set.project_to_kind(kind).bits()))
            .collect();

        Ok(SetDescription {
            members: set.iter().map(A::register_name).collect(),
            count: set.count(),
            display: set.to_string(),
            per_kind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Amd64, Arm64, ArchitectureKind};
    use pretty_assertions::assert_eq;

    #[test]
    fn target_knows_its_platform() {
        let target = Target::<Arm64>::new(OperatingSystem::Linux).unwrap();
        assert_eq!(target.platform(), Platform::new(ArchitectureKind::Arm64, OperatingSystem::Linux));
        assert_eq!(target.word_count(), 2);
        assert_eq!(target.descriptor().len(), 80);
    }

    #[test]
    fn validate_swift() {
        let target = Target::<Amd64>::new(OperatingSystem::Windows).unwrap();
        let error = target.validate_convention(CallingConvention::Swift).unwrap_err();
        assert!(matches!(error, TargetError::UnsupportedCallingConvention { convention: CallingConvention::Swift, .. }));

        let target = Target::<Amd64>::new(OperatingSystem::MacOs).unwrap();
        assert!(target.validate_convention(CallingConvention::Swift).is_ok());
    }

    #[test]
    fn supports_convention_through_trait_object() {
        let target = Platform::new(ArchitectureKind::Arm64, OperatingSystem::Windows).select().unwrap();
        assert!(!target.supports_convention(CallingConvention::Swift));
        assert!(target.supports_convention(CallingConvention::StdCall));
    }

    #[test]
    fn parse_set_with_aliases() {
        let target = Target::<Amd64>::new(OperatingSystem::Linux).unwrap();
        let set = target.parse_set(&["eax", "rcx", "zmm1", "k3"]).unwrap();
        assert_eq!(set, RegisterSet::from_registers(&[Amd64::RAX, Amd64::RCX, Amd64::XMM1, Amd64::K3]));

        let error = target.parse_set(&["rax", "w0"]).unwrap_err();
        assert!(matches!(error, TargetError::UnknownRegister { name, .. } if name == "w0"));
    }

    #[test]
    fn describe_set_through_trait_object() {
        let target: Box<dyn TargetInfo> = Box::new(Target::<Amd64>::new(OperatingSystem::Linux).unwrap());
        let description = target.describe_set(&["xmm2".to_string(), "rsi".to_string(), "k1".to_string()]).unwrap();

        assert_eq!(description.members, ["rsi", "xmm2", "k1"]);
        assert_eq!(description.count, 3);
        assert_eq!(description.display, "{rsi, xmm2, k1}");
        assert_eq!(description.per_kind, [
            (RegisterKind::Integer, 1 << 6),
            (RegisterKind::Float, 1 << 34),
            (RegisterKind::Mask, 1 << 1),
        ]);
    }

    #[test]
    fn register_names_through_trait_object() {
        let target: Box<dyn TargetInfo> = Box::new(Target::<Arm64>::new(OperatingSystem::Windows).unwrap());
        assert_eq!(target.register_name(Arm64::FP), Some("fp"));
        assert_eq!(target.register_name(RegisterId::new(200)), None);
        assert_eq!(target.lookup_register("x29"), Some(Arm64::FP));
        assert!(target.is_reserved(Arm64::X18));
    }
}
