// Copyright (C) 2025 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::fmt::Display;

use strum::IntoEnumIterator;

use crate::{
    Amd64,
    Architecture,
    ArchitectureKind,
    Arm,
    Arm64,
    LoongArch64,
    OperatingSystem,
    RiscV64,
    Target,
    TargetError,
    TargetInfo,
    TargetResult,
    X86,
};

/// Generic code that runs for the architecture of a [`Platform`] chosen at runtime.
pub trait TargetVisitor {
    type Output;

    fn visit<A: Architecture>(self, target: Target<A>) -> Self::Output;
}

/// An architecture and operating system, as chosen at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform {
    architecture: ArchitectureKind,
    operating_system: OperatingSystem,
}

impl Platform {
    #[must_use]
    pub const fn new(architecture: ArchitectureKind, operating_system: OperatingSystem) -> Self {
        Self {
            architecture,
            operating_system,
        }
    }

    pub fn host() -> TargetResult<Self> {
        match (ArchitectureKind::host(), OperatingSystem::host()) {
            (Some(architecture), Some(operating_system)) => Ok(Self::new(architecture, operating_system)),
            _ => Err(TargetError::UnknownHost),
        }
    }

    /// All combinations that have calling convention tables.
    pub fn supported() -> impl Iterator<Item = Self> {
        ArchitectureKind::iter()
            .flat_map(|architecture| OperatingSystem::iter().map(move |os| Self::new(architecture, os)))
            .filter(Self::is_supported)
    }

    #[must_use]
    pub fn architecture(&self) -> ArchitectureKind {
        self.architecture
    }

    #[must_use]
    pub fn operating_system(&self) -> OperatingSystem {
        self.operating_system
    }

    #[must_use]
    pub fn is_supported(&self) -> bool {
        fn supported<A: Architecture>(operating_system: OperatingSystem) -> bool {
            A::abi(operating_system).is_some()
        }

        match self.architecture {
            ArchitectureKind::X86 => supported::<X86>(self.operating_system),
            ArchitectureKind::Amd64 => supported::<Amd64>(self.operating_system),
            ArchitectureKind::Arm => supported::<Arm>(self.operating_system),
            ArchitectureKind::Arm64 => supported::<Arm64>(self.operating_system),
            ArchitectureKind::LoongArch64 => supported::<LoongArch64>(self.operating_system),
            ArchitectureKind::RiscV64 => supported::<RiscV64>(self.operating_system),
        }
    }

    /// Whether native variadic calls are supported, which only Windows does, and not on 32-bit ARM.
    #[must_use]
    pub const fn supports_native_varargs(&self) -> bool {
        matches!(self.operating_system, OperatingSystem::Windows)
            && !matches!(self.architecture, ArchitectureKind::Arm)
    }

    /// Whether this is the Apple flavor of the ARM64 ABI, which packs stack arguments by their
    /// natural alignment instead of in 8-byte slots.
    #[must_use]
    pub const fn is_apple_arm64(&self) -> bool {
        matches!(self.architecture, ArchitectureKind::Arm64) && matches!(self.operating_system, OperatingSystem::MacOs)
    }

    /// Whether a single argument may be split between the last argument registers and the stack.
    #[must_use]
    pub const fn splits_arguments(&self) -> bool {
        match self.architecture {
            ArchitectureKind::Arm | ArchitectureKind::LoongArch64 | ArchitectureKind::RiscV64 => true,
            ArchitectureKind::Arm64 => matches!(self.operating_system, OperatingSystem::Windows),
            ArchitectureKind::X86 | ArchitectureKind::Amd64 => false,
        }
    }

    #[must_use]
    pub const fn is_unix_x86(&self) -> bool {
        matches!(self.architecture, ArchitectureKind::X86) && self.operating_system.is_unix()
    }

    /// Builds the [`Target`] of this platform and hands it to the visitor, so that the visitor runs
    /// with the architecture as a compile-time parameter.
    pub fn dispatch<V: TargetVisitor>(&self, visitor: V) -> TargetResult<V::Output> {
        Ok(match self.architecture {
            ArchitectureKind::X86 => visitor.visit(Target::<X86>::new(self.operating_system)?),
            ArchitectureKind::Amd64 => visitor.visit(Target::<Amd64>::new(self.operating_system)?),
            ArchitectureKind::Arm => visitor.visit(Target::<Arm>::new(self.operating_system)?),
            ArchitectureKind::Arm64 => visitor.visit(Target::<Arm64>::new(self.operating_system)?),
            ArchitectureKind::LoongArch64 => visitor.visit(Target::<LoongArch64>::new(self.operating_system)?),
            ArchitectureKind::RiscV64 => visitor.visit(Target::<RiscV64>::new(self.operating_system)?),
        })
    }

    /// The target of this platform behind a trait object, for code that does not need to know the
    /// register set layout.
    pub fn select(&self) -> TargetResult<Box<dyn TargetInfo>> {
        struct Boxer;

        impl TargetVisitor for Boxer {
            type Output = Box<dyn TargetInfo>;

            fn visit<A: Architecture>(self, target: Target<A>) -> Self::Output {
                Box::new(target)
            }
        }

        self.dispatch(Boxer)
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.architecture, self.operating_system)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RegisterWords;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    struct WordCount;

    impl TargetVisitor for WordCount {
        type Output = usize;

        fn visit<A: Architecture>(self, target: Target<A>) -> Self::Output {
            _ = target;
            <A::Words as RegisterWords>::COUNT
        }
    }

    #[rstest]
    #[case(ArchitectureKind::X86, OperatingSystem::Windows, 1)]
    #[case(ArchitectureKind::Amd64, OperatingSystem::Linux, 2)]
    #[case(ArchitectureKind::Arm, OperatingSystem::Linux, 1)]
    #[case(ArchitectureKind::Arm64, OperatingSystem::MacOs, 2)]
    #[case(ArchitectureKind::LoongArch64, OperatingSystem::Linux, 1)]
    #[case(ArchitectureKind::RiscV64, OperatingSystem::Linux, 1)]
    fn dispatch_keeps_word_count(#[case] architecture: ArchitectureKind, #[case] os: OperatingSystem, #[case] expected: usize) {
        let platform = Platform::new(architecture, os);
        assert_eq!(platform.dispatch(WordCount).unwrap(), expected);
        assert_eq!(platform.select().unwrap().word_count(), expected);
    }

    #[rstest]
    #[case(ArchitectureKind::X86, OperatingSystem::MacOs)]
    #[case(ArchitectureKind::Arm, OperatingSystem::Windows)]
    #[case(ArchitectureKind::RiscV64, OperatingSystem::MacOs)]
    fn unsupported_combinations(#[case] architecture: ArchitectureKind, #[case] os: OperatingSystem) {
        let platform = Platform::new(architecture, os);
        assert!(!platform.is_supported());

        let Err(error) = platform.select() else {
            panic!("{platform} zou niet ondersteund moeten zijn");
        };
        assert!(matches!(error, TargetError::UnsupportedPlatform { .. }));
    }

    #[test]
    fn supported_platforms() {
        assert_eq!(Platform::supported().count(), 2 + 3 + 1 + 3 + 1 + 1);
        assert!(Platform::supported().all(|platform| platform.select().is_ok()));
    }

    #[rstest]
    #[case(ArchitectureKind::X86, OperatingSystem::Windows, true, false, false, false)]
    #[case(ArchitectureKind::X86, OperatingSystem::Linux, false, false, false, true)]
    #[case(ArchitectureKind::Amd64, OperatingSystem::Windows, true, false, false, false)]
    #[case(ArchitectureKind::Amd64, OperatingSystem::Linux, false, false, false, false)]
    #[case(ArchitectureKind::Amd64, OperatingSystem::MacOs, false, false, false, false)]
    #[case(ArchitectureKind::Arm, OperatingSystem::Linux, false, false, true, false)]
    #[case(ArchitectureKind::Arm, OperatingSystem::Windows, false, false, true, false)]
    #[case(ArchitectureKind::Arm64, OperatingSystem::Windows, true, false, true, false)]
    #[case(ArchitectureKind::Arm64, OperatingSystem::Linux, false, false, false, false)]
    #[case(ArchitectureKind::Arm64, OperatingSystem::MacOs, false, true, false, false)]
    #[case(ArchitectureKind::LoongArch64, OperatingSystem::Linux, false, false, true, false)]
    #[case(ArchitectureKind::RiscV64, OperatingSystem::Linux, false, false, true, false)]
    fn abi_features(
        #[case] architecture: ArchitectureKind,
        #[case] os: OperatingSystem,
        #[case] varargs: bool,
        #[case] apple_arm64: bool,
        #[case] splits_arguments: bool,
        #[case] unix_x86: bool,
    ) {
        let platform = Platform::new(architecture, os);
        assert_eq!(platform.supports_native_varargs(), varargs);
        assert_eq!(platform.is_apple_arm64(), apple_arm64);
        assert_eq!(platform.splits_arguments(), splits_arguments);
        assert_eq!(platform.is_unix_x86(), unix_x86);
    }

    #[test]
    fn display() {
        assert_eq!(Platform::new(ArchitectureKind::Arm64, OperatingSystem::MacOs).to_string(), "arm64-macos");
    }
}
