// Copyright (C) 2025 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

mod info;
mod platform;

use std::str::FromStr;

use crate::{TargetError, TargetResult};

pub use self::{
    info::{
        SetDescription,
        Target,
        TargetInfo,
    },
    platform::{
        Platform,
        TargetVisitor,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(strum::AsRefStr, strum::Display, strum::EnumIter, strum::EnumString)]
#[strum(ascii_case_insensitive)]
pub enum ArchitectureKind {
    #[strum(to_string = "x86", serialize = "i386", serialize = "i686")]
    X86,

    #[strum(to_string = "amd64", serialize = "x86_64", serialize = "x86-64", serialize = "x64")]
    Amd64,

    #[strum(to_string = "arm", serialize = "armv7")]
    Arm,

    #[strum(to_string = "arm64", serialize = "aarch64")]
    Arm64,

    #[strum(to_string = "loongarch64")]
    LoongArch64,

    #[strum(to_string = "riscv64")]
    RiscV64,
}

impl ArchitectureKind {
    pub fn parse(name: &str) -> TargetResult<Self> {
        Self::from_str(name).map_err(|_| TargetError::UnknownArchitecture { name: name.to_string() })
    }

    #[must_use]
    pub fn host() -> Option<Self> {
        if cfg!(target_arch = "x86") {
            Some(Self::X86)
        } else if cfg!(target_arch = "x86_64") {
            Some(Self::Amd64)
        } else if cfg!(target_arch = "arm") {
            Some(Self::Arm)
        } else if cfg!(target_arch = "aarch64") {
            Some(Self::Arm64)
        } else if cfg!(target_arch = "loongarch64") {
            Some(Self::LoongArch64)
        } else if cfg!(target_arch = "riscv64") {
            Some(Self::RiscV64)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn is_64_bit(&self) -> bool {
        !matches!(self, Self::X86 | Self::Arm)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(strum::AsRefStr, strum::Display, strum::EnumIter, strum::EnumString)]
#[strum(ascii_case_insensitive)]
pub enum OperatingSystem {
    #[strum(to_string = "windows", serialize = "win32")]
    Windows,

    #[strum(to_string = "linux")]
    Linux,

    #[strum(to_string = "macos", serialize = "darwin")]
    MacOs,
}

impl OperatingSystem {
    pub fn parse(name: &str) -> TargetResult<Self> {
        Self::from_str(name).map_err(|_| TargetError::UnknownOperatingSystem { name: name.to_string() })
    }

    #[must_use]
    pub fn host() -> Option<Self> {
        if cfg!(target_os = "windows") {
            Some(Self::Windows)
        } else if cfg!(target_os = "linux") {
            Some(Self::Linux)
        } else if cfg!(target_os = "macos") {
            Some(Self::MacOs)
        } else {
            None
        }
    }

    /// Whether this is a Unix-like system, which share the System V calling conventions.
    #[must_use]
    pub const fn is_unix(&self) -> bool {
        matches!(self, Self::Linux | Self::MacOs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("amd64", ArchitectureKind::Amd64)]
    #[case("x86_64", ArchitectureKind::Amd64)]
    #[case("AArch64", ArchitectureKind::Arm64)]
    #[case("i686", ArchitectureKind::X86)]
    #[case("riscv64", ArchitectureKind::RiscV64)]
    #[case("loongarch64", ArchitectureKind::LoongArch64)]
    fn parse_architecture(#[case] input: &str, #[case] expected: ArchitectureKind) {
        assert_eq!(ArchitectureKind::parse(input).ok(), Some(expected));
    }

    #[test]
    fn unknown_architecture() {
        let error = ArchitectureKind::parse("mips").unwrap_err();
        assert!(matches!(error, TargetError::UnknownArchitecture { name } if name == "mips"));
    }

    #[rstest]
    #[case(ArchitectureKind::Amd64, "amd64")]
    #[case(ArchitectureKind::Arm64, "arm64")]
    #[case(ArchitectureKind::LoongArch64, "loongarch64")]
    fn architecture_display(#[case] kind: ArchitectureKind, #[case] expected: &str) {
        assert_eq!(kind.to_string(), expected);
    }

    #[rstest]
    #[case("linux", OperatingSystem::Linux)]
    #[case("darwin", OperatingSystem::MacOs)]
    #[case("Windows", OperatingSystem::Windows)]
    fn parse_operating_system(#[case] input: &str, #[case] expected: OperatingSystem) {
        assert_eq!(OperatingSystem::parse(input).ok(), Some(expected));
        assert!(OperatingSystem::parse("haiku").is_err());
    }
}
