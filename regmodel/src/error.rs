// Copyright (C) 2025 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::path::PathBuf;

use thiserror::Error;

use crate::{ArchitectureKind, CallingConvention, OperatingSystem, RegisterId, RegisterKind};

type IoError = std::io::Error;
type TomlError = toml::de::Error;

pub type TargetResult<T> = core::result::Result<T, TargetError>;

/// A mistake in the static register table of an architecture.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    #[error("registers van soort {kind} liggen op {architecture} verspreid over meerdere woorden")]
    KindStraddlesWords { architecture: ArchitectureKind, kind: RegisterKind },

    #[error("het bereik van soort {kind} op {architecture} loopt tot {last}, voorbij het laatste register")]
    KindOutOfRange { architecture: ArchitectureKind, kind: RegisterKind, last: RegisterId },

    #[error("de bereiken van {first} en {second} overlappen op {architecture}")]
    KindsOverlap { architecture: ArchitectureKind, first: RegisterKind, second: RegisterKind },

    #[error("register `{name}` heeft nummer {actual}, maar nummer {expected} werd verwacht")]
    NotDense { name: &'static str, expected: usize, actual: RegisterId },

    #[error("register `{name}` valt buiten elk soortbereik")]
    NoKind { name: &'static str },

    #[error("register `{name}` is van soort {actual}, maar valt in het bereik voor {expected}")]
    KindMismatch { name: &'static str, expected: RegisterKind, actual: RegisterKind },

    #[error("registernaam `{name}` is dubbel gedefinieerd")]
    DuplicateName { name: &'static str },

    #[error("alias `{alias}` verwijst naar onbekend register `{target}`")]
    UnknownAliasTarget { alias: &'static str, target: &'static str },

    #[error("tabel van {architecture} bevat {actual} registers, maar er worden er {expected} verwacht")]
    CountMismatch { architecture: ArchitectureKind, expected: usize, actual: usize },
}

/// Why a target could not be selected.
#[derive(Debug, Error)]
pub enum TargetError {
    #[error("onbekende architectuur: \"{name}\"")]
    UnknownArchitecture { name: String },

    #[error("onbekend besturingssysteem: \"{name}\"")]
    UnknownOperatingSystem { name: String },

    #[error("onbekende aanroepconventie: \"{name}\"")]
    UnknownCallingConvention { name: String },

    #[error("register \"{name}\" bestaat niet op {architecture}")]
    UnknownRegister { name: String, architecture: ArchitectureKind },

    #[error("kon de architectuur of het besturingssysteem van deze computer niet herkennen")]
    UnknownHost,

    #[error("{architecture} wordt niet ondersteund op {operating_system}")]
    UnsupportedPlatform { architecture: ArchitectureKind, operating_system: OperatingSystem },

    #[error("aanroepconventie {convention} wordt niet ondersteund op {architecture} ({operating_system})")]
    UnsupportedCallingConvention {
        convention: CallingConvention,
        architecture: ArchitectureKind,
        operating_system: OperatingSystem,
    },

    #[error("ongeldige registertabel: {0}")]
    InvalidDescriptor(#[from] DescriptorError),

    #[error("ongeldige configuratie: {0}")]
    InvalidConfiguration(#[from] TomlError),

    #[error("kon configuratie \"{}\" niet lezen: {error}", path.display())]
    ConfigurationNotReadable { path: PathBuf, error: IoError },
}
