// Copyright (C) 2025 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

#![deny(elided_lifetimes_in_paths)]

mod arch;
mod classifier;
mod config;
mod convention;
mod descriptor;
mod error;
mod register;
mod set;
mod target;
mod value_type;

pub use self::{
    arch::{
        Amd64,
        Architecture,
        Arm,
        Arm64,
        LoongArch64,
        RiscV64,
        X86,
    },
    classifier::RegisterClassifier,
    config::{
        ConfigRoot,
        ConfigSectionLog,
        ConfigSectionTarget,
    },
    convention::{
        AbiTable,
        ArgumentOrder,
        CallingConvention,
        CallingConventionRules,
        FixedReturnBuffer,
        ReturnBufferPolicy,
        SwiftRegisters,
    },
    descriptor::{
        DescriptorCell,
        DescriptorTable,
        RegisterInfo,
        RegisterRow,
    },
    error::{
        DescriptorError,
        TargetError,
        TargetResult,
    },
    register::{
        KindRange,
        RegisterId,
        RegisterKind,
        RegisterSlot,
    },
    set::{
        DoubleWord,
        Members,
        RegisterSet,
        RegisterWords,
        SingleTypeRegSet,
        SingleWord,
    },
    target::{
        ArchitectureKind,
        OperatingSystem,
        Platform,
        SetDescription,
        Target,
        TargetInfo,
        TargetVisitor,
    },
    value_type::ValueType,
};
