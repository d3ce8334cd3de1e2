// Copyright (C) 2025 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use crate::{ArgumentOrder, RegisterId};

/// The register-level calling convention of one architecture on one (family of) operating
/// system(s). Defined as static data by every [`Architecture`](crate::Architecture).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbiTable {
    /// In argument order.
    pub integer_arguments: &'static [RegisterId],

    /// In argument order.
    pub float_arguments: &'static [RegisterId],

    pub integer_return: RegisterId,
    pub float_return: Option<RegisterId>,

    pub callee_saved: &'static [RegisterId],

    /// Registers the allocator never hands out (stack pointer, frame pointer, zero register...).
    pub reserved: &'static [RegisterId],

    pub return_buffer: ReturnBufferPolicy,

    /// [`None`] when Swift interop is not available on this platform.
    pub swift: Option<SwiftRegisters>,

    pub managed_argument_order: ArgumentOrder,
    pub unmanaged_argument_order: ArgumentOrder,
}

/// A register that always receives the address of the aggregate a call returns, instead of that
/// address being passed as an ordinary argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedReturnBuffer {
    pub register: RegisterId,

    /// The argument number reserved for the return buffer, outside the ordinary argument numbering.
    pub argument_slot: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnBufferPolicy {
    /// The return buffer is an ordinary (hidden) argument.
    Never,

    Always(FixedReturnBuffer),

    /// Windows on ARM64 passes the return buffer of instance methods as an ordinary argument.
    ExceptInstanceMethods(FixedReturnBuffer),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwiftRegisters {
    pub return_buffer: FixedReturnBuffer,

    /// The `self` context register.
    pub self_register: RegisterId,

    /// Receives the thrown error on return. Reserved as an argument register so that no other
    /// argument is assigned to it, but no argument value is ever passed in it.
    pub error_register: RegisterId,
}
