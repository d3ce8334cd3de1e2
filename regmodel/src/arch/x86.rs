// Copyright (C) 2025 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use crate::{
    AbiTable,
    Architecture,
    ArchitectureKind,
    ArgumentOrder,
    DescriptorCell,
    DescriptorError,
    DescriptorTable,
    KindRange,
    OperatingSystem,
    RegisterId,
    RegisterKind,
    RegisterRow,
    ReturnBufferPolicy,
    SingleWord,
};

/// 32-bit x86 with SSE, and the AVX-512 opmask registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct X86;

impl X86 {
    pub const EAX: RegisterId = RegisterId::new(0);
    pub const ECX: RegisterId = RegisterId::new(1);
    pub const EDX: RegisterId = RegisterId::new(2);
    pub const EBX: RegisterId = RegisterId::new(3);
    pub const ESP: RegisterId = RegisterId::new(4);
    pub const EBP: RegisterId = RegisterId::new(5);
    pub const ESI: RegisterId = RegisterId::new(6);
    pub const EDI: RegisterId = RegisterId::new(7);

    pub const XMM0: RegisterId = RegisterId::new(8);
    pub const XMM1: RegisterId = RegisterId::new(9);
    pub const XMM2: RegisterId = RegisterId::new(10);
    pub const XMM3: RegisterId = RegisterId::new(11);
    pub const XMM4: RegisterId = RegisterId::new(12);
    pub const XMM5: RegisterId = RegisterId::new(13);
    pub const XMM6: RegisterId = RegisterId::new(14);
    pub const XMM7: RegisterId = RegisterId::new(15);

    pub const K0: RegisterId = RegisterId::new(16);
    pub const K1: RegisterId = RegisterId::new(17);
    pub const K2: RegisterId = RegisterId::new(18);
    pub const K3: RegisterId = RegisterId::new(19);
    pub const K4: RegisterId = RegisterId::new(20);
    pub const K5: RegisterId = RegisterId::new(21);
    pub const K6: RegisterId = RegisterId::new(22);
    pub const K7: RegisterId = RegisterId::new(23);
}

impl Architecture for X86 {
    type Words = SingleWord;

    const KIND: ArchitectureKind = ArchitectureKind::X86;
    const REGISTER_COUNT: usize = 24;

    const INTEGER_REGISTERS: KindRange = KindRange::new(Self::EAX, Self::EDI);
    const FLOAT_REGISTERS: KindRange = KindRange::new(Self::XMM0, Self::XMM7);
    const MASK_REGISTERS: Option<KindRange> = Some(KindRange::new(Self::K0, Self::K7));

    /// Only `eax` through `ebx` have an addressable low byte (`al` through `bl`).
    const BYTE_REGISTERS: Option<KindRange> = Some(KindRange::new(Self::EAX, Self::EBX));

    const ROWS: &'static [RegisterRow] = &[
        RegisterRow::register("eax", Self::EAX, RegisterKind::Integer, 0),
        RegisterRow::register("ecx", Self::ECX, RegisterKind::Integer, 1),
        RegisterRow::register("edx", Self::EDX, RegisterKind::Integer, 2),
        RegisterRow::register("ebx", Self::EBX, RegisterKind::Integer, 3),
        RegisterRow::register("esp", Self::ESP, RegisterKind::Integer, 4),
        RegisterRow::register("ebp", Self::EBP, RegisterKind::Integer, 5),
        RegisterRow::register("esi", Self::ESI, RegisterKind::Integer, 6),
        RegisterRow::register("edi", Self::EDI, RegisterKind::Integer, 7),

        RegisterRow::register("xmm0", Self::XMM0, RegisterKind::Float, 0),
        RegisterRow::register("xmm1", Self::XMM1, RegisterKind::Float, 1),
        RegisterRow::register("xmm2", Self::XMM2, RegisterKind::Float, 2),
        RegisterRow::register("xmm3", Self::XMM3, RegisterKind::Float, 3),
        RegisterRow::register("xmm4", Self::XMM4, RegisterKind::Float, 4),
        RegisterRow::register("xmm5", Self::XMM5, RegisterKind::Float, 5),
        RegisterRow::register("xmm6", Self::XMM6, RegisterKind::Float, 6),
        RegisterRow::register("xmm7", Self::XMM7, RegisterKind::Float, 7),

        RegisterRow::register("k0", Self::K0, RegisterKind::Mask, 0),
        RegisterRow::register("k1", Self::K1, RegisterKind::Mask, 1),
        RegisterRow::register("k2", Self::K2, RegisterKind::Mask, 2),
        RegisterRow::register("k3", Self::K3, RegisterKind::Mask, 3),
        RegisterRow::register("k4", Self::K4, RegisterKind::Mask, 4),
        RegisterRow::register("k5", Self::K5, RegisterKind::Mask, 5),
        RegisterRow::register("k6", Self::K6, RegisterKind::Mask, 6),
        RegisterRow::register("k7", Self::K7, RegisterKind::Mask, 7),

        // 16-bit and low-byte names
        RegisterRow::alias("ax", "eax"),
        RegisterRow::alias("cx", "ecx"),
        RegisterRow::alias("dx", "edx"),
        RegisterRow::alias("bx", "ebx"),
        RegisterRow::alias("sp", "esp"),
        RegisterRow::alias("bp", "ebp"),
        RegisterRow::alias("si", "esi"),
        RegisterRow::alias("di", "edi"),
        RegisterRow::alias("al", "eax"),
        RegisterRow::alias("cl", "ecx"),
        RegisterRow::alias("dl", "edx"),
        RegisterRow::alias("bl", "ebx"),
    ];

    fn try_descriptor() -> Result<&'static DescriptorTable, DescriptorError> {
        static TABLE: DescriptorCell = DescriptorCell::new();
        TABLE.get::<Self>()
    }

    fn abi(operating_system: OperatingSystem) -> Option<&'static AbiTable> {
        match operating_system {
            OperatingSystem::Windows | OperatingSystem::Linux => Some(&ABI),
            OperatingSystem::MacOs => None,
        }
    }
}

/// Floating-point values are passed on the stack and returned on the x87 stack, so there are no
/// float argument or return registers.
static ABI: AbiTable = AbiTable {
    integer_arguments: &[
        X86::ECX, X86::EDX,
    ],
    float_arguments: &[],
    integer_return: X86::EAX,
    float_return: None,
    callee_saved: &[
        X86::EBX, X86::ESI, X86::EDI, X86::EBP,
    ],
    reserved: &[
        X86::ESP,
    ],
    return_buffer: ReturnBufferPolicy::Never,
    swift: None,
    managed_argument_order: ArgumentOrder::LeftToRight,
    unmanaged_argument_order: ArgumentOrder::RightToLeft,
};
