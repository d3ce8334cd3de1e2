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
    DoubleWord,
    FixedReturnBuffer,
    KindRange,
    OperatingSystem,
    RegisterId,
    RegisterKind,
    RegisterRow,
    ReturnBufferPolicy,
    SwiftRegisters,
};

/// x86-64 with the APX extended general purpose registers (`r16` through `r31`), AVX-512 and its
/// opmask registers. The register count exceeds 64, so register sets take two words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Amd64;

impl Amd64 {
    pub const RAX: RegisterId = RegisterId::new(0);
    pub const RCX: RegisterId = RegisterId::new(1);
    pub const RDX: RegisterId = RegisterId::new(2);
    pub const RBX: RegisterId = RegisterId::new(3);
    pub const RSP: RegisterId = RegisterId::new(4);
    pub const RBP: RegisterId = RegisterId::new(5);
    pub const RSI: RegisterId = RegisterId::new(6);
    pub const RDI: RegisterId = RegisterId::new(7);
    pub const R8: RegisterId = RegisterId::new(8);
    pub const R9: RegisterId = RegisterId::new(9);
    pub const R10: RegisterId = RegisterId::new(10);
    pub const R11: RegisterId = RegisterId::new(11);
    pub const R12: RegisterId = RegisterId::new(12);
    pub const R13: RegisterId = RegisterId::new(13);
    pub const R14: RegisterId = RegisterId::new(14);
    pub const R15: RegisterId = RegisterId::new(15);
    pub const R16: RegisterId = RegisterId::new(16);
    pub const R17: RegisterId = RegisterId::new(17);
    pub const R18: RegisterId = RegisterId::new(18);
    pub const R19: RegisterId = RegisterId::new(19);
    pub const R20: RegisterId = RegisterId::new(20);
    pub const R21: RegisterId = RegisterId::new(21);
    pub const R22: RegisterId = RegisterId::new(22);
    pub const R23: RegisterId = RegisterId::new(23);
    pub const R24: RegisterId = RegisterId::new(24);
    pub const R25: RegisterId = RegisterId::new(25);
    pub const R26: RegisterId = RegisterId::new(26);
    pub const R27: RegisterId = RegisterId::new(27);
    pub const R28: RegisterId = RegisterId::new(28);
    pub const R29: RegisterId = RegisterId::new(29);
    pub const R30: RegisterId = RegisterId::new(30);
    pub const R31: RegisterId = RegisterId::new(31);

    pub const XMM0: RegisterId = RegisterId::new(32);
    pub const XMM1: RegisterId = RegisterId::new(33);
    pub const XMM2: RegisterId = RegisterId::new(34);
    pub const XMM3: RegisterId = RegisterId::new(35);
    pub const XMM4: RegisterId = RegisterId::new(36);
    pub const XMM5: RegisterId = RegisterId::new(37);
    pub const XMM6: RegisterId = RegisterId::new(38);
    pub const XMM7: RegisterId = RegisterId::new(39);
    pub const XMM8: RegisterId = RegisterId::new(40);
    pub const XMM9: RegisterId = RegisterId::new(41);
    pub const XMM10: RegisterId = RegisterId::new(42);
    pub const XMM11: RegisterId = RegisterId::new(43);
    pub const XMM12: RegisterId = RegisterId::new(44);
    pub const XMM13: RegisterId = RegisterId::new(45);
    pub const XMM14: RegisterId = RegisterId::new(46);
    pub const XMM15: RegisterId = RegisterId::new(47);
    pub const XMM16: RegisterId = RegisterId::new(48);
    pub const XMM17: RegisterId = RegisterId::new(49);
    pub const XMM18: RegisterId = RegisterId::new(50);
    pub const XMM19: RegisterId = RegisterId::new(51);
    pub const XMM20: RegisterId = RegisterId::new(52);
    pub const XMM21: RegisterId = RegisterId::new(53);
    pub const XMM22: RegisterId = RegisterId::new(54);
    pub const XMM23: RegisterId = RegisterId::new(55);
    pub const XMM24: RegisterId = RegisterId::new(56);
    pub const XMM25: RegisterId = RegisterId::new(57);
    pub const XMM26: RegisterId = RegisterId::new(58);
    pub const XMM27: RegisterId = RegisterId::new(59);
    pub const XMM28: RegisterId = RegisterId::new(60);
    pub const XMM29: RegisterId = RegisterId::new(61);
    pub const XMM30: RegisterId = RegisterId::new(62);
    pub const XMM31: RegisterId = RegisterId::new(63);

    pub const K0: RegisterId = RegisterId::new(64);
    pub const K1: RegisterId = RegisterId::new(65);
    pub const K2: RegisterId = RegisterId::new(66);
    pub const K3: RegisterId = RegisterId::new(67);
    pub const K4: RegisterId = RegisterId::new(68);
    pub const K5: RegisterId = RegisterId::new(69);
    pub const K6: RegisterId = RegisterId::new(70);
    pub const K7: RegisterId = RegisterId::new(71);
}

impl Architecture for Amd64 {
    type Words = DoubleWord;

    const KIND: ArchitectureKind = ArchitectureKind::Amd64;
    const REGISTER_COUNT: usize = 72;

    const INTEGER_REGISTERS: KindRange = KindRange::new(Self::RAX, Self::R31);
    const FLOAT_REGISTERS: KindRange = KindRange::new(Self::XMM0, Self::XMM31);
    const MASK_REGISTERS: Option<KindRange> = Some(KindRange::new(Self::K0, Self::K7));

    const ROWS: &'static [RegisterRow] = &[
        RegisterRow::register("rax", Self::RAX, RegisterKind::Integer, 0),
        RegisterRow::register("rcx", Self::RCX, RegisterKind::Integer, 1),
        RegisterRow::register("rdx", Self::RDX, RegisterKind::Integer, 2),
        RegisterRow::register("rbx", Self::RBX, RegisterKind::Integer, 3),
        RegisterRow::register("rsp", Self::RSP, RegisterKind::Integer, 4),
        RegisterRow::register("rbp", Self::RBP, RegisterKind::Integer, 5),
        RegisterRow::register("rsi", Self::RSI, RegisterKind::Integer, 6),
        RegisterRow::register("rdi", Self::RDI, RegisterKind::Integer, 7),
        RegisterRow::register("r8", Self::R8, RegisterKind::Integer, 8),
        RegisterRow::register("r9", Self::R9, RegisterKind::Integer, 9),
        RegisterRow::register("r10", Self::R10, RegisterKind::Integer, 10),
        RegisterRow::register("r11", Self::R11, RegisterKind::Integer, 11),
        RegisterRow::register("r12", Self::R12, RegisterKind::Integer, 12),
        RegisterRow::register("r13", Self::R13, RegisterKind::Integer, 13),
        RegisterRow::register("r14", Self::R14, RegisterKind::Integer, 14),
        RegisterRow::register("r15", Self::R15, RegisterKind::Integer, 15),
        RegisterRow::register("r16", Self::R16, RegisterKind::Integer, 16),
        RegisterRow::register("r17", Self::R17, RegisterKind::Integer, 17),
        RegisterRow::register("r18", Self::R18, RegisterKind::Integer, 18),
        RegisterRow::register("r19", Self::R19, RegisterKind::Integer, 19),
        RegisterRow::register("r20", Self::R20, RegisterKind::Integer, 20),
        RegisterRow::register("r21", Self::R21, RegisterKind::Integer, 21),
        RegisterRow::register("r22", Self::R22, RegisterKind::Integer, 22),
        RegisterRow::register("r23", Self::R23, RegisterKind::Integer, 23),
        RegisterRow::register("r24", Self::R24, RegisterKind::Integer, 24),
        RegisterRow::register("r25", Self::R25, RegisterKind::Integer, 25),
        RegisterRow::register("r26", Self::R26, RegisterKind::Integer, 26),
        RegisterRow::register("r27", Self::R27, RegisterKind::Integer, 27),
        RegisterRow::register("r28", Self::R28, RegisterKind::Integer, 28),
        RegisterRow::register("r29", Self::R29, RegisterKind::Integer, 29),
        RegisterRow::register("r30", Self::R30, RegisterKind::Integer, 30),
        RegisterRow::register("r31", Self::R31, RegisterKind::Integer, 31),

        RegisterRow::register("xmm0", Self::XMM0, RegisterKind::Float, 0),
        RegisterRow::register("xmm1", Self::XMM1, RegisterKind::Float, 1),
        RegisterRow::register("xmm2", Self::XMM2, RegisterKind::Float, 2),
        RegisterRow::register("xmm3", Self::XMM3, RegisterKind::Float, 3),
        RegisterRow::register("xmm4", Self::XMM4, RegisterKind::Float, 4),
        RegisterRow::register("xmm5", Self::XMM5, RegisterKind::Float, 5),
        RegisterRow::register("xmm6", Self::XMM6, RegisterKind::Float, 6),
        RegisterRow::register("xmm7", Self::XMM7, RegisterKind::Float, 7),
        RegisterRow::register("xmm8", Self::XMM8, RegisterKind::Float, 8),
        RegisterRow::register("xmm9", Self::XMM9, RegisterKind::Float, 9),
        RegisterRow::register("xmm10", Self::XMM10, RegisterKind::Float, 10),
        RegisterRow::register("xmm11", Self::XMM11, RegisterKind::Float, 11),
        RegisterRow::register("xmm12", Self::XMM12, RegisterKind::Float, 12),
        RegisterRow::register("xmm13", Self::XMM13, RegisterKind::Float, 13),
        RegisterRow::register("xmm14", Self::XMM14, RegisterKind::Float, 14),
        RegisterRow::register("xmm15", Self::XMM15, RegisterKind::Float, 15),
        RegisterRow::register("xmm16", Self::XMM16, RegisterKind::Float, 16),
        RegisterRow::register("xmm17", Self::XMM17, RegisterKind::Float, 17),
        RegisterRow::register("xmm18", Self::XMM18, RegisterKind::Float, 18),
        RegisterRow::register("xmm19", Self::XMM19, RegisterKind::Float, 19),
        RegisterRow::register("xmm20", Self::XMM20, RegisterKind::Float, 20),
        RegisterRow::register("xmm21", Self::XMM21, RegisterKind::Float, 21),
        RegisterRow::register("xmm22", Self::XMM22, RegisterKind::Float, 22),
        RegisterRow::register("xmm23", Self::XMM23, RegisterKind::Float, 23),
        RegisterRow::register("xmm24", Self::XMM24, RegisterKind::Float, 24),
        RegisterRow::register("xmm25", Self::XMM25, RegisterKind::Float, 25),
        RegisterRow::register("xmm26", Self::XMM26, RegisterKind::Float, 26),
        RegisterRow::register("xmm27", Self::XMM27, RegisterKind::Float, 27),
        RegisterRow::register("xmm28", Self::XMM28, RegisterKind::Float, 28),
        RegisterRow::register("xmm29", Self::XMM29, RegisterKind::Float, 29),
        RegisterRow::register("xmm30", Self::XMM30, RegisterKind::Float, 30),
        RegisterRow::register("xmm31", Self::XMM31, RegisterKind::Float, 31),

        RegisterRow::register("k0", Self::K0, RegisterKind::Mask, 0),
        RegisterRow::register("k1", Self::K1, RegisterKind::Mask, 1),
        RegisterRow::register("k2", Self::K2, RegisterKind::Mask, 2),
        RegisterRow::register("k3", Self::K3, RegisterKind::Mask, 3),
        RegisterRow::register("k4", Self::K4, RegisterKind::Mask, 4),
        RegisterRow::register("k5", Self::K5, RegisterKind::Mask, 5),
        RegisterRow::register("k6", Self::K6, RegisterKind::Mask, 6),
        RegisterRow::register("k7", Self::K7, RegisterKind::Mask, 7),

        // 32-bit names, and the wider vector registers that overlap the xmm registers
        RegisterRow::alias("eax", "rax"),
        RegisterRow::alias("ecx", "rcx"),
        RegisterRow::alias("edx", "rdx"),
        RegisterRow::alias("ebx", "rbx"),
        RegisterRow::alias("esp", "rsp"),
        RegisterRow::alias("ebp", "rbp"),
        RegisterRow::alias("esi", "rsi"),
        RegisterRow::alias("edi", "rdi"),
        RegisterRow::alias("r8d", "r8"),
        RegisterRow::alias("r9d", "r9"),
        RegisterRow::alias("r10d", "r10"),
        RegisterRow::alias("r11d", "r11"),
        RegisterRow::alias("r12d", "r12"),
        RegisterRow::alias("r13d", "r13"),
        RegisterRow::alias("r14d", "r14"),
        RegisterRow::alias("r15d", "r15"),
        RegisterRow::alias("ymm0", "xmm0"),
        RegisterRow::alias("ymm1", "xmm1"),
        RegisterRow::alias("ymm2", "xmm2"),
        RegisterRow::alias("ymm3", "xmm3"),
        RegisterRow::alias("ymm4", "xmm4"),
        RegisterRow::alias("ymm5", "xmm5"),
        RegisterRow::alias("ymm6", "xmm6"),
        RegisterRow::alias("ymm7", "xmm7"),
        RegisterRow::alias("ymm8", "xmm8"),
        RegisterRow::alias("ymm9", "xmm9"),
        RegisterRow::alias("ymm10", "xmm10"),
        RegisterRow::alias("ymm11", "xmm11"),
        RegisterRow::alias("ymm12", "xmm12"),
        RegisterRow::alias("ymm13", "xmm13"),
        RegisterRow::alias("ymm14", "xmm14"),
        RegisterRow::alias("ymm15", "xmm15"),
        RegisterRow::alias("ymm16", "xmm16"),
        RegisterRow::alias("ymm17", "xmm17"),
        RegisterRow::alias("ymm18", "xmm18"),
        RegisterRow::alias("ymm19", "xmm19"),
        RegisterRow::alias("ymm20", "xmm20"),
        RegisterRow::alias("ymm21", "xmm21"),
        RegisterRow::alias("ymm22", "xmm22"),
        RegisterRow::alias("ymm23", "xmm23"),
        RegisterRow::alias("ymm24", "xmm24"),
        RegisterRow::alias("ymm25", "xmm25"),
        RegisterRow::alias("ymm26", "xmm26"),
        RegisterRow::alias("ymm27", "xmm27"),
        RegisterRow::alias("ymm28", "xmm28"),
        RegisterRow::alias("ymm29", "xmm29"),
        RegisterRow::alias("ymm30", "xmm30"),
        RegisterRow::alias("ymm31", "xmm31"),
        RegisterRow::alias("zmm0", "xmm0"),
        RegisterRow::alias("zmm1", "xmm1"),
        RegisterRow::alias("zmm2", "xmm2"),
        RegisterRow::alias("zmm3", "xmm3"),
        RegisterRow::alias("zmm4", "xmm4"),
        RegisterRow::alias("zmm5", "xmm5"),
        RegisterRow::alias("zmm6", "xmm6"),
        RegisterRow::alias("zmm7", "xmm7"),
        RegisterRow::alias("zmm8", "xmm8"),
        RegisterRow::alias("zmm9", "xmm9"),
        RegisterRow::alias("zmm10", "xmm10"),
        RegisterRow::alias("zmm11", "xmm11"),
        RegisterRow::alias("zmm12", "xmm12"),
        RegisterRow::alias("zmm13", "xmm13"),
        RegisterRow::alias("zmm14", "xmm14"),
        RegisterRow::alias("zmm15", "xmm15"),
        RegisterRow::alias("zmm16", "xmm16"),
        RegisterRow::alias("zmm17", "xmm17"),
        RegisterRow::alias("zmm18", "xmm18"),
        RegisterRow::alias("zmm19", "xmm19"),
        RegisterRow::alias("zmm20", "xmm20"),
        RegisterRow::alias("zmm21", "xmm21"),
        RegisterRow::alias("zmm22", "xmm22"),
        RegisterRow::alias("zmm23", "xmm23"),
        RegisterRow::alias("zmm24", "xmm24"),
        RegisterRow::alias("zmm25", "xmm25"),
        RegisterRow::alias("zmm26", "xmm26"),
        RegisterRow::alias("zmm27", "xmm27"),
        RegisterRow::alias("zmm28", "xmm28"),
        RegisterRow::alias("zmm29", "xmm29"),
        RegisterRow::alias("zmm30", "xmm30"),
        RegisterRow::alias("zmm31", "xmm31"),
    ];

    fn try_descriptor() -> Result<&'static DescriptorTable, DescriptorError> {
        static TABLE: DescriptorCell = DescriptorCell::new();
        TABLE.get::<Self>()
    }

    fn abi(operating_system: OperatingSystem) -> Option<&'static AbiTable> {
        match operating_system {
            OperatingSystem::Windows => Some(&WINDOWS_ABI),
            OperatingSystem::Linux | OperatingSystem::MacOs => Some(&SYSTEM_V_ABI),
        }
    }
}

/// The Microsoft x64 calling convention.
static WINDOWS_ABI: AbiTable = AbiTable {
    integer_arguments: &[
        Amd64::RCX, Amd64::RDX, Amd64::R8, Amd64::R9,
    ],
    float_arguments: &[
        Amd64::XMM0, Amd64::XMM1, Amd64::XMM2, Amd64::XMM3,
    ],
    integer_return: Amd64::RAX,
    float_return: Some(Amd64::XMM0),
    callee_saved: &[
        Amd64::RBX, Amd64::RBP, Amd64::RDI, Amd64::RSI, Amd64::R12, Amd64::R13, Amd64::R14, Amd64::R15,
        Amd64::XMM6, Amd64::XMM7, Amd64::XMM8, Amd64::XMM9, Amd64::XMM10, Amd64::XMM11, Amd64::XMM12, Amd64::XMM13,
        Amd64::XMM14, Amd64::XMM15,
    ],
    reserved: &[
        Amd64::RSP,
    ],
    return_buffer: ReturnBufferPolicy::Never,
    swift: None,
    managed_argument_order: ArgumentOrder::LeftToRight,
    unmanaged_argument_order: ArgumentOrder::LeftToRight,
};

/// The System V AMD64 calling convention, used by Linux and macOS.
static SYSTEM_V_ABI: AbiTable = AbiTable {
    integer_arguments: &[
        Amd64::RDI, Amd64::RSI, Amd64::RDX, Amd64::RCX, Amd64::R8, Amd64::R9,
    ],
    float_arguments: &[
        Amd64::XMM0, Amd64::XMM1, Amd64::XMM2, Amd64::XMM3, Amd64::XMM4, Amd64::XMM5, Amd64::XMM6, Amd64::XMM7,
    ],
    integer_return: Amd64::RAX,
    float_return: Some(Amd64::XMM0),
    callee_saved: &[
        Amd64::RBX, Amd64::RBP, Amd64::R12, Amd64::R13, Amd64::R14, Amd64::R15,
    ],
    reserved: &[
        Amd64::RSP,
    ],
    return_buffer: ReturnBufferPolicy::Never,
    swift: Some(SwiftRegisters {
        return_buffer: FixedReturnBuffer { register: Amd64::RAX, argument_slot: 6 },
        self_register: Amd64::R13,
        error_register: Amd64::R12,
    }),
    managed_argument_order: ArgumentOrder::LeftToRight,
    unmanaged_argument_order: ArgumentOrder::LeftToRight,
};
