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

/// 64-bit LoongArch. Registers are named after their role in the calling convention, with the
/// numbered names as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LoongArch64;

impl LoongArch64 {
    pub const ZERO: RegisterId = RegisterId::new(0);
    pub const RA: RegisterId = RegisterId::new(1);
    pub const TP: RegisterId = RegisterId::new(2);
    pub const SP: RegisterId = RegisterId::new(3);
    pub const A0: RegisterId = RegisterId::new(4);
    pub const A1: RegisterId = RegisterId::new(5);
    pub const A2: RegisterId = RegisterId::new(6);
    pub const A3: RegisterId = RegisterId::new(7);
    pub const A4: RegisterId = RegisterId::new(8);
    pub const A5: RegisterId = RegisterId::new(9);
    pub const A6: RegisterId = RegisterId::new(10);
    pub const A7: RegisterId = RegisterId::new(11);
    pub const T0: RegisterId = RegisterId::new(12);
    pub const T1: RegisterId = RegisterId::new(13);
    pub const T2: RegisterId = RegisterId::new(14);
    pub const T3: RegisterId = RegisterId::new(15);
    pub const T4: RegisterId = RegisterId::new(16);
    pub const T5: RegisterId = RegisterId::new(17);
    pub const T6: RegisterId = RegisterId::new(18);
    pub const T7: RegisterId = RegisterId::new(19);
    pub const T8: RegisterId = RegisterId::new(20);
    pub const U0: RegisterId = RegisterId::new(21);
    pub const FP: RegisterId = RegisterId::new(22);
    pub const S0: RegisterId = RegisterId::new(23);
    pub const S1: RegisterId = RegisterId::new(24);
    pub const S2: RegisterId = RegisterId::new(25);
    pub const S3: RegisterId = RegisterId::new(26);
    pub const S4: RegisterId = RegisterId::new(27);
    pub const S5: RegisterId = RegisterId::new(28);
    pub const S6: RegisterId = RegisterId::new(29);
    pub const S7: RegisterId = RegisterId::new(30);
    pub const S8: RegisterId = RegisterId::new(31);

    pub const FA0: RegisterId = RegisterId::new(32);
    pub const FA1: RegisterId = RegisterId::new(33);
    pub const FA2: RegisterId = RegisterId::new(34);
    pub const FA3: RegisterId = RegisterId::new(35);
    pub const FA4: RegisterId = RegisterId::new(36);
    pub const FA5: RegisterId = RegisterId::new(37);
    pub const FA6: RegisterId = RegisterId::new(38);
    pub const FA7: RegisterId = RegisterId::new(39);
    pub const FT0: RegisterId = RegisterId::new(40);
    pub const FT1: RegisterId = RegisterId::new(41);
    pub const FT2: RegisterId = RegisterId::new(42);
    pub const FT3: RegisterId = RegisterId::new(43);
    pub const FT4: RegisterId = RegisterId::new(44);
    pub const FT5: RegisterId = RegisterId::new(45);
    pub const FT6: RegisterId = RegisterId::new(46);
    pub const FT7: RegisterId = RegisterId::new(47);
    pub const FT8: RegisterId = RegisterId::new(48);
    pub const FT9: RegisterId = RegisterId::new(49);
    pub const FT10: RegisterId = RegisterId::new(50);
    pub const FT11: RegisterId = RegisterId::new(51);
    pub const FT12: RegisterId = RegisterId::new(52);
    pub const FT13: RegisterId = RegisterId::new(53);
    pub const FT14: RegisterId = RegisterId::new(54);
    pub const FT15: RegisterId = RegisterId::new(55);
    pub const FS0: RegisterId = RegisterId::new(56);
    pub const FS1: RegisterId = RegisterId::new(57);
    pub const FS2: RegisterId = RegisterId::new(58);
    pub const FS3: RegisterId = RegisterId::new(59);
    pub const FS4: RegisterId = RegisterId::new(60);
    pub const FS5: RegisterId = RegisterId::new(61);
    pub const FS6: RegisterId = RegisterId::new(62);
    pub const FS7: RegisterId = RegisterId::new(63);
}

impl Architecture for LoongArch64 {
    type Words = SingleWord;

    const KIND: ArchitectureKind = ArchitectureKind::LoongArch64;
    const REGISTER_COUNT: usize = 64;

    const INTEGER_REGISTERS: KindRange = KindRange::new(Self::ZERO, Self::S8);
    const FLOAT_REGISTERS: KindRange = KindRange::new(Self::FA0, Self::FS7);
    const MASK_REGISTERS: Option<KindRange> = None;

    const ROWS: &'static [RegisterRow] = &[
        RegisterRow::register("zero", Self::ZERO, RegisterKind::Integer, 0),
        RegisterRow::register("ra", Self::RA, RegisterKind::Integer, 1),
        RegisterRow::register("tp", Self::TP, RegisterKind::Integer, 2),
        RegisterRow::register("sp", Self::SP, RegisterKind::Integer, 3),
        RegisterRow::register("a0", Self::A0, RegisterKind::Integer, 4),
        RegisterRow::register("a1", Self::A1, RegisterKind::Integer, 5),
        RegisterRow::register("a2", Self::A2, RegisterKind::Integer, 6),
        RegisterRow::register("a3", Self::A3, RegisterKind::Integer, 7),
        RegisterRow::register("a4", Self::A4, RegisterKind::Integer, 8),
        RegisterRow::register("a5", Self::A5, RegisterKind::Integer, 9),
        RegisterRow::register("a6", Self::A6, RegisterKind::Integer, 10),
        RegisterRow::register("a7", Self::A7, RegisterKind::Integer, 11),
        RegisterRow::register("t0", Self::T0, RegisterKind::Integer, 12),
        RegisterRow::register("t1", Self::T1, RegisterKind::Integer, 13),
        RegisterRow::register("t2", Self::T2, RegisterKind::Integer, 14),
        RegisterRow::register("t3", Self::T3, RegisterKind::Integer, 15),
        RegisterRow::register("t4", Self::T4, RegisterKind::Integer, 16),
        RegisterRow::register("t5", Self::T5, RegisterKind::Integer, 17),
        RegisterRow::register("t6", Self::T6, RegisterKind::Integer, 18),
        RegisterRow::register("t7", Self::T7, RegisterKind::Integer, 19),
        RegisterRow::register("t8", Self::T8, RegisterKind::Integer, 20),
        RegisterRow::register("u0", Self::U0, RegisterKind::Integer, 21),
        RegisterRow::register("fp", Self::FP, RegisterKind::Integer, 22),
        RegisterRow::register("s0", Self::S0, RegisterKind::Integer, 23),
        RegisterRow::register("s1", Self::S1, RegisterKind::Integer, 24),
        RegisterRow::register("s2", Self::S2, RegisterKind::Integer, 25),
        RegisterRow::register("s3", Self::S3, RegisterKind::Integer, 26),
        RegisterRow::register("s4", Self::S4, RegisterKind::Integer, 27),
        RegisterRow::register("s5", Self::S5, RegisterKind::Integer, 28),
        RegisterRow::register("s6", Self::S6, RegisterKind::Integer, 29),
        RegisterRow::register("s7", Self::S7, RegisterKind::Integer, 30),
        RegisterRow::register("s8", Self::S8, RegisterKind::Integer, 31),

        RegisterRow::register("fa0", Self::FA0, RegisterKind::Float, 0),
        RegisterRow::register("fa1", Self::FA1, RegisterKind::Float, 1),
        RegisterRow::register("fa2", Self::FA2, RegisterKind::Float, 2),
        RegisterRow::register("fa3", Self::FA3, RegisterKind::Float, 3),
        RegisterRow::register("fa4", Self::FA4, RegisterKind::Float, 4),
        RegisterRow::register("fa5", Self::FA5, RegisterKind::Float, 5),
        RegisterRow::register("fa6", Self::FA6, RegisterKind::Float, 6),
        RegisterRow::register("fa7", Self::FA7, RegisterKind::Float, 7),
        RegisterRow::register("ft0", Self::FT0, RegisterKind::Float, 8),
        RegisterRow::register("ft1", Self::FT1, RegisterKind::Float, 9),
        RegisterRow::register("ft2", Self::FT2, RegisterKind::Float, 10),
        RegisterRow::register("ft3", Self::FT3, RegisterKind::Float, 11),
        RegisterRow::register("ft4", Self::FT4, RegisterKind::Float, 12),
        RegisterRow::register("ft5", Self::FT5, RegisterKind::Float, 13),
        RegisterRow::register("ft6", Self::FT6, RegisterKind::Float, 14),
        RegisterRow::register("ft7", Self::FT7, RegisterKind::Float, 15),
        RegisterRow::register("ft8", Self::FT8, RegisterKind::Float, 16),
        RegisterRow::register("ft9", Self::FT9, RegisterKind::Float, 17),
        RegisterRow::register("ft10", Self::FT10, RegisterKind::Float, 18),
        RegisterRow::register("ft11", Self::FT11, RegisterKind::Float, 19),
        RegisterRow::register("ft12", Self::FT12, RegisterKind::Float, 20),
        RegisterRow::register("ft13", Self::FT13, RegisterKind::Float, 21),
        RegisterRow::register("ft14", Self::FT14, RegisterKind::Float, 22),
        RegisterRow::register("ft15", Self::FT15, RegisterKind::Float, 23),
        RegisterRow::register("fs0", Self::FS0, RegisterKind::Float, 24),
        RegisterRow::register("fs1", Self::FS1, RegisterKind::Float, 25),
        RegisterRow::register("fs2", Self::FS2, RegisterKind::Float, 26),
        RegisterRow::register("fs3", Self::FS3, RegisterKind::Float, 27),
        RegisterRow::register("fs4", Self::FS4, RegisterKind::Float, 28),
        RegisterRow::register("fs5", Self::FS5, RegisterKind::Float, 29),
        RegisterRow::register("fs6", Self::FS6, RegisterKind::Float, 30),
        RegisterRow::register("fs7", Self::FS7, RegisterKind::Float, 31),

        RegisterRow::alias("r0", "zero"),
        RegisterRow::alias("r1", "ra"),
        RegisterRow::alias("r2", "tp"),
        RegisterRow::alias("r3", "sp"),
        RegisterRow::alias("r4", "a0"),
        RegisterRow::alias("r5", "a1"),
        RegisterRow::alias("r6", "a2"),
        RegisterRow::alias("r7", "a3"),
        RegisterRow::alias("r8", "a4"),
        RegisterRow::alias("r9", "a5"),
        RegisterRow::alias("r10", "a6"),
        RegisterRow::alias("r11", "a7"),
        RegisterRow::alias("r12", "t0"),
        RegisterRow::alias("r13", "t1"),
        RegisterRow::alias("r14", "t2"),
        RegisterRow::alias("r15", "t3"),
        RegisterRow::alias("r16", "t4"),
        RegisterRow::alias("r17", "t5"),
        RegisterRow::alias("r18", "t6"),
        RegisterRow::alias("r19", "t7"),
        RegisterRow::alias("r20", "t8"),
        RegisterRow::alias("r21", "u0"),
        RegisterRow::alias("r22", "fp"),
        RegisterRow::alias("r23", "s0"),
        RegisterRow::alias("r24", "s1"),
        RegisterRow::alias("r25", "s2"),
        RegisterRow::alias("r26", "s3"),
        RegisterRow::alias("r27", "s4"),
        RegisterRow::alias("r28", "s5"),
        RegisterRow::alias("r29", "s6"),
        RegisterRow::alias("r30", "s7"),
        RegisterRow::alias("r31", "s8"),
        RegisterRow::alias("s9", "fp"),
        RegisterRow::alias("f0", "fa0"),
        RegisterRow::alias("f1", "fa1"),
        RegisterRow::alias("f2", "fa2"),
        RegisterRow::alias("f3", "fa3"),
        RegisterRow::alias("f4", "fa4"),
        RegisterRow::alias("f5", "fa5"),
        RegisterRow::alias("f6", "fa6"),
        RegisterRow::alias("f7", "fa7"),
        RegisterRow::alias("f8", "ft0"),
        RegisterRow::alias("f9", "ft1"),
        RegisterRow::alias("f10", "ft2"),
        RegisterRow::alias("f11", "ft3"),
        RegisterRow::alias("f12", "ft4"),
        RegisterRow::alias("f13", "ft5"),
        RegisterRow::alias("f14", "ft6"),
        RegisterRow::alias("f15", "ft7"),
        RegisterRow::alias("f16", "ft8"),
        RegisterRow::alias("f17", "ft9"),
        RegisterRow::alias("f18", "ft10"),
        RegisterRow::alias("f19", "ft11"),
        RegisterRow::alias("f20", "ft12"),
        RegisterRow::alias("f21", "ft13"),
        RegisterRow::alias("f22", "ft14"),
        RegisterRow::alias("f23", "ft15"),
        RegisterRow::alias("f24", "fs0"),
        RegisterRow::alias("f25", "fs1"),
        RegisterRow::alias("f26", "fs2"),
        RegisterRow::alias("f27", "fs3"),
        RegisterRow::alias("f28", "fs4"),
        RegisterRow::alias("f29", "fs5"),
        RegisterRow::alias("f30", "fs6"),
        RegisterRow::alias("f31", "fs7"),
    ];

    fn try_descriptor() -> Result<&'static DescriptorTable, DescriptorError> {
        static TABLE: DescriptorCell = DescriptorCell::new();
        TABLE.get::<Self>()
    }

    fn abi(operating_system: OperatingSystem) -> Option<&'static AbiTable> {
        match operating_system {
            OperatingSystem::Linux => Some(&ABI),
            OperatingSystem::Windows | OperatingSystem::MacOs => None,
        }
    }
}

static ABI: AbiTable = AbiTable {
    integer_arguments: &[
        LoongArch64::A0, LoongArch64::A1, LoongArch64::A2, LoongArch64::A3, LoongArch64::A4, LoongArch64::A5, LoongArch64::A6, LoongArch64::A7,
    ],
    float_arguments: &[
        LoongArch64::FA0, LoongArch64::FA1, LoongArch64::FA2, LoongArch64::FA3, LoongArch64::FA4, LoongArch64::FA5, LoongArch64::FA6, LoongArch64::FA7,
    ],
    integer_return: LoongArch64::A0,
    float_return: Some(LoongArch64::FA0),
    callee_saved: &[
        LoongArch64::S0, LoongArch64::S1, LoongArch64::S2, LoongArch64::S3, LoongArch64::S4, LoongArch64::S5, LoongArch64::S6, LoongArch64::S7,
        LoongArch64::S8, LoongArch64::FS0, LoongArch64::FS1, LoongArch64::FS2, LoongArch64::FS3, LoongArch64::FS4, LoongArch64::FS5, LoongArch64::FS6,
        LoongArch64::FS7,
    ],
    reserved: &[
        LoongArch64::ZERO, LoongArch64::TP, LoongArch64::SP, LoongArch64::U0, LoongArch64::FP,
    ],
    return_buffer: ReturnBufferPolicy::Never,
    swift: None,
    managed_argument_order: ArgumentOrder::LeftToRight,
    unmanaged_argument_order: ArgumentOrder::LeftToRight,
};
