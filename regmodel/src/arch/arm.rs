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

/// 32-bit ARM with VFP. The float registers are the 32 single-precision registers, and a double
/// occupies an aligned pair of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Arm;

impl Arm {
    pub const R0: RegisterId = RegisterId::new(0);
    pub const R1: RegisterId = RegisterId::new(1);
    pub const R2: RegisterId = RegisterId::new(2);
    pub const R3: RegisterId = RegisterId::new(3);
    pub const R4: RegisterId = RegisterId::new(4);
    pub const R5: RegisterId = RegisterId::new(5);
    pub const R6: RegisterId = RegisterId::new(6);
    pub const R7: RegisterId = RegisterId::new(7);
    pub const R8: RegisterId = RegisterId::new(8);
    pub const R9: RegisterId = RegisterId::new(9);
    pub const R10: RegisterId = RegisterId::new(10);
    pub const R11: RegisterId = RegisterId::new(11);
    pub const R12: RegisterId = RegisterId::new(12);
    pub const SP: RegisterId = RegisterId::new(13);
    pub const LR: RegisterId = RegisterId::new(14);
    pub const PC: RegisterId = RegisterId::new(15);

    pub const F0: RegisterId = RegisterId::new(16);
    pub const F1: RegisterId = RegisterId::new(17);
    pub const F2: RegisterId = RegisterId::new(18);
    pub const F3: RegisterId = RegisterId::new(19);
    pub const F4: RegisterId = RegisterId::new(20);
    pub const F5: RegisterId = RegisterId::new(21);
    pub const F6: RegisterId = RegisterId::new(22);
    pub const F7: RegisterId = RegisterId::new(23);
    pub const F8: RegisterId = RegisterId::new(24);
    pub const F9: RegisterId = RegisterId::new(25);
    pub const F10: RegisterId = RegisterId::new(26);
    pub const F11: RegisterId = RegisterId::new(27);
    pub const F12: RegisterId = RegisterId::new(28);
    pub const F13: RegisterId = RegisterId::new(29);
    pub const F14: RegisterId = RegisterId::new(30);
    pub const F15: RegisterId = RegisterId::new(31);
    pub const F16: RegisterId = RegisterId::new(32);
    pub const F17: RegisterId = RegisterId::new(33);
    pub const F18: RegisterId = RegisterId::new(34);
    pub const F19: RegisterId = RegisterId::new(35);
    pub const F20: RegisterId = RegisterId::new(36);
    pub const F21: RegisterId = RegisterId::new(37);
    pub const F22: RegisterId = RegisterId::new(38);
    pub const F23: RegisterId = RegisterId::new(39);
    pub const F24: RegisterId = RegisterId::new(40);
    pub const F25: RegisterId = RegisterId::new(41);
    pub const F26: RegisterId = RegisterId::new(42);
    pub const F27: RegisterId = RegisterId::new(43);
    pub const F28: RegisterId = RegisterId::new(44);
    pub const F29: RegisterId = RegisterId::new(45);
    pub const F30: RegisterId = RegisterId::new(46);
    pub const F31: RegisterId = RegisterId::new(47);
}

impl Architecture for Arm {
    type Words = SingleWord;

    const KIND: ArchitectureKind = ArchitectureKind::Arm;
    const REGISTER_COUNT: usize = 48;

    const INTEGER_REGISTERS: KindRange = KindRange::new(Self::R0, Self::PC);
    const FLOAT_REGISTERS: KindRange = KindRange::new(Self::F0, Self::F31);
    const MASK_REGISTERS: Option<KindRange> = None;
    const PAIRED_FLOAT_REGISTERS: bool = true;

    const ROWS: &'static [RegisterRow] = &[
        RegisterRow::register("r0", Self::R0, RegisterKind::Integer, 0),
        RegisterRow::register("r1", Self::R1, RegisterKind::Integer, 1),
        RegisterRow::register("r2", Self::R2, RegisterKind::Integer, 2),
        RegisterRow::register("r3", Self::R3, RegisterKind::Integer, 3),
        RegisterRow::register("r4", Self::R4, RegisterKind::Integer, 4),
        RegisterRow::register("r5", Self::R5, RegisterKind::Integer, 5),
        RegisterRow::register("r6", Self::R6, RegisterKind::Integer, 6),
        RegisterRow::register("r7", Self::R7, RegisterKind::Integer, 7),
        RegisterRow::register("r8", Self::R8, RegisterKind::Integer, 8),
        RegisterRow::register("r9", Self::R9, RegisterKind::Integer, 9),
        RegisterRow::register("r10", Self::R10, RegisterKind::Integer, 10),
        RegisterRow::register("r11", Self::R11, RegisterKind::Integer, 11),
        RegisterRow::register("r12", Self::R12, RegisterKind::Integer, 12),
        RegisterRow::register("sp", Self::SP, RegisterKind::Integer, 13),
        RegisterRow::register("lr", Self::LR, RegisterKind::Integer, 14),
        RegisterRow::register("pc", Self::PC, RegisterKind::Integer, 15),

        RegisterRow::register("f0", Self::F0, RegisterKind::Float, 0),
        RegisterRow::register("f1", Self::F1, RegisterKind::Float, 1),
        RegisterRow::register("f2", Self::F2, RegisterKind::Float, 2),
        RegisterRow::register("f3", Self::F3, RegisterKind::Float, 3),
        RegisterRow::register("f4", Self::F4, RegisterKind::Float, 4),
        RegisterRow::register("f5", Self::F5, RegisterKind::Float, 5),
        RegisterRow::register("f6", Self::F6, RegisterKind::Float, 6),
        RegisterRow::register("f7", Self::F7, RegisterKind::Float, 7),
        RegisterRow::register("f8", Self::F8, RegisterKind::Float, 8),
        RegisterRow::register("f9", Self::F9, RegisterKind::Float, 9),
        RegisterRow::register("f10", Self::F10, RegisterKind::Float, 10),
        RegisterRow::register("f11", Self::F11, RegisterKind::Float, 11),
        RegisterRow::register("f12", Self::F12, RegisterKind::Float, 12),
        RegisterRow::register("f13", Self::F13, RegisterKind::Float, 13),
        RegisterRow::register("f14", Self::F14, RegisterKind::Float, 14),
        RegisterRow::register("f15", Self::F15, RegisterKind::Float, 15),
        RegisterRow::register("f16", Self::F16, RegisterKind::Float, 16),
        RegisterRow::register("f17", Self::F17, RegisterKind::Float, 17),
        RegisterRow::register("f18", Self::F18, RegisterKind::Float, 18),
        RegisterRow::register("f19", Self::F19, RegisterKind::Float, 19),
        RegisterRow::register("f20", Self::F20, RegisterKind::Float, 20),
        RegisterRow::register("f21", Self::F21, RegisterKind::Float, 21),
        RegisterRow::register("f22", Self::F22, RegisterKind::Float, 22),
        RegisterRow::register("f23", Self::F23, RegisterKind::Float, 23),
        RegisterRow::register("f24", Self::F24, RegisterKind::Float, 24),
        RegisterRow::register("f25", Self::F25, RegisterKind::Float, 25),
        RegisterRow::register("f26", Self::F26, RegisterKind::Float, 26),
        RegisterRow::register("f27", Self::F27, RegisterKind::Float, 27),
        RegisterRow::register("f28", Self::F28, RegisterKind::Float, 28),
        RegisterRow::register("f29", Self::F29, RegisterKind::Float, 29),
        RegisterRow::register("f30", Self::F30, RegisterKind::Float, 30),
        RegisterRow::register("f31", Self::F31, RegisterKind::Float, 31),

        // Register numbers, and the VFP single (s) and double (d) names
        RegisterRow::alias("fp", "r11"),
        RegisterRow::alias("ip", "r12"),
        RegisterRow::alias("r13", "sp"),
        RegisterRow::alias("r14", "lr"),
        RegisterRow::alias("r15", "pc"),
        RegisterRow::alias("s0", "f0"),
        RegisterRow::alias("s1", "f1"),
        RegisterRow::alias("s2", "f2"),
        RegisterRow::alias("s3", "f3"),
        RegisterRow::alias("s4", "f4"),
        RegisterRow::alias("s5", "f5"),
        RegisterRow::alias("s6", "f6"),
        RegisterRow::alias("s7", "f7"),
        RegisterRow::alias("s8", "f8"),
        RegisterRow::alias("s9", "f9"),
        RegisterRow::alias("s10", "f10"),
        RegisterRow::alias("s11", "f11"),
        RegisterRow::alias("s12", "f12"),
        RegisterRow::alias("s13", "f13"),
        RegisterRow::alias("s14", "f14"),
        RegisterRow::alias("s15", "f15"),
        RegisterRow::alias("s16", "f16"),
        RegisterRow::alias("s17", "f17"),
        RegisterRow::alias("s18", "f18"),
        RegisterRow::alias("s19", "f19"),
        RegisterRow::alias("s20", "f20"),
        RegisterRow::alias("s21", "f21"),
        RegisterRow::alias("s22", "f22"),
        RegisterRow::alias("s23", "f23"),
        RegisterRow::alias("s24", "f24"),
        RegisterRow::alias("s25", "f25"),
        RegisterRow::alias("s26", "f26"),
        RegisterRow::alias("s27", "f27"),
        RegisterRow::alias("s28", "f28"),
        RegisterRow::alias("s29", "f29"),
        RegisterRow::alias("s30", "f30"),
        RegisterRow::alias("s31", "f31"),
        RegisterRow::alias("d0", "f0"),
        RegisterRow::alias("d1", "f2"),
        RegisterRow::alias("d2", "f4"),
        RegisterRow::alias("d3", "f6"),
        RegisterRow::alias("d4", "f8"),
        RegisterRow::alias("d5", "f10"),
        RegisterRow::alias("d6", "f12"),
        RegisterRow::alias("d7", "f14"),
        RegisterRow::alias("d8", "f16"),
        RegisterRow::alias("d9", "f18"),
        RegisterRow::alias("d10", "f20"),
        RegisterRow::alias("d11", "f22"),
        RegisterRow::alias("d12", "f24"),
        RegisterRow::alias("d13", "f26"),
        RegisterRow::alias("d14", "f28"),
        RegisterRow::alias("d15", "f30"),
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

/// The hard-float variant of the ARM procedure call standard.
static ABI: AbiTable = AbiTable {
    integer_arguments: &[
        Arm::R0, Arm::R1, Arm::R2, Arm::R3,
    ],
    float_arguments: &[
        Arm::F0, Arm::F1, Arm::F2, Arm::F3, Arm::F4, Arm::F5, Arm::F6, Arm::F7,
        Arm::F8, Arm::F9, Arm::F10, Arm::F11, Arm::F12, Arm::F13, Arm::F14, Arm::F15,
    ],
    integer_return: Arm::R0,
    float_return: Some(Arm::F0),
    callee_saved: &[
        Arm::R4, Arm::R5, Arm::R6, Arm::R7, Arm::R8, Arm::R9, Arm::R10, Arm::R11,
        Arm::F16, Arm::F17, Arm::F18, Arm::F19, Arm::F20, Arm::F21, Arm::F22, Arm::F23,
        Arm::F24, Arm::F25, Arm::F26, Arm::F27, Arm::F28, Arm::F29, Arm::F30, Arm::F31,
    ],
    reserved: &[
        Arm::SP, Arm::PC,
    ],
    return_buffer: ReturnBufferPolicy::Never,
    swift: None,
    managed_argument_order: ArgumentOrder::LeftToRight,
    unmanaged_argument_order: ArgumentOrder::LeftToRight,
};
