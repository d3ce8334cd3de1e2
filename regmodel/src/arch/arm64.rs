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

/// AArch64 with SVE predicate registers. The stack pointer shares its encoding with the zero register
/// and is not allocatable, so it has no entry here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Arm64;

impl Arm64 {
    pub const X0: RegisterId = RegisterId::new(0);
    pub const X1: RegisterId = RegisterId::new(1);
    pub const X2: RegisterId = RegisterId::new(2);
    pub const X3: RegisterId = RegisterId::new(3);
    pub const X4: RegisterId = RegisterId::new(4);
    pub const X5: RegisterId = RegisterId::new(5);
    pub const X6: RegisterId = RegisterId::new(6);
    pub const X7: RegisterId = RegisterId::new(7);
    pub const X8: RegisterId = RegisterId::new(8);
    pub const X9: RegisterId = RegisterId::new(9);
    pub const X10: RegisterId = RegisterId::new(10);
    pub const X11: RegisterId = RegisterId::new(11);
    pub const X12: RegisterId = RegisterId::new(12);
    pub const X13: RegisterId = RegisterId::new(13);
    pub const X14: RegisterId = RegisterId::new(14);
    pub const X15: RegisterId = RegisterId::new(15);
    pub const X16: RegisterId = RegisterId::new(16);
    pub const X17: RegisterId = RegisterId::new(17);
    pub const X18: RegisterId = RegisterId::new(18);
    pub const X19: RegisterId = RegisterId::new(19);
    pub const X20: RegisterId = RegisterId::new(20);
    pub const X21: RegisterId = RegisterId::new(21);
    pub const X22: RegisterId = RegisterId::new(22);
    pub const X23: RegisterId = RegisterId::new(23);
    pub const X24: RegisterId = RegisterId::new(24);
    pub const X25: RegisterId = RegisterId::new(25);
    pub const X26: RegisterId = RegisterId::new(26);
    pub const X27: RegisterId = RegisterId::new(27);
    pub const X28: RegisterId = RegisterId::new(28);
    pub const FP: RegisterId = RegisterId::new(29);
    pub const LR: RegisterId = RegisterId::new(30);
    pub const ZR: RegisterId = RegisterId::new(31);

    pub const V0: RegisterId = RegisterId::new(32);
    pub const V1: RegisterId = RegisterId::new(33);
    pub const V2: RegisterId = RegisterId::new(34);
    pub const V3: RegisterId = RegisterId::new(35);
    pub const V4: RegisterId = RegisterId::new(36);
    pub const V5: RegisterId = RegisterId::new(37);
    pub const V6: RegisterId = RegisterId::new(38);
    pub const V7: RegisterId = RegisterId::new(39);
    pub const V8: RegisterId = RegisterId::new(40);
    pub const V9: RegisterId = RegisterId::new(41);
    pub const V10: RegisterId = RegisterId::new(42);
    pub const V11: RegisterId = RegisterId::new(43);
    pub const V12: RegisterId = RegisterId::new(44);
    pub const V13: RegisterId = RegisterId::new(45);
    pub const V14: RegisterId = RegisterId::new(46);
    pub const V15: RegisterId = RegisterId::new(47);
    pub const V16: RegisterId = RegisterId::new(48);
    pub const V17: RegisterId = RegisterId::new(49);
    pub const V18: RegisterId = RegisterId::new(50);
    pub const V19: RegisterId = RegisterId::new(51);
    pub const V20: RegisterId = RegisterId::new(52);
    pub const V21: RegisterId = RegisterId::new(53);
    pub const V22: RegisterId = RegisterId::new(54);
    pub const V23: RegisterId = RegisterId::new(55);
    pub const V24: RegisterId = RegisterId::new(56);
    pub const V25: RegisterId = RegisterId::new(57);
    pub const V26: RegisterId = RegisterId::new(58);
    pub const V27: RegisterId = RegisterId::new(59);
    pub const V28: RegisterId = RegisterId::new(60);
    pub const V29: RegisterId = RegisterId::new(61);
    pub const V30: RegisterId = RegisterId::new(62);
    pub const V31: RegisterId = RegisterId::new(63);

    pub const P0: RegisterId = RegisterId::new(64);
    pub const P1: RegisterId = RegisterId::new(65);
    pub const P2: RegisterId = RegisterId::new(66);
    pub const P3: RegisterId = RegisterId::new(67);
    pub const P4: RegisterId = RegisterId::new(68);
    pub const P5: RegisterId = RegisterId::new(69);
    pub const P6: RegisterId = RegisterId::new(70);
    pub const P7: RegisterId = RegisterId::new(71);
    pub const P8: RegisterId = RegisterId::new(72);
    pub const P9: RegisterId = RegisterId::new(73);
    pub const P10: RegisterId = RegisterId::new(74);
    pub const P11: RegisterId = RegisterId::new(75);
    pub const P12: RegisterId = RegisterId::new(76);
    pub const P13: RegisterId = RegisterId::new(77);
    pub const P14: RegisterId = RegisterId::new(78);
    pub const P15: RegisterId = RegisterId::new(79);
}

impl Architecture for Arm64 {
    type Words = DoubleWord;

    const KIND: ArchitectureKind = ArchitectureKind::Arm64;
    const REGISTER_COUNT: usize = 80;

    const INTEGER_REGISTERS: KindRange = KindRange::new(Self::X0, Self::ZR);
    const FLOAT_REGISTERS: KindRange = KindRange::new(Self::V0, Self::V31);
    const MASK_REGISTERS: Option<KindRange> = Some(KindRange::new(Self::P0, Self::P15));

    const ROWS: &'static [RegisterRow] = &[
        RegisterRow::register("x0", Self::X0, RegisterKind::Integer, 0),
        RegisterRow::register("x1", Self::X1, RegisterKind::Integer, 1),
        RegisterRow::register("x2", Self::X2, RegisterKind::Integer, 2),
        RegisterRow::register("x3", Self::X3, RegisterKind::Integer, 3),
        RegisterRow::register("x4", Self::X4, RegisterKind::Integer, 4),
        RegisterRow::register("x5", Self::X5, RegisterKind::Integer, 5),
        RegisterRow::register("x6", Self::X6, RegisterKind::Integer, 6),
        RegisterRow::register("x7", Self::X7, RegisterKind::Integer, 7),
        RegisterRow::register("x8", Self::X8, RegisterKind::Integer, 8),
        RegisterRow::register("x9", Self::X9, RegisterKind::Integer, 9),
        RegisterRow::register("x10", Self::X10, RegisterKind::Integer, 10),
        RegisterRow::register("x11", Self::X11, RegisterKind::Integer, 11),
        RegisterRow::register("x12", Self::X12, RegisterKind::Integer, 12),
        RegisterRow::register("x13", Self::X13, RegisterKind::Integer, 13),
        RegisterRow::register("x14", Self::X14, RegisterKind::Integer, 14),
        RegisterRow::register("x15", Self::X15, RegisterKind::Integer, 15),
        RegisterRow::register("x16", Self::X16, RegisterKind::Integer, 16),
        RegisterRow::register("x17", Self::X17, RegisterKind::Integer, 17),
        RegisterRow::register("x18", Self::X18, RegisterKind::Integer, 18),
        RegisterRow::register("x19", Self::X19, RegisterKind::Integer, 19),
        RegisterRow::register("x20", Self::X20, RegisterKind::Integer, 20),
        RegisterRow::register("x21", Self::X21, RegisterKind::Integer, 21),
        RegisterRow::register("x22", Self::X22, RegisterKind::Integer, 22),
        RegisterRow::register("x23", Self::X23, RegisterKind::Integer, 23),
        RegisterRow::register("x24", Self::X24, RegisterKind::Integer, 24),
        RegisterRow::register("x25", Self::X25, RegisterKind::Integer, 25),
        RegisterRow::register("x26", Self::X26, RegisterKind::Integer, 26),
        RegisterRow::register("x27", Self::X27, RegisterKind::Integer, 27),
        RegisterRow::register("x28", Self::X28, RegisterKind::Integer, 28),
        RegisterRow::register("fp", Self::FP, RegisterKind::Integer, 29),
        RegisterRow::register("lr", Self::LR, RegisterKind::Integer, 30),
        RegisterRow::register("zr", Self::ZR, RegisterKind::Integer, 31),

        RegisterRow::register("v0", Self::V0, RegisterKind::Float, 0),
        RegisterRow::register("v1", Self::V1, RegisterKind::Float, 1),
        RegisterRow::register("v2", Self::V2, RegisterKind::Float, 2),
        RegisterRow::register("v3", Self::V3, RegisterKind::Float, 3),
        RegisterRow::register("v4", Self::V4, RegisterKind::Float, 4),
        RegisterRow::register("v5", Self::V5, RegisterKind::Float, 5),
        RegisterRow::register("v6", Self::V6, RegisterKind::Float, 6),
        RegisterRow::register("v7", Self::V7, RegisterKind::Float, 7),
        RegisterRow::register("v8", Self::V8, RegisterKind::Float, 8),
        RegisterRow::register("v9", Self::V9, RegisterKind::Float, 9),
        RegisterRow::register("v10", Self::V10, RegisterKind::Float, 10),
        RegisterRow::register("v11", Self::V11, RegisterKind::Float, 11),
        RegisterRow::register("v12", Self::V12, RegisterKind::Float, 12),
        RegisterRow::register("v13", Self::V13, RegisterKind::Float, 13),
        RegisterRow::register("v14", Self::V14, RegisterKind::Float, 14),
        RegisterRow::register("v15", Self::V15, RegisterKind::Float, 15),
        RegisterRow::register("v16", Self::V16, RegisterKind::Float, 16),
        RegisterRow::register("v17", Self::V17, RegisterKind::Float, 17),
        RegisterRow::register("v18", Self::V18, RegisterKind::Float, 18),
        RegisterRow::register("v19", Self::V19, RegisterKind::Float, 19),
        RegisterRow::register("v20", Self::V20, RegisterKind::Float, 20),
        RegisterRow::register("v21", Self::V21, RegisterKind::Float, 21),
        RegisterRow::register("v22", Self::V22, RegisterKind::Float, 22),
        RegisterRow::register("v23", Self::V23, RegisterKind::Float, 23),
        RegisterRow::register("v24", Self::V24, RegisterKind::Float, 24),
        RegisterRow::register("v25", Self::V25, RegisterKind::Float, 25),
        RegisterRow::register("v26", Self::V26, RegisterKind::Float, 26),
        RegisterRow::register("v27", Self::V27, RegisterKind::Float, 27),
        RegisterRow::register("v28", Self::V28, RegisterKind::Float, 28),
        RegisterRow::register("v29", Self::V29, RegisterKind::Float, 29),
        RegisterRow::register("v30", Self::V30, RegisterKind::Float, 30),
        RegisterRow::register("v31", Self::V31, RegisterKind::Float, 31),

        RegisterRow::register("p0", Self::P0, RegisterKind::Mask, 0),
        RegisterRow::register("p1", Self::P1, RegisterKind::Mask, 1),
        RegisterRow::register("p2", Self::P2, RegisterKind::Mask, 2),
        RegisterRow::register("p3", Self::P3, RegisterKind::Mask, 3),
        RegisterRow::register("p4", Self::P4, RegisterKind::Mask, 4),
        RegisterRow::register("p5", Self::P5, RegisterKind::Mask, 5),
        RegisterRow::register("p6", Self::P6, RegisterKind::Mask, 6),
        RegisterRow::register("p7", Self::P7, RegisterKind::Mask, 7),
        RegisterRow::register("p8", Self::P8, RegisterKind::Mask, 8),
        RegisterRow::register("p9", Self::P9, RegisterKind::Mask, 9),
        RegisterRow::register("p10", Self::P10, RegisterKind::Mask, 10),
        RegisterRow::register("p11", Self::P11, RegisterKind::Mask, 11),
        RegisterRow::register("p12", Self::P12, RegisterKind::Mask, 12),
        RegisterRow::register("p13", Self::P13, RegisterKind::Mask, 13),
        RegisterRow::register("p14", Self::P14, RegisterKind::Mask, 14),
        RegisterRow::register("p15", Self::P15, RegisterKind::Mask, 15),

        // Numbered names of the special registers, and the 128-bit vector names
        RegisterRow::alias("x29", "fp"),
        RegisterRow::alias("x30", "lr"),
        RegisterRow::alias("xzr", "zr"),
        RegisterRow::alias("ip0", "x16"),
        RegisterRow::alias("ip1", "x17"),
        RegisterRow::alias("q0", "v0"),
        RegisterRow::alias("q1", "v1"),
        RegisterRow::alias("q2", "v2"),
        RegisterRow::alias("q3", "v3"),
        RegisterRow::alias("q4", "v4"),
        RegisterRow::alias("q5", "v5"),
        RegisterRow::alias("q6", "v6"),
        RegisterRow::alias("q7", "v7"),
        RegisterRow::alias("q8", "v8"),
        RegisterRow::alias("q9", "v9"),
        RegisterRow::alias("q10", "v10"),
        RegisterRow::alias("q11", "v11"),
        RegisterRow::alias("q12", "v12"),
        RegisterRow::alias("q13", "v13"),
        RegisterRow::alias("q14", "v14"),
        RegisterRow::alias("q15", "v15"),
        RegisterRow::alias("q16", "v16"),
        RegisterRow::alias("q17", "v17"),
        RegisterRow::alias("q18", "v18"),
        RegisterRow::alias("q19", "v19"),
        RegisterRow::alias("q20", "v20"),
        RegisterRow::alias("q21", "v21"),
        RegisterRow::alias("q22", "v22"),
        RegisterRow::alias("q23", "v23"),
        RegisterRow::alias("q24", "v24"),
        RegisterRow::alias("q25", "v25"),
        RegisterRow::alias("q26", "v26"),
        RegisterRow::alias("q27", "v27"),
        RegisterRow::alias("q28", "v28"),
        RegisterRow::alias("q29", "v29"),
        RegisterRow::alias("q30", "v30"),
        RegisterRow::alias("q31", "v31"),
    ];

    fn try_descriptor() -> Result<&'static DescriptorTable, DescriptorError> {
        static TABLE: DescriptorCell = DescriptorCell::new();
        TABLE.get::<Self>()
    }

    fn abi(operating_system: OperatingSystem) -> Option<&'static AbiTable> {
        match operating_system {
            OperatingSystem::Windows => Some(&WINDOWS_ABI),
            OperatingSystem::Linux | OperatingSystem::MacOs => Some(&AAPCS_ABI),
        }
    }
}

const RETURN_BUFFER: FixedReturnBuffer = FixedReturnBuffer {
    register: Arm64::X8,
    argument_slot: 8,
};

static AAPCS_ABI: AbiTable = AbiTable {
    integer_arguments: &[
        Arm64::X0, Arm64::X1, Arm64::X2, Arm64::X3, Arm64::X4, Arm64::X5, Arm64::X6, Arm64::X7,
    ],
    float_arguments: &[
        Arm64::V0, Arm64::V1, Arm64::V2, Arm64::V3, Arm64::V4, Arm64::V5, Arm64::V6, Arm64::V7,
    ],
    integer_return: Arm64::X0,
    float_return: Some(Arm64::V0),
    callee_saved: &[
        Arm64::X19, Arm64::X20, Arm64::X21, Arm64::X22, Arm64::X23, Arm64::X24, Arm64::X25, Arm64::X26,
        Arm64::X27, Arm64::X28, Arm64::V8, Arm64::V9, Arm64::V10, Arm64::V11, Arm64::V12, Arm64::V13,
        Arm64::V14, Arm64::V15,
    ],
    reserved: &[
        Arm64::X18, Arm64::FP, Arm64::ZR,
    ],
    return_buffer: ReturnBufferPolicy::Always(RETURN_BUFFER),
    swift: Some(SwiftRegisters {
        return_buffer: RETURN_BUFFER,
        self_register: Arm64::X20,
        error_register: Arm64::X21,
    }),
    managed_argument_order: ArgumentOrder::LeftToRight,
    unmanaged_argument_order: ArgumentOrder::LeftToRight,
};

/// Instance methods receive their return buffer as an ordinary argument after `this`.
static WINDOWS_ABI: AbiTable = AbiTable {
    integer_arguments: &[
        Arm64::X0, Arm64::X1, Arm64::X2, Arm64::X3, Arm64::X4, Arm64::X5, Arm64::X6, Arm64::X7,
    ],
    float_arguments: &[
        Arm64::V0, Arm64::V1, Arm64::V2, Arm64::V3, Arm64::V4, Arm64::V5, Arm64::V6, Arm64::V7,
    ],
    integer_return: Arm64::X0,
    float_return: Some(Arm64::V0),
    callee_saved: &[
        Arm64::X19, Arm64::X20, Arm64::X21, Arm64::X22, Arm64::X23, Arm64::X24, Arm64::X25, Arm64::X26,
        Arm64::X27, Arm64::X28, Arm64::V8, Arm64::V9, Arm64::V10, Arm64::V11, Arm64::V12, Arm64::V13,
        Arm64::V14, Arm64::V15,
    ],
    reserved: &[
        Arm64::X18, Arm64::FP, Arm64::ZR,
    ],
    return_buffer: ReturnBufferPolicy::ExceptInstanceMethods(RETURN_BUFFER),
    swift: None,
    managed_argument_order: ArgumentOrder::LeftToRight,
    unmanaged_argument_order: ArgumentOrder::LeftToRight,
};
