// Copyright (C) 2025 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use pretty_assertions::assert_eq;
use regmodel::{
    AbiTable,
    Amd64,
    Architecture,
    ArchitectureKind,
    Arm,
    Arm64,
    DescriptorCell,
    DescriptorError,
    DescriptorTable,
    DoubleWord,
    KindRange,
    LoongArch64,
    OperatingSystem,
    RegisterId,
    RegisterKind,
    RegisterRow,
    RegisterSet,
    RiscV64,
    X86,
};
use rstest::rstest;

/// A made-up architecture with 96 registers, so that every kind has its own word boundary behavior:
/// integers and floats share the low word, masks live in the high word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
struct Wide;

const NAMES: [&str; 96] = [
    "r0", "r1", "r2", "r3", "r4", "r5", "r6", "r7", "r8", "r9", "r10", "r11", "r12", "r13", "r14", "r15",
    "r16", "r17", "r18", "r19", "r20", "r21", "r22", "r23", "r24", "r25", "r26", "r27", "r28", "r29", "r30", "r31",
    "f0", "f1", "f2", "f3", "f4", "f5", "f6", "f7", "f8", "f9", "f10", "f11", "f12", "f13", "f14", "f15",
    "f16", "f17", "f18", "f19", "f20", "f21", "f22", "f23", "f24", "f25", "f26", "f27", "f28", "f29", "f30", "f31",
    "m0", "m1", "m2", "m3", "m4", "m5", "m6", "m7", "m8", "m9", "m10", "m11", "m12", "m13", "m14", "m15",
    "m16", "m17", "m18", "m19", "m20", "m21", "m22", "m23", "m24", "m25", "m26", "m27", "m28", "m29", "m30", "m31",
];

const fn wide_rows() -> [RegisterRow; 96] {
    let mut rows = [RegisterRow::alias("", ""); 96];

    let mut index = 0;
    while index < 96 {
        let kind = match index / 32 {
            0 => RegisterKind::Integer,
            1 => RegisterKind::Float,
            _ => RegisterKind::Mask,
        };

        rows[index] = RegisterRow::register(NAMES[index], RegisterId::new(index as u8), kind, (index % 32) as u8);
        index += 1;
    }

    rows
}

const WIDE_ROWS: [RegisterRow; 96] = wide_rows();

impl Architecture for Wide {
    type Words = DoubleWord;

    const KIND: ArchitectureKind = ArchitectureKind::Arm64;
    const REGISTER_COUNT: usize = 96;

    const INTEGER_REGISTERS: KindRange = KindRange::new(RegisterId::new(0), RegisterId::new(31));
    const FLOAT_REGISTERS: KindRange = KindRange::new(RegisterId::new(32), RegisterId::new(63));
    const MASK_REGISTERS: Option<KindRange> = Some(KindRange::new(RegisterId::new(64), RegisterId::new(95)));

    const ROWS: &'static [RegisterRow] = &WIDE_ROWS;

    fn try_descriptor() -> Result<&'static DescriptorTable, DescriptorError> {
        static TABLE: DescriptorCell = DescriptorCell::new();
        TABLE.get::<Self>()
    }

    fn abi(operating_system: OperatingSystem) -> Option<&'static AbiTable> {
        _ = operating_system;
        None
    }
}

fn id(number: u8) -> RegisterId {
    RegisterId::new(number)
}

#[test]
fn wide_high_register() {
    let set = RegisterSet::<Wide>::from_register(id(70));
    assert_eq!(set.count(), 1);
    assert_eq!(set.first_member(), id(70));
    assert_eq!(set.low_word(), 0);
    assert_eq!(set.high_word(), 1 << 6);
    assert_eq!(set.to_string(), "{m6}");
}

#[test]
fn wide_all_and_complement() {
    let all = RegisterSet::<Wide>::all();
    assert_eq!(all.count(), 96);
    assert_eq!(all.high_word(), u32::MAX as u64);

    let set = RegisterSet::<Wide>::from_registers(&[id(0), id(63), id(95)]);
    assert_eq!((!set).count(), 93);
    assert!((set & !set).is_empty());
    assert_eq!(set | !set, all);
}

#[test]
fn wide_projection_per_kind() {
    let set = RegisterSet::<Wide>::from_registers(&[id(1), id(33), id(65), id(95)]);
    assert_eq!(set.project_to_kind(RegisterKind::Integer).bits(), 1 << 1);
    assert_eq!(set.project_to_kind(RegisterKind::Float).bits(), 1 << 33);
    assert_eq!(set.project_to_kind(RegisterKind::Mask).bits(), (1 << 1) | (1 << 31));
}

#[test]
fn sixty_four_registers_fit_in_one_word() {
    let set = RegisterSet::<LoongArch64>::from_registers(&[id(0), id(63)]);
    assert_eq!(set.count(), 2);
    assert_eq!(set.first_member(), id(0));
    assert_eq!(set.as_single_word().bits(), 1 | (1 << 63));
    assert_eq!(RegisterSet::<LoongArch64>::all().low_word(), u64::MAX);
}

#[test]
#[cfg(debug_assertions)]
#[should_panic]
fn sixty_four_registers_have_no_register_64() {
    let set = RegisterSet::<RiscV64>::all();
    _ = set.contains(id(64));
}

fn check_algebra<A: Architecture>(a: RegisterSet<A>, b: RegisterSet<A>, c: RegisterSet<A>) {
    assert_eq!(a | b, b | a);
    assert_eq!(a & b, b & a);
    assert_eq!((a | b) | c, a | (b | c));
    assert_eq!((a & b) & c, a & (b & c));

    assert_eq!(a & !a, RegisterSet::empty());
    assert_eq!(a | !a, RegisterSet::all());

    assert_eq!((a | b).count() + (a & b).count(), a.count() + b.count());
    assert_eq!(a ^ b, (a - b) | (b - a));
    assert!((a & b).is_subset(&a));
}

fn sample<A: Architecture>(numbers: &[u8]) -> RegisterSet<A> {
    numbers.iter()
        .map(|n| id(*n))
        .filter(|id| id.index() < A::REGISTER_COUNT)
        .collect()
}

#[rstest]
#[case(&[0, 3, 9], &[3, 4, 23], &[9, 23])]
#[case(&[], &[1], &[])]
#[case(&[0, 1, 2, 3, 4, 5, 6, 7], &[16, 17, 18], &[8])]
fn algebra_on_one_word(#[case] a: &[u8], #[case] b: &[u8], #[case] c: &[u8]) {
    check_algebra::<X86>(sample(a), sample(b), sample(c));
    check_algebra::<Arm>(sample(a), sample(b), sample(c));
    check_algebra::<RiscV64>(sample(a), sample(b), sample(c));
}

#[rstest]
#[case(&[0, 63, 64], &[64, 71], &[1, 70])]
#[case(&[5, 40, 75], &[5, 79], &[40, 41, 42])]
#[case(&[], &[], &[66])]
fn algebra_on_two_words(#[case] a: &[u8], #[case] b: &[u8], #[case] c: &[u8]) {
    check_algebra::<Amd64>(sample(a), sample(b), sample(c));
    check_algebra::<Arm64>(sample(a), sample(b), sample(c));
    check_algebra::<Wide>(sample(a), sample(b), sample(c));
}

#[rstest]
#[case(0, 1)]
#[case(31, 32)]
#[case(63, 64)]
#[case(64, 79)]
fn two_distinct_registers(#[case] first: u8, #[case] second: u8) {
    let set = RegisterSet::<Arm64>::from_register(id(first)) | RegisterSet::from_register(id(second));
    assert_eq!(set.count(), 2);
    assert_eq!(set.iter().collect::<Vec<_>>(), [id(first), id(second)]);
    assert!((0..80).map(id).filter(|r| set.contains(*r)).eq([id(first), id(second)]));
}
