// Copyright (C) 2025 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use crate::RegisterKind;

/// The machine-level type of a value that has to be placed in a register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(strum::AsRefStr, strum::Display, strum::EnumIter, strum::EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum ValueType {
    Byte,
    Short,
    Int,
    Long,

    /// A pointer-sized reference.
    Ref,

    Float,
    Double,
    Simd8,
    Simd16,
    Simd32,
    Simd64,

    Mask,
}

impl ValueType {
    #[must_use]
    pub const fn size(&self) -> usize {
        match self {
            Self::Byte => 1,
            Self::Short => 2,
            Self::Int => 4,
            Self::Long => 8,
            Self::Ref => 8,
            Self::Float => 4,
            Self::Double => 8,
            Self::Simd8 => 8,
            Self::Simd16 => 16,
            Self::Simd32 => 32,
            Self::Simd64 => 64,
            Self::Mask => 8,
        }
    }

    #[must_use]
    pub const fn register_kind(&self) -> RegisterKind {
        match self {
            Self::Byte | Self::Short | Self::Int | Self::Long | Self::Ref => RegisterKind::Integer,
            Self::Float | Self::Double | Self::Simd8 | Self::Simd16 | Self::Simd32 | Self::Simd64 => RegisterKind::Float,
            Self::Mask => RegisterKind::Mask,
        }
    }

    /// How many consecutive float registers a value of this type occupies on architectures where
    /// each float register is only 32 bits wide (e.g. a double spans `s0` and `s1` on ARM).
    #[must_use]
    pub const fn paired_float_slots(&self) -> usize {
        match self.register_kind() {
            RegisterKind::Float if self.size() > 4 => self.size() / 4,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ValueType::Float, 1)]
    #[case(ValueType::Double, 2)]
    #[case(ValueType::Simd8, 2)]
    #[case(ValueType::Simd16, 4)]
    #[case(ValueType::Long, 1)]
    #[case(ValueType::Mask, 1)]
    fn paired_float_slots(#[case] value_type: ValueType, #[case] expected: usize) {
        assert_eq!(value_type.paired_float_slots(), expected);
    }

    #[test]
    fn parse_from_name() {
        assert_eq!("simd16".parse::<ValueType>().ok(), Some(ValueType::Simd16));
        assert_eq!("double".parse::<ValueType>().ok(), Some(ValueType::Double));
    }
}
