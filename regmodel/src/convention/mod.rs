// Copyright (C) 2025 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

mod abi;
mod rules;

pub use self::{
    abi::{
        AbiTable,
        FixedReturnBuffer,
        ReturnBufferPolicy,
        SwiftRegisters,
    },
    rules::CallingConventionRules,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[derive(strum::AsRefStr, strum::Display, strum::EnumIter, strum::EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum CallingConvention {
    /// The native convention of the compiler itself.
    #[default]
    Managed,

    C,
    StdCall,
    ThisCall,
    FastCall,
    CMemberFunction,
    StdCallMemberFunction,
    FastCallMemberFunction,

    /// Interop with Swift, which passes `self` and the error result in dedicated registers.
    Swift,
}

impl CallingConvention {
    /// Whether the first argument is the `this` pointer of an instance method.
    #[must_use]
    pub const fn is_instance_method(&self) -> bool {
        matches!(self, Self::ThisCall | Self::CMemberFunction | Self::StdCallMemberFunction | Self::FastCallMemberFunction)
    }

    /// Whether this convention only means something on 32-bit x86. Elsewhere these are the same as
    /// [`Self::C`].
    #[must_use]
    pub const fn is_x86_only(&self) -> bool {
        matches!(self, Self::StdCall | Self::FastCall | Self::StdCallMemberFunction | Self::FastCallMemberFunction)
    }

    #[must_use]
    pub const fn is_unmanaged(&self) -> bool {
        !matches!(self, Self::Managed)
    }
}

/// In which order the arguments of a call are evaluated and pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(strum::AsRefStr, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ArgumentOrder {
    LeftToRight,
    RightToLeft,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(CallingConvention::Managed, false)]
    #[case(CallingConvention::C, false)]
    #[case(CallingConvention::ThisCall, true)]
    #[case(CallingConvention::CMemberFunction, true)]
    #[case(CallingConvention::FastCallMemberFunction, true)]
    #[case(CallingConvention::Swift, false)]
    fn instance_methods(#[case] convention: CallingConvention, #[case] expected: bool) {
        assert_eq!(convention.is_instance_method(), expected);
    }

    #[rstest]
    #[case("managed", CallingConvention::Managed)]
    #[case("swift", CallingConvention::Swift)]
    #[case("std-call-member-function", CallingConvention::StdCallMemberFunction)]
    fn parse_from_name(#[case] input: &str, #[case] expected: CallingConvention) {
        assert_eq!(input.parse::<CallingConvention>().ok(), Some(expected));
    }
}
