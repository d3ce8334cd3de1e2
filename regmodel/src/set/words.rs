// Copyright (C) 2025 Tristan Gerritsen <tristan@thewoosh.org>
// All Rights Reserved.

use std::{fmt::Debug, hash::Hash};

/// The backing storage of a [`RegisterSet`](super::RegisterSet): one word for architectures with at
/// most 64 registers, two words otherwise.
pub trait RegisterWords: Debug + Clone + Copy + PartialEq + Eq + Hash + Default + Send + Sync + 'static {
    const COUNT: usize;

    #[must_use] fn from_words(low: u64, high: u64) -> Self;

    #[must_use] fn low(&self) -> u64;

    /// Always zero for [`SingleWord`].
    #[must_use] fn high(&self) -> u64;

    #[must_use] fn map(self, f: impl Fn(u64) -> u64) -> Self;

    #[must_use] fn zip(self, other: Self, f: impl Fn(u64, u64) -> u64) -> Self;

    fn update(&mut self, index: usize, f: impl FnOnce(u64) -> u64);

    #[must_use]
    fn word(&self, index: usize) -> u64 {
        match index {
            0 => self.low(),
            1 => self.high(),
            _ => 0,
        }
    }

    #[must_use]
    fn count_ones(&self) -> u32 {
        self.low().count_ones() + self.high().count_ones()
    }

    #[must_use]
    fn is_zero(&self) -> bool {
        (self.low() | self.high()) == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SingleWord(u64);

impl RegisterWords for SingleWord {
    const COUNT: usize = 1;

    fn from_words(low: u64, high: u64) -> Self {
        debug_assert!(high == 0, "een enkel woord kan geen hoge registers bevatten: {high:#x}");
        Self(low)
    }

    fn low(&self) -> u64 {
        self.0
    }

    fn high(&self) -> u64 {
        0
    }

    fn map(self, f: impl Fn(u64) -> u64) -> Self {
        Self(f(self.0))
    }

    fn zip(self, other: Self, f: impl Fn(u64, u64) -> u64) -> Self {
        Self(f(self.0, other.0))
    }

    fn update(&mut self, index: usize, f: impl FnOnce(u64) -> u64) {
        debug_assert!(index == 0, "woord {index} bestaat niet");
        self.0 = f(self.0);
    }

    fn count_ones(&self) -> u32 {
        self.0.count_ones()
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DoubleWord {
    low: u64,
    high: u64,
}

impl RegisterWords for DoubleWord {
    const COUNT: usize = 2;

    fn from_words(low: u64, high: u64) -> Self {
        Self { low, high }
    }

    fn low(&self) -> u64 {
        self.low
    }

    fn high(&self) -> u64 {
        self.high
    }

    fn map(self, f: impl Fn(u64) -> u64) -> Self {
        Self {
            low: f(self.low),
            high: f(self.high),
        }
    }

    fn zip(self, other: Self, f: impl Fn(u64, u64) -> u64) -> Self {
        Self {
            low: f(self.low, other.low),
            high: f(self.high, other.high),
        }
    }

    fn update(&mut self, index: usize, f: impl FnOnce(u64) -> u64) {
        match index {
            0 => self.low = f(self.low),
            1 => self.high = f(self.high),
            _ => debug_assert!(false, "woord {index} bestaat niet"),
        }
    }
}
