// Fri Oct 16 2026 - Alex

use std::fmt;
use std::ops::{Add, Sub};

/// 16-bit target address as seen by the HC05 CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address {
    value: u16,
}

impl Address {
    pub const fn new(value: u16) -> Self {
        Self { value }
    }

    pub const fn zero() -> Self {
        Self { value: 0 }
    }

    pub const fn as_u16(&self) -> u16 {
        self.value
    }

    pub fn as_usize(&self) -> usize {
        self.value as usize
    }

    pub const fn high(&self) -> u8 {
        (self.value >> 8) as u8
    }

    pub const fn low(&self) -> u8 {
        (self.value & 0xFF) as u8
    }

    pub const fn from_bytes(high: u8, low: u8) -> Self {
        Self { value: ((high as u16) << 8) | low as u16 }
    }

    pub fn checked_add(&self, rhs: u16) -> Option<Self> {
        self.value.checked_add(rhs).map(Self::new)
    }

    pub fn distance(&self, other: Self) -> i32 {
        self.value as i32 - other.value as i32
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:04X}", self.value)
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.value, f)
    }
}

impl fmt::UpperHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.value, f)
    }
}

impl Add<u16> for Address {
    type Output = Self;
    fn add(self, rhs: u16) -> Self::Output {
        Self { value: self.value.wrapping_add(rhs) }
    }
}

impl Sub<u16> for Address {
    type Output = Self;
    fn sub(self, rhs: u16) -> Self::Output {
        Self { value: self.value.wrapping_sub(rhs) }
    }
}

impl Sub<Address> for Address {
    type Output = i32;
    fn sub(self, rhs: Address) -> Self::Output {
        self.distance(rhs)
    }
}

impl From<u16> for Address {
    fn from(value: u16) -> Self {
        Self::new(value)
    }
}

impl From<Address> for u16 {
    fn from(addr: Address) -> Self {
        addr.value
    }
}
