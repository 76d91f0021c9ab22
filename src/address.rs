//! Fixed-width integer model for IPv4 and IPv6 addresses.

use once_cell::sync::Lazy;
use std::fmt;
use std::hash::Hash;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::ops::{BitAnd, BitOr, Not};

use crate::error::RangeError;

/// An address as a fixed-width unsigned integer.
///
/// Ordering is plain unsigned numeric ordering. For `u128` that is the same
/// as comparing the high 64 bits first and the low 64 bits second, which is
/// what network byte order means for IPv6.
pub trait Address:
    Copy
    + Ord
    + Hash
    + fmt::Debug
    + Send
    + Sync
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + Not<Output = Self>
    + 'static
{
    /// The `std::net` address type used for display.
    type Ip: fmt::Display + Copy;

    /// Address width in bits.
    const WIDTH: u8;

    /// Convert from the `std::net` address.
    fn from_ip(ip: Self::Ip) -> Self;

    /// Convert to the `std::net` address.
    fn to_ip(self) -> Self::Ip;

    /// Mask with `prefix_len` leading one-bits, or `None` if `prefix_len > WIDTH`.
    fn prefix_mask(prefix_len: u8) -> Option<Self>;

    /// Complement of [`Address::prefix_mask`].
    fn host_mask(prefix_len: u8) -> Option<Self>;

    /// Parse an address at the start of `s`, returning it with the rest.
    fn scan(s: &str) -> Result<(Self, &str), RangeError>;

    /// Parse a bare address.
    fn parse_addr(s: &str) -> Result<Self, RangeError> {
        match Self::scan(s)? {
            (addr, "") => Ok(addr),
            _ => Err(RangeError::InvalidAddress(s.to_string())),
        }
    }

    /// Parse a live-stream record.
    ///
    /// Accepts a bare address or an address with an explicit host-length
    /// prefix (`/32` or `/128`). Any other prefix is rejected.
    fn parse_host(line: &str) -> Result<Self, RangeError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(RangeError::Empty);
        }

        let (addr, rest) = Self::scan(line)?;
        let rest = match rest.strip_prefix('/') {
            Some(prefix) => {
                let (digits, tail) = split_digits(prefix);
                if digits.parse::<u8>().ok() != Some(Self::WIDTH) {
                    return Err(RangeError::NotHostPrefix {
                        bits: Self::WIDTH,
                        prefix: prefix.to_string(),
                    });
                }
                tail
            }
            None => rest,
        };
        check_trailing(rest)?;
        Ok(addr)
    }

    /// Canonical text form of this address.
    fn display(self) -> String {
        self.to_ip().to_string()
    }
}

impl Address for u32 {
    type Ip = Ipv4Addr;

    const WIDTH: u8 = 32;

    fn from_ip(ip: Ipv4Addr) -> Self {
        u32::from(ip)
    }

    fn to_ip(self) -> Ipv4Addr {
        Ipv4Addr::from(self)
    }

    /// Dotted quad of decimal octets. Leading zeros are decimal, not octal.
    fn scan(s: &str) -> Result<(Self, &str), RangeError> {
        let invalid = || RangeError::InvalidAddress(s.to_string());
        let mut rest = s;
        let mut addr = 0u32;
        for i in 0..4 {
            if i > 0 {
                rest = rest.strip_prefix('.').ok_or_else(invalid)?;
            }
            let (octet, tail) = scan_octet(rest).ok_or_else(invalid)?;
            addr = (addr << 8) | u32::from(octet);
            rest = tail;
        }
        Ok((addr, rest))
    }

    fn prefix_mask(prefix_len: u8) -> Option<Self> {
        if prefix_len > 32 {
            return None;
        }
        // Shifting by the full width is not defined, so /0 is spelled out.
        let zero_bits = u32::from(32 - prefix_len);
        Some(match 1u32.checked_shl(zero_bits) {
            Some(bit) => !(bit - 1),
            None => 0,
        })
    }

    fn host_mask(prefix_len: u8) -> Option<Self> {
        Self::prefix_mask(prefix_len).map(|mask| !mask)
    }
}

/// Split the leading run of ASCII digits off `s`.
pub(crate) fn split_digits(s: &str) -> (&str, &str) {
    let len = s.bytes().take_while(u8::is_ascii_digit).count();
    s.split_at(len)
}

/// Accept what follows a complete entry: nothing, or whitespace and a comment.
pub(crate) fn check_trailing(rest: &str) -> Result<(), RangeError> {
    match rest.chars().next() {
        None => Ok(()),
        Some(c) if c.is_whitespace() => Ok(()),
        Some(_) => Err(RangeError::TrailingText(rest.to_string())),
    }
}

/// One decimal octet, any number of leading zeros, at most 255.
fn scan_octet(s: &str) -> Option<(u8, &str)> {
    let (digits, rest) = split_digits(s);
    if digits.is_empty() {
        return None;
    }
    let value = digits.bytes().try_fold(0u32, |acc, d| {
        let value = acc * 10 + u32::from(d - b'0');
        (value <= 255).then_some(value)
    })?;
    Some((value as u8, rest))
}

/// IPv6 `(mask, !mask)` for every prefix length 0..=128.
static V6_MASKS: Lazy<[(u128, u128); 129]> = Lazy::new(|| {
    let mut masks = [(0u128, u128::MAX); 129];
    for (prefix_len, entry) in masks.iter_mut().enumerate() {
        let mask = if prefix_len == 0 {
            0
        } else {
            u128::MAX << (128 - prefix_len)
        };
        *entry = (mask, !mask);
    }
    masks
});

impl Address for u128 {
    type Ip = Ipv6Addr;

    const WIDTH: u8 = 128;

    fn from_ip(ip: Ipv6Addr) -> Self {
        u128::from(ip)
    }

    fn to_ip(self) -> Ipv6Addr {
        Ipv6Addr::from(self)
    }

    fn scan(s: &str) -> Result<(Self, &str), RangeError> {
        let end = s
            .find(|c: char| c == '/' || c == '-' || c.is_whitespace())
            .unwrap_or(s.len());
        let (head, rest) = s.split_at(end);
        head.parse::<Ipv6Addr>()
            .map(|ip| (u128::from(ip), rest))
            .map_err(|_| RangeError::InvalidAddress(head.to_string()))
    }

    fn prefix_mask(prefix_len: u8) -> Option<Self> {
        V6_MASKS.get(prefix_len as usize).map(|(mask, _)| *mask)
    }

    fn host_mask(prefix_len: u8) -> Option<Self> {
        V6_MASKS.get(prefix_len as usize).map(|(_, inv)| *inv)
    }
}
