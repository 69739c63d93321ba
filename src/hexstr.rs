//! Conversion of [`Integer`] values from and to text.
//!
//! Parsing accepts an optional sign followed by decimal digits, or by `0x`/`0X` and hex digits,
//! or by `0b`/`0B` and binary digits. Single underscores may separate digits.

use core::fmt;
use core::str::FromStr;

use super::error::ConversionError;
use super::integer::Integer;
use super::limb::Limb;

fn digit_value(c: u8) -> Option<u32> {
    let v = match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 0xa,
        b'A'..=b'F' => c - b'A' + 0xa,
        _ => return None,
    };
    Some(v as u32)
}

/// Multiply the little-endian `limbs` by `factor` and add `summand`, growing as needed.
fn mul_add_limbs<L: Limb>(limbs: &mut Vec<L>, factor: u32, summand: u32) {
    let mut carry = summand as u128;
    for limb in limbs.iter_mut() {
        let t = limb.to_u64() as u128 * factor as u128 + carry;
        *limb = L::from_u64(t as u64);
        carry = t >> L::BITS;
    }
    while carry != 0 {
        limbs.push(L::from_u64(carry as u64));
        carry >>= L::BITS;
    }
}

/// Divide the little-endian `limbs` in place by `divisor` and return the remainder.
fn div_rem_limbs<L: Limb>(limbs: &mut [L], divisor: u64) -> u64 {
    let divisor = divisor as u128;
    let mut rem: u128 = 0;
    for limb in limbs.iter_mut().rev() {
        let cur = (rem << L::BITS) | limb.to_u64() as u128;
        *limb = L::from_u64((cur / divisor) as u64);
        rem = cur % divisor;
    }
    rem as u64
}

/// Parse the digits following the sign and radix prefix.
///
/// # Arguments
///
/// * `digits` - The digit characters, possibly separated by single underscores.
/// * `radix` - The radix, at most 16.
/// * `offset` - Position of `digits[0]` in the full input, for error reporting.
fn parse_digits<L: Limb>(digits: &[u8], radix: u32, offset: usize) -> Result<Vec<L>, ConversionError> {
    if digits.is_empty() {
        return Err(ConversionError::InvalidDigit { position: offset });
    }

    let mut limbs = Vec::new();
    let mut prev_was_digit = false;
    for (i, c) in digits.iter().enumerate() {
        if *c == b'_' {
            // Only between two digits.
            if !prev_was_digit || i + 1 == digits.len() {
                return Err(ConversionError::InvalidDigit { position: offset + i });
            }
            prev_was_digit = false;
            continue;
        }
        match digit_value(*c) {
            Some(d) if d < radix => mul_add_limbs(&mut limbs, radix, d),
            _ => return Err(ConversionError::InvalidDigit { position: offset + i }),
        }
        prev_was_digit = true;
    }
    Ok(limbs)
}

impl<L: Limb> FromStr for Integer<L> {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.as_bytes();
        if s.is_empty() {
            return Err(ConversionError::Empty);
        }

        let (negative, mut pos) = match s[0] {
            b'-' => (true, 1),
            b'+' => (false, 1),
            _ => (false, 0),
        };
        let radix = match &s[pos..] {
            [b'0', b'x' | b'X', ..] => 16,
            [b'0', b'b' | b'B', ..] => 2,
            _ => 10,
        };
        if radix != 10 {
            pos += 2;
        }

        let limbs = parse_digits::<L>(&s[pos..], radix, pos)?;
        Ok(Integer::from_limbs(negative, limbs))
    }
}

const DEC_CHUNK: u64 = 10_000_000_000_000_000_000;
const DEC_CHUNK_DIGITS: usize = 19;

fn magnitude_to_decstr<L: Limb>(mut limbs: Vec<L>) -> String {
    let mut chunks = Vec::new();
    loop {
        let nlimbs = limbs
            .iter()
            .rposition(|l| *l != L::ZERO)
            .map(|i| i + 1)
            .unwrap_or(0);
        if nlimbs == 0 {
            break;
        }
        limbs.truncate(nlimbs);
        chunks.push(div_rem_limbs(&mut limbs, DEC_CHUNK));
    }

    let mut result = match chunks.pop() {
        Some(head) => head.to_string(),
        None => return String::from("0"),
    };
    result.reserve(chunks.len() * DEC_CHUNK_DIGITS);
    for chunk in chunks.iter().rev() {
        let chunk = chunk.to_string();
        result.extend(core::iter::repeat('0').take(DEC_CHUNK_DIGITS - chunk.len()));
        result.push_str(&chunk);
    }
    result
}

fn magnitude_to_hexstr<L: Limb>(limbs: &[L], upper: bool) -> String {
    fn nibble_to_hexchar(nibble: u8, upper: bool) -> char {
        let c = match nibble {
            0x0..=0x9 => b'0' + nibble,
            0xa..=0xf if upper => b'A' + (nibble - 0xa),
            0xa..=0xf => b'a' + (nibble - 0xa),
            _ => unreachable!(),
        };
        c as char
    }

    let mut result = String::with_capacity(limbs.len() * L::BITS as usize / 4);
    for limb in limbs.iter().rev() {
        let limb = limb.to_u64();
        let mut shift = L::BITS;
        while shift > 0 {
            shift -= 4;
            let nibble = ((limb >> shift) & 0xf) as u8;
            if result.is_empty() && nibble == 0 {
                continue;
            }
            result.push(nibble_to_hexchar(nibble, upper));
        }
    }
    if result.is_empty() {
        result.push('0');
    }
    result
}

impl<L: Limb> fmt::Display for Integer<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Small(value) => fmt::Display::fmt(value, f),
            Self::Big(_) => {
                let digits = magnitude_to_decstr(self.magnitude_limbs());
                f.pad_integral(!self.is_negative(), "", &digits)
            }
        }
    }
}

impl<L: Limb> fmt::LowerHex for Integer<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = magnitude_to_hexstr(&self.magnitude_limbs(), false);
        f.pad_integral(!self.is_negative(), "0x", &digits)
    }
}

impl<L: Limb> fmt::UpperHex for Integer<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = magnitude_to_hexstr(&self.magnitude_limbs(), true);
        f.pad_integral(!self.is_negative(), "0x", &digits)
    }
}

#[test]
fn test_digit_value() {
    assert_eq!(digit_value(b'0'), Some(0));
    assert_eq!(digit_value(b'9'), Some(9));
    assert_eq!(digit_value(b'a'), Some(10));
    assert_eq!(digit_value(b'F'), Some(15));
    assert_eq!(digit_value(b'g'), None);
    assert_eq!(digit_value(b'_'), None);
}

#[cfg(test)]
fn test_from_str_common<L: Limb>() {
    assert_eq!("0".parse::<Integer<L>>(), Ok(Integer::zero()));
    assert_eq!("-0".parse::<Integer<L>>(), Ok(Integer::zero()));
    assert_eq!("42".parse::<Integer<L>>(), Ok(Integer::from(42)));
    assert_eq!("+42".parse::<Integer<L>>(), Ok(Integer::from(42)));
    assert_eq!("-42".parse::<Integer<L>>(), Ok(Integer::from(-42)));
    assert_eq!("0xff".parse::<Integer<L>>(), Ok(Integer::from(255)));
    assert_eq!("0XFF".parse::<Integer<L>>(), Ok(Integer::from(255)));
    assert_eq!("-0x10".parse::<Integer<L>>(), Ok(Integer::from(-16)));
    assert_eq!("0b1011".parse::<Integer<L>>(), Ok(Integer::from(11)));
    assert_eq!("1_000_000".parse::<Integer<L>>(), Ok(Integer::from(1_000_000)));
    assert_eq!("0xaabb_ccdd".parse::<Integer<L>>(), Ok(Integer::from(0xaabb_ccddu32)));

    let parsed: Integer<L> = "9223372036854775807".parse().unwrap();
    assert!(parsed.is_small());
    assert_eq!(parsed, Integer::from(i64::MAX));
    let parsed: Integer<L> = "9223372036854775808".parse().unwrap();
    assert!(parsed.is_big());
    assert_eq!(parsed, Integer::from(1u64 << 63));
    let parsed: Integer<L> = "-9223372036854775808".parse().unwrap();
    assert!(parsed.is_small());
    assert_eq!(parsed, Integer::from(i64::MIN));
    let parsed: Integer<L> = "340282366920938463463374607431768211455".parse().unwrap();
    assert_eq!(parsed, Integer::from(u128::MAX));
    let parsed: Integer<L> = "-0xffffffffffffffffffffffffffffffff".parse().unwrap();
    assert_eq!(parsed, Integer::from_sign_magnitude(true, u128::MAX));

    assert_eq!("".parse::<Integer<L>>(), Err(ConversionError::Empty));
    assert_eq!("-".parse::<Integer<L>>(), Err(ConversionError::InvalidDigit { position: 1 }));
    assert_eq!("0x".parse::<Integer<L>>(), Err(ConversionError::InvalidDigit { position: 2 }));
    assert_eq!("12a".parse::<Integer<L>>(), Err(ConversionError::InvalidDigit { position: 2 }));
    assert_eq!("0b102".parse::<Integer<L>>(), Err(ConversionError::InvalidDigit { position: 4 }));
    assert_eq!(" 1".parse::<Integer<L>>(), Err(ConversionError::InvalidDigit { position: 0 }));
    assert_eq!("_1".parse::<Integer<L>>(), Err(ConversionError::InvalidDigit { position: 0 }));
    assert_eq!("1_".parse::<Integer<L>>(), Err(ConversionError::InvalidDigit { position: 1 }));
    assert_eq!("1__0".parse::<Integer<L>>(), Err(ConversionError::InvalidDigit { position: 2 }));
    assert_eq!("--1".parse::<Integer<L>>(), Err(ConversionError::InvalidDigit { position: 1 }));
}

#[test]
fn test_from_str() {
    test_from_str_common::<u16>();
    test_from_str_common::<u32>();
    test_from_str_common::<u64>();
}

#[cfg(test)]
fn test_display_common<L: Limb>() {
    use super::test_helpers::forced_big;

    assert_eq!(Integer::<L>::zero().to_string(), "0");
    assert_eq!(Integer::<L>::from(-42).to_string(), "-42");
    assert_eq!(Integer::<L>::from(1u64 << 63).to_string(), "9223372036854775808");
    assert_eq!(
        Integer::<L>::from(u128::MAX).to_string(),
        "340282366920938463463374607431768211455"
    );
    assert_eq!(
        Integer::<L>::from(-(10i128.pow(19))).to_string(),
        "-10000000000000000000"
    );
    assert_eq!(
        Integer::<L>::from(10i128.pow(38) + 7).to_string(),
        "100000000000000000000000000000000000007"
    );
    assert_eq!(forced_big::<L>(false, 5).to_string(), "5");
    assert_eq!(forced_big::<L>(true, 0).to_string(), "0");
    assert_eq!(format!("{:>8}", Integer::<L>::from(u64::MAX)), "18446744073709551615");
    assert_eq!(format!("{:>8}", Integer::<L>::from(-7)), "      -7");
    assert_eq!(format!("{:+}", Integer::<L>::from(1u128 << 64)), "+18446744073709551616");
}

#[test]
fn test_display() {
    test_display_common::<u16>();
    test_display_common::<u32>();
    test_display_common::<u64>();
}

#[cfg(test)]
fn test_hex_common<L: Limb>() {
    use super::test_helpers::forced_big;

    assert_eq!(format!("{:x}", Integer::<L>::zero()), "0");
    assert_eq!(format!("{:x}", Integer::<L>::from(0xaabb_ccddu32)), "aabbccdd");
    assert_eq!(format!("{:X}", Integer::<L>::from(0xaabb_ccddu32)), "AABBCCDD");
    assert_eq!(format!("{:#x}", Integer::<L>::from(-255)), "-0xff");
    assert_eq!(format!("{:x}", Integer::<L>::from(1u128 << 64)), "10000000000000000");
    assert_eq!(
        format!("{:x}", Integer::<L>::from(0x1_0000_0000_0000_00ab_0000_0001u128)),
        "100000000000000ab00000001"
    );
    assert_eq!(format!("{:x}", forced_big::<L>(false, 0x10)), "10");
    assert_eq!(format!("{:#010x}", Integer::<L>::from(0xabu8)), "0x000000ab");

    let value: Integer<L> = "-0x123456789abcdef0123456789".parse().unwrap();
    assert_eq!(format!("{:#x}", value), "-0x123456789abcdef0123456789");
}

#[test]
fn test_hex() {
    test_hex_common::<u16>();
    test_hex_common::<u32>();
    test_hex_common::<u64>();
}
