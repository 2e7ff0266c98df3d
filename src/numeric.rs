//! Shell integer parsing for numeric test operands

/// Parse a test operand as a signed integer.
///
/// Surrounding whitespace is ignored, then the whole remainder must be an
/// optional sign followed by decimal digits. Anything else is 0, so
/// `[[ abc -eq 0 ]]` holds. Out-of-range values saturate.
pub fn atoi(s: &str) -> i64 {
    let s = s.trim_matches(|c: char| c.is_ascii_whitespace());
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return 0;
    }

    let mut n: i64 = 0;
    for b in digits.bytes() {
        let d = i64::from(b - b'0');
        n = if negative {
            n.saturating_mul(10).saturating_sub(d)
        } else {
            n.saturating_mul(10).saturating_add(d)
        };
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(atoi("0"), 0);
        assert_eq!(atoi("42"), 42);
        assert_eq!(atoi("-17"), -17);
        assert_eq!(atoi("+8"), 8);
        assert_eq!(atoi("007"), 7);
    }

    #[test]
    fn test_whitespace_is_ignored() {
        assert_eq!(atoi("  12 "), 12);
        assert_eq!(atoi("\t-3\n"), -3);
    }

    #[test]
    fn test_garbage_is_zero() {
        assert_eq!(atoi(""), 0);
        assert_eq!(atoi("abc"), 0);
        assert_eq!(atoi("12abc"), 0);
        assert_eq!(atoi("1 2"), 0);
        assert_eq!(atoi("-"), 0);
        assert_eq!(atoi("+-1"), 0);
        assert_eq!(atoi("0x10"), 0);
    }

    #[test]
    fn test_overflow_saturates() {
        assert_eq!(atoi("99999999999999999999"), i64::MAX);
        assert_eq!(atoi("-99999999999999999999"), i64::MIN);
        assert_eq!(atoi("-9223372036854775808"), i64::MIN);
    }
}
