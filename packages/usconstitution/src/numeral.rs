//! Roman numeral conversion for article and amendment ordinals.

/// Largest value expressible with standard Roman numerals.
pub const MAX_ROMAN: u32 = 3999;

const NUMERALS: [(u32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Render a number as an upper-case Roman numeral.
///
/// Values outside `1..=3999` have no Roman form and render in decimal,
/// which only happens for stubs that were never numbered.
///
/// # Examples
/// ```
/// use usconstitution::numeral::to_roman;
///
/// assert_eq!(to_roman(4), "IV");
/// assert_eq!(to_roman(14), "XIV");
/// assert_eq!(to_roman(27), "XXVII");
/// ```
#[must_use]
pub fn to_roman(mut n: u32) -> String {
    if n == 0 || n > MAX_ROMAN {
        return n.to_string();
    }

    let mut out = String::new();
    for (value, symbol) in NUMERALS {
        while n >= value {
            out.push_str(symbol);
            n -= value;
        }
    }
    out
}

/// Parse an upper-case Roman numeral.
///
/// Only canonical forms are accepted: `IIII` and `VX` are rejected even
/// though they could be summed.
///
/// # Examples
/// ```
/// use usconstitution::numeral::from_roman;
///
/// assert_eq!(from_roman("XIV"), Some(14));
/// assert_eq!(from_roman("IIII"), None);
/// assert_eq!(from_roman(""), None);
/// ```
#[must_use]
pub fn from_roman(s: &str) -> Option<u32> {
    if s.is_empty() {
        return None;
    }

    let mut rest = s;
    let mut total = 0;
    for (value, symbol) in NUMERALS {
        while let Some(tail) = rest.strip_prefix(symbol) {
            total += value;
            rest = tail;
        }
    }

    if !rest.is_empty() || total == 0 || total > MAX_ROMAN {
        return None;
    }

    // Greedy prefix stripping accepts a few non-canonical spellings
    // (e.g. "IIII"); only the canonical rendering round-trips.
    (to_roman(total) == s).then_some(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_roman_constitution_range() {
        let expected = [
            "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X", "XI", "XII", "XIII",
            "XIV", "XV", "XVI", "XVII", "XVIII", "XIX", "XX", "XXI", "XXII", "XXIII", "XXIV",
            "XXV", "XXVI", "XXVII",
        ];
        for (i, roman) in expected.iter().enumerate() {
            assert_eq!(to_roman(i as u32 + 1), *roman);
        }
    }

    #[test]
    fn test_round_trip_constitution_range() {
        for n in 1..=27 {
            assert_eq!(from_roman(&to_roman(n)), Some(n));
        }
    }

    #[test]
    fn test_to_roman_out_of_range_is_decimal() {
        assert_eq!(to_roman(0), "0");
        assert_eq!(to_roman(4000), "4000");
    }

    #[test]
    fn test_to_roman_large() {
        assert_eq!(to_roman(1987), "MCMLXXXVII");
        assert_eq!(to_roman(3999), "MMMCMXCIX");
    }

    #[test]
    fn test_from_roman_rejects_non_canonical() {
        assert_eq!(from_roman("IIII"), None);
        assert_eq!(from_roman("VX"), None);
        assert_eq!(from_roman("IC"), None);
        assert_eq!(from_roman("XIIII"), None);
    }

    #[test]
    fn test_from_roman_rejects_garbage() {
        assert_eq!(from_roman("iv"), None);
        assert_eq!(from_roman("IVa"), None);
        assert_eq!(from_roman("14"), None);
        assert_eq!(from_roman("S8"), None);
    }
}
