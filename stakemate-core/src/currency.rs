//! Native currency conversions.
//!
//! Everything feeding the ledger goes through exact integer arithmetic over
//! decimal strings; binary floating point only ever appears on the advisory
//! display path, which is never sent on chain.

use crate::error::{CoreError, Result};
use crate::types::{Amount, NATIVE_DECIMALS};

const UNITS_PER_NATIVE: u128 = 10u128.pow(NATIVE_DECIMALS);

/// Parse a decimal native-currency string into smallest units, exactly.
///
/// Rejects negative amounts, non-digit characters, and more fractional
/// digits than the ledger can represent.
pub fn parse_native(s: &str) -> Result<Amount> {
    let s = s.trim();
    if s.is_empty() {
        return Err(CoreError::amount("empty amount"));
    }
    if s.starts_with('-') {
        return Err(CoreError::amount(format!("negative amount '{}'", s)));
    }

    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, f),
        None => (s, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(CoreError::amount(format!("malformed amount '{}'", s)));
    }
    if frac_part.len() as u32 > NATIVE_DECIMALS {
        return Err(CoreError::amount(format!(
            "amount '{}' has more than {} decimal places",
            s, NATIVE_DECIMALS
        )));
    }
    if !int_part.chars().all(|c| c.is_ascii_digit()) || !frac_part.chars().all(|c| c.is_ascii_digit()) {
        return Err(CoreError::amount(format!("malformed amount '{}'", s)));
    }

    let int_units = if int_part.is_empty() {
        0
    } else {
        int_part
            .parse::<u128>()
            .map_err(|_| CoreError::amount(format!("amount '{}' out of range", s)))?
            .checked_mul(UNITS_PER_NATIVE)
            .ok_or_else(|| CoreError::amount(format!("amount '{}' out of range", s)))?
    };

    let frac_units = if frac_part.is_empty() {
        0
    } else {
        let scale = 10u128.pow(NATIVE_DECIMALS - frac_part.len() as u32);
        frac_part
            .parse::<u128>()
            .map_err(|_| CoreError::amount(format!("amount '{}' out of range", s)))?
            * scale
    };

    int_units
        .checked_add(frac_units)
        .map(Amount::from_units)
        .ok_or_else(|| CoreError::amount(format!("amount '{}' out of range", s)))
}

/// Convert a wire wager (JSON number) into smallest units.
///
/// Goes through the shortest round-trip decimal representation, which is
/// what the signaling server's own clients do before paying, so the figure
/// matches the contract's expectation to the unit.
pub fn to_smallest_unit(native: f64) -> Result<Amount> {
    if !native.is_finite() {
        return Err(CoreError::amount(format!("non-finite amount {}", native)));
    }
    parse_native(&format!("{}", native))
}

/// Advisory conversion of a smallest-unit amount into a display currency.
pub fn to_display_currency(amount: Amount, rate: f64) -> f64 {
    to_native_f64(amount) * rate
}

/// Lossy native-unit view of an amount, for display only.
pub fn to_native_f64(amount: Amount) -> f64 {
    amount.as_units() as f64 / UNITS_PER_NATIVE as f64
}

/// Commission owed on a wager, in smallest units, floored the same way the
/// receiving contract floors it.
pub fn commission(wager: Amount, percent: u64) -> Amount {
    Amount::from_units(wager.as_units() * percent as u128 / 100)
}

/// Format a smallest-unit amount as a native decimal string, trimming
/// trailing fractional zeros.
pub fn format_native(amount: Amount) -> String {
    let units = amount.as_units();
    let whole = units / UNITS_PER_NATIVE;
    let frac = units % UNITS_PER_NATIVE;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{:018}", frac);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_and_fractional_amounts() {
        assert_eq!(parse_native("2").unwrap().as_units(), 2 * UNITS_PER_NATIVE);
        assert_eq!(parse_native("2.0").unwrap().as_units(), 2 * UNITS_PER_NATIVE);
        assert_eq!(
            parse_native("2.1").unwrap().as_units(),
            2_100_000_000_000_000_000
        );
        assert_eq!(parse_native("0.000000000000000001").unwrap().as_units(), 1);
        assert_eq!(parse_native(".5").unwrap().as_units(), 500_000_000_000_000_000);
        assert_eq!(parse_native("0").unwrap(), Amount::ZERO);
    }

    #[test]
    fn rejects_malformed_amounts() {
        assert!(parse_native("").is_err());
        assert!(parse_native("-1").is_err());
        assert!(parse_native("1.2.3").is_err());
        assert!(parse_native("1e3").is_err());
        assert!(parse_native(".").is_err());
        // 19 fractional digits: below the smallest representable unit
        assert!(parse_native("0.0000000000000000001").is_err());
    }

    #[test]
    fn wire_wager_matches_exact_parse() {
        // 2.1 has no exact binary representation; the string round-trip must
        // still land on the exact unit figure the contract computes.
        assert_eq!(
            to_smallest_unit(2.1).unwrap(),
            parse_native("2.1").unwrap()
        );
        assert!(to_smallest_unit(f64::NAN).is_err());
        assert!(to_smallest_unit(-1.0).is_err());
    }

    #[test]
    fn commission_floors_in_integer_units() {
        let wager = parse_native("2.0").unwrap();
        assert_eq!(
            commission(wager, 5).as_units(),
            100_000_000_000_000_000 // 0.1 native
        );
        // 1 unit at 5%: floors to zero
        assert_eq!(commission(Amount::from_units(1), 5), Amount::ZERO);
        assert_eq!(commission(Amount::from_units(19), 5), Amount::ZERO);
        assert_eq!(commission(Amount::from_units(20), 5).as_units(), 1);
    }

    #[test]
    fn formats_native_trimming_zeros() {
        assert_eq!(format_native(parse_native("2.1").unwrap()), "2.1");
        assert_eq!(format_native(parse_native("2").unwrap()), "2");
        assert_eq!(format_native(Amount::from_units(1)), "0.000000000000000001");
    }

    #[test]
    fn display_conversion_is_advisory() {
        let wager = parse_native("2.0").unwrap();
        let usd = to_display_currency(wager, 0.45);
        assert!((usd - 0.9).abs() < 1e-9);
    }
}
