use bigdecimal::{BigDecimal, ParseBigDecimalError, ToPrimitive};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

const SCALE: i64 = 10_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// A currency amount stored as an integer number of ten-thousandths.
///
/// Balances and transaction amounts never go through floating point: parsing
/// goes through `BigDecimal` and is rounded to 4 decimal places. The ledger
/// moves balances with the `checked_*` methods; the operators saturate at the
/// `i64` bounds and are meant for reports. Persisted form is the 4 dp decimal
/// string.
///
/// # Examples
/// ```
/// use pocket_ledger::common::money::Money;
///
/// let amount: Money = "12.5".parse().unwrap();
/// assert_eq!(amount.as_i64(), 125_000);
/// assert_eq!(amount.to_string_4dp(), "12.5000");
/// assert_eq!((-amount).abs(), amount);
/// ```
pub struct Money(i64);

impl Money {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn zero() -> Self {
        Money(0)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub fn abs(&self) -> Self {
        Money(self.0.saturating_abs())
    }

    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    pub fn checked_neg(self) -> Option<Money> {
        self.0.checked_neg().map(Money)
    }

    pub fn checked_abs(self) -> Option<Money> {
        self.0.checked_abs().map(Money)
    }

    pub fn to_string_4dp(&self) -> String {
        let bd = BigDecimal::from(self.0) / BigDecimal::from(SCALE);
        format!("{:.4}", bd)
    }

    /// Two decimal places, the way amounts are shown to the user.
    pub fn to_string_2dp(&self) -> String {
        let bd = (BigDecimal::from(self.0) / BigDecimal::from(SCALE)).round(2);
        format!("{:.2}", bd)
    }
}

impl std::str::FromStr for Money {
    type Err = ParseBigDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.is_empty() {
            return Err(ParseBigDecimalError::Other("empty amount".into()));
        }

        let bd: BigDecimal = t.parse()?;

        // Scale to 4 decimal places
        let scaled = (bd * BigDecimal::from(SCALE)).round(0);
        let value: i64 = scaled
            .to_i64()
            .ok_or_else(|| ParseBigDecimalError::Other("amount overflow".into()))?;

        Ok(Money(value))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_4dp())
    }
}

impl Add for Money {
    type Output = Money;
    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Money {
    type Output = Money;
    fn sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl Neg for Money {
    type Output = Money;
    fn neg(self) -> Money {
        Money(self.0.saturating_neg())
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        *self = *self - rhs;
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&self.to_string_4dp())
    }
}

struct MoneyVisitor;

impl Visitor<'_> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal amount as a string or number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        v.checked_mul(SCALE)
            .map(Money)
            .ok_or_else(|| E::custom("amount overflow"))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        let v = i64::try_from(v).map_err(|_| E::custom("amount overflow"))?;
        self.visit_i64(v)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        // Display of f64 is the shortest round-trip form, so 0.1 stays "0.1".
        v.to_string().parse().map_err(E::custom)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
        de.deserialize_any(MoneyVisitor)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_zero() {
        assert_eq!(Money::zero(), Money(0));
        assert!(Money::zero().is_zero());
    }

    #[test]
    fn test_from_str_valid() {
        assert_eq!(Money::from_str("1").unwrap(), Money(10000));
        assert_eq!(Money::from_str("1.5").unwrap(), Money(15000));
        assert_eq!(Money::from_str("1.2345").unwrap(), Money(12345));
        assert_eq!(Money::from_str("-30").unwrap(), Money(-300000));
        assert_eq!(Money::from_str("  2.0000 ").unwrap(), Money(20000));
    }

    #[test]
    fn test_from_str_rounding() {
        assert_eq!(Money::from_str("1.99999").unwrap(), Money(20000));
        assert_eq!(Money::from_str("0.00001").unwrap(), Money(0));
    }

    #[test]
    fn test_from_str_invalid() {
        assert!(Money::from_str("").is_err());
        assert!(Money::from_str("   ").is_err());
        assert!(Money::from_str("abc").is_err());
    }

    #[test]
    fn test_string_forms() {
        assert_eq!(Money(12345).to_string_4dp(), "1.2345");
        assert_eq!(Money(-5000).to_string(), "-0.5000");
        assert_eq!(Money(12345).to_string_2dp(), "1.23");
        assert_eq!(Money(0).to_string_2dp(), "0.00");
    }

    #[test]
    fn test_sign_helpers() {
        assert!(Money(1).is_positive());
        assert!(Money(-1).is_negative());
        assert_eq!(-Money(300), Money(-300));
        assert_eq!(Money(-300).abs(), Money(300));
    }

    #[test]
    fn test_arithmetic() {
        let mut m = Money(10000);
        m += Money(5000);
        assert_eq!(m, Money(15000));
        m -= Money(20000);
        assert_eq!(m, Money(-5000));
        assert_eq!(Money(1) + Money(2) - Money(3), Money::zero());
    }

    #[test]
    fn test_checked_arithmetic_reports_overflow() {
        let max = Money(i64::MAX);
        assert_eq!(max.checked_add(Money(1)), None);
        assert_eq!(Money(i64::MIN).checked_sub(Money(1)), None);
        assert_eq!(Money(i64::MIN).checked_neg(), None);
        assert_eq!(Money(i64::MIN).checked_abs(), None);
        assert_eq!(Money(5).checked_sub(Money(7)), Some(Money(-2)));
    }

    #[test]
    fn test_operators_saturate() {
        assert_eq!(Money(i64::MAX) + Money(1), Money(i64::MAX));
        assert_eq!(Money(i64::MIN) - Money(1), Money(i64::MIN));
        assert_eq!(-Money(i64::MIN), Money(i64::MAX));
        assert_eq!(Money(i64::MIN).abs(), Money(i64::MAX));
        assert_eq!([Money(i64::MAX), Money(1)].iter().sum::<Money>(), Money(i64::MAX));
    }

    #[test]
    fn test_from_str_out_of_range() {
        assert!(Money::from_str("922337203685478").is_err());
        assert!(Money::from_str("900000000000000").is_ok());
    }

    #[test]
    fn test_sum() {
        let items = [Money(100), Money(250), Money(-50)];
        assert_eq!(items.iter().sum::<Money>(), Money(300));
        assert_eq!(Vec::<Money>::new().into_iter().sum::<Money>(), Money::zero());
    }

    #[test]
    fn test_ordering() {
        assert!(Money(10000) < Money(15000));
        assert!(Money(-1) < Money::zero());
    }

    #[test]
    fn serializes_as_decimal_string_and_reads_numbers_too() {
        assert_eq!(serde_json::to_string(&Money(125000)).unwrap(), "\"12.5000\"");
        let from_str: Money = serde_json::from_str("\"12.5\"").unwrap();
        let from_float: Money = serde_json::from_str("12.5").unwrap();
        let from_int: Money = serde_json::from_str("-3").unwrap();
        assert_eq!(from_str, Money(125000));
        assert_eq!(from_float, Money(125000));
        assert_eq!(from_int, Money(-30000));
    }
}
