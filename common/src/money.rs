//! [`Money`]-related definitions.

use std::{cmp::Ordering, fmt, str::FromStr};

use rust_decimal::{Decimal, RoundingStrategy};

use crate::{define_kind, Percent};

/// Amount of money in some [`Currency`].
///
/// Booking prices are kept in whole currency units: multiplying by a count
/// keeps an amount whole, and shares are rounded half-up.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Money {
    /// Amount of this [`Money`].
    pub amount: Decimal,

    /// [`Currency`] of this amount.
    pub currency: Currency,
}

impl Money {
    /// Creates a new [`Money`] of the provided whole `amount`.
    #[must_use]
    pub fn whole(amount: i64, currency: Currency) -> Self {
        Self {
            amount: Decimal::from(amount),
            currency,
        }
    }

    /// Creates a zero [`Money`] in the provided [`Currency`].
    #[must_use]
    pub const fn zero(currency: Currency) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Indicates whether this [`Money`] is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Indicates whether this [`Money`] is strictly greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Multiplies this [`Money`] by the provided `count` of units.
    #[must_use]
    pub fn times(self, count: u32) -> Self {
        Self {
            amount: self.amount * Decimal::from(count),
            currency: self.currency,
        }
    }

    /// Calculates the provided [`Percent`] share of this [`Money`], rounded
    /// half-up to whole units.
    #[must_use]
    pub fn share(self, percent: Percent) -> Self {
        let amount = (self.amount * percent.value() / Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        Self {
            amount,
            currency: self.currency,
        }
    }

    /// Rounds this [`Money`] half-up to whole units.
    #[must_use]
    pub fn round(self) -> Self {
        Self {
            amount: self
                .amount
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
            currency: self.currency,
        }
    }
}

/// [`Money`] amounts are comparable only within the same [`Currency`].
impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        (self.currency == other.currency)
            .then(|| self.amount.cmp(&other.amount))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self { amount, currency } = self;
        write!(f, "{}{currency}", amount.normalize())
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() < 4 {
            return Err("too short");
        }
        if !s.is_char_boundary(s.len() - 3) {
            return Err("invalid currency");
        }

        let (amount, currency) = s.split_at(s.len() - 3);
        let amount = Decimal::from_str(amount).map_err(|_| "invalid amount")?;
        let currency =
            Currency::from_str(currency).map_err(|_| "invalid currency")?;

        Ok(Self { amount, currency })
    }
}

define_kind! {
    #[doc = "Currency of a [`Money`] amount."]
    enum Currency {
        #[doc = "US Dollar."]
        Usd = 1,

        #[doc = "Euro."]
        Eur = 2,

        #[doc = "Russian Ruble."]
        Rub = 3,

        #[doc = "Vietnamese Dong."]
        Vnd = 4,
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use std::str::FromStr as _;

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Money in `{major}.{minor}{currency}` format, where:
    /// - `major` is an integer;
    /// - `minor` is an optional integer;
    /// - `currency` is a three-letter currency code.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Money = super::Money;

    impl Money {
        fn to_output<S: ScalarValue>(m: &Money) -> Value<S> {
            Value::scalar(m.to_string())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Money` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    Self::from_str(s).map_err(|e| {
                        format!("Cannot parse `Money` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use crate::Percent;

    use super::{Currency, Money};

    fn vnd(amount: i64) -> Money {
        Money::whole(amount, Currency::Vnd)
    }

    fn percent(val: u8) -> Percent {
        Percent::new(Decimal::from(val)).unwrap()
    }

    #[test]
    fn from_str() {
        assert_eq!(Money::from_str("150000VND").unwrap(), vnd(150_000));
        assert_eq!(
            Money::from_str("123.45USD").unwrap(),
            Money {
                amount: "123.45".parse().unwrap(),
                currency: Currency::Usd,
            },
        );

        assert!(Money::from_str("123.45").is_err());
        assert!(Money::from_str("123.45Us").is_err());
        assert!(Money::from_str("123.45Usdollar").is_err());
        assert!(Money::from_str("12đồng").is_err());
    }

    #[test]
    fn to_string() {
        assert_eq!(vnd(900_000).to_string(), "900000VND");
        assert_eq!(
            Money {
                amount: "123.00".parse().unwrap(),
                currency: Currency::Usd,
            }
            .to_string(),
            "123USD",
        );
    }

    #[test]
    fn times_multiplies_by_count() {
        assert_eq!(vnd(100_000).times(10), vnd(1_000_000));
        assert_eq!(vnd(100_000).times(0), vnd(0));
    }

    #[test]
    fn share_rounds_half_up() {
        assert_eq!(vnd(1_000_000).share(percent(10)), vnd(100_000));
        assert_eq!(vnd(10).share(percent(5)), vnd(1));
        assert_eq!(vnd(30).share(percent(5)), vnd(2));
        assert_eq!(vnd(29).share(percent(5)), vnd(1));
        assert_eq!(vnd(500).share(percent(0)), vnd(0));
    }

    #[test]
    fn compares_within_currency_only() {
        assert!(vnd(1) < vnd(2));
        assert_eq!(
            vnd(1).partial_cmp(&Money::whole(2, Currency::Eur)),
            None,
        );
    }
}
