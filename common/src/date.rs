//! Calendar [`Date`] and [`Weekday`] definitions.

use std::{fmt, str::FromStr};

use derive_more::{Display, Error};
use time::{format_description::FormatItem, macros::format_description};

use crate::define_kind;

/// Format of a [`Date`] string representation.
const FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Calendar date without a time zone.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Date(time::Date);

impl Date {
    /// Creates a new [`Date`] from the provided calendar components.
    ///
    /// [`None`] is returned if the components don't form a valid date.
    #[must_use]
    pub fn from_calendar(year: i32, month: u8, day: u8) -> Option<Self> {
        let month = time::Month::try_from(month).ok()?;
        time::Date::from_calendar_date(year, month, day).ok().map(Self)
    }

    /// Returns the signed number of days from this [`Date`] to the `other`
    /// one.
    ///
    /// The result is negative if the `other` [`Date`] precedes this one.
    #[must_use]
    pub fn days_until(self, other: Self) -> i64 {
        (other.0 - self.0).whole_days()
    }

    /// Returns this [`Date`] in `YYYY-MM-DD` format.
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn to_iso8601(&self) -> String {
        self.0.format(FORMAT).unwrap_or_else(|e| {
            panic!("cannot format `Date` as ISO 8601: {e}")
        })
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl FromStr for Date {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        time::Date::parse(s, FORMAT).map(Self).map_err(ParseError)
    }
}

impl From<time::Date> for Date {
    fn from(date: time::Date) -> Self {
        Self(date)
    }
}

impl From<Date> for time::Date {
    fn from(date: Date) -> Self {
        date.0
    }
}

/// Error of parsing a [`Date`] from a `YYYY-MM-DD` string.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("invalid `YYYY-MM-DD` date: {_0}")]
pub struct ParseError(time::error::Parse);

define_kind! {
    #[doc = "Day of a week, numbered from Sunday."]
    enum Weekday {
        #[doc = "Sunday."]
        Sunday = 0,

        #[doc = "Monday."]
        Monday = 1,

        #[doc = "Tuesday."]
        Tuesday = 2,

        #[doc = "Wednesday."]
        Wednesday = 3,

        #[doc = "Thursday."]
        Thursday = 4,

        #[doc = "Friday."]
        Friday = 5,

        #[doc = "Saturday."]
        Saturday = 6,
    }
}

#[cfg(feature = "serde")]
mod serde {
    //! Module providing integration with [`serde`] crate.

    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

    use super::Date;

    impl Serialize for Date {
        fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
            s.serialize_str(&self.to_iso8601())
        }
    }

    impl<'de> Deserialize<'de> for Date {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
            let s = <&str>::deserialize(d)?;
            s.parse().map_err(de::Error::custom)
        }
    }
}

#[cfg(feature = "juniper")]
mod juniper {
    //! Module providing integration with [`juniper`] crate.

    use juniper::{graphql_scalar, InputValue, ScalarValue, Value};

    /// Calendar date in `YYYY-MM-DD` format.
    #[graphql_scalar(with = Self, parse_token(String))]
    type Date = super::Date;

    impl Date {
        fn to_output<S: ScalarValue>(d: &Date) -> Value<S> {
            Value::scalar(d.to_iso8601())
        }

        fn from_input<S: ScalarValue>(
            input: &InputValue<S>,
        ) -> Result<Self, String> {
            input
                .as_string_value()
                .ok_or_else(|| {
                    format!(
                        "Cannot parse `Date` input scalar from \
                         non-string value: {input}",
                    )
                })
                .and_then(|s| {
                    s.parse().map_err(|e| {
                        format!("Cannot parse `Date` input scalar: {e}")
                    })
                })
        }
    }
}

#[cfg(test)]
mod spec {
    use super::{Date, Weekday};

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    #[test]
    fn parses_and_formats_iso8601() {
        assert_eq!(date("2024-01-22"), Date::from_calendar(2024, 1, 22).unwrap());
        assert_eq!(date("2024-01-01").to_string(), "2024-01-01");

        assert!("2024-13-01".parse::<Date>().is_err());
        assert!("01/02/2024".parse::<Date>().is_err());
        assert!(Date::from_calendar(2024, 2, 30).is_none());
    }

    #[test]
    fn counts_signed_days() {
        assert_eq!(date("2024-01-01").days_until(date("2024-01-22")), 21);
        assert_eq!(date("2024-01-22").days_until(date("2024-01-01")), -21);
        assert_eq!(date("2024-02-28").days_until(date("2024-03-01")), 2);
    }

    #[test]
    fn numbers_weekdays_from_sunday() {
        assert_eq!(Weekday::Sunday.u8(), 0);
        assert_eq!(Weekday::from_u8(6), Some(Weekday::Saturday));
        assert_eq!(Weekday::from_u8(7), None);
    }
}
