//! GraphQL scalar definitions.

use std::{fmt, marker::PhantomData, str::FromStr};

use derive_more::{From, Into};
use juniper::{
    GraphQLScalar, GraphQLType, InputValue, ParseScalarResult,
    ParseScalarValue, ScalarToken, ScalarValue, Value,
};

/// Helper type to use in `#[graphql(with = ..)]` attribute.
///
/// Represents the target type as a GraphQL string via the [`FromStr`] and
/// [`Display`] impls of the `As` type it wraps.
///
/// [`Display`]: fmt::Display
#[derive(Debug)]
pub struct Via<As>(PhantomData<As>);

impl<As> Via<As> {
    /// Converts the target type into a string scalar [`Value`].
    pub fn to_output<T, S>(value: &T) -> Value<S>
    where
        As: fmt::Display,
        T: AsRef<As>,
        S: ScalarValue,
    {
        Value::from(value.as_ref().to_string())
    }

    /// Parses the target type out of a string scalar [`InputValue`].
    ///
    /// # Errors
    ///
    /// If the `input` is not a string, or it cannot be parsed as `As`.
    pub fn from_input<T, S>(input: &InputValue<S>) -> Result<T, String>
    where
        As: FromStr,
        As::Err: fmt::Display,
        T: From<As> + GraphQLType<S, TypeInfo = ()>,
        S: ScalarValue,
    {
        let name = T::name(&()).unwrap_or("scalar");
        let s = input.as_string_value().ok_or_else(|| {
            format!("Cannot parse `{name}` from non-string value: {input}")
        })?;
        s.parse::<As>()
            .map(T::from)
            .map_err(|e| format!("Cannot parse `{name}` from \"{s}\": {e}"))
    }

    /// Parses the provided [`ScalarToken`] as a [`String`].
    ///
    /// # Errors
    ///
    /// If the token is not a string.
    pub fn parse_token<S: ScalarValue>(
        value: ScalarToken<'_>,
    ) -> ParseScalarResult<S> {
        <String as ParseScalarValue<S>>::from_str(value)
    }
}

/// Day of the week numbered from `0` (Sunday) to `6` (Saturday).
#[derive(Clone, Copy, Debug, From, GraphQLScalar, Into)]
#[graphql(
    name = "Weekday",
    to_output_with = Self::to_output,
    from_input_with = Self::from_input,
    parse_token(i32),
)]
pub struct Weekday(common::Weekday);

impl Weekday {
    fn to_output<S: ScalarValue>(day: &Self) -> Value<S> {
        Value::scalar(i32::from(day.0.u8()))
    }

    fn from_input<S: ScalarValue>(
        input: &InputValue<S>,
    ) -> Result<Self, String> {
        input
            .as_int_value()
            .and_then(|n| u8::try_from(n).ok())
            .and_then(common::Weekday::from_u8)
            .map(Self)
            .ok_or_else(|| {
                format!("Expected `Weekday` number in `0..=6`, found: {input}")
            })
    }
}

#[cfg(test)]
mod spec {
    use juniper::{DefaultScalarValue, InputValue};

    use super::Weekday;

    #[test]
    fn weekday_is_numbered_from_sunday() {
        let parse = |n: i32| {
            Weekday::from_input::<DefaultScalarValue>(&InputValue::scalar(n))
                .map(common::Weekday::from)
        };

        assert_eq!(parse(0), Ok(common::Weekday::Sunday));
        assert_eq!(parse(6), Ok(common::Weekday::Saturday));
        assert!(parse(7).is_err());
        assert!(parse(-1).is_err());
    }
}
