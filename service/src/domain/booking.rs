//! Booking [`Intent`] assembly and validation.

use std::collections::BTreeSet;

use common::{Date, Money, Weekday};
use derive_more::{Display, Error};
use serde::{Serialize, Serializer};
use smart_default::SmartDefault;

#[cfg(doc)]
use crate::domain::Complex;
use crate::domain::{
    complex, field, recurrence::Plan, slot, user, Availability, SubField,
    TimeSlot,
};

/// Rules applied to every submitted booking.
#[derive(Clone, Copy, Debug, Eq, PartialEq, SmartDefault)]
pub struct Policy {
    /// Minimum number of weeks a recurring booking must span.
    #[default(4)]
    pub min_recurring_weeks: u32,
}

/// What is being booked.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Target {
    /// Single [`SubField`].
    #[display("{_0}")]
    Field(field::Id),

    /// Bundle of [`SubField`]s of a whole [`Complex`].
    #[display("complex-{_0}")]
    Complex(complex::Id),
}

impl Serialize for Target {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(self)
    }
}

/// Recurrence parameters as picked by a user, not validated yet.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Recurrence {
    /// First [`Date`] of the range, if picked.
    pub range_start: Option<Date>,

    /// Last [`Date`] of the range, if picked.
    pub range_end: Option<Date>,

    /// [`Weekday`]s to repeat the booking on.
    pub repeat_days: BTreeSet<Weekday>,
}

/// Booking mode.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum Mode {
    /// One session on the selected date.
    #[default]
    Single,

    /// Weekly sessions within a date range.
    Recurring(Recurrence),
}

/// Selects the price of a single session.
///
/// With a [`SubField`] in view its own price is used once a [`TimeSlot`] is
/// selected, and the [`Complex`] minimum otherwise. Without one the price of
/// a whole bundle is used.
#[must_use]
pub fn unit_price(
    field: Option<&SubField>,
    availability: &Availability,
) -> Money {
    match field {
        Some(f) if availability.slot_id.is_some() => f.price,
        Some(_) => availability.min_price,
        None => availability
            .selected_slot_price_big
            .unwrap_or(availability.min_price_big),
    }
}

/// Everything a user picked before confirming a booking.
#[derive(Clone, Copy, Debug)]
pub struct Draft<'a> {
    /// ID of the authenticated [`user`], if any.
    pub user_id: Option<user::Id>,

    /// Selected [`Date`], if any.
    pub date: Option<Date>,

    /// Selected [`TimeSlot`], if any.
    pub slot: Option<&'a TimeSlot>,

    /// [`Target`] to book.
    pub target: Target,

    /// Booking [`Mode`].
    pub mode: &'a Mode,

    /// [`SubField`]s of the [`Complex`] fetched for the selection.
    pub fields: &'a [SubField],

    /// [`Availability`] aggregated from the [`Draft::fields`].
    pub availability: &'a Availability,
}

/// Validated booking request, ready to be handed to the booking backend.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    /// ID of the [`user`] booking.
    pub user_id: user::Id,

    /// Booked [`Target`].
    #[serde(rename = "fieldId")]
    pub target: Target,

    /// Booked [`Date`].
    pub date: Date,

    /// ID of the booked [`TimeSlot`].
    pub slot_id: slot::Id,

    /// Name of the booked [`TimeSlot`].
    #[serde(serialize_with = "serialize_display")]
    pub slot_name: slot::Name,

    /// Price of a single session.
    #[serde(serialize_with = "serialize_amount")]
    pub price: Money,

    /// Price of the whole booking.
    #[serde(serialize_with = "serialize_amount")]
    pub total_price: Money,

    /// Indicator whether the booking repeats weekly.
    pub is_recurring_preset: bool,

    /// Number of weeks the booking repeats for.
    pub recurring_weeks_preset: u32,

    /// [`Weekday`]s the booking repeats on, as `0 = Sunday .. 6 = Saturday`.
    #[serde(serialize_with = "serialize_weekdays")]
    pub selected_days_preset: Vec<Weekday>,

    /// First [`Date`] of a recurring booking.
    pub range_start: Option<Date>,

    /// Last [`Date`] of a recurring booking.
    pub range_end: Option<Date>,
}

impl Intent {
    /// Validates the provided [`Draft`] against the [`Policy`] and builds an
    /// [`Intent`] out of it.
    ///
    /// # Errors
    ///
    /// The first violated precondition is returned as a [`ValidationError`].
    pub fn build(
        draft: Draft<'_>,
        policy: &Policy,
    ) -> Result<Self, ValidationError> {
        use ValidationError as E;

        let Draft {
            user_id,
            date,
            slot,
            target,
            mode,
            fields,
            availability,
        } = draft;

        let user_id = user_id.ok_or(E::Unauthenticated)?;
        let (date, slot) = date.zip(slot).ok_or(E::MissingDateOrSlot)?;

        let field = match target {
            Target::Field(id) => Some(
                fields
                    .iter()
                    .find(|f| f.id == id)
                    .ok_or(E::FieldNotFound)?,
            ),
            Target::Complex(_) => None,
        };
        let price = unit_price(field, availability);

        let mut intent = Self {
            user_id,
            target,
            date,
            slot_id: slot.id,
            slot_name: slot.name.clone(),
            price,
            total_price: price,
            is_recurring_preset: false,
            recurring_weeks_preset: 0,
            selected_days_preset: vec![],
            range_start: None,
            range_end: None,
        };

        match mode {
            Mode::Single => match field {
                Some(f) if !f.is_available => Err(E::FieldUnavailable),
                None if availability.available_bundles == 0 => {
                    Err(E::NoBundleAvailable)
                }
                Some(_) | None => Ok(intent),
            },
            Mode::Recurring(recurrence) => {
                let (range_start, range_end) = recurrence
                    .range_start
                    .zip(recurrence.range_end)
                    .ok_or(E::MissingRange)?;
                let plan = Plan {
                    range_start,
                    range_end,
                    repeat_days: recurrence.repeat_days.clone(),
                    unit_price: price,
                };
                if !plan.meets_minimum(policy.min_recurring_weeks) {
                    return Err(E::RangeTooShort {
                        min: policy.min_recurring_weeks,
                    });
                }
                if plan.repeat_days.is_empty() {
                    return Err(E::NoRepeatDays);
                }

                let quote = plan.quote();
                intent.total_price = quote.total;
                intent.is_recurring_preset = true;
                intent.recurring_weeks_preset = quote.weeks;
                intent.selected_days_preset =
                    plan.repeat_days.into_iter().collect();
                intent.range_start = Some(range_start);
                intent.range_end = Some(range_end);
                Ok(intent)
            }
        }
    }
}

/// Reason a [`Draft`] cannot become an [`Intent`].
///
/// Messages are shown to users as is.
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum ValidationError {
    /// No authenticated [`user`].
    #[display("Vui lòng đăng nhập để đặt sân")]
    Unauthenticated,

    /// [`Date`] or [`TimeSlot`] is not selected.
    #[display("Vui lòng chọn ngày và khung giờ")]
    MissingDateOrSlot,

    /// Booked [`SubField`] is not among the fetched ones.
    #[display("Không tìm thấy sân")]
    FieldNotFound,

    /// Booked [`SubField`] is taken for the selected [`TimeSlot`].
    #[display("Sân đã được đặt cho khung giờ này")]
    FieldUnavailable,

    /// Not enough free [`SubField`]s to compose a bundle.
    #[display("Không còn đủ sân trống cho khung giờ này")]
    NoBundleAvailable,

    /// Recurrence range is not picked.
    #[display("Vui lòng chọn ngày bắt đầu và ngày kết thúc")]
    MissingRange,

    /// Recurrence range spans fewer weeks than [`Policy`] requires.
    #[display("Đặt lịch định kỳ cần tối thiểu {min} tuần")]
    RangeTooShort {
        /// Required minimum number of weeks.
        min: u32,
    },

    /// No [`Weekday`] is picked for a recurring booking.
    #[display("Vui lòng chọn ít nhất một ngày trong tuần")]
    NoRepeatDays,
}

/// Serializes a value via its [`Display`] implementation.
fn serialize_display<T, S>(val: &T, s: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    s.collect_str(val)
}

/// Serializes the amount of [`Money`] as a plain number.
fn serialize_amount<S>(m: &Money, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    rust_decimal::serde::float::serialize(&m.amount, s)
}

/// Serializes [`Weekday`]s as their numbers.
fn serialize_weekdays<S: Serializer>(
    days: &[Weekday],
    s: S,
) -> Result<S::Ok, S::Error> {
    s.collect_seq(days.iter().map(|d| d.u8()))
}

#[cfg(test)]
mod spec {
    use std::collections::BTreeSet;

    use common::{Date, Weekday};

    use crate::domain::{
        availability::spec::{sub_field, time_slot, vnd},
        complex, field, user, Availability, SubField, TimeSlot,
    };

    use super::{
        unit_price, Draft, Intent, Mode, Policy, Recurrence, Target,
        ValidationError,
    };

    fn date(s: &str) -> Date {
        s.parse().unwrap()
    }

    fn fields() -> Vec<SubField> {
        vec![
            sub_field(1, 200_000, true),
            sub_field(2, 150_000, false),
            sub_field(3, 180_000, true),
            sub_field(4, 180_000, true),
            sub_field(5, 220_000, true),
        ]
    }

    fn recurring(start: &str, end: &str, days: &[Weekday]) -> Mode {
        Mode::Recurring(Recurrence {
            range_start: Some(date(start)),
            range_end: Some(date(end)),
            repeat_days: days.iter().copied().collect(),
        })
    }

    fn build(
        target: Target,
        mode: &Mode,
        slot: Option<&TimeSlot>,
        fields: &[SubField],
    ) -> Result<Intent, ValidationError> {
        let availability =
            Availability::aggregate(fields, slot.map(|s| s.id));
        Intent::build(
            Draft {
                user_id: Some(user::Id::from(7)),
                date: Some(date("2024-01-01")),
                slot,
                target,
                mode,
                fields,
                availability: &availability,
            },
            &Policy::default(),
        )
    }

    #[test]
    fn default_policy_requires_four_weeks() {
        assert_eq!(Policy::default().min_recurring_weeks, 4);
    }

    #[test]
    fn complex_target_is_prefixed() {
        assert_eq!(
            Target::Complex(complex::Id::from(12)).to_string(),
            "complex-12",
        );
        assert_eq!(Target::Field(field::Id::from(12)).to_string(), "12");
    }

    #[test]
    fn unit_price_selection() {
        let fields = fields();
        let with_slot = Availability::aggregate(&fields, Some(1.into()));
        let without_slot = Availability::aggregate(&fields, None);

        assert_eq!(unit_price(Some(&fields[0]), &with_slot), vnd(200_000));
        assert_eq!(unit_price(Some(&fields[0]), &without_slot), vnd(150_000));
        // 4 available fields at least 180_000 each, composed by 4.
        assert_eq!(unit_price(None, &with_slot), vnd(720_000));
        assert_eq!(unit_price(None, &without_slot), vnd(600_000));
    }

    #[test]
    fn requires_authenticated_user() {
        let fields = fields();
        let slot = time_slot(1);
        let availability = Availability::aggregate(&fields, Some(slot.id));

        let res = Intent::build(
            Draft {
                user_id: None,
                date: None,
                slot: Some(&slot),
                target: Target::Complex(complex::Id::from(1)),
                mode: &Mode::Single,
                fields: &fields,
                availability: &availability,
            },
            &Policy::default(),
        );

        assert_eq!(res, Err(ValidationError::Unauthenticated));
    }

    #[test]
    fn requires_date_and_slot() {
        let fields = fields();
        let slot = time_slot(1);
        let availability = Availability::aggregate(&fields, Some(slot.id));
        let mode = recurring("2024-01-01", "2024-03-01", &[Weekday::Monday]);

        for (date, slot) in [
            (None, Some(&slot)),
            (Some(date("2024-01-01")), None),
            (None, None),
        ] {
            let res = Intent::build(
                Draft {
                    user_id: Some(user::Id::from(1)),
                    date,
                    slot,
                    target: Target::Field(field::Id::from(1)),
                    mode: &mode,
                    fields: &fields,
                    availability: &availability,
                },
                &Policy::default(),
            );

            assert_eq!(res, Err(ValidationError::MissingDateOrSlot));
        }
    }

    #[test]
    fn single_field_booking() {
        let slot = time_slot(3);
        let intent = build(
            Target::Field(field::Id::from(3)),
            &Mode::Single,
            Some(&slot),
            &fields(),
        )
        .unwrap();

        assert_eq!(intent.target, Target::Field(field::Id::from(3)));
        assert_eq!(intent.slot_id, slot.id);
        assert_eq!(intent.slot_name, slot.name);
        assert_eq!(intent.price, vnd(180_000));
        assert_eq!(intent.total_price, vnd(180_000));
        assert!(!intent.is_recurring_preset);
        assert_eq!(intent.recurring_weeks_preset, 0);
        assert!(intent.selected_days_preset.is_empty());
        assert_eq!(intent.range_start, None);
    }

    #[test]
    fn rejects_taken_field() {
        let res = build(
            Target::Field(field::Id::from(2)),
            &Mode::Single,
            Some(&time_slot(1)),
            &fields(),
        );

        assert_eq!(res, Err(ValidationError::FieldUnavailable));
    }

    #[test]
    fn rejects_unknown_field() {
        let res = build(
            Target::Field(field::Id::from(42)),
            &Mode::Single,
            Some(&time_slot(1)),
            &fields(),
        );

        assert_eq!(res, Err(ValidationError::FieldNotFound));
    }

    #[test]
    fn complex_booking_requires_bundle() {
        let target = Target::Complex(complex::Id::from(1));

        // 4 of 5 available, composed by 4.
        let intent =
            build(target, &Mode::Single, Some(&time_slot(1)), &fields())
                .unwrap();
        assert_eq!(intent.price, vnd(720_000));

        let mut taken = fields();
        taken[0].is_available = false;
        let res = build(target, &Mode::Single, Some(&time_slot(1)), &taken);
        assert_eq!(res, Err(ValidationError::NoBundleAvailable));
    }

    #[test]
    fn recurring_booking_is_discounted() {
        let mode = recurring(
            "2024-03-04",
            "2024-04-08",
            &[Weekday::Thursday, Weekday::Monday],
        );
        let fields = vec![sub_field(1, 100_000, false)];

        let intent = build(
            Target::Field(field::Id::from(1)),
            &mode,
            Some(&time_slot(1)),
            &fields,
        )
        .unwrap();

        assert_eq!(intent.price, vnd(100_000));
        assert_eq!(intent.total_price, vnd(900_000));
        assert!(intent.is_recurring_preset);
        assert_eq!(intent.recurring_weeks_preset, 5);
        assert_eq!(
            intent.selected_days_preset,
            vec![Weekday::Monday, Weekday::Thursday],
        );
        assert_eq!(intent.range_start, Some(date("2024-03-04")));
        assert_eq!(intent.range_end, Some(date("2024-04-08")));
    }

    #[test]
    fn recurring_booking_preconditions() {
        let target = Target::Field(field::Id::from(1));
        let slot = time_slot(1);
        let fields = fields();

        let no_range = Mode::Recurring(Recurrence {
            range_start: Some(date("2024-01-01")),
            range_end: None,
            repeat_days: BTreeSet::from([Weekday::Monday]),
        });
        assert_eq!(
            build(target, &no_range, Some(&slot), &fields),
            Err(ValidationError::MissingRange),
        );

        let short = recurring("2024-01-01", "2024-01-22", &[Weekday::Monday]);
        let res = build(target, &short, Some(&slot), &fields);
        assert_eq!(res, Err(ValidationError::RangeTooShort { min: 4 }));
        assert_eq!(
            res.unwrap_err().to_string(),
            "Đặt lịch định kỳ cần tối thiểu 4 tuần",
        );

        let no_days = recurring("2024-01-01", "2024-03-01", &[]);
        assert_eq!(
            build(target, &no_days, Some(&slot), &fields),
            Err(ValidationError::NoRepeatDays),
        );
    }

    #[test]
    fn serializes_camel_case() {
        let mode = recurring("2024-01-01", "2024-01-29", &[Weekday::Sunday]);
        let intent = build(
            Target::Complex(complex::Id::from(9)),
            &mode,
            Some(&time_slot(2)),
            &fields(),
        )
        .unwrap();

        let json = serde_json::to_value(&intent).unwrap();

        assert_eq!(json["fieldId"], "complex-9");
        assert_eq!(json["userId"], 7);
        assert_eq!(json["date"], "2024-01-01");
        assert_eq!(json["slotId"], 2);
        assert_eq!(json["slotName"], "Ca 2");
        assert_eq!(json["isRecurringPreset"], true);
        assert_eq!(json["recurringWeeksPreset"], 4);
        assert_eq!(json["selectedDaysPreset"], serde_json::json!([0]));
        assert_eq!(json["rangeEnd"], "2024-01-29");
    }
}
