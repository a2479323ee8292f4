//! [`Availability`] aggregation over the [`SubField`]s of a [`Complex`].
//!
//! A "big field" bundle is several [`SubField`]s of one [`Complex`] booked
//! together. Its size is the [`ComposeCount`].

use common::{Currency, Money};

#[cfg(doc)]
use crate::domain::Complex;
use crate::domain::{slot, SubField, TimeSlot};

/// Availability and price summary of a [`Complex`] for one date and
/// (optionally) one [`TimeSlot`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Availability {
    /// [`TimeSlot`] the summary is filtered by, if any.
    pub slot_id: Option<slot::Id>,

    /// Total number of [`SubField`]s.
    pub total_count: u32,

    /// Number of [`SubField`]s free for the selected [`TimeSlot`].
    ///
    /// Equals [`Availability::total_count`] when no [`TimeSlot`] is selected.
    pub available_count: u32,

    /// Minimum positive [`SubField`] price, or zero if there is none.
    pub min_price: Money,

    /// Number of [`SubField`]s forming one bundle.
    pub compose_count: ComposeCount,

    /// Price of a whole bundle at [`Availability::min_price`].
    pub min_price_big: Money,

    /// Minimum price among the available [`SubField`]s, falling back to
    /// [`Availability::min_price`].
    ///
    /// [`None`] if no [`TimeSlot`] is selected.
    pub selected_slot_price: Option<Money>,

    /// Price of a whole bundle at [`Availability::selected_slot_price`].
    pub selected_slot_price_big: Option<Money>,

    /// Number of bundles which may still be booked.
    pub available_bundles: u32,

    /// Number of bundles the [`Complex`] is able to form, at least `1`.
    pub total_bundles: u32,
}

impl Availability {
    /// Aggregates the provided [`SubField`]s fetched for the given
    /// [`TimeSlot`] (or for no [`TimeSlot`] at all).
    #[must_use]
    pub fn aggregate(fields: &[SubField], slot_id: Option<slot::Id>) -> Self {
        let currency = fields
            .first()
            .map_or(Currency::Vnd, |f| f.price.currency);
        let total_count = saturating_count(fields.len());
        let compose_count = ComposeCount::for_fields(total_count);

        let min_price = min_positive_price(fields.iter())
            .unwrap_or(Money::zero(currency));
        let min_price_big = min_price.times(compose_count.get());

        let (available_count, selected_slot_price) = if slot_id.is_some() {
            let available = fields.iter().filter(|f| f.is_available);
            let count = saturating_count(available.clone().count());
            let price = min_positive_price(available).unwrap_or(min_price);
            (count, Some(price))
        } else {
            (total_count, None)
        };

        Self {
            slot_id,
            total_count,
            available_count,
            min_price,
            compose_count,
            min_price_big,
            selected_slot_price,
            selected_slot_price_big: selected_slot_price
                .map(|p| p.times(compose_count.get())),
            available_bundles: compose_count.bundles(available_count),
            total_bundles: compose_count.bundles(total_count).max(1),
        }
    }
}

/// Number of [`SubField`]s composing a single bundle.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ComposeCount(u32);

impl ComposeCount {
    /// Bundle size of the [`Complex`]es having many [`SubField`]s.
    const LARGE: u32 = 6;

    /// Bundle size of the [`Complex`]es having a few [`SubField`]s.
    const SMALL: u32 = 4;

    /// Determines the [`ComposeCount`] of a [`Complex`] having `count`
    /// [`SubField`]s.
    #[must_use]
    pub fn for_fields(count: u32) -> Self {
        Self(match count {
            c if c >= Self::LARGE => Self::LARGE,
            c if c >= Self::SMALL => Self::SMALL,
            c => c.max(1),
        })
    }

    /// Returns the numeric value of this [`ComposeCount`].
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Returns the number of whole bundles `count` [`SubField`]s form.
    #[must_use]
    pub fn bundles(self, count: u32) -> u32 {
        count / self.0
    }
}

/// Minimum price of a single [`TimeSlot`] across all the [`SubField`]s of a
/// [`Complex`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SlotPrice {
    /// [`TimeSlot`] the price is for.
    pub slot: TimeSlot,

    /// Minimum positive [`SubField`] price, or zero if there is none.
    pub price: Money,
}

impl SlotPrice {
    /// Calculates the [`SlotPrice`] of the given [`TimeSlot`] from all the
    /// [`SubField`]s fetched for it, regardless of their availability.
    #[must_use]
    pub fn of(slot: TimeSlot, fields: &[SubField]) -> Self {
        let currency = fields
            .first()
            .map_or(Currency::Vnd, |f| f.price.currency);
        Self {
            price: min_positive_price(fields.iter())
                .unwrap_or(Money::zero(currency)),
            slot,
        }
    }
}

/// Cheapest and priciest [`TimeSlot`]s of a [`Complex`] for one date.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Extremes {
    /// [`SlotPrice`] with the lowest positive price.
    ///
    /// Zero prices mean "no price data" and are never the cheapest.
    pub cheapest: Option<SlotPrice>,

    /// [`SlotPrice`] with the highest price.
    pub priciest: Option<SlotPrice>,
}

impl Extremes {
    /// Reduces per-slot prices into [`Extremes`].
    ///
    /// Ties are resolved in favor of the earlier [`SlotPrice`].
    #[must_use]
    pub fn reduce(prices: impl IntoIterator<Item = SlotPrice>) -> Self {
        prices.into_iter().fold(Self::default(), |mut acc, sp| {
            let cheaper = acc
                .cheapest
                .as_ref()
                .map_or(true, |c| sp.price.amount < c.price.amount);
            if sp.price.is_positive() && cheaper {
                acc.cheapest = Some(sp.clone());
            }

            let pricier = acc
                .priciest
                .as_ref()
                .map_or(true, |p| sp.price.amount > p.price.amount);
            if pricier {
                acc.priciest = Some(sp);
            }

            acc
        })
    }
}

/// Returns the minimum strictly positive price of the provided
/// [`SubField`]s.
fn min_positive_price<'f>(
    fields: impl Iterator<Item = &'f SubField>,
) -> Option<Money> {
    fields
        .map(|f| f.price)
        .filter(Money::is_positive)
        .min_by_key(|p| p.amount)
}

/// Converts a collection length into a [`u32`] counter.
fn saturating_count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

#[cfg(test)]
pub(crate) mod spec {
    use common::{Currency, Money};

    use crate::domain::{complex, field, slot, SubField, TimeSlot};

    use super::{Availability, ComposeCount, Extremes, SlotPrice};

    pub(crate) fn vnd(amount: i64) -> Money {
        Money::whole(amount, Currency::Vnd)
    }

    pub(crate) fn sub_field(id: u32, price: i64, is_available: bool) -> SubField {
        SubField {
            id: field::Id::from(id),
            complex_id: complex::Id::from(1),
            name: complex::Name::new(format!("Sân {id}")).unwrap(),
            address: complex::Address::new("1 Nguyễn Huệ"),
            image: None,
            type_name: "Sân 5 người".into(),
            price: vnd(price),
            is_available,
            amenities: vec![],
            rating: complex::Rating::default(),
            review_count: 0,
            is_favorite: false,
        }
    }

    pub(crate) fn time_slot(id: u32) -> TimeSlot {
        TimeSlot {
            id: slot::Id::from(id),
            name: slot::Name::new(format!("Ca {id}")).unwrap(),
            start: time::Time::from_hms(17, 0, 0).unwrap(),
            end: time::Time::from_hms(18, 30, 0).unwrap(),
        }
    }

    #[test]
    fn min_price_skips_zero_prices() {
        let fields = [
            sub_field(1, 0, true),
            sub_field(2, 300_000, true),
            sub_field(3, 250_000, false),
        ];
        let a = Availability::aggregate(&fields, None);

        assert_eq!(a.min_price, vnd(250_000));
    }

    #[test]
    fn min_price_is_zero_when_no_positive_price() {
        assert_eq!(Availability::aggregate(&[], None).min_price, vnd(0));

        let fields = [sub_field(1, 0, true), sub_field(2, 0, true)];
        assert_eq!(Availability::aggregate(&fields, None).min_price, vnd(0));
    }

    #[test]
    fn compose_count_steps() {
        let expected = [1, 1, 2, 3, 4, 4, 6, 6, 6, 6];
        for (count, want) in expected.into_iter().enumerate() {
            let count = u32::try_from(count).unwrap();
            assert_eq!(
                ComposeCount::for_fields(count).get(),
                want,
                "count = {count}",
            );
        }
    }

    #[test]
    fn big_price_is_composed() {
        let fields = (1..=7)
            .map(|id| sub_field(id, 100_000 + i64::from(id), true))
            .collect::<Vec<_>>();
        let a = Availability::aggregate(&fields, None);

        assert_eq!(a.compose_count.get(), 6);
        assert_eq!(a.min_price, vnd(100_001));
        assert_eq!(a.min_price_big, vnd(600_006));
    }

    #[test]
    fn counts_available_only_with_slot() {
        let fields = [
            sub_field(1, 100_000, true),
            sub_field(2, 100_000, false),
            sub_field(3, 100_000, true),
        ];

        let without = Availability::aggregate(&fields, None);
        assert_eq!(without.available_count, 3);
        assert_eq!(without.selected_slot_price, None);
        assert_eq!(without.selected_slot_price_big, None);

        let with = Availability::aggregate(&fields, Some(slot::Id::from(2)));
        assert_eq!(with.available_count, 2);
        assert_eq!(with.total_count, 3);
    }

    #[test]
    fn selected_slot_price_prefers_available_fields() {
        let fields = [
            sub_field(1, 150_000, false),
            sub_field(2, 200_000, true),
            sub_field(3, 180_000, true),
            sub_field(4, 220_000, false),
        ];
        let a = Availability::aggregate(&fields, Some(slot::Id::from(1)));

        assert_eq!(a.min_price, vnd(150_000));
        assert_eq!(a.selected_slot_price, Some(vnd(180_000)));
        assert_eq!(a.selected_slot_price_big, Some(vnd(720_000)));
    }

    #[test]
    fn selected_slot_price_falls_back_to_min_price() {
        let fields = [sub_field(1, 150_000, false), sub_field(2, 90_000, false)];
        let a = Availability::aggregate(&fields, Some(slot::Id::from(1)));

        assert_eq!(a.available_count, 0);
        assert_eq!(a.selected_slot_price, Some(vnd(90_000)));
    }

    #[test]
    fn bundles_are_floored() {
        let fields = (1..=6)
            .map(|id| sub_field(id, 100_000, id != 6))
            .collect::<Vec<_>>();

        let a = Availability::aggregate(&fields[..5], Some(slot::Id::from(1)));
        assert_eq!(a.compose_count.get(), 4);
        assert_eq!(a.available_count, 5);
        assert_eq!(a.available_bundles, 1);
        assert_eq!(a.total_bundles, 1);

        let a = Availability::aggregate(&fields, Some(slot::Id::from(1)));
        assert_eq!(a.compose_count.get(), 6);
        assert_eq!(a.available_bundles, 0);
        assert_eq!(a.total_bundles, 1);

        let a = Availability::aggregate(&fields, None);
        assert_eq!(a.available_bundles, 1);
    }

    #[test]
    fn total_bundles_is_at_least_one() {
        assert_eq!(Availability::aggregate(&[], None).total_bundles, 1);
    }

    #[test]
    fn slot_price_considers_unavailable_fields() {
        let fields = [sub_field(1, 120_000, false), sub_field(2, 160_000, true)];
        let sp = SlotPrice::of(time_slot(1), &fields);

        assert_eq!(sp.price, vnd(120_000));
    }

    #[test]
    fn extremes_skip_zero_for_cheapest_only() {
        let prices = [0, 150_000, 120_000]
            .into_iter()
            .zip(1..)
            .map(|(price, id)| SlotPrice {
                slot: time_slot(id),
                price: vnd(price),
            });
        let e = Extremes::reduce(prices);

        let cheapest = e.cheapest.unwrap();
        assert_eq!(cheapest.price, vnd(120_000));
        assert_eq!(cheapest.slot.id, slot::Id::from(3));
        let priciest = e.priciest.unwrap();
        assert_eq!(priciest.price, vnd(150_000));
        assert_eq!(priciest.slot.id, slot::Id::from(2));
    }

    #[test]
    fn extremes_of_all_zero_prices() {
        let e = Extremes::reduce([SlotPrice {
            slot: time_slot(1),
            price: vnd(0),
        }]);

        assert_eq!(e.cheapest, None);
        assert_eq!(e.priciest.map(|p| p.price), Some(vnd(0)));
    }

    #[test]
    fn extremes_of_nothing() {
        assert_eq!(Extremes::reduce(Vec::new()), Extremes::default());
    }
}
