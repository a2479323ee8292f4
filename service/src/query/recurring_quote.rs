//! [`RecurringQuote`] definition.

use std::collections::BTreeSet;

use common::{
    operations::{By, Select},
    Date, Weekday,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{Complex, SubField};
use crate::{
    domain::{
        booking, complex, field,
        recurrence::{Plan, Quote},
        Availability,
    },
    infra::{backend, Backend},
    Query, Service,
};

/// [`Query`] pricing a weekly recurring booking before it's submitted.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecurringQuote {
    /// [`complex::Selection`] the booking starts from.
    pub selection: complex::Selection,

    /// ID of the [`SubField`] in view, if any.
    ///
    /// A bundle of the whole [`Complex`] is priced without it.
    pub field_id: Option<field::Id>,

    /// First [`Date`] of the range.
    pub range_start: Date,

    /// Last [`Date`] of the range.
    pub range_end: Date,

    /// [`Weekday`]s to repeat on.
    pub repeat_days: BTreeSet<Weekday>,
}

/// Output of the [`RecurringQuote`] [`Query`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Output {
    /// Priced [`Plan`].
    pub plan: Plan,

    /// [`Quote`] of the [`Plan`].
    pub quote: Quote,

    /// Minimum number of weeks a recurring booking must span.
    pub min_weeks: u32,

    /// Indicator whether the [`Plan`] spans [`Output::min_weeks`] at least,
    /// so can be booked.
    pub meets_minimum: bool,
}

impl<B, S> Query<RecurringQuote> for Service<B, S>
where
    B: Backend<
        Select<By<complex::Detail, complex::Selection>>,
        Ok = complex::Detail,
        Err = Traced<backend::Error>,
    >,
{
    type Ok = Output;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        query: RecurringQuote,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RecurringQuote {
            selection,
            field_id,
            range_start,
            range_end,
            repeat_days,
        } = query;

        let detail = self
            .backend()
            .execute(Select(By::new(selection)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let availability =
            Availability::aggregate(&detail.fields, selection.slot_id);

        let field = field_id
            .map(|id| {
                detail
                    .fields
                    .iter()
                    .find(|f| f.id == id)
                    .ok_or(E::FieldNotFound(id))
            })
            .transpose()
            .map_err(tracerr::wrap!())?;

        let plan = Plan {
            range_start,
            range_end,
            repeat_days,
            unit_price: booking::unit_price(field, &availability),
        };
        let min_weeks = self.config().booking.min_recurring_weeks;

        Ok(Output {
            quote: plan.quote(),
            meets_minimum: plan.meets_minimum(min_weeks),
            min_weeks,
            plan,
        })
    }
}

/// Error of [`RecurringQuote`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` operation failed: {_0}")]
    Backend(backend::Error),

    /// [`SubField`] is not found in the [`Complex`].
    #[display("`SubField(id: {_0})` does not exist")]
    #[from(ignore)]
    FieldNotFound(#[error(not(source))] field::Id),
}

#[cfg(test)]
mod spec {
    use std::collections::BTreeSet;

    use common::{Date, Percent, Weekday};

    use crate::{
        domain::{availability::spec::vnd, complex, field},
        mock, Query as _,
    };

    use super::{ExecutionError, RecurringQuote};

    fn query(field_id: Option<u32>, slot_id: Option<u32>) -> RecurringQuote {
        RecurringQuote {
            selection: complex::Selection {
                complex_id: complex::Id::from(1),
                date: Date::from_calendar(2024, 1, 1).unwrap(),
                slot_id: slot_id.map(Into::into),
            },
            field_id: field_id.map(Into::into),
            range_start: Date::from_calendar(2024, 1, 1).unwrap(),
            range_end: Date::from_calendar(2024, 1, 22).unwrap(),
            repeat_days: BTreeSet::from([Weekday::Monday, Weekday::Wednesday]),
        }
    }

    #[tokio::test]
    async fn quotes_field_in_view() {
        let service = mock::service();

        // Field 3 costs 140_000 in slot 3.
        let out = service.execute(query(Some(3), Some(3))).await.unwrap();

        assert_eq!(out.plan.unit_price, vnd(140_000));
        assert_eq!(out.quote.weeks, 3);
        assert_eq!(out.quote.total_sessions, 6);
        assert_eq!(out.quote.discount, "5".parse::<Percent>().unwrap());
        assert_eq!(out.quote.subtotal, vnd(840_000));
        assert_eq!(out.quote.total, vnd(798_000));
        assert_eq!(out.min_weeks, 4);
        assert!(!out.meets_minimum);
    }

    #[tokio::test]
    async fn quotes_whole_complex_bundle() {
        let service = mock::service();

        let with_slot = service.execute(query(None, Some(3))).await.unwrap();
        // Available fields of slot 3 cost at least 140_000, composed by 4.
        assert_eq!(with_slot.plan.unit_price, vnd(560_000));

        let without_slot = service.execute(query(None, None)).await.unwrap();
        // The cheapest field costs 150_000 without a slot, composed by 4.
        assert_eq!(without_slot.plan.unit_price, vnd(600_000));
    }

    #[tokio::test]
    async fn rejects_unknown_field() {
        let service = mock::service();

        let err = service
            .execute(query(Some(42), Some(2)))
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::FieldNotFound(id) if *id == field::Id::from(42),
        ));
    }
}
