//! [`Command`] for submitting a booking.

use common::{
    operations::{By, Insert, Select},
    Date,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::{Complex, SubField};
use crate::{
    domain::{
        booking::{Draft, Mode, Target, ValidationError},
        complex, field, slot, user, Availability, Intent, TimeSlot,
    },
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for submitting a booking of a [`SubField`] or of a bundle of
/// [`SubField`]s of a whole [`Complex`].
///
/// The booking is validated against fresh availability and handed to the
/// [`Backend`] once. It's never retried.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubmitBooking {
    /// ID of the authenticated user, if any.
    pub user_id: Option<user::Id>,

    /// ID of the [`Complex`] to book in.
    pub complex_id: complex::Id,

    /// ID of the [`SubField`] to book, if any.
    ///
    /// A bundle of the whole [`Complex`] is booked without it.
    pub field_id: Option<field::Id>,

    /// [`Date`] to book, if selected.
    pub date: Option<Date>,

    /// [`TimeSlot`] to book, if selected.
    pub slot_id: Option<slot::Id>,

    /// Booking [`Mode`].
    pub mode: Mode,
}

impl<B, S> Command<SubmitBooking> for Service<B, S>
where
    B: Backend<
            Select<By<Vec<TimeSlot>, ()>>,
            Ok = Vec<TimeSlot>,
            Err = Traced<backend::Error>,
        > + Backend<
            Select<By<complex::Detail, complex::Selection>>,
            Ok = complex::Detail,
            Err = Traced<backend::Error>,
        > + Backend<Insert<Intent>, Ok = (), Err = Traced<backend::Error>>,
{
    type Ok = Intent;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: SubmitBooking) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SubmitBooking {
            user_id,
            complex_id,
            field_id,
            date,
            slot_id,
            mode,
        } = cmd;

        // Nothing is fetched for a draft that is rejected anyway.
        if user_id.is_none() {
            return Err(tracerr::new!(E::Rejected(
                ValidationError::Unauthenticated
            )));
        }
        let Some((date, slot_id)) = date.zip(slot_id) else {
            return Err(tracerr::new!(E::Rejected(
                ValidationError::MissingDateOrSlot
            )));
        };

        let selection = complex::Selection {
            complex_id,
            date,
            slot_id: Some(slot_id),
        };
        let (slots, detail) = futures::try_join!(
            self.backend().execute(Select(By::<Vec<TimeSlot>, _>::new(()))),
            self.backend()
                .execute(Select(By::<complex::Detail, _>::new(selection))),
        )
        .map_err(tracerr::map_from_and_wrap!(=> E))?;

        let slot = slots
            .iter()
            .find(|s| s.id == slot_id)
            .ok_or(E::SlotNotFound(slot_id))
            .map_err(tracerr::wrap!())?;
        let availability =
            Availability::aggregate(&detail.fields, Some(slot_id));
        let target =
            field_id.map_or(Target::Complex(complex_id), Target::Field);

        let intent = Intent::build(
            Draft {
                user_id,
                date: Some(date),
                slot: Some(slot),
                target,
                mode: &mode,
                fields: &detail.fields,
                availability: &availability,
            },
            &self.config().booking,
        )
        .map_err(tracerr::from_and_wrap!(=> E))?;

        self.backend()
            .execute(Insert(intent.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        log::info!(
            booking = %target,
            %date,
            %slot_id,
            total = %intent.total_price.amount,
            "booking submitted",
        );

        Ok(intent)
    }
}

/// Error of [`SubmitBooking`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` operation failed: {_0}")]
    Backend(backend::Error),

    /// Booking doesn't satisfy a precondition.
    #[display("Booking is rejected: {_0}")]
    Rejected(ValidationError),

    /// [`TimeSlot`] is not in the catalog.
    #[display("`TimeSlot(id: {_0})` does not exist")]
    #[from(ignore)]
    SlotNotFound(#[error(not(source))] slot::Id),
}

#[cfg(test)]
mod spec {
    use std::collections::BTreeSet;

    use common::{Date, Weekday};

    use crate::{
        domain::{
            availability::spec::vnd,
            booking::{Mode, Recurrence, Target, ValidationError},
            complex, field, slot, user,
        },
        mock, Command as _,
    };

    use super::{ExecutionError, SubmitBooking};

    fn date() -> Date {
        Date::from_calendar(2024, 1, 1).unwrap()
    }

    fn cmd(field_id: Option<u32>, mode: Mode) -> SubmitBooking {
        SubmitBooking {
            user_id: Some(user::Id::from(7)),
            complex_id: complex::Id::from(1),
            field_id: field_id.map(Into::into),
            date: Some(date()),
            slot_id: Some(slot::Id::from(2)),
            mode,
        }
    }

    fn rejection(err: &ExecutionError) -> Option<ValidationError> {
        match err {
            ExecutionError::Rejected(e) => Some(*e),
            ExecutionError::Backend(_) | ExecutionError::SlotNotFound(_) => {
                None
            }
        }
    }

    #[tokio::test]
    async fn submits_single_field() {
        let service = mock::service();

        let intent = service.execute(cmd(Some(1), Mode::Single)).await.unwrap();

        assert_eq!(intent.target, Target::Field(field::Id::from(1)));
        assert_eq!(intent.slot_name.to_string(), "Ca 2");
        assert_eq!(intent.total_price, vnd(200_000));
        assert_eq!(service.backend().bookings(), [intent]);
    }

    #[tokio::test]
    async fn submits_recurring_complex_bundle() {
        let service = mock::service();
        let mode = Mode::Recurring(Recurrence {
            range_start: Some(date()),
            range_end: Some(Date::from_calendar(2024, 1, 29).unwrap()),
            repeat_days: BTreeSet::from([Weekday::Monday, Weekday::Friday]),
        });

        let intent = service.execute(cmd(None, mode)).await.unwrap();

        // 4 available fields at least 180_000 each, composed by 4.
        assert_eq!(intent.target.to_string(), "complex-1");
        assert_eq!(intent.price, vnd(720_000));
        // 8 sessions with 10% discount.
        assert_eq!(intent.total_price, vnd(5_184_000));
        assert_eq!(intent.recurring_weeks_preset, 4);
        assert_eq!(service.backend().bookings().len(), 1);
    }

    #[tokio::test]
    async fn rejects_without_date_or_slot() {
        let service = mock::service();

        let mut no_slot = cmd(Some(1), Mode::Single);
        no_slot.slot_id = None;
        let err = service.execute(no_slot).await.unwrap_err();
        assert_eq!(
            rejection(err.as_ref()),
            Some(ValidationError::MissingDateOrSlot),
        );

        let mut no_date = cmd(Some(1), Mode::Single);
        no_date.date = None;
        let err = service.execute(no_date).await.unwrap_err();
        assert_eq!(
            rejection(err.as_ref()),
            Some(ValidationError::MissingDateOrSlot),
        );

        assert!(service.backend().bookings().is_empty());
    }

    #[tokio::test]
    async fn rejects_anonymous() {
        let service = mock::service();

        let mut anonymous = cmd(Some(1), Mode::Single);
        anonymous.user_id = None;
        anonymous.date = None;
        let err = service.execute(anonymous).await.unwrap_err();

        assert_eq!(
            rejection(err.as_ref()),
            Some(ValidationError::Unauthenticated),
        );
    }

    #[tokio::test]
    async fn rejects_taken_field() {
        let service = mock::service();

        let err = service
            .execute(cmd(Some(2), Mode::Single))
            .await
            .unwrap_err();

        assert_eq!(
            rejection(err.as_ref()),
            Some(ValidationError::FieldUnavailable),
        );
        assert!(service.backend().bookings().is_empty());
    }

    #[tokio::test]
    async fn rejects_unknown_slot() {
        let service = mock::service();

        let mut unknown = cmd(Some(1), Mode::Single);
        unknown.slot_id = Some(slot::Id::from(99));
        let err = service.execute(unknown).await.unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::SlotNotFound(_)));
    }

    #[tokio::test]
    async fn surfaces_backend_failure() {
        let service = mock::service();
        service.backend().fail_bookings();

        let err = service
            .execute(cmd(Some(1), Mode::Single))
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::Backend(_)));
    }
}
