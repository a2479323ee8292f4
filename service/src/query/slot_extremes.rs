//! [`SlotExtremes`] definition.

use common::{
    operations::{By, Select},
    Date,
};
use futures::future;
use itertools::{Either, Itertools as _};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::{Complex, SubField};
use crate::{
    domain::{
        availability::{Extremes, SlotPrice},
        complex, TimeSlot,
    },
    infra::{backend, Backend},
    Query, Service,
};

/// [`Query`] finding the cheapest and the priciest [`TimeSlot`]s of a
/// [`Complex`] on a [`Date`].
///
/// Every [`TimeSlot`] is fetched separately, since prices of the
/// [`SubField`]s differ by [`TimeSlot`]. [`TimeSlot`]s failed to be fetched
/// are skipped.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SlotExtremes {
    /// ID of the [`Complex`].
    pub complex_id: complex::Id,

    /// [`Date`] to look at.
    pub date: Date,
}

impl<B, S> Query<SlotExtremes> for Service<B, S>
where
    B: Backend<
            Select<By<Vec<TimeSlot>, ()>>,
            Ok = Vec<TimeSlot>,
            Err = Traced<backend::Error>,
        > + Backend<
            Select<By<complex::Detail, complex::Selection>>,
            Ok = complex::Detail,
            Err = Traced<backend::Error>,
        >,
{
    type Ok = Extremes;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        SlotExtremes { complex_id, date }: SlotExtremes,
    ) -> Result<Self::Ok, Self::Err> {
        let slots = self
            .backend()
            .execute(Select(By::<Vec<TimeSlot>, _>::new(())))
            .await
            .map_err(tracerr::wrap!())?;

        let fetches = slots.into_iter().map(|slot| async move {
            let selection = complex::Selection {
                complex_id,
                date,
                slot_id: Some(slot.id),
            };
            let res = self
                .backend()
                .execute(Select(By::<complex::Detail, _>::new(selection)))
                .await;
            (slot, res)
        });
        let details = future::join_all(fetches).await;

        let (prices, failed): (Vec<_>, Vec<_>) =
            details.into_iter().partition_map(|(slot, res)| match res {
                Ok(d) => Either::Left(SlotPrice::of(slot, &d.fields)),
                Err(e) => Either::Right((slot.id, e)),
            });
        for (slot_id, e) in failed {
            log::warn!(
                %complex_id,
                %date,
                %slot_id,
                "skipping `TimeSlot` failed to be fetched: {e}",
            );
        }

        Ok(Extremes::reduce(prices))
    }
}

#[cfg(test)]
mod spec {
    use common::Date;

    use crate::{
        domain::{availability::spec::vnd, complex, slot},
        mock, Query as _,
    };

    use super::SlotExtremes;

    fn query() -> SlotExtremes {
        SlotExtremes {
            complex_id: complex::Id::from(1),
            date: Date::from_calendar(2024, 1, 1).unwrap(),
        }
    }

    #[tokio::test]
    async fn finds_extremes_across_slots() {
        let service = mock::service();

        let extremes = service.execute(query()).await.unwrap();

        // Per-slot minimums are `[0, 150_000, 120_000]`.
        let cheapest = extremes.cheapest.unwrap();
        assert_eq!(cheapest.slot.id, slot::Id::from(3));
        assert_eq!(cheapest.price, vnd(120_000));

        let priciest = extremes.priciest.unwrap();
        assert_eq!(priciest.slot.id, slot::Id::from(2));
        assert_eq!(priciest.price, vnd(150_000));
    }

    #[tokio::test]
    async fn skips_failed_slots() {
        let service = mock::service();
        service.backend().fail_slot(slot::Id::from(3));

        let extremes = service.execute(query()).await.unwrap();

        assert_eq!(extremes.cheapest.unwrap().slot.id, slot::Id::from(2));
        assert_eq!(extremes.priciest.unwrap().slot.id, slot::Id::from(2));
    }

    #[tokio::test]
    async fn nothing_when_all_slots_fail() {
        let service = mock::service();
        service.backend().fail_details();

        let extremes = service.execute(query()).await.unwrap();

        assert!(extremes.cheapest.is_none());
        assert!(extremes.priciest.is_none());
    }
}
