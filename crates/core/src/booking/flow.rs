use super::{Phase, SlotResolution, SlotSelection, SubmitResolution, TransitionError};
use crate::gateway::BookingGateway;
use crate::models::{BookingRequest, Provider};
use chrono::{NaiveDate, Utc};
use meditrack_types::{SlotTime, UserId};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Drives a [`SlotSelection`] against a gateway.
///
/// The selection lock is only held between awaits, never across one, so several operations can
/// be in flight at once. Whichever settles out of order is dropped by the selection's generation
/// check.
pub struct BookingFlow<G: BookingGateway + ?Sized> {
    gateway: Arc<G>,
    selection: Mutex<SlotSelection>,
}

impl<G: BookingGateway + ?Sized> BookingFlow<G> {
    pub fn new(gateway: Arc<G>, today: NaiveDate, fee: u32) -> Self {
        Self {
            gateway,
            selection: Mutex::new(SlotSelection::new(today, fee)),
        }
    }

    /// Runs `f` with the selection locked. `f` must not block.
    pub fn with_selection<R>(&self, f: impl FnOnce(&mut SlotSelection) -> R) -> R {
        f(&mut self.lock())
    }

    /// A copy of the current selection, for rendering.
    pub fn snapshot(&self) -> SlotSelection {
        self.lock().clone()
    }

    pub fn phase(&self) -> Phase {
        self.lock().phase()
    }

    pub fn choose_provider(&self, provider: Provider) -> Result<(), TransitionError> {
        self.lock().choose_provider(provider)
    }

    /// Choose the day and load its taken slots.
    pub async fn choose_date(&self, date: NaiveDate) -> Result<SlotResolution, TransitionError> {
        let query = self.lock().choose_date(date)?;
        let outcome = self
            .gateway
            .taken_slots(query.provider_id, query.date)
            .await;
        Ok(self.lock().resolve_slots(&query, outcome))
    }

    pub fn choose_start_time(&self, time: SlotTime) -> Result<SlotTime, TransitionError> {
        self.lock().choose_start_time(time)
    }

    /// Submit the current draft for `user_id`.
    ///
    /// After a successful booking the taken slots are fetched again so the grid reflects the new
    /// reservation. A failure of that refresh leaves the booking in place.
    pub async fn submit(
        &self,
        user_id: Option<UserId>,
    ) -> Result<SubmitResolution, TransitionError> {
        let ticket = self.lock().begin_submit(user_id)?;
        let request = BookingRequest::from_draft(&ticket.draft, ticket.user_id, Utc::now());
        let outcome = self.gateway.submit_booking(&request).await;
        let resolution = self.lock().resolve_submit(&ticket, outcome);

        if resolution == SubmitResolution::Booked {
            let refresh = self.lock().refresh_slots();
            if let Some(query) = refresh {
                let outcome = self
                    .gateway
                    .taken_slots(query.provider_id, query.date)
                    .await;
                self.lock().resolve_slots(&query, outcome);
            }
        }

        Ok(resolution)
    }

    pub fn close(&self) {
        self.lock().close();
    }

    fn lock(&self) -> MutexGuard<'_, SlotSelection> {
        self.selection.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::CONSULTATION_FEE;
    use crate::testing::{day, provider, time as t, FakeBackend, GatewayFailure};

    fn flow(backend: Arc<FakeBackend>) -> BookingFlow<FakeBackend> {
        BookingFlow::new(backend, day(2024, 5, 30), CONSULTATION_FEE)
    }

    #[tokio::test]
    async fn test_books_and_refreshes_taken_slots() {
        let backend = Arc::new(FakeBackend::default().with_taken(day(2024, 6, 1), &["09:00"]));
        let flow = flow(backend.clone());

        flow.choose_provider(provider(7)).unwrap();
        assert_eq!(flow.choose_date(day(2024, 6, 1)).await, Ok(SlotResolution::Applied));
        assert_eq!(
            flow.choose_start_time(t("09:00")),
            Err(TransitionError::SlotTaken(t("09:00")))
        );
        flow.choose_start_time(t("09:30")).unwrap();

        let resolution = flow.submit(Some(UserId::new(4))).await.unwrap();
        assert_eq!(resolution, SubmitResolution::Booked);
        assert_eq!(
            backend.calls(),
            vec![
                "slots 7 2024-06-01".to_owned(),
                "book 2024-06-01 09:30".to_owned(),
                "slots 7 2024-06-01".to_owned(),
            ]
        );

        let snapshot = flow.snapshot();
        assert_eq!(snapshot.phase(), Phase::Booked);
        assert!(snapshot.is_taken(t("09:30")));
        assert!(snapshot.slot_views().iter().all(|v| !v.enabled));
    }

    #[tokio::test]
    async fn test_no_request_without_provider_or_user() {
        let backend = Arc::new(FakeBackend::default());
        let flow = flow(backend.clone());

        assert_eq!(
            flow.choose_date(day(2024, 6, 1)).await,
            Err(TransitionError::NoProvider)
        );

        flow.choose_provider(provider(7)).unwrap();
        flow.choose_date(day(2024, 6, 1)).await.unwrap();
        flow.choose_start_time(t("10:00")).unwrap();
        assert_eq!(flow.submit(None).await, Err(TransitionError::NotSignedIn));

        assert_eq!(backend.calls(), vec!["slots 7 2024-06-01".to_owned()]);
    }

    #[tokio::test]
    async fn test_rejected_submit_keeps_selection() {
        let backend = Arc::new(FakeBackend::default().rejecting(GatewayFailure::Conflict));
        let flow = flow(backend.clone());

        flow.choose_provider(provider(7)).unwrap();
        flow.choose_date(day(2024, 6, 1)).await.unwrap();
        flow.choose_start_time(t("10:00")).unwrap();
        let resolution = flow.submit(Some(UserId::new(4))).await.unwrap();

        assert_eq!(
            resolution,
            SubmitResolution::Rejected {
                message: "Slot already booked".into(),
                unauthorized: false,
            }
        );
        let snapshot = flow.snapshot();
        assert_eq!(snapshot.phase(), Phase::TimeChosen);
        assert_eq!(snapshot.start_time(), Some(t("10:00")));
        assert_eq!(
            snapshot.notice().map(|n| n.message.as_str()),
            Some("Slot already booked")
        );
        assert_eq!(backend.calls().len(), 2, "no refetch after a rejection");
    }

    #[tokio::test]
    async fn test_unauthorized_submit_is_flagged() {
        let backend = Arc::new(FakeBackend::default().rejecting(GatewayFailure::Unauthorized));
        let flow = flow(backend);

        flow.choose_provider(provider(7)).unwrap();
        flow.choose_date(day(2024, 6, 1)).await.unwrap();
        flow.choose_start_time(t("10:00")).unwrap();

        match flow.submit(Some(UserId::new(4))).await.unwrap() {
            SubmitResolution::Rejected { unauthorized, .. } => assert!(unauthorized),
            other => panic!("expected a rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_slower_earlier_fetch_is_discarded() {
        let (backend, gate) = FakeBackend::default()
            .with_taken(day(2024, 6, 1), &["08:00"])
            .with_taken(day(2024, 6, 2), &["10:00"])
            .gated(day(2024, 6, 1));
        let backend = Arc::new(backend);
        let flow = Arc::new(flow(backend.clone()));
        flow.choose_provider(provider(7)).unwrap();

        let slow = {
            let flow = flow.clone();
            tokio::spawn(async move { flow.choose_date(day(2024, 6, 1)).await })
        };
        while backend.calls().is_empty() {
            tokio::task::yield_now().await;
        }

        assert_eq!(flow.choose_date(day(2024, 6, 2)).await, Ok(SlotResolution::Applied));
        gate.notify_one();
        assert_eq!(slow.await.unwrap(), Ok(SlotResolution::Stale));

        let snapshot = flow.snapshot();
        assert_eq!(snapshot.date(), Some(day(2024, 6, 2)));
        assert!(snapshot.is_taken(t("10:00")));
        assert!(!snapshot.is_taken(t("08:00")));
        assert_eq!(snapshot.phase(), Phase::SlotsLoaded);
    }

    #[tokio::test]
    async fn test_close_while_fetching_discards_the_response() {
        let (backend, gate) = FakeBackend::default()
            .with_taken(day(2024, 6, 1), &["08:00"])
            .gated(day(2024, 6, 1));
        let backend = Arc::new(backend);
        let flow = Arc::new(flow(backend.clone()));
        flow.choose_provider(provider(7)).unwrap();

        let pending = {
            let flow = flow.clone();
            tokio::spawn(async move { flow.choose_date(day(2024, 6, 1)).await })
        };
        while backend.calls().is_empty() {
            tokio::task::yield_now().await;
        }
        flow.close();
        gate.notify_one();

        assert_eq!(pending.await.unwrap(), Ok(SlotResolution::Stale));
        assert_eq!(flow.phase(), Phase::Idle);
        assert!(!flow.with_selection(|s| s.is_taken(t("08:00"))));
    }
}
