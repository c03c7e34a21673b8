use super::{
    DraftBooking, Notice, Phase, SlotQuery, SlotResolution, SlotView, SubmitResolution,
    SubmitTicket, TransitionError, BOOKING_SUCCESS_MESSAGE,
};
use crate::constants::{slot_catalog, CONSULTATION_MINUTES};
use crate::gateway::GatewayResult;
use crate::models::{BookingReceipt, Provider, TakenSlot};
use chrono::NaiveDate;
use meditrack_types::{SlotTime, UserId};
use std::collections::HashSet;

/// The booking flow's client-side state.
#[derive(Debug, Clone)]
pub struct SlotSelection {
    today: NaiveDate,
    fee: u32,
    catalog: Vec<SlotTime>,
    phase: Phase,
    provider: Option<Provider>,
    date: Option<NaiveDate>,
    taken: HashSet<SlotTime>,
    start_time: Option<SlotTime>,
    end_time: Option<SlotTime>,
    notice: Option<Notice>,
    slot_generation: u64,
    submit_generation: u64,
}

impl SlotSelection {
    /// A closed flow. `today` is the earliest bookable day; `fee` goes into every draft.
    pub fn new(today: NaiveDate, fee: u32) -> Self {
        Self {
            today,
            fee,
            catalog: slot_catalog(),
            phase: Phase::Idle,
            provider: None,
            date: None,
            taken: HashSet::new(),
            start_time: None,
            end_time: None,
            notice: None,
            slot_generation: 0,
            submit_generation: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn provider(&self) -> Option<&Provider> {
        self.provider.as_ref()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn start_time(&self) -> Option<SlotTime> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<SlotTime> {
        self.end_time
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn is_taken(&self, time: SlotTime) -> bool {
        self.taken.contains(&time)
    }

    /// The current draft, once a start time is chosen.
    pub fn draft(&self) -> Option<DraftBooking> {
        Some(DraftBooking {
            provider_id: self.provider.as_ref()?.id,
            date: self.date?,
            start_time: self.start_time?,
            end_time: self.end_time?,
            amount: self.fee,
        })
    }

    /// The time grid: every catalog entry, disabled when taken or when the flow is not
    /// accepting a time (still loading, submitting, or already booked).
    pub fn slot_views(&self) -> Vec<SlotView> {
        let accepting = matches!(self.phase, Phase::SlotsLoaded | Phase::TimeChosen);
        self.catalog
            .iter()
            .map(|&time| {
                let taken = self.taken.contains(&time);
                SlotView {
                    time,
                    taken,
                    selected: self.start_time == Some(time),
                    enabled: accepting && !taken,
                }
            })
            .collect()
    }

    /// Choose (or switch) the doctor. Clears any date and time picked so far.
    pub fn choose_provider(&mut self, provider: Provider) -> Result<(), TransitionError> {
        self.ensure_open()?;

        tracing::debug!(provider_id = %provider.id, "provider chosen");
        self.provider = Some(provider);
        self.date = None;
        self.clear_slots();
        // a fetch still in flight belongs to the previous doctor
        self.slot_generation += 1;
        self.phase = Phase::ProviderChosen;
        Ok(())
    }

    /// Choose the day. Returns the slot fetch to perform; the grid stays disabled until it is
    /// resolved.
    ///
    /// # Errors
    ///
    /// - `NoProvider` when no doctor is chosen (no fetch is issued)
    /// - `PastDate` when `date` is before today
    pub fn choose_date(&mut self, date: NaiveDate) -> Result<SlotQuery, TransitionError> {
        self.ensure_open()?;
        let provider_id = self
            .provider
            .as_ref()
            .map(|p| p.id)
            .ok_or(TransitionError::NoProvider)?;
        if date < self.today {
            return Err(TransitionError::PastDate {
                date,
                today: self.today,
            });
        }

        self.date = Some(date);
        self.clear_slots();
        self.slot_generation += 1;
        self.phase = Phase::LoadingSlots;
        tracing::debug!(
            %provider_id,
            %date,
            generation = self.slot_generation,
            "fetching taken slots"
        );

        Ok(SlotQuery {
            generation: self.slot_generation,
            provider_id,
            date,
        })
    }

    /// Re-query the taken slots of the current doctor and day without leaving the current
    /// phase. Used after a successful booking.
    pub fn refresh_slots(&mut self) -> Option<SlotQuery> {
        let provider_id = self.provider.as_ref()?.id;
        let date = self.date?;
        self.slot_generation += 1;
        Some(SlotQuery {
            generation: self.slot_generation,
            provider_id,
            date,
        })
    }

    /// Feed back the result of a slot fetch.
    ///
    /// Results for anything but the latest query are dropped. A failed fetch returns the flow
    /// to `ProviderChosen` with the date kept, so choosing the date again retries.
    pub fn resolve_slots(
        &mut self,
        query: &SlotQuery,
        outcome: GatewayResult<Vec<TakenSlot>>,
    ) -> SlotResolution {
        if query.generation != self.slot_generation {
            tracing::warn!(
                generation = query.generation,
                current = self.slot_generation,
                "discarding stale slot response"
            );
            return SlotResolution::Stale;
        }

        match outcome {
            Ok(slots) => {
                self.taken = slots.into_iter().map(|TakenSlot(t)| t).collect();
                if self.phase == Phase::LoadingSlots {
                    self.phase = Phase::SlotsLoaded;
                }
                tracing::debug!(taken = self.taken.len(), "taken slots loaded");
                SlotResolution::Applied
            }
            Err(e) => {
                tracing::warn!("failed to load taken slots: {}", e);
                if self.phase == Phase::LoadingSlots {
                    self.phase = Phase::ProviderChosen;
                    self.notice = Some(Notice::error(e.user_message()));
                }
                SlotResolution::Failed
            }
        }
    }

    /// Pick a start time. The end time is always thirty minutes later.
    ///
    /// # Errors
    ///
    /// - `SlotsNotLoaded` before the taken slots of the chosen day are known
    /// - `SlotTaken` when the backend reported `time` as reserved
    pub fn choose_start_time(&mut self, time: SlotTime) -> Result<SlotTime, TransitionError> {
        self.ensure_open()?;
        match self.phase {
            Phase::SlotsLoaded | Phase::TimeChosen => {}
            Phase::Idle => return Err(TransitionError::NoProvider),
            _ => return Err(TransitionError::SlotsNotLoaded),
        }
        if self.taken.contains(&time) {
            return Err(TransitionError::SlotTaken(time));
        }

        let end_time = time.plus_minutes(CONSULTATION_MINUTES);
        self.start_time = Some(time);
        self.end_time = Some(end_time);
        self.phase = Phase::TimeChosen;
        Ok(end_time)
    }

    /// Start submitting the draft on behalf of `user_id`.
    ///
    /// # Errors
    ///
    /// - `NoTimeChosen` unless a start time is selected
    /// - `NotSignedIn` when there is no logged-in user
    pub fn begin_submit(
        &mut self,
        user_id: Option<UserId>,
    ) -> Result<SubmitTicket, TransitionError> {
        self.ensure_open()?;
        if self.phase != Phase::TimeChosen {
            return Err(TransitionError::NoTimeChosen);
        }
        let user_id = user_id.ok_or(TransitionError::NotSignedIn)?;
        let draft = self.draft().ok_or(TransitionError::NoTimeChosen)?;

        self.submit_generation += 1;
        self.phase = Phase::Submitting;
        self.notice = None;
        tracing::debug!(
            provider_id = %draft.provider_id,
            date = %draft.date,
            start = %draft.start_time,
            "submitting booking"
        );

        Ok(SubmitTicket {
            generation: self.submit_generation,
            user_id,
            draft,
        })
    }

    /// Feed back the result of a submit.
    ///
    /// Success locks the grid until `close()`. A rejection returns to `TimeChosen` with the
    /// date and time still selected so the user can retry or pick another slot.
    pub fn resolve_submit(
        &mut self,
        ticket: &SubmitTicket,
        outcome: GatewayResult<BookingReceipt>,
    ) -> SubmitResolution {
        if ticket.generation != self.submit_generation || self.phase != Phase::Submitting {
            tracing::warn!(generation = ticket.generation, "discarding stale submit response");
            return SubmitResolution::Stale;
        }

        match outcome {
            Ok(_) => {
                tracing::info!(
                    provider_id = %ticket.draft.provider_id,
                    date = %ticket.draft.date,
                    start = %ticket.draft.start_time,
                    "appointment booked"
                );
                self.phase = Phase::Booked;
                self.notice = Some(Notice::success(BOOKING_SUCCESS_MESSAGE));
                SubmitResolution::Booked
            }
            Err(e) => {
                tracing::warn!("booking rejected: {}", e);
                let message = e.user_message();
                self.phase = Phase::TimeChosen;
                self.notice = Some(Notice::error(message.clone()));
                SubmitResolution::Rejected {
                    message,
                    unauthorized: e.is_unauthorized(),
                }
            }
        }
    }

    /// Discard the whole draft. Responses still in flight will be dropped on arrival.
    pub fn close(&mut self) {
        self.provider = None;
        self.date = None;
        self.clear_slots();
        self.notice = None;
        self.slot_generation += 1;
        self.submit_generation += 1;
        self.phase = Phase::Idle;
    }

    /// Same as [`close`](Self::close).
    pub fn reset(&mut self) {
        self.close();
    }

    fn clear_slots(&mut self) {
        self.taken.clear();
        self.start_time = None;
        self.end_time = None;
    }

    fn ensure_open(&self) -> Result<(), TransitionError> {
        match self.phase {
            Phase::Submitting => Err(TransitionError::SubmitInFlight),
            Phase::Booked => Err(TransitionError::AlreadyBooked),
            _ => Ok(()),
        }
    }
}
