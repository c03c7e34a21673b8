//! Appointment booking: choose a doctor, a day and a free half-hour, then submit.
//!
//! [`SlotSelection`] is the synchronous state machine. It never performs I/O: transitions that
//! need the network hand back a ticket ([`SlotQuery`], [`SubmitTicket`]) and the result is fed
//! back with the ticket. Every ticket carries a generation number, and a result whose
//! generation is no longer current is discarded. [`BookingFlow`] drives the machine against a
//! [`crate::gateway::BookingGateway`].
//!
//! ```text
//! Idle -> ProviderChosen -> LoadingSlots -> SlotsLoaded -> TimeChosen -> Submitting -> Booked
//!                 ^              |  (fetch failed)             ^            | (rejected)
//!                 +--------------+                             +------------+
//! ```
//!
//! Slot availability shown here is advisory. The backend is the authority on conflicts; a slot
//! taken by another client in the meantime comes back as a rejected submit.

mod flow;
mod selection;

pub use flow::BookingFlow;
pub use selection::SlotSelection;

use chrono::NaiveDate;
use meditrack_types::{ProviderId, SlotTime, UserId};

/// Where the booking flow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    ProviderChosen,
    /// A date is chosen and its taken slots are being fetched.
    LoadingSlots,
    SlotsLoaded,
    TimeChosen,
    Submitting,
    /// Terminal until `close()`: every slot control is disabled.
    Booked,
}

/// Unsubmitted selection. Lives from "doctor chosen" to close or submit result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftBooking {
    pub provider_id: ProviderId,
    pub date: NaiveDate,
    pub start_time: SlotTime,
    pub end_time: SlotTime,
    pub amount: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient, dismissible notification shown after an action settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// One button of the time grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotView {
    pub time: SlotTime,
    pub taken: bool,
    pub selected: bool,
    pub enabled: bool,
}

/// A slot fetch the caller must perform and report back with
/// [`SlotSelection::resolve_slots`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotQuery {
    pub generation: u64,
    pub provider_id: ProviderId,
    pub date: NaiveDate,
}

/// A submit the caller must perform and report back with [`SlotSelection::resolve_submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTicket {
    pub generation: u64,
    pub user_id: UserId,
    pub draft: DraftBooking,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotResolution {
    Applied,
    Failed,
    /// A newer query was issued (or the flow was closed) before this one settled.
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitResolution {
    Booked,
    Rejected {
        message: String,
        /// The backend refused the session; the caller should clear credentials.
        unauthorized: bool,
    },
    Stale,
}

pub const BOOKING_SUCCESS_MESSAGE: &str = "Appointment booked successfully!";

/// A transition that is not allowed from the current state. Nothing changes when one is
/// returned, and no request is issued.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("choose a doctor first")]
    NoProvider,
    #[error("{date} is in the past (earliest bookable day is {today})")]
    PastDate { date: NaiveDate, today: NaiveDate },
    #[error("available slots have not been loaded yet")]
    SlotsNotLoaded,
    #[error("{0} is already taken")]
    SlotTaken(SlotTime),
    #[error("choose a start time first")]
    NoTimeChosen,
    #[error("please log in to book an appointment")]
    NotSignedIn,
    #[error("a booking is already being submitted")]
    SubmitInFlight,
    #[error("this appointment is already booked; close the booking to start another")]
    AlreadyBooked,
}
