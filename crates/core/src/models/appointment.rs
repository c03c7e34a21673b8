use crate::booking::DraftBooking;
use crate::models::Provider;
use chrono::{DateTime, NaiveDate, Utc};
use meditrack_types::{AppointmentId, ProviderId, SlotTime, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an appointment as stored by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    /// Any status this client does not know; shown but never acted on.
    #[serde(other)]
    Other,
}

impl AppointmentStatus {
    pub const KNOWN: [AppointmentStatus; 3] = [
        AppointmentStatus::Pending,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Other => "other",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!(
                "unknown appointment status {other:?} (expected pending, confirmed or cancelled)"
            )),
        }
    }
}

/// One appointment row of the `appointments` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    #[serde(rename = "apId")]
    pub id: AppointmentId,
    #[serde(rename = "userId", default)]
    pub user_id: Option<UserId>,
    #[serde(rename = "docId", default)]
    pub provider_id: Option<ProviderId>,
    #[serde(rename = "apDate")]
    pub date: NaiveDate,
    #[serde(rename = "startTime")]
    pub start_time: SlotTime,
    #[serde(rename = "endTime", default)]
    pub end_time: Option<SlotTime>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(rename = "apStatus", default)]
    pub status: Option<AppointmentStatus>,
    #[serde(rename = "updatedOn", default)]
    pub updated_on: Option<String>,
}

impl AppointmentRecord {
    /// Status with the doctor-screen convention: a row without status is pending.
    pub fn status_or_pending(&self) -> AppointmentStatus {
        self.status.unwrap_or(AppointmentStatus::Pending)
    }
}

/// A start time already reserved for a doctor and day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TakenSlot(pub SlotTime);

impl From<&AppointmentRecord> for TakenSlot {
    fn from(record: &AppointmentRecord) -> Self {
        TakenSlot(record.start_time)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    #[serde(rename = "userId", default)]
    pub id: Option<UserId>,
    #[serde(rename = "fName")]
    pub first_name: String,
    #[serde(rename = "lName")]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "contactNo", default)]
    pub contact_no: String,
}

impl UserSummary {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSummary {
    #[serde(rename = "payStatus")]
    pub status: String,
}

/// Joined row returned by the list endpoints (`/appointments`, `/appointments/user/{id}`,
/// `/appointments/doctor/{id}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentRow {
    pub appointments: AppointmentRecord,
    #[serde(default)]
    pub users: Option<UserSummary>,
    #[serde(default)]
    pub doctors: Option<Provider>,
    #[serde(default)]
    pub payments: Option<PaymentSummary>,
}

impl AppointmentRow {
    pub fn patient_name(&self) -> String {
        self.users
            .as_ref()
            .map(UserSummary::full_name)
            .unwrap_or_default()
    }

    pub fn doctor_name(&self) -> String {
        self.doctors
            .as_ref()
            .map(Provider::full_name)
            .unwrap_or_default()
    }

    pub fn payment_status(&self) -> Option<&str> {
        self.payments.as_ref().map(|p| p.status.as_str())
    }
}

/// Body of `POST /appointments`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingRequest {
    #[serde(rename = "userId")]
    pub user_id: UserId,
    #[serde(rename = "docId")]
    pub provider_id: ProviderId,
    #[serde(rename = "apDate")]
    pub date: NaiveDate,
    #[serde(rename = "startTime")]
    pub start_time: SlotTime,
    #[serde(rename = "endTime")]
    pub end_time: SlotTime,
    pub amount: u32,
    #[serde(rename = "createdOn")]
    pub created_on: DateTime<Utc>,
    #[serde(rename = "updatedOn")]
    pub updated_on: DateTime<Utc>,
}

impl BookingRequest {
    /// Wire body for a draft booked by `user_id`, stamped with `now`. No idempotency key is
    /// attached.
    pub fn from_draft(draft: &DraftBooking, user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            provider_id: draft.provider_id,
            date: draft.date,
            start_time: draft.start_time,
            end_time: draft.end_time,
            amount: draft.amount,
            created_on: now,
            updated_on: now,
        }
    }
}

/// Server-confirmed appointment. The client treats it as opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingReceipt(pub serde_json::Value);

/// `{ "message": ... }` returned by mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub message: String,
}
