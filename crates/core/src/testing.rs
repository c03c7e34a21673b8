//! In-memory backend shared by the unit tests.

use crate::gateway::{BookingGateway, GatewayResult};
use crate::models::{
    AppointmentRow, BookingReceipt, BookingRequest, Provider, StatusMessage, TakenSlot,
};
use crate::session::Identity;
use crate::GatewayError;
use async_trait::async_trait;
use chrono::NaiveDate;
use meditrack_types::{AppointmentId, ProviderId, SlotTime, UserId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Records every call. Fetches for a gated date wait until the gate is opened.
#[derive(Default)]
pub(crate) struct FakeBackend {
    taken: Mutex<HashMap<NaiveDate, Vec<TakenSlot>>>,
    gates: HashMap<NaiveDate, Arc<Notify>>,
    reject_with: Option<GatewayFailure>,
    doctors: Vec<Provider>,
    calls: Mutex<Vec<String>>,
}

#[derive(Clone, Copy)]
pub(crate) enum GatewayFailure {
    Conflict,
    Unauthorized,
}

impl FakeBackend {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn with_taken(self, date: NaiveDate, times: &[&str]) -> Self {
        self.taken
            .lock()
            .unwrap()
            .insert(date, times.iter().map(|s| TakenSlot(time(s))).collect());
        self
    }

    /// Every booking fails with `failure`.
    pub fn rejecting(mut self, failure: GatewayFailure) -> Self {
        self.reject_with = Some(failure);
        self
    }

    pub fn with_doctors(mut self, doctors: Vec<Provider>) -> Self {
        self.doctors = doctors;
        self
    }

    /// Slot fetches for `date` wait until the returned gate is notified.
    pub fn gated(mut self, date: NaiveDate) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.gates.insert(date, gate.clone());
        (self, gate)
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl BookingGateway for FakeBackend {
    async fn list_providers(&self) -> GatewayResult<Vec<Provider>> {
        self.record("providers".into());
        Ok(self.doctors.clone())
    }

    async fn provider_by_user_id(&self, user_id: UserId) -> GatewayResult<Provider> {
        self.record(format!("provider of user {user_id}"));
        self.doctors
            .iter()
            .find(|d| d.user_id == Some(user_id))
            .cloned()
            .ok_or(GatewayError::Validation {
                status: 404,
                message: Some("Doctor not found".into()),
            })
    }

    async fn taken_slots(
        &self,
        provider_id: ProviderId,
        date: NaiveDate,
    ) -> GatewayResult<Vec<TakenSlot>> {
        self.record(format!("slots {provider_id} {date}"));
        if let Some(gate) = self.gates.get(&date) {
            gate.notified().await;
        }
        let taken = self.taken.lock().unwrap();
        Ok(taken.get(&date).cloned().unwrap_or_default())
    }

    async fn submit_booking(&self, request: &BookingRequest) -> GatewayResult<BookingReceipt> {
        self.record(format!("book {} {}", request.date, request.start_time));
        match self.reject_with {
            Some(GatewayFailure::Conflict) => {
                return Err(GatewayError::Validation {
                    status: 409,
                    message: Some("Slot already booked".into()),
                })
            }
            Some(GatewayFailure::Unauthorized) => {
                return Err(GatewayError::Unauthorized { status: 401 })
            }
            None => {}
        }
        self.taken
            .lock()
            .unwrap()
            .entry(request.date)
            .or_default()
            .push(TakenSlot(request.start_time));
        Ok(BookingReceipt(serde_json::json!({ "apId": 1 })))
    }

    async fn cancel_appointment(&self, id: AppointmentId) -> GatewayResult<StatusMessage> {
        self.record(format!("cancel {id}"));
        Ok(StatusMessage {
            message: "Appointment cancelled".into(),
        })
    }

    async fn confirm_appointment(&self, id: AppointmentId) -> GatewayResult<StatusMessage> {
        self.record(format!("confirm {id}"));
        Ok(StatusMessage {
            message: "Appointment confirmed".into(),
        })
    }

    async fn all_appointments(&self) -> GatewayResult<Vec<AppointmentRow>> {
        self.record("all appointments".into());
        Ok(vec![])
    }

    async fn user_appointments(&self, user_id: UserId) -> GatewayResult<Vec<AppointmentRow>> {
        self.record(format!("appointments of user {user_id}"));
        Ok(vec![])
    }

    async fn doctor_appointments(
        &self,
        provider_id: ProviderId,
    ) -> GatewayResult<Vec<AppointmentRow>> {
        self.record(format!("appointments of doctor {provider_id}"));
        Ok(vec![])
    }
}

pub(crate) fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub(crate) fn time(s: &str) -> SlotTime {
    SlotTime::parse(s).unwrap()
}

pub(crate) fn provider(id: i64) -> Provider {
    Provider {
        id: ProviderId::new(id),
        first_name: "Amina".into(),
        last_name: "Otieno".into(),
        specialization: "Cardiology".into(),
        email: String::new(),
        contact_no: String::new(),
        available_days: String::new(),
        user_id: None,
    }
}

pub(crate) fn identity(role: &str) -> Identity {
    Identity {
        user_id: UserId::new(7),
        first_name: "Pat".into(),
        last_name: "Lee".into(),
        email: "pat@clinic.test".into(),
        role_claim: role.into(),
        doc_id: None,
    }
}
