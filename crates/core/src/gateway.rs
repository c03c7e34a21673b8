//! Gateway traits: the boundary between Medi-Track logic and the REST API.
//!
//! Each method maps to exactly one HTTP call. Implementations do not retry, cache or reshape
//! results; callers must handle both outcomes of every call. `meditrack-api` provides the HTTP
//! implementation; tests use in-memory doubles.

use crate::models::{
    AccountRecord, AppointmentRow, BookingReceipt, BookingRequest, ComplaintRow, ComplaintUpdate,
    Credentials, LoginResponse, NewComplaint, NewPrescription, Payment, PrescriptionRow, Provider,
    Registration, RoleChange, RoleCount, StatusCount, StatusMessage, TakenSlot, Total,
    Verification,
};
use crate::GatewayError;
use async_trait::async_trait;
use chrono::NaiveDate;
use meditrack_types::{AppointmentId, ComplaintId, ProviderId, UserId};

pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

/// Operations used by the booking flow and the appointment screens.
#[async_trait]
pub trait BookingGateway: Send + Sync {
    /// `GET /doctors`. No pagination.
    async fn list_providers(&self) -> GatewayResult<Vec<Provider>>;

    /// `GET /doctors/user/{userId}`: the doctor record behind a doctor account.
    async fn provider_by_user_id(&self, user_id: UserId) -> GatewayResult<Provider>;

    /// `GET /appointments?docId=&apDate=`. Callers only issue this with both parameters known.
    async fn taken_slots(
        &self,
        provider_id: ProviderId,
        date: NaiveDate,
    ) -> GatewayResult<Vec<TakenSlot>>;

    /// `POST /appointments`. Not idempotent: a retry after an ambiguous failure may create a
    /// second appointment.
    async fn submit_booking(&self, request: &BookingRequest) -> GatewayResult<BookingReceipt>;

    /// `PATCH /appointments/{id}/cancel`.
    async fn cancel_appointment(&self, id: AppointmentId) -> GatewayResult<StatusMessage>;

    /// `PATCH /appointments/{id}/confirm`.
    async fn confirm_appointment(&self, id: AppointmentId) -> GatewayResult<StatusMessage>;

    /// `GET /appointments` (admin).
    async fn all_appointments(&self) -> GatewayResult<Vec<AppointmentRow>>;

    /// `GET /appointments/user/{userId}`.
    async fn user_appointments(&self, user_id: UserId) -> GatewayResult<Vec<AppointmentRow>>;

    /// `GET /appointments/doctor/{docId}`.
    async fn doctor_appointments(
        &self,
        provider_id: ProviderId,
    ) -> GatewayResult<Vec<AppointmentRow>>;
}

/// Account lifecycle: register, verify the mailed code, log in.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> GatewayResult<LoginResponse>;

    async fn register(&self, registration: &Registration) -> GatewayResult<StatusMessage>;

    async fn verify(&self, verification: &Verification) -> GatewayResult<StatusMessage>;
}

/// Prescriptions, payments and support tickets.
#[async_trait]
pub trait RecordsGateway: Send + Sync {
    /// `GET /prescriptions` (admin).
    async fn all_prescriptions(&self) -> GatewayResult<Vec<PrescriptionRow>>;

    /// `GET /prescriptions/user/{userId}`.
    async fn prescriptions_for_user(&self, user_id: UserId) -> GatewayResult<Vec<PrescriptionRow>>;

    /// `GET /prescriptions/doctor/{docId}`, unwrapped from its `{ prescriptions }` envelope.
    async fn prescriptions_for_doctor(
        &self,
        provider_id: ProviderId,
    ) -> GatewayResult<Vec<PrescriptionRow>>;

    /// `POST /prescriptions`. The created row is not read back.
    async fn create_prescription(&self, prescription: &NewPrescription) -> GatewayResult<()>;

    /// `GET /payments/user/{userId}`.
    async fn payments_for_user(&self, user_id: UserId) -> GatewayResult<Vec<Payment>>;

    /// `POST /complaints`. The created ticket is not read back.
    async fn create_complaint(&self, complaint: &NewComplaint) -> GatewayResult<()>;

    /// `GET /complaints/user/{userId}`.
    async fn complaints_for_user(&self, user_id: UserId) -> GatewayResult<Vec<ComplaintRow>>;

    /// `GET /complaints` (admin).
    async fn all_complaints(&self) -> GatewayResult<Vec<ComplaintRow>>;

    /// `PATCH /complaints/{id}`.
    async fn update_complaint_status(
        &self,
        id: ComplaintId,
        update: &ComplaintUpdate,
    ) -> GatewayResult<StatusMessage>;
}

/// Account management and system analytics. Admin only; the backend enforces it.
#[async_trait]
pub trait AdminGateway: Send + Sync {
    /// `GET /users`.
    async fn list_users(&self) -> GatewayResult<Vec<AccountRecord>>;

    /// `PATCH /users/{id}` with `{ role }`: promote to doctor or demote to patient.
    async fn set_user_role(&self, user_id: UserId, change: &RoleChange) -> GatewayResult<()>;

    /// `DELETE /users/{id}`.
    async fn delete_user(&self, user_id: UserId) -> GatewayResult<()>;

    /// `GET /analytics/users/roles`.
    async fn role_breakdown(&self) -> GatewayResult<Vec<RoleCount>>;

    /// `GET /analytics/appointments/status`.
    async fn appointment_status_counts(&self) -> GatewayResult<Vec<StatusCount>>;

    /// `GET /analytics/prescriptions`.
    async fn prescription_total(&self) -> GatewayResult<Total>;

    /// `GET /analytics/complaints`.
    async fn complaint_total(&self) -> GatewayResult<Total>;

    /// `GET /analytics/payments`.
    async fn payment_total(&self) -> GatewayResult<Total>;
}
