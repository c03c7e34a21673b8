//! Skip-gated fetches.
//!
//! Every identity-scoped fetch checks its preconditions before touching the gateway. When they
//! do not hold (nobody signed in, wrong role, missing parameter) the fetch settles as
//! [`Fetch::Skipped`] and no request is issued. A logged-out client never calls an endpoint that
//! needs a user id.

use crate::gateway::{BookingGateway, GatewayResult, RecordsGateway};
use crate::models::{AppointmentRow, ComplaintRow, Payment, PrescriptionRow, TakenSlot};
use crate::session::{Identity, SessionStore};
use chrono::NaiveDate;
use meditrack_types::{ProviderId, Role, UserId};
use std::future::Future;

/// Outcome of a gated fetch that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetch<T> {
    /// Preconditions not met; nothing was requested.
    Skipped,
    Loaded(T),
}

impl<T> Fetch<T> {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Fetch::Skipped)
    }
}

/// Runs `fetch` with the signed-in user's id, or skips when nobody is signed in.
pub async fn for_user<T, F, Fut>(session: &SessionStore, fetch: F) -> GatewayResult<Fetch<T>>
where
    F: FnOnce(UserId) -> Fut,
    Fut: Future<Output = GatewayResult<T>>,
{
    match signed_in(session) {
        Some(identity) => fetch(identity.user_id).await.map(Fetch::Loaded),
        None => {
            tracing::debug!("skipping user-scoped fetch: not signed in");
            Ok(Fetch::Skipped)
        }
    }
}

/// Runs `fetch` only when the signed-in user holds `role`.
pub async fn for_role<T, F, Fut>(
    session: &SessionStore,
    role: Role,
    fetch: F,
) -> GatewayResult<Fetch<T>>
where
    F: FnOnce(Identity) -> Fut,
    Fut: Future<Output = GatewayResult<T>>,
{
    match signed_in(session).filter(|identity| identity.role() == Some(role)) {
        Some(identity) => fetch(identity.clone()).await.map(Fetch::Loaded),
        None => {
            tracing::debug!(%role, "skipping role-scoped fetch");
            Ok(Fetch::Skipped)
        }
    }
}

/// Taken slots of a doctor on a day. Skipped until both are known.
pub async fn taken_slots<G: BookingGateway + ?Sized>(
    gateway: &G,
    provider_id: Option<ProviderId>,
    date: Option<NaiveDate>,
) -> GatewayResult<Fetch<Vec<TakenSlot>>> {
    match (provider_id, date) {
        (Some(provider_id), Some(date)) => {
            gateway.taken_slots(provider_id, date).await.map(Fetch::Loaded)
        }
        _ => Ok(Fetch::Skipped),
    }
}

/// The signed-in user's own appointments.
pub async fn my_appointments<G: BookingGateway + ?Sized>(
    gateway: &G,
    session: &SessionStore,
) -> GatewayResult<Fetch<Vec<AppointmentRow>>> {
    for_user(session, |user_id| gateway.user_appointments(user_id)).await
}

/// Every appointment in the system. Admin only.
pub async fn all_appointments<G: BookingGateway + ?Sized>(
    gateway: &G,
    session: &SessionStore,
) -> GatewayResult<Fetch<Vec<AppointmentRow>>> {
    for_role(session, Role::Admin, |_| gateway.all_appointments()).await
}

/// Appointments booked with the signed-in doctor.
pub async fn doctor_appointments<G: BookingGateway + ?Sized>(
    gateway: &G,
    session: &SessionStore,
) -> GatewayResult<Fetch<Vec<AppointmentRow>>> {
    for_role(session, Role::Doctor, |identity| async move {
        let provider_id = resolve_provider_id(gateway, &identity).await?;
        gateway.doctor_appointments(provider_id).await
    })
    .await
}

/// The doctor record id of a doctor account: the one carried by the login response, or the one
/// looked up by user id when the login response had none.
pub async fn resolve_provider_id<G: BookingGateway + ?Sized>(
    gateway: &G,
    identity: &Identity,
) -> GatewayResult<ProviderId> {
    match identity.doc_id {
        Some(doc_id) => Ok(doc_id),
        None => Ok(gateway.provider_by_user_id(identity.user_id).await?.id),
    }
}

pub async fn my_prescriptions<G: RecordsGateway + ?Sized>(
    gateway: &G,
    session: &SessionStore,
) -> GatewayResult<Fetch<Vec<PrescriptionRow>>> {
    for_user(session, |user_id| gateway.prescriptions_for_user(user_id)).await
}

/// Prescriptions written by the signed-in doctor.
pub async fn doctor_prescriptions<G: BookingGateway + RecordsGateway + ?Sized>(
    gateway: &G,
    session: &SessionStore,
) -> GatewayResult<Fetch<Vec<PrescriptionRow>>> {
    for_role(session, Role::Doctor, |identity| async move {
        let provider_id = resolve_provider_id(gateway, &identity).await?;
        gateway.prescriptions_for_doctor(provider_id).await
    })
    .await
}

pub async fn my_payments<G: RecordsGateway + ?Sized>(
    gateway: &G,
    session: &SessionStore,
) -> GatewayResult<Fetch<Vec<Payment>>> {
    for_user(session, |user_id| gateway.payments_for_user(user_id)).await
}

pub async fn my_complaints<G: RecordsGateway + ?Sized>(
    gateway: &G,
    session: &SessionStore,
) -> GatewayResult<Fetch<Vec<ComplaintRow>>> {
    for_user(session, |user_id| gateway.complaints_for_user(user_id)).await
}

fn signed_in(session: &SessionStore) -> Option<&Identity> {
    if session.is_authenticated() {
        session.identity()
    } else {
        None
    }
}
