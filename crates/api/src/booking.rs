//! Doctors and appointments.

use crate::HttpGateway;
use async_trait::async_trait;
use chrono::NaiveDate;
use meditrack_core::gateway::{BookingGateway, GatewayResult};
use meditrack_core::models::{
    AppointmentRecord, AppointmentRow, BookingReceipt, BookingRequest, Provider, StatusMessage,
    TakenSlot,
};
use meditrack_types::{AppointmentId, ProviderId, UserId};
use reqwest::Method;

#[async_trait]
impl BookingGateway for HttpGateway {
    async fn list_providers(&self) -> GatewayResult<Vec<Provider>> {
        self.get("/doctors").await
    }

    async fn provider_by_user_id(&self, user_id: UserId) -> GatewayResult<Provider> {
        self.get(&format!("/doctors/user/{user_id}")).await
    }

    async fn taken_slots(
        &self,
        provider_id: ProviderId,
        date: NaiveDate,
    ) -> GatewayResult<Vec<TakenSlot>> {
        let query = [("docId", provider_id.to_string()), ("apDate", date.to_string())];
        let records: Vec<AppointmentRecord> = self.get_with_query("/appointments", &query).await?;
        Ok(records.iter().map(TakenSlot::from).collect())
    }

    async fn submit_booking(&self, request: &BookingRequest) -> GatewayResult<BookingReceipt> {
        self.send_json(Method::POST, "/appointments", request).await
    }

    async fn cancel_appointment(&self, id: AppointmentId) -> GatewayResult<StatusMessage> {
        self.send_empty(Method::PATCH, &format!("/appointments/{id}/cancel"))
            .await
    }

    async fn confirm_appointment(&self, id: AppointmentId) -> GatewayResult<StatusMessage> {
        self.send_empty(Method::PATCH, &format!("/appointments/{id}/confirm"))
            .await
    }

    async fn all_appointments(&self) -> GatewayResult<Vec<AppointmentRow>> {
        self.get("/appointments").await
    }

    async fn user_appointments(&self, user_id: UserId) -> GatewayResult<Vec<AppointmentRow>> {
        self.get(&format!("/appointments/user/{user_id}")).await
    }

    async fn doctor_appointments(
        &self,
        provider_id: ProviderId,
    ) -> GatewayResult<Vec<AppointmentRow>> {
        self.get(&format!("/appointments/doctor/{provider_id}"))
            .await
    }
}
