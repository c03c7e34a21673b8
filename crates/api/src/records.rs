//! Prescriptions, payments and support tickets.

use crate::HttpGateway;
use async_trait::async_trait;
use meditrack_core::gateway::{GatewayResult, RecordsGateway};
use meditrack_core::models::{
    ComplaintRow, ComplaintUpdate, NewComplaint, NewPrescription, Payment, PrescriptionRow,
    PrescriptionsEnvelope, StatusMessage,
};
use meditrack_types::{ComplaintId, ProviderId, UserId};
use reqwest::Method;

#[async_trait]
impl RecordsGateway for HttpGateway {
    async fn all_prescriptions(&self) -> GatewayResult<Vec<PrescriptionRow>> {
        self.get("/prescriptions").await
    }

    async fn prescriptions_for_user(&self, user_id: UserId) -> GatewayResult<Vec<PrescriptionRow>> {
        self.get(&format!("/prescriptions/user/{user_id}")).await
    }

    async fn prescriptions_for_doctor(
        &self,
        provider_id: ProviderId,
    ) -> GatewayResult<Vec<PrescriptionRow>> {
        let envelope: PrescriptionsEnvelope = self
            .get(&format!("/prescriptions/doctor/{provider_id}"))
            .await?;
        Ok(envelope.prescriptions)
    }

    async fn create_prescription(&self, prescription: &NewPrescription) -> GatewayResult<()> {
        self.send_json_ignoring_body(Method::POST, "/prescriptions", prescription)
            .await
    }

    async fn payments_for_user(&self, user_id: UserId) -> GatewayResult<Vec<Payment>> {
        self.get(&format!("/payments/user/{user_id}")).await
    }

    async fn create_complaint(&self, complaint: &NewComplaint) -> GatewayResult<()> {
        self.send_json_ignoring_body(Method::POST, "/complaints", complaint)
            .await
    }

    async fn complaints_for_user(&self, user_id: UserId) -> GatewayResult<Vec<ComplaintRow>> {
        self.get(&format!("/complaints/user/{user_id}")).await
    }

    async fn all_complaints(&self) -> GatewayResult<Vec<ComplaintRow>> {
        self.get("/complaints").await
    }

    async fn update_complaint_status(
        &self,
        id: ComplaintId,
        update: &ComplaintUpdate,
    ) -> GatewayResult<StatusMessage> {
        self.send_json(Method::PATCH, &format!("/complaints/{id}"), update)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve;
    use axum::extract::Path;
    use axum::routing::{get, patch, post};
    use axum::{Json, Router};
    use meditrack_core::models::ComplaintStatus;
    use meditrack_types::{AppointmentId, NonEmptyText};
    use rust_decimal::Decimal;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_doctor_prescriptions_are_unwrapped() {
        let router = Router::new().route(
            "/prescriptions/doctor/:id",
            get(|Path(id): Path<i64>| async move {
                assert_eq!(id, 3);
                Json(json!({
                    "prescriptions": [{
                        "prescriptions": {
                            "prescId": 1, "apId": 9, "notes": "Amoxicillin 500mg",
                            "createdOn": "2024-06-01T09:00:00Z"
                        },
                        "users": { "userId": 4, "fName": "Pat", "lName": "Lee" }
                    }]
                }))
            }),
        );
        let gateway = serve(router).await;

        let list = gateway.prescriptions_for_doctor(ProviderId::new(3)).await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].prescriptions.notes, "Amoxicillin 500mg");
        assert_eq!(list[0].patient_name(), "Pat Lee");
    }

    #[tokio::test]
    async fn test_patient_lists_decode_joined_rows() {
        let router = Router::new()
            .route(
                "/prescriptions/user/:id",
                get(|| async {
                    Json(json!([{
                        "prescriptions": { "prescId": 5, "apId": 9, "notes": "Rest", "createdOn": "2024-06-01" },
                        "doctors": {
                            "docId": 3, "fName": "Amina", "lName": "Otieno",
                            "specialization": "Cardiology"
                        },
                        "appointments": { "apId": 9, "apDate": "2024-06-01", "startTime": "09:00:00" }
                    }]))
                }),
            )
            .route(
                "/complaints/user/:id",
                get(|| async {
                    Json(json!([{
                        "complaints": {
                            "compId": 2, "userId": 4, "subject": "Billing",
                            "description": "Charged twice", "status": "Pending"
                        }
                    }]))
                }),
            );
        let gateway = serve(router).await;

        let prescriptions = gateway.prescriptions_for_user(UserId::new(4)).await.unwrap();
        assert_eq!(prescriptions[0].prescriptions.created_on.as_deref(), Some("2024-06-01"));
        assert_eq!(prescriptions[0].doctor_name(), "Dr. Amina Otieno");

        let tickets = gateway.complaints_for_user(UserId::new(4)).await.unwrap();
        assert_eq!(tickets[0].complaints.subject, "Billing");
        assert_eq!(tickets[0].complaints.appointment_id, None);
    }

    #[tokio::test]
    async fn test_create_prescription_ignores_response_row() {
        let router = Router::new().route(
            "/prescriptions",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["apId"], 9);
                assert_eq!(body["userId"], 4);
                Json(json!({ "prescId": 12, "anything": "else" }))
            }),
        );
        let gateway = serve(router).await;

        let prescription = NewPrescription {
            appointment_id: AppointmentId::new(9),
            user_id: UserId::new(4),
            notes: NonEmptyText::new("Rest and fluids").unwrap(),
        };
        gateway.create_prescription(&prescription).await.unwrap();
    }

    #[tokio::test]
    async fn test_payments_decode_amounts() {
        let router = Router::new().route(
            "/payments/user/:id",
            get(|| async {
                Json(json!([{ "payId": 1, "apId": 9, "amount": 500, "payStatus": "completed", "payDate": "2024-06-01" }]))
            }),
        );
        let gateway = serve(router).await;

        let payments = gateway.payments_for_user(UserId::new(4)).await.unwrap();
        assert_eq!(payments[0].amount, Decimal::new(500, 0));
        assert_eq!(payments[0].status, "completed");
    }

    #[tokio::test]
    async fn test_complaint_status_round_trip() {
        let router = Router::new()
            .route(
                "/complaints",
                get(|| async {
                    Json(json!([{
                        "complaints": {
                            "compId": 2, "userId": 4, "apId": 9, "subject": "Late doctor",
                            "description": "Waited an hour", "status": "In Progress"
                        },
                        "doctors": {
                            "docId": 3, "fName": "Amina", "lName": "Otieno",
                            "specialization": "Cardiology"
                        }
                    }]))
                }),
            )
            .route(
                "/complaints/:id",
                patch(|Path(id): Path<i64>, Json(body): Json<Value>| async move {
                    assert_eq!(body["status"], "Resolved");
                    Json(json!({ "message": format!("Complaint {id} updated") }))
                }),
            );
        let gateway = serve(router).await;

        let complaints = gateway.all_complaints().await.unwrap();
        let ticket = &complaints[0].complaints;
        assert_eq!(ticket.status, ComplaintStatus::InProgress);
        assert_eq!(
            complaints[0].doctors.as_ref().map(|d| d.display_name()).as_deref(),
            Some("Dr. Amina Otieno")
        );

        let update = ComplaintUpdate {
            status: ComplaintStatus::Resolved,
        };
        let reply = gateway
            .update_complaint_status(ticket.id, &update)
            .await
            .unwrap();
        assert_eq!(reply.message, "Complaint 2 updated");
    }
}
