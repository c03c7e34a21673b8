//! User management and analytics.

use crate::HttpGateway;
use async_trait::async_trait;
use meditrack_core::gateway::{AdminGateway, GatewayResult};
use meditrack_core::models::{AccountRecord, RoleChange, RoleCount, StatusCount, Total};
use meditrack_types::UserId;
use reqwest::Method;

#[async_trait]
impl AdminGateway for HttpGateway {
    async fn list_users(&self) -> GatewayResult<Vec<AccountRecord>> {
        self.get("/users").await
    }

    async fn set_user_role(&self, user_id: UserId, change: &RoleChange) -> GatewayResult<()> {
        self.send_json_ignoring_body(Method::PATCH, &format!("/users/{user_id}"), change)
            .await
    }

    async fn delete_user(&self, user_id: UserId) -> GatewayResult<()> {
        self.delete(&format!("/users/{user_id}")).await
    }

    async fn role_breakdown(&self) -> GatewayResult<Vec<RoleCount>> {
        self.get("/analytics/users/roles").await
    }

    async fn appointment_status_counts(&self) -> GatewayResult<Vec<StatusCount>> {
        self.get("/analytics/appointments/status").await
    }

    async fn prescription_total(&self) -> GatewayResult<Total> {
        self.get("/analytics/prescriptions").await
    }

    async fn complaint_total(&self) -> GatewayResult<Total> {
        self.get("/analytics/complaints").await
    }

    async fn payment_total(&self) -> GatewayResult<Total> {
        self.get("/analytics/payments").await
    }
}
