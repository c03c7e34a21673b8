//! Account lifecycle endpoints.

use crate::HttpGateway;
use async_trait::async_trait;
use meditrack_core::gateway::{AuthGateway, GatewayResult};
use meditrack_core::models::{
    Credentials, LoginResponse, Registration, StatusMessage, Verification,
};
use reqwest::Method;

#[async_trait]
impl AuthGateway for HttpGateway {
    async fn login(&self, credentials: &Credentials) -> GatewayResult<LoginResponse> {
        self.send_json(Method::POST, "/auth/login", credentials).await
    }

    async fn register(&self, registration: &Registration) -> GatewayResult<StatusMessage> {
        self.send_json(Method::POST, "/auth/register", registration)
            .await
    }

    async fn verify(&self, verification: &Verification) -> GatewayResult<StatusMessage> {
        self.send_json(Method::POST, "/auth/verify", verification)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use meditrack_core::GatewayError;
    use meditrack_types::{EmailAddress, NonEmptyText, ProviderId, Role, UserId};
    use serde_json::{json, Value};

    fn credentials(password: &str) -> Credentials {
        Credentials {
            email: EmailAddress::parse("ada@clinic.test").unwrap(),
            password: password.into(),
        }
    }

    async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        if body["password"] != "secret" {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "message": "Invalid credentials" })),
            );
        }
        (
            StatusCode::OK,
            Json(json!({
                "token": "jwt-token",
                "user": {
                    "user_id": 11,
                    "first_name": "Ada",
                    "last_name": "Obi",
                    "email": body["email"],
                    "role": "doctor",
                    "doc_id": 4
                }
            })),
        )
    }

    #[tokio::test]
    async fn test_login_returns_token_and_identity() {
        let gateway = serve(Router::new().route("/auth/login", post(login))).await;

        let response = gateway.login(&credentials("secret")).await.unwrap();
        assert_eq!(response.token, "jwt-token");
        assert_eq!(response.user.user_id, UserId::new(11));
        assert_eq!(response.user.doc_id, Some(ProviderId::new(4)));
        assert_eq!(response.user.email, "ada@clinic.test");
    }

    #[tokio::test]
    async fn test_wrong_password_is_unauthorized() {
        let gateway = serve(Router::new().route("/auth/login", post(login))).await;

        let err = gateway.login(&credentials("nope")).await.unwrap_err();
        assert!(matches!(err, GatewayError::Unauthorized { status: 401 }));
    }

    #[tokio::test]
    async fn test_register_and_verify_bodies() {
        let router = Router::new()
            .route(
                "/auth/register",
                post(|Json(body): Json<Value>| async move {
                    assert_eq!(body["fName"], "Ada");
                    assert_eq!(body["lName"], "Obi");
                    assert_eq!(body["role"], "patient");
                    Json(json!({ "message": "Verification code sent" }))
                }),
            )
            .route(
                "/auth/verify",
                post(|Json(body): Json<Value>| async move {
                    assert_eq!(body["code"], "123456");
                    Json(json!({ "message": "Account verified" }))
                }),
            );
        let gateway = serve(router).await;

        let registration = Registration {
            first_name: NonEmptyText::new("Ada").unwrap(),
            last_name: NonEmptyText::new("Obi").unwrap(),
            email: EmailAddress::parse("ada@clinic.test").unwrap(),
            password: "secret".into(),
            role: Role::Patient,
        };
        let registered = gateway.register(&registration).await.unwrap();
        assert_eq!(registered.message, "Verification code sent");

        let verification = Verification {
            email: EmailAddress::parse("ada@clinic.test").unwrap(),
            code: NonEmptyText::new("123456").unwrap(),
        };
        let verified = gateway.verify(&verification).await.unwrap();
        assert_eq!(verified.message, "Account verified");
    }
}
