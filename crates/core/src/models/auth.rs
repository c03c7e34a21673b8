use meditrack_types::{EmailAddress, NonEmptyText, ProviderId, Role, UserId};
use serde::{Deserialize, Serialize};

/// Body of `POST /auth/login`.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: EmailAddress,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The user object inside a login response. The auth endpoint speaks snake_case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginUser {
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Raw role claim; see [`crate::session::Identity::role`].
    pub role: String,
    #[serde(default)]
    pub doc_id: Option<ProviderId>,
}

/// Response of `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: LoginUser,
}

/// Body of `POST /auth/register`. New accounts are patients unless an admin promotes them.
#[derive(Clone, Serialize)]
pub struct Registration {
    #[serde(rename = "fName")]
    pub first_name: NonEmptyText,
    #[serde(rename = "lName")]
    pub last_name: NonEmptyText,
    pub email: EmailAddress,
    pub password: String,
    pub role: Role,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

/// Body of `POST /auth/verify`: the code mailed after registration.
#[derive(Debug, Clone, Serialize)]
pub struct Verification {
    pub email: EmailAddress,
    pub code: NonEmptyText,
}
