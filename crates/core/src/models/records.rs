//! Prescriptions, payments, support tickets, accounts and analytics.

use crate::models::{AppointmentRecord, Provider, UserSummary};
use meditrack_types::{
    AppointmentId, ComplaintId, NonEmptyText, PrescriptionId, Role, UserId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prescription {
    #[serde(rename = "prescId")]
    pub id: PrescriptionId,
    #[serde(rename = "apId")]
    pub appointment_id: AppointmentId,
    #[serde(default)]
    pub notes: String,
    #[serde(rename = "createdOn", default)]
    pub created_on: Option<String>,
}

/// A prescription joined with its patient, doctor and appointment, as every prescription list
/// returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrescriptionRow {
    pub prescriptions: Prescription,
    #[serde(default)]
    pub users: Option<UserSummary>,
    #[serde(default)]
    pub doctors: Option<Provider>,
    #[serde(default)]
    pub appointments: Option<AppointmentRecord>,
}

impl PrescriptionRow {
    pub fn patient_name(&self) -> String {
        self.users.as_ref().map(UserSummary::full_name).unwrap_or_default()
    }

    pub fn doctor_name(&self) -> String {
        self.doctors.as_ref().map(Provider::display_name).unwrap_or_default()
    }
}

/// `GET /prescriptions/doctor/{id}` wraps its rows; the other prescription lists do not.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PrescriptionsEnvelope {
    pub prescriptions: Vec<PrescriptionRow>,
}

/// Body of `POST /prescriptions`.
#[derive(Debug, Clone, Serialize)]
pub struct NewPrescription {
    #[serde(rename = "apId")]
    pub appointment_id: AppointmentId,
    #[serde(rename = "userId")]
    pub user_id: UserId,
    pub notes: NonEmptyText,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    #[serde(rename = "payId")]
    pub id: i64,
    #[serde(rename = "apId")]
    pub appointment_id: AppointmentId,
    pub amount: Decimal,
    #[serde(rename = "payStatus")]
    pub status: String,
    #[serde(rename = "payDate", default)]
    pub paid_on: Option<String>,
}

/// Support ticket workflow. Closed tickets are final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplaintStatus {
    #[serde(rename = "Pending", alias = "pending")]
    Pending,
    #[serde(rename = "In Progress", alias = "in progress")]
    InProgress,
    #[serde(rename = "Resolved", alias = "resolved")]
    Resolved,
    #[serde(rename = "Closed", alias = "closed")]
    Closed,
}

impl ComplaintStatus {
    /// Statuses an admin may move a ticket to from `self`.
    pub fn next_actions(&self) -> &'static [ComplaintStatus] {
        use ComplaintStatus::*;
        match self {
            Pending => &[InProgress, Resolved, Closed],
            InProgress => &[Resolved, Closed],
            Resolved => &[InProgress, Closed],
            Closed => &[],
        }
    }

    pub fn can_move_to(&self, next: ComplaintStatus) -> bool {
        self.next_actions().contains(&next)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::Pending => "Pending",
            ComplaintStatus::InProgress => "In Progress",
            ComplaintStatus::Resolved => "Resolved",
            ComplaintStatus::Closed => "Closed",
        }
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ComplaintStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['-', '_'], " ").as_str() {
            "pending" => Ok(Self::Pending),
            "in progress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            "closed" => Ok(Self::Closed),
            _ => Err(format!(
                "unknown ticket status {s:?} (expected pending, in-progress, resolved or closed)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Complaint {
    #[serde(rename = "compId")]
    pub id: ComplaintId,
    #[serde(rename = "userId")]
    pub user_id: UserId,
    #[serde(rename = "apId", default)]
    pub appointment_id: Option<AppointmentId>,
    pub subject: String,
    pub description: String,
    pub status: ComplaintStatus,
    #[serde(rename = "createdOn", default)]
    pub created_on: Option<String>,
}

/// A ticket joined with the appointment it concerns and that appointment's doctor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplaintRow {
    pub complaints: Complaint,
    #[serde(default)]
    pub doctors: Option<Provider>,
    #[serde(default)]
    pub appointments: Option<AppointmentRecord>,
}

/// Body of `POST /complaints`.
#[derive(Debug, Clone, Serialize)]
pub struct NewComplaint {
    #[serde(rename = "userId")]
    pub user_id: UserId,
    #[serde(rename = "apId", skip_serializing_if = "Option::is_none")]
    pub appointment_id: Option<AppointmentId>,
    pub subject: NonEmptyText,
    pub description: NonEmptyText,
    pub status: ComplaintStatus,
}

/// Body of `PATCH /complaints/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct ComplaintUpdate {
    pub status: ComplaintStatus,
}

/// A user account as listed by `GET /users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    #[serde(rename = "userId")]
    pub id: UserId,
    #[serde(rename = "fName")]
    pub first_name: String,
    #[serde(rename = "lName")]
    pub last_name: String,
    pub email: String,
    #[serde(rename = "contactNo", default)]
    pub contact_no: Option<String>,
    pub role: String,
    #[serde(rename = "createdOn", default)]
    pub created_on: Option<String>,
}

impl AccountRecord {
    pub fn role(&self) -> Option<Role> {
        self.role.parse().ok()
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Body of `PATCH /users/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct RoleChange {
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCount {
    pub role: String,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: String,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Total {
    pub total: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_ticket_has_no_next_actions() {
        assert!(ComplaintStatus::Closed.next_actions().is_empty());
        assert!(!ComplaintStatus::Closed.can_move_to(ComplaintStatus::InProgress));
    }

    #[test]
    fn test_resolved_ticket_can_be_reopened() {
        assert!(ComplaintStatus::Resolved.can_move_to(ComplaintStatus::InProgress));
        assert!(!ComplaintStatus::InProgress.can_move_to(ComplaintStatus::Pending));
    }

    #[test]
    fn test_ticket_status_wire_names() {
        let json = serde_json::to_string(&ComplaintStatus::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
        let parsed: ComplaintStatus = serde_json::from_str("\"resolved\"").unwrap();
        assert_eq!(parsed, ComplaintStatus::Resolved);
        assert_eq!("in-progress".parse::<ComplaintStatus>().unwrap(), ComplaintStatus::InProgress);
    }

    #[test]
    fn test_prescription_lists_are_joined_rows() {
        let json = r#"[{
            "prescriptions": { "prescId": 1, "apId": 9, "notes": "Rest", "createdOn": "2024-06-01T10:00:00Z" },
            "doctors": { "docId": 3, "fName": "Amina", "lName": "Otieno", "specialization": "Cardiology" },
            "users": null
        }]"#;
        let rows: Vec<PrescriptionRow> = serde_json::from_str(json).unwrap();
        assert_eq!(rows[0].prescriptions.id, PrescriptionId::new(1));
        assert_eq!(rows[0].prescriptions.notes, "Rest");
        assert_eq!(
            rows[0].prescriptions.created_on.as_deref(),
            Some("2024-06-01T10:00:00Z")
        );
        assert_eq!(rows[0].doctor_name(), "Dr. Amina Otieno");
        assert_eq!(rows[0].patient_name(), "");

        let flat = r#"[{ "prescId": 1, "apId": 9, "notes": "Rest" }]"#;
        assert!(serde_json::from_str::<Vec<PrescriptionRow>>(flat).is_err());
    }

    #[test]
    fn test_ticket_lists_are_joined_rows() {
        let json = r#"[{
            "complaints": {
                "compId": 2, "userId": 4, "apId": 9, "subject": "Late doctor",
                "description": "Waited an hour", "status": "Pending", "createdOn": "2024-06-02"
            },
            "appointments": { "apId": 9, "apDate": "2024-06-01", "startTime": "09:00:00" }
        }]"#;
        let rows: Vec<ComplaintRow> = serde_json::from_str(json).unwrap();
        assert_eq!(rows[0].complaints.status, ComplaintStatus::Pending);
        assert_eq!(rows[0].complaints.id, ComplaintId::new(2));
        assert!(rows[0].doctors.is_none());
        assert_eq!(
            rows[0].appointments.as_ref().map(|a| a.id),
            Some(AppointmentId::new(9))
        );
    }

    #[test]
    fn test_account_role_is_parsed_leniently() {
        let json = r#"{ "userId": 2, "fName": "Sam", "lName": "Ng", "email": "s@x.test", "role": "doctor" }"#;
        let account: AccountRecord = serde_json::from_str(json).unwrap();
        assert_eq!(account.role(), Some(Role::Doctor));

        let odd = AccountRecord {
            role: "superuser".into(),
            ..account
        };
        assert_eq!(odd.role(), None);
    }
}
