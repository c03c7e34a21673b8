use meditrack_types::{ProviderId, UserId};
use serde::{Deserialize, Serialize};

/// A doctor as exposed by `GET /doctors`. Read-only from the client's side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    #[serde(rename = "docId")]
    pub id: ProviderId,
    #[serde(rename = "fName")]
    pub first_name: String,
    #[serde(rename = "lName")]
    pub last_name: String,
    pub specialization: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "contactNo", default)]
    pub contact_no: String,
    #[serde(rename = "availableDays", default)]
    pub available_days: String,
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

impl Provider {
    /// "Dr. First Last", as shown on cards and in the booking summary.
    pub fn display_name(&self) -> String {
        format!("Dr. {} {}", self.first_name, self.last_name)
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_backend_shape() {
        let json = r#"{
            "docId": 3,
            "fName": "Amina",
            "lName": "Otieno",
            "email": "amina@clinic.test",
            "specialization": "Cardiology",
            "contactNo": "0700000000",
            "availableDays": "Mon-Fri",
            "userId": 12
        }"#;
        let provider: Provider = serde_json::from_str(json).unwrap();
        assert_eq!(provider.id, ProviderId::new(3));
        assert_eq!(provider.display_name(), "Dr. Amina Otieno");
        assert_eq!(provider.user_id, Some(UserId::new(12)));
    }

    #[test]
    fn test_missing_required_field_is_an_error() {
        let json = r#"{ "docId": 3, "fName": "Amina", "lName": "Otieno" }"#;
        assert!(serde_json::from_str::<Provider>(json).is_err());
    }
}
