//! Backend record identifiers.
//!
//! The Medi-Track API numbers its rows with positive integers. Each table gets its own newtype
//! so an appointment id can never be passed where a doctor id is expected.

use std::fmt;
use std::str::FromStr;

/// Error returned when an identifier cannot be parsed from user input.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IdError {
    #[error("{kind} must be a positive integer, got {input:?}")]
    Invalid { kind: &'static str, input: String },
}

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().parse::<i64>() {
                    Ok(raw) if raw > 0 => Ok(Self(raw)),
                    _ => Err(IdError::Invalid {
                        kind: $kind,
                        input: s.to_owned(),
                    }),
                }
            }
        }
    };
}

record_id!(
    /// Id of a user account (`userId` on the wire).
    UserId,
    "user id"
);
record_id!(
    /// Id of a doctor record (`docId` on the wire). A doctor also has a [`UserId`].
    ProviderId,
    "doctor id"
);
record_id!(
    /// Id of an appointment (`apId` on the wire).
    AppointmentId,
    "appointment id"
);
record_id!(PrescriptionId, "prescription id");
record_id!(ComplaintId, "complaint id");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_positive_integers() {
        assert_eq!("42".parse::<ProviderId>().unwrap(), ProviderId::new(42));
        assert_eq!(" 7 ".parse::<AppointmentId>().unwrap().get(), 7);
    }

    #[test]
    fn test_parse_rejects_zero_and_garbage() {
        assert!("0".parse::<UserId>().is_err());
        assert!("-3".parse::<UserId>().is_err());
        let err = "abc".parse::<ProviderId>().unwrap_err();
        assert_eq!(err.to_string(), "doctor id must be a positive integer, got \"abc\"");
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let json = serde_json::to_string(&UserId::new(5)).unwrap();
        assert_eq!(json, "5");
    }
}
