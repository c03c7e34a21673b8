//! Wire models for the Medi-Track REST API.
//!
//! Each endpoint has exactly one documented response schema. Field names follow the backend
//! (camelCase, with the `fName`/`lName` spelling); Rust names follow Rust. A body that does not
//! match its schema is a decode error, never a guess at another shape.

mod appointment;
mod auth;
mod provider;
mod records;

pub use appointment::{
    AppointmentRecord, AppointmentRow, AppointmentStatus, BookingReceipt, BookingRequest,
    PaymentSummary, StatusMessage, TakenSlot, UserSummary,
};
pub use auth::{Credentials, LoginResponse, LoginUser, Registration, Verification};
pub use provider::Provider;
pub use records::{
    AccountRecord, Complaint, ComplaintRow, ComplaintStatus, ComplaintUpdate, NewComplaint,
    NewPrescription, Payment, Prescription, PrescriptionRow, PrescriptionsEnvelope, RoleChange,
    RoleCount, StatusCount, Total,
};
