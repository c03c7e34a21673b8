//! Role-based navigation.

use crate::session::SessionStore;
use meditrack_types::Role;

/// A destination in the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavEntry {
    pub label: &'static str,
    /// The CLI subcommand that opens it.
    pub command: &'static str,
}

const fn entry(label: &'static str, command: &'static str) -> NavEntry {
    NavEntry { label, command }
}

const ADMIN: &[NavEntry] = &[
    entry("Manage Users", "users"),
    entry("System Analytics", "analytics"),
    entry("Support Tickets", "tickets"),
    entry("All Appointments", "appointments"),
    entry("Prescriptions", "prescriptions"),
];

const DOCTOR: &[NavEntry] = &[
    entry("Manage Appointments", "appointments"),
    entry("Prescriptions", "prescriptions"),
    entry("My Schedule", "schedule"),
];

const PATIENT: &[NavEntry] = &[
    entry("Browse Doctors", "doctors"),
    entry("My Appointments", "appointments"),
    entry("Prescriptions", "prescriptions"),
    entry("Support Tickets", "tickets"),
    entry("Payments", "payments"),
];

/// Entries for `role`. No role means no navigation.
pub fn entries_for(role: Option<Role>) -> &'static [NavEntry] {
    match role {
        Some(Role::Admin) => ADMIN,
        Some(Role::Doctor) => DOCTOR,
        Some(Role::Patient) => PATIENT,
        None => &[],
    }
}

/// Entries for whoever is signed in. Anonymous sessions and unrecognised role claims get none.
pub fn menu(session: &SessionStore) -> &'static [NavEntry] {
    if !session.is_authenticated() {
        return &[];
    }
    entries_for(session.role())
}
