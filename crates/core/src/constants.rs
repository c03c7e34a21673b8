//! Constants used throughout the Medi-Track core crate.

use meditrack_types::SlotTime;

/// Base URL used when `MEDITRACK_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:6969";

/// Session file used when `MEDITRACK_SESSION_FILE` is not set.
pub const DEFAULT_SESSION_FILE: &str = ".meditrack/session.json";

/// Length of every consultation.
pub const CONSULTATION_MINUTES: i64 = 30;

/// Fee attached to every booking.
pub const CONSULTATION_FEE: u32 = 500;

/// Candidate start times offered for every doctor and day, half-hourly from 08:00 to 15:30.
pub const SLOT_CATALOG: [&str; 16] = [
    "08:00", "08:30", "09:00", "09:30", "10:00", "10:30", "11:00", "11:30", "12:00", "12:30",
    "13:00", "13:30", "14:00", "14:30", "15:00", "15:30",
];

/// Version stamped into the persisted session file. Files with another version are discarded.
pub const SESSION_FORMAT_VERSION: u32 = 1;

/// Default page size for paginated tables.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// The slot catalog as parsed times, in catalog order.
pub fn slot_catalog() -> Vec<SlotTime> {
    SLOT_CATALOG
        .iter()
        .filter_map(|s| SlotTime::parse(s).ok())
        .collect()
}

/// Whether `time` is one of the catalog start times.
pub fn is_catalog_time(time: SlotTime) -> bool {
    slot_catalog().contains(&time)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_parses_completely() {
        let catalog = slot_catalog();
        assert_eq!(catalog.len(), SLOT_CATALOG.len());
        assert_eq!(catalog.first().map(ToString::to_string).as_deref(), Some("08:00"));
        assert_eq!(catalog.last().map(ToString::to_string).as_deref(), Some("15:30"));
    }

    #[test]
    fn test_only_half_hours_inside_opening_hours_are_catalog_times() {
        let time = |s: &str| SlotTime::parse(s).unwrap();
        assert!(is_catalog_time(time("08:00")));
        assert!(is_catalog_time(time("15:30")));
        assert!(!is_catalog_time(time("07:30")));
        assert!(!is_catalog_time(time("07:13")));
        assert!(!is_catalog_time(time("16:00")));
        assert!(!is_catalog_time(time("23:50")));
    }
}
