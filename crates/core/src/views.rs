//! Reductions behind the list screens.
//!
//! Every screen fetches its whole list once and derives what it shows from it: filters, sort,
//! pagination, counters. Nothing here talks to the gateway and nothing is cached.

use crate::constants::DEFAULT_PAGE_SIZE;
use crate::models::{AppointmentRow, AppointmentStatus, Provider};
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Case-insensitive substring match. An empty needle matches everything.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

// ---------------------------------------------------------------------------------------------
// Provider directory

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderFilter {
    /// Matched against "first last".
    pub search: String,
    /// Exact specialization, or any.
    pub specialization: Option<String>,
}

impl ProviderFilter {
    pub fn matches(&self, provider: &Provider) -> bool {
        contains_ignore_case(&provider.full_name(), &self.search)
            && self
                .specialization
                .as_deref()
                .map_or(true, |s| provider.specialization == s)
    }

    pub fn apply<'a>(&self, providers: &'a [Provider]) -> Vec<&'a Provider> {
        providers.iter().filter(|p| self.matches(p)).collect()
    }
}

/// Distinct specializations in first-seen order.
pub fn specializations(providers: &[Provider]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for provider in providers {
        if !seen.contains(&provider.specialization.as_str()) {
            seen.push(&provider.specialization);
        }
    }
    seen
}

// ---------------------------------------------------------------------------------------------
// Appointment table

/// Filters of the admin appointment table. Blank text and `None` match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentFilter {
    pub patient: String,
    pub doctor: String,
    /// Substring of the appointment id.
    pub id: String,
    pub status: Option<AppointmentStatus>,
    /// Exact payment status.
    pub payment_status: Option<String>,
    /// Substring of the `YYYY-MM-DD` date.
    pub date: String,
}

impl AppointmentFilter {
    pub fn matches(&self, row: &AppointmentRow) -> bool {
        let record = &row.appointments;
        contains_ignore_case(&row.patient_name(), &self.patient)
            && contains_ignore_case(&row.doctor_name(), &self.doctor)
            && (self.id.is_empty() || record.id.to_string().contains(self.id.trim()))
            && self.status.map_or(true, |s| record.status == Some(s))
            && self
                .payment_status
                .as_deref()
                .map_or(true, |p| row.payment_status() == Some(p))
            && (self.date.is_empty() || record.date.to_string().contains(self.date.trim()))
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Date,
    Patient,
    Doctor,
    Status,
    Id,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Column sort with the click-to-toggle behaviour of a table header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub field: SortField,
    pub order: SortOrder,
}

impl Default for SortState {
    /// Newest first.
    fn default() -> Self {
        Self {
            field: SortField::Date,
            order: SortOrder::Descending,
        }
    }
}

impl SortState {
    /// Same column flips the order; another column sorts it ascending.
    pub fn toggle(&mut self, field: SortField) {
        if self.field == field {
            self.order = match self.order {
                SortOrder::Ascending => SortOrder::Descending,
                SortOrder::Descending => SortOrder::Ascending,
            };
        } else {
            self.field = field;
            self.order = SortOrder::Ascending;
        }
    }

    /// Stable: rows that compare equal keep their fetch order in both directions.
    pub fn sort(&self, rows: &mut [&AppointmentRow]) {
        rows.sort_by(|a, b| {
            let ordering = compare(self.field, a, b);
            match self.order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });
    }
}

fn compare(field: SortField, a: &AppointmentRow, b: &AppointmentRow) -> Ordering {
    let (x, y) = (&a.appointments, &b.appointments);
    match field {
        SortField::Date => x.date.cmp(&y.date),
        SortField::Patient => a.patient_name().cmp(&b.patient_name()),
        SortField::Doctor => a.doctor_name().cmp(&b.doctor_name()),
        SortField::Status => status_key(x.status).cmp(status_key(y.status)),
        SortField::Id => x.id.cmp(&y.id),
    }
}

fn status_key(status: Option<AppointmentStatus>) -> &'static str {
    status.map_or("", |s| s.as_str())
}

/// Filters then sorts `rows`.
pub fn appointment_table<'a>(
    rows: &'a [AppointmentRow],
    filter: &AppointmentFilter,
    sort: SortState,
) -> Vec<&'a AppointmentRow> {
    let mut shown: Vec<&AppointmentRow> = rows.iter().filter(|r| filter.matches(r)).collect();
    sort.sort(&mut shown);
    shown
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppointmentStats {
    pub total: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub cancelled: usize,
}

impl AppointmentStats {
    /// Counted over the unfiltered list. Rows with no or an unknown status only count in the
    /// total.
    pub fn from_rows(rows: &[AppointmentRow]) -> Self {
        rows.iter().fold(
            Self {
                total: rows.len(),
                ..Self::default()
            },
            |mut stats, row| {
                match row.appointments.status {
                    Some(AppointmentStatus::Pending) => stats.pending += 1,
                    Some(AppointmentStatus::Confirmed) => stats.confirmed += 1,
                    Some(AppointmentStatus::Cancelled) => stats.cancelled += 1,
                    _ => {}
                }
                stats
            },
        )
    }
}

// ---------------------------------------------------------------------------------------------
// Patient and doctor screens

/// The patient's appointments split by status, in pending, confirmed, cancelled order. `only`
/// keeps a single group. Rows with another status are not shown.
pub fn group_by_status(
    rows: &[AppointmentRow],
    only: Option<AppointmentStatus>,
) -> Vec<(AppointmentStatus, Vec<&AppointmentRow>)> {
    AppointmentStatus::KNOWN
        .into_iter()
        .filter(|status| only.map_or(true, |o| o == *status))
        .map(|status| {
            let group = rows
                .iter()
                .filter(|r| r.appointments.status == Some(status))
                .collect();
            (status, group)
        })
        .collect()
}

/// The doctor's list under a status filter. A row without status counts as pending.
pub fn doctor_view(
    rows: &[AppointmentRow],
    status: Option<AppointmentStatus>,
) -> Vec<&AppointmentRow> {
    rows.iter()
        .filter(|r| status.map_or(true, |s| r.appointments.status_or_pending() == s))
        .collect()
}

/// The doctor's schedule for one day, earliest first. A row without status counts as pending.
pub fn day_schedule(
    rows: &[AppointmentRow],
    date: NaiveDate,
    status: Option<AppointmentStatus>,
) -> Vec<&AppointmentRow> {
    let mut day: Vec<&AppointmentRow> = doctor_view(rows, status)
        .into_iter()
        .filter(|r| r.appointments.date == date)
        .collect();
    day.sort_by_key(|r| r.appointments.start_time);
    day
}

/// Patients may cancel only what is still pending.
pub fn can_cancel(row: &AppointmentRow) -> bool {
    row.appointments.status == Some(AppointmentStatus::Pending)
}

/// Doctors may confirm only what is still pending. A row without status counts as pending.
pub fn can_confirm(row: &AppointmentRow) -> bool {
    row.appointments.status_or_pending() == AppointmentStatus::Pending
}

// ---------------------------------------------------------------------------------------------
// Pagination

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// 1-based, clamped to the available pages.
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<'_, T> {
    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }
}

/// Slices page `number` (1-based) out of `items`. An empty list still has one (empty) page.
pub fn paginate<T>(items: &[T], number: usize, page_size: usize) -> Page<'_, T> {
    let page_size = if page_size == 0 {
        DEFAULT_PAGE_SIZE
    } else {
        page_size
    };
    let total_pages = items.len().div_ceil(page_size).max(1);
    let number = number.clamp(1, total_pages);
    let start = (number - 1) * page_size;
    let end = (start + page_size).min(items.len());

    Page {
        items: &items[start..end],
        number,
        total_pages,
        total_items: items.len(),
    }
}
