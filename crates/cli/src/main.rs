//! `meditrack`: command-line front-end for the Medi-Track booking service.
//!
//! Each subcommand is one screen of the dashboard. The session survives between invocations in
//! the file named by `MEDITRACK_SESSION_FILE`.

mod app;

use app::App;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use meditrack_core::models::{AppointmentStatus, ComplaintStatus};
use meditrack_core::views::{SortField, SortState};
use meditrack_core::ClientConfig;
use meditrack_types::{AppointmentId, ComplaintId, ProviderId, Role, SlotTime, UserId};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "meditrack")]
#[command(about = "Medi-Track appointment booking client")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and remember the session
    Login {
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the current session
    Logout,
    /// Show who is logged in
    Whoami,
    /// Create an account; a verification code is mailed to the address
    Register {
        first_name: String,
        last_name: String,
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "patient")]
        role: Role,
    },
    /// Verify a new account with the mailed code
    Verify { email: String, code: String },
    /// Show the dashboard entries for your role
    Menu,
    /// Browse doctors
    Doctors {
        /// Name search (case-insensitive)
        #[arg(long)]
        search: Option<String>,
        /// Exact specialization
        #[arg(long)]
        specialization: Option<String>,
    },
    /// Show free and taken start times of a doctor on a day
    Slots {
        doctor_id: ProviderId,
        /// YYYY-MM-DD
        date: NaiveDate,
    },
    /// Book a 30-minute consultation
    Book {
        doctor_id: ProviderId,
        /// YYYY-MM-DD
        date: NaiveDate,
        /// HH:MM
        time: SlotTime,
    },
    /// List appointments (your own, your patients', or all for admins)
    Appointments {
        #[arg(long)]
        status: Option<AppointmentStatus>,
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Admin: patient name filter
        #[arg(long)]
        patient: Option<String>,
        /// Admin: doctor name filter
        #[arg(long)]
        doctor: Option<String>,
        /// Admin: appointment id filter
        #[arg(long)]
        id: Option<String>,
        /// Admin: exact payment status
        #[arg(long)]
        payment: Option<String>,
        /// Admin: date filter (substring of YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        /// Admin: click a column header; repeat to flip its order (newest first by default)
        #[arg(long, value_enum)]
        sort: Vec<SortColumn>,
    },
    /// Cancel one of your pending appointments
    Cancel { id: AppointmentId },
    /// Confirm a pending appointment (doctors)
    Confirm { id: AppointmentId },
    /// Doctor: appointments on a day
    Schedule {
        /// YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        status: Option<AppointmentStatus>,
    },
    /// List prescriptions
    Prescriptions,
    /// Doctor: issue a prescription for an appointment
    Prescribe {
        appointment_id: AppointmentId,
        patient_id: UserId,
        notes: String,
    },
    /// Your payment history
    Payments,
    /// Support tickets (your own, or all for admins)
    Tickets,
    /// Open a support ticket
    OpenTicket {
        subject: String,
        description: String,
        #[arg(long)]
        appointment: Option<AppointmentId>,
    },
    /// Admin: move a ticket to another status
    TicketStatus {
        id: ComplaintId,
        /// pending, in-progress, resolved or closed
        status: ComplaintStatus,
    },
    /// Admin: list user accounts
    Users,
    /// Admin: promote a user to doctor or demote to patient
    SetRole { user_id: UserId, role: Role },
    /// Admin: delete a user account
    DeleteUser { user_id: UserId },
    /// Admin: system analytics
    Analytics,
}

#[derive(Clone, Copy, ValueEnum)]
enum SortColumn {
    Date,
    Patient,
    Doctor,
    Status,
    Id,
}

impl From<SortColumn> for SortField {
    fn from(column: SortColumn) -> Self {
        match column {
            SortColumn::Date => SortField::Date,
            SortColumn::Patient => SortField::Patient,
            SortColumn::Doctor => SortField::Doctor,
            SortColumn::Status => SortField::Status,
            SortColumn::Id => SortField::Id,
        }
    }
}

/// Replays `--sort` flags as header clicks on a table that starts newest first.
fn header_clicks(columns: &[SortColumn]) -> SortState {
    let mut sort = SortState::default();
    for &column in columns {
        sort.toggle(column.into());
    }
    sort
}

/// Main entry point for the Medi-Track CLI
///
/// # Errors
/// Returns an error if:
/// - the configuration in the environment is invalid,
/// - the session file exists but cannot be read or written.
///
/// Failed API calls are reported as notices and do not end the process with an error.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("meditrack=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = ClientConfig::from_env_values(
        std::env::var("MEDITRACK_API_URL").ok(),
        std::env::var("MEDITRACK_SESSION_FILE").ok(),
        std::env::var("MEDITRACK_TIMEOUT_SECS").ok(),
    )?;
    let mut app = App::open(config)?;

    match cli.command {
        None | Some(Commands::Menu) => app.menu(),
        Some(Commands::Login { email, password }) => app.login(&email, password).await?,
        Some(Commands::Logout) => app.logout()?,
        Some(Commands::Whoami) => app.whoami(),
        Some(Commands::Register {
            first_name,
            last_name,
            email,
            password,
            role,
        }) => {
            app.register(&first_name, &last_name, &email, password, role)
                .await?
        }
        Some(Commands::Verify { email, code }) => app.verify(&email, &code).await?,
        Some(Commands::Doctors {
            search,
            specialization,
        }) => app.doctors(search, specialization).await?,
        Some(Commands::Slots { doctor_id, date }) => app.slots(doctor_id, date).await?,
        Some(Commands::Book {
            doctor_id,
            date,
            time,
        }) => app.book(doctor_id, date, time).await?,
        Some(Commands::Appointments {
            status,
            page,
            patient,
            doctor,
            id,
            payment,
            date,
            sort,
        }) => {
            let table = app::TableOptions {
                filter: meditrack_core::views::AppointmentFilter {
                    patient: patient.unwrap_or_default(),
                    doctor: doctor.unwrap_or_default(),
                    id: id.unwrap_or_default(),
                    status,
                    payment_status: payment,
                    date: date.unwrap_or_default(),
                },
                sort: header_clicks(&sort),
                page,
            };
            app.appointments(table).await?
        }
        Some(Commands::Cancel { id }) => app.cancel(id).await?,
        Some(Commands::Confirm { id }) => app.confirm(id).await?,
        Some(Commands::Schedule { date, status }) => app.schedule(date, status).await?,
        Some(Commands::Prescriptions) => app.prescriptions().await?,
        Some(Commands::Prescribe {
            appointment_id,
            patient_id,
            notes,
        }) => app.prescribe(appointment_id, patient_id, &notes).await?,
        Some(Commands::Payments) => app.payments().await?,
        Some(Commands::Tickets) => app.tickets().await?,
        Some(Commands::OpenTicket {
            subject,
            description,
            appointment,
        }) => app.open_ticket(&subject, &description, appointment).await?,
        Some(Commands::TicketStatus { id, status }) => app.ticket_status(id, status).await?,
        Some(Commands::Users) => app.users().await?,
        Some(Commands::SetRole { user_id, role }) => app.set_role(user_id, role).await?,
        Some(Commands::DeleteUser { user_id }) => app.delete_user(user_id).await?,
        Some(Commands::Analytics) => app.analytics().await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use meditrack_core::views::SortOrder;

    #[test]
    fn test_repeated_sort_flags_toggle_the_order() {
        let cli = Cli::try_parse_from([
            "meditrack", "appointments", "--sort", "patient", "--sort", "patient",
        ])
        .unwrap();
        let Some(Commands::Appointments { sort, .. }) = cli.command else {
            panic!("expected the appointments command");
        };
        let state = header_clicks(&sort);
        assert_eq!(state.field, SortField::Patient);
        assert_eq!(state.order, SortOrder::Descending);
    }

    #[test]
    fn test_no_sort_flag_keeps_newest_first() {
        assert_eq!(header_clicks(&[]), SortState::default());
        let oldest_first = header_clicks(&[SortColumn::Date]);
        assert_eq!(oldest_first.field, SortField::Date);
        assert_eq!(oldest_first.order, SortOrder::Ascending);
    }
}
