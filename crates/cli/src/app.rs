//! The screens behind each subcommand.

use chrono::{Local, NaiveDate};
use meditrack_api::HttpGateway;
use meditrack_core::booking::{SlotResolution, SubmitResolution};
use meditrack_core::constants::{self, CONSULTATION_MINUTES, DEFAULT_PAGE_SIZE, SLOT_CATALOG};
use meditrack_core::models::{
    AppointmentRow, AppointmentStatus, ComplaintStatus, ComplaintUpdate, Credentials,
    NewComplaint, NewPrescription, Provider, Registration, RoleChange, Verification,
};
use meditrack_core::views::{
    self, AppointmentFilter, AppointmentStats, Page, ProviderFilter, SortState,
};
use meditrack_core::{
    navigation, queries, AdminGateway, AuthGateway, BookingFlow, BookingGateway, ClientConfig,
    Fetch, GatewayError, GatewayResult, Identity, Notice, NoticeKind, RecordsGateway,
    SessionStore, SlotSelection,
};
use meditrack_types::{
    AppointmentId, ComplaintId, EmailAddress, NonEmptyText, ProviderId, Role, SlotTime, UserId,
};
use rust_decimal::Decimal;
use std::fmt::Display;
use std::sync::Arc;

const LOGIN_PROMPT: &str = "Please log in first: meditrack login <email> --password <password>";
const WRONG_ROLE: &str = "This screen is not available for your role.";

/// Options of the appointment table.
pub struct TableOptions {
    pub filter: AppointmentFilter,
    pub sort: SortState,
    pub page: usize,
}

pub struct App {
    config: ClientConfig,
    session: SessionStore,
    gateway: HttpGateway,
}

struct Analytics {
    roles: Vec<meditrack_core::models::RoleCount>,
    statuses: Vec<meditrack_core::models::StatusCount>,
    prescriptions: Decimal,
    complaints: Decimal,
    payments: Decimal,
}

impl App {
    pub fn open(config: ClientConfig) -> anyhow::Result<Self> {
        let session = SessionStore::open(config.session_file())?;
        let gateway = HttpGateway::new(&config)?.with_token(session.token());
        tracing::debug!(
            api = %config.api_base_url(),
            signed_in = session.is_authenticated(),
            "client ready"
        );
        Ok(Self {
            config,
            session,
            gateway,
        })
    }

    // -----------------------------------------------------------------------------------------
    // Account

    pub fn menu(&self) {
        let entries = navigation::menu(&self.session);
        match self.session.identity() {
            None => println!("{LOGIN_PROMPT}"),
            Some(identity) if entries.is_empty() => println!(
                "Signed in as {} with unrecognised role {:?}; no screens are available.",
                identity.full_name(),
                identity.role_claim
            ),
            Some(identity) => {
                println!("Medi-Track: {} ({})", identity.full_name(), identity.role_claim);
                for entry in entries {
                    println!("  {:<22} meditrack {}", entry.label, entry.command);
                }
            }
        }
    }

    pub async fn login(&mut self, email: &str, password: String) -> anyhow::Result<()> {
        let Some(email) = checked(EmailAddress::parse(email)) else {
            return Ok(());
        };
        let credentials = Credentials { email, password };

        let response = match self.gateway.login(&credentials).await {
            Ok(response) => response,
            Err(GatewayError::Unauthorized { .. }) => {
                notify(&Notice::error("Invalid email or password."));
                return Ok(());
            }
            Err(e) => {
                notify(&Notice::error(e.user_message()));
                return Ok(());
            }
        };

        let identity = Identity::from(response.user);
        let name = identity.full_name();
        self.session.set_credentials(response.token, identity)?;
        self.gateway = self.gateway.clone().with_token(self.session.token());

        notify(&Notice::success(format!("Welcome, {name}!")));
        self.menu();
        Ok(())
    }

    pub fn logout(&mut self) -> anyhow::Result<()> {
        self.session.clear_credentials()?;
        notify(&Notice::success("Logged out."));
        Ok(())
    }

    pub fn whoami(&self) {
        match self.session.identity() {
            Some(identity) => {
                println!("{} <{}>", identity.full_name(), identity.email);
                println!("  user id: {}", identity.user_id);
                println!("  role:    {}", identity.role_claim);
                if let Some(doc_id) = identity.doc_id {
                    println!("  doctor:  #{doc_id}");
                }
            }
            None => println!("Not logged in."),
        }
    }

    pub async fn register(
        &mut self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: String,
        role: Role,
    ) -> anyhow::Result<()> {
        let (Some(first_name), Some(last_name), Some(email)) = (
            checked(NonEmptyText::new(first_name)),
            checked(NonEmptyText::new(last_name)),
            checked(EmailAddress::parse(email)),
        ) else {
            return Ok(());
        };
        if password.trim().is_empty() {
            notify(&Notice::error("Password cannot be empty."));
            return Ok(());
        }

        let registration = Registration {
            first_name,
            last_name,
            email,
            password,
            role,
        };
        let result = self.gateway.register(&registration).await;
        if let Some(reply) = self.settle(result)? {
            notify(&Notice::success(reply.message));
            println!("Next: meditrack verify {} <code>", registration.email);
        }
        Ok(())
    }

    pub async fn verify(&mut self, email: &str, code: &str) -> anyhow::Result<()> {
        let (Some(email), Some(code)) = (
            checked(EmailAddress::parse(email)),
            checked(NonEmptyText::new(code)),
        ) else {
            return Ok(());
        };

        let result = self.gateway.verify(&Verification { email, code }).await;
        if let Some(reply) = self.settle(result)? {
            notify(&Notice::success(reply.message));
        }
        Ok(())
    }

    // -----------------------------------------------------------------------------------------
    // Doctors and booking

    pub async fn doctors(
        &mut self,
        search: Option<String>,
        specialization: Option<String>,
    ) -> anyhow::Result<()> {
        let result = self.gateway.list_providers().await;
        let Some(providers) = self.settle(result)? else {
            return Ok(());
        };

        let filter = ProviderFilter {
            search: search.unwrap_or_default(),
            specialization,
        };
        let shown = filter.apply(&providers);
        println!("{} doctors available", shown.len());
        println!("Specializations: {}", views::specializations(&providers).join(", "));
        for provider in shown {
            println!(
                "  #{:<5} {:<30} {:<20} {}",
                provider.id,
                provider.display_name(),
                provider.specialization,
                provider.available_days
            );
        }
        Ok(())
    }

    pub async fn slots(&mut self, doctor_id: ProviderId, date: NaiveDate) -> anyhow::Result<()> {
        let Some(provider) = self.find_provider(doctor_id).await? else {
            return Ok(());
        };
        let flow = self.booking_flow();
        flow.choose_provider(provider)?;

        match flow.choose_date(date).await {
            Err(e) => notify(&Notice::error(e.to_string())),
            Ok(SlotResolution::Applied) => print_slot_grid(&flow.snapshot()),
            Ok(_) => notify_from(&flow.snapshot()),
        }
        Ok(())
    }

    pub async fn book(
        &mut self,
        doctor_id: ProviderId,
        date: NaiveDate,
        time: SlotTime,
    ) -> anyhow::Result<()> {
        if !self.session.is_authenticated() {
            println!("{LOGIN_PROMPT}");
            return Ok(());
        }
        let Some(provider) = self.find_provider(doctor_id).await? else {
            return Ok(());
        };
        let flow = self.booking_flow();
        flow.choose_provider(provider)?;

        match flow.choose_date(date).await {
            Err(e) => {
                notify(&Notice::error(e.to_string()));
                return Ok(());
            }
            Ok(SlotResolution::Applied) => {}
            Ok(_) => {
                notify_from(&flow.snapshot());
                return Ok(());
            }
        }
        if let Some(notice) = catalog_notice(time) {
            notify(&notice);
            return Ok(());
        }
        if let Err(e) = flow.choose_start_time(time) {
            notify(&Notice::error(e.to_string()));
            return Ok(());
        }
        print_booking_summary(&flow.snapshot());

        match flow.submit(self.session.user_id()).await {
            Err(e) => notify(&Notice::error(e.to_string())),
            Ok(SubmitResolution::Booked) => {
                let snapshot = flow.snapshot();
                notify_from(&snapshot);
                print_slot_grid(&snapshot);
            }
            Ok(SubmitResolution::Rejected {
                message,
                unauthorized,
            }) => {
                notify(&Notice::error(message));
                if unauthorized {
                    self.drop_session()?;
                }
            }
            Ok(SubmitResolution::Stale) => {}
        }
        Ok(())
    }

    // -----------------------------------------------------------------------------------------
    // Appointments

    pub async fn appointments(&mut self, table: TableOptions) -> anyhow::Result<()> {
        match self.session.role() {
            Some(Role::Admin) => self.admin_appointments(table).await,
            Some(Role::Doctor) => self.doctor_appointments(table.filter.status, table.page).await,
            Some(Role::Patient) => self.patient_appointments(table.filter.status).await,
            None => {
                self.explain_skip();
                Ok(())
            }
        }
    }

    async fn admin_appointments(&mut self, table: TableOptions) -> anyhow::Result<()> {
        let result = queries::all_appointments(&self.gateway, &self.session).await;
        let Some(rows) = self.gated(result)? else {
            return Ok(());
        };

        let stats = AppointmentStats::from_rows(&rows);
        println!(
            "Total {} | Pending {} | Confirmed {} | Cancelled {}",
            stats.total, stats.pending, stats.confirmed, stats.cancelled
        );

        let shown = views::appointment_table(&rows, &table.filter, table.sort);
        if table.filter.is_empty() {
            println!("Showing all {} appointments", rows.len());
        } else {
            println!("Showing {} of {} appointments (filtered)", shown.len(), rows.len());
        }

        let page = views::paginate(&shown, table.page, DEFAULT_PAGE_SIZE);
        for row in page.items {
            print_row(row);
        }
        println!("{}", page_footer(&page));
        Ok(())
    }

    async fn doctor_appointments(
        &mut self,
        status: Option<AppointmentStatus>,
        page: usize,
    ) -> anyhow::Result<()> {
        let result = queries::doctor_appointments(&self.gateway, &self.session).await;
        let Some(rows) = self.gated(result)? else {
            return Ok(());
        };

        let shown = views::doctor_view(&rows, status);
        println!("Showing {} of {} appointments", shown.len(), rows.len());
        let page = views::paginate(&shown, page, DEFAULT_PAGE_SIZE);
        for row in page.items {
            print_row(row);
            if views::can_confirm(row) {
                println!("        confirm: meditrack confirm {}", row.appointments.id);
            }
        }
        println!("{}", page_footer(&page));
        Ok(())
    }

    async fn patient_appointments(
        &mut self,
        status: Option<AppointmentStatus>,
    ) -> anyhow::Result<()> {
        let result = queries::my_appointments(&self.gateway, &self.session).await;
        let Some(rows) = self.gated(result)? else {
            return Ok(());
        };

        for (status, group) in views::group_by_status(&rows, status) {
            println!("{} appointments ({})", capitalise(status.as_str()), group.len());
            for row in group {
                print_row(row);
                if views::can_cancel(row) {
                    println!("        cancel: meditrack cancel {}", row.appointments.id);
                }
            }
        }
        Ok(())
    }

    pub async fn cancel(&mut self, id: AppointmentId) -> anyhow::Result<()> {
        if self.session.role() != Some(Role::Patient) {
            self.explain_skip();
            return Ok(());
        }
        let result = queries::my_appointments(&self.gateway, &self.session).await;
        let Some(rows) = self.gated(result)? else {
            return Ok(());
        };
        let Some(row) = rows.iter().find(|r| r.appointments.id == id) else {
            notify(&Notice::error(format!("Appointment #{id} is not in your list.")));
            return Ok(());
        };
        if !views::can_cancel(row) {
            notify(&Notice::error("Only pending appointments can be cancelled."));
            return Ok(());
        }

        let result = self.gateway.cancel_appointment(id).await;
        if let Some(reply) = self.settle(result)? {
            notify(&Notice::success(reply.message));
        }
        Ok(())
    }

    pub async fn confirm(&mut self, id: AppointmentId) -> anyhow::Result<()> {
        let result = queries::doctor_appointments(&self.gateway, &self.session).await;
        let Some(rows) = self.gated(result)? else {
            return Ok(());
        };
        let Some(row) = rows.iter().find(|r| r.appointments.id == id) else {
            notify(&Notice::error(format!("Appointment #{id} is not in your list.")));
            return Ok(());
        };
        if !views::can_confirm(row) {
            notify(&Notice::error("Only pending appointments can be confirmed."));
            return Ok(());
        }

        let result = self.gateway.confirm_appointment(id).await;
        if let Some(reply) = self.settle(result)? {
            notify(&Notice::success(reply.message));
        }
        Ok(())
    }

    pub async fn schedule(
        &mut self,
        date: Option<NaiveDate>,
        status: Option<AppointmentStatus>,
    ) -> anyhow::Result<()> {
        let result = queries::doctor_appointments(&self.gateway, &self.session).await;
        let Some(rows) = self.gated(result)? else {
            return Ok(());
        };

        let date = date.unwrap_or_else(today);
        let day = views::day_schedule(&rows, date, status);
        println!("Schedule for {date}: {} appointments", day.len());
        for row in day {
            let record = &row.appointments;
            println!(
                "  {}-{}  {:<24} {}",
                record.start_time,
                record
                    .end_time
                    .unwrap_or_else(|| record.start_time.plus_minutes(CONSULTATION_MINUTES)),
                row.patient_name(),
                record.status_or_pending()
            );
        }
        Ok(())
    }

    // -----------------------------------------------------------------------------------------
    // Prescriptions and payments

    pub async fn prescriptions(&mut self) -> anyhow::Result<()> {
        let result = match self.session.role() {
            Some(Role::Admin) => {
                let gateway = &self.gateway;
                queries::for_role(&self.session, Role::Admin, |_| gateway.all_prescriptions())
                    .await
            }
            Some(Role::Doctor) => queries::doctor_prescriptions(&self.gateway, &self.session).await,
            Some(Role::Patient) => queries::my_prescriptions(&self.gateway, &self.session).await,
            None => Ok(Fetch::Skipped),
        };
        let Some(prescriptions) = self.gated(result)? else {
            return Ok(());
        };

        println!("{} prescriptions", prescriptions.len());
        for row in &prescriptions {
            let p = &row.prescriptions;
            println!(
                "  #{:<5} appt #{:<5} {:<12} {:<22} {:<26} {}",
                p.id,
                p.appointment_id,
                p.created_on.as_deref().map_or("-", day_part),
                row.patient_name(),
                row.doctor_name(),
                p.notes
            );
        }
        Ok(())
    }

    pub async fn prescribe(
        &mut self,
        appointment_id: AppointmentId,
        patient_id: UserId,
        notes: &str,
    ) -> anyhow::Result<()> {
        let Some(notes) = checked(NonEmptyText::new(notes)) else {
            return Ok(());
        };
        let prescription = NewPrescription {
            appointment_id,
            user_id: patient_id,
            notes,
        };
        let gateway = &self.gateway;
        let result = queries::for_role(&self.session, Role::Doctor, |_| {
            gateway.create_prescription(&prescription)
        })
        .await;
        if self.gated(result)?.is_some() {
            notify(&Notice::success("Prescription issued."));
        }
        Ok(())
    }

    pub async fn payments(&mut self) -> anyhow::Result<()> {
        let result = queries::my_payments(&self.gateway, &self.session).await;
        let Some(payments) = self.gated(result)? else {
            return Ok(());
        };

        for payment in &payments {
            println!(
                "  #{:<5} appt #{:<5} {:>10} {:<10} {}",
                payment.id,
                payment.appointment_id,
                payment.amount,
                payment.status,
                payment.paid_on.as_deref().unwrap_or("-")
            );
        }
        let total: Decimal = payments.iter().map(|p| p.amount).sum();
        println!("{} payments, total {}", payments.len(), total);
        Ok(())
    }

    // -----------------------------------------------------------------------------------------
    // Support tickets

    pub async fn tickets(&mut self) -> anyhow::Result<()> {
        let admin = self.session.role() == Some(Role::Admin);
        let result = if admin {
            let gateway = &self.gateway;
            queries::for_role(&self.session, Role::Admin, |_| gateway.all_complaints()).await
        } else if self.session.role() == Some(Role::Patient) {
            queries::my_complaints(&self.gateway, &self.session).await
        } else {
            Ok(Fetch::Skipped)
        };
        let Some(complaints) = self.gated(result)? else {
            return Ok(());
        };

        println!("{} tickets", complaints.len());
        for row in &complaints {
            let c = &row.complaints;
            println!(
                "  #{:<5} [{:<11}] {} ({})",
                c.id,
                c.status,
                c.subject,
                c.created_on.as_deref().map_or("-", day_part)
            );
            println!("         {}", c.description);
            if let (Some(doctor), Some(appointment)) = (&row.doctors, &row.appointments) {
                println!(
                    "         about {} on {}",
                    doctor.display_name(),
                    appointment.date
                );
            }
            if admin && !c.status.next_actions().is_empty() {
                let actions: Vec<&str> =
                    c.status.next_actions().iter().map(|s| s.as_str()).collect();
                println!("         can move to: {}", actions.join(", "));
            }
        }
        Ok(())
    }

    pub async fn open_ticket(
        &mut self,
        subject: &str,
        description: &str,
        appointment: Option<AppointmentId>,
    ) -> anyhow::Result<()> {
        let (Some(subject), Some(description)) = (
            checked(NonEmptyText::new(subject)),
            checked(NonEmptyText::new(description)),
        ) else {
            return Ok(());
        };

        let gateway = &self.gateway;
        let result = queries::for_role(&self.session, Role::Patient, |identity| async move {
            let complaint = NewComplaint {
                user_id: identity.user_id,
                appointment_id: appointment,
                subject,
                description,
                status: ComplaintStatus::Pending,
            };
            gateway.create_complaint(&complaint).await
        })
        .await;
        if self.gated(result)?.is_some() {
            notify(&Notice::success("Ticket submitted. Our team will get back to you."));
        }
        Ok(())
    }

    pub async fn ticket_status(
        &mut self,
        id: ComplaintId,
        status: ComplaintStatus,
    ) -> anyhow::Result<()> {
        let gateway = &self.gateway;
        let result =
            queries::for_role(&self.session, Role::Admin, |_| gateway.all_complaints()).await;
        let Some(complaints) = self.gated(result)? else {
            return Ok(());
        };
        let Some(current) = complaints
            .iter()
            .map(|row| &row.complaints)
            .find(|c| c.id == id)
            .map(|c| c.status)
        else {
            notify(&Notice::error(format!("Ticket #{id} does not exist.")));
            return Ok(());
        };
        if !current.can_move_to(status) {
            notify(&Notice::error(format!(
                "A ticket that is {current} cannot move to {status}."
            )));
            return Ok(());
        }

        let result = self
            .gateway
            .update_complaint_status(id, &ComplaintUpdate { status })
            .await;
        if let Some(reply) = self.settle(result)? {
            notify(&Notice::success(reply.message));
        }
        Ok(())
    }

    // -----------------------------------------------------------------------------------------
    // Administration

    pub async fn users(&mut self) -> anyhow::Result<()> {
        let gateway = &self.gateway;
        let result = queries::for_role(&self.session, Role::Admin, |_| gateway.list_users()).await;
        let Some(users) = self.gated(result)? else {
            return Ok(());
        };

        println!("{} users", users.len());
        for user in &users {
            println!(
                "  #{:<5} {:<26} {:<30} {:<8} {}",
                user.id,
                user.full_name(),
                user.email,
                user.role,
                user.contact_no.as_deref().unwrap_or("-")
            );
        }
        Ok(())
    }

    pub async fn set_role(&mut self, user_id: UserId, role: Role) -> anyhow::Result<()> {
        if role == Role::Admin {
            notify(&Notice::error(
                "Users can only be promoted to doctor or demoted to patient.",
            ));
            return Ok(());
        }
        let change = RoleChange { role };
        let gateway = &self.gateway;
        let result = queries::for_role(&self.session, Role::Admin, |_| {
            gateway.set_user_role(user_id, &change)
        })
        .await;
        if self.gated(result)?.is_some() {
            notify(&Notice::success(format!("User #{user_id} is now a {role}.")));
        }
        Ok(())
    }

    pub async fn delete_user(&mut self, user_id: UserId) -> anyhow::Result<()> {
        if self.session.user_id() == Some(user_id) {
            notify(&Notice::error("You cannot delete your own account."));
            return Ok(());
        }
        let gateway = &self.gateway;
        let result =
            queries::for_role(&self.session, Role::Admin, |_| gateway.delete_user(user_id)).await;
        if self.gated(result)?.is_some() {
            notify(&Notice::success(format!("User #{user_id} deleted.")));
        }
        Ok(())
    }

    pub async fn analytics(&mut self) -> anyhow::Result<()> {
        let gateway = &self.gateway;
        let result = queries::for_role(&self.session, Role::Admin, |_| async move {
            let (roles, statuses, prescriptions, complaints, payments) = tokio::join!(
                gateway.role_breakdown(),
                gateway.appointment_status_counts(),
                gateway.prescription_total(),
                gateway.complaint_total(),
                gateway.payment_total(),
            );
            Ok::<_, GatewayError>(Analytics {
                roles: roles?,
                statuses: statuses?,
                prescriptions: prescriptions?.total,
                complaints: complaints?.total,
                payments: payments?.total,
            })
        })
        .await;
        let Some(analytics) = self.gated(result)? else {
            return Ok(());
        };

        println!("Users by role");
        for count in &analytics.roles {
            println!("  {:<10} {}", count.role, count.total);
        }
        println!("Appointments by status");
        for count in &analytics.statuses {
            println!("  {:<10} {}", count.status, count.total);
        }
        println!("Prescriptions  {}", analytics.prescriptions);
        println!("Tickets        {}", analytics.complaints);
        println!("Payments       {}", analytics.payments);
        Ok(())
    }

    // -----------------------------------------------------------------------------------------
    // Helpers

    fn booking_flow(&self) -> BookingFlow<HttpGateway> {
        BookingFlow::new(
            Arc::new(self.gateway.clone()),
            today(),
            self.config.consultation_fee(),
        )
    }

    async fn find_provider(&mut self, id: ProviderId) -> anyhow::Result<Option<Provider>> {
        let result = self.gateway.list_providers().await;
        let Some(providers) = self.settle(result)? else {
            return Ok(None);
        };
        let found = providers.into_iter().find(|p| p.id == id);
        if found.is_none() {
            notify(&Notice::error(format!("No doctor with id {id}.")));
        }
        Ok(found)
    }

    /// Shows the failure as a notice. An authorization failure also ends the session.
    fn settle<T>(&mut self, result: GatewayResult<T>) -> anyhow::Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                notify(&Notice::error(e.user_message()));
                if e.is_unauthorized() {
                    self.drop_session()?;
                }
                Ok(None)
            }
        }
    }

    fn gated<T>(&mut self, result: GatewayResult<Fetch<T>>) -> anyhow::Result<Option<T>> {
        match self.settle(result)? {
            Some(Fetch::Loaded(value)) => Ok(Some(value)),
            Some(Fetch::Skipped) => {
                self.explain_skip();
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn explain_skip(&self) {
        if self.session.is_authenticated() {
            println!("{WRONG_ROLE}");
        } else {
            println!("{LOGIN_PROMPT}");
        }
    }

    fn drop_session(&mut self) -> anyhow::Result<()> {
        if self.session.is_authenticated() {
            self.session.clear_credentials()?;
            self.gateway = self.gateway.clone().with_token(None);
            println!("You have been logged out. {LOGIN_PROMPT}");
        }
        Ok(())
    }
}

/// Only catalog times are offered for booking. Anything else is refused before it reaches the
/// controller.
fn catalog_notice(time: SlotTime) -> Option<Notice> {
    if constants::is_catalog_time(time) {
        None
    } else {
        Some(Notice::error(format!(
            "{time} is not a bookable start time. Choose one of: {}",
            SLOT_CATALOG.join(", ")
        )))
    }
}

/// `2024-06-01T09:00:00Z` and `2024-06-01` both show as `2024-06-01`.
fn day_part(stamp: &str) -> &str {
    stamp.split('T').next().unwrap_or(stamp)
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn checked<T, E: Display>(result: Result<T, E>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            notify(&Notice::error(e.to_string()));
            None
        }
    }
}

fn notify(notice: &Notice) {
    match notice.kind {
        NoticeKind::Success => println!("[ok] {}", notice.message),
        NoticeKind::Error => println!("[error] {}", notice.message),
    }
}

fn notify_from(selection: &SlotSelection) {
    if let Some(notice) = selection.notice() {
        notify(notice);
    }
}

fn capitalise(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn page_footer<T>(page: &Page<'_, T>) -> String {
    let mut line = format!("Page {} of {}", page.number, page.total_pages);
    if page.has_previous() {
        line.push_str(&format!("  previous: --page {}", page.number - 1));
    }
    if page.has_next() {
        line.push_str(&format!("  next: --page {}", page.number + 1));
    }
    line
}

fn print_row(row: &AppointmentRow) {
    let record = &row.appointments;
    println!(
        "  #{:<5} {} {}  {:<22} {:<22} {:<10} {}",
        record.id,
        record.date,
        record.start_time,
        row.patient_name(),
        row.doctor_name(),
        record.status.map_or("-", |s| s.as_str()),
        row.payment_status().unwrap_or("-")
    );
}

fn print_booking_summary(selection: &SlotSelection) {
    let (Some(provider), Some(draft)) = (selection.provider(), selection.draft()) else {
        return;
    };
    println!(
        "Booking {} on {} from {} to {} (fee {})",
        provider.display_name(),
        draft.date,
        draft.start_time,
        draft.end_time,
        draft.amount
    );
}

fn print_slot_grid(selection: &SlotSelection) {
    if let (Some(provider), Some(date)) = (selection.provider(), selection.date()) {
        println!("{} on {date}", provider.display_name());
    }
    let views = selection.slot_views();
    for chunk in views.chunks(4) {
        let cells: Vec<String> = chunk
            .iter()
            .map(|v| {
                let mark = if v.selected {
                    "*"
                } else if v.taken {
                    "x"
                } else if v.enabled {
                    " "
                } else {
                    "-"
                };
                format!("[{mark}] {}", v.time)
            })
            .collect();
        println!("  {}", cells.join("   "));
    }
    println!("  [x] taken  [*] selected  [-] unavailable");
}
