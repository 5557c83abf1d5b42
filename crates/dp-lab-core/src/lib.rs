//! DP Lab Core Library
//!
//! Record keeping for a dental prosthetics lab: jobs, the price list, the
//! clinic and doctor directory, bookkeeping, inventory and derived reports.
//!
//! # Architecture
//!
//! ```text
//!   Host form ──► validated record ──► LabStore (one JSON file per collection)
//!                                            │
//!                                    borrowed snapshot
//!                                            │
//!                     ┌──────────────────────┼──────────────────────┐
//!                     ▼                      ▼                      ▼
//!                  filter                 report                 export
//!              (jobs, finance)   (revenue, balances, totals)   (CSV, JSON)
//! ```
//!
//! The license gate runs once in [`open_lab`]; the store is not touched
//! until it passes.
//!
//! # Modules
//!
//! - [`models`]: Domain records and form inputs
//! - [`store`]: Collection files and store operations
//! - [`pricing`]: Price resolution and quotes
//! - [`filter`]: Job and finance list filters
//! - [`report`]: Revenue and balance aggregation
//! - [`export`]: CSV and JSON exports
//! - [`config`]: TOML configuration
//! - [`license`]: License activation

pub mod config;
pub mod export;
pub mod filter;
pub mod license;
pub mod models;
pub mod pricing;
pub mod report;
pub mod store;

// Re-export commonly used types
pub use config::LabConfig;
pub use filter::{FinanceCriteria, JobCriteria};
pub use license::LicenseGate;
pub use models::{
    Clinic, Doctor, FinanceEntry, FinanceInput, FinanceKind, InventoryInput, InventoryItem, Job,
    JobInput, JobStatus, PriceEntry, RecordId, ValidationError,
};
pub use report::LabReport;
pub use store::{LabStore, StoreError};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::path::Path;
use std::sync::{Arc, Mutex};

use models::money::format_money;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum LabError {
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("License error: {0}")]
    LicenseError(String),

    #[error("No valid license activation")]
    LicenseRequired,
}

impl From<StoreError> for LabError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Validation(v) => LabError::InvalidInput(v.to_string()),
            other => LabError::StorageError(other.to_string()),
        }
    }
}

impl From<ValidationError> for LabError {
    fn from(e: ValidationError) -> Self {
        LabError::InvalidInput(e.to_string())
    }
}

impl From<serde_json::Error> for LabError {
    fn from(e: serde_json::Error) -> Self {
        LabError::SerializationError(e.to_string())
    }
}

impl From<config::ConfigError> for LabError {
    fn from(e: config::ConfigError) -> Self {
        LabError::ConfigError(e.to_string())
    }
}

impl From<license::LicenseError> for LabError {
    fn from(e: license::LicenseError) -> Self {
        LabError::LicenseError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for LabError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        LabError::StorageError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Install the logger. Later calls are ignored.
#[uniffi::export]
pub fn init_logging(filter: Option<String>) {
    let filter = filter.unwrap_or_else(|| LabConfig::default().log_filter);
    let result = env_logger::Builder::new()
        .parse_filters(&filter)
        .format_timestamp_millis()
        .try_init();
    if result.is_ok() {
        log::debug!("Logging initialised with filter '{}'", filter);
    }
}

/// Check the license and open the lab store named by the configuration.
#[uniffi::export]
pub fn open_lab(config_path: Option<String>) -> Result<Arc<LabCore>, LabError> {
    let config = LabConfig::load(config_path.as_deref().map(Path::new))?;
    if !LicenseGate::from_config(&config).verify()? {
        log::warn!("Refusing to open the lab store without a valid license");
        return Err(LabError::LicenseRequired);
    }
    let store = LabStore::open(&config.data_dir)?;
    Ok(Arc::new(LabCore {
        store: Arc::new(Mutex::new(store)),
    }))
}

/// Activate a license key. Returns `false` when the key is not valid.
#[uniffi::export]
pub fn activate_license(config_path: Option<String>, key: String) -> Result<bool, LabError> {
    let config = LabConfig::load(config_path.as_deref().map(Path::new))?;
    Ok(LicenseGate::from_config(&config).activate(&key)?)
}

/// Every job status, in workflow order.
#[uniffi::export]
pub fn job_statuses() -> Vec<String> {
    JobStatus::ALL.iter().map(|s| s.to_string()).collect()
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe store wrapper for FFI.
#[derive(uniffi::Object)]
pub struct LabCore {
    store: Arc<Mutex<LabStore>>,
}

impl LabCore {
    /// Wrap an already opened store, bypassing the license gate.
    pub fn from_store(store: LabStore) -> Arc<Self> {
        Arc::new(Self {
            store: Arc::new(Mutex::new(store)),
        })
    }
}

#[uniffi::export]
impl LabCore {
    // =========================================================================
    // Job Operations
    // =========================================================================

    pub fn list_jobs(&self) -> Result<Vec<FfiJob>, LabError> {
        let store = self.store.lock()?;
        Ok(store.jobs().iter().map(FfiJob::from).collect())
    }

    /// Filter jobs; malformed date bounds are rejected before scanning.
    pub fn filter_jobs(&self, criteria: FfiJobCriteria) -> Result<FfiJobList, LabError> {
        let criteria = JobCriteria::try_from(criteria)?;
        let store = self.store.lock()?;
        let outcome = filter::filter_jobs_detailed(store.jobs(), &criteria);
        Ok(FfiJobList {
            total: format_money(filter::total_revenue(&outcome.matched)),
            jobs: outcome.matched.iter().map(FfiJob::from).collect(),
            unreadable_dates: outcome.unreadable_dates.iter().map(|id| id.to_string()).collect(),
        })
    }

    /// Create a job. A missing total is quoted from the price list.
    pub fn create_job(&self, input: FfiJobInput) -> Result<FfiJob, LabError> {
        let input = JobInput::try_from(input)?;
        let mut store = self.store.lock()?;
        let job = store.create_job(input)?;
        Ok(FfiJob::from(&job))
    }

    pub fn update_job(&self, id: String, input: FfiJobInput) -> Result<Option<FfiJob>, LabError> {
        let input = JobInput::try_from(input)?;
        let mut store = self.store.lock()?;
        let job = store.update_job(&RecordId::from(id), input)?;
        Ok(job.as_ref().map(FfiJob::from))
    }

    pub fn set_job_status(&self, id: String, status: String) -> Result<bool, LabError> {
        let status: JobStatus = status.parse()?;
        let mut store = self.store.lock()?;
        Ok(store.set_job_status(&RecordId::from(id), status)?)
    }

    pub fn delete_job(&self, id: String) -> Result<bool, LabError> {
        let mut store = self.store.lock()?;
        Ok(store.delete_job(&RecordId::from(id))?)
    }

    /// Ticket text for the QR label of a job.
    pub fn job_ticket(&self, id: String) -> Result<Option<String>, LabError> {
        let store = self.store.lock()?;
        Ok(store.get_job(&RecordId::from(id)).map(Job::ticket_text))
    }

    // =========================================================================
    // Directory Operations
    // =========================================================================

    pub fn list_clinics(&self) -> Result<Vec<FfiClinic>, LabError> {
        let store = self.store.lock()?;
        Ok(store.clinics().iter().map(FfiClinic::from).collect())
    }

    pub fn add_clinic(&self, name: String) -> Result<FfiClinic, LabError> {
        let mut store = self.store.lock()?;
        let clinic = store.add_clinic(&name)?;
        Ok(FfiClinic::from(&clinic))
    }

    pub fn delete_clinic(&self, id: String) -> Result<bool, LabError> {
        let mut store = self.store.lock()?;
        Ok(store.delete_clinic(&RecordId::from(id))?)
    }

    pub fn list_doctors(&self) -> Result<Vec<FfiDoctor>, LabError> {
        let store = self.store.lock()?;
        Ok(store.doctors().iter().map(FfiDoctor::from).collect())
    }

    pub fn doctors_for_clinic(&self, clinic: String) -> Result<Vec<FfiDoctor>, LabError> {
        let store = self.store.lock()?;
        Ok(store
            .doctors_for_clinic(&clinic)
            .into_iter()
            .map(FfiDoctor::from)
            .collect())
    }

    pub fn add_doctor(&self, name: String, clinic: String) -> Result<FfiDoctor, LabError> {
        let mut store = self.store.lock()?;
        let doctor = store.add_doctor(&name, &clinic)?;
        Ok(FfiDoctor::from(&doctor))
    }

    pub fn delete_doctor(&self, id: String) -> Result<bool, LabError> {
        let mut store = self.store.lock()?;
        Ok(store.delete_doctor(&RecordId::from(id))?)
    }

    // =========================================================================
    // Price Operations
    // =========================================================================

    pub fn list_prices(&self) -> Result<Vec<FfiPriceEntry>, LabError> {
        let store = self.store.lock()?;
        Ok(store.prices().iter().map(FfiPriceEntry::from).collect())
    }

    /// Add a price; a blank clinic means the general price list.
    pub fn add_price(
        &self,
        prosthesis: String,
        clinic: String,
        unit_price: String,
    ) -> Result<FfiPriceEntry, LabError> {
        let mut store = self.store.lock()?;
        let entry = store.add_price(&prosthesis, &clinic, &unit_price)?;
        Ok(FfiPriceEntry::from(&entry))
    }

    pub fn update_unit_price(&self, id: String, unit_price: String) -> Result<bool, LabError> {
        let mut store = self.store.lock()?;
        Ok(store.update_unit_price(&RecordId::from(id), &unit_price)?)
    }

    pub fn delete_price(&self, id: String) -> Result<bool, LabError> {
        let mut store = self.store.lock()?;
        Ok(store.delete_price(&RecordId::from(id))?)
    }

    /// Quote a job as the form is filled in. Never fails on bad count text.
    pub fn quote(
        &self,
        prosthesis: String,
        clinic: String,
        count: String,
    ) -> Result<FfiPriceQuote, LabError> {
        let store = self.store.lock()?;
        Ok(store.quote(&prosthesis, &clinic, &count).into())
    }

    pub fn prosthesis_types(&self) -> Result<Vec<String>, LabError> {
        let store = self.store.lock()?;
        Ok(store.prosthesis_types())
    }

    // =========================================================================
    // Finance Operations
    // =========================================================================

    pub fn list_finance(&self) -> Result<Vec<FfiFinanceEntry>, LabError> {
        let store = self.store.lock()?;
        Ok(store.finance().iter().map(FfiFinanceEntry::from).collect())
    }

    pub fn filter_finance(&self, criteria: FfiFinanceCriteria) -> Result<FfiFinanceList, LabError> {
        let criteria = FinanceCriteria::try_from(criteria)?;
        let store = self.store.lock()?;
        let outcome = filter::filter_finance_detailed(store.finance(), &criteria);
        Ok(FfiFinanceList {
            totals: report::finance_totals(&outcome.matched).into(),
            entries: outcome.matched.iter().map(FfiFinanceEntry::from).collect(),
            unreadable_dates: outcome.unreadable_dates.iter().map(|id| id.to_string()).collect(),
        })
    }

    pub fn add_finance_entry(&self, input: FfiFinanceInput) -> Result<FfiFinanceEntry, LabError> {
        let input = FinanceInput::try_from(input)?;
        let mut store = self.store.lock()?;
        let entry = store.add_finance_entry(input)?;
        Ok(FfiFinanceEntry::from(&entry))
    }

    pub fn update_finance_entry(
        &self,
        id: String,
        input: FfiFinanceInput,
    ) -> Result<Option<FfiFinanceEntry>, LabError> {
        let input = FinanceInput::try_from(input)?;
        let mut store = self.store.lock()?;
        let entry = store.update_finance_entry(&RecordId::from(id), input)?;
        Ok(entry.as_ref().map(FfiFinanceEntry::from))
    }

    pub fn delete_finance_entry(&self, id: String) -> Result<bool, LabError> {
        let mut store = self.store.lock()?;
        Ok(store.delete_finance_entry(&RecordId::from(id))?)
    }

    // =========================================================================
    // Inventory Operations
    // =========================================================================

    pub fn list_inventory(&self) -> Result<Vec<FfiInventoryItem>, LabError> {
        let store = self.store.lock()?;
        Ok(store.inventory().iter().map(FfiInventoryItem::from).collect())
    }

    pub fn add_inventory_item(&self, input: FfiInventoryInput) -> Result<FfiInventoryItem, LabError> {
        let mut store = self.store.lock()?;
        let item = store.add_inventory_item(input.into())?;
        Ok(FfiInventoryItem::from(&item))
    }

    pub fn update_inventory_item(
        &self,
        id: String,
        input: FfiInventoryInput,
    ) -> Result<Option<FfiInventoryItem>, LabError> {
        let mut store = self.store.lock()?;
        let item = store.update_inventory_item(&RecordId::from(id), input.into())?;
        Ok(item.as_ref().map(FfiInventoryItem::from))
    }

    pub fn delete_inventory_item(&self, id: String) -> Result<bool, LabError> {
        let mut store = self.store.lock()?;
        Ok(store.delete_inventory_item(&RecordId::from(id))?)
    }

    // =========================================================================
    // Report Operations
    // =========================================================================

    /// Revenue by clinic and month plus clinic balances, computed now.
    pub fn report(&self) -> Result<FfiLabReport, LabError> {
        let store = self.store.lock()?;
        Ok(store.report().into())
    }

    /// Load state of each collection file.
    pub fn collection_health(&self) -> Result<Vec<FfiCollectionHealth>, LabError> {
        let store = self.store.lock()?;
        Ok(store.health().into_iter().map(FfiCollectionHealth::from).collect())
    }

    // =========================================================================
    // Export Operations
    // =========================================================================

    pub fn export_jobs_csv(&self, criteria: FfiJobCriteria) -> Result<String, LabError> {
        Ok(self.job_list_export(criteria)?.to_csv())
    }

    pub fn export_jobs_json(&self, criteria: FfiJobCriteria) -> Result<String, LabError> {
        Ok(self.job_list_export(criteria)?.to_json()?)
    }

    pub fn export_finance_csv(&self, criteria: FfiFinanceCriteria) -> Result<String, LabError> {
        Ok(self.finance_list_export(criteria)?.to_csv())
    }

    pub fn export_finance_json(&self, criteria: FfiFinanceCriteria) -> Result<String, LabError> {
        Ok(self.finance_list_export(criteria)?.to_json()?)
    }

    pub fn export_report_csv(&self) -> Result<String, LabError> {
        let store = self.store.lock()?;
        Ok(export::ReportExport::from_report(&store.report()).to_csv())
    }

    pub fn export_report_json(&self) -> Result<String, LabError> {
        let store = self.store.lock()?;
        Ok(export::ReportExport::from_report(&store.report()).to_json()?)
    }
}

impl LabCore {
    fn job_list_export(&self, criteria: FfiJobCriteria) -> Result<export::JobListExport, LabError> {
        let criteria = JobCriteria::try_from(criteria)?;
        let store = self.store.lock()?;
        let jobs = filter::filter_jobs(store.jobs(), &criteria);
        Ok(export::JobListExport::from_jobs(&jobs))
    }

    fn finance_list_export(
        &self,
        criteria: FfiFinanceCriteria,
    ) -> Result<export::FinanceListExport, LabError> {
        let criteria = FinanceCriteria::try_from(criteria)?;
        let store = self.store.lock()?;
        let entries = filter::filter_finance(store.finance(), &criteria);
        Ok(export::FinanceListExport::from_entries(&entries))
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe job. Money is a two-place decimal string.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiJob {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub clinic: String,
    pub doctor: String,
    pub prosthesis: String,
    pub count: u32,
    pub note: String,
    pub date: String,
    pub total_price: String,
    pub status: String,
}

impl From<&Job> for FfiJob {
    fn from(job: &Job) -> Self {
        Self {
            id: job.id.to_string(),
            first_name: job.first_name.clone(),
            last_name: job.last_name.clone(),
            clinic: job.clinic.clone(),
            doctor: job.doctor.clone(),
            prosthesis: job.prosthesis.clone(),
            count: job.count,
            note: job.note.clone(),
            date: job.date.clone(),
            total_price: format_money(job.total_price),
            status: job.status.to_string(),
        }
    }
}

/// FFI-safe job form.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiJobInput {
    pub first_name: String,
    pub last_name: String,
    pub clinic: String,
    pub doctor: String,
    pub prosthesis: String,
    pub count: String,
    pub note: String,
    pub date: String,
    /// Blank or absent to quote from the price list
    pub total_price: Option<String>,
    /// Absent means Preparing for a new job and unchanged for an edit
    pub status: Option<String>,
}

impl TryFrom<FfiJobInput> for JobInput {
    type Error = ValidationError;

    fn try_from(input: FfiJobInput) -> Result<Self, Self::Error> {
        let status = match input.status.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => Some(text.parse()?),
            _ => None,
        };
        Ok(JobInput {
            first_name: input.first_name,
            last_name: input.last_name,
            clinic: input.clinic,
            doctor: input.doctor,
            prosthesis: input.prosthesis,
            count: input.count,
            note: input.note,
            date: input.date,
            total_price: input.total_price,
            status,
        })
    }
}

/// FFI-safe job filter form.
#[derive(Debug, Clone, Default, uniffi::Record)]
pub struct FfiJobCriteria {
    pub clinic: Option<String>,
    pub doctor: Option<String>,
    pub name: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

impl TryFrom<FfiJobCriteria> for JobCriteria {
    type Error = ValidationError;

    fn try_from(criteria: FfiJobCriteria) -> Result<Self, Self::Error> {
        JobCriteria::from_form(
            criteria.clinic,
            criteria.doctor,
            criteria.name,
            criteria.date_from.as_deref(),
            criteria.date_to.as_deref(),
        )
    }
}

/// Filtered jobs with their revenue footer.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiJobList {
    pub jobs: Vec<FfiJob>,
    pub total: String,
    /// Ids of jobs left out because their stored date is unreadable
    pub unreadable_dates: Vec<String>,
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiClinic {
    pub id: String,
    pub name: String,
}

impl From<&Clinic> for FfiClinic {
    fn from(clinic: &Clinic) -> Self {
        Self {
            id: clinic.id.to_string(),
            name: clinic.name.clone(),
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDoctor {
    pub id: String,
    pub name: String,
    pub clinic: String,
}

impl From<&Doctor> for FfiDoctor {
    fn from(doctor: &Doctor) -> Self {
        Self {
            id: doctor.id.to_string(),
            name: doctor.name.clone(),
            clinic: doctor.clinic.clone(),
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPriceEntry {
    pub id: String,
    pub prosthesis: String,
    pub clinic: String,
    pub unit_price: String,
}

impl From<&PriceEntry> for FfiPriceEntry {
    fn from(entry: &PriceEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            prosthesis: entry.prosthesis.clone(),
            clinic: entry.clinic.clone(),
            unit_price: format_money(entry.unit_price),
        }
    }
}

/// FFI-safe price quote.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPriceQuote {
    pub unit_price: Option<String>,
    /// "Clinic" or "General" when a price applied
    pub source: Option<String>,
    pub count: Option<u32>,
    pub total: String,
}

impl From<pricing::PriceQuote> for FfiPriceQuote {
    fn from(quote: pricing::PriceQuote) -> Self {
        Self {
            unit_price: quote.unit_price.map(format_money),
            source: quote.source.map(|source| format!("{:?}", source)),
            count: quote.count,
            total: format_money(quote.total),
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFinanceEntry {
    pub id: String,
    pub clinic: String,
    pub kind: String,
    pub description: String,
    pub amount: String,
    pub date: String,
}

impl From<&FinanceEntry> for FfiFinanceEntry {
    fn from(entry: &FinanceEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            clinic: entry.clinic.clone(),
            kind: entry.kind.to_string(),
            description: entry.description.clone(),
            amount: format_money(entry.amount),
            date: entry.date.clone(),
        }
    }
}

/// FFI-safe bookkeeping form. `kind` is "Income" or "Expense".
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFinanceInput {
    pub clinic: String,
    pub kind: String,
    pub description: String,
    pub amount: String,
    pub date: String,
}

impl TryFrom<FfiFinanceInput> for FinanceInput {
    type Error = ValidationError;

    fn try_from(input: FfiFinanceInput) -> Result<Self, Self::Error> {
        Ok(FinanceInput {
            clinic: input.clinic,
            kind: input.kind.parse()?,
            description: input.description,
            amount: input.amount,
            date: input.date,
        })
    }
}

#[derive(Debug, Clone, Default, uniffi::Record)]
pub struct FfiFinanceCriteria {
    /// Exact clinic name
    pub clinic: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

impl TryFrom<FfiFinanceCriteria> for FinanceCriteria {
    type Error = ValidationError;

    fn try_from(criteria: FfiFinanceCriteria) -> Result<Self, Self::Error> {
        FinanceCriteria::from_form(
            criteria.clinic,
            criteria.date_from.as_deref(),
            criteria.date_to.as_deref(),
        )
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFinanceTotals {
    pub income: String,
    pub expense: String,
    pub net: String,
}

impl From<report::FinanceTotals> for FfiFinanceTotals {
    fn from(totals: report::FinanceTotals) -> Self {
        Self {
            income: format_money(totals.income),
            expense: format_money(totals.expense),
            net: format_money(totals.net),
        }
    }
}

/// Filtered bookkeeping entries with their footers.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFinanceList {
    pub entries: Vec<FfiFinanceEntry>,
    pub totals: FfiFinanceTotals,
    pub unreadable_dates: Vec<String>,
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiInventoryItem {
    pub id: String,
    pub name: String,
    pub quantity: String,
    pub unit: String,
    pub received: String,
    pub expiry: String,
    pub reorder: String,
    pub note: String,
}

impl From<&InventoryItem> for FfiInventoryItem {
    fn from(item: &InventoryItem) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            quantity: item.quantity.to_string(),
            unit: item.unit.clone(),
            received: item.received.clone(),
            expiry: item.expiry.clone(),
            reorder: item.reorder.clone(),
            note: item.note.clone(),
        }
    }
}

/// FFI-safe inventory form. A blank received date means today.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiInventoryInput {
    pub name: String,
    pub quantity: String,
    pub unit: String,
    pub received: String,
    pub expiry: String,
    pub reorder: String,
    pub note: String,
}

impl From<FfiInventoryInput> for InventoryInput {
    fn from(input: FfiInventoryInput) -> Self {
        InventoryInput {
            name: input.name,
            quantity: input.quantity,
            unit: input.unit,
            received: input.received,
            expiry: input.expiry,
            reorder: input.reorder,
            note: input.note,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiClinicRevenue {
    pub clinic: String,
    pub total: String,
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMonthRevenue {
    /// `YYYY-MM`
    pub month: String,
    pub total: String,
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiClinicBalance {
    pub clinic: String,
    pub billed: String,
    pub paid: String,
    pub outstanding: String,
}

/// FFI-safe report set.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiLabReport {
    pub revenue_by_clinic: Vec<FfiClinicRevenue>,
    /// Ascending by month
    pub revenue_by_month: Vec<FfiMonthRevenue>,
    /// Jobs left out of the monthly report for an unreadable date
    pub undated_jobs: u64,
    pub balances: Vec<FfiClinicBalance>,
    /// Collections that could not be read; dependent figures are unreliable
    pub unavailable: Vec<String>,
}

impl From<LabReport> for FfiLabReport {
    fn from(report: LabReport) -> Self {
        Self {
            revenue_by_clinic: report
                .revenue_by_clinic
                .into_iter()
                .map(|row| FfiClinicRevenue {
                    clinic: row.clinic,
                    total: format_money(row.total),
                })
                .collect(),
            revenue_by_month: report
                .revenue_by_month
                .months
                .into_iter()
                .map(|row| FfiMonthRevenue {
                    month: row.month.to_string(),
                    total: format_money(row.total),
                })
                .collect(),
            undated_jobs: report.revenue_by_month.undated_jobs as u64,
            balances: report
                .balances
                .into_iter()
                .map(|row| FfiClinicBalance {
                    clinic: row.clinic,
                    billed: format_money(row.billed),
                    paid: format_money(row.paid),
                    outstanding: format_money(row.outstanding),
                })
                .collect(),
            unavailable: report.unavailable,
        }
    }
}

/// FFI-safe collection load state.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCollectionHealth {
    pub collection: String,
    pub records: u64,
    pub unreadable: u64,
    /// Why the collection is unavailable, if it is
    pub fault: Option<String>,
}

impl From<store::CollectionHealth> for FfiCollectionHealth {
    fn from(health: store::CollectionHealth) -> Self {
        Self {
            collection: health.collection.to_string(),
            records: health.records as u64,
            unreadable: health.unreadable as u64,
            fault: health.fault,
        }
    }
}
