//! End-to-end lab scenarios through the store and the FFI object.

use std::fs;
use std::path::Path;

use dp_lab_core::filter::{filter_jobs, JobCriteria};
use dp_lab_core::models::{FinanceInput, FinanceKind, JobInput, JobStatus};
use dp_lab_core::{
    activate_license, open_lab, FfiFinanceCriteria, FfiJobCriteria, FfiJobInput, LabCore,
    LabError, LabStore,
};

fn job_form(clinic: &str, date: &str, total: &str) -> JobInput {
    JobInput {
        first_name: "Ayla".into(),
        last_name: "Demir".into(),
        clinic: clinic.into(),
        doctor: "Dr. Kaya".into(),
        prosthesis: "Crown".into(),
        count: "1".into(),
        date: date.into(),
        total_price: Some(total.into()),
        ..Default::default()
    }
}

fn seeded_store(dir: &Path) -> LabStore {
    let mut store = LabStore::open(dir).unwrap();
    store.add_clinic("A").unwrap();
    store.add_clinic("B").unwrap();
    store.create_job(job_form("A", "10/01/2024", "100")).unwrap();
    store.create_job(job_form("A", "20/02/2024", "50")).unwrap();
    store.create_job(job_form("B", "15/01/2024", "30")).unwrap();
    store
}

#[test]
fn test_revenue_and_balances() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = seeded_store(dir.path());

    let report = store.report();
    let revenue: Vec<(String, String)> = report
        .revenue_by_clinic
        .iter()
        .map(|row| (row.clinic.clone(), row.total.to_string()))
        .collect();
    assert_eq!(
        revenue,
        vec![("A".into(), "150.00".into()), ("B".into(), "30.00".into())]
    );

    store
        .add_finance_entry(FinanceInput {
            clinic: "A".into(),
            kind: FinanceKind::Income,
            description: "Payment".into(),
            amount: "80".into(),
            date: "31/01/2024".into(),
        })
        .unwrap();

    let balances = store.report().balances;
    assert_eq!(balances[0].clinic, "A");
    assert_eq!(balances[0].outstanding.to_string(), "70.00");
    assert_eq!(balances[1].clinic, "B");
    assert_eq!(balances[1].outstanding.to_string(), "30.00");
}

#[test]
fn test_monthly_revenue_ascending() {
    let dir = tempfile::tempdir().unwrap();
    let store = seeded_store(dir.path());

    let months: Vec<(String, String)> = store
        .report()
        .revenue_by_month
        .months
        .iter()
        .map(|row| (row.month.to_string(), row.total.to_string()))
        .collect();
    assert_eq!(
        months,
        vec![
            ("2024-01".into(), "130.00".into()),
            ("2024-02".into(), "50.00".into())
        ]
    );
}

#[test]
fn test_general_price_quote() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = LabStore::open(dir.path()).unwrap();
    store.add_price("Crown", "General", "500").unwrap();

    assert_eq!(store.quote("Crown", "X", "2").total.to_string(), "1000.00");
    assert_eq!(store.quote("Crown", "X", "two").total.to_string(), "0.00");
    assert_eq!(store.quote("Bridge", "X", "2").total.to_string(), "0.00");
}

#[test]
fn test_january_date_filter() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = LabStore::open(dir.path()).unwrap();
    store.create_job(job_form("A", "05/02/2024", "10")).unwrap();
    let january = store.create_job(job_form("A", "15/01/2024", "10")).unwrap();

    let criteria =
        JobCriteria::from_form(None, None, None, Some("01/01/2024"), Some("31/01/2024")).unwrap();
    assert_eq!(filter_jobs(store.jobs(), &criteria), vec![january]);
}

#[test]
fn test_legacy_records_load_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("jobs.json"),
        r#"[
            {"first_name": "Ayla", "clinic": "A", "prosthesis": "Crown", "count": 1,
             "date": "15/01/2024", "total_price": "150.00"},
            {"first_name": "Broken", "count": "many"}
        ]"#,
    )
    .unwrap();

    let mut store = LabStore::open(dir.path()).unwrap();
    assert_eq!(store.jobs().len(), 1);
    assert_eq!(store.jobs()[0].status, JobStatus::Preparing);
    assert_eq!(store.jobs()[0].note, "");

    store.create_job(job_form("B", "16/01/2024", "30")).unwrap();

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("jobs.json")).unwrap()).unwrap();
    let saved = saved.as_array().unwrap();
    assert_eq!(saved.len(), 3);
    assert_eq!(saved[2]["first_name"], "Broken");
    assert_eq!(saved[2]["count"], "many");
}

#[test]
fn test_corrupt_collection_does_not_block_others() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("prices.json"), "{ not an array").unwrap();

    let mut store = LabStore::open(dir.path()).unwrap();
    assert!(store.prices().is_empty());
    assert!(store.add_price("Crown", "General", "500").is_err());
    assert_eq!(
        fs::read_to_string(dir.path().join("prices.json")).unwrap(),
        "{ not an array"
    );

    store.add_clinic("A").unwrap();
    assert_eq!(store.clinics().len(), 1);
}

#[test]
fn test_core_object_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let core = LabCore::from_store(LabStore::open(dir.path()).unwrap());

    core.add_clinic("A".into()).unwrap();
    core.add_price("Crown".into(), "".into(), "500".into()).unwrap();
    let job = core
        .create_job(FfiJobInput {
            first_name: "Ayla".into(),
            last_name: "Demir".into(),
            clinic: "A".into(),
            doctor: "Dr. Kaya".into(),
            prosthesis: "Crown".into(),
            count: "2".into(),
            note: String::new(),
            date: "15/01/2024".into(),
            total_price: None,
            status: Some("in progress".into()),
        })
        .unwrap();
    assert_eq!(job.total_price, "1000.00");
    assert_eq!(job.status, "InProgress");

    assert!(core.set_job_status(job.id.clone(), "Delivered".into()).unwrap());
    assert!(matches!(
        core.set_job_status(job.id.clone(), "lost".into()),
        Err(LabError::InvalidInput(_))
    ));

    let listed = core.filter_jobs(FfiJobCriteria::default()).unwrap();
    assert_eq!(listed.total, "1000.00");
    assert_eq!(listed.jobs[0].status, "Delivered");

    assert!(matches!(
        core.filter_jobs(FfiJobCriteria {
            date_from: Some("2024-01-01".into()),
            ..Default::default()
        }),
        Err(LabError::InvalidInput(_))
    ));

    let ticket = core.job_ticket(job.id.clone()).unwrap().unwrap();
    assert!(ticket.contains("Patient: Ayla Demir"));

    let report = core.report().unwrap();
    assert_eq!(report.balances[0].outstanding, "1000.00");

    let csv = core.export_jobs_csv(FfiJobCriteria::default()).unwrap();
    assert!(csv.ends_with("Total,,,,,,,,1000.00,\n"));
    let finance_csv = core.export_finance_csv(FfiFinanceCriteria::default()).unwrap();
    assert!(finance_csv.starts_with("clinic,kind,description,amount,date\n"));

    assert!(core.delete_job(job.id).unwrap());
    assert!(core.list_jobs().unwrap().is_empty());
}

#[test]
fn test_open_lab_requires_license() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("lab.toml");
    fs::write(
        &config_path,
        "data_dir = \"records\"\nlicense_keys_file = \"licenses.txt\"\nactivation_file = \"activation.key\"\n",
    )
    .unwrap();
    fs::write(dir.path().join("licenses.txt"), "KEY-1\n").unwrap();
    let config = Some(config_path.display().to_string());

    assert!(matches!(open_lab(config.clone()), Err(LabError::LicenseRequired)));
    assert!(!dir.path().join("records").exists());

    assert!(!activate_license(config.clone(), "KEY-2".into()).unwrap());
    assert!(activate_license(config.clone(), "KEY-1".into()).unwrap());

    let core = match open_lab(config) {
        Ok(core) => core,
        Err(e) => panic!("open_lab failed: {}", e),
    };
    assert!(dir.path().join("records").is_dir());
    assert_eq!(core.collection_health().unwrap().len(), 6);
}

fn ffi_job(status: Option<&str>) -> FfiJobInput {
    FfiJobInput {
        first_name: "Ayla".into(),
        last_name: "Demir".into(),
        clinic: "A".into(),
        doctor: "Dr. Kaya".into(),
        prosthesis: "Crown".into(),
        count: "1".into(),
        note: String::new(),
        date: "15/01/2024".into(),
        total_price: Some("150".into()),
        status: status.map(str::to_string),
    }
}

#[test]
fn test_core_edit_keeps_status_when_form_has_none() {
    let dir = tempfile::tempdir().unwrap();
    let core = LabCore::from_store(LabStore::open(dir.path()).unwrap());

    let job = core.create_job(ffi_job(None)).unwrap();
    assert_eq!(job.status, "Preparing");
    assert!(core.set_job_status(job.id.clone(), "Delivered".into()).unwrap());

    let edited = core.update_job(job.id.clone(), ffi_job(None)).unwrap().unwrap();
    assert_eq!(edited.status, "Delivered");

    let edited = core
        .update_job(job.id, ffi_job(Some("Pending")))
        .unwrap()
        .unwrap();
    assert_eq!(edited.status, "Pending");
}

#[test]
fn test_core_report_names_unreadable_finance() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("finance.json"), "{ corrupt").unwrap();
    let core = LabCore::from_store(LabStore::open(dir.path()).unwrap());
    core.add_clinic("A".into()).unwrap();
    core.create_job(ffi_job(None)).unwrap();

    let report = core.report().unwrap();
    assert_eq!(report.unavailable, vec!["finance".to_string()]);
    assert_eq!(report.balances[0].outstanding, "150.00");

    let csv = core.export_report_csv().unwrap();
    assert!(csv.starts_with("Unavailable collections,finance\n"));
}
