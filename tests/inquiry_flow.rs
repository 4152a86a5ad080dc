mod common;

use assert_matches::assert_matches;
use chrono::Utc;
use pretty_assertions::assert_eq;

use portfolio_admin::error::{StoreError, WizardError};
use portfolio_admin::models::{Inquiry, InquiryStatus, ServiceTier};
use portfolio_admin::review::{SubmissionFilter, SubmissionsReview};
use portfolio_admin::store::{keys, MemoryStore, Storage, StorageExt};
use portfolio_admin::wizard::{FieldChange, InquiryWizard, WizardStep};

use common::walk_to_review;

#[test]
fn empty_name_blocks_the_first_step() {
    let store = MemoryStore::new();
    let mut wizard = InquiryWizard::new(&store);
    wizard.apply(FieldChange::Email("someone@example.com".to_string()));

    assert_matches!(wizard.next(), Err(WizardError::Validation(errors)) if errors.contains("name"));
    assert_eq!(wizard.step(), WizardStep::Personal);
}

#[test]
fn submitted_inquiry_is_stored_as_pending() {
    let store = MemoryStore::new();
    let mut wizard = InquiryWizard::new(&store);
    walk_to_review(&mut wizard, "Kiran");

    let id = wizard.submit().unwrap().id.clone();

    let stored: Vec<Inquiry> = store.read(keys::INQUIRIES).unwrap().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, id);
    assert_eq!(stored[0].status, InquiryStatus::Pending);
    assert!(stored[0].submitted_at <= Utc::now());
    assert_eq!(stored[0].estimated_value, "₹50,000 - ₹1,00,000");
}

#[test]
fn field_cleared_after_going_back_is_not_rechecked_on_submit() {
    let store = MemoryStore::new();
    let mut wizard = InquiryWizard::new(&store);
    walk_to_review(&mut wizard, "Kiran");

    wizard.previous().unwrap();
    wizard.previous().unwrap();
    wizard.previous().unwrap();
    assert_eq!(wizard.step(), WizardStep::Personal);
    wizard.apply(FieldChange::Name(String::new()));
    assert!(wizard.next().is_err());

    // Only forward navigation checks step 1; an edit made on the review step slips through.
    wizard.apply(FieldChange::Name("Kiran".to_string()));
    wizard.next().unwrap();
    wizard.next().unwrap();
    wizard.next().unwrap();
    wizard.apply(FieldChange::Name(String::new()));

    let inquiry = wizard.submit().unwrap();
    assert_eq!(inquiry.details.name, "");
    assert_eq!(inquiry.status, InquiryStatus::Pending);
}

#[test]
fn pending_filter_keeps_stored_order() {
    let store = MemoryStore::new();
    for name in ["Asha", "Ravi", "Meera"] {
        let mut wizard = InquiryWizard::new(&store);
        walk_to_review(&mut wizard, name);
        wizard.submit().unwrap();
    }

    let mut review = SubmissionsReview::open(&store).unwrap();
    let middle = review.inquiries()[1].id.clone();
    review.update_status(&middle, InquiryStatus::Reviewed).unwrap();

    let filter = SubmissionFilter {
        status: Some(InquiryStatus::Pending),
        ..SubmissionFilter::default()
    };
    let names: Vec<&str> = review
        .filter(&filter)
        .iter()
        .map(|i| i.details.name.as_str())
        .collect();
    assert_eq!(names, vec!["Asha", "Meera"]);

    let stats = review.stats();
    assert_eq!((stats.pending, stats.reviewed), (2, 1));
    assert_eq!(stats.total_value, 300_000);
}

#[test]
fn service_filter_matches_selected_tier() {
    let store = MemoryStore::new();
    let mut wizard = InquiryWizard::new(&store);
    wizard.apply(FieldChange::SelectedService(ServiceTier::DataAnalytics));
    walk_to_review(&mut wizard, "Dev");
    wizard.submit().unwrap();

    let review = SubmissionsReview::open(&store).unwrap();
    let filter = SubmissionFilter {
        service: Some(ServiceTier::Consultation),
        ..SubmissionFilter::default()
    };
    assert!(review.filter(&filter).is_empty());
}

const CUSTOM_BUDGET_RECORD: &str = r#"[{
    "id": "1718000000000",
    "name": "Priya",
    "email": "priya@example.com",
    "company": "",
    "phone": "",
    "projectTitle": "Clinic booking",
    "projectType": "",
    "projectDescription": "Appointments for a small clinic",
    "targetAudience": "",
    "keyFeatures": [],
    "technologies": [],
    "integrations": [],
    "platforms": [],
    "budgetType": "custom",
    "budgetRange": "",
    "customBudget": "₹3,00,000",
    "timeline": "",
    "deadline": "",
    "urgency": "normal",
    "additionalRequirements": "",
    "communicationPreference": "email",
    "referenceLinks": "",
    "attachments": "",
    "selectedService": "full-stack",
    "submittedAt": "2024-06-10T09:30:00.000Z",
    "status": "pending",
    "estimatedValue": "₹3,00,000"
}]"#;

#[test]
fn new_submission_keeps_records_with_blank_choices() {
    let store = MemoryStore::new();
    store.set_item(keys::INQUIRIES, CUSTOM_BUDGET_RECORD).unwrap();

    let review = SubmissionsReview::open(&store).unwrap();
    assert_eq!(review.inquiries().len(), 1);
    assert_eq!(review.stats().total_value, 0);

    let mut wizard = InquiryWizard::new(&store);
    walk_to_review(&mut wizard, "Kiran");
    wizard.submit().unwrap();

    let stored: Vec<Inquiry> = store.read(keys::INQUIRIES).unwrap().unwrap();
    let names: Vec<&str> = stored.iter().map(|i| i.details.name.as_str()).collect();
    assert_eq!(names, vec!["Priya", "Kiran"]);
    assert_eq!(stored[0].details.budget_range, None);
    assert_eq!(stored[0].estimated_value, "₹3,00,000");
}

#[test]
fn unreadable_inquiries_block_submit_instead_of_being_replaced() {
    let store = MemoryStore::new();
    let garbage = r#"[{"id": "1718000000000", "status": "archived"}]"#;
    store.set_item(keys::INQUIRIES, garbage).unwrap();

    let mut wizard = InquiryWizard::new(&store);
    walk_to_review(&mut wizard, "Kiran");

    assert_matches!(
        wizard.submit(),
        Err(WizardError::Store(StoreError::Unreadable { .. }))
    );
    assert_eq!(wizard.step(), WizardStep::ReviewSubmit);
    assert_eq!(store.get_item(keys::INQUIRIES).unwrap().as_deref(), Some(garbage));
}
