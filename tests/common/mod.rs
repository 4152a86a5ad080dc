#![allow(dead_code)]

use chrono::NaiveDate;
use tempfile::TempDir;

use portfolio_admin::catalog::ProjectForm;
use portfolio_admin::models::{BudgetRange, ProjectType, Timeline};
use portfolio_admin::store::{JsonFileStore, Storage};
use portfolio_admin::wizard::{FieldChange, InquiryWizard};

/// A file-backed store inside a fresh temporary directory.
///
/// Keep the `TempDir` alive for as long as the store is used.
pub fn temp_store() -> (TempDir, JsonFileStore) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let store = JsonFileStore::new(dir.path().join("portfolio-data.json"));
    (dir, store)
}

pub fn sample_form(title: &str) -> ProjectForm {
    ProjectForm {
        title: title.to_string(),
        description: format!("{} description", title),
        technologies: vec!["Rust".to_string()],
        github_url: "https://github.com/example/repo".to_string(),
        live_url: "https://example.com".to_string(),
        ..ProjectForm::default()
    }
}

/// Fill every required field and walk the wizard to the review step.
pub fn walk_to_review<S: Storage>(wizard: &mut InquiryWizard<S>, name: &str) {
    wizard.apply(FieldChange::Name(name.to_string()));
    wizard.apply(FieldChange::Email(format!("{}@example.com", name.to_lowercase())));
    wizard.next().expect("personal step complete");

    wizard.apply(FieldChange::ProjectTitle(format!("{}'s site", name)));
    wizard.apply(FieldChange::ProjectType(Some(ProjectType::BusinessWebsite)));
    wizard.apply(FieldChange::ProjectDescription("Company website".to_string()));
    wizard.next().expect("project step complete");

    wizard.apply(FieldChange::BudgetRange(Some(BudgetRange::FiftyThousandToOneLakh)));
    wizard.apply(FieldChange::Timeline(Some(Timeline::ThreeToFourWeeks)));
    wizard.apply(FieldChange::Deadline(NaiveDate::from_ymd_opt(2031, 6, 30)));
    wizard.next().expect("budget step complete");
}
