mod common;

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;

use portfolio_admin::analytics::AnalyticsDashboard;
use portfolio_admin::auth::{SessionGate, DEFAULT_PASSWORD};
use portfolio_admin::catalog::ProjectCatalog;
use portfolio_admin::error::AuthError;
use portfolio_admin::models::Purchase;
use portfolio_admin::purchases::{find_package, record_purchase};
use portfolio_admin::store::{keys, JsonFileStore, MemoryStore, StorageExt};

use common::temp_store;

#[test]
fn wrong_password_is_rejected_and_default_is_accepted() {
    let store = MemoryStore::new();
    let gate = SessionGate::new(&store);

    assert_matches!(gate.login("wrong"), Err(AuthError::InvalidPassword));
    assert!(!gate.is_authenticated().unwrap());

    gate.login(DEFAULT_PASSWORD).unwrap();
    assert!(gate.is_authenticated().unwrap());
}

#[test]
fn session_and_password_persist_in_the_data_file() {
    let (dir, store) = temp_store();
    let gate = SessionGate::new(&store);
    gate.login("admin123").unwrap();
    gate.change_password("admin123", "s3cret!!", "s3cret!!").unwrap();

    let reopened = JsonFileStore::new(dir.path().join("portfolio-data.json"));
    let gate = SessionGate::new(&reopened);
    assert!(gate.is_authenticated().unwrap());

    gate.logout().unwrap();
    assert_matches!(gate.login("admin123"), Err(AuthError::InvalidPassword));
    gate.login("s3cret!!").unwrap();
}

#[test]
fn purchases_are_appended() {
    let store = MemoryStore::new();
    let basic = find_package("basic").unwrap();
    let pro = find_package("pro").unwrap();

    record_purchase(&store, basic).unwrap();
    record_purchase(&store, pro).unwrap();

    let stored: Vec<Purchase> = store.read(keys::PURCHASES).unwrap().unwrap();
    let plans: Vec<&str> = stored.iter().map(|p| p.plan.as_str()).collect();
    assert_eq!(plans, vec!["Basic Package", "Professional Package"]);
    assert_eq!(stored[1].amount, "₹9,999");
}

#[test]
fn analytics_history_is_generated_once() {
    let store = MemoryStore::new();
    let first = AnalyticsDashboard::open(&store).unwrap().metrics().to_vec();
    let second = AnalyticsDashboard::open(&store).unwrap().metrics().to_vec();

    assert_eq!(first.len(), 31);
    assert_eq!(first, second);

    let catalog = ProjectCatalog::open(&store).unwrap();
    let summary = AnalyticsDashboard::open(&store)
        .unwrap()
        .summary(catalog.projects());
    assert_eq!(summary.total_views, 105);
    assert_eq!(summary.views_today, first[30].views);
}
