mod common;

use pretty_assertions::assert_eq;

use portfolio_admin::catalog::ProjectCatalog;
use portfolio_admin::models::Project;
use portfolio_admin::store::{keys, MemoryStore, Storage, StorageExt};

use common::{sample_form, temp_store};

#[test]
fn created_project_is_listed_after_reload() {
    let store = MemoryStore::new();
    let mut catalog = ProjectCatalog::open(&store).unwrap();
    let seeded: Vec<String> = catalog.projects().iter().map(|p| p.id.clone()).collect();

    let id = catalog.create(sample_form("Weather App")).unwrap().id.clone();

    assert!(!seeded.contains(&id));
    let reloaded = ProjectCatalog::open(&store).unwrap();
    let project = reloaded.find(&id).expect("created project is stored");
    assert_eq!(project.title, "Weather App");
    assert!((1..=50).contains(&project.views));
}

#[test]
fn deleted_project_stays_gone() {
    let store = MemoryStore::new();
    let mut catalog = ProjectCatalog::open(&store).unwrap();
    let id = catalog.projects()[0].id.clone();

    assert!(catalog.delete(&id).unwrap());

    let reloaded = ProjectCatalog::open(&store).unwrap();
    assert!(reloaded.find(&id).is_none());
    assert_eq!(reloaded.projects().len(), 2);
}

#[test]
fn deleting_an_unknown_id_changes_nothing() {
    let store = MemoryStore::new();
    let mut catalog = ProjectCatalog::open(&store).unwrap();
    let before = store.get_item(keys::PROJECTS).unwrap();

    assert!(!catalog.delete("no-such-project").unwrap());

    assert_eq!(store.get_item(keys::PROJECTS).unwrap(), before);
}

#[test]
fn two_views_add_two() {
    let store = MemoryStore::new();
    let mut project = ProjectCatalog::open(&store).unwrap().projects()[0].clone();
    project.views = 5;
    store.write(keys::PROJECTS, &vec![project.clone()]).unwrap();

    let mut catalog = ProjectCatalog::open(&store).unwrap();
    catalog.record_view(&project.id).unwrap();
    assert_eq!(catalog.record_view(&project.id).unwrap(), 7);

    let stored: Vec<Project> = store.read(keys::PROJECTS).unwrap().unwrap();
    assert_eq!(stored[0].views, 7);
}

#[test]
fn loading_twice_leaves_the_store_untouched() {
    let (_dir, store) = temp_store();
    ProjectCatalog::open(&store).unwrap();
    let first = std::fs::read(store.path()).unwrap();

    ProjectCatalog::open(&store).unwrap();
    let second = std::fs::read(store.path()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn file_store_survives_a_new_handle() {
    let (dir, store) = temp_store();
    let id = ProjectCatalog::open(&store)
        .unwrap()
        .create(sample_form("Recipe Finder"))
        .unwrap()
        .id
        .clone();
    drop(store);

    let reopened = portfolio_admin::store::JsonFileStore::new(dir.path().join("portfolio-data.json"));
    let catalog = ProjectCatalog::open(&reopened).unwrap();
    assert_eq!(catalog.find(&id).map(|p| p.title.as_str()), Some("Recipe Finder"));
}
