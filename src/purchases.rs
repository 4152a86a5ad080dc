//! Source-code packages offered on the project detail page.

use chrono::{Local, Utc};

use crate::analytics::day_label;
use crate::error::StoreError;
use crate::models::Purchase;
use crate::store::{Storage, StorageExt, keys};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Package {
    pub id: &'static str,
    pub name: &'static str,
    pub price: &'static str,
    pub original_price: &'static str,
    pub savings: &'static str,
    pub description: &'static str,
    pub recommended: bool,
}

pub const PACKAGES: [Package; 3] = [
    Package {
        id: "basic",
        name: "Basic Package",
        price: "₹4,999",
        original_price: "₹7,999",
        savings: "38% OFF",
        description: "Perfect for small projects and startups",
        recommended: false,
    },
    Package {
        id: "pro",
        name: "Professional Package",
        price: "₹9,999",
        original_price: "₹15,999",
        savings: "37% OFF",
        description: "Most popular choice for businesses",
        recommended: true,
    },
    Package {
        id: "enterprise",
        name: "Enterprise Package",
        price: "₹19,999",
        original_price: "₹29,999",
        savings: "33% OFF",
        description: "Complete solution for large organizations",
        recommended: false,
    },
];

pub fn find_package(id: &str) -> Option<&'static Package> {
    PACKAGES.iter().find(|p| p.id == id)
}

pub fn recommended_package() -> &'static Package {
    PACKAGES.iter().find(|p| p.recommended).unwrap_or(&PACKAGES[0])
}

/// Append a purchase of `package` to the stored list.
pub fn record_purchase<S: Storage>(store: &S, package: &Package) -> Result<Purchase, StoreError> {
    let mut purchases: Vec<Purchase> =
        store.read_for_update(keys::PURCHASES)?.unwrap_or_default();
    let timestamp = Utc::now().timestamp_millis();

    let purchase = Purchase {
        id: timestamp.to_string(),
        plan: package.name.to_string(),
        amount: package.price.to_string(),
        date: day_label(Local::now().date_naive()),
        timestamp,
    };
    purchases.push(purchase.clone());
    store.write(keys::PURCHASES, &purchases)?;
    tracing::info!(plan = package.id, "package purchased");

    Ok(purchase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn pro_is_the_recommended_package() {
        assert_eq!(recommended_package().id, "pro");
        assert_eq!(find_package("enterprise").map(|p| p.price), Some("₹19,999"));
        assert!(find_package("platinum").is_none());
    }

    #[test]
    fn purchases_accumulate() {
        let store = MemoryStore::new();
        record_purchase(&store, &PACKAGES[0]).unwrap();
        let second = record_purchase(&store, &PACKAGES[2]).unwrap();

        let stored: Vec<Purchase> = store.read(keys::PURCHASES).unwrap().unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[1], second);
        assert_eq!(second.plan, "Enterprise Package");
        assert_eq!(second.amount, "₹19,999");
    }

    #[test]
    fn unreadable_purchase_list_is_left_alone() {
        let store = MemoryStore::new();
        store.set_item(keys::PURCHASES, "[{\"plan\":").unwrap();

        assert!(matches!(
            record_purchase(&store, &PACKAGES[1]),
            Err(StoreError::Unreadable { .. })
        ));
        assert_eq!(
            store.get_item(keys::PURCHASES).unwrap().as_deref(),
            Some("[{\"plan\":")
        );
    }
}
