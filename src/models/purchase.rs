use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: String,
    pub plan: String,
    pub amount: String,
    pub date: String,
    pub timestamp: i64,
}
