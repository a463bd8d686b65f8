use serde::{Deserialize, Serialize};

/// Client block printed on every quote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientInfo {
    pub name: String,
    pub address: String,
    pub city: String,
    pub email: String,
    pub phone: String,
    pub vat_id: String,
    pub fiscal_code: String,
}
