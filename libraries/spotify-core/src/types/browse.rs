/// Browse types
use super::common::Image;
use serde::{Deserialize, Serialize};

/// Category used to tag items in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub href: String,
    #[serde(default)]
    pub icons: Vec<Image>,
}

/// Country codes where the service is available
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markets {
    pub markets: Vec<String>,
}
