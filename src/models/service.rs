use serde::{Deserialize, Serialize};

/// Catalog entry shared by every salon.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    /// Premium "BIO Diamond" tier.
    pub is_bio_diamond: bool,
}

/// A catalog service as offered by one salon, with its own price and duration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalonService {
    pub id: i64,
    pub salon_id: i64,
    pub service_id: i64,
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub is_bio_diamond: bool,
    pub price: f64,
    pub duration_minutes: u32,
}
