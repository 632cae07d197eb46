use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Salon {
    pub id: i64,
    pub name: String,
    #[serde(flatten)]
    pub details: SalonDetails,
    pub status: SalonStatus,
    pub created_at: NaiveDateTime,
}

/// Contact and address fields. Every field is optional so the same struct
/// doubles as a partial update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SalonDetails {
    pub city: Option<String>,
    pub region: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub street: Option<String>,
    pub door: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SalonStatus {
    Active,
    Inactive,
}

impl SalonStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SalonStatus::Active => "active",
            SalonStatus::Inactive => "inactive",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "active" => SalonStatus::Active,
            _ => SalonStatus::Inactive,
        }
    }
}

/// Filters for the public directory listing.
#[derive(Debug, Clone, Default)]
pub struct SalonSearch {
    pub city: Option<String>,
    pub region: Option<String>,
    pub name: Option<String>,
    pub page: u32,
    pub per_page: u32,
}

impl SalonSearch {
    pub fn offset(&self) -> i64 {
        page_offset(self.page, self.per_page)
    }
}

/// Rows to skip for a 1-based `page`. Widened to `i64` so any `u32` page
/// number is representable.
pub fn page_offset(page: u32, per_page: u32) -> i64 {
    i64::from(page.saturating_sub(1)) * i64::from(per_page)
}

pub fn page_count(total: i64, per_page: u32) -> i64 {
    if per_page == 0 {
        return 0;
    }
    (total + per_page as i64 - 1) / per_page as i64
}
