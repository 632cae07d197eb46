use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: i64,
    pub salon_id: i64,
    pub customer_name: String,
    pub customer_email: String,
    pub rating: u8,
    pub title: Option<String>,
    pub comment: Option<String>,
    pub is_verified: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ReviewSummary {
    pub average_rating: f64,
    pub total_reviews: i64,
}

impl ReviewSummary {
    /// Average rounded to one decimal, `0.0` when there are no reviews.
    pub fn from_totals(rating_sum: i64, total_reviews: i64) -> Self {
        let average_rating = if total_reviews == 0 {
            0.0
        } else {
            (rating_sum as f64 / total_reviews as f64 * 10.0).round() / 10.0
        };
        Self {
            average_rating,
            total_reviews,
        }
    }
}
