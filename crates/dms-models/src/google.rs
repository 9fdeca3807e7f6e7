//! Google reservation model

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A room in Google's format; identifiers and room types are free text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleRoom {
    pub room_id: String,
    pub room_type: String,
    pub price_per_night: Decimal,
    pub capacity: i32,
    pub is_available: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
}

/// A reservation in Google's format
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleReservation {
    pub external_id: String,
    pub guest_full_name: String,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    #[serde(default)]
    pub room_details: Option<GoogleRoom>,
}
