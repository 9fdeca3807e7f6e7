//! Internal reservation model

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Kind of room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RoomType {
    #[default]
    Single,
    Double,
    Suite,
    King,
    Queen,
    Family,
}

impl RoomType {
    /// Every room type, in declaration order
    pub const ALL: [RoomType; 6] = [
        RoomType::Single,
        RoomType::Double,
        RoomType::Suite,
        RoomType::King,
        RoomType::Queen,
        RoomType::Family,
    ];

    /// Name as written on the wire
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Single => "Single",
            RoomType::Double => "Double",
            RoomType::Suite => "Suite",
            RoomType::King => "King",
            RoomType::Queen => "Queen",
            RoomType::Family => "Family",
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text that does not name a [`RoomType`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid room type: {value}")]
pub struct ParseRoomTypeError {
    pub value: String,
}

impl FromStr for RoomType {
    type Err = ParseRoomTypeError;

    /// Exact, case-sensitive match on the variant name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoomType::ALL
            .into_iter()
            .find(|room_type| room_type.as_str() == s)
            .ok_or_else(|| ParseRoomTypeError {
                value: s.to_string(),
            })
    }
}

/// A room as the internal system stores it
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    /// Storage key; not exchanged with partners
    #[serde(default)]
    pub id: i64,
    pub room_id: Uuid,
    pub room_type: RoomType,
    pub price_per_night: Decimal,
    pub capacity: i32,
    pub is_available: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
}

/// A reservation as the internal system stores it
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: i32,
    pub guest_name: String,
    pub check_in_date: NaiveDateTime,
    pub check_out_date: NaiveDateTime,
    #[serde(default)]
    pub room: Option<Room>,
}

impl Reservation {
    /// Number of nights between check-in and check-out
    #[must_use]
    pub fn nights(&self) -> i64 {
        (self.check_out_date.date() - self.check_in_date.date()).num_days()
    }
}
