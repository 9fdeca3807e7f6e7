//! Room mapping with currency conversion
//!
//! Internal prices are kept in EUR, Google prices in USD.

use dms_models::{GoogleRoom, Room};
use tracing::trace;

use crate::Result;
use crate::currency::ExchangeRates;
use crate::google::{RoomMapper, parse_room_id, parse_room_type};

/// Currency of internal prices
pub const INTERNAL_CURRENCY: &str = "EUR";

/// Currency of Google prices
pub const GOOGLE_CURRENCY: &str = "USD";

/// Room mapper that converts prices and fills in absent descriptions.
#[derive(Debug, Clone, Default)]
pub struct CurrencyRoomMapper {
    rates: ExchangeRates,
}

impl CurrencyRoomMapper {
    pub fn new(rates: ExchangeRates) -> Self {
        Self { rates }
    }

    #[must_use]
    pub fn rates(&self) -> &ExchangeRates {
        &self.rates
    }
}

impl RoomMapper for CurrencyRoomMapper {
    fn name(&self) -> &str {
        "currency"
    }

    fn to_google_room(&self, room: &Room) -> GoogleRoom {
        let price = self
            .rates
            .convert(room.price_per_night, INTERNAL_CURRENCY, GOOGLE_CURRENCY);
        trace!(from = %room.price_per_night, to = %price, "Converted room price");

        GoogleRoom {
            room_id: room.room_id.to_string(),
            room_type: room.room_type.to_string(),
            price_per_night: price,
            capacity: room.capacity,
            is_available: room.is_available,
            description: Some(room.description.clone().unwrap_or_default()),
            amenities: room.amenities.clone(),
        }
    }

    fn to_internal_room(&self, room: &GoogleRoom) -> Result<Room> {
        let room_type = parse_room_type(&room.room_type)?;
        let price = self
            .rates
            .convert(room.price_per_night, GOOGLE_CURRENCY, INTERNAL_CURRENCY);
        trace!(from = %room.price_per_night, to = %price, "Converted room price");

        Ok(Room {
            id: 0,
            room_id: parse_room_id(&room.room_id),
            room_type,
            price_per_night: price,
            capacity: room.capacity,
            is_available: room.is_available,
            description: Some(room.description.clone().unwrap_or_default()),
            amenities: room.amenities.clone(),
        })
    }
}
