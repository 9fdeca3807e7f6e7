//! # dms-profiles
//!
//! Mapping profiles that teach a map handler how to convert reservations
//! between the internal model and partner formats.
//!
//! [`GoogleMappingProfile`] registers both directions between
//! [`dms_models::Reservation`] and [`dms_models::GoogleReservation`]. The
//! per-room field mapping is delegated to a [`RoomMapper`], which is the
//! override point: [`StandardRoomMapper`] copies fields as-is, while
//! [`CurrencyRoomMapper`] also converts prices between the two sides' currencies.

#![deny(rust_2018_idioms)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod currency;
pub mod enhanced;
pub mod google;

pub use currency::ExchangeRates;
pub use enhanced::CurrencyRoomMapper;
pub use google::{
    GOOGLE_RESERVATION_ALIAS, GoogleMappingProfile, MODEL_RESERVATION_ALIAS, RoomMapper,
    StandardRoomMapper,
};

use thiserror::Error;

/// Errors raised inside profile conversions
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    RoomType(#[from] dms_models::ParseRoomTypeError),
}

pub type Result<T> = std::result::Result<T, Error>;
