#![deny(rust_2018_idioms)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

//! # dms-models
//!
//! The reservation shapes exchanged between the internal system and Google.
//!
//! These are plain data carriers; conversions between them live in mapping
//! profiles, never here.

/// Google-facing reservation and room shapes.
pub mod google;
/// Internal reservation, room, and room type.
pub mod internal;

pub use google::{GoogleReservation, GoogleRoom};
pub use internal::{ParseRoomTypeError, Reservation, Room, RoomType};
