//! Demonstration walk-through
//!
//! Maps a sample reservation to Google's format and back, then feeds the
//! handler a Google reservation with an invalid room type and reports the
//! resulting error.

use std::error::Error as _;
use std::io::{self, Write};

use anyhow::bail;
use chrono::{Duration, NaiveDate, NaiveDateTime, Utc};
use dms_core::MapHandler;
use dms_models::{GoogleReservation, GoogleRoom, Reservation, Room, RoomType};
use dms_profiles::{GOOGLE_RESERVATION_ALIAS, MODEL_RESERVATION_ALIAS};
use rust_decimal::Decimal;
use uuid::Uuid;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn run(handler: &MapHandler, out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(out, "Dynamic Mapping System Demo")?;
    writeln!(out, "===========================")?;

    let reservation = sample_reservation();

    section(out, "[1] Mapping Internal Reservation => Google Reservation")?;
    print_reservation(out, &reservation)?;

    let google: GoogleReservation =
        handler.map_into(&reservation, MODEL_RESERVATION_ALIAS, GOOGLE_RESERVATION_ALIAS)?;
    section(out, "[2] Mapped Google Reservation:")?;
    print_google_reservation(out, &google)?;

    let round_trip: Reservation =
        handler.map_into(&google, GOOGLE_RESERVATION_ALIAS, MODEL_RESERVATION_ALIAS)?;
    section(out, "[3] Round-trip Mapped Internal Reservation:")?;
    print_reservation(out, &round_trip)?;

    section(out, "[4] Error Handling Demonstration")?;
    writeln!(out, "Attempting mapping with invalid data...")?;
    let invalid = invalid_google_reservation(Utc::now().naive_utc());
    match handler.map(Some(&invalid), GOOGLE_RESERVATION_ALIAS, MODEL_RESERVATION_ALIAS) {
        Ok(_) => bail!("invalid reservation was mapped without error"),
        Err(err) => {
            writeln!(out, "Error caught: {:?}", err.kind())?;
            writeln!(out, "Message: {err}")?;
            if let Some(cause) = err.source() {
                writeln!(out, "Details: {cause}")?;
            }
        }
    }

    writeln!(out)?;
    writeln!(out, "Demo complete.")?;
    Ok(())
}

pub fn sample_reservation() -> Reservation {
    Reservation {
        id: 1001,
        guest_name: "John Doe".to_string(),
        check_in_date: midnight(2023, 10, 15),
        check_out_date: midnight(2023, 10, 20),
        room: Some(Room {
            id: 1,
            room_id: Uuid::new_v4(),
            room_type: RoomType::Suite,
            price_per_night: Decimal::new(24999, 2),
            capacity: 4,
            is_available: true,
            description: Some("Luxury suite with ocean view".to_string()),
            amenities: ["WiFi", "Mini-bar", "Jacuzzi", "Balcony"]
                .into_iter()
                .map(String::from)
                .collect(),
        }),
    }
}

fn invalid_google_reservation(now: NaiveDateTime) -> GoogleReservation {
    GoogleReservation {
        external_id: "3003".to_string(),
        guest_full_name: "Invalid Room".to_string(),
        start_date: now,
        end_date: now + Duration::days(3),
        room_details: Some(GoogleRoom {
            room_id: "invalid-guid".to_string(),
            room_type: "InvalidType".to_string(),
            price_per_night: Decimal::new(100, 0),
            capacity: 1,
            is_available: true,
            description: None,
            amenities: Vec::new(),
        }),
    }
}

fn midnight(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

fn section(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "-".repeat(title.chars().count()))
}

fn print_reservation(out: &mut impl Write, reservation: &Reservation) -> io::Result<()> {
    writeln!(out, "ID: {}", reservation.id)?;
    writeln!(out, "Guest: {}", reservation.guest_name)?;
    writeln!(out, "Check-in: {}", reservation.check_in_date.format(DATE_FORMAT))?;
    writeln!(out, "Check-out: {}", reservation.check_out_date.format(DATE_FORMAT))?;

    let Some(room) = &reservation.room else {
        return writeln!(out, "No room details");
    };
    writeln!(out, "Room ID: {}", room.room_id)?;
    writeln!(out, "Type: {}", room.room_type)?;
    print_room_common(
        out,
        room.price_per_night,
        room.capacity,
        room.is_available,
        room.description.as_deref(),
        &room.amenities,
    )
}

fn print_google_reservation(out: &mut impl Write, reservation: &GoogleReservation) -> io::Result<()> {
    writeln!(out, "External ID: {}", reservation.external_id)?;
    writeln!(out, "Guest: {}", reservation.guest_full_name)?;
    writeln!(
        out,
        "Dates: {} to {}",
        reservation.start_date.format(DATE_FORMAT),
        reservation.end_date.format(DATE_FORMAT)
    )?;

    let Some(room) = &reservation.room_details else {
        return writeln!(out, "No room details");
    };
    writeln!(out, "Room ID: {}", room.room_id)?;
    writeln!(out, "Type: {}", room.room_type)?;
    print_room_common(
        out,
        room.price_per_night,
        room.capacity,
        room.is_available,
        room.description.as_deref(),
        &room.amenities,
    )
}

fn print_room_common(
    out: &mut impl Write,
    price: Decimal,
    capacity: i32,
    is_available: bool,
    description: Option<&str>,
    amenities: &[String],
) -> io::Result<()> {
    writeln!(out, "Price: {}", price.round_dp(2))?;
    writeln!(out, "Capacity: {capacity}")?;
    writeln!(out, "Available: {is_available}")?;
    writeln!(out, "Description: {}", description.unwrap_or_default())?;
    writeln!(out, "Amenities: {}", amenities.join(", "))
}
