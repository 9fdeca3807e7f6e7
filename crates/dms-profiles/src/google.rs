//! Google reservation profile

use std::sync::Arc;

use dms_core::{AliasResolver, ConversionRegistry, MappingProfile};
use dms_models::{GoogleReservation, GoogleRoom, Reservation, Room, RoomType};
use uuid::Uuid;

use crate::{Error, Result};

/// Alias of the internal reservation model
pub const MODEL_RESERVATION_ALIAS: &str = "Model.Reservation";

/// Alias of the Google reservation model
pub const GOOGLE_RESERVATION_ALIAS: &str = "Google.Reservation";

/// Field mapping for rooms, the part of a reservation that integrations customise.
///
/// An absent room never reaches the mapper; the profile keeps it absent.
pub trait RoomMapper: Send + Sync + 'static {
    /// Mapper name, used in logs
    fn name(&self) -> &str;

    /// Convert an internal room to Google's format.
    fn to_google_room(&self, room: &Room) -> GoogleRoom;

    /// Convert a Google room to the internal format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RoomType`] when the room type text is not a known [`RoomType`].
    fn to_internal_room(&self, room: &GoogleRoom) -> Result<Room>;
}

/// Copies room fields across unchanged.
///
/// A room id that is not a UUID becomes the nil UUID; an unknown room type is an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRoomMapper;

impl RoomMapper for StandardRoomMapper {
    fn name(&self) -> &str {
        "standard"
    }

    fn to_google_room(&self, room: &Room) -> GoogleRoom {
        GoogleRoom {
            room_id: room.room_id.to_string(),
            room_type: room.room_type.to_string(),
            price_per_night: room.price_per_night,
            capacity: room.capacity,
            is_available: room.is_available,
            description: room.description.clone(),
            amenities: room.amenities.clone(),
        }
    }

    fn to_internal_room(&self, room: &GoogleRoom) -> Result<Room> {
        Ok(Room {
            id: 0,
            room_id: parse_room_id(&room.room_id),
            room_type: parse_room_type(&room.room_type)?,
            price_per_night: room.price_per_night,
            capacity: room.capacity,
            is_available: room.is_available,
            description: room.description.clone(),
            amenities: room.amenities.clone(),
        })
    }
}

pub(crate) fn parse_room_id(text: &str) -> Uuid {
    Uuid::parse_str(text.trim()).unwrap_or_else(|_| Uuid::nil())
}

pub(crate) fn parse_room_type(text: &str) -> Result<RoomType> {
    text.parse::<RoomType>().map_err(Error::from)
}

/// Registers `Model.Reservation` ⇄ `Google.Reservation`.
#[derive(Debug, Clone, Default)]
pub struct GoogleMappingProfile<M = StandardRoomMapper> {
    rooms: Arc<M>,
}

impl GoogleMappingProfile<StandardRoomMapper> {
    /// Profile with the standard room mapping
    #[must_use]
    pub fn new() -> Self {
        Self::with_room_mapper(StandardRoomMapper)
    }
}

impl<M: RoomMapper> GoogleMappingProfile<M> {
    /// Profile with a custom room mapping
    pub fn with_room_mapper(rooms: M) -> Self {
        Self {
            rooms: Arc::new(rooms),
        }
    }

    /// Room mapper in use
    pub fn room_mapper(&self) -> &M {
        &self.rooms
    }

    /// Convert an internal reservation to Google's format.
    pub fn to_google(&self, source: &Reservation) -> GoogleReservation {
        to_google(self.rooms.as_ref(), source)
    }

    /// Convert a Google reservation to the internal format.
    ///
    /// A non-numeric external id maps to id `0`.
    ///
    /// # Errors
    ///
    /// Returns an error if the room details cannot be mapped.
    pub fn to_internal(&self, source: &GoogleReservation) -> Result<Reservation> {
        from_google(self.rooms.as_ref(), source)
    }
}

fn to_google<M: RoomMapper + ?Sized>(rooms: &M, source: &Reservation) -> GoogleReservation {
    GoogleReservation {
        external_id: source.id.to_string(),
        guest_full_name: source.guest_name.clone(),
        start_date: source.check_in_date,
        end_date: source.check_out_date,
        room_details: source.room.as_ref().map(|room| rooms.to_google_room(room)),
    }
}

fn from_google<M: RoomMapper + ?Sized>(
    rooms: &M,
    source: &GoogleReservation,
) -> Result<Reservation> {
    Ok(Reservation {
        id: source.external_id.trim().parse().unwrap_or(0),
        guest_name: source.guest_full_name.clone(),
        check_in_date: source.start_date,
        check_out_date: source.end_date,
        room: source
            .room_details
            .as_ref()
            .map(|room| rooms.to_internal_room(room))
            .transpose()?,
    })
}

impl<M: RoomMapper> MappingProfile for GoogleMappingProfile<M> {
    fn name(&self) -> &str {
        "google"
    }

    fn configure_type_aliases(&self, resolver: &AliasResolver) -> dms_core::Result<()> {
        resolver.register::<Reservation>(MODEL_RESERVATION_ALIAS)?;
        resolver.register::<GoogleReservation>(GOOGLE_RESERVATION_ALIAS)
    }

    fn configure_mappings(&self, registry: &ConversionRegistry) -> dms_core::Result<()> {
        tracing::debug!(rooms = self.rooms.name(), "Registering Google reservation mappings");

        let outbound = Arc::clone(&self.rooms);
        let inbound = Arc::clone(&self.rooms);
        registry
            .register_fn(move |source: &Reservation| to_google(outbound.as_ref(), source))
            .register(move |source: &GoogleReservation| from_google(inbound.as_ref(), source));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn google_room(room_type: &str) -> GoogleRoom {
        GoogleRoom {
            room_id: "c56a4180-65aa-42ec-a945-5fd21dec0538".to_string(),
            room_type: room_type.to_string(),
            capacity: 2,
            ..GoogleRoom::default()
        }
    }

    #[test]
    fn test_standard_mapper_parses_room() {
        let room = StandardRoomMapper
            .to_internal_room(&google_room("Queen"))
            .unwrap();
        assert_eq!(room.room_type, RoomType::Queen);
        assert_eq!(
            room.room_id.to_string(),
            "c56a4180-65aa-42ec-a945-5fd21dec0538"
        );
    }

    #[test]
    fn test_standard_mapper_rejects_unknown_room_type() {
        let err = StandardRoomMapper
            .to_internal_room(&google_room("Penthouse"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid room type: Penthouse");
    }

    #[test]
    fn test_invalid_room_id_becomes_nil() {
        assert_eq!(parse_room_id("invalid-guid"), Uuid::nil());
    }

    #[test]
    fn test_non_numeric_external_id_maps_to_zero() {
        let profile = GoogleMappingProfile::new();
        let reservation = profile
            .to_internal(&GoogleReservation {
                external_id: "G-42".to_string(),
                ..GoogleReservation::default()
            })
            .unwrap();
        assert_eq!(reservation.id, 0);
        assert!(reservation.room.is_none());
    }

    #[test]
    fn test_padded_identifiers_are_trimmed() {
        let room_id = Uuid::new_v4();
        let profile = GoogleMappingProfile::new();
        let reservation = profile
            .to_internal(&GoogleReservation {
                external_id: " 2002 ".to_string(),
                room_details: Some(GoogleRoom {
                    room_id: format!("  {room_id}\n"),
                    room_type: "Suite".to_string(),
                    ..GoogleRoom::default()
                }),
                ..GoogleReservation::default()
            })
            .unwrap();
        assert_eq!(reservation.id, 2002);
        assert_eq!(reservation.room.unwrap().room_id, room_id);
    }
}
