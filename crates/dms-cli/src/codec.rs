//! JSON codecs keyed by type alias
//!
//! The `map` command reads and writes JSON, so every alias it accepts needs a
//! way to turn JSON into a value of the alias's type and back.

use std::any::Any;
use std::collections::HashMap;

use dms_core::Mappable;
use dms_models::{GoogleReservation, Reservation};
use dms_profiles::{GOOGLE_RESERVATION_ALIAS, MODEL_RESERVATION_ALIAS};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("No JSON codec for alias '{0}'")]
    UnknownAlias(String),

    #[error("Value of type '{actual}' cannot be encoded as '{alias}'")]
    WrongType { alias: String, actual: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

type DecodeFn = fn(Value) -> serde_json::Result<Box<dyn Mappable>>;
type EncodeFn = fn(&dyn Mappable) -> Option<serde_json::Result<Value>>;

#[derive(Clone, Copy)]
struct JsonCodec {
    decode: DecodeFn,
    encode: EncodeFn,
}

#[derive(Default)]
pub struct JsonCodecs {
    codecs: HashMap<String, JsonCodec>,
}

impl JsonCodecs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Codecs for the reservation aliases
    pub fn reservations() -> Self {
        let mut codecs = Self::new();
        codecs.register::<Reservation>(MODEL_RESERVATION_ALIAS);
        codecs.register::<GoogleReservation>(GOOGLE_RESERVATION_ALIAS);
        codecs
    }

    pub fn register<T>(&mut self, alias: &str) -> &mut Self
    where
        T: Serialize + DeserializeOwned + Any + Send + Sync,
    {
        self.codecs.insert(
            alias.to_string(),
            JsonCodec {
                decode: decode_as::<T>,
                encode: encode_as::<T>,
            },
        );
        self
    }

    pub fn decode(&self, alias: &str, value: Value) -> Result<Box<dyn Mappable>, CodecError> {
        let codec = self.codec(alias)?;
        Ok((codec.decode)(value)?)
    }

    pub fn encode(&self, alias: &str, value: &dyn Mappable) -> Result<Value, CodecError> {
        let codec = self.codec(alias)?;
        match (codec.encode)(value) {
            Some(encoded) => Ok(encoded?),
            None => Err(CodecError::WrongType {
                alias: alias.to_string(),
                actual: value.type_key().name().to_string(),
            }),
        }
    }

    fn codec(&self, alias: &str) -> Result<JsonCodec, CodecError> {
        self.codecs
            .get(alias)
            .copied()
            .ok_or_else(|| CodecError::UnknownAlias(alias.to_string()))
    }
}

fn decode_as<T>(value: Value) -> serde_json::Result<Box<dyn Mappable>>
where
    T: DeserializeOwned + Any + Send + Sync,
{
    let decoded: T = serde_json::from_value(value)?;
    Ok(Box::new(decoded))
}

fn encode_as<T>(value: &dyn Mappable) -> Option<serde_json::Result<Value>>
where
    T: Serialize + Any,
{
    value
        .as_any()
        .downcast_ref::<T>()
        .map(serde_json::to_value)
}
