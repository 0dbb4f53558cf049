use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient;
use crate::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Room type as embedded in an availability record. Fields with an
/// unexpected type are left empty and their raw value kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct RoomType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_price: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One unit/date bookability fact reported by the backend, decoded with the
/// same leniency as [`RoomType`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct AvailabilityRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_type_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_type: Option<RoomType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<Map<String, Value>> for RoomType {
    fn from(mut map: Map<String, Value>) -> Self {
        Self {
            id: lenient::take_i64(&mut map, "id"),
            name: lenient::take_string(&mut map, "name"),
            description: lenient::take_string(&mut map, "description"),
            image_url: lenient::take_string(&mut map, "image_url"),
            base_price: lenient::take_f64(&mut map, "base_price"),
            extra: map,
        }
    }
}

impl From<Map<String, Value>> for AvailabilityRecord {
    fn from(mut map: Map<String, Value>) -> Self {
        Self {
            date: lenient::take_date(&mut map, "date"),
            room_number: lenient::take_string(&mut map, "room_number"),
            room_type_id: lenient::take_i64(&mut map, "room_type_id"),
            room_type: lenient::take_object(&mut map, "room_type").map(RoomType::from),
            is_available: lenient::take_bool(&mut map, "is_available"),
            extra: map,
        }
    }
}

/// Date range sent to the availability search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityQuery {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl RoomType {
    pub fn new(id: i64, name: impl Into<String>, base_price: f64) -> Self {
        Self {
            id: Some(id),
            name: Some(name.into()),
            base_price: Some(base_price),
            ..Default::default()
        }
    }
}

impl AvailabilityRecord {
    pub fn for_room_type(room_type: RoomType) -> Self {
        Self {
            room_type_id: room_type.id,
            room_type: Some(room_type),
            ..Default::default()
        }
    }

    /// `room_type.id` when present, else `room_type_id`.
    pub fn room_type_key(&self) -> Option<i64> {
        self.room_type
            .as_ref()
            .and_then(|rt| rt.id)
            .or(self.room_type_id)
    }
}

impl AvailabilityQuery {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Self {
        Self {
            check_in,
            check_out,
        }
    }

    /// Parse `YYYY-MM-DD` strings as produced by a date input.
    pub fn parse(check_in: &str, check_out: &str) -> Result<Self, Error> {
        Ok(Self::new(parse_date(check_in)?, parse_date(check_out)?))
    }

    pub fn to_query_pairs(&self) -> [(&'static str, String); 2] {
        [
            ("checkin", self.check_in.format(DATE_FORMAT).to_string()),
            ("checkout", self.check_out.format(DATE_FORMAT).to_string()),
        ]
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| Error::InvalidSearch(format!("{s:?} is not a YYYY-MM-DD date")))
}
