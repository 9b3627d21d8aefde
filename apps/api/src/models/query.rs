use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error("query text cannot be empty")]
    EmptyText,

    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// A geographic point captured once per session by the client's geolocation.
///
/// Only constructible through [`Coordinate::new`], so every value in the
/// system is in range and finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = QueryError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.latitude, raw.longitude)
    }
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, QueryError> {
        // NaN fails both range checks
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(QueryError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(QueryError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Why the client could not produce a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationError {
    PermissionDenied,
    Unsupported,
}

impl LocationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            LocationError::PermissionDenied => {
                "Location access deny ho gaya. Kripya browser settings mein location allow karein."
            }
            LocationError::Unsupported => "Aapka browser location support nahi karta.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    Guidance,
    LocalReference,
}

/// One user submission. Never mutated; the `id` tags the outstanding request
/// so a late result can be matched against the latest submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    id: Uuid,
    text: String,
    kind: QueryKind,
    coordinate: Option<Coordinate>,
}

impl Query {
    pub fn guidance(text: &str) -> Result<Self, QueryError> {
        Ok(Self {
            id: Uuid::new_v4(),
            text: non_empty(text)?,
            kind: QueryKind::Guidance,
            coordinate: None,
        })
    }

    /// The coordinate is optional here: a missing one is reported by the
    /// resolver as `LocationUnavailable` rather than rejected up front.
    pub fn local_reference(text: &str, coordinate: Option<Coordinate>) -> Result<Self, QueryError> {
        Ok(Self {
            id: Uuid::new_v4(),
            text: non_empty(text)?,
            kind: QueryKind::LocalReference,
            coordinate,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> QueryKind {
        self.kind
    }

    pub fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate
    }
}

/// Rejects blank text but keeps the text exactly as submitted.
fn non_empty(text: &str) -> Result<String, QueryError> {
    if text.trim().is_empty() {
        return Err(QueryError::EmptyText);
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_accepts_bounds() {
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(28.6139, 77.2090).is_ok());
    }

    #[test]
    fn test_coordinate_rejects_out_of_range() {
        assert_eq!(
            Coordinate::new(90.5, 0.0),
            Err(QueryError::LatitudeOutOfRange(90.5))
        );
        assert_eq!(
            Coordinate::new(0.0, -181.0),
            Err(QueryError::LongitudeOutOfRange(-181.0))
        );
    }

    #[test]
    fn test_coordinate_rejects_nan() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::NAN).is_err());
    }

    #[test]
    fn test_coordinate_deserialization_validates() {
        let ok: Coordinate =
            serde_json::from_str(r#"{"latitude": 28.6139, "longitude": 77.209}"#).unwrap();
        assert_eq!(ok.latitude(), 28.6139);

        let bad = serde_json::from_str::<Coordinate>(r#"{"latitude": 123.0, "longitude": 0.0}"#);
        assert!(bad.is_err(), "out-of-range latitude must not deserialize");
    }

    #[test]
    fn test_query_rejects_blank_text() {
        assert_eq!(Query::guidance("   "), Err(QueryError::EmptyText));
        assert_eq!(
            Query::local_reference("", None),
            Err(QueryError::EmptyText)
        );
    }

    #[test]
    fn test_query_keeps_text_as_submitted() {
        let query = Query::guidance("  Bijli bill zyada aa raha hai\n").unwrap();
        assert_eq!(query.text(), "  Bijli bill zyada aa raha hai\n");
    }

    #[test]
    fn test_query_ids_are_unique_per_submission() {
        let a = Query::guidance("Aadhaar update kaise kare").unwrap();
        let b = Query::guidance("Aadhaar update kaise kare").unwrap();
        assert_ne!(a.id(), b.id());
        assert_eq!(a.kind(), QueryKind::Guidance);
        assert!(a.coordinate().is_none());
    }

    #[test]
    fn test_location_error_wire_names() {
        let denied: LocationError = serde_json::from_str(r#""permission_denied""#).unwrap();
        assert_eq!(denied, LocationError::PermissionDenied);
        assert!(LocationError::Unsupported.user_message().contains("support nahi"));
    }
}
