//! Cafe directory records.

use serde::{Deserialize, Serialize};

use super::geo::{GeoPoint, GeoPointRequest};
use super::id::CafeId;
use super::validation::{ValidationError, optional_text, required_text};

/// Rating assigned to a cafe when the create request omits one.
pub const DEFAULT_RATING: f64 = 4.0;

/// Upper bound of the rating scale.
pub const MAX_RATING: f64 = 5.0;

/// A cafe or canteen near one or more colleges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cafe {
    pub id: CafeId,
    pub name: String,
    pub address: String,
    pub location: GeoPoint,
    /// Colleges this cafe is listed under. Order carries no meaning and
    /// duplicates are kept as given.
    pub nearby_colleges: Vec<String>,
    pub rating: f64,
    pub image: Option<String>,
    pub phone: Option<String>,
    pub open_hours: Option<String>,
}

impl Cafe {
    /// Attach an ID to a validated new cafe.
    #[must_use]
    pub fn from_new(id: CafeId, new: NewCafe) -> Self {
        Self {
            id,
            name: new.name,
            address: new.address,
            location: new.location,
            nearby_colleges: new.nearby_colleges,
            rating: new.rating,
            image: new.image,
            phone: new.phone,
            open_hours: new.open_hours,
        }
    }

    /// Whether any nearby college contains `query`, ignoring case.
    ///
    /// This is a plain substring test: "harvard" matches "Harvard University"
    /// and "vard Uni" does too. An empty query matches every cafe that lists
    /// at least one college; callers are expected to skip blank queries.
    #[must_use]
    pub fn serves_college(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.nearby_colleges
            .iter()
            .any(|college| college.to_lowercase().contains(&needle))
    }
}

/// A validated cafe ready to be stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCafe {
    pub name: String,
    pub address: String,
    pub location: GeoPoint,
    pub nearby_colleges: Vec<String>,
    pub rating: f64,
    pub image: Option<String>,
    pub phone: Option<String>,
    pub open_hours: Option<String>,
}

/// Create-cafe request body as received on the wire.
///
/// Every field is optional here so that a missing required field is reported
/// through [`ValidationError`] instead of a generic deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCafeRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub location: Option<GeoPointRequest>,
    pub nearby_colleges: Option<Vec<String>>,
    pub rating: Option<f64>,
    pub image: Option<String>,
    pub phone: Option<String>,
    pub open_hours: Option<String>,
}

impl NewCafeRequest {
    /// Check required fields and value ranges.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming every field that is missing, blank,
    /// or out of range.
    pub fn validate(self) -> Result<NewCafe, ValidationError> {
        let mut errors = ValidationError::new();

        let name = required_text(&mut errors, "name", self.name);
        let address = required_text(&mut errors, "address", self.address);

        let location = match self.location {
            None => {
                errors.missing("location");
                GeoPoint::new(0.0, 0.0)
            }
            Some(GeoPointRequest { lat, lng }) => {
                if lat.is_none() {
                    errors.missing("location.lat");
                }
                if lng.is_none() {
                    errors.missing("location.lng");
                }
                let point = GeoPoint::new(lat.unwrap_or_default(), lng.unwrap_or_default());
                if lat.is_some() && !point.lat_in_range() {
                    errors.push("location.lat", "must be between -90 and 90");
                }
                if lng.is_some() && !point.lng_in_range() {
                    errors.push("location.lng", "must be between -180 and 180");
                }
                point
            }
        };

        let rating = match self.rating {
            None => DEFAULT_RATING,
            Some(r) if r.is_finite() && (0.0..=MAX_RATING).contains(&r) => r,
            Some(_) => {
                errors.push("rating", "must be between 0 and 5");
                DEFAULT_RATING
            }
        };

        let nearby_colleges = self.nearby_colleges.unwrap_or_default();

        errors.finish(|| NewCafe {
            name,
            address,
            location,
            nearby_colleges,
            rating,
            image: optional_text(self.image),
            phone: optional_text(self.phone),
            open_hours: optional_text(self.open_hours),
        })
    }
}
