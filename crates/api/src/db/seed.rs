//! Demo fixture for the cafe directory.
//!
//! Loaded by `cc-cli seed`, which wipes the `cafe` table first.

use cafeconnect_core::{GeoPoint, NewCafe};

#[allow(clippy::too_many_arguments)]
fn cafe(
    name: &str,
    address: &str,
    location: GeoPoint,
    colleges: &[&str],
    rating: f64,
    image: &str,
    phone: &str,
    open_hours: &str,
) -> NewCafe {
    NewCafe {
        name: name.to_string(),
        address: address.to_string(),
        location,
        nearby_colleges: colleges.iter().map(|c| (*c).to_string()).collect(),
        rating,
        image: Some(image.to_string()),
        phone: Some(phone.to_string()),
        open_hours: Some(open_hours.to_string()),
    }
}

/// The five sample cafes.
#[must_use]
pub fn sample_cafes() -> Vec<NewCafe> {
    vec![
        cafe(
            "Campus Brew",
            "123 University Ave, Boston, MA",
            GeoPoint::new(42.3601, -71.0589),
            &["Harvard University", "MIT", "Boston University"],
            4.5,
            "https://images.unsplash.com/photo-1554118811-1e0d58224f24?w=400",
            "(617) 555-0123",
            "6:00 AM - 10:00 PM",
        ),
        cafe(
            "Study Spot Cafe",
            "456 College St, Boston, MA",
            GeoPoint::new(42.3505, -71.1054),
            &["Harvard University", "Boston College"],
            4.2,
            "https://images.unsplash.com/photo-1501339847302-ac426a4a7cbb?w=400",
            "(617) 555-0124",
            "7:00 AM - 9:00 PM",
        ),
        cafe(
            "Tech Cafe",
            "789 Innovation Dr, Cambridge, MA",
            GeoPoint::new(42.3736, -71.1097),
            &["MIT", "Harvard University"],
            4.7,
            "https://images.unsplash.com/photo-1559925393-8be0ec4767c8?w=400",
            "(617) 555-0125",
            "6:30 AM - 11:00 PM",
        ),
        cafe(
            "Green Bean Coffee",
            "321 Stanford Ave, Palo Alto, CA",
            GeoPoint::new(37.4419, -122.1430),
            &["Stanford University", "Santa Clara University"],
            4.3,
            "https://images.unsplash.com/photo-1442512595331-e89e73853f31?w=400",
            "(650) 555-0126",
            "6:00 AM - 10:00 PM",
        ),
        cafe(
            "Westwood Grind",
            "654 Westwood Blvd, Los Angeles, CA",
            GeoPoint::new(34.0522, -118.2437),
            &["UCLA", "USC"],
            4.1,
            "https://images.unsplash.com/photo-1521017432531-fbd92d768814?w=400",
            "(310) 555-0127",
            "7:00 AM - 9:00 PM",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_shape() {
        let cafes = sample_cafes();
        assert_eq!(cafes.len(), 5);
        assert!(cafes.iter().all(|c| c.location.lat_in_range() && c.location.lng_in_range()));
        assert!(cafes.iter().all(|c| (0.0..=5.0).contains(&c.rating)));
    }
}
