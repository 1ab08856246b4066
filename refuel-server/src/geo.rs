//! Great-circle distance and radius bounding boxes

/// Mean Earth radius in km (IUGG)
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

/// Haversine distance in km between two (longitude, latitude) points
pub fn haversine_km(lng1: f64, lat1: f64, lng2: f64, lat2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lng2 - lng1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().min(1.0).asin();
    EARTH_RADIUS_KM * c
}

/// Degree box enclosing every point within a radius of a center.
/// Used only as an index prefilter; exact distance is checked afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    /// Box around (`lng`, `lat`) for `radius_km`. Boxes that would cross the
    /// antimeridian or reach a pole span the full longitude range.
    pub fn around(lng: f64, lat: f64, radius_km: f64) -> Self {
        let angular = radius_km / EARTH_RADIUS_KM;
        let d_lat = angular.to_degrees();
        let min_lat = lat - d_lat;
        let max_lat = lat + d_lat;

        if min_lat <= -90.0 || max_lat >= 90.0 {
            return Self {
                min_lat: min_lat.max(-90.0),
                max_lat: max_lat.min(90.0),
                min_lng: -180.0,
                max_lng: 180.0,
            };
        }

        let ratio = angular.sin() / lat.to_radians().cos();
        if !ratio.is_finite() || ratio >= 1.0 {
            return Self {
                min_lat,
                max_lat,
                min_lng: -180.0,
                max_lng: 180.0,
            };
        }

        let d_lng = ratio.asin().to_degrees();
        let (min_lng, max_lng) = (lng - d_lng, lng + d_lng);
        if min_lng < -180.0 || max_lng > 180.0 {
            return Self {
                min_lat,
                max_lat,
                min_lng: -180.0,
                max_lng: 180.0,
            };
        }

        Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        }
    }

    pub fn contains(&self, lng: f64, lat: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&lat) && (self.min_lng..=self.max_lng).contains(&lng)
    }
}
