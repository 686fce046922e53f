use crate::models::GeoPoint;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points in kilometers (haversine)
pub fn distance_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let dlat = (to.latitude - from.latitude).to_radians();
    let dlng = (to.longitude - from.longitude).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + from.latitude.to_radians().cos()
            * to.latitude.to_radians().cos()
            * (dlng / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NAIROBI_CENTER;

    #[test]
    fn same_point_is_zero() {
        assert!(distance_km(NAIROBI_CENTER, NAIROBI_CENTER) < 1e-9);
    }

    #[test]
    fn nairobi_to_thika_is_about_forty_km() {
        let thika = GeoPoint::new(-1.0333, 37.0693);
        let distance = distance_km(NAIROBI_CENTER, thika);
        assert!(distance > 35.0 && distance < 45.0, "got {distance}");
    }

    #[test]
    fn nairobi_to_mombasa_is_far_outside() {
        let mombasa = GeoPoint::new(-4.0435, 39.6682);
        let distance = distance_km(NAIROBI_CENTER, mombasa);
        assert!(distance > 400.0 && distance < 500.0, "got {distance}");
    }

    #[test]
    fn symmetric() {
        let karen = GeoPoint::new(-1.3197, 36.7076);
        let a = distance_km(NAIROBI_CENTER, karen);
        let b = distance_km(karen, NAIROBI_CENTER);
        assert!((a - b).abs() < 1e-9);
    }
}
