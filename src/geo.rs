//! Geodesic distance on the WGS-84 ellipsoid (Vincenty inverse formula).

use crate::db::models::GeoPoint;

const SEMI_MAJOR: f64 = 6_378_137.0;
const SEMI_MINOR: f64 = 6_356_752.314_245;
const FLATTENING: f64 = 1.0 / 298.257_223_563;
const MAX_ITERATIONS: usize = 100;
const CONVERGENCE: f64 = 1e-12;

/// Distance in whole metres between two points.
pub fn distance_m(from: GeoPoint, to: GeoPoint) -> u64 {
    vincenty(from, to)
        .unwrap_or_else(|| haversine(from, to))
        .round() as u64
}

/// Distance in kilometres with metre resolution (e.g. `1.234`).
pub fn distance_km(from: GeoPoint, to: GeoPoint) -> f64 {
    distance_m(from, to) as f64 / 1000.0
}

fn vincenty(from: GeoPoint, to: GeoPoint) -> Option<f64> {
    let l = (to.longitude - from.longitude).to_radians();
    let u1 = ((1.0 - FLATTENING) * from.latitude.to_radians().tan()).atan();
    let u2 = ((1.0 - FLATTENING) * to.latitude.to_radians().tan()).atan();
    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();

    let mut lambda = l;
    for _ in 0..MAX_ITERATIONS {
        let (sin_lambda, cos_lambda) = lambda.sin_cos();
        let sin_sigma = ((cos_u2 * sin_lambda).powi(2)
            + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
        .sqrt();
        if sin_sigma == 0.0 {
            // coincident points
            return Some(0.0);
        }
        let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        let sigma = sin_sigma.atan2(cos_sigma);
        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
        // equatorial line
        let cos_2sigma_m = if cos_sq_alpha == 0.0 {
            0.0
        } else {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        };
        let c = FLATTENING / 16.0 * cos_sq_alpha * (4.0 + FLATTENING * (4.0 - 3.0 * cos_sq_alpha));
        let previous = lambda;
        lambda = l
            + (1.0 - c)
                * FLATTENING
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))));

        if (lambda - previous).abs() < CONVERGENCE {
            let u_sq = cos_sq_alpha * (SEMI_MAJOR.powi(2) - SEMI_MINOR.powi(2)) / SEMI_MINOR.powi(2);
            let a = 1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
            let b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
            let delta_sigma = b
                * sin_sigma
                * (cos_2sigma_m
                    + b / 4.0
                        * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))
                            - b / 6.0
                                * cos_2sigma_m
                                * (-3.0 + 4.0 * sin_sigma.powi(2))
                                * (-3.0 + 4.0 * cos_2sigma_m.powi(2))));
            return Some(SEMI_MINOR * a * (sigma - delta_sigma));
        }
    }

    // near-antipodal points never converge
    None
}

fn haversine(from: GeoPoint, to: GeoPoint) -> f64 {
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + from.latitude.to_radians().cos() * to.latitude.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * SEMI_MAJOR * a.sqrt().asin()
}
