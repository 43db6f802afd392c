//! Great-circle distance calculation.

/// Haversine distance between two coordinates, in kilometers.
///
/// Coordinates are decimal degrees. Non-finite inputs propagate through the
/// arithmetic; range checking is not this function's concern.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64, radius_km: f64) -> f64 {
	let (lat1, lon1, lat2, lon2) = (
		lat1.to_radians(),
		lon1.to_radians(),
		lat2.to_radians(),
		lon2.to_radians(),
	);

	let dlat = lat2 - lat1;
	let dlon = lon2 - lon1;
	let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
	let c = 2.0 * a.sqrt().asin();
	c * radius_km
}
