//! Feature building.
//!
//! Turns a delivery request into the named features the model was trained
//! with. Numeric fields pass through as-is; categorical fields are recorded
//! as raw labels for the encoding stage.

use crate::geo;
use quoter_config::HubConfig;
use quoter_types::{DeliveryRequest, FeatureVector};

/// Builds the feature vector for a request.
///
/// Produces exactly the feature set the training pipeline used: distance
/// from the hub, the raw coordinates, the three categorical address fields,
/// and the order timing and size numerics.
pub fn build_features(request: &DeliveryRequest, hub: &HubConfig) -> FeatureVector {
	let distance_km = geo::haversine_km(
		hub.latitude,
		hub.longitude,
		request.latitude,
		request.longitude,
		hub.earth_radius_km,
	);

	let mut features = FeatureVector::new();
	features.set_numeric("distance_km", distance_km);
	features.set_numeric("latitude", request.latitude);
	features.set_numeric("longitude", request.longitude);
	features.set_label("municipality", &request.municipality);
	features.set_label("barangay", &request.barangay);
	features.set_label("postal_code", &request.postal_code);
	features.set_numeric("time_of_order", f64::from(request.time_of_order));
	features.set_numeric("day_of_week", f64::from(request.day_of_week));
	features.set_numeric("order_size", f64::from(request.order_size));
	features
}
