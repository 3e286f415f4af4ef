//! City dataset enrichment: state via reverse geocoding, plus the nearest
//! Indian sea coast and its geodesic distance.

pub mod coasts;
pub mod enrich;
pub mod geocode;
pub mod nearest;

pub use {
    coasts::{SEA_COASTS, SeaCoast},
    enrich::{EnrichError, EnrichReport, enrich_cities},
    geocode::{GoogleGeocoder, ReverseGeocoder, SkipGeocoding},
    nearest::{NearestCoast, nearest_in, nearest_sea_coast},
};
