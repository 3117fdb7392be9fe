use crate::types::dataset::LocationDataset;
use crate::types::station::{LatLon, StationSite, StationSpan};
use ordered_float::OrderedFloat;
use std::collections::BTreeMap;

/// First and last date each station reported in `dataset`, sorted by station id.
pub fn station_date_ranges(dataset: &LocationDataset) -> Vec<StationSpan> {
    let mut spans: BTreeMap<&str, StationSpan> = BTreeMap::new();
    // records are sorted by date, so the first sighting is the earliest
    for record in dataset.records() {
        spans
            .entry(record.station_id.as_str())
            .and_modify(|span| {
                span.last_date = record.date;
                span.record_count += 1;
            })
            .or_insert_with(|| StationSpan {
                station_id: record.station_id.clone(),
                name: dataset.station_name(&record.station_id).map(str::to_string),
                first_date: record.date,
                last_date: record.date,
                record_count: 1,
            });
    }
    spans.into_values().collect()
}

/// Sites within `radius_km` of `center`, nearest first, with their distance in km.
///
/// # Examples
///
/// ```
/// use climate_compare::{sites_within, LatLon, StationSite};
///
/// let sites = vec![
///     StationSite { station_id: "far".into(), name: None, location: LatLon(47.6, -122.3), elevation: None },
///     StationSite { station_id: "near".into(), name: None, location: LatLon(45.6, -122.6), elevation: None },
/// ];
/// let nearby = sites_within(&sites, LatLon(45.52, -122.68), 50.0);
/// assert_eq!(nearby.len(), 1);
/// assert_eq!(nearby[0].0.station_id, "near");
/// ```
pub fn sites_within(sites: &[StationSite], center: LatLon, radius_km: f64) -> Vec<(&StationSite, f64)> {
    let mut nearby: Vec<(&StationSite, f64)> = sites
        .iter()
        .map(|site| (site, site.location.distance_km(center)))
        .filter(|(_, distance)| *distance <= radius_km)
        .collect();
    nearby.sort_by_key(|(_, distance)| OrderedFloat(*distance));
    nearby
}
