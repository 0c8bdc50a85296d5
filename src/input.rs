//! JSON batch input: gauges and links, `null` marking a missing sample.

use anyhow::{Context, Result};
use serde::Deserialize;

use linkrain_evaluate::{LinkMetadata, LinkRecord, Polarization};
use linkrain_gauge::{GaugeNetwork, GaugeSensor};
use linkrain_series::{Coord, PointSeries};

#[derive(Debug, Deserialize)]
pub struct BatchInput {
    #[serde(default)]
    pub gauges: Vec<GaugeInput>,
    pub links: Vec<LinkInput>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SiteInput {
    pub lon: Option<f64>,
    pub lat: Option<f64>,
}

impl SiteInput {
    fn to_coord(self) -> Coord {
        Coord::new(
            self.lon.unwrap_or(f64::NAN),
            self.lat.unwrap_or(f64::NAN),
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct GaugeInput {
    pub id: String,
    pub lon: Option<f64>,
    pub lat: Option<f64>,
    pub timestamps: Vec<i64>,
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
pub struct LinkInput {
    pub cml_id: String,
    pub sublink_id: String,
    pub frequency_mhz: f64,
    pub polarization: String,
    pub length_m: f64,
    pub site_0: SiteInput,
    pub site_1: SiteInput,
    pub timestamps: Vec<i64>,
    pub rsl: Vec<Option<f64>>,
    #[serde(default)]
    pub tsl: Option<Vec<Option<f64>>>,
}

fn fill_missing(values: Vec<Option<f64>>) -> Vec<f64> {
    values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect()
}

/// Parse a batch from JSON text.
pub fn parse_batch(json: &str) -> Result<BatchInput> {
    serde_json::from_str(json).context("failed to parse batch JSON")
}

/// Builds the gauge network, dropping gauges without a valid value.
pub fn build_network(gauges: Vec<GaugeInput>) -> Result<GaugeNetwork> {
    let sensors = gauges
        .into_iter()
        .map(|g| -> Result<GaugeSensor> {
            let location = SiteInput {
                lon: g.lon,
                lat: g.lat,
            }
            .to_coord();
            let series = PointSeries::from_options(g.timestamps, g.values)
                .with_context(|| format!("invalid gauge '{}'", g.id))?;
            Ok(GaugeSensor::new(g.id, location, series))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(GaugeNetwork::new(sensors))
}

/// Builds link records, converting MHz to GHz and metres to kilometres.
pub fn build_links(links: Vec<LinkInput>) -> Result<Vec<LinkRecord>> {
    links
        .into_iter()
        .map(|l| {
            let metadata = LinkMetadata {
                cml_id: l.cml_id,
                sublink_id: l.sublink_id,
                frequency_ghz: l.frequency_mhz / 1000.0,
                polarization: Polarization::from_label(&l.polarization),
                length_km: l.length_m / 1000.0,
                site_0: l.site_0.to_coord(),
                site_1: l.site_1.to_coord(),
            };
            let label = format!("{}/{}", metadata.cml_id, metadata.sublink_id);
            LinkRecord::new(
                metadata,
                l.timestamps,
                fill_missing(l.rsl),
                l.tsl.map(fill_missing),
            )
            .with_context(|| format!("invalid link '{label}'"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const BATCH: &str = r#"{
        "gauges": [
            {"id": "g1", "lon": 13.01, "lat": 52.0, "timestamps": [0, 300], "values": [0.0, null]},
            {"id": "dead", "lon": 13.0, "lat": 52.0, "timestamps": [0], "values": [null]}
        ],
        "links": [
            {
                "cml_id": "10", "sublink_id": "channel_1",
                "frequency_mhz": 18000.0, "polarization": "Vertical", "length_m": 1400.0,
                "site_0": {"lon": 13.0, "lat": 52.0}, "site_1": {"lon": null, "lat": 52.0},
                "timestamps": [0, 60], "rsl": [-40.0, null]
            }
        ]
    }"#;

    #[test]
    fn parses_and_converts_units() {
        let batch = parse_batch(BATCH).unwrap();
        let links = build_links(batch.links).unwrap();
        let meta = links[0].metadata();
        assert_relative_eq!(meta.frequency_ghz, 18.0);
        assert_relative_eq!(meta.length_km, 1.4);
        assert_eq!(meta.polarization, Polarization::Vertical);
        assert!(meta.has_missing_coordinates());
        assert!(links[0].rsl()[1].is_nan());
        assert!(links[0].tsl().is_none());
    }

    #[test]
    fn network_drops_dead_gauges() {
        let batch = parse_batch(BATCH).unwrap();
        let network = build_network(batch.gauges).unwrap();
        assert_eq!(network.len(), 1);
        assert_eq!(network.n_dropped(), 1);
    }

    #[test]
    fn invalid_link_names_the_link() {
        let batch = parse_batch(
            r#"{"links": [{
                "cml_id": "7", "sublink_id": "a", "frequency_mhz": 1.0,
                "polarization": "h", "length_m": 1.0,
                "site_0": {"lon": 0.0, "lat": 0.0}, "site_1": {"lon": 0.0, "lat": 0.0},
                "timestamps": [0, 60], "rsl": [1.0]
            }]}"#,
        )
        .unwrap();
        let err = build_links(batch.links).unwrap_err();
        assert!(format!("{err:#}").contains("invalid link '7/a'"));
    }
}
