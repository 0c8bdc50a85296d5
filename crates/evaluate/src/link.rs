//! Link metadata and raw signal records.

use linkrain_series::{
    Coord, ValidationCollector, validate_length, validate_strictly_increasing,
};
use serde::Serialize;

use crate::error::EvaluateError;

/// Antenna polarization of a sub-link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarization {
    Vertical,
    Horizontal,
}

impl Polarization {
    /// Parse a free-text label. Anything containing a `v` (any case) is
    /// vertical, everything else horizontal.
    pub fn from_label(label: &str) -> Self {
        if label.chars().any(|c| c.eq_ignore_ascii_case(&'v')) {
            Polarization::Vertical
        } else {
            Polarization::Horizontal
        }
    }
}

/// Static description of one microwave sub-link.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkMetadata {
    pub cml_id: String,
    pub sublink_id: String,
    pub frequency_ghz: f64,
    pub polarization: Polarization,
    pub length_km: f64,
    pub site_0: Coord,
    pub site_1: Coord,
}

impl LinkMetadata {
    /// Midpoint of the two sites, used for the gauge search.
    pub fn center(&self) -> Coord {
        self.site_0.midpoint(&self.site_1)
    }

    /// `true` if either site lacks a coordinate.
    pub fn has_missing_coordinates(&self) -> bool {
        self.site_0.is_missing() || self.site_1.is_missing()
    }
}

/// One sub-link with its received and transmitted signal levels.
#[derive(Debug, Clone)]
pub struct LinkRecord {
    metadata: LinkMetadata,
    timestamps: Vec<i64>,
    rsl: Vec<f64>,
    tsl: Option<Vec<f64>>,
}

impl LinkRecord {
    /// Create a new link record.
    ///
    /// # Validation
    ///
    /// - `rsl` (and `tsl` when given) match `timestamps` in length
    /// - timestamps strictly increase
    ///
    /// All failures are reported together.
    pub fn new(
        metadata: LinkMetadata,
        timestamps: Vec<i64>,
        rsl: Vec<f64>,
        tsl: Option<Vec<f64>>,
    ) -> Result<Self, EvaluateError> {
        let mut errors = ValidationCollector::new();
        errors.extend(validate_length("rsl", rsl.len(), timestamps.len()));
        if let Some(tsl) = &tsl {
            errors.extend(validate_length("tsl", tsl.len(), timestamps.len()));
        }
        errors.extend(validate_strictly_increasing(&timestamps));
        errors.finish()?;

        Ok(Self {
            metadata,
            timestamps,
            rsl,
            tsl,
        })
    }

    pub fn metadata(&self) -> &LinkMetadata {
        &self.metadata
    }

    pub fn timestamps(&self) -> &[i64] {
        &self.timestamps
    }

    /// Received signal level in dBm.
    pub fn rsl(&self) -> &[f64] {
        &self.rsl
    }

    /// Transmitted signal level in dBm, if recorded.
    pub fn tsl(&self) -> Option<&[f64]> {
        self.tsl.as_deref()
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// `true` when no RSL sample is present.
    pub fn has_no_signal(&self) -> bool {
        self.rsl.iter().all(|v| v.is_nan())
    }

    /// Total path attenuation `tsl - rsl` in dB.
    ///
    /// A link without TSL is treated as transmitting at 0 dBm.
    pub fn attenuation(&self) -> Vec<f64> {
        match &self.tsl {
            Some(tsl) => tsl.iter().zip(&self.rsl).map(|(t, r)| t - r).collect(),
            None => self.rsl.iter().map(|r| -r).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn meta() -> LinkMetadata {
        LinkMetadata {
            cml_id: "10".to_string(),
            sublink_id: "channel_1".to_string(),
            frequency_ghz: 18.0,
            polarization: Polarization::Vertical,
            length_km: 2.0,
            site_0: Coord::new(13.0, 52.0),
            site_1: Coord::new(13.02, 52.0),
        }
    }

    #[test]
    fn polarization_labels() {
        assert_eq!(Polarization::from_label("Vertical"), Polarization::Vertical);
        assert_eq!(Polarization::from_label("V"), Polarization::Vertical);
        assert_eq!(Polarization::from_label("h"), Polarization::Horizontal);
        assert_eq!(Polarization::from_label("Horizontal"), Polarization::Horizontal);
    }

    #[test]
    fn center_is_midpoint() {
        let c = meta().center();
        assert_relative_eq!(c.lon, 13.01, epsilon = 1e-12);
        assert_relative_eq!(c.lat, 52.0, epsilon = 1e-12);
    }

    #[test]
    fn missing_coordinates_detected() {
        let mut m = meta();
        assert!(!m.has_missing_coordinates());
        m.site_1 = Coord::new(f64::NAN, 52.0);
        assert!(m.has_missing_coordinates());
    }

    #[test]
    fn attenuation_with_and_without_tsl() {
        let link = LinkRecord::new(meta(), vec![0, 60], vec![-40.0, -45.0], Some(vec![10.0, 10.0]))
            .unwrap();
        assert_eq!(link.attenuation(), vec![50.0, 55.0]);

        let link = LinkRecord::new(meta(), vec![0, 60], vec![-40.0, f64::NAN], None).unwrap();
        let att = link.attenuation();
        assert_eq!(att[0], 40.0);
        assert!(att[1].is_nan());
    }

    #[test]
    fn all_missing_rsl_has_no_signal() {
        let link = LinkRecord::new(meta(), vec![0, 60], vec![f64::NAN, f64::NAN], None).unwrap();
        assert!(link.has_no_signal());
    }

    #[test]
    fn validation_collects_every_problem() {
        let err = LinkRecord::new(meta(), vec![0, 0, 60], vec![1.0], Some(vec![1.0, 2.0]))
            .unwrap_err();
        match err {
            EvaluateError::Validation { count, details } => {
                assert_eq!(count, 3);
                assert!(details.contains("rsl length 1 != timestamps length 3"));
                assert!(details.contains("tsl length 2 != timestamps length 3"));
                assert!(details.contains("duplicate timestamp 0 at index 1"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
