//! Detection-record schema definitions
//!
//! A [`DetectionRecord`] is the unit of output of a synthetic analysis run.
//! Classification fields are never set independently: `status` is always the
//! threshold function of `probability`, and `planet_type` /
//! `false_positive_type` are present exactly when the status requires them.
//!
//! Wire format is camelCase JSON with ISO-8601 timestamps, matching the
//! dashboard contract.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Lowercase a label and fold separator characters to spaces, so that
/// `"Gas Giant"`, `"gas-giant"` and `"gas_giant"` all parse alike.
fn normalize_label(s: &str) -> String {
    s.trim().to_ascii_lowercase().replace(['-', '_'], " ")
}

// ============================================================================
// 1. CLASSIFICATION - status, planet class, false-positive class
// ============================================================================

/// Three-way classification of a detection.
///
/// Always derived from `probability` by fixed thresholds; see
/// [`DetectionStatus::from_probability`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DetectionStatus {
    Exoplanet,
    Candidate,
    FalsePositive,
}

impl DetectionStatus {
    /// Classify a transit probability.
    ///
    /// `> 0.99` is an exoplanet, `[0.50, 0.99]` a candidate (both boundary
    /// values inclusive), anything below a false positive.
    pub fn from_probability(probability: f64) -> Self {
        if probability > 0.99 {
            DetectionStatus::Exoplanet
        } else if probability >= 0.50 {
            DetectionStatus::Candidate
        } else {
            DetectionStatus::FalsePositive
        }
    }

    /// The probability sub-range that maps onto this status,
    /// as an `(inclusive_low, inclusive_high)` pair.
    pub fn probability_range(&self) -> (f64, f64) {
        match self {
            DetectionStatus::Exoplanet => (0.99, 1.0),
            DetectionStatus::Candidate => (0.50, 0.99),
            DetectionStatus::FalsePositive => (0.0, 0.49),
        }
    }
}

impl fmt::Display for DetectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionStatus::Exoplanet => write!(f, "exoplanet"),
            DetectionStatus::Candidate => write!(f, "candidate"),
            DetectionStatus::FalsePositive => write!(f, "false-positive"),
        }
    }
}

impl FromStr for DetectionStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "exoplanet" => Ok(DetectionStatus::Exoplanet),
            "candidate" => Ok(DetectionStatus::Candidate),
            "false positive" => Ok(DetectionStatus::FalsePositive),
            _ => Err(DomainError::UnknownStatus(s.to_string())),
        }
    }
}

/// Planet size class, derived from planet radius in Earth radii.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanetType {
    Terrestrial,
    #[serde(rename = "Super Earth")]
    SuperEarth,
    #[serde(rename = "Neptune-Like")]
    NeptuneLike,
    #[serde(rename = "Gas Giant")]
    GasGiant,
}

impl PlanetType {
    /// Classify a planet radius (Earth radii) by fixed breakpoints.
    pub fn from_radius(radius: f64) -> Self {
        if radius < 1.5 {
            PlanetType::Terrestrial
        } else if radius < 2.5 {
            PlanetType::SuperEarth
        } else if radius < 6.0 {
            PlanetType::NeptuneLike
        } else {
            PlanetType::GasGiant
        }
    }

    /// Radius sampling interval `[low, high)` for this class, chosen so the
    /// class is a fixed point of [`PlanetType::from_radius`].
    pub fn radius_range(&self) -> (f64, f64) {
        match self {
            PlanetType::Terrestrial => (0.8, 1.5),
            PlanetType::SuperEarth => (1.5, 2.5),
            PlanetType::NeptuneLike => (2.5, 6.0),
            PlanetType::GasGiant => (6.0, 12.0),
        }
    }
}

impl fmt::Display for PlanetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanetType::Terrestrial => write!(f, "Terrestrial"),
            PlanetType::SuperEarth => write!(f, "Super Earth"),
            PlanetType::NeptuneLike => write!(f, "Neptune-Like"),
            PlanetType::GasGiant => write!(f, "Gas Giant"),
        }
    }
}

impl FromStr for PlanetType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "terrestrial" => Ok(PlanetType::Terrestrial),
            "super earth" => Ok(PlanetType::SuperEarth),
            "neptune like" => Ok(PlanetType::NeptuneLike),
            "gas giant" => Ok(PlanetType::GasGiant),
            _ => Err(DomainError::UnknownPlanetType(s.to_string())),
        }
    }
}

/// Vetting class assigned to false-positive detections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FalsePositiveType {
    #[serde(rename = "Eclipsing Binary")]
    EclipsingBinary,
    #[serde(rename = "Background Eclipsing Binary")]
    BackgroundEclipsingBinary,
    #[serde(rename = "Grazing Eclipsing Binary")]
    GrazingEclipsingBinary,
    #[serde(rename = "Instrumental Artifact")]
    InstrumentalArtifact,
    #[serde(rename = "Stellar Variability")]
    StellarVariability,
    Contamination,
}

impl FalsePositiveType {
    /// All classes, in catalog order. Used for uniform sampling.
    pub const ALL: [FalsePositiveType; 6] = [
        FalsePositiveType::EclipsingBinary,
        FalsePositiveType::BackgroundEclipsingBinary,
        FalsePositiveType::GrazingEclipsingBinary,
        FalsePositiveType::InstrumentalArtifact,
        FalsePositiveType::StellarVariability,
        FalsePositiveType::Contamination,
    ];
}

impl fmt::Display for FalsePositiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FalsePositiveType::EclipsingBinary => write!(f, "Eclipsing Binary"),
            FalsePositiveType::BackgroundEclipsingBinary => {
                write!(f, "Background Eclipsing Binary")
            }
            FalsePositiveType::GrazingEclipsingBinary => write!(f, "Grazing Eclipsing Binary"),
            FalsePositiveType::InstrumentalArtifact => write!(f, "Instrumental Artifact"),
            FalsePositiveType::StellarVariability => write!(f, "Stellar Variability"),
            FalsePositiveType::Contamination => write!(f, "Contamination"),
        }
    }
}

impl FromStr for FalsePositiveType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "eclipsing binary" => Ok(FalsePositiveType::EclipsingBinary),
            "background eclipsing binary" => Ok(FalsePositiveType::BackgroundEclipsingBinary),
            "grazing eclipsing binary" => Ok(FalsePositiveType::GrazingEclipsingBinary),
            "instrumental artifact" => Ok(FalsePositiveType::InstrumentalArtifact),
            "stellar variability" => Ok(FalsePositiveType::StellarVariability),
            "contamination" => Ok(FalsePositiveType::Contamination),
            _ => Err(DomainError::UnknownFalsePositiveType(s.to_string())),
        }
    }
}

// ============================================================================
// 2. MEASUREMENT COMPONENTS
// ============================================================================

/// Host-star parameters from the input catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StellarParameters {
    /// Effective temperature in Kelvin
    pub teff: f64,

    /// Surface gravity, log10(cm/s^2)
    pub logg: f64,

    /// Metallicity [Fe/H] in dex
    pub feh: f64,

    /// Stellar radius in solar radii
    pub radius: f64,

    /// Stellar mass in solar masses
    pub mass: f64,
}

/// Pass/warn outcome of a data-validation check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum QualityFlag {
    Pass,
    Warn,
}

impl fmt::Display for QualityFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityFlag::Pass => write!(f, "PASS"),
            QualityFlag::Warn => write!(f, "WARN"),
        }
    }
}

impl FromStr for QualityFlag {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "pass" => Ok(QualityFlag::Pass),
            "warn" => Ok(QualityFlag::Warn),
            _ => Err(DomainError::UnknownQualityFlag(s.to_string())),
        }
    }
}

/// Pipeline difference-vector quality score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifferenceVector {
    /// Quality score in [0, 1]
    pub value: f64,

    /// One-sigma uncertainty on the score
    pub uncertainty: f64,

    /// Validation outcome
    pub flag: QualityFlag,
}

/// Transit candidate event: the periodic dimming signature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitCandidateEvent {
    /// Orbital period in days
    pub period: f64,

    /// Transit duration in hours
    pub duration: f64,

    /// Fractional transit depth
    pub depth: f64,
}

/// One sample of the raw light curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightCurvePoint {
    pub time: f64,
    pub flux: f64,
}

/// One sample of a phase-folded curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhasePoint {
    pub phase: f64,
    pub flux: f64,
}

/// Classifier feature attribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub name: String,
    pub importance: f64,
}

// ============================================================================
// 3. DETECTION RECORD - the unit of output
// ============================================================================

/// Composite lookup key: one record per (target, observation window) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DetectionKey {
    pub target_id: String,
    pub sector: u32,
}

impl fmt::Display for DetectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (sector {})", self.target_id, self.sector)
    }
}

/// A complete synthetic analysis result for one target and sector.
///
/// Created exactly once per generator invocation and immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionRecord {
    /// Unique record ID
    pub id: Uuid,

    /// Canonical catalog identifier (mission-prefixed, e.g. "TIC 12345679")
    pub target_id: String,

    /// Observation sector/campaign index (>= 1)
    pub sector: u32,

    /// Transit probability in [0, 1]; drives `status`
    pub probability: f64,

    /// Classification; always `DetectionStatus::from_probability(probability)`
    pub status: DetectionStatus,

    /// Size class; present exactly when `status` is `Exoplanet`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub planet_type: Option<PlanetType>,

    /// Vetting class; present exactly when `status` is `FalsePositive`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub false_positive_type: Option<FalsePositiveType>,

    /// Planet radius in Earth radii
    pub planet_radius: f64,

    /// Apparent magnitude of the host star
    pub magnitude: f64,

    /// Right ascension in degrees, [0, 360)
    pub right_ascension: f64,

    /// Declination in degrees, [-90, 90]
    pub declination: f64,

    /// Host-star parameters
    pub stellar_parameters: StellarParameters,

    /// Gaia renormalized unit weight error (astrometric-fit quality)
    pub gaia_ruwe: f64,

    /// Pipeline difference-vector score
    pub spoc_dvr: DifferenceVector,

    /// Transit candidate event parameters
    pub tce: TransitCandidateEvent,

    /// Raw light curve samples
    pub light_curve: Vec<LightCurvePoint>,

    /// Phase-folded curve over the full orbit, phase in [-1, 1]
    pub phase_days: Vec<PhasePoint>,

    /// Phase-folded curve zoomed to the transit window, phase in hours
    pub phase_hours: Vec<PhasePoint>,

    /// Classifier feature attributions, sorted non-increasing by importance
    pub feature_importances: Vec<FeatureImportance>,

    /// When this analysis completed
    pub analyzed_at: DateTime<Utc>,
}

impl DetectionRecord {
    /// The composite accumulator key for this record.
    pub fn key(&self) -> DetectionKey {
        DetectionKey {
            target_id: self.target_id.clone(),
            sector: self.sector,
        }
    }

    /// Whether the classification fields obey the schema invariants:
    /// status matches the probability thresholds and the optional class
    /// fields are present exactly when the status requires them.
    pub fn classification_consistent(&self) -> bool {
        if self.status != DetectionStatus::from_probability(self.probability) {
            return false;
        }
        match self.status {
            DetectionStatus::Exoplanet => {
                self.planet_type.is_some() && self.false_positive_type.is_none()
            }
            DetectionStatus::Candidate => {
                self.planet_type.is_none() && self.false_positive_type.is_none()
            }
            DetectionStatus::FalsePositive => {
                self.planet_type.is_none() && self.false_positive_type.is_some()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_thresholds() {
        assert_eq!(
            DetectionStatus::from_probability(0.995),
            DetectionStatus::Exoplanet
        );
        assert_eq!(
            DetectionStatus::from_probability(0.75),
            DetectionStatus::Candidate
        );
        assert_eq!(
            DetectionStatus::from_probability(0.2),
            DetectionStatus::FalsePositive
        );
    }

    #[test]
    fn test_status_boundaries_are_candidate() {
        // The exoplanet threshold is strictly greater-than, and the
        // candidate floor is inclusive.
        assert_eq!(
            DetectionStatus::from_probability(0.99),
            DetectionStatus::Candidate
        );
        assert_eq!(
            DetectionStatus::from_probability(0.50),
            DetectionStatus::Candidate
        );
        assert_eq!(
            DetectionStatus::from_probability(0.4999),
            DetectionStatus::FalsePositive
        );
    }

    #[test]
    fn test_planet_type_breakpoints() {
        assert_eq!(PlanetType::from_radius(0.9), PlanetType::Terrestrial);
        assert_eq!(PlanetType::from_radius(1.5), PlanetType::SuperEarth);
        assert_eq!(PlanetType::from_radius(2.5), PlanetType::NeptuneLike);
        assert_eq!(PlanetType::from_radius(6.0), PlanetType::GasGiant);
        assert_eq!(PlanetType::from_radius(11.9), PlanetType::GasGiant);
    }

    #[test]
    fn test_radius_range_fixed_point() {
        // Sampling anywhere inside a class's radius range must classify
        // back to the same class.
        for planet_type in [
            PlanetType::Terrestrial,
            PlanetType::SuperEarth,
            PlanetType::NeptuneLike,
            PlanetType::GasGiant,
        ] {
            let (low, high) = planet_type.radius_range();
            assert_eq!(PlanetType::from_radius(low), planet_type);
            let mid = (low + high) / 2.0;
            assert_eq!(PlanetType::from_radius(mid), planet_type);
        }
    }

    #[test]
    fn test_status_labels_round_trip() {
        for status in [
            DetectionStatus::Exoplanet,
            DetectionStatus::Candidate,
            DetectionStatus::FalsePositive,
        ] {
            let parsed: DetectionStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert!("retrograde".parse::<DetectionStatus>().is_err());
    }

    #[test]
    fn test_planet_type_parses_label_variants() {
        assert_eq!(
            "Gas Giant".parse::<PlanetType>().unwrap(),
            PlanetType::GasGiant
        );
        assert_eq!(
            "gas-giant".parse::<PlanetType>().unwrap(),
            PlanetType::GasGiant
        );
        assert_eq!(
            "neptune_like".parse::<PlanetType>().unwrap(),
            PlanetType::NeptuneLike
        );
    }

    #[test]
    fn test_status_serde_labels() {
        let json = serde_json::to_string(&DetectionStatus::FalsePositive).unwrap();
        assert_eq!(json, "\"false-positive\"");

        let json = serde_json::to_string(&PlanetType::SuperEarth).unwrap();
        assert_eq!(json, "\"Super Earth\"");

        let json = serde_json::to_string(&QualityFlag::Pass).unwrap();
        assert_eq!(json, "\"PASS\"");
    }

    #[test]
    fn test_false_positive_type_all_covers_every_variant() {
        assert_eq!(FalsePositiveType::ALL.len(), 6);
        for fp_type in FalsePositiveType::ALL {
            let parsed: FalsePositiveType = fp_type.to_string().parse().unwrap();
            assert_eq!(parsed, fp_type);
        }
    }

    #[test]
    fn test_detection_key_display() {
        let key = DetectionKey {
            target_id: "TIC 12345679".to_string(),
            sector: 3,
        };
        assert_eq!(key.to_string(), "TIC 12345679 (sector 3)");
    }
}
