//! Adapter for the earlier detection-record revision
//!
//! The first dashboard revision shipped a single `foldedPhase` series,
//! Spanish planet-type labels, a free-form DVR flag string and duplicated
//! top-level period/depth fields. [`upgrade_legacy`] migrates such records
//! onto the canonical schema so downstream consumers only ever see one
//! shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::target_seed;
use crate::error::{DomainError, Result};
use crate::schema::{
    DetectionRecord, DetectionStatus, DifferenceVector, FalsePositiveType, FeatureImportance,
    LightCurvePoint, PhasePoint, PlanetType, StellarParameters, TransitCandidateEvent,
};

/// Planet-type labels used by the first revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegacyPlanetType {
    #[serde(rename = "Terrestre")]
    Terrestre,
    #[serde(rename = "Super Tierra")]
    SuperTierra,
    #[serde(rename = "Tipo Neptuno")]
    TipoNeptuno,
    #[serde(rename = "Gigante Gaseoso")]
    GiganteGaseoso,
}

impl From<LegacyPlanetType> for PlanetType {
    fn from(legacy: LegacyPlanetType) -> Self {
        match legacy {
            LegacyPlanetType::Terrestre => PlanetType::Terrestrial,
            LegacyPlanetType::SuperTierra => PlanetType::SuperEarth,
            LegacyPlanetType::TipoNeptuno => PlanetType::NeptuneLike,
            LegacyPlanetType::GiganteGaseoso => PlanetType::GasGiant,
        }
    }
}

/// DVR block of the first revision: flag is an unvalidated string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyDifferenceVector {
    pub dvr: f64,
    pub dvr_uncertainty: f64,
    pub dvr_flag: String,
}

/// A detection record as serialized by the first dashboard revision.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyDetectionRecord {
    pub tic_id: String,
    pub sector: u32,
    pub probability: f64,
    pub period: f64,
    pub transit_depth: f64,
    pub radius: f64,
    pub magnitude: f64,
    pub ra: f64,
    pub dec: f64,
    pub status: DetectionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planet_type: Option<LegacyPlanetType>,
    pub stellar_parameters: StellarParameters,
    pub gaia_ruwe: f64,
    pub spoc_dvr: LegacyDifferenceVector,
    pub tce: TransitCandidateEvent,
    pub light_curve: Vec<LightCurvePoint>,
    pub folded_phase: Vec<PhasePoint>,
    pub features: Vec<FeatureImportance>,
    pub analyzed_at: DateTime<Utc>,
}

/// Half-width in hours of the transit-centered phase window.
const PHASE_HOURS_HALF_WINDOW: f64 = 5.0;

/// Migrate a first-revision record onto the canonical schema.
///
/// Rules:
/// - `status` is re-derived from `probability`, so the migrated record
///   satisfies the threshold invariant even if the source did not.
/// - Spanish planet-type labels map onto their canonical classes; the
///   class is kept only when the derived status is `Exoplanet`.
/// - False positives get a stable vetting class derived from the record
///   key (the first revision recorded none).
/// - `foldedPhase` becomes `phaseDays`; `phaseHours` is the same curve
///   with the phase axis rescaled onto the +/-5 h transit window.
/// - Unknown DVR flag strings are rejected.
pub fn upgrade_legacy(legacy: LegacyDetectionRecord) -> Result<DetectionRecord> {
    let status = DetectionStatus::from_probability(legacy.probability);

    let planet_type = match status {
        DetectionStatus::Exoplanet => legacy.planet_type.map(PlanetType::from),
        _ => None,
    };
    let false_positive_type = match status {
        DetectionStatus::FalsePositive => {
            Some(derive_false_positive_type(&legacy.tic_id, legacy.sector))
        }
        _ => None,
    };

    let flag = legacy
        .spoc_dvr
        .dvr_flag
        .parse()
        .map_err(|_| DomainError::UnknownQualityFlag(legacy.spoc_dvr.dvr_flag.clone()))?;

    let phase_hours = legacy
        .folded_phase
        .iter()
        .map(|p| PhasePoint {
            phase: p.phase * PHASE_HOURS_HALF_WINDOW,
            flux: p.flux,
        })
        .collect();

    Ok(DetectionRecord {
        id: Uuid::new_v4(),
        target_id: legacy.tic_id,
        sector: legacy.sector,
        probability: legacy.probability,
        status,
        planet_type,
        false_positive_type,
        planet_radius: legacy.radius,
        magnitude: legacy.magnitude,
        right_ascension: legacy.ra,
        declination: legacy.dec,
        stellar_parameters: legacy.stellar_parameters,
        gaia_ruwe: legacy.gaia_ruwe,
        spoc_dvr: DifferenceVector {
            value: legacy.spoc_dvr.dvr,
            uncertainty: legacy.spoc_dvr.dvr_uncertainty,
            flag,
        },
        tce: legacy.tce,
        light_curve: legacy.light_curve,
        phase_days: legacy.folded_phase,
        phase_hours,
        feature_importances: legacy.features,
        analyzed_at: legacy.analyzed_at,
    })
}

/// Stable vetting class for migrated false positives: a function of the
/// record key only, so re-running a migration never reshuffles classes.
fn derive_false_positive_type(target_id: &str, sector: u32) -> FalsePositiveType {
    let seed = target_seed(target_id).unwrap_or(0);
    let idx = seed.wrapping_add(u64::from(sector)) % FalsePositiveType::ALL.len() as u64;
    FalsePositiveType::ALL[idx as usize]
}
