//! ExoSift Domain Model
//!
//! Defines the detection record produced by a synthetic survey analysis:
//! - DetectionRecord: one analysis result per (target, sector) pair
//! - DetectionStatus / PlanetType / FalsePositiveType: classification enums
//!   with their fixed threshold and breakpoint functions
//! - StellarParameters, DifferenceVector, TransitCandidateEvent: measurement
//!   components
//! - Mission: survey catalogs (Kepler/K2/TESS) and target-id normalization
//! - compat: adapter migrating first-revision records onto this schema
//!
//! All objects are serializable; the wire format is camelCase JSON with
//! ISO-8601 timestamps. Classification invariants hold by construction:
//! status is always the threshold function of probability.

pub mod catalog;
pub mod compat;
pub mod error;
pub mod schema;

pub use catalog::{canonical_target_id, target_seed, Mission};
pub use compat::{upgrade_legacy, LegacyDetectionRecord, LegacyPlanetType};
pub use error::{DomainError, Result};
pub use schema::{
    DetectionKey, DetectionRecord, DetectionStatus, DifferenceVector, FalsePositiveType,
    FeatureImportance, LightCurvePoint, PhasePoint, PlanetType, QualityFlag, StellarParameters,
    TransitCandidateEvent,
};

/// ExoSift domain version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
