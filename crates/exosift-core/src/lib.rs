//! ExoSift Core Library
//!
//! The synthetic analysis engine behind the ExoSift dashboard tooling:
//! - [`generator`]: maps a (target id, sector) pair to a complete
//!   [`exosift_domain::DetectionRecord`] with classification, stellar
//!   parameters and synthetic curves, behind an artificial inference delay
//! - [`accumulator`]: session-scoped ordered store of completed analyses
//! - [`catalog`]: mock target-list browsing (search + pagination)
//! - [`telemetry`]: tracing setup for binaries

pub mod accumulator;
pub mod catalog;
pub mod error;
pub mod generator;
pub mod telemetry;

pub use accumulator::{DetectionStore, DetectionSummary, MemoryDetectionStore};
pub use catalog::{browse, generate_targets, TargetEntry, TargetPage};
pub use error::{CoreError, Result};
pub use generator::{AnalysisOverrides, DetectionGenerator, GeneratorConfig};
pub use telemetry::init_tracing;

/// ExoSift core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
