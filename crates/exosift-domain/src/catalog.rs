//! Survey missions and catalog identifiers
//!
//! Target identifiers are mission-prefixed catalog ids ("TIC 12345679",
//! "KIC 10000000", "EPIC 201367065"). [`canonical_target_id`] normalizes
//! free-form user input onto that shape, and [`target_seed`] extracts the
//! numeric part as a reproducible seed for curve synthesis.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Space-telescope survey mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mission {
    Kepler,
    K2,
    Tess,
}

impl Mission {
    /// Input-catalog prefix for target ids.
    pub fn catalog_prefix(&self) -> &'static str {
        match self {
            Mission::Kepler => "KIC",
            Mission::K2 => "EPIC",
            Mission::Tess => "TIC",
        }
    }

    /// Human-readable mission name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Mission::Kepler => "Kepler",
            Mission::K2 => "K2",
            Mission::Tess => "TESS",
        }
    }

    /// What this mission calls its observation window.
    pub fn window_label(&self) -> &'static str {
        match self {
            Mission::Kepler => "quarter",
            Mission::K2 => "campaign",
            Mission::Tess => "sector",
        }
    }

    /// Valid observation-window indices, where the mission exposes them
    /// in its target catalog. Kepler targets are listed without one.
    pub fn window_range(&self) -> Option<RangeInclusive<u32>> {
        match self {
            Mission::Kepler => None,
            Mission::K2 => Some(1..=19),
            Mission::Tess => Some(1..=69),
        }
    }

    /// One-paragraph mission summary for display surfaces.
    pub fn description(&self) -> &'static str {
        match self {
            Mission::Kepler => {
                "NASA's Kepler mission (2009-2013) monitored over 150,000 stars in a \
                 single field of view, discovering thousands of exoplanets through \
                 the transit method."
            }
            Mission::K2 => {
                "K2 (2014-2018) was Kepler's extended mission, observing different \
                 fields along the ecliptic plane and discovering additional \
                 exoplanets across various stellar environments."
            }
            Mission::Tess => {
                "TESS (2018-present) surveys the entire sky in sectors, monitoring \
                 hundreds of thousands of bright stars to find transiting exoplanets \
                 around nearby stars."
            }
        }
    }
}

impl fmt::Display for Mission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mission::Kepler => write!(f, "kepler"),
            Mission::K2 => write!(f, "k2"),
            Mission::Tess => write!(f, "tess"),
        }
    }
}

impl FromStr for Mission {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kepler" => Ok(Mission::Kepler),
            "k2" => Ok(Mission::K2),
            "tess" => Ok(Mission::Tess),
            _ => Err(DomainError::UnknownMission(s.to_string())),
        }
    }
}

/// All known catalog prefixes, checked when normalizing user input.
const KNOWN_PREFIXES: [&str; 3] = ["KIC", "EPIC", "TIC"];

/// Normalize a free-form target id onto the canonical "PREFIX rest" shape.
///
/// Bare ids get the mission's catalog prefix; ids that already carry a
/// known prefix (any case, with or without a separating space) keep it.
pub fn canonical_target_id(mission: Mission, raw: &str) -> String {
    let trimmed = raw.trim();
    let bytes = trimmed.as_bytes();
    for prefix in KNOWN_PREFIXES {
        // Byte-wise compare: a match is all-ASCII, so the split below is
        // always on a char boundary.
        if bytes.len() >= prefix.len() && bytes[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
        {
            let rest = trimmed[prefix.len()..].trim_start();
            return format!("{} {}", prefix, rest);
        }
    }
    format!("{} {}", mission.catalog_prefix(), trimmed)
}

/// Extract the digits of a target id as a seed value.
///
/// Digits are folded with wrapping arithmetic, so arbitrarily long ids are
/// accepted. Returns `None` when the id contains no digits at all; callers
/// fall back to a random seed in that case.
pub fn target_seed(target_id: &str) -> Option<u64> {
    let mut seen_digit = false;
    let mut seed = 0u64;
    for c in target_id.chars() {
        if let Some(d) = c.to_digit(10) {
            seen_digit = true;
            seed = seed.wrapping_mul(10).wrapping_add(u64::from(d));
        }
    }
    seen_digit.then_some(seed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_id_prefixes_bare_input() {
        assert_eq!(
            canonical_target_id(Mission::Tess, "12345679"),
            "TIC 12345679"
        );
        assert_eq!(
            canonical_target_id(Mission::K2, " 201367065 "),
            "EPIC 201367065"
        );
    }

    #[test]
    fn test_canonical_id_keeps_existing_prefix() {
        assert_eq!(
            canonical_target_id(Mission::Tess, "KIC 10000000"),
            "KIC 10000000"
        );
        assert_eq!(
            canonical_target_id(Mission::Kepler, "tic12345679"),
            "TIC 12345679"
        );
    }

    #[test]
    fn test_target_seed_extracts_digits() {
        assert_eq!(target_seed("TIC 12345679"), Some(12_345_679));
        assert_eq!(target_seed("EPIC 201-367-065"), Some(201_367_065));
        assert_eq!(target_seed("no digits here"), None);
    }

    #[test]
    fn test_target_seed_is_total_for_long_ids() {
        // Wrapping fold: more digits than u64 can hold still yields a seed.
        let id = "TIC 99999999999999999999999999999999";
        assert!(target_seed(id).is_some());
    }

    #[test]
    fn test_mission_round_trip_and_metadata() {
        for mission in [Mission::Kepler, Mission::K2, Mission::Tess] {
            let parsed: Mission = mission.to_string().parse().unwrap();
            assert_eq!(parsed, mission);
        }
        assert_eq!(Mission::Tess.catalog_prefix(), "TIC");
        assert_eq!(Mission::K2.window_label(), "campaign");
        assert_eq!(Mission::Tess.window_range(), Some(1..=69));
        assert!(Mission::Kepler.window_range().is_none());
        assert!("jwst".parse::<Mission>().is_err());
    }
}
