//! Mock target-catalog browsing
//!
//! Backs the mission browser: a generated target list per mission with
//! substring search and 1-based pagination. List generation is random only
//! in the observation-window column; ids follow the mission's catalog
//! numbering so the same index always yields the same id.

use rand::Rng;
use rand_chacha::ChaChaRng;
use serde::{Deserialize, Serialize};

use exosift_domain::Mission;

/// One browsable catalog target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetEntry {
    /// Mission-prefixed catalog id
    pub id: String,

    /// Observation window (TESS sector / K2 campaign); Kepler targets
    /// are cataloged without one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<u32>,
}

/// One page of filtered targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetPage {
    pub items: Vec<TargetEntry>,
    pub page: usize,
    pub per_page: usize,
    /// Matches across all pages
    pub total: usize,
    pub total_pages: usize,
}

/// Spacing between consecutive generated catalog numbers.
const ID_STRIDE: u64 = 12_345;

/// First generated catalog number.
const ID_BASE: u64 = 10_000_000;

/// Generate a mission's mock target list.
pub fn generate_targets(rng: &mut ChaChaRng, mission: Mission, count: usize) -> Vec<TargetEntry> {
    (0..count as u64)
        .map(|i| TargetEntry {
            id: format!("{}{}", mission.catalog_prefix(), ID_BASE + i * ID_STRIDE),
            window: mission
                .window_range()
                .map(|range| rng.random_range(range)),
        })
        .collect()
}

/// Filter by case-insensitive substring and paginate (pages are 1-based).
///
/// A page past the end of the filtered list yields an empty `items`; the
/// totals still describe the whole filtered list.
pub fn browse(
    targets: &[TargetEntry],
    query: Option<&str>,
    page: usize,
    per_page: usize,
) -> TargetPage {
    let needle = query.unwrap_or("").trim().to_ascii_lowercase();
    let filtered: Vec<&TargetEntry> = targets
        .iter()
        .filter(|t| needle.is_empty() || t.id.to_ascii_lowercase().contains(&needle))
        .collect();

    let total = filtered.len();
    let per_page = per_page.max(1);
    let total_pages = total.div_ceil(per_page);
    let start = page.saturating_sub(1) * per_page;

    let items = filtered
        .into_iter()
        .skip(start)
        .take(per_page)
        .cloned()
        .collect();

    TargetPage {
        items,
        page: page.max(1),
        per_page,
        total,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn targets(mission: Mission, count: usize) -> Vec<TargetEntry> {
        let mut rng = ChaChaRng::seed_from_u64(7);
        generate_targets(&mut rng, mission, count)
    }

    #[test]
    fn test_ids_follow_catalog_numbering() {
        let list = targets(Mission::Tess, 3);
        assert_eq!(list[0].id, "TIC10000000");
        assert_eq!(list[1].id, "TIC10012345");
        assert_eq!(list[2].id, "TIC10024690");
    }

    #[test]
    fn test_windows_match_mission() {
        for entry in targets(Mission::Tess, 50) {
            let sector = entry.window.expect("TESS targets carry a sector");
            assert!((1..=69).contains(&sector));
        }
        for entry in targets(Mission::K2, 50) {
            let campaign = entry.window.expect("K2 targets carry a campaign");
            assert!((1..=19).contains(&campaign));
        }
        assert!(targets(Mission::Kepler, 50).iter().all(|t| t.window.is_none()));
    }

    #[test]
    fn test_browse_filters_case_insensitive() {
        let list = targets(Mission::K2, 100);
        let page = browse(&list, Some("epic1001"), 1, 10);
        assert!(page.total > 0);
        assert!(page.items.iter().all(|t| t.id.starts_with("EPIC1001")));
    }

    #[test]
    fn test_browse_paginates() {
        let list = targets(Mission::Tess, 100);
        let page = browse(&list, None, 2, 10);
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.total, 100);
        assert_eq!(page.total_pages, 10);
        // Page 2 starts where page 1 ended.
        assert_eq!(page.items[0].id, list[10].id);
    }

    #[test]
    fn test_browse_past_the_end_is_empty() {
        let list = targets(Mission::Tess, 15);
        let page = browse(&list, None, 4, 10);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 15);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn test_browse_no_matches() {
        let list = targets(Mission::Tess, 10);
        let page = browse(&list, Some("KIC"), 1, 10);
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
    }
}
