//! Coverage gap assessment per route category.
//!
//! `StaticCoverageModel` does not measure per-category participation: each
//! category's coverage is a fixed share of the active vendor count. Swap in
//! another `CoverageModel` to measure coverage from the corpus.

use vendor_core::{CoverageGap, GapSeverity, VendorBehaviorProfile};
use vendor_ledger::Corpus;

/// Produces coverage assessments for the snapshot.
pub trait CoverageModel: Send + Sync {
    fn assess(&self, corpus: &Corpus, profiles: &[VendorBehaviorProfile]) -> Vec<CoverageGap>;
}

/// Route categories and the share of active vendors assumed to serve each.
const CATEGORY_SHARES: &[(&str, f64)] = &[
    ("Long Haul FTL", 0.35),
    ("Short Haul FTL", 0.50),
    ("LTL / Part Load", 0.25),
    ("North-East Corridor", 0.15),
    ("Pan-India Express", 0.20),
];

/// Proportional heuristic over the number of profiled vendors.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticCoverageModel;

impl StaticCoverageModel {
    fn severity(coverage: u32) -> (GapSeverity, &'static str) {
        if coverage < 3 {
            (GapSeverity::Critical, "Onboard new vendors for this category")
        } else if coverage < 6 {
            (GapSeverity::Moderate, "Invite additional vendors to upcoming auctions")
        } else {
            (GapSeverity::Healthy, "Maintain current vendor pool")
        }
    }
}

impl CoverageModel for StaticCoverageModel {
    fn assess(&self, _corpus: &Corpus, profiles: &[VendorBehaviorProfile]) -> Vec<CoverageGap> {
        let active = profiles.len() as f64;
        CATEGORY_SHARES
            .iter()
            .map(|(category, share)| {
                let coverage = (active * share).round() as u32;
                let (severity, action) = Self::severity(coverage);
                CoverageGap {
                    category: category.to_string(),
                    vendor_coverage: coverage,
                    severity,
                    recommended_action: action.to_string(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_corpus_is_all_critical() {
        let gaps = StaticCoverageModel.assess(&Corpus::default(), &[]);
        assert_eq!(gaps.len(), CATEGORY_SHARES.len());
        assert!(gaps.iter().all(|g| g.vendor_coverage == 0));
        assert!(gaps.iter().all(|g| g.severity == GapSeverity::Critical));
    }

    #[test]
    fn test_severity_bands() {
        assert_eq!(StaticCoverageModel::severity(2).0, GapSeverity::Critical);
        assert_eq!(StaticCoverageModel::severity(3).0, GapSeverity::Moderate);
        assert_eq!(StaticCoverageModel::severity(5).0, GapSeverity::Moderate);
        assert_eq!(StaticCoverageModel::severity(6).0, GapSeverity::Healthy);
    }
}
