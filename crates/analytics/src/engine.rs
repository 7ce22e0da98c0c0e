//! Vendor behavior analytics engine.
//!
//! Freezes the ledger into a `Corpus`, then runs the per-vendor pipeline
//! (features, trend, labels, forecast) alongside clustering and coverage, and
//! joins everything in the report assembler.

use crate::{
    classifier::{Signals, VendorClassifier},
    clustering::CoParticipation,
    coverage::{CoverageModel, StaticCoverageModel},
    report::{build_profile, ReportAssembler},
    scorer::PredictiveScorer,
};
use chrono::{DateTime, Utc};
use tracing::info;
use vendor_core::{AnalyticsSnapshot, Config, Result, VendorBehaviorProfile};
use vendor_features::{FeatureExtractor, LaneClassifier, TrendAnalyzer};
use vendor_ledger::{Corpus, LedgerAccessor};

/// Stateless analytics engine over a ledger accessor.
///
/// Every call recomputes from scratch; nothing is cached between calls.
pub struct VendorBehaviorEngine<L> {
    ledger: L,
    config: Config,
    extractor: FeatureExtractor,
    trend: TrendAnalyzer,
    classifier: VendorClassifier,
    scorer: PredictiveScorer,
    coverage: Box<dyn CoverageModel>,
    assembler: ReportAssembler,
}

impl<L: LedgerAccessor> VendorBehaviorEngine<L> {
    /// Create an engine with the keyword lane classifier and static coverage model.
    pub fn new(ledger: L, config: Config) -> Self {
        Self {
            extractor: FeatureExtractor::new(&config),
            trend: TrendAnalyzer::new(&config.trend),
            classifier: VendorClassifier::new(),
            scorer: PredictiveScorer::new(),
            coverage: Box::new(StaticCoverageModel),
            assembler: ReportAssembler::new(&config.participation),
            ledger,
            config,
        }
    }

    /// Replace the lane-name classifier.
    pub fn with_lane_classifier(mut self, classifier: Box<dyn LaneClassifier>) -> Self {
        self.extractor = FeatureExtractor::with_classifier(&self.config, classifier);
        self
    }

    /// Replace the coverage gap model.
    pub fn with_coverage_model(mut self, model: Box<dyn CoverageModel>) -> Self {
        self.coverage = model;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Compute a snapshot as of now.
    pub fn compute(&self) -> Result<AnalyticsSnapshot> {
        self.compute_at(Utc::now())
    }

    /// Compute a snapshot as of `as_of`, which also becomes `generated_at`.
    ///
    /// Fails only if the ledger accessor fails; no partial snapshot is returned.
    pub fn compute_at(&self, as_of: DateTime<Utc>) -> Result<AnalyticsSnapshot> {
        let corpus = Corpus::load(&self.ledger)?;
        Ok(self.analyze(&corpus, as_of))
    }

    /// Run the pipeline over an already frozen corpus.
    pub fn analyze(&self, corpus: &Corpus, as_of: DateTime<Utc>) -> AnalyticsSnapshot {
        info!(
            bids = corpus.bids().len(),
            auctions = corpus.auctions().len(),
            "computing vendor behavior analytics"
        );

        let profiles = self.profiles(corpus, as_of);
        let clusters = CoParticipation::from_corpus(corpus)
            .top(self.config.clustering.top_pairs, corpus);
        let gaps = self.coverage.assess(corpus, &profiles);

        let snapshot = self.assembler.assemble(as_of, profiles, clusters, gaps);
        info!(
            vendors = snapshot.vendors.len(),
            clusters = snapshot.clusters.len(),
            frequent = snapshot.totals.frequent,
            "vendor behavior analytics ready"
        );
        snapshot
    }

    fn profiles(&self, corpus: &Corpus, as_of: DateTime<Utc>) -> Vec<VendorBehaviorProfile> {
        let lane_streams = corpus.bids_by_lane();
        corpus
            .bids_by_vendor()
            .into_iter()
            .map(|(vendor_id, bids)| {
                let features = self.extractor.extract(vendor_id, &bids, corpus, &lane_streams);
                let trend = self.trend.analyze(&bids, as_of);
                let labels = self.classifier.classify(&Signals::new(&features, trend.trend));
                let forecast = self.scorer.score(&features, trend.trend, labels.timing_class);
                build_profile(features, trend, labels, forecast)
            })
            .collect()
    }
}

/// Compute a snapshot with the default configuration.
pub fn compute_vendor_behavior_analytics(
    ledger: &dyn LedgerAccessor,
) -> Result<AnalyticsSnapshot> {
    VendorBehaviorEngine::new(ledger, Config::default()).compute()
}
