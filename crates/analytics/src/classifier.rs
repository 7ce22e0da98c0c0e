//! Categorical labels from extracted features.
//!
//! Each label is an ordered rule chain: rules are tried top to bottom and the
//! first matching rule wins, falling back to the chain's default label.

use vendor_core::{Aggressiveness, BehaviorSegment, Level, Persistence, TimingClass, Trend};
use vendor_features::VendorFeatures;

/// Feature values the rule chains read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Signals {
    pub early_pct: f64,
    pub middle_pct: f64,
    pub late_pct: f64,
    pub extension_pct: f64,
    pub avg_discount: f64,
    pub avg_decrement: f64,
    pub response_rate: f64,
    pub max_iterations: u32,
    pub acceptance_rate: f64,
    pub reliability: f64,
    pub trend: Trend,
}

impl Signals {
    pub fn new(features: &VendorFeatures, trend: Trend) -> Self {
        Self {
            early_pct: features.early_pct,
            middle_pct: features.middle_pct,
            late_pct: features.late_pct,
            extension_pct: features.extension_pct,
            avg_discount: features.avg_discount,
            avg_decrement: features.avg_decrement,
            response_rate: features.response_rate,
            max_iterations: features.max_iterations,
            acceptance_rate: features.acceptance_rate,
            reliability: features.reliability,
            trend,
        }
    }
}

/// A predicate and the label it assigns.
#[derive(Clone, Copy)]
pub struct Rule<L> {
    pub label: L,
    pub applies: fn(&Signals) -> bool,
}

/// Ordered, first-match-wins list of rules.
#[derive(Clone)]
pub struct RuleChain<L> {
    rules: Vec<Rule<L>>,
    fallback: L,
}

impl<L: Copy> RuleChain<L> {
    pub fn new(rules: Vec<Rule<L>>, fallback: L) -> Self {
        Self { rules, fallback }
    }

    pub fn evaluate(&self, signals: &Signals) -> L {
        self.rules
            .iter()
            .find(|rule| (rule.applies)(signals))
            .map_or(self.fallback, |rule| rule.label)
    }

    /// Labels in evaluation order, fallback last.
    pub fn labels(&self) -> Vec<L> {
        let mut labels: Vec<L> = self.rules.iter().map(|r| r.label).collect();
        labels.push(self.fallback);
        labels
    }
}

/// All labels assigned to one vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub timing_class: TimingClass,
    pub aggressiveness: Aggressiveness,
    pub behavior_segment: BehaviorSegment,
    pub persistence: Persistence,
    pub dropout_risk: Level,
}

/// Vendor classifier built from the five rule chains.
#[derive(Clone)]
pub struct VendorClassifier {
    timing: RuleChain<TimingClass>,
    aggressiveness: RuleChain<Aggressiveness>,
    segment: RuleChain<BehaviorSegment>,
    persistence: RuleChain<Persistence>,
    dropout: RuleChain<Level>,
}

impl VendorClassifier {
    pub fn new() -> Self {
        Self {
            timing: timing_rules(),
            aggressiveness: aggressiveness_rules(),
            segment: segment_rules(),
            persistence: persistence_rules(),
            dropout: dropout_rules(),
        }
    }

    pub fn classify(&self, signals: &Signals) -> Classification {
        Classification {
            timing_class: self.timing.evaluate(signals),
            aggressiveness: self.aggressiveness.evaluate(signals),
            behavior_segment: self.segment.evaluate(signals),
            persistence: self.persistence.evaluate(signals),
            dropout_risk: self.dropout.evaluate(signals),
        }
    }
}

impl Default for VendorClassifier {
    fn default() -> Self {
        Self::new()
    }
}

pub fn timing_rules() -> RuleChain<TimingClass> {
    RuleChain::new(
        vec![
            Rule {
                label: TimingClass::ExtensionHunter,
                applies: |s| s.extension_pct >= 30.0,
            },
            Rule {
                label: TimingClass::EarlyBird,
                applies: |s| s.early_pct >= 45.0,
            },
            Rule {
                label: TimingClass::Sniper,
                applies: |s| s.late_pct >= 55.0,
            },
        ],
        TimingClass::StrategicMiddle,
    )
}

pub fn aggressiveness_rules() -> RuleChain<Aggressiveness> {
    RuleChain::new(
        vec![
            Rule {
                label: Aggressiveness::VeryAggressive,
                applies: |s| s.avg_discount >= 21.0 || s.avg_decrement >= 1000.0,
            },
            Rule {
                label: Aggressiveness::Aggressive,
                applies: |s| s.avg_discount >= 17.0 || s.avg_decrement >= 600.0,
            },
            Rule {
                label: Aggressiveness::Balanced,
                applies: |s| s.avg_discount >= 13.0,
            },
        ],
        Aggressiveness::Conservative,
    )
}

pub fn segment_rules() -> RuleChain<BehaviorSegment> {
    RuleChain::new(
        vec![
            Rule {
                label: BehaviorSegment::Aggressive,
                applies: |s| {
                    s.early_pct >= 45.0 && s.response_rate >= 70.0 && s.avg_discount >= 15.0
                },
            },
            Rule {
                label: BehaviorSegment::Strategic,
                applies: |s| s.middle_pct >= 45.0 && (12.0..=20.0).contains(&s.avg_discount),
            },
            Rule {
                label: BehaviorSegment::Opportunistic,
                applies: |s| s.late_pct >= 55.0 || s.extension_pct >= 25.0,
            },
        ],
        BehaviorSegment::Conservative,
    )
}

pub fn persistence_rules() -> RuleChain<Persistence> {
    RuleChain::new(
        vec![
            Rule {
                label: Persistence::VeryHigh,
                applies: |s| s.max_iterations >= 12,
            },
            Rule {
                label: Persistence::High,
                applies: |s| s.max_iterations >= 8,
            },
            Rule {
                label: Persistence::Medium,
                applies: |s| s.max_iterations >= 4,
            },
        ],
        Persistence::Low,
    )
}

pub fn dropout_rules() -> RuleChain<Level> {
    RuleChain::new(
        vec![
            Rule {
                label: Level::High,
                applies: |s| s.acceptance_rate < 80.0 || s.reliability < 75.0,
            },
            Rule {
                label: Level::Medium,
                applies: |s| s.acceptance_rate < 92.0 || s.trend == Trend::Declining,
            },
        ],
        Level::Low,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline() -> Signals {
        Signals {
            early_pct: 0.0,
            middle_pct: 0.0,
            late_pct: 0.0,
            extension_pct: 0.0,
            avg_discount: 0.0,
            avg_decrement: 0.0,
            response_rate: 0.0,
            max_iterations: 1,
            acceptance_rate: 100.0,
            reliability: 100.0,
            trend: Trend::Stable,
        }
    }

    fn classify(signals: Signals) -> Classification {
        VendorClassifier::new().classify(&signals)
    }

    #[test]
    fn test_extension_check_precedes_early_bird() {
        let signals = Signals {
            extension_pct: 35.0,
            early_pct: 60.0,
            ..baseline()
        };
        assert_eq!(classify(signals).timing_class, TimingClass::ExtensionHunter);
    }

    #[test]
    fn test_timing_chain_order() {
        assert_eq!(
            timing_rules().labels(),
            vec![
                TimingClass::ExtensionHunter,
                TimingClass::EarlyBird,
                TimingClass::Sniper,
                TimingClass::StrategicMiddle,
            ]
        );
        let sniper = Signals {
            late_pct: 60.0,
            ..baseline()
        };
        assert_eq!(classify(sniper).timing_class, TimingClass::Sniper);
        assert_eq!(classify(baseline()).timing_class, TimingClass::StrategicMiddle);
    }

    #[test]
    fn test_high_discount_is_very_aggressive_regardless_of_decrement() {
        for decrement in [0.0, 700.0, 5_000.0] {
            let signals = Signals {
                avg_discount: 22.0,
                avg_decrement: decrement,
                ..baseline()
            };
            assert_eq!(classify(signals).aggressiveness, Aggressiveness::VeryAggressive);
        }
    }

    #[test]
    fn test_aggressiveness_via_decrement() {
        let signals = Signals {
            avg_discount: 5.0,
            avg_decrement: 650.0,
            ..baseline()
        };
        assert_eq!(classify(signals).aggressiveness, Aggressiveness::Aggressive);

        let signals = Signals {
            avg_discount: 13.0,
            ..baseline()
        };
        assert_eq!(classify(signals).aggressiveness, Aggressiveness::Balanced);
        assert_eq!(classify(baseline()).aggressiveness, Aggressiveness::Conservative);
    }

    #[test]
    fn test_behavior_segments() {
        let aggressive = Signals {
            early_pct: 50.0,
            response_rate: 75.0,
            avg_discount: 16.0,
            ..baseline()
        };
        assert_eq!(classify(aggressive).behavior_segment, BehaviorSegment::Aggressive);

        let strategic = Signals {
            middle_pct: 50.0,
            avg_discount: 20.0,
            ..baseline()
        };
        assert_eq!(classify(strategic).behavior_segment, BehaviorSegment::Strategic);

        let opportunistic = Signals {
            extension_pct: 25.0,
            ..baseline()
        };
        assert_eq!(
            classify(opportunistic).behavior_segment,
            BehaviorSegment::Opportunistic
        );

        // Strategic band is inclusive at both ends; 20.5 falls through.
        let drifted = Signals {
            middle_pct: 50.0,
            avg_discount: 20.5,
            ..baseline()
        };
        assert_eq!(classify(drifted).behavior_segment, BehaviorSegment::Conservative);
    }

    #[test]
    fn test_persistence() {
        let cases = [
            (12, Persistence::VeryHigh),
            (8, Persistence::High),
            (4, Persistence::Medium),
            (3, Persistence::Low),
        ];
        for (iterations, expected) in cases {
            let signals = Signals {
                max_iterations: iterations,
                ..baseline()
            };
            assert_eq!(classify(signals).persistence, expected);
        }
    }

    #[test]
    fn test_low_acceptance_dominates_dropout_risk() {
        let signals = Signals {
            acceptance_rate: 75.0,
            reliability: 90.0,
            ..baseline()
        };
        assert_eq!(classify(signals).dropout_risk, Level::High);
    }

    #[test]
    fn test_dropout_medium_and_low() {
        let declining = Signals {
            trend: Trend::Declining,
            ..baseline()
        };
        assert_eq!(classify(declining).dropout_risk, Level::Medium);

        let lukewarm = Signals {
            acceptance_rate: 90.0,
            ..baseline()
        };
        assert_eq!(classify(lukewarm).dropout_risk, Level::Medium);
        assert_eq!(classify(baseline()).dropout_risk, Level::Low);
    }
}
