//! Mitigation recommendations derived from a simulation result.
//!
//! A fixed, ordered table of independent rules. Every rule whose guard holds
//! appends its items; rules never remove or reorder earlier output. The
//! returned order is table order, not severity. Use [`sort_by_priority`]
//! for a severity-first view.

use serde::Serialize;

use crate::simulate::{RiskLevel, RiskSimulationResult};

// ---

/// Recommendations share the simulator's low/medium/high/critical scale.
pub type Priority = RiskLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub icon: &'static str,
    pub text: &'static str,
    pub priority: Priority,
}

const fn item(icon: &'static str, text: &'static str, priority: Priority) -> Recommendation {
    Recommendation {
        icon,
        text,
        priority,
    }
}

struct Rule {
    guard: fn(&RiskSimulationResult) -> bool,
    items: &'static [Recommendation],
}

fn probability(r: &RiskSimulationResult) -> u32 {
    r.flood_probability
}

fn forest(r: &RiskSimulationResult) -> u64 {
    r.factors.forest_impact
}

fn rainfall(r: &RiskSimulationResult) -> u64 {
    r.factors.rainfall_impact
}

fn soil(r: &RiskSimulationResult) -> u64 {
    r.factors.soil_impact
}

static RULES: &[Rule] = &[
    Rule {
        guard: |r| probability(r) > 70,
        items: &[
            item(
                "AlertOctagon",
                "Raise alert levels: flood risk is very high. Coordinate with disaster \
                 management agencies on mitigation immediately.",
                Priority::Critical,
            ),
            item(
                "Construction",
                "Prioritize drainage infrastructure and flood levees in flood-prone areas.",
                Priority::Critical,
            ),
        ],
    },
    Rule {
        guard: |r| forest(r) > 70,
        items: &[
            item(
                "TreePine",
                "Deforestation impact is severe. Reforest intensively with at least 1000 \
                 trees per hectare in critical zones.",
                Priority::High,
            ),
            item(
                "Shield",
                "Enforce strict forest conservation and a logging moratorium in water \
                 catchment areas.",
                Priority::High,
            ),
        ],
    },
    Rule {
        guard: |r| (51..=70).contains(&forest(r)),
        items: &[item(
            "Trees",
            "Increase forest cover by planting endemic trees with deep, water-absorbing roots.",
            Priority::Medium,
        )],
    },
    Rule {
        guard: |r| (31..=50).contains(&forest(r)),
        items: &[item(
            "Sprout",
            "Maintain existing forest cover and rehabilitate degraded areas.",
            Priority::Medium,
        )],
    },
    Rule {
        guard: |r| rainfall(r) > 70,
        items: &[
            item(
                "CloudRain",
                "Extreme rainfall intensity. Build modern drainage sized for 300+ mm/day.",
                Priority::High,
            ),
            item(
                "Waves",
                "Build retention ponds to hold excess stormwater runoff.",
                Priority::High,
            ),
        ],
    },
    Rule {
        guard: |r| (51..=70).contains(&rainfall(r)),
        items: &[item(
            "Droplets",
            "Repair and extend the existing drainage network to handle higher water volumes.",
            Priority::Medium,
        )],
    },
    Rule {
        guard: |r| soil(r) > 70,
        items: &[
            item(
                "Mountain",
                "Soil condition is critical. Apply bioengineering methods to restore soil \
                 structure and porosity.",
                Priority::High,
            ),
            item(
                "Layers",
                "Conserve soil with terracing and build infiltration wells on every plot.",
                Priority::High,
            ),
        ],
    },
    Rule {
        guard: |r| (51..=70).contains(&soil(r)),
        items: &[item(
            "Leaf",
            "Improve soil infiltration by adding organic matter and reducing compaction.",
            Priority::Medium,
        )],
    },
    Rule {
        guard: |r| (50..=70).contains(&probability(r)),
        items: &[
            item(
                "BarChart3",
                "Study local water flow patterns in depth and map waterlogging hotspots.",
                Priority::Medium,
            ),
            item(
                "Users",
                "Roll out flood early-warning outreach to communities in at-risk areas.",
                Priority::Medium,
            ),
        ],
    },
    Rule {
        guard: |r| (30..50).contains(&probability(r)),
        items: &[
            item(
                "Eye",
                "Monitor environmental conditions regularly to keep flood risk from rising.",
                Priority::Low,
            ),
            item(
                "BookOpen",
                "Educate the community on protecting forests and the environment.",
                Priority::Low,
            ),
        ],
    },
    Rule {
        guard: |r| probability(r) < 30,
        items: &[
            item(
                "CheckCircle",
                "Environmental conditions are good. Flood risk is low with the current parameters.",
                Priority::Low,
            ),
            item(
                "Sparkles",
                "Keep the ecosystem balanced by sustaining forest cover and soil quality.",
                Priority::Low,
            ),
            item(
                "ClipboardCheck",
                "Keep up routine monitoring so conditions stay optimal all year.",
                Priority::Low,
            ),
        ],
    },
    Rule {
        guard: |r| forest(r) > 60 && soil(r) > 60,
        items: &[item(
            "Zap",
            "Deforestation combined with poor soil multiplies flood risk. Prioritize \
             rehabilitation of critical land.",
            Priority::Critical,
        )],
    },
    Rule {
        guard: |r| rainfall(r) > 60 && forest(r) > 60,
        items: &[item(
            "Wind",
            "Extreme rain plus deforestation means flash-flood risk. Build a community \
             early-warning system.",
            Priority::Critical,
        )],
    },
];

/// Evaluate every rule against `result`, in table order.
pub fn recommend(result: &RiskSimulationResult) -> Vec<Recommendation> {
    // ---
    RULES
        .iter()
        .filter(|rule| (rule.guard)(result))
        .flat_map(|rule| rule.items.iter().copied())
        .collect()
}

/// Highest priority first; ties keep table order.
pub fn sort_by_priority(mut recommendations: Vec<Recommendation>) -> Vec<Recommendation> {
    // ---
    recommendations.sort_by(|a, b| b.priority.cmp(&a.priority));
    recommendations
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::simulate::{simulate, RiskFactors, SoilAbsorption};

    fn result(probability: u32, forest: u64, rainfall: u64, soil: u64) -> RiskSimulationResult {
        // ---
        RiskSimulationResult {
            flood_probability: probability,
            water_runoff: 0,
            environmental_health: 100 - probability,
            risk_level: RiskLevel::from_probability(probability),
            factors: RiskFactors {
                forest_impact: forest,
                rainfall_impact: rainfall,
                soil_impact: soil,
            },
        }
    }

    fn icons(recs: &[Recommendation]) -> Vec<&'static str> {
        recs.iter().map(|r| r.icon).collect()
    }

    #[test]
    fn test_critical_probability_includes_infrastructure_items() {
        // ---
        let recs = recommend(&result(85, 0, 0, 0));

        assert_eq!(&icons(&recs)[..2], ["AlertOctagon", "Construction"]);
        assert!(recs[..2].iter().all(|r| r.priority == Priority::Critical));
    }

    #[test]
    fn test_forest_bands_are_exclusive() {
        // ---
        assert!(icons(&recommend(&result(40, 75, 0, 0))).contains(&"TreePine"));
        assert!(!icons(&recommend(&result(40, 75, 0, 0))).contains(&"Trees"));
        assert!(icons(&recommend(&result(40, 70, 0, 0))).contains(&"Trees"));
        assert!(icons(&recommend(&result(40, 50, 0, 0))).contains(&"Sprout"));
        assert!(!icons(&recommend(&result(40, 30, 0, 0))).contains(&"Sprout"));
    }

    #[test]
    fn test_probability_bands() {
        // ---
        assert_eq!(icons(&recommend(&result(70, 0, 0, 0))), ["BarChart3", "Users"]);
        assert_eq!(icons(&recommend(&result(50, 0, 0, 0))), ["BarChart3", "Users"]);
        assert_eq!(icons(&recommend(&result(49, 0, 0, 0))), ["Eye", "BookOpen"]);
        assert_eq!(icons(&recommend(&result(30, 0, 0, 0))), ["Eye", "BookOpen"]);
        assert_eq!(
            icons(&recommend(&result(29, 0, 0, 0))),
            ["CheckCircle", "Sparkles", "ClipboardCheck"]
        );
    }

    #[test]
    fn test_compound_warnings_are_additive() {
        // ---
        let recs = recommend(&result(90, 80, 20, 90));
        let names = icons(&recs);

        assert!(names.contains(&"TreePine"));
        assert!(names.contains(&"Mountain"));
        assert!(names.contains(&"Zap"));
        assert!(!names.contains(&"Wind"));
        assert_eq!(names.last(), Some(&"Zap"));
    }

    #[test]
    fn test_rain_and_forest_compound_warning() {
        // ---
        let recs = recommend(&result(60, 65, 65, 20));

        assert_eq!(
            icons(&recs),
            ["Trees", "Droplets", "BarChart3", "Users", "Wind"]
        );
    }

    #[test]
    fn test_worst_case_scenario_end_to_end() {
        // ---
        let r = simulate(0.0, 400.0, SoilAbsorption::Low);
        let recs = recommend(&r);

        assert_eq!(r.risk_level, RiskLevel::Critical);
        assert_eq!(
            icons(&recs),
            [
                "AlertOctagon",
                "Construction",
                "TreePine",
                "Shield",
                "CloudRain",
                "Waves",
                "Mountain",
                "Layers",
                "Zap",
                "Wind"
            ]
        );
    }

    #[test]
    fn test_sort_by_priority_is_stable() {
        // ---
        let sorted = sort_by_priority(recommend(&result(60, 65, 65, 20)));

        assert_eq!(
            icons(&sorted),
            ["Wind", "Trees", "Droplets", "BarChart3", "Users"]
        );
    }

    #[test]
    fn test_recommend_is_pure() {
        // ---
        let r = simulate(20.0, 250.0, SoilAbsorption::Low);

        assert_eq!(recommend(&r), recommend(&r));
    }
}
