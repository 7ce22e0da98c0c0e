//! Lane-name heuristics.
//!
//! Lane names are free text such as `"Mumbai - Delhi 1,400 km FTL 32ft"`.
//! Region, route length and vehicle type are inferred from city names,
//! explicit distances and load keywords.

use vendor_core::{LaneTraits, Region, RouteLength, VehicleType};

/// Infers lane attributes from a lane name.
pub trait LaneClassifier: Send + Sync {
    fn classify_lane(&self, lane_name: &str) -> LaneTraits;
}

const CITY_REGIONS: &[(Region, &[&str])] = &[
    (
        Region::North,
        &[
            "delhi", "gurgaon", "gurugram", "noida", "chandigarh", "jaipur", "lucknow", "ludhiana",
            "amritsar", "kanpur", "dehradun", "agra",
        ],
    ),
    (
        Region::South,
        &[
            "chennai", "bangalore", "bengaluru", "hyderabad", "kochi", "cochin", "coimbatore",
            "madurai", "vizag", "visakhapatnam", "mysore", "hosur",
        ],
    ),
    (
        Region::East,
        &[
            "kolkata", "bhubaneswar", "patna", "guwahati", "ranchi", "siliguri", "cuttack",
            "jamshedpur",
        ],
    ),
    (
        Region::West,
        &[
            "mumbai", "pune", "ahmedabad", "surat", "nagpur", "indore", "goa", "vadodara",
            "nashik", "bhiwandi", "rajkot",
        ],
    ),
];

const LONG_HAUL_KEYWORDS: &[&str] = &[
    "long haul",
    "long-haul",
    "express",
    "interstate",
    "cross-country",
];
const SHORT_HAUL_KEYWORDS: &[&str] = &[
    "short haul",
    "short-haul",
    "local",
    "intracity",
    "intra-city",
    "shuttle",
    "last mile",
    "last-mile",
];
const LTL_KEYWORDS: &[&str] = &["ltl", "ptl", "part load", "part-load", "partial"];
const FTL_KEYWORDS: &[&str] = &["ftl", "full truck", "full-truck", "trailer", "container"];

/// Keyword and city-list classifier.
#[derive(Debug, Clone)]
pub struct KeywordLaneClassifier {
    long_haul_km: u32,
}

impl KeywordLaneClassifier {
    pub fn new(long_haul_km: u32) -> Self {
        Self { long_haul_km }
    }

    fn regions_mentioned(lower: &str) -> Vec<Region> {
        CITY_REGIONS
            .iter()
            .filter(|(_, cities)| cities.iter().any(|city| lower.contains(city)))
            .map(|(region, _)| *region)
            .collect()
    }

    fn route_length(&self, lower: &str, region_count: usize) -> RouteLength {
        if let Some(km) = parse_km(lower) {
            return if km >= self.long_haul_km {
                RouteLength::LongHaul
            } else {
                RouteLength::ShortHaul
            };
        }
        if contains_any(lower, LONG_HAUL_KEYWORDS) {
            RouteLength::LongHaul
        } else if contains_any(lower, SHORT_HAUL_KEYWORDS) {
            RouteLength::ShortHaul
        } else if region_count >= 2 {
            RouteLength::LongHaul
        } else {
            RouteLength::ShortHaul
        }
    }
}

impl Default for KeywordLaneClassifier {
    fn default() -> Self {
        Self::new(500)
    }
}

impl LaneClassifier for KeywordLaneClassifier {
    fn classify_lane(&self, lane_name: &str) -> LaneTraits {
        let lower = lane_name.to_lowercase();
        let regions = Self::regions_mentioned(&lower);

        let region = match regions.as_slice() {
            [single] => *single,
            _ => Region::PanIndia,
        };

        // LTL first: "ptl"/"ltl" names often also mention a trailer size.
        let vehicle = if contains_any(&lower, LTL_KEYWORDS) {
            VehicleType::Ltl
        } else if contains_any(&lower, FTL_KEYWORDS) {
            VehicleType::Ftl
        } else {
            VehicleType::Mixed
        };

        LaneTraits {
            region,
            route_length: self.route_length(&lower, regions.len()),
            vehicle,
        }
    }
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| text.contains(n))
}

/// First `<digits> km` distance in the text. Thousands separators are allowed.
fn parse_km(text: &str) -> Option<u32> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if !bytes[i].is_ascii_digit() {
            i += 1;
            continue;
        }
        let start = i;
        while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b',') {
            i += 1;
        }
        if text[i..].trim_start().starts_with("km") {
            let digits: String = text[start..i].chars().filter(char::is_ascii_digit).collect();
            if let Ok(km) = digits.parse() {
                return Some(km);
            }
        }
    }
    None
}
