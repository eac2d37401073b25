//! Chakra domain types
//!
//! Defines the seven energy centers used as scoring dimensions and the
//! seven-dimensional intensity profile produced by the scoring engine.
//!
//! Every profile carries exactly these seven keys, always in canonical
//! order: root, sacral, solarPlexus, heart, throat, thirdEye, crown.

use serde::{Deserialize, Serialize};

/// The seven energy centers, in canonical order
///
/// Serialized in camelCase to match the wire format consumed by the
/// presentation layer (`solarPlexus`, `thirdEye`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChakraKey {
    Root,
    Sacral,
    SolarPlexus,
    Heart,
    Throat,
    ThirdEye,
    Crown,
}

impl ChakraKey {
    /// All seven keys in canonical order
    ///
    /// Useful for iteration, UI ordering, and validation.
    pub const ALL: [ChakraKey; 7] = [
        ChakraKey::Root,
        ChakraKey::Sacral,
        ChakraKey::SolarPlexus,
        ChakraKey::Heart,
        ChakraKey::Throat,
        ChakraKey::ThirdEye,
        ChakraKey::Crown,
    ];

    /// Position in canonical order (0-6)
    pub fn index(&self) -> usize {
        match self {
            ChakraKey::Root => 0,
            ChakraKey::Sacral => 1,
            ChakraKey::SolarPlexus => 2,
            ChakraKey::Heart => 3,
            ChakraKey::Throat => 4,
            ChakraKey::ThirdEye => 5,
            ChakraKey::Crown => 6,
        }
    }

    /// Canonical wire/database string (camelCase)
    pub fn as_str(&self) -> &'static str {
        match self {
            ChakraKey::Root => "root",
            ChakraKey::Sacral => "sacral",
            ChakraKey::SolarPlexus => "solarPlexus",
            ChakraKey::Heart => "heart",
            ChakraKey::Throat => "throat",
            ChakraKey::ThirdEye => "thirdEye",
            ChakraKey::Crown => "crown",
        }
    }

    /// Parse a key from its wire string
    ///
    /// Accepts the canonical camelCase form plus snake_case and kebab-case
    /// aliases ('solar_plexus', 'third-eye', ...). Case-insensitive.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "root" => Some(ChakraKey::Root),
            "sacral" => Some(ChakraKey::Sacral),
            "solarplexus" | "solar_plexus" | "solar-plexus" => Some(ChakraKey::SolarPlexus),
            "heart" => Some(ChakraKey::Heart),
            "throat" => Some(ChakraKey::Throat),
            "thirdeye" | "third_eye" | "third-eye" => Some(ChakraKey::ThirdEye),
            "crown" => Some(ChakraKey::Crown),
            _ => None,
        }
    }

    /// Human-readable display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ChakraKey::Root => "Root",
            ChakraKey::Sacral => "Sacral",
            ChakraKey::SolarPlexus => "Solar Plexus",
            ChakraKey::Heart => "Heart",
            ChakraKey::Throat => "Throat",
            ChakraKey::ThirdEye => "Third Eye",
            ChakraKey::Crown => "Crown",
        }
    }
}

impl std::fmt::Display for ChakraKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Neutral midpoint intensity assigned to chakras with no answered questions
pub const NEUTRAL_INTENSITY: f64 = 5.0;

/// Seven-dimensional energy profile
///
/// Produced only by the scoring engine. Each intensity lies in [1.0, 10.0].
/// Recomputing with a changed answer set yields a new profile; a stored
/// profile is replaced wholesale on re-assessment, never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChakraProfile {
    pub root: f64,
    pub sacral: f64,
    pub solar_plexus: f64,
    pub heart: f64,
    pub throat: f64,
    pub third_eye: f64,
    pub crown: f64,
}

impl ChakraProfile {
    /// Profile with every chakra at the neutral midpoint (5.0)
    pub fn neutral() -> Self {
        Self {
            root: NEUTRAL_INTENSITY,
            sacral: NEUTRAL_INTENSITY,
            solar_plexus: NEUTRAL_INTENSITY,
            heart: NEUTRAL_INTENSITY,
            throat: NEUTRAL_INTENSITY,
            third_eye: NEUTRAL_INTENSITY,
            crown: NEUTRAL_INTENSITY,
        }
    }

    /// Intensity for a single chakra
    pub fn get(&self, key: ChakraKey) -> f64 {
        match key {
            ChakraKey::Root => self.root,
            ChakraKey::Sacral => self.sacral,
            ChakraKey::SolarPlexus => self.solar_plexus,
            ChakraKey::Heart => self.heart,
            ChakraKey::Throat => self.throat,
            ChakraKey::ThirdEye => self.third_eye,
            ChakraKey::Crown => self.crown,
        }
    }

    /// Set the intensity for a single chakra
    pub fn set(&mut self, key: ChakraKey, value: f64) {
        match key {
            ChakraKey::Root => self.root = value,
            ChakraKey::Sacral => self.sacral = value,
            ChakraKey::SolarPlexus => self.solar_plexus = value,
            ChakraKey::Heart => self.heart = value,
            ChakraKey::Throat => self.throat = value,
            ChakraKey::ThirdEye => self.third_eye = value,
            ChakraKey::Crown => self.crown = value,
        }
    }

    /// Iterate (key, intensity) pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (ChakraKey, f64)> + '_ {
        ChakraKey::ALL.iter().map(move |k| (*k, self.get(*k)))
    }

    /// The `n` lowest-intensity chakras, weakest first
    ///
    /// Ties resolve in canonical order, so the result is deterministic.
    /// Used by the ritual recommendation endpoint.
    pub fn weakest(&self, n: usize) -> Vec<ChakraKey> {
        let mut keys: Vec<ChakraKey> = ChakraKey::ALL.to_vec();
        keys.sort_by(|a, b| {
            self.get(*a)
                .partial_cmp(&self.get(*b))
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.index().cmp(&b.index()))
        });
        keys.truncate(n);
        keys
    }

    /// True when every intensity lies in [1.0, 10.0]
    pub fn in_range(&self) -> bool {
        self.iter().all(|(_, v)| (1.0..=10.0).contains(&v))
    }
}

impl Default for ChakraProfile {
    fn default() -> Self {
        Self::neutral()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order() {
        let names: Vec<&str> = ChakraKey::ALL.iter().map(|k| k.as_str()).collect();
        assert_eq!(
            names,
            vec!["root", "sacral", "solarPlexus", "heart", "throat", "thirdEye", "crown"]
        );
    }

    #[test]
    fn test_index_matches_order() {
        for (i, key) in ChakraKey::ALL.iter().enumerate() {
            assert_eq!(key.index(), i);
        }
    }

    #[test]
    fn test_round_trip() {
        for key in ChakraKey::ALL {
            let parsed = ChakraKey::from_str(key.as_str()).unwrap();
            assert_eq!(key, parsed, "Round-trip failed for {:?}", key);
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(ChakraKey::from_str("solar_plexus"), Some(ChakraKey::SolarPlexus));
        assert_eq!(ChakraKey::from_str("solar-plexus"), Some(ChakraKey::SolarPlexus));
        assert_eq!(ChakraKey::from_str("third_eye"), Some(ChakraKey::ThirdEye));
        assert_eq!(ChakraKey::from_str("THIRDEYE"), Some(ChakraKey::ThirdEye));
        assert_eq!(ChakraKey::from_str("navel"), None);
        assert_eq!(ChakraKey::from_str(""), None);
    }

    #[test]
    fn test_serde_camel_case() {
        let json = serde_json::to_string(&ChakraKey::SolarPlexus).unwrap();
        assert_eq!(json, "\"solarPlexus\"");
        let json = serde_json::to_string(&ChakraKey::ThirdEye).unwrap();
        assert_eq!(json, "\"thirdEye\"");
    }

    #[test]
    fn test_neutral_profile() {
        let profile = ChakraProfile::neutral();
        for (_, v) in profile.iter() {
            assert_eq!(v, 5.0);
        }
        assert!(profile.in_range());
    }

    #[test]
    fn test_profile_serializes_all_seven_keys() {
        let profile = ChakraProfile::neutral();
        let value = serde_json::to_value(&profile).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 7);
        for key in ChakraKey::ALL {
            assert!(obj.contains_key(key.as_str()), "missing {}", key.as_str());
        }
    }

    #[test]
    fn test_weakest_orders_by_intensity() {
        let mut profile = ChakraProfile::neutral();
        profile.set(ChakraKey::Heart, 2.0);
        profile.set(ChakraKey::Crown, 3.5);
        let weakest = profile.weakest(3);
        assert_eq!(weakest[0], ChakraKey::Heart);
        assert_eq!(weakest[1], ChakraKey::Crown);
        // remaining six are tied at 5.0; canonical order breaks the tie
        assert_eq!(weakest[2], ChakraKey::Root);
    }

    #[test]
    fn test_weakest_ties_are_deterministic() {
        let profile = ChakraProfile::neutral();
        assert_eq!(
            profile.weakest(3),
            vec![ChakraKey::Root, ChakraKey::Sacral, ChakraKey::SolarPlexus]
        );
    }
}
