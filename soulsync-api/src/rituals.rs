//! Ritual catalogue and recommendation
//!
//! Each ritual targets one chakra. Recommendations surface rituals for the
//! user's weakest chakras, so a user with no stored profile (all neutral)
//! gets a deterministic default set.

use serde::Serialize;
use soulsync_common::{ChakraKey, ChakraProfile};

#[derive(Debug, Clone, Serialize)]
pub struct Ritual {
    pub id: &'static str,
    pub name: &'static str,
    pub chakra: ChakraKey,
    pub description: &'static str,
    pub duration_minutes: u32,
}

pub const RITUALS: &[Ritual] = &[
    Ritual {
        id: "grounding-walk",
        name: "Grounding Walk",
        chakra: ChakraKey::Root,
        description: "A slow, barefoot-if-possible walk with attention on each footfall.",
        duration_minutes: 15,
    },
    Ritual {
        id: "body-scan",
        name: "Body Scan",
        chakra: ChakraKey::Root,
        description: "Lying body scan from toes to crown, noticing points of contact.",
        duration_minutes: 10,
    },
    Ritual {
        id: "free-sketch",
        name: "Free Sketch",
        chakra: ChakraKey::Sacral,
        description: "Ten minutes of drawing with no goal and no eraser.",
        duration_minutes: 10,
    },
    Ritual {
        id: "water-ritual",
        name: "Water Ritual",
        chakra: ChakraKey::Sacral,
        description: "A mindful shower or bath, attention on sensation and flow.",
        duration_minutes: 15,
    },
    Ritual {
        id: "power-breath",
        name: "Power Breath",
        chakra: ChakraKey::SolarPlexus,
        description: "Three rounds of energizing breath followed by one clear intention.",
        duration_minutes: 5,
    },
    Ritual {
        id: "one-brave-thing",
        name: "One Brave Thing",
        chakra: ChakraKey::SolarPlexus,
        description: "Name one small avoided task and do it immediately.",
        duration_minutes: 20,
    },
    Ritual {
        id: "gratitude-letter",
        name: "Gratitude Letter",
        chakra: ChakraKey::Heart,
        description: "Write a short unsent letter of thanks to someone specific.",
        duration_minutes: 15,
    },
    Ritual {
        id: "loving-kindness",
        name: "Loving-Kindness Meditation",
        chakra: ChakraKey::Heart,
        description: "Guided metta practice extending warmth outward in widening circles.",
        duration_minutes: 12,
    },
    Ritual {
        id: "morning-pages",
        name: "Morning Pages",
        chakra: ChakraKey::Throat,
        description: "Three stream-of-consciousness pages written before anything else.",
        duration_minutes: 20,
    },
    Ritual {
        id: "honest-sentence",
        name: "One Honest Sentence",
        chakra: ChakraKey::Throat,
        description: "Say aloud one true thing you have been holding back, even alone.",
        duration_minutes: 5,
    },
    Ritual {
        id: "candle-gaze",
        name: "Candle Gazing",
        chakra: ChakraKey::ThirdEye,
        description: "Soft-focus gazing at a candle flame, letting thoughts settle.",
        duration_minutes: 10,
    },
    Ritual {
        id: "dream-log",
        name: "Dream Log",
        chakra: ChakraKey::ThirdEye,
        description: "Record last night's dream fragments before they fade.",
        duration_minutes: 10,
    },
    Ritual {
        id: "silent-sit",
        name: "Silent Sitting",
        chakra: ChakraKey::Crown,
        description: "Unguided silent meditation, no technique, just presence.",
        duration_minutes: 15,
    },
    Ritual {
        id: "sky-watch",
        name: "Sky Watching",
        chakra: ChakraKey::Crown,
        description: "Lie back and watch the sky move until the mind widens with it.",
        duration_minutes: 15,
    },
];

/// Look up a ritual by id
pub fn find_ritual(id: &str) -> Option<&'static Ritual> {
    RITUALS.iter().find(|r| r.id == id)
}

/// Rituals for the `chakra_count` weakest chakras of a profile.
///
/// Deterministic: ties in the profile resolve in canonical chakra order and
/// rituals keep their catalogue order within each chakra.
pub fn recommendations(profile: &ChakraProfile, chakra_count: usize) -> Vec<&'static Ritual> {
    let weakest = profile.weakest(chakra_count);
    weakest
        .iter()
        .flat_map(|key| RITUALS.iter().filter(move |r| r.chakra == *key))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ritual_ids_unique() {
        let mut ids: Vec<&str> = RITUALS.iter().map(|r| r.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), RITUALS.len());
    }

    #[test]
    fn test_every_chakra_has_a_ritual() {
        for key in ChakraKey::ALL {
            assert!(
                RITUALS.iter().any(|r| r.chakra == key),
                "no ritual targets {}",
                key
            );
        }
    }

    #[test]
    fn test_recommendations_follow_weakest_chakras() {
        let mut profile = ChakraProfile::neutral();
        profile.set(ChakraKey::Throat, 2.0);

        let recs = recommendations(&profile, 1);
        assert!(!recs.is_empty());
        assert!(recs.iter().all(|r| r.chakra == ChakraKey::Throat));
    }

    #[test]
    fn test_neutral_profile_recommendations_are_deterministic() {
        let profile = ChakraProfile::neutral();
        let first: Vec<&str> = recommendations(&profile, 3).iter().map(|r| r.id).collect();
        let second: Vec<&str> = recommendations(&profile, 3).iter().map(|r| r.id).collect();
        assert_eq!(first, second);
        // canonical tie-break: root rituals lead
        assert_eq!(first[0], "grounding-walk");
    }
}
