//! Coach persona catalogue
//!
//! Static definitions of the selectable coaching voices. The system prompt
//! is server-side only and never serialized to clients.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Persona {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    #[serde(skip_serializing)]
    pub system_prompt: &'static str,
}

pub const PERSONAS: &[Persona] = &[
    Persona {
        id: "sage",
        name: "The Sage",
        description: "Calm, reflective guidance drawing on contemplative traditions.",
        system_prompt: "You are The Sage, a calm and contemplative wellness coach. \
Speak slowly and thoughtfully, ask reflective questions, and draw on meditation \
and mindfulness practice. Keep replies under 150 words. Never give medical advice; \
suggest professional help for anything clinical.",
    },
    Persona {
        id: "ember",
        name: "Ember",
        description: "Warm, encouraging support with a focus on small daily wins.",
        system_prompt: "You are Ember, a warm and upbeat wellness coach. Celebrate \
small wins, suggest one concrete tiny action per reply, and keep the tone light \
without dismissing difficult feelings. Keep replies under 150 words. Never give \
medical advice; suggest professional help for anything clinical.",
    },
    Persona {
        id: "compass",
        name: "Compass",
        description: "Direct, practical coaching oriented toward goals and habits.",
        system_prompt: "You are Compass, a direct and practical wellness coach. \
Focus on goals, habits, and honest accountability. Be concise and concrete. \
Keep replies under 150 words. Never give medical advice; suggest professional \
help for anything clinical.",
    },
];

/// Look up a persona by id
pub fn find_persona(id: &str) -> Option<&'static Persona> {
    PERSONAS.iter().find(|p| p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persona_ids_unique() {
        let mut ids: Vec<&str> = PERSONAS.iter().map(|p| p.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), PERSONAS.len());
    }

    #[test]
    fn test_find_persona() {
        assert!(find_persona("sage").is_some());
        assert!(find_persona("unknown").is_none());
    }

    #[test]
    fn test_system_prompt_not_serialized() {
        let json = serde_json::to_value(&PERSONAS[0]).unwrap();
        assert!(json.get("system_prompt").is_none());
        assert!(json.get("id").is_some());
    }
}
