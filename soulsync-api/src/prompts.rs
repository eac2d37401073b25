//! Journal prompt pool

use rand::seq::SliceRandom;

pub const PROMPTS: &[&str] = &[
    "What is one thing your body is telling you right now?",
    "Describe a moment today when you felt most like yourself.",
    "What are you holding onto that you could set down?",
    "Write about something small that brought you unexpected joy.",
    "Where in your life are you waiting for permission you could give yourself?",
    "What would you say to a friend feeling the way you feel right now?",
    "What truth have you been avoiding saying out loud?",
    "Describe the last time you felt completely at ease.",
    "What does rest look like for you this week?",
    "If today had a color, what would it be, and why?",
    "What pattern keeps repeating in your life lately?",
    "Write a thank-you note to a part of yourself that worked hard today.",
];

/// Pick one prompt at random
pub fn random_prompt() -> &'static str {
    PROMPTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(PROMPTS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_prompt_is_from_pool() {
        for _ in 0..20 {
            assert!(PROMPTS.contains(&random_prompt()));
        }
    }
}
