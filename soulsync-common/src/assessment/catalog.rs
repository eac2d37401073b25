//! Static question catalogues for the two assessment modes
//!
//! Two catalogues are defined:
//! - **Basic**: 35 questions on a 1-10 slider, five per chakra, presented as
//!   a single flat step. Reverse-worded items alternate within each chakra
//!   to counteract response bias.
//! - **Enhanced**: five thematic steps of 1-5 categorical questions (the
//!   ordinal position of the chosen option is the raw value), including
//!   general-wellbeing questions that contribute to every chakra.
//!
//! Both catalogues are deterministic: the same mode always yields the same
//! questions in the same order. `validate_catalog` is the one-time self-check
//! services run at startup so that a catalogue authoring defect never
//! surfaces as a runtime scoring failure.

use crate::assessment::scoring::ScoringError;
use crate::chakra::ChakraKey;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Answer-value convention for a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnswerScale {
    /// Raw answer is an integer 1-10, used directly as the chakra signal
    LinearTen,
    /// Raw answer is an integer 1-5 (ordinal position of a labeled option),
    /// doubled by the engine to reach the common 1-10 output range
    CategoricalFive,
}

impl AnswerScale {
    /// Lowest valid raw value on any scale
    pub const MIN: i64 = 1;

    /// Highest valid raw value for this scale
    pub fn max_value(&self) -> i64 {
        match self {
            AnswerScale::LinearTen => 10,
            AnswerScale::CategoricalFive => 5,
        }
    }

    /// True when `value` lies within [1, max] for this scale
    pub fn contains(&self, value: i64) -> bool {
        (Self::MIN..=self.max_value()).contains(&value)
    }
}

/// Which chakra accumulator(s) a question feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChakraTarget {
    /// Contributes only to the named chakra
    Single(ChakraKey),
    /// Contributes identically to all seven chakras
    /// (general-wellbeing questions)
    All,
}

impl ChakraTarget {
    /// Wire string: the chakra's camelCase key, or "all"
    pub fn as_str(&self) -> &'static str {
        match self {
            ChakraTarget::Single(key) => key.as_str(),
            ChakraTarget::All => "all",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("all") {
            Some(ChakraTarget::All)
        } else {
            ChakraKey::from_str(s).map(ChakraTarget::Single)
        }
    }
}

impl Serialize for ChakraTarget {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ChakraTarget {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ChakraTarget::from_str(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown chakra target: {}", s)))
    }
}

/// One assessment question
#[derive(Debug, Clone, Serialize)]
pub struct Question {
    /// Stable identifier, unique within a catalogue
    pub id: &'static str,
    /// Statement or question text shown to the user
    pub text: &'static str,
    /// Chakra accumulator(s) the answer feeds
    #[serde(rename = "chakra")]
    pub target: ChakraTarget,
    /// Answer-value convention
    #[serde(rename = "answerScale")]
    pub scale: AnswerScale,
    /// Reverse-worded item: the engine inverts the raw value before
    /// accumulation (inverted = max + 1 - raw)
    #[serde(rename = "inverseScoring")]
    pub inverse: bool,
    /// Labeled options for categorical questions, ordinal position 1-5.
    /// Empty for slider questions.
    pub options: &'static [&'static str],
}

/// A thematic grouping of questions presented together
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentStep {
    pub title: &'static str,
    pub questions: Vec<Question>,
}

/// Assessment mode selecting one of the two catalogues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentMode {
    Basic,
    Enhanced,
}

impl AssessmentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssessmentMode::Basic => "basic",
            AssessmentMode::Enhanced => "enhanced",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "basic" => Some(AssessmentMode::Basic),
            "enhanced" => Some(AssessmentMode::Enhanced),
            _ => None,
        }
    }
}

impl std::fmt::Display for AssessmentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

const fn slider(id: &'static str, chakra: ChakraKey, text: &'static str, inverse: bool) -> Question {
    Question {
        id,
        text,
        target: ChakraTarget::Single(chakra),
        scale: AnswerScale::LinearTen,
        inverse,
        options: &[],
    }
}

const fn choice(
    id: &'static str,
    target: ChakraTarget,
    text: &'static str,
    inverse: bool,
    options: &'static [&'static str],
) -> Question {
    Question {
        id,
        text,
        target,
        scale: AnswerScale::CategoricalFive,
        inverse,
        options,
    }
}

/// Frequency options shared by most enhanced-mode questions
const FREQUENCY: &[&str] = &["Never", "Rarely", "Sometimes", "Often", "Almost always"];

/// Agreement options for statement-style enhanced questions
const AGREEMENT: &[&str] = &[
    "Strongly disagree",
    "Disagree",
    "Neutral",
    "Agree",
    "Strongly agree",
];

/// Basic catalogue: one flat step of 35 slider questions, five per chakra.
///
/// Within each chakra the second and fourth items are reverse-worded.
static BASIC_STEPS: Lazy<Vec<AssessmentStep>> = Lazy::new(|| {
    use ChakraKey::*;
    vec![AssessmentStep {
        title: "Chakra Self-Assessment",
        questions: vec![
            slider("root-1", Root, "I feel grounded and secure in my daily life.", false),
            slider("root-2", Root, "I often worry that my basic needs will not be met.", true),
            slider("root-3", Root, "My body feels like a safe and stable home.", false),
            slider("root-4", Root, "Unexpected change leaves me feeling shaken for a long time.", true),
            slider("root-5", Root, "I trust that I can provide for myself.", false),
            slider("sacral-1", Sacral, "I allow myself to enjoy pleasure without guilt.", false),
            slider("sacral-2", Sacral, "My creativity feels blocked or out of reach.", true),
            slider("sacral-3", Sacral, "I experience my emotions as flowing and changeable.", false),
            slider("sacral-4", Sacral, "I find it hard to let myself play or be spontaneous.", true),
            slider("sacral-5", Sacral, "I feel comfortable with closeness and intimacy.", false),
            slider("solar-1", SolarPlexus, "I follow through on what I set out to do.", false),
            slider("solar-2", SolarPlexus, "I abandon my own plans as soon as someone pushes back.", true),
            slider("solar-3", SolarPlexus, "I feel confident making decisions for myself.", false),
            slider("solar-4", SolarPlexus, "Criticism easily makes me doubt my own worth.", true),
            slider("solar-5", SolarPlexus, "I have a healthy sense of my own personal power.", false),
            slider("heart-1", Heart, "I give and receive love with ease.", false),
            slider("heart-2", Heart, "I keep people at a distance to avoid being hurt.", true),
            slider("heart-3", Heart, "I feel compassion for others, even when we disagree.", false),
            slider("heart-4", Heart, "Old resentments still weigh on my heart.", true),
            slider("heart-5", Heart, "I treat myself with the same kindness I offer others.", false),
            slider("throat-1", Throat, "I say what I mean, even in difficult conversations.", false),
            slider("throat-2", Throat, "I swallow my opinions to keep the peace.", true),
            slider("throat-3", Throat, "Others would describe me as a good listener.", false),
            slider("throat-4", Throat, "I often feel unheard or misunderstood.", true),
            slider("throat-5", Throat, "My words and my actions line up with each other.", false),
            slider("third-eye-1", ThirdEye, "I trust my intuition when making choices.", false),
            slider("third-eye-2", ThirdEye, "I dismiss my inner hunches as nonsense.", true),
            slider("third-eye-3", ThirdEye, "I can step back and see the bigger picture of my life.", false),
            slider("third-eye-4", ThirdEye, "My thoughts feel foggy or scattered most days.", true),
            slider("third-eye-5", ThirdEye, "I notice meaningful patterns in my experiences.", false),
            slider("crown-1", Crown, "I feel connected to something larger than myself.", false),
            slider("crown-2", Crown, "My life feels empty of meaning or purpose.", true),
            slider("crown-3", Crown, "Moments of quiet bring me a sense of peace.", false),
            slider("crown-4", Crown, "I feel cut off from any sense of inspiration.", true),
            slider("crown-5", Crown, "Gratitude comes easily to me.", false),
        ],
    }]
});

/// Enhanced catalogue: five thematic steps of categorical questions.
static ENHANCED_STEPS: Lazy<Vec<AssessmentStep>> = Lazy::new(|| {
    use ChakraKey::*;
    use ChakraTarget::{All, Single};
    vec![
        AssessmentStep {
            title: "Foundation",
            questions: vec![
                choice(
                    "eh-root-1",
                    Single(Root),
                    "How often do you feel physically safe and settled in your environment?",
                    false,
                    FREQUENCY,
                ),
                choice(
                    "eh-root-2",
                    Single(Root),
                    "When life gets turbulent, I can find solid ground again quickly.",
                    false,
                    AGREEMENT,
                ),
            ],
        },
        AssessmentStep {
            title: "Creativity",
            questions: vec![
                choice(
                    "eh-sacral-1",
                    Single(Sacral),
                    "How often do you make room for creative expression in your week?",
                    false,
                    FREQUENCY,
                ),
                choice(
                    "eh-sacral-2",
                    Single(Sacral),
                    "I let myself feel my emotions fully rather than pushing them away.",
                    false,
                    AGREEMENT,
                ),
            ],
        },
        AssessmentStep {
            title: "Power & Heart",
            questions: vec![
                choice(
                    "eh-solar-1",
                    Single(SolarPlexus),
                    "How often do you act on your own goals rather than other people's expectations?",
                    false,
                    FREQUENCY,
                ),
                choice(
                    "eh-solar-2",
                    Single(SolarPlexus),
                    "I trust my ability to handle whatever today brings.",
                    false,
                    AGREEMENT,
                ),
                choice(
                    "eh-heart-1",
                    Single(Heart),
                    "How often do you feel genuine warmth toward the people around you?",
                    false,
                    FREQUENCY,
                ),
                choice(
                    "eh-heart-2",
                    Single(Heart),
                    "I forgive myself for past mistakes.",
                    false,
                    AGREEMENT,
                ),
            ],
        },
        AssessmentStep {
            title: "Expression & Insight",
            questions: vec![
                choice(
                    "eh-throat-1",
                    Single(Throat),
                    "How often do you express your honest view, even when it is unpopular?",
                    false,
                    FREQUENCY,
                ),
                choice(
                    "eh-throat-2",
                    Single(Throat),
                    "How often do you hold back from saying what you really think?",
                    true,
                    FREQUENCY,
                ),
                choice(
                    "eh-third-eye-1",
                    Single(ThirdEye),
                    "How often do you pause to reflect before reacting?",
                    false,
                    FREQUENCY,
                ),
                choice(
                    "eh-third-eye-2",
                    Single(ThirdEye),
                    "My inner sense of direction feels clear.",
                    false,
                    AGREEMENT,
                ),
            ],
        },
        AssessmentStep {
            title: "Spirit & Wholeness",
            questions: vec![
                choice(
                    "eh-crown-1",
                    Single(Crown),
                    "How often do you experience a sense of connection to something beyond yourself?",
                    false,
                    FREQUENCY,
                ),
                choice(
                    "eh-crown-2",
                    Single(Crown),
                    "My daily life feels aligned with a larger purpose.",
                    false,
                    AGREEMENT,
                ),
                choice(
                    "eh-all-1",
                    All,
                    "Overall, how often do you wake up with energy for the day ahead?",
                    false,
                    FREQUENCY,
                ),
                choice(
                    "eh-all-2",
                    All,
                    "Taken as a whole, my life feels balanced right now.",
                    false,
                    AGREEMENT,
                ),
            ],
        },
    ]
});

/// Ordered steps for a mode. Pure and deterministic.
pub fn steps_for(mode: AssessmentMode) -> &'static [AssessmentStep] {
    match mode {
        AssessmentMode::Basic => &BASIC_STEPS,
        AssessmentMode::Enhanced => &ENHANCED_STEPS,
    }
}

/// Ordered flat list of questions for a mode. Pure and deterministic.
pub fn questions_for(mode: AssessmentMode) -> Vec<&'static Question> {
    steps_for(mode)
        .iter()
        .flat_map(|s| s.questions.iter())
        .collect()
}

/// Look up a question by id within a mode's catalogue
pub fn find_question(mode: AssessmentMode, id: &str) -> Option<&'static Question> {
    questions_for(mode).into_iter().find(|q| q.id == id)
}

/// One-time catalogue self-check, run at service startup.
///
/// Verifies the invariants the scoring engine assumes:
/// - question ids are unique within the catalogue
/// - categorical questions carry 2-5 labeled options; slider questions none
/// - option lists match the categorical raw-value range
/// - no chakra accumulator receives answers on mixed scales
///   (an `All`-target question counts toward every chakra)
pub fn validate_catalog(mode: AssessmentMode) -> Result<(), ScoringError> {
    let questions = questions_for(mode);

    let mut ids = HashSet::new();
    let mut scales: HashMap<ChakraKey, AnswerScale> = HashMap::new();

    for q in &questions {
        if !ids.insert(q.id) {
            return Err(ScoringError::Catalog(format!(
                "duplicate question id '{}' in {} catalogue",
                q.id, mode
            )));
        }

        match q.scale {
            AnswerScale::LinearTen => {
                if !q.options.is_empty() {
                    return Err(ScoringError::Catalog(format!(
                        "slider question '{}' must not declare options",
                        q.id
                    )));
                }
            }
            AnswerScale::CategoricalFive => {
                if q.options.len() < 2 || q.options.len() as i64 > q.scale.max_value() {
                    return Err(ScoringError::Catalog(format!(
                        "categorical question '{}' has {} options (expected 2-{})",
                        q.id,
                        q.options.len(),
                        q.scale.max_value()
                    )));
                }
            }
        }

        let touched: Vec<ChakraKey> = match q.target {
            ChakraTarget::Single(key) => vec![key],
            ChakraTarget::All => ChakraKey::ALL.to_vec(),
        };
        for key in touched {
            match scales.get(&key) {
                None => {
                    scales.insert(key, q.scale);
                }
                Some(existing) if *existing != q.scale => {
                    return Err(ScoringError::InconsistentScale { chakra: key });
                }
                Some(_) => {}
            }
        }
    }

    Ok(())
}
