use rand::Rng;
use serde::{Deserialize, Serialize};

/// A user-selectable mood used to bias genre selection
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Excited,
    Relaxed,
}

/// Genre identifiers and descriptive keywords associated with one mood
///
/// The mapping is static for the lifetime of the process; genre identifiers
/// follow the catalog's numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodProfile {
    pub genres: &'static [u32],
    pub keywords: &'static str,
}

impl Mood {
    pub const ALL: [Mood; 4] = [Mood::Happy, Mood::Sad, Mood::Excited, Mood::Relaxed];

    /// Parses the lowercase wire form ("happy", "sad", "excited", "relaxed")
    pub fn parse(value: &str) -> Option<Mood> {
        match value {
            "happy" => Some(Mood::Happy),
            "sad" => Some(Mood::Sad),
            "excited" => Some(Mood::Excited),
            "relaxed" => Some(Mood::Relaxed),
            _ => None,
        }
    }

    /// Picks one of the supported moods uniformly at random
    pub fn random() -> Mood {
        Mood::ALL[rand::thread_rng().gen_range(0..Mood::ALL.len())]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Excited => "excited",
            Mood::Relaxed => "relaxed",
        }
    }

    /// The genre set and keywords this mood maps to
    pub fn profile(&self) -> MoodProfile {
        match self {
            Mood::Happy => MoodProfile {
                // Comedy, Family, Animation
                genres: &[35, 10751, 16],
                keywords: "happy,fun,uplifting,comedy,joy",
            },
            Mood::Sad => MoodProfile {
                // Drama, Romance
                genres: &[18, 10749],
                keywords: "sad,emotional,tearjerker,melancholy",
            },
            Mood::Excited => MoodProfile {
                // Action, Adventure, Science Fiction
                genres: &[28, 12, 878],
                keywords: "action,adventure,thrilling,exciting",
            },
            Mood::Relaxed => MoodProfile {
                // Documentary, History, TV Movie
                genres: &[99, 36, 10770],
                keywords: "relax,calm,soothing,peaceful",
            },
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
