use serde::{Deserialize, Serialize};

/// Closed set of emotional-state labels the model must choose from.
///
/// Serialized with the capitalized label (`"Happy"`), which is also the exact
/// string declared in the response schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
pub enum Mood {
    Joyful,
    Happy,
    Calm,
    Neutral,
    Anxious,
    Stressed,
    Sad,
    Angry,
    Frustrated,
}

impl Mood {
    pub const ALL: [Mood; 9] = [
        Mood::Joyful,
        Mood::Happy,
        Mood::Calm,
        Mood::Neutral,
        Mood::Anxious,
        Mood::Stressed,
        Mood::Sad,
        Mood::Angry,
        Mood::Frustrated,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Joyful => "Joyful",
            Self::Happy => "Happy",
            Self::Calm => "Calm",
            Self::Neutral => "Neutral",
            Self::Anxious => "Anxious",
            Self::Stressed => "Stressed",
            Self::Sad => "Sad",
            Self::Angry => "Angry",
            Self::Frustrated => "Frustrated",
        }
    }

    /// Coarse valence used only to plot the trend chart. Higher is more
    /// positive; several moods share a score.
    pub fn score(&self) -> u8 {
        match self {
            Self::Joyful => 5,
            Self::Happy => 4,
            Self::Calm | Self::Neutral => 3,
            Self::Anxious | Self::Stressed => 2,
            Self::Sad | Self::Angry | Self::Frustrated => 1,
        }
    }

    pub fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(Mood::label).collect()
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|mood| mood.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown mood: {s}"))
    }
}
