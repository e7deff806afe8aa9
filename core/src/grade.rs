//! Activity grade tiers.
//!
//! Thresholds are inclusive upper bounds, checked in ascending order,
//! first match wins. Anything above the last threshold is `God`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    /// Missing, negative, or non-finite activity.
    Unavailable,
    Beginner,
    Rookie,
    Learner,
    Skilled,
    Pro,
    Expert,
    Elite,
    Master,
    WorldClass,
    God,
}

/// (inclusive upper bound, grade), ascending.
pub const GRADE_TABLE: [(f64, Grade); 9] = [
    (10.0,   Grade::Beginner),
    (20.0,   Grade::Rookie),
    (35.0,   Grade::Learner),
    (60.0,   Grade::Skilled),
    (100.0,  Grade::Pro),
    (160.0,  Grade::Expert),
    (260.0,  Grade::Elite),
    (500.0,  Grade::Master),
    (1000.0, Grade::WorldClass),
];

impl Grade {
    pub fn from_activity(v: Option<f64>) -> Self {
        let v = match v {
            Some(x) if x.is_finite() && x >= 0.0 => x,
            _ => return Grade::Unavailable,
        };
        GRADE_TABLE
            .iter()
            .find(|(upper, _)| v <= *upper)
            .map(|(_, grade)| *grade)
            .unwrap_or(Grade::God)
    }

    pub fn name(self) -> &'static str {
        match self {
            Grade::Unavailable => "-",
            Grade::Beginner    => "Beginner",
            Grade::Rookie      => "Rookie",
            Grade::Learner     => "Learner",
            Grade::Skilled     => "Skilled",
            Grade::Pro         => "Pro",
            Grade::Expert      => "Expert",
            Grade::Elite       => "Elite",
            Grade::Master      => "Master",
            Grade::WorldClass  => "World Class",
            Grade::God         => "God",
        }
    }

    /// Display label shown next to the activity figure.
    pub fn label(self) -> &'static str {
        match self {
            Grade::Unavailable => "-",
            Grade::Beginner    => "Beginner 🐣",
            Grade::Rookie      => "Rookie 🌱",
            Grade::Learner     => "Learner 📘",
            Grade::Skilled     => "Skilled 🛠️",
            Grade::Pro         => "Pro 🔥",
            Grade::Expert      => "Expert 🎯",
            Grade::Elite       => "Elite 💎",
            Grade::Master      => "Master 🧠",
            Grade::WorldClass  => "World Class 🌍",
            Grade::God         => "God 👑",
        }
    }

    pub fn is_available(self) -> bool {
        self != Grade::Unavailable
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
