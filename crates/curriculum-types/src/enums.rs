//! Common enumerations used throughout the curriculum store.
//!
//! Block layouts and labels arrive as kebab-case literals (`challenge-list`)
//! and are exposed in canonical SCREAMING_SNAKE_CASE form (`CHALLENGE_LIST`),
//! which is also how they serialize.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::errors::{CurriculumError, Result, UnknownVariant};

/// Log level enumeration for the logging system.
///
/// Serializes in upper case and deserializes through [`FromStr`], so any
/// casing is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum LogLevel {
    /// No logging
    None,
    /// Error messages only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Detailed trace messages
    Trace,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::None => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl FromStr for LogLevel {
    type Err = CurriculumError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "NONE" | "OFF" => Ok(LogLevel::None),
            "ERROR" => Ok(LogLevel::Error),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "INFO" => Ok(LogLevel::Info),
            "DEBUG" => Ok(LogLevel::Debug),
            "TRACE" => Ok(LogLevel::Trace),
            _ => Err(CurriculumError::Config(format!("Invalid log level: {}", s))),
        }
    }
}

impl TryFrom<String> for LogLevel {
    type Error = CurriculumError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::None => write!(f, "NONE"),
            LogLevel::Error => write!(f, "ERROR"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Trace => write!(f, "TRACE"),
        }
    }
}

/// How a block's challenges are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockLayout {
    /// Vertical list of challenges
    ChallengeList,
    /// Grid of challenge tiles
    ChallengeGrid,
    /// Grid of dialogue-driven challenges
    DialogueGrid,
    /// Single link to the first challenge
    Link,
    /// List of certification projects
    ProjectList,
    /// Pre-v9 challenge list
    LegacyChallengeList,
    /// Pre-v9 link
    LegacyLink,
    /// Pre-v9 challenge grid
    LegacyChallengeGrid,
}

impl BlockLayout {
    /// Every layout, in declaration order.
    pub const ALL: [BlockLayout; 8] = [
        BlockLayout::ChallengeList,
        BlockLayout::ChallengeGrid,
        BlockLayout::DialogueGrid,
        BlockLayout::Link,
        BlockLayout::ProjectList,
        BlockLayout::LegacyChallengeList,
        BlockLayout::LegacyLink,
        BlockLayout::LegacyChallengeGrid,
    ];

    /// Map a raw kebab-case literal to its layout.
    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw {
            "challenge-list" => Some(BlockLayout::ChallengeList),
            "challenge-grid" => Some(BlockLayout::ChallengeGrid),
            "dialogue-grid" => Some(BlockLayout::DialogueGrid),
            "link" => Some(BlockLayout::Link),
            "project-list" => Some(BlockLayout::ProjectList),
            "legacy-challenge-list" => Some(BlockLayout::LegacyChallengeList),
            "legacy-link" => Some(BlockLayout::LegacyLink),
            "legacy-challenge-grid" => Some(BlockLayout::LegacyChallengeGrid),
            _ => None,
        }
    }

    /// The raw kebab-case literal as it appears in block files.
    pub fn as_raw(&self) -> &'static str {
        match self {
            BlockLayout::ChallengeList => "challenge-list",
            BlockLayout::ChallengeGrid => "challenge-grid",
            BlockLayout::DialogueGrid => "dialogue-grid",
            BlockLayout::Link => "link",
            BlockLayout::ProjectList => "project-list",
            BlockLayout::LegacyChallengeList => "legacy-challenge-list",
            BlockLayout::LegacyLink => "legacy-link",
            BlockLayout::LegacyChallengeGrid => "legacy-challenge-grid",
        }
    }

    /// The canonical symbol.
    pub fn as_symbol(&self) -> &'static str {
        match self {
            BlockLayout::ChallengeList => "CHALLENGE_LIST",
            BlockLayout::ChallengeGrid => "CHALLENGE_GRID",
            BlockLayout::DialogueGrid => "DIALOGUE_GRID",
            BlockLayout::Link => "LINK",
            BlockLayout::ProjectList => "PROJECT_LIST",
            BlockLayout::LegacyChallengeList => "LEGACY_CHALLENGE_LIST",
            BlockLayout::LegacyLink => "LEGACY_LINK",
            BlockLayout::LegacyChallengeGrid => "LEGACY_CHALLENGE_GRID",
        }
    }
}

impl FromStr for BlockLayout {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_raw(s).ok_or_else(|| UnknownVariant {
            kind: "blockLayout",
            value: s.to_string(),
            expected: expected_list(Self::ALL.iter().map(|l| l.as_raw())),
        })
    }
}

impl fmt::Display for BlockLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_symbol())
    }
}

/// Pedagogical role of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockLabel {
    /// Video or reading lecture
    Lecture,
    /// Guided step-by-step project
    Workshop,
    /// Unguided project
    Lab,
    /// Review page
    Review,
    /// Multiple-choice quiz
    Quiz,
    /// Graded exam
    Exam,
    /// Short warm-up exercises
    WarmUp,
    /// Learning content
    Learn,
    /// Practice exercises
    Practice,
}

impl BlockLabel {
    /// Every label, in declaration order.
    pub const ALL: [BlockLabel; 9] = [
        BlockLabel::Lecture,
        BlockLabel::Workshop,
        BlockLabel::Lab,
        BlockLabel::Review,
        BlockLabel::Quiz,
        BlockLabel::Exam,
        BlockLabel::WarmUp,
        BlockLabel::Learn,
        BlockLabel::Practice,
    ];

    /// Map a raw kebab-case literal to its label.
    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw {
            "lecture" => Some(BlockLabel::Lecture),
            "workshop" => Some(BlockLabel::Workshop),
            "lab" => Some(BlockLabel::Lab),
            "review" => Some(BlockLabel::Review),
            "quiz" => Some(BlockLabel::Quiz),
            "exam" => Some(BlockLabel::Exam),
            "warm-up" => Some(BlockLabel::WarmUp),
            "learn" => Some(BlockLabel::Learn),
            "practice" => Some(BlockLabel::Practice),
            _ => None,
        }
    }

    /// The raw kebab-case literal as it appears in block files.
    pub fn as_raw(&self) -> &'static str {
        match self {
            BlockLabel::Lecture => "lecture",
            BlockLabel::Workshop => "workshop",
            BlockLabel::Lab => "lab",
            BlockLabel::Review => "review",
            BlockLabel::Quiz => "quiz",
            BlockLabel::Exam => "exam",
            BlockLabel::WarmUp => "warm-up",
            BlockLabel::Learn => "learn",
            BlockLabel::Practice => "practice",
        }
    }

    /// The canonical symbol.
    pub fn as_symbol(&self) -> &'static str {
        match self {
            BlockLabel::Lecture => "LECTURE",
            BlockLabel::Workshop => "WORKSHOP",
            BlockLabel::Lab => "LAB",
            BlockLabel::Review => "REVIEW",
            BlockLabel::Quiz => "QUIZ",
            BlockLabel::Exam => "EXAM",
            BlockLabel::WarmUp => "WARM_UP",
            BlockLabel::Learn => "LEARN",
            BlockLabel::Practice => "PRACTICE",
        }
    }
}

impl FromStr for BlockLabel {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_raw(s).ok_or_else(|| UnknownVariant {
            kind: "blockLabel",
            value: s.to_string(),
            expected: expected_list(Self::ALL.iter().map(|l| l.as_raw())),
        })
    }
}

impl fmt::Display for BlockLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_symbol())
    }
}

fn expected_list<'a>(literals: impl Iterator<Item = &'a str>) -> String {
    literals.collect::<Vec<_>>().join(", ")
}
