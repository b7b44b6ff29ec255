//! Preset tables layered over the catalog: categories, intensity levels,
//! named combinations and mood pools for idle variation.

use super::catalog::{Expression, ExpressionCatalog};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const CATEGORIES: &[(&str, &[&str])] = &[
    ("basic", &["default", "smile", "sad", "angry", "surprised", "fear", "disgusted", "joy"]),
    (
        "eye",
        &[
            "wink", "winkRight", "sleepy", "tired", "alert", "lookUp", "lookDown", "lookLeft",
            "lookRight", "eyeRoll", "crossEyed", "stare",
        ],
    ),
    (
        "brow",
        &["confused", "skeptical", "worried", "thoughtful", "determined", "focused", "concerned", "relaxed"],
    ),
    (
        "mouth",
        &[
            "kiss", "whistle", "smirk", "grin", "pout", "ooh", "ahh", "yawn", "grimace", "sealed",
            "tongueOut", "drool", "sigh", "shush", "raspberry",
        ],
    ),
    ("cheek", &["chipmunk", "suckedCheeks", "dimples"]),
    (
        "complex",
        &[
            "laughing", "giggling", "crying", "terrified", "frustrated", "peaceful", "pleading",
            "defiant", "content", "euphoric", "melancholy", "overwhelmed",
        ],
    ),
    (
        "social",
        &["flirtatious", "mischievous", "playful", "embarrassed", "proud", "ashamed", "judgmental", "welcoming"],
    ),
    (
        "cognitive",
        &["thinking", "puzzled", "concentrating", "contemplating", "curious", "enlightened"],
    ),
    ("physical", &["pain", "sick", "nauseous", "dizzy", "hot"]),
    (
        "micro",
        &["neutral", "bored", "annoyed", "unimpressed", "indifferent", "uncomfortable", "cool", "dreamy"],
    ),
    ("fun", &["crazy", "funnyFace", "cheeky", "goofy"]),
];

/// Expression ids in a category, empty for unknown categories
pub fn category(name: &str) -> &'static [&'static str] {
    CATEGORIES
        .iter()
        .find(|(category, _)| *category == name)
        .map(|(_, ids)| *ids)
        .unwrap_or(&[])
}

/// Pick a random expression from a category, `default` when there is none
pub fn random_from_category<R: Rng + ?Sized>(name: &str, rng: &mut R) -> &'static str {
    category(name).choose(rng).copied().unwrap_or("default")
}

/// Named intensity multipliers, from barely visible to cartoonish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Micro,
    Subtle,
    Mild,
    Moderate,
    Normal,
    Strong,
    Intense,
    Extreme,
    Theatrical,
}

impl Intensity {
    pub const ALL: [Intensity; 9] = [
        Intensity::Micro,
        Intensity::Subtle,
        Intensity::Mild,
        Intensity::Moderate,
        Intensity::Normal,
        Intensity::Strong,
        Intensity::Intense,
        Intensity::Extreme,
        Intensity::Theatrical,
    ];

    pub fn factor(self) -> f32 {
        match self {
            Intensity::Micro => 0.2,
            Intensity::Subtle => 0.4,
            Intensity::Mild => 0.6,
            Intensity::Moderate => 0.8,
            Intensity::Normal => 1.0,
            Intensity::Strong => 1.2,
            Intensity::Intense => 1.4,
            Intensity::Extreme => 1.6,
            Intensity::Theatrical => 2.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Intensity::Micro => "micro",
            Intensity::Subtle => "subtle",
            Intensity::Mild => "mild",
            Intensity::Moderate => "moderate",
            Intensity::Normal => "normal",
            Intensity::Strong => "strong",
            Intensity::Intense => "intense",
            Intensity::Extreme => "extreme",
            Intensity::Theatrical => "theatrical",
        }
    }
}

impl FromStr for Intensity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Intensity::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown intensity level: {}", s))
    }
}

/// Mood pools used to vary the idle face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Idle,
    Positive,
    Negative,
    Neutral,
}

impl Mood {
    pub fn expressions(self) -> &'static [&'static str] {
        match self {
            Mood::Idle => &[
                "default", "thinking", "curious", "contemplating", "relaxed", "lookLeft",
                "lookRight", "lookUp", "bored", "dreamy",
            ],
            Mood::Positive => &[
                "smile", "joy", "laughing", "giggling", "content", "proud", "playful", "welcoming",
                "flirtatious", "cheeky",
            ],
            Mood::Negative => &[
                "sad", "angry", "frustrated", "disgusted", "annoyed", "worried", "ashamed",
                "uncomfortable", "pain",
            ],
            Mood::Neutral => &[
                "default", "thinking", "curious", "focused", "alert", "contemplating", "neutral",
                "cool",
            ],
        }
    }

    pub fn pick<R: Rng + ?Sized>(self, rng: &mut R) -> &'static str {
        self.expressions().choose(rng).copied().unwrap_or("default")
    }
}

enum Recipe {
    Blend(&'static str, &'static str, f32),
    Scale(&'static str, f32),
}

const COMBINATIONS: &[(&str, Recipe)] = &[
    ("shySmile", Recipe::Blend("smile", "embarrassed", 0.6)),
    ("bittersweet", Recipe::Blend("smile", "sad", 0.3)),
    ("nervousLaughter", Recipe::Blend("giggling", "worried", 0.3)),
    ("restrainedAnger", Recipe::Scale("angry", 0.6)),
    ("delightedSurprise", Recipe::Blend("surprised", "joy", 0.4)),
    ("bewilderedAmusement", Recipe::Blend("confused", "smile", 0.5)),
    ("peacefulTiredness", Recipe::Blend("tired", "content", 0.7)),
    ("wickedGrin", Recipe::Blend("mischievous", "grin", 0.6)),
    ("politeness", Recipe::Scale("smile", 0.5)),
    ("relief", Recipe::Blend("sigh", "content", 0.8)),
    ("empathy", Recipe::Blend("concerned", "sad", 0.4)),
    ("nostalgia", Recipe::Blend("melancholy", "smile", 0.3)),
    ("teasingIrritation", Recipe::Blend("annoyed", "playful", 0.6)),
    ("smugSatisfaction", Recipe::Blend("smirk", "proud", 0.5)),
];

pub fn combination_names() -> impl Iterator<Item = &'static str> {
    COMBINATIONS.iter().map(|(name, _)| *name)
}

/// Build a named compound expression from catalog entries
pub fn combination(catalog: &ExpressionCatalog, name: &str) -> Option<Expression> {
    let (_, recipe) = COMBINATIONS.iter().find(|(n, _)| *n == name)?;
    Some(match recipe {
        Recipe::Blend(a, b, t) => catalog.blend(a, b, *t),
        Recipe::Scale(id, intensity) => catalog.scale(id, *intensity),
    })
}

/// Add every combination to a catalog so messages can reference them by id
pub fn register_combinations(catalog: &mut ExpressionCatalog) {
    for name in combination_names() {
        if let Some(expression) = combination(catalog, name) {
            catalog.insert(name, expression);
        }
    }
}
