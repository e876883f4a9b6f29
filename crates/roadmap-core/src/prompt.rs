//! Prompt construction for roadmap and roast requests.
//!
//! Pure string assembly; no I/O. The roadmap prompt pins the model to the
//! document shape the plan parser expects.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Language the user wants motivational text in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    #[default]
    English,
    Hindi,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::English => "english",
            Self::Hindi => "hindi",
        };
        f.write_str(s)
    }
}

impl FromStr for Language {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "english" => Ok(Self::English),
            "hindi" => Ok(Self::Hindi),
            other => Err(ParseOptionError {
                kind: "language",
                value: other.to_owned(),
            }),
        }
    }
}

/// How harsh a roast should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoastLevel {
    Mild,
    #[default]
    Spicy,
    ExtraSpicy,
}

impl fmt::Display for RoastLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Mild => "mild",
            Self::Spicy => "spicy",
            Self::ExtraSpicy => "extra_spicy",
        };
        f.write_str(s)
    }
}

impl FromStr for RoastLevel {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mild" => Ok(Self::Mild),
            "spicy" => Ok(Self::Spicy),
            "extra_spicy" | "extra-spicy" => Ok(Self::ExtraSpicy),
            other => Err(ParseOptionError {
                kind: "roast level",
                value: other.to_owned(),
            }),
        }
    }
}

/// Error returned when parsing an invalid [`Language`] or [`RoastLevel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptionError {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for ParseOptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: {:?}", self.kind, self.value)
    }
}

impl std::error::Error for ParseOptionError {}

/// Optional personalization for the roadmap prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub country: String,
    pub language: Language,
}

impl fmt::Display for UserProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}, Age: {}, Gender: {}, Country: {}, Language: {}",
            self.name, self.age, self.gender, self.country, self.language
        )
    }
}

/// Everything needed to ask for a roast about a missed task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoastContext {
    pub task_title: String,
    pub age: u32,
    pub language: Language,
    pub level: RoastLevel,
}

// ---------------------------------------------------------------------------
// Roadmap prompt
// ---------------------------------------------------------------------------

/// Document shape the model is asked to return.
const ROADMAP_SCHEMA: &str = r#"{
    "estimatedDays": 30,
    "days": [
        {"day": 1, "title": "Task Title", "description": "Specific action to take", "tips": ["Tip 1", "Tip 2"]},
        {"day": 2, "title": "Task Title", "description": "Specific action to take", "tips": ["Tip 1", "Tip 2"]}
    ]
}"#;

const ROADMAP_REQUIREMENTS: &str = "Requirements:
1. Estimate days needed: 5-90 days
2. Create realistic, actionable daily tasks
3. Each day must have a specific title and description related to achieving the goal
4. Include 1-2 practical tips per day
5. Return ONLY valid JSON, nothing else
6. Do NOT use markdown code blocks
";

/// Build the prompt asking for a day-by-day roadmap toward `goal`.
pub fn build_roadmap_prompt(goal: &str, profile: Option<&UserProfile>) -> String {
    let mut prompt = String::with_capacity(1024);

    if let Some(profile) = profile {
        prompt.push_str(&format!(
            "User Profile: {profile}. Be culturally aware and provide friendly, expert guidance.\n"
        ));
    }
    prompt.push_str(&format!("Goal: \"{}\"\n\n", goal.trim()));
    prompt.push_str("Create a step-by-step daily roadmap to achieve this goal.\n");
    prompt.push_str(
        "Respond ONLY with this exact JSON structure (no markdown, no extra text):\n\n",
    );
    prompt.push_str(ROADMAP_SCHEMA);
    prompt.push_str("\n\n");
    prompt.push_str(ROADMAP_REQUIREMENTS);

    prompt
}

// ---------------------------------------------------------------------------
// Roast prompt
// ---------------------------------------------------------------------------

/// Maximum length asked of the model, in words.
const ROAST_MAX_WORDS: u32 = 20;

/// Build the prompt asking for a short roast about an unfinished task.
pub fn build_roast_prompt(ctx: &RoastContext) -> String {
    let task = ctx.task_title.trim();
    match ctx.language {
        Language::Hindi => format!(
            "Generate a savage, humorous roast/insult in Hinglish (Hindi + English) for a {age} year old \
             who hasn't completed their task: '{task}'.\n\
             The roast level is {level}.\n\
             Use street-style language like \"Bhai tu lukkha hi marega\" or \"Abey saale\".\n\
             Be extremely funny and insulting but keep it to the task.\n\
             Max {ROAST_MAX_WORDS} words. Use Devnagari for Hindi parts if appropriate, or just Roman script.",
            age = ctx.age,
            level = ctx.level,
        ),
        Language::English => format!(
            "Generate a savage, brutally honest, and funny roast for a {age} year old \
             who hasn't completed their task: '{task}'.\n\
             The roast level is {level}.\n\
             Be creative, use modern slang, and don't be afraid to be mean in a hilarious way.\n\
             Make the user feel like a total slacker for missing this.\n\
             Max {ROAST_MAX_WORDS} words.",
            age = ctx.age,
            level = ctx.level,
        ),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            name: "Asha".to_string(),
            age: 27,
            gender: "FEMALE".to_string(),
            country: "India".to_string(),
            language: Language::Hindi,
        }
    }

    #[test]
    fn roadmap_prompt_contains_goal_and_schema() {
        let prompt = build_roadmap_prompt("  Learn guitar ", None);
        assert!(prompt.starts_with("Goal: \"Learn guitar\""));
        assert!(prompt.contains("\"estimatedDays\": 30"));
        assert!(prompt.contains("\"tips\": [\"Tip 1\", \"Tip 2\"]"));
        assert!(prompt.contains("Estimate days needed: 5-90 days"));
        assert!(!prompt.contains("User Profile"));
    }

    #[test]
    fn roadmap_prompt_includes_profile() {
        let prompt = build_roadmap_prompt("Run a marathon", Some(&profile()));
        assert!(prompt.starts_with(
            "User Profile: Name: Asha, Age: 27, Gender: FEMALE, Country: India, Language: hindi."
        ));
        assert!(prompt.contains("Goal: \"Run a marathon\""));
    }

    #[test]
    fn roadmap_schema_is_valid_json() {
        let value: serde_json::Value =
            serde_json::from_str(ROADMAP_SCHEMA).expect("schema example should be JSON");
        assert_eq!(value["days"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn roast_prompt_switches_on_language() {
        let mut ctx = RoastContext {
            task_title: "Practice scales".to_string(),
            age: 19,
            language: Language::English,
            level: RoastLevel::ExtraSpicy,
        };
        let english = build_roast_prompt(&ctx);
        assert!(english.contains("19 year old"));
        assert!(english.contains("'Practice scales'"));
        assert!(english.contains("The roast level is extra_spicy."));
        assert!(english.contains("Max 20 words."));
        assert!(!english.contains("Hinglish"));

        ctx.language = Language::Hindi;
        let hindi = build_roast_prompt(&ctx);
        assert!(hindi.contains("Hinglish"));
        assert!(hindi.contains("'Practice scales'"));
    }

    #[test]
    fn options_parse_case_insensitively() {
        assert_eq!("HINDI".parse::<Language>().unwrap(), Language::Hindi);
        assert_eq!("extra-spicy".parse::<RoastLevel>().unwrap(), RoastLevel::ExtraSpicy);
        assert_eq!("EXTRA_SPICY".parse::<RoastLevel>().unwrap(), RoastLevel::ExtraSpicy);

        let err = "klingon".parse::<Language>().unwrap_err();
        assert_eq!(err.to_string(), "invalid language: \"klingon\"");
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for level in [RoastLevel::Mild, RoastLevel::Spicy, RoastLevel::ExtraSpicy] {
            assert_eq!(level.to_string().parse::<RoastLevel>().unwrap(), level);
        }
        for language in [Language::English, Language::Hindi] {
            assert_eq!(language.to_string().parse::<Language>().unwrap(), language);
        }
    }
}
