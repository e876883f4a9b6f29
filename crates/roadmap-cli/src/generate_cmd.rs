//! `roadmap generate` command: prompt the model and derive a plan from its
//! answer.

use anyhow::{Context, Result};

use roadmap_core::RoadmapService;
use roadmap_core::prompt::{Language, UserProfile};

use crate::render::{OutputFormat, render};

/// Personalization flags; a profile is sent only when at least one is set.
#[derive(Debug, Default, Clone)]
pub struct ProfileArgs {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub country: Option<String>,
    pub language: Language,
}

impl ProfileArgs {
    pub fn into_profile(self) -> Option<UserProfile> {
        if self.name.is_none() && self.age.is_none() && self.gender.is_none() && self.country.is_none()
        {
            return None;
        }
        Some(UserProfile {
            name: self.name.unwrap_or_else(|| "User".to_string()),
            age: self.age.unwrap_or(25),
            gender: self.gender.unwrap_or_else(|| "Not specified".to_string()),
            country: self.country.unwrap_or_else(|| "Not specified".to_string()),
            language: self.language,
        })
    }
}

/// Run the full flow and print the plan.
pub async fn run_generate(
    service: &RoadmapService,
    goal: &str,
    duration_hint: Option<i64>,
    profile: ProfileArgs,
    format: OutputFormat,
) -> Result<()> {
    let profile = profile.into_profile();
    let derivation = service
        .generate_roadmap(goal, profile.as_ref(), duration_hint)
        .await
        .context("roadmap request failed")?;

    if derivation.is_fallback() {
        tracing::warn!("model answer was unusable; printing the generic roadmap");
    }

    print!("{}", render(&derivation, goal, format)?);
    if format == OutputFormat::Json {
        println!();
    }
    Ok(())
}
