//! Portfolio content shown by the built-in commands.
//!
//! The default profile is compiled in. `FOLIO_PROFILE_PATH` may point at a JSON
//! file with the same shape; unknown fields are rejected and every text field
//! must be non-empty.

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::Deserialize;

use crate::error::ProfileError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkEntry {
    pub employer: String,
    pub role: String,
    pub period: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Contact {
    pub email: String,
    pub github: String,
    pub linkedin: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    pub name: String,
    pub bio: String,
    pub work: Vec<WorkEntry>,
    pub contact: Contact,
    pub greeting: String,
    pub banner: String,
    pub tagline: String,
}

static DEFAULT_PROFILE: Lazy<Profile> = Lazy::new(|| Profile {
    name: "laura chen".to_string(),
    bio: "programmer, boba enjoyer, cat lover.".to_string(),
    work: vec![
        WorkEntry {
            employer: "figma".to_string(),
            role: "software engineer intern".to_string(),
            period: "summer 2026".to_string(),
        },
        WorkEntry {
            employer: "notion".to_string(),
            role: "software engineer intern".to_string(),
            period: "winter 2026".to_string(),
        },
        WorkEntry {
            employer: "aws".to_string(),
            role: "software engineer intern".to_string(),
            period: "summer 2025".to_string(),
        },
    ],
    contact: Contact {
        email: "laura@example.com".to_string(),
        github: "github.com/laurachen".to_string(),
        linkedin: "linkedin.com/in/laurachen".to_string(),
    },
    greeting: "  hii! it's nice to meet you :)".to_string(),
    banner: "type `help` to see available commands".to_string(),
    tagline: "programmer".to_string(),
});

impl Default for Profile {
    fn default() -> Self {
        DEFAULT_PROFILE.clone()
    }
}

impl Profile {
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let raw = fs::read_to_string(path).map_err(|source| ProfileError::io(path, source))?;
        let profile: Profile =
            serde_json::from_str(&raw).map_err(|source| ProfileError::json(path, source))?;
        profile.validate()?;
        tracing::debug!(path = %path.display(), "loaded profile");
        Ok(profile)
    }

    /// Load from `path` when given, otherwise use the built-in profile.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ProfileError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<(), ProfileError> {
        let required = [
            ("name", &self.name),
            ("bio", &self.bio),
            ("contact.email", &self.contact.email),
            ("contact.github", &self.contact.github),
            ("contact.linkedin", &self.contact.linkedin),
            ("greeting", &self.greeting),
            ("banner", &self.banner),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ProfileError::EmptyField { field });
            }
        }
        for entry in &self.work {
            if entry.employer.trim().is_empty() {
                return Err(ProfileError::EmptyField {
                    field: "work.employer",
                });
            }
        }
        Ok(())
    }
}
