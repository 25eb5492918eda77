use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Row id of the single owner profile.
pub const PROFILE_ID: &str = "owner";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct ResumeProfile {
    pub id: String,
    pub linkedin: String,
    pub github: String,
    pub image_url: Option<String>,
    pub resume_url: String,
    pub resume_text: String,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fields written by a profile edit. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileChanges {
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub image_url: Option<String>,
    pub resume_url: Option<String>,
    pub resume_text: Option<String>,
}

impl ProfileChanges {
    /// Applies the changes on top of `profile`, stamping `updated_at`.
    pub fn apply_to(&self, profile: &mut ResumeProfile, now: DateTime<Utc>) {
        if let Some(v) = &self.linkedin {
            profile.linkedin = v.clone();
        }
        if let Some(v) = &self.github {
            profile.github = v.clone();
        }
        if let Some(v) = &self.image_url {
            profile.image_url = Some(v.clone());
        }
        if let Some(v) = &self.resume_url {
            profile.resume_url = v.clone();
        }
        if let Some(v) = &self.resume_text {
            profile.resume_text = v.clone();
        }
        profile.updated_at = Some(now);
    }
}
