//! Profile Service: reads and edits the owner profile.
//!
//! Reads never fail: a missing row or an unreachable database yields the
//! built-in default profile. Edits upload blobs first, then upsert the row,
//! and report failures as messages fit for display.

use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::models::message::now_millis;
use crate::models::profile::{ProfileChanges, ResumeProfile, PROFILE_ID};
use crate::profile::default::{default_profile, DEFAULT_RESUME_TEXT};
use crate::profile::pdf::extract_resume_text;
use crate::profile::repository::ProfileRepository;
use crate::profile::storage::BlobStore;

const GENERIC_FAILURE: &str = "Failed to update profile";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("{0}")]
    Validation(String),

    #[error("Connection failed. DB writes are disabled in demo mode.")]
    Unreachable,

    #[error("Bucket \"{0}\" not found. Please create it or check the name.")]
    BucketNotFound(String),

    #[error("{0}")]
    Backend(String),
}

impl ProfileError {
    /// Classifies a backend failure by its message text.
    pub fn from_message(message: &str, bucket: &str) -> Self {
        let trimmed = message.trim();
        if trimmed.is_empty()
            || trimmed.contains("Connection refused")
            || trimmed.contains("error trying to connect")
        {
            ProfileError::Unreachable
        } else if trimmed.contains("Bucket not found") || trimmed.contains("NoSuchBucket") {
            ProfileError::BucketNotFound(bucket.to_string())
        } else {
            ProfileError::Backend(trimmed.to_string())
        }
    }
}

impl From<sqlx::Error> for ProfileError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                ProfileError::Unreachable
            }
            other => {
                let message = other.to_string();
                if message.trim().is_empty() {
                    ProfileError::Backend(GENERIC_FAILURE.to_string())
                } else {
                    ProfileError::Backend(message)
                }
            }
        }
    }
}

/// An uploaded file from the edit form.
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl Upload {
    fn is_pdf(&self) -> bool {
        self.content_type.as_deref() == Some("application/pdf")
            || self.file_name.to_ascii_lowercase().ends_with(".pdf")
    }

    fn is_image(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|ct| ct.starts_with("image/"))
    }

    fn extension(&self) -> &str {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty())
            .unwrap_or("img")
    }
}

/// A profile edit as submitted by the owner.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub image: Option<Upload>,
    pub resume: Option<Upload>,
}

pub struct ProfileService {
    repo: Arc<dyn ProfileRepository>,
    blobs: Arc<dyn BlobStore>,
    bucket: String,
    current: RwLock<ResumeProfile>,
}

impl ProfileService {
    /// Builds the service and loads the active profile.
    pub async fn load(
        repo: Arc<dyn ProfileRepository>,
        blobs: Arc<dyn BlobStore>,
        bucket: String,
    ) -> Self {
        let profile = fetch_or_default(repo.as_ref()).await;
        Self {
            repo,
            blobs,
            bucket,
            current: RwLock::new(profile),
        }
    }

    pub async fn current(&self) -> ResumeProfile {
        self.current.read().await.clone()
    }

    /// Resume text for the assistant: the stored resume, or the built-in one if blank.
    pub async fn resume_context(&self) -> String {
        let profile = self.current.read().await;
        if profile.resume_text.trim().is_empty() {
            DEFAULT_RESUME_TEXT.to_string()
        } else {
            profile.resume_text.clone()
        }
    }

    /// Re-reads the profile from the backend. A failed read keeps the cached profile.
    pub async fn refresh(&self) -> ResumeProfile {
        match self.repo.fetch(PROFILE_ID).await {
            Ok(found) => {
                let profile = found.unwrap_or_else(default_profile);
                *self.current.write().await = profile.clone();
                profile
            }
            Err(e) => {
                warn!("Profile refresh failed, keeping cached profile: {e}");
                self.current().await
            }
        }
    }

    /// Applies an owner edit: uploads, resume text extraction, row upsert.
    pub async fn update(&self, update: ProfileUpdate) -> Result<ResumeProfile, ProfileError> {
        if let Some(resume) = &update.resume {
            if !resume.is_pdf() {
                return Err(ProfileError::Validation(
                    "Please upload a PDF file for the resume.".to_string(),
                ));
            }
        }
        if let Some(image) = &update.image {
            if !image.is_image() {
                return Err(ProfileError::Validation(
                    "Please upload an image file.".to_string(),
                ));
            }
        }

        let mut changes = ProfileChanges {
            linkedin: non_blank(update.linkedin),
            github: non_blank(update.github),
            ..ProfileChanges::default()
        };

        if let Some(image) = update.image {
            let key = format!("profile_pic_{}.{}", now_millis(), image.extension());
            let content_type = image.content_type.as_deref().unwrap_or("image/png");
            changes.image_url = Some(self.blobs.upload(&key, image.bytes, content_type).await?);
        }

        if let Some(resume) = update.resume {
            let text = extract_resume_text(resume.bytes.clone()).await?;
            let key = format!("owner_resume_{}.pdf", now_millis());
            changes.resume_url =
                Some(self.blobs.upload(&key, resume.bytes, "application/pdf").await?);
            changes.resume_text = non_blank(Some(text));
        }

        let now = Utc::now();
        self.repo.upsert(PROFILE_ID, &changes, now).await?;
        info!("Profile updated (bucket {})", self.bucket);

        match self.repo.fetch(PROFILE_ID).await {
            Ok(Some(profile)) => {
                *self.current.write().await = profile.clone();
                Ok(profile)
            }
            _ => {
                let mut current = self.current.write().await;
                changes.apply_to(&mut current, now);
                Ok(current.clone())
            }
        }
    }
}

async fn fetch_or_default(repo: &dyn ProfileRepository) -> ResumeProfile {
    match repo.fetch(PROFILE_ID).await {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            info!("No stored profile, using built-in default");
            default_profile()
        }
        Err(e) => {
            warn!("Using built-in profile due to backend error: {e}");
            default_profile()
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::DateTime;

    use super::*;

    /// In-memory profile table.
    #[derive(Default)]
    pub(crate) struct MemoryProfiles {
        pub row: Mutex<Option<ResumeProfile>>,
        pub fail_with: Mutex<Option<ProfileError>>,
    }

    #[async_trait]
    impl ProfileRepository for MemoryProfiles {
        async fn fetch(&self, _id: &str) -> Result<Option<ResumeProfile>, ProfileError> {
            if let Some(e) = self.fail_with.lock().unwrap().clone() {
                return Err(e);
            }
            Ok(self.row.lock().unwrap().clone())
        }

        async fn upsert(
            &self,
            id: &str,
            changes: &ProfileChanges,
            updated_at: DateTime<Utc>,
        ) -> Result<(), ProfileError> {
            if let Some(e) = self.fail_with.lock().unwrap().clone() {
                return Err(e);
            }
            let mut row = self.row.lock().unwrap();
            let profile = row.get_or_insert_with(|| ResumeProfile {
                id: id.to_string(),
                linkedin: String::new(),
                github: String::new(),
                image_url: None,
                resume_url: String::new(),
                resume_text: String::new(),
                updated_at: None,
            });
            changes.apply_to(profile, updated_at);
            Ok(())
        }
    }

    /// Blob store that records keys and serves `memory://` URLs.
    #[derive(Default)]
    pub(crate) struct MemoryBlobs {
        pub keys: Mutex<Vec<String>>,
        pub missing_bucket: bool,
    }

    #[async_trait]
    impl BlobStore for MemoryBlobs {
        async fn upload(
            &self,
            key: &str,
            _body: Bytes,
            _content_type: &str,
        ) -> Result<String, ProfileError> {
            if self.missing_bucket {
                return Err(ProfileError::BucketNotFound("resumes".into()));
            }
            self.keys.lock().unwrap().push(key.to_string());
            Ok(format!("memory://resumes/{key}"))
        }
    }

    pub(crate) async fn service_with(repo: Arc<MemoryProfiles>) -> ProfileService {
        ProfileService::load(repo, Arc::new(MemoryBlobs::default()), "resumes".into()).await
    }

    fn image(name: &str, content_type: &str) -> Upload {
        Upload {
            file_name: name.to_string(),
            content_type: Some(content_type.to_string()),
            bytes: Bytes::from_static(b"\x89PNG"),
        }
    }

    #[tokio::test]
    async fn test_missing_row_uses_default_profile() {
        let service = service_with(Arc::new(MemoryProfiles::default())).await;
        assert_eq!(service.current().await, default_profile());
        assert_eq!(service.resume_context().await, DEFAULT_RESUME_TEXT);
    }

    #[tokio::test]
    async fn test_backend_error_uses_default_profile() {
        let repo = Arc::new(MemoryProfiles::default());
        *repo.fail_with.lock().unwrap() = Some(ProfileError::Unreachable);
        let service = service_with(repo).await;
        assert_eq!(service.current().await.linkedin, default_profile().linkedin);
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_loaded_profile() {
        let repo = Arc::new(MemoryProfiles::default());
        let mut stored = default_profile();
        stored.resume_text = "Stored resume about Rust services".into();
        *repo.row.lock().unwrap() = Some(stored.clone());

        let service = service_with(repo.clone()).await;
        *repo.fail_with.lock().unwrap() = Some(ProfileError::Unreachable);

        assert_eq!(service.refresh().await, stored);
        assert_eq!(
            service.resume_context().await,
            "Stored resume about Rust services"
        );
    }

    #[tokio::test]
    async fn test_refresh_with_removed_row_uses_default() {
        let repo = Arc::new(MemoryProfiles::default());
        let mut stored = default_profile();
        stored.github = "https://github.com/someone".into();
        *repo.row.lock().unwrap() = Some(stored);

        let service = service_with(repo.clone()).await;
        *repo.row.lock().unwrap() = None;

        assert_eq!(service.refresh().await, default_profile());
    }

    #[tokio::test]
    async fn test_blank_stored_resume_falls_back_to_default_text() {
        let repo = Arc::new(MemoryProfiles::default());
        let mut stored = default_profile();
        stored.resume_text = "   ".into();
        *repo.row.lock().unwrap() = Some(stored);

        let service = service_with(repo).await;
        assert_eq!(service.resume_context().await, DEFAULT_RESUME_TEXT);
    }

    #[tokio::test]
    async fn test_update_links_only_touches_given_fields() {
        let repo = Arc::new(MemoryProfiles::default());
        let mut stored = default_profile();
        stored.resume_text = "Stored resume".into();
        *repo.row.lock().unwrap() = Some(stored);
        let service = service_with(repo).await;

        let updated = service
            .update(ProfileUpdate {
                linkedin: Some("  https://linkedin.com/in/new  ".into()),
                github: Some("   ".into()),
                ..ProfileUpdate::default()
            })
            .await
            .unwrap();

        assert_eq!(updated.linkedin, "https://linkedin.com/in/new");
        assert_eq!(updated.github, default_profile().github);
        assert_eq!(updated.resume_text, "Stored resume");
        assert!(updated.updated_at.is_some());
        assert_eq!(service.current().await, updated);
    }

    #[tokio::test]
    async fn test_image_upload_sets_public_url() {
        let blobs = Arc::new(MemoryBlobs::default());
        let service = ProfileService::load(
            Arc::new(MemoryProfiles::default()),
            blobs.clone(),
            "resumes".into(),
        )
        .await;

        let updated = service
            .update(ProfileUpdate {
                image: Some(image("me.jpeg", "image/jpeg")),
                ..ProfileUpdate::default()
            })
            .await
            .unwrap();

        let keys = blobs.keys.lock().unwrap();
        assert!(keys[0].starts_with("profile_pic_") && keys[0].ends_with(".jpeg"));
        assert_eq!(updated.image_url, Some(format!("memory://resumes/{}", keys[0])));
    }

    #[tokio::test]
    async fn test_non_pdf_resume_rejected() {
        let service = service_with(Arc::new(MemoryProfiles::default())).await;
        let err = service
            .update(ProfileUpdate {
                resume: Some(image("cv.docx", "application/msword")),
                ..ProfileUpdate::default()
            })
            .await
            .unwrap_err();
        assert_eq!(
            err,
            ProfileError::Validation("Please upload a PDF file for the resume.".into())
        );
    }

    #[tokio::test]
    async fn test_non_image_photo_rejected() {
        let service = service_with(Arc::new(MemoryProfiles::default())).await;
        let err = service
            .update(ProfileUpdate {
                image: Some(image("photo.txt", "text/plain")),
                ..ProfileUpdate::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Please upload an image file.");
    }

    #[tokio::test]
    async fn test_missing_bucket_is_reported() {
        let blobs = Arc::new(MemoryBlobs {
            missing_bucket: true,
            ..MemoryBlobs::default()
        });
        let service =
            ProfileService::load(Arc::new(MemoryProfiles::default()), blobs, "resumes".into())
                .await;

        let err = service
            .update(ProfileUpdate {
                image: Some(image("me.png", "image/png")),
                ..ProfileUpdate::default()
            })
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Bucket \"resumes\" not found. Please create it or check the name."
        );
    }

    #[tokio::test]
    async fn test_unreachable_database_is_reported() {
        let repo = Arc::new(MemoryProfiles::default());
        let service = service_with(repo.clone()).await;
        *repo.fail_with.lock().unwrap() = Some(ProfileError::Unreachable);

        let err = service
            .update(ProfileUpdate {
                github: Some("https://github.com/new".into()),
                ..ProfileUpdate::default()
            })
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Connection failed. DB writes are disabled in demo mode."
        );
    }

    #[test]
    fn test_error_classification_from_message() {
        assert_eq!(
            ProfileError::from_message("", "resumes"),
            ProfileError::Unreachable
        );
        assert_eq!(
            ProfileError::from_message(
                "dispatch failure: io error: error trying to connect: tcp connect error: \
                 Connection refused (os error 111)",
                "resumes"
            ),
            ProfileError::Unreachable
        );
        assert_eq!(
            ProfileError::from_message(
                "dispatch failure: error trying to connect: dns error: no record found",
                "resumes"
            ),
            ProfileError::Unreachable
        );
        assert_eq!(
            ProfileError::from_message("StorageError: Bucket not found", "avatars"),
            ProfileError::BucketNotFound("avatars".into())
        );
        assert_eq!(
            ProfileError::from_message("permission denied for table profiles", "resumes"),
            ProfileError::Backend("permission denied for table profiles".into())
        );
    }

    #[test]
    fn test_sqlx_pool_timeout_is_unreachable() {
        assert_eq!(
            ProfileError::from(sqlx::Error::PoolTimedOut),
            ProfileError::Unreachable
        );
    }

    #[test]
    fn test_upload_extension() {
        assert_eq!(image("me.profile.webp", "image/webp").extension(), "webp");
        assert_eq!(image("noext", "image/png").extension(), "img");
    }
}
