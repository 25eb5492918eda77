// Owner profile: the singleton row in `profiles`, its uploaded blobs, and the
// resume text the assistant answers from.

pub mod default;
pub mod handlers;
pub mod pdf;
pub mod repository;
pub mod service;
pub mod storage;

pub use service::{ProfileError, ProfileService, ProfileUpdate, Upload};
