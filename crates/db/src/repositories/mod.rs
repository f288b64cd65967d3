//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod campaign_repo;
pub mod delivery_repo;
pub mod event_repo;
pub mod narration_repo;
pub mod preference_repo;
pub mod role_repo;
pub mod session_repo;
pub mod share_repo;
pub mod story_analysis_repo;
pub mod story_repo;
pub mod template_repo;
pub mod user_repo;
pub mod video_job_repo;
pub mod voice_profile_repo;

pub use campaign_repo::CampaignRepo;
pub use delivery_repo::DeliveryRepo;
pub use event_repo::EventRepo;
pub use narration_repo::NarrationRepo;
pub use preference_repo::PreferenceRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
pub use share_repo::ShareRepo;
pub use story_analysis_repo::StoryAnalysisRepo;
pub use story_repo::StoryRepo;
pub use template_repo::TemplateRepo;
pub use user_repo::UserRepo;
pub use video_job_repo::VideoJobRepo;
pub use voice_profile_repo::VoiceProfileRepo;
