//! Lifecycle status constants and transition validation.
//!
//! Status strings are stored verbatim in the database; legality of a
//! transition is checked here so the API, dispatcher, and provider adapters
//! all agree on the same state machines.

// ---------------------------------------------------------------------------
// Voice profile statuses (pending -> training -> completed | failed)
// ---------------------------------------------------------------------------

/// Known voice profile statuses.
pub mod voice_profile {
    /// Profile row created, samples not yet submitted to the vendor.
    pub const PENDING: &str = "pending";
    /// Samples submitted, vendor is building the clone.
    pub const TRAINING: &str = "training";
    /// Clone is usable for narration.
    pub const COMPLETED: &str = "completed";
    /// Cloning failed; see `failure_reason`.
    pub const FAILED: &str = "failed";
}

/// The set of all valid voice profile statuses.
pub const VALID_VOICE_PROFILE_STATUSES: &[&str] = &[
    voice_profile::PENDING,
    voice_profile::TRAINING,
    voice_profile::COMPLETED,
    voice_profile::FAILED,
];

/// Returns `true` if the transition between the two voice profile statuses
/// is legal.
pub fn is_valid_voice_profile_transition(from: &str, to: &str) -> bool {
    matches!(
        (from, to),
        (voice_profile::PENDING, voice_profile::TRAINING)
            | (voice_profile::TRAINING, voice_profile::COMPLETED)
            | (voice_profile::TRAINING, voice_profile::FAILED)
            | (voice_profile::PENDING, voice_profile::FAILED)
    )
}

// ---------------------------------------------------------------------------
// Video job statuses (pending -> submitted -> completed | failed)
// ---------------------------------------------------------------------------

/// Known video job statuses.
pub mod video_job {
    /// Job row created, not yet accepted by any vendor.
    pub const PENDING: &str = "pending";
    /// A vendor accepted the job and returned a provider job id.
    pub const SUBMITTED: &str = "submitted";
    /// The vendor finished rendering; `output_url` is set.
    pub const COMPLETED: &str = "completed";
    /// All vendors rejected the job, or the vendor reported failure.
    pub const FAILED: &str = "failed";
}

/// The set of all valid video job statuses.
pub const VALID_VIDEO_JOB_STATUSES: &[&str] = &[
    video_job::PENDING,
    video_job::SUBMITTED,
    video_job::COMPLETED,
    video_job::FAILED,
];

/// Returns `true` if the transition between the two video job statuses is legal.
pub fn is_valid_video_job_transition(from: &str, to: &str) -> bool {
    matches!(
        (from, to),
        (video_job::PENDING, video_job::SUBMITTED)
            | (video_job::PENDING, video_job::FAILED)
            | (video_job::SUBMITTED, video_job::COMPLETED)
            | (video_job::SUBMITTED, video_job::FAILED)
    )
}

// ---------------------------------------------------------------------------
// Narration statuses
// ---------------------------------------------------------------------------

/// Known narration statuses.
pub mod narration {
    /// Narration row created, synthesis not yet attempted.
    pub const PENDING: &str = "pending";
    /// Audio synthesized and stored; `audio_path` is set.
    pub const COMPLETED: &str = "completed";
    /// Synthesis failed; see `failure_reason`.
    pub const FAILED: &str = "failed";
}

// ---------------------------------------------------------------------------
// Delivery statuses
// ---------------------------------------------------------------------------

/// Known notification delivery statuses.
pub mod delivery {
    /// Row inserted, send not yet attempted.
    pub const PENDING: &str = "pending";
    /// The channel sender reported success.
    pub const SENT: &str = "sent";
    /// The single send attempt failed; see `error`.
    pub const FAILED: &str = "failed";
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voice_profile_happy_path() {
        assert!(is_valid_voice_profile_transition("pending", "training"));
        assert!(is_valid_voice_profile_transition("training", "completed"));
    }

    #[test]
    fn voice_profile_failure_paths() {
        assert!(is_valid_voice_profile_transition("pending", "failed"));
        assert!(is_valid_voice_profile_transition("training", "failed"));
    }

    #[test]
    fn voice_profile_illegal_transitions() {
        assert!(!is_valid_voice_profile_transition("pending", "completed"));
        assert!(!is_valid_voice_profile_transition("completed", "training"));
        assert!(!is_valid_voice_profile_transition("failed", "completed"));
        assert!(!is_valid_voice_profile_transition("completed", "completed"));
    }

    #[test]
    fn video_job_happy_path() {
        assert!(is_valid_video_job_transition("pending", "submitted"));
        assert!(is_valid_video_job_transition("submitted", "completed"));
    }

    #[test]
    fn video_job_failure_paths() {
        assert!(is_valid_video_job_transition("pending", "failed"));
        assert!(is_valid_video_job_transition("submitted", "failed"));
    }

    #[test]
    fn video_job_illegal_transitions() {
        assert!(!is_valid_video_job_transition("pending", "completed"));
        assert!(!is_valid_video_job_transition("completed", "submitted"));
        assert!(!is_valid_video_job_transition("failed", "submitted"));
    }

    #[test]
    fn status_catalogues_contain_no_duplicates() {
        let mut profile = VALID_VOICE_PROFILE_STATUSES.to_vec();
        profile.sort_unstable();
        profile.dedup();
        assert_eq!(profile.len(), VALID_VOICE_PROFILE_STATUSES.len());

        let mut job = VALID_VIDEO_JOB_STATUSES.to_vec();
        job.sort_unstable();
        job.dedup();
        assert_eq!(job.len(), VALID_VIDEO_JOB_STATUSES.len());
    }
}
