//! Integration tests for the repository layer against a real database:
//! - User / story / narration / video job hierarchy
//! - Soft delete behaviour on stories
//! - Share upserts and unique constraints
//! - Template locale fallback
//! - Preference defaults and delivery bookkeeping

use sqlx::PgPool;
use storyweave_db::models::notification::{CreateCampaign, CreateTemplate};
use storyweave_db::models::story::{CreateStory, UpdateStory};
use storyweave_db::models::user::CreateUser;
use storyweave_db::repositories::{
    CampaignRepo, DeliveryRepo, NarrationRepo, PreferenceRepo, RoleRepo, ShareRepo, StoryRepo,
    TemplateRepo, UserRepo, VideoJobRepo, VoiceProfileRepo,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn new_user(pool: &PgPool, username: &str) -> storyweave_db::models::user::User {
    let role = RoleRepo::find_by_name(pool, "user")
        .await
        .unwrap()
        .expect("seeded role");
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            phone: None,
            locale: None,
            password_hash: "argon2-hash".to_string(),
            role_id: role.id,
        },
    )
    .await
    .unwrap()
}

fn new_story(title: &str) -> CreateStory {
    CreateStory {
        title: title.to_string(),
        body: "Once upon a time.".to_string(),
        source: None,
        language: None,
    }
}

// ---------------------------------------------------------------------------
// Test: user -> story -> narration -> video job hierarchy
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_create_full_hierarchy(pool: PgPool) {
    let user = new_user(&pool, "ada").await;
    assert_eq!(user.locale, "en"); // default

    let story = StoryRepo::create(&pool, user.id, &new_story("The Lighthouse"))
        .await
        .unwrap();
    assert_eq!(story.owner_id, user.id);
    assert_eq!(story.source, "written"); // default

    let narration = NarrationRepo::create(&pool, story.id, None, "stock-voice-1")
        .await
        .unwrap();
    assert_eq!(narration.status, "pending");
    assert!(narration.voice_profile_id.is_none());

    let job = VideoJobRepo::create(&pool, story.id, "a lighthouse at dusk")
        .await
        .unwrap();
    assert_eq!(job.status, "pending");
    assert!(job.provider.is_none());
}

// ---------------------------------------------------------------------------
// Test: soft delete hides stories from reads
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_story_soft_delete(pool: PgPool) {
    let user = new_user(&pool, "finn").await;
    let story = StoryRepo::create(&pool, user.id, &new_story("Fading"))
        .await
        .unwrap();

    assert!(StoryRepo::soft_delete(&pool, story.id).await.unwrap());
    assert!(StoryRepo::find_by_id(&pool, story.id).await.unwrap().is_none());

    // Second soft delete is a no-op.
    assert!(!StoryRepo::soft_delete(&pool, story.id).await.unwrap());

    // Updates no longer reach the row.
    let updated = StoryRepo::update(
        &pool,
        story.id,
        &UpdateStory {
            title: Some("New".to_string()),
            body: None,
            language: None,
        },
    )
    .await
    .unwrap();
    assert!(updated.is_none());
}

// ---------------------------------------------------------------------------
// Test: share upsert updates the role in place
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_share_upsert_and_listing(pool: PgPool) {
    let owner = new_user(&pool, "owner").await;
    let friend = new_user(&pool, "friend").await;
    let story = StoryRepo::create(&pool, owner.id, &new_story("Shared")).await.unwrap();

    let share = ShareRepo::upsert(&pool, story.id, friend.id, "viewer").await.unwrap();
    assert_eq!(share.share_role, "viewer");

    // Upsert with a new role keeps a single row.
    let share = ShareRepo::upsert(&pool, story.id, friend.id, "editor").await.unwrap();
    assert_eq!(share.share_role, "editor");
    assert_eq!(ShareRepo::list_for_story(&pool, story.id).await.unwrap().len(), 1);

    // Shared stories appear in the friend's listing.
    let visible = StoryRepo::list_for_user(&pool, friend.id, 50, 0).await.unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, story.id);

    assert!(ShareRepo::delete(&pool, story.id, friend.id).await.unwrap());
    assert!(StoryRepo::list_for_user(&pool, friend.id, 50, 0).await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Test: campaign unique constraint on (domain, event_type)
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_campaign_unique_domain_event(pool: PgPool) {
    let input = CreateCampaign {
        domain: "story".to_string(),
        event_type: "narration_completed".to_string(),
        channels: vec!["email".to_string()],
        template_key: "narration_done".to_string(),
        enabled: None,
    };
    CampaignRepo::create(&pool, &input).await.unwrap();

    let err = CampaignRepo::create(&pool, &input).await.unwrap_err();
    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.code().as_deref(), Some("23505"));
        }
        other => panic!("expected unique violation, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Test: disabled campaigns are invisible to the dispatcher lookup
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_find_enabled_skips_disabled_campaigns(pool: PgPool) {
    let campaign = CampaignRepo::create(
        &pool,
        &CreateCampaign {
            domain: "video".to_string(),
            event_type: "render_completed".to_string(),
            channels: vec!["email".to_string(), "sms".to_string()],
            template_key: "render_done".to_string(),
            enabled: Some(false),
        },
    )
    .await
    .unwrap();

    assert!(CampaignRepo::find_enabled(&pool, "video", "render_completed")
        .await
        .unwrap()
        .is_none());

    CampaignRepo::update(
        &pool,
        campaign.id,
        &storyweave_db::models::notification::UpdateCampaign {
            channels: None,
            template_key: None,
            enabled: Some(true),
        },
    )
    .await
    .unwrap();

    let found = CampaignRepo::find_enabled(&pool, "video", "render_completed")
        .await
        .unwrap()
        .expect("enabled campaign is found");
    assert_eq!(found.channel_names(), vec!["email", "sms"]);
}

// ---------------------------------------------------------------------------
// Test: template lookup falls back to the en locale
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_template_locale_fallback(pool: PgPool) {
    TemplateRepo::create(
        &pool,
        &CreateTemplate {
            template_key: "welcome".to_string(),
            channel: "email".to_string(),
            locale: None, // defaults to en
            subject: Some("Welcome {{name}}".to_string()),
            body: "Hello {{name}}".to_string(),
        },
    )
    .await
    .unwrap();

    TemplateRepo::create(
        &pool,
        &CreateTemplate {
            template_key: "welcome".to_string(),
            channel: "email".to_string(),
            locale: Some("fr".to_string()),
            subject: Some("Bienvenue {{name}}".to_string()),
            body: "Bonjour {{name}}".to_string(),
        },
    )
    .await
    .unwrap();

    // Exact locale match wins.
    let fr = TemplateRepo::find_with_fallback(&pool, "welcome", "email", "fr")
        .await
        .unwrap()
        .expect("fr template");
    assert_eq!(fr.locale, "fr");

    // Unknown locale falls back to en.
    let de = TemplateRepo::find_with_fallback(&pool, "welcome", "email", "de")
        .await
        .unwrap()
        .expect("en fallback");
    assert_eq!(de.locale, "en");

    // Unknown channel finds nothing.
    assert!(TemplateRepo::find_with_fallback(&pool, "welcome", "sms", "en")
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Test: preference default and upsert
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_preference_upsert(pool: PgPool) {
    let user = new_user(&pool, "prefs").await;

    // No row yet: the dispatcher treats this as enabled.
    assert!(PreferenceRepo::get(&pool, user.id, "email").await.unwrap().is_none());

    let pref = PreferenceRepo::upsert(&pool, user.id, "email", false).await.unwrap();
    assert!(!pref.enabled);

    let pref = PreferenceRepo::upsert(&pool, user.id, "email", true).await.unwrap();
    assert!(pref.enabled);
    assert_eq!(PreferenceRepo::list_for_user(&pool, user.id).await.unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Test: delivery ledger transitions
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_delivery_bookkeeping(pool: PgPool) {
    let user = new_user(&pool, "recipient").await;
    let campaign = CampaignRepo::create(
        &pool,
        &CreateCampaign {
            domain: "story".to_string(),
            event_type: "shared".to_string(),
            channels: vec!["email".to_string()],
            template_key: "story_shared".to_string(),
            enabled: None,
        },
    )
    .await
    .unwrap();

    let id = DeliveryRepo::create_pending(
        &pool,
        campaign.id,
        None,
        user.id,
        "email",
        Some("recipient@example.com"),
        Some("A story was shared with you"),
        "Ada shared a story.",
    )
    .await
    .unwrap();
    DeliveryRepo::mark_sent(&pool, id).await.unwrap();

    let failed_id = DeliveryRepo::create_failed(
        &pool,
        campaign.id,
        None,
        user.id,
        "sms",
        "user has no phone number",
    )
    .await
    .unwrap();

    let deliveries = DeliveryRepo::list_for_user(&pool, user.id, 50, 0).await.unwrap();
    assert_eq!(deliveries.len(), 2);

    let sent = deliveries.iter().find(|d| d.id == id).unwrap();
    assert_eq!(sent.status, "sent");
    assert!(sent.sent_at.is_some());

    let failed = deliveries.iter().find(|d| d.id == failed_id).unwrap();
    assert_eq!(failed.status, "failed");
    assert_eq!(failed.error.as_deref(), Some("user has no phone number"));
}

// ---------------------------------------------------------------------------
// Test: voice profile status updates
// ---------------------------------------------------------------------------

#[sqlx::test]
async fn test_voice_profile_status_updates(pool: PgPool) {
    let user = new_user(&pool, "voices").await;
    let profile = VoiceProfileRepo::create(&pool, user.id, "My Voice").await.unwrap();
    assert_eq!(profile.status, "pending");

    let profile = VoiceProfileRepo::set_status(&pool, profile.id, "training", None, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(profile.status, "training");

    let profile =
        VoiceProfileRepo::set_status(&pool, profile.id, "completed", Some("el-voice-9"), None)
            .await
            .unwrap()
            .unwrap();
    assert_eq!(profile.status, "completed");
    assert_eq!(profile.provider_voice_id.as_deref(), Some("el-voice-9"));
}
