//! Campaign-driven notification dispatch.
//!
//! [`Dispatcher`] subscribes to the event bus and, for each event, looks up
//! the enabled campaign matching `(domain, event_type)`, resolves recipient
//! users, checks their per-channel preferences, picks templates by
//! channel/locale, renders `{{var}}` placeholders from the event payload,
//! and attempts exactly one send per channel. Every attempt, including the
//! ones that could not be made, leaves a row in `notification_deliveries`.

use storyweave_core::channels::{CHANNEL_EMAIL, CHANNEL_IN_APP, CHANNEL_SMS};
use storyweave_core::template;
use storyweave_core::types::DbId;
use storyweave_db::models::notification::Campaign;
use storyweave_db::models::user::User;
use storyweave_db::repositories::{
    CampaignRepo, DeliveryRepo, EventRepo, PreferenceRepo, TemplateRepo, UserRepo,
};
use storyweave_db::DbPool;
use tokio::sync::broadcast;

use crate::bus::DomainEvent;
use crate::delivery::email::EmailDelivery;
use crate::delivery::sms::SmsDelivery;

/// Routes domain events to notification deliveries.
///
/// Email and SMS senders are optional: when a channel is not configured the
/// delivery row is marked `failed` with a descriptive error, keeping the
/// ledger complete.
pub struct Dispatcher {
    pool: DbPool,
    email: Option<EmailDelivery>,
    sms: Option<SmsDelivery>,
}

impl Dispatcher {
    /// Create a new dispatcher with the given database pool and senders.
    pub fn new(pool: DbPool, email: Option<EmailDelivery>, sms: Option<SmsDelivery>) -> Self {
        Self { pool, email, sms }
    }

    /// Run the main dispatch loop.
    ///
    /// Subscribes to the event bus via `receiver` and processes each event.
    /// The loop exits when the channel is closed (i.e. the
    /// [`EventBus`](crate::bus::EventBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<DomainEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = self.dispatch(&event).await {
                        tracing::error!(
                            error = %e,
                            domain = %event.domain,
                            event_type = %event.event_type,
                            "Failed to dispatch event"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification dispatcher lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, dispatcher shutting down");
                    break;
                }
            }
        }
    }

    /// Dispatch a single event to all affected users.
    async fn dispatch(&self, event: &DomainEvent) -> Result<(), sqlx::Error> {
        let campaign =
            match CampaignRepo::find_enabled(&self.pool, &event.domain, &event.event_type).await? {
                Some(c) => c,
                None => {
                    tracing::debug!(
                        domain = %event.domain,
                        event_type = %event.event_type,
                        "No enabled campaign for event, skipping"
                    );
                    return Ok(());
                }
            };

        // The persisted event row is written by a sibling subscriber; it may
        // not exist yet, in which case the deliveries carry no event FK.
        let event_id = EventRepo::latest_id(&self.pool, &event.domain, &event.event_type).await?;

        for user_id in determine_targets(event) {
            self.dispatch_to_user(&campaign, event, event_id, user_id)
                .await?;
        }

        Ok(())
    }

    /// Evaluate preferences and attempt delivery on each campaign channel.
    async fn dispatch_to_user(
        &self,
        campaign: &Campaign,
        event: &DomainEvent,
        event_id: Option<DbId>,
        user_id: DbId,
    ) -> Result<(), sqlx::Error> {
        let user = match UserRepo::find_by_id(&self.pool, user_id).await? {
            Some(u) if u.is_active => u,
            _ => {
                tracing::debug!(user_id, "Recipient missing or inactive, skipping");
                return Ok(());
            }
        };

        for channel in campaign.channel_names() {
            // Per-channel preference; default is enabled.
            let enabled = PreferenceRepo::get(&self.pool, user_id, &channel)
                .await?
                .map(|p| p.enabled)
                .unwrap_or(true);
            if !enabled {
                continue;
            }

            self.deliver_on_channel(campaign, event, event_id, &user, &channel)
                .await?;
        }

        Ok(())
    }

    /// Render and send on one channel, recording the outcome.
    async fn deliver_on_channel(
        &self,
        campaign: &Campaign,
        event: &DomainEvent,
        event_id: Option<DbId>,
        user: &User,
        channel: &str,
    ) -> Result<(), sqlx::Error> {
        let template = match TemplateRepo::find_with_fallback(
            &self.pool,
            &campaign.template_key,
            channel,
            &user.locale,
        )
        .await?
        {
            Some(t) => t,
            None => {
                let error = format!(
                    "no template for key '{}' on channel '{}'",
                    campaign.template_key, channel
                );
                DeliveryRepo::create_failed(&self.pool, campaign.id, event_id, user.id, channel, &error)
                    .await?;
                tracing::warn!(
                    template_key = %campaign.template_key,
                    channel,
                    "Missing notification template"
                );
                return Ok(());
            }
        };

        let recipient = match recipient_for_channel(channel, user) {
            Ok(r) => r,
            Err(error) => {
                DeliveryRepo::create_failed(&self.pool, campaign.id, event_id, user.id, channel, &error)
                    .await?;
                return Ok(());
            }
        };

        let subject = template
            .subject
            .as_deref()
            .map(|s| template::render(s, &event.payload));
        let body = template::render(&template.body, &event.payload);

        let delivery_id = DeliveryRepo::create_pending(
            &self.pool,
            campaign.id,
            event_id,
            user.id,
            channel,
            recipient.as_deref(),
            subject.as_deref(),
            &body,
        )
        .await?;

        // Exactly one send attempt; the row records the outcome.
        let outcome = self
            .send(channel, recipient.as_deref(), subject.as_deref(), &body)
            .await;

        match outcome {
            Ok(()) => DeliveryRepo::mark_sent(&self.pool, delivery_id).await?,
            Err(error) => {
                tracing::warn!(
                    delivery_id,
                    channel,
                    user_id = user.id,
                    error = %error,
                    "Notification delivery failed"
                );
                DeliveryRepo::mark_failed(&self.pool, delivery_id, &error).await?;
            }
        }

        Ok(())
    }

    /// Invoke the channel sender. Returns a human-readable error on failure.
    async fn send(
        &self,
        channel: &str,
        recipient: Option<&str>,
        subject: Option<&str>,
        body: &str,
    ) -> Result<(), String> {
        match channel {
            CHANNEL_EMAIL => {
                let mailer = self
                    .email
                    .as_ref()
                    .ok_or_else(|| "email delivery not configured".to_string())?;
                let to = recipient.ok_or_else(|| "missing email recipient".to_string())?;
                mailer
                    .deliver(to, subject.unwrap_or("Storyweave notification"), body)
                    .await
                    .map_err(|e| e.to_string())
            }
            CHANNEL_SMS => {
                let sender = self
                    .sms
                    .as_ref()
                    .ok_or_else(|| "sms delivery not configured".to_string())?;
                let to = recipient.ok_or_else(|| "missing sms recipient".to_string())?;
                sender.deliver(to, body).await.map_err(|e| e.to_string())
            }
            // In-app notifications are the stored row itself; the client
            // polls the deliveries endpoint.
            CHANNEL_IN_APP => Ok(()),
            other => Err(format!("unknown delivery channel '{other}'")),
        }
    }
}

/// Determine which users should receive notifications for an event.
///
/// Events may designate explicit recipients via a `recipient_user_ids`
/// payload array (shares, mentions); otherwise the acting user is notified
/// of the outcome of their own request.
pub fn determine_targets(event: &DomainEvent) -> Vec<DbId> {
    if let Some(ids) = event.payload.get("recipient_user_ids") {
        if let Ok(ids) = serde_json::from_value::<Vec<DbId>>(ids.clone()) {
            return ids;
        }
    }
    event.actor_user_id.into_iter().collect()
}

/// Resolve the destination address for a channel from the user row.
///
/// Returns `Ok(None)` for channels without an external address (in-app),
/// and `Err` with a ledger-ready message when the user lacks the address.
pub fn recipient_for_channel(channel: &str, user: &User) -> Result<Option<String>, String> {
    match channel {
        CHANNEL_EMAIL => Ok(Some(user.email.clone())),
        CHANNEL_SMS => match &user.phone {
            Some(phone) => Ok(Some(phone.clone())),
            None => Err("user has no phone number".to_string()),
        },
        _ => Ok(None),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_user(phone: Option<&str>) -> User {
        User {
            id: 1,
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: phone.map(str::to_string),
            locale: "en".to_string(),
            password_hash: "hash".to_string(),
            role_id: 2,
            is_active: true,
            last_login_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn explicit_recipients_win_over_actor() {
        let event = DomainEvent::new("story", "shared")
            .with_actor(7)
            .with_payload(serde_json::json!({"recipient_user_ids": [3, 4]}));
        assert_eq!(determine_targets(&event), vec![3, 4]);
    }

    #[test]
    fn actor_is_the_default_target() {
        let event = DomainEvent::new("video", "render_completed").with_actor(9);
        assert_eq!(determine_targets(&event), vec![9]);
    }

    #[test]
    fn no_actor_and_no_recipients_yields_nobody() {
        let event = DomainEvent::new("video", "render_completed");
        assert!(determine_targets(&event).is_empty());
    }

    #[test]
    fn malformed_recipient_list_falls_back_to_actor() {
        let event = DomainEvent::new("story", "shared")
            .with_actor(5)
            .with_payload(serde_json::json!({"recipient_user_ids": "oops"}));
        assert_eq!(determine_targets(&event), vec![5]);
    }

    #[test]
    fn email_channel_uses_email_address() {
        let user = test_user(None);
        assert_eq!(
            recipient_for_channel("email", &user).unwrap(),
            Some("ada@example.com".to_string())
        );
    }

    #[test]
    fn sms_channel_requires_phone() {
        let with_phone = test_user(Some("+15551234"));
        assert_eq!(
            recipient_for_channel("sms", &with_phone).unwrap(),
            Some("+15551234".to_string())
        );

        let without = test_user(None);
        let err = recipient_for_channel("sms", &without).unwrap_err();
        assert_eq!(err, "user has no phone number");
    }

    #[test]
    fn in_app_channel_has_no_external_address() {
        let user = test_user(None);
        assert_eq!(recipient_for_channel("in_app", &user).unwrap(), None);
    }
}
