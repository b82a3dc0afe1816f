use crate::{
    command::{
        args::{ChannelArgs, CreateChannelArgs, NoArgs, UpdateChannelArgs},
        names,
    },
    domain::{ChannelConfig, ChannelId, NotificationChannel, RawNotificationChannel},
    error::AppError,
    hub::Hub,
    mutation::{Mutation, MutationDescriptor, mutation},
    notify::messages,
    query::{QuerySpec, keys},
};

pub fn channels_query(hub: &Hub) -> QuerySpec<Vec<RawNotificationChannel>> {
    hub.command_query(
        keys::notification_channels(),
        names::GET_ALL_NOTIFICATION_CHANNELS,
        &NoArgs {},
    )
}

/// All channels with their configs decoded. A channel whose config cannot be
/// decoded fails the whole read rather than being dropped silently.
pub async fn channels(hub: &Hub) -> Result<Vec<NotificationChannel>, AppError> {
    hub.fetch(&channels_query(hub))
        .await?
        .into_iter()
        .map(|raw| {
            let id = raw.id.clone();
            NotificationChannel::try_from(raw).map_err(|e| {
                tracing::warn!(channel = %id, error = %e, "undecodable channel config");
                AppError::new(format!("channel {id}: {e}"))
            })
        })
        .collect()
}

pub fn create_args(config: &ChannelConfig, enabled: bool) -> CreateChannelArgs {
    CreateChannelArgs {
        input: config.to_input(enabled),
    }
}

pub fn update_args(id: ChannelId, config: &ChannelConfig, enabled: bool) -> UpdateChannelArgs {
    UpdateChannelArgs {
        channel_id: id,
        input: config.to_input(enabled),
    }
}

pub fn create(hub: &Hub) -> Mutation<CreateChannelArgs, ChannelId> {
    mutation(
        hub,
        MutationDescriptor::new(names::CREATE_NOTIFICATION_CHANNEL)
            .invalidate_with(|inv, _, _| {
                inv.invalidate_notification_channels();
            })
            .success_message(messages::CHANNEL_SAVED)
            .log_prefix("create notification channel"),
    )
}

pub fn update(hub: &Hub) -> Mutation<UpdateChannelArgs, ()> {
    mutation(
        hub,
        MutationDescriptor::new(names::UPDATE_NOTIFICATION_CHANNEL)
            .invalidate_with(|inv, _, _| {
                inv.invalidate_notification_channels();
            })
            .success_message(messages::CHANNEL_SAVED)
            .log_prefix("update notification channel"),
    )
}

pub fn delete(hub: &Hub) -> Mutation<ChannelArgs, ()> {
    mutation(
        hub,
        MutationDescriptor::new(names::DELETE_NOTIFICATION_CHANNEL)
            .invalidate_with(|inv, _, _| {
                inv.invalidate_notification_channels();
            })
            .success_message(messages::CHANNEL_DELETED)
            .log_prefix("delete notification channel"),
    )
}

/// Send a test message through a channel
pub fn test(hub: &Hub) -> Mutation<ChannelArgs, ()> {
    mutation(
        hub,
        MutationDescriptor::new(names::TEST_NOTIFICATION_CHANNEL)
            .no_invalidation()
            .success_message(messages::CHANNEL_TEST_SENT)
            .error_message(messages::CHANNEL_TEST_FAILED)
            .log_prefix("test notification channel"),
    )
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use super::*;
    use crate::domain::FeishuConfig;

    #[test]
    fn channel_args_carry_the_encoded_config() {
        let config = ChannelConfig::Feishu(FeishuConfig {
            webhook_key: "abc".to_string(),
        });
        let args = update_args(ChannelId::new("ch-1"), &config, false);

        assert_eq!(
            serde_json::to_value(&args).unwrap(),
            json!({
                "channelId": "ch-1",
                "input": {
                    "channel_type": "feishu",
                    "config": "{\"webhook_key\":\"abc\"}",
                    "enabled": false
                }
            })
        );
        assert!(create_args(&config, true).input.enabled);
    }
}
