use crate::{
    command::{
        args::{
            AddCustomNodeArgs, CreateProviderArgs, DeleteCustomNodeArgs, NoArgs, ProviderArgs,
            RefreshModelsArgs, UpdateProviderArgs,
        },
        names,
    },
    domain::{Provider, ProviderId, ProviderNodes, RawProviderNode},
    error::AppError,
    hub::Hub,
    mutation::{Mutation, MutationDescriptor, mutation},
    notify::messages,
    query::{QuerySpec, keys},
};

pub fn list_query(hub: &Hub) -> QuerySpec<Vec<Provider>> {
    hub.command_query(keys::providers::list(), names::GET_ALL_PROVIDERS, &NoArgs {})
}

/// Models the backend has cached for a provider. These only change through an
/// explicit refresh, so the query never goes stale on its own.
pub fn models_query(hub: &Hub, id: &ProviderId) -> QuerySpec<Vec<String>> {
    hub.command_query_with(
        keys::provider_models(id),
        hub.queries().default_options().never_stale(),
        names::GET_CACHED_PROVIDER_MODELS,
        &ProviderArgs {
            provider_id: id.clone(),
        },
    )
}

pub fn nodes_query(hub: &Hub, id: &ProviderId) -> QuerySpec<Vec<RawProviderNode>> {
    hub.command_query(
        keys::provider_nodes(id),
        names::GET_PROVIDER_NODES,
        &ProviderArgs {
            provider_id: id.clone(),
        },
    )
}

/// Node list with its default node resolved
pub async fn nodes(hub: &Hub, id: &ProviderId) -> Result<ProviderNodes, AppError> {
    let raw = hub.fetch(&nodes_query(hub, id)).await?;
    ProviderNodes::try_from(raw).map_err(|e| {
        tracing::warn!(provider = %id, error = %e, "unusable node list");
        AppError::new(e.to_string())
    })
}

pub fn create(hub: &Hub) -> Mutation<CreateProviderArgs, ProviderId> {
    mutation(
        hub,
        MutationDescriptor::new(names::CREATE_PROVIDER)
            .invalidate_with(|inv, _, _| {
                inv.invalidate_provider(None);
            })
            .success_message(messages::PROVIDER_CREATED)
            .log_prefix("create provider"),
    )
}

/// Accounts carry the provider name, so their lists go stale too
pub fn update(hub: &Hub) -> Mutation<UpdateProviderArgs, ()> {
    mutation(
        hub,
        MutationDescriptor::new(names::UPDATE_PROVIDER)
            .invalidate_with(|inv, args: &UpdateProviderArgs, _| {
                inv.invalidate_provider(Some(&args.provider_id));
                inv.invalidate_all_accounts();
            })
            .success_message(messages::PROVIDER_UPDATED)
            .log_prefix("update provider"),
    )
}

pub fn delete(hub: &Hub) -> Mutation<ProviderArgs, ()> {
    mutation(
        hub,
        MutationDescriptor::new(names::DELETE_PROVIDER)
            .invalidate_with(|inv, args: &ProviderArgs, _| {
                let queries = inv.queries();
                queries.remove(&keys::providers::detail(&args.provider_id));
                queries.remove(&keys::provider_models(&args.provider_id));
                queries.remove(&keys::provider_nodes(&args.provider_id));
                inv.invalidate_provider(None);
                inv.invalidate_all_accounts();
            })
            .success_message(messages::PROVIDER_DELETED)
            .log_prefix("delete provider"),
    )
}

/// Scrape the provider's model list (through its WAF when needed) and store it
/// directly in the models slot
pub fn refresh_models(hub: &Hub) -> Mutation<RefreshModelsArgs, Vec<String>> {
    mutation(
        hub,
        MutationDescriptor::new(names::REFRESH_PROVIDER_MODELS_WITH_WAF)
            .invalidate_with(|inv, args: &RefreshModelsArgs, models: &Vec<String>| {
                if let Err(e) = inv
                    .queries()
                    .set_query_data(&keys::provider_models(&args.provider_id), models)
                {
                    tracing::warn!(error = %e, "could not store refreshed models");
                }
            })
            .success_message(messages::MODELS_REFRESHED)
            .log_prefix("refresh provider models"),
    )
}

/// Returns the id of the new node
pub fn add_node(hub: &Hub) -> Mutation<AddCustomNodeArgs, i64> {
    mutation(
        hub,
        MutationDescriptor::new(names::ADD_CUSTOM_NODE)
            .invalidate_with(|inv, args: &AddCustomNodeArgs, _| {
                inv.invalidate_provider_nodes(&args.provider_id);
            })
            .success_message(messages::NODE_ADDED)
            .log_prefix("add custom node"),
    )
}

pub fn delete_node(hub: &Hub) -> Mutation<DeleteCustomNodeArgs, ()> {
    mutation(
        hub,
        MutationDescriptor::new(names::DELETE_CUSTOM_NODE)
            .invalidate_with(|inv, args: &DeleteCustomNodeArgs, _| {
                inv.invalidate_provider_nodes(&args.provider_id);
            })
            .success_message(messages::NODE_DELETED)
            .log_prefix("delete custom node"),
    )
}
