use crate::{
    command::{
        args::{NoArgs, UpdateProxyArgs},
        names,
    },
    domain::ProxyConfig,
    hub::Hub,
    mutation::{Mutation, MutationDescriptor, mutation},
    notify::messages,
    query::{QuerySpec, keys},
};

pub fn config_query(hub: &Hub) -> QuerySpec<ProxyConfig> {
    hub.command_query(keys::proxy_config(), names::GET_PROXY_CONFIG, &NoArgs {})
}

pub fn update(hub: &Hub) -> Mutation<UpdateProxyArgs, ()> {
    mutation(
        hub,
        MutationDescriptor::new(names::UPDATE_PROXY_CONFIG)
            .invalidate_with(|inv, _, _| {
                inv.invalidate_proxy_config();
            })
            .success_message(messages::PROXY_SAVED)
            .log_prefix("update proxy config"),
    )
}
