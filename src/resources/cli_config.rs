use crate::{
    command::{
        args::{CliConfigArgs, ModelCompatibilityArgs},
        names,
    },
    domain::{CliTool, ModelCompatibility},
    hub::Hub,
    mutation::{Mutation, MutationDescriptor, mutation},
    notify::messages,
    query::{QuerySpec, keys},
};

/// Write a token into the tool's global configuration. Nothing cached depends
/// on those files.
pub fn configure_global(hub: &Hub, tool: CliTool) -> Mutation<CliConfigArgs, String> {
    let command = match tool {
        CliTool::Claude => names::CONFIGURE_CLAUDE_GLOBAL,
        CliTool::Codex => names::CONFIGURE_CODEX_GLOBAL,
    };
    mutation(
        hub,
        MutationDescriptor::new(command)
            .no_invalidation()
            .success_message(messages::CLI_CONFIGURED)
            .log_prefix("configure cli"),
    )
}

/// Shell commands that point the tool at a token for one session
pub fn temp_commands(hub: &Hub, tool: CliTool) -> Mutation<CliConfigArgs, String> {
    let command = match tool {
        CliTool::Claude => names::GENERATE_CLAUDE_TEMP_COMMANDS,
        CliTool::Codex => names::GENERATE_CODEX_TEMP_COMMANDS,
    };
    mutation(
        hub,
        MutationDescriptor::new(command)
            .no_invalidation()
            .log_prefix("generate temp commands"),
    )
}

pub fn compatibility_query(
    hub: &Hub,
    tool: CliTool,
    base_url: &str,
    model: &str,
) -> QuerySpec<ModelCompatibility> {
    hub.command_query(
        keys::model_compatibility(tool, base_url, model),
        names::CHECK_MODEL_COMPATIBILITY,
        &ModelCompatibilityArgs {
            tool,
            base_url: base_url.to_string(),
            model: model.to_string(),
        },
    )
}
