use crate::{
    command::{
        args::{
            AccountArgs, CreateAccountArgs, ExportAccountsArgs, FetchAccountArgs, ImportJsonArgs,
            ListAccountsArgs, ToggleAccountArgs, UpdateAccountArgs,
        },
        names,
    },
    domain::{Account, AccountDetail, AccountId, ApiToken, BatchImportResult},
    hub::Hub,
    mutation::{Mutation, MutationDescriptor, mutation},
    notify::messages,
    query::{QuerySpec, keys},
};

pub fn list_query(hub: &Hub, enabled_only: bool) -> QuerySpec<Vec<Account>> {
    hub.command_query(
        keys::accounts::list(enabled_only),
        names::GET_ALL_ACCOUNTS,
        &ListAccountsArgs { enabled_only },
    )
}

pub fn detail_query(hub: &Hub, id: &AccountId) -> QuerySpec<AccountDetail> {
    hub.command_query(
        keys::accounts::detail(id),
        names::GET_ACCOUNT_DETAIL,
        &AccountArgs {
            account_id: id.clone(),
        },
    )
}

/// API tokens of an account. `force_refresh` asks the backend to bypass its own cache.
pub fn tokens_query(hub: &Hub, id: &AccountId, force_refresh: bool) -> QuerySpec<Vec<ApiToken>> {
    hub.command_query(
        keys::accounts::token_list(id, force_refresh),
        names::FETCH_ACCOUNT_TOKENS,
        &FetchAccountArgs {
            account_id: id.clone(),
            force_refresh,
        },
    )
}

pub fn create(hub: &Hub) -> Mutation<CreateAccountArgs, AccountId> {
    mutation(
        hub,
        MutationDescriptor::new(names::CREATE_ACCOUNT)
            .invalidate_with(|inv, _, _| {
                inv.invalidate_all_accounts();
            })
            .success_message(messages::ACCOUNT_CREATED)
            .log_prefix("create account"),
    )
}

pub fn update(hub: &Hub) -> Mutation<UpdateAccountArgs, ()> {
    mutation(
        hub,
        MutationDescriptor::new(names::UPDATE_ACCOUNT)
            .invalidate_with(|inv, args: &UpdateAccountArgs, _| {
                inv.invalidate_account(&args.input.account_id);
                inv.invalidate_all_accounts();
            })
            .success_message(messages::ACCOUNT_UPDATED)
            .log_prefix("update account"),
    )
}

/// Deleting drops the account's own scopes outright instead of marking them stale
pub fn delete(hub: &Hub) -> Mutation<AccountArgs, ()> {
    mutation(
        hub,
        MutationDescriptor::new(names::DELETE_ACCOUNT)
            .invalidate_with(|inv, args: &AccountArgs, _| {
                let queries = inv.queries();
                queries.remove(&keys::accounts::detail(&args.account_id));
                queries.remove(&keys::check_in::account_history(&args.account_id));
                queries.remove(&keys::check_in::streak(&args.account_id));
                inv.invalidate_all_accounts();
            })
            .success_message(messages::ACCOUNT_DELETED)
            .log_prefix("delete account"),
    )
}

pub fn toggle(hub: &Hub) -> Mutation<ToggleAccountArgs, ()> {
    mutation(
        hub,
        MutationDescriptor::new(names::TOGGLE_ACCOUNT)
            .invalidate_with(|inv, args: &ToggleAccountArgs, _| {
                inv.invalidate_account(&args.account_id);
                inv.invalidate_all_accounts();
            })
            .success_message(messages::ACCOUNT_TOGGLED)
            .log_prefix("toggle account"),
    )
}

pub fn import_from_json(hub: &Hub) -> Mutation<ImportJsonArgs, AccountId> {
    mutation(
        hub,
        MutationDescriptor::new(names::IMPORT_ACCOUNT_FROM_JSON)
            .invalidate_with(|inv, _, _| {
                inv.invalidate_all_accounts();
            })
            .success_message(messages::ACCOUNT_IMPORTED)
            .error_message(messages::ACCOUNT_IMPORT_FAILED)
            .log_prefix("import account"),
    )
}

pub fn import_batch(hub: &Hub) -> Mutation<ImportJsonArgs, BatchImportResult> {
    mutation(
        hub,
        MutationDescriptor::new(names::IMPORT_ACCOUNTS_BATCH)
            .invalidate_with(|inv, _, result: &BatchImportResult| {
                if result.succeeded > 0 {
                    inv.invalidate_all_accounts();
                }
            })
            .success_message(messages::ACCOUNT_IMPORTED)
            .error_message(messages::ACCOUNT_IMPORT_FAILED)
            .log_prefix("batch import accounts"),
    )
}

/// Returns the exported JSON document; nothing in the cache changes
pub fn export_to_json(hub: &Hub) -> Mutation<ExportAccountsArgs, String> {
    mutation(
        hub,
        MutationDescriptor::new(names::EXPORT_ACCOUNTS_TO_JSON)
            .no_invalidation()
            .success_message(messages::ACCOUNTS_EXPORTED)
            .log_prefix("export accounts"),
    )
}
