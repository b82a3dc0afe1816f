use crate::{
    command::{
        args::{AccountArgs, BatchCheckInArgs, CheckInHistoryArgs},
        names,
    },
    domain::{AccountId, BatchCheckInResult, CheckInHistoryPage, CheckInResult, CheckInStreak},
    hub::Hub,
    mutation::{Mutation, MutationDescriptor, mutation},
    notify::messages,
    query::{QuerySpec, keys},
};

pub fn history_query(
    hub: &Hub,
    id: &AccountId,
    page: u32,
    page_size: u32,
) -> QuerySpec<CheckInHistoryPage> {
    hub.command_query(
        keys::check_in::history(id, page, page_size),
        names::GET_CHECK_IN_HISTORY,
        &CheckInHistoryArgs {
            account_id: id.clone(),
            page,
            page_size,
        },
    )
}

pub fn streak_query(hub: &Hub, id: &AccountId) -> QuerySpec<CheckInStreak> {
    hub.command_query(
        keys::check_in::streak(id),
        names::GET_CHECK_IN_STREAK,
        &AccountArgs {
            account_id: id.clone(),
        },
    )
}

pub fn execute(hub: &Hub) -> Mutation<AccountArgs, CheckInResult> {
    mutation(
        hub,
        MutationDescriptor::new(names::EXECUTE_CHECK_IN)
            .invalidate_with(|inv, args: &AccountArgs, _| {
                inv.invalidate_after_check_in(&args.account_id);
            })
            .success_message(messages::CHECK_IN_DONE)
            .error_message(messages::CHECK_IN_FAILED)
            .log_prefix("check-in"),
    )
}

pub fn execute_batch(hub: &Hub) -> Mutation<BatchCheckInArgs, BatchCheckInResult> {
    mutation(
        hub,
        MutationDescriptor::new(names::EXECUTE_BATCH_CHECK_IN)
            .invalidate_with(|inv, args: &BatchCheckInArgs, _| {
                // an empty id list checks in every enabled account
                if args.account_ids.is_empty() {
                    inv.keys(&[keys::accounts::details(), keys::check_in::all()]);
                    inv.invalidate_all_accounts();
                    return;
                }
                for id in &args.account_ids {
                    inv.invalidate_after_check_in(id);
                }
            })
            .success_message(messages::BATCH_CHECK_IN_DONE)
            .error_message(messages::CHECK_IN_FAILED)
            .log_prefix("batch check-in"),
    )
}
