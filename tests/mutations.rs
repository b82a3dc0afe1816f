use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use account_hub::{
    CommandError, MutationDescriptor, MutationStatus,
    command::args::{AccountArgs, ToggleAccountArgs},
    domain::AccountId,
    mutation,
    notify::messages,
    query::keys,
    resources::accounts,
};
use serde_json::json;

mod common;

use common::Notice;

fn seed(hub: &account_hub::Hub) {
    for key in [
        keys::accounts::list(false),
        keys::accounts::detail(&AccountId::new("acct-1")),
        keys::providers::list(),
        keys::notification_channels(),
    ] {
        hub.queries().set_query_data(&key, &json!([])).unwrap();
    }
}

#[tokio::test]
async fn descriptor_without_invalidation_targets_accounts_root() {
    let (hub, backend, _) = common::hub();
    seed(&hub);
    backend.respond("rename_everything", json!(null));

    let m = mutation::<AccountArgs, ()>(&hub, MutationDescriptor::new("rename_everything"));
    m.execute(AccountArgs {
        account_id: AccountId::new("acct-1"),
    })
    .await
    .unwrap();

    let q = hub.queries();
    assert!(q.is_stale(&keys::accounts::list(false)));
    assert!(q.is_stale(&keys::accounts::detail(&AccountId::new("acct-1"))));
    assert!(!q.is_stale(&keys::providers::list()));
    assert!(!q.is_stale(&keys::notification_channels()));
}

#[tokio::test]
async fn failed_mutation_only_logs_and_notifies() {
    let (hub, backend, notifier) = common::hub();
    seed(&hub);
    backend.fail(
        "toggle_account",
        CommandError::Structured {
            code: 4004,
            message: "account not found".to_string(),
            severity: None,
            recoverable: Some(false),
            details: None,
        },
    );

    let seen = Arc::new(AtomicUsize::new(0));
    let succeeded = Arc::new(AtomicUsize::new(0));
    let m = {
        let seen = seen.clone();
        let succeeded = succeeded.clone();
        accounts::toggle(&hub)
            .on_error(move |e| {
                assert_eq!(e.code, Some(4004));
                seen.fetch_add(1, Ordering::SeqCst);
            })
            .on_success(move |_| {
                succeeded.fetch_add(1, Ordering::SeqCst);
            })
    };

    let err = m
        .execute(ToggleAccountArgs {
            account_id: AccountId::new("acct-1"),
            enabled: false,
        })
        .await
        .unwrap_err();

    assert_eq!(err.message, "account not found");
    assert!(!err.is_recoverable());
    assert_eq!(seen.load(Ordering::SeqCst), 1);
    assert_eq!(succeeded.load(Ordering::SeqCst), 0);
    assert_eq!(
        notifier.notices(),
        vec![Notice::Error(
            messages::COMMON_ERROR.to_string(),
            "account not found".to_string()
        )]
    );
    assert_eq!(m.status(), MutationStatus::Error);
    assert_eq!(m.error().map(|e| e.code), Some(Some(4004)));

    let q = hub.queries();
    assert!(!q.is_stale(&keys::accounts::list(false)));
    assert!(!q.is_stale(&keys::accounts::detail(&AccountId::new("acct-1"))));
}

#[tokio::test]
async fn invalidation_lands_before_notification_and_callback() {
    let (hub, backend, notifier) = common::hub();
    seed(&hub);
    backend.respond("toggle_account", json!(null));

    let list = keys::accounts::list(false);
    notifier.watch(hub.queries().clone(), list.clone());

    let stale_in_callback = Arc::new(Mutex::new(None));
    let m = {
        let queries = hub.queries().clone();
        let list = list.clone();
        let stale_in_callback = stale_in_callback.clone();
        accounts::toggle(&hub).on_success(move |_| {
            *stale_in_callback.lock().unwrap() = Some(queries.is_stale(&list));
        })
    };

    m.execute(ToggleAccountArgs {
        account_id: AccountId::new("acct-1"),
        enabled: true,
    })
    .await
    .unwrap();

    assert_eq!(notifier.stale_at_notice(), vec![true]);
    assert_eq!(*stale_in_callback.lock().unwrap(), Some(true));
    assert_eq!(notifier.successes(), vec![messages::ACCOUNT_TOGGLED]);
}

#[tokio::test]
async fn status_data_and_reset() {
    let (hub, backend, _) = common::hub();
    backend.respond("export_accounts_to_json", json!("[{\"name\":\"a\"}]"));

    let m = accounts::export_to_json(&hub);
    assert_eq!(m.status(), MutationStatus::Idle);
    assert!(m.data().is_none());

    let exported = m
        .execute(account_hub::command::args::ExportAccountsArgs {
            account_ids: vec![AccountId::new("acct-1")],
            include_credentials: false,
        })
        .await
        .unwrap();

    assert_eq!(exported, "[{\"name\":\"a\"}]");
    assert_eq!(m.status(), MutationStatus::Success);
    assert_eq!(m.data(), Some(exported));
    assert!(!m.is_pending());

    m.reset();
    assert_eq!(m.status(), MutationStatus::Idle);
    assert!(m.data().is_none());
    assert!(m.error().is_none());
}

#[tokio::test]
async fn export_leaves_cache_untouched() {
    let (hub, backend, _) = common::hub();
    seed(&hub);
    backend.respond("export_accounts_to_json", json!("[]"));

    accounts::export_to_json(&hub)
        .execute(account_hub::command::args::ExportAccountsArgs {
            account_ids: vec![],
            include_credentials: true,
        })
        .await
        .unwrap();

    assert!(!hub.queries().is_stale(&keys::accounts::list(false)));
}

#[tokio::test]
async fn undecodable_result_is_an_error() {
    let (hub, backend, notifier) = common::hub();
    backend.respond("create_account", json!({ "unexpected": true }));

    let result = accounts::create(&hub)
        .execute(account_hub::command::args::CreateAccountArgs {
            input: serde_json::from_value(json!({
                "name": "main",
                "provider_id": "anyrouter",
                "cookies": {},
                "api_user": "1001"
            }))
            .unwrap(),
        })
        .await;

    let err = result.unwrap_err();
    assert!(err.message.starts_with("malformed command payload"));
    assert_eq!(notifier.errors().len(), 1);
    assert!(notifier.successes().is_empty());
}

#[tokio::test]
async fn unreadable_reply_still_invalidates_the_default_scope() {
    let (hub, backend, notifier) = common::hub();
    seed(&hub);
    backend.respond("rename_account", json!({ "renamed": true }));

    let m = mutation::<AccountArgs, AccountId>(&hub, MutationDescriptor::new("rename_account"));
    let err = m
        .execute(AccountArgs {
            account_id: AccountId::new("acct-1"),
        })
        .await
        .unwrap_err();

    assert!(err.message.starts_with("malformed command payload"));
    assert!(hub.queries().is_stale(&keys::accounts::list(false)));
    assert!(!hub.queries().is_stale(&keys::providers::list()));
    assert_eq!(notifier.errors().len(), 1);
    assert!(notifier.successes().is_empty());
    assert_eq!(m.status(), MutationStatus::Error);
}

#[tokio::test]
async fn rejected_command_leaves_fixed_keys_alone() {
    let (hub, backend, _) = common::hub();
    seed(&hub);
    backend.fail("rename_account", CommandError::Plain("nope".to_string()));

    let m = mutation::<AccountArgs, ()>(
        &hub,
        MutationDescriptor::new("rename_account").invalidates(vec![keys::providers::list()]),
    );
    m.execute(AccountArgs {
        account_id: AccountId::new("acct-1"),
    })
    .await
    .unwrap_err();

    assert!(!hub.queries().is_stale(&keys::providers::list()));
}

#[tokio::test(start_paused = true)]
async fn cancelled_mutation_is_no_longer_pending() {
    let (hub, backend, notifier) = common::hub();
    seed(&hub);
    backend.hang("toggle_account");

    let m = accounts::toggle(&hub);
    let timed_out = tokio::time::timeout(
        std::time::Duration::from_millis(5),
        m.execute(ToggleAccountArgs {
            account_id: AccountId::new("acct-1"),
            enabled: false,
        }),
    )
    .await;

    assert!(timed_out.is_err());
    assert_eq!(m.status(), MutationStatus::Idle);
    assert!(!m.is_pending());
    assert!(notifier.notices().is_empty());
    assert!(!hub.queries().is_stale(&keys::accounts::list(false)));
}
