use std::sync::Arc;

use serde::{Serialize, de::DeserializeOwned};

use crate::{
    command::CommandClient,
    config::Settings,
    error::AppError,
    invalidate::Invalidator,
    notify::Notifier,
    query::{QueryClient, QueryKey, QueryOptions, QuerySpec, Refetch},
};

/// Handle passed to every resource operation: the backend, the query cache
/// and the notification sink, plus the settings they were built with.
#[derive(Clone)]
pub struct Hub {
    client: Arc<dyn CommandClient>,
    queries: QueryClient,
    notifier: Arc<dyn Notifier>,
    settings: Settings,
}

impl Hub {
    pub fn new(
        client: Arc<dyn CommandClient>,
        notifier: Arc<dyn Notifier>,
        settings: Settings,
    ) -> Self {
        Self {
            client,
            queries: QueryClient::new(&settings),
            notifier,
            settings,
        }
    }

    pub fn client(&self) -> &dyn CommandClient {
        self.client.as_ref()
    }

    pub fn queries(&self) -> &QueryClient {
        &self.queries
    }

    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn invalidator(&self) -> Invalidator {
        let refetch = if self.settings.refetch_active {
            Refetch::Active
        } else {
            Refetch::None
        };
        Invalidator::new(self.queries.clone(), refetch)
    }

    /// Query whose fetcher invokes `command` with `args`
    pub fn command_query<A, T>(&self, key: QueryKey, command: &'static str, args: &A) -> QuerySpec<T>
    where
        A: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.command_query_with(key, self.queries.default_options(), command, args)
    }

    pub fn command_query_with<A, T>(
        &self,
        key: QueryKey,
        options: QueryOptions,
        command: &'static str,
        args: &A,
    ) -> QuerySpec<T>
    where
        A: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let args = serde_json::to_value(args).map_err(AppError::from);
        let client = self.client.clone();

        QuerySpec::new(key, options, move || {
            let client = client.clone();
            let args = args.clone();
            async move {
                let args = args?;
                client.invoke(command, args).await.map_err(AppError::from)
            }
        })
    }

    pub async fn fetch<T: DeserializeOwned>(&self, spec: &QuerySpec<T>) -> Result<T, AppError> {
        self.queries.fetch(spec).await
    }
}
