//! Fetch state for list pages.
//!
//! A query re-runs whenever its key changes. Responses of superseded runs are
//! dropped, so the newest key always wins.

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api_utils::ApiError;

pub struct QueryState<T: Send + Sync + 'static> {
    pub data: RwSignal<Option<T>>,
    pub is_loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
    refresh: RwSignal<u64>,
}

impl<T: Send + Sync + 'static> Clone for QueryState<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Send + Sync + 'static> Copy for QueryState<T> {}

impl<T: Send + Sync + 'static> QueryState<T> {
    pub fn refetch(&self) {
        self.refresh.update(|n| *n += 1);
    }

    pub fn is_error(&self) -> bool {
        self.error.with(Option::is_some)
    }

    /// View of this query's data through `f`; loading, error and refetch are shared
    pub fn map<U: Send + Sync + 'static>(self, f: impl Fn(&T) -> U + 'static) -> QueryState<U> {
        let data = RwSignal::new(None);
        Effect::new(move |_| data.set(self.data.with(|d| d.as_ref().map(&f))));
        QueryState {
            data,
            is_loading: self.is_loading,
            error: self.error,
            refresh: self.refresh,
        }
    }
}

pub fn use_query<K, T, Fut>(
    key: impl Fn() -> K + 'static,
    fetch: impl Fn(K) -> Fut + 'static,
) -> QueryState<T>
where
    K: 'static,
    T: Send + Sync + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let state = QueryState {
        data: RwSignal::new(None),
        is_loading: RwSignal::new(true),
        error: RwSignal::new(None),
        refresh: RwSignal::new(0),
    };
    let latest = StoredValue::new(0u64);

    Effect::new(move |_| {
        state.refresh.track();
        let request = fetch(key());
        let run = latest.get_value() + 1;
        latest.set_value(run);
        state.is_loading.set(true);

        spawn_local(async move {
            let result = request.await;
            if latest.get_value() != run {
                return;
            }
            match result {
                Ok(data) => {
                    state.data.set(Some(data));
                    state.error.set(None);
                }
                Err(e) => {
                    log::warn!("fetch failed: {}", e);
                    state.error.set(Some(e.to_string()));
                }
            }
            state.is_loading.set(false);
        });
    });

    state
}
