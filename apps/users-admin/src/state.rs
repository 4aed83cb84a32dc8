//! Application state management

use domain_users::{UserResult, UsersApi, UsersController};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::warn;

/// The controller plus the outcome of the last event, shown on the page
pub struct Session<A: UsersApi> {
    pub controller: UsersController<A>,
    pub notice: Option<String>,
}

impl<A: UsersApi> Session<A> {
    /// Remember a failed event for the next page render; success clears it.
    pub fn record<T>(&mut self, event: &str, result: UserResult<T>) {
        self.notice = match result {
            Ok(_) => None,
            Err(e) => {
                warn!(event = event, error = %e, "Users event failed");
                Some(e.to_string())
            }
        };
    }

    /// Remember a request that never reached the controller.
    pub fn reject(&mut self, event: &str, reason: String) {
        warn!(event = event, reason = %reason, "Users event rejected");
        self.notice = Some(reason);
    }
}

/// Shared application state
///
/// Browser requests may arrive concurrently; the mutex makes each event
/// run to completion before the next one starts.
pub struct AppState<A: UsersApi> {
    session: Arc<Mutex<Session<A>>>,
}

impl<A: UsersApi> AppState<A> {
    pub fn new(controller: UsersController<A>, notice: Option<String>) -> Self {
        Self {
            session: Arc::new(Mutex::new(Session { controller, notice })),
        }
    }

    pub async fn lock(&self) -> tokio::sync::MutexGuard<'_, Session<A>> {
        self.session.lock().await
    }
}

impl<A: UsersApi> Clone for AppState<A> {
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
        }
    }
}
