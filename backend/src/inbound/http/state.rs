//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` and depend only on the
//! domain service, so they stay testable with any [`UserStore`].
//!
//! [`UserStore`]: crate::domain::ports::UserStore

use std::sync::Arc;

use crate::domain::UserService;
use crate::domain::ports::UserStore;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// User use-cases.
    pub users: UserService,
}

impl HttpState {
    /// Construct state over the given store.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use users_api::inbound::http::state::HttpState;
    /// use users_api::test_support::InMemoryUserStore;
    ///
    /// let state = HttpState::new(Arc::new(InMemoryUserStore::default()));
    /// let _users = state.users.clone();
    /// ```
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self {
            users: UserService::new(store),
        }
    }
}
