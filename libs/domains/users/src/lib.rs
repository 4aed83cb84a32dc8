//! Users Domain
//!
//! Client-side management of user records kept in a remote REST collection.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │ Controller  │  ← Events (submit, edit, delete), editing cursor
//! └──┬───────┬──┘
//!    │       │
//! ┌──▼───┐ ┌─▼────────────┐      ┌──────────┐
//! │ Api  │ │ Store        │─────▶│   View   │  ← Form inputs, table markup
//! └──────┘ │ (observable) │ sync └──────────┘
//!          └──────────────┘
//! ```
//!
//! The API client is a trait ([`UsersApi`]) with an HTTP implementation
//! ([`HttpUsersApi`]) and an in-process fake ([`InMemoryUsersApi`]).
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{HttpUsersApi, UsersController, UsersView};
//!
//! # async fn run() -> domain_users::UserResult<()> {
//! let api = HttpUsersApi::new("http://localhost:3000/users");
//! let mut controller = UsersController::new(api, UsersView::new());
//!
//! // Subscribes the table render and loads the initial list
//! controller.init().await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod controller;
pub mod error;
pub mod memory;
pub mod models;
pub mod store;
pub mod view;

// Re-export commonly used types
pub use client::{HttpUsersApi, UsersApi};
pub use controller::UsersController;
pub use error::{UserError, UserResult};
pub use memory::InMemoryUsersApi;
pub use models::{User, UserFields, UserId};
pub use store::{Observable, StoreError, UserStore};
pub use view::{AddButtonLabel, UsersView};
