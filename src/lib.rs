//! Quota-limited HTTP gateway to a chat completion API.
//!
//! Accounts live in a single JSON document ([`store`]). Each identity may
//! ask [`DAILY_LIMIT`] questions per UTC day; questions are forwarded to an
//! OpenAI-compatible completion endpoint ([`completion`]). The HTTP surface
//! is a [`microsvc`] service with one command per route.

mod account;
mod app;
mod auth;
mod clock;
mod config;
pub mod completion;
pub mod credential;
mod gateway;
pub mod handlers;
pub mod microsvc;
mod quota;
pub mod store;

pub use account::{Account, Accounts, DAILY_LIMIT};
pub use app::App;
pub use auth::{AuthError, AuthService};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use gateway::{AskError, CompletionGateway};
pub use quota::{QuotaError, QuotaTracker};
