//! microsvc: Convention-based command handler framework.
//!
//! Build a service by registering async command handlers on a `Service`.
//! Each handler receives a `Context<R>` with access to the input payload
//! and the shared state.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use askgate::microsvc;
//! use serde_json::json;
//!
//! let service = Arc::new(
//!     microsvc::Service::new(state)
//!         .command("ping", |_ctx| async { Ok(json!({ "pong": true })) })
//! );
//!
//! // Direct dispatch
//! let result = service.dispatch("ping", json!({})).await;
//!
//! // HTTP transport (requires "http" feature)
//! // microsvc::serve(service, "0.0.0.0:3000", shutdown).await?;
//! ```
//!
//! ## Handler Convention
//!
//! Each handler file follows this convention:
//!
//! ```ignore
//! // src/handlers/remaining.rs
//!
//! pub const COMMAND: &str = "remaining";
//!
//! pub fn guard<R>(ctx: &microsvc::Context<R>) -> bool {
//!     ctx.has_any_field(&["email", "identity"])
//! }
//!
//! pub async fn handle<S: AccountStore>(
//!     ctx: microsvc::Context<App<S>>,
//! ) -> Result<Value, microsvc::HandlerError> {
//!     let input = ctx.input_aliased::<Input>(ALIASES)?;
//!     let remaining = ctx.state().quota().remaining(&input.email)?;
//!     Ok(json!({ "remaining": remaining }))
//! }
//! ```

mod context;
mod error;
mod service;

pub use context::Context;
pub use error::HandlerError;
pub use service::Service;

// HTTP transport (requires "http" feature)
#[cfg(feature = "http")]
mod http;
#[cfg(feature = "http")]
pub use http::{router, serve};

/// Register handler modules with a service using the convention pattern.
///
/// Each handler module must export:
/// - `COMMAND: &str`: the command name
/// - `guard(ctx) -> bool`: input validation
/// - `handle(ctx) -> impl Future<Output = Result<Value, HandlerError>>`: the handler
///
/// # Example
/// ```ignore
/// let service = askgate::register_handlers!(
///     microsvc::Service::new(app),
///     handlers::register,
///     handlers::login,
/// );
/// ```
#[macro_export]
macro_rules! register_handlers {
    ($service:expr, $( $($seg:ident)::+ ),+ $(,)?) => {
        $service
        $(
            .command_guarded(
                $($seg)::+::COMMAND,
                $($seg)::+::guard,
                $($seg)::+::handle,
            )
        )+
    };
}
