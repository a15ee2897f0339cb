//! Service: command handler registry and dispatch for microsvc.
//!
//! `Service<R>` holds shared state and a set of named async command handlers.
//! Each handler receives a `Context<R>` and resolves to
//! `Result<Value, HandlerError>`.
//!
//! ## Example
//!
//! ```ignore
//! use askgate::microsvc::Service;
//! use serde_json::json;
//!
//! let service = Service::new(())
//!     .command("ping", |_ctx| async { Ok(json!({ "pong": true })) });
//!
//! let result = service.dispatch("ping", json!({})).await;
//! ```

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use serde_json::Value;

use super::context::Context;
use super::error::HandlerError;

type Guard<R> = Box<dyn Fn(&Context<R>) -> bool + Send + Sync>;
type Handle<R> = Box<dyn Fn(Context<R>) -> BoxFuture<'static, Result<Value, HandlerError>> + Send + Sync>;

/// A registered command handler with optional guard.
struct CommandHandler<R> {
    guard: Option<Guard<R>>,
    handle: Handle<R>,
}

/// A microservice that routes commands to handler functions.
///
/// Generic over `R`, the shared state. Handlers reach it via `ctx.state()`.
pub struct Service<R> {
    state: Arc<R>,
    handlers: HashMap<String, CommandHandler<R>>,
}

impl<R: Send + Sync + 'static> Service<R> {
    pub fn new(state: R) -> Self {
        Self {
            state: Arc::new(state),
            handlers: HashMap::new(),
        }
    }

    /// Register a command handler.
    ///
    /// Uses builder pattern: returns `self` for chaining.
    pub fn command<F, Fut>(mut self, name: &str, handler: F) -> Self
    where
        F: Fn(Context<R>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, HandlerError>> + Send + 'static,
    {
        self.handlers.insert(
            name.to_string(),
            CommandHandler {
                guard: None,
                handle: Box::new(move |ctx| handler(ctx).boxed()),
            },
        );
        self
    }

    /// Register a command handler with a guard function.
    ///
    /// The guard runs before the handler. If it returns `false`, the command
    /// is rejected with `HandlerError::GuardRejected` and the handler never
    /// runs.
    pub fn command_guarded<G, F, Fut>(mut self, name: &str, guard: G, handler: F) -> Self
    where
        G: Fn(&Context<R>) -> bool + Send + Sync + 'static,
        F: Fn(Context<R>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, HandlerError>> + Send + 'static,
    {
        self.handlers.insert(
            name.to_string(),
            CommandHandler {
                guard: Some(Box::new(guard)),
                handle: Box::new(move |ctx| handler(ctx).boxed()),
            },
        );
        self
    }

    /// Dispatch a command by name.
    ///
    /// Looks up the handler, builds a `Context`, runs the guard (if any),
    /// then awaits the handler.
    pub async fn dispatch(&self, command: &str, input: Value) -> Result<Value, HandlerError> {
        let handler = self
            .handlers
            .get(command)
            .ok_or_else(|| HandlerError::UnknownCommand(command.to_string()))?;

        let ctx = Context::new(input, self.state.clone());

        if let Some(guard) = &handler.guard {
            if !guard(&ctx) {
                return Err(HandlerError::GuardRejected(command.to_string()));
            }
        }

        (handler.handle)(ctx).await
    }

    /// List registered command names.
    pub fn commands(&self) -> Vec<&str> {
        self.handlers.keys().map(|s| s.as_str()).collect()
    }

    /// Get a reference to the shared state.
    pub fn state(&self) -> &R {
        &self.state
    }
}
