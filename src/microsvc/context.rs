//! Context passed to command handlers.
//!
//! Carries the parsed input and a shared handle to the service state.
//! Handlers access everything they need through the context.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::HandlerError;

/// The context passed to every command handler.
///
/// Owned, so async handlers can hold it across `.await` points.
///
/// ## Example
///
/// ```ignore
/// pub async fn handle<S: AccountStore>(ctx: Context<App<S>>) -> Result<Value, HandlerError> {
///     let input = ctx.input_aliased::<Input>(ALIASES)?;
///     let remaining = ctx.state().quota().remaining(&input.email)?;
///     Ok(json!({ "remaining": remaining }))
/// }
/// ```
pub struct Context<R> {
    input: Value,
    state: Arc<R>,
}

impl<R> Context<R> {
    pub(crate) fn new(input: Value, state: Arc<R>) -> Self {
        Self {
            input,
            state,
        }
    }

    /// Deserialize the input after folding each `(canonical, alias)` key pair
    /// into the canonical key.
    ///
    /// A present canonical value wins over its alias; the alias key is always
    /// dropped, so a body carrying both spellings still decodes.
    pub fn input_aliased<T: DeserializeOwned>(&self, aliases: &[(&str, &str)]) -> Result<T, HandlerError> {
        let mut input = self.input.clone();
        if let Value::Object(map) = &mut input {
            for (canonical, alias) in aliases {
                if let Some(value) = map.remove(*alias) {
                    if !map.get(*canonical).map(is_present).unwrap_or(false) {
                        map.insert(canonical.to_string(), value);
                    }
                }
            }
        }
        serde_json::from_value(input).map_err(|e| HandlerError::DecodeFailed(e.to_string()))
    }

    /// Get a reference to the service state.
    pub fn state(&self) -> &R {
        &self.state
    }

    /// Check if the input carries a usable value for `field`.
    ///
    /// `null`, `false`, `0` and `""` count as absent.
    pub fn has_field(&self, field: &str) -> bool {
        self.input.get(field).map(is_present).unwrap_or(false)
    }

    /// Check if the input carries at least one of several alias spellings.
    pub fn has_any_field(&self, aliases: &[&str]) -> bool {
        aliases.iter().any(|f| self.has_field(f))
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|n| n != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
