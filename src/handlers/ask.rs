//! Handler: ask

use serde::Deserialize;
use serde_json::{json, Value};

use super::{ALIASES, IDENTITY};
use crate::app::App;
use crate::microsvc::{Context, HandlerError};
use crate::store::AccountStore;

pub const COMMAND: &str = "ask";

#[derive(Deserialize)]
pub struct Input {
    pub email: String,
    pub question: String,
}

pub fn guard<R>(ctx: &Context<R>) -> bool {
    ctx.has_any_field(IDENTITY) && ctx.has_field("question")
}

pub async fn handle<S: AccountStore>(ctx: Context<App<S>>) -> Result<Value, HandlerError> {
    let input = ctx.input_aliased::<Input>(ALIASES)?;
    let answer = ctx
        .state()
        .gateway()
        .ask(&input.email, &input.question)
        .await?;
    Ok(json!({ "answer": answer }))
}
