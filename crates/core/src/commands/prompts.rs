use serde_json::{json, Value};

use super::{arg_i64, arg_str, arg_str_or_empty, CommandContext};
use crate::{actions, errors::Result, runtime};

pub fn list(ctx: &mut CommandContext<'_>, _args: Value) -> Result<Value> {
    let outcome = runtime::block_on(actions::list_prompts(ctx.library, ctx.session))?;
    Ok(json!(outcome))
}

pub fn create(ctx: &mut CommandContext<'_>, args: Value) -> Result<Value> {
    let title = arg_str(&args, "prompts.create", "title")?;
    let text = arg_str(&args, "prompts.create", "text")?;

    let outcome = runtime::block_on(actions::create_prompt(ctx.library, ctx.session, title, text))?;
    Ok(json!(outcome))
}

pub fn select(ctx: &mut CommandContext<'_>, args: Value) -> Result<Value> {
    let id = arg_i64(&args, "prompts.select", "id")?;

    let outcome = runtime::block_on(actions::select_prompt(ctx.library, ctx.session, id))?;
    Ok(json!(outcome))
}

pub fn update(ctx: &mut CommandContext<'_>, args: Value) -> Result<Value> {
    let title = arg_str(&args, "prompts.update", "title")?;
    let text = arg_str(&args, "prompts.update", "text")?;

    let outcome = runtime::block_on(actions::update_selected(ctx.library, ctx.session, title, text))?;
    Ok(json!(outcome))
}

pub fn request_delete(ctx: &mut CommandContext<'_>, _args: Value) -> Result<Value> {
    let outcome = actions::request_delete(ctx.session)?;
    Ok(json!(outcome))
}

pub fn cancel_delete(ctx: &mut CommandContext<'_>, _args: Value) -> Result<Value> {
    Ok(json!(actions::cancel_delete(ctx.session)))
}

pub fn confirm_delete(ctx: &mut CommandContext<'_>, _args: Value) -> Result<Value> {
    let outcome = runtime::block_on(actions::confirm_delete(ctx.library, ctx.session))?;
    Ok(json!(outcome))
}

pub fn close(ctx: &mut CommandContext<'_>, _args: Value) -> Result<Value> {
    Ok(json!(actions::close_selection(ctx.session)))
}

pub fn use_prompt(ctx: &mut CommandContext<'_>, args: Value) -> Result<Value> {
    let title = arg_str_or_empty(&args, "prompts.use", "title")?;
    let input = arg_str_or_empty(&args, "prompts.use", "input")?;

    Ok(json!(actions::use_prompt(ctx.session, title, input)))
}

pub fn choices(ctx: &mut CommandContext<'_>, _args: Value) -> Result<Value> {
    Ok(json!({ "choices": ctx.session.cache().choices() }))
}
