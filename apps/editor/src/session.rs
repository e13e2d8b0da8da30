//! Applies editor commands to the form and reports a one-line status.

use form_core::{FetchApplied, GenerateOutcome, ProductForm, ProductLookup};

use crate::commands::{EditorCommand, HELP};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Continue { status: Option<String> },
    Quit,
}

impl Step {
    fn status(text: impl Into<String>) -> Self {
        Step::Continue {
            status: Some(text.into()),
        }
    }

    fn quiet() -> Self {
        Step::Continue { status: None }
    }
}

pub async fn apply(
    form: &mut ProductForm,
    lookup: &dyn ProductLookup,
    command: EditorCommand,
) -> Step {
    let command_name = match &command {
        EditorCommand::SetHandle { .. } => "set_handle",
        EditorCommand::Fetch { .. } => "fetch",
        EditorCommand::SelectType { .. } => "select_type",
        EditorCommand::SetName { .. } => "set_name",
        EditorCommand::SetValue { .. } => "set_value",
        EditorCommand::Add => "add",
        EditorCommand::Remove { .. } => "remove",
        EditorCommand::Generate => "generate",
        EditorCommand::Minify => "minify",
        EditorCommand::Show => "show",
        EditorCommand::Help => "help",
        EditorCommand::Quit => "quit",
    };
    tracing::debug!(command = command_name, "applying editor command");

    match command {
        EditorCommand::SetHandle { handle } => {
            form.set_handle(handle);
            Step::quiet()
        }
        EditorCommand::Fetch { handle } => {
            if let Some(handle) = handle {
                form.set_handle(handle);
            }
            match form.fetch_current(lookup).await {
                FetchApplied::Loaded => Step::status(format!(
                    "loaded {} properties for '{}'",
                    form.properties().len(),
                    form.handle()
                )),
                FetchApplied::Failed | FetchApplied::Stale => Step::quiet(),
            }
        }
        EditorCommand::SelectType { product_type } => {
            form.select_product_type(product_type);
            Step::quiet()
        }
        EditorCommand::SetName { index, name } => match form.set_property_name(index, name) {
            Ok(()) => Step::quiet(),
            Err(err) => Step::status(err.to_string()),
        },
        EditorCommand::SetValue { index, value } => match form.set_property_value(index, value) {
            Ok(()) => Step::quiet(),
            Err(err) => Step::status(err.to_string()),
        },
        EditorCommand::Add => {
            form.add_property();
            Step::quiet()
        }
        EditorCommand::Remove { index } => match form.remove_property(index) {
            Ok(_) => Step::quiet(),
            Err(err) => Step::status(err.to_string()),
        },
        EditorCommand::Generate => match form.generate_output() {
            GenerateOutcome::Generated => Step::quiet(),
            GenerateOutcome::Invalid { flagged } => Step::status(format!(
                "{flagged} properties have an empty name or value (marked !)"
            )),
        },
        EditorCommand::Minify => match form.minify_output() {
            Ok(()) => Step::quiet(),
            Err(err) => Step::status(err.to_string()),
        },
        EditorCommand::Show => Step::quiet(),
        EditorCommand::Help => Step::status(HELP),
        EditorCommand::Quit => Step::Quit,
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
