//! Plain-text rendering of the form.

use std::fmt;

use form_core::ProductForm;
use shared::domain::ProductType;

const FLAG: &str = "!";

pub fn render(form: &ProductForm) -> String {
    FormView(form).to_string()
}

struct FormView<'a>(&'a ProductForm);

impl fmt::Display for FormView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let form = self.0;
        writeln!(f, "== Product Properties Editor ==")?;
        writeln!(f, "Product Handle: [{}]", form.handle())?;
        if !form.error_message().is_empty() {
            writeln!(f, "  ** {} **", form.error_message())?;
        }

        write!(f, "Product Type: ")?;
        for (position, kind) in ProductType::ALL.iter().enumerate() {
            if position > 0 {
                write!(f, " | ")?;
            }
            if *kind == form.product_type() {
                write!(f, "({})", kind.label())?;
            } else {
                write!(f, "{}", kind.label())?;
            }
        }
        writeln!(f)?;

        if form.properties().is_empty() {
            writeln!(f, "  (no properties)")?;
        }
        for (index, entry) in form.properties().iter().enumerate() {
            let flags = form.errors().get(index).copied().unwrap_or_default();
            writeln!(
                f,
                "  [{index}] Name: {}[{}]  Value: {}[{}]",
                if flags.name_empty { FLAG } else { " " },
                entry.name,
                if flags.value_empty { FLAG } else { " " },
                entry.value,
            )?;
        }

        writeln!(f, "-- Output JSON --")?;
        writeln!(f, "{}", form.output())
    }
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
