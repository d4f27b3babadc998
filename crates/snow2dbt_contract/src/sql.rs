//! SQL projection for the dbt model body.

use crate::contract::Contract;

/// Reminder appended after the placeholder `FROM` clause.
pub const PLACEHOLDER_HINT: &str = " -- Replace by a ref() or source() value";

/// Where the comma goes in the column list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommaStyle {
    /// `col_a,\n\tcol_b`
    #[default]
    Trailing,
    /// `col_a\n\t,col_b`
    Leading,
}

impl CommaStyle {
    pub fn leading(leading: bool) -> Self {
        if leading {
            CommaStyle::Leading
        } else {
            CommaStyle::Trailing
        }
    }

    fn separator(&self) -> &'static str {
        match self {
            CommaStyle::Trailing => ",\n\t",
            CommaStyle::Leading => "\n\t,",
        }
    }
}

/// The `FROM` placeholder: a dbt `ref()` on the reflected table.
pub fn placeholder_reference(contract: &Contract) -> String {
    format!("{{{{ ref('{}') }}}}", contract.source)
}

/// Render `SELECT <columns> FROM <placeholder>` in contract column order.
pub fn render_projection(contract: &Contract, comma: CommaStyle) -> String {
    let columns = contract
        .column_names()
        .collect::<Vec<_>>()
        .join(comma.separator());
    format!(
        "SELECT\n\t{}\nFROM {}\n{}\n",
        columns,
        placeholder_reference(contract),
        PLACEHOLDER_HINT
    )
}
