use std::{collections::BTreeSet, path::Path};

use comfy_table::{Attribute, CellAlignment, ContentArrangement, Row, Table};
use serde_json::Value;

use crate::{
  generator::{ast::FieldToken, document::SchemaDocument, naming::identifiers::ensure_unique},
  ui::{Colors, colors::table_cell, term_width},
  utils::spec::SpecLoader,
};

/// One row of `list operations`; `handler` is spelled as in the generated `Api` trait.
#[derive(Debug, Clone, PartialEq, Eq)]
struct OperationRow {
  handler: String,
  method: String,
  path: String,
}

fn operation_rows(document: Value) -> anyhow::Result<Vec<OperationRow>> {
  let document = SchemaDocument::from_value(document)?;
  let mut used_names = BTreeSet::new();

  Ok(
    document
      .operations()
      .iter()
      .map(|operation| {
        let bare = ensure_unique(FieldToken::from_raw(&operation.operation_id()).bare(), &used_names);
        used_names.insert(bare.clone());
        OperationRow {
          handler: FieldToken::from_raw(&bare).to_string(),
          method: operation.method.to_string(),
          path: operation.path.to_string(),
        }
      })
      .collect(),
  )
}

fn render_table(rows: Vec<OperationRow>, colors: &Colors) -> Table {
  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());
  if colors.enabled() {
    table.enforce_styling();
  } else {
    table.force_no_tty();
  }

  let mut header = Row::new();
  for title in ["HANDLER", "METHOD", "PATH"] {
    header.add_cell(table_cell(title, colors.label()));
  }
  table.set_header(header);

  for row in rows {
    let mut cells = Row::new();
    cells.add_cell(table_cell(row.handler, colors.value()).add_attribute(Attribute::Bold));
    cells.add_cell(table_cell(row.method, colors.accent()).set_alignment(CellAlignment::Right));
    cells.add_cell(table_cell(row.path, colors.primary()));
    table.add_row(cells);
  }

  table
}

/// Prints every operation in document order with the `Api` method it becomes.
pub async fn list_operations(input: &Path, colors: &Colors) -> anyhow::Result<()> {
  let document = SpecLoader::open(input).await?.parse()?;
  let rows = operation_rows(document)?;
  println!("{}", render_table(rows, colors));
  Ok(())
}
