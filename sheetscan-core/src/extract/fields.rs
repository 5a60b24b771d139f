//! Labeled field lookup with coordinate offsets

use crate::config::{FieldRule, MissingLabelPolicy};
use crate::error::{Result, ScanError};
use crate::reader::SheetGrid;
use std::collections::BTreeMap;
use tracing::debug;

/// Read every field from the data sheet.
///
/// Each field's label is the first matching cell in row-major order; its value
/// is the cell reached by moving `offset_x` columns right and `offset_y` rows up.
/// A label that matches nowhere is omitted (or fails under
/// [`MissingLabelPolicy::Fail`]). An offset that leaves the worksheet always fails.
pub fn extract_fields(
    grid: &SheetGrid,
    fields: &[FieldRule],
    missing_label: MissingLabelPolicy,
) -> Result<BTreeMap<String, String>> {
    let mut values = BTreeMap::new();

    for field in fields {
        let Some(label) = grid.find(&field.pattern) else {
            if missing_label == MissingLabelPolicy::Fail {
                return Err(ScanError::LabelNotFound {
                    field: field.name.clone(),
                    pattern: field.pattern.as_str().to_string(),
                });
            }
            debug!(
                field = %field.name,
                pattern = %field.pattern,
                "no cell matches label, skipping field"
            );
            continue;
        };

        let target = label.offset(field.offset_x, field.offset_y)?;
        let value = grid.cell(target);
        debug!(field = %field.name, label = %label, target = %target, value, "field extracted");
        values.insert(field.name.clone(), value.to_string());
    }

    Ok(values)
}
