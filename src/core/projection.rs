use crate::core::{Record, RecordSource, ResumeField};
use crate::utils::error::{ResumeError, Result};
use std::sync::Arc;

/// Fetches one resume column and flattens it into a list of values.
///
/// The same engine serves every [`ResumeField`]; the field decides the column
/// to select and the message used when the table is empty.
#[derive(Clone)]
pub struct FieldProjection {
    source: Arc<dyn RecordSource>,
}

impl FieldProjection {
    pub fn new(source: Arc<dyn RecordSource>) -> Self {
        Self { source }
    }

    pub async fn run(&self, field: ResumeField) -> Result<Vec<serde_json::Value>> {
        // Extract
        let records = self.source.select(field.column()).await?;
        tracing::debug!("Extracted {} records for {}", records.len(), field);

        if records.is_empty() {
            return Err(ResumeError::NotFound {
                message: field.not_found_message().to_string(),
            });
        }

        // Transform
        project(field.column(), records)
    }
}

/// Takes `column` out of every record, keeping upstream order.
pub fn project(column: &str, records: Vec<Record>) -> Result<Vec<serde_json::Value>> {
    records
        .into_iter()
        .enumerate()
        .map(|(index, mut record)| {
            record
                .data
                .remove(column)
                .ok_or_else(|| ResumeError::MissingField {
                    column: column.to_string(),
                    index,
                })
        })
        .collect()
}
