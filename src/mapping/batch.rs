//! Assembles every employee record of a document into one [`OrderBatch`].

use crate::mapping::{BuildError, CustomerRecordMapper, RecordError};
use crate::markup::Node;
use crate::model::{EmployeeRecord, MenuIndex, OrderBatch};
use std::str::FromStr;
use tracing::{info, instrument, warn};

/// What happens to the batch when one record cannot be mapped.
///
/// The policy holds for the whole run; every failing record is treated the
/// same way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RecordPolicy {
    /// The first failing record aborts the build. Nothing is submitted.
    #[default]
    Abort,
    /// Failing records are left out and reported in [`BatchBuild::skipped`].
    Skip,
}

impl FromStr for RecordPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(RecordPolicy::Abort),
            "skip" => Ok(RecordPolicy::Skip),
            other => Err(format!("unknown record policy '{other}'")),
        }
    }
}

/// A record left out under [`RecordPolicy::Skip`].
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    /// Position among the `Employee` elements, starting at 0.
    pub index: usize,
    pub name: Option<String>,
    pub reason: RecordError,
}

/// Result of a successful build.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchBuild {
    pub batch: OrderBatch,
    pub skipped: Vec<SkippedRecord>,
    /// Records left out because `IsAttending` was `false`.
    pub absent: usize,
}

/// Builds the bulk order from the decoded document.
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderBatchBuilder {
    policy: RecordPolicy,
    skip_absent: bool,
}

impl OrderBatchBuilder {
    pub fn new(policy: RecordPolicy) -> Self {
        Self {
            policy,
            skip_absent: false,
        }
    }

    /// Leave out employees whose `IsAttending` is `false`.
    pub fn skip_absent(mut self, skip_absent: bool) -> Self {
        self.skip_absent = skip_absent;
        self
    }

    /// Builds the batch from a document rooted at `Employees`.
    pub fn build_document(&self, document: &Node, menu: &MenuIndex) -> Result<BatchBuild, BuildError> {
        let records = employees(document)?;
        self.build(&records, menu)
    }

    /// Maps every record in order.
    ///
    /// # Errors
    ///
    /// - [`BuildError::Record`] for the first failing record under
    ///   [`RecordPolicy::Abort`].
    /// - [`BuildError::EmptyBatch`] when no order remains.
    #[instrument(skip(self, records, menu), fields(records = records.len(), policy = ?self.policy))]
    pub fn build(&self, records: &[&Node], menu: &MenuIndex) -> Result<BatchBuild, BuildError> {
        let mapper = CustomerRecordMapper::new(menu);
        let mut batch = OrderBatch::default();
        let mut skipped = Vec::new();
        let mut absent = 0;

        for (index, node) in records.iter().enumerate() {
            let record = EmployeeRecord::new(node);
            if self.skip_absent && record.is_attending() == Some(false) {
                info!(index, employee = record.name().unwrap_or_default(), "Employee not attending");
                absent += 1;
                continue;
            }

            match mapper.map(record) {
                Ok(document) => batch.orders.push(document),
                Err(reason) => match self.policy {
                    RecordPolicy::Abort => {
                        return Err(BuildError::Record {
                            index,
                            name: record.name().unwrap_or("<unnamed>").to_string(),
                            source: reason,
                        });
                    }
                    RecordPolicy::Skip => {
                        warn!(index, error = %reason, "Skipping employee record");
                        skipped.push(SkippedRecord {
                            index,
                            name: record.name().map(str::to_string),
                            reason,
                        });
                    }
                },
            }
        }

        if batch.is_empty() {
            return Err(BuildError::EmptyBatch);
        }
        info!(
            orders = batch.len(),
            dishes = batch.dish_count(),
            skipped = skipped.len(),
            absent,
            "Batch built"
        );
        Ok(BatchBuild {
            batch,
            skipped,
            absent,
        })
    }
}

/// The `Employee` elements of an `Employees` document, in document order.
///
/// A single employee yields a one-element sequence.
pub fn employees(document: &Node) -> Result<Vec<&Node>, BuildError> {
    let root = document.get("Employees").ok_or(BuildError::MissingRoot)?;
    Ok(root.get("Employee").map(Node::items).unwrap_or_default())
}
