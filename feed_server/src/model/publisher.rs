//! Snapshot publishing sink.
//!
//! Every change to the view model ends with the full snapshot being handed to a
//! `SnapshotPublisher`. The default publisher renders it as JSON and writes it to
//! the log; a failure is reported back to the caller, which logs and moves on.

use crate::model::view_model::ViewModel;
use feed_common::Result;
use log::info;

/// Destination for full view-model snapshots.
pub trait SnapshotPublisher: Send + Sync {
    /// Publish the whole projection.
    fn publish(&self, snapshot: &ViewModel) -> Result<()>;
}

/// Publishes snapshots as JSON log lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSnapshotPublisher;

impl SnapshotPublisher for LogSnapshotPublisher {
    fn publish(&self, snapshot: &ViewModel) -> Result<()> {
        let json = serde_json::to_string(snapshot)?;
        info!("published view model: {}", json);
        Ok(())
    }
}
