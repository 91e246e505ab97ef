//! Export lifecycle state machine.
//!
//! A run moves `Init → Started → Finished` and never backwards within a run.
//! Each `export` call re-enters `Started` with cleared counters, so one
//! long-lived exporter can run many exports sequentially (never concurrently).

use crate::error::ExportError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportState {
    /// Constructed, nothing streamed yet.
    Init,
    /// A record stream is in progress (or about to be consumed).
    Started,
    /// The stream has been fully consumed; counts are final.
    Finished,
}

impl ExportState {
    /// Guard an operation against the current state. Streaming outside
    /// `Started` risks double counting or a second collection scan;
    /// reporting outside `Finished` risks metadata that does not match disk.
    pub fn require(
        self,
        required: ExportState,
        operation: &'static str,
    ) -> Result<(), ExportError> {
        if self == required {
            Ok(())
        } else {
            Err(ExportError::InvalidState { operation, required, actual: self })
        }
    }
}
