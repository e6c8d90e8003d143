//! Services deriving effort reports from the lifecycle event stream.

mod effort;
mod reconstruction;

pub use effort::{EffortReportError, EffortReportResult, EffortReportService};
pub use reconstruction::{ReconstructionPolicy, SessionReconstructor};
