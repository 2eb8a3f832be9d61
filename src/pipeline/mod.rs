//! Job orchestration
//!
//! One invocation processes exactly one audio blob: download it, run a
//! recognition session over it, upload the transcript, delete the local
//! working files. No retries, no batching, no internal parallelism.

mod job;
mod pipeline;
mod report;

pub use job::Job;
pub use pipeline::Pipeline;
pub use report::{JobOutcome, JobReport, LocalIoStage, TransferStage};
