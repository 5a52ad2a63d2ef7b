// Analysis runs: sequential per-document pipeline, progress reporting,
// ranking, and the JSON / SSE endpoints that expose them.

pub mod handlers;
pub mod pipeline;
pub mod progress;
pub mod report;
