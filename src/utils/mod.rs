pub mod perf;

pub use perf::{FrameStats, FrameTimer, PipelineMetrics, Stopwatch, TimingTracker};
