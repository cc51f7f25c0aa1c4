//! Application services (use case orchestration).

pub mod generation_pipeline;

pub use generation_pipeline::{
    GenerationPipeline, GenerationReport, HookPolicy, PipelineOptions,
};
