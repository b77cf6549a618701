pub mod pipeline;
pub mod builder;
pub mod artifacts;

pub use pipeline::{prefer_forest, TrainingPipeline, TrainingSummary};
pub use builder::TrainingPipelineBuilder;
pub use artifacts::ArtifactStore;
