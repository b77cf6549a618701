//! Credit-card default classifier.
//!
//! Offline tréning (`train` binárka) porovná logistickú regresiu a random
//! forest podľa ROC AUC a uloží víťaza spolu so scalerom; server
//! (`credit-default-server`) ich načíta a odpovedá na `POST /predict`.

pub mod config;
pub mod data_loading;
pub mod error;
pub mod evaluation;
pub mod models;
pub mod pipeline;
pub mod predictor;
pub mod processing;
pub mod schema;
pub mod server;

pub use error::{PipelineError, Result};
pub use pipeline::{TrainingPipeline, TrainingSummary};
pub use predictor::{Prediction, Predictor};
pub use schema::Record;
