pub mod data_processor;
pub mod scaler;
pub mod split;
pub mod balance;
pub mod prepare;

pub use data_processor::DataProcessor;
pub use scaler::StandardScaler;
pub use split::{train_test_split, TrainTestSplit};
pub use balance::oversample_minority;
pub use prepare::{split_and_scale, PreparedData};
