pub mod classifier;
pub mod logreg;
pub mod forest;
pub mod factory;

pub use classifier::{label_for, Classifier, DECISION_THRESHOLD};
pub use factory::{Model, ModelFactory};
pub use forest::RandomForestWrapper;
pub use logreg::LogRegWrapper;
