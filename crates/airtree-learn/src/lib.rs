mod bundle;
mod category;
mod config;
mod dataset;
mod error;
mod importance;
mod metrics;
mod model;
mod scaler;
mod session;
mod split;
mod trainer;

pub use bundle::{BUNDLE_SCHEMA_VERSION, ModelBundle, load_bundle, save_bundle};
pub use category::AirQuality;
pub use config::TrainConfig;
pub use dataset::{Dataset, FEATURE_COLUMNS, TARGET_COLUMN};
pub use error::LearnError;
pub use importance::feature_importances;
pub use metrics::{ClassMetrics, Evaluation};
pub use model::{Prediction, TrainedModel, TrainingReport};
pub use scaler::MinMaxScaler;
pub use session::{Phase, Session};
pub use split::{Split, train_test_split};
pub use trainer::train_tree;
