pub mod classifier;
pub mod controller;
pub mod loop_worker;

pub use classifier::{ClassifierConfig, Detection, DetectorError, ExpressionClassifier};
pub use controller::DetectionController;
pub use loop_worker::{DetectionLoopConfig, FrameSource};
