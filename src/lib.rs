pub mod analysis;
pub mod config;
pub mod error;
pub mod geometry;
pub mod loader;
pub mod pose;
pub mod session;
// cmd and reports belong to the binary (main.rs).

pub use analysis::{FormAnalyzer, FormFeedback, Movement};
pub use error::{FormError, FormResult};
pub use pose::{Landmark, LandmarkName, PoseFrame};
