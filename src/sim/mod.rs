pub mod config;
pub mod controller;
mod path;
mod run_loop;

pub use config::{MotionConfig, MotionType};
pub use controller::MotionSimulator;
pub use path::CONVERGENCE_RADIUS_METERS;
