pub mod classifier;
pub mod models;

pub use classifier::*;
pub use models::*;
