pub mod config;
pub mod constants;
pub mod corrections;
pub mod duplicates;
pub mod error;
pub mod extract;
pub mod logging;
pub mod pipeline;
pub mod preprocess;
pub mod types;
