pub mod mocks;
pub mod round_builders;
pub mod setup;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use mocks::{FailingRoundRepository, RecordingRoundRepository};
pub use round_builders::RoundsBuilder;
pub use setup::TestApp;
