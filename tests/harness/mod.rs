// tests/harness/mod.rs
//
// Integration testing harness for helpscout-inbox.
// Provides an in-memory helpdesk and time control for testing.

pub mod fixtures;
pub mod mock_client;
pub mod test_harness;
pub mod virtual_clock;

pub use mock_client::RecordedAction;
pub use test_harness::TestHarness;
pub use virtual_helpdesk::HelpdeskEntry;
