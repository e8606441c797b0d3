pub mod flow;
pub mod memory;
pub mod remote;
pub mod session;

pub use flow::ConferenceFlow;
pub use memory::InMemoryBackend;
pub use remote::{ConferenceBackend, ConfirmOutcome, FinishOutcome, StartOutcome};
pub use session::ConferenceSession;
