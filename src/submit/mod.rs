//! Submission: external boundaries and the coordinator that commits a cart
//!
//! Only the boundary call suspends. Everything else runs to completion on
//! the caller's event loop.

mod boundary;
mod coordinator;
mod generation;
mod session;

pub use boundary::{Ack, MenuSource, OrderMutationBoundary, OrderReader};
pub use coordinator::{PreparedSubmission, SubmissionCoordinator, SubmitOutcome};
pub use generation::GenerationClock;
pub use session::{load_catalog, resume_order};
