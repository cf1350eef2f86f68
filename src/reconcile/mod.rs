//! Order reconciliation: desired cart vs. persisted server order
//!
//! [`reconcile`] is pure. It never mutates its inputs and cannot detect a
//! stale `persisted` list; the server reports that at submission time.

mod engine;
mod instruction;
mod persisted;

pub use engine::reconcile;
pub use instruction::{Action, InstructionStats, MutationInstruction, OptionInstruction};
pub use persisted::{PersistedOption, PersistedOrder, PersistedOrderItem};
