// Application layer - use cases over a session's ledger.
// The session shell and the tests both drive the ledger through LedgerService.

mod clock;
pub mod error;
pub mod reporting;
pub mod service;

pub use clock::*;
pub use error::*;
pub use reporting::*;
pub use service::*;
