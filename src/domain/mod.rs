mod expense;
mod invoice;
mod money;
mod summary;

pub use expense::*;
pub use invoice::*;
pub use money::*;
pub use summary::*;
