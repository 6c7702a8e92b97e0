//! Record services outside the upload/download pipeline.

mod add;
mod search;

pub use add::{AddResult, AddService};
pub use search::{SearchService, search_records};
