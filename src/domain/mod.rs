pub mod record;
pub mod result;
pub mod status;
pub mod summary;

pub use record::BusinessRecord;
pub use result::{ScrapeJob, ScrapeResult};
pub use status::ScrapeStatus;
pub use summary::{snippet, ClassificationSummary};
