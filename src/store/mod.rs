pub mod json;

use crate::app::Result;
use crate::domain::BusinessRecord;

pub use json::{write_json, JsonStore};

/// Dataset of business records, read once at run start and written once at
/// run end.
pub trait Store {
    fn load(&self) -> Result<Vec<BusinessRecord>>;
    fn save(&self, records: &[BusinessRecord]) -> Result<()>;
}
