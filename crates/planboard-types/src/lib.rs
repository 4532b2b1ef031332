pub mod domain;
pub mod error;
pub mod record;
pub mod time;
pub mod validation;
mod util;

pub use domain::*;
pub use error::{Error, Result};
pub use record::{Record, RecordFields};
pub use util::*;
pub use validation::{NON_FIELD_KEY, ValidationErrors};
