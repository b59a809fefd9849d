//! Line validation and trade extraction

pub mod errors;
pub mod extraction;
pub mod validation;

pub use errors::{ExtractionError, LineFormatError};
pub use extraction::{extract_trade, LOT_SIZE};
pub use validation::{is_valid, validate_fields};
