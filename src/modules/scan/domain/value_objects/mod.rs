pub mod card_number;
pub mod scan_query;

pub use card_number::{CardNumber, NormalizedCardNumber};
pub use scan_query::{IdentifiedCard, ScanLanguage, ScanQuery};
