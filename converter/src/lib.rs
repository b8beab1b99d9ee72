pub mod convert;
pub mod error;
pub mod source;

pub use convert::{Conversion, Converter, save};
pub use error::ConvertError;
pub use source::{SourceDocument, discover_sources};
