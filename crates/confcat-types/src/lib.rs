pub mod category;
pub mod error;
pub mod raw;
pub mod session;

pub use category::{AttributeKind, Category};
pub use error::{Error, Result};
pub use raw::{RawAttribute, RawSession, value_to_label};
pub use session::{Attributes, Session};
