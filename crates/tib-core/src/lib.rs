pub mod diagnostic;
pub mod iast;
pub mod normalize;
pub mod settings;
pub mod unicode;

pub use diagnostic::Diagnostic;
pub use iast::{convert, transliterate, Conversion};
pub use normalize::NormalForm;
