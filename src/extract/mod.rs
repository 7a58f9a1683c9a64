pub mod assignment;
pub mod extractor;
pub mod operation;

pub use assignment::*;
pub use extractor::*;
pub use operation::*;
