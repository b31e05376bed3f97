mod load;
mod model;

pub use load::load_library;
pub use model::{Entry, Link, MediaLibrary, MediaType, Status, Verdict};
