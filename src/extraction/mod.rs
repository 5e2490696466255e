mod extractor;

pub use extractor::{InputSource, extract};
