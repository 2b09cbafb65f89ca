pub mod extractor;
pub mod instagram;
