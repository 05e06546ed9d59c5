pub mod decoder;
pub mod extractor;
pub mod cleaner;
pub mod categorizer;
pub mod structure;
pub mod timebuckets;
pub mod solutions;
pub mod batch;
