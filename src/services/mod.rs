pub mod dataset;
pub mod encoding;
pub mod extract;
pub mod merge;
