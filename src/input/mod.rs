//! Reading prompt text and referenced files.

mod reader;

pub use reader::{InputReader, MAX_INPUT_SIZE};
