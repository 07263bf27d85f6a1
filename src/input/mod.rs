//! Reading the text to translate or the question to ask.

mod reader;

pub use reader::InputReader;
