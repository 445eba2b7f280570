//! Line sources feeding the analyzer.
//!
//! A source is a finite, single-use sequence of lines. End of input is
//! `None`, never an error.

mod reader;


pub use reader::{ReaderSource, open_path};

use std::io;

pub trait LineSource {
    /// Shown in the report header.
    fn name(&self) -> &str;

    fn next_line(&mut self) -> Option<io::Result<String>>;
}

impl<S: LineSource + ?Sized> LineSource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn next_line(&mut self) -> Option<io::Result<String>> {
        (**self).next_line()
    }
}
