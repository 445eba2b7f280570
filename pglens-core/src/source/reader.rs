use crate::error::AnalyzeError;
use crate::source::LineSource;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

const STDIN_NAME: &str = "<stdin>";

/// Lines from any buffered reader, split on `\n`.
///
/// A trailing `\r` is dropped. Invalid UTF-8 is replaced rather than
/// rejected, so one bad byte never ends the stream.
pub struct ReaderSource<R> {
    name: String,
    reader: R,
    buf: Vec<u8>,
    done: bool,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(name: impl Into<String>, reader: R) -> Self {
        Self {
            name: name.into(),
            reader,
            buf: Vec::new(),
            done: false,
        }
    }
}

impl ReaderSource<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(STDIN_NAME, io::stdin().lock())
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn next_line(&mut self) -> Option<io::Result<String>> {
        if self.done {
            return None;
        }

        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(_) => {
                if self.buf.last() == Some(&b'\n') {
                    self.buf.pop();
                    if self.buf.last() == Some(&b'\r') {
                        self.buf.pop();
                    }
                }
                Some(Ok(String::from_utf8_lossy(&self.buf).into_owned()))
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Open a file, or stdin when `path` is `-`.
pub fn open_path(path: &Path) -> Result<Box<dyn LineSource>, AnalyzeError> {
    if path == Path::new("-") {
        return Ok(Box::new(ReaderSource::stdin()));
    }

    let name = path.display().to_string();
    let file = File::open(path).map_err(|e| AnalyzeError::source_unavailable(&name, e))?;

    Ok(Box::new(ReaderSource::new(name, BufReader::new(file))))
}
