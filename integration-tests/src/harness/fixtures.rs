use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A log file on disk, removed when dropped.
pub struct LogFixture {
    pub dir: TempDir,
    pub path: PathBuf,
}

pub fn write_log<S: AsRef<str>>(name: &str, lines: &[S]) -> LogFixture {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join(name);

    let mut contents = String::new();
    for line in lines {
        contents.push_str(line.as_ref());
        contents.push('\n');
    }
    fs::write(&path, contents).expect("failed to write log fixture");

    LogFixture { dir, path }
}

pub fn repeated(line: &str, n: usize) -> Vec<String> {
    (0..n).map(|i| format!("{line} #{i}")).collect()
}
