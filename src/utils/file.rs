use std::io;
use std::path::Path;

/// Checks if a file exists at the given path
pub fn file_exists(path: &str) -> bool {
    Path::new(path).is_file()
}

/// Read the contents of a file as a string
pub fn file_get<P: AsRef<Path>>(path: P) -> io::Result<String> {
    std::fs::read_to_string(path)
}

/// Async version of file_get, used on the request path
///
/// # Returns
/// * `Ok(String)` - The file contents
/// * `Err(io::Error)` - If the file can't be read
pub async fn file_get_async<P: AsRef<Path>>(path: P) -> io::Result<String> {
    tokio::fs::read_to_string(path).await
}
