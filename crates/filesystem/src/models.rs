/// Namespace for the filesystem helpers used by the storage layer and bootstrap.
pub struct FileSystem;
