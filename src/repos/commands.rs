use ghfind_directory::{DirectoryError, Repository};

/// A repository page the pager wants fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Identifies the username selection the request was issued for.
    pub generation: u64,
    pub username: String,
    /// 1-based page number.
    pub page: u32,
    pub page_size: u32,
}

/// Completion of a [`PageRequest`].
#[derive(Debug)]
pub struct PageResult {
    pub generation: u64,
    pub page: u32,
    pub outcome: Result<Vec<Repository>, DirectoryError>,
}
