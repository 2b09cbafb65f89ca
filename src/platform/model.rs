use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Video,
    Photo,
}

/// A downloaded file waiting to be relayed. The dispatch handler owns the
/// path until cleanup removes the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievedItem {
    pub path: PathBuf,
    pub kind: MediaKind,
}

impl RetrievedItem {
    pub fn video(path: PathBuf) -> Self {
        Self {
            path,
            kind: MediaKind::Video,
        }
    }

    pub fn photo(path: PathBuf) -> Self {
        Self {
            path,
            kind: MediaKind::Photo,
        }
    }
}
