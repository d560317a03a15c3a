use std::path::{Path, PathBuf};

/// Cross-command state: the folder most recently opened by `open_folder`.
///
/// Lives only as long as the command loop; never written to disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionMemory {
    last_folder: Option<PathBuf>,
}

impl SessionMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_folder(&self) -> Option<&Path> {
        self.last_folder.as_deref()
    }

    pub fn remember_folder(&mut self, path: impl Into<PathBuf>) {
        self.last_folder = Some(path.into());
    }
}
