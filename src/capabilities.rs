//! What a planned rename can tell about itself, so the executor and the preview
//! don't need to know the concrete type.

use std::path::{Path, PathBuf};

/// Has a file name to rename to.
pub trait NewName {
    /// The new file name, with the extension the planner chose for it.
    fn new_name(&self) -> &str;
}

/// Knows the file it came from.
pub trait OriginalPath {
    /// The path as given or found, which must exist when the rename happens.
    fn path(&self) -> &Path;
}

/// Derived from the other two: files are never moved to another directory.
pub trait NewPath {
    fn new_path(&self) -> PathBuf;
}

impl<R: NewName + OriginalPath> NewPath for R {
    fn new_path(&self) -> PathBuf {
        self.path().with_file_name(self.new_name())
    }
}

/// Implement [NewName] over a `new_name: String` field.
#[macro_export]
macro_rules! impl_new_name {
    ($t:ty) => {
        impl $crate::capabilities::NewName for $t {
            fn new_name(&self) -> &str {
                &self.new_name
            }
        }
    };
}

/// Implement [OriginalPath] over a `path: PathBuf` field.
#[macro_export]
macro_rules! impl_original_path {
    ($t:ty) => {
        impl $crate::capabilities::OriginalPath for $t {
            fn path(&self) -> &std::path::Path {
                &self.path
            }
        }
    };
}
