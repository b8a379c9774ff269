/// Options for deleting an entry from an under-storage backend. Deleting a non-empty directory
/// requires the recursive flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DeleteOptions {
    recursive: bool,
}

impl DeleteOptions {
    pub fn recursive(&self) -> bool {
        self.recursive
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }
}
