/// Options for listing a directory in an under-storage backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ListOptions {
    recursive: bool,
}

impl ListOptions {
    pub fn recursive(&self) -> bool {
        self.recursive
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }
}
