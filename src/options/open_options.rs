/// Options for opening a file in an under-storage backend. Reads begin at the requested byte
/// offset; an offset past the end of the file yields no data rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct OpenOptions {
    offset: u64,
}

impl OpenOptions {
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }
}
