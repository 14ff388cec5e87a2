/// One benchmark input: a raw request and the way it is cut into chunks before feeding.
#[derive(Debug, Copy, Clone)]
pub struct TestCase {
    name: &'static str,
    split: Split,
    file: TestFile,
}

impl TestCase {
    pub fn new(name: &'static str, split: Split, file: TestFile) -> Self {
        Self { name, split, file }
    }

    pub fn whole(name: &'static str, file: TestFile) -> Self {
        Self::new(name, Split::Whole, file)
    }

    pub fn chunked(name: &'static str, chunk_size: usize, file: TestFile) -> Self {
        Self::new(name, Split::Every(chunk_size), file)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn split(&self) -> Split {
        self.split
    }

    pub fn file(&self) -> &TestFile {
        &self.file
    }

    pub fn file_name(&self) -> &'static str {
        self.file().file_name
    }

    /// The request bytes cut as described by [`Split`].
    pub fn chunks(&self) -> Vec<&'static [u8]> {
        let content = self.file.content().as_bytes();
        match self.split {
            Split::Whole => vec![content],
            Split::Every(size) => content.chunks(size.max(1)).collect(),
        }
    }
}

#[derive(Debug, Copy, Clone)]
pub struct TestFile {
    file_name: &'static str,
    content: &'static str,
}

impl TestFile {
    pub const fn new(file_name: &'static str, content: &'static str) -> Self {
        Self { file_name, content }
    }

    pub fn content(&self) -> &'static str {
        self.content
    }

    pub fn file_name(&self) -> &'static str {
        self.file_name
    }
}

#[derive(Clone, Copy, Debug)]
pub enum Split {
    /// The whole request in a single chunk.
    Whole,
    /// Fixed-size chunks, the last one possibly shorter.
    Every(usize),
}
