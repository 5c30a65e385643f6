#[derive(Debug, Clone)]
pub struct TestCase {
    name: &'static str,
    group: TestGroup,
    payload: Vec<u8>,
}

impl TestCase {
    pub fn new(name: &'static str, group: TestGroup, payload: Vec<u8>) -> Self {
        Self { name, group, payload }
    }

    pub fn small(name: &'static str, payload: Vec<u8>) -> Self {
        Self::new(name, TestGroup::Small, payload)
    }

    pub fn normal(name: &'static str, payload: Vec<u8>) -> Self {
        Self::new(name, TestGroup::Normal, payload)
    }

    pub fn large(name: &'static str, payload: Vec<u8>) -> Self {
        Self::new(name, TestGroup::Large, payload)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn group(&self) -> TestGroup {
        self.group
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}

#[derive(Clone, Copy, Debug)]
pub enum TestGroup {
    Small,
    Normal,
    Large,
}

/// Wraps `content` into chunked transfer-coding wire format, splitting it
/// into chunks of `chunk_size` bytes and appending the last-chunk and the
/// empty trailer section.
///
/// # Panics
///
/// Panics if `chunk_size` is zero.
pub fn chunk_stream(content: &[u8], chunk_size: usize) -> Vec<u8> {
    assert!(chunk_size > 0, "chunk_size must be positive");

    let mut wire = Vec::with_capacity(content.len() + (content.len() / chunk_size + 2) * 8);
    for chunk in content.chunks(chunk_size) {
        wire.extend_from_slice(format!("{:x}\r\n", chunk.len()).as_bytes());
        wire.extend_from_slice(chunk);
        wire.extend_from_slice(b"\r\n");
    }
    wire.extend_from_slice(b"0\r\n\r\n");
    wire
}
