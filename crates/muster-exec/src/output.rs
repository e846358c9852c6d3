/// Combined output of one remote command: stdout followed by stderr,
/// exactly as the remote session produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutput {
    pub bytes: Vec<u8>,
}

impl ExecOutput {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Lossy UTF-8 view with trailing whitespace removed, for logging.
    pub fn lossy(&self) -> String {
        String::from_utf8_lossy(&self.bytes).trim_end().to_string()
    }
}
