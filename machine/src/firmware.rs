//! Firmware image I/O: a flat sequence of little-endian 32-bit words with
//! no header and no checksum.

use std::path::Path;

use accumulon_core::Word;

/// Errors that can occur when loading or saving a firmware image.
#[derive(Debug)]
pub enum FirmwareError {
    /// Underlying I/O error (file not found, permission denied, etc.)
    Io(std::io::Error),

    /// File length is not a multiple of 4 bytes, so it cannot be split into
    /// whole words.
    TruncatedWord { path: String, len: usize },
}

impl std::fmt::Display for FirmwareError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::TruncatedWord { path, len } => {
                write!(f, "{path}: length {len} is not a multiple of 4 bytes")
            }
        }
    }
}

impl std::error::Error for FirmwareError {}

impl From<std::io::Error> for FirmwareError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// Read a firmware image from disk into a vector of words.
pub fn load(path: &Path) -> Result<Vec<Word>, FirmwareError> {
    let bytes = std::fs::read(path)?;
    words_from_bytes(&bytes).ok_or_else(|| FirmwareError::TruncatedWord {
        path: path.display().to_string(),
        len: bytes.len(),
    })
}

/// Write an assembled program to disk as little-endian 32-bit words.
pub fn save(path: &Path, program: &[Word]) -> Result<(), FirmwareError> {
    let mut bytes = Vec::with_capacity(program.len() * 4);
    for word in program {
        bytes.extend_from_slice(&word.to_le_bytes());
    }
    std::fs::write(path, bytes)?;
    Ok(())
}

fn words_from_bytes(bytes: &[u8]) -> Option<Vec<Word>> {
    if bytes.len() % 4 != 0 {
        return None;
    }
    Some(
        bytes
            .chunks_exact(4)
            .map(|chunk| Word::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
            .collect(),
    )
}
