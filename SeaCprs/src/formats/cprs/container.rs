//! CPRS container header and trailer
//!
//! | word  | field                          |
//! |-------|--------------------------------|
//! | 0     | signature (`CPRS`)             |
//! | 1     | compressed size                |
//! | 2     | decompressed size in bytes     |
//! | 3     | initial primary bit register   |
//! | 4     | initial lookahead bit register |
//! | 5..   | token stream                   |
//! | N-1   | signature (`CPRS`)             |

use byteorder::{ByteOrder, LittleEndian};
use serde::Serialize;

use crate::error::{Error, Result};

/// Container signature, the ASCII bytes `CPRS` read as a little-endian word.
pub const CPRS_SIGNATURE: u32 = 0x53525043;

/// Bytes per container word.
pub const WORD_SIZE: usize = 4;

/// Words in front of the token stream.
pub const HEADER_WORDS: usize = 5;

/// Smallest container the decoder accepts: the header plus the trailer.
pub const MIN_WORDS: usize = HEADER_WORDS + 1;

/// Header summary of a validated container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContainerInfo {
    /// Compressed size as declared in word 1.
    pub compressed_size: u32,
    /// Decompressed size in bytes as declared in word 2.
    pub decompressed_size: u32,
    /// Number of words in the container.
    pub word_count: usize,
    /// Number of words between the header and the trailer.
    pub stream_words: usize,
}

impl ContainerInfo {
    /// Validate `data` and summarize its header.
    pub fn parse(data: &[u8]) -> Result<Self> {
        Container::parse(data).map(|container| container.info)
    }

    /// Whether the declared compressed size equals the container's word count.
    pub fn compressed_size_matches(&self) -> bool {
        self.compressed_size as usize == self.word_count
    }
}

/// A validated container, decoded into words.
#[derive(Debug, Clone)]
pub struct Container {
    words: Vec<u32>,
    info: ContainerInfo,
}

impl Container {
    /// Check alignment, size and both signatures, then split `data` into words.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() % WORD_SIZE != 0 {
            return Err(Error::MisalignedInput { len: data.len() });
        }

        let word_count = data.len() / WORD_SIZE;
        if word_count < MIN_WORDS {
            return Err(Error::TruncatedInput { words: word_count });
        }

        let mut words = vec![0u32; word_count];
        LittleEndian::read_u32_into(data, &mut words);

        let header = words[0];
        let trailer = words[word_count - 1];
        if header != CPRS_SIGNATURE || trailer != CPRS_SIGNATURE {
            return Err(Error::SignatureMismatch { header, trailer });
        }

        let info = ContainerInfo {
            compressed_size: words[1],
            decompressed_size: words[2],
            word_count,
            stream_words: word_count - MIN_WORDS,
        };
        Ok(Self { words, info })
    }

    pub fn info(&self) -> &ContainerInfo {
        &self.info
    }

    /// Initial primary bit register (word 3).
    pub fn primary(&self) -> u32 {
        self.words[3]
    }

    /// Initial lookahead bit register (word 4).
    pub fn lookahead(&self) -> u32 {
        self.words[4]
    }

    /// Words the bit window refills from.
    ///
    /// This includes the trailer: the firmware pulls it in as lookahead once
    /// the last token reaches the final stream word.
    pub fn refill_words(&self) -> &[u32] {
        &self.words[HEADER_WORDS..]
    }
}

/// Check whether `data` starts with the container signature.
pub fn has_signature(data: &[u8]) -> bool {
    data.len() >= WORD_SIZE && LittleEndian::read_u32(data) == CPRS_SIGNATURE
}

/// Validate a container and summarize its header without decoding it.
pub fn inspect(data: &[u8]) -> Result<ContainerInfo> {
    ContainerInfo::parse(data)
}
