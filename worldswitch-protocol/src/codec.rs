//! Frame codec for the wire transport
//!
//! Each frame is a fixed-width ASCII-decimal length header followed by the
//! raw body bytes. A header that fails to parse, or that declares a body
//! larger than [`MAX_BODY_LEN`], is fatal to the connection: the owning
//! session closes instead of attempting to resynchronize.

use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

/// Width of the ASCII-decimal length header in bytes
pub const HEADER_LEN: usize = 4;

/// Maximum frame body size in bytes
pub const MAX_BODY_LEN: usize = 512;

/// Framing error
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unparseable frame header: {0:?}")]
    InvalidHeader(String),

    #[error("frame body too large: {size} bytes (max {max})")]
    BodyTooLarge { size: usize, max: usize },

    #[error("frame body is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Codec turning a byte stream into text frame bodies and back
///
/// Frames are symmetric, so the same codec serves both peers.
pub struct FrameCodec;

impl FrameCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FrameCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for FrameCodec {
    type Item = String;
    type Error = FrameError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        // Need the full header before anything can be decided
        if src.len() < HEADER_LEN {
            return Ok(None);
        }

        let header = std::str::from_utf8(&src[..HEADER_LEN])
            .map_err(|_| FrameError::InvalidHeader(format!("{:?}", &src[..HEADER_LEN])))?;

        // The header is zero-padded on encode; space padding is accepted too
        let len: usize = header
            .trim_start()
            .parse()
            .map_err(|_| FrameError::InvalidHeader(header.to_string()))?;

        if len > MAX_BODY_LEN {
            return Err(FrameError::BodyTooLarge {
                size: len,
                max: MAX_BODY_LEN,
            });
        }

        if src.len() < HEADER_LEN + len {
            // Reserve space for the rest of the frame
            src.reserve(HEADER_LEN + len - src.len());
            return Ok(None);
        }

        src.advance(HEADER_LEN);
        let body = src.split_to(len);
        Ok(Some(String::from_utf8(body.to_vec())?))
    }
}

impl Encoder<String> for FrameCodec {
    type Error = FrameError;

    fn encode(&mut self, item: String, dst: &mut BytesMut) -> Result<(), Self::Error> {
        if item.len() > MAX_BODY_LEN {
            return Err(FrameError::BodyTooLarge {
                size: item.len(),
                max: MAX_BODY_LEN,
            });
        }

        dst.reserve(HEADER_LEN + item.len());
        dst.put_slice(format!("{:04}", item.len()).as_bytes());
        dst.put_slice(item.as_bytes());
        Ok(())
    }
}
