//! Relay line codec
//!
//! Newline framing on top of `LinesCodec`. An over-long line is surfaced as
//! `Inbound::TooLong` instead of an error, so the stream keeps going: the
//! inner codec discards the rest of that line and resumes at the next
//! newline.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, Encoder, LinesCodec, LinesCodecError};

/// One decoded unit of client input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    Line(String),
    /// A line exceeded the limit and was dropped
    TooLong,
}

/// Newline codec with a per-line byte limit
#[derive(Debug)]
pub struct RelayCodec {
    inner: LinesCodec,
    max_length: usize,
}

impl RelayCodec {
    pub fn new(max_length: usize) -> Self {
        Self {
            inner: LinesCodec::new_with_max_length(max_length),
            max_length,
        }
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }
}

fn absorb_overflow(
    result: Result<Option<String>, LinesCodecError>,
) -> Result<Option<Inbound>, LinesCodecError> {
    match result {
        Ok(line) => Ok(line.map(Inbound::Line)),
        Err(LinesCodecError::MaxLineLengthExceeded) => Ok(Some(Inbound::TooLong)),
        Err(e) => Err(e),
    }
}

impl Decoder for RelayCodec {
    type Item = Inbound;
    type Error = LinesCodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        absorb_overflow(self.inner.decode(src))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        absorb_overflow(self.inner.decode_eof(src))
    }
}

impl Encoder<String> for RelayCodec {
    type Error = LinesCodecError;

    fn encode(&mut self, item: String, dst: &mut BytesMut) -> Result<(), Self::Error> {
        self.inner.encode(item, dst)
    }
}
