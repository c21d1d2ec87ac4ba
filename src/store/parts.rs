use bytes::{Bytes, BytesMut};
use futures::StreamExt;

use super::{ByteChunks, StoreError};

/// Regroups an upload body into parts of a fixed size. Every part is exactly
/// `part_size` bytes except the last.
pub struct PartReader {
    body: ByteChunks,
    buffer: BytesMut,
    part_size: usize,
    exhausted: bool,
}

impl PartReader {
    pub fn new(body: ByteChunks, part_size: usize) -> Self {
        Self {
            body,
            buffer: BytesMut::new(),
            part_size,
            exhausted: false,
        }
    }

    /// Next part, or `None` once the body is fully consumed.
    pub async fn next_part(&mut self) -> Result<Option<Bytes>, StoreError> {
        while !self.exhausted && self.buffer.len() < self.part_size {
            self.pull().await?;
        }
        if self.buffer.is_empty() {
            return Ok(None);
        }
        let len = self.buffer.len().min(self.part_size);
        Ok(Some(self.buffer.split_to(len).freeze()))
    }

    /// Whether the body has nothing left after the parts already returned.
    pub async fn at_end(&mut self) -> Result<bool, StoreError> {
        while !self.exhausted && self.buffer.is_empty() {
            self.pull().await?;
        }
        Ok(self.buffer.is_empty())
    }

    async fn pull(&mut self) -> Result<(), StoreError> {
        match self.body.next().await {
            Some(chunk) => self.buffer.extend_from_slice(&chunk?),
            None => self.exhausted = true,
        }
        Ok(())
    }
}
