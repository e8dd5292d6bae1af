//! Data source contract
//!
//! The code area never owns storage semantics: it reads and mutates bytes
//! through [`BinaryData`] and, when the source allows it,
//! [`EditableBinaryData`]. [`ByteArrayData`] is the in-memory
//! implementation used by the demo viewer and the tests.

use crate::error::{CodeAreaError, Result};

/// Random-access, read-only byte sequence
pub trait BinaryData {
    fn size(&self) -> u64;

    fn byte_at(&self, position: u64) -> Result<u8>;

    /// Copies `target.len()` bytes starting at `position` into `target`
    fn copy_to_slice(&self, position: u64, target: &mut [u8]) -> Result<()>;

    fn copy(&self, position: u64, length: u64) -> Result<Vec<u8>> {
        let length = usize::try_from(length)
            .map_err(|_| CodeAreaError::invalid_argument("copy length exceeds address space"))?;
        let mut out = vec![0u8; length];
        self.copy_to_slice(position, &mut out)?;
        Ok(out)
    }

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Mutable view of this data, `None` for read-only sources
    fn as_editable(&mut self) -> Option<&mut dyn EditableBinaryData> {
        None
    }
}

/// Mutations a writable data source supports. Every call is bounds-checked.
pub trait EditableBinaryData: BinaryData {
    fn insert(&mut self, position: u64, bytes: &[u8]) -> Result<()>;

    fn insert_zeros(&mut self, position: u64, count: u64) -> Result<()>;

    fn remove(&mut self, position: u64, length: u64) -> Result<()>;

    fn set_byte(&mut self, position: u64, value: u8) -> Result<()>;

    /// Overwrites existing bytes starting at `position`
    fn replace(&mut self, position: u64, bytes: &[u8]) -> Result<()>;

    fn fill(&mut self, position: u64, length: u64, value: u8) -> Result<()>;
}

/// Vec-backed data, editable unless created with [`ByteArrayData::read_only`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteArrayData {
    bytes: Vec<u8>,
    read_only: bool,
}

impl ByteArrayData {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            read_only: false,
        }
    }

    pub fn read_only(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            read_only: true,
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.bytes
    }

    fn index(&self, position: u64) -> Result<usize> {
        usize::try_from(position)
            .ok()
            .filter(|&i| i < self.bytes.len())
            .ok_or_else(|| out_of_bounds(position, self.bytes.len()))
    }

    /// Validates `position..position + length` and returns it as a usize range
    fn span(&self, position: u64, length: u64) -> Result<std::ops::Range<usize>> {
        let end = position
            .checked_add(length)
            .filter(|&end| end <= self.bytes.len() as u64)
            .ok_or_else(|| out_of_bounds(position.saturating_add(length), self.bytes.len()))?;
        Ok(position as usize..end as usize)
    }

    fn insertion_point(&self, position: u64) -> Result<usize> {
        if position > self.bytes.len() as u64 {
            return Err(out_of_bounds(position, self.bytes.len()));
        }
        Ok(position as usize)
    }
}

fn out_of_bounds(position: u64, size: usize) -> CodeAreaError {
    CodeAreaError::invalid_argument(format!(
        "position {} out of bounds for data of size {}",
        position, size
    ))
}

impl From<Vec<u8>> for ByteArrayData {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl BinaryData for ByteArrayData {
    fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    fn byte_at(&self, position: u64) -> Result<u8> {
        Ok(self.bytes[self.index(position)?])
    }

    fn copy_to_slice(&self, position: u64, target: &mut [u8]) -> Result<()> {
        let range = self.span(position, target.len() as u64)?;
        target.copy_from_slice(&self.bytes[range]);
        Ok(())
    }

    fn as_editable(&mut self) -> Option<&mut dyn EditableBinaryData> {
        if self.read_only {
            None
        } else {
            Some(self)
        }
    }
}

impl EditableBinaryData for ByteArrayData {
    fn insert(&mut self, position: u64, bytes: &[u8]) -> Result<()> {
        let at = self.insertion_point(position)?;
        self.bytes.splice(at..at, bytes.iter().copied());
        Ok(())
    }

    fn insert_zeros(&mut self, position: u64, count: u64) -> Result<()> {
        let at = self.insertion_point(position)?;
        let count = usize::try_from(count)
            .map_err(|_| CodeAreaError::invalid_argument("insert count exceeds address space"))?;
        self.bytes
            .splice(at..at, std::iter::repeat(0u8).take(count));
        Ok(())
    }

    fn remove(&mut self, position: u64, length: u64) -> Result<()> {
        let range = self.span(position, length)?;
        self.bytes.drain(range);
        Ok(())
    }

    fn set_byte(&mut self, position: u64, value: u8) -> Result<()> {
        let i = self.index(position)?;
        self.bytes[i] = value;
        Ok(())
    }

    fn replace(&mut self, position: u64, bytes: &[u8]) -> Result<()> {
        let range = self.span(position, bytes.len() as u64)?;
        self.bytes[range].copy_from_slice(bytes);
        Ok(())
    }

    fn fill(&mut self, position: u64, length: u64, value: u8) -> Result<()> {
        let range = self.span(position, length)?;
        self.bytes[range].fill(value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_remove() {
        let mut data = ByteArrayData::new(vec![1, 2, 3]);
        data.insert(1, &[9, 9]).unwrap();
        assert_eq!(data.as_slice(), &[1, 9, 9, 2, 3]);
        data.remove(0, 2).unwrap();
        assert_eq!(data.as_slice(), &[9, 2, 3]);
        data.insert(3, &[7]).unwrap();
        assert_eq!(data.as_slice(), &[9, 2, 3, 7]);
        data.insert_zeros(0, 2).unwrap();
        assert_eq!(data.as_slice(), &[0, 0, 9, 2, 3, 7]);
    }

    #[test]
    fn test_bounds_are_checked() {
        let mut data = ByteArrayData::new(vec![1, 2, 3]);
        assert!(data.byte_at(3).is_err());
        assert!(data.insert(4, &[0]).is_err());
        assert!(data.remove(2, 2).is_err());
        assert!(data.replace(2, &[0, 0]).is_err());
        assert!(data.fill(u64::MAX, 2, 0).is_err());
        assert_eq!(data.as_slice(), &[1, 2, 3], "failed calls must not mutate");
    }

    #[test]
    fn test_replace_fill_and_copy() {
        let mut data = ByteArrayData::new(vec![0; 6]);
        data.replace(1, &[5, 6]).unwrap();
        data.fill(4, 2, 0xEE).unwrap();
        data.set_byte(0, 1).unwrap();
        assert_eq!(data.copy(0, 6).unwrap(), vec![1, 5, 6, 0, 0xEE, 0xEE]);
        let mut buf = [0u8; 2];
        data.copy_to_slice(1, &mut buf).unwrap();
        assert_eq!(buf, [5, 6]);
    }

    #[test]
    fn test_read_only_has_no_editable_view() {
        let mut data = ByteArrayData::read_only(vec![1]);
        assert!(data.as_editable().is_none());
        let mut data = ByteArrayData::new(vec![1]);
        assert!(data.as_editable().is_some());
    }
}
