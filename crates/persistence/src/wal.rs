// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Write-ahead log of accepted ledger events.
//!
//! Entry layout: `[seq u64][len u32][crc64 u64][payload]`, little-endian.
//! The checksum covers seq, len and payload. `seq` is the ledger height the
//! event produced.

use std::fs::{File, OpenOptions};
use std::io::{BufReader, Read, Write};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};
use crc64fast::Digest;
use stoken_kernel::LedgerEvent;
use tracing::warn;

use crate::error::{PersistenceError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalEntryHeader {
    pub seq: u64,
    pub payload_len: u32,
    pub checksum: u64,
}

impl WalEntryHeader {
    pub const SIZE: usize = 8 + 4 + 8; // 20 bytes

    pub fn read_from<R: Read>(mut reader: R) -> Result<Self> {
        let seq = reader.read_u64::<LittleEndian>()?;
        let payload_len = reader.read_u32::<LittleEndian>()?;
        let checksum = reader.read_u64::<LittleEndian>()?;
        Ok(Self {
            seq,
            payload_len,
            checksum,
        })
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut buf = [0u8; Self::SIZE];
        buf[0..8].copy_from_slice(&self.seq.to_le_bytes());
        buf[8..12].copy_from_slice(&self.payload_len.to_le_bytes());
        buf[12..20].copy_from_slice(&self.checksum.to_le_bytes());
        buf
    }
}

fn entry_checksum(seq: u64, payload_len: u32, payload: &[u8]) -> u64 {
    let mut digest = Digest::new();
    digest.write(&seq.to_le_bytes());
    digest.write(&payload_len.to_le_bytes());
    digest.write(payload);
    digest.sum64()
}

pub struct WalEntry {
    pub header: WalEntryHeader,
    pub payload: Vec<u8>,
}

impl WalEntry {
    pub fn event(&self) -> Result<LedgerEvent> {
        Ok(LedgerEvent::decode(&self.payload)?)
    }
}

pub fn append_entry(path: impl AsRef<Path>, seq: u64, payload: &[u8]) -> Result<()> {
    let payload_len = u32::try_from(payload.len())
        .map_err(|_| PersistenceError::InvalidFormat("event payload too large".into()))?;

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let start = file.metadata()?.len();

    let header = WalEntryHeader {
        seq,
        payload_len,
        checksum: entry_checksum(seq, payload_len, payload),
    };

    let written = file
        .write_all(&header.to_bytes())
        .and_then(|()| file.write_all(payload))
        .and_then(|()| file.sync_data());
    if let Err(e) = written {
        // A partial entry would sit in front of the next append.
        if let Err(cut) = file.set_len(start) {
            warn!(seq, error = %cut, "failed to roll back partial WAL entry");
        }
        return Err(e.into());
    }

    Ok(())
}

pub fn append_event(path: impl AsRef<Path>, seq: u64, event: &LedgerEvent) -> Result<()> {
    append_entry(path, seq, &event.encode()?)
}

pub struct WalReader {
    reader: BufReader<File>,
    file_len: u64,
    /// End of the last whole entry read.
    offset: u64,
    torn: bool,
}

impl WalReader {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let file_len = file.metadata()?.len();
        Ok(Self {
            reader: BufReader::new(file),
            file_len,
            offset: 0,
            torn: false,
        })
    }

    /// Byte length of the whole entries read so far.
    pub fn valid_len(&self) -> u64 {
        self.offset
    }

    pub fn file_len(&self) -> u64 {
        self.file_len
    }

    /// True once the reader stopped at an incomplete trailing entry.
    pub fn torn_tail(&self) -> bool {
        self.torn
    }
}

impl Iterator for WalReader {
    type Item = Result<WalEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.torn {
            return None;
        }
        let remaining = self.file_len.saturating_sub(self.offset);
        if remaining == 0 {
            return None;
        }
        if remaining < WalEntryHeader::SIZE as u64 {
            self.torn = true;
            return None;
        }

        let header = match WalEntryHeader::read_from(&mut self.reader) {
            Ok(h) => h,
            Err(e) => return Some(Err(e)),
        };

        // Checked before allocating: a torn tail may carry any length.
        if u64::from(header.payload_len) > remaining - WalEntryHeader::SIZE as u64 {
            self.torn = true;
            return None;
        }

        let mut payload = vec![0u8; header.payload_len as usize];
        if let Err(e) = self.reader.read_exact(&mut payload) {
            return Some(Err(PersistenceError::IoError(e)));
        }

        let found = entry_checksum(header.seq, header.payload_len, &payload);
        if found != header.checksum {
            return Some(Err(PersistenceError::ChecksumMismatch {
                expected: header.checksum,
                found,
            }));
        }

        self.offset += WalEntryHeader::SIZE as u64 + u64::from(header.payload_len);
        Some(Ok(WalEntry { header, payload }))
    }
}

pub fn read_stream(path: impl AsRef<Path>) -> Result<WalReader> {
    WalReader::new(path)
}

/// All entries of the log at `path`; a missing file is an empty log.
pub fn read_entries(path: impl AsRef<Path>) -> Result<Vec<WalEntry>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Vec::new());
    }
    read_stream(path)?.collect()
}

/// Like [`read_entries`], but also cuts an incomplete trailing entry left by
/// an interrupted append, so the next append starts on an entry boundary.
pub fn recover(path: impl AsRef<Path>) -> Result<Vec<WalEntry>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Vec::new());
    }
    let mut reader = read_stream(path)?;
    let entries = reader.by_ref().collect::<Result<Vec<_>>>()?;
    if reader.torn_tail() {
        let file = OpenOptions::new().write(true).open(path)?;
        file.set_len(reader.valid_len())?;
        file.sync_data()?;
        warn!(
            entries = entries.len(),
            dropped_bytes = reader.file_len() - reader.valid_len(),
            "truncated torn WAL tail"
        );
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stoken_kernel::state::transition::Transition;
    use stoken_kernel::types::Address;
    use stoken_kernel::Origin;

    #[test]
    fn test_wal_entry_serialization() {
        let payload = b"hello world";
        let header = WalEntryHeader {
            seq: 1,
            payload_len: payload.len() as u32,
            checksum: entry_checksum(1, payload.len() as u32, payload),
        };

        let bytes = header.to_bytes();
        let mut reader = &bytes[..];
        let decoded = WalEntryHeader::read_from(&mut reader).unwrap();

        assert_eq!(header, decoded);
    }

    #[test]
    fn test_events_survive_the_log() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.wal");
        let a = Address([1u8; 20]);
        let events = [
            LedgerEvent::new(Origin::User(a), Transition::Create { address: a }),
            LedgerEvent::new(Origin::Operator(a), Transition::Mint { to: a, amount: u128::MAX }),
        ];
        for (i, event) in events.iter().enumerate() {
            append_event(&path, i as u64 + 1, event).unwrap();
        }

        let entries = read_entries(&path).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].header.seq, 2);
        assert_eq!(entries[1].event().unwrap(), events[1]);
    }

    #[test]
    fn test_flipped_byte_fails_checksum() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.wal");
        append_entry(&path, 1, b"payload").unwrap();

        let mut bytes = std::fs::read(&path).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 1;
        std::fs::write(&path, &bytes).unwrap();

        assert!(matches!(
            read_entries(&path),
            Err(PersistenceError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_torn_tail_is_cut_before_the_next_append() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.wal");
        append_entry(&path, 1, b"first").unwrap();
        let whole = std::fs::metadata(&path).unwrap().len();

        // Half a header, as left by a crash mid-append.
        let torn = WalEntryHeader {
            seq: 2,
            payload_len: 6,
            checksum: entry_checksum(2, 6, b"second"),
        };
        let mut bytes = std::fs::read(&path).unwrap();
        bytes.extend_from_slice(&torn.to_bytes()[..10]);
        std::fs::write(&path, &bytes).unwrap();

        let mut reader = read_stream(&path).unwrap();
        assert_eq!(reader.by_ref().count(), 1);
        assert!(reader.torn_tail());
        assert_eq!(reader.valid_len(), whole);

        assert_eq!(recover(&path).unwrap().len(), 1);
        assert_eq!(std::fs::metadata(&path).unwrap().len(), whole);

        append_entry(&path, 2, b"second").unwrap();
        let entries = read_entries(&path).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].payload, b"second");
    }

    #[test]
    fn test_oversized_length_in_tail_is_torn() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.wal");
        append_entry(&path, 1, b"first").unwrap();
        let whole = std::fs::metadata(&path).unwrap().len();

        let bogus = WalEntryHeader {
            seq: 2,
            payload_len: u32::MAX,
            checksum: 0,
        };
        let mut bytes = std::fs::read(&path).unwrap();
        bytes.extend_from_slice(&bogus.to_bytes());
        bytes.extend_from_slice(b"abc");
        std::fs::write(&path, &bytes).unwrap();

        assert_eq!(recover(&path).unwrap().len(), 1);
        assert_eq!(std::fs::metadata(&path).unwrap().len(), whole);
    }

    #[test]
    fn test_missing_log_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_entries(dir.path().join("absent.wal")).unwrap().is_empty());
    }
}
