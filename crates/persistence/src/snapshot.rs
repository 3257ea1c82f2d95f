// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Snapshot files.
//!
//! A fixed 64-byte header followed by the canonical snapshot body:
//!
//! ```text
//! [magic "STKS"][version u32][height u64][state root 32B][body crc64 u64][reserved 8B]
//! ```
//!
//! The header repeats the height and root so a file can be checked without
//! decoding the body.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};
use crc64fast::Digest;
use stoken_kernel::snapshot::{decode_state, encode_state};
use stoken_kernel::types::Hash;
use stoken_kernel::Ledger;

use crate::error::{PersistenceError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotHeader {
    pub magic: [u8; 4],
    pub version: u32,
    pub height: u64,
    pub state_root: Hash,
    pub body_checksum: u64,
    pub reserved: [u8; 8],
}

impl SnapshotHeader {
    pub const SIZE: usize = 4 + 4 + 8 + 32 + 8 + 8; // 64 bytes
    pub const MAGIC: [u8; 4] = *b"STKS";
    pub const VERSION: u32 = 1;

    pub fn new(height: u64, state_root: Hash, body_checksum: u64) -> Self {
        Self {
            magic: Self::MAGIC,
            version: Self::VERSION,
            height,
            state_root,
            body_checksum,
            reserved: [0; 8],
        }
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut buf = [0u8; Self::SIZE];
        buf[0..4].copy_from_slice(&self.magic);
        buf[4..8].copy_from_slice(&self.version.to_le_bytes());
        buf[8..16].copy_from_slice(&self.height.to_le_bytes());
        buf[16..48].copy_from_slice(&self.state_root);
        buf[48..56].copy_from_slice(&self.body_checksum.to_le_bytes());
        buf[56..64].copy_from_slice(&self.reserved);
        buf
    }

    pub fn read_from<R: Read>(mut reader: R) -> Result<Self> {
        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if magic != Self::MAGIC {
            return Err(PersistenceError::InvalidMagic);
        }

        let version = reader.read_u32::<LittleEndian>()?;
        if version != Self::VERSION {
            return Err(PersistenceError::UnsupportedVersion(version));
        }
        let height = reader.read_u64::<LittleEndian>()?;
        let mut state_root = [0u8; 32];
        reader.read_exact(&mut state_root)?;
        let body_checksum = reader.read_u64::<LittleEndian>()?;
        let mut reserved = [0u8; 8];
        reader.read_exact(&mut reserved)?;

        Ok(Self {
            magic,
            version,
            height,
            state_root,
            body_checksum,
            reserved,
        })
    }
}

pub fn checksum(body: &[u8]) -> u64 {
    let mut digest = Digest::new();
    digest.write(body);
    digest.sum64()
}

/// Writes `ledger` to `path` through a temporary file and a rename, so a
/// reader never sees a half-written snapshot.
pub fn write_snapshot(path: impl AsRef<Path>, ledger: &Ledger) -> Result<SnapshotHeader> {
    let path = path.as_ref();
    let body = encode_state(ledger)?;
    let header = SnapshotHeader::new(ledger.height().0, ledger.root_hash(), checksum(&body));

    let tmp = path.with_extension("tmp");
    {
        let mut file = File::create(&tmp)?;
        file.write_all(&header.to_bytes())?;
        file.write_all(&body)?;
        file.sync_data()?;
    }
    fs::rename(&tmp, path)?;
    Ok(header)
}

pub fn read_header(path: impl AsRef<Path>) -> Result<SnapshotHeader> {
    let file = File::open(path)?;
    SnapshotHeader::read_from(file)
}

/// Reads the header and body, verifying the body checksum.
pub fn read_snapshot(path: impl AsRef<Path>) -> Result<(SnapshotHeader, Vec<u8>)> {
    let mut file = File::open(path)?;
    let header = SnapshotHeader::read_from(&mut file)?;
    let mut body = Vec::new();
    file.read_to_end(&mut body)?;

    let found = checksum(&body);
    if found != header.body_checksum {
        return Err(PersistenceError::ChecksumMismatch {
            expected: header.body_checksum,
            found,
        });
    }
    Ok((header, body))
}

/// Reads and decodes a snapshot, checking the body against its header.
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Ledger> {
    let (header, body) = read_snapshot(path)?;
    let ledger = decode_state(&body)?;
    if ledger.height().0 != header.height {
        return Err(PersistenceError::HeaderMismatch("height"));
    }
    if ledger.root_hash() != header.state_root {
        return Err(PersistenceError::HeaderMismatch("state root"));
    }
    Ok(ledger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stoken_kernel::state::transition::Transition;
    use stoken_kernel::types::Address;
    use stoken_kernel::Origin;

    fn write_raw(path: &Path, header: &SnapshotHeader, body: &[u8]) {
        let mut file = File::create(path).unwrap();
        file.write_all(&header.to_bytes()).unwrap();
        file.write_all(body).unwrap();
    }

    fn ledger() -> Ledger {
        let a = Address([7u8; 20]);
        let mut ledger = Ledger::new();
        ledger.apply(&Origin::User(a), &Transition::Create { address: a }).unwrap();
        ledger
            .apply(&Origin::Operator(a), &Transition::Mint { to: a, amount: 42 })
            .unwrap();
        ledger
    }

    #[test]
    fn test_snapshot_header_serialization() {
        let header = SnapshotHeader::new(100, [0xAA; 32], 0xfeed);
        let bytes = header.to_bytes();

        let mut reader = &bytes[..];
        let decoded = SnapshotHeader::read_from(&mut reader).unwrap();

        assert_eq!(header, decoded);
    }

    #[test]
    fn test_invalid_magic() {
        let mut bytes = [0u8; SnapshotHeader::SIZE];
        bytes[0..4].copy_from_slice(b"BADM");
        let mut reader = &bytes[..];
        let result = SnapshotHeader::read_from(&mut reader);
        assert!(matches!(result, Err(PersistenceError::InvalidMagic)));
    }

    #[test]
    fn test_write_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.snap");
        let ledger = ledger();

        let header = write_snapshot(&path, &ledger).unwrap();
        assert_eq!(header.height, 2);
        assert_eq!(read_header(&path).unwrap(), header);

        let loaded = load_snapshot(&path).unwrap();
        assert_eq!(loaded.root_hash(), ledger.root_hash());
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_corrupt_body_is_detected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.snap");
        write_snapshot(&path, &ledger()).unwrap();

        let mut bytes = fs::read(&path).unwrap();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xff;
        fs::write(&path, &bytes).unwrap();

        assert!(matches!(
            load_snapshot(&path),
            Err(PersistenceError::ChecksumMismatch { .. })
        ));
    }

    #[test]
    fn test_header_must_match_body() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.snap");
        let ledger = ledger();
        let body = encode_state(&ledger).unwrap();
        let header = SnapshotHeader::new(ledger.height().0, [0u8; 32], checksum(&body));
        write_raw(&path, &header, &body);

        assert!(matches!(
            load_snapshot(&path),
            Err(PersistenceError::HeaderMismatch("state root"))
        ));
    }
}
