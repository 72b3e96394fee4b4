use std::io::{ErrorKind, Read};
use std::path::Path;

use romu_core::Fingerprint;
use romu_core::util::hex_upper;
use sha1::Digest;

use crate::error::DatError;

const CHUNK_SIZE: usize = 64 * 1024; // 64 KB

/// Compute CRC32, MD5 and SHA1 of a stream in a single forward pass.
///
/// Reads in 64 KB chunks until EOF. When `expected_len` is given, a stream
/// that ends early (or runs long) is an error and no digests are returned.
pub fn fingerprint<R: Read>(
    reader: &mut R,
    expected_len: Option<u64>,
) -> Result<Fingerprint, DatError> {
    let mut crc = crc32fast::Hasher::new();
    let mut sha = sha1::Sha1::new();
    let mut md5_ctx = md5::Context::new();
    let mut buf = vec![0u8; CHUNK_SIZE];
    let mut total: u64 = 0;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        let chunk = &buf[..n];
        crc.update(chunk);
        sha.update(chunk);
        md5_ctx.consume(chunk);
        total += n as u64;
    }

    if let Some(expected) = expected_len {
        if total != expected {
            return Err(DatError::TruncatedStream {
                expected,
                actual: total,
            });
        }
    }

    Ok(Fingerprint {
        crc32: format!("{:08X}", crc.finalize()),
        md5: hex_upper(&md5_ctx.compute().0),
        sha1: hex_upper(&sha.finalize()),
        size: total,
    })
}

/// Fingerprint a file on disk, checking the read length against its metadata.
pub fn fingerprint_file(path: &Path) -> Result<Fingerprint, DatError> {
    let mut file = std::fs::File::open(path)?;
    let len = file.metadata()?.len();
    fingerprint(&mut file, Some(len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_empty_stream() {
        let fp = fingerprint(&mut Cursor::new(Vec::<u8>::new()), Some(0)).unwrap();
        assert_eq!(fp.crc32, "00000000");
        assert_eq!(fp.md5, "D41D8CD98F00B204E9800998ECF8427E");
        assert_eq!(fp.sha1, "DA39A3EE5E6B4B0D3255BFEF95601890AFD80709");
        assert_eq!(fp.size, 0);
    }

    #[test]
    fn test_known_digests() {
        let fp = fingerprint(&mut Cursor::new(b"hello world".to_vec()), None).unwrap();
        assert_eq!(fp.crc32, "0D4A1185");
        assert_eq!(fp.md5, "5EB63BBBE01EEED093CB22BB8F5ACDC3");
        assert_eq!(fp.sha1, "2AAE6C35C94FCFB415DBE95F408B9CE91EE846ED");
        assert_eq!(fp.size, 11);
    }

    #[test]
    fn test_multi_chunk_matches_single_chunk() {
        let data: Vec<u8> = (0..(CHUNK_SIZE * 3 + 17)).map(|i| (i % 251) as u8).collect();
        let a = fingerprint(&mut Cursor::new(data.clone()), Some(data.len() as u64)).unwrap();

        let mut crc = crc32fast::Hasher::new();
        crc.update(&data);
        assert_eq!(a.crc32, format!("{:08X}", crc.finalize()));
        assert_eq!(a.size, data.len() as u64);
    }

    #[test]
    fn test_short_stream_fails() {
        let result = fingerprint(&mut Cursor::new(vec![1u8; 10]), Some(20));
        assert!(matches!(
            result,
            Err(DatError::TruncatedStream {
                expected: 20,
                actual: 10
            })
        ));
    }

    struct FailingReader {
        served: bool,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.served {
                return Err(std::io::Error::other("disk went away"));
            }
            self.served = true;
            buf[..4].copy_from_slice(b"ROM!");
            Ok(4)
        }
    }

    #[test]
    fn test_read_error_fails() {
        let result = fingerprint(&mut FailingReader { served: false }, None);
        assert!(matches!(result, Err(DatError::Io(_))));
    }

    #[test]
    fn test_fingerprint_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rom.gb");
        std::fs::write(&path, b"hello world").unwrap();
        let fp = fingerprint_file(&path).unwrap();
        assert_eq!(fp.sha1, "2AAE6C35C94FCFB415DBE95F408B9CE91EE846ED");
    }
}
