//! Transparent input decompression
//!
//! Detects gzip (1F 8B 08) and zstd (28 B5 2F FD) streams by magic bytes
//! and wraps them in the matching decoder, so compressed inputs flow
//! through the pipeline unchanged. Anything else passes through as-is.

use anyhow::{anyhow, Context, Result};
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;

/// Wrap `reader` in a decoder when its first bytes carry a known
/// compression signature. The sniffed bytes are chained back in front so
/// nothing is lost for plain streams.
pub fn maybe_decompress<R: Read + Send + 'static>(mut reader: R) -> std::io::Result<Box<dyn Read + Send>> {
    let mut head = [0u8; 4];
    let n = read_head(&mut reader, &mut head)?;

    let prefix = Cursor::new(head[..n].to_vec());
    let chained = prefix.chain(reader);

    let is_gzip = n >= 3 && head[0] == 0x1F && head[1] == 0x8B && head[2] == 0x08;
    let is_zstd = n >= 4 && head[0] == 0x28 && head[1] == 0xB5 && head[2] == 0x2F && head[3] == 0xFD;

    if is_gzip {
        Ok(Box::new(MultiGzDecoder::new(chained)))
    } else if is_zstd {
        Ok(Box::new(zstd::Decoder::new(chained)?))
    } else {
        Ok(Box::new(chained))
    }
}

/// Open a file for reading with transparent decompression
pub fn open_path(path: &Path) -> Result<Box<dyn Read + Send>> {
    if let Some(extension) = path.extension().and_then(|ext| ext.to_str()) {
        if extension.eq_ignore_ascii_case("zip") {
            return Err(anyhow!(
                "ZIP archives are not supported for streaming; extract first: unzip {}",
                path.display()
            ));
        }
    }

    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    maybe_decompress(file).with_context(|| format!("failed to read {}", path.display()))
}

// Read::read may return fewer bytes than asked even mid-stream, so loop
// until the sniff buffer is full or the stream ends.
fn read_head<R: Read>(reader: &mut R, head: &mut [u8; 4]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < head.len() {
        let n = reader.read(&mut head[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}
