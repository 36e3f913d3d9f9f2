use std::borrow::Cow;
use std::io::{Cursor, Read};

use flate2::read::GzDecoder;

use crate::error::SceneError;

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

pub fn is_gzip(data: &[u8]) -> bool {
    data.starts_with(&GZIP_MAGIC)
}

/// Return the raw mesh blob, decompressing it first if it is gzip data.
pub fn decompress_blob(data: &[u8]) -> Result<Cow<'_, [u8]>, SceneError> {
    if !is_gzip(data) {
        return Ok(Cow::Borrowed(data));
    }

    let mut decoder = GzDecoder::new(Cursor::new(data));
    let mut out_data = Vec::new();
    decoder
        .read_to_end(&mut out_data)
        .map_err(SceneError::Decompress)?;

    Ok(Cow::Owned(out_data))
}
