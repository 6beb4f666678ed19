// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Content-Encoding decoding
//!
//! Servers lie about encodings. A gzip body that fails to inflate is
//! returned as is, and a `deflate` body that is not zlib-wrapped is retried
//! as raw deflate before giving up. None of this ever fails the fetch.

use std::io::Read;

use bytes::Bytes;
use flate2::read::{DeflateDecoder, GzDecoder, ZlibDecoder};
use reqwest::header::HeaderMap;

use super::headers::CONTENT_ENCODING;

/// Decode `body` according to the `content-encoding` in `headers`
///
/// On a successful gzip or deflate decode the `content-encoding` header is
/// removed so the headers describe the bytes that are returned.
pub fn uncompress(headers: &mut HeaderMap, body: &Bytes) -> Bytes {
    let encoding = headers
        .get(CONTENT_ENCODING)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().to_ascii_lowercase());

    let decoded = match encoding.as_deref() {
        None | Some("") | Some("identity") => return body.clone(),
        Some("gzip") | Some("x-gzip") => gunzip(body),
        Some("deflate") => inflate(body),
        Some(other) => {
            tracing::debug!(encoding = other, "Unsupported content-encoding, leaving body as is");
            return body.clone();
        }
    };

    match decoded {
        Some(decoded) => {
            headers.remove(CONTENT_ENCODING);
            Bytes::from(decoded)
        }
        None => body.clone(),
    }
}

fn gunzip(body: &[u8]) -> Option<Vec<u8>> {
    read_all(GzDecoder::new(body))
        .map_err(|e| tracing::warn!(error = %e, "Corrupt gzip body, returning raw bytes"))
        .ok()
}

fn inflate(body: &[u8]) -> Option<Vec<u8>> {
    read_all(ZlibDecoder::new(body))
        .or_else(|e| {
            tracing::debug!(error = %e, "Not a zlib stream, retrying as raw deflate");
            read_all(DeflateDecoder::new(body))
        })
        .map_err(|e| tracing::warn!(error = %e, "Corrupt deflate body, returning raw bytes"))
        .ok()
}

fn read_all(mut reader: impl Read) -> std::io::Result<Vec<u8>> {
    let mut out = Vec::new();
    reader.read_to_end(&mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::write::{DeflateEncoder, GzEncoder, ZlibEncoder};
    use flate2::Compression;
    use reqwest::header::HeaderValue;

    use super::*;

    const TEXT: &[u8] = b"<html><head><title>Bookmarks</title></head><body>hello hello hello</body></html>";

    fn headers(encoding: Option<&'static str>) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert("content-type", HeaderValue::from_static("text/html"));
        if let Some(encoding) = encoding {
            map.insert(CONTENT_ENCODING, HeaderValue::from_static(encoding));
        }
        map
    }

    fn gzip(data: &[u8]) -> Bytes {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        Bytes::from(encoder.finish().unwrap())
    }

    fn zlib(data: &[u8]) -> Bytes {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        Bytes::from(encoder.finish().unwrap())
    }

    fn raw_deflate(data: &[u8]) -> Bytes {
        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        Bytes::from(encoder.finish().unwrap())
    }

    #[test]
    fn test_identity_and_absent() {
        let body = Bytes::from_static(TEXT);

        let mut map = headers(None);
        assert_eq!(uncompress(&mut map, &body), body);

        let mut map = headers(Some("identity"));
        assert_eq!(uncompress(&mut map, &body), body);
        assert!(map.contains_key(CONTENT_ENCODING));
    }

    #[test]
    fn test_gzip() {
        let mut map = headers(Some("gzip"));
        assert_eq!(uncompress(&mut map, &gzip(TEXT)), TEXT);
        assert!(!map.contains_key(CONTENT_ENCODING));
        assert!(map.contains_key("content-type"));
    }

    #[test]
    fn test_encoding_name_case_insensitive() {
        let mut map = headers(Some("GZip"));
        assert_eq!(uncompress(&mut map, &gzip(TEXT)), TEXT);
        assert!(!map.contains_key(CONTENT_ENCODING));
    }

    #[test]
    fn test_corrupt_gzip_falls_back_to_raw() {
        let body = Bytes::from_static(b"this was never gzipped");
        let mut map = headers(Some("gzip"));

        assert_eq!(uncompress(&mut map, &body), body);
        assert!(map.contains_key(CONTENT_ENCODING));
    }

    #[test]
    fn test_zlib_deflate() {
        let mut map = headers(Some("deflate"));
        assert_eq!(uncompress(&mut map, &zlib(TEXT)), TEXT);
        assert!(!map.contains_key(CONTENT_ENCODING));
    }

    #[test]
    fn test_raw_deflate_fallback() {
        let mut map = headers(Some("deflate"));
        assert_eq!(uncompress(&mut map, &raw_deflate(TEXT)), TEXT);
        assert!(!map.contains_key(CONTENT_ENCODING));
    }

    #[test]
    fn test_unknown_encoding_untouched() {
        let body = Bytes::from_static(b"\x1b\x00brotli-ish");
        let mut map = headers(Some("br"));

        assert_eq!(uncompress(&mut map, &body), body);
        assert!(map.contains_key(CONTENT_ENCODING));
    }
}
