/*
 *  feeds/client.rs
 *
 *  inkdash - e-ink dashboard
 *  (c) 2020-26 Stuart Hunter
 *
 *  Shared HTTP client for the JSON feeds
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */
use flate2::read::{GzDecoder, ZlibDecoder};
use log::debug;
use reqwest::{header, Client};
use serde::Serialize;
use std::io::Read;
use std::time::Duration;

use crate::config::HttpConfig;
use crate::feeds::FeedError;

const VERSION: &str = concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"));

/// One client per render pass; every request carries the configured
/// connect and total timeouts.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: Client,
}

impl FeedClient {
    pub fn new(http: &HttpConfig) -> Result<Self, FeedError> {
        let user_agent = http.user_agent.clone().unwrap_or_else(|| VERSION.to_string());

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(&user_agent)
                .map_err(|e| FeedError::InvalidInput(format!("user agent: {e}")))?,
        );
        headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));
        headers.insert(header::ACCEPT_ENCODING, header::HeaderValue::from_static("gzip, deflate"));
        headers.insert(header::CONNECTION, header::HeaderValue::from_static("close"));

        let client = Client::builder()
            .connect_timeout(Duration::from_millis(http.connect_timeout_ms))
            .timeout(Duration::from_millis(http.timeout_ms))
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }

    /// GET `url` with query parameters and return the decoded body text.
    pub async fn get_text<Q: Serialize + ?Sized>(&self, url: &str, query: &Q) -> Result<String, FeedError> {
        debug!("GET {url}");
        let response = self.client.get(url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status { url: url.to_string(), status: status.as_u16() });
        }
        let encoding = response
            .headers()
            .get(header::CONTENT_ENCODING)
            .and_then(|v| v.to_str().ok())
            .map(str::to_ascii_lowercase);
        let raw = response.bytes().await?;
        Ok(decode_body(&raw, encoding.as_deref()))
    }
}

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Inflate a body by its `Content-Encoding`. Gzip is also recognised by its
/// magic bytes since some feeds omit the header. Anything that does not
/// inflate is taken as (lossy) UTF-8.
pub fn decode_body(raw: &[u8], encoding: Option<&str>) -> String {
    let mut decoded = String::new();
    let inflated = match encoding {
        Some("deflate") => ZlibDecoder::new(raw).read_to_string(&mut decoded),
        _ if raw.starts_with(&GZIP_MAGIC) => GzDecoder::new(raw).read_to_string(&mut decoded),
        _ => return String::from_utf8_lossy(raw).into_owned(),
    };
    match inflated {
        Ok(_) => decoded,
        Err(e) => {
            debug!("body did not inflate ({e}), reading as text");
            String::from_utf8_lossy(raw).into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::{
        write::{GzEncoder, ZlibEncoder},
        Compression,
    };
    use std::io::Write;

    #[test]
    fn test_decode_plain_body() {
        assert_eq!(decode_body(br#"{"a":1}"#, None), r#"{"a":1}"#);
        assert_eq!(decode_body(br#"{"a":1}"#, Some("identity")), r#"{"a":1}"#);
    }

    #[test]
    fn test_decode_gzip_body() {
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(br#"{"states":[]}"#).unwrap();
        let gz = enc.finish().unwrap();
        assert_eq!(decode_body(&gz, Some("gzip")), r#"{"states":[]}"#);
        assert_eq!(decode_body(&gz, None), r#"{"states":[]}"#);
    }

    #[test]
    fn test_decode_deflate_body() {
        let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
        enc.write_all(br#"{"properties":{}}"#).unwrap();
        let zlib = enc.finish().unwrap();
        assert_eq!(decode_body(&zlib, Some("deflate")), r#"{"properties":{}}"#);
    }

    #[test]
    fn test_mislabelled_deflate_falls_back_to_text() {
        assert_eq!(decode_body(b"[1,2]", Some("deflate")), "[1,2]");
    }

    #[test]
    fn test_client_builds_with_defaults() {
        assert!(FeedClient::new(&HttpConfig::default()).is_ok());
    }
}
