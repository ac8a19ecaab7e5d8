use crate::{debug, error::FetchError, types::PkgRecord, utils::index::parse_index};

use bytes::Buf;
use flate2::read::GzDecoder;
use indicatif::HumanBytes;
use reqwest::{Client, StatusCode};
use std::io::Read;

pub struct Downloader {
    client: Client,
}

impl Downloader {
    pub fn new() -> Self {
        Downloader {
            client: Client::new(),
        }
    }

    /// Fetch a package index and parse it. `.gz` indices are decompressed first.
    pub async fn fetch_index(&self, url: &str) -> Result<Vec<PkgRecord>, FetchError> {
        debug!("Fetching {}", url);
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_owned(),
                source,
            })?;
        if resp.status() != StatusCode::OK {
            return Err(FetchError::Status {
                url: url.to_owned(),
                status: resp.status(),
            });
        }
        let body = resp.bytes().await.map_err(|source| FetchError::Transport {
            url: url.to_owned(),
            source,
        })?;
        debug!("Received {} from {}", HumanBytes(body.len() as u64), url);

        let pkgs = if url.ends_with(".gz") {
            let mut decoded = Vec::new();
            GzDecoder::new(body.reader())
                .read_to_end(&mut decoded)
                .map_err(|source| FetchError::Decode {
                    url: url.to_owned(),
                    source,
                })?;
            parse_index(decoded.as_slice())
        } else {
            parse_index(body.reader())
        }
        .map_err(|source| FetchError::Parse {
            url: url.to_owned(),
            source,
        })?;
        debug!("Parsed {} packages from {}", pkgs.len(), url);

        Ok(pkgs)
    }
}

impl Default for Downloader {
    fn default() -> Self {
        Self::new()
    }
}
