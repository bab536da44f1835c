//! `file:` URLs are served straight from disk.

use crate::content::DEFAULT_CHARSET;
use crate::error::NetError;
use crate::http::{Headers, Response};
use crate::url::Url;
use bytes::Bytes;
use log::debug;
use std::fs;
use std::path::PathBuf;

pub(crate) fn read(url: &Url) -> Result<Response, NetError> {
    let path = PathBuf::from(url.path_without_query());
    let body = fs::read(&path).map_err(|source| NetError::File {
        path: path.clone(),
        source,
    })?;
    debug!("Read {} bytes from {}", body.len(), path.display());
    Ok(Response {
        status: 200,
        headers: Headers::new(),
        body: Bytes::from(body),
        encoding: DEFAULT_CHARSET.to_owned(),
    })
}
