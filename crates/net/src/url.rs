//! Absolute URLs with a fixed `{scheme, host, port, path}` shape.
//!
//! The path always starts with `/`, has its dot-segments resolved and may
//! carry a `?query` suffix. Fragments are never stored.

use crate::error::NetError;
use core::fmt;
use core::str::FromStr;

/// Port implied by a scheme when the URL does not spell one out.
#[inline]
pub fn default_port(scheme: &str) -> u16 {
    match scheme {
        "https" => 443,
        "file" => 0,
        _ => 80,
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Url {
    scheme: String,
    host: String,
    port: u16,
    path: String,
}

impl Url {
    /// Parse an absolute URL.
    ///
    /// A missing scheme defaults to `http`. Network schemes require a host;
    /// `file` URLs ignore any authority and keep only the path.
    ///
    /// # Errors
    /// Returns [`NetError::InvalidUrl`] when the host is missing or the port
    /// is not a number.
    pub fn parse(raw: &str) -> Result<Self, NetError> {
        let raw = raw.trim();
        let (scheme, rest) = match raw.split_once("://") {
            Some((scheme, rest)) if !scheme.is_empty() => (scheme.to_ascii_lowercase(), rest),
            Some((_, rest)) => ("http".to_owned(), rest),
            None => ("http".to_owned(), raw),
        };
        let rest = rest.split_once('#').map_or(rest, |(before, _)| before);
        let authority_end = rest.find(['/', '?']).unwrap_or(rest.len());
        let (authority, tail) = rest.split_at(authority_end);

        if scheme == "file" {
            let path = tail.split_once('?').map_or(tail, |(path, _)| path);
            return Ok(Self {
                scheme,
                host: String::new(),
                port: 0,
                path: ensure_leading_slash(path),
            });
        }

        let host_port = authority
            .rsplit_once('@')
            .map_or(authority, |(_, host_port)| host_port);
        let (host, port_text) = split_host_port(host_port);
        if host.is_empty() {
            return Err(NetError::invalid(raw, "missing host"));
        }
        let port = match port_text {
            None | Some("") => default_port(&scheme),
            Some(text) => text
                .parse::<u16>()
                .map_err(|_| NetError::invalid(raw, "port is not a number"))?,
        };

        let path = match tail.split_once('?') {
            Some((path, "")) => normalize_path(path),
            _ => normalize_path(tail),
        };

        Ok(Self {
            scheme,
            host: host.to_ascii_lowercase(),
            port,
            path,
        })
    }

    /// Resolve `link` against this URL.
    ///
    /// Handles absolute (`scheme://`), scheme-relative (`//host`),
    /// absolute-path (`/x`) and directory-relative links. Fragments are
    /// dropped; an empty or fragment-only link yields `self` unchanged.
    ///
    /// # Errors
    /// Returns [`NetError::InvalidUrl`] when an absolute or scheme-relative
    /// link has no usable host.
    pub fn resolve(&self, link: &str) -> Result<Self, NetError> {
        let link = link.trim();
        if link.is_empty() {
            return Ok(self.clone());
        }
        if link.contains("://") {
            return Self::parse(link);
        }

        let link = link.split_once('#').map_or(link, |(before, _)| before);
        if link.is_empty() {
            return Ok(self.clone());
        }

        if link.starts_with("//") {
            return Self::parse(&format!("{}:{link}", self.scheme));
        }

        let path = if link.starts_with('/') {
            normalize_path(link)
        } else {
            let base_path = self.path_without_query();
            let base_dir = match base_path.rfind('/') {
                Some(idx) => &base_path[..=idx],
                None => "/",
            };
            normalize_path(&format!("{base_dir}{link}"))
        };

        Ok(Self {
            scheme: self.scheme.clone(),
            host: self.host.clone(),
            port: self.port,
            path,
        })
    }

    #[inline]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    #[inline]
    pub fn host(&self) -> &str {
        &self.host
    }

    #[inline]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Path including any `?query` suffix; this is the HTTP request target.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn path_without_query(&self) -> &str {
        self.path
            .split_once('?')
            .map_or(self.path.as_str(), |(path, _)| path)
    }

    pub fn query(&self) -> Option<&str> {
        self.path.split_once('?').map(|(_, query)| query)
    }

    #[inline]
    pub fn is_secure(&self) -> bool {
        self.scheme == "https"
    }
}

impl fmt::Display for Url {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}://", self.scheme)?;
        if self.host.contains(':') {
            write!(formatter, "[{}]", self.host)?;
        } else {
            formatter.write_str(&self.host)?;
        }
        if self.port != default_port(&self.scheme) {
            write!(formatter, ":{}", self.port)?;
        }
        formatter.write_str(&self.path)
    }
}

impl FromStr for Url {
    type Err = NetError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::parse(raw)
    }
}

fn split_host_port(authority: &str) -> (&str, Option<&str>) {
    if let Some(bracketed) = authority.strip_prefix('[') {
        return match bracketed.split_once(']') {
            Some((host, after)) => (host, after.strip_prefix(':')),
            None => (bracketed, None),
        };
    }
    match authority.rsplit_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (authority, None),
    }
}

fn ensure_leading_slash(path: &str) -> String {
    if path.starts_with('/') {
        path.to_owned()
    } else {
        format!("/{path}")
    }
}

/// Drop empty and `.` segments and fold `..` into its parent. `..` never
/// climbs above the root. A `?query` suffix is carried through untouched.
pub(crate) fn normalize_path(path: &str) -> String {
    if path.is_empty() {
        return "/".to_owned();
    }
    let (path_part, query) = match path.split_once('?') {
        Some((path_part, query)) => (path_part, Some(query)),
        None => (path, None),
    };

    let mut segments: Vec<&str> = Vec::new();
    for segment in path_part.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    let mut out = String::with_capacity(path.len() + 1);
    out.push('/');
    out.push_str(&segments.join("/"));
    if let Some(query) = query {
        out.push('?');
        out.push_str(query);
    }
    out
}
