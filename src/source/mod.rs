//! Remote member source: record types, JSON decoding and the one-shot fetch.
//!
//! The endpoint returns a JSON array of `{ id, name, email, role }` objects. Any of
//! those fields may arrive as a string, a number or a boolean; everything is
//! normalized to its string form so that filtering compares text with text.
//!
use serde::{Deserialize, Deserializer};
use std::fmt::{Display, Formatter};
use std::sync::mpsc::{self, Receiver};
use tracing::{debug, error, info};

use crate::error::{Context, Result};

/// Endpoint the member list is fetched from when no override is configured.
pub const DEFAULT_SOURCE_URL: &str =
    "https://geektrust.s3-ap-southeast-1.amazonaws.com/adminui-problem/members.json";

/// Identity of a member record.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberId(pub String);

impl MemberId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for MemberId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MemberId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<u32> for MemberId {
    fn from(n: u32) -> Self {
        Self(n.to_string())
    }
}

impl<'de> Deserialize<'de> for MemberId {
    fn deserialize<D: Deserializer<'de>>(d: D) -> std::result::Result<Self, D::Error> {
        scalar_string(d).map(MemberId)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct MemberRecord {
    pub id: MemberId,
    #[serde(deserialize_with = "scalar_string")]
    pub name: String,
    #[serde(deserialize_with = "scalar_string")]
    pub email: String,
    #[serde(deserialize_with = "scalar_string")]
    pub role: String,
}

impl MemberRecord {
    pub fn new(
        id: impl Into<MemberId>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            role: role.into(),
        }
    }

    /// Every field in string form, identity included. Search matches against these.
    pub fn field_values(&self) -> [&str; 4] {
        [self.id.as_str(), &self.name, &self.email, &self.role]
    }
}

fn scalar_string<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Number(serde_json::Number),
        Flag(bool),
    }

    Ok(match Scalar::deserialize(d)? {
        Scalar::Text(s) => s,
        Scalar::Number(n) => n.to_string(),
        Scalar::Flag(b) => b.to_string(),
    })
}

/// Decode the body returned by the member endpoint.
pub fn parse_members(body: &str) -> Result<Vec<MemberRecord>> {
    serde_json::from_str(body).with_ctx(|| "decoding member list".to_string())
}

/// Blocking HTTP client bound to one source URL.
pub struct SourceAdapter {
    url: String,
    client: reqwest::blocking::Client,
}

impl SourceAdapter {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .with_ctx(|| "building http client".to_string())?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }

    /// GET the member list. Transport errors, non-2xx statuses and malformed
    /// bodies all come back as errors; the caller decides how to recover.
    pub fn fetch_members(&self) -> Result<Vec<MemberRecord>> {
        debug!(url = %self.url, "fetching members");
        let response = self
            .client
            .get(&self.url)
            .send()
            .with_ctx(|| format!("GET {}", self.url))?
            .error_for_status()
            .with_ctx(|| format!("GET {} returned an error status", self.url))?;
        let body = response
            .text()
            .with_ctx(|| format!("reading body of {}", self.url))?;
        let members = parse_members(&body)?;
        info!(count = members.len(), "fetched members");
        Ok(members)
    }
}

/// Fetch the member list on a background thread.
///
/// The returned receiver yields exactly one message. If the worker thread
/// cannot be started the sender is dropped and the receiver reports
/// disconnection instead.
pub fn spawn_fetch(url: String) -> Receiver<Result<Vec<MemberRecord>>> {
    let (tx, rx) = mpsc::channel();
    let spawned = std::thread::Builder::new()
        .name("member-fetch".to_string())
        .spawn(move || {
            let res = SourceAdapter::new(url).and_then(|adapter| adapter.fetch_members());
            // The UI may already have exited.
            let _ = tx.send(res);
        });
    if let Err(e) = spawned {
        error!(error = %e, "failed to start fetch thread");
    }
    rx
}
