use serde::{Deserialize, Serialize};

/// A JSON object exactly as the API returned it, key order preserved.
pub type RawObject = serde_json::Map<String, serde_json::Value>;

/// Owner profile with the counters used for aggregate counts.
///
/// `total_public_repos`, `total_private_repos` and `private_gists` are
/// optional: GitHub only sends some of them, and only to the owner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub login: String,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub total_public_repos: Option<u64>,
    #[serde(default)]
    pub total_private_repos: Option<u64>,
    #[serde(default)]
    pub public_gists: u64,
    #[serde(default)]
    pub private_gists: Option<u64>,
    /// Full profile payload.
    #[serde(skip)]
    pub raw: RawObject,
}

impl UserProfile {
    /// Build a profile from a raw `/users/{owner}` payload.
    pub fn from_raw(raw: RawObject) -> Result<Self, serde_json::Error> {
        let mut profile: UserProfile =
            serde_json::from_value(serde_json::Value::Object(raw.clone()))?;
        profile.raw = raw;
        Ok(profile)
    }

    /// `public_repos + total_public_repos`, the latter 0 when absent.
    ///
    /// `total_private_repos` is kept on the profile but not counted.
    pub fn repo_count(&self) -> u64 {
        self.public_repos + self.total_public_repos.unwrap_or(0)
    }

    /// Public plus (when visible) secret gists.
    pub fn gist_count(&self) -> u64 {
        self.public_gists + self.private_gists.unwrap_or(0)
    }
}
