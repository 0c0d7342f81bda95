#![allow(dead_code)]

use async_trait::async_trait;
use gh_api_client::{GhApiError, GhApiResult, RawObject, UserProfile};
use ghex_core::Catalog;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory catalog recording every call made against it.
#[derive(Default)]
pub struct FakeCatalog {
    profiles: HashMap<String, UserProfile>,
    repos: HashMap<String, Vec<RawObject>>,
    gists: HashMap<String, Vec<RawObject>>,
    calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an owner with the given profile counters and listings.
    pub fn with_owner(
        mut self,
        profile: Value,
        repos: Vec<Value>,
        gists: Vec<Value>,
    ) -> Self {
        let profile = UserProfile::from_raw(object(profile)).expect("profile");
        let login = profile.login.clone();
        self.repos
            .insert(login.clone(), repos.into_iter().map(object).collect());
        self.gists
            .insert(login.clone(), gists.into_iter().map(object).collect());
        self.profiles.insert(login, profile);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn owner_listing(
        &self,
        listings: &HashMap<String, Vec<RawObject>>,
        owner: &str,
    ) -> GhApiResult<Vec<RawObject>> {
        listings.get(owner).cloned().ok_or_else(|| GhApiError::NotFound {
            resource: format!("user '{owner}'"),
        })
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn profile(&self, owner: &str) -> GhApiResult<UserProfile> {
        self.record(format!("profile {owner}"));
        self.profiles
            .get(owner)
            .cloned()
            .ok_or_else(|| GhApiError::NotFound {
                resource: format!("user '{owner}'"),
            })
    }

    async fn repository(&self, owner: &str, name: &str) -> GhApiResult<RawObject> {
        self.record(format!("repository {owner}/{name}"));
        self.owner_listing(&self.repos, owner)?
            .into_iter()
            .find(|r| r.get("name").and_then(Value::as_str) == Some(name))
            .ok_or_else(|| GhApiError::NotFound {
                resource: format!("repository '{owner}/{name}'"),
            })
    }

    async fn repositories(&self, owner: &str) -> GhApiResult<Vec<RawObject>> {
        self.record(format!("repositories {owner}"));
        self.owner_listing(&self.repos, owner)
    }

    async fn gists(&self, owner: &str) -> GhApiResult<Vec<RawObject>> {
        self.record(format!("gists {owner}"));
        self.owner_listing(&self.gists, owner)
    }
}

pub fn object(value: Value) -> RawObject {
    value.as_object().cloned().expect("json object")
}

pub fn repo(name: &str, language: Option<&str>, open_issues: u64) -> Value {
    json!({
        "name": name,
        "full_name": format!("octocat/{name}"),
        "language": language,
        "open_issues": open_issues
    })
}

pub fn gist(id: &str) -> Value {
    json!({"id": id, "description": format!("gist {id}"), "files": {}})
}

/// `octocat` with two gists and three repositories.
pub fn octocat() -> FakeCatalog {
    FakeCatalog::new().with_owner(
        json!({
            "login": "octocat",
            "public_repos": 3,
            "public_gists": 2
        }),
        vec![
            repo("Hello-World", Some("Rust"), 2),
            repo("Spoon-Knife", Some("HTML"), 0),
            repo("linguist", None, 5),
        ],
        vec![gist("aa11"), gist("bb22")],
    )
}

pub fn lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8(bytes.to_vec())
        .expect("utf8")
        .lines()
        .map(str::to_string)
        .collect()
}
