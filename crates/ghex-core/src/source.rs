//! Item source: which listings to fetch, in which order, and fetching them.

use crate::error::ExploreResult;
use crate::item::Item;
use crate::target::Target;
use async_trait::async_trait;
use gh_api_client::{GhApiResult, GitHubClient, RawObject, UserProfile};
use std::collections::VecDeque;

/// Restricts which listings are fetched when no repository is named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemKindSelector {
    #[default]
    Unspecified,
    RepositoryOnly,
    GistOnly,
}

impl ItemKindSelector {
    /// Map a `--type` value (`r`, `repo`, `g`, `gist`).
    pub fn from_flag(value: Option<&str>) -> Option<Self> {
        match value {
            None => Some(Self::Unspecified),
            Some("r") | Some("repo") => Some(Self::RepositoryOnly),
            Some("g") | Some("gist") => Some(Self::GistOnly),
            Some(_) => None,
        }
    }

    pub fn allows_repositories(&self) -> bool {
        matches!(self, Self::Unspecified | Self::RepositoryOnly)
    }

    pub fn allows_gists(&self) -> bool {
        matches!(self, Self::Unspecified | Self::GistOnly)
    }
}

/// Remote collaborator the source reads from.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Owner profile; fails when the owner does not exist.
    async fn profile(&self, owner: &str) -> GhApiResult<UserProfile>;

    /// One repository; fails when it does not exist.
    async fn repository(&self, owner: &str, name: &str) -> GhApiResult<RawObject>;

    /// Every repository of the owner, in server order.
    async fn repositories(&self, owner: &str) -> GhApiResult<Vec<RawObject>>;

    /// Every gist of the owner, in server order.
    async fn gists(&self, owner: &str) -> GhApiResult<Vec<RawObject>>;
}

#[async_trait]
impl Catalog for GitHubClient {
    async fn profile(&self, owner: &str) -> GhApiResult<UserProfile> {
        self.get_user(owner).await
    }

    async fn repository(&self, owner: &str, name: &str) -> GhApiResult<RawObject> {
        self.get_repo(owner, name).await
    }

    async fn repositories(&self, owner: &str) -> GhApiResult<Vec<RawObject>> {
        self.list_repos(owner).await
    }

    async fn gists(&self, owner: &str) -> GhApiResult<Vec<RawObject>> {
        self.list_gists(owner).await
    }
}

/// One collection fetched as a unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    /// A single named repository.
    Repository(String),
    Gists,
    Repositories,
}

impl Listing {
    /// Fixed fetch order for a target: a named repository alone, otherwise
    /// gists before repositories, each only if the selector allows it.
    pub fn plan(target: &Target, kind: ItemKindSelector) -> Vec<Listing> {
        if let Some(repo) = &target.repo {
            return vec![Listing::Repository(repo.clone())];
        }

        let mut listings = Vec::with_capacity(2);
        if kind.allows_gists() {
            listings.push(Listing::Gists);
        }
        if kind.allows_repositories() {
            listings.push(Listing::Repositories);
        }
        listings
    }
}

/// Lazily fetched, ordered stream of items.
///
/// A listing is requested only once the previous one is drained.
pub struct ItemSource<'a, C: Catalog + ?Sized> {
    catalog: &'a C,
    owner: String,
    pending: VecDeque<Listing>,
    current: std::vec::IntoIter<Item>,
    fetched: usize,
}

impl<'a, C: Catalog + ?Sized> ItemSource<'a, C> {
    pub fn new(catalog: &'a C, target: &Target, kind: ItemKindSelector) -> Self {
        Self {
            catalog,
            owner: target.owner.clone(),
            pending: Listing::plan(target, kind).into(),
            current: Vec::new().into_iter(),
            fetched: 0,
        }
    }

    /// Next item, fetching the next listing when the current one is drained.
    pub async fn next(&mut self) -> ExploreResult<Option<Item>> {
        loop {
            if let Some(item) = self.current.next() {
                return Ok(Some(item));
            }

            let Some(listing) = self.pending.pop_front() else {
                return Ok(None);
            };

            let items = self.fetch(&listing).await?;
            tracing::debug!(owner = %self.owner, ?listing, count = items.len(), "fetched listing");
            self.fetched += items.len();
            self.current = items.into_iter();
        }
    }

    /// Number of items fetched so far.
    pub fn fetched(&self) -> usize {
        self.fetched
    }

    async fn fetch(&self, listing: &Listing) -> ExploreResult<Vec<Item>> {
        let items = match listing {
            Listing::Repository(name) => {
                vec![Item::Repository(
                    self.catalog.repository(&self.owner, name).await?,
                )]
            }
            Listing::Gists => self
                .catalog
                .gists(&self.owner)
                .await?
                .into_iter()
                .map(Item::Gist)
                .collect(),
            Listing::Repositories => self
                .catalog
                .repositories(&self.owner)
                .await?
                .into_iter()
                .map(Item::Repository)
                .collect(),
        };
        Ok(items)
    }
}
