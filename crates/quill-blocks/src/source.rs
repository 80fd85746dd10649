//! Where archive blocks get their posts.
//!
//! Archives list either posts embedded in the block itself or the result of
//! a query against the CMS. Running queries is left to a [`PostSource`]
//! supplied by the caller; this crate only builds them.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;

use crate::de;
use crate::model::{ArchiveBlock, PopulateBy, Post};

/// Characters left unescaped in query strings: A-Z a-z 0-9 * - . _
const QUERY_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'*')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_');

/// Error returned by a [`PostSource`].
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Post source unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid post listing: {0}")]
    Json(#[from] serde_json::Error),
}

/// Query for one page of posts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostQuery {
    pub limit: u32,
    /// 1-based page number.
    pub page: u32,
    pub sort: String,
    /// Restrict to posts in any of these categories.
    pub category_ids: Vec<String>,
}

impl PostQuery {
    /// Query parameters in the CMS REST API format.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("limit", self.limit.to_string()),
            ("page", self.page.to_string()),
            ("sort", self.sort.clone()),
        ];
        if !self.category_ids.is_empty() {
            pairs.push(("where[categories][in]", self.category_ids.join(",")));
        }
        pairs
    }

    /// Full URL of the posts endpoint under `base_url`.
    ///
    /// ```
    /// use quill_blocks::PostQuery;
    ///
    /// let query = PostQuery {
    ///     limit: 6,
    ///     page: 1,
    ///     sort: "-publishedAt".to_owned(),
    ///     category_ids: vec![],
    /// };
    /// assert_eq!(
    ///     query.to_url("http://localhost:3000/api/"),
    ///     "http://localhost:3000/api/posts?limit=6&page=1&sort=-publishedAt"
    /// );
    /// ```
    pub fn to_url(&self, base_url: &str) -> String {
        build_url(base_url, "posts", &self.query_pairs())
    }
}

/// Join `base_url` and `path` with exactly one slash and append `params` as
/// a percent-encoded query string.
pub fn build_url<K: AsRef<str>, V: AsRef<str>>(base_url: &str, path: &str, params: &[(K, V)]) -> String {
    let base = base_url.strip_suffix('/').unwrap_or(base_url);
    let path = path.strip_prefix('/').unwrap_or(path);
    let mut url = format!("{base}/{path}");

    let query = params
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(key.as_ref(), QUERY_ENCODE_SET),
                utf8_percent_encode(value.as_ref(), QUERY_ENCODE_SET)
            )
        })
        .collect::<Vec<_>>()
        .join("&");
    if !query.is_empty() {
        url.push('?');
        url.push_str(&query);
    }
    url
}

/// One page of a post listing, as returned by the CMS.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PostPage {
    #[serde(deserialize_with = "de::items")]
    pub docs: Vec<Post>,
    pub total_docs: u64,
    pub page: u32,
    pub has_next_page: bool,
}

/// Runs post queries for archive blocks.
pub trait PostSource {
    fn fetch(&self, query: &PostQuery) -> Result<PostPage, SourceError>;
}

/// A [`PostSource`] over posts held in memory, such as a saved listing.
///
/// Applies the category filter and pagination of each query. Posts keep
/// their stored order; `sort` is not applied.
#[derive(Clone, Debug, Default)]
pub struct StaticPostSource {
    posts: Vec<Post>,
}

impl StaticPostSource {
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    /// Load a saved listing: either a CMS response page or a bare post array.
    pub fn from_json(text: &str) -> Result<Self, SourceError> {
        let value: serde_json::Value = serde_json::from_str(text)?;
        let posts = if value.is_array() {
            serde_json::from_value::<Vec<Post>>(value)?
        } else {
            serde_json::from_value::<PostPage>(value)?.docs
        };
        Ok(Self::new(posts))
    }
}

impl PostSource for StaticPostSource {
    fn fetch(&self, query: &PostQuery) -> Result<PostPage, SourceError> {
        let matching: Vec<&Post> = self
            .posts
            .iter()
            .filter(|post| {
                query.category_ids.is_empty()
                    || post
                        .categories
                        .iter()
                        .any(|category| query.category_ids.iter().any(|id| id == category.id()))
            })
            .collect();

        let limit = query.limit.max(1) as usize;
        let skip = query.page.saturating_sub(1) as usize * limit;
        let docs: Vec<Post> = matching.iter().skip(skip).take(limit).map(|&post| post.clone()).collect();

        Ok(PostPage {
            has_next_page: skip + docs.len() < matching.len(),
            total_docs: matching.len() as u64,
            page: query.page,
            docs,
        })
    }
}

/// The posts an archive block lists.
#[derive(Clone, Debug, PartialEq)]
pub enum ArchivePosts<'a> {
    /// Posts embedded in the block.
    Listed { posts: &'a [Post], has_more: bool },
    /// Posts must be fetched.
    Query(PostQuery),
}

impl<'a> ArchivePosts<'a> {
    /// Decide where `block` gets its posts.
    ///
    /// Hand-picked posts win, then posts the CMS populated into the block,
    /// then a query for the first page.
    pub fn resolve(block: &'a ArchiveBlock, default_limit: u32, sort: &str) -> Self {
        if block.populate_by == PopulateBy::Selection
            && let Some(selected) = &block.selected_docs
        {
            return Self::Listed {
                posts: selected,
                has_more: false,
            };
        }
        if let Some(populated) = &block.populated_docs {
            let total = block.populated_docs_total.unwrap_or(0);
            return Self::Listed {
                posts: populated,
                has_more: total > populated.len() as u64,
            };
        }
        Self::Query(PostQuery {
            limit: block.limit.filter(|&limit| limit > 0).unwrap_or(default_limit),
            page: 1,
            sort: sort.to_owned(),
            category_ids: block
                .categories
                .iter()
                .map(|category| category.id().to_owned())
                .collect(),
        })
    }
}
