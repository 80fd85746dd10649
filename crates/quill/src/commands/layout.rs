//! `quill layout` command implementation.

use std::path::{Path, PathBuf};

use clap::Args;
use quill_blocks::{
    LayoutOptions, LayoutRenderer, LinkConfig, Post, PostPage, PostQuery, PostSource, SourceError,
    StaticPostSource,
};
use quill_config::{CliSettings, Config};
use serde_json::{Value, json};

use super::{read_input, write_result};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the layout command.
#[derive(Args)]
pub(crate) struct LayoutArgs {
    /// Page or post JSON, or a JSON array of layout blocks; `-` for stdin.
    file: PathBuf,

    /// Saved post listing used to fill archive blocks that query posts.
    #[arg(long)]
    posts: Option<PathBuf>,

    /// URL prefix for links to posts (overrides config).
    #[arg(long)]
    posts_prefix: Option<String>,

    /// CMS API base URL for logged archive queries (overrides config).
    #[arg(long)]
    api_base_url: Option<String>,
}

impl LayoutArgs {
    /// Execute the layout command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or an input cannot be read or
    /// parsed.
    pub(crate) fn execute(self, config_path: Option<&Path>, output: &Output) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            posts_prefix: self.posts_prefix,
            api_base_url: self.api_base_url,
            ..CliSettings::default()
        };
        let config = Config::load(config_path, Some(&cli_settings))?;

        let post = parse_layout(&read_input(&self.file)?)?;
        let listing = match &self.posts {
            Some(path) => Some(StaticPostSource::from_json(&read_input(path)?)?),
            None => None,
        };
        let source = QueryLog {
            base_url: config.api.base_url.clone(),
            listing,
        };

        let renderer = LayoutRenderer::new()
            .with_options(layout_options(&config))
            .with_post_source(source);
        let html = renderer.render_post(&post);
        if html.is_empty() {
            output.warning("Layout has no renderable blocks");
        }
        write_result(html.as_str())
    }
}

/// Read a page, a post or a bare block array as a post.
fn parse_layout(input: &str) -> Result<Post, CliError> {
    let value: Value = serde_json::from_str(input)?;
    match value {
        Value::Array(_) => Ok(serde_json::from_value(json!({ "layout": value }))?),
        Value::Object(_) => Ok(serde_json::from_value(value)?),
        _ => Err(CliError::Validation(
            "Layout input must be a page, a post or an array of blocks".to_owned(),
        )),
    }
}

fn layout_options(config: &Config) -> LayoutOptions {
    LayoutOptions {
        links: LinkConfig {
            posts_prefix: config.links.posts_prefix.clone(),
            pages_prefix: config.links.pages_prefix.clone(),
            fallback: config.links.fallback.clone(),
        },
        card_excerpt_words: config.excerpt.card_words,
        archive_limit: config.archive.default_limit,
        archive_sort: config.archive.sort.clone(),
    }
}

/// Logs each archive query as a CMS URL and answers it from a saved
/// listing, if one was given.
struct QueryLog {
    base_url: String,
    listing: Option<StaticPostSource>,
}

impl PostSource for QueryLog {
    fn fetch(&self, query: &PostQuery) -> Result<PostPage, SourceError> {
        tracing::info!(url = %query.to_url(&self.base_url), "Archive query");
        match &self.listing {
            Some(listing) => listing.fetch(query),
            None => Ok(PostPage::default()),
        }
    }
}
