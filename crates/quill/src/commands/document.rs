//! `quill render`, `quill plain-text` and `quill excerpt`.

use std::path::{Path, PathBuf};

use clap::Args;
use quill_config::{CliSettings, Config};
use quill_lexical::{Document, LexicalRenderer};

use super::{read_input, write_result};
use crate::error::CliError;

/// Arguments for commands that take a single Lexical document.
#[derive(Args)]
pub(crate) struct DocumentArgs {
    /// Lexical JSON file, or `-` for stdin.
    file: PathBuf,
}

impl DocumentArgs {
    /// Print the document as sanitized HTML.
    pub(crate) fn render(self) -> Result<(), CliError> {
        let document = load_document(&self.file)?;
        write_result(LexicalRenderer::new().render(&document).as_str())
    }

    /// Print the document's plain text.
    pub(crate) fn plain_text(self) -> Result<(), CliError> {
        let document = load_document(&self.file)?;
        write_result(&LexicalRenderer::new().render_as_plain_text(&document))
    }
}

/// Arguments for the excerpt command.
#[derive(Args)]
pub(crate) struct ExcerptArgs {
    /// Lexical JSON file, or `-` for stdin.
    file: PathBuf,

    /// Word limit (overrides excerpt.default_words).
    #[arg(short, long)]
    words: Option<usize>,

    /// Use the post card word limit (excerpt.card_words).
    #[arg(long, conflicts_with_all = ["words", "search"])]
    card: bool,

    /// Use the search result word limit (excerpt.search_words).
    #[arg(long, conflicts_with = "words")]
    search: bool,
}

impl ExcerptArgs {
    /// Execute the excerpt command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the input cannot be read.
    pub(crate) fn execute(self, config_path: Option<&Path>) -> Result<(), CliError> {
        let cli_settings = CliSettings {
            words: self.words,
            ..CliSettings::default()
        };
        let config = Config::load(config_path, Some(&cli_settings))?;

        let word_limit = if self.card {
            config.excerpt.card_words
        } else if self.search {
            config.excerpt.search_words
        } else {
            config.excerpt.default_words
        };

        let document = load_document(&self.file)?;
        tracing::info!(word_limit, "Building excerpt");
        write_result(&LexicalRenderer::new().get_excerpt(&document, word_limit))
    }
}

fn load_document(path: &Path) -> Result<Document, CliError> {
    let input = read_input(path)?;
    Ok(Document::from_json(&input)?)
}
