//! sheetchat-core: spreadsheet-grounded chat queries
//!
//! This library reads a rectangular cell range out of a spreadsheet file and
//! forwards it, together with a user question, to a chat-completion API,
//! returning the assistant's answer text. Range reading and the query client
//! are independent, stateless, and usable on their own.

pub mod client;
pub mod config;
pub mod error;
pub mod grid;
pub mod prompt;
pub mod range;
pub mod reader;
pub mod worker;

use std::path::{Path, PathBuf};

pub use client::{ChatClient, NO_VALID_RESPONSE};
pub use config::ChatConfig;
pub use error::{AskError, ConfigError, QueryError, ReadError};
pub use grid::{CellValue, Grid};
pub use prompt::build_prompt;
pub use range::CellRange;
pub use reader::read_range;
pub use worker::{QueryHandle, spawn_query};

/// Main entry point tying the reader and the client together.
pub struct SheetChat {
    client: ChatClient,
}

impl SheetChat {
    pub fn new(config: ChatConfig) -> Result<Self, QueryError> {
        Ok(Self {
            client: ChatClient::new(config)?,
        })
    }

    pub fn config(&self) -> &ChatConfig {
        self.client.config()
    }

    /// The configured default range, or `None` (whole active sheet) when the
    /// configured specifier is empty.
    pub fn default_range(&self) -> Result<Option<CellRange>, ReadError> {
        let spec = &self.client.config().default_range;
        if spec.is_empty() {
            Ok(None)
        } else {
            spec.parse().map(Some)
        }
    }

    /// Probe a selected file by reading the configured default range.
    ///
    /// This is the file-selection validation step: it proves the file is a
    /// readable spreadsheet before any question is submitted against it.
    pub fn validate_file<P: AsRef<Path>>(&self, path: P) -> Result<Grid, ReadError> {
        let range = self.default_range()?;
        reader::read_range(path, range.as_ref())
    }

    /// Read the range, build the prompt, and query the API on the calling
    /// thread.
    pub fn ask<P: AsRef<Path>>(
        &self,
        path: P,
        range: Option<&CellRange>,
        question: &str,
    ) -> Result<String, AskError> {
        worker::run_query(&self.client, path.as_ref(), range, question)
    }

    /// Run [`ask`](SheetChat::ask) on a background worker thread.
    ///
    /// The returned handle always yields exactly one completion; see
    /// [`QueryHandle`].
    pub fn ask_background(
        &self,
        path: PathBuf,
        range: Option<CellRange>,
        question: String,
    ) -> QueryHandle {
        worker::spawn_query(self.client.clone(), path, range, question)
    }
}
