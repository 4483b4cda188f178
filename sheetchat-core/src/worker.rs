//! Background execution of the read-prompt-query pipeline

use crate::client::ChatClient;
use crate::error::{AskError, QueryError};
use crate::prompt;
use crate::range::CellRange;
use crate::reader;
use log::debug;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

/// Handle to a single in-flight query.
///
/// Exactly one completion is delivered per handle, on every worker exit
/// path; a worker that dies without reporting surfaces as
/// [`QueryError::Unexpected`]. A shell can therefore re-enable its submit
/// control unconditionally once [`wait`](QueryHandle::wait) (or a `Some`
/// from [`try_wait`](QueryHandle::try_wait)) returns.
#[derive(Debug)]
pub struct QueryHandle {
    rx: Receiver<Result<String, AskError>>,
}

impl QueryHandle {
    /// Block until the worker completes.
    pub fn wait(self) -> Result<String, AskError> {
        self.rx.recv().unwrap_or_else(|_| Err(lost_worker()))
    }

    /// Poll for completion without blocking, for shells pumping an event
    /// loop. Returns `None` while the worker is still running.
    pub fn try_wait(&self) -> Option<Result<String, AskError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(lost_worker())),
        }
    }
}

fn lost_worker() -> AskError {
    AskError::Query(QueryError::Unexpected(
        "query worker exited without reporting a result".to_string(),
    ))
}

/// Run a query against a spreadsheet on a dedicated background thread.
///
/// The file is read on the worker thread; the blocking network call never
/// runs on the spawning thread.
pub fn spawn_query(
    client: ChatClient,
    path: PathBuf,
    range: Option<CellRange>,
    question: String,
) -> QueryHandle {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let result = run_query(&client, &path, range.as_ref(), &question);
        debug!("query worker finished (ok: {})", result.is_ok());
        // The receiver may already be gone; completion delivery is
        // best-effort from the worker's side.
        let _ = tx.send(result);
    });
    QueryHandle { rx }
}

/// Synchronous pipeline: read the range, build the prompt, ask the API.
pub fn run_query(
    client: &ChatClient,
    path: &std::path::Path,
    range: Option<&CellRange>,
    question: &str,
) -> Result<String, AskError> {
    let grid = reader::read_range(path, range)?;
    let prompt = prompt::build_prompt(question, &grid);
    Ok(client.ask(&prompt)?)
}
