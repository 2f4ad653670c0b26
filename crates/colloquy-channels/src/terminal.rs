use async_trait::async_trait;
use colloquy_core::{Action, ColloquyError, ColloquyResult, Participant, ParticipantStatus};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;

/// Input stream shared by the participants typing on the same terminal.
pub type SharedReader = Arc<Mutex<Box<dyn AsyncBufRead + Send + Unpin>>>;

/// Output stream shared by the participants typing on the same terminal.
pub type SharedWriter = Arc<Mutex<Box<dyn AsyncWrite + Send + Unpin>>>;

/// A human typing one line per action.
///
/// End of input counts as a disconnect and ends the episode. Timeouts are
/// not supported: `act` and `shutdown` reject them with
/// [`ColloquyError::Unsupported`].
pub struct TerminalParticipant {
    worker_id: String,
    reader: SharedReader,
    writer: SharedWriter,
    disconnected: AtomicBool,
    ineligible: AtomicBool,
}

impl TerminalParticipant {
    /// Create a participant over the given streams.
    pub fn new(worker_id: impl Into<String>, reader: SharedReader, writer: SharedWriter) -> Self {
        Self {
            worker_id: worker_id.into(),
            reader,
            writer,
            disconnected: AtomicBool::new(false),
            ineligible: AtomicBool::new(false),
        }
    }

    /// Two participants taking turns on the process's stdin/stdout.
    pub fn stdio_pair(first: &str, second: &str) -> [Self; 2] {
        let reader: SharedReader =
            Arc::new(Mutex::new(Box::new(BufReader::new(tokio::io::stdin()))));
        let writer: SharedWriter = Arc::new(Mutex::new(Box::new(tokio::io::stdout())));
        [
            Self::new(first, reader.clone(), writer.clone()),
            Self::new(second, reader, writer),
        ]
    }

    /// Whether [`Participant::mark_ineligible`] was called.
    pub fn is_ineligible(&self) -> bool {
        self.ineligible.load(Ordering::SeqCst)
    }

    async fn write_line(&self, line: &str) -> ColloquyResult<()> {
        let mut writer = self.writer.lock().await;
        writer.write_all(line.as_bytes()).await?;
        writer.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl Participant for TerminalParticipant {
    fn worker_id(&self) -> &str {
        &self.worker_id
    }

    async fn act(&self, timeout: Option<Duration>) -> ColloquyResult<Action> {
        if timeout.is_some() {
            return Err(ColloquyError::Unsupported(
                "terminal participants do not take an act timeout".into(),
            ));
        }
        self.write_line(&format!("{}> ", self.worker_id)).await?;

        let mut line = String::new();
        let read = self.reader.lock().await.read_line(&mut line).await?;
        if read == 0 {
            self.disconnected.store(true, Ordering::SeqCst);
            return Ok(Action::done(self.worker_id.clone()));
        }
        let text = line.trim_end_matches(['\r', '\n']);
        Ok(Action::from_text(self.worker_id.clone(), text))
    }

    async fn observe(&self, action: Action) -> ColloquyResult<()> {
        self.write_line(&format!("[{}]: {}\n", action.id, action.text)).await
    }

    async fn shutdown(&self, timeout: Option<Duration>) -> ColloquyResult<()> {
        if timeout.is_some() {
            return Err(ColloquyError::Unsupported(
                "terminal participants do not take a shutdown timeout".into(),
            ));
        }
        self.write_line(&format!("[System]: {} left the conversation\n", self.worker_id))
            .await
    }

    fn status(&self) -> ParticipantStatus {
        ParticipantStatus {
            disconnected: self.disconnected.load(Ordering::SeqCst),
            ..ParticipantStatus::default()
        }
    }

    fn mark_ineligible(&self) {
        self.ineligible.store(true, Ordering::SeqCst);
    }
}
