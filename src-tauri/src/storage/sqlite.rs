use std::{
    path::{Path, PathBuf},
    sync::{mpsc, Arc, Mutex},
    thread::{self, JoinHandle},
};

use anyhow::{Context, Result};
use chrono::Utc;
use log::{error, info, warn};
use rusqlite::{params, Connection, OptionalExtension};

use super::{migrations::run_migrations, KeyValueStore, StoreError};

type Job = Box<dyn FnOnce(&mut Connection) + Send + 'static>;

enum Message {
    Run(Job),
    Stop,
}

/// Owns the worker thread; the last clone of a store to go away stops it.
struct Worker {
    jobs: Mutex<mpsc::Sender<Message>>,
    thread: Mutex<Option<JoinHandle<()>>>,
}

impl Drop for Worker {
    fn drop(&mut self) {
        let Some(thread) = self
            .thread
            .get_mut()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take()
        else {
            return;
        };

        let jobs = self
            .jobs
            .get_mut()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if jobs.send(Message::Stop).is_err() {
            warn!("Storage thread already gone at shutdown");
        }
        if let Err(panic) = thread.join() {
            error!("Storage thread panicked: {panic:?}");
        }
    }
}

/// Open the file, switch to WAL and bring the schema up to date.
fn prepare_connection(path: &Path) -> Result<Connection> {
    let mut conn = Connection::open(path)
        .with_context(|| format!("failed to open SQLite database {}", path.display()))?;
    if let Err(err) = conn.pragma_update(None, "journal_mode", "WAL") {
        warn!("WAL journal unavailable, using default: {err}");
    }
    run_migrations(&mut conn).context("failed to run database migrations")?;
    Ok(conn)
}

fn serve(mut conn: Connection, jobs: mpsc::Receiver<Message>) {
    for message in jobs {
        match message {
            Message::Run(job) => job(&mut conn),
            Message::Stop => break,
        }
    }
    info!("Storage thread shutting down");
}

/// Durable key/value store backed by a single SQLite file.
///
/// The connection lives on a dedicated worker thread fed over a channel.
/// Writes are queued and return immediately; only reads wait for a reply.
/// Dropping the last clone drains the queue before the thread exits.
#[derive(Clone)]
pub struct SqliteStore {
    worker: Arc<Worker>,
    db_path: Arc<PathBuf>,
}

impl SqliteStore {
    /// Blocks until the worker has opened and migrated the database, so a
    /// broken file is reported here rather than on the first write.
    pub fn open(db_path: PathBuf) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let (jobs_tx, jobs_rx) = mpsc::channel::<Message>();
        let (ready_tx, ready_rx) = mpsc::channel::<Result<()>>();
        let path = db_path.clone();

        let thread = thread::Builder::new()
            .name("focuskit-db".into())
            .spawn(move || match prepare_connection(&path) {
                Ok(conn) => {
                    if ready_tx.send(Ok(())).is_ok() {
                        serve(conn, jobs_rx);
                    }
                }
                Err(err) => {
                    let _ = ready_tx.send(Err(err));
                }
            })
            .context("failed to spawn storage worker thread")?;

        ready_rx
            .recv()
            .context("storage worker exited before signaling readiness")??;

        info!("Storage ready at {}", db_path.display());

        Ok(Self {
            worker: Arc::new(Worker {
                jobs: Mutex::new(jobs_tx),
                thread: Mutex::new(Some(thread)),
            }),
            db_path: Arc::new(db_path),
        })
    }

    pub fn path(&self) -> &Path {
        self.db_path.as_path()
    }

    fn submit(&self, job: Job) -> Result<(), StoreError> {
        self.worker
            .jobs
            .lock()
            .map_err(|_| StoreError::Unavailable("storage sender lock poisoned".into()))?
            .send(Message::Run(job))
            .map_err(|err| StoreError::Unavailable(format!("storage thread is gone: {err}")))
    }

    /// Run `task` on the worker and wait for its result. Jobs run in order,
    /// so a read observes every write queued before it.
    fn execute<F, T>(&self, task: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Connection) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let (reply_tx, reply_rx) = mpsc::channel();

        self.submit(Box::new(move |conn| {
            let result = task(conn);
            if reply_tx.send(result).is_err() {
                error!("Storage caller dropped before receiving result");
            }
        }))?;

        reply_rx
            .recv()
            .map_err(|_| StoreError::Unavailable("storage thread terminated unexpectedly".into()))?
    }

    /// Queue `task` without waiting. Failures are logged on the worker.
    fn enqueue<F>(&self, key: String, task: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut Connection, &str) -> Result<(), StoreError> + Send + 'static,
    {
        self.submit(Box::new(move |conn| {
            if let Err(err) = task(conn, &key) {
                error!("Failed to write '{key}': {err}");
            }
        }))
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let key = key.to_string();
        self.execute(move |conn| {
            let value = conn
                .query_row(
                    "SELECT value FROM kv WHERE key = ?1",
                    params![key],
                    |row| row.get::<_, String>(0),
                )
                .optional()?;
            Ok(value)
        })
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let value = value.to_string();
        self.enqueue(key.to_string(), move |conn, key| {
            conn.execute(
                "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value,
                                                updated_at = excluded.updated_at",
                params![key, value, Utc::now().to_rfc3339()],
            )?;
            Ok(())
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.enqueue(key.to_string(), move |conn, key| {
            conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
            Ok(())
        })
    }
}
