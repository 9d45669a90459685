//! Host text sinks for the portable signature text.
//!
//! A pad publishes its path text whenever a session finishes and writes an
//! empty string when it is cleared. The sink is the stand-in for the form
//! field a signature widget would normally fill.

use crate::draw::Path as SignaturePath;
use crate::path::{self, PathError};
use anyhow::{Context, Result};
use chrono::Utc;
use fs2::FileExt;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cell::RefCell;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;

const DOCUMENT_VERSION: u32 = 1;

/// Destination for published signature text.
pub trait TextSink {
    fn write(&mut self, text: &str) -> Result<()>;
}

/// Keeps every write in memory; clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    writes: Rc<RefCell<Vec<String>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All writes so far, oldest first.
    pub fn writes(&self) -> Vec<String> {
        self.writes.borrow().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.writes.borrow().last().cloned()
    }
}

impl TextSink for MemorySink {
    fn write(&mut self, text: &str) -> Result<()> {
        self.writes.borrow_mut().push(text.to_string());
        Ok(())
    }
}

/// Versioned wrapper written by [`FileSink`] in envelope mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureDocument {
    pub version: u32,
    pub last_modified: String,
    pub signature: Value,
}

/// Writes the text to a file, replacing its contents each time.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
    envelope: bool,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            envelope: false,
        }
    }

    /// Wrap each write in a [`SignatureDocument`].
    pub fn with_envelope(mut self, envelope: bool) -> Self {
        self.envelope = envelope;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".lock");
        PathBuf::from(name)
    }

    fn payload(&self, text: &str) -> Result<Vec<u8>> {
        if !self.envelope {
            return Ok(text.as_bytes().to_vec());
        }

        let signature = if text.is_empty() {
            Value::Array(Vec::new())
        } else {
            serde_json::from_str(text).context("signature text is not valid JSON")?
        };
        let document = SignatureDocument {
            version: DOCUMENT_VERSION,
            last_modified: Utc::now().to_rfc3339(),
            signature,
        };
        serde_json::to_vec_pretty(&document).context("failed to serialise signature document")
    }

    fn write_inner(&self, text: &str) -> Result<()> {
        let bytes = self.payload(text)?;

        let tmp_path = self.path.with_extension("tmp");
        {
            let mut tmp_file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&tmp_path)
                .with_context(|| {
                    format!("failed to open temporary file {}", tmp_path.display())
                })?;
            tmp_file
                .write_all(&bytes)
                .context("failed to write signature text")?;
            tmp_file
                .sync_all()
                .context("failed to sync temporary signature file")?;
        }

        fs::rename(&tmp_path, &self.path).with_context(|| {
            format!(
                "failed to move temporary file {} -> {}",
                tmp_path.display(),
                self.path.display()
            )
        })?;

        debug!(
            "Signature written to {} ({} bytes)",
            self.path.display(),
            bytes.len()
        );
        Ok(())
    }
}

impl TextSink for FileSink {
    fn write(&mut self, text: &str) -> Result<()> {
        let lock_path = self.lock_path();
        let lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("failed to open lock file {}", lock_path.display()))?;
        lock_file
            .lock_exclusive()
            .with_context(|| format!("failed to lock {}", lock_path.display()))?;

        let result = self.write_inner(text);

        lock_file.unlock().unwrap_or_else(|err| {
            warn!("failed to unlock {}: {}", lock_path.display(), err)
        });

        result
    }
}

/// Reads a signature file written by [`FileSink`] in either form.
///
/// An empty file is an empty signature.
pub fn load_signature(file: &Path) -> Result<SignaturePath> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("failed to read signature file {}", file.display()))?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        info!("Signature file {} is empty", file.display());
        return Ok(Vec::new());
    }

    let value: Value = serde_json::from_str(trimmed)
        .map_err(PathError::from)
        .with_context(|| format!("failed to parse signature file {}", file.display()))?;

    let signature = match value {
        Value::Object(_) => {
            let document: SignatureDocument = serde_json::from_value(value)
                .with_context(|| format!("invalid signature document {}", file.display()))?;
            if document.version > DOCUMENT_VERSION {
                warn!(
                    "Signature document version {} is newer than supported version {}",
                    document.version, DOCUMENT_VERSION
                );
            }
            document.signature
        }
        other => other,
    };

    path::codec::from_value(&signature)
        .with_context(|| format!("invalid signature in {}", file.display()))
}
