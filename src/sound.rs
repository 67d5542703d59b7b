use std::fs;
use std::io::{stdout, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundResource {
    Bell,
    File(PathBuf),
}

/// A loaded sample. Consumed by [`SoundPlayer::unload`], so it can only be
/// released once.
#[derive(Debug, PartialEq, Eq)]
pub struct SoundHandle {
    pub id: u64,
    pub bytes: usize,
}

#[derive(thiserror::Error, Debug)]
pub enum SoundError {
    #[error("failed to load {path:?}: {source}")]
    Load {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("sound file {0:?} is empty")]
    Empty(PathBuf),
    #[error("playback failed: {0}")]
    Playback(#[from] std::io::Error),
    #[error("sound is muted")]
    Muted,
}

pub trait SoundPlayer: Send + Sync {
    fn load_and_play(&self, resource: &SoundResource) -> Result<SoundHandle, SoundError>;
    fn unload(&self, handle: SoundHandle);
}

/// Plays by ringing the terminal bell. File resources are read first so a
/// missing or empty sample fails the same way a real decoder would.
#[derive(Default)]
pub struct TerminalBell {
    next_id: AtomicU64,
}

impl SoundPlayer for TerminalBell {
    fn load_and_play(&self, resource: &SoundResource) -> Result<SoundHandle, SoundError> {
        let bytes = match resource {
            SoundResource::Bell => 0,
            SoundResource::File(path) => {
                let data = fs::read(path).map_err(|source| SoundError::Load {
                    path: path.clone(),
                    source,
                })?;
                if data.is_empty() {
                    return Err(SoundError::Empty(path.clone()));
                }
                data.len()
            }
        };
        // Not synchronized with the TUI's writes; BEL is a C0 control and
        // terminals act on it even in the middle of an escape sequence.
        let mut out = stdout();
        out.write_all(b"\x07")?;
        out.flush()?;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(id, bytes, "played sound");
        Ok(SoundHandle { id, bytes })
    }

    fn unload(&self, handle: SoundHandle) {
        debug!(id = handle.id, bytes = handle.bytes, "unloaded sound");
    }
}

pub struct Muted;

impl SoundPlayer for Muted {
    fn load_and_play(&self, _resource: &SoundResource) -> Result<SoundHandle, SoundError> {
        Err(SoundError::Muted)
    }

    fn unload(&self, _handle: SoundHandle) {}
}

/// Sound handles owned by one screen. Requests run on detached threads;
/// dropping the bank unloads every handle that came back. A handle that
/// arrives after the bank is gone is unloaded by its playback thread.
pub struct SoundBank {
    player: Arc<dyn SoundPlayer>,
    resource: SoundResource,
    loaded: Arc<Mutex<Option<Vec<SoundHandle>>>>,
}

impl SoundBank {
    pub fn new(player: Arc<dyn SoundPlayer>, resource: SoundResource) -> Self {
        SoundBank {
            player,
            resource,
            loaded: Arc::new(Mutex::new(Some(Vec::new()))),
        }
    }

    /// Fires a playback request without waiting for it. Failures are logged
    /// and dropped.
    pub fn play_detached(&self) -> thread::JoinHandle<()> {
        let player = Arc::clone(&self.player);
        let resource = self.resource.clone();
        let loaded = Arc::clone(&self.loaded);
        thread::spawn(move || match player.load_and_play(&resource) {
            Ok(handle) => {
                let mut slot = loaded.lock().unwrap_or_else(PoisonError::into_inner);
                match slot.as_mut() {
                    Some(handles) => handles.push(handle),
                    None => player.unload(handle),
                }
            }
            Err(SoundError::Muted) => {}
            Err(err) => warn!(error = %err, "sound playback skipped"),
        })
    }

    fn release_all(&self) -> usize {
        let handles = self
            .loaded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .unwrap_or_default();
        let released = handles.len();
        for handle in handles {
            self.player.unload(handle);
        }
        released
    }
}

impl Drop for SoundBank {
    fn drop(&mut self) {
        let released = self.release_all();
        if released > 0 {
            debug!(released, "released screen sounds");
        }
    }
}
