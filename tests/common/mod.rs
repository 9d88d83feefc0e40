// In-memory fakes for the recorder's capabilities

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use excalidraw_collab::{
    Clipboard, Clock, CollabError, CollabRecorder, FileStore, Folder, LinkOpener, Notice,
    NoticeKind, Notifier, SecureRandomSource, StoreError,
};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU8, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct MemoryStore {
    pub folders: Mutex<BTreeSet<String>>,
    pub files: Mutex<BTreeMap<String, String>>,
    pub create_folder_calls: AtomicUsize,
    /// `create_folder` reports "already exists" as if another invocation won the race
    pub lose_folder_race: AtomicBool,
    pub fail_create_folder: AtomicBool,
    pub fail_create_file: AtomicBool,
}

impl MemoryStore {
    pub fn with_folder(path: &str) -> Self {
        let store = Self::default();
        store.folders.lock().unwrap().insert(path.to_string());
        store
    }

    pub fn files(&self) -> BTreeMap<String, String> {
        self.files.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl FileStore for MemoryStore {
    async fn get_folder(&self, path: &str) -> Result<Option<Folder>, StoreError> {
        let exists = self.folders.lock().unwrap().contains(path)
            || self.files.lock().unwrap().contains_key(path);
        Ok(exists.then(|| Folder {
            path: path.to_string(),
        }))
    }

    async fn create_folder(&self, path: &str) -> Result<(), StoreError> {
        self.create_folder_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_create_folder.load(Ordering::SeqCst) {
            return Err(StoreError::Io {
                path: path.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            });
        }
        if self.lose_folder_race.load(Ordering::SeqCst) {
            self.folders.lock().unwrap().insert(path.to_string());
            return Err(StoreError::AlreadyExists(path.to_string()));
        }
        if !self.folders.lock().unwrap().insert(path.to_string()) {
            return Err(StoreError::AlreadyExists(path.to_string()));
        }
        Ok(())
    }

    async fn create_file(&self, path: &str, content: &str) -> Result<(), StoreError> {
        if self.fail_create_file.load(Ordering::SeqCst) {
            return Err(StoreError::Io {
                path: path.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "storage unavailable"),
            });
        }

        let parent = path.rsplit_once('/').map(|(parent, _)| parent.to_string());
        if let Some(parent) = parent {
            if !self.folders.lock().unwrap().contains(&parent) {
                return Err(StoreError::NotFound(path.to_string()));
            }
        }

        let mut files = self.files.lock().unwrap();
        if files.contains_key(path) || self.folders.lock().unwrap().contains(path) {
            return Err(StoreError::AlreadyExists(path.to_string()));
        }
        files.insert(path.to_string(), content.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingClipboard {
    pub writes: Mutex<Vec<String>>,
    pub fail: AtomicBool,
}

#[async_trait::async_trait]
impl Clipboard for RecordingClipboard {
    async fn write_text(&self, text: &str) -> Result<(), CollabError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(CollabError::Clipboard("clipboard locked".to_string()));
        }
        self.writes.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingOpener {
    pub opened: Mutex<Vec<String>>,
    pub fail: AtomicBool,
}

#[async_trait::async_trait]
impl LinkOpener for RecordingOpener {
    async fn open(&self, url: &str) -> Result<(), CollabError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(CollabError::ExternalOpen("no handler".to_string()));
        }
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub notices: Mutex<Vec<Notice>>,
    pub fail: AtomicBool,
}

impl RecordingNotifier {
    pub fn of_kind(&self, kind: NoticeKind) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.kind == kind)
            .cloned()
            .collect()
    }
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, notice: &Notice) -> Result<(), CollabError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(CollabError::Notification("display unavailable".to_string()));
        }
        self.notices.lock().unwrap().push(notice.clone());
        Ok(())
    }
}

/// Fills every request with the same byte
pub struct FixedRandom(pub u8);

impl SecureRandomSource for FixedRandom {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), CollabError> {
        dest.fill(self.0);
        Ok(())
    }
}

/// Fills each request with an incrementing counter byte
#[derive(Default)]
pub struct CountingRandom(AtomicU8);

impl SecureRandomSource for CountingRandom {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), CollabError> {
        for byte in dest.iter_mut() {
            *byte = self.0.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }
}

pub struct FailingRandom;

impl SecureRandomSource for FailingRandom {
    fn fill_bytes(&self, _dest: &mut [u8]) -> Result<(), CollabError> {
        Err(CollabError::RandomSource("entropy pool unavailable".to_string()))
    }
}

/// Advances by a fixed step on every read
pub struct StepClock {
    start: DateTime<Utc>,
    step_ms: i64,
    reads: AtomicI64,
}

impl StepClock {
    pub fn new(step_ms: i64) -> Self {
        Self {
            start: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 45).unwrap(),
            step_ms,
            reads: AtomicI64::new(0),
        }
    }
}

impl Clock for StepClock {
    fn now(&self) -> DateTime<Utc> {
        let n = self.reads.fetch_add(1, Ordering::SeqCst);
        self.start + Duration::milliseconds(n * self.step_ms)
    }
}

pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub clipboard: Arc<RecordingClipboard>,
    pub opener: Arc<RecordingOpener>,
    pub notifier: Arc<RecordingNotifier>,
    pub recorder: CollabRecorder,
}

impl Harness {
    pub fn new(store: MemoryStore) -> Self {
        let store = Arc::new(store);
        let clipboard = Arc::new(RecordingClipboard::default());
        let opener = Arc::new(RecordingOpener::default());
        let notifier = Arc::new(RecordingNotifier::default());

        let recorder = CollabRecorder::new(
            store.clone(),
            clipboard.clone(),
            opener.clone(),
            notifier.clone(),
        )
        .with_clock(Arc::new(StepClock::new(1)));

        Self {
            store,
            clipboard,
            opener,
            notifier,
            recorder,
        }
    }
}
