//! Shared test doubles for wupdate-script integration tests.
//!
//! Each double records what the engine asked of it, so tests can assert on
//! side effects without touching the disk, the network, or the terminal.

#![allow(dead_code)]

use std::collections::{HashSet, VecDeque};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use wupdate_core::console::Console;
use wupdate_core::download::{DownloadError, Downloader};
use wupdate_core::fs::{FileSystem, FsError};
use wupdate_script::ast::Script;
use wupdate_script::executor::{RunSummary, ScriptExecutor};
use wupdate_script::parser;

// ---------------------------------------------------------------------------
// Filesystem
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FsCall {
    Dir(PathBuf),
    File(PathBuf),
}

#[derive(Default, Clone)]
pub struct RecordingFs {
    pub calls: Arc<Mutex<Vec<FsCall>>>,
    pub failing: Arc<Mutex<HashSet<PathBuf>>>,
}

impl RecordingFs {
    pub fn fail_on(&self, path: &str) {
        self.failing.lock().unwrap().insert(PathBuf::from(path));
    }

    pub fn calls(&self) -> Vec<FsCall> {
        self.calls.lock().unwrap().clone()
    }

    fn check(&self, path: &Path) -> io::Result<()> {
        if self.failing.lock().unwrap().contains(path) {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl FileSystem for RecordingFs {
    async fn create_dir_all(&self, path: &Path) -> Result<(), FsError> {
        self.calls.lock().unwrap().push(FsCall::Dir(path.to_path_buf()));
        self.check(path).map_err(|source| FsError::CreateDir {
            path: path.to_path_buf(),
            source,
        })
    }

    async fn create_file(&self, path: &Path) -> Result<(), FsError> {
        self.calls.lock().unwrap().push(FsCall::File(path.to_path_buf()));
        self.check(path).map_err(|source| FsError::CreateFile {
            path: path.to_path_buf(),
            source,
        })
    }
}

// ---------------------------------------------------------------------------
// Downloads
// ---------------------------------------------------------------------------

#[derive(Default, Clone)]
pub struct FakeDownloader {
    pub calls: Arc<Mutex<Vec<(String, PathBuf)>>>,
    pub failing_urls: Arc<Mutex<HashSet<String>>>,
}

impl FakeDownloader {
    pub fn fail_on(&self, url: &str) {
        self.failing_urls.lock().unwrap().insert(url.to_string());
    }

    pub fn calls(&self) -> Vec<(String, PathBuf)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Downloader for FakeDownloader {
    async fn download(&self, url: &str, dest: &Path) -> Result<u64, DownloadError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), dest.to_path_buf()));
        if self.failing_urls.lock().unwrap().contains(url) {
            return Err(DownloadError::Status {
                url: url.to_string(),
                status: 500,
            });
        }
        Ok(0)
    }
}

// ---------------------------------------------------------------------------
// Console
// ---------------------------------------------------------------------------

#[derive(Default, Clone)]
pub struct ScriptedConsole {
    pub input: Arc<Mutex<VecDeque<String>>>,
    pub output: Arc<Mutex<String>>,
}

impl ScriptedConsole {
    pub fn with_input(lines: &[&str]) -> Self {
        let console = Self::default();
        console
            .input
            .lock()
            .unwrap()
            .extend(lines.iter().map(|l| l.to_string()));
        console
    }

    pub fn output(&self) -> String {
        self.output.lock().unwrap().clone()
    }
}

#[async_trait]
impl Console for ScriptedConsole {
    async fn write(&mut self, text: &str) -> io::Result<()> {
        self.output.lock().unwrap().push_str(text);
        Ok(())
    }

    async fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.input.lock().unwrap().pop_front())
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

/// An executor wired to fresh doubles, with handles kept for assertions.
pub struct Harness {
    pub executor: ScriptExecutor,
    pub fs: RecordingFs,
    pub downloader: FakeDownloader,
    pub console: ScriptedConsole,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_input(&[])
    }

    pub fn with_input(lines: &[&str]) -> Self {
        let fs = RecordingFs::default();
        let downloader = FakeDownloader::default();
        let console = ScriptedConsole::with_input(lines);
        let executor = ScriptExecutor::new(
            Arc::new(fs.clone()),
            Arc::new(downloader.clone()),
            Box::new(console.clone()),
        );
        Self {
            executor,
            fs,
            downloader,
            console,
        }
    }

    pub async fn run(&mut self, source: &str) -> RunSummary {
        let script: Script = parser::parse(source);
        self.executor.execute_script(&script).await
    }

    pub fn output(&self) -> String {
        self.console.output()
    }

    pub fn var(&self, name: &str) -> Option<String> {
        self.executor.runtime().get(name).map(str::to_string)
    }
}
