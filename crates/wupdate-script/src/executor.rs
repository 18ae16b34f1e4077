use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use wupdate_core::console::Console;
use wupdate_core::download::Downloader;
use wupdate_core::fs::FileSystem;

use crate::ast::*;
use crate::runtime::Runtime;
use crate::text::{strip_quotes, trim};

/// Conditional-block cursor.
///
/// Only one block is tracked: an `IF` inside an open block replaces it, and
/// the first `ENDIF` closes whatever is open.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BranchState {
    pub skip: bool,
    pub in_if: bool,
    pub else_block: bool,
}

impl BranchState {
    fn enter_if(&mut self, holds: bool) {
        self.in_if = true;
        self.else_block = false;
        self.skip = !holds;
    }

    fn enter_else(&mut self) {
        if self.in_if {
            self.skip = !self.skip;
            self.else_block = true;
        }
    }

    fn end_if(&mut self) {
        self.in_if = false;
        self.skip = false;
    }
}

/// What happened to one directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// IF / ELSE / ENDIF updated the branch state.
    Control,
    /// The directive ran and its effect succeeded.
    Executed,
    /// Suppressed by a false branch.
    Skipped,
    /// The directive ran but its effect failed; the run continues.
    Failed,
}

/// Counters for a finished run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub executed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Control => {}
            Outcome::Executed => self.executed += 1,
            Outcome::Skipped => self.skipped += 1,
            Outcome::Failed => self.failed += 1,
        }
    }
}

/// Executes compiled scripts against the host collaborators.
///
/// Directives run strictly in source order, each awaited to completion before
/// the next. Nothing a directive does can abort the run.
pub struct ScriptExecutor {
    runtime: Runtime,
    branch: BranchState,
    fs: Arc<dyn FileSystem>,
    downloader: Arc<dyn Downloader>,
    console: Box<dyn Console>,
}

impl ScriptExecutor {
    pub fn new(
        fs: Arc<dyn FileSystem>,
        downloader: Arc<dyn Downloader>,
        console: Box<dyn Console>,
    ) -> Self {
        Self {
            runtime: Runtime::new(),
            branch: BranchState::default(),
            fs,
            downloader,
            console,
        }
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn branch_state(&self) -> BranchState {
        self.branch
    }

    pub async fn execute_script(&mut self, script: &Script) -> RunSummary {
        let mut summary = RunSummary::default();
        for directive in &script.directives {
            let outcome = self.execute_directive(directive).await;
            summary.record(outcome);
        }
        info!(
            executed = summary.executed,
            skipped = summary.skipped,
            failed = summary.failed,
            "script finished"
        );
        summary
    }

    pub async fn execute_directive(&mut self, directive: &Directive) -> Outcome {
        let line = directive.line;
        match &directive.kind {
            DirectiveKind::If(condition) => {
                let holds = self.runtime.condition_holds(condition);
                self.branch.enter_if(holds);
                debug!(line, condition = %condition, holds, "if");
                return Outcome::Control;
            }
            DirectiveKind::Else => {
                self.branch.enter_else();
                debug!(line, skip = self.branch.skip, "else");
                return Outcome::Control;
            }
            DirectiveKind::EndIf => {
                self.branch.end_if();
                debug!(line, "endif");
                return Outcome::Control;
            }
            _ => {}
        }

        if self.branch.skip {
            debug!(line, directive = %directive, "skipped");
            return Outcome::Skipped;
        }

        match &directive.kind {
            DirectiveKind::MakeDir(raw) => {
                let path = self.runtime.resolve(raw);
                match self.fs.create_dir_all(Path::new(path)).await {
                    Ok(()) => {
                        info!(line, path, "directory created");
                        Outcome::Executed
                    }
                    Err(e) => {
                        warn!(line, error = %e, "MKDIR failed");
                        Outcome::Failed
                    }
                }
            }
            DirectiveKind::MakeFile(raw) => {
                let path = self.runtime.resolve(raw);
                match self.fs.create_file(Path::new(path)).await {
                    Ok(()) => {
                        info!(line, path, "file created");
                        Outcome::Executed
                    }
                    Err(e) => {
                        warn!(line, error = %e, "MKFILE failed");
                        Outcome::Failed
                    }
                }
            }
            DirectiveKind::Download { url, path } => {
                let url = self.runtime.resolve(url).to_string();
                let path = self.runtime.resolve(path).to_string();
                self.download(line, &url, &path).await
            }
            DirectiveKind::Compare { left, right } => {
                let equal = self.runtime.compare(left, right);
                debug!(line, equal, "compare");
                Outcome::Executed
            }
            DirectiveKind::Print(raw) => {
                let text = self.runtime.resolve(strip_quotes(raw)).to_string();
                self.emit_line(line, &text).await
            }
            DirectiveKind::Set { name, value } => {
                self.runtime.assign(name, value);
                debug!(line, name = %name, "set");
                Outcome::Executed
            }
            DirectiveKind::Read(raw) => {
                let name = trim(raw).to_string();
                let input = match self.console.read_line().await {
                    Ok(Some(input)) => input,
                    Ok(None) => {
                        debug!(line, name = %name, "end of input");
                        String::new()
                    }
                    Err(e) => {
                        warn!(line, error = %e, "READ failed");
                        String::new()
                    }
                };
                self.runtime.set(name, input);
                Outcome::Executed
            }
            DirectiveKind::If(_) | DirectiveKind::Else | DirectiveKind::EndIf => Outcome::Control,
        }
    }

    async fn download(&mut self, line: usize, url: &str, path: &str) -> Outcome {
        let banner = format!("Downloading {} from {}: ", path, url);
        if let Err(e) = self.console.write(&banner).await {
            warn!(line, error = %e, "console write failed");
        }

        let (status, outcome) = match self.downloader.download(url, Path::new(path)).await {
            Ok(_) => ("[OK]", Outcome::Executed),
            Err(e) => {
                warn!(line, url, path, error = %e, "DOWNLOAD failed");
                ("[FAILED]", Outcome::Failed)
            }
        };
        if let Err(e) = self.console.write_line(status).await {
            warn!(line, error = %e, "console write failed");
        }
        outcome
    }

    async fn emit_line(&mut self, line: usize, text: &str) -> Outcome {
        match self.console.write_line(text).await {
            Ok(()) => Outcome::Executed,
            Err(e) => {
                warn!(line, error = %e, "PRINT failed");
                Outcome::Failed
            }
        }
    }
}
