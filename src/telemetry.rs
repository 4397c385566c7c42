//! Interaction recorder: an append-only in-memory log of user actions,
//! mirrored to a local JSON file and forwarded entry-by-entry to GitHub.
//!
//! Recording must never block or break the card: the mirror write is
//! demoted to a warning on failure and the GitHub append runs as a
//! detached task that swallows its own errors.

use std::path::PathBuf;

use crate::log;
use crate::model::CardFlow;
use crate::{github, store};

pub struct Telemetry {
    interactions: Vec<String>,
    mirror_path: Option<PathBuf>,
    inflight: Vec<tokio::task::JoinHandle<()>>,
}

impl Telemetry {
    /// Recorder mirroring to the default location. Starts empty every
    /// session; earlier sessions live only in the mirror file.
    pub fn new() -> Self {
        let mirror_path = store::mirror_path();
        if mirror_path.is_none() {
            log::app_log("WARN", "No config directory; interactions will not be mirrored");
        }
        Telemetry {
            interactions: Vec::new(),
            mirror_path,
            inflight: Vec::new(),
        }
    }

    #[cfg(test)]
    fn with_mirror(path: PathBuf) -> Self {
        Telemetry {
            interactions: Vec::new(),
            mirror_path: Some(path),
            inflight: Vec::new(),
        }
    }

    /// Record one user action against the currently visible panel.
    ///
    /// Appends `"{action} | {label} | {step}"` to the in-memory log,
    /// overwrites the mirror with the full log, and spawns the GitHub
    /// append without awaiting it. Never fails the caller.
    pub fn record(&mut self, action: &str, label: &str, flow: &CardFlow) {
        let step = flow.current_step_label();
        let entry = format!("{} | {} | {}", action, label, step);

        self.interactions.push(entry.clone());
        log::app_log("INFO", format!("Interaction logged: {}", entry));

        if let Some(path) = &self.mirror_path {
            if let Err(e) = store::save_interactions_to(path, &self.interactions) {
                log::app_log("WARN", format!("Local mirror write failed: {}", e));
            }
        }

        // Detached on purpose: the card must not wait on the network.
        let handle = tokio::spawn(async move {
            if let Err(e) = github::append_interaction(&entry).await {
                log::app_log("WARN", format!("GitHub append skipped: {}", e));
            }
        });
        self.inflight.push(handle);
    }

    /// Entries recorded this session, in call order.
    pub fn interactions(&self) -> &[String] {
        &self.interactions
    }

    /// Wait for any still-running GitHub appends. Shutdown only; each
    /// `record` call itself stays fire-and-forget.
    pub async fn drain(&mut self) {
        for handle in self.inflight.drain(..) {
            let _ = handle.await;
        }
    }
}
