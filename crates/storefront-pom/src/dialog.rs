// Copyright 2026 Paul Adamson
// Licensed under the Apache License, Version 2.0
//
// Native dialog routing
//
// The driver installs exactly one session-level dialog handler, which hands
// every alert/confirm/prompt to the session's `DialogRouter`. Scenarios that
// care about a dialog arm a one-shot `DialogCapture` immediately before the
// triggering action. The capture decides how the dialog is answered, records
// its message, and is disarmed when dropped, so no handler outlives the
// action it was armed for.

use crate::error::{Error, Result};
use parking_lot::Mutex;
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tokio::sync::oneshot;

/// Kind of native browser dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogKind {
    /// `window.alert`
    Alert,
    /// `window.confirm`
    Confirm,
    /// `window.prompt`
    Prompt,
    /// `beforeunload` confirmation
    BeforeUnload,
}

impl DialogKind {
    /// Parses the dialog type string reported by the browser.
    ///
    /// Unknown strings map to `Alert`, which is answered the same way.
    pub fn from_protocol(type_: &str) -> Self {
        match type_ {
            "confirm" => DialogKind::Confirm,
            "prompt" => DialogKind::Prompt,
            "beforeunload" => DialogKind::BeforeUnload,
            _ => DialogKind::Alert,
        }
    }
}

impl fmt::Display for DialogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DialogKind::Alert => "alert",
            DialogKind::Confirm => "confirm",
            DialogKind::Prompt => "prompt",
            DialogKind::BeforeUnload => "beforeunload",
        };
        f.write_str(name)
    }
}

/// How a captured dialog is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogResponse {
    /// OK / Yes / Leave
    #[default]
    Accept,
    /// Cancel / No / Stay
    Dismiss,
}

/// A dialog observed by the router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedDialog {
    pub kind: DialogKind,
    pub message: String,
}

impl CapturedDialog {
    pub fn new(kind: DialogKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

struct Armed {
    id: u64,
    response: DialogResponse,
    tx: oneshot::Sender<CapturedDialog>,
}

#[derive(Default)]
struct RouterState {
    next_id: u64,
    armed: Option<Armed>,
    unhandled: Vec<CapturedDialog>,
}

/// Session-scoped dispatcher for native dialogs.
#[derive(Default)]
pub struct DialogRouter {
    state: Mutex<RouterState>,
}

impl DialogRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms a one-shot capture answering the next dialog with `response`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DialogAlreadyArmed`] if another capture on this
    /// session has not been dropped yet.
    pub fn arm(&self, response: DialogResponse) -> Result<DialogCapture<'_>> {
        let mut state = self.state.lock();
        if state.armed.is_some() {
            return Err(Error::DialogAlreadyArmed);
        }

        let id = state.next_id;
        state.next_id += 1;

        let (tx, rx) = oneshot::channel();
        state.armed = Some(Armed { id, response, tx });
        tracing::debug!("Armed dialog capture #{} ({:?})", id, response);

        Ok(DialogCapture {
            router: self,
            id,
            rx,
        })
    }

    /// Arms a capture, runs `trigger`, and waits up to `timeout` for the
    /// dialog it raises. The capture is released before this returns.
    pub async fn capture<Fut>(
        &self,
        response: DialogResponse,
        timeout: Duration,
        trigger: Fut,
    ) -> Result<CapturedDialog>
    where
        Fut: Future<Output = Result<()>>,
    {
        let capture = self.arm(response)?;
        trigger.await?;
        capture.wait(timeout).await
    }

    /// Routes one dialog raised by the page and returns how to answer it.
    ///
    /// Called by the driver's session-level handler. With no capture armed
    /// the dialog is accepted so the page does not stall, and it is kept in
    /// [`unhandled`](Self::unhandled).
    pub fn dispatch(&self, kind: DialogKind, message: &str) -> DialogResponse {
        let dialog = CapturedDialog::new(kind, message);
        let mut state = self.state.lock();

        match state.armed.take() {
            Some(armed) => {
                tracing::debug!(
                    "Dialog capture #{} received {} '{}'",
                    armed.id,
                    kind,
                    message
                );
                // The capture may have stopped waiting; the answer still applies
                let _ = armed.tx.send(dialog);
                armed.response
            }
            None => {
                tracing::warn!("Unhandled {} dialog accepted: '{}'", kind, message);
                state.unhandled.push(dialog);
                DialogResponse::Accept
            }
        }
    }

    /// Returns true while a capture is armed.
    pub fn is_armed(&self) -> bool {
        self.state.lock().armed.is_some()
    }

    /// Dialogs that arrived with no capture armed, oldest first.
    pub fn unhandled(&self) -> Vec<CapturedDialog> {
        self.state.lock().unhandled.clone()
    }

    fn disarm(&self, id: u64) {
        let mut state = self.state.lock();
        if state.armed.as_ref().is_some_and(|armed| armed.id == id) {
            state.armed = None;
            tracing::debug!("Disarmed dialog capture #{}", id);
        }
    }
}

impl fmt::Debug for DialogRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("DialogRouter")
            .field("armed", &state.armed.as_ref().map(|armed| armed.id))
            .field("unhandled", &state.unhandled.len())
            .finish()
    }
}

/// A one-shot subscription to the next native dialog.
///
/// Dropping the capture disarms it if no dialog arrived.
#[must_use = "a capture is disarmed as soon as it is dropped"]
pub struct DialogCapture<'a> {
    router: &'a DialogRouter,
    id: u64,
    rx: oneshot::Receiver<CapturedDialog>,
}

impl DialogCapture<'_> {
    /// Waits up to `timeout` for the dialog.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DialogNotRaised`] if no dialog arrives in time.
    pub async fn wait(mut self, timeout: Duration) -> Result<CapturedDialog> {
        match tokio::time::timeout(timeout, &mut self.rx).await {
            Ok(Ok(dialog)) => Ok(dialog),
            // Sender gone without a dialog means the capture was disarmed
            Ok(Err(_)) | Err(_) => Err(Error::DialogNotRaised {
                timeout_ms: timeout.as_millis() as u64,
            }),
        }
    }

    /// Returns the dialog if one has already arrived.
    pub fn try_take(&mut self) -> Option<CapturedDialog> {
        self.rx.try_recv().ok()
    }
}

impl Drop for DialogCapture<'_> {
    fn drop(&mut self) {
        self.router.disarm(self.id);
    }
}

impl fmt::Debug for DialogCapture<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogCapture").field("id", &self.id).finish()
    }
}
