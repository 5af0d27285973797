//! Form session: one build → present → commit-or-discard cycle.
//!
//! ```text
//! Building ──▶ Presenting ──▶ Committing ──▶ Closed
//!                   │                          ▲
//!                   └────────▶ Discarded ──────┘
//! ```
//!
//! The store is read only while building and written only while
//! committing. Presentation is the single suspension point: the session
//! hands its form to a [`Presenter`] and resumes once the user has
//! confirmed or cancelled.

use tracing::{debug, info, warn};

use crate::device::{DeviceContext, DeviceHandle};
use crate::error::{PresentError, SessionError};
use crate::form::Form;
use crate::store::ConfigStore;
use crate::walker;

// ── Types ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Building,
    Presenting,
    Committing,
    Discarded,
    Closed,
}

/// How the user left the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    Accepted,
    Cancelled,
}

/// Result of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Every field was written back; `writes` is one per schema field.
    Accepted { writes: usize },
    /// Nothing was written.
    Cancelled,
}

/// Shows a form modally and reports how the user closed it.
///
/// The presenter may mutate the form's controls; it has no access to the
/// store.
pub trait Presenter {
    fn present(&mut self, form: &mut Form) -> Result<DialogOutcome, PresentError>;
}

/// Closures script the user in tests and headless runs.
impl<F> Presenter for F
where
    F: FnMut(&mut Form) -> DialogOutcome,
{
    fn present(&mut self, form: &mut Form) -> Result<DialogOutcome, PresentError> {
        Ok(self(form))
    }
}

// ── Session ──────────────────────────────────────────────────────────

/// One configuration dialog for one device instance.
///
/// Every state the session passes through is kept in [`history`], so the
/// transient `Committing` and `Discarded` states stay observable after
/// the session has closed.
///
/// [`history`]: FormSession::history
#[derive(Debug)]
pub struct FormSession<'d> {
    handle: DeviceHandle<'d>,
    ctx: DeviceContext,
    form: Form,
    history: Vec<SessionState>,
}

impl<'d> FormSession<'d> {
    /// Derive the device context and build one row per schema field.
    pub fn build<S>(handle: DeviceHandle<'d>, store: &S) -> Self
    where
        S: ConfigStore + ?Sized,
    {
        let ctx = DeviceContext::derive(handle, store);
        let title = format!("{} Device Configuration", handle.device.name);
        debug!(device = handle.device.internal_name, context = %ctx, "building form");

        let form = walker::build_form(&title, &handle.device.schema, &ctx, store);
        Self {
            handle,
            ctx,
            form,
            history: vec![SessionState::Building],
        }
    }

    pub fn state(&self) -> SessionState {
        self.history
            .last()
            .copied()
            .unwrap_or(SessionState::Building)
    }

    /// States entered so far, oldest first.
    pub fn history(&self) -> &[SessionState] {
        &self.history
    }

    pub fn context(&self) -> &DeviceContext {
        &self.ctx
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    fn enter(&mut self, next: SessionState) {
        debug!(from = ?self.state(), to = ?next, context = %self.ctx, "session transition");
        self.history.push(next);
    }

    /// Hand the form to `presenter` and wait for the user. A presenter
    /// failure discards and closes the session.
    ///
    /// # Panics
    ///
    /// When the session was already presented.
    pub fn present<P>(&mut self, presenter: &mut P) -> Result<DialogOutcome, SessionError>
    where
        P: Presenter + ?Sized,
    {
        assert_eq!(
            self.state(),
            SessionState::Building,
            "a form session is presented exactly once"
        );
        self.enter(SessionState::Presenting);
        debug!(rows = self.form.len(), "presenting form");

        match presenter.present(&mut self.form) {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                warn!(error = %err, "presentation failed, discarding session");
                self.enter(SessionState::Discarded);
                self.enter(SessionState::Closed);
                Err(err.into())
            }
        }
    }

    /// Commit or discard according to `outcome`, then close the session.
    ///
    /// # Panics
    ///
    /// When the session has not been presented successfully, or was
    /// already finished.
    pub fn finish<S>(&mut self, outcome: DialogOutcome, store: &mut S) -> SessionOutcome
    where
        S: ConfigStore + ?Sized,
    {
        assert_eq!(
            self.state(),
            SessionState::Presenting,
            "a form session is finished after a successful presentation"
        );

        let result = match outcome {
            DialogOutcome::Accepted => {
                self.enter(SessionState::Committing);
                let writes =
                    walker::commit_form(&self.handle.device.schema, &self.form, &self.ctx, store);
                SessionOutcome::Accepted { writes }
            }
            DialogOutcome::Cancelled => {
                self.enter(SessionState::Discarded);
                SessionOutcome::Cancelled
            }
        };

        self.enter(SessionState::Closed);
        info!(
            device = self.handle.device.internal_name,
            context = %self.ctx,
            outcome = ?result,
            "configuration session closed"
        );
        result
    }

    /// Present, then commit or discard.
    pub fn run<P, S>(
        mut self,
        presenter: &mut P,
        store: &mut S,
    ) -> Result<SessionOutcome, SessionError>
    where
        P: Presenter + ?Sized,
        S: ConfigStore + ?Sized,
    {
        let outcome = self.present(presenter)?;
        Ok(self.finish(outcome, store))
    }
}

/// Run a full configuration session for `handle` against `store`.
pub fn configure_device<P, S>(
    handle: DeviceHandle<'_>,
    store: &mut S,
    presenter: &mut P,
) -> Result<SessionOutcome, SessionError>
where
    P: Presenter + ?Sized,
    S: ConfigStore + ?Sized,
{
    FormSession::build(handle, &*store).run(presenter, store)
}
