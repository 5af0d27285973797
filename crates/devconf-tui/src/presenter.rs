//! Terminal presenter: shows a form as a modal dialog and blocks until it
//! is confirmed or cancelled.

use crossterm::event::{self, Event, KeyEventKind};
use devconf_core::{DialogOutcome, Form, PresentError, Presenter};
use tracing::debug;

use crate::form_view::FormView;
use crate::tui::Tui;

#[derive(Debug, Default)]
pub struct TerminalPresenter;

impl TerminalPresenter {
    pub fn new() -> Self {
        Self
    }
}

impl Presenter for TerminalPresenter {
    fn present(&mut self, form: &mut Form) -> Result<DialogOutcome, PresentError> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        let mut view = FormView::new(form);
        let outcome = loop {
            tui.draw(|frame| {
                let area = frame.area();
                view.render(frame, area, form);
            })?;

            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if let Some(outcome) = view.handle_key(form, key) {
                        break outcome;
                    }
                }
                Event::Resize(width, height) => {
                    debug!(width, height, "terminal resized");
                }
                _ => {}
            }
        };

        tui.exit();
        debug!(?outcome, title = form.title(), "dialog closed");
        Ok(outcome)
    }
}
