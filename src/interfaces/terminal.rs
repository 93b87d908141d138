use super::command::{Command, HELP};
use crate::application::checkout::Checkout;
use crate::application::confirmation::ConfirmOutcome;
use crate::domain::events::{Element, Severity};
use crate::domain::method::{MethodId, PaymentOption};
use crate::domain::ports::{CheckoutView, Notifier, ScratchId, ScratchSurface};
use crate::domain::state::ConfirmControl;
use crate::error::{CheckoutError, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::collections::HashMap;
use std::fmt::Display;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Line-oriented output shared by the terminal adapters.
pub struct Console {
    out: Mutex<Box<dyn Write + Send>>,
}

impl Console {
    pub fn new<W: Write + Send + 'static>(out: W) -> Self {
        Self {
            out: Mutex::new(Box::new(out)),
        }
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    pub fn line(&self, text: impl Display) {
        self.raw(&format!("{text}\n"));
    }

    fn raw(&self, text: &str) {
        let mut out = lock(&self.out);
        if let Err(err) = out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
            tracing::warn!(error = %err, "terminal write failed");
        }
    }
}

/// The checkout page rendered as plain terminal lines.
pub struct TerminalView {
    options: Vec<PaymentOption>,
    console: Arc<Console>,
    selected: Mutex<Option<MethodId>>,
    modal_visible: AtomicBool,
}

impl TerminalView {
    pub fn new(options: Vec<PaymentOption>, console: Arc<Console>) -> Self {
        Self {
            options,
            console,
            selected: Mutex::new(None),
            modal_visible: AtomicBool::new(false),
        }
    }

    pub fn print_options(&self) {
        let selected = lock(&self.selected).clone();
        for option in &self.options {
            let mark = if selected.as_ref() == Some(&option.id) {
                '*'
            } else {
                ' '
            };
            self.console
                .line(format!("[{mark}] {} ({})", option.label, option.id));
        }
    }

    fn print_modal(&self) {
        self.console.line("=== Payment pending ===");
        let selected = lock(&self.selected).clone();
        let option = selected
            .as_ref()
            .and_then(|id| self.options.iter().find(|o| &o.id == id));
        if let Some(option) = option {
            self.console.line(format!("Method: {}", option.label));
            for detail in &option.details {
                self.console
                    .line(format!("{}: {} (copy {})", detail.label, detail.value, detail.field));
            }
        }
        self.console.line("(close | esc | backdrop to dismiss)");
    }
}

impl CheckoutView for TerminalView {
    fn payment_options(&self) -> Vec<MethodId> {
        self.options.iter().map(|o| o.id.clone()).collect()
    }

    fn has_element(&self, _element: Element) -> bool {
        true
    }

    fn mark_selected(&self, method: &MethodId) {
        *lock(&self.selected) = Some(method.clone());
        self.print_options();
    }

    fn set_confirm_control(&self, control: ConfirmControl) {
        let state = if control.enabled {
            "enabled"
        } else {
            "disabled"
        };
        self.console
            .line(format!("[confirm] {state}: {}", control.label));
    }

    fn set_modal_visible(&self, visible: bool) {
        let was_visible = self.modal_visible.swap(visible, Ordering::SeqCst);
        match (was_visible, visible) {
            (false, true) => self.print_modal(),
            (true, false) => self.console.line("=== modal closed ==="),
            _ => {}
        }
    }

    fn is_modal_visible(&self) -> bool {
        self.modal_visible.load(Ordering::SeqCst)
    }

    fn set_background_scroll_locked(&self, locked: bool) {
        tracing::trace!(locked, "background scroll");
    }

    fn focus_modal(&self) {}

    fn scroll_into_view(&self, method: &MethodId) {
        tracing::trace!(%method, "scroll into view");
    }

    fn set_copy_feedback(&self, field: &str, copied: bool) {
        if copied {
            self.console.line(format!("[copied] {field}"));
        }
    }
}

impl Notifier for TerminalView {
    fn notify(&self, message: &str, severity: Severity) {
        self.console.line(format!("! {severity}: {message}"));
    }
}

/// Fallback copy surface for terminals: the selection is handed to the terminal
/// emulator through an OSC 52 escape sequence.
pub struct Osc52Surface {
    console: Arc<Console>,
    next_id: AtomicU64,
    pending: Mutex<HashMap<ScratchId, String>>,
}

impl Osc52Surface {
    pub fn new(console: Arc<Console>) -> Self {
        Self {
            console,
            next_id: AtomicU64::new(0),
            pending: Mutex::new(HashMap::new()),
        }
    }
}

impl ScratchSurface for Osc52Surface {
    fn attach(&self, text: &str) -> Result<ScratchId> {
        let id = ScratchId(self.next_id.fetch_add(1, Ordering::Relaxed));
        lock(&self.pending).insert(id, text.to_string());
        Ok(id)
    }

    fn copy_selection(&self, id: ScratchId) -> Result<()> {
        let text = lock(&self.pending).get(&id).cloned().ok_or_else(|| {
            CheckoutError::ClipboardFailure(format!("element {} is not attached", id.0))
        })?;
        self.console
            .raw(&format!("\x1b]52;c;{}\x07", STANDARD.encode(text)));
        Ok(())
    }

    fn detach(&self, id: ScratchId) {
        lock(&self.pending).remove(&id);
    }

    fn attached_count(&self) -> usize {
        lock(&self.pending).len()
    }
}

/// Reads commands from `input` until `quit` or end of input.
pub async fn run<R>(checkout: &Checkout, view: &TerminalView, input: R) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    view.console.line(HELP);
    view.print_options();

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line.parse::<Command>() {
            Ok(Command::Quit) => break,
            Ok(command) => dispatch(checkout, view, command).await,
            Err(err) => view.console.line(format!("? {err}")),
        }
    }
    Ok(())
}

async fn dispatch(checkout: &Checkout, view: &TerminalView, command: Command) {
    let result = match command {
        Command::List => {
            view.print_options();
            Ok(())
        }
        Command::Select(method) => checkout.select(method).await,
        Command::Confirm => match checkout.confirm().await {
            Ok(ConfirmOutcome::AlreadyProcessing) => {
                view.console.line("? a confirmation is already in progress");
                Ok(())
            }
            other => other.map(|_| ()),
        },
        Command::Modal(trigger) => {
            checkout.modal_interaction(trigger).await;
            Ok(())
        }
        Command::Copy(field) => checkout.copy_detail(&field).await.map(|_| ()),
        Command::Visibility(hidden) => {
            checkout.visibility_changed(hidden);
            Ok(())
        }
        Command::Help => {
            view.console.line(HELP);
            Ok(())
        }
        Command::Quit => Ok(()),
    };

    match result {
        Ok(()) => {}
        // Already surfaced through the notifier.
        Err(
            CheckoutError::NoSelection
            | CheckoutError::SubmissionFailure(_)
            | CheckoutError::ClipboardFailure(_),
        ) => {}
        Err(err) => view.console.line(format!("? {err}")),
    }
}
