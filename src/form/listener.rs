//! Save/cancel notification seam between the form and its host.

use tracing::info;

/// Receives the form's outbound notifications.
///
/// Both callbacks are fire-and-forget. The defaults do nothing, so hosts
/// only implement the ones they care about.
pub trait FormListener {
    /// The user saved the form.
    fn on_save(&mut self) {}

    /// The user cancelled the form.
    fn on_cancel(&mut self) {}
}

/// A host that does not listen.
impl FormListener for () {}

/// Listener built from two closures.
///
/// # Example
///
/// ```rust
/// use profile_form::form::{CallbackListener, SettingsForm};
///
/// let mut saves = 0;
/// {
///     let listener = CallbackListener::new(|| saves += 1, || {});
///     let mut form = SettingsForm::new(listener);
///     form.save();
/// }
/// assert_eq!(saves, 1);
/// ```
pub struct CallbackListener<S, C>
where
    S: FnMut(),
    C: FnMut(),
{
    on_save: S,
    on_cancel: C,
}

impl<S, C> CallbackListener<S, C>
where
    S: FnMut(),
    C: FnMut(),
{
    pub fn new(on_save: S, on_cancel: C) -> Self {
        Self { on_save, on_cancel }
    }
}

impl<S, C> FormListener for CallbackListener<S, C>
where
    S: FnMut(),
    C: FnMut(),
{
    fn on_save(&mut self) {
        (self.on_save)()
    }

    fn on_cancel(&mut self) {
        (self.on_cancel)()
    }
}

/// Listener that reports notifications through `tracing`, the way a
/// desktop host would pop a toast.
#[derive(Debug, Clone)]
pub struct LoggingListener {
    save_message: String,
    cancel_message: String,
}

impl LoggingListener {
    pub fn new(save_message: impl Into<String>, cancel_message: impl Into<String>) -> Self {
        Self {
            save_message: save_message.into(),
            cancel_message: cancel_message.into(),
        }
    }
}

impl FormListener for LoggingListener {
    fn on_save(&mut self) {
        info!("{}", self.save_message);
    }

    fn on_cancel(&mut self) {
        info!("{}", self.cancel_message);
    }
}

/// Counts notifications. Handy for hosts and tests that only need to know
/// how often each one fired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountingListener {
    pub saves: usize,
    pub cancels: usize,
}

impl FormListener for CountingListener {
    fn on_save(&mut self) {
        self.saves += 1;
    }

    fn on_cancel(&mut self) {
        self.cancels += 1;
    }
}
