//! The control capability a radio group drives.
//!
//! A group never owns a control's lifecycle. It only reads and writes the
//! `selected` flag and installs a listener for primary activation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

/// Callback a control fires on primary activation (click, tap, Enter).
pub type ActivationListener = Arc<dyn Fn() + Send + Sync>;

/// Shared handle to a control. Controls are shared between host and group.
pub type ControlRef = Arc<dyn Control>;

/// An interactive element that can be selected and activated.
pub trait Control: Send + Sync {
    /// Whether the control currently reports itself as selected.
    fn is_selected(&self) -> bool;

    /// Set the selected flag.
    fn set_selected(&self, selected: bool);

    /// Install the primary-activation listener.
    ///
    /// A control holds a single listener; installing a new one replaces the
    /// previous one.
    fn set_activation_listener(&self, listener: ActivationListener);
}

/// Instance equality for controls.
///
/// Compares data addresses only, so two handles to the same control are equal
/// even if their vtable pointers differ.
pub fn same_control(a: &ControlRef, b: &ControlRef) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// A minimal [`Control`] for hosts without their own widget layer.
///
/// # Example
///
/// ```
/// use radio_group::control::{Control, RadioButton};
///
/// let button = RadioButton::new("Dark");
/// assert!(!button.is_selected());
/// // No listener installed yet, so this does nothing.
/// button.activate();
/// ```
pub struct RadioButton {
    label: String,
    selected: AtomicBool,
    listener: RwLock<Option<ActivationListener>>,
}

impl RadioButton {
    /// Create an unselected button with the given label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            selected: AtomicBool::new(false),
            listener: RwLock::new(None),
        }
    }

    /// Create a button already wrapped in a shared handle.
    pub fn shared(label: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::new(label))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether a listener is currently installed.
    pub fn has_listener(&self) -> bool {
        self.listener
            .read()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }

    /// Fire the activation listener, as a user click would.
    ///
    /// The listener is cloned out before it runs so it may freely call back
    /// into this button.
    pub fn activate(&self) {
        let listener = self.listener.read().ok().and_then(|guard| guard.clone());
        if let Some(listener) = listener {
            listener();
        }
    }
}

impl Control for RadioButton {
    fn is_selected(&self) -> bool {
        self.selected.load(Ordering::SeqCst)
    }

    fn set_selected(&self, selected: bool) {
        self.selected.store(selected, Ordering::SeqCst);
    }

    fn set_activation_listener(&self, listener: ActivationListener) {
        if let Ok(mut guard) = self.listener.write() {
            *guard = Some(listener);
        }
    }
}

impl std::fmt::Debug for RadioButton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RadioButton")
            .field("label", &self.label)
            .field("selected", &self.is_selected())
            .field("has_listener", &self.has_listener())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_selected_flag() {
        let button = RadioButton::new("a");
        assert!(!button.is_selected());
        button.set_selected(true);
        assert!(button.is_selected());
        button.set_selected(false);
        assert!(!button.is_selected());
    }

    #[test]
    fn test_listener_is_replaced() {
        let button = RadioButton::new("a");
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let f = first.clone();
        button.set_activation_listener(Arc::new(move || {
            f.fetch_add(1, Ordering::SeqCst);
        }));
        let s = second.clone();
        button.set_activation_listener(Arc::new(move || {
            s.fetch_add(1, Ordering::SeqCst);
        }));

        button.activate();
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_same_control_is_identity() {
        let a: ControlRef = RadioButton::shared("same");
        let b: ControlRef = RadioButton::shared("same");
        let a2 = a.clone();
        assert!(same_control(&a, &a2));
        assert!(!same_control(&a, &b));
    }
}
