//! Selection observer.

use crate::control::ControlRef;

/// Receives the newly selected item after a user-driven activation.
///
/// Called synchronously from the activation, before any deferred
/// deselection callbacks run. Programmatic selection never calls it.
///
/// The group holds its delegate weakly; keep your own `Arc` alive for as
/// long as you want notifications.
///
/// # Example
///
/// ```
/// use radio_group::control::ControlRef;
/// use radio_group::delegate::RadioGroupDelegate;
///
/// struct PrintSelection;
///
/// impl RadioGroupDelegate<u32> for PrintSelection {
///     fn on_selected(&self, _control: &ControlRef, key: &u32) {
///         println!("selected {key}");
///     }
/// }
/// ```
pub trait RadioGroupDelegate<K>: Send + Sync {
    fn on_selected(&self, control: &ControlRef, key: &K);
}
