//! Exclusive selection over a keyed set of controls.
//!
//! A [`RadioGroup`](group::RadioGroup) tracks which of its registered
//! controls is selected, keeps at most one selected, and tells observers
//! about selection changes. Rendering and input delivery belong to the host;
//! the group only needs the [`Control`](control::Control) capability.

pub mod config;
pub mod control;
pub mod delegate;
pub mod dispatch;
pub mod group;
pub mod item;

pub use group::RadioGroup;

pub mod prelude {
    pub use crate::config::RadioGroupConfig;
    pub use crate::control::{ActivationListener, Control, ControlRef, RadioButton, same_control};
    pub use crate::delegate::RadioGroupDelegate;
    pub use crate::dispatch::{DispatchError, TaskReceiver, TaskSender};
    pub use crate::group::{DeselectedOperation, RadioGroup, RadioGroupId};
    pub use crate::item::Item;
}
