//! The radio group: exclusive selection over a keyed set of controls.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, Weak};

use log::{debug, trace, warn};

use crate::config::RadioGroupConfig;
use crate::control::{ActivationListener, ControlRef, same_control};
use crate::delegate::RadioGroupDelegate;
use crate::dispatch::TaskSender;
use crate::item::Item;

/// Callback run for each control left deselected by a selection change or
/// reset. Always runs deferred, on the group's task queue.
pub type DeselectedOperation<K> = Arc<dyn Fn(&ControlRef, &K) + Send + Sync>;

/// Unique identifier for a RadioGroup instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RadioGroupId(usize);

impl RadioGroupId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for RadioGroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "radio_group {}", self.0)
    }
}

struct RadioGroupInner<K> {
    /// Registered items, in insertion order, keys unique
    items: Vec<Item<K>>,
    config: RadioGroupConfig,
    deselected_operation: Option<DeselectedOperation<K>>,
    delegate: Option<Weak<dyn RadioGroupDelegate<K>>>,
}

impl<K> Default for RadioGroupInner<K> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            config: RadioGroupConfig::default(),
            deselected_operation: None,
            delegate: None,
        }
    }
}

/// Everything an activation needs, copied out so no lock is held while
/// controls and callbacks run.
struct Snapshot<K> {
    items: Vec<Item<K>>,
    allow_duplicate_selection: bool,
    deselected_operation: Option<DeselectedOperation<K>>,
    delegate: Option<Arc<dyn RadioGroupDelegate<K>>>,
}

struct Shared<K> {
    id: RadioGroupId,
    inner: RwLock<RadioGroupInner<K>>,
    tasks: TaskSender,
}

impl<K> Shared<K>
where
    K: PartialEq + Clone + Send + Sync + 'static,
{
    fn snapshot(&self) -> Option<Snapshot<K>> {
        let guard = self.inner.read().ok()?;
        Some(Snapshot {
            items: guard.items.clone(),
            allow_duplicate_selection: guard.config.allow_duplicate_selection,
            deselected_operation: guard.deselected_operation.clone(),
            delegate: guard.delegate.as_ref().and_then(Weak::upgrade),
        })
    }

    fn schedule_deselected(&self, operation: &DeselectedOperation<K>, item: &Item<K>) {
        let operation = Arc::clone(operation);
        let control = Arc::clone(&item.control);
        let key = item.key.clone();
        if let Err(err) = self.tasks.schedule(move || operation(&control, &key)) {
            warn!("[{}] deselection callback dropped: {}", self.id, err);
        }
    }

    /// React to a primary activation of `sender`.
    fn handle_activation(&self, sender: &ControlRef) {
        let Some(snapshot) = self.snapshot() else {
            return;
        };

        if !snapshot.allow_duplicate_selection && sender.is_selected() {
            debug!("[{}] activation of selected control suppressed", self.id);
            return;
        }

        // Clear before setting: a stale selection later in the registry must
        // never coexist with the new one.
        for item in &snapshot.items {
            item.control.set_selected(false);
        }

        // Removed controls keep their listener; their activations land here
        // and end with the registry cleared and nobody notified.
        let Some(selected) = snapshot
            .items
            .iter()
            .find(|item| same_control(&item.control, sender))
            .cloned()
        else {
            debug!("[{}] activation from unregistered control ignored", self.id);
            return;
        };
        selected.control.set_selected(true);
        trace!(
            "[{}] selected 1 of {} items",
            self.id,
            snapshot.items.len()
        );

        if let Some(operation) = &snapshot.deselected_operation {
            for item in snapshot
                .items
                .iter()
                .filter(|item| !same_control(&item.control, &selected.control))
            {
                self.schedule_deselected(operation, item);
            }
        }

        if let Some(delegate) = snapshot.delegate {
            delegate.on_selected(&selected.control, &selected.key);
        }
    }
}

/// A group of mutually exclusive controls, each registered under a key.
///
/// At most one member control is selected once an operation completes.
/// User activations run the selection cycle and notify the delegate right
/// away and the deselected-operation later, through the group's task queue.
/// [`select_radio_control`](Self::select_radio_control) changes selection
/// silently.
///
/// `RadioGroup` is a cheap handle; clones share the same registry.
///
/// # Example
///
/// ```
/// use radio_group::prelude::*;
///
/// let (tasks, mut ui) = radio_group::dispatch::channel();
/// let group = RadioGroup::new(tasks);
///
/// let light = RadioButton::shared("Light");
/// let dark = RadioButton::shared("Dark");
/// assert!(group.add(light.clone(), "light"));
/// assert!(group.add(dark.clone(), "dark"));
/// assert!(!group.add(RadioButton::shared("Other"), "dark"));
///
/// dark.activate();
/// assert_eq!(group.selected_key(), Some("dark"));
/// ui.run_pending();
/// ```
pub struct RadioGroup<K> {
    shared: Arc<Shared<K>>,
}

impl<K> RadioGroup<K>
where
    K: PartialEq + Clone + Send + Sync + 'static,
{
    /// Create an empty group whose deferred callbacks go to `tasks`.
    pub fn new(tasks: TaskSender) -> Self {
        Self::with_config(tasks, RadioGroupConfig::default())
    }

    /// Create an empty group with the given configuration.
    pub fn with_config(tasks: TaskSender, config: RadioGroupConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                id: RadioGroupId::new(),
                inner: RwLock::new(RadioGroupInner {
                    config,
                    ..Default::default()
                }),
                tasks,
            }),
        }
    }

    /// Get the unique ID for this group
    pub fn id(&self) -> RadioGroupId {
        self.shared.id
    }

    // -------------------------------------------------------------------------
    // Configuration
    // -------------------------------------------------------------------------

    pub fn config(&self) -> RadioGroupConfig {
        self.shared
            .inner
            .read()
            .map(|guard| guard.config)
            .unwrap_or_default()
    }

    pub fn set_config(&self, config: RadioGroupConfig) {
        if let Ok(mut guard) = self.shared.inner.write() {
            guard.config = config;
        }
    }

    pub fn allow_duplicate_selection(&self) -> bool {
        self.config().allow_duplicate_selection
    }

    pub fn set_allow_duplicate_selection(&self, allow: bool) {
        if let Ok(mut guard) = self.shared.inner.write() {
            guard.config.allow_duplicate_selection = allow;
        }
    }

    /// Set the callback run for each deselected control.
    ///
    /// It runs on the task queue, never inside the activation, so each call
    /// must be independent of the others.
    pub fn set_deselected_operation<F>(&self, operation: F)
    where
        F: Fn(&ControlRef, &K) + Send + Sync + 'static,
    {
        if let Ok(mut guard) = self.shared.inner.write() {
            guard.deselected_operation = Some(Arc::new(operation));
        }
    }

    pub fn clear_deselected_operation(&self) {
        if let Ok(mut guard) = self.shared.inner.write() {
            guard.deselected_operation = None;
        }
    }

    pub fn has_deselected_operation(&self) -> bool {
        self.shared
            .inner
            .read()
            .map(|guard| guard.deselected_operation.is_some())
            .unwrap_or(false)
    }

    /// Set the selection observer. The group only keeps a weak reference.
    pub fn set_delegate<D>(&self, delegate: &Arc<D>)
    where
        D: RadioGroupDelegate<K> + 'static,
    {
        let weak = Arc::downgrade(delegate);
        let weak: Weak<dyn RadioGroupDelegate<K>> = weak;
        if let Ok(mut guard) = self.shared.inner.write() {
            guard.delegate = Some(weak);
        }
    }

    pub fn clear_delegate(&self) {
        if let Ok(mut guard) = self.shared.inner.write() {
            guard.delegate = None;
        }
    }

    // -------------------------------------------------------------------------
    // Registry
    // -------------------------------------------------------------------------

    /// Register `control` under `key` and start listening for its activation.
    ///
    /// Returns false, changing nothing, if `key` is already registered.
    /// Adding never changes any selected flag.
    pub fn add(&self, control: ControlRef, key: K) -> bool {
        {
            let Ok(mut guard) = self.shared.inner.write() else {
                return false;
            };
            if guard.items.iter().any(|item| item.key == key) {
                debug!("[{}] add rejected: duplicate key", self.shared.id);
                return false;
            }
            guard.items.push(Item::new(Arc::clone(&control), key));
        }

        control.set_activation_listener(self.activation_listener(&control));
        true
    }

    /// Remove the item registered under `key`, if any.
    ///
    /// The removed control keeps its selected flag. Its listener stays
    /// installed; later activations of it find no item and are ignored.
    pub fn remove_item(&self, key: &K) {
        if let Ok(mut guard) = self.shared.inner.write() {
            let before = guard.items.len();
            guard.items.retain(|item| item.key != *key);
            if guard.items.len() != before {
                debug!("[{}] item removed", self.shared.id);
            }
        }
    }

    fn activation_listener(&self, control: &ControlRef) -> ActivationListener {
        let group = Arc::downgrade(&self.shared);
        let control = Arc::downgrade(control);
        Arc::new(move || {
            let (Some(group), Some(control)) = (group.upgrade(), control.upgrade()) else {
                return;
            };
            group.handle_activation(&control);
        })
    }

    // -------------------------------------------------------------------------
    // Read methods
    // -------------------------------------------------------------------------

    /// Copy of the registered items, in insertion order.
    pub fn items(&self) -> Vec<Item<K>> {
        self.shared
            .inner
            .read()
            .map(|guard| guard.items.clone())
            .unwrap_or_default()
    }

    /// Copy of the registered controls, in insertion order.
    pub fn controls(&self) -> Vec<ControlRef> {
        self.shared
            .inner
            .read()
            .map(|guard| guard.items.iter().map(|item| item.control.clone()).collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.shared
            .inner
            .read()
            .map(|guard| guard.items.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.shared
            .inner
            .read()
            .map(|guard| guard.items.iter().any(|item| item.key == *key))
            .unwrap_or(false)
    }

    /// The first selected control in registry order, if any.
    pub fn selected_radio_control(&self) -> Option<ControlRef> {
        self.shared.inner.read().ok().and_then(|guard| {
            guard
                .items
                .iter()
                .find(|item| item.control.is_selected())
                .map(|item| item.control.clone())
        })
    }

    /// Key of the selected control, if any.
    pub fn selected_key(&self) -> Option<K> {
        self.shared.inner.read().ok().and_then(|guard| {
            guard
                .items
                .iter()
                .find(|item| item.control.is_selected())
                .map(|item| item.key.clone())
        })
    }

    pub fn radio_control_with_key(&self, key: &K) -> Option<ControlRef> {
        self.shared.inner.read().ok().and_then(|guard| {
            guard
                .items
                .iter()
                .find(|item| item.key == *key)
                .map(|item| item.control.clone())
        })
    }

    /// Key of the item holding this exact control instance.
    pub fn key_with_radio_control(&self, control: &ControlRef) -> Option<K> {
        self.shared.inner.read().ok().and_then(|guard| {
            guard
                .items
                .iter()
                .find(|item| same_control(&item.control, control))
                .map(|item| item.key.clone())
        })
    }

    // -------------------------------------------------------------------------
    // Write methods
    // -------------------------------------------------------------------------

    /// Select the control registered under `key`, or nothing for `None` or
    /// an unknown key. Fires no callbacks.
    pub fn select_radio_control(&self, key: Option<&K>) {
        let items = self.items();
        for item in &items {
            item.control.set_selected(false);
        }
        if let Some(key) = key
            && let Some(item) = items.iter().find(|item| item.key == *key)
        {
            item.control.set_selected(true);
        }
    }

    /// Deselect every control and queue the deselected-operation once per
    /// item, whether or not it was selected before.
    pub fn reset_selection(&self) {
        let Some(snapshot) = self.shared.snapshot() else {
            return;
        };
        for item in &snapshot.items {
            item.control.set_selected(false);
            if let Some(operation) = &snapshot.deselected_operation {
                self.shared.schedule_deselected(operation, item);
            }
        }
        trace!(
            "[{}] selection reset over {} items",
            self.shared.id,
            snapshot.items.len()
        );
    }
}

impl<K> Clone for RadioGroup<K> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<K> std::fmt::Debug for RadioGroup<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let len = self
            .shared
            .inner
            .read()
            .map(|guard| guard.items.len())
            .unwrap_or(0);
        f.debug_struct("RadioGroup")
            .field("id", &self.shared.id)
            .field("len", &len)
            .finish()
    }
}
