#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use radio_group::dispatch::{self, TaskReceiver};
use radio_group::prelude::*;

/// Delegate that records every selected key.
#[derive(Default)]
pub struct Recorder {
    pub selected: Mutex<Vec<u32>>,
}

impl Recorder {
    pub fn keys(&self) -> Vec<u32> {
        self.selected.lock().unwrap().clone()
    }
}

impl RadioGroupDelegate<u32> for Recorder {
    fn on_selected(&self, _control: &ControlRef, key: &u32) {
        self.selected.lock().unwrap().push(*key);
    }
}

pub struct Fixture {
    pub group: RadioGroup<u32>,
    pub ui: TaskReceiver,
    pub keys: Vec<u32>,
    pub buttons: Vec<Arc<RadioButton>>,
    pub delegate: Arc<Recorder>,
    pub deselected: Arc<Mutex<Vec<u32>>>,
}

impl Fixture {
    /// Group with one button per key, a recording delegate and no
    /// deselected-operation.
    pub fn new(keys: &[u32]) -> Self {
        let (tasks, ui) = dispatch::channel();
        let group = RadioGroup::new(tasks);
        let buttons: Vec<_> = keys
            .iter()
            .map(|key| {
                let button = RadioButton::shared(format!("option {key}"));
                assert!(group.add(button.clone(), *key));
                button
            })
            .collect();
        let delegate = Arc::new(Recorder::default());
        group.set_delegate(&delegate);

        Self {
            group,
            ui,
            keys: keys.to_vec(),
            buttons,
            delegate,
            deselected: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Also record every deselected key.
    pub fn with_deselected(self) -> Self {
        let deselected = self.deselected.clone();
        self.group
            .set_deselected_operation(move |_control, key| deselected.lock().unwrap().push(*key));
        self
    }

    pub fn button(&self, key: u32) -> &Arc<RadioButton> {
        let index = self
            .keys
            .iter()
            .position(|k| *k == key)
            .expect("key in fixture");
        &self.buttons[index]
    }

    pub fn deselected_keys(&self) -> Vec<u32> {
        self.deselected.lock().unwrap().clone()
    }

    pub fn selected_count(&self) -> usize {
        self.buttons.iter().filter(|b| b.is_selected()).count()
    }
}

pub fn as_control(button: &Arc<RadioButton>) -> ControlRef {
    button.clone()
}
