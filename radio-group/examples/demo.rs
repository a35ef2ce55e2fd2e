use std::fs::File;
use std::sync::Arc;

use radio_group::dispatch;
use radio_group::prelude::*;
use simplelog::{Config, LevelFilter, WriteLogger};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Theme {
    Light,
    Dark,
    System,
}

struct ThemeSwitcher;

impl RadioGroupDelegate<Theme> for ThemeSwitcher {
    fn on_selected(&self, _control: &ControlRef, key: &Theme) {
        println!("switching to {:?}", key);
    }
}

fn main() -> std::io::Result<()> {
    // Set up file logging
    let log_file = File::create("radio_group.log")?;
    WriteLogger::init(LevelFilter::Trace, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let (tasks, mut ui) = dispatch::channel();
    let group = RadioGroup::new(tasks);

    let switcher = Arc::new(ThemeSwitcher);
    group.set_delegate(&switcher);
    group.set_deselected_operation(|_control, key| println!("  {:?} greyed out", key));

    let buttons: Vec<_> = [
        ("Light", Theme::Light),
        ("Dark", Theme::Dark),
        ("System", Theme::System),
    ]
    .into_iter()
    .map(|(label, theme)| {
        let button = RadioButton::shared(label);
        assert!(group.add(button.clone(), theme), "duplicate theme key");
        button
    })
    .collect();

    // Simulated clicks, one UI tick each.
    for index in [1, 2, 2, 0] {
        println!("click {}", buttons[index].label());
        buttons[index].activate();
        ui.run_pending();
    }

    group.set_allow_duplicate_selection(false);
    println!("click {} (duplicates off)", buttons[0].label());
    buttons[0].activate();
    ui.run_pending();

    group.reset_selection();
    println!("reset");
    ui.run_pending();

    println!("selected: {:?}", group.selected_key());
    Ok(())
}
