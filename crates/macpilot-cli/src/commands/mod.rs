//! The command table. Handlers stay thin: parameter plumbing and a
//! printed summary, with all real work in the macpilot library.

mod app;
mod ui;
mod window;

use crate::registry::Registry;

pub fn registry() -> Registry {
    Registry::new(vec![
        app::launch(),
        app::quit(),
        app::status(),
        app::info(),
        app::list(),
        window::window(),
        window::windows(),
        window::move_window(),
        window::resize(),
        window::focus(),
        ui::click(),
        ui::menu(),
        ui::type_field(),
        ui::keystroke(),
        ui::type_text(),
        ui::mouse_click(),
        ui::elements(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_names_are_unique() {
        let registry = registry();
        let mut names: Vec<_> = registry.commands().iter().map(|c| c.name).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn every_command_states_its_own_name_in_usage() {
        for command in registry().commands() {
            assert!(
                command.usage.starts_with(command.name),
                "usage for {} is {}",
                command.name,
                command.usage
            );
        }
    }

    #[test]
    fn full_table_is_registered() {
        assert_eq!(registry().commands().len(), 17);
    }
}
