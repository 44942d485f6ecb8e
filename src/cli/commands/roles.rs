//! Role listing command handler.

use anyhow::Result;

use super::setup::{Setup, SetupOptions};
use crate::roles::{REASONER_SUFFIX, RoleRegistry};
use crate::ui::Style;

/// Prints the loaded roles, marking the one a new session starts in.
pub fn print_roles(options: &SetupOptions) -> Result<()> {
    let setup = Setup::load(options)?;
    let state = setup.session_state();
    print_registry(&setup.registry, &state.role().name);
    Ok(())
}

fn print_registry(registry: &RoleRegistry, default_role: &str) {
    println!("{}", Style::header("Roles"));
    for role in registry.iter() {
        let marker = if role.name == default_role {
            format!(" {}", Style::default_marker())
        } else {
            String::new()
        };
        let model = role
            .model
            .as_deref()
            .map_or_else(String::new, |m| format!("  {}", Style::muted(m)));
        println!(
            "  {}  {}  {}{model}{marker}",
            Style::value(format!("{:10}", role.name)),
            Style::muted(format!("temp {:.1}", role.temperature)),
            Style::muted(&role.description)
        );
    }
    println!();
    let hint = format!(
        "Append {REASONER_SUFFIX} to a role name (e.g. coder{REASONER_SUFFIX}) \
         to use the reasoning model"
    );
    println!("{}", Style::muted(hint));
}
