//! Command dispatch: builds catalogue trees and prints what they produce.

use std::fmt::Display;
use std::io;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::catalogue::coffee::{self, Cost};
use crate::catalogue::remote::{self, Command};
use crate::catalogue::staff;
use crate::catalogue::Describe;
use crate::cli::args::{Cli, Commands, ConfigCommands, Demo};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{Hierarchy, Outcomes, TreeRender};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!(?settings, "settings loaded");
    if !settings.output.color {
        colored::control::set_override(false);
    }

    match &cli.command {
        Some(Commands::Demo { demo }) => run_demo(*demo, &settings),
        Some(Commands::Tree { demo }) => show_tree(*demo, &settings),
        Some(Commands::Config { command }) => run_config(command, &settings),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::InvalidArgs(
            "no command given, see --help".to_string(),
        )),
    }
}

#[instrument(level = "debug", skip(settings))]
fn run_demo(demo: Demo, settings: &Settings) -> CliResult<()> {
    match demo {
        Demo::Staff => demo_staff(settings),
        Demo::Coffee => demo_coffee(settings),
        Demo::Remote => demo_remote(settings),
    }
}

/// Print every entry of a traversal, indented by depth.
fn print_outcomes<O: Display>(outcomes: &Outcomes<O>) {
    for entry in outcomes {
        match &entry.result {
            Ok(value) if entry.decorated => output::heading(entry.depth, value),
            Ok(value) => output::detail(entry.depth, value),
            Err(e) => output::failure(entry.depth, e),
        }
    }
}

fn demo_staff(settings: &Settings) -> CliResult<()> {
    let mut h = Hierarchy::with_max_depth(settings.max_depth);
    let company = staff::company(&mut h)?;
    let show = settings.output.show_containers;
    let describe = |h: &Hierarchy<staff::Role>| {
        h.perform_with(company, &Describe, |label, _| {
            show.then(|| staff::department_heading(label))
        })
    };

    output::header("Company staff");
    print_outcomes(&describe(&h)?);

    let development = h.children(company)?[0];
    let leaver = h.detach(development, 0)?;
    output::action("detached", h.label(leaver)?);
    print_outcomes(&describe(&h)?);

    let removed = h.discard(leaver)?;
    debug!(removed, "leaver discarded");
    output::success(&format!("{} nodes remain", h.len()));
    Ok(())
}

fn demo_coffee(settings: &Settings) -> CliResult<()> {
    let mut h = Hierarchy::with_max_depth(settings.max_depth);
    let orders: [(&str, Vec<(&str, u64)>); 3] = [
        ("espresso", vec![("Espresso", 200)]),
        ("milk coffee", vec![("Espresso", 200), ("Milk", 100)]),
        (
            "sweet milk coffee",
            vec![("Espresso", 200), ("Milk", 100), ("Sugar", 50)],
        ),
    ];

    let table = h.new_container("table");
    output::header("Coffee orders");
    for (label, items) in &orders {
        let order = coffee::order(&mut h, label, items)?;
        output::info(&format!(
            "Cost: {}, Description: {}",
            coffee::total(&h, order)?,
            coffee::description(&h, order)?
        ));
        h.attach(table, order)?;
    }

    let bill = h.fold(table, &Cost, coffee::Cents::default(), |acc, price| acc + price)?;
    output::action("table total", &bill);
    Ok(())
}

fn demo_remote(settings: &Settings) -> CliResult<()> {
    let mut h = Hierarchy::with_max_depth(settings.max_depth);
    let room = remote::living_room(&mut h)?;
    let show = settings.output.show_containers;

    for command in [
        Command::TurnOn,
        Command::SetChannel(75),
        Command::TurnOff,
    ] {
        output::header(&format!("{:?}", command));
        let outcomes = h.perform_with(room, &command, |label, _| {
            show.then(|| remote::remote_heading(label))
        })?;
        print_outcomes(&outcomes);
        let failed = outcomes.failures().len();
        if failed > 0 {
            debug!(failed, "command partially failed");
        }
    }

    let advanced = h.children(room)?[1];
    output::header(&format!("{:?}", Command::Mute));
    print_outcomes(&h.perform_with(advanced, &Command::Mute, |label, _| {
        show.then(|| remote::remote_heading(label))
    })?);
    Ok(())
}

#[instrument(level = "debug", skip(settings))]
fn show_tree(demo: Demo, settings: &Settings) -> CliResult<()> {
    let tree = match demo {
        Demo::Staff => {
            let mut h = Hierarchy::with_max_depth(settings.max_depth);
            let root = staff::company(&mut h)?;
            h.to_tree_string_with(root, |node| match node.payload() {
                Some(role) => format!("{} ({})", node.label(), role),
                None => node.label().to_string(),
            })?
        }
        Demo::Coffee => {
            let mut h = Hierarchy::with_max_depth(settings.max_depth);
            let root = coffee::order(
                &mut h,
                "order",
                &[("Espresso", 200), ("Milk", 100), ("Sugar", 50)],
            )?;
            h.to_tree_string_with(root, |node| match node.payload() {
                Some(item) => format!("{} {}", node.label(), item.price),
                None => node.label().to_string(),
            })?
        }
        Demo::Remote => {
            let mut h = Hierarchy::with_max_depth(settings.max_depth);
            let root = remote::living_room(&mut h)?;
            h.to_tree_string_with(root, |node| match node.payload() {
                Some(tv) => format!("{} ({})", node.label(), tv),
                None => node.label().to_string(),
            })?
        }
    };
    output::info(&tree);
    Ok(())
}

fn run_config(command: &ConfigCommands, settings: &Settings) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(settings.to_toml()?.trim_end()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::info("no config directory available"),
        },
    }
    Ok(())
}
