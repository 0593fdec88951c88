//! rtxtune CLI - Command-line interface for tuning RTX resource packs
//!
//! This binary provides commands for tuning packs in place, inspecting how
//! their texture sets resolve, and producing a starting configuration.

use clap::Parser;
use std::process::ExitCode;

mod cli_args;

use cli_args::{Cli, Commands};
// Use modules from the library crate
use rtxtune_cli::commands;
use rtxtune_cli::commands::tune::TuneArgs;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Tune {
            config,
            pack,
            fog,
            uniform_fog,
            emissivity,
            ambient_light,
            normal_intensity,
            material_noise,
            roughen_up,
            butcher_heightmaps,
            seed,
            json,
        } => commands::tune::run(&TuneArgs {
            config,
            packs: pack,
            fog,
            uniform_fog,
            emissivity,
            ambient_light,
            normal_intensity,
            material_noise,
            roughen_up,
            butcher_heightmaps,
            seed,
            json,
        }),
        Commands::Inspect { pack, json } => commands::inspect::run(&pack, json),
        Commands::Template { output } => commands::template::run(output.as_deref()),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
