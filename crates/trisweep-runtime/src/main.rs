// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! `trisweep`: runs triangle sweep benchmarks headlessly and analyzes their
//! CSV output.

mod commands;

use clap::{Parser, Subcommand};
use commands::{analyze::AnalyzeArgs, presets::PresetsArgs, run::RunArgs};

#[derive(Parser, Debug)]
#[command(name = "trisweep", version, about = "Triangle sweep rasterizer benchmark")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a sweep with the headless draw backend
    Run(RunArgs),
    /// Summarize a CSV file written by a previous run
    Analyze(AnalyzeArgs),
    /// Print the built-in presets as TOML
    Presets(PresetsArgs),
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => commands::run::execute(args),
        Command::Analyze(args) => commands::analyze::execute(args),
        Command::Presets(args) => commands::presets::execute(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_subcommands_parse() {
        let cli = Cli::try_parse_from(["trisweep", "analyze", "data.csv", "--json"])
            .expect("analyze parses");
        assert!(matches!(cli.command, Command::Analyze(ref a) if a.json));

        let cli = Cli::try_parse_from(["trisweep", "run", "--preset", "extreme", "--seed", "4"])
            .expect("run parses");
        assert!(matches!(cli.command, Command::Run(ref r) if r.seed == Some(4)));

        assert!(Cli::try_parse_from(["trisweep", "run", "--preset", "turbo"]).is_err());
    }
}
