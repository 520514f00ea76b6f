// Copyright 2025 dentsusoken
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


use clap::Parser;
use sdkprep::commands::provision::{ProvisionCommand, ProvisionOptions};
use sdkprep::config::SdkprepConfig;
use sdkprep::error::{Result, SdkprepError, format_error_with_color, get_exit_code};
use sdkprep::logging;
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sdkprep")]
#[command(
    author,
    version,
    about = "Provision Android command-line tools, SDK packages and NDK",
    long_about = "Provision Android command-line tools, SDK packages and NDK

Downloads the command-line tools archive, installs the SDK and NDK packages
with sdkmanager, then appends ANDROID_* exports to environment.sh and
environment.ps1 in the installation root.

Examples:
  sdkprep --root /opt/android
  sdkprep --ndk-only --skip-list
  . ./environment.sh               # Bash/Zsh
  . .\\environment.ps1             # PowerShell"
)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Write only the NDK exports
    #[arg(long, alias = "ndk_only")]
    ndk_only: bool,

    /// Installation root (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Disable TLS certificate verification for the download
    #[arg(long)]
    insecure: bool,

    /// Skip the `sdkmanager --list` invocation
    #[arg(long)]
    skip_list: bool,

    /// Only write the environment files
    #[arg(long)]
    skip_install: bool,

    /// Disable progress indicators
    #[arg(long)]
    no_progress: bool,

    /// Download timeout in seconds
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<u64>,
}

fn resolve_root(cli_root: Option<PathBuf>) -> Result<PathBuf> {
    match cli_root {
        Some(root) => Ok(root),
        None => std::env::current_dir().map_err(|e| {
            SdkprepError::ConfigError(format!("Failed to determine current directory: {e}"))
        }),
    }
}

fn run(cli: Cli) -> Result<()> {
    let explicit_root = cli.root.is_some();
    let mut root = resolve_root(cli.root)?;
    let config = SdkprepConfig::load(&root)?;
    if !explicit_root && let Some(configured) = &config.root_dir {
        root = configured.clone();
    }

    let command = ProvisionCommand::new(&config)?;
    command.execute(ProvisionOptions {
        root,
        ndk_only: cli.ndk_only,
        insecure: cli.insecure,
        skip_list: cli.skip_list,
        skip_install: cli.skip_install,
        no_progress: cli.no_progress,
        timeout: cli.timeout,
    })
}

fn main() {
    let cli = Cli::parse();

    // Initialize logger based on CLI flags and environment
    logging::setup_logger(cli.verbose);

    if let Err(e) = run(cli) {
        let use_color = std::io::stderr().is_terminal();
        eprint!("{}", format_error_with_color(&e, use_color));
        std::process::exit(get_exit_code(&e));
    }
}
