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


use crate::archive::SystemArchiveExtractor;
use crate::config::SdkprepConfig;
use crate::download::{HttpFileDownloader, IndicatifProgressReporter, TransportConfig};
use crate::environment::EnvironmentExporter;
use crate::error::Result;
use crate::installer::SdkInstaller;
use crate::paths::{PathSet, ensure_directory};
use crate::platform::HostFamily;
use crate::process::SystemCommandRunner;
use log::{debug, info};
use std::path::PathBuf;
use std::time::Duration;

/// Flags that shape a single provisioning run.
#[derive(Debug, Clone, Default)]
pub struct ProvisionOptions {
    pub root: PathBuf,
    pub ndk_only: bool,
    pub insecure: bool,
    pub skip_list: bool,
    pub skip_install: bool,
    pub no_progress: bool,
    pub timeout: Option<u64>,
}

pub struct ProvisionCommand<'a> {
    config: &'a SdkprepConfig,
}

impl<'a> ProvisionCommand<'a> {
    pub fn new(config: &'a SdkprepConfig) -> Result<Self> {
        Ok(Self { config })
    }

    pub fn execute(&self, options: ProvisionOptions) -> Result<()> {
        debug!("Provision options: {options:?}");

        let host = HostFamily::current();
        let root = ensure_directory(std::path::absolute(&options.root)?)?;
        let paths = PathSet::resolve(
            &root,
            &self.config.tool_versions(),
            &host,
            &self.config.archive_tag(&host),
        );
        info!(
            "Provisioning for {host}: sdk root {}, ndk root {}",
            paths.sdk_root.display(),
            paths.ndk_root.display()
        );

        if options.skip_install {
            info!("Skipping installation, writing environment files only");
        } else {
            self.install(&paths, host, &options)?;
        }

        EnvironmentExporter::new(&paths.root).export_environment(&paths, options.ndk_only)?;
        println!("Environment written to {}", paths.root.display());
        Ok(())
    }

    fn install(&self, paths: &PathSet, host: HostFamily, options: &ProvisionOptions) -> Result<()> {
        let transport = self.transport_config(options);
        let mut downloader = HttpFileDownloader::new(transport);
        if self.config.download.show_progress && !options.no_progress {
            downloader = downloader.with_progress_reporter(Box::new(
                IndicatifProgressReporter::new("Command-line tools"),
            ));
        }

        let mut installer = SdkInstaller::new(
            self.config,
            paths,
            host.clone(),
            downloader,
            Box::new(SystemArchiveExtractor::new(host)),
            Box::new(SystemCommandRunner::new()),
        );
        if options.skip_list {
            installer = installer.with_list_packages(false);
        }

        installer.install_command_line_tools()?;
        installer.install_sdk_packages()
    }

    fn transport_config(&self, options: &ProvisionOptions) -> TransportConfig {
        TransportConfig {
            verify_certificates: self.config.download.verify_certificates && !options.insecure,
            timeout: options
                .timeout
                .map(Duration::from_secs)
                .unwrap_or_else(|| self.config.timeout()),
        }
    }
}
