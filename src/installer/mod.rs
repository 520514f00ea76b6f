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

//! Installation of the command-line tools and the SDK/NDK packages.
//!
//! Each phase is retried on its own: a failed package install never
//! re-downloads the command-line tools.

mod packages;

pub use packages::PackageList;

use crate::archive::ArchiveExtractor;
use crate::config::SdkprepConfig;
use crate::download::{DownloadOptions, HttpFileDownloader};
use crate::error::Result;
use crate::paths::{PathSet, archive_file_name};
use crate::platform::HostFamily;
use crate::process::{CommandLine, CommandRunner, ConfirmStrategy};
use crate::retry_policy::RetryPolicy;

pub struct SdkInstaller<'a> {
    config: &'a SdkprepConfig,
    paths: &'a PathSet,
    host: HostFamily,
    downloader: HttpFileDownloader,
    extractor: Box<dyn ArchiveExtractor>,
    runner: Box<dyn CommandRunner>,
    retry_policy: RetryPolicy,
    list_packages: bool,
}

impl<'a> SdkInstaller<'a> {
    pub fn new(
        config: &'a SdkprepConfig,
        paths: &'a PathSet,
        host: HostFamily,
        downloader: HttpFileDownloader,
        extractor: Box<dyn ArchiveExtractor>,
        runner: Box<dyn CommandRunner>,
    ) -> Self {
        Self {
            config,
            paths,
            host,
            downloader,
            extractor,
            runner,
            retry_policy: RetryPolicy::from(&config.retry),
            list_packages: config.sdkmanager.list_packages,
        }
    }

    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    pub fn with_list_packages(mut self, list_packages: bool) -> Self {
        self.list_packages = list_packages;
        self
    }

    /// URL of the command-line tools archive for this host.
    pub fn download_url(&self) -> String {
        let file_name = archive_file_name(
            &self.config.archive_tag(&self.host),
            &self.config.tools.cmdline_tools_revision,
        );
        self.config.download_url(&file_name)
    }

    /// Download the command-line tools archive and extract it into the root.
    pub fn install_command_line_tools(&mut self) -> Result<()> {
        let url = self.download_url();
        let destination = &self.paths.download_destination;
        let root = &self.paths.root;
        let options = DownloadOptions::default();
        let policy = self.retry_policy;
        let downloader = &mut self.downloader;
        let extractor = &self.extractor;

        policy.run("Installing command-line tools", || {
            println!("{}", "=".repeat(80));
            println!("Download: {url}, file: {}", destination.display());
            downloader.download(&url, destination, &options)?;
            extractor.extract(destination, root)
        })?;

        log::info!(
            "Command-line tools {} installed under {}",
            self.config.tools.cmdline_tools_revision,
            root.display()
        );
        Ok(())
    }

    /// Install the SDK and NDK packages with sdkmanager.
    pub fn install_sdk_packages(&self) -> Result<()> {
        let strategy = ConfirmStrategy::from(self.config.sdkmanager.confirm_answers);
        let list_command = self.list_command();
        let install_command = self.install_command();

        self.retry_policy.run("Installing SDK packages", || {
            if self.list_packages {
                self.runner.run_auto_confirm(&list_command, strategy)?;
            }
            self.runner.run_auto_confirm(&install_command, strategy)
        })?;

        log::info!(
            "SDK packages installed under {}",
            self.paths.sdk_root.display()
        );
        Ok(())
    }

    pub fn package_list(&self) -> PackageList {
        PackageList::new(&self.config.packages.install, &self.config.tools.ndk_version)
    }

    /// `sdkmanager --list --sdk_root=<sdk>`
    pub fn list_command(&self) -> CommandLine {
        CommandLine::new(&self.paths.sdk_manager)
            .arg("--list")
            .arg(self.sdk_root_switch())
    }

    /// `sdkmanager --verbose --sdk_root=<sdk> <packages...>`
    pub fn install_command(&self) -> CommandLine {
        CommandLine::new(&self.paths.sdk_manager)
            .arg("--verbose")
            .arg(self.sdk_root_switch())
            .args(self.package_list().iter())
    }

    fn sdk_root_switch(&self) -> String {
        format!("--sdk_root={}", self.paths.sdk_root.display())
    }
}
