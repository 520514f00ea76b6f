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

use crate::platform::{HostFamily, sdkmanager_launcher_name};
use std::path::{Path, PathBuf};

pub const ANDROID_SDK_DIR: &str = "android-sdk";
pub const NDK_DIR: &str = "ndk";
pub const CMDLINE_TOOLS_DIR: &str = "cmdline-tools";
const CMDLINE_TOOLS_BIN_DIR: &str = "bin";

/// Tool versions pinned for a single provisioning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolVersions {
    /// Build number of the command-line tools archive (e.g. `8092744`)
    pub cmdline_tools_revision: String,
    /// NDK version as understood by sdkmanager (e.g. `19.2.5345600`)
    pub ndk_version: String,
}

impl ToolVersions {
    pub fn new(cmdline_tools_revision: impl Into<String>, ndk_version: impl Into<String>) -> Self {
        Self {
            cmdline_tools_revision: cmdline_tools_revision.into(),
            ndk_version: ndk_version.into(),
        }
    }
}

/// Locations derived from the installation root.
///
/// The NDK root is always `<sdk_root>/ndk/<ndk version>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSet {
    pub root: PathBuf,
    pub sdk_root: PathBuf,
    pub ndk_root: PathBuf,
    pub sdk_manager: PathBuf,
    pub download_destination: PathBuf,
}

impl PathSet {
    /// Resolve every location for `root`.
    ///
    /// `archive_tag` is the platform tag embedded in the archive file name,
    /// normally [`HostFamily::archive_tag`].
    pub fn resolve(
        root: &Path,
        versions: &ToolVersions,
        host: &HostFamily,
        archive_tag: &str,
    ) -> Self {
        let sdk_root = root.join(ANDROID_SDK_DIR);
        let ndk_root = sdk_root.join(NDK_DIR).join(&versions.ndk_version);
        let sdk_manager = root
            .join(CMDLINE_TOOLS_DIR)
            .join(CMDLINE_TOOLS_BIN_DIR)
            .join(sdkmanager_launcher_name(host));
        let download_destination =
            root.join(archive_file_name(archive_tag, &versions.cmdline_tools_revision));

        Self {
            root: root.to_path_buf(),
            sdk_root,
            ndk_root,
            sdk_manager,
            download_destination,
        }
    }
}

/// Name of the published command-line tools archive.
pub fn archive_file_name(archive_tag: &str, revision: &str) -> String {
    format!("commandlinetools-{archive_tag}-{revision}_latest.zip")
}
