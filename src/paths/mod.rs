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

//! Filesystem layout of an installation root.
//!
//! Everything here is a pure function of the root directory, the pinned
//! tool versions and the host family. Nothing touches the filesystem.

mod layout;
mod shared;

pub use layout::{
    ANDROID_SDK_DIR, CMDLINE_TOOLS_DIR, NDK_DIR, PathSet, ToolVersions, archive_file_name,
};
pub use shared::ensure_directory;
