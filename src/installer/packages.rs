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

use std::fmt;

/// Ordered package identifiers requested from sdkmanager.
///
/// Order only affects how sdkmanager groups its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageList {
    packages: Vec<String>,
}

impl PackageList {
    /// Build the list from the configured packages, ending with the NDK.
    pub fn new(packages: &[String], ndk_version: &str) -> Self {
        let ndk_package = format!("ndk;{ndk_version}");
        let mut list: Vec<String> = packages
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty() && *p != ndk_package)
            .map(str::to_string)
            .collect();
        list.push(ndk_package);
        Self { packages: list }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.packages.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl fmt::Display for PackageList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.packages.join(" "))
    }
}
