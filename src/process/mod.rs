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

//! Execution of external tools such as sdkmanager.
//!
//! Child output is never captured: it goes straight to the terminal.

mod command_line;
mod runner;

pub use command_line::CommandLine;
pub use runner::{CommandRunner, ConfirmStrategy, LEGACY_CONFIRM_ANSWERS, SystemCommandRunner};
