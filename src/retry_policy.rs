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

//! Fixed-delay retry for side-effecting installer steps.
//!
//! Every operation wrapped here must be safe to re-run from scratch: a
//! retried attempt starts over rather than resuming partial state.

use crate::config::RetryConfig;
use crate::error::Result;
use log::{debug, warn};
use retry::{OperationResult, delay::Fixed, retry_with_index};
use std::time::Duration;

pub const DEFAULT_ATTEMPTS: usize = 5;
pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

/// Retry budget: total attempts and the constant pause between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: usize,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_ATTEMPTS,
            delay: DEFAULT_DELAY,
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self {
            attempts: config.attempts.max(1),
            delay: Duration::from_millis(config.delay_ms),
        }
    }
}

impl RetryPolicy {
    pub fn new(attempts: usize, delay: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            delay,
        }
    }

    /// Run `operation` until it succeeds or the attempt budget is spent.
    ///
    /// Any error triggers a retry. When the last attempt fails its error is
    /// returned unchanged.
    pub fn run<T, F>(&self, label: &str, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Result<T>,
    {
        let attempts = self.attempts.max(1);
        let delays = Fixed::from_millis(self.delay.as_millis() as u64).take(attempts - 1);

        let result = retry_with_index(delays, |current_try| match operation() {
            Ok(value) => {
                if current_try > 1 {
                    debug!("{label} succeeded on attempt {current_try}/{attempts}");
                }
                OperationResult::Ok(value)
            }
            Err(e) => {
                if current_try < attempts as u64 {
                    warn!("{label} failed (attempt {current_try}/{attempts}): {e}. Retrying...");
                    OperationResult::Retry(e)
                } else {
                    warn!("{label} failed after {attempts} attempts: {e}");
                    OperationResult::Err(e)
                }
            }
        });

        result.map_err(|e| e.error)
    }
}
