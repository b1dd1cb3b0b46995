// FHIR Graph - FHIR bundle loading for Neo4j
//
// Copyright (c) 2025 FHIR Graph contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Wall-clock timing for single load calls.
//!
//! Elapsed values are truncated to millisecond precision. They are meant for
//! log lines and the batch summary, not for benchmarking.

use std::time::{Duration, Instant};

/// A monotonic time source.
///
/// `now` returns the time elapsed since an arbitrary, fixed origin.
pub trait Clock {
    /// Current reading of the clock.
    fn now(&self) -> Duration;
}

/// Clock backed by [`std::time::Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Create a clock whose origin is the current instant.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Measures elapsed time for one operation.
#[derive(Debug)]
pub struct Stopwatch<'c, C: Clock + ?Sized> {
    clock: &'c C,
    started: Duration,
}

impl<'c, C: Clock + ?Sized> Stopwatch<'c, C> {
    /// Capture the start instant.
    pub fn start(clock: &'c C) -> Self {
        Self {
            clock,
            started: clock.now(),
        }
    }

    /// Capture the current instant and return elapsed seconds, truncated to
    /// three decimal places.
    pub fn stop(self) -> f64 {
        let elapsed = self.clock.now().saturating_sub(self.started);
        truncate_millis(elapsed)
    }
}

/// Truncate a duration to whole milliseconds, expressed in seconds.
pub fn truncate_millis(elapsed: Duration) -> f64 {
    elapsed.as_millis() as f64 / 1000.0
}

/// Round seconds to three decimal places.
pub fn round_secs(secs: f64) -> f64 {
    (secs * 1000.0).round() / 1000.0
}
