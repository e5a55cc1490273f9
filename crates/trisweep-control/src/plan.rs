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

//! Ordered sweep phases and the reference presets.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use trisweep_core::EffectConfiguration;

/// Errors produced when validating a [`SweepPlan`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// A plan needs at least one phase.
    #[error("Sweep plan has no phases")]
    Empty,
    /// Triangle counts start at one.
    #[error("Phase '{phase}' has a minimum of 0 triangles")]
    ZeroMinimum {
        /// Offending phase.
        phase: String,
    },
    /// `min_triangles` is above `max_triangles`.
    #[error("Phase '{phase}' has min_triangles {min} above max_triangles {max}")]
    InvertedRange {
        /// Offending phase.
        phase: String,
        /// Configured minimum.
        min: usize,
        /// Configured maximum.
        max: usize,
    },
    /// The step would never advance the triangle count.
    #[error("Phase '{phase}' has a step of 0")]
    ZeroStep {
        /// Offending phase.
        phase: String,
    },
}

/// One contiguous segment of a sweep sharing an effect configuration and a
/// triangle count range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepPhase {
    /// Display name, e.g. `"Lighting"`.
    pub name: String,
    /// Effects applied for the whole phase.
    #[serde(flatten)]
    pub effects: EffectConfiguration,
    /// First triangle count sampled.
    pub min_triangles: usize,
    /// Last triangle count that may be sampled (inclusive).
    pub max_triangles: usize,
    /// Triangle count increment between two samples.
    pub step: usize,
}

impl SweepPhase {
    /// Creates a phase.
    pub fn new(
        name: impl Into<String>,
        effects: EffectConfiguration,
        min_triangles: usize,
        max_triangles: usize,
        step: usize,
    ) -> Self {
        Self {
            name: name.into(),
            effects,
            min_triangles,
            max_triangles,
            step,
        }
    }

    /// The count following `current` in this phase, or `None` once the range
    /// is exhausted.
    pub fn next_count(&self, current: usize) -> Option<usize> {
        let next = current.saturating_add(self.step);
        (next <= self.max_triangles).then_some(next)
    }

    /// Number of samples the phase produces.
    pub fn sample_count(&self) -> usize {
        if self.step == 0 || self.min_triangles > self.max_triangles {
            return 0;
        }
        (self.max_triangles - self.min_triangles) / self.step + 1
    }

    fn validate(&self) -> Result<(), PlanError> {
        if self.min_triangles == 0 {
            return Err(PlanError::ZeroMinimum {
                phase: self.name.clone(),
            });
        }
        if self.min_triangles > self.max_triangles {
            return Err(PlanError::InvertedRange {
                phase: self.name.clone(),
                min: self.min_triangles,
                max: self.max_triangles,
            });
        }
        if self.step == 0 {
            return Err(PlanError::ZeroStep {
                phase: self.name.clone(),
            });
        }
        Ok(())
    }
}

/// A validated, non-empty, ordered list of phases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SweepPlan {
    phases: Vec<SweepPhase>,
}

impl SweepPlan {
    /// Validates `phases` and builds a plan.
    pub fn new(phases: Vec<SweepPhase>) -> Result<Self, PlanError> {
        if phases.is_empty() {
            return Err(PlanError::Empty);
        }
        for phase in &phases {
            phase.validate()?;
        }
        Ok(Self { phases })
    }

    /// One basic phase, `1..=1000` in steps of 50.
    pub fn baseline() -> Self {
        Self {
            phases: vec![SweepPhase::new(
                "Basic",
                EffectConfiguration::BASIC,
                1,
                1000,
                50,
            )],
        }
    }

    /// Basic, Lighting, Texturing and Combined, each `1..=500` in steps of 25.
    pub fn advanced() -> Self {
        Self {
            phases: vec![
                SweepPhase::new("Basic", EffectConfiguration::BASIC, 1, 500, 25),
                SweepPhase::new("Lighting", EffectConfiguration::LIGHTING, 1, 500, 25),
                SweepPhase::new("Texturing", EffectConfiguration::TEXTURING, 1, 500, 25),
                SweepPhase::new("Combined", EffectConfiguration::COMBINED, 1, 500, 25),
            ],
        }
    }

    /// Basic, Lighting and Combined, each `10000..=200000` in steps of 10000.
    pub fn extreme() -> Self {
        const MIN: usize = 10_000;
        const MAX: usize = 200_000;
        const STEP: usize = 10_000;
        Self {
            phases: vec![
                SweepPhase::new("Basic", EffectConfiguration::BASIC, MIN, MAX, STEP),
                SweepPhase::new("Lighting", EffectConfiguration::LIGHTING, MIN, MAX, STEP),
                SweepPhase::new("Combined", EffectConfiguration::COMBINED, MIN, MAX, STEP),
            ],
        }
    }

    /// The phases, in execution order.
    pub fn phases(&self) -> &[SweepPhase] {
        &self.phases
    }

    /// Phase at `index`, if any.
    pub fn phase(&self, index: usize) -> Option<&SweepPhase> {
        self.phases.get(index)
    }

    /// The first phase. Plans are never empty.
    pub fn first(&self) -> &SweepPhase {
        &self.phases[0]
    }

    /// Number of phases.
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// Always `false`; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Total number of samples a complete sweep records.
    pub fn total_samples(&self) -> usize {
        self.phases.iter().map(SweepPhase::sample_count).sum()
    }
}

impl Default for SweepPlan {
    fn default() -> Self {
        Self::advanced()
    }
}

impl TryFrom<Vec<SweepPhase>> for SweepPlan {
    type Error = PlanError;

    fn try_from(phases: Vec<SweepPhase>) -> Result<Self, Self::Error> {
        Self::new(phases)
    }
}
