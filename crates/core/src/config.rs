// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dispatch configuration
//!
//! ```toml
//! discipline = "parallel"
//! max_parallelism = 4
//! ```

use crate::events::Discipline;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid dispatch config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("max_parallelism must be at least 1")]
    ZeroParallelism,
    #[error("worker pool already running: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

/// Settings applied to a [`SafeDispatch`](crate::SafeDispatch)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DispatchConfig {
    /// Discipline used by `SafeDispatch::run`
    pub discipline: Discipline,
    /// Size of the process-wide worker pool, applied by the host through
    /// [`init_worker_pool`](Self::init_worker_pool). Dispatch never reads it.
    pub max_parallelism: Option<usize>,
}

impl DispatchConfig {
    pub fn new(discipline: Discipline) -> Self {
        Self {
            discipline,
            max_parallelism: None,
        }
    }

    pub fn with_max_parallelism(mut self, workers: usize) -> Self {
        self.max_parallelism = Some(workers);
        self
    }

    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_parallelism == Some(0) {
            return Err(ConfigError::ZeroParallelism);
        }
        Ok(())
    }

    /// Size the shared worker pool that parallel passes run on
    ///
    /// Only the first initialization of the pool takes effect; this fails
    /// once the pool is running, including after any parallel pass. Without
    /// `max_parallelism` the pool keeps its default size.
    pub fn init_worker_pool(&self) -> Result<(), ConfigError> {
        self.validate()?;
        let Some(workers) = self.max_parallelism else {
            return Ok(());
        };
        rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|index| format!("faultline-worker-{index}"))
            .build_global()?;
        tracing::debug!(workers, "worker pool initialized");
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
