// Copyright 2025 CARET developers
// SPDX-License-Identifier: Apache-2.0

use caret_config::AutoLoadConfig;
use caret_structures::NodeIndex;

use crate::context::{AutoLoadContext, OverlayKind};
use crate::error::{AutoLoadError, AutoLoadResult};
use crate::loader::{load_matching_file, AutoLoader};
use crate::pattern::FileNamePattern;
use crate::state::{AutoLoaderState, LoadPolicy};

/// Loads the metric file `*_<n><metric-ext>` for a probed node
#[derive(Debug, Clone)]
pub struct MetricNodeLoader {
    state: AutoLoaderState<NodeIndex>,
    pattern: FileNamePattern,
    policy: LoadPolicy,
}

impl MetricNodeLoader {
    pub fn new(config: &AutoLoadConfig) -> AutoLoadResult<Self> {
        Ok(Self {
            state: AutoLoaderState::new(),
            pattern: FileNamePattern::node(&config.metric_extension)?,
            policy: LoadPolicy::from_config(config),
        })
    }
}

impl AutoLoader for MetricNodeLoader {
    type Probe = NodeIndex;

    fn state(&self) -> &AutoLoaderState<NodeIndex> {
        &self.state
    }

    fn state_mut(&mut self) -> &mut AutoLoaderState<NodeIndex> {
        &mut self.state
    }

    fn load_for_node(&mut self, node: NodeIndex, ctx: &mut AutoLoadContext<'_>) -> AutoLoadResult<()> {
        if !self.state.enabled() {
            return Ok(());
        }
        let count = ctx.data.number_of_nodes();
        if node >= count {
            self.state.set_last_probe(None);
            return Err(AutoLoadError::BadProbe(format!(
                "node {} is out of range ({} nodes)",
                node, count
            )));
        }
        load_matching_file(&mut self.state, &self.policy, &self.pattern, OverlayKind::Metric, node, ctx)
    }

    fn is_node_load_supported(&self) -> bool {
        true
    }

    fn load_probe(&mut self, probe: NodeIndex, ctx: &mut AutoLoadContext<'_>) -> AutoLoadResult<()> {
        self.load_for_node(probe, ctx)
    }
}
