//! Per-command build state.
//!
//! A host command dialog calls [`BuildSession::preview`] on every edit and
//! [`BuildSession::execute`] when the user commits. The session remembers the
//! last request it built so that repeated previews of the same input are
//! skipped.

use snapfit_geometry::{FeatureVariant, SnapError};
use snapfit_params::ParameterSet;
use tracing::{debug, info};

use crate::adapter::HostAdapter;
use crate::error::HostResult;
use crate::workflow::{self, BuildTargets, BuiltFeature};

/// Build state of one open command.
#[derive(Debug, Clone, Default)]
pub struct BuildSession {
    last: Option<(FeatureVariant, ParameterSet)>,
    revision: u64,
}

impl BuildSession {
    /// A session that has not built anything yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful builds so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The last request that was built successfully.
    pub fn last_accepted(&self) -> Option<(FeatureVariant, &ParameterSet)> {
        self.last.as_ref().map(|(variant, params)| (*variant, params))
    }

    /// Whether `variant` and `params` equal the last accepted request.
    pub fn is_unchanged(&self, variant: FeatureVariant, params: &ParameterSet) -> bool {
        matches!(&self.last, Some((v, p)) if *v == variant && p == params)
    }

    /// Validity gate: whether the request may be committed.
    ///
    /// Runs schema validation and the family's range rules without building.
    /// The reason for a rejection is logged, not returned.
    pub fn is_valid(variant: FeatureVariant, params: &ParameterSet) -> bool {
        match variant.validate_ranges(params) {
            Ok(()) => true,
            Err(SnapError::Range(violation)) => {
                info!(rule = violation.rule, "input invalid because {}", violation.message);
                false
            }
            Err(err) => {
                info!("input invalid because {err}");
                false
            }
        }
    }

    /// Build a preview, unless the request equals the last accepted one.
    ///
    /// Returns `Ok(None)` when the build was skipped.
    pub fn preview<H: HostAdapter>(
        &mut self,
        host: &mut H,
        variant: FeatureVariant,
        params: &ParameterSet,
        targets: &BuildTargets<'_, H::Body, H::JointOrigin>,
    ) -> HostResult<Option<BuiltFeature<H::Component, H::Body>>> {
        if self.is_unchanged(variant, params) {
            debug!(revision = self.revision, "preview skipped, input unchanged");
            return Ok(None);
        }
        self.run(host, variant, params, targets).map(Some)
    }

    /// Build the final feature. Always builds, even for an unchanged request.
    pub fn execute<H: HostAdapter>(
        &mut self,
        host: &mut H,
        variant: FeatureVariant,
        params: &ParameterSet,
        targets: &BuildTargets<'_, H::Body, H::JointOrigin>,
    ) -> HostResult<BuiltFeature<H::Component, H::Body>> {
        self.run(host, variant, params, targets)
    }

    fn run<H: HostAdapter>(
        &mut self,
        host: &mut H,
        variant: FeatureVariant,
        params: &ParameterSet,
        targets: &BuildTargets<'_, H::Body, H::JointOrigin>,
    ) -> HostResult<BuiltFeature<H::Component, H::Body>> {
        let built = workflow::build(host, variant, params, targets)?;
        self.last = Some((variant, params.clone()));
        self.revision += 1;
        debug!(revision = self.revision, %variant, "build accepted");
        Ok(built)
    }
}
