//! Upgrade planning — turn the two transport capability flags into exactly
//! one upgrade action.

use serde::{Deserialize, Serialize};

use crate::capabilities::{CapabilityRecord, TransportCapabilities};

/// Which upgrade stages must still run on a freshly dialed/accepted
/// connection. Exactly one variant applies per transport; the mapping is a
/// pure function of the two capability flags and cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradePlan {
    /// Raw byte-stream transport; run security then muxer.
    RunBoth,
    /// Dial already authenticates and encrypts; only multiplexing remains.
    RunMuxerOnly,
    /// Dial already multiplexes (muxed but not secure); only security remains.
    RunSecurityOnly,
    /// Fully integrated secure+muxed channel; bypass the upgrade pipeline.
    RunNeither,
}

impl UpgradePlan {
    /// Plan the upgrade for a transport. Computed fresh per dial/accept;
    /// never cached by the core.
    pub fn for_transport(transport: &dyn TransportCapabilities) -> Self {
        let plan = CapabilityRecord::probe(transport).into();
        tracing::trace!(?plan, "planned connection upgrade");
        plan
    }

    /// Whether the security stage still has to run.
    pub fn needs_security(&self) -> bool {
        matches!(self, UpgradePlan::RunBoth | UpgradePlan::RunSecurityOnly)
    }

    /// Whether the muxer stage still has to run.
    pub fn needs_muxer(&self) -> bool {
        matches!(self, UpgradePlan::RunBoth | UpgradePlan::RunMuxerOnly)
    }
}

impl From<CapabilityRecord> for UpgradePlan {
    fn from(record: CapabilityRecord) -> Self {
        match (record.secure, record.muxed) {
            (false, false) => UpgradePlan::RunBoth,
            (true, false) => UpgradePlan::RunMuxerOnly,
            (false, true) => UpgradePlan::RunSecurityOnly,
            (true, true) => UpgradePlan::RunNeither,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Flags(bool, bool);
    impl TransportCapabilities for Flags {
        fn provides_secure_connection(&self) -> bool {
            self.0
        }
        fn provides_muxed_connection(&self) -> bool {
            self.1
        }
    }

    #[test]
    fn plan_covers_all_four_combinations() {
        assert_eq!(UpgradePlan::for_transport(&Flags(false, false)), UpgradePlan::RunBoth);
        assert_eq!(UpgradePlan::for_transport(&Flags(true, false)), UpgradePlan::RunMuxerOnly);
        assert_eq!(UpgradePlan::for_transport(&Flags(false, true)), UpgradePlan::RunSecurityOnly);
        assert_eq!(UpgradePlan::for_transport(&Flags(true, true)), UpgradePlan::RunNeither);
    }

    #[test]
    fn stage_predicates_match_the_plan() {
        assert!(UpgradePlan::RunBoth.needs_security());
        assert!(UpgradePlan::RunBoth.needs_muxer());
        assert!(!UpgradePlan::RunMuxerOnly.needs_security());
        assert!(UpgradePlan::RunMuxerOnly.needs_muxer());
        assert!(UpgradePlan::RunSecurityOnly.needs_security());
        assert!(!UpgradePlan::RunSecurityOnly.needs_muxer());
        assert!(!UpgradePlan::RunNeither.needs_security());
        assert!(!UpgradePlan::RunNeither.needs_muxer());
    }

    #[test]
    fn plan_serializes_in_snake_case() {
        assert_eq!(
            serde_json::to_string(&UpgradePlan::RunMuxerOnly).unwrap(),
            "\"run_muxer_only\""
        );
    }
}
