//! Conversion orchestration.
//!
//! Converters run in dependency order so later ones can reference what
//! earlier ones produced:
//!
//! 1. rate limiters
//! 2. CoS policies (link rate limiters by name)
//! 3. topologies
//! 4. AAA policies
//! 5. services (resolve topologies by VLAN)
//! 6. AP configs

use edge_schema::{ExistingTopology, TargetConfig};
use serde_json::Value;

use crate::defaults::{embedded_defaults, ConversionDefaults};
use crate::ids::IdAllocator;
use crate::source::{NormalizedSourceConfig, SourceError};
use crate::transform::{aaa, ap, qos, service, topology};
use crate::warnings::{ConversionWarning, Diagnostics, SkipReason, WarningSeverity};

/// Output of one conversion run.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub config: TargetConfig,
    pub warnings: Vec<ConversionWarning>,
}

impl Conversion {
    pub fn skipped_count(&self) -> usize {
        self.count(WarningSeverity::Skipped)
    }

    pub fn adjusted_count(&self) -> usize {
        self.count(WarningSeverity::Adjusted)
    }

    fn count(&self, severity: WarningSeverity) -> usize {
        self.warnings
            .iter()
            .filter(|w| w.severity == severity)
            .count()
    }
}

/// Turns normalized XIQ configuration into a controller bundle.
///
/// A converter holds only its defaults. Identifier maps are created per call
/// to [`Converter::convert`], so one converter can serve any number of
/// unrelated runs.
#[derive(Debug, Clone)]
pub struct Converter {
    defaults: ConversionDefaults,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(embedded_defaults())
    }
}

impl Converter {
    pub fn new(defaults: ConversionDefaults) -> Self {
        Self { defaults }
    }

    pub fn convert(
        &self,
        source: &NormalizedSourceConfig,
        existing_topologies: &[ExistingTopology],
    ) -> Conversion {
        let defaults = &self.defaults;
        let mut ids = IdAllocator::new();
        let mut diag = Diagnostics::new();

        for record in &source.rejected {
            let reason = SkipReason::Malformed(record.error.clone());
            diag.skipped(record.object, &record.label, &reason);
        }

        let rate_limiters =
            qos::convert_rate_limiters(&source.rate_limiters, &ids, defaults, &mut diag);
        let cos_policies = qos::convert_cos_policies(
            &source.cos_policies,
            &rate_limiters,
            &ids,
            defaults,
            &mut diag,
        );
        let topologies =
            topology::convert_topologies(&source.vlans, &mut ids, defaults, &mut diag);
        let aaa_policies = aaa::convert_aaa_policies(
            &source.authentication_servers,
            &mut ids,
            defaults,
            &mut diag,
        );
        let index = service::TopologyIndex::build(existing_topologies, &topologies, &ids);
        let services =
            service::convert_services(&source.ssids, &index, &ids, defaults, &mut diag);
        let ap_configs = ap::convert_ap_configs(&source.devices, &mut diag);

        tracing::debug!(
            services = services.len(),
            topologies = topologies.len(),
            aaa_policies = aaa_policies.len(),
            rate_limiters = rate_limiters.len(),
            cos_policies = cos_policies.len(),
            ap_configs = ap_configs.len(),
            "conversion finished"
        );

        Conversion {
            config: TargetConfig {
                services,
                topologies,
                aaa_policies,
                ap_configs,
                rate_limiters,
                cos_policies,
            },
            warnings: diag.into_warnings(),
        }
    }

    /// Convert a raw JSON document.
    ///
    /// Fails only when the document is not a JSON object or a list is not an
    /// array; per-record problems, unreadable records included, end up in the
    /// warnings.
    pub fn convert_value(
        &self,
        source: Value,
        existing_topologies: &[ExistingTopology],
    ) -> Result<Conversion, SourceError> {
        let source = NormalizedSourceConfig::from_value(source)?;
        Ok(self.convert(&source, existing_topologies))
    }
}
