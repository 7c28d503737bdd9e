use crate::BoxError;
use crate::cap::ValueResolver;
use crate::model::{MarkerInstance, MarkerKind, MethodSignature};
use chanscope_api::{OperationBindings, PayloadType};
use serde::de::DeserializeOwned;

/// Per-scan state handed to every protocol hook.
pub struct ScanContext<'a> {
    resolver: &'a dyn ValueResolver,
}

impl<'a> ScanContext<'a> {
    pub fn new(resolver: &'a dyn ValueResolver) -> Self {
        Self { resolver }
    }

    /// Resolve placeholders in a declared value.
    pub fn resolve(&self, value: &str) -> Result<String, BoxError> {
        self.resolver.resolve(value)
    }

    /// Resolve an optional declared value, keeping `None` as is.
    pub fn resolve_opt(&self, value: Option<&str>) -> Result<Option<String>, BoxError> {
        value.map(|v| self.resolve(v)).transpose()
    }
}

/// Protocol-specific hooks for listener scanning, implemented once per
/// supported marker. The generic scan routine lives in the core.
pub trait ListenerCap: Send + Sync {
    /// Typed form of this protocol's marker attributes.
    type Marker: DeserializeOwned;

    /// Protocol name used as the binding key, e.g. `kafka`.
    fn protocol(&self) -> &str;

    fn marker_kind(&self) -> MarkerKind;

    fn decode_marker(&self, marker: &MarkerInstance) -> Result<Self::Marker, BoxError> {
        Ok(serde_json::from_value(marker.attributes.clone())?)
    }

    /// `Ok(None)` when the marker declares no channel at all.
    fn channel_name(
        &self,
        marker: &Self::Marker,
        ctx: &ScanContext<'_>,
    ) -> Result<Option<String>, BoxError>;

    fn build_bindings(
        &self,
        marker: &Self::Marker,
        ctx: &ScanContext<'_>,
    ) -> Result<OperationBindings, BoxError>;

    /// Payload received by the method, with protocol envelopes unwrapped.
    fn payload_type(&self, method: &MethodSignature) -> Option<PayloadType>;
}
