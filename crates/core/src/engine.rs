//! Document generation sessions.
//!
//! A [`ChanscopeEngine`] holds the long-lived collaborators (enumerator,
//! protocol caps, schema provider). Each call to [`ChanscopeEngine::generate`]
//! opens a fresh session: a new [`SchemaRegistry`] shared by one scanner per
//! protocol plus the producer scanner. The session ends with the call.

use crate::assembler::DocumentAssembler;
use crate::catalog::SchemaCatalog;
use crate::error::Result;
use crate::manifest::StaticManifest;
use crate::placeholder::PropertiesResolver;
use crate::registry::SchemaRegistry;
use crate::scan::{
    BindingPolicy, ChannelAggregator, ChannelsScanner, FirstNonEmpty, ListenerChannelScanner,
    ProducerChannelScanner, ScannedChannels,
};
use chanscope_api::{AsyncApiDocket, AsyncApiDocument, Channels};
use chanscope_plugin::{
    ComponentEnumerator, ListenerCap, NamingConvention, PathConvention, SchemaProvider,
    ValueResolver,
};
use std::sync::Arc;
use tracing::info;

/// Collaborators of one generation session.
pub struct ScanSession {
    pub registry: Arc<SchemaRegistry>,
    pub enumerator: Arc<dyn ComponentEnumerator>,
    pub resolver: Arc<dyn ValueResolver>,
}

/// Creates the session-bound scanner of one protocol.
pub trait ScannerProvider: Send + Sync {
    fn create(&self, session: &ScanSession) -> Box<dyn ChannelsScanner>;
}

struct ListenerProvider<C: ListenerCap> {
    cap: Arc<C>,
}

impl<C: ListenerCap + 'static> ScannerProvider for ListenerProvider<C> {
    fn create(&self, session: &ScanSession) -> Box<dyn ChannelsScanner> {
        Box::new(ListenerChannelScanner::new(
            self.cap.clone(),
            session.enumerator.clone(),
            session.registry.clone(),
            session.resolver.clone(),
        ))
    }
}

/// Channels of one finished session, with the registry their messages point into.
pub struct SessionOutput {
    pub channels: Channels,
    pub registry: Arc<SchemaRegistry>,
}

pub struct ChanscopeEngine {
    docket: AsyncApiDocket,
    enumerator: Arc<dyn ComponentEnumerator>,
    listeners: Vec<Arc<dyn ScannerProvider>>,
    schema_provider: Arc<dyn SchemaProvider>,
    naming: Arc<dyn NamingConvention>,
    resolver: Arc<dyn ValueResolver>,
    binding_policy: Arc<dyn BindingPolicy>,
}

impl ChanscopeEngine {
    pub fn builder(docket: AsyncApiDocket) -> ChanscopeEngineBuilder {
        ChanscopeEngineBuilder::new(docket)
    }

    pub fn docket(&self) -> &AsyncApiDocket {
        &self.docket
    }

    /// Run every scanner of a new session and aggregate their channels.
    /// Any fatal error aborts the whole session.
    pub fn channels(&self) -> Result<SessionOutput> {
        let session = ScanSession {
            registry: Arc::new(SchemaRegistry::with_naming(
                self.schema_provider.clone(),
                self.naming.clone(),
            )),
            enumerator: self.enumerator.clone(),
            resolver: self.resolver.clone(),
        };

        let mut scanners: Vec<Box<dyn ChannelsScanner>> = self
            .listeners
            .iter()
            .map(|provider| provider.create(&session))
            .collect();
        scanners.push(Box::new(ProducerChannelScanner::with_policy(
            self.docket.producers.clone(),
            session.registry.clone(),
            self.binding_policy.clone(),
        )));

        let mut outputs = Vec::with_capacity(scanners.len());
        for scanner in &scanners {
            let origin = scanner.origin();
            info!("Running {} scanner", origin);
            outputs.push(ScannedChannels::new(origin, scanner.scan()?));
        }

        let channels = ChannelAggregator::aggregate(outputs)?;
        Ok(SessionOutput {
            channels,
            registry: session.registry,
        })
    }

    /// Generate the complete document. Never returns a partial document.
    pub fn generate(&self) -> Result<AsyncApiDocument> {
        let SessionOutput { channels, registry } = self.channels()?;
        Ok(DocumentAssembler::assemble(
            self.docket.info.clone(),
            self.docket.servers.clone(),
            channels,
            &registry,
        ))
    }
}

pub struct ChanscopeEngineBuilder {
    docket: AsyncApiDocket,
    enumerator: Option<Arc<dyn ComponentEnumerator>>,
    listeners: Vec<Arc<dyn ScannerProvider>>,
    schema_provider: Option<Arc<dyn SchemaProvider>>,
    naming: Arc<dyn NamingConvention>,
    resolver: Option<Arc<dyn ValueResolver>>,
    binding_policy: Arc<dyn BindingPolicy>,
}

impl ChanscopeEngineBuilder {
    pub fn new(docket: AsyncApiDocket) -> Self {
        Self {
            docket,
            enumerator: None,
            listeners: Vec::new(),
            schema_provider: None,
            naming: Arc::new(PathConvention),
            resolver: None,
            binding_policy: Arc::new(FirstNonEmpty),
        }
    }

    pub fn with_enumerator(mut self, enumerator: Arc<dyn ComponentEnumerator>) -> Self {
        self.enumerator = Some(enumerator);
        self
    }

    /// Add a listener scanner for `cap`'s protocol.
    pub fn with_listener<C: ListenerCap + 'static>(mut self, cap: C) -> Self {
        self.listeners.push(Arc::new(ListenerProvider { cap: Arc::new(cap) }));
        self
    }

    pub fn with_scanner_provider(mut self, provider: Arc<dyn ScannerProvider>) -> Self {
        self.listeners.push(provider);
        self
    }

    pub fn with_schema_provider(mut self, provider: Arc<dyn SchemaProvider>) -> Self {
        self.schema_provider = Some(provider);
        self
    }

    pub fn with_naming(mut self, naming: Arc<dyn NamingConvention>) -> Self {
        self.naming = naming;
        self
    }

    /// Replaces the default resolver over the docket's properties.
    pub fn with_resolver(mut self, resolver: Arc<dyn ValueResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn with_binding_policy(mut self, policy: Arc<dyn BindingPolicy>) -> Self {
        self.binding_policy = policy;
        self
    }

    pub fn build(self) -> ChanscopeEngine {
        let resolver = self.resolver.unwrap_or_else(|| {
            Arc::new(PropertiesResolver::new(self.docket.properties.clone()))
        });

        ChanscopeEngine {
            enumerator: self
                .enumerator
                .unwrap_or_else(|| Arc::new(StaticManifest::new())),
            schema_provider: self
                .schema_provider
                .unwrap_or_else(|| Arc::new(SchemaCatalog::new())),
            listeners: self.listeners,
            naming: self.naming,
            resolver,
            binding_policy: self.binding_policy,
            docket: self.docket,
        }
    }
}
