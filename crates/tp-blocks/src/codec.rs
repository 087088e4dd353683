//! Stateless codec service bundling a registry and a resolver.

use std::fmt;
use std::sync::Arc;

use crate::block::ContentBlock;
use crate::inspect::{FragmentReport, inspect};
use crate::reader::decode;
use crate::registry::BlockRegistry;
use crate::resolve::{NoopResolver, ReferenceResolver};
use crate::writer::encode;

/// Encodes and decodes document bodies with a fixed configuration.
///
/// Cheap to clone and safe to share between threads.
#[derive(Clone)]
pub struct BlockCodec {
    registry: BlockRegistry,
    resolver: Arc<dyn ReferenceResolver>,
}

impl BlockCodec {
    /// Create a codec that resolves no references
    pub fn new(registry: BlockRegistry) -> Self {
        Self {
            registry,
            resolver: Arc::new(NoopResolver),
        }
    }

    /// Replace the reference resolver
    pub fn with_resolver(mut self, resolver: impl ReferenceResolver + 'static) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    /// Share an existing resolver
    pub fn with_shared_resolver(mut self, resolver: Arc<dyn ReferenceResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    pub fn resolver(&self) -> &dyn ReferenceResolver {
        self.resolver.as_ref()
    }

    pub fn encode(&self, blocks: &[ContentBlock]) -> String {
        encode(blocks, &self.registry)
    }

    pub fn decode(&self, document: &str) -> Vec<ContentBlock> {
        decode(document, self.resolver.as_ref())
    }

    pub fn inspect(&self, document: &str) -> Vec<FragmentReport> {
        inspect(document, self.resolver.as_ref())
    }
}

impl Default for BlockCodec {
    fn default() -> Self {
        Self::new(BlockRegistry::platform())
    }
}

impl fmt::Debug for BlockCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockCodec")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
