use crate::{
    error::{ResolveError, TransportError},
    protocol::message::{ApiRequest, ApiResponse},
};
use async_trait::async_trait;
use model::catalog::object_stat::ObjectStat;
use std::sync::Arc;
use tokio::sync::Mutex;

/// One connection to the catalog server. Takes `&mut self` because a
/// connection carries one request at a time.
#[async_trait]
pub trait CatalogTransport: Send {
    async fn send_and_receive(
        &mut self,
        request: ApiRequest,
    ) -> Result<ApiResponse, TransportError>;
}

/// Resolves a path to its catalog metadata.
#[async_trait]
pub trait PathResolver: Send + Sync {
    async fn resolve_object_stat(&self, path: &str) -> Result<ObjectStat, ResolveError>;
}

/// A connection shared by every query issued through it.
pub type SharedTransport = Arc<Mutex<dyn CatalogTransport>>;

pub fn shared<T: CatalogTransport + 'static>(transport: T) -> SharedTransport {
    Arc::new(Mutex::new(transport))
}
