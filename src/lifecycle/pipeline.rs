use crate::clients::{ApiClient, MenuClient, MenuSource, OrderClient, SubmitReceipt};
use crate::framework::{HttpTransport, ReqwestTransport};
use crate::lifecycle::{Config, PipelineError};
use crate::mapping::{BatchBuild, OrderBatchBuilder};
use crate::markup;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, instrument, trace};

/// A batch ready for submission.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedBatch {
    pub build: BatchBuild,
    pub menu_source: MenuSource,
}

/// The runtime orchestrator of one relay run.
///
/// `OrderPipeline` wires the clients and the batch builder together:
///
/// 1. decode the markup document
/// 2. resolve the menu (live, else snapshot)
/// 3. map every employee into the batch
/// 4. submit the batch
///
/// Each run builds its own menu index and batch; nothing is shared between
/// runs except the transport.
///
/// # Example
///
/// ```ignore
/// let config = Config::from_env()?;
/// let pipeline = OrderPipeline::from_config(&config)?;
/// let receipt = pipeline.run_file(Path::new("data/employee_orders.xml")).await?;
/// ```
#[derive(Clone)]
pub struct OrderPipeline {
    menu_client: MenuClient,
    order_client: OrderClient,
    builder: OrderBatchBuilder,
}

impl OrderPipeline {
    /// Creates a pipeline that talks to the provider through `transport`.
    pub fn new(config: &Config, transport: Arc<dyn HttpTransport>) -> Self {
        let api = ApiClient::new(config.base_url.clone(), transport)
            .with_version(config.api_version)
            .with_token(config.api_key.clone())
            .with_retry(config.retry.clone());

        Self {
            menu_client: MenuClient::new(api.clone(), config.snapshot_path.clone()),
            order_client: OrderClient::new(api),
            builder: OrderBatchBuilder::new(config.record_policy).skip_absent(config.skip_absent),
        }
    }

    /// Creates a pipeline backed by a fresh [`ReqwestTransport`].
    pub fn from_config(config: &Config) -> Result<Self, PipelineError> {
        let transport = ReqwestTransport::new(config.timeout).map_err(PipelineError::Client)?;
        Ok(Self::new(config, Arc::new(transport)))
    }

    /// Decodes `raw`, resolves the menu and builds the batch without sending it.
    #[instrument(skip(self, raw))]
    pub async fn prepare(&self, raw: &str) -> Result<PreparedBatch, PipelineError> {
        let document = markup::parse(raw)?;
        trace!(document = ?document, "Document decoded");

        let menu = self.menu_client.resolve_menu().await?;
        let build = self.builder.build_document(&document, &menu.index)?;

        Ok(PreparedBatch {
            build,
            menu_source: menu.source,
        })
    }

    /// Runs the whole pipeline on an in-memory document.
    #[instrument(skip(self, raw))]
    pub async fn run(&self, raw: &str) -> Result<SubmitReceipt, PipelineError> {
        let prepared = self.prepare(raw).await?;
        let receipt = self.order_client.submit(&prepared.build.batch).await?;
        Ok(receipt)
    }

    /// Reads `path` and runs the whole pipeline on it.
    #[instrument(skip(self))]
    pub async fn run_file(&self, path: &Path) -> Result<SubmitReceipt, PipelineError> {
        info!(path = %path.display(), "Pipeline started");
        let raw = read_input(path).await?;

        match self.run(&raw).await {
            Ok(receipt) => {
                info!(status = receipt.status, "Pipeline finished");
                Ok(receipt)
            }
            Err(e) => {
                error!(error = %e, kind = e.kind(), "Pipeline failed");
                Err(e)
            }
        }
    }
}

/// Reads the input document.
pub async fn read_input(path: &Path) -> Result<String, PipelineError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| PipelineError::Input {
            path: path.display().to_string(),
            source,
        })
}
