use super::pipeline::Pipeline;
use super::ApiError;
use crate::models::{QueueMetrics, QueueSnapshot};

/// Waiting-list endpoints under `/queue`
pub struct QueueApi<'a> {
    pipeline: &'a Pipeline,
}

impl<'a> QueueApi<'a> {
    pub(crate) fn new(pipeline: &'a Pipeline) -> Self {
        Self { pipeline }
    }

    pub async fn queue(&self) -> Result<QueueSnapshot, ApiError> {
        self.pipeline.get("/queue").await
    }

    pub async fn metrics(&self) -> Result<QueueMetrics, ApiError> {
        self.pipeline.get("/queue/metrics").await
    }
}
