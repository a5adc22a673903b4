use crate::{
    error::{ExecutionError, QueryError},
    genquery::{
        batch::{CloseBehavior, ResultBatch},
        decode::decode_rows,
    },
    protocol::{
        message::{ApiRequest, ApiResponse, CAT_NO_ROWS_FOUND, GenQueryInp},
        transport::SharedTransport,
    },
};
use model::records::batch::BatchMetadata;
use planner::query::{
    ast::{options::QueryOptions, spec::QuerySpec},
    translator::{TranslatedQuery, Translator},
};
use tracing::{debug, warn};

/// Executes translated queries over a shared connection. Requests are
/// serialized on the connection lock and never retried.
#[derive(Clone)]
pub struct GenQueryExecutor {
    transport: SharedTransport,
    translator: Translator,
}

impl GenQueryExecutor {
    pub fn new(transport: SharedTransport) -> Self {
        Self {
            transport,
            translator: Translator::new(),
        }
    }

    /// Uses `translator` (e.g. one carrying extension columns) for
    /// [`execute_spec`](Self::execute_spec).
    pub fn with_translator(mut self, translator: Translator) -> Self {
        self.translator = translator;
        self
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    /// Sends the first batch request of `query`, starting at the 0-based
    /// `start_offset`. `zone` routes the query to a federated zone.
    pub async fn execute(
        &self,
        query: &TranslatedQuery,
        start_offset: u64,
        close: CloseBehavior,
        zone: Option<&str>,
    ) -> Result<ResultBatch, QueryError> {
        let mut options = query.options;
        options.set(QueryOptions::AUTO_CLOSE, close == CloseBehavior::AutoClose);

        debug!(
            columns = query.column_count(),
            conditions = query.conditions.len(),
            start_offset,
            close = %close,
            zone = zone.unwrap_or("-"),
            "Executing GenQuery"
        );

        let request = GenQueryInp {
            max_rows: query.row_limit,
            continue_index: 0,
            partial_start_index: start_offset,
            options,
            zone: zone.map(str::to_string),
            selects: query.selects.clone(),
            conditions: query.conditions.clone(),
            order_by: query.order_by.clone(),
        };

        let response = self.round_trip(request).await?;
        self.finish_batch(
            query.clone(),
            response,
            start_offset,
            close,
            zone.map(str::to_string),
        )
    }

    /// Translates `spec` with this executor's translator, then executes it.
    pub async fn execute_spec(
        &self,
        spec: &QuerySpec,
        start_offset: u64,
        close: CloseBehavior,
        zone: Option<&str>,
    ) -> Result<ResultBatch, QueryError> {
        let query = self.translator.translate(spec)?;
        self.execute(&query, start_offset, close, zone).await
    }

    /// Fetches the batch after `batch` through its continuation token.
    pub async fn continue_query(&self, batch: &ResultBatch) -> Result<ResultBatch, QueryError> {
        let token = match batch.continuation_token() {
            Some(token) if !batch.metadata().is_last_row_overall => token,
            _ => return Err(QueryError::NoMoreResults),
        };

        let query = batch.query();
        let start_offset = batch.next_offset();
        debug!(token, start_offset, "Continuing GenQuery");

        let request = GenQueryInp {
            max_rows: query.row_limit,
            continue_index: token,
            partial_start_index: start_offset,
            options: query.options,
            zone: batch.zone().map(str::to_string),
            selects: query.selects.clone(),
            conditions: query.conditions.clone(),
            order_by: query.order_by.clone(),
        };

        let response = self.round_trip(request).await?;
        self.finish_batch(
            query.clone(),
            response,
            start_offset,
            batch.close_behavior(),
            batch.zone().map(str::to_string),
        )
    }

    /// Releases the server cursor behind `batch`. A no-op when the batch holds
    /// no open cursor.
    pub async fn close_results(&self, batch: ResultBatch) -> Result<(), QueryError> {
        let Some(token) = batch.continuation_token() else {
            return Ok(());
        };

        debug!(token, "Closing GenQuery cursor");
        let query = batch.query();
        let request = GenQueryInp {
            max_rows: 0,
            continue_index: token,
            partial_start_index: 0,
            options: query.options,
            zone: batch.zone().map(str::to_string),
            selects: query.selects.clone(),
            conditions: query.conditions.clone(),
            order_by: query.order_by.clone(),
        };

        match self.round_trip(request).await? {
            ApiResponse::GenQuery(_) => Ok(()),
            ApiResponse::Error { code, .. } if code == CAT_NO_ROWS_FOUND => Ok(()),
            ApiResponse::Error { code, message } => {
                Err(ExecutionError::Rejected { code, message }.into())
            }
        }
    }

    async fn round_trip(&self, request: GenQueryInp) -> Result<ApiResponse, ExecutionError> {
        let mut transport = self.transport.lock().await;
        Ok(transport
            .send_and_receive(ApiRequest::GenQuery(request))
            .await?)
    }

    fn finish_batch(
        &self,
        query: TranslatedQuery,
        response: ApiResponse,
        start_offset: u64,
        close: CloseBehavior,
        zone: Option<String>,
    ) -> Result<ResultBatch, QueryError> {
        let out = match response {
            ApiResponse::GenQuery(out) => out,
            ApiResponse::Error { code, .. } if code == CAT_NO_ROWS_FOUND => {
                debug!(start_offset, "No rows found");
                return Ok(ResultBatch::new(
                    Vec::new(),
                    BatchMetadata::exhausted(start_offset),
                    None,
                    close,
                    zone,
                    query,
                ));
            }
            ApiResponse::Error { code, message } => {
                warn!(code, "GenQuery rejected by server");
                return Err(ExecutionError::Rejected { code, message }.into());
            }
        };

        let continue_index = out.continue_index;
        let (rows, metadata) = decode_rows(&query, out, start_offset)?;
        let continuation = match close {
            CloseBehavior::ManualClose if continue_index != 0 => Some(continue_index),
            _ => None,
        };

        debug!(
            rows = metadata.row_count,
            row_count_so_far = metadata.row_count_so_far,
            total = metadata.total_records,
            last = metadata.is_last_row_overall,
            continuation = continuation.unwrap_or(0),
            "Received GenQuery batch"
        );

        Ok(ResultBatch::new(rows, metadata, continuation, close, zone, query))
    }
}
