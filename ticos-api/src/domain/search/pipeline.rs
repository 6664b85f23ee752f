//! Request → params → result → response orchestration shared by all
//! searchable resources.

use std::future::Future;
use std::marker::PhantomData;

use axum::{extract::Query, http::Uri};
use tokio_util::sync::CancellationToken;
use tracing::instrument;

use super::error::{BoxError, SearchError};
use super::traits::{SearchRequest, SearchService};
use super::types::{SearchConfig, SearchResponse};

/// Generic search pipeline.
///
/// # Type Parameters
///
/// * `Req` - Wire-level request, bound from the query string
/// * `S` - SearchService executing the converted `Req::Params`
pub struct SearchPipeline<Req, S> {
    service: S,
    config: SearchConfig,
    _request: PhantomData<fn() -> Req>,
}

impl<Req, S> SearchPipeline<Req, S>
where
    Req: SearchRequest,
    S: SearchService<Req::Params>,
{
    pub fn new(service: S, config: SearchConfig) -> Self {
        Self {
            service,
            config,
            _request: PhantomData,
        }
    }

    /// Run one search invocation for the query string of `uri`.
    ///
    /// Stages run strictly in order and the first failure ends the
    /// invocation; nothing after it executes.
    #[instrument(name = "search_pipeline", skip_all, fields(path = %uri.path()))]
    pub async fn handle(
        &self,
        uri: &Uri,
        cancel: CancellationToken,
    ) -> Result<SearchResponse<S::Item>, SearchError> {
        let result = self.run(uri, &cancel).await;

        match &result {
            Ok(response) => tracing::debug!(
                total = response.pagination.total,
                returned = response.data.len(),
                "search completed"
            ),
            Err(err) if err.is_client_error() => {
                tracing::debug!(error = %err, "search request rejected")
            }
            Err(SearchError::Execution { operation, source }) => {
                tracing::error!(operation = *operation, error = %source, "search execution failed")
            }
            Err(err) => tracing::warn!(error = %err, "search aborted"),
        }

        result
    }

    async fn run(
        &self,
        uri: &Uri,
        cancel: &CancellationToken,
    ) -> Result<SearchResponse<S::Item>, SearchError> {
        let request = parse_request::<Req>(uri)?;

        request
            .validate(&self.config)
            .map_err(SearchError::Validation)?;

        let params = request.to_search_params(&self.config)?;

        let page = tokio::time::timeout(
            self.config.timeout,
            self.service.execute_search(&params, cancel),
        )
        .await
        .map_err(|_| SearchError::Timeout(self.config.timeout))??;

        Ok(SearchResponse::from_page(page, &params))
    }
}

/// Bind the query string of `uri` into `T`; binding errors are reported,
/// never replaced by defaults.
pub(crate) fn parse_request<T: SearchRequest>(uri: &Uri) -> Result<T, SearchError> {
    Query::<T>::try_from_uri(uri)
        .map(|Query(request)| request)
        .map_err(|rejection| SearchError::RequestParse(rejection.body_text()))
}

/// Await `fut` unless `cancel` fires first.
///
/// Collaborator errors are tagged with `operation`. Cancellation wins ties so
/// a cancelled invocation never yields a result.
pub async fn run_cancellable<T, E, F>(
    cancel: &CancellationToken,
    operation: &'static str,
    fut: F,
) -> Result<T, SearchError>
where
    F: Future<Output = Result<T, E>>,
    E: Into<BoxError>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(SearchError::Cancelled { operation }),
        result = fut => result.map_err(|source| SearchError::execution(operation, source)),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use serde::Deserialize;

    use super::*;
    use crate::domain::search::{Convertible, Page, SearchParams, Validatable};

    /// Minimal resource used to exercise the pipeline independently of jobs.
    #[derive(Debug, Deserialize)]
    struct EchoRequest {
        q: String,
        limit: Option<i64>,
        offset: Option<i64>,
    }

    struct EchoParams {
        q: String,
        limit: i64,
        offset: i64,
    }

    impl SearchParams for EchoParams {
        fn limit(&self) -> i64 {
            self.limit
        }

        fn offset(&self) -> i64 {
            self.offset
        }
    }

    impl Validatable for EchoRequest {
        fn validate(&self, _config: &SearchConfig) -> Result<(), Vec<String>> {
            let mut errors = Vec::new();
            if self.q.trim().is_empty() {
                errors.push("search query cannot be empty".to_string());
            }
            if self.q.len() < 3 {
                errors.push("search query is too short".to_string());
            }
            if errors.is_empty() {
                Ok(())
            } else {
                Err(errors)
            }
        }
    }

    impl Convertible for EchoRequest {
        type Params = EchoParams;

        fn to_search_params(&self, config: &SearchConfig) -> Result<EchoParams, SearchError> {
            if self.q == "unconvertible" {
                return Err(SearchError::conversion("q", self.q.clone(), "cannot convert"));
            }
            Ok(EchoParams {
                q: self.q.trim().to_string(),
                limit: config.resolve_limit(self.limit),
                offset: config.resolve_offset(self.offset),
            })
        }
    }

    #[derive(Clone, Default)]
    struct EchoService {
        calls: Arc<AtomicUsize>,
        total: i64,
        delay: Option<Duration>,
    }

    #[async_trait]
    impl SearchService<EchoParams> for EchoService {
        type Item = String;

        async fn execute_search(
            &self,
            params: &EchoParams,
            cancel: &CancellationToken,
        ) -> Result<Page<String>, SearchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let delay = self.delay;
            run_cancellable(cancel, "echo", async move {
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                Ok::<_, std::io::Error>(())
            })
            .await?;

            let items = (0..params.limit.min(self.total - params.offset).max(0))
                .map(|i| format!("{}-{}", params.q, params.offset + i))
                .collect();
            Ok(Page::new(items, self.total))
        }
    }

    fn pipeline(service: EchoService) -> SearchPipeline<EchoRequest, EchoService> {
        SearchPipeline::new(service, SearchConfig::default())
    }

    fn uri(s: &str) -> Uri {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn handle_builds_paginated_response() {
        let service = EchoService {
            total: 25,
            ..Default::default()
        };
        let response = pipeline(service)
            .handle(&uri("/echo?q=python&limit=2"), CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(response.data, vec!["python-0", "python-1"]);
        assert_eq!(response.pagination.total, 25);
        assert_eq!(response.pagination.limit, 2);
        assert_eq!(response.pagination.offset, 0);
        assert!(response.pagination.has_more);
    }

    #[tokio::test]
    async fn binding_failure_is_reported_not_defaulted() {
        let service = EchoService::default();
        let calls = service.calls.clone();

        let err = pipeline(service)
            .handle(&uri("/echo?q=rust&limit=ten"), CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::RequestParse(_)));

        let err = pipeline(EchoService::default())
            .handle(&uri("/echo?limit=10"), CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::RequestParse(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn validation_collects_all_violations_before_execution() {
        let service = EchoService::default();
        let calls = service.calls.clone();

        let err = pipeline(service)
            .handle(&uri("/echo?q=%20"), CancellationToken::new())
            .await
            .unwrap_err();

        match err {
            SearchError::Validation(errors) => assert_eq!(errors.len(), 2),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn conversion_failure_skips_execution() {
        let service = EchoService::default();
        let calls = service.calls.clone();

        let err = pipeline(service)
            .handle(&uri("/echo?q=unconvertible"), CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, SearchError::Conversion { field: "q", .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn cancelled_invocation_returns_no_page() {
        let service = EchoService {
            total: 5,
            delay: Some(Duration::from_secs(30)),
            ..Default::default()
        };
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let err = pipeline(service)
            .handle(&uri("/echo?q=slow"), cancel)
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::Cancelled { operation: "echo" }));
    }

    #[tokio::test]
    async fn deadline_exceeded_is_a_timeout() {
        let service = EchoService {
            total: 5,
            delay: Some(Duration::from_secs(30)),
            ..Default::default()
        };
        let config = SearchConfig {
            timeout: Duration::from_millis(20),
            ..SearchConfig::default()
        };
        let pipeline: SearchPipeline<EchoRequest, _> = SearchPipeline::new(service, config);

        let err = pipeline
            .handle(&uri("/echo?q=slow"), CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::Timeout(_)));
    }
}
