//! Concurrent retrieval of the six audit resources.
//!
//! Every retrieval is a single attempt bounded by the configured timeout.
//! Failures never propagate: they are logged and the resource comes back
//! with its fields absent.

use super::bundle::{FetchBundle, FetchedResource, ResourceKind};
use super::http_client::HttpClient;
use crate::config::FetchConfig;
use crate::error::FetchError;
use async_trait::async_trait;
use futures::future::join_all;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::{debug, warn};
use url::Url;

/// Anything that can produce a [`FetchBundle`] for an origin.
#[async_trait]
pub trait ResourceSource: Send + Sync {
    /// Retrieve all six resources under `origin` (e.g. `https://example.com`).
    async fn fetch_all(&self, origin: &str) -> FetchBundle;
}

/// Live HTTP fetcher.
pub struct Fetcher {
    home: HttpClient,
    resources: HttpClient,
    limiter: Arc<Semaphore>,
}

impl Fetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let home = HttpClient::new(config, config.home_max_redirects)?;
        let resources = HttpClient::new(config, config.resource_max_redirects)?;
        debug!(
            timeout_ms = config.timeout_ms,
            max_in_flight = config.in_flight(),
            "fetcher ready; TLS certificate verification is disabled for audited sites"
        );

        Ok(Self {
            home,
            resources,
            limiter: Arc::new(Semaphore::new(config.in_flight())),
        })
    }

    /// Run `fut` while holding one in-flight permit.
    async fn limited<F: Future>(&self, fut: F) -> F::Output {
        // The semaphore is never closed, so the permit is always granted.
        let _permit = self.limiter.acquire().await.ok();
        fut.await
    }

    /// Header probe and body fetch against the home URL, issued together.
    ///
    /// Headers, effective URL and TTFB come from the probe; the body from the
    /// GET, kept even for non-2xx responses.
    async fn fetch_home(&self, url: &str) -> FetchedResource {
        let start = Instant::now();
        let (probe, page) = tokio::join!(
            self.limited(self.home.head(url)),
            self.limited(self.home.get(url)),
        );

        let mut resource = FetchedResource::absent();

        match probe {
            Ok(head) => {
                debug!(url, status = head.status, ttfb_ms = head.ttfb_ms, "home probe");
                resource.headers = head.headers;
                resource.effective_url = Some(head.url);
                resource.ttfb_millis = Some(head.ttfb_ms);
            }
            Err(e) => warn!(url, error = %e, "home page header probe failed"),
        }

        match page {
            Ok(page) => {
                debug!(
                    url,
                    status = page.status,
                    bytes = page.body.len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "home body"
                );
                resource.body = Some(page.body);
            }
            Err(e) => warn!(url, error = %e, "home page body fetch failed"),
        }

        resource
    }

    /// Body-only fetch of an auxiliary resource. Non-2xx leaves the body absent.
    async fn fetch_resource(&self, url: &str) -> FetchedResource {
        let start = Instant::now();
        match self.limited(self.resources.get(url)).await {
            Ok(resp) => {
                debug!(
                    url,
                    status = resp.status,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "resource fetched"
                );
                let success = resp.is_success();
                FetchedResource {
                    body: success.then_some(resp.body),
                    headers: resp.headers,
                    effective_url: Some(resp.url),
                    ttfb_millis: None,
                }
            }
            Err(e) => {
                debug!(url, error = %e, "resource unavailable");
                FetchedResource::absent()
            }
        }
    }
}

/// Absolute URL of `kind` under `origin`.
pub fn resource_url(origin: &Url, kind: ResourceKind) -> Result<String, FetchError> {
    origin
        .join(kind.path())
        .map(String::from)
        .map_err(|_| FetchError::Url(format!("{origin}{}", kind.path())))
}

#[async_trait]
impl ResourceSource for Fetcher {
    async fn fetch_all(&self, origin: &str) -> FetchBundle {
        let mut bundle = FetchBundle::default();

        let base = match Url::parse(origin) {
            Ok(base) => base,
            Err(e) => {
                warn!(origin, error = %e, "origin is not a valid URL; nothing fetched");
                return bundle;
            }
        };

        let home = async {
            match resource_url(&base, ResourceKind::Home) {
                Ok(url) => self.fetch_home(&url).await,
                Err(e) => {
                    warn!(error = %e, "skipping home page");
                    FetchedResource::absent()
                }
            }
        };

        let auxiliary = join_all(ResourceKind::AUXILIARY.into_iter().map(|kind| {
            let base = &base;
            async move {
                let resource = match resource_url(base, kind) {
                    Ok(url) => self.fetch_resource(&url).await,
                    Err(e) => {
                        warn!(resource = kind.key(), error = %e, "skipping resource");
                        FetchedResource::absent()
                    }
                };
                debug!(
                    resource = kind.key(),
                    present = resource.text().is_some(),
                    "resource settled"
                );
                (kind, resource)
            }
        }));

        let (home, auxiliary) = tokio::join!(home, auxiliary);

        bundle.set(ResourceKind::Home, home);
        for (kind, resource) in auxiliary {
            bundle.set(kind, resource);
        }
        bundle
    }
}

/// A fixed bundle, returned for every origin.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    bundle: FetchBundle,
}

impl StaticSource {
    pub fn new(bundle: FetchBundle) -> Self {
        Self { bundle }
    }
}

#[async_trait]
impl ResourceSource for StaticSource {
    async fn fetch_all(&self, _origin: &str) -> FetchBundle {
        self.bundle.clone()
    }
}
