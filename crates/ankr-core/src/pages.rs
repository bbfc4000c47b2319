//! Forward-only cursor over a paginated RPC method.
//!
//! A [`PageCursor`] owns the request value and threads the server's
//! continuation token into it after each page. Concurrent `next` callers are
//! serialized on the cursor's lock, so every page is delivered exactly once
//! and in order. A failed fetch leaves the stored token untouched: the
//! following `next` retries the same page.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::stream::{self, Stream};
use tokio::sync::Mutex;
use tracing::debug;

use crate::context::Context;
use crate::error::CoreError;
use crate::rpc::{Paginated, PaginatedRequest, RequestExecutor};

pub struct PageCursor<R: PaginatedRequest> {
    executor: Arc<RequestExecutor>,
    request: Mutex<R>,
    /// Set once, under the request lock, when the final page is returned.
    exhausted: AtomicBool,
}

impl<R: PaginatedRequest> PageCursor<R> {
    pub fn new(executor: Arc<RequestExecutor>, request: R) -> Self {
        Self {
            executor,
            request: Mutex::new(request),
            exhausted: AtomicBool::new(false),
        }
    }

    /// Whether another page may be fetched. Never blocks on an in-flight
    /// `next`.
    pub fn has_next(&self) -> bool {
        !self.exhausted.load(Ordering::Acquire)
    }

    /// Fetch the next page.
    ///
    /// Calling this after the final page is a caller bug and yields
    /// [`CoreError::PagesExhausted`] without touching the network.
    pub async fn next(&self, ctx: &Context) -> Result<R::Response, CoreError> {
        let mut request = ctx.run(self.request.lock()).await?;
        if self.exhausted.load(Ordering::Acquire) {
            return Err(CoreError::PagesExhausted { method: R::METHOD });
        }

        let page = self.executor.call(ctx, &*request).await?;
        let next_token = page
            .next_page_token()
            .filter(|token| !token.is_empty())
            .map(str::to_owned);

        match next_token {
            Some(token) => {
                debug!(rpc.method = R::METHOD, page_token = %token, "more pages");
                request.set_page_token(token);
            }
            None => {
                debug!(rpc.method = R::METHOD, "final page");
                self.exhausted.store(true, Ordering::Release);
            }
        }
        Ok(page)
    }

    /// Snapshot of the request that the next `next` call will send.
    pub async fn request(&self) -> R {
        self.request.lock().await.clone()
    }

    /// Adapt the cursor into a stream of pages.
    ///
    /// The stream ends after the final page, or right after yielding the
    /// first error. The cursor state is not lost on error: the page can be
    /// retried by calling [`PageCursor::next`] on a cursor kept elsewhere.
    pub fn into_stream(
        self: Arc<Self>,
        ctx: Context,
    ) -> impl Stream<Item = Result<R::Response, CoreError>> + Send {
        stream::unfold(Some((self, ctx)), |state| async move {
            let (cursor, ctx) = state?;
            if !cursor.has_next() {
                return None;
            }
            match cursor.next(&ctx).await {
                Ok(page) => Some((Ok(page), Some((cursor, ctx)))),
                Err(err) => Some((Err(err), None)),
            }
        })
    }
}
