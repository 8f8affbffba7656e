use std::pin::Pin;
use std::sync::Arc;

use askbar_model::{ModelProvider, ModelProviderError, ModelReply, ModelRequest};
use tracing::Instrument;

type SendRequestResult = Result<ModelReply, Box<dyn ModelProviderError>>;
type BoxedSendRequestFuture =
    Pin<Box<dyn Future<Output = SendRequestResult> + Send>>;
type HandlerFn = Arc<dyn Fn(ModelRequest) -> BoxedSendRequestFuture + Send + Sync>;

/// A wrapper around a model provider that provides a type-erased
/// interface for the other modules.
#[derive(Clone)]
pub(crate) struct ModelClient {
    handler_fn: HandlerFn,
}

impl ModelClient {
    #[inline]
    pub(crate) fn new<P: ModelProvider + 'static>(provider: P) -> Self {
        // We have to erase the type `P`, since the conversation client
        // doesn't have a generic parameter and we don't want it either.
        let handler_fn: HandlerFn = Arc::new(move |req| {
            let span = trace_span!("model client req", model = %req.model);
            trace!(parent: &span, "got a request: {req:?}");
            let fut = provider.send_request(&req);
            Box::pin(
                async move {
                    match fut.await {
                        Ok(reply) => {
                            trace!("finished a request");
                            Ok(reply)
                        }
                        Err(err) => {
                            error!("got an error: {err:?}");
                            Err(Box::new(err) as Box<dyn ModelProviderError>)
                        }
                    }
                }
                .instrument(span),
            )
        });
        Self { handler_fn }
    }

    /// Sends a request and returns the reply.
    ///
    /// # Cancel safety
    ///
    /// This method is cancel safe. Dropping the future drops the request.
    #[inline]
    pub(crate) async fn send_request(
        &self,
        req: ModelRequest,
    ) -> SendRequestResult {
        (self.handler_fn)(req).await
    }
}
