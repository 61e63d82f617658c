use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::StatusCode,
    Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;

use crate::middleware::request_id::RequestId;

/// Logs failed requests by status class.
///
/// Server errors carry the underlying error; 404s are logged at debug so that
/// probing for hidden reports does not flood the logs.
pub struct ErrorLogger;

impl<S, B> Transform<S, ServiceRequest> for ErrorLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = ErrorLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorLoggerMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct ErrorLoggerMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for ErrorLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let path = req.path().to_string();
        let request_id = request_id_of(&req);

        Box::pin(async move {
            let result = service.call(req).await;

            match &result {
                Ok(res) => {
                    if let Some(err) = res.response().error() {
                        log_error(&request_id, &path, res.status(), &err.to_string());
                    }
                }
                Err(err) => {
                    log_error(
                        &request_id,
                        &path,
                        err.as_response_error().status_code(),
                        &err.to_string(),
                    );
                }
            }

            result
        })
    }
}

/// Correlation id set by `RequestIdentifier`, or "-" when it did not run
pub fn request_id_of(req: &ServiceRequest) -> String {
    req.extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_else(|| "-".to_string())
}

/// Log one failed request at a level matching its status
pub fn log_error(request_id: &str, path: &str, status: StatusCode, message: &str) {
    if status.is_server_error() {
        tracing::error!(
            request_id = %request_id,
            path = %path,
            status = status.as_u16(),
            error = %message,
            "Request failed"
        );
    } else if status == StatusCode::NOT_FOUND {
        tracing::debug!(request_id = %request_id, path = %path, "Request resolved to not found");
    } else if status.is_client_error() {
        tracing::warn!(
            request_id = %request_id,
            path = %path,
            status = status.as_u16(),
            error = %message,
            "Request rejected"
        );
    }
}
