//! Dispatcher port — deliver a command to member lights.

use std::future::Future;
use std::sync::Arc;

use lightgroup_domain::error::LightGroupError;
use lightgroup_domain::service::ServiceCall;

/// Sends one [`ServiceCall`] to the host.
///
/// When `call.blocking` is set the returned future resolves only once the
/// command has completed. Failures are returned as-is.
pub trait ServiceDispatcher: Send + Sync {
    fn dispatch(&self, call: ServiceCall)
    -> impl Future<Output = Result<(), LightGroupError>> + Send;
}

impl<T: ServiceDispatcher> ServiceDispatcher for Arc<T> {
    fn dispatch(
        &self,
        call: ServiceCall,
    ) -> impl Future<Output = Result<(), LightGroupError>> + Send {
        (**self).dispatch(call)
    }
}
