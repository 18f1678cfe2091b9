//! API client context for sharing a singleton client instance.

use crate::services::api::ApiClient;
use filedeck_core::ClientConfig;
use std::rc::Rc;

/// Shared API client context for UI services.
#[derive(Clone)]
pub(crate) struct ApiCtx {
    pub client: Rc<ApiClient>,
}

impl ApiCtx {
    pub(crate) fn new(config: ClientConfig) -> Self {
        Self {
            client: Rc::new(ApiClient::new(config)),
        }
    }
}

impl PartialEq for ApiCtx {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.client, &other.client)
    }
}
