use serde::Deserialize;

/// Query parameters of the gateway's success redirect. The payload arrives base64-encoded in `data`.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackParams {
    pub data: Option<String>,
}
