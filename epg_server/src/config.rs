use std::env;

use epg_common::Secret;
use epg_payment_engine::sqlite::db::db_url;
use log::*;

const DEFAULT_EPG_HOST: &str = "127.0.0.1";
const DEFAULT_EPG_PORT: u16 = 3000;
const DEFAULT_GATEWAY_FORM_URL: &str = "https://rc-epay.esewa.com.np/api/epay/main/v2/form";
// The published eSewa UAT signing key. It is only a fallback for local development; production
// deployments must set EPG_SIGNING_SECRET.
const SANDBOX_SIGNING_SECRET: &str = "8gBm/:&EnhH.1/q";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Everything the payment flow needs to know about the external gateway.
    pub gateway: GatewayConfig,
}

#[derive(Clone, Debug)]
pub struct GatewayConfig {
    /// The gateway endpoint the payer's browser posts the signed form to.
    pub form_url: String,
    /// The secret shared with the gateway, used to sign requests and verify callbacks.
    pub signing_secret: Secret<String>,
    /// The public base URL of this server, used to build the success/failure callback URLs.
    pub callback_base_url: String,
}

impl GatewayConfig {
    pub fn success_url(&self) -> String {
        format!("{}/success", self.callback_base_url)
    }

    pub fn failure_url(&self) -> String {
        format!("{}/failure", self.callback_base_url)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_EPG_HOST.to_string(),
            port: DEFAULT_EPG_PORT,
            database_url: String::default(),
            gateway: GatewayConfig::default(),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            form_url: DEFAULT_GATEWAY_FORM_URL.to_string(),
            signing_secret: Secret::new(SANDBOX_SIGNING_SECRET.to_string()),
            callback_base_url: format!("http://localhost:{DEFAULT_EPG_PORT}"),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("EPG_HOST").ok().unwrap_or_else(|| DEFAULT_EPG_HOST.into());
        let port = env::var("EPG_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for EPG_PORT. {e} Using the default, {DEFAULT_EPG_PORT}, instead."
                    );
                    DEFAULT_EPG_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_EPG_PORT);
        let database_url = db_url();
        let gateway = GatewayConfig::from_env_or_defaults(port);
        Self { host, port, database_url, gateway }
    }
}

impl GatewayConfig {
    pub fn from_env_or_defaults(port: u16) -> Self {
        let form_url = env::var("EPG_GATEWAY_FORM_URL").ok().unwrap_or_else(|| {
            info!("🪛️ EPG_GATEWAY_FORM_URL is not set. Using the eSewa sandbox endpoint.");
            DEFAULT_GATEWAY_FORM_URL.to_string()
        });
        let signing_secret = env::var("EPG_SIGNING_SECRET").ok().unwrap_or_else(|| {
            warn!(
                "🚨️ EPG_SIGNING_SECRET is not set. Falling back to the eSewa sandbox key. DO NOT run a production \
                 instance like this — callbacks signed with the sandbox key would be accepted as genuine. 🚨️"
            );
            SANDBOX_SIGNING_SECRET.to_string()
        });
        let callback_base_url = env::var("EPG_CALLBACK_BASE_URL").ok().unwrap_or_else(|| {
            let url = format!("http://localhost:{port}");
            info!("🪛️ EPG_CALLBACK_BASE_URL is not set. Using {url}. The gateway must be able to reach this address.");
            url
        });
        Self { form_url, signing_secret: Secret::new(signing_secret), callback_base_url }
    }
}
