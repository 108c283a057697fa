pub mod assistants;
pub mod conversations;
pub mod files;
pub mod health_checks;
pub mod messages;

pub use health_checks::*;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::configuration::{AuthSettings, DatabaseSettings, LimitSettings, Settings};
    use crate::models;
    use actix_web::HttpMessage;
    use std::sync::Arc;

    pub fn settings() -> Settings {
        Settings {
            database: DatabaseSettings {
                username: "postgres".to_string(),
                password: "postgres".to_string(),
                host: "localhost".to_string(),
                port: 5432,
                database_name: "chatdesk".to_string(),
            },
            app_port: 0,
            app_host: "127.0.0.1".to_string(),
            auth: AuthSettings {
                url: "http://auth.test".to_string(),
                anon_key: None,
                cookie_name: "access_token".to_string(),
                cache_ttl_secs: 60,
            },
            connectors: Default::default(),
            limits: LimitSettings::default(),
            default_model: "test-model".to_string(),
        }
    }

    /// Marks the request as authenticated, as the middleware would.
    pub fn login(req: &impl HttpMessage) {
        req.extensions_mut().insert(Arc::new(models::User {
            id: "user-1".to_string(),
            access_token: Some("token-1".to_string()),
            ..Default::default()
        }));
    }
}
