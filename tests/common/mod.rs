use chatdesk::configuration::{get_configuration, DatabaseSettings, Settings};
use chatdesk::connectors::{OpenAiConfig, StorageConfig};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Connection, Executor, PgConnection, PgPool};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_TOKEN: &str = "test-token";
pub const TEST_USER_ID: &str = "test_user_id";

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
    pub auth_server: MockServer,
    pub openai_server: MockServer,
    pub storage_server: MockServer,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Client that does not follow redirects, so 303s can be asserted.
    pub fn client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap()
    }
}

async fn mock_auth_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .and(header("authorization", format!("Bearer {}", TEST_TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": TEST_USER_ID,
            "email": "test@example.com",
            "role": "authenticated"
        })))
        .mount(&server)
        .await;
    // any other token is rejected
    Mock::given(method("GET"))
        .and(path("/auth/v1/user"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    server
}

async fn test_configuration() -> (Settings, MockServer, MockServer, MockServer) {
    let mut configuration = get_configuration().expect("Failed to get configuration");

    let auth_server = mock_auth_server().await;
    let openai_server = MockServer::start().await;
    let storage_server = MockServer::start().await;

    configuration.auth.url = auth_server.uri();
    configuration.auth.cache_ttl_secs = 0;
    configuration.connectors.openai = Some(OpenAiConfig {
        base_url: openai_server.uri(),
        timeout_secs: 5,
        api_key: None,
    });
    configuration.connectors.storage = Some(StorageConfig {
        base_url: storage_server.uri(),
        avatar_bucket: "assistant_avatars".to_string(),
        timeout_secs: 5,
        api_key: None,
    });

    (configuration, auth_server, openai_server, storage_server)
}

async fn start(configuration: Settings, db_pool: PgPool, servers: (MockServer, MockServer, MockServer)) -> TestApp {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let server = chatdesk::startup::run(listener, db_pool.clone(), configuration)
        .await
        .expect("Failed to bind address.");
    let _ = tokio::spawn(server);

    let (auth_server, openai_server, storage_server) = servers;
    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        db_pool,
        auth_server,
        openai_server,
        storage_server,
    }
}

/// App backed by a lazy pool; for routes that never touch the database.
pub async fn spawn_app() -> TestApp {
    let (configuration, auth, openai, storage) = test_configuration().await;
    let db_pool = PgPoolOptions::new()
        .connect_lazy(&configuration.database.connection_string())
        .expect("Failed to create lazy pool");
    start(configuration, db_pool, (auth, openai, storage)).await
}

/// App with a fresh migrated database; `None` when Postgres is unreachable.
pub async fn spawn_app_with_db() -> Option<TestApp> {
    let (mut configuration, auth, openai, storage) = test_configuration().await;
    configuration.database.database_name = uuid::Uuid::new_v4().to_string();

    let db_pool = match configure_database(&configuration.database).await {
        Ok(pool) => pool,
        Err(err) => {
            eprintln!("Skipping tests: failed to connect to postgres: {}", err);
            return None;
        }
    };

    Some(start(configuration, db_pool, (auth, openai, storage)).await)
}

pub async fn configure_database(config: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    let mut connection = PgConnection::connect(&config.connection_string_without_db()).await?;

    connection
        .execute(format!(r#"CREATE DATABASE "{}""#, config.database_name).as_str())
        .await?;

    let connection_pool = PgPool::connect(&config.connection_string()).await?;

    sqlx::migrate!("./migrations").run(&connection_pool).await?;

    Ok(connection_pool)
}
