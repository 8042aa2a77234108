use std::sync::{Arc, OnceLock};
use std::time::Duration;

use time_off_server::frameworks::config::ManagerSeed;
use time_off_server::interface_adapters::password::hash_password;
use time_off_server::Settings;

pub const MANAGER_PASSWORD: &str = "manager-pass-123";

// Base URL published once the shared test server is accepting connections.
static SERVER_URL: OnceLock<String> = OnceLock::new();
static SERVER_READY: OnceLock<()> = OnceLock::new();

pub fn manager_email(id: i64) -> String {
    format!("manager{id}@example.com")
}

fn test_settings() -> Settings {
    let password_hash = hash_password(MANAGER_PASSWORD).expect("hash test password");
    Settings {
        managers: [1, 2]
            .into_iter()
            .map(|id| ManagerSeed {
                id,
                name: format!("Manager {id}"),
                email: manager_email(id),
                password_hash: password_hash.clone(),
            })
            .collect(),
        ..Settings::default()
    }
}

// Start the in-memory server once per test binary and return its base URL.
pub fn ensure_server() -> &'static str {
    SERVER_READY.get_or_init(|| {
        let published_url = Arc::new(OnceLock::<String>::new());
        let published_url_thread = Arc::clone(&published_url);
        // The server gets its own runtime so it outlives each `#[tokio::test]` runtime.
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            runtime.block_on(async move {
                let settings = test_settings();
                let state = time_off_server::build_state(&settings)
                    .await
                    .expect("build test state");
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                let addr = listener.local_addr().expect("get local addr");
                let _ = published_url_thread.set(format!("http://{addr}"));
                time_off_server::run(listener, state, settings.sweep_interval())
                    .await
                    .expect("server failed");
            });
        });
        wait_for_server_url_and_readiness(published_url);
    });

    SERVER_URL
        .get()
        .expect("server url should be initialized")
        .as_str()
}

fn wait_for_server_url_and_readiness(published_url: Arc<OnceLock<String>>) {
    let base_url = loop {
        if let Some(url) = published_url.get() {
            break url.clone();
        }
        std::thread::sleep(Duration::from_millis(10));
    };

    let _ = SERVER_URL.set(base_url.clone());

    let addr = base_url
        .strip_prefix("http://")
        .expect("base url should use http://");

    for _ in 0..100 {
        if std::net::TcpStream::connect(addr).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    panic!("server did not become ready in time");
}
