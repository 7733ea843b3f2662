use eventmi_system_tests::config::SystemTestConfig;
use reqwest::{Client, Response};

/// HTTP client for the server under test
///
/// Redirects are followed (so a successful form submission results in the 200 response of the
/// page redirected to) and cookies are kept between the requests of one client.
pub struct EventmiClient {
    client: Client,
    config: SystemTestConfig,
}

impl EventmiClient {
    pub fn new(config: SystemTestConfig) -> Self {
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .expect("Could not create HTTP client");
        Self { client, config }
    }

    pub async fn get(&self, path: &str) -> Response {
        let url = self.config.url(path).expect("Invalid request URL");
        self.client
            .get(url.clone())
            .send()
            .await
            .unwrap_or_else(|e| panic!("GET {} failed: {}", url, e))
    }

    /// Send an `application/x-www-form-urlencoded` POST request with the given fields
    pub async fn post_form(&self, path: &str, fields: &[(&str, String)]) -> Response {
        let url = self.config.url(path).expect("Invalid request URL");
        self.client
            .post(url.clone())
            .form(fields)
            .send()
            .await
            .unwrap_or_else(|e| panic!("POST {} failed: {}", url, e))
    }
}
