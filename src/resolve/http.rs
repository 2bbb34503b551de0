// hcs-logs - HTTP provisioning client
//
// Service accounts and HMAC access keys are managed through the CDN API:
//   GET/POST {base}/api/v1/accounts/{account}/gcs/accounts
//   GET/POST {base}/api/v1/accounts/{account}/gcs/accounts/{id}/hmacKeys
// Requests carry a bearer token. Token scopes use their token as is; basic
// scopes exchange username and password for a token once, on the first
// request, via POST {base}/auth/token (password grant). Nothing is retried;
// the first failure is returned.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;

use crate::store::{AuthType, Credential};

use super::provisioner::{AccessKey, NewAccessKey, Provisioner, ServiceAccount};
use super::ProvisionError;

/// Default CDN API endpoint.
pub const DEFAULT_API_BASE: &str = "https://striketracker.highwinds.com";

const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Login used to obtain the bearer token for API requests.
#[derive(Clone)]
pub enum ApiAuth {
    Bearer(String),
    Basic { username: String, password: String },
}

impl ApiAuth {
    /// Authentication matching the scope's auth type.
    pub fn from_credential(credential: &Credential) -> Self {
        match credential.auth_type {
            AuthType::Token => ApiAuth::Bearer(credential.token.clone()),
            AuthType::Basic => ApiAuth::Basic {
                username: credential.username.clone(),
                password: credential.password.clone(),
            },
        }
    }
}

#[derive(Deserialize)]
struct TokenGrant {
    access_token: String,
}

#[derive(Deserialize)]
struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    list: Vec<T>,
}

#[derive(Serialize)]
struct NewServiceAccount<'a> {
    name: &'a str,
    description: &'a str,
}

/// `Provisioner` backed by the CDN REST API.
pub struct HttpProvisioner {
    client: Client,
    base_url: String,
    auth: ApiAuth,
    exchanged: OnceCell<String>,
}

impl HttpProvisioner {
    pub fn new(base_url: impl Into<String>, auth: ApiAuth) -> Result<Self, ProvisionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth,
            exchanged: OnceCell::new(),
        })
    }

    fn token_url(&self) -> String {
        format!("{}/auth/token", self.base_url)
    }

    fn service_accounts_url(&self, account_hash: &str) -> String {
        format!("{}/api/v1/accounts/{}/gcs/accounts", self.base_url, account_hash)
    }

    fn access_keys_url(&self, account_hash: &str, service_account_id: &str) -> String {
        format!(
            "{}/{}/hmacKeys",
            self.service_accounts_url(account_hash),
            service_account_id
        )
    }

    /// Bearer token for API calls, exchanging a basic login at most once.
    async fn bearer(&self) -> Result<&str, ProvisionError> {
        match &self.auth {
            ApiAuth::Bearer(token) => Ok(token.as_str()),
            ApiAuth::Basic { username, password } => self
                .exchanged
                .get_or_try_init(|| self.exchange(username, password))
                .await
                .map(String::as_str),
        }
    }

    async fn exchange(&self, username: &str, password: &str) -> Result<String, ProvisionError> {
        let form = [
            ("grant_type", "password"),
            ("username", username),
            ("password", password),
        ];
        let response = self.client.post(self.token_url()).form(&form).send().await?;
        let grant: TokenGrant = read_json(response).await?;
        tracing::debug!(username, "Exchanged login for API token");
        Ok(grant.access_token)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ProvisionError> {
        let token = self.bearer().await?;
        let response = request.bearer_auth(token).send().await?;
        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ProvisionError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProvisionError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.json::<T>().await?)
}

#[async_trait]
impl Provisioner for HttpProvisioner {
    async fn list_service_accounts(
        &self,
        account_hash: &str,
    ) -> Result<Vec<ServiceAccount>, ProvisionError> {
        let url = self.service_accounts_url(account_hash);
        let response: ListResponse<ServiceAccount> = self.send(self.client.get(url)).await?;
        Ok(response.list)
    }

    async fn create_service_account(
        &self,
        account_hash: &str,
        name: &str,
        description: &str,
    ) -> Result<ServiceAccount, ProvisionError> {
        let url = self.service_accounts_url(account_hash);
        let body = NewServiceAccount { name, description };
        self.send(self.client.post(url).json(&body)).await
    }

    async fn list_access_keys(
        &self,
        account_hash: &str,
        service_account_id: &str,
    ) -> Result<Vec<AccessKey>, ProvisionError> {
        let url = self.access_keys_url(account_hash, service_account_id);
        let response: ListResponse<AccessKey> = self.send(self.client.get(url)).await?;
        Ok(response.list)
    }

    async fn create_access_key(
        &self,
        account_hash: &str,
        service_account_id: &str,
    ) -> Result<NewAccessKey, ProvisionError> {
        let url = self.access_keys_url(account_hash, service_account_id);
        self.send(self.client.post(url)).await
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    /// Serve one canned JSON body per connection and record each request's
    /// request line and authorization header.
    async fn canned_api(bodies: Vec<&'static str>) -> (String, Arc<Mutex<Vec<String>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&seen);

        tokio::spawn(async move {
            for body in bodies {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut raw = Vec::new();
                let mut buf = [0u8; 4096];
                loop {
                    let n = socket.read(&mut buf).await.unwrap();
                    raw.extend_from_slice(&buf[..n]);
                    let text = String::from_utf8_lossy(&raw).to_string();
                    if let Some(end) = text.find("\r\n\r\n") {
                        let length = text
                            .lines()
                            .map(str::to_ascii_lowercase)
                            .find_map(|l| l.strip_prefix("content-length:").map(|v| v.trim().to_string()))
                            .and_then(|v| v.parse::<usize>().ok())
                            .unwrap_or(0);
                        if raw.len() >= end + 4 + length || n == 0 {
                            break;
                        }
                    }
                    if n == 0 {
                        break;
                    }
                }

                let text = String::from_utf8_lossy(&raw).to_string();
                let request_line = text.lines().next().unwrap_or_default().to_string();
                let auth = text
                    .lines()
                    .find(|l| l.to_ascii_lowercase().starts_with("authorization:"))
                    .map(|l| l["authorization:".len()..].trim().to_string())
                    .unwrap_or_default();
                log.lock().unwrap().push(format!("{} | {}", request_line, auth));

                let response = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    body.len(),
                    body
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                socket.shutdown().await.ok();
            }
        });

        (base, seen)
    }

    fn provisioner() -> HttpProvisioner {
        HttpProvisioner::new("https://api.example.com/", ApiAuth::Bearer("t".repeat(32))).unwrap()
    }

    #[test]
    fn test_urls_are_scoped_by_account() {
        let p = provisioner();
        assert_eq!(
            p.service_accounts_url("11112222"),
            "https://api.example.com/api/v1/accounts/11112222/gcs/accounts"
        );
        assert_eq!(
            p.access_keys_url("11112222", "sa-1"),
            "https://api.example.com/api/v1/accounts/11112222/gcs/accounts/sa-1/hmacKeys"
        );
    }

    #[test]
    fn test_auth_follows_scope_auth_type() {
        let token_scope = Credential {
            auth_type: AuthType::Token,
            token: "0123456789abcdef0123456789abcdef".to_string(),
            ..Credential::default()
        };
        assert!(matches!(ApiAuth::from_credential(&token_scope), ApiAuth::Bearer(ref t) if t.len() == 32));

        let basic_scope = Credential {
            username: "operator".to_string(),
            password: "pass123".to_string(),
            ..Credential::default()
        };
        assert!(matches!(
            ApiAuth::from_credential(&basic_scope),
            ApiAuth::Basic { ref username, .. } if username == "operator"
        ));
    }

    #[tokio::test]
    async fn test_basic_login_exchanged_for_token_once() {
        let (base, seen) = canned_api(vec![
            r#"{"access_token":"tok-1"}"#,
            r#"{"list":[{"id":"sa-1"}]}"#,
            r#"{"list":[]}"#,
        ])
        .await;
        let auth = ApiAuth::Basic {
            username: "operator".to_string(),
            password: "pass123".to_string(),
        };
        let p = HttpProvisioner::new(base, auth).unwrap();

        assert_eq!(p.list_service_accounts("11112222").await.unwrap().len(), 1);
        assert!(p.list_service_accounts("11112222").await.unwrap().is_empty());

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert!(seen[0].starts_with("POST /auth/token "));
        assert!(seen[1].starts_with("GET /api/v1/accounts/11112222/gcs/accounts "));
        assert!(seen[1].ends_with("| Bearer tok-1"));
        assert!(seen[2].ends_with("| Bearer tok-1"));
    }

    #[tokio::test]
    async fn test_token_scope_skips_exchange() {
        let (base, seen) = canned_api(vec![r#"{"list":[]}"#]).await;
        let p = HttpProvisioner::new(base, ApiAuth::Bearer("t".repeat(32))).unwrap();

        p.list_service_accounts("11112222").await.unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].starts_with("GET "));
        assert!(seen[0].ends_with(&format!("| Bearer {}", "t".repeat(32))));
    }

    #[test]
    fn test_list_response_parsing() {
        let parsed: ListResponse<AccessKey> =
            serde_json::from_str(r#"{"list":[{"accessId":"GOOG1A","state":"ACTIVE"},{"accessId":"GOOG1B"}]}"#)
                .unwrap();
        assert_eq!(parsed.list.len(), 2);
        assert_eq!(parsed.list[1].access_id, "GOOG1B");

        let empty: ListResponse<ServiceAccount> = serde_json::from_str("{}").unwrap();
        assert!(empty.list.is_empty());
    }

    #[test]
    fn test_new_access_key_parsing() {
        let key: NewAccessKey =
            serde_json::from_str(r#"{"accessId":"GOOG1NEW","secret":"s3cr3t"}"#).unwrap();
        assert_eq!(key.access_id, "GOOG1NEW");
        assert!(!format!("{:?}", key).contains("s3cr3t"));
    }
}
