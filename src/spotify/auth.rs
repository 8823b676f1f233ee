use reqwest::{Client, header::CONTENT_TYPE};

use crate::{
    spotify::LookupError,
    types::{AccessToken, Credentials},
};

/// Exchanges client credentials for a bearer token.
///
/// Performs a single `client_credentials` grant against `token_url` with a
/// form-encoded body. The token is requested once per run; no refresh is
/// attempted.
///
/// # Errors
///
/// - `LookupError::Http` on network failures
/// - `LookupError::Status` if the token endpoint rejects the credentials
/// - `LookupError::Malformed` if the response is not a token document
pub async fn request_access_token(
    client: &Client,
    token_url: &str,
    credentials: &Credentials,
) -> Result<AccessToken, LookupError> {
    let response = client
        .post(token_url)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .form(&[
            ("grant_type", "client_credentials"),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
        ])
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(LookupError::Status { status, body });
    }

    parse_access_token(&body)
}

pub fn parse_access_token(body: &str) -> Result<AccessToken, LookupError> {
    serde_json::from_str(body).map_err(|source| LookupError::Malformed {
        context: "token response".to_string(),
        source,
    })
}
