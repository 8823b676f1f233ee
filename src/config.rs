//! Configuration management for the listening history visualizer.
//!
//! Values are resolved in the following order:
//! 1. Command-line flags (credentials only)
//! 2. Environment variables, optionally loaded from a `.env` file in the
//!    local data directory
//! 3. Flat files in the working directory (credentials) or built-in
//!    defaults (endpoints)

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::types::Credentials;

pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_API_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

pub const CLIENT_ID_FILE: &str = "client_id";
pub const CLIENT_SECRET_FILE: &str = "client_secret";

/// Loads environment variables from `sporlviz/.env` in the local data directory.
///
/// The file is optional. Its location is platform specific:
/// - Linux: `~/.local/share/sporlviz/.env`
/// - macOS: `~/Library/Application Support/sporlviz/.env`
/// - Windows: `%LOCALAPPDATA%/sporlviz/.env`
///
/// # Errors
///
/// Returns an error string if the file exists but cannot be parsed.
pub fn load_env() -> Result<(), String> {
    let path = env_path();
    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path)
        .map(|_| ())
        .map_err(|e| format!("{}: {}", path.display(), e))
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("sporlviz/.env");
    path
}

/// Returns the Spotify Web API base URL.
///
/// Reads `SPOTIFY_API_URL`, falling back to `https://api.spotify.com/v1`.
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Returns the Spotify OAuth token exchange URL.
///
/// Reads `SPOTIFY_API_TOKEN_URL`, falling back to
/// `https://accounts.spotify.com/api/token`.
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL").unwrap_or_else(|_| DEFAULT_API_TOKEN_URL.to_string())
}

/// Resolves the client credentials used for the token exchange.
///
/// Each value comes from the flag if given, then from
/// `SPOTIFY_API_AUTH_CLIENT_ID` / `SPOTIFY_API_AUTH_CLIENT_SECRET`, and
/// finally from `./client_id` / `./client_secret`.
///
/// # Errors
///
/// Returns an error string when neither source yields a value.
pub fn resolve_credentials(
    client_id: Option<String>,
    client_secret: Option<String>,
) -> Result<Credentials, String> {
    resolve_credentials_in(client_id, client_secret, |var| env::var(var).ok(), Path::new("."))
}

/// Same as [`resolve_credentials`] with the environment lookup and the
/// directory holding the credential files supplied by the caller.
pub fn resolve_credentials_in<E>(
    client_id: Option<String>,
    client_secret: Option<String>,
    env_lookup: E,
    dir: &Path,
) -> Result<Credentials, String>
where
    E: Fn(&str) -> Option<String>,
{
    let client_id = resolve_value(
        client_id,
        env_lookup("SPOTIFY_API_AUTH_CLIENT_ID"),
        &dir.join(CLIENT_ID_FILE),
    )?;
    let client_secret = resolve_value(
        client_secret,
        env_lookup("SPOTIFY_API_AUTH_CLIENT_SECRET"),
        &dir.join(CLIENT_SECRET_FILE),
    )?;

    Ok(Credentials {
        client_id,
        client_secret,
    })
}

fn resolve_value(flag: Option<String>, var: Option<String>, file: &Path) -> Result<String, String> {
    if let Some(value) = flag.filter(|v| !v.is_empty()) {
        return Ok(value);
    }

    if let Some(value) = var.filter(|v| !v.is_empty()) {
        return Ok(value);
    }

    read_credential_file(file)
}

/// Reads a single credential from a flat file, trimming surrounding whitespace.
pub fn read_credential_file(path: &Path) -> Result<String, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Cannot read {}: {}", path.display(), e))?;
    let value = content.trim();
    if value.is_empty() {
        return Err(format!("{} is empty", path.display()));
    }
    Ok(value.to_string())
}
