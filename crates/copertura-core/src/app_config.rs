use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Lowest TLS protocol version the upstream transport will negotiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TlsMinVersion {
    Tls12,
    Tls13,
}

impl std::fmt::Display for TlsMinVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TlsMinVersion::Tls12 => write!(f, "1.2"),
            TlsMinVersion::Tls13 => write!(f, "1.3"),
        }
    }
}

/// Cipher suite policy for the upstream transport.
///
/// `Relaxed` offers every suite the crypto provider ships, TLS 1.2 suites
/// included. `Strict` offers TLS 1.3 suites only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherLevel {
    Relaxed,
    Strict,
}

impl std::fmt::Display for CipherLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CipherLevel::Relaxed => write!(f, "relaxed"),
            CipherLevel::Strict => write!(f, "strict"),
        }
    }
}

/// Basic-auth credentials for the coverage service.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &"[redacted]")
            .field("password", &"[redacted]")
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub credentials: Credentials,
    pub upstream_base_url: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub tls_min_version: TlsMinVersion,
    pub tls_ciphers: CipherLevel,
    pub prefixes_path: Option<PathBuf>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("credentials", &self.credentials)
            .field("upstream_base_url", &self.upstream_base_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("tls_min_version", &self.tls_min_version)
            .field("tls_ciphers", &self.tls_ciphers)
            .field("prefixes_path", &self.prefixes_path)
            .finish()
    }
}
