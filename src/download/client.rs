// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::download::options::DEFAULT_TIMEOUT;
use crate::error::Result;
use crate::user_agent;
use attohttpc::{Response, Session};
use std::io::{self, Read};
use std::time::Duration;

pub trait HttpClient: Send + Sync {
    fn get(&self, url: &str) -> Result<Box<dyn HttpResponse>>;
}

pub trait HttpResponse: Read + Send {
    fn status(&self) -> u16;

    fn header(&self, name: &str) -> Option<&str>;

    fn final_url(&self) -> Option<&str>;
}

/// Transport settings handed to the HTTP client.
///
/// Certificate verification is on unless explicitly turned off for hosts
/// with an outdated or missing root certificate store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    pub verify_certificates: bool,
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            verify_certificates: true,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

pub struct AttohttpcClient {
    transport: TransportConfig,
    user_agent: String,
}

impl AttohttpcClient {
    pub fn new(transport: TransportConfig) -> Self {
        if !transport.verify_certificates {
            log::warn!("TLS certificate verification is disabled for downloads");
        }
        Self {
            transport,
            user_agent: user_agent::download_client(),
        }
    }

    pub fn transport(&self) -> &TransportConfig {
        &self.transport
    }
}

impl Default for AttohttpcClient {
    fn default() -> Self {
        Self::new(TransportConfig::default())
    }
}

impl HttpClient for AttohttpcClient {
    fn get(&self, url: &str) -> Result<Box<dyn HttpResponse>> {
        // Create a new session for each request
        let mut session = Session::new();
        session.proxy_settings(attohttpc::ProxySettings::from_env());

        let response = session
            .get(url)
            .timeout(self.transport.timeout)
            .header("User-Agent", &self.user_agent)
            .danger_accept_invalid_certs(!self.transport.verify_certificates)
            .follow_redirects(true)
            .send()?;

        Ok(Box::new(AttohttpcResponse { response }))
    }
}

struct AttohttpcResponse {
    response: Response,
}

impl Read for AttohttpcResponse {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.response.read(buf)
    }
}

impl HttpResponse for AttohttpcResponse {
    fn status(&self) -> u16 {
        self.response.status().as_u16()
    }

    fn header(&self, name: &str) -> Option<&str> {
        self.response.headers().get(name)?.to_str().ok()
    }

    fn final_url(&self) -> Option<&str> {
        Some(self.response.url().as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_defaults_verify_certificates() {
        let transport = TransportConfig::default();
        assert!(transport.verify_certificates);
        assert_eq!(transport.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_client_keeps_transport() {
        let client = AttohttpcClient::new(TransportConfig {
            verify_certificates: false,
            timeout: Duration::from_secs(5),
        });
        assert!(!client.transport().verify_certificates);
        assert_eq!(client.transport().timeout, Duration::from_secs(5));
    }
}
