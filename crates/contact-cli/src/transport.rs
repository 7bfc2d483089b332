use contact_flow::{Acknowledgement, SubmissionPayload, Submitter, TransportError};
use reqwest::blocking::Client;

/// Relay used when neither `--relay-url` nor `PARFUMIS_RELAY_URL` is given.
pub const DEFAULT_RELAY_URL: &str = "http://localhost:8888";

/// Posts submissions to a running relay.
pub struct HttpSubmitter {
    client: Client,
    base_url: String,
}

impl HttpSubmitter {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        }
    }
}

impl Submitter for HttpSubmitter {
    fn submit(
        &self,
        endpoint: &str,
        payload: &SubmissionPayload,
    ) -> Result<Acknowledgement, TransportError> {
        let url = self.url(endpoint);
        tracing::debug!(%url, "posting submission");

        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .map_err(|err| TransportError::Network(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|err| TransportError::Network(err.to_string()))?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|err| TransportError::Decode(err.to_string()))
    }
}

/// Prints the submission instead of sending it.
pub struct DryRunSubmitter;

impl Submitter for DryRunSubmitter {
    fn submit(
        &self,
        endpoint: &str,
        payload: &SubmissionPayload,
    ) -> Result<Acknowledgement, TransportError> {
        let pretty = serde_json::to_string_pretty(payload)
            .map_err(|err| TransportError::Decode(err.to_string()))?;
        println!("POST {}", endpoint);
        println!("{}", pretty);
        Ok(Acknowledgement::sent("Dry run: submission not sent."))
    }
}

/// Submitter chosen on the command line.
pub enum CliSubmitter {
    Http(HttpSubmitter),
    DryRun(DryRunSubmitter),
}

impl Submitter for CliSubmitter {
    fn submit(
        &self,
        endpoint: &str,
        payload: &SubmissionPayload,
    ) -> Result<Acknowledgement, TransportError> {
        match self {
            CliSubmitter::Http(submitter) => submitter.submit(endpoint, payload),
            CliSubmitter::DryRun(submitter) => submitter.submit(endpoint, payload),
        }
    }
}
