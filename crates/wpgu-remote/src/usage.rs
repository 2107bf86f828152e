//! Usage reporting to the updater service
//!
//! The endpoint path embeds the updater token, so request URLs are never
//! logged and transport errors are stripped of their URL.

use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Serialize;
use wpgu_core::{UsageEvent, UsageReporter};

use crate::{Error, Result, client};

/// Build information attached to every report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageMeta {
    pub build: String,
    pub version: String,
    #[serde(rename = "configVersion")]
    pub config_version: String,
}

#[derive(Serialize)]
struct Payload<'a> {
    #[serde(flatten)]
    event: &'a UsageEvent,
    meta: &'a UsageMeta,
}

/// Posts [`UsageEvent`]s to `<api>/<token>/usage`.
pub struct HttpUsageReporter {
    client: Client,
    endpoint: String,
    meta: UsageMeta,
}

impl HttpUsageReporter {
    pub fn new(api_url: &str, token: &str, meta: UsageMeta) -> Result<Self> {
        Ok(Self {
            client: client::build()?,
            endpoint: format!("{}/{token}/usage", api_url.trim_end_matches('/')),
            meta,
        })
    }

    fn send(&self, event: &UsageEvent) -> Result<()> {
        let payload = Payload {
            event,
            meta: &self.meta,
        };
        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .map_err(reqwest::Error::without_url)?;

        // The service answers 201 and nothing else on success
        if response.status() != StatusCode::CREATED {
            return Err(Error::status(response));
        }
        Ok(())
    }
}

impl UsageReporter for HttpUsageReporter {
    fn report(&self, event: &UsageEvent) -> wpgu_core::Result<()> {
        tracing::debug!(kind = %event.kind, slug = %event.slug, "Reporting usage");
        self.send(event).map_err(|e| wpgu_core::Error::Usage {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn meta() -> UsageMeta {
        UsageMeta {
            build: "abc123".into(),
            version: "0.1.0".into(),
            config_version: "1.0".into(),
        }
    }

    #[test]
    fn payload_flattens_event_and_nests_meta() {
        let event = UsageEvent {
            provider: "github.com".into(),
            repository: "acme/site".into(),
            kind: "plugin".into(),
            slug: "akismet".into(),
        };
        let meta = meta();

        let json = serde_json::to_value(Payload {
            event: &event,
            meta: &meta,
        })
        .unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "provider": "github.com",
                "repository": "acme/site",
                "type": "plugin",
                "slug": "akismet",
                "meta": {"build": "abc123", "version": "0.1.0", "configVersion": "1.0"}
            })
        );
    }

    #[test]
    fn endpoint_embeds_token() {
        let reporter = HttpUsageReporter::new("https://api.wpgitupdater.dev/", "tok", meta()).unwrap();

        assert_eq!(reporter.endpoint, "https://api.wpgitupdater.dev/tok/usage");
    }
}
