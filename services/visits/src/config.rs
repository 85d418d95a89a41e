use std::time::Duration;

use serde::Deserialize;

use magicbank_core::config::Config;

use crate::domain::types::VisitSettings;
use crate::infra::mail::MailSettings;

fn default_port() -> u16 {
    8080
}

fn default_sender_name() -> String {
    "MagicBank".to_owned()
}

fn default_mail_timeout_secs() -> u64 {
    10
}

/// Visits service configuration loaded from environment variables.
#[derive(Debug, Deserialize)]
pub struct VisitsConfig {
    /// TCP port to listen on (default 8080). Env var: `PORT`.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Length of a guided visit in minutes. Env var: `VISIT_MINUTES`
    /// (`VISITA_MINUTOS` is still accepted).
    #[serde(alias = "visita_minutos")]
    pub visit_minutes: u32,
    /// Front-end URL where visitors enter their code. Env var: `FRONT_ACCESS_URL`.
    pub front_access_url: String,
    /// Returned on redemption; the front end redirects here when time is up.
    pub feedback_url: String,
    /// Mail relay endpoint. Env var: `MAIL_API_URL`.
    pub mail_api_url: String,
    pub mail_api_key: String,
    pub mail_sender_email: String,
    #[serde(default = "default_sender_name")]
    pub mail_sender_name: String,
    #[serde(default = "default_mail_timeout_secs")]
    pub mail_timeout_secs: u64,
    /// Expired-code sweep period in seconds; 0 leaves the sweeper off.
    #[serde(default)]
    pub sweep_interval_secs: u64,
}

impl Config for VisitsConfig {}

impl VisitsConfig {
    pub fn visit_settings(&self) -> anyhow::Result<VisitSettings> {
        anyhow::ensure!(
            self.visit_minutes > 0,
            "VISIT_MINUTES must be greater than zero"
        );
        Ok(VisitSettings {
            visit_duration: chrono::Duration::minutes(i64::from(self.visit_minutes)),
            access_url: self.front_access_url.clone(),
            feedback_url: self.feedback_url.clone(),
        })
    }

    pub fn mail_settings(&self) -> MailSettings {
        MailSettings {
            api_url: self.mail_api_url.clone(),
            api_key: self.mail_api_key.clone(),
            sender_email: self.mail_sender_email.clone(),
            sender_name: self.mail_sender_name.clone(),
            timeout: Duration::from_secs(self.mail_timeout_secs),
        }
    }

    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.sweep_interval_secs > 0).then(|| Duration::from_secs(self.sweep_interval_secs))
    }
}
