use std::time::Duration;

use serde::Serialize;

use crate::domain::repository::Notifier;
use crate::domain::types::VisitNotification;
use crate::error::NotifyError;

pub const VISIT_EMAIL_SUBJECT: &str = "Acceso a Visita Guiada MagicBank";

/// Connection details for the transactional mail relay.
#[derive(Debug, Clone)]
pub struct MailSettings {
    pub api_url: String,
    pub api_key: String,
    pub sender_email: String,
    pub sender_name: String,
    pub timeout: Duration,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MailAddress<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendMailBody<'a> {
    sender: MailAddress<'a>,
    to: Vec<MailAddress<'a>>,
    subject: &'a str,
    html_content: String,
}

/// Notifier that posts the visit email to an HTTP mail relay.
#[derive(Clone)]
pub struct HttpMailNotifier {
    client: reqwest::Client,
    settings: MailSettings,
}

impl HttpMailNotifier {
    /// Every send is bounded by `settings.timeout`.
    pub fn new(settings: MailSettings) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()?;
        Ok(Self { client, settings })
    }
}

impl Notifier for HttpMailNotifier {
    async fn send(
        &self,
        recipient_email: &str,
        notification: &VisitNotification,
    ) -> Result<(), NotifyError> {
        let body = SendMailBody {
            sender: MailAddress {
                email: &self.settings.sender_email,
                name: Some(self.settings.sender_name.as_str()),
            },
            to: vec![MailAddress {
                email: recipient_email,
                name: Some(notification.name.as_str()),
            }],
            subject: VISIT_EMAIL_SUBJECT,
            html_content: render_visit_email(notification),
        };

        let resp = self
            .client
            .post(&self.settings.api_url)
            .header("api-key", &self.settings.api_key)
            .header("accept", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        let body = resp.text().await.unwrap_or_default();
        Err(NotifyError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

/// HTML body of the access email.
pub fn render_visit_email(n: &VisitNotification) -> String {
    let name = escape_html(&n.name);
    let url = escape_html(&n.access_url);
    format!(
        r#"<p>Hola <strong>{name}</strong>,</p>
<p>Has solicitado una <strong>visita guiada temporal</strong> a MagicBank.</p>
<p><strong>Clave de acceso:</strong> {code}</p>
<p>Accede aquí:<br><a href="{url}">{url}</a></p>
<p>La visita tiene una duración de <strong>{minutes} minutos</strong>. Al finalizar, serás redirigido automáticamente.</p>
<p>Gracias por tu interés en MagicBank.</p>
"#,
        code = n.code,
        minutes = n.duration_minutes,
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
