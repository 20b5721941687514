use serde_json::json;

use crate::config::Config;
use crate::error::AppError;

/// 邮件投递交给外部 HTTP 转发服务，未配置时仅记录日志
#[derive(Clone)]
pub struct Mailer {
    http: reqwest::Client,
    api_url: Option<String>,
    api_key: Option<String>,
    from: String,
}

impl Mailer {
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            api_url: config.mail_api_url.clone(),
            api_key: config.mail_api_key.clone(),
            from: config.mail_from.clone(),
        }
    }

    pub async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AppError> {
        let Some(api_url) = &self.api_url else {
            tracing::warn!("MAIL_API_URL not set, skipping mail to {}", to);
            return Ok(());
        };

        let mut req = self.http.post(api_url).json(&json!({
            "from": self.from,
            "to": to,
            "subject": subject,
            "text": body,
        }));
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req.send().await?;
        if !resp.status().is_success() {
            tracing::error!("Mail relay returned {} for {}", resp.status(), to);
            return Err(AppError::Internal("Failed to send email".to_string()));
        }

        tracing::debug!("Sent mail to {}: {}", to, subject);
        Ok(())
    }
}
