//! Presentation collaborator that supplies titles and texts for push and SMS.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::{AppError, AppResult};
use crate::models::Recipient;

/// Rendered push content
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PushContent {
    pub title: String,
    pub content: String,
    pub deep_link: Option<String>,
    pub section: Option<String>,
}

/// Rendered SMS content
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SmsContent {
    pub topic: Option<String>,
    pub content: String,
}

#[async_trait]
pub trait ContentProvider: Send + Sync {
    async fn push_content(
        &self,
        recipient: &Recipient,
        method: &str,
        params: &[JsonValue],
    ) -> AppResult<PushContent>;

    async fn sms_content(
        &self,
        recipient: &Recipient,
        method: &str,
        params: &[JsonValue],
    ) -> AppResult<SmsContent>;
}

/// Text template of one content method
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContentTemplate {
    #[serde(default)]
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub deep_link: Option<String>,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
}

/// Renders [`ContentTemplate`]s loaded from settings.
///
/// `{0}`, `{1}`, ... are replaced by the positional parameters and
/// `{recipient_id}` by the recipient's id.
#[derive(Debug, Clone, Default)]
pub struct TemplateContentProvider {
    templates: HashMap<String, ContentTemplate>,
}

impl TemplateContentProvider {
    pub fn new(templates: HashMap<String, ContentTemplate>) -> Self {
        Self { templates }
    }

    fn template(&self, method: &str) -> AppResult<&ContentTemplate> {
        self.templates.get(method).ok_or_else(|| AppError::Configuration {
            key: format!("content.{}", method),
            reason: "no content template for this method".to_string(),
        })
    }
}

fn render(template: &str, recipient: &Recipient, params: &[JsonValue]) -> String {
    let mut rendered = template.replace("{recipient_id}", &recipient.id.to_string());
    for (index, param) in params.iter().enumerate() {
        let value = match param {
            JsonValue::String(s) => s.clone(),
            other => other.to_string(),
        };
        rendered = rendered.replace(&format!("{{{}}}", index), &value);
    }
    rendered
}

#[async_trait]
impl ContentProvider for TemplateContentProvider {
    async fn push_content(
        &self,
        recipient: &Recipient,
        method: &str,
        params: &[JsonValue],
    ) -> AppResult<PushContent> {
        let template = self.template(method)?;
        Ok(PushContent {
            title: render(&template.title, recipient, params),
            content: render(&template.body, recipient, params),
            deep_link: template
                .deep_link
                .as_deref()
                .map(|link| render(link, recipient, params)),
            section: template.section.clone(),
        })
    }

    async fn sms_content(
        &self,
        recipient: &Recipient,
        method: &str,
        params: &[JsonValue],
    ) -> AppResult<SmsContent> {
        let template = self.template(method)?;
        Ok(SmsContent {
            topic: template.topic.clone(),
            content: render(&template.body, recipient, params),
        })
    }
}
