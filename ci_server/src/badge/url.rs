//! Badge URL rendering from the configured template.

use axum::http::HeaderValue;
use thiserror::Error;

use super::aggregate::BadgeStatus;

pub const STATUS_PLACEHOLDER: &str = "{{status}}";
pub const COLOR_PLACEHOLDER: &str = "{{color}}";

/// Shields.io build badge.
pub const SHIELDS_TEMPLATE: &str = "https://img.shields.io/badge/build-{{status}}-{{color}}.svg";
const SHIELDS_DEFAULT_URL: &str = "https://img.shields.io/badge/build--lightgrey.svg";

/// Literal placeholder substitution. Label and color are inserted as-is.
pub fn render_badge_url(template: &str, label: &str, color: &str) -> String {
    template
        .replace(STATUS_PLACEHOLDER, label)
        .replace(COLOR_PLACEHOLDER, color)
}

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("badge template is missing the {0} placeholder")]
    MissingPlaceholder(&'static str),

    #[error("badge template does not render to a valid Location header: {0}")]
    InvalidHeader(String),
}

/// A badge template checked once at startup.
#[derive(Debug, Clone)]
pub struct BadgeTemplate {
    template: String,
    fallback: HeaderValue,
}

impl BadgeTemplate {
    pub fn parse(template: impl Into<String>) -> Result<Self, TemplateError> {
        let template = template.into();
        for placeholder in [STATUS_PLACEHOLDER, COLOR_PLACEHOLDER] {
            if !template.contains(placeholder) {
                return Err(TemplateError::MissingPlaceholder(placeholder));
            }
        }

        let default = BadgeStatus::default();
        let rendered = render_badge_url(&template, &default.label, &default.color);
        let fallback = HeaderValue::from_str(&rendered)
            .map_err(|_| TemplateError::InvalidHeader(rendered.clone()))?;

        Ok(Self { template, fallback })
    }

    pub fn shields_io() -> Self {
        Self {
            template: SHIELDS_TEMPLATE.to_string(),
            fallback: HeaderValue::from_static(SHIELDS_DEFAULT_URL),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }

    pub fn render(&self, status: &BadgeStatus) -> String {
        render_badge_url(&self.template, &status.label, &status.color)
    }

    /// `Location` value for `status`, or the default badge when the rendered
    /// URL is not a valid header value.
    pub fn location(&self, status: &BadgeStatus) -> HeaderValue {
        let url = self.render(status);
        match HeaderValue::from_str(&url) {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(%url, "Rendered badge URL is not a valid header, using default");
                self.fallback.clone()
            }
        }
    }

    pub fn default_location(&self) -> HeaderValue {
        self.fallback.clone()
    }
}
