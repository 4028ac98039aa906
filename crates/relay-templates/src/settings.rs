//! Company Branding Settings
//!
//! The front-end sends [`CompanySettings`] with every field optional.
//! [`CompanySettings::resolve`] is the one place defaults are applied.

use serde::{Deserialize, Serialize};

use crate::merge::MergeData;

/// Default header gradient start
pub const DEFAULT_PRIMARY_COLOR: &str = "#2563eb";

/// Default header gradient end
pub const DEFAULT_ACCENT_COLOR: &str = "#7c3aed";

/// Branding as sent by the caller
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySettings {
    #[serde(default)]
    pub company_name: Option<String>,

    #[serde(default)]
    pub owner_name: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub address: Option<String>,

    #[serde(default)]
    pub logo_url: Option<String>,

    #[serde(default)]
    pub primary_color: Option<String>,

    #[serde(default)]
    pub accent_color: Option<String>,
}

/// Fully populated branding
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Branding {
    pub company_name: String,
    pub owner_name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    /// Only rendered when present
    pub logo_url: Option<String>,
    pub primary_color: String,
    pub accent_color: String,
}

impl CompanySettings {
    /// Fill every missing or blank field with its default
    pub fn resolve(&self) -> Branding {
        fn text(value: Option<&String>) -> String {
            non_blank(value).unwrap_or_default()
        }

        Branding {
            company_name: text(self.company_name.as_ref()),
            owner_name: text(self.owner_name.as_ref()),
            phone: text(self.phone.as_ref()),
            email: text(self.email.as_ref()),
            address: text(self.address.as_ref()),
            logo_url: non_blank(self.logo_url.as_ref()),
            primary_color: non_blank(self.primary_color.as_ref())
                .unwrap_or_else(|| DEFAULT_PRIMARY_COLOR.into()),
            accent_color: non_blank(self.accent_color.as_ref())
                .unwrap_or_else(|| DEFAULT_ACCENT_COLOR.into()),
        }
    }
}

impl Default for Branding {
    fn default() -> Self {
        CompanySettings::default().resolve()
    }
}

impl Branding {
    /// Merge keys derived from branding, before caller overrides
    pub fn merge_defaults(&self, payment_link: Option<&str>) -> MergeData {
        let mut data = MergeData::new();
        data.insert("companyName", self.company_name.as_str());
        data.insert("ownerName", self.owner_name.as_str());
        data.insert("phone", self.phone.as_str());
        data.insert("email", self.email.as_str());
        if let Some(link) = payment_link {
            data.insert("paymentLink", link);
        }
        data
    }

    /// Display name for the From header, if the company has one
    pub fn sender_name(&self) -> Option<&str> {
        Some(self.company_name.as_str()).filter(|name| !name.is_empty())
    }

    /// Reply-To address, if the company has one
    pub fn reply_to(&self) -> Option<&str> {
        Some(self.email.as_str()).filter(|email| !email.is_empty())
    }
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_defaults() {
        let branding = CompanySettings::default().resolve();
        assert_eq!(branding.company_name, "");
        assert_eq!(branding.address, "");
        assert_eq!(branding.logo_url, None);
        assert_eq!(branding.primary_color, DEFAULT_PRIMARY_COLOR);
        assert_eq!(branding.accent_color, DEFAULT_ACCENT_COLOR);
    }

    #[test]
    fn test_fields_default_independently() {
        let settings: CompanySettings = serde_json::from_value(json!({
            "companyName": "Acme Plumbing",
            "accentColor": "#ff0000",
            "logoUrl": "   "
        }))
        .unwrap();
        let branding = settings.resolve();
        assert_eq!(branding.company_name, "Acme Plumbing");
        assert_eq!(branding.accent_color, "#ff0000");
        assert_eq!(branding.primary_color, DEFAULT_PRIMARY_COLOR);
        assert_eq!(branding.logo_url, None);
        assert_eq!(branding.phone, "");
    }

    #[test]
    fn test_merge_defaults() {
        let settings = CompanySettings {
            company_name: Some("Acme".into()),
            email: Some("hi@acme.test".into()),
            ..Default::default()
        };
        let data = settings.resolve().merge_defaults(Some("https://pay.test/x"));
        assert_eq!(data.get("companyName"), Some(&json!("Acme")));
        assert_eq!(data.get("email"), Some(&json!("hi@acme.test")));
        assert_eq!(data.get("paymentLink"), Some(&json!("https://pay.test/x")));
        assert!(!data.is_truthy("ownerName"));
    }

    #[test]
    fn test_sender_identity() {
        let branding = Branding::default();
        assert_eq!(branding.sender_name(), None);
        assert_eq!(branding.reply_to(), None);
    }
}
