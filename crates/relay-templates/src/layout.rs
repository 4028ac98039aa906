//! Branded HTML Email Shell
//!
//! Wraps rendered template HTML in a fixed table-free layout: gradient header,
//! content card and contact footer. The inner HTML is injected as-is; branding
//! values are escaped by the templates under `templates/`.

use askama::Template;
use chrono::{Datelike, Utc};

use crate::settings::Branding;

#[derive(Template)]
#[template(escape = "html", path = "shell.html")]
struct Shell<'a> {
    company: &'a str,
    primary: &'a str,
    accent: &'a str,
    address: &'a str,
    phone: &'a str,
    email: &'a str,
    logo_url: Option<&'a str>,
    year: i32,
    content: &'a str,
}

#[derive(Template)]
#[template(escape = "html", path = "call_to_action.html")]
struct CallToAction<'a> {
    url: &'a str,
    label: &'a str,
    primary: &'a str,
    accent: &'a str,
}

/// Wrap `inner_html` in the branded document
pub fn wrap(inner_html: &str, branding: &Branding) -> String {
    Shell {
        company: &branding.company_name,
        primary: &branding.primary_color,
        accent: &branding.accent_color,
        address: &branding.address,
        phone: &branding.phone,
        email: &branding.email,
        logo_url: branding.logo_url.as_deref(),
        year: Utc::now().year(),
        content: inner_html,
    }
    .to_string()
}

/// Centered button linking to `url`, styled with the brand color
pub fn call_to_action(url: &str, label: &str, branding: &Branding) -> String {
    CallToAction {
        url,
        label,
        primary: &branding.primary_color,
        accent: &branding.accent_color,
    }
    .to_string()
}
