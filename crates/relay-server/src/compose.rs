//! Email Composition
//!
//! Request body → rendered, branded [`OutgoingEmail`]. Nothing here talks to a
//! provider, so validation failures never reach one.

use relay_email::OutgoingEmail;
use relay_templates::{Branding, MergeData, Template, layout};

use crate::error::ApiError;
use crate::handlers::{GenericEmailRequest, TemplatedEmailRequest};

/// Label of the invoice payment button
pub const PAY_NOW_LABEL: &str = "Pay Now";

/// The three template-driven endpoints
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmailKind {
    WeeklyUpdate,
    Invoice,
    Quote,
}

impl EmailKind {
    /// Noun used in acknowledgments and logs
    pub const fn label(self) -> &'static str {
        match self {
            Self::WeeklyUpdate => "Weekly update",
            Self::Invoice => "Invoice",
            Self::Quote => "Quote",
        }
    }
}

/// Render a weekly-update, invoice or quote request
pub fn templated(kind: EmailKind, request: TemplatedEmailRequest) -> Result<OutgoingEmail, ApiError> {
    let to = recipient(request.to.as_deref())?;
    let template = request
        .template
        .ok_or_else(|| ApiError::bad_request("Template is required"))?;

    let branding = request.company_settings.unwrap_or_default().resolve();
    let payment_link = match kind {
        EmailKind::Invoice => non_blank(request.payment_link.as_deref()),
        EmailKind::WeeklyUpdate | EmailKind::Quote => None,
    };

    let data = branding
        .merge_defaults(payment_link)
        .merged_with(request.data.unwrap_or_default());
    let rendered = template.render(&data);

    let mut body = rendered.body;
    if let Some(link) = payment_link {
        body.push_str(&layout::call_to_action(link, PAY_NOW_LABEL, &branding));
    }

    Ok(branded(to, rendered.subject, &body, &branding))
}

/// Render a free-form `/send-email` request
pub fn generic(request: GenericEmailRequest) -> Result<OutgoingEmail, ApiError> {
    let to = recipient(request.to.as_deref())?;
    let (Some(subject), Some(body)) = (
        non_blank(request.subject.as_deref()),
        non_blank(request.body.as_deref()),
    ) else {
        return Err(ApiError::bad_request("Subject and body are required"));
    };

    let branding = request.company_settings.unwrap_or_default().resolve();
    let rendered = Template::new(subject, body).render(&branding.merge_defaults(None));

    Ok(branded(to, rendered.subject, &rendered.body, &branding))
}

/// Canned message proving the configured provider works
pub fn test_probe(to: &str, provider: &str) -> OutgoingEmail {
    let branding = Branding::default();
    let mut data = MergeData::new();
    data.insert("provider", provider);

    let body = relay_templates::merge::render(
        "**Your email configuration is working.**\n\
         This test message was delivered through {{provider}}.\n\
         No action is required.",
        &data,
    );

    OutgoingEmail::new(to, "Test email", layout::wrap(&body, &branding))
}

fn branded(to: &str, subject: String, body: &str, branding: &Branding) -> OutgoingEmail {
    OutgoingEmail::new(to, subject, layout::wrap(body, branding))
        .from_name(branding.sender_name())
        .reply_to(branding.reply_to())
}

fn recipient(to: Option<&str>) -> Result<&str, ApiError> {
    non_blank(to).ok_or_else(|| ApiError::bad_request("Recipient email (to) is required"))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn templated_request(value: Value) -> TemplatedEmailRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_templated_merges_branding_and_data() {
        let request = templated_request(json!({
            "to": "client@example.com",
            "template": {
                "subject": "Quote from {{companyName}}",
                "body": "Hi {{clientName}},\n**Total:** {{total}}{{#if discount}} (10% off){{/if}}"
            },
            "data": {"clientName": "Jo", "total": "$500", "discount": true},
            "companySettings": {"companyName": "Acme", "email": "office@acme.test"}
        }));

        let email = templated(EmailKind::Quote, request).unwrap();
        assert_eq!(email.to, "client@example.com");
        assert_eq!(email.subject, "Quote from Acme");
        assert!(email.html.contains("Hi Jo,<br><strong>Total:</strong> $500 (10% off)"));
        assert_eq!(email.from_name.as_deref(), Some("Acme"));
        assert_eq!(email.reply_to.as_deref(), Some("office@acme.test"));
        assert!(!email.html.contains(PAY_NOW_LABEL));
    }

    #[test]
    fn test_caller_data_overrides_branding() {
        let request = templated_request(json!({
            "to": "client@example.com",
            "template": {"subject": "s", "body": "From {{companyName}}"},
            "data": {"companyName": "Override Ltd"},
            "companySettings": {"companyName": "Acme"}
        }));
        let email = templated(EmailKind::WeeklyUpdate, request).unwrap();
        assert!(email.html.contains("From Override Ltd"));
    }

    #[test]
    fn test_invoice_appends_payment_button() {
        let request = templated_request(json!({
            "to": "client@example.com",
            "template": {"subject": "Invoice", "body": "{{#if paymentLink}}Pay online below.{{/if}}"},
            "paymentLink": "https://checkout.stripe.com/c/pay/cs_test_1"
        }));
        let email = templated(EmailKind::Invoice, request).unwrap();
        assert!(email.html.contains("Pay online below."));
        assert!(email.html.contains(r#"href="https://checkout.stripe.com/c/pay/cs_test_1""#));
        assert!(email.html.contains(PAY_NOW_LABEL));
    }

    #[test]
    fn test_payment_link_ignored_outside_invoices() {
        let request = templated_request(json!({
            "to": "client@example.com",
            "template": {"subject": "s", "body": "b"},
            "paymentLink": "https://pay.test"
        }));
        let email = templated(EmailKind::Quote, request).unwrap();
        assert!(!email.html.contains("https://pay.test"));
    }

    #[test]
    fn test_templated_validation() {
        let missing_to = templated_request(json!({"template": {"subject": "s", "body": "b"}}));
        assert!(matches!(
            templated(EmailKind::Invoice, missing_to),
            Err(ApiError::BadRequest(_))
        ));

        let blank_to = templated_request(json!({"to": "  ", "template": {"subject": "s", "body": "b"}}));
        assert!(matches!(
            templated(EmailKind::Quote, blank_to),
            Err(ApiError::BadRequest(_))
        ));

        let missing_template = templated_request(json!({"to": "client@example.com"}));
        assert!(matches!(
            templated(EmailKind::WeeklyUpdate, missing_template),
            Err(ApiError::BadRequest(_))
        ));
    }

    #[test]
    fn test_generic() {
        let request: GenericEmailRequest = serde_json::from_value(json!({
            "to": "client@example.com",
            "subject": "Hello from {{companyName}}",
            "body": "Line one\nLine two",
            "companySettings": {"companyName": "Acme"}
        }))
        .unwrap();
        let email = generic(request).unwrap();
        assert_eq!(email.subject, "Hello from Acme");
        assert!(email.html.contains("Line one<br>Line two"));
    }

    #[test]
    fn test_generic_requires_subject_and_body() {
        let request: GenericEmailRequest =
            serde_json::from_value(json!({"to": "client@example.com", "subject": "Hi"})).unwrap();
        match generic(request) {
            Err(ApiError::BadRequest(msg)) => assert_eq!(msg, "Subject and body are required"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_probe_message() {
        let email = test_probe("owner@example.com", "resend");
        assert_eq!(email.to, "owner@example.com");
        assert!(email.html.contains("delivered through resend"));
        assert!(email.html.contains("<strong>Your email configuration is working.</strong>"));
    }
}
