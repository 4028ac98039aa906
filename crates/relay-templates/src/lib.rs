//! # relay-templates
//!
//! Template processing and branded HTML layout for transactional email.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │   Template   │───▶│  merge tags  │───▶│ conditionals │───▶│ bold + <br>  │
//! │ subject/body │    │  {{name}}    │    │ {{#if x}}..  │    │  **x**, \n   │
//! └──────────────┘    └──────────────┘    └──────────────┘    └──────┬───────┘
//!                                                                    │
//!                     ┌──────────────────────────────────────────────▼───────┐
//!                     │  layout::wrap  (header gradient, logo, footer)       │
//!                     └──────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use relay_templates::{merge, CompanySettings, MergeData};
//!
//! let mut data = MergeData::new();
//! data.insert("name", "Sam");
//! data.insert("urgent", true);
//!
//! let html = merge::render("Hello {{name}}, {{#if urgent}}call now!{{/if}}", &data);
//! assert_eq!(html, "Hello Sam, call now!");
//!
//! let branding = CompanySettings::default().resolve();
//! let document = relay_templates::layout::wrap(&html, &branding);
//! assert!(document.contains("Hello Sam"));
//! ```

pub mod layout;
pub mod merge;
pub mod settings;

pub use merge::{MergeData, Template};
pub use settings::{Branding, CompanySettings};
