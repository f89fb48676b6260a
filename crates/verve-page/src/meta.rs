//! Structured data
//!
//! The schema.org Person profile serialized into a `ld+json` script tag in
//! the document head, the way crawlers expect to find it.

use serde::Serialize;
use thiserror::Error;
use verve_dom::{Document, NodeId};

/// Machine-readable identity card for the site owner.
#[derive(Debug, Clone, Serialize)]
pub struct SiteProfile {
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(rename = "@type")]
    pub kind: String,
    pub name: String,
    #[serde(rename = "jobTitle")]
    pub job_title: String,
    pub description: String,
    /// Filled from the document origin when left empty.
    pub url: String,
    #[serde(rename = "sameAs")]
    pub same_as: Vec<String>,
    #[serde(rename = "knowsAbout")]
    pub knows_about: Vec<String>,
    #[serde(rename = "hasCredential")]
    pub has_credential: Vec<String>,
}

impl Default for SiteProfile {
    fn default() -> Self {
        Self {
            context: "https://schema.org".to_string(),
            kind: "Person".to_string(),
            name: "Chetna Muzhalda".to_string(),
            job_title: "Digital Marketing Freelancer".to_string(),
            description: "Performance-driven digital marketing freelancer specializing in \
                 SEO, SEM, Meta Ads, and Google Ads"
                .to_string(),
            url: String::new(),
            same_as: vec![
                "https://linkedin.com/in/chetnamuzhalda".to_string(),
                "https://twitter.com/chetnamuzhalda".to_string(),
                "https://instagram.com/chetnamuzhalda".to_string(),
            ],
            knows_about: vec![
                "SEO".to_string(),
                "SEM".to_string(),
                "Google Ads".to_string(),
                "Meta Ads".to_string(),
                "Social Media Marketing".to_string(),
                "Digital Marketing".to_string(),
                "Performance Marketing".to_string(),
                "Conversion Optimization".to_string(),
            ],
            has_credential: vec![
                "Google Ads Certified".to_string(),
                "Meta Blueprint Certified".to_string(),
            ],
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum MetaError {
    #[error("structured data did not serialize: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Serialize the profile into `<head>`. Returns the script node.
pub(crate) fn inject_structured_data(
    doc: &mut Document,
    profile: &SiteProfile,
) -> Result<NodeId, MetaError> {
    let mut profile = profile.clone();
    if profile.url.is_empty() {
        profile.url = doc.origin().unwrap_or_default();
    }
    let json = serde_json::to_string(&profile)?;

    let script = doc.create_element("script");
    doc.set_attr(script, "type", "application/ld+json");
    doc.set_text_content(script, &json);
    let head = doc.head();
    doc.append_child(head, script);
    Ok(script)
}
