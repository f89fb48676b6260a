//! Contact form
//!
//! Validation, the submitting lockout, and delivery through a pluggable
//! backend. Rejected submissions leave the typed values untouched; only a
//! successful settle clears the form.

use thiserror::Error;
use verve_dom::{Document, NodeId, SelectorList};
use verve_runtime::Millis;

/// Simulated delivery time of the default backend.
pub const SUBMIT_DELAY_MS: Millis = 2000;

pub(crate) const SENDING_LABEL: &str = "Sending...";
pub(crate) const SUCCESS_MESSAGE: &str =
    "Thank you for your message! I'll get back to you within 24 hours.";

const REQUIRED_FIELDS: [&str; 3] = ["name", "email", "project"];

/// The field values captured at submission time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    pub name: String,
    pub email: String,
    pub project: String,
}

/// Why a submission was rejected before reaching the backend.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all required fields.")]
    MissingFields,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

/// How a delivery attempt settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Success,
    Error(String),
}

/// Delivery target for validated submissions.
pub trait SubmitBackend {
    /// Accept a snapshot for delivery.
    fn begin(&mut self, snapshot: FormSnapshot, now: Millis);
    /// Report the settle, at most once per `begin`.
    fn poll(&mut self, now: Millis) -> Option<SubmitOutcome>;
}

/// Backend that succeeds after a fixed simulated delay.
#[derive(Debug)]
pub struct FixedDelayBackend {
    delay: Millis,
    settles_at: Option<Millis>,
}

impl FixedDelayBackend {
    pub fn new() -> Self {
        Self { delay: SUBMIT_DELAY_MS, settles_at: None }
    }

    pub fn with_delay(delay: Millis) -> Self {
        Self { delay, settles_at: None }
    }
}

impl Default for FixedDelayBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmitBackend for FixedDelayBackend {
    fn begin(&mut self, _snapshot: FormSnapshot, now: Millis) {
        self.settles_at = Some(now + self.delay);
    }

    fn poll(&mut self, now: Millis) -> Option<SubmitOutcome> {
        if self.settles_at.is_some_and(|at| now >= at) {
            self.settles_at = None;
            return Some(SubmitOutcome::Success);
        }
        None
    }
}

/// Check required fields, then the email shape. Whitespace counts as
/// content; only truly empty fields are missing.
pub fn validate(snapshot: &FormSnapshot) -> Result<(), ValidationError> {
    if snapshot.name.is_empty() || snapshot.email.is_empty() || snapshot.project.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    if !is_valid_email(&snapshot.email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Structural email check: no whitespace, one `@` with a non-empty local
/// part, and a dot inside the domain with characters on both sides.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let chars: Vec<char> = domain.chars().collect();
    chars.len() >= 3 && chars[1..chars.len() - 1].contains(&'.')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormPhase {
    Idle,
    Submitting,
}

pub(crate) struct ContactForm {
    form: NodeId,
    submit_button: Option<NodeId>,
    saved_label: Option<String>,
    phase: FormPhase,
    backend: Box<dyn SubmitBackend>,
}

impl ContactForm {
    /// Hook up the form with id `contactForm`, if the page has one.
    pub(crate) fn attach(doc: &Document, backend: Box<dyn SubmitBackend>) -> Option<Self> {
        let form = doc.get_element_by_id("contactForm")?;
        let submit_button = SelectorList::parse("button[type=\"submit\"]")
            .and_then(|list| {
                doc.tree
                    .descendants(form)
                    .find(|&id| doc.matches_selector(id, &list))
            });
        Some(Self {
            form,
            submit_button,
            saved_label: None,
            phase: FormPhase::Idle,
            backend,
        })
    }

    pub(crate) fn node(&self) -> NodeId {
        self.form
    }

    pub(crate) fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    /// Run the submission pipeline. `None` while a submission is already in
    /// flight; otherwise the validation verdict.
    pub(crate) fn submit(
        &mut self,
        doc: &mut Document,
        now: Millis,
    ) -> Option<Result<(), ValidationError>> {
        if self.phase == FormPhase::Submitting {
            return None;
        }
        let snapshot = self.snapshot(doc);
        if let Err(err) = validate(&snapshot) {
            tracing::debug!("Submission rejected: {}", err);
            return Some(Err(err));
        }
        self.lock_button(doc);
        self.backend.begin(snapshot, now);
        self.phase = FormPhase::Submitting;
        Some(Ok(()))
    }

    /// Poll the backend for a settle and restore the control state on one.
    pub(crate) fn poll(&mut self, doc: &mut Document, now: Millis) -> Option<SubmitOutcome> {
        if self.phase != FormPhase::Submitting {
            return None;
        }
        let outcome = self.backend.poll(now)?;
        self.unlock_button(doc);
        if outcome == SubmitOutcome::Success {
            self.clear_fields(doc);
        }
        self.phase = FormPhase::Idle;
        Some(outcome)
    }

    fn snapshot(&self, doc: &Document) -> FormSnapshot {
        let value = |name: &str| {
            self.field(doc, name)
                .and_then(|id| doc.attr(id, "value"))
                .unwrap_or_default()
                .to_string()
        };
        FormSnapshot {
            name: value("name"),
            email: value("email"),
            project: value("project"),
        }
    }

    fn field(&self, doc: &Document, name: &str) -> Option<NodeId> {
        doc.tree
            .descendants(self.form)
            .find(|&id| doc.attr(id, "name") == Some(name))
    }

    fn clear_fields(&self, doc: &mut Document) {
        for name in REQUIRED_FIELDS {
            if let Some(id) = self.field(doc, name) {
                doc.set_attr(id, "value", "");
            }
        }
    }

    fn lock_button(&mut self, doc: &mut Document) {
        if let Some(button) = self.submit_button {
            self.saved_label = Some(doc.text_content(button));
            doc.set_text_content(button, SENDING_LABEL);
            doc.set_attr(button, "disabled", "");
        }
    }

    fn unlock_button(&mut self, doc: &mut Document) {
        if let Some(button) = self.submit_button {
            if let Some(label) = self.saved_label.take() {
                doc.set_text_content(button, &label);
            }
            doc.remove_attr(button, "disabled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form_doc() -> (Document, NodeId, NodeId) {
        let mut doc = Document::default();
        let form = doc.create_element("form");
        doc.set_attr(form, "id", "contactForm");
        doc.append_child(doc.body(), form);
        for name in REQUIRED_FIELDS {
            let input = doc.create_element("input");
            doc.set_attr(input, "name", name);
            doc.append_child(form, input);
        }
        let button = doc.create_element("button");
        doc.set_attr(button, "type", "submit");
        doc.set_text_content(button, "Send Message");
        doc.append_child(form, button);
        (doc, form, button)
    }

    fn fill(doc: &mut Document, form: NodeId, name: &str, email: &str, project: &str) {
        let find = |doc: &Document, want: &str| {
            doc.tree
                .descendants(form)
                .find(|&id| doc.attr(id, "name") == Some(want))
                .unwrap()
        };
        let name_field = find(doc, "name");
        doc.set_attr(name_field, "value", name);
        let email_field = find(doc, "email");
        doc.set_attr(email_field, "value", email);
        let project_field = find(doc, "project");
        doc.set_attr(project_field, "value", project);
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("chetna@example.com"));
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("first.last@sub.domain.io"));

        assert!(!is_valid_email("plain"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@.com"));
        assert!(!is_valid_email("a@com."));
        assert!(!is_valid_email("a@b@c.com"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@c.com "));
    }

    #[test]
    fn test_validation_order() {
        let mut snapshot = FormSnapshot {
            name: "Ada".into(),
            email: "bad-email".into(),
            project: String::new(),
        };
        // Missing fields win over the malformed email
        assert_eq!(validate(&snapshot), Err(ValidationError::MissingFields));

        snapshot.project = "Campaign".into();
        assert_eq!(validate(&snapshot), Err(ValidationError::InvalidEmail));

        snapshot.email = "ada@lovelace.dev".into();
        assert_eq!(validate(&snapshot), Ok(()));
    }

    #[test]
    fn test_whitespace_counts_as_content() {
        let snapshot = FormSnapshot {
            name: "  ".into(),
            email: "ada@lovelace.dev".into(),
            project: "x".into(),
        };
        assert_eq!(validate(&snapshot), Ok(()));
    }

    #[test]
    fn test_submit_locks_then_success_clears() {
        let (mut doc, form_node, button) = form_doc();
        fill(&mut doc, form_node, "Ada", "ada@lovelace.dev", "Launch");
        let backend = Box::new(FixedDelayBackend::new());
        let mut form = ContactForm::attach(&doc, backend).unwrap();

        assert_eq!(form.submit(&mut doc, 1000), Some(Ok(())));
        assert!(form.is_submitting());
        assert_eq!(doc.text_content(button), SENDING_LABEL);
        assert!(doc.attr(button, "disabled").is_some());

        // A second submit while in flight is swallowed
        assert_eq!(form.submit(&mut doc, 1500), None);

        assert_eq!(form.poll(&mut doc, 2999), None);
        assert_eq!(form.poll(&mut doc, 3000), Some(SubmitOutcome::Success));
        assert!(!form.is_submitting());
        assert_eq!(doc.text_content(button), "Send Message");
        assert!(doc.attr(button, "disabled").is_none());

        let name_field = doc.query("input[name=\"name\"]").unwrap();
        assert_eq!(doc.attr(name_field, "value"), Some(""));
    }

    #[test]
    fn test_rejection_keeps_values() {
        let (mut doc, form_node, button) = form_doc();
        fill(&mut doc, form_node, "Ada", "not-an-email", "Launch");
        let backend = Box::new(FixedDelayBackend::new());
        let mut form = ContactForm::attach(&doc, backend).unwrap();

        assert_eq!(form.submit(&mut doc, 0), Some(Err(ValidationError::InvalidEmail)));
        assert!(!form.is_submitting());
        assert_eq!(doc.text_content(button), "Send Message");

        let email_field = doc.query("input[name=\"email\"]").unwrap();
        assert_eq!(doc.attr(email_field, "value"), Some("not-an-email"));
    }

    struct FailingBackend;

    impl SubmitBackend for FailingBackend {
        fn begin(&mut self, _snapshot: FormSnapshot, _now: Millis) {}
        fn poll(&mut self, _now: Millis) -> Option<SubmitOutcome> {
            Some(SubmitOutcome::Error("Delivery refused".into()))
        }
    }

    #[test]
    fn test_error_settle_keeps_values() {
        let (mut doc, form_node, button) = form_doc();
        fill(&mut doc, form_node, "Ada", "ada@lovelace.dev", "Launch");
        let mut form = ContactForm::attach(&doc, Box::new(FailingBackend)).unwrap();

        assert_eq!(form.submit(&mut doc, 0), Some(Ok(())));
        let outcome = form.poll(&mut doc, 1).unwrap();
        assert_eq!(outcome, SubmitOutcome::Error("Delivery refused".into()));

        // Typed values survive a failed delivery for a retry
        let name_field = doc.query("input[name=\"name\"]").unwrap();
        assert_eq!(doc.attr(name_field, "value"), Some("Ada"));
        assert_eq!(doc.text_content(button), "Send Message");
        assert!(doc.attr(button, "disabled").is_none());
    }

    #[test]
    fn test_missing_form_is_none() {
        let doc = Document::default();
        assert!(ContactForm::attach(&doc, Box::new(FixedDelayBackend::new())).is_none());
    }
}
