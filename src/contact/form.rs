use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Shown once a simulated submission completes.
pub const SUCCESS_NOTICE: &str = "Gracias por el mensaje. te contactare pronto!";

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern compiles"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    /// Form label as displayed.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Nombre",
            Field::Email => "Email",
            Field::Subject => "Asunto",
            Field::Message => "Mensaje",
        }
    }

    fn noun(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Subject => "Subject",
            Field::Message => "Message",
        }
    }

    pub fn next(&self) -> Field {
        let idx = Field::ALL.iter().position(|f| f == self).unwrap_or(0);
        Field::ALL[(idx + 1) % Field::ALL.len()]
    }

    pub fn previous(&self) -> Field {
        let idx = Field::ALL.iter().position(|f| f == self).unwrap_or(0);
        Field::ALL[(idx + Field::ALL.len() - 1) % Field::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    InvalidFormat,
}

impl FieldError {
    pub fn message(&self, field: Field) -> String {
        match self {
            FieldError::Required => format!("{} is required", field.noun()),
            FieldError::InvalidFormat => format!("{} is invalid", field.noun()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactFields {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
        }
    }

    pub fn is_blank(&self) -> bool {
        Field::ALL.iter().all(|field| self.get(*field).is_empty())
    }
}

/// Per-field validation failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<Field, FieldError>,
}

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.errors.iter().map(|(field, error)| (*field, *error))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<_> = self
            .iter()
            .map(|(field, error)| error.message(field))
            .collect();
        f.write_str(&messages.join(", "))
    }
}

/// Check every field; all failures are reported together.
pub fn validate(fields: &ContactFields) -> FieldErrors {
    let mut errors = BTreeMap::new();

    for field in [Field::Name, Field::Subject, Field::Message] {
        if fields.get(field).trim().is_empty() {
            errors.insert(field, FieldError::Required);
        }
    }

    if fields.email.trim().is_empty() {
        errors.insert(Field::Email, FieldError::Required);
    } else if !EMAIL_PATTERN.is_match(&fields.email) {
        errors.insert(Field::Email, FieldError::InvalidFormat);
    }

    FieldErrors { errors }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation passed and the form is now submitting.
    Accepted,
    /// Validation failed; errors are kept on the form.
    Rejected(FieldErrors),
    /// A submission is already in flight.
    Busy,
}

#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    fields: ContactFields,
    errors: FieldErrors,
    submitting: bool,
    notice: Option<&'static str>,
    focus: Option<Field>,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &ContactFields {
        &self.fields
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn notice(&self) -> Option<&'static str> {
        self.notice
    }

    pub fn focus(&self) -> Option<Field> {
        self.focus
    }

    pub fn set_focus(&mut self, field: Option<Field>) {
        self.focus = field;
    }

    pub fn focus_next(&mut self) -> Field {
        let next = self.focus.map(|f| f.next()).unwrap_or(Field::Name);
        self.focus = Some(next);
        next
    }

    pub fn focus_previous(&mut self) -> Field {
        let previous = self.focus.map(|f| f.previous()).unwrap_or(Field::Message);
        self.focus = Some(previous);
        previous
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        *self.fields.get_mut(field) = value.into();
    }

    /// Append to the focused field; ignored without focus.
    pub fn insert_char(&mut self, ch: char) -> bool {
        match self.focus {
            Some(field) => {
                self.fields.get_mut(field).push(ch);
                true
            }
            None => false,
        }
    }

    pub fn delete_char(&mut self) -> bool {
        match self.focus {
            Some(field) => self.fields.get_mut(field).pop().is_some(),
            None => false,
        }
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        if self.submitting {
            return SubmitOutcome::Busy;
        }

        self.errors = validate(&self.fields);
        if !self.errors.is_empty() {
            return SubmitOutcome::Rejected(self.errors.clone());
        }

        self.submitting = true;
        SubmitOutcome::Accepted
    }

    /// Finish an in-flight submission: show the notice and clear the fields.
    /// Returns `false` when nothing was in flight.
    pub fn complete_submission(&mut self) -> bool {
        if !self.submitting {
            return false;
        }
        self.submitting = false;
        self.notice = Some(SUCCESS_NOTICE);
        self.fields = ContactFields::default();
        self.focus = None;
        true
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactFields {
        ContactFields {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            subject: "Hola".into(),
            message: "Quiero una pagina".into(),
        }
    }

    #[test]
    fn empty_form_reports_every_field_required() {
        let errors = validate(&ContactFields::default());
        assert_eq!(errors.len(), 4);
        assert!(Field::ALL
            .iter()
            .all(|field| errors.get(*field) == Some(FieldError::Required)));
    }

    #[test]
    fn whitespace_only_counts_as_empty() {
        let mut fields = filled();
        fields.subject = "   ".into();
        let errors = validate(&fields);
        assert_eq!(errors.get(Field::Subject), Some(FieldError::Required));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn malformed_email_is_the_only_error() {
        let mut fields = filled();
        fields.email = "foo".into();
        let errors = validate(&fields);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::Email), Some(FieldError::InvalidFormat));
        assert_eq!(
            FieldError::InvalidFormat.message(Field::Email),
            "Email is invalid"
        );
    }

    #[test]
    fn email_pattern_is_loose() {
        for ok in ["a@b.c", "x y@host.org", "me@sub.domain.com"] {
            let mut fields = filled();
            fields.email = ok.into();
            assert!(validate(&fields).is_empty(), "{ok} should pass");
        }
        for bad in ["a@b", "@b.c", "a.b@c", "foo"] {
            let mut fields = filled();
            fields.email = bad.into();
            assert_eq!(
                validate(&fields).get(Field::Email),
                Some(FieldError::InvalidFormat),
                "{bad} should fail"
            );
        }
    }

    #[test]
    fn rejected_submit_keeps_values_and_allows_retry() {
        let mut form = ContactForm::new();
        form.set_field(Field::Name, "Ana");
        let outcome = form.submit();
        assert!(matches!(outcome, SubmitOutcome::Rejected(ref e) if e.len() == 3));
        assert_eq!(form.fields().name, "Ana");
        assert!(!form.is_submitting());

        for field in Field::ALL {
            form.set_field(field, filled().get(field));
        }
        assert_eq!(form.submit(), SubmitOutcome::Accepted);
        assert!(form.errors().is_empty());
    }

    #[test]
    fn accepted_submission_completes_and_resets() {
        let mut form = ContactForm::new();
        for field in Field::ALL {
            form.set_field(field, filled().get(field));
        }
        assert_eq!(form.submit(), SubmitOutcome::Accepted);
        assert_eq!(form.submit(), SubmitOutcome::Busy);

        assert!(form.complete_submission());
        assert!(!form.is_submitting());
        assert_eq!(form.notice(), Some(SUCCESS_NOTICE));
        assert!(form.fields().is_blank());

        form.clear_notice();
        assert_eq!(form.notice(), None);
        assert!(!form.complete_submission());
    }

    #[test]
    fn typing_needs_focus() {
        let mut form = ContactForm::new();
        assert!(!form.insert_char('x'));
        assert_eq!(form.focus_next(), Field::Name);
        form.insert_char('A');
        form.insert_char('n');
        assert!(form.delete_char());
        assert_eq!(form.fields().name, "A");
        assert_eq!(form.focus_previous(), Field::Message);
    }
}
