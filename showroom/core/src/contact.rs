//! Contact Form
//!
//! Four text fields and the brand's contact details. The form is static:
//! there is no submit, so editing it has no effect beyond its own buffers.

/// Contact e-mail shown next to the form
pub const EMAIL: &str = "contact@mirra.com";
/// Contact phone number
pub const PHONE: &str = "+1 (555) 123-4567";
/// Postal address
pub const ADDRESS: &str = "123 Fashion Street, New York, NY 10001";

/// A field of the contact form
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ContactField {
    /// Visitor's name
    #[default]
    Name,
    /// Visitor's e-mail
    Email,
    /// Subject line
    Subject,
    /// Message body
    Message,
}

impl ContactField {
    /// Fields in tab order
    pub const ALL: [ContactField; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    /// Placeholder text shown while the field is empty
    #[must_use]
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Name => "Your name",
            Self::Email => "Your email",
            Self::Subject => "Subject",
            Self::Message => "Your message",
        }
    }

    /// Whether the field takes multiple lines
    #[must_use]
    pub fn is_multiline(&self) -> bool {
        matches!(self, Self::Message)
    }

    /// The following field, wrapping to the first
    #[must_use]
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// The preceding field, wrapping to the last
    #[must_use]
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn index(self) -> usize {
        match self {
            Self::Name => 0,
            Self::Email => 1,
            Self::Subject => 2,
            Self::Message => 3,
        }
    }
}

/// The form's buffers and focus
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactForm {
    name: String,
    email: String,
    subject: String,
    message: String,
    focus: ContactField,
}

impl ContactForm {
    /// An empty form focused on the name field
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a field
    #[must_use]
    pub fn value(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Subject => &self.subject,
            ContactField::Message => &self.message,
        }
    }

    fn value_mut(&mut self, field: ContactField) -> &mut String {
        match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Subject => &mut self.subject,
            ContactField::Message => &mut self.message,
        }
    }

    /// Replace a field's value
    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        *self.value_mut(field) = value.into();
    }

    /// Focused field
    #[must_use]
    pub fn focus(&self) -> ContactField {
        self.focus
    }

    /// Move focus to `field`
    pub fn focus_on(&mut self, field: ContactField) {
        self.focus = field;
    }

    /// Move focus forward
    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    /// Move focus backward
    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Type into the focused field
    ///
    /// Newlines are only kept in the message body.
    pub fn push_char(&mut self, c: char) {
        if c == '\n' && !self.focus.is_multiline() {
            return;
        }
        let field = self.focus;
        self.value_mut(field).push(c);
    }

    /// Delete the last character of the focused field
    pub fn pop_char(&mut self) {
        let field = self.focus;
        self.value_mut(field).pop();
    }

    /// Empty every field and focus the first
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
