use crate::error::Error;
use crate::model::FormErrors;

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    File { filename: String, bytes: Vec<u8> },
}

/// One part of an outgoing multipart submission.
#[derive(Debug, Clone, PartialEq)]
pub struct FormPart {
    pub name: String,
    pub value: FieldValue,
}

impl FormPart {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: FieldValue::Text(value.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub value: FieldValue,
    pub error: Option<String>,
}

/// The generation form: named fields in submission order, each with a
/// slot for the validation message the service may attach to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuizForm {
    fields: Vec<Field>,
}

impl QuizForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push(Field {
            name: name.into(),
            value: FieldValue::Text(value.into()),
            error: None,
        });
    }

    pub fn push_file(&mut self, name: impl Into<String>, filename: impl Into<String>, bytes: Vec<u8>) {
        self.fields.push(Field {
            name: name.into(),
            value: FieldValue::File {
                filename: filename.into(),
                bytes,
            },
            error: None,
        });
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn set_value(&mut self, name: &str, value: FieldValue) -> Result<(), Error> {
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => {
                field.value = value;
                Ok(())
            }
            None => Err(Error::UnknownField(name.to_string())),
        }
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(|f| f.error.as_deref())
    }

    pub fn error_count(&self) -> usize {
        self.fields.iter().filter(|f| f.error.is_some()).count()
    }

    pub fn clear_errors(&mut self) {
        for field in &mut self.fields {
            field.error = None;
        }
    }

    /// Attach the first message of each `form_errors` entry to its field.
    ///
    /// All-or-nothing: if any reported name matches no field, no message
    /// is placed and the unmatched names come back as an error. Returns
    /// the names that received a message, in report order.
    pub fn apply_errors(&mut self, errors: &FormErrors) -> Result<Vec<String>, Error> {
        let unmatched: Vec<String> = errors
            .keys()
            .filter(|name| self.field(name).is_none())
            .cloned()
            .collect();
        if !unmatched.is_empty() {
            return Err(Error::UnmatchedErrorFields(unmatched));
        }

        let mut annotated = Vec::new();
        for (name, messages) in errors {
            let Some(first) = messages.first() else {
                continue;
            };
            if let Some(field) = self.fields.iter_mut().find(|f| &f.name == name) {
                field.error = Some(first.clone());
                annotated.push(name.clone());
            }
        }
        Ok(annotated)
    }

    /// Every field, text and file alike, as multipart parts in order.
    pub fn parts(&self) -> Vec<FormPart> {
        self.fields
            .iter()
            .map(|f| FormPart {
                name: f.name.clone(),
                value: f.value.clone(),
            })
            .collect()
    }
}
