//! A pair of linked text fields, one Gregorian and one JDE.
//!
//! Editing either field converts it and overwrites the other. Input that does
//! not convert marks only its own field invalid and never touches the other
//! one; the next successful edit clears both marks.

use serde::Serialize;

use crate::{CalendarDate, JdeCode, JdeError, prelude::*, to_jde_date};

/// Which of the two linked fields an edit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    #[display(fmt = "gregorian")]
    Gregorian,
    #[display(fmt = "jde")]
    Jde,
}

impl Field {
    /// The field an edit to `self` writes into.
    pub const fn counterpart(self) -> Self {
        match self {
            Self::Gregorian => Self::Jde,
            Self::Jde => Self::Gregorian,
        }
    }
}

/// Outcome of an edit to one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FieldUpdate {
    /// The edited text converted; the counterpart now holds `value`.
    Converted { source: Field, value: String },
    /// The edited text did not convert; `source` is marked invalid.
    Rejected { source: Field, reason: String },
}

impl FieldUpdate {
    pub const fn source(&self) -> Field {
        match self {
            Self::Converted { source, .. } | Self::Rejected { source, .. } => *source,
        }
    }

    pub const fn is_converted(&self) -> bool {
        matches!(self, Self::Converted { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkedFields {
    gregorian: String,
    jde: String,
    gregorian_invalid: bool,
    jde_invalid: bool,
}

impl LinkedFields {
    /// Both fields filled in from `date`, neither marked invalid.
    ///
    /// # Errors
    /// Returns `JdeError::YearOutOfRange` if `date` has no JDE encoding.
    pub fn new(date: CalendarDate) -> Result<Self, JdeError> {
        let code = to_jde_date(date)?;
        Ok(Self {
            gregorian: date.to_string(),
            jde: code.to_string(),
            gregorian_invalid: false,
            jde_invalid: false,
        })
    }

    /// Fields seeded with today's UTC date.
    ///
    /// # Errors
    /// Returns an error only if the system clock is outside the JDE range.
    pub fn today() -> Result<Self, JdeError> {
        Self::new(CalendarDate::today()?)
    }

    pub fn gregorian(&self) -> &str {
        &self.gregorian
    }

    pub fn jde(&self) -> &str {
        &self.jde
    }

    pub fn text(&self, field: Field) -> &str {
        match field {
            Field::Gregorian => &self.gregorian,
            Field::Jde => &self.jde,
        }
    }

    pub const fn is_invalid(&self, field: Field) -> bool {
        match field {
            Field::Gregorian => self.gregorian_invalid,
            Field::Jde => self.jde_invalid,
        }
    }

    /// Replaces the text of `field` and converts it into the other field.
    pub fn set(&mut self, field: Field, text: &str) -> FieldUpdate {
        match field {
            Field::Gregorian => self.set_gregorian(text),
            Field::Jde => self.set_jde(text),
        }
    }

    /// Replaces the Gregorian text; on success the JDE field is rewritten.
    pub fn set_gregorian(&mut self, text: &str) -> FieldUpdate {
        text.clone_into(&mut self.gregorian);
        let converted = text
            .parse::<CalendarDate>()
            .map_err(JdeError::from)
            .and_then(to_jde_date);
        match converted {
            Ok(code) => self.accept(Field::Gregorian, code.to_string()),
            Err(err) => self.reject(Field::Gregorian, &err),
        }
    }

    /// Replaces the JDE text; on success the Gregorian field is rewritten.
    ///
    /// Surrounding whitespace is ignored when validating.
    pub fn set_jde(&mut self, text: &str) -> FieldUpdate {
        text.clone_into(&mut self.jde);
        match text.trim().parse::<JdeCode>() {
            Ok(code) => self.accept(Field::Jde, code.date().to_string()),
            Err(err) => self.reject(Field::Jde, &err),
        }
    }

    fn accept(&mut self, source: Field, value: String) -> FieldUpdate {
        log::trace!("{source} field converted, writing {value} to {}", source.counterpart());
        match source {
            Field::Gregorian => self.jde.clone_from(&value),
            Field::Jde => self.gregorian.clone_from(&value),
        }
        self.gregorian_invalid = false;
        self.jde_invalid = false;
        FieldUpdate::Converted { source, value }
    }

    fn reject(&mut self, source: Field, err: &JdeError) -> FieldUpdate {
        log::debug!("{source} field rejected {:?}: {err}", self.text(source));
        match source {
            Field::Gregorian => self.gregorian_invalid = true,
            Field::Jde => self.jde_invalid = true,
        }
        FieldUpdate::Rejected {
            source,
            reason: err.to_string(),
        }
    }
}
