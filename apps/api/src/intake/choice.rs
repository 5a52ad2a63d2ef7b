use crate::intake::catalog::OTHER_OPTION;

/// A selector value with a free-text escape hatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChoice {
    Predefined(String),
    Custom(String),
}

impl FieldChoice {
    /// Builds the choice from the selector value and the companion text input.
    /// Returns `None` when nothing was selected.
    pub fn from_form(selected: Option<&str>, custom: Option<&str>) -> Option<Self> {
        let selected = selected.map(str::trim).filter(|s| !s.is_empty())?;
        if selected == OTHER_OPTION {
            Some(FieldChoice::Custom(custom.unwrap_or_default().to_string()))
        } else {
            Some(FieldChoice::Predefined(selected.to_string()))
        }
    }

    /// Collapses to the final value. Blank custom text counts as no value.
    pub fn resolve(self) -> Option<String> {
        match self {
            FieldChoice::Predefined(value) => Some(value),
            FieldChoice::Custom(text) => {
                let text = text.trim();
                (!text.is_empty()).then(|| text.to_string())
            }
        }
    }
}

/// Resolves a selector + free-text pair straight to its value.
pub fn resolve_field(selected: Option<&str>, custom: Option<&str>) -> Option<String> {
    FieldChoice::from_form(selected, custom).and_then(FieldChoice::resolve)
}
