//! Field module - a single source-field to target-field correspondence

use serde::{Deserialize, Serialize};

/// One field-level correspondence inside a mapping record
///
/// `target_field` may encode a nested path: `.` for object nesting and `[]`
/// for list-element nesting (e.g. `notes[].noteType`).
///
/// Both key spellings found in serialized mappings are accepted on input
/// (`source`/`target` and `source_field`/`target_field`); output always uses
/// the `source_field`/`target_field` form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldMapping {
    /// Source field, or `None` when it could not be resolved
    #[serde(default, alias = "source")]
    pub source_field: Option<String>,

    /// Target field or nested target path
    #[serde(alias = "target")]
    pub target_field: String,

    /// Literal Java expression used instead of a direct copy
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "transformation")]
    pub expression: Option<String>,

    /// MapStruct `ignore = true`; ignored fields are kept and flagged
    #[serde(default, skip_serializing_if = "is_false")]
    pub ignore: bool,

    /// Path including the receiving variable name, for display
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_path: Option<String>,
}

impl FieldMapping {
    /// Create a field mapping from an optional source to a target
    ///
    /// # Examples
    ///
    /// ```
    /// use mapwise_domain::FieldMapping;
    ///
    /// let fm = FieldMapping::new(Some("firstName".to_string()), "name");
    /// assert_eq!(fm.source_field.as_deref(), Some("firstName"));
    /// assert_eq!(fm.target_field, "name");
    /// assert!(!fm.ignore);
    /// ```
    pub fn new(source_field: Option<String>, target_field: impl Into<String>) -> Self {
        Self {
            source_field,
            target_field: target_field.into(),
            expression: None,
            ignore: false,
            target_path: None,
        }
    }

    /// Create a mapping whose source is known
    pub fn direct(source_field: impl Into<String>, target_field: impl Into<String>) -> Self {
        Self::new(Some(source_field.into()), target_field)
    }

    /// Attach a literal expression
    pub fn with_expression(mut self, expression: Option<String>) -> Self {
        self.expression = expression;
        self
    }

    /// Set the ignore flag
    pub fn with_ignore(mut self, ignore: bool) -> Self {
        self.ignore = ignore;
        self
    }

    /// Attach the display path including the receiving variable
    pub fn with_target_path(mut self, target_path: impl Into<String>) -> Self {
        self.target_path = Some(target_path.into());
        self
    }

    /// Whether the target path passes through a list element (`[]`)
    pub fn is_collection_path(&self) -> bool {
        self.target_field.contains("[]")
    }

    /// Whether the source is a constant placeholder rather than a field
    pub fn is_constant_source(&self) -> bool {
        matches!(self.source_field.as_deref(), Some(s) if s == "constant" || s.starts_with("constant:"))
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}
