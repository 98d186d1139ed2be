//! LLM prompt engineering for mapping extraction

/// Builds prompts for the LLM to extract mappings from Java code
pub struct PromptBuilder {
    code: String,
    file_path: Option<String>,
    code_limit: usize,
}

impl PromptBuilder {
    /// Create a new prompt builder
    pub fn new(code: impl Into<String>, code_limit: usize) -> Self {
        Self {
            code: code.into(),
            file_path: None,
            code_limit,
        }
    }

    /// Name the file the code came from
    pub fn with_file_path(mut self, file_path: Option<String>) -> Self {
        self.file_path = file_path;
        self
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(EXTRACTION_INSTRUCTIONS);
        prompt.push_str("\n\n");

        if let Some(file_path) = &self.file_path {
            prompt.push_str(&format!("File: {}\n\n", file_path));
        }

        prompt.push_str("Code:\n```java\n");
        prompt.push_str(self.truncated_code());
        prompt.push_str("\n```\n\n");

        prompt.push_str(OUTPUT_FORMAT_REMINDER);

        prompt
    }

    /// The code cut to at most `code_limit` characters
    fn truncated_code(&self) -> &str {
        match self.code.char_indices().nth(self.code_limit) {
            Some((offset, _)) => &self.code[..offset],
            None => &self.code,
        }
    }
}

const EXTRACTION_INSTRUCTIONS: &str = r#"Analyze this Java code and extract all field-level mappings between source and destination objects.

Extract:
1. MapStruct mappings (interfaces with @Mapper annotation)
2. POJO mappings (methods like mapXxx, convert, transform)
3. Field-level mappings (source field -> target field)
4. Any transformations or expressions

Rules:
- Use the Java type names exactly as written in the code
- Nested target fields use dots (address.city); list elements use [] (notes[].noteType)
- Use null for a source field you cannot determine
- Constants assigned to a target field are written as "constant:NAME""#;

const OUTPUT_FORMAT_REMINDER: &str = r#"Output format (JSON array only, no additional text):
[
  {
    "mapping_type": "mapstruct or pojo",
    "source_type": "SourceClass",
    "target_type": "TargetClass",
    "method_name": "methodName",
    "field_mappings": [
      {"source_field": "...", "target_field": "...", "transformation": "..."}
    ]
  }
]

JSON:"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_code_and_format() {
        let prompt = PromptBuilder::new("class A {}", 100)
            .with_file_path(Some("A.java".to_string()))
            .build();
        assert!(prompt.contains("class A {}"));
        assert!(prompt.contains("File: A.java"));
        assert!(prompt.contains("\"mapping_type\""));
    }

    #[test]
    fn test_code_is_truncated_by_chars() {
        let code = "é".repeat(20);
        let prompt = PromptBuilder::new(code, 5).build();
        assert!(prompt.contains(&format!("```java\n{}\n```", "é".repeat(5))));
    }
}
