//! Class and interface declaration index

use crate::types::Declaration;
use once_cell::sync::Lazy;
use regex::Regex;

static CLASS_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:public\s+)?(?:abstract\s+)?(?:final\s+)?\bclass\s+(\w+)(?:\s*<[^{]*?>)?(?:\s+extends\s+[\w.<>, ]+?)?(?:\s+implements\s+[^{]+)?\s*\{",
    )
    .unwrap()
});

static INTERFACE_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:public\s+)?\binterface\s+(\w+)(?:\s*<[^{]*?>)?(?:\s+extends\s+[^{]+)?\s*\{").unwrap()
});

/// Class declarations in textual order
pub fn extract_classes(text: &str) -> Vec<Declaration> {
    declarations(&CLASS_DECL, text)
}

/// Interface declarations in textual order
pub fn extract_interfaces(text: &str) -> Vec<Declaration> {
    declarations(&INTERFACE_DECL, text)
}

fn declarations(re: &Regex, text: &str) -> Vec<Declaration> {
    re.captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?;
            Some(Declaration {
                name: name.as_str().to_string(),
                offset: whole.start(),
            })
        })
        .collect()
}
