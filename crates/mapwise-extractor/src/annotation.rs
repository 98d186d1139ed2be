//! `@Mapping` / `@Mappings` annotation parsing

use crate::scanner::{brace_contents, paren_contents};
use crate::types::MappingArgs;
use once_cell::sync::Lazy;
use regex::Regex;

static MAPPING_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"@(Mappings|Mapping)\s*\(").unwrap());
static SOURCE_ARG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\bsource\s*=\s*["']([^"']+)["']"#).unwrap());
static TARGET_ARG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\btarget\s*=\s*["']([^"']+)["']"#).unwrap());
static EXPRESSION_ARG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\bexpression\s*=\s*["']([^"']+)["']"#).unwrap());
static IGNORE_ARG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bignore\s*=\s*(true|false)").unwrap());

/// Extract every `@Mapping` in `text`, in textual order
///
/// `@Mappings({ ... })` groups are unwrapped in place, so each annotation is
/// reported once whether it stands alone or sits inside a group. Annotations
/// without a `target` are not mapping declarations and are dropped.
pub fn extract_mapping_annotations(text: &str) -> Vec<MappingArgs> {
    let mut found = Vec::new();
    let mut cursor = 0;

    while let Some(caps) = MAPPING_OPEN.captures_at(text, cursor) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        let (inner, close) = paren_contents(text, whole.end() - 1);

        if name.as_str() == "Mappings" {
            found.extend(extract_mapping_annotations(group_content(inner)));
        } else if let Some(args) = parse_args(inner) {
            found.push(args);
        }
        cursor = close.max(whole.end());
    }

    found
}

/// Content of `{ ... }` inside a group, or the whole group when unbraced
fn group_content(inner: &str) -> &str {
    match inner.find('{') {
        Some(open) => brace_contents(inner, open).0,
        None => inner,
    }
}

fn parse_args(args: &str) -> Option<MappingArgs> {
    let capture = |re: &Regex| {
        re.captures(args)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
    };

    let target = capture(&TARGET_ARG)?;
    Some(MappingArgs {
        source: capture(&SOURCE_ARG),
        target,
        expression: capture(&EXPRESSION_ARG),
        ignore: capture(&IGNORE_ARG).is_some_and(|v| v == "true"),
    })
}
