//! Field-assignment analysis over a mapping method body
//!
//! Patterns are built per method from the source and target variable names,
//! so every dynamic regex escapes those names first.

use crate::naming::{constant_to_camel, is_constant_identifier, lower_first};
use crate::scanner::paren_contents;
use mapwise_domain::FieldMapping;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use tracing::warn;

static LIST_ADD: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\w+)\.add\s*\(\s*(\w+)\s*\)").unwrap());

/// Limits applied while classifying setter arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignmentLimits {
    /// Literal arguments shorter than this are kept verbatim as the source
    pub max_literal_len: usize,

    /// Maximum characters of an argument kept as the expression
    pub value_preview_len: usize,
}

/// Extract field mappings from a method body
///
/// With a known target variable the multi-hop analysis also runs (locals fed
/// from the source, list accumulation, nested setters) and every mapping
/// carries a `target_path`. Without one only the direct patterns apply.
/// Passes are not deduplicated: a setter on a local that is later attached to
/// the target is reported by the direct pass and again under its nested path.
pub fn extract_field_assignments(
    body: &str,
    source_var: &str,
    target_var: Option<&str>,
    limits: AssignmentLimits,
) -> Vec<FieldMapping> {
    let src = regex::escape(source_var);
    let Some(getters) = SourceGetters::new(&src) else {
        return Vec::new();
    };

    let indirect = match target_var {
        Some(target_var) => indirect_assignments(body, &getters, target_var, limits),
        None => Vec::new(),
    };

    let mut fields = direct_setters(body, &src, target_var);
    fields.extend(direct_assignments(body, &src, target_var));
    fields.extend(indirect);
    fields
}

/// `target.setX(source.getY())`
fn direct_setters(body: &str, src: &str, target_var: Option<&str>) -> Vec<FieldMapping> {
    let Some(re) = dynamic(&format!(r"(\w+)\.set(\w+)\s*\(\s*{src}\.get(\w+)\s*\(\)\s*\)")) else {
        return Vec::new();
    };

    re.captures_iter(body)
        .filter_map(|caps| {
            let receiver = caps.get(1)?.as_str();
            let target_field = lower_first(caps.get(2)?.as_str());
            let source_field = lower_first(caps.get(3)?.as_str());
            Some(with_path(
                FieldMapping::direct(source_field, target_field),
                receiver,
                target_var,
            ))
        })
        .collect()
}

/// `target.x = source.y` and `target.x = source.getY()`
///
/// Other method calls on the source are skipped.
fn direct_assignments(body: &str, src: &str, target_var: Option<&str>) -> Vec<FieldMapping> {
    let Some(re) = dynamic(&format!(
        r"(\w+)\.(\w+)\s*=\s*{src}\.(?:get(\w+)\s*\(\s*\)|(\w+))"
    )) else {
        return Vec::new();
    };

    re.captures_iter(body)
        .filter_map(|caps| {
            let source_field = match (caps.get(3), caps.get(4)) {
                (Some(getter), _) => lower_first(getter.as_str()),
                (None, Some(field)) => {
                    if body[field.end()..].trim_start().starts_with('(') {
                        return None;
                    }
                    field.as_str().to_string()
                }
                (None, None) => return None,
            };
            let receiver = caps.get(1)?.as_str();
            let target_field = caps.get(2)?.as_str();
            Some(with_path(
                FieldMapping::direct(source_field, target_field),
                receiver,
                target_var,
            ))
        })
        .collect()
}

fn with_path(mapping: FieldMapping, receiver: &str, target_var: Option<&str>) -> FieldMapping {
    match target_var {
        Some(tv) if tv == receiver => {
            let path = mapping.target_field.clone();
            mapping.with_target_path(path)
        }
        Some(_) => {
            let path = format!("{}.{}", receiver, mapping.target_field);
            mapping.with_target_path(path)
        }
        None => mapping,
    }
}

/// Patterns that read from the source variable
struct SourceGetters {
    /// `source.getX().get(KEY)`
    map_key: Regex,
    /// `source.getX()`
    getter: Regex,
    /// `source.` anywhere
    mention: Regex,
    /// `source.getX()... instanceof Type local`
    instanceof: Regex,
    /// `local = source.getX()` with an optional `.get(KEY)`
    local: Regex,
}

impl SourceGetters {
    fn new(src: &str) -> Option<Self> {
        Some(Self {
            map_key: dynamic(&format!(r"\b{src}\.get(\w+)\s*\(\)\s*\.get\(\s*([^()]+?)\s*\)"))?,
            getter: dynamic(&format!(r"\b{src}\.get(\w+)\s*\(\)"))?,
            mention: dynamic(&format!(r"\b{src}\."))?,
            instanceof: dynamic(&format!(
                r"\b{src}\.[^&;{{}}]+?instanceof\s+[\w.<>]+\s+(\w+)"
            ))?,
            local: dynamic(&format!(
                r"(\w+)\s*=\s*{src}\.get(\w+)\s*\(\)(?:\s*\.get\(\s*([^()]+?)\s*\))?"
            ))?,
        })
    }

    /// Source path read by `expr`, if it calls a source getter
    fn resolve(&self, expr: &str) -> Option<String> {
        if let Some(caps) = self.map_key.captures(expr) {
            let base = caps.get(1)?.as_str();
            let key = caps.get(2)?.as_str();
            return Some(map_key_path(base, key));
        }
        self.getter
            .captures(expr)
            .and_then(|caps| caps.get(1))
            .map(|m| lower_first(m.as_str()))
    }

    /// Locals populated from the source, keyed by variable name
    fn locals(&self, body: &str) -> HashMap<String, String> {
        let mut locals = HashMap::new();

        for caps in self.instanceof.captures_iter(body) {
            let (Some(whole), Some(local)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if let Some(path) = self.resolve(whole.as_str()) {
                locals.insert(local.as_str().to_string(), path);
            }
        }

        for caps in self.local.captures_iter(body) {
            let (Some(local), Some(base)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            let path = match caps.get(3) {
                Some(key) => map_key_path(base.as_str(), key.as_str()),
                None => lower_first(base.as_str()),
            };
            locals.insert(local.as_str().to_string(), path);
        }

        locals
    }
}

/// `getMiscAttributes().get(SPECIAL_INSTRUCTIONS)` gives `miscAttributes.specialInstructions`
fn map_key_path(base: &str, key: &str) -> String {
    let key = key.trim().trim_matches(|c| c == '"' || c == '\'');
    let key = key.rsplit('.').next().unwrap_or(key);
    format!("{}.{}", lower_first(base), constant_to_camel(key))
}

/// Multi-hop mappings: locals and list items populated by setters, then
/// attached to the target through `target.setX(local)`
fn indirect_assignments(
    body: &str,
    getters: &SourceGetters,
    target_var: &str,
    limits: AssignmentLimits,
) -> Vec<FieldMapping> {
    let mut fields = Vec::new();

    let tgt = regex::escape(target_var);
    let Some(attach) = dynamic(&format!(r"\b{tgt}\.set(\w+)\s*\(\s*(\w+)\s*\)")) else {
        return fields;
    };

    let locals = getters.locals(body);
    let mut list_items: HashMap<&str, Vec<&str>> = HashMap::new();
    for caps in LIST_ADD.captures_iter(body) {
        if let (Some(list), Some(item)) = (caps.get(1), caps.get(2)) {
            list_items.entry(list.as_str()).or_default().push(item.as_str());
        }
    }

    for caps in attach.captures_iter(body) {
        let (Some(field), Some(local)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        let target_field = lower_first(field.as_str());
        let local = local.as_str();

        let (items, through_list) = match list_items.get(local) {
            Some(items) => (items.clone(), true),
            None => (vec![local], false),
        };

        let mut nested = Vec::new();
        for item in &items {
            nested.extend(inner_setters(body, item));
        }

        if nested.is_empty() {
            // a scalar local copied straight from the source
            if let Some(source) = locals.get(local) {
                fields.push(
                    FieldMapping::direct(source.clone(), target_field.clone())
                        .with_target_path(format!("{}.{}", target_var, target_field)),
                );
            }
            continue;
        }

        let separator = if through_list { "[]." } else { "." };
        for (nested_field, value) in nested {
            let source = resolve_value(&value, getters, &locals, limits.max_literal_len);
            let field_path = format!("{}{}{}", target_field, separator, lower_first(&nested_field));
            fields.push(
                FieldMapping::direct(source, field_path.clone())
                    .with_expression(Some(preview(&value, limits.value_preview_len)))
                    .with_target_path(format!("{}.{}", target_var, field_path)),
            );
        }
    }

    fields
}

/// `var.setX(<argument>)` calls, argument captured with balanced parentheses
fn inner_setters(body: &str, var: &str) -> Vec<(String, String)> {
    let Some(re) = dynamic(&format!(r"\b{}\.set(\w+)\s*\(", regex::escape(var))) else {
        return Vec::new();
    };

    re.captures_iter(body)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let field = caps.get(1)?.as_str().to_string();
            let (value, _) = paren_contents(body, whole.end() - 1);
            let value = value.trim();
            if value.is_empty() {
                return None;
            }
            Some((field, value.to_string()))
        })
        .collect()
}

/// Classify a setter argument into a source path or a sentinel
fn resolve_value(
    value: &str,
    getters: &SourceGetters,
    locals: &HashMap<String, String>,
    max_literal_len: usize,
) -> String {
    if getters.mention.is_match(value) {
        return getters.resolve(value).unwrap_or_else(|| "unknown".to_string());
    }
    if let Some(source) = locals.get(value) {
        return source.clone();
    }
    if is_constant_identifier(value) {
        return format!("constant:{}", value);
    }
    if value.chars().count() < max_literal_len && !value.starts_with("new ") {
        return value.to_string();
    }
    "constant".to_string()
}

fn preview(value: &str, limit: usize) -> String {
    if value.chars().count() > limit {
        let cut: String = value.chars().take(limit).collect();
        format!("{}...", cut)
    } else {
        value.to_string()
    }
}

fn dynamic(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!("Skipping pattern {}: {}", pattern, e);
            None
        }
    }
}
