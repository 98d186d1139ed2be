//! Hand-written POJO mapping method extraction
//!
//! Every method declaration in the file is a candidate site. Four signature
//! rules are tried per site in priority order; the first that accepts the
//! site decides the source and target, then the body is analyzed for field
//! assignments. Sites that yield no field mapping are dropped.

use crate::assignments::{extract_field_assignments, AssignmentLimits};
use crate::mapstruct::UNKNOWN_TYPE;
use crate::scanner::brace_contents;
use crate::signature::{is_reserved, parse_params, Param};
use crate::types::{PojoHit, SignatureRule};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

static METHOD_SITE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"([\w.]+(?:<(?:[^<>;{}()]|<[^<>;{}()]*>)*>)?(?:\[\])*)\s+(\w+)\s*\(([^)]*)\)\s*(?:throws\s+[\w.,\s]+?)?\s*\{",
    )
    .unwrap()
});

const CONVENTIONAL_PREFIXES: &[&str] = &["map", "convert", "transform", "to"];

/// A method declaration with a body
#[derive(Debug, Clone)]
pub(crate) struct MethodSite<'a> {
    pub(crate) return_type: &'a str,
    pub(crate) name: &'a str,
    pub(crate) params: Vec<Param>,
    pub(crate) body: &'a str,
}

impl MethodSite<'_> {
    fn is_void(&self) -> bool {
        self.return_type == "void"
    }

    /// `mapXxx` with at least one character after the prefix
    fn is_map_prefixed(&self) -> bool {
        self.name.len() > 3 && self.name.starts_with("map")
    }
}

/// Source and target chosen by a signature rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Binding {
    pub(crate) source_type: String,
    pub(crate) source_var: String,
    pub(crate) target_type: String,
    pub(crate) target_var: Option<String>,
}

type SignatureMatcher = fn(&MethodSite<'_>) -> Option<Binding>;

/// Signature rules, most specific first
const RULES: [(SignatureRule, SignatureMatcher); 4] = [
    (SignatureRule::VoidWithTarget, void_with_target),
    (SignatureRule::TypedReturn, typed_return),
    (SignatureRule::VoidSingleParam, void_single_param),
    (SignatureRule::ConventionalName, conventional_name),
];

/// `void mapXxx(Source src, Target tgt)`
fn void_with_target(site: &MethodSite<'_>) -> Option<Binding> {
    if !site.is_void() || !site.is_map_prefixed() || site.params.len() < 2 {
        return None;
    }
    let (source, target) = (&site.params[0], &site.params[1]);
    Some(Binding {
        source_type: source.ty.clone(),
        source_var: source.name.clone(),
        target_type: target.ty.clone(),
        target_var: Some(target.name.clone()),
    })
}

/// `Target mapXxx(Source src)`
fn typed_return(site: &MethodSite<'_>) -> Option<Binding> {
    if site.is_void() || !site.is_map_prefixed() {
        return None;
    }
    returned_binding(site)
}

/// `void mapXxx(Source src)`, target taken from the first setter receiver
/// whose type is declared in the body
///
/// A receiver declared outside the body (a field) gives an unknown target type.
fn void_single_param(site: &MethodSite<'_>) -> Option<Binding> {
    if !site.is_void() || !site.is_map_prefixed() {
        return None;
    }
    let source = site.params.first()?;
    let (target_var, target_type) = setter_receiver(site.body, &source.name)?;
    Some(Binding {
        source_type: source.ty.clone(),
        source_var: source.name.clone(),
        target_type,
        target_var: Some(target_var),
    })
}

/// `Target convertXxx(Source src)`, also `map`, `transform` and `to` prefixes
fn conventional_name(site: &MethodSite<'_>) -> Option<Binding> {
    if site.is_void() || !CONVENTIONAL_PREFIXES.iter().any(|p| site.name.starts_with(p)) {
        return None;
    }
    returned_binding(site)
}

fn returned_binding(site: &MethodSite<'_>) -> Option<Binding> {
    let source = site.params.first()?;
    Some(Binding {
        source_type: source.ty.clone(),
        source_var: source.name.clone(),
        target_type: site.return_type.to_string(),
        target_var: returned_variable(site.body, site.return_type),
    })
}

/// The variable a typed method builds: `Type var = ...` or `return var;`
fn returned_variable(body: &str, return_type: &str) -> Option<String> {
    let declared = format!(r"{}\s+(\w+)\s*=", regex::escape(return_type));
    if let Some(var) = first_capture(&declared, body) {
        return Some(var);
    }
    first_capture(r"\breturn\s+(\w+)\s*;", body).filter(|var| var != "null")
}

/// First `var.setX(` receiver other than the source with a `Type var =`
/// declaration in the body, else the first such receiver typed as unknown
fn setter_receiver(body: &str, source_var: &str) -> Option<(String, String)> {
    static SETTER_RECEIVER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\w+)\.set\w+\s*\(").unwrap());

    let mut undeclared = None;
    for caps in SETTER_RECEIVER.captures_iter(body) {
        let Some(receiver) = caps.get(1).map(|m| m.as_str()) else {
            continue;
        };
        if receiver == source_var || receiver == "this" {
            continue;
        }
        let declared = format!(
            r"([\w.]+(?:<[^;=]*>)?)\s+{}\s*=",
            regex::escape(receiver)
        );
        if let Some(ty) = first_capture(&declared, body) {
            return Some((receiver.to_string(), ty));
        }
        undeclared.get_or_insert(receiver);
    }
    undeclared.map(|receiver| (receiver.to_string(), UNKNOWN_TYPE.to_string()))
}

fn first_capture(pattern: &str, text: &str) -> Option<String> {
    match Regex::new(pattern) {
        Ok(re) => re
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string()),
        Err(e) => {
            warn!("Skipping pattern {}: {}", pattern, e);
            None
        }
    }
}

/// Enumerate method declarations that have a body
pub(crate) fn method_sites(text: &str) -> Vec<MethodSite<'_>> {
    METHOD_SITE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let return_type = caps.get(1)?.as_str();
            let name = caps.get(2)?.as_str();
            if is_reserved(return_type) || is_reserved(name) {
                return None;
            }
            let (body, _) = brace_contents(text, whole.end() - 1);
            Some(MethodSite {
                return_type,
                name,
                params: parse_params(caps.get(3)?.as_str()),
                body,
            })
        })
        .collect()
}

/// Pick the first rule that accepts the site
pub(crate) fn bind(site: &MethodSite<'_>) -> Option<(SignatureRule, Binding)> {
    RULES
        .iter()
        .find_map(|(rule, matcher)| matcher(site).map(|binding| (*rule, binding)))
}

/// Extract raw POJO hits in textual order
pub fn extract_pojo_mappings(text: &str, limits: AssignmentLimits) -> Vec<PojoHit> {
    let mut hits = Vec::new();

    for site in method_sites(text) {
        let Some((rule, binding)) = bind(&site) else {
            continue;
        };

        let fields = extract_field_assignments(
            site.body,
            &binding.source_var,
            binding.target_var.as_deref(),
            limits,
        );
        if fields.is_empty() {
            debug!("Method {} ({:?}) has no field assignments", site.name, rule);
            continue;
        }

        debug!(
            "Method {} ({:?}): {} -> {}, {} fields",
            site.name,
            rule,
            binding.source_type,
            binding.target_type,
            fields.len()
        );
        hits.push(PojoHit {
            method_name: site.name.to_string(),
            return_type: site.return_type.to_string(),
            source_type: binding.source_type,
            source_var: binding.source_var,
            target_type: binding.target_type,
            target_var: binding.target_var,
            rule,
            fields,
        });
    }

    hits
}
