use crate::config::choices::{Choice, LearnerChoice};
use anyhow::{Context, Result, anyhow, bail};
use serde_json::{Map, Value};
use std::str::FromStr;

/// A `key=value` override; dots in the key address nested objects.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyValue {
    pub key: String,
    pub value: Value,
}

impl FromStr for KeyValue {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self> {
        parse_key_value(raw)
    }
}

/// Parses `key=value`. The value is read as JSON when it parses as JSON and
/// kept as a plain string otherwise.
pub fn parse_key_value(raw: &str) -> Result<KeyValue> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| anyhow!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        bail!("key cannot be empty");
    }

    Ok(KeyValue {
        key: key.to_string(),
        value: parse_literal(value.trim()),
    })
}

fn parse_literal(raw: &str) -> Value {
    if raw.is_empty() {
        return Value::String(String::new());
    }
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Parses a kind name, accepting `CamelCase`, `snake_case` and `kebab-case`.
pub fn parse_kind<T>(raw: &str) -> Result<T>
where
    T: FromStr,
{
    candidate_spellings(raw)
        .into_iter()
        .find_map(|cand| cand.parse::<T>().ok())
        .ok_or_else(|| anyhow!("could not parse value '{raw}'"))
}

fn candidate_spellings(input: &str) -> Vec<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let mut out = vec![
        trimmed.to_string(),
        trimmed.to_lowercase(),
        kebab_from_token(trimmed),
        trimmed.replace('_', "-"),
        trimmed.to_lowercase().replace('_', "-"),
    ];
    out.sort();
    out.dedup();
    out
}

fn kebab_from_token(token: &str) -> String {
    let mut buf = String::new();
    let mut prev_lower = false;
    for ch in token.chars() {
        if ch.is_uppercase() {
            if prev_lower {
                buf.push('-');
            }
            buf.extend(ch.to_lowercase());
            prev_lower = false;
        } else if ch == '_' || ch == ' ' {
            buf.push('-');
            prev_lower = false;
        } else {
            buf.push(ch);
            prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        }
    }
    buf
}

pub fn apply_overrides(target: &mut Value, overrides: &[KeyValue]) -> Result<()> {
    for kv in overrides {
        set_path(target, &kv.key, kv.value.clone())
            .with_context(|| format!("failed to set '{}'", kv.key))?;
    }
    Ok(())
}

fn set_path(target: &mut Value, path: &str, new_value: Value) -> Result<()> {
    let segments: Vec<&str> = path.split('.').filter(|s| !s.is_empty()).collect();
    let Some((last, parents)) = segments.split_last() else {
        bail!("empty key is not allowed");
    };

    let mut current = target;
    for seg in parents {
        current = as_object(current)?
            .entry((*seg).to_string())
            .or_insert(Value::Null);
    }
    as_object(current)?.insert((*last).to_string(), new_value);
    Ok(())
}

fn as_object(value: &mut Value) -> Result<&mut Map<String, Value>> {
    if value.is_null() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => Ok(map),
        other => bail!("cannot set nested field on non-object value: {other}"),
    }
}

/// Builds a choice from a loosely spelled kind, its default params and the
/// given overrides.
pub fn build_choice<C>(kind_input: &str, overrides: &[KeyValue]) -> Result<C>
where
    C: Choice,
    C::Kind: FromStr,
{
    let kind = parse_kind::<C::Kind>(kind_input)?;
    let mut params = C::default_params(kind);
    apply_overrides(&mut params, overrides)?;
    C::from_parts(kind, params)
}

/// `learner_from_args("RandomForestClassifier", &["n_estimators=50", "seed=10"])`
pub fn learner_from_args<S: AsRef<str>>(kind: &str, overrides: &[S]) -> Result<LearnerChoice> {
    let overrides = overrides
        .iter()
        .map(|raw| parse_key_value(raw.as_ref()))
        .collect::<Result<Vec<_>>>()?;
    build_choice::<LearnerChoice>(kind, &overrides)
        .with_context(|| format!("invalid learner '{kind}'"))
}
