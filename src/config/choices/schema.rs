use anyhow::{Context, Result, anyhow, bail};
use schemars::{JsonSchema, Schema};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Number,
    Boolean,
}

/// One tunable parameter of a choice, as a host would render it.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub title: String,
    pub description: Option<String>,
    pub required: bool,
    pub nullable: bool,
    pub kind: FieldKind,
    pub default: Option<Value>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub allowed: Option<Vec<String>>,
}

// Whole tagged-enum schema for T
pub fn schema_for<T: JsonSchema>() -> Schema {
    schemars::schema_for!(T)
}

/// Lists the params of the `kind_key` branch of a tagged-enum schema.
pub fn specs_for_kind(root: &Schema, kind_key: &str) -> Result<Vec<FieldSpec>> {
    let root_obj = root.as_object().context("root schema is not an object")?;

    let alts = root_obj
        .get("oneOf")
        .or_else(|| root_obj.get("anyOf"))
        .and_then(Value::as_array)
        .context("missing oneOf/anyOf")?;

    for branch in alts {
        let bobj = branch.as_object().context("branch is not object")?;
        let Some(props) = bobj.get("properties").and_then(Value::as_object) else {
            continue;
        };
        if !discriminant_matches(props, kind_key) {
            continue;
        }

        let Some(params_obj) = props
            .get("params")
            .and_then(Value::as_object)
            .and_then(|o| resolve_ref_obj(root_obj, o))
        else {
            return Ok(vec![]);
        };
        let Some(params_props) = params_obj.get("properties").and_then(Value::as_object) else {
            return Ok(vec![]);
        };

        let required: Vec<&str> = params_obj
            .get("required")
            .and_then(Value::as_array)
            .map(|a| a.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let mut out = Vec::new();
        for (name, field_schema) in params_props {
            let field_obj = field_schema
                .as_object()
                .with_context(|| format!("schema of field '{name}' is not an object"))?;
            let (target, nullable) = field_target(root_obj, field_obj)
                .ok_or_else(|| anyhow!("failed to resolve field $ref for '{name}'"))?;

            // metadata written next to a $ref wins over the referenced definition
            let meta = |key: &str| field_obj.get(key).or_else(|| target.get(key));

            let Some((kind, type_nullable)) = detect_field_kind(target.get("type")) else {
                continue;
            };

            out.push(FieldSpec {
                name: name.clone(),
                title: meta("title")
                    .and_then(Value::as_str)
                    .unwrap_or(name)
                    .to_string(),
                description: meta("description")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                required: required.contains(&name.as_str()),
                nullable: nullable || type_nullable,
                kind,
                default: meta("default").cloned(),
                min: meta("minimum")
                    .or_else(|| meta("exclusiveMinimum"))
                    .and_then(Value::as_f64),
                max: meta("maximum")
                    .or_else(|| meta("exclusiveMaximum"))
                    .and_then(Value::as_f64),
                allowed: target.get("enum").and_then(Value::as_array).map(|a| {
                    a.iter()
                        .filter_map(|v| v.as_str().map(str::to_string))
                        .collect()
                }),
            });
        }
        return Ok(out);
    }

    bail!("no branch found for type={kind_key}");
}

fn discriminant_matches(props: &Map<String, Value>, kind_key: &str) -> bool {
    let Some(tobj) = props.get("type").and_then(Value::as_object) else {
        return false;
    };

    if tobj.get("const").and_then(Value::as_str) == Some(kind_key) {
        return true;
    }
    if let Some(arr) = tobj.get("enum").and_then(Value::as_array) {
        return arr.len() == 1 && arr[0].as_str() == Some(kind_key);
    }
    false
}

/// The schema object describing a field's values, looking through a `$ref`
/// and through `anyOf`/`oneOf`/`allOf` wrappers such as `Option<Enum>`.
/// The flag is set when one of the wrapped alternatives is `null`.
fn field_target<'a>(
    root_obj: &'a Map<String, Value>,
    field_obj: &'a Map<String, Value>,
) -> Option<(&'a Map<String, Value>, bool)> {
    for key in ["anyOf", "oneOf", "allOf"] {
        let Some(alts) = field_obj.get(key).and_then(Value::as_array) else {
            continue;
        };
        let nullable = alts
            .iter()
            .any(|a| a.get("type").and_then(Value::as_str) == Some("null"));
        let inner = alts
            .iter()
            .filter_map(Value::as_object)
            .find(|a| a.get("type").and_then(Value::as_str) != Some("null"))?;
        return Some((resolve_ref_obj(root_obj, inner)?, nullable));
    }
    Some((resolve_ref_obj(root_obj, field_obj)?, false))
}

/// Resolve a local $ref like "#/$defs/TreeParameters" against the root object.
/// Returns the referenced object map, or None if it can't be resolved.
fn resolve_ref_obj<'a>(
    root_obj: &'a Map<String, Value>,
    obj: &'a Map<String, Value>,
) -> Option<&'a Map<String, Value>> {
    match obj.get("$ref") {
        Some(Value::String(r)) => {
            let path = r.strip_prefix("#/")?;
            let mut cur: &Map<String, Value> = root_obj;
            for raw_seg in path.split('/') {
                // JSON Pointer unescape (~1 => /, ~0 => ~)
                let seg = raw_seg.replace("~1", "/").replace("~0", "~");
                cur = cur.get(&seg)?.as_object()?;
            }
            Some(cur)
        }
        _ => Some(obj),
    }
}

fn primitive_kind(name: &str) -> Option<FieldKind> {
    match name {
        "string" => Some(FieldKind::String),
        "integer" => Some(FieldKind::Integer),
        "number" => Some(FieldKind::Number),
        "boolean" => Some(FieldKind::Boolean),
        _ => None,
    }
}

fn detect_field_kind(ty: Option<&Value>) -> Option<(FieldKind, bool)> {
    match ty {
        Some(Value::String(s)) => primitive_kind(s).map(|k| (k, false)),
        Some(Value::Array(arr)) => {
            // unions like ["null","integer"] for Option<T>
            let names: Vec<&str> = arr.iter().filter_map(Value::as_str).collect();
            let kind = names.iter().find_map(|s| primitive_kind(s))?;
            Some((kind, names.contains(&"null")))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::choices::LearnerChoice;
    use serde::{Deserialize, Serialize};
    use serde_json::json;

    #[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
    struct NoParams {}

    #[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
    #[serde(tag = "type", content = "params", rename_all = "kebab-case")]
    enum TinyChoice {
        Unit(NoParams),
    }

    fn spec<'a>(specs: &'a [FieldSpec], name: &str) -> &'a FieldSpec {
        specs
            .iter()
            .find(|s| s.name == name)
            .unwrap_or_else(|| panic!("no spec for {name}"))
    }

    #[test]
    fn detect_field_kind_handles_primitives_and_nullable_unions() {
        assert_eq!(
            detect_field_kind(Some(&json!("integer"))),
            Some((FieldKind::Integer, false))
        );
        assert_eq!(
            detect_field_kind(Some(&json!("boolean"))),
            Some((FieldKind::Boolean, false))
        );
        assert_eq!(
            detect_field_kind(Some(&json!(["null", "number"]))),
            Some((FieldKind::Number, true))
        );
        assert_eq!(
            detect_field_kind(Some(&json!(["string", "null"]))),
            Some((FieldKind::String, true))
        );
        assert!(detect_field_kind(Some(&json!("object"))).is_none());
        assert!(detect_field_kind(None).is_none());
    }

    #[test]
    fn resolve_ref_obj_follows_refs_and_unescapes() {
        let root = json!({
            "$defs": {
                "a~b": { "inner/seg": { "type": "number" } }
            }
        })
        .as_object()
        .unwrap()
        .clone();

        let obj = json!({ "$ref": "#/$defs/a~0b/inner~1seg" })
            .as_object()
            .unwrap()
            .clone();
        let out = resolve_ref_obj(&root, &obj).expect("ref resolved");
        assert_eq!(out.get("type").and_then(Value::as_str), Some("number"));

        let me = json!({"type": "integer"}).as_object().unwrap().clone();
        assert_eq!(resolve_ref_obj(&root, &me), Some(&me));
    }

    #[test]
    fn field_target_looks_through_optional_refs() {
        let root = json!({
            "$defs": { "MaxFeatures": { "type": "string", "enum": ["all", "sqrt"] } }
        })
        .as_object()
        .unwrap()
        .clone();
        let field = json!({
            "title": "Max Features",
            "anyOf": [{ "$ref": "#/$defs/MaxFeatures" }, { "type": "null" }]
        })
        .as_object()
        .unwrap()
        .clone();

        let (target, nullable) = field_target(&root, &field).unwrap();
        assert!(nullable);
        assert_eq!(target.get("type").and_then(Value::as_str), Some("string"));
    }

    #[test]
    fn discriminant_matches_via_const_and_enum() {
        let props_const = json!({ "type": { "const": "naive-bayes" } })
            .as_object()
            .unwrap()
            .clone();
        let props_enum = json!({ "type": { "enum": ["naive-bayes"] } })
            .as_object()
            .unwrap()
            .clone();

        assert!(discriminant_matches(&props_const, "naive-bayes"));
        assert!(discriminant_matches(&props_enum, "naive-bayes"));
        assert!(!discriminant_matches(&props_const, "other"));
    }

    #[test]
    fn forest_specs_carry_titles_ranges_and_choices() {
        let root = schema_for::<LearnerChoice>();
        let specs = specs_for_kind(&root, "random-forest-classifier").unwrap();

        let trees = spec(&specs, "n_estimators");
        assert_eq!(trees.kind, FieldKind::Integer);
        assert_eq!(trees.title, "Trees");
        assert_eq!(trees.min, Some(1.0));
        assert_eq!(trees.default.as_ref().and_then(Value::as_u64), Some(100));

        let bootstrap = spec(&specs, "bootstrap");
        assert_eq!(bootstrap.kind, FieldKind::Boolean);

        let depth = spec(&specs, "max_depth");
        assert!(depth.nullable);
        assert_eq!(depth.min, Some(1.0));

        let features = spec(&specs, "max_features");
        assert_eq!(features.kind, FieldKind::String);
        assert_eq!(features.title, "Max Features");
        let allowed = features.allowed.as_ref().expect("enum values");
        for v in ["all", "sqrt", "log2"] {
            assert!(allowed.iter().any(|a| a == v), "missing {v}");
        }
    }

    #[test]
    fn naive_bayes_specs_list_smoothing() {
        let root = schema_for::<LearnerChoice>();
        let specs = specs_for_kind(&root, "naive-bayes").unwrap();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].name, "var_smoothing");
        assert_eq!(specs[0].kind, FieldKind::Number);
        assert_eq!(specs[0].min, Some(0.0));
    }

    #[test]
    fn variant_with_no_params_is_empty() {
        let root = schema_for::<TinyChoice>();
        assert!(specs_for_kind(&root, "unit").unwrap().is_empty());
    }

    #[test]
    fn unknown_kind_errors() {
        let root = schema_for::<LearnerChoice>();
        let err = specs_for_kind(&root, "does-not-exist").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("no branch found"), "msg was: {msg}");
    }
}
