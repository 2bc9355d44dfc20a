//! JSON Schema derivation and validation for tool inputs

use crate::error::{BridgeError, Result};
use schemars::JsonSchema;
use serde_json::{json, Value};

/// Derive the JSON schema for a typed parameter or output struct.
pub fn schema_of<T: JsonSchema>() -> Value {
    let root = schemars::schema_for!(T);
    serde_json::to_value(root).unwrap_or_else(|_| json!({"type": "object"}))
}

/// Compile a schema once, at registration time (jsonschema 0.26+ API).
pub fn compile(schema: &Value) -> Result<jsonschema::Validator> {
    jsonschema::validator_for(schema)
        .map_err(|err| BridgeError::Internal(format!("invalid tool schema: {err}")))
}

/// Validate arguments against a compiled schema. Only the first offending
/// field is reported, so the same invalid input always yields the same
/// message.
pub fn validate_arguments(validator: &jsonschema::Validator, args: &Value) -> Result<()> {
    if let Err(error) = validator.validate(args) {
        let path = error.instance_path().to_string();
        let location = if path.is_empty() {
            "arguments".to_string()
        } else {
            path
        };
        return Err(BridgeError::InvalidArgument(format!("{location}: {error}")));
    }
    Ok(())
}

/// Deserialize schema-checked arguments into their typed form.
pub fn parse_arguments<T: serde::de::DeserializeOwned>(args: Value) -> Result<T> {
    serde_json::from_value(args)
        .map_err(|err| BridgeError::InvalidArgument(format!("arguments: {err}")))
}

/// Serialize a tool's typed output for the wire.
pub fn to_output<T: serde::Serialize>(output: &T) -> Result<Value> {
    serde_json::to_value(output)
        .map_err(|err| BridgeError::Internal(format!("output serialization: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, JsonSchema)]
    #[allow(dead_code)]
    struct DemoInput {
        name: String,
        #[serde(default)]
        count: u32,
    }

    #[test]
    fn test_derived_schema_marks_required_fields() {
        let schema = schema_of::<DemoInput>();
        let required = schema["required"].as_array().unwrap();
        assert!(required.iter().any(|v| v == "name"));
        assert!(!required.iter().any(|v| v == "count"));
    }

    #[test]
    fn test_valid_arguments_pass() {
        let validator = compile(&schema_of::<DemoInput>()).unwrap();
        assert!(validate_arguments(&validator, &json!({"name": "web"})).is_ok());
        assert!(validate_arguments(&validator, &json!({"name": "web", "count": 3})).is_ok());
    }

    #[test]
    fn test_missing_required_field_is_invalid_argument() {
        let validator = compile(&schema_of::<DemoInput>()).unwrap();
        let err = validate_arguments(&validator, &json!({})).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidArgument);
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn test_first_offending_field_is_deterministic() {
        let validator = compile(&schema_of::<DemoInput>()).unwrap();
        let bad = json!({"name": 7, "count": "many"});
        let first = validate_arguments(&validator, &bad).unwrap_err().to_string();
        for _ in 0..5 {
            let again = validate_arguments(&validator, &bad).unwrap_err().to_string();
            assert_eq!(first, again);
        }
    }

    #[test]
    fn test_type_mismatch_names_the_field() {
        let validator = compile(&schema_of::<DemoInput>()).unwrap();
        let err = validate_arguments(&validator, &json!({"name": "web", "count": "x"}))
            .unwrap_err()
            .to_string();
        assert!(err.contains("/count"), "unexpected message: {err}");
    }

    #[test]
    fn test_offending_location_is_a_json_pointer() {
        #[derive(Deserialize, JsonSchema)]
        #[allow(dead_code)]
        struct Outer {
            inner: DemoInput,
        }

        let validator = compile(&schema_of::<Outer>()).unwrap();
        let err = validate_arguments(&validator, &json!({"inner": {"name": 7}}))
            .unwrap_err()
            .to_string();
        assert!(err.contains("/inner/name"), "unexpected message: {err}");
    }
}
