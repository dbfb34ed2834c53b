use std::collections::HashMap;

use serde_json::{Map, Value, json};

use super::ToolError;

/// Scalar type accepted by a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Integer,
    Float,
}

impl ParamKind {
    /// JSON Schema type name for this kind.
    #[must_use]
    pub const fn json_type(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "number",
        }
    }
}

/// A validated argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    String(String),
    Integer(i64),
    Float(f64),
}

impl ParamValue {
    #[must_use]
    pub const fn kind(&self) -> ParamKind {
        match self {
            Self::String(_) => ParamKind::String,
            Self::Integer(_) => ParamKind::Integer,
            Self::Float(_) => ParamKind::Float,
        }
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::String(value) => Value::String(value.clone()),
            Self::Integer(value) => json!(value),
            Self::Float(value) => json!(value),
        }
    }
}

/// Extra check applied after the type check passes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constraint {
    /// Inclusive integer bounds.
    IntRange { min: i64, max: i64 },
    /// Inclusive float bounds.
    FloatRange { min: f64, max: f64 },
    /// String must be one of the listed choices.
    OneOf(&'static [&'static str]),
    /// String must be an EVM address (`0x` followed by 40 hex digits).
    Address,
}

/// Declared parameter of a tool.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub description: &'static str,
    pub default: Option<ParamValue>,
    pub constraint: Option<Constraint>,
}

impl ParamSpec {
    #[must_use]
    pub const fn new(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
            default: None,
            constraint: None,
        }
    }

    #[must_use]
    pub const fn string(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamKind::String, description)
    }

    #[must_use]
    pub const fn integer(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamKind::Integer, description)
    }

    #[must_use]
    pub const fn float(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamKind::Float, description)
    }

    /// EVM token address parameter; required, no default.
    #[must_use]
    pub const fn address(name: &'static str, description: &'static str) -> Self {
        Self::string(name, description).with_constraint(Constraint::Address)
    }

    #[must_use]
    pub fn with_default(mut self, default: ParamValue) -> Self {
        self.default = Some(default);
        self
    }

    #[must_use]
    pub const fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraint = Some(constraint);
        self
    }

    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.default.is_none()
    }

    /// Validates a raw argument, applying the default when it is missing or null.
    ///
    /// # Errors
    /// Returns `ToolError::Validation` when a required argument is missing, the
    /// value has the wrong type, or it violates the declared constraint.
    pub fn validate(&self, raw: Option<&Value>) -> Result<ParamValue, ToolError> {
        let value = match raw {
            None | Some(Value::Null) => {
                return self.default.clone().ok_or_else(|| {
                    ToolError::Validation(format!("missing required argument `{}`", self.name))
                });
            }
            Some(value) => self.coerce(value)?,
        };
        self.check_constraint(&value)?;
        Ok(value)
    }

    fn coerce(&self, raw: &Value) -> Result<ParamValue, ToolError> {
        let coerced = match self.kind {
            ParamKind::String => raw.as_str().map(|value| ParamValue::String(value.to_string())),
            ParamKind::Integer => raw.as_i64().map(ParamValue::Integer),
            ParamKind::Float => raw.as_f64().map(ParamValue::Float),
        };
        coerced.ok_or_else(|| {
            ToolError::Validation(format!(
                "argument `{}` must be of type {}, got {}",
                self.name,
                self.kind.json_type(),
                json_type_name(raw)
            ))
        })
    }

    fn check_constraint(&self, value: &ParamValue) -> Result<(), ToolError> {
        let Some(constraint) = self.constraint else {
            return Ok(());
        };
        let ok = match (constraint, value) {
            (Constraint::IntRange { min, max }, ParamValue::Integer(value)) => {
                (min..=max).contains(value)
            }
            (Constraint::FloatRange { min, max }, ParamValue::Float(value)) => {
                (min..=max).contains(value)
            }
            (Constraint::OneOf(choices), ParamValue::String(value)) => {
                choices.contains(&value.as_str())
            }
            (Constraint::Address, ParamValue::String(value)) => is_evm_address(value),
            _ => false,
        };
        if ok {
            Ok(())
        } else {
            Err(ToolError::Validation(format!(
                "argument `{}` {}",
                self.name,
                describe_constraint(constraint)
            )))
        }
    }

    /// JSON Schema fragment describing this parameter.
    #[must_use]
    pub fn schema(&self) -> Value {
        let mut schema = Map::new();
        schema.insert("type".into(), Value::from(self.kind.json_type()));
        schema.insert("description".into(), Value::from(self.description));
        if let Some(default) = &self.default {
            schema.insert("default".into(), default.to_json());
        }
        match self.constraint {
            Some(Constraint::IntRange { min, max }) => {
                schema.insert("minimum".into(), json!(min));
                schema.insert("maximum".into(), json!(max));
            }
            Some(Constraint::FloatRange { min, max }) => {
                schema.insert("minimum".into(), json!(min));
                schema.insert("maximum".into(), json!(max));
            }
            Some(Constraint::OneOf(choices)) => {
                schema.insert("enum".into(), json!(choices));
            }
            Some(Constraint::Address) => {
                schema.insert("pattern".into(), Value::from("^0x[0-9a-fA-F]{40}$"));
            }
            None => {}
        }
        Value::Object(schema)
    }
}

/// Arguments that passed validation, keyed by parameter name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolArgs {
    values: HashMap<&'static str, ParamValue>,
}

impl ToolArgs {
    /// Validates raw arguments against a parameter list.
    ///
    /// # Errors
    /// Returns `ToolError::Validation` for undeclared arguments or any
    /// parameter that fails `ParamSpec::validate`.
    pub fn validate(params: &[ParamSpec], raw: &Map<String, Value>) -> Result<Self, ToolError> {
        if let Some(unknown) = raw
            .keys()
            .find(|key| !params.iter().any(|param| param.name == key.as_str()))
        {
            return Err(ToolError::Validation(format!("unexpected argument `{unknown}`")));
        }

        let mut values = HashMap::with_capacity(params.len());
        for param in params {
            values.insert(param.name, param.validate(raw.get(param.name))?);
        }
        Ok(Self { values })
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// # Errors
    /// Returns `ToolError::Internal` if the handler asks for an undeclared or
    /// differently typed parameter.
    pub fn string(&self, name: &str) -> Result<&str, ToolError> {
        match self.get(name) {
            Some(ParamValue::String(value)) => Ok(value),
            other => Err(mismatch(name, ParamKind::String, other)),
        }
    }

    /// # Errors
    /// Returns `ToolError::Internal` on a handler/descriptor mismatch.
    pub fn integer(&self, name: &str) -> Result<i64, ToolError> {
        match self.get(name) {
            Some(ParamValue::Integer(value)) => Ok(*value),
            other => Err(mismatch(name, ParamKind::Integer, other)),
        }
    }

    /// # Errors
    /// Returns `ToolError::Internal` on a handler/descriptor mismatch.
    pub fn float(&self, name: &str) -> Result<f64, ToolError> {
        match self.get(name) {
            Some(ParamValue::Float(value)) => Ok(*value),
            other => Err(mismatch(name, ParamKind::Float, other)),
        }
    }

    /// Integer argument converted to a `usize` limit.
    ///
    /// # Errors
    /// Returns `ToolError::Validation` for negative values.
    pub fn limit(&self, name: &str) -> Result<usize, ToolError> {
        let value = self.integer(name)?;
        usize::try_from(value)
            .map_err(|_| ToolError::Validation(format!("argument `{name}` must not be negative")))
    }
}

fn mismatch(name: &str, expected: ParamKind, found: Option<&ParamValue>) -> ToolError {
    let found = found.map_or("nothing", |value| value.kind().json_type());
    ToolError::Internal(format!(
        "handler requested `{name}` as {}, found {found}",
        expected.json_type()
    ))
}

fn describe_constraint(constraint: Constraint) -> String {
    match constraint {
        Constraint::IntRange { min, max } => format!("must be between {min} and {max}"),
        Constraint::FloatRange { min, max } => format!("must be between {min} and {max}"),
        Constraint::OneOf(choices) => format!("must be one of: {}", choices.join(", ")),
        Constraint::Address => "must be a 0x-prefixed 40 hex digit address".to_string(),
    }
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Whether `value` looks like an EVM address.
#[must_use]
pub fn is_evm_address(value: &str) -> bool {
    value.len() == 42
        && value
            .strip_prefix("0x")
            .is_some_and(|hex| hex.chars().all(|c| c.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: &str = "0x5c952063c7fc8610ffdb798152d69f0b9550762b";

    fn limit_param() -> ParamSpec {
        ParamSpec::integer("limit", "Maximum rows")
            .with_default(ParamValue::Integer(10))
            .with_constraint(Constraint::IntRange { min: 1, max: 100 })
    }

    #[test]
    fn applies_default_when_missing_or_null() {
        let param = limit_param();
        assert_eq!(param.validate(None).unwrap(), ParamValue::Integer(10));
        assert_eq!(
            param.validate(Some(&Value::Null)).unwrap(),
            ParamValue::Integer(10)
        );
    }

    #[test]
    fn rejects_wrong_types() {
        let param = limit_param();
        let err = param.validate(Some(&json!("ten"))).unwrap_err();
        assert_eq!(err.kind(), "validation_error");
        assert!(err.to_string().contains("integer"));

        let err = param.validate(Some(&json!(2.5))).unwrap_err();
        assert_eq!(err.kind(), "validation_error");
    }

    #[test]
    fn float_accepts_integer_literals() {
        let param = ParamSpec::float("min_progress", "Lower bound");
        assert_eq!(param.validate(Some(&json!(90))).unwrap(), ParamValue::Float(90.0));
    }

    #[test]
    fn enforces_constraints() {
        let param = limit_param();
        assert!(param.validate(Some(&json!(0))).is_err());
        assert!(param.validate(Some(&json!(101))).is_err());
        assert!(param.validate(Some(&json!(100))).is_ok());

        let address = ParamSpec::address("token_address", "Token");
        assert!(address.validate(Some(&json!(TOKEN))).is_ok());
        assert!(address.validate(Some(&json!("0x1234"))).is_err());
        assert!(address.validate(None).is_err());
    }

    #[test]
    fn validates_whole_argument_map() {
        let params = vec![ParamSpec::address("token_address", "Token"), limit_param()];
        let mut raw = Map::new();
        raw.insert("token_address".into(), json!(TOKEN));
        let args = ToolArgs::validate(&params, &raw).unwrap();
        assert_eq!(args.string("token_address").unwrap(), TOKEN);
        assert_eq!(args.limit("limit").unwrap(), 10);

        raw.insert("bogus".into(), json!(1));
        let err = ToolArgs::validate(&params, &raw).unwrap_err();
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn schema_lists_constraints() {
        let schema = limit_param().schema();
        assert_eq!(schema["type"], "integer");
        assert_eq!(schema["default"], 10);
        assert_eq!(schema["maximum"], 100);
    }
}
