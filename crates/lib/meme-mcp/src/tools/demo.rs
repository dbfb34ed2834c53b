use meme_core::registry::{
    ParamSpec,
    RegistryError,
    ToolArgs,
    ToolDescriptor,
    ToolError,
    ToolRegistry,
    handler,
};
use serde_json::Value;

pub fn register(registry: &mut ToolRegistry) -> Result<(), RegistryError> {
    registry.register(
        ToolDescriptor::new("add", "Add two integers.")
            .param(ParamSpec::integer("a", "First addend"))
            .param(ParamSpec::integer("b", "Second addend")),
        handler(|args: ToolArgs| async move { add(&args) }),
    )?;
    registry.register(
        ToolDescriptor::new("multiply", "Multiply two integers.")
            .param(ParamSpec::integer("a", "First factor"))
            .param(ParamSpec::integer("b", "Second factor")),
        handler(|args: ToolArgs| async move { multiply(&args) }),
    )?;
    registry.register(
        ToolDescriptor::new("get_greeting", "Return a personalized greeting.")
            .param(ParamSpec::string("name", "Name to greet")),
        handler(|args: ToolArgs| async move { greeting(&args) }),
    )?;
    Ok(())
}

fn add(args: &ToolArgs) -> Result<Value, ToolError> {
    let (a, b) = (args.integer("a")?, args.integer("b")?);
    a.checked_add(b)
        .map(Value::from)
        .ok_or_else(|| ToolError::Validation(format!("{a} + {b} overflows a 64-bit integer")))
}

fn multiply(args: &ToolArgs) -> Result<Value, ToolError> {
    let (a, b) = (args.integer("a")?, args.integer("b")?);
    a.checked_mul(b)
        .map(Value::from)
        .ok_or_else(|| ToolError::Validation(format!("{a} * {b} overflows a 64-bit integer")))
}

fn greeting(args: &ToolArgs) -> Result<Value, ToolError> {
    Ok(Value::from(format!("Hello, {}!", args.string("name")?)))
}
