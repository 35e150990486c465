use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserDto {
    #[serde(default)]
    pub name: Option<Value>,
}

impl UpdateUserDto {
    /// The name as it should read in a confirmation message.
    pub fn display_name(&self) -> String {
        match &self.name {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(name)) => name.clone(),
            Some(other) => other.to_string(),
        }
    }
}
