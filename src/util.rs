use serde_json::Value;

pub fn normalize_language(language: &str) -> String {
    language.trim().to_lowercase()
}

/// Sets `key` in `params`, replacing an earlier value.
pub fn set_param(params: &mut Vec<(String, String)>, key: &str, value: String) {
    match params.iter_mut().find(|(existing, _)| existing == key) {
        Some(entry) => entry.1 = value,
        None => params.push((key.to_string(), value)),
    }
}

pub fn param_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

pub fn render_query(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<String>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn set_param_replaces_existing_key() {
        let mut params = vec![("plcontinue".to_string(), "a".to_string())];
        set_param(&mut params, "plcontinue", "b".to_string());
        set_param(&mut params, "continue", "||".to_string());
        assert_eq!(render_query(&params), "plcontinue=b&continue=||");
    }

    #[test]
    fn param_value_unquotes_strings() {
        assert_eq!(param_value(&json!("736|0|Foo")), "736|0|Foo");
        assert_eq!(param_value(&json!(42)), "42");
    }
}
