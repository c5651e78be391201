/// Normalize a human-entered model-size token to the recognizer's enum-style
/// key: dashes become underscores, the result is upper-cased
/// (`"large-v1"` → `"LARGE_V1"`).
pub fn normalize_model_size_name(name: &str) -> String {
    name.replace('-', "_").to_uppercase()
}
