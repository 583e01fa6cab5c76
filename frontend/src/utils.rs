use wasm_bindgen::JsValue;

/// Format Unix millis as a YYYY-MM-DD date string.
pub fn format_date(ms: i64) -> String {
    let date = js_sys::Date::new(&JsValue::from_f64(ms as f64));
    let iso = String::from(date.to_iso_string());
    iso.chars().take(10).collect()
}

/// Split a comma-separated tag field into trimmed, non-empty tags.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}
