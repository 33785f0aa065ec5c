/// Convert provider-supplied text into a clean label value.
pub fn label_value(raw: &str) -> String {
    sanitize_label_value(raw.trim())
}

fn sanitize_label_value(s: &str) -> String {
    s.chars().filter(|c| !c.is_control()).collect()
}
