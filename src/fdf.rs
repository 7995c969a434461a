/// Minimal FDF (Forms Data Format) emission: a fixed header, one
/// `<< /T(key)/V(value) >>` record per field, and a fixed trailer. Values
/// already carry `\r` line breaks where the form expects multi-line text.
/// Parentheses inside values are emitted as-is.
pub(crate) fn to_fdf(fields: &[(String, String)]) -> String {
    let mut output = String::from("%FDF-1.2\n1 0 obj<</FDF<< /Fields[\n");
    for (key, value) in fields {
        output.push_str(&format!("<< /T({key})/V({value}) >>\n"));
    }
    output.push_str("] >> >>\nendobj\ntrailer\n<</Root 1 0 R>>\n%%EOF\n");
    output
}
