/// Small HTML-to-text helper for article list summaries.
/// - Removes entire <script> and <style> blocks (case-insensitive)
/// - Strips remaining tags like <p>, <br>, etc.
/// - Decodes the handful of named entities feeds commonly emit
/// - Collapses excessive whitespace and trims the ends
pub fn html_to_text(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    // Remove <script>...</script> and <style>...</style> blocks wholesale.
    let mut buf = input.to_string();
    for tag in ["script", "style"] {
        let open = format!("<{tag}");
        let close = format!("</{tag}>");
        loop {
            let lower = buf.to_ascii_lowercase();
            let Some(start) = lower.find(&open) else { break };
            match lower[start..].find(&close) {
                Some(rel) => buf.replace_range(start..start + rel + close.len(), ""),
                None => {
                    // no closing tag; drop the rest
                    buf.truncate(start);
                    break;
                }
            }
        }
    }

    // Strip remaining tags by skipping characters between '<' and '>'.
    let mut text = String::with_capacity(buf.len());
    let mut in_tag = false;
    for ch in buf.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }

    let text = decode_basic_entities(&text);

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Decodes the named entities that show up in practically every feed. `&amp;`
/// goes last so double-encoded input only unwraps one level.
fn decode_basic_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
