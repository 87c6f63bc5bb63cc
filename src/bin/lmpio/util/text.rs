pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(current);
            current = word.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

/// Shortens `s` to at most `max_len` characters, marking the cut with `…`.
pub fn truncate(s: &str, max_len: usize) -> String {
    match max_len {
        0 => return String::new(),
        1 if s.chars().count() > 1 => return "…".to_string(),
        _ => {}
    }

    match s.char_indices().nth(max_len) {
        None => s.to_string(),
        Some(_) => {
            let cut = s
                .char_indices()
                .nth(max_len - 1)
                .map(|(idx, _)| idx)
                .unwrap_or(0);
            format!("{}…", &s[..cut])
        }
    }
}
