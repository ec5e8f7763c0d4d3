// Helper method for parsing tags
pub fn parse_tags(tags: Option<String>) -> Vec<String> {
    tags.map(|t| {
        t.split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

/// Appends each of `added` that `tags` does not already contain
pub fn add_tags(mut tags: Vec<String>, added: Vec<String>) -> Vec<String> {
    for tag in added {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

pub fn remove_tags(mut tags: Vec<String>, removed: &[String]) -> Vec<String> {
    tags.retain(|tag| !removed.contains(tag));
    tags
}

/// First non-empty line of `content`, cut to `max_chars` characters.
pub fn content_preview(content: &str, max_chars: usize) -> String {
    let first_line = content
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("")
        .trim();

    if first_line.chars().count() <= max_chars {
        first_line.to_string()
    } else {
        let cut: String = first_line.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}

/// Splits editor output into a title and content.
///
/// A leading `# ` heading becomes the title and the template comment right
/// after it is dropped. Without a heading the title is left as `None`.
pub fn split_editor_buffer(buffer: &str) -> (Option<String>, String) {
    let mut lines = buffer
        .lines()
        .skip_while(|line| line.trim().is_empty())
        .peekable();

    let title = match lines.peek() {
        Some(line) if line.trim_end() == "#" || line.starts_with("# ") => {
            let title = line[1..].trim().to_string();
            lines.next();
            Some(title)
        }
        _ => None,
    };

    while lines.peek().is_some_and(|line| line.trim().is_empty()) {
        lines.next();
    }
    if lines.peek().is_some_and(|line| is_template_comment(line)) {
        lines.next();
    }

    let content = lines.collect::<Vec<&str>>().join("\n").trim().to_string();
    (title, content)
}

fn is_template_comment(line: &str) -> bool {
    let line = line.trim();
    line.starts_with("<!--") && line.ends_with("-->")
}
