//! Best-effort repair of LLM text output.
//!
//! Hosted models wrap JSON in markdown fences, leave trailing commas, and
//! pad arrays with prose or `//` comments. Every function here degrades to
//! returning its input untouched instead of failing: the caller decides
//! whether the cleaned text actually parses.

use regex::Regex;

/// Remove markdown code-fence markers, keeping the fenced body.
///
/// Handles both ```` ```json ```` and bare ```` ``` ```` fences anywhere in
/// the text.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "")
}

/// Slice from the first `[` to the last `]`, inclusive.
///
/// Returns the input unchanged when either bracket is missing.
pub fn extract_array(raw: &str) -> &str {
    match (raw.find('['), raw.rfind(']')) {
        (Some(start), Some(end)) if start < end => &raw[start..=end],
        _ => raw,
    }
}

/// Slice from the first `{` to the last `}`, inclusive.
///
/// Returns the input unchanged when either brace is missing.
pub fn extract_object(raw: &str) -> &str {
    match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if start < end => &raw[start..=end],
        _ => raw,
    }
}

/// Remove trailing commas before `}` and `]`.
pub fn strip_trailing_commas(raw: &str) -> String {
    let before_brace = match Regex::new(r",\s*\}") {
        Ok(re) => re.replace_all(raw, "}").into_owned(),
        Err(_) => raw.to_string(),
    };
    match Regex::new(r",\s*\]") {
        Ok(re) => re.replace_all(&before_brace, "]").into_owned(),
        Err(_) => before_brace,
    }
}

/// Drop lines whose content starts with a `//` comment.
///
/// Models asked for "exactly N entries" sometimes leave
/// `// Continue until 10 prospects` inside the array. JSON has no
/// comments, so whole comment lines can be removed without unbalancing
/// the surrounding brackets.
pub fn strip_line_comments(raw: &str) -> String {
    if !raw.contains("//") {
        return raw.to_string();
    }
    raw.lines()
        .filter(|line| !line.trim_start().starts_with("//"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full array-cleanup pipeline: bracket extraction then trailing-comma
/// repair.
pub fn clean_json_output(raw: &str) -> String {
    strip_trailing_commas(extract_array(raw))
}

/// Find a JSON array block anywhere in the response, spanning newlines.
///
/// Returns `None` when no `[...]` block exists.
pub fn extract_json_block(raw: &str) -> Option<&str> {
    let re = Regex::new(r"(?s)\[.*\]").ok()?;
    re.find(raw).map(|m| m.as_str())
}

/// Cleanup applied to object-shaped model output (e.g. extracted search
/// parameters): drop fences, slice the object, repair trailing commas.
pub fn clean_object_output(raw: &str) -> String {
    let unfenced = strip_code_fences(raw);
    strip_trailing_commas(extract_object(&unfenced))
}

/// Cleanup applied to array-shaped model output (e.g. prospect lists):
/// drop fences and comment lines, then run the array pipeline. Comments go
/// first so a bracket inside one cannot skew the array slice.
pub fn clean_array_output(raw: &str) -> String {
    let unfenced = strip_code_fences(raw);
    clean_json_output(&strip_line_comments(&unfenced))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fences() {
        let raw = "```json\n[1, 2]\n```";
        let cleaned = strip_code_fences(raw);
        assert!(!cleaned.contains("```"));
        assert!(cleaned.contains("[1, 2]"));
    }

    #[test]
    fn test_extract_array_basic() {
        let raw = "Here is your list:\n[1, 2, 3]\nEnjoy!";
        assert_eq!(extract_array(raw), "[1, 2, 3]");
    }

    #[test]
    fn test_extract_array_missing_brackets() {
        let raw = "no json here";
        assert_eq!(extract_array(raw), raw);
    }

    #[test]
    fn test_extract_array_nested_outermost_wins() {
        let raw = "x [[1], [2]] y";
        assert_eq!(extract_array(raw), "[[1], [2]]");
    }

    #[test]
    fn test_extract_object() {
        let raw = "Sure! {\"a\": 1} done";
        assert_eq!(extract_object(raw), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_trailing_commas() {
        let raw = r#"[{"a": 1,}, {"b": 2}, ]"#;
        let cleaned = strip_trailing_commas(raw);
        assert_eq!(cleaned, r#"[{"a": 1}, {"b": 2}]"#);
        assert!(serde_json::from_str::<serde_json::Value>(&cleaned).is_ok());
    }

    #[test]
    fn test_strip_trailing_commas_multiline() {
        let raw = "{\"a\": 1,\n}";
        assert_eq!(strip_trailing_commas(raw), "{\"a\": 1}");
    }

    #[test]
    fn test_strip_line_comments() {
        let raw = "[{\"a\": 1}\n  // more entries follow\n]";
        let cut = strip_line_comments(raw);
        assert!(cut.contains("\"a\""));
        assert!(!cut.contains("more entries"));
    }

    #[test]
    fn test_strip_line_comments_keeps_entries_after_comment() {
        let raw = "[\n  1,\n  // filler comment\n  2\n]";
        let cut = strip_line_comments(raw);
        assert_eq!(cut, "[\n  1,\n  2\n]");
        assert!(serde_json::from_str::<serde_json::Value>(&cut).is_ok());
    }

    #[test]
    fn test_clean_array_output_bracket_inside_comment() {
        let raw = "[\n  1,\n  // note: was ]\n  2\n]";
        let cleaned = clean_array_output(raw);
        let value: serde_json::Value = serde_json::from_str(&cleaned).unwrap();
        assert_eq!(value, serde_json::json!([1, 2]));
    }

    #[test]
    fn test_clean_json_output_already_clean() {
        let raw = r#"[{"a": 1}]"#;
        assert_eq!(clean_json_output(raw), raw);
    }

    #[test]
    fn test_clean_json_output_empty_input() {
        assert_eq!(clean_json_output(""), "");
    }

    #[test]
    fn test_extract_json_block_multiline() {
        let raw = "prefix\n[\n 1,\n 2\n]\nsuffix";
        let block = extract_json_block(raw).unwrap();
        assert!(block.starts_with('['));
        assert!(block.ends_with(']'));
    }

    #[test]
    fn test_extract_json_block_absent() {
        assert!(extract_json_block("nothing to see").is_none());
    }

    #[test]
    fn test_clean_array_output_full_pipeline() {
        let raw = "Here you go:\n```json\n[\n  {\"Name\": \"A\",},\n  // trailing note\n]\n```";
        let cleaned = clean_array_output(raw);
        let value: serde_json::Value = serde_json::from_str(&cleaned)
            .unwrap_or_else(|e| panic!("cleaned output should parse: {e}\n{cleaned}"));
        assert!(value.is_array());
    }

    #[test]
    fn test_clean_object_output_fenced() {
        let raw = "```json\n{\"person_titles\": [\"CTO\",],}\n```";
        let cleaned = clean_object_output(raw);
        let value: serde_json::Value = serde_json::from_str(&cleaned).unwrap();
        assert_eq!(value["person_titles"][0], "CTO");
    }
}
