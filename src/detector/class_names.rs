use std::path::Path;

use crate::detector::interface::DEFAULT_LABEL;

/// Reads a darknet style `.names` file, one label per line.
pub fn load_class_names(
    path: &Path,
) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read class names {}: {}", path.display(), e))?;

    Ok(parse_class_names(&contents))
}

pub fn parse_class_names(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn label_for(class_names: &[String], class_id: usize) -> String {
    class_names
        .get(class_id)
        .cloned()
        .unwrap_or_else(|| DEFAULT_LABEL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_blank_lines() {
        let names = parse_class_names("pothole\r\n\n  crack \n");
        assert_eq!(names, vec!["pothole".to_string(), "crack".to_string()]);
    }

    #[test]
    fn test_label_falls_back_to_pothole() {
        let names = vec!["crack".to_string()];
        assert_eq!(label_for(&names, 0), "crack");
        assert_eq!(label_for(&names, 7), "pothole");
    }
}
