// src/frontmatter/merge.rs
// =============================================================================
// Combines generated front matter with the front matter a file already has.
//
// The file wins: an upstream document can override e.g. `title` and still
// receive the generated `edit_link` it didn't set.
// =============================================================================

use super::FrontMatter;

pub fn merge(generated: &FrontMatter, from_file: &FrontMatter) -> FrontMatter {
    let mut merged = generated.clone();
    merged.extend(from_file.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_yaml::Value;

    fn fm(pairs: &[(&str, &str)]) -> FrontMatter {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::from(*v)))
            .collect()
    }

    #[test]
    fn test_file_values_win() {
        let generated = fm(&[("title", "cordova-plugin-camera"), ("edit_link", "https://e")]);
        let from_file = fm(&[("title", "Camera"), ("description", "Take pictures")]);

        let merged = merge(&generated, &from_file);

        for key in ["title", "edit_link", "description"] {
            let expected = from_file.get(key).or_else(|| generated.get(key));
            assert_eq!(merged.get(key), expected, "{key}");
        }
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn test_empty_sides() {
        let generated = fm(&[("title", "x")]);
        assert_eq!(merge(&generated, &FrontMatter::new()), generated);
        assert_eq!(merge(&FrontMatter::new(), &generated), generated);
        assert!(merge(&FrontMatter::new(), &FrontMatter::new()).is_empty());
    }
}
