//! Naming helpers shared by the schema builder and the SQL generators.

use heck::{ToSnakeCase, ToUpperCamelCase};

pub fn snake_case(src: &str) -> String {
    src.to_snake_case()
}

pub fn upper_camel_case(src: &str) -> String {
    src.to_upper_camel_case()
}

/// Pluralizes the last word of a snake_case identifier.
pub fn pluralize(src: &str) -> String {
    map_last_word(src, |word| pluralizer::pluralize(word, 2, false))
}

/// Singularizes the last word of a snake_case identifier.
pub fn singularize(src: &str) -> String {
    map_last_word(src, |word| pluralizer::pluralize(word, 1, false))
}

fn map_last_word(src: &str, f: impl FnOnce(&str) -> String) -> String {
    match src.rsplit_once('_') {
        Some((head, last)) if !last.is_empty() => format!("{head}_{}", f(last)),
        _ => f(src),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pluralize_words() {
        assert_eq!("books", pluralize("book"));
        assert_eq!("categories", pluralize("category"));
        assert_eq!("order_lines", pluralize("order_line"));
    }

    #[test]
    fn singularize_words() {
        assert_eq!("tag", singularize("tags"));
        assert_eq!("order_line", singularize("order_lines"));
    }

    #[test]
    fn snake_case_record_names() {
        assert_eq!("order_line", snake_case("OrderLine"));
        assert_eq!("post", snake_case("Post"));
        assert_eq!("OrderLine", upper_camel_case("order_line"));
    }
}
