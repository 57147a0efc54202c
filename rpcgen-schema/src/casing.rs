//! Identifier casing.
//!
//! Schema names are authored once (conventionally lower snake case) and every
//! generator derives its target identifiers through [`convert`], so the same
//! schema yields consistent names across all targets.

/// Target identifier convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Case {
    /// `CreateTodo`
    Pascal,
    /// `createTodo`
    Camel,
    /// `create_todo`
    Snake,
    /// `CREATE_TODO`
    ScreamingSnake,
    /// `create-todo`
    Kebab,
    /// Pascal case with Go initialisms upper-cased: `user_id` becomes `UserID`.
    GoExported,
}

/// Initialisms Go code spells in all caps.
const GO_INITIALISMS: &[&str] = &[
    "acl", "api", "ascii", "cpu", "css", "dns", "eof", "guid", "html", "http", "https", "id",
    "ip", "json", "lhs", "qps", "ram", "rhs", "rpc", "sla", "smtp", "sql", "ssh", "tcp", "tls",
    "ttl", "udp", "ui", "uid", "uuid", "uri", "url", "utf8", "vm", "xml", "xmpp", "xsrf", "xss",
];

/// Converts `name` to the given case.
#[must_use]
pub fn convert(name: &str, case: Case) -> String {
    let words = split_words(name);
    match case {
        Case::Pascal => words.iter().map(|w| capitalize(w)).collect(),
        Case::Camel => words
            .iter()
            .enumerate()
            .map(|(i, w)| if i == 0 { w.to_lowercase() } else { capitalize(w) })
            .collect(),
        Case::Snake => join_lower(&words, "_"),
        Case::ScreamingSnake => join_lower(&words, "_").to_uppercase(),
        Case::Kebab => join_lower(&words, "-"),
        Case::GoExported => words
            .iter()
            .map(|w| {
                let lower = w.to_lowercase();
                if GO_INITIALISMS.contains(&lower.as_str()) {
                    lower.to_uppercase()
                } else {
                    capitalize(w)
                }
            })
            .collect(),
    }
}

/// Converts a string to PascalCase.
#[must_use]
pub fn to_pascal_case(s: &str) -> String {
    convert(s, Case::Pascal)
}

/// Converts a string to camelCase.
#[must_use]
pub fn to_camel_case(s: &str) -> String {
    convert(s, Case::Camel)
}

/// Converts a string to snake_case.
#[must_use]
pub fn to_snake_case(s: &str) -> String {
    convert(s, Case::Snake)
}

/// Returns true if `s` is a plain ASCII identifier: a letter followed by
/// letters, digits or underscores.
#[must_use]
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Splits a name into words on separators and case boundaries.
///
/// `HTTPServer` splits as `HTTP`, `Server`; digits stay with the preceding word.
fn split_words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn join_lower(words: &[String], sep: &str) -> String {
    words
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(sep)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("clOrdId"), "cl_ord_id");
        assert_eq!(to_snake_case("symbol"), "symbol");
        assert_eq!(to_snake_case("MDEntryPx"), "md_entry_px");
        assert_eq!(to_snake_case("createTodo"), "create_todo");
    }

    #[test]
    fn test_to_pascal_case() {
        assert_eq!(to_pascal_case("message_header"), "MessageHeader");
        assert_eq!(to_pascal_case("side"), "Side");
        assert_eq!(to_pascal_case("order-type"), "OrderType");
        assert_eq!(to_pascal_case("createTodo"), "CreateTodo");
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("created_at"), "createdAt");
        assert_eq!(to_camel_case("add_item"), "addItem");
        assert_eq!(to_camel_case("createTodo"), "createTodo");
        assert_eq!(to_camel_case("id"), "id");
    }

    #[test]
    fn test_go_exported() {
        assert_eq!(convert("id", Case::GoExported), "ID");
        assert_eq!(convert("user_id", Case::GoExported), "UserID");
        assert_eq!(convert("avatar_url", Case::GoExported), "AvatarURL");
        assert_eq!(convert("created_at", Case::GoExported), "CreatedAt");
    }

    #[test]
    fn test_other_cases() {
        assert_eq!(convert("createTodo", Case::ScreamingSnake), "CREATE_TODO");
        assert_eq!(convert("create_todo", Case::Kebab), "create-todo");
    }

    #[test]
    fn test_acronym_boundaries() {
        assert_eq!(to_snake_case("HTTPServer"), "http_server");
        assert_eq!(to_snake_case("item2_count"), "item2_count");
        assert_eq!(to_pascal_case("v2_items"), "V2Items");
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("todo_item2"));
        assert!(!is_identifier("2todo"));
        assert!(!is_identifier("to-do"));
        assert!(!is_identifier(""));
    }
}
