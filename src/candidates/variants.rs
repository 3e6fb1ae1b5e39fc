use std::collections::HashSet;

/// Common role-based local-parts, in probing order.
pub const ROLE_PREFIXES: &[&str] = &[
    "info",
    "contact",
    "admin",
    "support",
    "sales",
    "hello",
    "office",
    "team",
    "hr",
    "jobs",
    "careers",
    "marketing",
    "press",
    "billing",
    "help",
    "enquiries",
];

/// Builds local-part patterns from the first and last of `tokens`.
///
/// Tokens must already be normalized. A single token yields only itself;
/// middle tokens add `first.middle.last` and an initials form. The result
/// is deduplicated in first-seen order.
pub fn local_part_variants(tokens: &[String]) -> Vec<String> {
    let (first, middles, last) = match tokens {
        [] => return Vec::new(),
        [only] => return vec![only.clone()],
        [first, middles @ .., last] => (first.as_str(), middles, last.as_str()),
    };
    let f = initial(first);
    let l = initial(last);

    let mut locals = vec![
        format!("{first}.{last}"),
        format!("{first}{last}"),
        first.to_string(),
        last.to_string(),
        format!("{f}{last}"),
        format!("{first}{l}"),
        format!("{first}_{last}"),
        format!("{first}-{last}"),
        format!("{f}.{last}"),
        format!("{last}.{first}"),
        format!("{last}{first}"),
        format!("{last}{f}"),
    ];

    if !middles.is_empty() {
        let joined = middles.join(".");
        let initials: String = middles.iter().map(|m| initial(m)).collect();
        locals.push(format!("{first}.{joined}.{last}"));
        locals.push(format!("{f}{initials}{last}"));
    }

    dedup_in_order(&mut locals);
    locals
}

fn initial(token: &str) -> &str {
    let end = token.chars().next().map_or(0, char::len_utf8);
    &token[..end]
}

pub(crate) fn dedup_in_order(items: &mut Vec<String>) {
    let mut seen = HashSet::new();
    items.retain(|item| seen.insert(item.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn pattern_order_for_two_tokens() {
        let locals = local_part_variants(&tokens(&["john", "doe"]));
        insta::assert_snapshot!(locals.join("\n"), @r"
        john.doe
        johndoe
        john
        doe
        jdoe
        johnd
        john_doe
        john-doe
        j.doe
        doe.john
        doejohn
        doej
        ");
    }

    #[test]
    fn single_token_yields_itself() {
        assert_eq!(local_part_variants(&tokens(&["cher"])), vec!["cher"]);
        assert!(local_part_variants(&[]).is_empty());
    }

    #[test]
    fn middle_names_add_patterns() {
        let locals = local_part_variants(&tokens(&["mary", "ann", "lee"]));
        assert_eq!(locals[0], "mary.lee");
        assert!(locals.contains(&"mary.ann.lee".to_string()));
        assert!(locals.contains(&"malee".to_string()));
    }

    #[test]
    fn repeated_names_are_deduplicated() {
        let locals = local_part_variants(&tokens(&["anna", "anna"]));
        let unique: HashSet<_> = locals.iter().collect();
        assert_eq!(unique.len(), locals.len());
        assert_eq!(locals[0], "anna.anna");
        assert_eq!(locals.iter().filter(|l| *l == "anna").count(), 1);
    }

    #[test]
    fn initials_respect_multibyte_chars() {
        let locals = local_part_variants(&tokens(&["émile", "zola"]));
        assert!(locals.contains(&"ézola".to_string()));
    }
}
