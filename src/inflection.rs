//! # Inflection
//!
//! English plural → singular conversion for resource names.
//! Component keys and operation ids are derived from the singular form.

use regex::Regex;
use std::sync::OnceLock;

/// Words that are spelled the same in singular and plural.
const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "jeans",
    "police",
];

/// (singular, plural) pairs that no suffix rule covers.
const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("child", "children"),
    ("sex", "sexes"),
    ("move", "moves"),
    ("zombie", "zombies"),
];

/// Suffix rules, highest priority first.
const SINGULAR_RULES: &[(&str, &str)] = &[
    (r"(database)s$", "${1}"),
    (r"(quiz)zes$", "${1}"),
    (r"(matr)ices$", "${1}ix"),
    (r"(vert|ind)ices$", "${1}ex"),
    (r"^(ox)en", "${1}"),
    (r"(alias|status)(es)?$", "${1}"),
    (r"(octop|vir)(us|i)$", "${1}us"),
    (r"^(a)x[ie]s$", "${1}xis"),
    (r"(cris|test)(is|es)$", "${1}is"),
    (r"(shoe)s$", "${1}"),
    (r"(o)es$", "${1}"),
    (r"(bus)(es)?$", "${1}"),
    (r"^(m|l)ice$", "${1}ouse"),
    (r"(x|ch|ss|sh)es$", "${1}"),
    (r"(c)ookies$", "${1}ookie"),
    (r"(m)ovies$", "${1}ovie"),
    (r"(s)eries$", "${1}eries"),
    (r"([^aeiouy]|qu)ies$", "${1}y"),
    (r"([lr])ves$", "${1}f"),
    (r"(tive)s$", "${1}"),
    (r"(hive)s$", "${1}"),
    (r"([^f])ves$", "${1}fe"),
    (r"(^analy)(sis|ses)$", "${1}sis"),
    (
        r"((a)naly|(b)a|(d)iagno|(p)arenthe|(p)rogno|(s)ynop|(t)he)(sis|ses)$",
        "${1}sis",
    ),
    (r"([ti])a$", "${1}um"),
    (r"(n)ews$", "${1}ews"),
    (r"(ss)$", "${1}"),
    (r"s$", ""),
];

fn compiled_rules() -> &'static [(Regex, &'static str)] {
    static RULES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    RULES.get_or_init(|| {
        SINGULAR_RULES
            .iter()
            .filter_map(|(pattern, replacement)| {
                Regex::new(&format!("(?i){}", pattern))
                    .ok()
                    .map(|re| (re, *replacement))
            })
            .collect()
    })
}

/// Returns the singular form of an English plural noun.
///
/// Unknown or already-singular words come back unchanged unless a suffix rule
/// applies (`status` stays `status`, `users` becomes `user`).
pub fn singularize(word: &str) -> String {
    let lower = word.to_lowercase();

    if UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }

    for (singular, plural) in IRREGULAR {
        if word.is_ascii() && lower.ends_with(plural) {
            let stem = &word[..word.len() - plural.len()];
            return format!("{}{}", stem, keep_initial_case(&word[stem.len()..], singular));
        }
    }

    for (re, replacement) in compiled_rules() {
        if re.is_match(word) {
            return re.replace(word, *replacement).into_owned();
        }
    }

    word.to_string()
}

/// Uppercases the first letter of every word and joins the words.
///
/// Words are separated by `_`, `-` or whitespace; letters after the first are
/// left untouched, so `URLs` stays `URLs` and `blog_posts` becomes `BlogPosts`.
pub fn title_case(word: &str) -> String {
    word.split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .map(|part| keep_initial_case("A", part))
        .collect()
}

fn keep_initial_case(source: &str, replacement: &str) -> String {
    match source.chars().next() {
        Some(c) if c.is_uppercase() => {
            let mut chars = replacement.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
        _ => replacement.to_string(),
    }
}
