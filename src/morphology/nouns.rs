//! Noun number: irregular dictionary first, then the first matching
//! rewrite rule. Multi-word nouns inflect on their final word.

use crate::base::{Token, TokenString};
use crate::error::{Error, Result};

/// Irregular singular/plural pairs, consulted in both directions before
/// any rule. Same-form entries cover mass and zero-plural nouns.
const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("person", "people"),
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
    ("foot", "feet"),
    ("tooth", "teeth"),
    ("mouse", "mice"),
    ("louse", "lice"),
    ("goose", "geese"),
    ("ox", "oxen"),
    ("die", "dice"),
    ("cactus", "cacti"),
    ("fungus", "fungi"),
    ("datum", "data"),
    ("criterion", "criteria"),
    ("phenomenon", "phenomena"),
    ("knife", "knives"),
    ("life", "lives"),
    ("wife", "wives"),
    ("sheep", "sheep"),
    ("deer", "deer"),
    ("fish", "fish"),
    ("moose", "moose"),
    ("series", "series"),
    ("species", "species"),
    ("hair", "hair"),
    ("fur", "fur"),
    ("money", "money"),
    ("rice", "rice"),
    ("information", "information"),
];

/// Words ending in -f/-fe that pluralize with a plain -s.
const F_FINAL_PLAIN: &[&str] = &["roof", "chief", "belief", "chef", "cliff", "proof", "reef", "safe"];

/// Words ending in -o that take -es.
const O_FINAL_ES: &[&str] = &["potato", "tomato", "hero", "echo", "veto", "torpedo"];

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Pluralize a single word.
pub fn plural_of_noun(singular: &str) -> Result<String> {
    if singular.is_empty() {
        return Err(Error::MorphologyUnknown {
            token: singular.to_string(),
        });
    }
    if let Some((_, p)) = IRREGULAR_NOUNS.iter().find(|(s, _)| *s == singular) {
        return Ok((*p).to_string());
    }
    let chars: Vec<char> = singular.chars().collect();
    let last = chars[chars.len() - 1];
    let penult = if chars.len() >= 2 {
        Some(chars[chars.len() - 2])
    } else {
        None
    };

    if last == 'y' && penult.is_some_and(|c| !is_vowel(c)) {
        return Ok(format!("{}ies", &singular[..singular.len() - 1]));
    }
    if singular.ends_with('s')
        || singular.ends_with('x')
        || singular.ends_with('z')
        || singular.ends_with("ch")
        || singular.ends_with("sh")
    {
        return Ok(format!("{singular}es"));
    }
    if singular.ends_with("fe") && !F_FINAL_PLAIN.contains(&singular) {
        return Ok(format!("{}ves", &singular[..singular.len() - 2]));
    }
    if singular.ends_with('f') && !F_FINAL_PLAIN.contains(&singular) {
        return Ok(format!("{}ves", &singular[..singular.len() - 1]));
    }
    if last == 'o' && O_FINAL_ES.contains(&singular) {
        return Ok(format!("{singular}es"));
    }
    Ok(format!("{singular}s"))
}

/// Singularize a single word. Fails with [`Error::MorphologyUnknown`] when
/// the word does not look plural under any rule.
pub fn singular_of_noun(plural: &str) -> Result<String> {
    if let Some((s, _)) = IRREGULAR_NOUNS.iter().find(|(_, p)| *p == plural) {
        return Ok((*s).to_string());
    }
    if plural.len() > 3 && plural.ends_with("ies") {
        return Ok(format!("{}y", &plural[..plural.len() - 3]));
    }
    if plural.len() > 3 && plural.ends_with("ves") {
        return Ok(format!("{}f", &plural[..plural.len() - 3]));
    }
    // Strip -es only where the -es rule put it; plain vowel-e words
    // ("chases", "roses") just drop the -s below.
    if plural.len() > 3
        && (plural.ends_with("sses")
            || plural.ends_with("zzes")
            || plural.ends_with("xes")
            || plural.ends_with("ches")
            || plural.ends_with("shes")
            || plural.ends_with("oes"))
    {
        return Ok(plural[..plural.len() - 2].to_string());
    }
    if plural.len() > 1 && plural.ends_with('s') && !plural.ends_with("ss") && !plural.ends_with("us")
    {
        return Ok(plural[..plural.len() - 1].to_string());
    }
    Err(Error::MorphologyUnknown {
        token: plural.to_string(),
    })
}

/// Pluralize the final word of a noun phrase.
pub fn plural_of_noun_phrase(phrase: &[Token]) -> Result<TokenString> {
    inflect_last(phrase, plural_of_noun)
}

/// Singularize the final word of a noun phrase.
pub fn singular_of_noun_phrase(phrase: &[Token]) -> Result<TokenString> {
    inflect_last(phrase, singular_of_noun)
}

fn inflect_last(phrase: &[Token], f: fn(&str) -> Result<String>) -> Result<TokenString> {
    let (last, rest) = phrase.split_last().ok_or_else(|| Error::MorphologyUnknown {
        token: String::new(),
    })?;
    let mut out: Vec<Token> = rest.to_vec();
    out.push(Token::new(&f(last.as_str())?));
    Ok(TokenString::new(out))
}

/// Whether a noun phrase looks plural, judged on its final word.
pub fn noun_appears_plural(phrase: &[Token]) -> bool {
    let Some(last) = phrase.last() else {
        return false;
    };
    let word = last.as_str();
    if IRREGULAR_NOUNS
        .iter()
        .any(|(s, p)| *p == word && *s != *p)
    {
        return true;
    }
    if IRREGULAR_NOUNS.iter().any(|(s, _)| *s == word) {
        return false;
    }
    word.len() > 1 && word.ends_with('s') && !word.ends_with("ss") && !word.ends_with("us")
}
