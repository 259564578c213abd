//! Verb conjugation: number agreement, gerunds, passive participles.
//!
//! A verb phrase inflects on its copula when it has one, otherwise on its
//! head (first) word; trailing particles ("work *for*") are untouched.

use crate::base::{Token, TokenString};

use super::nouns::{plural_of_noun, singular_of_noun};
use super::words::is_copula;

/// Irregular base/third-person pairs not derivable by the noun rules.
const IRREGULAR_THIRD_PERSON: &[(&str, &str)] = &[("have", "has"), ("do", "does"), ("be", "is")];

/// Irregular base/passive-participle pairs.
const IRREGULAR_PARTICIPLES: &[(&str, &str)] = &[
    ("eat", "eaten"),
    ("take", "taken"),
    ("give", "given"),
    ("write", "written"),
    ("break", "broken"),
    ("choose", "chosen"),
    ("speak", "spoken"),
    ("steal", "stolen"),
    ("freeze", "frozen"),
    ("drive", "driven"),
    ("ride", "ridden"),
    ("hide", "hidden"),
    ("bite", "bitten"),
    ("beat", "beaten"),
    ("see", "seen"),
    ("know", "known"),
    ("grow", "grown"),
    ("throw", "thrown"),
    ("blow", "blown"),
    ("draw", "drawn"),
    ("fly", "flown"),
    ("wear", "worn"),
    ("tear", "torn"),
    ("bear", "borne"),
    ("sing", "sung"),
    ("drink", "drunk"),
    ("swim", "swum"),
    ("begin", "begun"),
    ("run", "run"),
    ("come", "come"),
    ("become", "become"),
    ("do", "done"),
    ("go", "gone"),
    ("make", "made"),
    ("have", "had"),
    ("say", "said"),
    ("pay", "paid"),
    ("lay", "laid"),
    ("find", "found"),
    ("buy", "bought"),
    ("bring", "brought"),
    ("think", "thought"),
    ("teach", "taught"),
    ("catch", "caught"),
    ("fight", "fought"),
    ("seek", "sought"),
    ("sell", "sold"),
    ("tell", "told"),
    ("hold", "held"),
    ("keep", "kept"),
    ("sleep", "slept"),
    ("feel", "felt"),
    ("leave", "left"),
    ("meet", "met"),
    ("lose", "lost"),
    ("win", "won"),
    ("sit", "sat"),
    ("stand", "stood"),
    ("understand", "understood"),
    ("get", "got"),
    ("forget", "forgotten"),
    ("put", "put"),
    ("set", "set"),
    ("cut", "cut"),
    ("hit", "hit"),
    ("hurt", "hurt"),
    ("let", "let"),
    ("shut", "shut"),
    ("cost", "cost"),
    ("read", "read"),
    ("lead", "led"),
    ("feed", "fed"),
    ("hear", "heard"),
    ("build", "built"),
    ("send", "sent"),
    ("spend", "spent"),
    ("lend", "lent"),
    ("mean", "meant"),
];

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Ends consonant-vowel-consonant with a doubling-eligible final letter.
fn ends_cvc(word: &str) -> bool {
    let chars: Vec<char> = word.chars().collect();
    if chars.len() < 3 {
        return false;
    }
    let [a, b, c] = [
        chars[chars.len() - 3],
        chars[chars.len() - 2],
        chars[chars.len() - 1],
    ];
    !is_vowel(a) && is_vowel(b) && !is_vowel(c) && !matches!(c, 'w' | 'x' | 'y')
}

fn map_head(phrase: &[Token], f: impl Fn(&str) -> String) -> TokenString {
    let Some((head, rest)) = phrase.split_first() else {
        return TokenString::default();
    };
    let mut out = vec![Token::new(&f(head.as_str()))];
    out.extend(rest.iter().cloned());
    TokenString::new(out)
}

fn replace_copula(phrase: &[Token], target: &str) -> TokenString {
    phrase
        .iter()
        .map(|t| {
            if is_copula(t) {
                Token::new(target)
            } else {
                t.clone()
            }
        })
        .collect()
}

/// Third-person-singular form of a plural (base) verb phrase:
/// `love` → `loves`, `work for` → `works for`, `are married to` → `is married to`.
pub fn singular_of_verb(phrase: &[Token]) -> TokenString {
    if phrase.iter().any(is_copula) {
        return replace_copula(phrase, "is");
    }
    map_head(phrase, |head| {
        if let Some((_, third)) = IRREGULAR_THIRD_PERSON.iter().find(|(b, _)| *b == head) {
            (*third).to_string()
        } else {
            // Third-person -s behaves exactly like noun pluralization.
            plural_of_noun(head).unwrap_or_else(|_| format!("{head}s"))
        }
    })
}

/// Base (plural) form of a third-person verb phrase.
pub fn plural_of_verb(phrase: &[Token]) -> TokenString {
    if phrase.iter().any(is_copula) {
        return replace_copula(phrase, "are");
    }
    map_head(phrase, |head| {
        if let Some((base, _)) = IRREGULAR_THIRD_PERSON.iter().find(|(_, t)| *t == head) {
            (*base).to_string()
        } else {
            singular_of_noun(head).unwrap_or_else(|_| head.to_string())
        }
    })
}

/// Every plausible gerund surface of a base verb phrase. All of them are
/// registered in the verb trie; authors never pick the "right" one.
pub fn gerunds_of_verb(phrase: &[Token]) -> Vec<TokenString> {
    let Some((head, rest)) = phrase.split_first() else {
        return Vec::new();
    };
    let word = head.as_str();
    let mut stems: Vec<String> = vec![format!("{word}ing")];
    if word.ends_with('e') && !word.ends_with("ee") && word.len() > 2 {
        stems.push(format!("{}ing", &word[..word.len() - 1]));
    }
    if word.ends_with("ie") {
        stems.push(format!("{}ying", &word[..word.len() - 2]));
    }
    if ends_cvc(word) {
        let last = word.chars().last().unwrap();
        stems.push(format!("{word}{last}ing"));
    }
    stems.sort();
    stems.dedup();
    stems
        .into_iter()
        .map(|stem| {
            let mut out = vec![Token::new(&stem)];
            out.extend(rest.iter().cloned());
            TokenString::new(out)
        })
        .collect()
}

/// The standard gerund of a base verb phrase, used as the verb's display
/// form. [`gerunds_of_verb`] enumerates the rest.
pub fn gerund_of_verb(phrase: &[Token]) -> TokenString {
    map_head(phrase, |word| {
        if word.ends_with("ie") {
            format!("{}ying", &word[..word.len() - 2])
        } else if word.ends_with('e') && !word.ends_with("ee") && word.len() > 2 {
            format!("{}ing", &word[..word.len() - 1])
        } else if ends_cvc(word) {
            let last = word.chars().last().unwrap();
            format!("{word}{last}ing")
        } else {
            format!("{word}ing")
        }
    })
}

/// Passive participle of a base verb phrase: `love` → `loved`,
/// `work for` → `worked for`, `eat` → `eaten`.
pub fn passive_participle(phrase: &[Token]) -> TokenString {
    map_head(phrase, |word| {
        if let Some((_, part)) = IRREGULAR_PARTICIPLES.iter().find(|(b, _)| *b == word) {
            return (*part).to_string();
        }
        let chars: Vec<char> = word.chars().collect();
        if word.ends_with('e') {
            format!("{word}d")
        } else if word.ends_with('y')
            && chars.len() >= 2
            && !is_vowel(chars[chars.len() - 2])
        {
            format!("{}ied", &word[..word.len() - 1])
        } else if ends_cvc(word) {
            let last = chars[chars.len() - 1];
            format!("{word}{last}ed")
        } else {
            format!("{word}ed")
        }
    })
}

/// Invert a gerund phrase back to its base form, particles intact:
/// `getting married to` → `get married to`, `loving` → `love`.
pub fn base_form_of_gerund(phrase: &[Token]) -> TokenString {
    map_head(phrase, |word| {
        let Some(stem) = word.strip_suffix("ing") else {
            return word.to_string();
        };
        let chars: Vec<char> = stem.chars().collect();
        if chars.len() >= 2 && chars[chars.len() - 1] == chars[chars.len() - 2] {
            // Doubled consonant: getting → get.
            return stem[..stem.len() - 1].to_string();
        }
        // A bare consonant-vowel-consonant stem dropped its e: lov → love.
        if ends_cvc(stem) {
            return format!("{stem}e");
        }
        stem.to_string()
    })
}

/// Invert a passive participle to a base form, for verbs first introduced
/// through a passive statement.
pub fn base_form_of_participle(phrase: &[Token]) -> TokenString {
    map_head(phrase, |word| {
        if let Some((base, _)) = IRREGULAR_PARTICIPLES.iter().find(|(_, p)| *p == word) {
            return (*base).to_string();
        }
        let Some(stem) = word.strip_suffix("ed") else {
            return word.to_string();
        };
        let chars: Vec<char> = stem.chars().collect();
        if chars.len() >= 2 && chars[chars.len() - 1] == chars[chars.len() - 2] {
            return stem[..stem.len() - 1].to_string();
        }
        if stem.ends_with('i') {
            // carried → carry
            return format!("{}y", &stem[..stem.len() - 1]);
        }
        if ends_cvc(stem) || stem.ends_with("at") {
            return format!("{stem}e");
        }
        stem.to_string()
    })
}
