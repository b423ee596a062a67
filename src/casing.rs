//! Identifier casing for generated code.

use unicode_normalization::char::decompose_canonical;

/// Fold Latin-1 Supplement and Latin Extended-A letters to ASCII and drop
/// combining diacritical marks: `über` -> `uber`, `ß` -> `ss`, `Æ` -> `Ae`.
///
/// Characters outside those blocks are left alone.
pub fn deburr(input: &str) -> String {
    let mut out = String::with_capacity(input.len());

    for c in input.chars() {
        if let Some(folded) = fold_letter(c) {
            out.push_str(folded);
        } else if is_latin_letter(c) {
            decompose_canonical(c, |d| out.push(d));
        } else {
            out.push(c);
        }
    }

    out.retain(|c| !is_combining_mark(c));
    out
}

// Latin-1 Supplement letters (minus `×` and `÷`) and Latin Extended-A.
fn is_latin_letter(c: char) -> bool {
    matches!(c, '\u{c0}'..='\u{d6}' | '\u{d8}'..='\u{f6}' | '\u{f8}'..='\u{17f}')
}

fn is_combining_mark(c: char) -> bool {
    matches!(c, '\u{300}'..='\u{36f}' | '\u{fe20}'..='\u{fe2f}' | '\u{20d0}'..='\u{20ff}')
}

// Letters with no canonical decomposition.
fn fold_letter(c: char) -> Option<&'static str> {
    let folded = match c {
        'Æ' => "Ae",
        'æ' => "ae",
        'Ð' | 'Đ' => "D",
        'ð' | 'đ' => "d",
        'Ø' => "O",
        'ø' => "o",
        'Þ' => "Th",
        'þ' => "th",
        'ß' => "ss",
        'Ħ' => "H",
        'ħ' => "h",
        'ı' => "i",
        'Ĳ' => "IJ",
        'ĳ' => "ij",
        'ĸ' => "k",
        'Ŀ' | 'Ł' => "L",
        'ŀ' | 'ł' => "l",
        'ŉ' => "'n",
        'Ŋ' => "N",
        'ŋ' => "n",
        'Œ' => "Oe",
        'œ' => "oe",
        'Ŧ' => "T",
        'ŧ' => "t",
        'ſ' => "s",
        _ => return None,
    };
    Some(folded)
}

/// Split text into words.
///
/// Boundaries are any non-alphanumeric character, a lowercase letter
/// followed by an uppercase one (`pS` -> `p`, `S`), the last capital of an
/// acronym run (`XMLHttp` -> `XML`, `Http`), and letter/digit transitions
/// (`v2beta` -> `v`, `2`, `beta`). Ordinals such as `1st` or `4TH` stay one
/// word. Apostrophes are dropped so contractions stay one word.
pub fn words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input
        .chars()
        .filter(|c| !matches!(c, '\'' | '\u{2019}'))
        .collect();

    let mut words = Vec::new();
    let mut current = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            i += 1;
            continue;
        }

        let starts_digits = c.is_ascii_digit()
            && current.chars().last().map_or(true, |prev| !prev.is_numeric());
        if starts_digits {
            if let Some(end) = ordinal_end(&chars, i) {
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
                words.push(chars[i..end].iter().collect());
                i = end;
                continue;
            }
        }

        if let Some(prev) = current.chars().last() {
            if is_boundary(prev, c, chars.get(i + 1).copied()) {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
        i += 1;
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// End index of an ordinal (`1st`, `22nd`, `4TH`) starting at `start`.
///
/// The suffix must agree with the last digit and be all lowercase or all
/// uppercase. It must be followed by a word break, an underscore, or a letter
/// of the opposite case (`1stPlace`).
fn ordinal_end(chars: &[char], start: usize) -> Option<usize> {
    let digits = chars[start..]
        .iter()
        .take_while(|c| c.is_ascii_digit())
        .count();
    let suffix_start = start + digits;
    let end = suffix_start + 2;
    let suffix: String = chars.get(suffix_start..end)?.iter().collect();

    let expected = match chars[suffix_start - 1] {
        '1' => "st",
        '2' => "nd",
        '3' => "rd",
        _ => "th",
    };

    let next = chars.get(end).copied();
    let at_break = next.map_or(true, |n| !(n.is_ascii_alphanumeric() || n == '_'));

    let accepted = if suffix == expected {
        at_break || next.is_some_and(|n| n.is_ascii_uppercase() || n == '_')
    } else if suffix == expected.to_ascii_uppercase() {
        at_break || next.is_some_and(|n| n.is_ascii_lowercase() || n == '_')
    } else {
        false
    };
    accepted.then_some(end)
}

fn is_boundary(prev: char, c: char, next: Option<char>) -> bool {
    if prev.is_numeric() != c.is_numeric() {
        return true;
    }
    if prev.is_lowercase() && c.is_uppercase() {
        return true;
    }
    prev.is_uppercase() && c.is_uppercase() && next.is_some_and(char::is_lowercase)
}

/// `my-event` -> `myEvent`, `XMLHttpRequest` -> `xmlHttpRequest`.
///
/// Accented Latin letters are folded with [`deburr`] first.
pub fn camel_case(input: &str) -> String {
    words(&deburr(input))
        .iter()
        .enumerate()
        .map(|(i, word)| {
            let lower = word.to_lowercase();
            if i == 0 {
                lower
            } else {
                upper_first(&lower)
            }
        })
        .collect()
}

/// camelCase, then uppercase the first character.
///
/// `pS` -> `PS`, `my-event` -> `MyEvent`. Empty input stays empty.
pub fn pascal_case(input: &str) -> String {
    upper_first(&camel_case(input))
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
