//! LaTeX markup left over in rendered text.
//!
//! Field values often carry accent macros (`{\"o}`, `\'{e}`) and TeX dashes.
//! [`decode`] turns them into Unicode; [`strip_braces`] removes the grouping
//! braces that survive formatting.

use regex::{Captures, Regex};

/// Decodes accent macros, letter macros and dashes into Unicode.
///
/// Unknown macros are left as they are.
pub fn decode(text: &str) -> String {
    if !text.contains('\\') && !text.contains("--") && !text.contains('~') {
        return text.to_string();
    }

    // \"o  \"{o}  {\"o}  \c{c}  \c c
    // Letter-named accents need a brace or a space before their argument,
    // otherwise `\relax` would read as `\r` applied to `e`.
    let accent_re = Regex::new(
        r#"\\(?:(["'`^~=.])\s*(?:\{\s*([A-Za-z]|\\[ij])\s*\}|([A-Za-z]))|([uvHckr])(?:\s*\{\s*([A-Za-z]|\\[ij])\s*\}|\s+([A-Za-z])))"#,
    )
    .unwrap();
    let decoded = accent_re.replace_all(text, |caps: &Captures| {
        let accent = caps
            .get(1)
            .or_else(|| caps.get(4))
            .and_then(|m| m.as_str().chars().next())
            .unwrap_or(' ');
        let base = [2, 3, 5, 6]
            .iter()
            .find_map(|&i| caps.get(i))
            .map_or("", |m| m.as_str());
        let base = match base {
            r"\i" => "i",
            r"\j" => "j",
            other => other,
        };
        match compose(accent, base) {
            Some(c) => c.to_string(),
            None => caps[0].to_string(),
        }
    });

    // \ss  \o  \aa ... terminated by a non-letter
    let letter_re = Regex::new(r"\\(ss|ae|AE|oe|OE|aa|AA|o|O|l|L|i|j)(?:\{\}|\s+|\b|$)").unwrap();
    let decoded = letter_re.replace_all(&decoded, |caps: &Captures| {
        letter_macro(&caps[1]).unwrap_or(&caps[0]).to_string()
    });

    // \& \% \$ \# \_
    let escape_re = Regex::new(r"\\([&%$#_])").unwrap();
    let decoded = escape_re.replace_all(&decoded, "$1");

    decoded
        .replace("---", "\u{2014}")
        .replace("--", "\u{2013}")
        .replace('~', "\u{a0}")
}

/// Removes literal `{` and `}`.
pub fn strip_braces(text: &str) -> String {
    text.chars().filter(|c| *c != '{' && *c != '}').collect()
}

/// Decodes then strips braces, the clean-up applied to every rendered entry.
pub fn clean(text: &str) -> String {
    strip_braces(&decode(text))
}

fn letter_macro(name: &str) -> Option<&'static str> {
    let s = match name {
        "ss" => "ß",
        "ae" => "æ",
        "AE" => "Æ",
        "oe" => "œ",
        "OE" => "Œ",
        "aa" => "å",
        "AA" => "Å",
        "o" => "ø",
        "O" => "Ø",
        "l" => "ł",
        "L" => "Ł",
        "i" => "ı",
        "j" => "ȷ",
        _ => return None,
    };
    Some(s)
}

/// Combining mark for a TeX accent command.
fn combining_mark(accent: char) -> Option<char> {
    let mark = match accent {
        '`' => '\u{300}',
        '\'' => '\u{301}',
        '^' => '\u{302}',
        '~' => '\u{303}',
        '=' => '\u{304}',
        'u' => '\u{306}',
        '.' => '\u{307}',
        '"' => '\u{308}',
        'r' => '\u{30a}',
        'H' => '\u{30b}',
        'v' => '\u{30c}',
        'c' => '\u{327}',
        'k' => '\u{328}',
        _ => return None,
    };
    Some(mark)
}

/// Precomposed form of the common accented Latin letters; anything else
/// falls back to base letter plus combining mark.
fn compose(accent: char, base: &str) -> Option<String> {
    let mut chars = base.chars();
    let letter = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    let precomposed = match (accent, letter) {
        ('"', 'a') => 'ä',
        ('"', 'o') => 'ö',
        ('"', 'u') => 'ü',
        ('"', 'e') => 'ë',
        ('"', 'i') => 'ï',
        ('"', 'y') => 'ÿ',
        ('"', 'A') => 'Ä',
        ('"', 'O') => 'Ö',
        ('"', 'U') => 'Ü',
        ('"', 'E') => 'Ë',
        ('"', 'I') => 'Ï',
        ('\'', 'a') => 'á',
        ('\'', 'e') => 'é',
        ('\'', 'i') => 'í',
        ('\'', 'o') => 'ó',
        ('\'', 'u') => 'ú',
        ('\'', 'y') => 'ý',
        ('\'', 'n') => 'ń',
        ('\'', 'c') => 'ć',
        ('\'', 's') => 'ś',
        ('\'', 'z') => 'ź',
        ('\'', 'A') => 'Á',
        ('\'', 'E') => 'É',
        ('\'', 'I') => 'Í',
        ('\'', 'O') => 'Ó',
        ('\'', 'U') => 'Ú',
        ('`', 'a') => 'à',
        ('`', 'e') => 'è',
        ('`', 'i') => 'ì',
        ('`', 'o') => 'ò',
        ('`', 'u') => 'ù',
        ('`', 'A') => 'À',
        ('`', 'E') => 'È',
        ('^', 'a') => 'â',
        ('^', 'e') => 'ê',
        ('^', 'i') => 'î',
        ('^', 'o') => 'ô',
        ('^', 'u') => 'û',
        ('~', 'a') => 'ã',
        ('~', 'n') => 'ñ',
        ('~', 'o') => 'õ',
        ('~', 'N') => 'Ñ',
        ('c', 'c') => 'ç',
        ('c', 'C') => 'Ç',
        ('c', 's') => 'ş',
        ('v', 'c') => 'č',
        ('v', 's') => 'š',
        ('v', 'z') => 'ž',
        ('v', 'r') => 'ř',
        ('v', 'e') => 'ě',
        ('v', 'C') => 'Č',
        ('v', 'S') => 'Š',
        ('v', 'Z') => 'Ž',
        ('r', 'a') => 'å',
        ('r', 'A') => 'Å',
        ('H', 'o') => 'ő',
        ('H', 'u') => 'ű',
        ('k', 'a') => 'ą',
        ('k', 'e') => 'ę',
        ('.', 'z') => 'ż',
        ('=', 'a') => 'ā',
        ('=', 'e') => 'ē',
        ('u', 'g') => 'ğ',
        _ => {
            let mark = combining_mark(accent)?;
            return Some(format!("{}{}", letter, mark));
        }
    };
    Some(precomposed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_braced_accents() {
        assert_eq!(decode(r#"Schr{\"o}der"#), "Schr{ö}der");
        assert_eq!(clean(r#"Schr{\"o}der"#), "Schröder");
    }

    #[test]
    fn test_decode_argument_forms() {
        assert_eq!(decode(r"\'{e}t\'e"), "été");
        assert_eq!(decode(r"Fran\c{c}ois"), "François");
        assert_eq!(decode(r"Fran\c cois"), "François");
        assert_eq!(decode(r"\v{S}koda"), "Škoda");
    }

    #[test]
    fn test_decode_dotless_i() {
        assert_eq!(decode(r"\'{\i}"), "í");
    }

    #[test]
    fn test_decode_letter_macros() {
        assert_eq!(decode(r"Stra\ss e"), "Straße");
        assert_eq!(decode(r"{\o}rsted"), "{ø}rsted");
        assert_eq!(decode(r#"\AA{}ngstr\"om"#), "Ångström");
    }

    #[test]
    fn test_decode_dashes_and_escapes() {
        assert_eq!(decode("pp. 1--10"), "pp. 1\u{2013}10");
        assert_eq!(decode("a---b"), "a\u{2014}b");
        assert_eq!(decode(r"R\&D 50\%"), "R&D 50%");
    }

    #[test]
    fn test_decode_unknown_macro_untouched() {
        assert_eq!(decode(r"\emph{x}"), r"\emph{x}");
    }

    #[test]
    fn test_decode_leaves_longer_macros_alone() {
        assert_eq!(decode(r"\relax x"), r"\relax x");
    }

    #[test]
    fn test_decode_falls_back_to_combining_mark() {
        assert_eq!(decode(r"\~{y}"), "y\u{303}");
    }

    #[test]
    fn test_strip_braces() {
        assert_eq!(strip_braces("{Big} {DNA}"), "Big DNA");
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(clean("Plain title"), "Plain title");
    }
}
