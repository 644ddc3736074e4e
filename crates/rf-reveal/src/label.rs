//! Display labels derived from candidate identifiers
//!
//! `"DeadHard.png"` and `"dead_hard.png"` both read `"DEAD HARD"`. Acronyms
//! stay whole (`"NOED.png"` → `"NOED"`), and a trailing capitalised word is
//! split off an acronym (`"HEXRuin"` → `"HEX RUIN"`).

const SEPARATORS: &[char] = &['_', '-', ' '];

/// Extensions dropped before labelling; any other dot is part of the name
const ASSET_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "bmp"];

/// Strip a trailing file extension, if any
pub fn stem(candidate: &str) -> &str {
    match candidate.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() && !ext.contains(' ') => stem,
        _ => candidate,
    }
}

/// Stem for labelling: only asset extensions are stripped, so a label fed
/// back in keeps its dots (`"ST.LOUIS"` stays whole)
fn label_stem(candidate: &str) -> &str {
    match candidate.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty() && ASSET_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)) =>
        {
            stem
        }
        _ => candidate,
    }
}

/// Split a stem into words on separators and camel-case boundaries
fn words(stem: &str) -> Vec<String> {
    let mut words = Vec::new();

    for chunk in stem.split(SEPARATORS).filter(|c| !c.is_empty()) {
        let chars: Vec<char> = chunk.chars().collect();
        let mut current = String::new();

        for (i, &c) in chars.iter().enumerate() {
            if i > 0 && c.is_uppercase() {
                let prev = chars[i - 1];
                let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
                let boundary = prev.is_lowercase()
                    || prev.is_ascii_digit()
                    || (prev.is_uppercase() && next_is_lower);
                if boundary && !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
            }
            current.push(c);
        }

        if !current.is_empty() {
            words.push(current);
        }
    }

    words
}

/// Human-readable uppercase label for a candidate
pub fn format_label(candidate: &str) -> String {
    words(label_stem(candidate)).join(" ").to_uppercase()
}

/// Label with spaces removed, e.g. `"THETRAPPER"`
pub fn compact_label(candidate: &str) -> String {
    format_label(candidate).replace(' ', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_and_snake_case_agree() {
        assert_eq!(format_label("DeadHard.png"), "DEAD HARD");
        assert_eq!(format_label("dead_hard.png"), "DEAD HARD");
        assert_eq!(format_label("dead-hard"), "DEAD HARD");
    }

    #[test]
    fn test_acronyms_stay_whole() {
        assert_eq!(format_label("NOED.png"), "NOED");
        assert_eq!(format_label("HEXRuin.png"), "HEX RUIN");
        assert_eq!(format_label("BBQAndChili.png"), "BBQ AND CHILI");
    }

    #[test]
    fn test_relabel_is_stable() {
        for raw in ["DeadHard.png", "dead_hard.png", "NOED.png", "TheTrapper.png", "Hex_NoOneEscapesDeath"] {
            let once = format_label(raw);
            let twice = format_label(&once);
            assert_eq!(once, twice, "label of {raw} not stable");
            let resplit: Vec<&str> = once.split(' ').collect();
            assert_eq!(resplit.join(" "), once);
        }
    }

    #[test]
    fn test_stem_only_strips_real_extensions() {
        assert_eq!(stem("Medkit.png"), "Medkit");
        assert_eq!(stem("archive.tar.gz"), "archive.tar");
        assert_eq!(stem(".hidden"), ".hidden");
        assert_eq!(stem("DEAD HARD"), "DEAD HARD");
    }

    #[test]
    fn test_dotted_names_relabel_stably() {
        assert_eq!(format_label("St.Louis.png"), "ST.LOUIS");
        assert_eq!(format_label("ST.LOUIS"), "ST.LOUIS");
        assert_eq!(format_label("Adrenaline.PNG"), "ADRENALINE");
        assert_eq!(format_label("notes.txt"), "NOTES.TXT");
    }

    #[test]
    fn test_compact_label() {
        assert_eq!(compact_label("TheTrapper.png"), "THETRAPPER");
        assert_eq!(compact_label("the_nurse.png"), "THENURSE");
    }

    #[test]
    fn test_empty_and_separator_only() {
        assert_eq!(format_label(""), "");
        assert_eq!(format_label("__.png"), "");
    }
}
