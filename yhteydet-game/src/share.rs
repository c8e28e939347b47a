//! Shareable result encoding.
//!
//! Renders the attempt history as one symbol row per attempt under a
//! fixed-format header. Output is fully determined by its inputs so two
//! players with the same history produce byte-identical text.

use crate::session::Attempt;

/// Category symbols, indexed by category: yellow, green, blue, purple.
const SYMBOLS: [&str; 4] = ["\u{1F7E8}", "\u{1F7E9}", "\u{1F7E6}", "\u{1F7EA}"];

const PRODUCT_NAME: &str = "Yhteydet";
const STATUS_SOLVED: &str = "ratkaistu";
const STATUS_FAILED: &str = "ep\u{e4}onnistui";
const ATTEMPT_NOUN: &str = "yrityksell\u{e4}";

fn symbol(category: u8) -> &'static str {
    SYMBOLS[usize::from(category) % SYMBOLS.len()]
}

/// Encode the attempt history as share text: a header line followed by
/// one row of four symbols per attempt.
#[must_use]
pub fn share_text(history: &[Attempt], puzzle_title: &str, is_complete: bool) -> String {
    let lines: Vec<String> = history
        .iter()
        .map(|attempt| match attempt {
            Attempt::Correct { category } => symbol(*category).repeat(4),
            Attempt::Wrong { combo } => {
                let mut line = String::new();
                for (category, count) in combo.counts().into_iter().enumerate() {
                    #[allow(clippy::cast_possible_truncation)]
                    for _ in 0..count {
                        line.push_str(symbol(category as u8));
                    }
                }
                line
            }
        })
        .collect();

    let status = if is_complete {
        STATUS_SOLVED
    } else {
        STATUS_FAILED
    };
    format!(
        "{PRODUCT_NAME} \u{2013} {puzzle_title} \u{2013} {status} {} {ATTEMPT_NOUN}\n{}",
        lines.len(),
        lines.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::CanonicalCombo;

    fn wrong(categories: [u8; 4]) -> Attempt {
        Attempt::Wrong {
            combo: CanonicalCombo::new(categories),
        }
    }

    #[test]
    fn failed_history_renders_header_and_rows() {
        let history = [Attempt::Correct { category: 0 }, wrong([0, 0, 0, 1])];
        let text = share_text(&history, "T", false);
        assert_eq!(
            text,
            "Yhteydet – T – epäonnistui 2 yrityksellä\n🟨🟨🟨🟨\n🟨🟨🟨🟩"
        );
    }

    #[test]
    fn solved_history_uses_solved_status() {
        let history = [
            Attempt::Correct { category: 3 },
            Attempt::Correct { category: 1 },
        ];
        let text = share_text(&history, "Viikon peli 1", true);
        assert_eq!(
            text,
            "Yhteydet – Viikon peli 1 – ratkaistu 2 yrityksellä\n🟪🟪🟪🟪\n🟩🟩🟩🟩"
        );
    }

    #[test]
    fn wrong_rows_group_symbols_in_category_order() {
        // Submitted order does not matter; rows list category 0..3.
        let text = share_text(&[wrong([3, 0, 3, 1])], "T", false);
        assert_eq!(text, "Yhteydet – T – epäonnistui 1 yrityksellä\n🟨🟩🟪🟪");
    }

    #[test]
    fn empty_history_still_has_a_header() {
        let text = share_text(&[], "T", false);
        assert_eq!(text, "Yhteydet – T – epäonnistui 0 yrityksellä\n");
    }

    #[test]
    fn identical_histories_encode_identically() {
        let history = [Attempt::Correct { category: 2 }, wrong([1, 1, 2, 1])];
        assert_eq!(
            share_text(&history, "X", true),
            share_text(&history, "X", true)
        );
    }
}
