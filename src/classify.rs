//! Ad-hoc classification of date strings (`wk classify`).

use weistum_core::zeit::{classify_with, ZeitBounds};

/// Classify each input and print `input<TAB>label`.
pub fn run_classify(inputs: &[String], bounds: &ZeitBounds) {
    for line in classify_lines(inputs, bounds) {
        println!("{}", line);
    }
}

fn classify_lines(inputs: &[String], bounds: &ZeitBounds) -> Vec<String> {
    inputs
        .iter()
        .map(|raw| format!("{}\t{}", raw, classify_with(Some(raw), bounds)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_lines() {
        let lines = classify_lines(
            &["1475".to_string(), "".to_string(), "mitte 14. jh".to_string()],
            &ZeitBounds::default(),
        );
        assert_eq!(
            lines,
            vec!["1475\tEnde 15. Jh.", "\tunbekannt", "mitte 14. jh\tMitte 14. Jh."]
        );
    }
}
