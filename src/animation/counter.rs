/// A numeric literal as it appears in markup ("99.9%", "10+", "$250"),
/// split so the number can be animated while the decoration stays put.
#[derive(Clone, Debug, PartialEq)]
pub struct CounterLiteral {
    literal: String,
    prefix: String,
    suffix: String,
    value: f64,
    decimals: usize,
}

impl CounterLiteral {
    /// Returns `None` for text that is not a single number with optional
    /// decoration, e.g. "24/7" has digits in its suffix and stays static.
    pub fn parse(text: &str) -> Option<Self> {
        let literal = text.trim();
        let start = literal.find(|c: char| c.is_ascii_digit())?;
        let (prefix, rest) = literal.split_at(start);

        let int_len = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        let mut end = int_len;
        let mut decimals = 0;
        if rest[int_len..].starts_with('.') {
            let frac = &rest[int_len + 1..];
            let frac_len = frac.find(|c: char| !c.is_ascii_digit()).unwrap_or(frac.len());
            if frac_len > 0 {
                decimals = frac_len;
                end = int_len + 1 + frac_len;
            }
        }

        let (number, suffix) = rest.split_at(end);
        if suffix.chars().any(|c| c.is_ascii_digit()) {
            return None;
        }
        let value = number.parse::<f64>().ok()?;

        Some(Self {
            literal: literal.to_string(),
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
            value,
            decimals,
        })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn decimals(&self) -> usize {
        self.decimals
    }

    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// Formats an intermediate value. Values are floored to the literal's
    /// precision so a rising counter never shows its target early.
    pub fn format(&self, value: f64) -> String {
        let scale = 10f64.powi(self.decimals as i32);
        let floored = (value.max(0.0) * scale + 1e-9).floor() / scale;
        let shown = floored.min(self.value);
        format!("{}{:.*}{}", self.prefix, self.decimals, shown, self.suffix)
    }

    /// Text for a given tween progress: the literal itself at the end.
    pub fn frame(&self, start: f64, progress: f64) -> String {
        if progress >= 1.0 {
            return self.literal.clone();
        }
        self.format(start + (self.value - start) * progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_decorated_literals() {
        let pct = CounterLiteral::parse("99.9%").unwrap();
        assert_eq!(pct.value(), 99.9);
        assert_eq!(pct.decimals(), 1);
        assert_eq!(pct.format(42.37), "42.3%");

        let plus = CounterLiteral::parse("10+").unwrap();
        assert_eq!(plus.decimals(), 0);
        assert_eq!(plus.format(7.9), "7+");

        let money = CounterLiteral::parse("$250").unwrap();
        assert_eq!(money.format(120.0), "$120");
    }

    #[test]
    fn rejects_non_counters() {
        assert!(CounterLiteral::parse("24/7").is_none());
        assert!(CounterLiteral::parse("Online").is_none());
        assert!(CounterLiteral::parse("").is_none());
    }

    #[test]
    fn trailing_dot_is_decoration() {
        let c = CounterLiteral::parse("100.").unwrap();
        assert_eq!(c.decimals(), 0);
        assert_eq!(c.frame(0.0, 1.0), "100.");
    }

    #[test]
    fn final_frame_is_the_literal() {
        let c = CounterLiteral::parse("99.9").unwrap();
        assert_eq!(c.frame(0.0, 0.9999), "99.8");
        assert_eq!(c.frame(0.0, 1.0), "99.9");
        let whole = CounterLiteral::parse("100").unwrap();
        assert_eq!(whole.frame(0.0, 1.0), "100");
        assert_eq!(whole.frame(0.0, 0.5), "50");
    }

    proptest! {
        #[test]
        fn counter_frames_rise_to_the_literal(
            int in 0u32..100_000,
            frac in 0u32..100,
            steps in 2usize..120,
        ) {
            let literal = format!("{}.{:02}%", int, frac);
            let counter = CounterLiteral::parse(&literal).unwrap();
            let mut last = -1.0;
            for i in 0..=steps {
                let text = counter.frame(0.0, i as f64 / steps as f64);
                let shown: f64 = text.trim_end_matches('%').parse().unwrap();
                prop_assert!(shown >= last);
                prop_assert!(shown <= counter.value() + 1e-9);
                last = shown;
            }
            prop_assert_eq!(counter.frame(0.0, 1.0), literal);
        }
    }
}
