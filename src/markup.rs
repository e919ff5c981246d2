use std::fmt;

/// Background used for a lone space between two chunks.
pub const MILD_BACKGROUND: &str = "#0f5c22";
/// Background used for runs of two or more spaces.
pub const ALERT_BACKGROUND: &str = "#8a1b1b";

/// One piece of a rendered filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Unescaped text containing no spaces.
    Text(String),
    /// A single space.
    MildSpace,
    /// A run of `n >= 2` consecutive spaces.
    AlertSpaces(usize),
}

/// Styled rendering of a filename.
///
/// The `Display` impl yields span markup with reserved characters escaped, so
/// the string is safe to hand to anything that interprets styled text. The
/// terminal front end walks [`Markup::segments`] instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup {
    segments: Vec<Segment>,
}

impl Markup {
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

impl fmt::Display for Markup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Text(chunk) => write_escaped(f, chunk)?,
                Segment::MildSpace => {
                    write!(f, "<span background='{}'> </span>", MILD_BACKGROUND)?
                }
                Segment::AlertSpaces(n) => write!(
                    f,
                    "<span background='{}'>{:n$}</span>",
                    ALERT_BACKGROUND,
                    "",
                    n = *n
                )?,
            }
        }
        Ok(())
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, chunk: &str) -> fmt::Result {
    for c in chunk.chars() {
        match c {
            '&' => f.write_str("&amp;")?,
            '<' => f.write_str("&lt;")?,
            '>' => f.write_str("&gt;")?,
            '\'' => f.write_str("&#39;")?,
            '"' => f.write_str("&quot;")?,
            other => write!(f, "{}", other)?,
        }
    }
    Ok(())
}

/// Split `name` into alternating space runs and non-space chunks.
///
/// Returns the markup together with whether any run of two or more spaces
/// was found. Only U+0020 counts; tabs and other whitespace stay in chunks.
pub fn generate_markup(name: &str) -> (Markup, bool) {
    let mut segments = Vec::new();
    let mut flagged = false;
    let mut rest = name;

    while !rest.is_empty() {
        let spaces = rest.len() - rest.trim_start_matches(' ').len();
        if spaces > 0 {
            if spaces > 1 {
                flagged = true;
                segments.push(Segment::AlertSpaces(spaces));
            } else {
                segments.push(Segment::MildSpace);
            }
            rest = &rest[spaces..];
        } else {
            let end = rest.find(' ').unwrap_or(rest.len());
            segments.push(Segment::Text(rest[..end].to_string()));
            rest = &rest[end..];
        }
    }

    (Markup { segments }, flagged)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(name: &str) -> (String, bool) {
        let (markup, flagged) = generate_markup(name);
        (markup.to_string(), flagged)
    }

    #[test]
    fn empty_name_yields_empty_markup() {
        let (markup, flagged) = generate_markup("");
        assert!(markup.segments().is_empty());
        assert_eq!(markup.to_string(), "");
        assert!(!flagged);
    }

    #[test]
    fn name_without_spaces_is_only_escaped() {
        assert_eq!(render("report.pdf"), ("report.pdf".to_string(), false));
        assert_eq!(
            render("a<b>&'c\".txt"),
            ("a&lt;b&gt;&amp;&#39;c&quot;.txt".to_string(), false)
        );
    }

    #[test]
    fn single_space_gets_one_mild_marker() {
        let (out, flagged) = render("my file.txt");
        assert!(!flagged);
        assert_eq!(out, "my<span background='#0f5c22'> </span>file.txt");
        assert_eq!(out.matches("#0f5c22").count(), 1);
    }

    #[test]
    fn double_space_is_flagged_with_alert_marker() {
        let (out, flagged) = render("b  b.txt");
        assert!(flagged);
        assert_eq!(out, "b<span background='#8a1b1b'>  </span>b.txt");
    }

    #[test]
    fn alert_marker_wraps_exact_run_length() {
        for n in 2..8 {
            let name = format!("x{}y", " ".repeat(n));
            let (out, flagged) = render(&name);
            assert!(flagged);
            let expected = format!("<span background='#8a1b1b'>{}</span>", " ".repeat(n));
            assert!(out.contains(&expected), "run of {n} not wrapped: {out}");
        }
    }

    #[test]
    fn leading_and_trailing_runs_are_not_special() {
        let (markup, flagged) = generate_markup("  a ");
        assert!(flagged);
        assert_eq!(
            markup.segments(),
            &[
                Segment::AlertSpaces(2),
                Segment::Text("a".into()),
                Segment::MildSpace,
            ]
        );
    }

    #[test]
    fn all_space_names_are_classified_by_length() {
        assert_eq!(generate_markup(" ").0.segments(), &[Segment::MildSpace]);
        let (markup, flagged) = generate_markup("    ");
        assert!(flagged);
        assert_eq!(markup.segments(), &[Segment::AlertSpaces(4)]);
    }

    #[test]
    fn tabs_and_control_characters_pass_through() {
        let (out, flagged) = render("a\t\tb\u{1}c");
        assert!(!flagged);
        assert_eq!(out, "a\t\tb\u{1}c");
    }

    #[test]
    fn multibyte_chunks_survive_splitting() {
        let (markup, flagged) = generate_markup("日本  語 ✓");
        assert!(flagged);
        assert_eq!(
            markup.segments(),
            &[
                Segment::Text("日本".into()),
                Segment::AlertSpaces(2),
                Segment::Text("語".into()),
                Segment::MildSpace,
                Segment::Text("✓".into()),
            ]
        );
    }
}
