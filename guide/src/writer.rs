use std::fmt;
use std::io::{self, Write};

use crate::database::GuideDatabase;
use crate::database::node::Node;
use crate::database::paragraph::{Fragment, Paragraph, StyledSpan};
use crate::sanitize::sanitize_title;

/// Serialize the whole database in guide format.
pub fn write_guide<W: Write>(database: &GuideDatabase, out: &mut W) -> io::Result<()> {
    write!(out, "{}", database)?;
    out.flush()
}

pub fn to_bytes(database: &GuideDatabase) -> Vec<u8> {
    database.to_string().into_bytes()
}

impl fmt::Display for GuideDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "@database \"{}\"", sanitize_title(&self.name))?;
        for node in self.nodes() {
            write!(f, "{}", node)?;
        }
        Ok(())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "@node {} \"{}\"", self.name(), sanitize_title(&self.title))?;
        for paragraph in &self.paragraphs {
            write!(f, "{}", paragraph)?;
        }
        writeln!(f, "@endnode")
    }
}

impl fmt::Display for Paragraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for fragment in &self.fragments {
            write!(f, "{}", fragment)?;
        }
        // a paragraph always ends its line
        match self.fragments.last() {
            Some(last) if !last.text().ends_with('\n') => writeln!(f),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fragment::Text(text) => f.write_str(text),
            Fragment::Span(span) => write!(f, "{}", span),
        }
    }
}

impl fmt::Display for StyledSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = &self.presentation;

        if let Some(fg) = self.foreground {
            write!(f, "@{{fg {}}}", fg)?;
        }
        if let Some(bg) = self.background {
            write!(f, "@{{bg {}}}", bg)?;
        }
        if style.bold {
            f.write_str("@{b}")?;
        }
        if style.italic {
            f.write_str("@{i}")?;
        }
        if style.underline {
            f.write_str("@{u}")?;
        }

        f.write_str(&self.text)?;

        if style.underline {
            f.write_str("@{uu}")?;
        }
        if style.italic {
            f.write_str("@{ui}")?;
        }
        if style.bold {
            f.write_str("@{ub}")?;
        }
        if self.background.is_some() {
            f.write_str("@{bg background}")?;
        }
        if self.foreground.is_some() {
            f.write_str("@{fg text}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::style::{Colour, HeadingLevel, Presentation};

    #[test]
    fn heading_spans() {
        let codes: Vec<String> = HeadingLevel::ALL
            .iter()
            .map(|&level| StyledSpan::heading("H", level).to_string())
            .collect();
        assert_eq!(
            codes,
            vec![
                "@{b}@{i}@{u}H@{uu}@{ui}@{ub}",
                "@{b}@{u}H@{uu}@{ub}",
                "@{u}H@{uu}",
                "@{i}H@{ui}",
            ]
        );
    }

    #[test]
    fn code_span() {
        assert_eq!(
            StyledSpan::code("  x = 1").to_string(),
            "@{fg fill}  x = 1@{fg text}"
        );
    }

    #[test]
    fn background_span() {
        let span = StyledSpan {
            text: "note".into(),
            foreground: Some(Colour::Shine),
            background: Some(Colour::Fill),
            presentation: Presentation::PLAIN,
        };
        assert_eq!(
            span.to_string(),
            "@{fg shine}@{bg fill}note@{bg background}@{fg text}"
        );
    }

    #[test]
    fn paragraph_terminates_line() {
        let mut p = Paragraph::new();
        p.span(StyledSpan::code("  code"));
        assert_eq!(p.to_string(), "@{fg fill}  code@{fg text}\n");

        let mut p = Paragraph::new();
        p.emit("text");
        p.emit("\n");
        assert_eq!(p.to_string(), "text\n");

        assert_eq!(Paragraph::new().to_string(), "");
    }

    #[test]
    fn whole_database() {
        let mut db = GuideDatabase::new("help.guide");
        let main = db.get_or_create("main");
        main.title = "Welcome \"home\"".into();
        main.paragraph().span(StyledSpan::heading("Start", HeadingLevel::H1));
        let p = main.paragraph();
        p.emit("See @{\"Other\" LINK OTHER}.");
        p.emit("\n");
        db.get_or_create("other").title = "Other".into();

        let mut out = Vec::new();
        write_guide(&db, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "@database \"help.guide\"\n\
             @node MAIN \"Welcome 'home'\"\n\
             @{b}@{i}@{u}Start@{uu}@{ui}@{ub}\n\
             See @{\"Other\" LINK OTHER}.\n\
             @endnode\n\
             @node OTHER \"Other\"\n\
             @endnode\n"
        );
        assert_eq!(to_bytes(&db), db.to_string().into_bytes());
    }
}
