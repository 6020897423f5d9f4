//! Fixed general notes printed after the module summary.

use crate::report::model::{Paragraph, Span};

/// The four usage notes, in print order.
pub fn general_notes() -> Vec<Paragraph> {
    vec![
        Paragraph::new()
            .span(Span::plain("1. The module can be started by calling "))
            .span(Span::mono("TBT\\TestApp.Player.Chromely.exe "))
            .span(Span::plain(
                "with named command line parameters. Within values of command line parameters \\ must be replaced with \\\\. This is especially true for file names containing paths and directories. Relative path specification is possible. Path parameter must not end with \\ or \\\\. ",
            ))
            .span(Span::plain("\nExample: ")),
        Paragraph::new().span(Span::mono(
            "TBT\\TestApp.Player.Chromely.exe /AutoLoginUserName=\"personidentifier\" /RawDataFolder=\"..\\\\resultfolder\" /MonitoringFile=\"..\\\\monitoring-for-personidentifier.json\" /AutoLoginCreateWithTest=\"PPVT_MP\" /Alter=\"121\"",
        )),
        Paragraph::new()
            .span(Span::plain(
                "2. The modules has runtime requirements. Run the 'Readiness-Tool' to check prerequisites for using the modules by calling ",
            ))
            .span(Span::mono("TBT\\ReadinessTool.exe"))
            .span(Span::plain(
                ". The 'Readiness-Tool' can also be started using the named command line arguments of the module.",
            )),
        Paragraph::new()
            .span(Span::plain(
                "3. Monitoring data are stored, if requested as monitoring file, in ",
            ))
            .span(Span::mono("JSON"))
            .span(Span::plain(
                " format as key-value list. Date types 'DateTime', 'Integer', 'String' and 'Decimal' are differentiated. Example: ",
            )),
        Paragraph::new()
            .span(Span::mono(
                "{\n\t\"ExampleDateTime\": \"2021-08-02T10:25:58.6209884+02:00\",\n",
            ))
            .span(Span::mono("\t\"ExampleInteger\": 42,\n"))
            .span(Span::mono("\t\"ExampleString\": \"Zeichenkette\",\n"))
            .span(Span::mono("\t\"ExampleDecimal\": 3.141592653589793\n}")),
        Paragraph::text(
            "4. The modules keep track of used person identifiers and each person identifier can only be used once.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::model::FontFace;

    #[test]
    fn test_notes_are_numbered_in_order() {
        let notes = general_notes();
        let numbered: Vec<String> = notes
            .iter()
            .map(Paragraph::plain_text)
            .filter(|t| t.chars().next().map_or(false, |c| c.is_ascii_digit()))
            .collect();
        assert_eq!(numbered.len(), 4);
        for (i, text) in numbered.iter().enumerate() {
            assert!(text.starts_with(&format!("{}. ", i + 1)));
        }
    }

    #[test]
    fn test_json_example_is_monospaced() {
        let notes = general_notes();
        let json = &notes[4];
        assert!(json.spans.iter().all(|s| s.face == FontFace::Mono));
        assert_eq!(
            json.plain_text(),
            "{\n\t\"ExampleDateTime\": \"2021-08-02T10:25:58.6209884+02:00\",\n\t\"ExampleInteger\": 42,\n\t\"ExampleString\": \"Zeichenkette\",\n\t\"ExampleDecimal\": 3.141592653589793\n}"
        );
    }
}
