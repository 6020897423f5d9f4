//! Assembles the release notes document from repository and module data.

use crate::config::types::{ModuleConfig, ParameterDoc, ProjectConfig};
use crate::report::model::{Document, FontFace, Paragraph, Rgb, Section, SectionKind, Span};
use crate::report::notes::general_notes;
use crate::vcs::{HistoryEntry, RepositorySnapshot};
use chrono::{DateTime, Local};

pub const TITLE: &str = "Release Notes";
const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

pub struct ReportBuilder<'a> {
    snapshot: &'a RepositorySnapshot,
    config: &'a ProjectConfig,
    generated_at: DateTime<Local>,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(snapshot: &'a RepositorySnapshot, config: &'a ProjectConfig) -> Self {
        Self {
            snapshot,
            config,
            generated_at: Local::now(),
        }
    }

    pub fn generated_at(mut self, generated_at: DateTime<Local>) -> Self {
        self.generated_at = generated_at;
        self
    }

    /// Summary, one section per module, then the revision history.
    pub fn build(&self) -> Document {
        let mut sections = Vec::with_capacity(self.config.modules.len() + 2);
        sections.push(self.summary_section());
        for (i, module) in self.config.modules.iter().enumerate() {
            sections.push(self.module_section(module, i == 0));
        }
        sections.push(history_section(&self.snapshot.history));

        Document {
            title: TITLE.to_string(),
            sections,
        }
    }

    fn summary_section(&self) -> Section {
        let range = &self.snapshot.range;
        let mut section = Section::new(SectionKind::Summary, false);

        section.paragraph(Paragraph::new().size(18.0).span(Span::bold(TITLE)));
        section.paragraph(Paragraph::text(format!(
            "Repository: {}",
            self.snapshot.repository
        )));
        section.paragraph(Paragraph::text(format!(
            "Revision: Start = {} / End = {} (Modified: {}, Switched: {})",
            range.start,
            range.end,
            flag(range.modified),
            flag(range.switched)
        )));
        section.paragraph(Paragraph::text(format!(
            "Creation Date / Time: {}",
            self.generated_at.format(TIMESTAMP_FORMAT)
        )));

        section.paragraph(Paragraph::new().span(Span::bold("Modules in this Release: ")));
        section.list(
            self.config
                .modules
                .iter()
                .map(|m| Paragraph::item().span(Span::plain(&m.module_name)))
                .collect(),
        );

        section.paragraph(Paragraph::new().span(Span::bold("General Notes: ")));
        for note in general_notes() {
            section.paragraph(note);
        }

        section
    }

    fn module_section(&self, module: &ModuleConfig, new_page: bool) -> Section {
        let mut section = Section::new(SectionKind::Module(module.module_name.clone()), new_page);

        section.paragraph(
            Paragraph::new()
                .size(16.0)
                .span(Span::plain(format!("Module \"{}\"", module.module_name))),
        );
        section.paragraph(Paragraph::text(format!("Study: {}", module.study)));

        section.paragraph(Paragraph::text("Module Content (Domains)"));
        section.list(
            module
                .domains
                .iter()
                .map(|d| Paragraph::item().span(Span::plain(d)))
                .collect(),
        );

        section.paragraph(Paragraph::text(format!(
            "Interviewer-Menu - Hotkey: {}",
            module.hot_key
        )));
        section.list(
            module
                .interviewer_menu_documentation
                .iter()
                .map(|menu| {
                    Paragraph::item()
                        .span(Span::plain("Password "))
                        .span(
                            Span::mono(&menu.password)
                                .color(Rgb::BLUE)
                                .highlight(Rgb::LIGHT_GRAY),
                        )
                        .span(Span::plain(format!(": {}", menu.description)))
                })
                .collect(),
        );

        section.paragraph(Paragraph::text("Monitoring Variables"));
        section.list(
            module
                .monitoring_variable_documentation
                .iter()
                .map(|var| {
                    Paragraph::item()
                        .span(Span::plain(&var.name).face(FontFace::Oblique))
                        .span(Span::plain(" ["))
                        .span(Span::mono(&var.var_type).highlight(Rgb::LIGHT_GRAY))
                        .span(Span::plain(format!("]: {}", var.description)))
                })
                .collect(),
        );

        section.paragraph(Paragraph::text("Startup Parameter (Default)"));
        section.list(
            self.config
                .default_startup_parameters
                .iter()
                .map(parameter_item)
                .collect(),
        );

        section.paragraph(Paragraph::text("Module-Specific Startup Parameter"));
        let specific = if module.startup_parameters.is_empty() {
            vec![Paragraph::item().span(Span::plain("(none)"))]
        } else {
            module.startup_parameters.iter().map(parameter_item).collect()
        };
        section.list(specific);

        section
    }
}

/// Capitalized boolean, as printed in the revision line.
fn flag(value: bool) -> &'static str {
    if value {
        "True"
    } else {
        "False"
    }
}

fn parameter_item(parameter: &ParameterDoc) -> Paragraph {
    Paragraph::item()
        .span(
            Span::mono(&parameter.name)
                .color(Rgb::RED)
                .highlight(Rgb::LIGHT_GRAY),
        )
        .span(Span::plain(format!(": {}", parameter.description)))
}

fn history_section(history: &[HistoryEntry]) -> Section {
    let mut section = Section::new(SectionKind::History, true);
    section.paragraph(Paragraph::new().size(18.0).span(Span::plain("Revision History")));
    section.list(
        history
            .iter()
            .map(|h| {
                Paragraph::item().span(Span::plain(format!(
                    "{} / {}: {}",
                    h.revision, h.author, h.message
                )))
            })
            .collect(),
    );
    section
}
