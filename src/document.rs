use pdf_writer::types::{ActionType, AnnotationType};
use pdf_writer::{Finish, Name, Pdf, Rect as PdfRect, Ref, Str, TextStr};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::destination::{Destination, DestinationRegistry};
use crate::error::{Error, ErrorKind, Result};
use crate::render::{self, cover, Canvas, Font, Link, PageResources};

const PRODUCER: &str = concat!("tabcal ", env!("CARGO_PKG_VERSION"));

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Empty,
    DestinationsRegistered,
    PagesDrawn,
    Finalized,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Empty => "empty",
            Stage::DestinationsRegistered => "destinations registered",
            Stage::PagesDrawn => "pages drawn",
            Stage::Finalized => "finalized",
        };
        write!(f, "{}", name)
    }
}

struct DrawnPage {
    content: Vec<u8>,
    links: Vec<Link>,
    anchor: Option<Destination>,
}

/// Outcome of a finished run.
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub page_count: usize,
    pub size: usize,
    /// Destination name and the zero-based index of the page it lands on.
    pub destinations: Vec<(String, usize)>,
}

pub struct Document {
    pub bytes: Vec<u8>,
    pub summary: Summary,
}

/// Builds the calendar PDF in four strictly ordered stages.
///
/// All destinations are registered before the first page is drawn, pages are
/// drawn in document order (cover, then every month of every year) and only
/// the finalized document is serialized. Calling a stage out of order fails
/// without changing the assembler.
pub struct Assembler<'a> {
    config: &'a Config,
    stage: Stage,
    resources: Option<PageResources<'a>>,
    pages: Vec<DrawnPage>,
}

impl<'a> Assembler<'a> {
    pub fn new(config: &'a Config) -> Self {
        Assembler {
            config,
            stage: Stage::Empty,
            resources: None,
            pages: Vec::with_capacity(config.page_count()),
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    fn expect_stage(&self, expected: Stage) -> Result<()> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(Error::new(
                ErrorKind::InvalidStage,
                &format!("expected stage '{}', but assembler is '{}'", expected, self.stage),
            ))
        }
    }

    pub fn register_destinations(&mut self) -> Result<&DestinationRegistry> {
        self.expect_stage(Stage::Empty)?;
        self.config.validate()?;

        let resources = PageResources::new(self.config);
        log::debug!("Registered {} page destinations", resources.registry.len());

        self.stage = Stage::DestinationsRegistered;
        Ok(&self.resources.insert(resources).registry)
    }

    pub fn registry(&self) -> Option<&DestinationRegistry> {
        self.resources.as_ref().map(|r| &r.registry)
    }

    pub fn draw_pages(&mut self) -> Result<usize> {
        self.expect_stage(Stage::DestinationsRegistered)?;

        let resources = self.resources.as_ref().ok_or_else(|| {
            Error::new(ErrorKind::InvalidStage, "destinations were never registered")
        })?;
        let ctx = resources.context();
        let mut pages = Vec::with_capacity(self.config.page_count());

        let mut canvas = Canvas::new();
        cover::draw_cover_page(&mut canvas, &ctx);
        let (content, links) = canvas.finish();
        pages.push(DrawnPage {
            content,
            links,
            anchor: None,
        });
        log::debug!("Drew cover page");

        for destination in resources.registry.iter() {
            let mut canvas = Canvas::new();
            render::draw_month_page(&mut canvas, &ctx, destination.year(), destination.month())?;

            let (content, links) = canvas.finish();
            pages.push(DrawnPage {
                content,
                links,
                anchor: Some(destination.clone()),
            });
            log::debug!("Drew page {} ({})", pages.len(), destination);
        }

        self.pages = pages;
        self.stage = Stage::PagesDrawn;

        Ok(self.pages.len())
    }

    /// Serializes all drawn pages into one PDF.
    pub fn finalize(&mut self) -> Result<Document> {
        self.expect_stage(Stage::PagesDrawn)?;

        let anchors: BTreeMap<&str, usize> = self
            .pages
            .iter()
            .enumerate()
            .filter_map(|(idx, page)| page.anchor.as_ref().map(|d| (d.name(), idx)))
            .collect();

        if let Some(link) = self
            .pages
            .iter()
            .flat_map(|page| page.links.iter())
            .find(|link| !anchors.contains_key(link.destination.name()))
        {
            return Err(Error::new(
                ErrorKind::UnknownDestination,
                &format!("link to '{}' has no page", link.destination),
            ));
        }

        let bytes = self.write_pdf(&anchors);
        let summary = Summary {
            page_count: self.pages.len(),
            size: bytes.len(),
            destinations: anchors
                .iter()
                .map(|(name, idx)| (name.to_string(), *idx))
                .collect(),
        };

        self.stage = Stage::Finalized;

        Ok(Document { bytes, summary })
    }

    fn write_pdf(&self, anchors: &BTreeMap<&str, usize>) -> Vec<u8> {
        let page_size = &self.config.page;

        let mut alloc = Ref::new(1);
        let catalog_id = alloc.bump();
        let tree_id = alloc.bump();
        let info_id = alloc.bump();
        let font_ids: Vec<(Font, Ref)> = Font::ALL.iter().map(|&f| (f, alloc.bump())).collect();
        let page_ids: Vec<Ref> = self.pages.iter().map(|_| alloc.bump()).collect();
        let dest_ids: BTreeMap<&str, Ref> =
            anchors.keys().map(|&name| (name, alloc.bump())).collect();

        let mut pdf = Pdf::new();

        let mut catalog = pdf.catalog(catalog_id);
        catalog.pages(tree_id);
        {
            let mut names = catalog.insert(Name(b"Names")).dict();
            let mut dests = names.insert(Name(b"Dests")).dict();
            let mut entries = dests.insert(Name(b"Names")).array();
            for (name, dest_id) in &dest_ids {
                entries.item(Str(name.as_bytes()));
                entries.item(*dest_id);
            }
        }
        catalog.finish();

        pdf.pages(tree_id)
            .kids(page_ids.iter().copied())
            .count(page_ids.len() as i32);

        for (name, dest_id) in &dest_ids {
            let mut dest = pdf.indirect(*dest_id).array();
            dest.item(page_ids[anchors[name]]);
            dest.item(Name(b"Fit"));
            dest.finish();
        }

        for (font, font_id) in &font_ids {
            pdf.type1_font(*font_id)
                .base_font(font.base_font())
                .encoding_predefined(Name(b"WinAnsiEncoding"));
        }

        for (page, &page_id) in self.pages.iter().zip(&page_ids) {
            let content_id = alloc.bump();

            let mut writer = pdf.page(page_id);
            writer.media_box(PdfRect::new(0.0, 0.0, page_size.width, page_size.height));
            writer.parent(tree_id);
            writer.contents(content_id);
            {
                let mut resources = writer.resources();
                let mut fonts = resources.fonts();
                for (font, font_id) in &font_ids {
                    fonts.pair(font.resource_name(), *font_id);
                }
            }
            if !page.links.is_empty() {
                let mut annots = writer.annotations();
                for link in &page.links {
                    let (x1, y1, x2, y2) = link.rect.corners();
                    let mut annot = annots.push();
                    annot.subtype(AnnotationType::Link);
                    annot.rect(PdfRect::new(x1, y1, x2, y2));
                    annot.insert(Name(b"Border")).array().items([0.0f32, 0.0, 0.0]);
                    annot
                        .action()
                        .action_type(ActionType::GoTo)
                        .pair(Name(b"D"), Str(link.destination.name().as_bytes()));
                }
            }
            writer.finish();

            pdf.stream(content_id, &page.content);
        }

        let title = format!("Calendar {}", cover::year_range(self.config));
        pdf.document_info(info_id)
            .title(TextStr(&title))
            .producer(TextStr(PRODUCER));

        pdf.finish()
    }
}

/// Renders the whole calendar described by `config` in memory.
pub fn render_document(config: &Config) -> Result<Document> {
    let mut assembler = Assembler::new(config);
    assembler.register_destinations()?;
    assembler.draw_pages()?;
    assembler.finalize()
}

/// Renders the calendar and stores it at `output`.
///
/// The file is written next to its final location first and only moved into
/// place once it is complete, so a failed run leaves no partial output.
pub fn generate(config: &Config, output: &Path) -> Result<Summary> {
    let document = render_document(config)?;

    let mut partial = PathBuf::from(output);
    partial.set_extension("pdf.part");

    let written = fs::write(&partial, &document.bytes).and_then(|_| fs::rename(&partial, output));
    if let Err(err) = written {
        let _ = fs::remove_file(&partial);
        return Err(Error::from(err).with_msg(&format!("could not write '{}'", output.display())));
    }

    log::info!(
        "Wrote {} pages ({} bytes) to '{}'",
        document.summary.page_count,
        document.summary.size,
        output.display()
    );

    Ok(document.summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use crate::config::YearSpec;

    fn config_for(years: &[i32]) -> Config {
        Config::default().with_years(
            years
                .iter()
                .map(|&year| YearSpec::new(year, Rgb::new(0x5a, 0x6a, 0x8b)))
                .collect::<Vec<_>>(),
        )
    }

    fn count(haystack: &[u8], needle: &[u8]) -> usize {
        haystack.windows(needle.len()).filter(|w| *w == needle).count()
    }

    fn count_pages(pdf: &[u8]) -> usize {
        count(pdf, b"/Type /Page") - count(pdf, b"/Type /Pages")
    }

    #[test]
    fn one_year_gives_13_pages() {
        let document = render_document(&config_for(&[2020])).unwrap();
        assert_eq!(document.summary.page_count, 13);
        assert_eq!(count_pages(&document.bytes), 13);
    }

    #[test]
    fn two_years_give_25_pages() {
        let document = render_document(&config_for(&[2020, 2021])).unwrap();
        assert_eq!(document.summary.page_count, 25);
        assert_eq!(count_pages(&document.bytes), 25);
    }

    #[test]
    fn every_month_page_links_every_tab() {
        let document = render_document(&config_for(&[2020, 2021])).unwrap();
        // 24 month pages with 2 year tabs and 12 month tabs each
        assert_eq!(count(&document.bytes, b"/Subtype /Link"), 24 * 14);
        assert_eq!(count(&document.bytes, b"/S /GoTo"), 24 * 14);
    }

    #[test]
    fn only_month_pages_carry_annotations() {
        let document = render_document(&config_for(&[2020])).unwrap();
        assert_eq!(count(&document.bytes, b"/Annots"), 12);
        assert_eq!(count(&document.bytes, b"/Subtype /Link"), 12 * 13);
    }

    #[test]
    fn invalid_configs_are_rejected_before_drawing() {
        let mut zero_spacing = config_for(&[2020]);
        zero_spacing.page.notes_line_spacing = 0.0;

        let mut negative_spacing = config_for(&[2020]);
        negative_spacing.page.notes_line_spacing = -18.0;

        let mut bright = config_for(&[2020]);
        bright.page.dim_factor = 5.0;

        for config in [zero_spacing, negative_spacing, bright, config_for(&[])] {
            let mut assembler = Assembler::new(&config);
            let err = assembler.register_destinations().unwrap_err();
            assert!(matches!(err.kind, ErrorKind::InvalidConfig));
            assert_eq!(assembler.stage(), Stage::Empty);

            let err = render_document(&config).err().unwrap();
            assert!(matches!(err.kind, ErrorKind::InvalidConfig));
        }
    }

    #[test]
    fn invalid_config_writes_nothing() {
        let output = std::env::temp_dir().join(format!("tabcal-invalid-{}.pdf", std::process::id()));

        assert!(generate(&config_for(&[]), &output).is_err());
        assert!(!output.exists());
        assert!(!output.with_extension("pdf.part").exists());
    }

    #[test]
    fn destinations_land_on_their_month() {
        let document = render_document(&config_for(&[2020, 2021])).unwrap();
        let destinations = &document.summary.destinations;

        assert_eq!(destinations.len(), 24);
        assert!(destinations.contains(&("page_2020_01".to_owned(), 1)));
        assert!(destinations.contains(&("page_2020_12".to_owned(), 12)));
        assert!(destinations.contains(&("page_2021_01".to_owned(), 13)));
        assert!(destinations.contains(&("page_2021_12".to_owned(), 24)));
        assert_eq!(count(&document.bytes, b"(page_2021_06)"), 1 + 12);
    }

    #[test]
    fn identical_configs_give_identical_documents() {
        let config = config_for(&[2022, 2023]);
        let first = render_document(&config).unwrap();
        let second = render_document(&config).unwrap();

        assert_eq!(first.summary, second.summary);
        assert_eq!(first.bytes, second.bytes);
    }

    #[test]
    fn stages_run_in_order() {
        let config = config_for(&[2020]);
        let mut assembler = Assembler::new(&config);
        assert_eq!(assembler.stage(), Stage::Empty);
        assert!(assembler.registry().is_none());

        let err = assembler.draw_pages().unwrap_err();
        assert!(matches!(err.kind, ErrorKind::InvalidStage));
        assert!(assembler.finalize().is_err());

        assert_eq!(assembler.register_destinations().unwrap().len(), 12);
        assert_eq!(assembler.stage(), Stage::DestinationsRegistered);
        assert!(assembler.register_destinations().is_err());

        assert_eq!(assembler.draw_pages().unwrap(), 13);
        assert_eq!(assembler.stage(), Stage::PagesDrawn);
        assert!(assembler.draw_pages().is_err());

        let document = assembler.finalize().unwrap();
        assert_eq!(assembler.stage(), Stage::Finalized);
        assert!(document.bytes.starts_with(b"%PDF-"));
        assert!(assembler.finalize().is_err());
    }

    #[test]
    fn generate_writes_complete_file() {
        let output = std::env::temp_dir().join(format!("tabcal-test-{}.pdf", std::process::id()));

        let summary = generate(&config_for(&[2024]), &output).unwrap();
        let written = fs::read(&output).unwrap();
        fs::remove_file(&output).unwrap();

        assert_eq!(summary.page_count, 13);
        assert_eq!(summary.size, written.len());
        assert!(!output.with_extension("pdf.part").exists());
    }

    #[test]
    fn unwritable_output_is_an_error() {
        let output = std::env::temp_dir()
            .join("tabcal-missing-dir")
            .join("nested")
            .join("calendar.pdf");

        let err = generate(&config_for(&[2024]), &output).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::IOError(_)));
        assert!(!output.exists());
    }
}
