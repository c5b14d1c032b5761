use dashboard_core::catalog::ExportFormat;
use dashboard_core::ExportRequest;
use serde::Serialize;

const NO_FILTER: &str = "Tous";

const CSV_PREVIEW: &str = "id,title,domain\n1,\"Document 1\",\"Cognition vivante\"\n2,\"Document 2\",\"Éthique / gouvernance\"";
const MARKDOWN_PREVIEW: &str = "# Export ObsidiaShell\n\n## Documents\n\n- Document 1 (Cognition vivante)\n- Document 2 (Éthique / gouvernance)";
const PDF_PREVIEW: &str = "Aperçu PDF non disponible en mode prévisualisation";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SampleExport<'a> {
    format: &'a str,
    filters: SampleFilters<'a>,
    documents: [SampleDocument; 2],
    export_date: &'a str,
}

#[derive(Serialize)]
struct SampleFilters<'a> {
    domain: &'a str,
    lot: &'a str,
}

#[derive(Serialize)]
struct SampleDocument {
    id: u32,
    title: &'static str,
    domain: &'static str,
}

/// Renders the preview text shown on the export page.
pub fn render_preview(request: &ExportRequest, export_date: &str) -> String {
    match request.format {
        ExportFormat::Json => {
            let sample = SampleExport {
                format: request.format.as_str(),
                filters: SampleFilters {
                    domain: request.domain.as_deref().unwrap_or(NO_FILTER),
                    lot: request.lot.as_deref().unwrap_or(NO_FILTER),
                },
                documents: [
                    SampleDocument {
                        id: 1,
                        title: "Document 1",
                        domain: "Cognition vivante",
                    },
                    SampleDocument {
                        id: 2,
                        title: "Document 2",
                        domain: "Éthique / gouvernance",
                    },
                ],
                export_date,
            };
            serde_json::to_string_pretty(&sample).unwrap_or_default()
        }
        ExportFormat::Csv => CSV_PREVIEW.to_string(),
        ExportFormat::Markdown => MARKDOWN_PREVIEW.to_string(),
        ExportFormat::Pdf => PDF_PREVIEW.to_string(),
    }
}
