//! PDF export options.
//!
//! Rasterization happens in the browser; the server only hands out the fixed options for each
//! exportable document.

use std::str::FromStr;

use axum::{extract::Path, Json};
use serde::Serialize;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportDocument {
    Resume,
    CoverLetter,
}

impl ExportDocument {
    fn stem(self) -> &'static str {
        match self {
            ExportDocument::Resume => "resume",
            ExportDocument::CoverLetter => "cover-letter",
        }
    }
}

impl FromStr for ExportDocument {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "resume" => Ok(ExportDocument::Resume),
            "cover-letter" => Ok(ExportDocument::CoverLetter),
            other => Err(AppError::NotFound(format!("No export for document '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageOptions {
    #[serde(rename = "type")]
    pub format: &'static str,
    pub quality: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RasterOptions {
    pub scale: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageOptions {
    pub unit: &'static str,
    pub format: &'static str,
    pub orientation: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfExportOptions {
    pub filename: String,
    /// DOM id of the rendered node to rasterize.
    pub element_id: String,
    /// Millimetres, `[vertical, horizontal]`.
    pub margin: [u32; 2],
    pub image: ImageOptions,
    pub raster: RasterOptions,
    pub page: PageOptions,
}

impl PdfExportOptions {
    pub fn for_document(document: ExportDocument) -> Self {
        let stem = document.stem();
        PdfExportOptions {
            filename: format!("{stem}.pdf"),
            element_id: format!("{stem}-pdf"),
            margin: [15, 15],
            image: ImageOptions {
                format: "jpeg",
                quality: 0.98,
            },
            raster: RasterOptions { scale: 2 },
            page: PageOptions {
                unit: "mm",
                format: "a4",
                orientation: "portrait",
            },
        }
    }
}

/// GET /api/v1/export/:document
pub async fn handle_export_options(
    Path(document): Path<String>,
) -> Result<Json<PdfExportOptions>, AppError> {
    let document: ExportDocument = document.parse()?;
    Ok(Json(PdfExportOptions::for_document(document)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_options() {
        let options = PdfExportOptions::for_document(ExportDocument::Resume);
        assert_eq!(options.filename, "resume.pdf");
        assert_eq!(options.element_id, "resume-pdf");
        assert_eq!(options.margin, [15, 15]);
        assert_eq!(options.raster.scale, 2);
        assert_eq!(options.page.format, "a4");
    }

    #[test]
    fn test_cover_letter_options_serialize() {
        let options = PdfExportOptions::for_document(ExportDocument::CoverLetter);
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["filename"], "cover-letter.pdf");
        assert_eq!(json["elementId"], "cover-letter-pdf");
        assert_eq!(json["image"]["type"], "jpeg");
        assert_eq!(json["image"]["quality"], 0.98);
        assert_eq!(json["page"]["orientation"], "portrait");
        assert_eq!(json["page"]["unit"], "mm");
    }

    #[test]
    fn test_unknown_document_rejected() {
        assert!(matches!(
            "invoice".parse::<ExportDocument>(),
            Err(AppError::NotFound(_))
        ));
    }
}
