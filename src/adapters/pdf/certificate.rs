//! PDF certificate renderer.
//!
//! Renders the four certificate lines onto a landscape A4 page via
//! `printpdf`. Layout is deliberately plain; the domain decides the
//! content, this adapter only draws it.

use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::domain::certificate::Certificate;
use crate::ports::{CertificateRenderer, RenderError};

/// `printpdf`-backed implementation of the `CertificateRenderer` port.
pub struct PdfCertificateRenderer;

impl PdfCertificateRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfCertificateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl CertificateRenderer for PdfCertificateRenderer {
    fn render(&self, certificate: &Certificate) -> Result<Vec<u8>, RenderError> {
        // Landscape A4.
        let (doc, page, layer) = PdfDocument::new(
            "Certificate of Achievement",
            Mm(297.0),
            Mm(210.0),
            "certificate",
        );
        let layer = doc.get_page(page).get_layer(layer);

        let heading = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| RenderError(e.to_string()))?;
        let body = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| RenderError(e.to_string()))?;

        layer.use_text(
            "Certificate of Achievement",
            32.0,
            Mm(40.0),
            Mm(160.0),
            &heading,
        );
        layer.use_text(certificate.headline(), 22.0, Mm(40.0), Mm(130.0), &body);
        layer.use_text(
            format!("Awarded to: {}", certificate.recipient),
            22.0,
            Mm(40.0),
            Mm(105.0),
            &body,
        );
        layer.use_text(
            format!("Issued on: {}", certificate.issued_on),
            16.0,
            Mm(40.0),
            Mm(80.0),
            &body,
        );

        doc.save_to_bytes().map_err(|e| RenderError(e.to_string()))
    }
}
