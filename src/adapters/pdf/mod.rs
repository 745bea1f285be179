//! PDF adapters.

mod certificate;

pub use certificate::PdfCertificateRenderer;
