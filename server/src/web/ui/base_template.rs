use crate::web::ui::flash::{FlashMessage, FlashesInterface};
use crate::web::ui::Resources;
use actix_web::HttpRequest;
use std::fmt::Write;

/// Common template data for all ui templates extending the `base.html` template
///
/// This struct must be a part of the template data structure, as the field `base`.
/// The contained data and functions can be used by the individual template's code, as well.
#[derive(Debug)]
pub struct BaseTemplateContext<'a> {
    /// The HTTP request the template is used to respond to. Used for creating ressource urls and
    /// extracting the flash messages
    pub request: &'a HttpRequest,
    /// HTML title
    pub page_title: &'a str,
}

impl BaseTemplateContext<'_> {
    /// Get the URL of an embedded static file, with its content hash appended for cache busting
    pub fn url_for_static(&self, file: &str) -> String {
        let hash = Resources::get(file)
            .map(|f| bytes_to_hex(&f.metadata.sha256_hash()))
            .unwrap_or("unknown".to_string());
        match self.request.url_for("static_resources", [file]) {
            Ok(mut url) => {
                url.query_pairs_mut().append_pair("hash", &hash);
                url.to_string()
            }
            Err(_) => format!("/static/{}?hash={}", file, hash),
        }
    }

    pub fn get_flashes(&self) -> Vec<FlashMessage> {
        self.request.get_and_clear_flashes()
    }
}

fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes.iter().fold(String::new(), |mut output, b| {
        let _ = write!(output, "{:02x}", b);
        output
    })
}
