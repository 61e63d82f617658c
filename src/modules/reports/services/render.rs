use actix_web::HttpResponse;
use serde_json::{Map, Value};

use crate::core::Result;

/// Rendering boundary: a template name plus a flat context bundle.
///
/// The report core never formats output itself.
pub trait Renderer: Send + Sync {
    fn render(&self, template: &str, context: Map<String, Value>) -> Result<HttpResponse>;
}

/// Answers with the template name and context as JSON, for API clients and
/// front ends that render on their side
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn render(&self, template: &str, context: Map<String, Value>) -> Result<HttpResponse> {
        Ok(HttpResponse::Ok().json(serde_json::json!({
            "template": template,
            "context": context,
        })))
    }
}
