//! View templates rendered with Tera
//!
//! All templates are embedded in the binary; there is nothing to deploy
//! next to the executable.

use anyhow::Result;
use std::collections::HashMap;
use tera::{Context, Tera};

/// Template renderer with the embedded views
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all views loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("views/layout.html")),
            ("home.html", include_str!("views/home.html")),
            ("posts.html", include_str!("views/posts.html")),
            ("post.html", include_str!("views/post.html")),
        ])?;

        tera.register_filter("date_format", date_format_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: format a YYYY-MM-DD date for display
fn date_format_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("date_format", "value", String, value);
    let format = match args.get("format") {
        Some(val) => tera::try_get_value!("date_format", "format", String, val),
        None => "LL".to_string(),
    };

    // "LL" expands to a long date like "May 30, 2023"
    if format == "LL" {
        if let Ok(date) = chrono::NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
            return Ok(tera::Value::String(date.format("%B %d, %Y").to_string()));
        }
    }

    Ok(tera::Value::String(s))
}
