use std::sync::Arc;
use tera::Tera;

const TEMPLATE_GLOB: &str = "templates/**/*.html.tera";

/// Template engine wrapper for rendering HTML pages
#[derive(Clone)]
pub struct TemplateEngine {
  tera: Arc<Tera>,
}

impl TemplateEngine {
  /// Loads every template under `templates/`
  pub fn new() -> Result<Self, tera::Error> {
    Self::from_glob(TEMPLATE_GLOB)
  }

  pub fn from_glob(glob: &str) -> Result<Self, tera::Error> {
    let mut tera = Tera::new(glob)?;
    tera.autoescape_on(vec![".html.tera", ".html"]);

    Ok(Self {
      tera: Arc::new(tera),
    })
  }

  /// Render a template with the given context
  pub fn render(&self, template: &str, context: &tera::Context) -> Result<String, tera::Error> {
    self.tera.render(template, context)
  }
}
