use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use handlebars::Handlebars;
use serde::Serialize;

use crate::error::AppError;

const PAGES: &[(&str, &str)] = &[
    ("index", include_str!("../templates/index.hbs")),
    ("about", include_str!("../templates/about.hbs")),
    ("login", include_str!("../templates/login.hbs")),
    ("register", include_str!("../templates/register.hbs")),
    ("dashboard", include_str!("../templates/dashboard.hbs")),
    ("gallery", include_str!("../templates/gallery.hbs")),
    ("403", include_str!("../templates/403.hbs")),
];

/// Page templates compiled into the binary.
pub struct Templates {
    registry: Handlebars<'static>,
}

impl Templates {
    pub fn new() -> Result<Self, AppError> {
        let mut registry = Handlebars::new();
        registry.register_partial("layout", include_str!("../templates/layout.hbs"))?;

        for (name, source) in PAGES {
            registry.register_template_string(name, source)?;
        }

        Ok(Self { registry })
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String, AppError> {
        Ok(self.registry.render(name, data)?)
    }

    /// Render `name` into a response carrying `status`.
    pub fn page<T: Serialize>(
        &self,
        status: StatusCode,
        name: &str,
        data: &T,
    ) -> Result<Response, AppError> {
        let html = self.render(name, data)?;
        Ok((status, Html(html)).into_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_all_pages_render() {
        let templates = Templates::new().unwrap();

        for (name, _) in PAGES {
            let html = templates.render(name, &json!({})).unwrap();
            assert!(html.contains("<nav>"), "{} should use the layout", name);
        }
    }

    #[test]
    fn test_username_is_escaped() {
        let templates = Templates::new().unwrap();
        let html = templates
            .render("dashboard", &json!({ "username": "<script>x</script>" }))
            .unwrap();

        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>x"));
    }

    #[test]
    fn test_nav_follows_visitor() {
        let templates = Templates::new().unwrap();

        let html = templates.render("index", &json!({})).unwrap();
        assert!(html.contains("/login"));
        assert!(!html.contains("/gallery"));

        let html = templates
            .render("index", &json!({ "visitor": { "username": "admin", "is_admin": true } }))
            .unwrap();
        assert!(html.contains("/gallery"));
        assert!(html.contains("/logout"));
    }
}
