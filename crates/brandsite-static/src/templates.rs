//! Template engine for rendering the site markup and README.

use minijinja::{context, Environment};

use brandsite_theme::Swatch;

use crate::bundle::{COMPONENTS_JS, INDEX_HTML, README_MD, STYLES_CSS};

/// Context for rendering the site templates.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Context {
    /// Client display name
    pub client: String,
    /// Client slug
    pub slug: String,
    /// Derived view of the four theme slots
    pub swatches: Vec<Swatch>,
    /// Public site URL
    pub site_url: String,
    /// Repository URL
    pub repository_url: String,
    /// Generation date (YYYY-MM-DD)
    pub generated_on: String,
}

/// Template engine using minijinja.
///
/// `.html` templates are auto-escaped, the markdown template is not.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the site templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_template_owned(INDEX_HTML.to_string(), INDEX_TEMPLATE.to_string())
            .expect("Failed to add index template");

        env.add_template_owned(README_MD.to_string(), README_TEMPLATE.to_string())
            .expect("Failed to add readme template");

        Self { env }
    }

    /// Render one of the registered templates.
    pub fn render(&self, template: &str, context: &Context) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template)?;

        tmpl.render(context! {
            client => &context.client,
            slug => &context.slug,
            swatches => &context.swatches,
            site_url => &context.site_url,
            repository_url => &context.repository_url,
            generated_on => &context.generated_on,
            stylesheet => STYLES_CSS,
            script => COMPONENTS_JS,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const INDEX_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Design System - {{ client }}</title>
  <style>
    :root {
{%- for s in swatches %}
      --{{ s.name }}: {{ s.value }};
{%- endfor %}
    }
  </style>
  <link rel="stylesheet" href="{{ stylesheet }}">
</head>
<body>
  <div class="container">
    <header class="header">
      <h1 class="title">Design System</h1>
      <p class="subtitle">{{ client }}</p>
    </header>

    <section class="palette" aria-label="Color palette">
{%- for s in swatches %}
      <div class="swatch-card">
        <div class="swatch" style="background-color: {{ s.value }}; color: {% if s.valid %}{{ s.foreground }}{% else %}inherit{% endif %}">{{ s.name | upper }}</div>
        <h3>{{ s.label }}</h3>
        <p class="swatch-value">{{ s.value }}</p>
        <p class="swatch-hsl">{{ s.hsl }}</p>
      </div>
{%- endfor %}
    </section>

    <section class="components">
      <h2>Components</h2>

      <div class="component-group">
        <h3>Buttons</h3>
        <button type="button" class="btn btn-primary">Primary Button</button>
        <button type="button" class="btn btn-secondary">Secondary Button</button>
        <button type="button" class="btn btn-outline">Outline Button</button>
        <button type="button" class="btn btn-accent">Accent Button</button>
      </div>

      <div class="card">
        <h3 class="card-title">Example Card</h3>
        <p>This design system was generated automatically for {{ client }}.</p>
        <p><strong>Client:</strong> {{ client }}</p>
        <p><strong>Generated on:</strong> {{ generated_on }}</p>
        <button type="button" class="btn btn-accent">Card Action</button>
      </div>

      <form class="form" onsubmit="return false;">
        <h3>Form Fields</h3>
        <label for="field-name">Name</label>
        <input id="field-name" class="input" type="text" placeholder="Your name">
        <label for="field-email">Email</label>
        <input id="field-email" class="input" type="email" placeholder="you@example.com">
        <label for="field-message">Message</label>
        <textarea id="field-message" class="input" rows="3" placeholder="Write something"></textarea>
        <button type="submit" class="btn btn-primary">Send</button>
      </form>

      <div class="code-sample">
        <h3>Usage</h3>
        <pre><code>&lt;button class="btn btn-primary"&gt;Primary Button&lt;/button&gt;</code></pre>
      </div>
    </section>

    <footer class="footer">
      <p>Design system generated automatically</p>
      <p><a href="{{ repository_url }}">Source repository</a></p>
    </footer>
  </div>
  <script src="{{ script }}"></script>
</body>
</html>
"##;

const README_TEMPLATE: &str = r##"# {{ client }} Design System

Static design system page generated for **{{ client }}**.

Live site: {{ site_url }}

## Color Palette

| Token | Value | HSL | Text on color |
|-------|-------|-----|---------------|
{%- for s in swatches %}
| `--{{ s.name }}` | `{{ s.value }}` | `{{ s.hsl }}` | `{{ s.foreground }}` |
{%- endfor %}

## Files

| File | Purpose |
|------|---------|
| `index.html` | Palette swatches and sample components |
| `styles.css` | Theme custom properties and component styles |
| `components.js` | Button feedback, code copy, runtime theme object |
| `theme-config.json` | Machine-readable theme manifest |
| `package.json` | Project manifest |
| `README.md` | This file |

## Local Preview

```bash
git clone {{ repository_url }}.git
cd {{ slug }}
npx serve .
```

Then open http://localhost:3000 in your browser.

The theme is also available at runtime as `window.BrandTheme`.

---

Generated on {{ generated_on }}.
"##;
