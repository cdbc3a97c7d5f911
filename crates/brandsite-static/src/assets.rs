//! Asset pipeline for the stylesheet and behavior script.

use std::fmt::Write as _;

use brandsite_theme::Swatch;

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the stylesheet: theme custom properties followed by the
    /// component styles that consume them.
    pub fn generate_css(swatches: &[Swatch]) -> String {
        let mut css = String::from("/* Generated design system theme */\n\n:root {\n");

        for s in swatches {
            let _ = writeln!(css, "  --{}: {};", s.name, s.value);
        }
        for s in swatches {
            let _ = writeln!(css, "  --{}-hsl: {};", s.name, s.hsl);
        }
        for s in swatches {
            let _ = writeln!(css, "  --{}-foreground: {};", s.name, s.fixed_foreground);
        }
        css.push_str("}\n\n");
        css.push_str(COMPONENT_CSS);
        css
    }

    /// Generate the behavior script, seeding it with the runtime theme object.
    pub fn generate_js(theme_json: &str) -> String {
        format!("{}{}{}", JS_PRELUDE, theme_json, JS_BODY)
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}

const COMPONENT_CSS: &str = r#"* {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

body {
  font-family: system-ui, -apple-system, "Segoe UI", Arial, sans-serif;
  background: #f5f5f5;
  color: #333333;
  line-height: 1.6;
  padding: 2rem;
}

.container {
  max-width: 1200px;
  margin: 0 auto;
}

.header {
  text-align: center;
  margin-bottom: 3rem;
}

.title {
  font-size: 2.5rem;
  color: var(--primary);
  margin-bottom: 1rem;
}

.subtitle {
  font-size: 1.2rem;
  color: hsl(var(--muted-foreground));
}

/* Palette */
.palette {
  display: flex;
  gap: 2rem;
  flex-wrap: wrap;
  justify-content: center;
  margin: 3rem 0;
}

.swatch-card {
  background: #ffffff;
  border-radius: 10px;
  padding: 1.5rem;
  box-shadow: 0 2px 10px rgba(0, 0, 0, 0.1);
  text-align: center;
  min-width: 200px;
}

.swatch {
  width: 100%;
  height: 100px;
  border-radius: 5px;
  margin-bottom: 1rem;
  display: flex;
  align-items: center;
  justify-content: center;
  font-weight: bold;
  border: 1px solid rgba(0, 0, 0, 0.08);
}

.swatch-value {
  font-family: ui-monospace, monospace;
}

.swatch-hsl {
  font-size: 0.875rem;
  color: hsl(var(--muted-foreground));
}

/* Components */
.components h2 {
  margin-bottom: 1.5rem;
}

.component-group {
  margin-bottom: 2rem;
}

.btn {
  padding: 10px 20px;
  border: 2px solid transparent;
  border-radius: 5px;
  margin: 5px;
  cursor: pointer;
  font-weight: bold;
  transition: transform 0.1s, opacity 0.2s;
}

.btn:active,
.btn.is-pressed {
  transform: scale(0.97);
  opacity: 0.85;
}

.btn-primary {
  background-color: var(--primary);
  color: hsl(var(--primary-foreground));
}

.btn-secondary {
  background-color: var(--secondary);
  color: hsl(var(--secondary-foreground));
}

.btn-outline {
  background-color: transparent;
  color: var(--primary);
  border-color: var(--primary);
}

.btn-accent {
  background-color: var(--accent);
  color: hsl(var(--accent-foreground));
}

.card {
  background: #ffffff;
  border-radius: 10px;
  padding: 2rem;
  margin: 2rem 0;
  box-shadow: 0 2px 10px rgba(0, 0, 0, 0.1);
  border-top: 4px solid var(--primary);
}

.card-title {
  color: var(--primary);
  margin-bottom: 0.75rem;
}

.form {
  display: grid;
  gap: 0.5rem;
  max-width: 480px;
  background: var(--muted);
  padding: 1.5rem;
  border-radius: 10px;
}

.input {
  width: 100%;
  padding: 0.5rem 0.75rem;
  border: 1px solid var(--secondary);
  border-radius: 6px;
  font: inherit;
  transition: border-color 0.2s, box-shadow 0.2s;
}

.input:focus {
  outline: none;
  border-color: var(--accent);
  box-shadow: 0 0 0 2px var(--accent);
}

/* Code samples */
.code-sample {
  margin-top: 2rem;
}

.code-sample pre {
  position: relative;
  background: var(--primary);
  color: hsl(var(--primary-foreground));
  border-radius: 8px;
  padding: 1rem;
  overflow-x: auto;
  font-family: ui-monospace, monospace;
  font-size: 0.875rem;
}

.copy-btn {
  position: absolute;
  top: 0.5rem;
  right: 0.5rem;
  padding: 0.25rem 0.75rem;
  font-size: 0.75rem;
  background: var(--secondary);
  color: hsl(var(--secondary-foreground));
  border: none;
  border-radius: 4px;
  cursor: pointer;
}

.footer {
  text-align: center;
  margin-top: 3rem;
  color: hsl(var(--muted-foreground));
}

.footer a {
  color: var(--accent);
}
"#;

const JS_PRELUDE: &str = r#"// Generated design system runtime
(function() {
  'use strict';

  const theme = "#;

const JS_BODY: &str = r#";

  // Resolved theme for downstream scripts
  window.BrandTheme = Object.freeze(theme);

  document.addEventListener('DOMContentLoaded', () => {
    // Click feedback for buttons
    document.querySelectorAll('.btn').forEach(btn => {
      btn.addEventListener('click', () => {
        btn.classList.add('is-pressed');
        setTimeout(() => { btn.classList.remove('is-pressed'); }, 150);
      });
    });

    // Copy button for code samples
    document.querySelectorAll('pre').forEach(pre => {
      if (pre.querySelector('.copy-btn')) return;

      const btn = document.createElement('button');
      btn.className = 'copy-btn';
      btn.textContent = 'Copy';
      btn.setAttribute('type', 'button');

      btn.addEventListener('click', async () => {
        const code = pre.querySelector('code');
        const text = code ? code.textContent : pre.textContent;

        try {
          await navigator.clipboard.writeText(text || '');
          btn.textContent = 'Copied!';
        } catch (err) {
          btn.textContent = 'Error';
        }
        setTimeout(() => { btn.textContent = 'Copy'; }, 2000);
      });

      pre.appendChild(btn);
    });
  });
})();
"#;
