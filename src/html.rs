//! HTML document building.
//!
//! Payment pages interpolate caller-supplied text (amount, description) into
//! markup. Every dynamic value passes through [`escape`] inside the builder;
//! raw markup is only accepted as `&'static str`, which keeps request data
//! out of the unescaped path by construction.

pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[derive(Debug, Default)]
pub struct PageBuilder {
    title: String,
    metas: Vec<(String, String)>,
    body: String,
}

impl PageBuilder {
    pub fn new(title: &str) -> Self {
        Self {
            title: escape(title),
            ..Self::default()
        }
    }

    /// `<meta property="..." content="...">` with the content escaped.
    pub fn meta_property(mut self, property: &'static str, content: &str) -> Self {
        self.metas.push((property.to_string(), escape(content)));
        self
    }

    pub fn heading(mut self, text: &str) -> Self {
        self.body
            .push_str(&format!("    <h1>{}</h1>\n", escape(text)));
        self
    }

    pub fn paragraph(mut self, text: &str) -> Self {
        self.body
            .push_str(&format!("    <p>{}</p>\n", escape(text)));
        self
    }

    /// A label/value row, both sides escaped.
    pub fn data_row(mut self, label: &str, value: &str) -> Self {
        self.body.push_str(&format!(
            "    <div class=\"row\"><span>{}</span><strong>{}</strong></div>\n",
            escape(label),
            escape(value)
        ));
        self
    }

    /// Static trusted markup only. The `'static` bound is what keeps
    /// request-supplied strings out of this method.
    pub fn raw_section(mut self, html: &'static str) -> Self {
        self.body.push_str(html);
        self.body.push('\n');
        self
    }

    pub fn render(self) -> String {
        let mut metas = String::new();
        for (property, content) in &self.metas {
            metas.push_str(&format!(
                "    <meta property=\"{}\" content=\"{}\">\n",
                property, content
            ));
        }

        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n    <meta charset=\"UTF-8\">\n    \
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n    \
             <title>{}</title>\n{}{}</head>\n<body>\n{}</body>\n</html>\n",
            self.title, metas, PAGE_STYLE, self.body
        )
    }
}

const PAGE_STYLE: &str = r#"    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            max-width: 480px;
            margin: 0 auto;
            padding: 32px 20px;
            background: #101830;
            color: #e6e6e6;
        }
        h1 { color: #4f8cff; margin-bottom: 8px; }
        .row {
            display: flex;
            justify-content: space-between;
            padding: 10px 0;
            border-bottom: 1px solid #223;
        }
    </style>
"#;
