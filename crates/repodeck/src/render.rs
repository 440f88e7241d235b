//! Terminal rendering.
//!
//! Pages produce serializable contexts; this module turns them into text with
//! embedded minijinja templates, or into JSON.
//!
//! Filters available to templates:
//!
//! - `nl`: appends a newline
//! - `col(width, align="left")`: truncates or pads to exactly `width` columns
//! - `style(name)`: applies a named style when colors are on
//! - `percent`: `80.0` → `80%`, `33.3` → `33.3%`

use std::collections::BTreeMap;
use std::sync::Arc;

use console::{Alignment, Style, Term};
use minijinja::value::Kwargs;
use minijinja::{Environment, Error, ErrorKind, Value};
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::format::fit;

pub const REPOSITORIES_TEMPLATE: &str = "repositories.jinja";
pub const REPOSITORY_TEMPLATE: &str = "repository.jinja";

const TEMPLATES: [(&str, &str); 3] = [
    ("layout.jinja", include_str!("../templates/layout.jinja")),
    (REPOSITORIES_TEMPLATE, include_str!("../templates/repositories.jinja")),
    (REPOSITORY_TEMPLATE, include_str!("../templates/repository.jinja")),
];

/// Named styles usable with the `style` filter.
pub fn theme() -> BTreeMap<&'static str, Style> {
    BTreeMap::from([
        ("title", Style::new().bold()),
        ("header", Style::new().cyan().bold()),
        ("muted", Style::new().dim()),
        ("accent", Style::new().yellow()),
        ("link", Style::new().blue().underlined()),
        ("nav", Style::new()),
        ("active", Style::new().green().bold()),
        ("error", Style::new().red().bold()),
    ])
}

/// Whether output to stdout should carry colors.
pub fn colors_wanted(no_color: bool) -> bool {
    !no_color && Term::stdout().is_term() && console::colors_enabled()
}

/// Template renderer with the application's templates loaded.
pub struct Renderer {
    env: Environment<'static>,
    color: bool,
}

impl Renderer {
    pub fn new(color: bool) -> Result<Self> {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        register_filters(&mut env, color);
        for (name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Renderer { env, color })
    }

    pub fn color(&self) -> bool {
        self.color
    }

    /// Renders template `name` with `context`.
    pub fn render<S: Serialize>(&self, name: &str, context: &S) -> Result<String> {
        let template = self.env.get_template(name)?;
        Ok(template.render(context)?)
    }

    /// Applies a named style outside of templates (status lines, errors).
    pub fn styled(&self, name: &str, text: &str) -> String {
        apply_style(&theme(), name, text, self.color).unwrap_or_else(|_| text.to_string())
    }
}

/// Pretty-printed JSON of `context`.
pub fn to_json<S: Serialize>(context: &S) -> Result<String> {
    serde_json::to_string_pretty(context).map_err(|e| AppError::Render(e.to_string()))
}

fn register_filters(env: &mut Environment<'static>, color: bool) {
    env.add_filter("nl", |value: Value| -> String { format!("{value}\n") });

    env.add_filter(
        "col",
        |value: Value, width: usize, kwargs: Kwargs| -> std::result::Result<String, Error> {
            let align = match kwargs.get::<Option<String>>("align")?.as_deref() {
                None | Some("left") => Alignment::Left,
                Some("right") => Alignment::Right,
                Some("center") => Alignment::Center,
                Some(other) => {
                    return Err(Error::new(
                        ErrorKind::InvalidOperation,
                        format!("invalid align '{other}', use left, right or center"),
                    ))
                }
            };
            kwargs.assert_all_used()?;
            let text = if value.is_none() || value.is_undefined() {
                String::new()
            } else {
                value.to_string()
            };
            Ok(fit(&text, width, align))
        },
    );

    let styles = Arc::new(theme());
    env.add_filter(
        "style",
        move |value: Value, name: String| -> std::result::Result<String, Error> {
            apply_style(&styles, &name, &value.to_string(), color)
        },
    );

    env.add_filter("percent", |value: f64| -> String {
        if value.fract() == 0.0 {
            format!("{value:.0}%")
        } else {
            format!("{value}%")
        }
    });
}

fn apply_style(
    styles: &BTreeMap<&'static str, Style>,
    name: &str,
    text: &str,
    color: bool,
) -> std::result::Result<String, Error> {
    let style = styles.get(name).ok_or_else(|| {
        Error::new(
            ErrorKind::InvalidOperation,
            format!("unknown style '{name}'"),
        )
    })?;
    Ok(style
        .clone()
        .force_styling(color)
        .apply_to(text)
        .to_string())
}
