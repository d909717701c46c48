use handlebars::Handlebars;

use crate::renderer::generate_renderer;

/// Everything a run needs besides its own inputs. Built once in `main` and
/// passed down, so nothing below reads the clock.
#[derive(Debug)]
pub(crate) struct Context {
    /// Default date, `YYYY-MM-DD`.
    pub today: String,
    pub handlebars: Handlebars<'static>,
}

impl Context {
    pub fn new(today: impl Into<String>) -> anyhow::Result<Self> {
        Ok(Self {
            today: today.into(),
            handlebars: generate_renderer()?,
        })
    }

    pub fn from_clock() -> anyhow::Result<Self> {
        Self::new(chrono::Local::now().format("%Y-%m-%d").to_string())
    }
}
