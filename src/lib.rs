#[cfg(feature = "cli")]
pub mod cli;
pub mod color;
pub mod config;
pub mod error;
pub mod gradient;
pub mod layout;
#[cfg(feature = "cli")]
pub mod logging;
pub mod params;
pub mod plan_dump;
pub mod render;
pub mod request;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use color::{Color, Palette};
pub use config::{Config, load_config};
pub use error::RenderError;
pub use layout::{RenderPlan, plan_request};
pub use params::{Params, parse_request};
pub use render::render_svg;
pub use request::{ProgressKind, ProgressRequest};
pub use theme::Theme;

/// Everything a render call needs besides the request parameters.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub config: Config,
}

impl RenderOptions {
    pub fn classic() -> Self {
        Self::default()
    }

    pub fn modern() -> Self {
        let mut options = Self::default();
        options.config.theme = Theme::modern();
        options
    }
}

/// Validates `params`, plans the shape and serializes it to SVG.
pub fn render_with_options(
    kind: ProgressKind,
    params: &Params,
    options: &RenderOptions,
) -> Result<String, RenderError> {
    let request = parse_request(kind, params, &options.config)?;
    let plan = plan_request(&request, &options.config);
    Ok(render_svg(&plan, &options.config.theme))
}

/// [`render_with_options`] with the default configuration.
pub fn render(kind: ProgressKind, params: &Params) -> Result<String, RenderError> {
    render_with_options(kind, params, &RenderOptions::default())
}
