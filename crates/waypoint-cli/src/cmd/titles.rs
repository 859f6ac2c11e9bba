//! `wp titles`: every project title, as offered by the focus selector.


use anyhow::Result;
use waypoint_nav::focus_options;

use super::Session;
use crate::output::render;

/// Execute `wp titles`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or output rendering fails.
pub fn run_titles(session: &Session) -> Result<()> {
    let catalog = session.load_catalog()?;
    let titles = focus_options(catalog.projects());

    render(session.output, &titles, |titles, w| {
        for title in titles {
            writeln!(w, "{title}")?;
        }
        Ok(())
    })
}
